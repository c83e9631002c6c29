//! The canonical speaker profile: one typed record per real-world person.
//!
//! The query layer depends on these field paths staying stable
//! (`expertise.primary_categories`, `metadata.profile_score`, ...), and on
//! free-text fields serializing as scalar strings or flat string lists so
//! the document store can text-index them.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::data::fees::FeeInfo;
use crate::data::location::Location;
use crate::normalize::credential::{Award, Certification, Degree};
use crate::normalize::demographics::DiversityFlags;
use crate::normalize::language::LanguageProfile;
use crate::normalize::speaking::AudienceSize;

/// Quality tier of the parsed corpus a record came from. Lower tiers carry
/// more trust; merges always keep the numerically lowest tier seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum QualityTier {
    #[serde(rename = "cat_1")]
    Cat1,
    #[serde(rename = "cat_2")]
    Cat2,
    #[serde(rename = "cat_3")]
    Cat3,
    #[serde(rename = "cat_4")]
    Cat4,
}

impl QualityTier {
    /// Numeric rank; lower is more trusted.
    pub fn rank(&self) -> u8 {
        match self {
            QualityTier::Cat1 => 1,
            QualityTier::Cat2 => 2,
            QualityTier::Cat3 => 3,
            QualityTier::Cat4 => 4,
        }
    }

    /// Profile-score bonus for records that came through the highest-trust
    /// parsing tiers.
    pub fn score_bonus(&self) -> u32 {
        match self {
            QualityTier::Cat1 => 20,
            QualityTier::Cat2 => 10,
            QualityTier::Cat3 => 5,
            QualityTier::Cat4 => 0,
        }
    }

    /// Parse a tier from a collection name like `"cat_1"`.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "cat_1" => Some(QualityTier::Cat1),
            "cat_2" => Some(QualityTier::Cat2),
            "cat_3" => Some(QualityTier::Cat3),
            "cat_4" => Some(QualityTier::Cat4),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicInfo {
    pub full_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub display_name: Option<String>,
    pub gender: Option<String>,
    pub pronouns: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Demographics {
    pub age: Option<u32>,
    pub age_bracket: Option<String>,
    pub generation: Option<String>,
    pub birth_year: Option<i32>,
    pub diversity_categories: Vec<String>,
    pub diversity_flags: DiversityFlags,
    pub is_dei_speaker: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfessionalInfo {
    pub title: Option<String>,
    pub company: Option<String>,
    pub tagline: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Biography {
    pub brief: Option<String>,
    pub full: Option<String>,
}

/// Layered expertise structure. `original_terms` preserves the verbatim
/// source input so categories can always be re-derived from scratch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Expertise {
    pub original_terms: Vec<String>,
    pub primary_categories: Vec<String>,
    pub secondary_categories: Vec<String>,
    pub parent_categories: Vec<String>,
    pub keywords: Vec<String>,
    pub unmatched: Vec<String>,
    /// Domain-specific verbatim field from the highest-trust source.
    pub research_areas: Vec<String>,
    /// Raw industry terms as scraped, before classification.
    pub industries: Vec<String>,
    pub normalized_industries: NormalizedIndustrySummary,
}

/// The industry classifier output embedded in a profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizedIndustrySummary {
    pub primary: Vec<String>,
    pub secondary: Vec<String>,
    pub keywords: Vec<String>,
    pub unmatched: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub degrees: Vec<Degree>,
    pub certifications: Vec<Certification>,
    pub awards: Vec<Award>,
    /// Award category names ("Emmy Award", "TEDx").
    pub honors: Vec<String>,
}

/// Legacy accumulating education list kept for sources that provide only
/// unstructured degree strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Education {
    pub degrees: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeakingInfo {
    pub years_speaking: Option<u32>,
    pub talks_delivered: Option<u32>,
    pub formats: Vec<String>,
    pub primary_format: Option<String>,
    pub virtual_capable: bool,
    pub can_emcee: bool,
    pub audience_types: Vec<String>,
    pub primary_audience: Option<String>,
    pub sectors_served: Vec<String>,
    pub audience_sizes: AudienceSize,
    pub session_lengths: Vec<String>,
    pub fee: FeeInfo,
    pub accepts_pro_bono: bool,
    /// ISO 639-1 codes mirrored from the languages section.
    pub languages: Vec<String>,
    pub average_rating: Option<f64>,
    pub total_ratings: u32,
    /// Raw event-type strings kept for backward compatibility.
    pub event_types: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub url: String,
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Media {
    pub primary_image: Option<String>,
    pub images: Vec<String>,
    pub videos: Vec<Video>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OnlinePresence {
    pub website: Option<String>,
    /// Platform name -> profile URL.
    pub social_media: BTreeMap<String, String>,
    /// Source site -> listing URL.
    pub booking_sites: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub booking_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Testimonial {
    pub text: String,
    pub rating: Option<f64>,
    pub author: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Engagement {
    pub testimonials: Vec<Testimonial>,
    pub total_events: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub sources: Vec<String>,
    pub primary_source: String,
    pub data_quality_tier: Option<QualityTier>,
    pub profile_score: u32,
    pub completeness_score: u32,
    pub experience_score: u32,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl Default for Metadata {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            sources: Vec::new(),
            primary_source: String::new(),
            data_quality_tier: None,
            profile_score: 0,
            completeness_score: 0,
            experience_score: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

/// The unit of record: one consolidated profile per person.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanonicalProfile {
    /// Stable identity key: hex digest of the normalized full name.
    pub unified_id: String,
    /// Source name -> that source's native identifier. Accumulates across
    /// merges; a person present in N sources carries N entries.
    pub source_ids: BTreeMap<String, String>,
    pub basic_info: BasicInfo,
    pub demographics: Demographics,
    pub professional_info: ProfessionalInfo,
    pub location: Location,
    pub languages: LanguageProfile,
    pub biography: Biography,
    pub expertise: Expertise,
    pub credentials: Credentials,
    pub education: Education,
    pub speaking_info: SpeakingInfo,
    pub media: Media,
    pub online_presence: OnlinePresence,
    pub contact: Contact,
    pub engagement: Engagement,
    pub metadata: Metadata,
}

impl CanonicalProfile {
    /// Social-media profile URLs, normalized for overlap comparison
    /// (lowercased, trailing slash removed). The personal website is
    /// excluded: two different speakers at one organization often list the
    /// same company site, and that alone must never read as same-identity.
    pub fn social_urls(&self) -> Vec<String> {
        let mut urls: Vec<String> = self
            .online_presence
            .social_media
            .values()
            .map(|url| normalize_url(url))
            .collect();
        urls.retain(|u| !u.is_empty());
        urls
    }
}

/// Lowercase and strip a trailing slash so the same link scraped twice
/// compares equal.
pub fn normalize_url(url: &str) -> String {
    url.trim().to_lowercase().trim_end_matches('/').to_string()
}
