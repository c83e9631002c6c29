//! Derived profile scores.
//!
//! Pure functions over the full profile, recomputed from scratch after every
//! mutation. Scores are never merged arithmetically -- a merge unions the raw
//! data and calls [`recompute`].

use crate::data::profile::CanonicalProfile;
use crate::normalize::speaking::{ExperienceInputs, SpeakingNormalizer};

/// Additive point-budget profile score, 0-100.
///
/// Each row of the table awards points for presence (or a length threshold)
/// of a field; the data-quality tier adds a trust bonus. The sum caps at 100.
pub fn profile_score(profile: &CanonicalProfile) -> u32 {
    let mut score = 0u32;

    // Basic info
    if profile.basic_info.full_name.is_some() {
        score += 5;
    }
    if profile.basic_info.first_name.is_some() && profile.basic_info.last_name.is_some() {
        score += 5;
    }
    if profile.basic_info.pronouns.is_some() {
        score += 5;
    }

    // Demographics
    if profile.demographics.age_bracket.is_some() || profile.demographics.diversity_flags.any() {
        score += 5;
    }

    // Professional info
    if profile.professional_info.title.is_some() {
        score += 5;
    }
    if profile.professional_info.tagline.is_some() {
        score += 5;
    }

    // Credentials
    if !profile.credentials.degrees.is_empty() {
        score += 5;
    }
    if !profile.credentials.certifications.is_empty() {
        score += 5;
    }
    if !profile.credentials.awards.is_empty() {
        score += 5;
    }

    // Languages
    if profile.languages.count > 0 {
        score += 5;
    }

    // Biography length tiers
    match profile.biography.full.as_deref().map(str::len) {
        Some(len) if len > 500 => score += 15,
        Some(len) if len > 200 => score += 10,
        Some(len) if len > 0 => score += 5,
        _ => {}
    }

    // Location specificity
    if profile.location.country.is_some() {
        score += 5;
    }
    if profile.location.city.is_some() || profile.location.state.is_some() {
        score += 5;
    }

    // Expertise
    if !profile.expertise.primary_categories.is_empty() {
        score += 10;
    }
    if !profile.expertise.normalized_industries.primary.is_empty() {
        score += 5;
    }
    if profile.expertise.keywords.len() > 5 {
        score += 5;
    }
    if !profile.expertise.research_areas.is_empty() {
        score += 5;
    }

    // Education
    if !profile.education.degrees.is_empty() {
        score += 5;
    }

    // Speaking info
    if profile.speaking_info.fee.is_set() {
        score += 5;
    }
    if !profile.speaking_info.formats.is_empty() {
        score += 5;
    }
    if profile.speaking_info.average_rating.is_some_and(|r| r > 4.0) {
        score += 5;
    }

    // Media
    if !profile.media.images.is_empty() {
        score += 5;
    }
    if !profile.media.videos.is_empty() {
        score += 5;
    }

    // Contact
    if profile.contact.email.is_some() || profile.contact.booking_url.is_some() {
        score += 5;
    }

    // Trust bonus from the parsed-corpus tier
    if let Some(tier) = profile.metadata.data_quality_tier {
        score += tier.score_bonus();
    }

    score.min(100)
}

/// Completeness: the share of interesting sub-fields that are filled, as a
/// percentage. A field counts as filled when it is a non-empty scalar or a
/// non-empty collection.
pub fn completeness_score(profile: &CanonicalProfile) -> u32 {
    let checks: &[bool] = &[
        profile.basic_info.full_name.is_some(),
        profile.basic_info.first_name.is_some(),
        profile.basic_info.last_name.is_some(),
        profile.basic_info.pronouns.is_some(),
        profile.demographics.age_bracket.is_some(),
        profile.demographics.generation.is_some(),
        profile.professional_info.title.is_some(),
        profile.professional_info.company.is_some(),
        !profile.credentials.degrees.is_empty(),
        !profile.credentials.certifications.is_empty(),
        !profile.credentials.awards.is_empty(),
        !profile.languages.codes.is_empty(),
        profile.location.city.is_some(),
        profile.location.country.is_some(),
        profile.location.timezone.is_some(),
        !profile.expertise.primary_categories.is_empty(),
        !profile.expertise.normalized_industries.primary.is_empty(),
        !profile.speaking_info.formats.is_empty(),
        !profile.speaking_info.audience_types.is_empty(),
        profile.speaking_info.fee.is_set(),
        !profile.media.images.is_empty(),
        !profile.media.videos.is_empty(),
        profile.contact.email.is_some(),
        profile.contact.phone.is_some(),
    ];

    let filled = checks.iter().filter(|c| **c).count();
    ((filled * 100) / checks.len()) as u32
}

/// Recompute all derived scores on the profile in place.
pub fn recompute(profile: &mut CanonicalProfile, speaking: &SpeakingNormalizer) {
    profile.metadata.profile_score = profile_score(profile);
    profile.metadata.completeness_score = completeness_score(profile);
    profile.metadata.experience_score = speaking.experience_score(&ExperienceInputs {
        years_speaking: profile.speaking_info.years_speaking,
        talks_delivered: profile.speaking_info.talks_delivered,
        format_count: profile.speaking_info.formats.len(),
        comfortable_with_large: profile.speaking_info.audience_sizes.comfortable_with_large,
        max_audience_size: profile.speaking_info.audience_sizes.max,
        average_rating: profile.speaking_info.average_rating,
    });
}
