//! Speaking-specific normalizations: session formats, audience types,
//! audience sizes, session durations, and the speaking-experience score.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::normalize::lexicon::contains_word;

/// Format synonym -> canonical tag. Keys shorter than 4 characters match
/// only as standalone tokens.
const FORMAT_MAPPINGS: &[(&str, &str)] = &[
    // Keynotes
    ("keynote", "keynote"),
    ("keynoter", "keynote"),
    ("keynote speaker", "keynote"),
    ("keynote speech", "keynote"),
    ("keynote address", "keynote"),
    ("opening keynote", "keynote"),
    ("closing keynote", "keynote"),
    ("plenary", "keynote"),
    ("general session", "keynote"),
    // Workshops
    ("workshop", "workshop"),
    ("training", "workshop"),
    ("training session", "workshop"),
    ("hands-on", "workshop"),
    ("hands on", "workshop"),
    ("interactive session", "workshop"),
    ("breakout", "workshop"),
    ("breakout session", "workshop"),
    ("concurrent session", "workshop"),
    ("seminar", "workshop"),
    ("masterclass", "workshop"),
    ("bootcamp", "workshop"),
    // Panels
    ("panel", "panel"),
    ("panelist", "panel"),
    ("panel discussion", "panel"),
    ("roundtable", "panel"),
    ("round table", "panel"),
    ("forum", "panel"),
    ("town hall", "panel"),
    // Fireside chats
    ("fireside", "fireside"),
    ("fireside chat", "fireside"),
    ("conversation", "fireside"),
    ("interview", "fireside"),
    ("moderated discussion", "fireside"),
    ("dialogue", "fireside"),
    // Virtual formats
    ("webinar", "webinar"),
    ("virtual", "webinar"),
    ("online session", "webinar"),
    ("virtual event", "webinar"),
    ("zoom", "webinar"),
    ("livestream", "webinar"),
    ("live stream", "webinar"),
    // MC / host
    ("mc", "emcee"),
    ("master of ceremonies", "emcee"),
    ("emcee", "emcee"),
    ("host", "emcee"),
    ("moderator", "emcee"),
    ("facilitator", "emcee"),
    // Other
    ("presentation", "presentation"),
    ("talk", "presentation"),
    ("speech", "presentation"),
    ("lecture", "presentation"),
    ("demo", "demonstration"),
    ("demonstration", "demonstration"),
    ("performance", "performance"),
];

/// Priority order when deriving the single primary format.
const FORMAT_PRIORITY: &[&str] = &[
    "keynote",
    "workshop",
    "panel",
    "fireside",
    "webinar",
    "presentation",
];

/// Audience synonym -> canonical tag.
const AUDIENCE_MAPPINGS: &[(&str, &str)] = &[
    // Executive level
    ("c-suite", "executives"),
    ("csuite", "executives"),
    ("c-level", "executives"),
    ("executive", "executives"),
    ("executives", "executives"),
    ("ceo", "executives"),
    ("cfo", "executives"),
    ("cto", "executives"),
    ("cio", "executives"),
    ("board", "executives"),
    ("board of directors", "executives"),
    ("leadership", "executives"),
    ("senior leadership", "executives"),
    ("vp", "executives"),
    ("vice president", "executives"),
    // Management
    ("management", "management"),
    ("managers", "management"),
    ("middle management", "management"),
    ("directors", "management"),
    ("supervisors", "management"),
    ("team leads", "management"),
    // Sales
    ("sales", "sales_teams"),
    ("sales team", "sales_teams"),
    ("sales force", "sales_teams"),
    ("salespeople", "sales_teams"),
    ("business development", "sales_teams"),
    ("account managers", "sales_teams"),
    // HR
    ("hr", "hr_professionals"),
    ("human resources", "hr_professionals"),
    ("people team", "hr_professionals"),
    ("talent", "hr_professionals"),
    ("recruiting", "hr_professionals"),
    ("l&d", "hr_professionals"),
    ("learning and development", "hr_professionals"),
    // Technical
    ("technical", "technical_teams"),
    ("developers", "technical_teams"),
    ("engineers", "technical_teams"),
    ("it", "technical_teams"),
    ("tech teams", "technical_teams"),
    ("programmers", "technical_teams"),
    ("data scientists", "technical_teams"),
    // Healthcare
    ("healthcare", "healthcare_professionals"),
    ("medical", "healthcare_professionals"),
    ("doctors", "healthcare_professionals"),
    ("physicians", "healthcare_professionals"),
    ("nurses", "healthcare_professionals"),
    ("clinicians", "healthcare_professionals"),
    ("healthcare workers", "healthcare_professionals"),
    // Education
    ("educators", "educators"),
    ("teachers", "educators"),
    ("faculty", "educators"),
    ("professors", "educators"),
    ("academic", "educators"),
    ("students", "students"),
    ("university", "students"),
    ("college", "students"),
    ("graduate students", "students"),
    // General
    ("general audience", "general_public"),
    ("public", "general_public"),
    ("mixed", "general_public"),
    ("all employees", "all_staff"),
    ("all staff", "all_staff"),
    ("company-wide", "all_staff"),
    ("organization-wide", "all_staff"),
    // Specialized
    ("entrepreneurs", "entrepreneurs"),
    ("startups", "entrepreneurs"),
    ("founders", "entrepreneurs"),
    ("investors", "investors"),
    ("vcs", "investors"),
    ("venture capitalists", "investors"),
    ("nonprofit", "nonprofit"),
    ("non-profit", "nonprofit"),
    ("association", "associations"),
    ("government", "government"),
    ("public sector", "government"),
];

/// Priority order when deriving the single primary audience.
const AUDIENCE_PRIORITY: &[&str] = &[
    "executives",
    "management",
    "healthcare_professionals",
    "educators",
    "sales_teams",
    "hr_professionals",
    "general_public",
];

/// Known duration phrases, in minutes. Checked before numeric extraction so
/// "TED talk" and "half day" resolve correctly.
const DURATION_MAPPINGS: &[(&str, u32)] = &[
    ("lightning", 15),
    ("ted talk", 18),
    ("tedx", 18),
    ("half hour", 30),
    ("one hour", 60),
    ("half day", 240),
    ("full day", 480),
    ("multi-day", 960),
];

static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("number regex"));

/// Audience size brackets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeBracket {
    Small,
    Medium,
    Large,
    Xlarge,
}

impl SizeBracket {
    fn for_count(n: u32) -> Self {
        match n {
            0..=50 => SizeBracket::Small,
            51..=500 => SizeBracket::Medium,
            501..=5000 => SizeBracket::Large,
            _ => SizeBracket::Xlarge,
        }
    }

    fn bounds(&self) -> (u32, Option<u32>) {
        match self {
            SizeBracket::Small => (1, Some(50)),
            SizeBracket::Medium => (51, Some(500)),
            SizeBracket::Large => (501, Some(5000)),
            SizeBracket::Xlarge => (5001, None),
        }
    }

    fn display(&self) -> &'static str {
        match self {
            SizeBracket::Small => "Small (1-50)",
            SizeBracket::Medium => "Medium (51-500)",
            SizeBracket::Large => "Large (501-5000)",
            SizeBracket::Xlarge => "Extra Large (5000+)",
        }
    }

    fn parse(text: &str) -> Option<Self> {
        let t = text.to_lowercase();
        // "xlarge"/"extra large" must be checked before "large"
        if t.contains("xlarge") || t.contains("extra large") || t.contains("x-large") {
            Some(SizeBracket::Xlarge)
        } else if t.contains("large") {
            Some(SizeBracket::Large)
        } else if t.contains("medium") {
            Some(SizeBracket::Medium)
        } else if t.contains("small") {
            Some(SizeBracket::Small)
        } else {
            None
        }
    }
}

/// Normalized audience size: bracket plus the numeric range it came from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudienceSize {
    pub bracket: Option<SizeBracket>,
    pub min: Option<u32>,
    pub max: Option<u32>,
    pub display: Option<String>,
    pub comfortable_with_large: bool,
}

/// Session duration, normalized to minutes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionDuration {
    pub minutes: u32,
    pub display: String,
    /// lightning <= 20 min, standard <= 90, extended <= 240, workshop beyond.
    pub category: &'static str,
    pub flexible: bool,
}

/// Normalized speaking formats plus derived capability flags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizedFormats {
    pub formats: Vec<String>,
    pub primary_format: Option<String>,
    pub virtual_capable: bool,
    pub can_emcee: bool,
    pub original: Vec<String>,
}

/// Normalized audience types plus sector roll-up.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizedAudiences {
    pub audience_types: Vec<String>,
    pub primary_audience: Option<String>,
    pub sectors: Vec<String>,
    pub original: Vec<String>,
}

/// Inputs to the experience score; a subset of the profile's speaking info.
#[derive(Debug, Clone, Default)]
pub struct ExperienceInputs {
    pub years_speaking: Option<u32>,
    pub talks_delivered: Option<u32>,
    pub format_count: usize,
    pub comfortable_with_large: bool,
    pub max_audience_size: Option<u32>,
    pub average_rating: Option<f64>,
}

/// Maps speaking formats, audience descriptors, sizes, and durations to
/// canonical form.
pub struct SpeakingNormalizer;

impl SpeakingNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Normalize a list of format descriptors, deriving the primary format
    /// and the virtual/emcee capability flags.
    pub fn normalize_formats(&self, formats: &[String]) -> NormalizedFormats {
        let mut tags = BTreeSet::new();
        let mut original = Vec::new();

        for format in formats {
            let trimmed = format.trim();
            if trimmed.is_empty() {
                continue;
            }
            original.push(trimmed.to_string());
            if let Some(tag) = table_match(FORMAT_MAPPINGS, &trimmed.to_lowercase()) {
                tags.insert(tag.to_string());
            }
        }

        let primary_format = FORMAT_PRIORITY
            .iter()
            .find(|f| tags.contains(**f))
            .map(|f| f.to_string());
        let virtual_capable = tags.contains("webinar");
        let can_emcee = tags.contains("emcee");

        NormalizedFormats {
            formats: tags.into_iter().collect(),
            primary_format,
            virtual_capable,
            can_emcee,
            original,
        }
    }

    /// Normalize a list of audience descriptors, deriving the primary
    /// audience and the sector roll-up.
    pub fn normalize_audiences(&self, audiences: &[String]) -> NormalizedAudiences {
        let mut tags = BTreeSet::new();
        let mut sectors = BTreeSet::new();
        let mut original = Vec::new();

        for audience in audiences {
            let trimmed = audience.trim();
            if trimmed.is_empty() {
                continue;
            }
            original.push(trimmed.to_string());
            if let Some(tag) = table_match(AUDIENCE_MAPPINGS, &trimmed.to_lowercase()) {
                tags.insert(tag.to_string());
                if let Some(sector) = sector_for(tag) {
                    sectors.insert(sector.to_string());
                }
            }
        }

        let primary_audience = AUDIENCE_PRIORITY
            .iter()
            .find(|a| tags.contains(**a))
            .map(|a| a.to_string());

        NormalizedAudiences {
            audience_types: tags.into_iter().collect(),
            primary_audience,
            sectors: sectors.into_iter().collect(),
            original,
        }
    }

    /// Normalize an exact audience count.
    pub fn audience_size_from_count(&self, count: u32) -> AudienceSize {
        let bracket = SizeBracket::for_count(count);
        let (min, max) = bracket.bounds();
        AudienceSize {
            bracket: Some(bracket),
            min: Some(min),
            max,
            display: Some(bracket.display().to_string()),
            comfortable_with_large: matches!(bracket, SizeBracket::Large | SizeBracket::Xlarge),
        }
    }

    /// Normalize mixed audience-size input: "100-500", "Large", "500+",
    /// "any size". Unparseable input keeps the display text with no bracket.
    pub fn normalize_audience_size(&self, input: &str) -> Option<AudienceSize> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }
        let lowered = trimmed.to_lowercase();

        if let Some(bracket) = SizeBracket::parse(&lowered) {
            let (min, max) = bracket.bounds();
            return Some(AudienceSize {
                bracket: Some(bracket),
                min: Some(min),
                max,
                display: Some(bracket.display().to_string()),
                comfortable_with_large: matches!(
                    bracket,
                    SizeBracket::Large | SizeBracket::Xlarge
                ),
            });
        }

        let numbers: Vec<u32> = NUMBER_RE
            .find_iter(&lowered)
            .filter_map(|m| m.as_str().parse().ok())
            .collect();
        if !numbers.is_empty() {
            let min = numbers[0];
            let max = *numbers.last().unwrap_or(&min);
            let midpoint = min.midpoint(max);
            let bracket = SizeBracket::for_count(midpoint);
            return Some(AudienceSize {
                bracket: Some(bracket),
                min: Some(min),
                max: Some(max),
                display: Some(if min == max {
                    format!("{min}")
                } else {
                    format!("{min}-{max}")
                }),
                comfortable_with_large: max > 500 || lowered.ends_with('+') && min > 500,
            });
        }

        Some(AudienceSize {
            bracket: None,
            min: None,
            max: None,
            display: Some(trimmed.to_string()),
            comfortable_with_large: lowered.contains("large") || lowered.contains("any"),
        })
    }

    /// Normalize a session duration string into minutes plus a category.
    pub fn normalize_duration(&self, input: &str) -> Option<SessionDuration> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }
        let lowered = trimmed.to_lowercase();
        let flexible = lowered.contains("flexible") || lowered.contains("adjustable");

        for (key, minutes) in DURATION_MAPPINGS {
            if lowered.contains(key) {
                return Some(SessionDuration {
                    minutes: *minutes,
                    display: trimmed.to_string(),
                    category: duration_category(*minutes),
                    flexible,
                });
            }
        }

        let number: Option<u32> = NUMBER_RE
            .find(&lowered)
            .and_then(|m| m.as_str().parse().ok());
        if let Some(n) = number {
            let minutes = if lowered.contains("hour") { n * 60 } else { n };
            return Some(SessionDuration {
                minutes,
                display: trimmed.to_string(),
                category: duration_category(minutes),
                flexible,
            });
        }

        None
    }

    /// Speaking-experience score, 0-100.
    ///
    /// Weighted sum of capped components: years speaking (<=20), talks
    /// delivered (<=20), format diversity (4 points per format, <=20),
    /// large-audience comfort (<=20), and average rating (<=20).
    pub fn experience_score(&self, inputs: &ExperienceInputs) -> u32 {
        let mut score = 0u32;

        score += match inputs.years_speaking.unwrap_or(0) {
            20.. => 20,
            10..=19 => 15,
            5..=9 => 10,
            2..=4 => 5,
            _ => 0,
        };

        score += match inputs.talks_delivered.unwrap_or(0) {
            500.. => 20,
            200..=499 => 15,
            100..=199 => 10,
            50..=99 => 5,
            _ => 0,
        };

        score += (inputs.format_count as u32 * 4).min(20);

        if inputs.comfortable_with_large {
            score += 20;
        } else if inputs.max_audience_size.unwrap_or(0) > 500 {
            score += 10;
        }

        let rating = inputs.average_rating.unwrap_or(0.0);
        score += if rating >= 4.8 {
            20
        } else if rating >= 4.5 {
            15
        } else if rating >= 4.0 {
            10
        } else if rating >= 3.5 {
            5
        } else {
            0
        };

        score.min(100)
    }
}

impl Default for SpeakingNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// First-match-wins table lookup: phrase keys by containment, short keys
/// (under 4 chars) as standalone tokens only.
fn table_match(table: &[(&str, &'static str)], text: &str) -> Option<&'static str> {
    for (key, value) in table {
        let hit = if key.len() >= 4 {
            text.contains(key)
        } else {
            contains_word(text, key)
        };
        if hit {
            return Some(value);
        }
    }
    None
}

fn sector_for(audience_tag: &str) -> Option<&'static str> {
    match audience_tag {
        "executives" | "management" | "sales_teams" | "hr_professionals" | "technical_teams"
        | "all_staff" => Some("corporate"),
        "healthcare_professionals" => Some("healthcare"),
        "educators" | "students" => Some("education"),
        "nonprofit" => Some("nonprofit"),
        "government" => Some("government"),
        _ => None,
    }
}

fn duration_category(minutes: u32) -> &'static str {
    match minutes {
        0..=20 => "lightning",
        21..=90 => "standard",
        91..=240 => "extended",
        _ => "workshop",
    }
}
