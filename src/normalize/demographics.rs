//! Demographics normalization: gender, pronouns, age brackets, and
//! self-identified diversity categories.
//!
//! This data is sensitive. Every function here operates only on information
//! the person stated about themselves -- a self-reported gender field, a
//! literal pronoun annotation, an explicit "I am a ..." / "as a ..." phrase
//! in their own biography. Nothing is ever inferred from names, photos, or
//! any other proxy signal.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use chrono::{Datelike, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::normalize::lexicon::contains_word;

/// Gender descriptor -> canonical value. Single-letter keys match only as
/// standalone tokens.
const GENDER_MAPPINGS: &[(&str, &str)] = &[
    ("non-binary", "non-binary"),
    ("nonbinary", "non-binary"),
    ("genderqueer", "non-binary"),
    ("genderfluid", "non-binary"),
    ("enby", "non-binary"),
    ("nb", "non-binary"),
    ("they", "non-binary"),
    ("them", "non-binary"),
    ("female", "female"),
    ("woman", "female"),
    ("she", "female"),
    ("her", "female"),
    ("hers", "female"),
    ("f", "female"),
    ("male", "male"),
    ("man", "male"),
    ("he", "male"),
    ("him", "male"),
    ("his", "male"),
    ("m", "male"),
    ("prefer not to say", "prefer_not_to_say"),
    ("not specified", "not_specified"),
    ("other", "other"),
];

/// Pronoun set -> canonical form.
const PRONOUN_MAPPINGS: &[(&str, &str)] = &[
    ("he/him/his", "he/him"),
    ("he/him", "he/him"),
    ("she/her/hers", "she/her"),
    ("she/her", "she/her"),
    ("they/them/theirs", "they/them"),
    ("they/them", "they/them"),
    ("ze/zir", "ze/zir"),
    ("ze/hir", "ze/hir"),
    ("xe/xem", "xe/xem"),
    ("any pronouns", "any"),
    ("all pronouns", "any"),
    ("name only", "name_only"),
];

/// Generational age brackets: id, min age, max age, display.
const AGE_BRACKETS: &[(&str, u32, u32, &str)] = &[
    ("gen_z", 18, 27, "Gen Z (18-27)"),
    ("millennial", 28, 43, "Millennial (28-43)"),
    ("gen_x", 44, 59, "Gen X (44-59)"),
    ("boomer", 60, 78, "Baby Boomer (60-78)"),
    ("silent", 79, 99, "Silent Gen (79+)"),
];

/// Generation keywords for text input ("millennial", "gen x").
const GENERATION_KEYWORDS: &[(&str, &str)] = &[
    ("gen z", "gen_z"),
    ("generation z", "gen_z"),
    ("zoomer", "gen_z"),
    ("millennial", "millennial"),
    ("generation y", "millennial"),
    ("gen y", "millennial"),
    ("gen x", "gen_x"),
    ("generation x", "gen_x"),
    ("baby boomer", "boomer"),
    ("boomer", "boomer"),
    ("silent generation", "silent"),
];

/// Self-identified diversity categories. Handled with care: matched only
/// against self-reported fields or explicit first-person statements.
const DIVERSITY_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "african_american",
        &["african american", "black", "afro-american", "afro american"],
    ),
    ("asian", &["asian american", "asian", "aapi"]),
    (
        "hispanic_latino",
        &["hispanic", "latino", "latina", "latinx", "latine"],
    ),
    (
        "native_american",
        &["native american", "indigenous", "american indian", "alaska native"],
    ),
    (
        "pacific_islander",
        &["pacific islander", "hawaiian", "polynesian"],
    ),
    ("middle_eastern", &["middle eastern", "arab", "persian"]),
    ("white", &["white", "caucasian", "european"]),
    (
        "multiracial",
        &["multiracial", "mixed race", "biracial", "multiethnic"],
    ),
    ("lgbtq", &["lgbtqia+", "lgbtqia", "lgbtq+", "lgbtq", "lgbt"]),
    ("gay", &["gay"]),
    ("lesbian", &["lesbian"]),
    ("bisexual", &["bisexual", "bi"]),
    ("transgender", &["transgender", "trans"]),
    ("queer", &["queer"]),
    ("veteran", &["veteran", "military", "armed forces"]),
    (
        "disability",
        &["disabled", "disability", "differently abled", "special needs"],
    ),
    (
        "first_gen",
        &["first generation", "first gen", "first-generation"],
    ),
    ("immigrant", &["immigrant", "refugee", "asylum"]),
    ("woman", &["woman", "female"]),
    (
        "woman_in_tech",
        &["women in tech", "woman in technology", "female in tech"],
    ),
    (
        "woman_in_stem",
        &["women in stem", "woman in stem", "female in stem"],
    ),
    (
        "woman_leader",
        &["women leader", "female leader", "woman executive"],
    ),
];

/// Categories that roll up into the bipoc flag.
const BIPOC_CATEGORIES: &[&str] = &[
    "african_american",
    "asian",
    "hispanic_latino",
    "native_american",
    "pacific_islander",
    "middle_eastern",
];

/// Categories that roll up into the lgbtq flag.
const LGBTQ_CATEGORIES: &[&str] = &["lgbtq", "gay", "lesbian", "bisexual", "transgender", "queer"];

static BIRTH_YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(19\d{2}|20\d{2})\b").expect("birth year regex"));
static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("number regex"));

/// Normalized gender output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenderInfo {
    /// Canonical value: male, female, non-binary, other, prefer_not_to_say,
    /// not_specified.
    pub gender: String,
    pub pronouns: Option<String>,
    pub display: String,
}

impl Default for GenderInfo {
    fn default() -> Self {
        Self {
            gender: "not_specified".to_string(),
            pronouns: None,
            display: "Not Specified".to_string(),
        }
    }
}

/// Normalized age output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgeInfo {
    pub age: Option<u32>,
    pub bracket: Option<String>,
    pub generation: Option<String>,
    pub display: Option<String>,
    pub birth_year: Option<i32>,
}

/// Boolean roll-up flags over the matched diversity categories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiversityFlags {
    pub bipoc: bool,
    pub woman: bool,
    pub woman_in_tech: bool,
    pub woman_in_stem: bool,
    pub lgbtq: bool,
    pub veteran: bool,
    pub disability: bool,
    pub first_generation: bool,
}

impl DiversityFlags {
    pub fn any(&self) -> bool {
        self.bipoc
            || self.woman
            || self.woman_in_tech
            || self.woman_in_stem
            || self.lgbtq
            || self.veteran
            || self.disability
            || self.first_generation
    }
}

/// Normalized diversity output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiversityInfo {
    pub categories: Vec<String>,
    pub flags: DiversityFlags,
    pub display: Vec<String>,
    pub dei_speaker: bool,
}

/// Demographics found by scanning biography text; explicit statements only.
#[derive(Debug, Clone, Default)]
pub struct BioDemographics {
    pub gender: Option<String>,
    pub pronouns: Option<String>,
    pub age_bracket: Option<String>,
    pub diversity: Vec<String>,
}

/// Normalizes self-reported demographic fields.
pub struct DemographicsNormalizer;

impl DemographicsNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Normalize a self-reported gender string, extracting a parenthetical
    /// pronoun annotation when present ("Woman (she/her)").
    pub fn normalize_gender(&self, input: &str) -> GenderInfo {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return GenderInfo::default();
        }
        let mut lowered = trimmed.to_lowercase();

        let mut pronouns = None;
        if let (Some(open), Some(close)) = (lowered.find('('), lowered.rfind(')'))
            && close > open
        {
            let annotation = lowered[open + 1..close].trim().to_string();
            pronouns = Some(
                normalize_pronouns(&annotation).unwrap_or(annotation),
            );
            lowered.truncate(open);
        }

        let gender = GENDER_MAPPINGS
            .iter()
            .find(|(key, _)| {
                if key.len() <= 4 {
                    contains_word(&lowered, key)
                } else {
                    lowered.contains(key)
                }
            })
            .map(|(_, value)| value.to_string())
            .unwrap_or_else(|| "not_specified".to_string());

        // Binary genders imply pronouns when none were stated
        if pronouns.is_none() {
            pronouns = match gender.as_str() {
                "male" => Some("he/him".to_string()),
                "female" => Some("she/her".to_string()),
                _ => None,
            };
        }

        let display = match gender.as_str() {
            "male" => "Male",
            "female" => "Female",
            "non-binary" => "Non-binary",
            "other" => "Other",
            "prefer_not_to_say" => "Prefer not to say",
            _ => "Not Specified",
        };

        GenderInfo {
            gender,
            pronouns,
            display: display.to_string(),
        }
    }

    /// Normalize age input: an exact age, a birth year, an age range, or a
    /// generation keyword. Unrecognized input keeps only the display text.
    pub fn normalize_age_text(&self, input: &str) -> AgeInfo {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return AgeInfo::default();
        }
        let lowered = trimmed.to_lowercase();
        let current_year = Utc::now().year();

        // Birth year takes precedence over bare numbers
        if let Some(m) = BIRTH_YEAR_RE.find(&lowered)
            && let Ok(year) = m.as_str().parse::<i32>()
            && year < current_year
        {
            let age = (current_year - year) as u32;
            return self.age_info_for(age, Some(year));
        }

        for (keyword, bracket_id) in GENERATION_KEYWORDS {
            if lowered.contains(keyword) {
                return bracket_info(bracket_id)
                    .map(|(id, min, max, display)| {
                        let midpoint = min.midpoint(max);
                        AgeInfo {
                            age: Some(midpoint),
                            bracket: Some(id.to_string()),
                            generation: Some(generation_name(display)),
                            display: Some(display.to_string()),
                            birth_year: Some(current_year - midpoint as i32),
                        }
                    })
                    .unwrap_or_default();
            }
        }

        if let Some(m) = NUMBER_RE.find(&lowered)
            && let Ok(age) = m.as_str().parse::<u32>()
        {
            return self.age_info_for(age, Some(current_year - age as i32));
        }

        AgeInfo {
            display: Some(trimmed.to_string()),
            ..AgeInfo::default()
        }
    }

    /// Normalize an exact numeric age.
    pub fn normalize_age(&self, age: u32) -> AgeInfo {
        let current_year = Utc::now().year();
        self.age_info_for(age, Some(current_year - age as i32))
    }

    fn age_info_for(&self, age: u32, birth_year: Option<i32>) -> AgeInfo {
        let bracket = AGE_BRACKETS
            .iter()
            .find(|(_, min, max, _)| age >= *min && age <= *max);
        match bracket {
            Some((id, _, _, display)) => AgeInfo {
                age: Some(age),
                bracket: Some(id.to_string()),
                generation: Some(generation_name(display)),
                display: Some(display.to_string()),
                birth_year,
            },
            None => AgeInfo {
                age: Some(age),
                birth_year,
                ..AgeInfo::default()
            },
        }
    }

    /// Normalize a list of self-identified diversity descriptors.
    pub fn normalize_diversity(&self, inputs: &[String]) -> DiversityInfo {
        let mut categories = BTreeSet::new();
        let mut display = BTreeSet::new();
        let mut flags = DiversityFlags::default();

        for input in inputs {
            let trimmed = input.trim();
            if trimmed.is_empty() {
                continue;
            }
            let lowered = trimmed.to_lowercase();

            for (category, keywords) in DIVERSITY_CATEGORIES {
                let hit = keywords.iter().any(|kw| {
                    if kw.len() <= 3 {
                        contains_word(&lowered, kw)
                    } else {
                        lowered.contains(kw)
                    }
                });
                if hit {
                    categories.insert(category.to_string());
                    apply_flags(&mut flags, category);
                    display.insert(trimmed.to_string());
                }
            }
        }

        let dei_speaker = !categories.is_empty() || flags.any();
        DiversityInfo {
            categories: categories.into_iter().collect(),
            flags,
            display: display.into_iter().collect(),
            dei_speaker,
        }
    }

    /// Extract demographics from biography text.
    ///
    /// Only literal pronoun annotations ("(she/her)", "pronouns: they/them")
    /// and explicit first-person self-identification ("i am a veteran",
    /// "as a latina ...") count. Names, photos, and other proxy signals
    /// never contribute.
    pub fn extract_from_bio(&self, bio: &str) -> BioDemographics {
        if bio.trim().is_empty() {
            return BioDemographics::default();
        }
        let lowered = bio.to_lowercase();

        let mut pronouns = None;
        let mut gender = None;
        for (key, value) in PRONOUN_MAPPINGS {
            if lowered.contains(&format!("({key})")) || lowered.contains(&format!("pronouns: {key}"))
            {
                pronouns = Some(value.to_string());
                gender = match *value {
                    "he/him" => Some("male".to_string()),
                    "she/her" => Some("female".to_string()),
                    "they/them" => Some("non-binary".to_string()),
                    _ => None,
                };
                break;
            }
        }

        let age_bracket = GENERATION_KEYWORDS
            .iter()
            .find(|(keyword, _)| lowered.contains(keyword))
            .map(|(_, bracket)| bracket.to_string());

        let mut diversity = Vec::new();
        if lowered.contains("i am a") || lowered.contains("as a") {
            for (category, keywords) in DIVERSITY_CATEGORIES {
                let stated = keywords.iter().any(|kw| {
                    lowered.contains(&format!("i am a {kw}"))
                        || lowered.contains(&format!("i am an {kw}"))
                        || lowered.contains(&format!("as a {kw}"))
                        || lowered.contains(&format!("as an {kw}"))
                });
                if stated {
                    diversity.push(category.to_string());
                }
            }
        }

        BioDemographics {
            gender,
            pronouns,
            age_bracket,
            diversity,
        }
    }
}

impl Default for DemographicsNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize_pronouns(input: &str) -> Option<String> {
    PRONOUN_MAPPINGS
        .iter()
        .find(|(key, _)| *key == input)
        .map(|(_, value)| value.to_string())
}

fn bracket_info(id: &str) -> Option<(&'static str, u32, u32, &'static str)> {
    AGE_BRACKETS
        .iter()
        .find(|(bracket_id, _, _, _)| *bracket_id == id)
        .copied()
}

/// "Gen X (44-59)" -> "Gen X"
fn generation_name(display: &str) -> String {
    display
        .split(" (")
        .next()
        .unwrap_or(display)
        .to_string()
}

fn apply_flags(flags: &mut DiversityFlags, category: &str) {
    if BIPOC_CATEGORIES.contains(&category) {
        flags.bipoc = true;
    }
    if LGBTQ_CATEGORIES.contains(&category) {
        flags.lgbtq = true;
    }
    match category {
        "woman" | "woman_leader" => flags.woman = true,
        "woman_in_tech" => {
            flags.woman = true;
            flags.woman_in_tech = true;
        }
        "woman_in_stem" => {
            flags.woman = true;
            flags.woman_in_stem = true;
        }
        "veteran" => flags.veteran = true,
        "disability" => flags.disability = true,
        "first_gen" => flags.first_generation = true,
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> DemographicsNormalizer {
        DemographicsNormalizer::new()
    }

    #[test]
    fn gender_with_parenthetical_pronouns() {
        let info = normalizer().normalize_gender("Woman (she/her)");
        assert_eq!(info.gender, "female");
        assert_eq!(info.pronouns.as_deref(), Some("she/her"));
        assert_eq!(info.display, "Female");
    }

    #[test]
    fn gender_single_letter_token() {
        let info = normalizer().normalize_gender("F");
        assert_eq!(info.gender, "female");
        // Binary genders imply pronouns when none stated
        assert_eq!(info.pronouns.as_deref(), Some("she/her"));
    }

    #[test]
    fn gender_non_binary() {
        let info = normalizer().normalize_gender("Non-binary (they/them)");
        assert_eq!(info.gender, "non-binary");
        assert_eq!(info.pronouns.as_deref(), Some("they/them"));
    }

    #[test]
    fn gender_empty_is_not_specified() {
        let info = normalizer().normalize_gender("");
        assert_eq!(info.gender, "not_specified");
        assert_eq!(info.pronouns, None);
    }

    #[test]
    fn gender_no_substring_false_positive() {
        // "male" must not fire inside "female"; table order handles it, and
        // "m" must not fire inside "mentor"
        let info = normalizer().normalize_gender("female");
        assert_eq!(info.gender, "female");
        let info = normalizer().normalize_gender("mentor");
        assert_eq!(info.gender, "not_specified");
    }

    #[test]
    fn age_numeric() {
        let info = normalizer().normalize_age(45);
        assert_eq!(info.bracket.as_deref(), Some("gen_x"));
        assert_eq!(info.generation.as_deref(), Some("Gen X"));
        assert_eq!(info.age, Some(45));
    }

    #[test]
    fn age_from_birth_year_text() {
        let current_year = Utc::now().year();
        let info = normalizer().normalize_age_text("born 1980");
        assert_eq!(info.birth_year, Some(1980));
        assert_eq!(info.age, Some((current_year - 1980) as u32));
    }

    #[test]
    fn age_from_generation_keyword() {
        let info = normalizer().normalize_age_text("millennial");
        assert_eq!(info.bracket.as_deref(), Some("millennial"));
        assert_eq!(info.generation.as_deref(), Some("Millennial"));
    }

    #[test]
    fn age_unparseable_keeps_display() {
        let info = normalizer().normalize_age_text("young at heart");
        assert_eq!(info.bracket, None);
        assert_eq!(info.display.as_deref(), Some("young at heart"));
    }

    #[test]
    fn diversity_rollup_flags() {
        let info = normalizer().normalize_diversity(&[
            "Latina".to_string(),
            "Women in Tech".to_string(),
            "First Generation".to_string(),
        ]);
        assert!(info.categories.contains(&"hispanic_latino".to_string()));
        assert!(info.categories.contains(&"woman_in_tech".to_string()));
        assert!(info.flags.bipoc);
        assert!(info.flags.woman);
        assert!(info.flags.woman_in_tech);
        assert!(info.flags.first_generation);
        assert!(info.dei_speaker);
    }

    #[test]
    fn diversity_empty_input() {
        let info = normalizer().normalize_diversity(&[]);
        assert_eq!(info, DiversityInfo::default());
        assert!(!info.dei_speaker);
    }

    #[test]
    fn diversity_short_keyword_token_only() {
        // "bi" must not match inside "big data speaker"
        let info = normalizer().normalize_diversity(&["big data speaker".to_string()]);
        assert!(!info.categories.contains(&"bisexual".to_string()));
    }

    #[test]
    fn bio_pronoun_annotation() {
        let bio = "Dr. Rivera (she/her) leads the data practice at Acme.";
        let found = normalizer().extract_from_bio(bio);
        assert_eq!(found.pronouns.as_deref(), Some("she/her"));
        assert_eq!(found.gender.as_deref(), Some("female"));
    }

    #[test]
    fn bio_self_identification_only() {
        let bio = "As a veteran, I bring discipline to every engagement.";
        let found = normalizer().extract_from_bio(bio);
        assert_eq!(found.diversity, vec!["veteran".to_string()]);

        // Mentioning a topic is not self-identification
        let bio = "She speaks about veteran hiring programs.";
        let found = normalizer().extract_from_bio(bio);
        assert!(found.diversity.is_empty());
    }

    #[test]
    fn bio_empty() {
        let found = normalizer().extract_from_bio("");
        assert!(found.gender.is_none());
        assert!(found.diversity.is_empty());
    }
}
