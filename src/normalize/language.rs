//! Language normalization: name variants to ISO 639-1 codes plus proficiency
//! levels.
//!
//! Handles non-English spellings ("español"), three-letter abbreviations,
//! regional variants ("brazilian portuguese" -> `pt-BR`) and proficiency
//! descriptors in parenthetical suffixes ("Spanish (Fluent)").

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Language name / variant -> ISO 639-1 code (with regional suffixes where
/// the variant warrants one).
const LANGUAGE_CODES: &[(&str, &str)] = &[
    // Major languages
    ("english", "en"),
    ("spanish", "es"),
    ("español", "es"),
    ("french", "fr"),
    ("français", "fr"),
    ("german", "de"),
    ("deutsch", "de"),
    ("chinese", "zh"),
    ("mandarin", "zh"),
    ("mandarin chinese", "zh"),
    ("cantonese", "zh-yue"),
    ("japanese", "ja"),
    ("korean", "ko"),
    ("arabic", "ar"),
    ("hindi", "hi"),
    ("portuguese", "pt"),
    ("português", "pt"),
    ("russian", "ru"),
    ("italian", "it"),
    ("italiano", "it"),
    ("dutch", "nl"),
    ("nederlands", "nl"),
    ("polish", "pl"),
    ("turkish", "tr"),
    ("swedish", "sv"),
    ("norwegian", "no"),
    ("danish", "da"),
    ("finnish", "fi"),
    ("greek", "el"),
    ("hebrew", "he"),
    ("thai", "th"),
    ("vietnamese", "vi"),
    ("indonesian", "id"),
    ("malay", "ms"),
    ("tagalog", "tl"),
    ("filipino", "tl"),
    ("bengali", "bn"),
    ("urdu", "ur"),
    ("punjabi", "pa"),
    ("tamil", "ta"),
    ("telugu", "te"),
    ("marathi", "mr"),
    ("gujarati", "gu"),
    ("kannada", "kn"),
    ("ukrainian", "uk"),
    ("czech", "cs"),
    ("hungarian", "hu"),
    ("romanian", "ro"),
    ("serbian", "sr"),
    ("croatian", "hr"),
    ("bulgarian", "bg"),
    ("slovak", "sk"),
    ("slovenian", "sl"),
    ("lithuanian", "lt"),
    ("latvian", "lv"),
    ("estonian", "et"),
    ("persian", "fa"),
    ("farsi", "fa"),
    ("swahili", "sw"),
    ("zulu", "zu"),
    ("afrikaans", "af"),
    ("yoruba", "yo"),
    ("igbo", "ig"),
    ("amharic", "am"),
    ("somali", "so"),
    ("hausa", "ha"),
    // Abbreviations
    ("eng", "en"),
    ("spa", "es"),
    ("fra", "fr"),
    ("deu", "de"),
    ("chi", "zh"),
    ("jpn", "ja"),
    ("kor", "ko"),
    ("ara", "ar"),
    ("hin", "hi"),
    ("por", "pt"),
    ("rus", "ru"),
    ("ita", "it"),
    // Regional variants
    ("american english", "en-US"),
    ("british english", "en-GB"),
    ("canadian english", "en-CA"),
    ("australian english", "en-AU"),
    ("american spanish", "es-US"),
    ("mexican spanish", "es-MX"),
    ("european spanish", "es-ES"),
    ("brazilian portuguese", "pt-BR"),
    ("european portuguese", "pt-PT"),
    ("simplified chinese", "zh-CN"),
    ("traditional chinese", "zh-TW"),
];

/// ISO 639-1 base code -> display name.
const CODE_NAMES: &[(&str, &str)] = &[
    ("en", "English"),
    ("es", "Spanish"),
    ("fr", "French"),
    ("de", "German"),
    ("zh", "Chinese"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("ar", "Arabic"),
    ("hi", "Hindi"),
    ("pt", "Portuguese"),
    ("ru", "Russian"),
    ("it", "Italian"),
    ("nl", "Dutch"),
    ("pl", "Polish"),
    ("tr", "Turkish"),
    ("sv", "Swedish"),
    ("no", "Norwegian"),
    ("da", "Danish"),
    ("fi", "Finnish"),
    ("el", "Greek"),
    ("he", "Hebrew"),
    ("th", "Thai"),
    ("vi", "Vietnamese"),
    ("id", "Indonesian"),
    ("ms", "Malay"),
    ("tl", "Filipino"),
    ("bn", "Bengali"),
    ("ur", "Urdu"),
    ("pa", "Punjabi"),
    ("ta", "Tamil"),
    ("te", "Telugu"),
    ("mr", "Marathi"),
    ("gu", "Gujarati"),
    ("kn", "Kannada"),
    ("uk", "Ukrainian"),
    ("cs", "Czech"),
    ("hu", "Hungarian"),
    ("ro", "Romanian"),
    ("sr", "Serbian"),
    ("hr", "Croatian"),
    ("bg", "Bulgarian"),
    ("sk", "Slovak"),
    ("sl", "Slovenian"),
    ("lt", "Lithuanian"),
    ("lv", "Latvian"),
    ("et", "Estonian"),
    ("fa", "Persian"),
    ("sw", "Swahili"),
    ("zu", "Zulu"),
    ("af", "Afrikaans"),
    ("yo", "Yoruba"),
    ("ig", "Igbo"),
    ("am", "Amharic"),
    ("so", "Somali"),
    ("ha", "Hausa"),
];

/// Canonical proficiency buckets, ordered strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Proficiency {
    Native,
    Fluent,
    Conversational,
    Basic,
}

impl Proficiency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Proficiency::Native => "native",
            Proficiency::Fluent => "fluent",
            Proficiency::Conversational => "conversational",
            Proficiency::Basic => "basic",
        }
    }

    fn display(&self) -> &'static str {
        match self {
            Proficiency::Native => "Native",
            Proficiency::Fluent => "Fluent",
            Proficiency::Conversational => "Conversational",
            Proficiency::Basic => "Basic",
        }
    }

    /// Map a descriptor ("mother tongue", "C1", "working knowledge") to a
    /// bucket. Unrecognized descriptors map to nothing rather than guessing.
    pub fn parse(descriptor: &str) -> Option<Self> {
        let d = descriptor.trim().to_lowercase();
        let bucket = match d.as_str() {
            "native" | "mother tongue" | "first language" | "l1" | "native speaker"
            | "native proficiency" => Proficiency::Native,
            "fluent" | "proficient" | "advanced" | "c2" | "c1" | "professional"
            | "bilingual" | "full professional" => Proficiency::Fluent,
            "conversational" | "intermediate" | "b2" | "b1" | "working knowledge"
            | "limited working" | "functional" => Proficiency::Conversational,
            "basic" | "beginner" | "elementary" | "a2" | "a1" | "some" | "limited" => {
                Proficiency::Basic
            }
            _ => return None,
        };
        Some(bucket)
    }
}

/// A single normalized language entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageEntry {
    /// ISO 639-1 code (possibly with region suffix), when recognized.
    pub code: Option<String>,
    /// Display name: from the code table, else the title-cased input.
    pub name: String,
    pub proficiency: Option<Proficiency>,
    pub original: String,
}

/// Aggregated language section of a profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageProfile {
    pub entries: Vec<LanguageEntry>,
    /// Deduplicated codes, sorted.
    pub codes: Vec<String>,
    pub count: usize,
    pub native: Vec<String>,
    pub fluent: Vec<String>,
    pub conversational: Vec<String>,
    pub basic: Vec<String>,
    /// Human-readable summary: "English (Native), Spanish (Fluent), French".
    pub display: Option<String>,
}

impl LanguageProfile {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Maps language name variants and proficiency descriptors to canonical form.
pub struct LanguageNormalizer;

impl LanguageNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Normalize one language string, possibly with an embedded proficiency
    /// descriptor ("Spanish (Fluent)", "fluent german", "fr").
    pub fn normalize_one(&self, input: &str) -> Option<LanguageEntry> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }

        // Parenthetical proficiency first: "English (Native)"
        let (name_part, mut proficiency) = match (trimmed.find('('), trimmed.rfind(')')) {
            (Some(open), Some(close)) if close > open => {
                let descriptor = &trimmed[open + 1..close];
                (trimmed[..open].trim().to_string(), Proficiency::parse(descriptor))
            }
            _ => (trimmed.to_string(), None),
        };

        // Inline descriptor: "fluent german", "german - fluent"
        let mut lang_lower = name_part.to_lowercase();
        if proficiency.is_none() {
            for descriptor in [
                "native speaker",
                "native",
                "mother tongue",
                "fluent",
                "proficient",
                "advanced",
                "bilingual",
                "conversational",
                "intermediate",
                "working knowledge",
                "basic",
                "beginner",
            ] {
                if let Some(pos) = lang_lower.find(descriptor) {
                    proficiency = Proficiency::parse(descriptor);
                    lang_lower.replace_range(pos..pos + descriptor.len(), "");
                    break;
                }
            }
        }
        let lang_lower = lang_lower
            .trim_matches(|c: char| c.is_whitespace() || c == '-' || c == ',')
            .to_string();
        if lang_lower.is_empty() {
            return None;
        }

        // Exact variant lookup, else the bare code itself, else partial match
        let code = lookup_code(&lang_lower)
            .or_else(|| {
                CODE_NAMES
                    .iter()
                    .find(|(c, _)| *c == lang_lower)
                    .map(|(c, _)| c.to_string())
            })
            .or_else(|| {
                LANGUAGE_CODES
                    .iter()
                    .find(|(variant, _)| {
                        variant.len() >= 4
                            && (lang_lower.contains(variant) || variant.contains(&lang_lower))
                    })
                    .map(|(_, code)| code.to_string())
            });

        let name = match &code {
            Some(code) => {
                let base = code.split('-').next().unwrap_or(code);
                CODE_NAMES
                    .iter()
                    .find(|(c, _)| *c == base)
                    .map(|(_, n)| n.to_string())
                    .unwrap_or_else(|| title_case(&lang_lower))
            }
            None => title_case(&lang_lower),
        };

        Some(LanguageEntry {
            code,
            name,
            proficiency,
            original: input.trim().to_string(),
        })
    }

    /// Normalize a list of language strings into the aggregated profile
    /// section: codes, per-proficiency buckets, and a display string.
    /// Empty input yields the empty shape.
    pub fn normalize_list(&self, inputs: &[String]) -> LanguageProfile {
        let mut entries: Vec<LanguageEntry> = Vec::new();
        for input in inputs {
            // Comma-joined input shows up in a couple of sources
            for part in input.split(',') {
                if let Some(entry) = self.normalize_one(part) {
                    // Same language listed twice keeps the stronger proficiency
                    if let Some(existing) = entries.iter_mut().find(|e| {
                        e.code.is_some() && e.code == entry.code || e.name == entry.name
                    }) {
                        if let Some(p) = entry.proficiency
                            && existing.proficiency.is_none_or(|ep| p < ep)
                        {
                            existing.proficiency = Some(p);
                        }
                        continue;
                    }
                    entries.push(entry);
                }
            }
        }

        let mut codes = BTreeSet::new();
        let mut native = Vec::new();
        let mut fluent = Vec::new();
        let mut conversational = Vec::new();
        let mut basic = Vec::new();

        for entry in &entries {
            if let Some(code) = &entry.code {
                codes.insert(code.clone());
                if let Some(p) = entry.proficiency {
                    match p {
                        Proficiency::Native => native.push(code.clone()),
                        Proficiency::Fluent => fluent.push(code.clone()),
                        Proficiency::Conversational => conversational.push(code.clone()),
                        Proficiency::Basic => basic.push(code.clone()),
                    }
                }
            }
        }

        let display = if entries.is_empty() {
            None
        } else {
            let parts: Vec<String> = entries
                .iter()
                .map(|e| match e.proficiency {
                    Some(p) => format!("{} ({})", e.name, p.display()),
                    None => e.name.clone(),
                })
                .collect();
            Some(parts.join(", "))
        };

        let count = entries.len();
        LanguageProfile {
            entries,
            codes: codes.into_iter().collect(),
            count,
            native,
            fluent,
            conversational,
            basic,
            display,
        }
    }
}

impl Default for LanguageNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

fn lookup_code(variant: &str) -> Option<String> {
    LANGUAGE_CODES
        .iter()
        .find(|(v, _)| *v == variant)
        .map(|(_, code)| code.to_string())
}

/// Title-case each whitespace-separated word.
fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> LanguageNormalizer {
        LanguageNormalizer::new()
    }

    fn inputs(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parenthetical_proficiency() {
        let entry = normalizer().normalize_one("English (Native)").unwrap();
        assert_eq!(entry.code.as_deref(), Some("en"));
        assert_eq!(entry.name, "English");
        assert_eq!(entry.proficiency, Some(Proficiency::Native));
    }

    #[test]
    fn bare_iso_code() {
        let entry = normalizer().normalize_one("fr").unwrap();
        assert_eq!(entry.code.as_deref(), Some("fr"));
        assert_eq!(entry.name, "French");
        assert_eq!(entry.proficiency, None);
    }

    #[test]
    fn non_english_spelling() {
        let entry = normalizer().normalize_one("Español").unwrap();
        assert_eq!(entry.code.as_deref(), Some("es"));
        assert_eq!(entry.name, "Spanish");
    }

    #[test]
    fn regional_variant_keeps_suffix() {
        let entry = normalizer().normalize_one("Brazilian Portuguese").unwrap();
        assert_eq!(entry.code.as_deref(), Some("pt-BR"));
        assert_eq!(entry.name, "Portuguese");
    }

    #[test]
    fn inline_proficiency_descriptor() {
        let entry = normalizer().normalize_one("fluent German").unwrap();
        assert_eq!(entry.code.as_deref(), Some("de"));
        assert_eq!(entry.proficiency, Some(Proficiency::Fluent));
    }

    #[test]
    fn unknown_language_preserved() {
        let entry = normalizer().normalize_one("Klingon").unwrap();
        assert_eq!(entry.code, None);
        assert_eq!(entry.name, "Klingon");
    }

    #[test]
    fn cefr_codes() {
        assert_eq!(Proficiency::parse("C2"), Some(Proficiency::Fluent));
        assert_eq!(Proficiency::parse("b1"), Some(Proficiency::Conversational));
        assert_eq!(Proficiency::parse("A1"), Some(Proficiency::Basic));
        assert_eq!(Proficiency::parse("quite good"), None);
    }

    #[test]
    fn list_aggregation() {
        let profile = normalizer().normalize_list(&inputs(&[
            "English (Native)",
            "Spanish (Fluent)",
            "fr",
        ]));
        assert_eq!(profile.codes, vec!["en", "es", "fr"]);
        assert_eq!(profile.native, vec!["en"]);
        assert_eq!(profile.fluent, vec!["es"]);
        assert_eq!(profile.count, 3);
        assert_eq!(
            profile.display.as_deref(),
            Some("English (Native), Spanish (Fluent), French")
        );
    }

    #[test]
    fn comma_joined_input() {
        let profile = normalizer().normalize_list(&inputs(&["English, Spanish, French"]));
        assert_eq!(profile.codes, vec!["en", "es", "fr"]);
        assert_eq!(profile.count, 3);
    }

    #[test]
    fn duplicate_language_keeps_stronger_proficiency() {
        let profile =
            normalizer().normalize_list(&inputs(&["English (Basic)", "English (Native)"]));
        assert_eq!(profile.count, 1);
        assert_eq!(profile.native, vec!["en"]);
        assert!(profile.basic.is_empty());
    }

    #[test]
    fn empty_input_empty_shape() {
        let profile = normalizer().normalize_list(&[]);
        assert_eq!(profile, LanguageProfile::default());
        assert!(profile.display.is_none());
    }
}
