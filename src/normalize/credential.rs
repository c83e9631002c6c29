//! Credential normalization: academic degrees, professional certifications,
//! and awards.
//!
//! Degree strings are pulled apart with positional heuristics -- the text
//! after "from"/"at"/"-" is the institution, the residue after stripping the
//! degree type and institution is the field of study. The bio scanners at the
//! bottom are best-effort pattern matching over free text, not guaranteed
//! extraction.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::normalize::lexicon::contains_word;

/// Degree abbreviation/phrase -> canonical form. Multi-word phrases match by
/// containment; short abbreviations match only as standalone tokens so "ba"
/// cannot fire inside "mba".
const DEGREE_MAPPINGS: &[(&str, &str)] = &[
    // Doctoral
    ("phd", "PhD"),
    ("ph.d.", "PhD"),
    ("ph.d", "PhD"),
    ("doctor of philosophy", "PhD"),
    ("dphil", "DPhil"),
    ("d.phil", "DPhil"),
    ("edd", "EdD"),
    ("ed.d.", "EdD"),
    ("doctor of education", "EdD"),
    ("md", "MD"),
    ("m.d.", "MD"),
    ("doctor of medicine", "MD"),
    ("jd", "JD"),
    ("j.d.", "JD"),
    ("juris doctor", "JD"),
    ("dba", "DBA"),
    ("d.b.a.", "DBA"),
    ("doctor of business administration", "DBA"),
    ("psyd", "PsyD"),
    ("psy.d.", "PsyD"),
    ("doctor of psychology", "PsyD"),
    ("dsc", "DSc"),
    ("d.sc.", "DSc"),
    ("doctor of science", "DSc"),
    // Master's
    ("mba", "MBA"),
    ("m.b.a.", "MBA"),
    ("master of business administration", "MBA"),
    ("msc", "MSc"),
    ("m.sc.", "MSc"),
    ("ms", "MS"),
    ("m.s.", "MS"),
    ("master of science", "MS"),
    ("ma", "MA"),
    ("m.a.", "MA"),
    ("master of arts", "MA"),
    ("med", "MEd"),
    ("m.ed.", "MEd"),
    ("master of education", "MEd"),
    ("meng", "MEng"),
    ("m.eng.", "MEng"),
    ("master of engineering", "MEng"),
    ("mph", "MPH"),
    ("m.p.h.", "MPH"),
    ("master of public health", "MPH"),
    ("mpa", "MPA"),
    ("m.p.a.", "MPA"),
    ("master of public administration", "MPA"),
    ("mfa", "MFA"),
    ("m.f.a.", "MFA"),
    ("master of fine arts", "MFA"),
    ("llm", "LLM"),
    ("ll.m.", "LLM"),
    ("master of laws", "LLM"),
    ("msw", "MSW"),
    ("m.s.w.", "MSW"),
    ("master of social work", "MSW"),
    // Bachelor's
    ("ba", "BA"),
    ("b.a.", "BA"),
    ("bachelor of arts", "BA"),
    ("bsc", "BSc"),
    ("b.sc.", "BSc"),
    ("bs", "BS"),
    ("b.s.", "BS"),
    ("bachelor of science", "BS"),
    ("beng", "BEng"),
    ("b.eng.", "BEng"),
    ("bachelor of engineering", "BEng"),
    ("bba", "BBA"),
    ("b.b.a.", "BBA"),
    ("bachelor of business administration", "BBA"),
    ("bed", "BEd"),
    ("b.ed.", "BEd"),
    ("bachelor of education", "BEd"),
    ("llb", "LLB"),
    ("ll.b.", "LLB"),
    ("bachelor of laws", "LLB"),
    ("bfa", "BFA"),
    ("b.f.a.", "BFA"),
    ("bachelor of fine arts", "BFA"),
];

/// Certification key -> canonical form. Same token-vs-phrase matching rule as
/// degrees.
const CERTIFICATION_MAPPINGS: &[(&str, &str)] = &[
    // Project management
    ("pmp", "PMP"),
    ("project management professional", "PMP"),
    ("prince2", "PRINCE2"),
    ("prince 2", "PRINCE2"),
    ("capm", "CAPM"),
    ("scrum master", "CSM"),
    ("csm", "CSM"),
    ("psm", "PSM"),
    ("safe", "SAFe"),
    // IT / security
    ("cissp", "CISSP"),
    ("cisa", "CISA"),
    ("cism", "CISM"),
    ("ccna", "CCNA"),
    ("ccnp", "CCNP"),
    ("ccie", "CCIE"),
    ("mcse", "MCSE"),
    ("mcsa", "MCSA"),
    ("aws certified", "AWS"),
    ("aws solutions architect", "AWS-SA"),
    ("comptia", "CompTIA"),
    ("ceh", "CEH"),
    ("oscp", "OSCP"),
    // Finance / accounting
    ("cpa", "CPA"),
    ("c.p.a.", "CPA"),
    ("certified public accountant", "CPA"),
    ("cfa", "CFA"),
    ("c.f.a.", "CFA"),
    ("chartered financial analyst", "CFA"),
    ("frm", "FRM"),
    ("cma", "CMA"),
    ("certified management accountant", "CMA"),
    ("certified internal auditor", "CIA"),
    ("acca", "ACCA"),
    ("caia", "CAIA"),
    // Quality / process
    ("six sigma black belt", "Six Sigma Black Belt"),
    ("six sigma green belt", "Six Sigma Green Belt"),
    ("black belt", "Six Sigma Black Belt"),
    ("green belt", "Six Sigma Green Belt"),
    ("six sigma", "Six Sigma"),
    // HR
    ("shrm-cp", "SHRM-CP"),
    ("shrm-scp", "SHRM-SCP"),
    ("shrm", "SHRM"),
    ("sphr", "SPHR"),
    ("gphr", "GPHR"),
    ("phr", "PHR"),
    // Medical
    ("board certified", "Board Certified"),
    ("bcps", "BCPS"),
    ("facc", "FACC"),
    ("facs", "FACS"),
    ("facep", "FACEP"),
    // Speaking
    ("certified speaking professional", "CSP"),
    ("csp", "CSP"),
    ("cpae", "CPAE"),
    ("distinguished toastmaster", "DTM"),
    ("dtm", "DTM"),
];

/// Award keyword -> award category.
const AWARD_CATEGORIES: &[(&str, &str)] = &[
    ("nobel", "Nobel Prize"),
    ("pulitzer", "Pulitzer Prize"),
    ("macarthur", "MacArthur Fellowship"),
    ("emmy", "Emmy Award"),
    ("grammy", "Grammy Award"),
    ("oscar", "Academy Award"),
    ("academy award", "Academy Award"),
    ("tony", "Tony Award"),
    ("forbes", "Forbes Recognition"),
    ("tedx", "TEDx"),
    ("ted", "TED"),
    ("bestseller", "Bestselling Author"),
    ("best-selling", "Bestselling Author"),
    ("bestselling", "Bestselling Author"),
    ("inc.", "Inc. Magazine"),
    ("entrepreneur magazine", "Entrepreneur Magazine"),
    ("fast company", "Fast Company"),
    ("40 under 40", "40 Under 40"),
    ("30 under 30", "30 Under 30"),
];

/// Award categories considered top-tier honors.
const PRESTIGIOUS_AWARDS: &[&str] = &["Nobel Prize", "Pulitzer Prize", "MacArthur Fellowship"];
/// Speaking-industry awards.
const SPEAKER_AWARDS: &[&str] = &["CSP", "CPAE", "DTM"];
/// Entertainment/media awards.
const MEDIA_AWARDS: &[&str] = &["Emmy Award", "Grammy Award", "Academy Award", "Tony Award"];

/// Numeric level for sorting degrees: doctoral 5, master's 4, bachelor's 3.
fn degree_level(degree: &str) -> u8 {
    match degree {
        "PhD" | "DPhil" | "EdD" | "MD" | "JD" | "DBA" | "PsyD" | "DSc" => 5,
        "MBA" | "MS" | "MSc" | "MA" | "MEd" | "MEng" | "MPH" | "MPA" | "MFA" | "LLM" | "MSW" => 4,
        "BA" | "BS" | "BSc" | "BEng" | "BBA" | "BEd" | "LLB" | "BFA" => 3,
        "AA" | "AS" => 2,
        _ => 0,
    }
}

static YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(19|20)\d{2}\b").expect("year regex"));

/// A parsed academic degree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Degree {
    /// Canonical degree type ("PhD"), or the raw input when unrecognized.
    pub degree: String,
    pub field: Option<String>,
    pub institution: Option<String>,
    /// Sort level; 0 for unrecognized degrees.
    pub level: u8,
    pub original: String,
}

/// A parsed professional certification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certification {
    pub certification: String,
    pub issuer: Option<String>,
    pub year: Option<u16>,
    pub original: String,
}

/// A normalized award entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Award {
    pub award: String,
    pub category: Option<String>,
    pub year: Option<u16>,
}

/// Aggregated award normalization output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizedAwards {
    pub awards: Vec<Award>,
    pub categories: Vec<String>,
    pub prestigious_count: usize,
    pub speaker_awards: Vec<String>,
    pub media_awards: Vec<String>,
}

/// Credentials found by scanning biography text. Best-effort only.
#[derive(Debug, Clone, Default)]
pub struct BioCredentials {
    pub degrees: Vec<Degree>,
    pub certifications: Vec<Certification>,
    pub awards: Vec<Award>,
}

/// Parses degrees, certifications, and awards into structured form.
pub struct CredentialNormalizer;

impl CredentialNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Parse a single degree string.
    ///
    /// `"Ph.D. Computer Science from MIT"` parses to degree `PhD`, field
    /// `Computer Science`, institution `Mit`. Unrecognized degree types are
    /// preserved verbatim with level 0.
    pub fn normalize_degree(&self, input: &str) -> Option<Degree> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }
        let lowered = trimmed.to_lowercase();

        let matched = DEGREE_MAPPINGS
            .iter()
            .find(|(key, _)| mapping_matches(&lowered, key));

        let institution = extract_after_separator(&lowered, &[" from ", " at ", " - ", ", "]);

        let Some((matched_key, degree_type)) = matched else {
            return Some(Degree {
                degree: trimmed.to_string(),
                field: None,
                institution: institution.as_deref().map(title_case),
                level: 0,
                original: trimmed.to_string(),
            });
        };

        // Field of study: whatever is left once the degree type and the
        // institution clause are removed.
        let mut field_str = lowered.clone();
        if institution.is_some() {
            // Drop the institution clause along with its separator
            for sep in [" from ", " at ", " - ", ", "] {
                if let Some(pos) = field_str.find(sep) {
                    field_str.truncate(pos);
                    break;
                }
            }
        }
        field_str = remove_mapping_key(&field_str, matched_key);
        let field_str = field_str
            .replace(" in ", " ")
            .trim_matches(|c: char| c.is_whitespace() || c == ',' || c == '.' || c == '-')
            .to_string();

        Some(Degree {
            degree: degree_type.to_string(),
            field: (!field_str.is_empty()).then(|| title_case(&field_str)),
            institution: institution.as_deref().map(title_case),
            level: degree_level(degree_type),
            original: trimmed.to_string(),
        })
    }

    /// Parse a certification string, extracting the issuer (after "by"/
    /// "from"/"-") and a year when present.
    pub fn normalize_certification(&self, input: &str) -> Option<Certification> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }
        let lowered = trimmed.to_lowercase();

        let cert_type = CERTIFICATION_MAPPINGS
            .iter()
            .find(|(key, _)| mapping_matches(&lowered, key))
            .map(|(_, value)| value.to_string())
            .unwrap_or_else(|| trimmed.to_string());

        let issuer = extract_after_separator(&lowered, &[" by ", " from ", " - "])
            .as_deref()
            .map(title_case);

        Some(Certification {
            certification: cert_type,
            issuer,
            year: extract_year(trimmed),
            original: trimmed.to_string(),
        })
    }

    /// Normalize a list of awards into entries plus category roll-ups.
    pub fn normalize_awards(&self, awards: &[String]) -> NormalizedAwards {
        let mut entries = Vec::new();
        let mut categories = BTreeSet::new();
        let mut prestigious = BTreeSet::new();
        let mut speaker = BTreeSet::new();
        let mut media = BTreeSet::new();

        for award in awards {
            let trimmed = award.trim();
            if trimmed.is_empty() {
                continue;
            }
            let lowered = trimmed.to_lowercase();

            let category = AWARD_CATEGORIES
                .iter()
                .find(|(key, _)| lowered.contains(key))
                .map(|(_, cat)| cat.to_string());

            if let Some(cat) = &category {
                categories.insert(cat.clone());
                if PRESTIGIOUS_AWARDS.contains(&cat.as_str()) {
                    prestigious.insert(cat.clone());
                } else if SPEAKER_AWARDS.contains(&cat.as_str()) {
                    speaker.insert(cat.clone());
                } else if MEDIA_AWARDS.contains(&cat.as_str()) {
                    media.insert(cat.clone());
                }
            }

            entries.push(Award {
                award: trimmed.to_string(),
                category,
                year: extract_year(trimmed),
            });
        }

        NormalizedAwards {
            awards: entries,
            categories: categories.into_iter().collect(),
            prestigious_count: prestigious.len(),
            speaker_awards: speaker.into_iter().collect(),
            media_awards: media.into_iter().collect(),
        }
    }

    /// Scan biography text for degree, certification, and award mentions.
    ///
    /// Approximate string matching: degree mentions are parsed from a short context
    /// window around the match, certifications and awards are reported by
    /// presence only. Callers should treat the output as hints, not facts.
    pub fn extract_from_bio(&self, bio: &str) -> BioCredentials {
        if bio.trim().is_empty() {
            return BioCredentials::default();
        }
        let lowered = bio.to_lowercase();

        let mut degrees: Vec<Degree> = Vec::new();
        for (key, _) in DEGREE_MAPPINGS {
            // Token-only here: phrase keys get found via their abbreviations
            // anyway, and raw containment over a whole bio is too noisy.
            if key.len() >= 6 || !contains_word(&lowered, key) {
                continue;
            }
            if let Some(pos) = find_word(&lowered, key) {
                let window_end = lowered[pos..]
                    .find(['.', ';', '\n'])
                    .map(|i| pos + i)
                    .unwrap_or(lowered.len())
                    .min(pos + 80);
                if let Some(degree) = self.normalize_degree(&lowered[pos..window_end])
                    && degree.level > 0
                    && !degrees.iter().any(|d| d.degree == degree.degree)
                {
                    degrees.push(degree);
                }
            }
        }

        let mut certifications = Vec::new();
        for (key, value) in CERTIFICATION_MAPPINGS {
            let found = if key.contains(' ') {
                lowered.contains(key)
            } else {
                contains_word(&lowered, key)
            };
            if found && !certifications.iter().any(|c: &Certification| c.certification == *value) {
                certifications.push(Certification {
                    certification: value.to_string(),
                    issuer: None,
                    year: None,
                    original: key.to_string(),
                });
            }
        }

        let mut awards = Vec::new();
        for (key, category) in AWARD_CATEGORIES {
            // Word boundaries for single-word keys: "keynoted" contains
            // "ted" but is not a TED mention.
            let found = if key.chars().any(|c| c == ' ' || c == '.' || c == '-') {
                lowered.contains(key)
            } else {
                contains_word(&lowered, key)
            };
            if found && !awards.iter().any(|a: &Award| a.award == *category) {
                awards.push(Award {
                    award: category.to_string(),
                    category: Some(category.to_string()),
                    year: None,
                });
            }
        }

        BioCredentials {
            degrees,
            certifications,
            awards,
        }
    }
}

impl Default for CredentialNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Phrase keys (containing spaces or dots) match by containment; bare
/// abbreviations only as standalone tokens.
fn mapping_matches(text: &str, key: &str) -> bool {
    if key.contains(' ') || key.contains('.') {
        text.contains(key)
    } else {
        contains_word(text, key)
    }
}

/// Remove a matched mapping key from the text (containment for phrases,
/// token-wise for abbreviations).
fn remove_mapping_key(text: &str, key: &str) -> String {
    if key.contains(' ') || key.contains('.') {
        text.replace(key, " ")
    } else {
        text.split_whitespace()
            .filter(|token| token.trim_matches('.') != key)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// The text after the first matching separator, trimmed. Used for
/// institution ("from MIT") and issuer ("by PMI") clauses.
fn extract_after_separator(text: &str, separators: &[&str]) -> Option<String> {
    for sep in separators {
        if let Some(pos) = text.find(sep) {
            let tail = text[pos + sep.len()..].trim();
            if !tail.is_empty() {
                return Some(tail.to_string());
            }
        }
    }
    None
}

fn extract_year(text: &str) -> Option<u16> {
    YEAR_RE
        .find(text)
        .and_then(|m| m.as_str().parse::<u16>().ok())
}

fn find_word(text: &str, word: &str) -> Option<usize> {
    let mut start = 0;
    while let Some(rel) = text[start..].find(word) {
        let pos = start + rel;
        let before_ok = pos == 0
            || !text[..pos]
                .chars()
                .next_back()
                .is_some_and(|c| c.is_alphanumeric());
        let after = pos + word.len();
        let after_ok = after >= text.len()
            || !text[after..].chars().next().is_some_and(|c| c.is_alphanumeric());
        if before_ok && after_ok {
            return Some(pos);
        }
        start = pos + word.len();
    }
    None
}

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

    fn normalizer() -> CredentialNormalizer {
        CredentialNormalizer::new()
    }

    #[test]
    fn degree_with_field_and_institution() {
        let degree = normalizer()
            .normalize_degree("PhD Computer Science from MIT")
            .unwrap();
        assert_eq!(degree.degree, "PhD");
        assert_eq!(degree.field.as_deref(), Some("Computer Science"));
        assert_eq!(degree.institution.as_deref(), Some("Mit"));
        assert_eq!(degree.level, 5);
    }

    #[test]
    fn degree_dotted_abbreviation() {
        let degree = normalizer().normalize_degree("Ph.D. in Physics").unwrap();
        assert_eq!(degree.degree, "PhD");
        assert_eq!(degree.field.as_deref(), Some("Physics"));
        assert_eq!(degree.institution, None);
    }

    #[test]
    fn mba_does_not_match_ba() {
        let degree = normalizer().normalize_degree("MBA from Wharton").unwrap();
        assert_eq!(degree.degree, "MBA");
        assert_eq!(degree.level, 4);
    }

    #[test]
    fn unrecognized_degree_preserved_with_level_zero() {
        let degree = normalizer()
            .normalize_degree("Certificate in Wine Tasting")
            .unwrap();
        assert_eq!(degree.degree, "Certificate in Wine Tasting");
        assert_eq!(degree.level, 0);
    }

    #[test]
    fn empty_degree_is_none() {
        assert!(normalizer().normalize_degree("").is_none());
        assert!(normalizer().normalize_degree("   ").is_none());
    }

    #[test]
    fn certification_with_year() {
        let cert = normalizer()
            .normalize_certification("PMP certified 2019")
            .unwrap();
        assert_eq!(cert.certification, "PMP");
        assert_eq!(cert.year, Some(2019));
    }

    #[test]
    fn certification_with_issuer() {
        let cert = normalizer()
            .normalize_certification("Scrum Master by Scrum Alliance")
            .unwrap();
        assert_eq!(cert.certification, "CSM");
        assert_eq!(cert.issuer.as_deref(), Some("Scrum Alliance"));
    }

    #[test]
    fn unknown_certification_preserved() {
        let cert = normalizer()
            .normalize_certification("Advanced Basket Weaving Certificate")
            .unwrap();
        assert_eq!(cert.certification, "Advanced Basket Weaving Certificate");
    }

    #[test]
    fn awards_rollup() {
        let awards = normalizer().normalize_awards(&[
            "Nobel Prize in Physics 2021".to_string(),
            "Emmy Award winner".to_string(),
            "TEDx speaker".to_string(),
            "Local hero award".to_string(),
        ]);
        assert_eq!(awards.awards.len(), 4);
        assert_eq!(awards.prestigious_count, 1);
        assert_eq!(awards.media_awards, vec!["Emmy Award"]);
        assert!(awards.categories.contains(&"TEDx".to_string()));
        assert_eq!(awards.awards[0].year, Some(2021));
        // Uncategorized awards keep their text but get no category
        assert_eq!(awards.awards[3].category, None);
    }

    #[test]
    fn tedx_wins_over_ted_prefix() {
        let awards = normalizer().normalize_awards(&["tedx talk 2020".to_string()]);
        assert_eq!(awards.awards[0].category.as_deref(), Some("TEDx"));
    }

    #[test]
    fn empty_awards_empty_shape() {
        let awards = normalizer().normalize_awards(&[]);
        assert_eq!(awards, NormalizedAwards::default());
    }

    #[test]
    fn bio_extraction_finds_degree_and_cert() {
        let bio = "Jane holds a PhD in economics from Stanford. She is a PMP \
                   and has spoken at TEDx events worldwide.";
        let found = normalizer().extract_from_bio(bio);
        assert!(found.degrees.iter().any(|d| d.degree == "PhD"));
        assert!(found.certifications.iter().any(|c| c.certification == "PMP"));
        assert!(found.awards.iter().any(|a| a.award == "TEDx"));
    }

    #[test]
    fn bio_extraction_empty_bio() {
        let found = normalizer().extract_from_bio("");
        assert!(found.degrees.is_empty());
        assert!(found.certifications.is_empty());
        assert!(found.awards.is_empty());
    }

    #[test]
    fn bio_award_scan_requires_word_boundaries() {
        let found = normalizer().extract_from_bio("She has keynoted conferences worldwide.");
        assert!(found.awards.is_empty());
    }

    #[test]
    fn bio_extraction_no_false_token_hits() {
        // "amba" contains "mba" and "ba" as substrings but not as tokens
        let found = normalizer().extract_from_bio("An amba-trained facilitator.");
        assert!(found.degrees.is_empty());
    }
}
