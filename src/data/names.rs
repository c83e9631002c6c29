//! Name parsing, normalization, and matching utilities.
//!
//! Source sites disagree wildly about names: honorific titles ("Dr. Jane
//! Smith"), HTML entities, parenthesized nicknames, suffixes, accents, and
//! plain junk. This module produces clean display components plus an
//! accent-insensitive normalized form used for identity keys.

use unicode_normalization::UnicodeNormalization;

/// Honorific titles stripped before splitting a name into components.
const TITLES: &[&str] = &[
    "dr.", "dr", "prof.", "prof", "professor", "mr.", "mr", "mrs.", "mrs", "ms.", "ms",
];

/// Known name suffixes to extract from the last-name portion.
const SUFFIXES: &[&str] = &["iv", "iii", "ii", "jr", "sr"];

/// Parsed, cleaned name components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameParts {
    /// Cleaned first name(s): "H. Paul", "María"
    pub first: String,
    /// Cleaned last name: "O'Brien", "LeBlanc". Empty for single-token names.
    pub last: String,
    /// Display-quality full name with the title retained: "Dr. Jane Smith"
    pub display: String,
    /// Suffix if detected: "III", "Jr"
    pub suffix: Option<String>,
    /// Nicknames extracted from parentheses or quotes: ["Ken"], ["Butch"]
    pub nicknames: Vec<String>,
}

/// Decode common HTML entities found in scraped name fields.
///
/// Handles both named entities (`&amp;`, `&uuml;`) and numeric references
/// (`&#39;`, `&#x27;`).
pub(crate) fn decode_html_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    htmlize::unescape(s).to_string()
}

/// Extract parenthesized or quoted nicknames from a name string.
///
/// `"William (Ken)"` -> `("William", vec!["Ken"])`
/// `"Thomas \"Butch\""` -> `("Thomas", vec!["Butch"])`
fn extract_nicknames(s: &str) -> (String, Vec<String>) {
    let mut nicknames = Vec::new();
    let mut cleaned = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '(' {
            let mut nick = String::new();
            for inner in chars.by_ref() {
                if inner == ')' {
                    break;
                }
                nick.push(inner);
            }
            let nick = nick.trim().to_string();
            if !nick.is_empty() {
                nicknames.push(nick);
            }
        } else if ch == '"' || ch == '\u{201C}' || ch == '\u{201D}' {
            let mut nick = String::new();
            for inner in chars.by_ref() {
                if inner == '"' || inner == '\u{201C}' || inner == '\u{201D}' {
                    break;
                }
                nick.push(inner);
            }
            let nick = nick.trim().to_string();
            if !nick.is_empty() {
                nicknames.push(nick);
            }
        } else {
            cleaned.push(ch);
        }
    }

    // Collapse multiple spaces left by extraction
    let cleaned = collapse_whitespace(&cleaned);
    (cleaned, nicknames)
}

/// Extract a suffix (Jr, Sr, II, III, IV) from the final token.
///
/// `"LeBlanc III"` -> `("LeBlanc", Some("III"))`
fn extract_suffix(name: &str) -> (String, Option<String>) {
    let tokens: Vec<&str> = name.split_whitespace().collect();
    if tokens.len() < 2 {
        return (name.to_string(), None);
    }

    let candidate = tokens.last().unwrap();
    let candidate_normalized = candidate.to_lowercase().trim_end_matches('.').to_string();

    if SUFFIXES.contains(&candidate_normalized.as_str()) {
        let name_part = tokens[..tokens.len() - 1].join(" ");
        return (name_part, Some(candidate.to_string()));
    }

    (name.to_string(), None)
}

/// Strip junk commonly found in scraped name fields.
///
/// - Trailing commas: `"Cronenberger,"` -> `"Cronenberger"`
/// - Email addresses: `"jane.doe@example.com"` -> `""` (returns empty)
fn strip_junk(s: &str) -> String {
    let s = s.trim();

    // If the string looks like an email, return empty
    if s.contains('@') && s.contains('.') && !s.contains(' ') {
        return String::new();
    }

    s.trim_end_matches(',').trim().to_string()
}

/// Remove leading honorific titles ("Dr.", "Prof") from a name.
fn strip_titles(s: &str) -> String {
    let mut rest = s.trim();
    loop {
        let Some(first_token) = rest.split_whitespace().next() else {
            break;
        };
        if TITLES.contains(&first_token.to_lowercase().as_str()) {
            rest = rest[first_token.len()..].trim_start();
        } else {
            break;
        }
    }
    rest.to_string()
}

/// Collapse runs of whitespace into single spaces and trim.
fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse a free-form full name ("Dr. Jane (JJ) Smith Jr.") into structured
/// parts.
///
/// Handles HTML entities, honorific titles, nicknames, suffixes, and junk.
/// Returns `None` when nothing name-like survives cleaning.
///
/// # Examples
///
/// ```
/// use podium::data::names::parse_person_name;
///
/// let parts = parse_person_name("Dr. Jane Smith").unwrap();
/// assert_eq!(parts.first, "Jane");
/// assert_eq!(parts.last, "Smith");
/// assert_eq!(parts.display, "Dr. Jane Smith");
/// ```
pub fn parse_person_name(full_name: &str) -> Option<NameParts> {
    let decoded = decode_html_entities(full_name);
    let cleaned = strip_junk(&decoded);
    if cleaned.is_empty() {
        return None;
    }

    let display = collapse_whitespace(&cleaned);
    let (no_nicks, nicknames) = extract_nicknames(&cleaned);
    let untitled = strip_titles(&no_nicks);
    let (name_part, suffix) = extract_suffix(&untitled);
    let name_part = collapse_whitespace(&name_part);

    if name_part.is_empty() {
        return None;
    }

    let mut tokens = name_part.split_whitespace();
    let first = tokens.next().unwrap_or_default().to_string();
    let last = tokens.collect::<Vec<_>>().join(" ");

    Some(NameParts {
        first,
        last,
        display,
        suffix,
        nicknames,
    })
}

/// Normalize a name string for identity keys and matching.
///
/// Pipeline: lowercase -> NFD decompose -> strip combining marks ->
/// keep only alphanumeric characters (drops punctuation, hyphens, and
/// whitespace).
///
/// This produces a compact, accent-free string so that "José García",
/// "Jose Garcia" and "jose  garcia" all become "josegarcia".
///
/// # Examples
///
/// ```
/// use podium::data::names::normalize_for_matching;
///
/// assert_eq!(normalize_for_matching("García"), "garcia");
/// assert_eq!(normalize_for_matching("O'Brien"), "obrien");
/// assert_eq!(normalize_for_matching("Aguirre-Mesa"), "aguirremesa");
/// assert_eq!(normalize_for_matching("Aguirre Mesa"), "aguirremesa");
/// ```
pub fn normalize_for_matching(s: &str) -> String {
    s.to_lowercase()
        .nfd()
        .filter(|c| {
            // Keep only non-combining alphanumeric characters -- strip everything else
            c.is_alphanumeric() && !unicode_normalization::char::is_combining_mark(*c)
        })
        .collect()
}

/// Normalize a full name for matching, with honorific titles removed first
/// so "Dr. Jane Smith" and "Jane Smith" produce the same key.
pub fn matching_key(full_name: &str) -> String {
    let decoded = decode_html_entities(full_name);
    let (no_nicks, _) = extract_nicknames(&decoded);
    let untitled = strip_titles(&no_nicks);
    let (name_part, _) = extract_suffix(&untitled);
    normalize_for_matching(&name_part)
}

/// Cleaned, lowercased form used for similarity scoring. Unlike
/// [`matching_key`] this keeps word boundaries, which edit-distance ratios
/// need to stay meaningful.
pub fn comparable_name(full_name: &str) -> String {
    let decoded = decode_html_entities(full_name);
    let (no_nicks, _) = extract_nicknames(&decoded);
    let untitled = strip_titles(&no_nicks);
    let (name_part, _) = extract_suffix(&untitled);
    collapse_whitespace(&name_part).to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_apostrophe_entity() {
        assert_eq!(decode_html_entities("O&#39;Brien"), "O'Brien");
    }

    #[test]
    fn decode_umlaut_entity() {
        assert_eq!(decode_html_entities("B&uuml;lent"), "Bülent");
    }

    #[test]
    fn decode_no_entities() {
        assert_eq!(decode_html_entities("Smith"), "Smith");
    }

    #[test]
    fn extract_paren_nickname() {
        let (cleaned, nicks) = extract_nicknames("William (Ken)");
        assert_eq!(cleaned, "William");
        assert_eq!(nicks, vec!["Ken"]);
    }

    #[test]
    fn extract_quoted_nickname() {
        let (cleaned, nicks) = extract_nicknames("Thomas \"Butch\"");
        assert_eq!(cleaned, "Thomas");
        assert_eq!(nicks, vec!["Butch"]);
    }

    #[test]
    fn extract_no_nicknames() {
        let (cleaned, nicks) = extract_nicknames("Maria Elena");
        assert_eq!(cleaned, "Maria Elena");
        assert!(nicks.is_empty());
    }

    #[test]
    fn extract_suffix_iii() {
        let (name, suffix) = extract_suffix("LeBlanc III");
        assert_eq!(name, "LeBlanc");
        assert_eq!(suffix, Some("III".to_string()));
    }

    #[test]
    fn extract_suffix_jr_period() {
        let (name, suffix) = extract_suffix("Smith Jr.");
        assert_eq!(name, "Smith");
        assert_eq!(suffix, Some("Jr.".to_string()));
    }

    #[test]
    fn extract_no_suffix() {
        let (name, suffix) = extract_suffix("García");
        assert_eq!(name, "García");
        assert_eq!(suffix, None);
    }

    #[test]
    fn strip_trailing_comma() {
        assert_eq!(strip_junk("Cronenberger,"), "Cronenberger");
    }

    #[test]
    fn strip_email_address() {
        assert_eq!(strip_junk("jane.doe@example.com"), "");
    }

    #[test]
    fn strip_single_title() {
        assert_eq!(strip_titles("Dr. Jane Smith"), "Jane Smith");
    }

    #[test]
    fn strip_stacked_titles() {
        assert_eq!(strip_titles("Prof. Dr. Hans Meyer"), "Hans Meyer");
    }

    #[test]
    fn strip_no_title() {
        assert_eq!(strip_titles("Drew Barry"), "Drew Barry");
    }

    #[test]
    fn normalize_strips_accents() {
        assert_eq!(normalize_for_matching("García"), "garcia");
    }

    #[test]
    fn normalize_strips_apostrophe() {
        assert_eq!(normalize_for_matching("O'Brien"), "obrien");
    }

    #[test]
    fn normalize_strips_hyphen() {
        assert_eq!(normalize_for_matching("Aguirre-Mesa"), "aguirremesa");
    }

    #[test]
    fn normalize_tilde_n() {
        assert_eq!(normalize_for_matching("Muñoz"), "munoz");
    }

    #[test]
    fn normalize_strips_spaces() {
        assert_eq!(normalize_for_matching("Mary Lou"), "marylou");
    }

    #[test]
    fn parse_standard_name() {
        let p = parse_person_name("Jane Smith").unwrap();
        assert_eq!(p.first, "Jane");
        assert_eq!(p.last, "Smith");
        assert_eq!(p.display, "Jane Smith");
        assert_eq!(p.suffix, None);
    }

    #[test]
    fn parse_title_preserved_in_display() {
        let p = parse_person_name("Dr. Jane Smith").unwrap();
        assert_eq!(p.first, "Jane");
        assert_eq!(p.last, "Smith");
        assert_eq!(p.display, "Dr. Jane Smith");
    }

    #[test]
    fn parse_multi_word_last() {
        let p = parse_person_name("Andres Aguirre Mesa").unwrap();
        assert_eq!(p.first, "Andres");
        assert_eq!(p.last, "Aguirre Mesa");
    }

    #[test]
    fn parse_single_token_name() {
        let p = parse_person_name("Cher").unwrap();
        assert_eq!(p.first, "Cher");
        assert_eq!(p.last, "");
    }

    #[test]
    fn parse_html_entity() {
        let p = parse_person_name("Erin O&#39;Brien").unwrap();
        assert_eq!(p.last, "O'Brien");
    }

    #[test]
    fn parse_suffix() {
        let p = parse_person_name("H. Paul LeBlanc III").unwrap();
        assert_eq!(p.first, "H.");
        assert_eq!(p.last, "Paul LeBlanc");
        assert_eq!(p.suffix, Some("III".to_string()));
    }

    #[test]
    fn parse_nickname() {
        let p = parse_person_name("William (Ken) Burchenal").unwrap();
        assert_eq!(p.first, "William");
        assert_eq!(p.last, "Burchenal");
        assert_eq!(p.nicknames, vec!["Ken"]);
    }

    #[test]
    fn parse_email_is_none() {
        assert!(parse_person_name("jane.doe@example.com").is_none());
    }

    #[test]
    fn parse_empty_is_none() {
        assert!(parse_person_name("").is_none());
        assert!(parse_person_name("   ").is_none());
    }

    #[test]
    fn parse_title_only_is_none() {
        assert!(parse_person_name("Dr.").is_none());
    }

    #[test]
    fn matching_key_ignores_title() {
        assert_eq!(matching_key("Dr. Jane Smith"), matching_key("Jane Smith"));
    }

    #[test]
    fn matching_key_ignores_accents_and_punctuation() {
        assert_eq!(matching_key("José García"), matching_key("Jose Garcia"));
    }

    #[test]
    fn comparable_name_keeps_spaces() {
        assert_eq!(comparable_name("Dr. Jane Smith"), "jane smith");
        assert_eq!(comparable_name("José García"), "josé garcía");
    }

    #[test]
    fn matching_key_ignores_suffix() {
        assert_eq!(
            matching_key("H. Paul LeBlanc III"),
            matching_key("H. Paul LeBlanc")
        );
    }
}
