//! Shared keyword-table machinery for the taxonomy classifiers.
//!
//! The expertise and industry normalizers run the same four-step match over
//! different tables: exact reverse-index lookup, substring containment (long
//! keywords only), per-word token lookup, and finally "unmatched". This module
//! holds the reverse index and the match algorithm so the taxonomies stay pure
//! data.

use std::collections::HashMap;

/// Keywords at or below this length are excluded from substring matching.
/// Short tokens like "ai" or "hr" appear inside unrelated words far too often.
const MIN_SUBSTRING_KEYWORD_LEN: usize = 4;

/// How a term matched against the keyword table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermMatch {
    /// The whole lowercased term equals a keyword. Strongest signal.
    Exact(&'static str),
    /// A long keyword is contained in the term, or vice versa.
    Contains(&'static str),
    /// A single word of the term equals a keyword.
    Token(&'static str),
}

impl TermMatch {
    /// The matched category id, regardless of match strength.
    pub fn category(&self) -> &'static str {
        match self {
            TermMatch::Exact(c) | TermMatch::Contains(c) | TermMatch::Token(c) => c,
        }
    }
}

/// Reverse index from keyword to category id.
///
/// Keeps both a hash map (for exact and token lookups) and the original
/// insertion order (for the substring scan, where first-match-wins must be
/// deterministic).
pub struct KeywordIndex {
    exact: HashMap<&'static str, &'static str>,
    ordered: Vec<(&'static str, &'static str)>,
}

impl KeywordIndex {
    /// Build the index from `(category id, keyword list)` pairs.
    pub fn build<'a>(
        entries: impl IntoIterator<Item = (&'static str, &'a [&'static str])>,
    ) -> Self {
        let mut exact = HashMap::new();
        let mut ordered = Vec::new();
        for (category, keywords) in entries {
            for &keyword in keywords {
                exact.entry(keyword).or_insert(category);
                ordered.push((keyword, category));
            }
        }
        Self { exact, ordered }
    }

    /// Exact keyword lookup.
    pub fn lookup(&self, keyword: &str) -> Option<&'static str> {
        self.exact.get(keyword).copied()
    }

    /// Run the full match cascade over a lowercased, trimmed term.
    ///
    /// First match wins at each step; steps run in order of decreasing
    /// confidence. Returns `None` only when nothing in the table relates to
    /// the term at all.
    pub fn match_term(&self, term: &str) -> Option<TermMatch> {
        if let Some(category) = self.lookup(term) {
            return Some(TermMatch::Exact(category));
        }

        for &(keyword, category) in &self.ordered {
            if keyword.len() >= MIN_SUBSTRING_KEYWORD_LEN
                && (term.contains(keyword) || keyword.contains(term))
            {
                return Some(TermMatch::Contains(category));
            }
        }

        for word in term.split_whitespace() {
            if let Some(category) = self.lookup(word) {
                return Some(TermMatch::Token(category));
            }
        }

        None
    }

    /// Whether any keyword relates to the term by containment either way.
    /// Used to partition mixed topic/industry lists before normalizing.
    pub fn is_related(&self, term: &str) -> bool {
        if self.lookup(term).is_some() {
            return true;
        }
        self.ordered.iter().any(|&(keyword, _)| {
            keyword.len() >= MIN_SUBSTRING_KEYWORD_LEN
                && (term.contains(keyword) || keyword.contains(term))
        })
    }
}

/// Whether a source term carries no information and should be skipped
/// entirely (not even kept as a search keyword).
pub fn is_skippable_term(term: &str) -> bool {
    let trimmed = term.trim();
    trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("none")
        || trimmed.eq_ignore_ascii_case("n/a")
}

/// Check whether `word` appears as a standalone token of `text` (bounded by
/// non-alphanumeric characters). Used by classifiers whose tables contain
/// very short keys ("mc", "hr", "vp") where raw substring matching would
/// false-positive constantly.
pub fn contains_word(text: &str, word: &str) -> bool {
    text.split(|c: char| !c.is_alphanumeric())
        .any(|token| token == word)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> KeywordIndex {
        KeywordIndex::build([
            ("tech", ["software", "programming", "ai"].as_slice()),
            ("business", ["leadership", "management"].as_slice()),
        ])
    }

    #[test]
    fn exact_match_wins() {
        let m = index().match_term("software").unwrap();
        assert_eq!(m, TermMatch::Exact("tech"));
    }

    #[test]
    fn substring_match_long_keyword() {
        let m = index().match_term("software engineering").unwrap();
        assert_eq!(m, TermMatch::Contains("tech"));
    }

    #[test]
    fn short_keyword_never_substring_matches() {
        // "ai" is contained in "air travel" but must not match there
        assert!(index().match_term("air travel").is_none());
    }

    #[test]
    fn short_keyword_matches_as_token() {
        let m = index().match_term("ai ethics").unwrap();
        // not exact, not substring (2-char guard), but a word of the term
        assert_eq!(m, TermMatch::Token("tech"));
    }

    #[test]
    fn unmatched_returns_none() {
        assert!(index().match_term("underwater basket weaving").is_none());
    }

    #[test]
    fn skippable_terms() {
        assert!(is_skippable_term(""));
        assert!(is_skippable_term("  "));
        assert!(is_skippable_term("None"));
        assert!(is_skippable_term("N/A"));
        assert!(!is_skippable_term("nonexistent tech"));
    }

    #[test]
    fn contains_word_token_boundaries() {
        assert!(contains_word("master of ceremonies (mc)", "mc"));
        assert!(!contains_word("mcmaster university", "mc"));
    }
}
