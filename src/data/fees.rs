//! Speaking-fee parsing: free-text fee strings into a structured range plus
//! a bracket enum the query layer can facet on.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static RANGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$?([\d,]+)\s*[-\u{2013}]\s*\$?([\d,]+)").expect("range regex"));
static UNDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)under\s*\$?([\d,]+)").expect("under regex"));
static OVER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:over\s*\$?([\d,]+)|\$?([\d,]+)\s*\+)").expect("over regex"));

/// Fee bracket derived from the midpoint of the parsed range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeBracket {
    Under5k,
    Range5kTo10k,
    Range10kTo20k,
    Range20kTo30k,
    Range30kTo50k,
    Range50kTo75k,
    Range75kTo100k,
    Over100k,
    PleaseInquire,
}

impl FeeBracket {
    /// Bracket for a parsed range. An open-ended maximum uses the minimum as
    /// the midpoint.
    fn for_range(min: Option<f64>, max: Option<f64>) -> Self {
        let midpoint = match (min, max) {
            (Some(min), Some(max)) => (min + max) / 2.0,
            (Some(min), None) => min,
            (None, Some(max)) => max / 2.0,
            (None, None) => return FeeBracket::PleaseInquire,
        };

        if midpoint < 5_000.0 {
            FeeBracket::Under5k
        } else if midpoint < 10_000.0 {
            FeeBracket::Range5kTo10k
        } else if midpoint < 20_000.0 {
            FeeBracket::Range10kTo20k
        } else if midpoint < 30_000.0 {
            FeeBracket::Range20kTo30k
        } else if midpoint < 50_000.0 {
            FeeBracket::Range30kTo50k
        } else if midpoint < 75_000.0 {
            FeeBracket::Range50kTo75k
        } else if midpoint < 100_000.0 {
            FeeBracket::Range75kTo100k
        } else {
            FeeBracket::Over100k
        }
    }
}

/// Parsed fee information. `display` always preserves the source text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeeInfo {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub display: Option<String>,
    pub bracket: Option<FeeBracket>,
    pub currency: String,
    /// The fee text mentions pro bono / free engagements.
    pub pro_bono: bool,
}

impl FeeInfo {
    pub fn is_set(&self) -> bool {
        self.display.is_some()
    }
}

/// Parse a free-text fee string.
///
/// Recognized patterns, in order:
/// - "Please Inquire" / "Contact for fee" -> [`FeeBracket::PleaseInquire`]
/// - `"$10,000 - $20,000"` ranges
/// - `"Under $5,000"`
/// - `"Over $50,000"` / `"$50,000+"`
///
/// Anything else keeps only the display text. Empty input returns `None`.
pub fn parse_fee(input: &str) -> Option<FeeInfo> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    let lowered = trimmed.to_lowercase();
    let pro_bono = lowered.contains("pro bono") || lowered.contains("free");

    if ["inquire", "contact", "request"]
        .iter()
        .any(|phrase| lowered.contains(phrase))
    {
        return Some(FeeInfo {
            display: Some(trimmed.to_string()),
            bracket: Some(FeeBracket::PleaseInquire),
            currency: "USD".to_string(),
            pro_bono,
            ..FeeInfo::default()
        });
    }

    if let Some(captures) = RANGE_RE.captures(trimmed)
        && let (Some(min), Some(max)) = (
            parse_amount(captures.get(1).map_or("", |m| m.as_str())),
            parse_amount(captures.get(2).map_or("", |m| m.as_str())),
        )
    {
        return Some(FeeInfo {
            min: Some(min),
            max: Some(max),
            display: Some(trimmed.to_string()),
            bracket: Some(FeeBracket::for_range(Some(min), Some(max))),
            currency: "USD".to_string(),
            pro_bono,
        });
    }

    if let Some(captures) = UNDER_RE.captures(trimmed)
        && let Some(max) = parse_amount(captures.get(1).map_or("", |m| m.as_str()))
    {
        return Some(FeeInfo {
            min: None,
            max: Some(max),
            display: Some(trimmed.to_string()),
            bracket: Some(FeeBracket::for_range(Some(0.0), Some(max))),
            currency: "USD".to_string(),
            pro_bono,
        });
    }

    if let Some(captures) = OVER_RE.captures(trimmed) {
        let amount = captures
            .get(1)
            .or_else(|| captures.get(2))
            .and_then(|m| parse_amount(m.as_str()));
        if let Some(min) = amount {
            return Some(FeeInfo {
                min: Some(min),
                max: None,
                display: Some(trimmed.to_string()),
                bracket: Some(FeeBracket::for_range(Some(min), None)),
                currency: "USD".to_string(),
                pro_bono,
            });
        }
    }

    // Unparseable: keep the text for display and search
    Some(FeeInfo {
        display: Some(trimmed.to_string()),
        currency: "USD".to_string(),
        pro_bono,
        ..FeeInfo::default()
    })
}

/// Build fee info from an already-structured min/max pair (some sources
/// provide objects rather than strings).
pub fn fee_from_range(min: Option<f64>, max: Option<f64>, display: Option<String>) -> FeeInfo {
    let bracket = (min.is_some() || max.is_some()).then(|| FeeBracket::for_range(min, max));
    let display = display.or_else(|| match (min, max) {
        (Some(min), Some(max)) => Some(format!("${min:.0} - ${max:.0}")),
        (Some(min), None) => Some(format!("${min:.0}+")),
        (None, Some(max)) => Some(format!("Under ${max:.0}")),
        (None, None) => None,
    });
    FeeInfo {
        min,
        max,
        display,
        bracket,
        currency: "USD".to_string(),
        pro_bono: false,
    }
}

fn parse_amount(s: &str) -> Option<f64> {
    let cleaned = s.replace(',', "");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok()
}
