//! Location parsing: free-text "City, State, Country" strings into
//! structured components, with US-state handling and timezone inference.

use serde::{Deserialize, Serialize};

/// Aliases for the United States seen across source sites.
const US_ALIASES: &[&str] = &["usa", "us", "united states", "united states of america"];

/// US state (name or postal code) -> IANA timezone, for the states common
/// enough in the corpus to matter. Everything else stays unset.
const STATE_TIMEZONES: &[(&str, &str)] = &[
    ("ca", "America/Los_Angeles"),
    ("california", "America/Los_Angeles"),
    ("wa", "America/Los_Angeles"),
    ("washington", "America/Los_Angeles"),
    ("or", "America/Los_Angeles"),
    ("oregon", "America/Los_Angeles"),
    ("ny", "America/New_York"),
    ("new york", "America/New_York"),
    ("fl", "America/New_York"),
    ("florida", "America/New_York"),
    ("tx", "America/Chicago"),
    ("texas", "America/Chicago"),
];

/// Structured location, every component optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub country_code: Option<String>,
    pub timezone: Option<String>,
    pub virtual_available: bool,
}

impl Location {
    pub fn is_empty(&self) -> bool {
        self.city.is_none() && self.state.is_none() && self.country.is_none()
    }
}

/// Parse a free-text location string.
///
/// Recognized shapes, most specific first:
/// - `"City, State, Country"`
/// - `"City, ST"` (two-letter US state)
/// - `"City, Country"`
/// - `"Country"`
///
/// Unparseable input produces an empty [`Location`] rather than an error.
pub fn parse_location(input: &str) -> Location {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Location::default();
    }

    let parts: Vec<&str> = trimmed
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    let mut location = match parts.as_slice() {
        [] => Location::default(),
        [only] => {
            // A single component is most likely a country
            Location {
                country: Some((*only).to_string()),
                ..Location::default()
            }
        }
        [city, second] => {
            if is_us_alias(second) {
                Location {
                    city: Some((*city).to_string()),
                    country: Some("United States".to_string()),
                    ..Location::default()
                }
            } else if second.len() == 2 && second.chars().all(|c| c.is_ascii_alphabetic()) {
                // Two-letter token after a city reads as a US state code
                Location {
                    city: Some((*city).to_string()),
                    state: Some(second.to_uppercase()),
                    country: Some("United States".to_string()),
                    ..Location::default()
                }
            } else {
                Location {
                    city: Some((*city).to_string()),
                    country: Some((*second).to_string()),
                    ..Location::default()
                }
            }
        }
        [city, state, country, ..] => Location {
            city: Some((*city).to_string()),
            state: Some((*state).to_string()),
            country: Some(if is_us_alias(country) {
                "United States".to_string()
            } else {
                (*country).to_string()
            }),
            ..Location::default()
        },
    };

    if location
        .country
        .as_deref()
        .is_some_and(|c| c == "United States")
    {
        location.country_code = Some("US".to_string());
    }
    if location.timezone.is_none()
        && let Some(state) = &location.state
    {
        location.timezone = timezone_for_state(state);
    }

    location
}

fn is_us_alias(s: &str) -> bool {
    US_ALIASES.contains(&s.to_lowercase().as_str())
}

/// Infer an IANA timezone from a US state name or postal code.
pub fn timezone_for_state(state: &str) -> Option<String> {
    let lowered = state.to_lowercase();
    STATE_TIMEZONES
        .iter()
        .find(|(key, _)| *key == lowered)
        .map(|(_, tz)| tz.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn city_state_country() {
        let loc = parse_location("Austin, TX, USA");
        assert_eq!(loc.city.as_deref(), Some("Austin"));
        assert_eq!(loc.state.as_deref(), Some("TX"));
        assert_eq!(loc.country.as_deref(), Some("United States"));
        assert_eq!(loc.country_code.as_deref(), Some("US"));
        assert_eq!(loc.timezone.as_deref(), Some("America/Chicago"));
    }

    #[test]
    fn city_state_abbreviation() {
        let loc = parse_location("San Francisco, CA");
        assert_eq!(loc.city.as_deref(), Some("San Francisco"));
        assert_eq!(loc.state.as_deref(), Some("CA"));
        assert_eq!(loc.country.as_deref(), Some("United States"));
        assert_eq!(loc.timezone.as_deref(), Some("America/Los_Angeles"));
    }

    #[test]
    fn city_country() {
        let loc = parse_location("London, United Kingdom");
        assert_eq!(loc.city.as_deref(), Some("London"));
        assert_eq!(loc.state, None);
        assert_eq!(loc.country.as_deref(), Some("United Kingdom"));
        assert_eq!(loc.country_code, None);
        assert_eq!(loc.timezone, None);
    }

    #[test]
    fn city_us_alias() {
        let loc = parse_location("Chicago, USA");
        assert_eq!(loc.city.as_deref(), Some("Chicago"));
        assert_eq!(loc.country.as_deref(), Some("United States"));
    }

    #[test]
    fn country_only() {
        let loc = parse_location("Germany");
        assert_eq!(loc.city, None);
        assert_eq!(loc.country.as_deref(), Some("Germany"));
    }

    #[test]
    fn empty_input() {
        assert_eq!(parse_location(""), Location::default());
        assert_eq!(parse_location("  ,  "), Location::default());
    }

    #[test]
    fn full_state_name_timezone() {
        let loc = parse_location("Seattle, Washington, USA");
        assert_eq!(loc.timezone.as_deref(), Some("America/Los_Angeles"));
    }

    #[test]
    fn unknown_state_no_timezone() {
        let loc = parse_location("Denver, CO, USA");
        assert_eq!(loc.timezone, None);
    }
}
