//! Identity keys and cross-source duplicate resolution.
//!
//! Stage one: every profile gets a stable key derived from its normalized
//! name, so repeat observations of the same spelling collapse on ingest no
//! matter which source they came from. Stage two catches what the key
//! misses -- spelling variants, titles, accents the normalizer could not
//! collapse -- by grouping profiles pairwise on fuzzy name similarity,
//! shared social links, and name+location agreement, then merging each
//! group.

use sha2::{Digest, Sha256};
use strsim::normalized_levenshtein;
use tracing::{debug, info};

use crate::data::names::{comparable_name, matching_key};
use crate::data::profile::CanonicalProfile;
use crate::normalize::Normalizers;
use crate::pipeline::merge::{MergeError, merge_into};

/// Name-similarity ratio (0-100) at or above which two profiles are the same
/// person on name evidence alone.
pub const NAME_MATCH_THRESHOLD: f64 = 85.0;

/// Weaker name threshold accepted when city and country also agree.
pub const NAME_MATCH_THRESHOLD_WITH_LOCATION: f64 = 70.0;

/// Thresholds for the fuzzy resolution pass, configurable from the
/// environment.
#[derive(Debug, Clone, Copy)]
pub struct ResolverConfig {
    pub name_threshold: f64,
    pub name_threshold_with_location: f64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            name_threshold: NAME_MATCH_THRESHOLD,
            name_threshold_with_location: NAME_MATCH_THRESHOLD_WITH_LOCATION,
        }
    }
}

/// Stable identity key for a profile: SHA-256 of the normalized name.
///
/// The key is a pure function of the name -- accents, punctuation, honorific
/// titles, and suffixes do not change it -- and is deliberately
/// source-independent so the same spelling from two sites collapses during
/// ingest. Collision probability is negligible for corpus-sized inputs.
pub fn unified_id(full_name: &str) -> String {
    let normalized = matching_key(full_name);
    let digest = Sha256::digest(normalized.as_bytes());
    hex::encode(digest)
}

/// Similarity ratio between two names on a 0-100 scale. Compares the
/// cleaned, title-stripped forms so "Dr. Jane Smith" and "Jane Smith" score
/// as identical.
fn name_similarity(a: &str, b: &str) -> f64 {
    normalized_levenshtein(&comparable_name(a), &comparable_name(b)) * 100.0
}

/// Same-identity verdict for two profiles.
///
/// In order of strength: shared social-media URL (exact after
/// normalization), high name similarity alone, or moderate name similarity
/// combined with matching city and country.
pub fn are_same_person(
    a: &CanonicalProfile,
    b: &CanonicalProfile,
    config: &ResolverConfig,
) -> bool {
    let name_a = a.basic_info.full_name.as_deref().unwrap_or_default();
    let name_b = b.basic_info.full_name.as_deref().unwrap_or_default();
    if name_a.is_empty() || name_b.is_empty() {
        return false;
    }

    let urls_a = a.social_urls();
    if !urls_a.is_empty() {
        let urls_b = b.social_urls();
        if urls_a.iter().any(|url| urls_b.contains(url)) {
            return true;
        }
    }

    let similarity = name_similarity(name_a, name_b);
    if similarity >= config.name_threshold {
        return true;
    }

    similarity >= config.name_threshold_with_location && locations_match(a, b)
}

/// City+country equality (case-insensitive); country-only profiles match on
/// country alone.
fn locations_match(a: &CanonicalProfile, b: &CanonicalProfile) -> bool {
    let (Some(country_a), Some(country_b)) =
        (a.location.country.as_deref(), b.location.country.as_deref())
    else {
        return false;
    };
    if !country_a.eq_ignore_ascii_case(country_b) {
        return false;
    }

    match (a.location.city.as_deref(), b.location.city.as_deref()) {
        (Some(city_a), Some(city_b)) => city_a.eq_ignore_ascii_case(city_b),
        _ => true,
    }
}

/// Group first-stage profiles by pairwise similarity and merge each group.
///
/// Returns the surviving profiles plus the number of duplicates folded in.
/// Merge order within a group follows ingestion order, so the earliest
/// observation stays authoritative for scalar conflicts.
pub fn resolve_duplicates(
    profiles: Vec<CanonicalProfile>,
    normalizers: &Normalizers,
    config: &ResolverConfig,
) -> Result<(Vec<CanonicalProfile>, usize), MergeError> {
    let total = profiles.len();
    let mut merged: Vec<CanonicalProfile> = Vec::with_capacity(total);
    let mut consumed = vec![false; total];
    let mut duplicates = 0usize;

    let mut profiles = profiles;
    for i in 0..total {
        if consumed[i] {
            continue;
        }
        let mut keeper = std::mem::take(&mut profiles[i]);
        consumed[i] = true;

        for j in (i + 1)..total {
            if consumed[j] {
                continue;
            }
            if are_same_person(&keeper, &profiles[j], config) {
                let duplicate = std::mem::take(&mut profiles[j]);
                consumed[j] = true;
                debug!(
                    keeper = keeper.basic_info.full_name.as_deref().unwrap_or(""),
                    duplicate = duplicate.basic_info.full_name.as_deref().unwrap_or(""),
                    "merging cross-source duplicate"
                );
                merge_into(&mut keeper, duplicate, normalizers)?;
                duplicates += 1;
            }
        }

        merged.push(keeper);
    }

    info!(
        input = total,
        output = merged.len(),
        duplicates,
        "cross-source duplicate resolution complete"
    );
    Ok((merged, duplicates))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile_named(name: &str) -> CanonicalProfile {
        let mut profile = CanonicalProfile {
            unified_id: unified_id(name),
            ..CanonicalProfile::default()
        };
        profile.basic_info.full_name = Some(name.to_string());
        profile
    }

    #[test]
    fn unified_id_is_stable() {
        assert_eq!(unified_id("Jane Smith"), unified_id("Jane Smith"));
    }

    #[test]
    fn unified_id_ignores_title_and_case() {
        assert_eq!(unified_id("Dr. Jane Smith"), unified_id("jane smith"));
    }

    #[test]
    fn unified_id_ignores_accents() {
        assert_eq!(unified_id("José García"), unified_id("Jose Garcia"));
    }

    #[test]
    fn unified_id_differs_for_different_people() {
        assert_ne!(unified_id("Jane Smith"), unified_id("John Smith"));
    }

    #[test]
    fn similar_names_match() {
        let config = ResolverConfig::default();
        let a = profile_named("Dr. Jane Smith");
        let b = profile_named("Jane Smith");
        // Title stripping makes the cleaned forms compare as identical
        assert!(are_same_person(&a, &b, &config));
    }

    #[test]
    fn different_names_do_not_match() {
        let config = ResolverConfig::default();
        let a = profile_named("Jane Smith");
        let b = profile_named("Marcus Chen");
        assert!(!are_same_person(&a, &b, &config));
    }

    #[test]
    fn shared_social_url_matches_despite_name_gap() {
        let config = ResolverConfig::default();
        let mut a = profile_named("Jennifer Smith");
        let mut b = profile_named("Jen Smith-Walker");
        a.online_presence
            .social_media
            .insert("linkedin".to_string(), "https://linkedin.com/in/jsmith/".to_string());
        b.online_presence
            .social_media
            .insert("linkedin".to_string(), "https://LinkedIn.com/in/jsmith".to_string());
        assert!(are_same_person(&a, &b, &config));
    }

    #[test]
    fn shared_website_alone_does_not_match() {
        // Two speakers at the same organization list the same company site
        let config = ResolverConfig::default();
        let mut a = profile_named("Jane Smith");
        let mut b = profile_named("Marcus Chen");
        a.online_presence.website = Some("https://acmecorp.com".to_string());
        b.online_presence.website = Some("https://acmecorp.com".to_string());
        assert!(!are_same_person(&a, &b, &config));
    }

    #[test]
    fn moderate_similarity_needs_location() {
        let config = ResolverConfig::default();
        let mut a = profile_named("Jonathan Michaels");
        let mut b = profile_named("Jon Michaels");

        let similarity =
            normalized_levenshtein("jonathan michaels", "jon michaels") * 100.0;
        assert!(similarity < config.name_threshold);
        assert!(similarity >= config.name_threshold_with_location);

        assert!(!are_same_person(&a, &b, &config));

        a.location.city = Some("Austin".to_string());
        a.location.country = Some("United States".to_string());
        b.location.city = Some("Austin".to_string());
        b.location.country = Some("United States".to_string());
        assert!(are_same_person(&a, &b, &config));
    }

    #[test]
    fn conflicting_city_blocks_location_fallback() {
        let config = ResolverConfig::default();
        let mut a = profile_named("Jonathan Michaels");
        let mut b = profile_named("Jon Michaels");
        a.location.city = Some("Austin".to_string());
        a.location.country = Some("United States".to_string());
        b.location.city = Some("Boston".to_string());
        b.location.country = Some("United States".to_string());
        assert!(!are_same_person(&a, &b, &config));
    }

    #[test]
    fn resolve_groups_and_merges() {
        let normalizers = Normalizers::new();
        let config = ResolverConfig::default();

        let mut a = profile_named("Dr. Jane Smith");
        a.metadata.sources = vec!["a_speakers".to_string()];
        a.source_ids
            .insert("a_speakers".to_string(), "1".to_string());
        let mut b = profile_named("Jane Smith");
        b.metadata.sources = vec!["speakerhub".to_string()];
        b.source_ids
            .insert("speakerhub".to_string(), "2".to_string());
        let c = profile_named("Marcus Chen");

        let (resolved, duplicates) =
            resolve_duplicates(vec![a, b, c], &normalizers, &config).unwrap();
        assert_eq!(duplicates, 1);
        assert_eq!(resolved.len(), 2);

        let jane = resolved
            .iter()
            .find(|p| {
                p.basic_info
                    .full_name
                    .as_deref()
                    .is_some_and(|n| n.contains("Jane"))
            })
            .unwrap();
        assert_eq!(jane.source_ids.len(), 2);
        assert!(jane.metadata.sources.contains(&"a_speakers".to_string()));
        assert!(jane.metadata.sources.contains(&"speakerhub".to_string()));
    }

    #[test]
    fn resolve_empty_input() {
        let normalizers = Normalizers::new();
        let (resolved, duplicates) =
            resolve_duplicates(Vec::new(), &normalizers, &ResolverConfig::default()).unwrap();
        assert!(resolved.is_empty());
        assert_eq!(duplicates, 0);
    }
}
