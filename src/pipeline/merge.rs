//! The profile merge engine.
//!
//! Deterministically folds a new observation of a person into the existing
//! profile. Classifier-backed fields are never merged directly: the raw
//! terms are unioned and re-normalized from scratch, so the final category
//! assignment is identical no matter which order the sources arrived in.
//! Scalars prefer the existing non-empty value; lists concatenate and
//! deduplicate; derived scores are recomputed at the end.

use std::collections::HashSet;

use chrono::Utc;
use serde::Serialize;

use crate::data::profile::CanonicalProfile;
use crate::normalize::Normalizers;
use crate::pipeline::scoring;

/// Merge preconditions that indicate a programming error, not bad data.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    #[error("cannot merge a profile without an identity key")]
    MissingIdentity,
}

/// Merge `incoming` into `existing`.
///
/// Both profiles must carry an identity key; merging an unkeyed profile is a
/// loud failure rather than a silent corrupt record. `existing` wins every
/// scalar conflict -- the incoming value is only adopted where the existing
/// field is empty.
pub fn merge_into(
    existing: &mut CanonicalProfile,
    incoming: CanonicalProfile,
    normalizers: &Normalizers,
) -> Result<(), MergeError> {
    if existing.unified_id.is_empty() || incoming.unified_id.is_empty() {
        return Err(MergeError::MissingIdentity);
    }

    // Sources and source ids accumulate; existing entries stay authoritative
    // on key collision.
    for source in incoming.metadata.sources {
        if !existing.metadata.sources.contains(&source) {
            existing.metadata.sources.push(source);
        }
    }
    for (source, id) in incoming.source_ids {
        existing.source_ids.entry(source).or_insert(id);
    }

    // Expertise: union the raw terms and re-run the classifier on the union.
    // Never union the computed category lists -- that is order-dependent and
    // drifts from the term set.
    let mut terms = existing.expertise.original_terms.clone();
    terms.extend(incoming.expertise.original_terms.iter().cloned());
    dedup_strings(&mut terms);
    if !terms.is_empty() {
        let normalized = normalizers.expertise.normalize(&terms);
        existing.expertise.original_terms = normalized.original_terms;
        existing.expertise.primary_categories = normalized.primary_categories;
        existing.expertise.secondary_categories = normalized.secondary_categories;
        existing.expertise.parent_categories = normalized.parent_categories;
        existing.expertise.keywords = normalized.keywords;
        existing.expertise.unmatched = normalized.unmatched;
    }

    // Same re-normalize-on-union policy for industries.
    let mut industry_terms = existing.expertise.industries.clone();
    industry_terms.extend(incoming.expertise.industries.iter().cloned());
    dedup_strings(&mut industry_terms);
    if !industry_terms.is_empty() {
        let normalized = normalizers.industry.normalize(&industry_terms);
        existing.expertise.industries = industry_terms;
        existing.expertise.normalized_industries.primary = normalized.primary_industries;
        existing.expertise.normalized_industries.secondary = normalized.secondary_industries;
        existing.expertise.normalized_industries.keywords = normalized.keywords;
        existing.expertise.normalized_industries.unmatched = normalized.unmatched;
    }

    existing
        .expertise
        .research_areas
        .extend(incoming.expertise.research_areas);
    dedup_strings(&mut existing.expertise.research_areas);

    // Scalars: existing wins, incoming fills gaps.
    prefer_existing(&mut existing.basic_info.full_name, incoming.basic_info.full_name);
    prefer_existing(&mut existing.basic_info.first_name, incoming.basic_info.first_name);
    prefer_existing(&mut existing.basic_info.last_name, incoming.basic_info.last_name);
    prefer_existing(
        &mut existing.basic_info.display_name,
        incoming.basic_info.display_name,
    );
    prefer_existing(&mut existing.basic_info.gender, incoming.basic_info.gender);
    prefer_existing(&mut existing.basic_info.pronouns, incoming.basic_info.pronouns);
    prefer_existing(
        &mut existing.professional_info.title,
        incoming.professional_info.title,
    );
    prefer_existing(
        &mut existing.professional_info.company,
        incoming.professional_info.company,
    );
    prefer_existing(
        &mut existing.professional_info.tagline,
        incoming.professional_info.tagline,
    );
    prefer_existing(&mut existing.biography.brief, incoming.biography.brief);
    prefer_existing(&mut existing.biography.full, incoming.biography.full);
    prefer_existing(&mut existing.contact.email, incoming.contact.email);
    prefer_existing(&mut existing.contact.phone, incoming.contact.phone);
    prefer_existing(&mut existing.contact.booking_url, incoming.contact.booking_url);
    prefer_existing(&mut existing.location.city, incoming.location.city);
    prefer_existing(&mut existing.location.state, incoming.location.state);
    prefer_existing(&mut existing.location.country, incoming.location.country);
    prefer_existing(
        &mut existing.location.country_code,
        incoming.location.country_code,
    );
    prefer_existing(&mut existing.location.timezone, incoming.location.timezone);

    // Demographics scalars follow the same rule.
    prefer_existing_num(&mut existing.demographics.age, incoming.demographics.age);
    prefer_existing(
        &mut existing.demographics.age_bracket,
        incoming.demographics.age_bracket,
    );
    prefer_existing(
        &mut existing.demographics.generation,
        incoming.demographics.generation,
    );
    prefer_existing_num(
        &mut existing.demographics.birth_year,
        incoming.demographics.birth_year,
    );
    existing
        .demographics
        .diversity_categories
        .extend(incoming.demographics.diversity_categories);
    dedup_strings(&mut existing.demographics.diversity_categories);
    existing.demographics.diversity_flags = merge_flags(
        existing.demographics.diversity_flags,
        incoming.demographics.diversity_flags,
    );
    existing.demographics.is_dei_speaker =
        existing.demographics.is_dei_speaker || incoming.demographics.is_dei_speaker;

    // Languages: keep the richer side (more entries).
    if incoming.languages.count > existing.languages.count {
        existing.languages = incoming.languages;
    }
    existing
        .speaking_info
        .languages
        .clone_from(&existing.languages.codes);

    // Credentials and education accumulate.
    existing.credentials.degrees.extend(incoming.credentials.degrees);
    dedup_by_json(&mut existing.credentials.degrees);
    existing
        .credentials
        .certifications
        .extend(incoming.credentials.certifications);
    dedup_by_json(&mut existing.credentials.certifications);
    existing.credentials.awards.extend(incoming.credentials.awards);
    dedup_by_json(&mut existing.credentials.awards);
    existing.credentials.honors.extend(incoming.credentials.honors);
    dedup_strings(&mut existing.credentials.honors);
    existing.education.degrees.extend(incoming.education.degrees);
    dedup_strings(&mut existing.education.degrees);

    // Speaking info: scalars prefer existing, lists accumulate.
    prefer_existing_num(
        &mut existing.speaking_info.years_speaking,
        incoming.speaking_info.years_speaking,
    );
    prefer_existing_num(
        &mut existing.speaking_info.talks_delivered,
        incoming.speaking_info.talks_delivered,
    );
    existing.speaking_info.formats.extend(incoming.speaking_info.formats);
    dedup_strings(&mut existing.speaking_info.formats);
    prefer_existing(
        &mut existing.speaking_info.primary_format,
        incoming.speaking_info.primary_format,
    );
    existing.speaking_info.virtual_capable =
        existing.speaking_info.virtual_capable || incoming.speaking_info.virtual_capable;
    existing.speaking_info.can_emcee =
        existing.speaking_info.can_emcee || incoming.speaking_info.can_emcee;
    existing
        .speaking_info
        .audience_types
        .extend(incoming.speaking_info.audience_types);
    dedup_strings(&mut existing.speaking_info.audience_types);
    prefer_existing(
        &mut existing.speaking_info.primary_audience,
        incoming.speaking_info.primary_audience,
    );
    existing
        .speaking_info
        .sectors_served
        .extend(incoming.speaking_info.sectors_served);
    dedup_strings(&mut existing.speaking_info.sectors_served);
    if existing.speaking_info.audience_sizes.bracket.is_none() {
        existing.speaking_info.audience_sizes = incoming.speaking_info.audience_sizes;
    }
    existing
        .speaking_info
        .session_lengths
        .extend(incoming.speaking_info.session_lengths);
    dedup_strings(&mut existing.speaking_info.session_lengths);
    if !existing.speaking_info.fee.is_set() && incoming.speaking_info.fee.is_set() {
        existing.speaking_info.fee = incoming.speaking_info.fee;
    }
    existing.speaking_info.accepts_pro_bono =
        existing.speaking_info.accepts_pro_bono || incoming.speaking_info.accepts_pro_bono;
    if existing.speaking_info.average_rating.is_none() {
        existing.speaking_info.average_rating = incoming.speaking_info.average_rating;
        existing.speaking_info.total_ratings = incoming.speaking_info.total_ratings;
    }
    existing
        .speaking_info
        .event_types
        .extend(incoming.speaking_info.event_types);
    dedup_strings(&mut existing.speaking_info.event_types);

    // Media, online presence, engagement accumulate.
    prefer_existing(&mut existing.media.primary_image, incoming.media.primary_image);
    existing.media.images.extend(incoming.media.images);
    dedup_strings(&mut existing.media.images);
    existing.media.videos.extend(incoming.media.videos);
    dedup_by_json(&mut existing.media.videos);
    prefer_existing(
        &mut existing.online_presence.website,
        incoming.online_presence.website,
    );
    for (platform, url) in incoming.online_presence.social_media {
        existing
            .online_presence
            .social_media
            .entry(platform)
            .or_insert(url);
    }
    for (site, url) in incoming.online_presence.booking_sites {
        existing
            .online_presence
            .booking_sites
            .entry(site)
            .or_insert(url);
    }
    existing
        .engagement
        .testimonials
        .extend(incoming.engagement.testimonials);
    dedup_by_json(&mut existing.engagement.testimonials);
    prefer_existing_num(
        &mut existing.engagement.total_events,
        incoming.engagement.total_events,
    );

    // Data quality tier: the numerically lowest (most trusted) wins.
    existing.metadata.data_quality_tier =
        match (existing.metadata.data_quality_tier, incoming.metadata.data_quality_tier) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };

    // Scores are always recomputed from the merged state, never averaged.
    scoring::recompute(existing, &normalizers.speaking);
    existing.metadata.updated_at = Utc::now();

    Ok(())
}

/// Keep the existing value; adopt the incoming one only when the existing is
/// empty. Whitespace-only strings count as empty.
fn prefer_existing(existing: &mut Option<String>, incoming: Option<String>) {
    let is_empty = existing
        .as_deref()
        .is_none_or(|s| s.trim().is_empty());
    if is_empty && let Some(value) = incoming
        && !value.trim().is_empty()
    {
        *existing = Some(value);
    }
}

fn prefer_existing_num<T: Copy>(existing: &mut Option<T>, incoming: Option<T>) {
    if existing.is_none() {
        *existing = incoming;
    }
}

fn merge_flags(
    a: crate::normalize::demographics::DiversityFlags,
    b: crate::normalize::demographics::DiversityFlags,
) -> crate::normalize::demographics::DiversityFlags {
    crate::normalize::demographics::DiversityFlags {
        bipoc: a.bipoc || b.bipoc,
        woman: a.woman || b.woman,
        woman_in_tech: a.woman_in_tech || b.woman_in_tech,
        woman_in_stem: a.woman_in_stem || b.woman_in_stem,
        lgbtq: a.lgbtq || b.lgbtq,
        veteran: a.veteran || b.veteran,
        disability: a.disability || b.disability,
        first_generation: a.first_generation || b.first_generation,
    }
}

/// In-place order-preserving string dedup.
fn dedup_strings(values: &mut Vec<String>) {
    let mut seen = HashSet::new();
    values.retain(|v| seen.insert(v.clone()));
}

/// In-place order-preserving dedup for structured entries, keyed on the
/// serialized form. Keeps list-dedup generic instead of per-type field
/// comparisons.
fn dedup_by_json<T: Serialize>(values: &mut Vec<T>) {
    let mut seen = HashSet::new();
    values.retain(|v| {
        let key = serde_json::to_string(v).unwrap_or_default();
        seen.insert(key)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::profile::QualityTier;
    use crate::pipeline::identity::unified_id;

    fn profile(name: &str, source: &str) -> CanonicalProfile {
        let mut p = CanonicalProfile {
            unified_id: unified_id(name),
            ..CanonicalProfile::default()
        };
        p.basic_info.full_name = Some(name.to_string());
        p.metadata.primary_source = source.to_string();
        p.metadata.sources = vec![source.to_string()];
        p.source_ids.insert(source.to_string(), "x".to_string());
        p
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn missing_identity_fails_loudly() {
        let normalizers = Normalizers::new();
        let mut a = profile("Jane Smith", "a_speakers");
        a.unified_id = String::new();
        let b = profile("Jane Smith", "speakerhub");
        assert!(matches!(
            merge_into(&mut a, b, &normalizers),
            Err(MergeError::MissingIdentity)
        ));
    }

    #[test]
    fn sources_and_ids_accumulate() {
        let normalizers = Normalizers::new();
        let mut a = profile("Jane Smith", "a_speakers");
        let b = profile("Jane Smith", "speakerhub");
        merge_into(&mut a, b, &normalizers).unwrap();
        assert_eq!(a.metadata.sources, strings(&["a_speakers", "speakerhub"]));
        assert_eq!(a.source_ids.len(), 2);
    }

    #[test]
    fn existing_source_id_wins_on_collision() {
        let normalizers = Normalizers::new();
        let mut a = profile("Jane Smith", "a_speakers");
        a.source_ids
            .insert("a_speakers".to_string(), "original".to_string());
        let mut b = profile("Jane Smith", "a_speakers");
        b.source_ids
            .insert("a_speakers".to_string(), "conflicting".to_string());
        merge_into(&mut a, b, &normalizers).unwrap();
        assert_eq!(a.source_ids["a_speakers"], "original");
    }

    #[test]
    fn expertise_renormalized_on_union() {
        let normalizers = Normalizers::new();
        let mut a = profile("Jane Smith", "a_speakers");
        a.expertise.original_terms = strings(&["AI"]);
        let mut b = profile("Jane Smith", "speakerhub");
        b.expertise.original_terms = strings(&["Leadership"]);

        merge_into(&mut a, b, &normalizers).unwrap();
        assert!(
            a.expertise
                .primary_categories
                .contains(&"artificial_intelligence".to_string())
        );
        assert!(a.expertise.primary_categories.contains(&"leadership".to_string()));
        assert_eq!(a.expertise.original_terms, strings(&["AI", "Leadership"]));
    }

    #[test]
    fn merge_commutative_on_category_fields() {
        let normalizers = Normalizers::new();

        let make = |terms: &[&str], source: &str| {
            let mut p = profile("Jane Smith", source);
            p.expertise.original_terms = strings(terms);
            p
        };

        let mut ab = make(&["AI", "Data Science"], "a_speakers");
        merge_into(&mut ab, make(&["Leadership"], "speakerhub"), &normalizers).unwrap();

        let mut ba = make(&["Leadership"], "speakerhub");
        merge_into(&mut ba, make(&["AI", "Data Science"], "a_speakers"), &normalizers).unwrap();

        assert_eq!(ab.expertise.primary_categories, ba.expertise.primary_categories);
        assert_eq!(ab.expertise.parent_categories, ba.expertise.parent_categories);
        assert_eq!(ab.expertise.keywords, ba.expertise.keywords);
    }

    #[test]
    fn scalar_prefers_existing_non_empty() {
        let normalizers = Normalizers::new();
        let mut a = profile("Jane Smith", "a_speakers");
        a.professional_info.title = Some("CEO".to_string());
        let mut b = profile("Jane Smith", "speakerhub");
        b.professional_info.title = Some("Founder".to_string());
        b.professional_info.company = Some("Acme".to_string());

        merge_into(&mut a, b, &normalizers).unwrap();
        // Existing wins on conflict; incoming fills the gap
        assert_eq!(a.professional_info.title.as_deref(), Some("CEO"));
        assert_eq!(a.professional_info.company.as_deref(), Some("Acme"));
    }

    #[test]
    fn tier_keeps_most_trusted_regardless_of_order() {
        let normalizers = Normalizers::new();

        let tiered = |tier: Option<QualityTier>, source: &str| {
            let mut p = profile("Jane Smith", source);
            p.metadata.data_quality_tier = tier;
            p
        };

        let mut low_first = tiered(Some(QualityTier::Cat3), "llm_parsed");
        let high = tiered(Some(QualityTier::Cat1), "llm_parsed");
        merge_into(&mut low_first, high, &normalizers).unwrap();
        assert_eq!(low_first.metadata.data_quality_tier, Some(QualityTier::Cat1));

        let mut high_first = tiered(Some(QualityTier::Cat1), "llm_parsed");
        let low = tiered(Some(QualityTier::Cat3), "llm_parsed");
        merge_into(&mut high_first, low, &normalizers).unwrap();
        assert_eq!(high_first.metadata.data_quality_tier, Some(QualityTier::Cat1));
    }

    #[test]
    fn lists_deduplicate_after_merge() {
        let normalizers = Normalizers::new();
        let mut a = profile("Jane Smith", "a_speakers");
        a.media.images = strings(&["https://img/a.jpg", "https://img/b.jpg"]);
        a.education.degrees = strings(&["MBA from Wharton"]);
        let mut b = profile("Jane Smith", "speakerhub");
        b.media.images = strings(&["https://img/b.jpg", "https://img/c.jpg"]);
        b.education.degrees = strings(&["MBA from Wharton", "BS from MIT"]);

        merge_into(&mut a, b, &normalizers).unwrap();
        assert_eq!(
            a.media.images,
            strings(&["https://img/a.jpg", "https://img/b.jpg", "https://img/c.jpg"])
        );
        assert_eq!(
            a.education.degrees,
            strings(&["MBA from Wharton", "BS from MIT"])
        );
    }

    #[test]
    fn scores_recomputed_not_merged() {
        let normalizers = Normalizers::new();
        let mut a = profile("Jane Smith", "a_speakers");
        a.metadata.profile_score = 7; // stale on purpose
        let mut b = profile("Jane Smith", "speakerhub");
        b.biography.full = Some("x".repeat(600));
        b.professional_info.title = Some("CEO".to_string());

        merge_into(&mut a, b, &normalizers).unwrap();
        let expected = scoring::profile_score(&a);
        assert_eq!(a.metadata.profile_score, expected);
        assert!(a.metadata.profile_score > 7);
    }

    #[test]
    fn richer_language_profile_wins() {
        let normalizers = Normalizers::new();
        let lang = crate::normalize::language::LanguageNormalizer::new();

        let mut a = profile("Jane Smith", "a_speakers");
        a.languages = lang.normalize_list(&strings(&["English"]));
        let mut b = profile("Jane Smith", "speakerhub");
        b.languages = lang.normalize_list(&strings(&["English (Native)", "Spanish (Fluent)"]));

        merge_into(&mut a, b, &normalizers).unwrap();
        assert_eq!(a.languages.count, 2);
        assert_eq!(a.speaking_info.languages, strings(&["en", "es"]));
    }
}
