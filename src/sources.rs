//! Registry of the scraped source databases feeding the pipeline.
//!
//! Each entry is pure renaming glue: where the documents live and which
//! fields carry the identifier and display name. The parsed corpus
//! contributes four collections, one per quality tier.

use crate::data::profile::QualityTier;

/// One source database: where to read from and how its fields map.
#[derive(Debug, Clone, Copy)]
pub struct SourceSpec {
    /// Canonical source name used in `metadata.sources` and `source_ids`.
    pub name: &'static str,
    pub database: &'static str,
    pub collection: &'static str,
    /// Field(s) holding the source's native identifier, tried in order.
    pub id_fields: &'static [&'static str],
    /// Quality tier for tiered corpora; scraped sites carry none.
    pub tier: Option<QualityTier>,
}

/// All sources in processing order. Scraped sites first, then the parsed
/// corpus tiers from most to least trusted.
pub const SOURCES: &[SourceSpec] = &[
    SourceSpec {
        name: "a_speakers",
        database: "a_speakers",
        collection: "speakers",
        id_fields: &["speaker_id", "url"],
        tier: None,
    },
    SourceSpec {
        name: "allamericanspeakers",
        database: "allamericanspeakers",
        collection: "speakers",
        id_fields: &["speaker_id"],
        tier: None,
    },
    SourceSpec {
        name: "bigspeak",
        database: "bigspeak_scraper",
        collection: "speakers",
        id_fields: &["speaker_id"],
        tier: None,
    },
    SourceSpec {
        name: "eventraptor",
        database: "eventraptor",
        collection: "speakers",
        id_fields: &["speaker_id", "id"],
        tier: None,
    },
    SourceSpec {
        name: "freespeakerbureau",
        database: "freespeakerbureau_scraper",
        collection: "speakers_profiles",
        id_fields: &["profile_id", "member_id"],
        tier: None,
    },
    SourceSpec {
        name: "leading_authorities",
        database: "leading_authorities",
        collection: "speakers_final_details",
        id_fields: &["speaker_id", "url"],
        tier: None,
    },
    SourceSpec {
        name: "sessionize",
        database: "sessionize_scraper",
        collection: "speakers",
        id_fields: &["username"],
        tier: None,
    },
    SourceSpec {
        name: "speakerhub",
        database: "speakerhub_scraper",
        collection: "speakers",
        id_fields: &["uid", "username"],
        tier: None,
    },
    SourceSpec {
        name: "thespeakerhandbook",
        database: "thespeakerhandbook_scraper",
        collection: "speakers",
        id_fields: &["speaker_id"],
        tier: None,
    },
    SourceSpec {
        name: "llm_parsed",
        database: "llm_parsed_db",
        collection: "cat_1",
        id_fields: &[],
        tier: Some(QualityTier::Cat1),
    },
    SourceSpec {
        name: "llm_parsed",
        database: "llm_parsed_db",
        collection: "cat_2",
        id_fields: &[],
        tier: Some(QualityTier::Cat2),
    },
    SourceSpec {
        name: "llm_parsed",
        database: "llm_parsed_db",
        collection: "cat_3",
        id_fields: &[],
        tier: Some(QualityTier::Cat3),
    },
    SourceSpec {
        name: "llm_parsed",
        database: "llm_parsed_db",
        collection: "cat_4",
        id_fields: &[],
        tier: Some(QualityTier::Cat4),
    },
];

/// Sources filtered by an optional allow-list of source names (as given on
/// the command line). An empty filter keeps everything.
pub fn select_sources(filter: &[String]) -> Vec<&'static SourceSpec> {
    if filter.is_empty() {
        return SOURCES.iter().collect();
    }
    SOURCES
        .iter()
        .filter(|s| filter.iter().any(|f| f == s.name || f == s.collection))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_sources_without_filter() {
        assert_eq!(select_sources(&[]).len(), SOURCES.len());
    }

    #[test]
    fn filter_by_name() {
        let selected = select_sources(&["speakerhub".to_string()]);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].name, "speakerhub");
    }

    #[test]
    fn filter_matches_tier_collections() {
        let selected = select_sources(&["llm_parsed".to_string()]);
        assert_eq!(selected.len(), 4);
    }

    #[test]
    fn tier_collections_carry_tiers() {
        let tiers: Vec<_> = SOURCES.iter().filter_map(|s| s.tier).collect();
        assert_eq!(tiers.len(), 4);
        assert!(tiers.contains(&QualityTier::Cat1));
    }
}
