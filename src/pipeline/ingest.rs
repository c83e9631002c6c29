//! First-stage ingestion: raw records into the in-memory identity map.
//!
//! Each record becomes a profile keyed by its identity hash. The first
//! observation of a key is stored as-is; every later observation merges into
//! it. A record the factory cannot build (no name) is logged, counted, and
//! skipped -- it never aborts the batch. Merge failures, by contrast, are
//! programming errors and propagate.

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::data::profile::CanonicalProfile;
use crate::data::record::SourceRecord;
use crate::normalize::Normalizers;
use crate::pipeline::factory::ProfileFactory;
use crate::pipeline::merge::{MergeError, merge_into};
use crate::pipeline::stats::RunStats;
use crate::sources::SourceSpec;

/// Accumulates per-source profiles into one identity-keyed map.
pub struct Ingestor<'a> {
    normalizers: &'a Normalizers,
    factory: ProfileFactory<'a>,
    profiles: IndexMap<String, CanonicalProfile>,
    stats: RunStats,
}

impl<'a> Ingestor<'a> {
    pub fn new(normalizers: &'a Normalizers) -> Self {
        Self {
            normalizers,
            factory: ProfileFactory::new(normalizers),
            profiles: IndexMap::new(),
            stats: RunStats::default(),
        }
    }

    /// Ingest every record of one source, in order.
    pub fn ingest_source(
        &mut self,
        source: &SourceSpec,
        records: impl IntoIterator<Item = SourceRecord>,
    ) -> Result<(), MergeError> {
        for record in records {
            self.ingest_record(source, &record)?;
        }
        Ok(())
    }

    fn ingest_record(
        &mut self,
        source: &SourceSpec,
        record: &SourceRecord,
    ) -> Result<(), MergeError> {
        let profile = match self.factory.build(record, source) {
            Ok(profile) => profile,
            Err(error) => {
                warn!(source = source.name, %error, "skipping record");
                self.stats.record_skipped(source.name);
                return Ok(());
            }
        };

        match self.profiles.get_mut(&profile.unified_id) {
            Some(existing) => {
                debug!(
                    source = source.name,
                    name = profile.basic_info.full_name.as_deref().unwrap_or(""),
                    "merging repeat observation"
                );
                merge_into(existing, profile, self.normalizers)?;
                self.stats.record_ingest_merge(source.name);
            }
            None => {
                self.profiles.insert(profile.unified_id.clone(), profile);
            }
        }
        self.stats.record_processed(source.name);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Consume the ingestor, yielding the profiles in first-seen order plus
    /// the run counters collected so far.
    pub fn finish(self) -> (Vec<CanonicalProfile>, RunStats) {
        (self.profiles.into_values().collect(), self.stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_source() -> SourceSpec {
        SourceSpec {
            name: "speakerhub",
            database: "speakerhub_scraper",
            collection: "speakers",
            id_fields: &["uid"],
            tier: None,
        }
    }

    fn other_source() -> SourceSpec {
        SourceSpec {
            name: "a_speakers",
            database: "a_speakers",
            collection: "speakers",
            id_fields: &["speaker_id"],
            tier: None,
        }
    }

    #[test]
    fn first_observation_is_stored() {
        let normalizers = Normalizers::new();
        let mut ingestor = Ingestor::new(&normalizers);
        ingestor
            .ingest_source(
                &test_source(),
                [SourceRecord::new(json!({"name": "Jane Smith", "uid": "1"}))],
            )
            .unwrap();

        let (profiles, stats) = ingestor.finish();
        assert_eq!(profiles.len(), 1);
        assert_eq!(stats.processed(), 1);
        assert_eq!(stats.skipped(), 0);
    }

    #[test]
    fn same_key_merges_across_sources() {
        let normalizers = Normalizers::new();
        let mut ingestor = Ingestor::new(&normalizers);
        // Identical spelling from two sources shares the name-derived key
        ingestor
            .ingest_source(
                &test_source(),
                [SourceRecord::new(
                    json!({"name": "Jane Smith", "uid": "1", "topics": ["AI"]}),
                )],
            )
            .unwrap();
        ingestor
            .ingest_source(
                &other_source(),
                [SourceRecord::new(
                    json!({"name": "Dr. Jane Smith", "speaker_id": "9", "topics": ["Leadership"]}),
                )],
            )
            .unwrap();

        let (profiles, stats) = ingestor.finish();
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].source_ids.len(), 2);
        assert!(
            profiles[0]
                .expertise
                .primary_categories
                .contains(&"artificial_intelligence".to_string())
        );
        assert!(
            profiles[0]
                .expertise
                .primary_categories
                .contains(&"leadership".to_string())
        );
        assert_eq!(stats.per_source["a_speakers"].merged_on_ingest, 1);
    }

    #[test]
    fn nameless_record_is_skipped_not_fatal() {
        let normalizers = Normalizers::new();
        let mut ingestor = Ingestor::new(&normalizers);
        ingestor
            .ingest_source(
                &test_source(),
                [
                    SourceRecord::new(json!({"job_title": "CEO"})),
                    SourceRecord::new(json!({"name": "Jane Smith"})),
                ],
            )
            .unwrap();

        let (profiles, stats) = ingestor.finish();
        assert_eq!(profiles.len(), 1);
        assert_eq!(stats.skipped(), 1);
        assert_eq!(stats.processed(), 1);
    }

    #[test]
    fn profiles_keep_first_seen_order() {
        let normalizers = Normalizers::new();
        let mut ingestor = Ingestor::new(&normalizers);
        ingestor
            .ingest_source(
                &test_source(),
                [
                    SourceRecord::new(json!({"name": "Alpha One"})),
                    SourceRecord::new(json!({"name": "Beta Two"})),
                ],
            )
            .unwrap();

        let (profiles, _) = ingestor.finish();
        assert_eq!(profiles[0].basic_info.full_name.as_deref(), Some("Alpha One"));
        assert_eq!(profiles[1].basic_info.full_name.as_deref(), Some("Beta Two"));
    }
}
