//! End-of-run statistics.
//!
//! The pipeline's only required user-facing signal: how many records each
//! source contributed, how many were skipped, and how many observations
//! collapsed into existing profiles.

use indexmap::IndexMap;
use tracing::info;

#[derive(Debug, Clone, Copy, Default)]
pub struct SourceStats {
    /// Records successfully turned into a profile (new or merged).
    pub processed: usize,
    /// Records skipped for missing mandatory fields.
    pub skipped: usize,
    /// Records that merged into an already-known identity key on ingest.
    pub merged_on_ingest: usize,
}

/// Counters for one pipeline run, keyed by source in processing order.
#[derive(Debug, Default)]
pub struct RunStats {
    pub per_source: IndexMap<String, SourceStats>,
    /// Cross-source duplicates folded in by the fuzzy resolution pass.
    pub duplicates_resolved: usize,
}

impl RunStats {
    fn entry(&mut self, source: &str) -> &mut SourceStats {
        self.per_source.entry(source.to_string()).or_default()
    }

    pub fn record_processed(&mut self, source: &str) {
        self.entry(source).processed += 1;
    }

    pub fn record_skipped(&mut self, source: &str) {
        self.entry(source).skipped += 1;
    }

    pub fn record_ingest_merge(&mut self, source: &str) {
        self.entry(source).merged_on_ingest += 1;
    }

    pub fn processed(&self) -> usize {
        self.per_source.values().map(|s| s.processed).sum()
    }

    pub fn skipped(&self) -> usize {
        self.per_source.values().map(|s| s.skipped).sum()
    }

    pub fn duplicates_merged(&self) -> usize {
        let on_ingest: usize = self.per_source.values().map(|s| s.merged_on_ingest).sum();
        on_ingest + self.duplicates_resolved
    }

    /// Log the per-source and total counts at the end of a run.
    pub fn log_summary(&self, final_profiles: usize) {
        for (source, stats) in &self.per_source {
            info!(
                source = source.as_str(),
                processed = stats.processed,
                skipped = stats.skipped,
                merged_on_ingest = stats.merged_on_ingest,
                "source complete"
            );
        }
        info!(
            processed = self.processed(),
            skipped = self.skipped(),
            duplicates_merged = self.duplicates_merged(),
            final_profiles,
            "pipeline run complete"
        );
    }
}
