//! Application wiring and the batch run.

use anyhow::{Context, Result};
use tracing::info;

use crate::cli::Args;
use crate::config::Config;
use crate::normalize::Normalizers;
use crate::pipeline::identity::{ResolverConfig, resolve_duplicates};
use crate::pipeline::ingest::Ingestor;
use crate::pipeline::stats::RunStats;
use crate::sources::select_sources;
use crate::store::Store;

/// Main application struct containing all necessary components
pub struct App {
    config: Config,
    store: Store,
    normalizers: Normalizers,
}

impl App {
    /// Create a new App instance with the store connected and the classifier
    /// tables built.
    pub async fn new(config: Config) -> Result<Self> {
        let store = Store::connect(&config.mongo_uri).await?;
        Ok(App {
            config,
            store,
            normalizers: Normalizers::new(),
        })
    }

    /// Run the batch: sequential source reads, ingest into the identity map,
    /// fuzzy duplicate resolution, then the single bulk write phase.
    pub async fn run(&self, args: &Args) -> Result<RunStats> {
        let sources = select_sources(&args.sources);
        if sources.is_empty() {
            anyhow::bail!("no sources match the requested filter");
        }

        let mut ingestor = Ingestor::new(&self.normalizers);
        for source in &sources {
            let records = self
                .store
                .read_records(source.database, source.collection)
                .await
                .with_context(|| {
                    format!("failed to read {}.{}", source.database, source.collection)
                })?;
            info!(
                source = source.name,
                collection = source.collection,
                records = records.len(),
                "source loaded"
            );
            ingestor
                .ingest_source(source, records)
                .context("merge failed during ingest")?;
        }
        info!(profiles = ingestor.len(), "ingest complete");

        let (profiles, mut stats) = ingestor.finish();

        let profiles = if args.skip_fuzzy_resolve {
            info!("fuzzy duplicate resolution skipped");
            profiles
        } else {
            let resolver = ResolverConfig {
                name_threshold: self.config.name_match_threshold,
                name_threshold_with_location: self.config.name_match_threshold_with_location,
            };
            let (resolved, duplicates) =
                resolve_duplicates(profiles, &self.normalizers, &resolver)
                    .context("merge failed during duplicate resolution")?;
            stats.duplicates_resolved = duplicates;
            resolved
        };

        if args.dry_run {
            info!(profiles = profiles.len(), "dry run -- skipping write phase");
        } else {
            self.store
                .replace_profiles(
                    &self.config.target_db,
                    &self.config.target_collection,
                    &profiles,
                    self.config.batch_size,
                )
                .await?;
        }

        stats.log_summary(profiles.len());
        Ok(stats)
    }
}
