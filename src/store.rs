//! MongoDB-backed document store.
//!
//! Two responsibilities: cursor reads of raw source collections into
//! loosely-typed [`SourceRecord`]s, and the single bulk write phase that
//! replaces the target collection with the consolidated profiles. A failed
//! insert batch propagates -- the run is then incomplete as a whole; there
//! is no partial-commit state.

use anyhow::{Context, Result};
use bson::{Document, doc};
use futures::TryStreamExt;
use mongodb::options::IndexOptions;
use mongodb::{Client, Collection, IndexModel};
use tracing::{info, warn};

use crate::data::profile::CanonicalProfile;
use crate::data::record::SourceRecord;

#[derive(Clone)]
pub struct Store {
    client: Client,
}

impl Store {
    /// Connect and verify the connection with a ping.
    pub async fn connect(uri: &str) -> Result<Self> {
        let client = Client::with_uri_str(uri)
            .await
            .context("failed to create MongoDB client")?;
        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .context("MongoDB ping failed")?;
        info!("connected to MongoDB");
        Ok(Self { client })
    }

    /// Read every document of one source collection.
    ///
    /// Documents that cannot be represented as JSON are dropped with a
    /// warning; the sources occasionally hold binary debris from aborted
    /// scrape runs.
    pub async fn read_records(
        &self,
        database: &str,
        collection: &str,
    ) -> Result<Vec<SourceRecord>> {
        let coll = self
            .client
            .database(database)
            .collection::<Document>(collection);
        let mut cursor = coll
            .find(doc! {})
            .await
            .with_context(|| format!("failed to open cursor on {database}.{collection}"))?;

        let mut records = Vec::new();
        while let Some(document) = cursor
            .try_next()
            .await
            .with_context(|| format!("cursor read failed on {database}.{collection}"))?
        {
            match serde_json::to_value(&document) {
                Ok(value) => records.push(SourceRecord::new(value)),
                Err(error) => {
                    warn!(%error, database, collection, "dropping unreadable document");
                }
            }
        }
        Ok(records)
    }

    /// Replace the target collection with the consolidated profiles.
    ///
    /// Drops the old collection, inserts in batches, and creates the query
    /// layer's indexes. Any failed batch aborts the write.
    pub async fn replace_profiles(
        &self,
        database: &str,
        collection: &str,
        profiles: &[CanonicalProfile],
        batch_size: usize,
    ) -> Result<usize> {
        let coll = self
            .client
            .database(database)
            .collection::<CanonicalProfile>(collection);
        coll.drop()
            .await
            .with_context(|| format!("failed to drop {database}.{collection}"))?;

        let mut written = 0usize;
        for batch in profiles.chunks(batch_size.max(1)) {
            let result = coll
                .insert_many(batch)
                .await
                .with_context(|| format!("bulk insert failed after {written} documents"))?;
            written += result.inserted_ids.len();
        }

        Self::create_indexes(&coll).await?;
        info!(written, database, collection, "target collection replaced");
        Ok(written)
    }

    /// The index set the query layer depends on: identity lookups, faceted
    /// category browsing, score-ordered listings, location filters, and one
    /// text index over the free-text fields.
    async fn create_indexes(collection: &Collection<CanonicalProfile>) -> Result<()> {
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "unified_id": 1 })
                .options(IndexOptions::builder().unique(true).build())
                .build(),
            IndexModel::builder()
                .keys(doc! { "expertise.primary_categories": 1 })
                .build(),
            IndexModel::builder()
                .keys(doc! { "expertise.parent_categories": 1 })
                .build(),
            IndexModel::builder()
                .keys(doc! { "expertise.normalized_industries.primary": 1 })
                .build(),
            IndexModel::builder()
                .keys(doc! { "metadata.profile_score": -1 })
                .build(),
            IndexModel::builder()
                .keys(doc! { "location.country": 1, "location.city": 1 })
                .build(),
            IndexModel::builder()
                .keys(doc! {
                    "basic_info.full_name": "text",
                    "expertise.keywords": "text",
                    "biography.full": "text",
                })
                .build(),
        ];
        collection
            .create_indexes(indexes)
            .await
            .context("failed to create indexes")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    // Store methods require a running MongoDB instance; the pipeline's
    // behavior over in-memory records is covered in tests/.
}
