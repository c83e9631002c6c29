//! Environment-backed configuration.

use anyhow::Context;
use figment::{Figment, providers::Env};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// MongoDB connection string for both the source databases and the
    /// target collection.
    #[serde(default = "default_mongo_uri")]
    pub mongo_uri: String,

    #[serde(default = "default_target_db")]
    pub target_db: String,

    #[serde(default = "default_target_collection")]
    pub target_collection: String,

    /// Documents per bulk insert.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Name-similarity ratio (0-100) for a same-identity verdict on name
    /// evidence alone.
    #[serde(default = "default_name_match_threshold")]
    pub name_match_threshold: f64,

    /// Weaker ratio accepted when city and country also agree.
    #[serde(default = "default_name_match_threshold_with_location")]
    pub name_match_threshold_with_location: f64,
}

fn default_mongo_uri() -> String {
    "mongodb://localhost:27017".to_string()
}

fn default_target_db() -> String {
    "speaker_database".to_string()
}

fn default_target_collection() -> String {
    "unified_profiles".to_string()
}

fn default_batch_size() -> usize {
    1000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_name_match_threshold() -> f64 {
    crate::pipeline::identity::NAME_MATCH_THRESHOLD
}

fn default_name_match_threshold_with_location() -> f64 {
    crate::pipeline::identity::NAME_MATCH_THRESHOLD_WITH_LOCATION
}

impl Config {
    /// Load configuration from the environment.
    pub fn load() -> Result<Self, anyhow::Error> {
        Figment::new()
            .merge(Env::raw())
            .extract()
            .context("Failed to load config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_env() {
        let config: Config = Figment::new()
            .merge(Env::prefixed("PODIUM_TEST_UNSET_"))
            .extract()
            .unwrap();
        assert_eq!(config.target_collection, "unified_profiles");
        assert_eq!(config.batch_size, 1000);
        assert_eq!(config.name_match_threshold, 85.0);
    }
}
