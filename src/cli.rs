//! Command-line arguments.

use clap::{Parser, ValueEnum};

/// Output format for tracing logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TracingFormat {
    /// Human-readable output for local runs.
    Pretty,
    /// Structured JSON for deploy environments.
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "podium", about = "Consolidate scraped speaker profiles", version)]
pub struct Args {
    /// Log output format.
    #[arg(long, value_enum, default_value = "pretty")]
    pub tracing: TracingFormat,

    /// Only process the named sources (repeatable). Matches source names or
    /// collection names; empty means all sources.
    #[arg(long = "source")]
    pub sources: Vec<String>,

    /// Skip the cross-source fuzzy duplicate resolution pass.
    #[arg(long)]
    pub skip_fuzzy_resolve: bool,

    /// Run the full pipeline but do not write to the target collection.
    #[arg(long)]
    pub dry_run: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::parse_from(["podium"]);
        assert_eq!(args.tracing, TracingFormat::Pretty);
        assert!(args.sources.is_empty());
        assert!(!args.skip_fuzzy_resolve);
        assert!(!args.dry_run);
    }

    #[test]
    fn repeatable_source_filter() {
        let args = Args::parse_from(["podium", "--source", "speakerhub", "--source", "bigspeak"]);
        assert_eq!(args.sources, vec!["speakerhub", "bigspeak"]);
    }

    #[test]
    fn json_tracing() {
        let args = Args::parse_from(["podium", "--tracing", "json", "--dry-run"]);
        assert_eq!(args.tracing, TracingFormat::Json);
        assert!(args.dry_run);
    }
}
