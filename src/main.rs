use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info};

use podium::app::App;
use podium::cli::Args;
use podium::config::Config;
use podium::logging::setup_logging;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Load config and setup logging before App::new() so startup logs are
    // never silently dropped
    let config = Config::load().expect("Failed to load config for logging setup");
    setup_logging(&config, args.tracing);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        commit = env!("GIT_COMMIT_SHORT"),
        environment = if cfg!(debug_assertions) {
            "development"
        } else {
            "production"
        },
        "starting podium"
    );

    let app = match App::new(config).await {
        Ok(app) => app,
        Err(error) => {
            error!(error = ?error, "failed to initialize application");
            return ExitCode::FAILURE;
        }
    };

    match app.run(&args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => {
            error!(error = ?error, "pipeline run failed");
            ExitCode::FAILURE
        }
    }
}
