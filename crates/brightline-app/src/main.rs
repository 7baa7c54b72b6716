//! Brightline server binary - composition root.
//!
//! 1. Parse CLI flags and load configuration (file, then env, then flags)
//! 2. Build the shared SMTP dispatcher and LLM provider
//! 3. Serve the API until Ctrl-C

mod cli;

use std::sync::Arc;

use clap::Parser;

use brightline_api::routes;
use brightline_api::state::AppState;
use brightline_chat::OpenAiProvider;
use brightline_core::config::StudioConfig;
use brightline_mail::SmtpMailer;

use cli::CliArgs;

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    let config_file = args.resolve_config_path();
    let mut config = StudioConfig::load_or_default(&config_file);
    config.apply_env_overrides();
    args.apply_to(&mut config);

    // Tracing. RUST_LOG wins over --log-level and the config value.
    let default_filter = args
        .resolve_log_level()
        .unwrap_or_else(|| config.general.log_level.clone());
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&default_filter)),
        )
        .init();

    tracing::info!("Starting Brightline v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(path = %config_file.display(), "Configuration resolved");

    if config.llm.api_key.is_none() {
        tracing::warn!("No LLM API key configured; chat requests will fail with 503");
    }
    if config.smtp.host.is_none() {
        tracing::warn!("No SMTP host configured; email dispatch will fail at send time");
    }

    // One mail transport for both endpoints, connected on first send.
    let mailer = Arc::new(SmtpMailer::new(config.smtp.clone()));
    let provider = Arc::new(OpenAiProvider::new(&config.llm)?);
    tracing::info!(model = %config.llm.model, "LLM provider ready");

    let state = AppState::new(config, provider, mailer);

    routes::start_server(state, shutdown_signal()).await?;
    Ok(())
}
