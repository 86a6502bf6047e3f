mod cli;
mod server;

use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use tutor_ai::{GeminiClient, GeminiConfig};
use tutor_common::ConfigError;
use tutor_config::schema::LogLevel;
use tutor_config::TutorConfig;

fn init_logging(override_directive: Option<&str>, level: LogLevel) {
    let default_directive = override_directive.map(str::to_owned).unwrap_or_else(|| {
        let level = level.as_directive();
        format!("tutor={level},tutor_ai={level},tutor_config={level},tower_http={level}")
    });

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive)),
        )
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::parse();

    // .env must be read before the API key is looked up.
    let dotenv = dotenvy::dotenv();

    let config = tutor_config::load_config(args.config.as_deref());
    let level = config
        .as_ref()
        .map(|c| c.logging.level)
        .unwrap_or_default();
    init_logging(args.log_level.as_deref(), level);

    tracing::info!("Tutor v{} starting...", env!("CARGO_PKG_VERSION"));
    if let Ok(path) = &dotenv {
        tracing::info!("Loaded environment from {}", path.display());
    }

    match run(args, config).await {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(
    args: cli::Args,
    config: Result<TutorConfig, ConfigError>,
) -> tutor_common::Result<()> {
    let mut config = config?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    tracing::info!(
        subject = %config.tutor.subject,
        model = %config.model.name,
        "Config loaded"
    );

    let gemini = GeminiConfig::from_env()?
        .with_model(config.model.name.clone())
        .with_temperature(config.model.temperature)
        .with_max_tokens(config.model.max_tokens)
        .with_request_timeout(std::time::Duration::from_secs(
            config.model.request_timeout_secs,
        ));
    let client = GeminiClient::new(gemini)?;

    server::serve(config, Arc::new(client)).await
}
