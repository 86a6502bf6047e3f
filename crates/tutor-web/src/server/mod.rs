//! HTTP surface: serves the chat page and routes form posts to the chat core.

mod error;
mod handlers;
mod page;
mod sessions;


use std::sync::Arc;
use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tutor_ai::{AiClient, TurnProcessor};
use tutor_config::TutorConfig;

use error::AppError;
use page::PageRenderer;
use sessions::{SessionDefaults, SessionStore};

/// How often idle sessions are looked for.
const REAP_INTERVAL: Duration = Duration::from_secs(60);

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    pub client: Arc<dyn AiClient>,
    pub processor: Arc<TurnProcessor>,
    pub page: Arc<PageRenderer>,
}

impl AppState {
    pub fn new(config: &TutorConfig, client: Arc<dyn AiClient>) -> Result<Self, AppError> {
        Ok(Self {
            sessions: SessionStore::new(SessionDefaults {
                level: config.tutor.default_level,
                dark_mode: config.theme.dark_mode,
            }),
            client,
            processor: Arc::new(TurnProcessor::new(config.tutor.subject.clone())),
            page: Arc::new(PageRenderer::new(
                config.tutor.title.clone(),
                config.tutor.subject.clone(),
            )?),
        })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/chat", post(handlers::chat))
        .route("/settings", post(handlers::settings))
        .route("/export", get(handlers::export))
        .route("/reset", post(handlers::reset))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind, serve until Ctrl-C, and reap idle sessions in the background.
pub async fn serve(config: TutorConfig, client: Arc<dyn AiClient>) -> tutor_common::Result<()> {
    let state = AppState::new(&config, client)?;

    let reaper_store = state.sessions.clone();
    let ttl = Duration::from_secs(config.server.session_ttl_secs);
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(REAP_INTERVAL).await;
            let reaped = reaper_store.reap_idle(ttl).await;
            let count = reaper_store.count().await;
            tracing::debug!(reaped, sessions = count, "Reaper tick");
        }
    });

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Tutor listening on http://{}", addr);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}
