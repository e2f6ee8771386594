//! Casevault API server entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use casevault_api::error::AppError;
use casevault_api::routes;
use casevault_api::state::AppState;
use casevault_content::pack::CasePack;
use casevault_core::clock::SystemClock;
use casevault_playback::reveal::{DEFAULT_CHARS_PER_SECOND, RevealScheduler};
use casevault_session::registry::SessionRegistry;
use casevault_session::session::TracingUnlockSink;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Casevault API server");

    // Read configuration from environment.
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse()
        .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?;
    let reveal_cps: u32 = std::env::var("REVEAL_CPS")
        .unwrap_or_else(|_| DEFAULT_CHARS_PER_SECOND.to_string())
        .parse()
        .map_err(|e| AppError::Config(format!("REVEAL_CPS must be a valid u32: {e}")))?;

    // Load the case pack: the file named by CASEVAULT_PACK, or the embedded
    // default.
    let pack = match std::env::var("CASEVAULT_PACK") {
        Ok(path) => {
            tracing::info!(path, "loading case pack from file");
            let source = std::fs::read_to_string(&path)?;
            CasePack::from_yaml(&source)?
        }
        Err(_) => CasePack::builtin()?,
    };

    // Build application state.
    let app_state = AppState::new(
        Arc::new(pack),
        Arc::new(SessionRegistry::new()),
        Arc::new(SystemClock),
        RevealScheduler::from_chars_per_second(reveal_cps),
        Arc::new(TracingUnlockSink),
    );

    // Build router.
    // TODO: Replace CorsLayer::permissive() with restricted origins for production.
    let app = routes::api_router()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server.
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
