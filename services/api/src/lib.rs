pub mod config;
pub mod handlers;
pub mod state;
pub mod ws;

use anyhow::{Context, Result};
use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::{get, post},
};
use config::AllowedOrigin;
use state::AppState;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// CORS policy for the browser front end.
pub fn cors_layer(allowed_origin: &AllowedOrigin) -> Result<CorsLayer> {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);
    Ok(match allowed_origin {
        AllowedOrigin::Any => cors.allow_origin(Any),
        AllowedOrigin::Exact(origin) => cors.allow_origin(
            origin
                .parse::<HeaderValue>()
                .with_context(|| format!("Invalid ALLOWED_ORIGIN '{origin}'"))?,
        ),
    })
}

/// Builds the application router.
pub fn app(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/ws", get(ws::ws_handler))
        .route("/api/ai-interview", post(handlers::ai_interview))
        .route("/api/process-audio", post(handlers::process_audio))
        .route("/api/results", get(handlers::results))
        .route("/health", get(handlers::health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
