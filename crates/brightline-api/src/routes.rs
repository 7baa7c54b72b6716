//! Router setup with all API routes and middleware.

use std::future::Future;

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use brightline_core::error::StudioError;

use crate::handlers;
use crate::rate_limit::{rate_limit_middleware, RateLimiter};
use crate::state::AppState;

/// Create the axum Router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    let api = &state.config.api;

    let origins: Vec<HeaderValue> = api
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    let limiter = RateLimiter::new(api.rate_limit_per_sec);

    let api_routes = Router::new()
        .route("/api/chat", post(handlers::chat))
        .route("/api/contact", post(handlers::contact))
        .layer(axum::middleware::from_fn(rate_limit_middleware))
        .layer(axum::Extension(limiter))
        .layer(DefaultBodyLimit::max(api.body_limit_bytes));

    Router::new()
        .route("/health", get(handlers::health))
        .merge(api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Bind to the configured address and serve until `shutdown` resolves.
pub async fn start_server<F>(state: AppState, shutdown: F) -> Result<(), StudioError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = format!("{}:{}", state.config.general.host, state.config.general.port);
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| StudioError::Server(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("Starting API server on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| StudioError::Server(format!("Server error: {}", e)))?;

    tracing::info!("API server stopped");
    Ok(())
}
