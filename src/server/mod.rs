pub mod handlers;
pub mod logging;
pub mod middleware;

use std::sync::Arc;

use axum::middleware as axum_middleware;
use axum::routing::{get, post};
use axum::Router;

use self::handlers::AppState;

/// Build the axum router: liveness, puzzle generation, CORS and request logging.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/generate-puzzle", post(handlers::generate_puzzle))
        .layer(axum_middleware::from_fn(middleware::cors_middleware))
        .layer(axum_middleware::from_fn(logging::logging_middleware))
        .with_state(state)
}
