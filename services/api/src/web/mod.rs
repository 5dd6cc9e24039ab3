//! services/api/src/web/mod.rs
//!
//! Web layer: router assembly, handlers, auth middleware and shared state.

pub mod middleware;
pub mod rest;
pub mod state;

pub use middleware::require_bearer_token;
pub use rest::{generate_jsx_handler, health_handler};

use axum::{
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::web::{rest::ApiDoc, state::AppState};

/// Request bodies may carry images as data URLs.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Builds the full application router, shared by the `api` binary and the integration tests.
pub fn build_router(app_state: Arc<AppState>) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new().route("/health", get(health_handler));

    // Protected routes (bearer token required)
    let protected_routes = Router::new()
        .route("/generate_jsx", post(generate_jsx_handler))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            require_bearer_token,
        ));

    // Any origin, method and header, with credentials; the service runs on an internal network.
    let cors = CorsLayer::very_permissive();

    let api_router = Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state);

    // Merge the API router with the Swagger UI router for a complete application.
    Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
