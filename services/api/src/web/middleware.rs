//! services/api/src/web/middleware.rs
//!
//! Authentication middleware for protecting routes.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::warn;

use crate::error::HttpError;
use crate::web::state::AppState;

/// Middleware that checks the `Authorization` header against the shared bearer token.
///
/// Anything other than exactly `Bearer <token>` is rejected with 401 before the
/// request body is read.
pub async fn require_bearer_token(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Result<Response, HttpError> {
    let authorized = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|value| value == state.config.expected_authorization());

    if !authorized {
        warn!(path = %req.uri().path(), "Rejected request with an invalid token");
        return Err(HttpError::unauthorized());
    }

    Ok(next.run(req).await)
}
