//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification.

use crate::error::{ErrorBody, HttpError};
use crate::web::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use component_generator_core::{GenerationError, GenerationRequest, UserId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use utoipa::{OpenApi, ToSchema};

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        generate_jsx_handler,
        health_handler,
    ),
    components(
        schemas(GenerateJsxRequest, GenerateJsxResponse, HealthResponse, ErrorBody)
    ),
    tags(
        (name = "Component Generator API", description = "Generates TSX components from prompts with an LLM.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Response and Payload Structs
//=========================================================================================

/// The payload for a component generation request.
#[derive(Debug, Deserialize, ToSchema)]
pub struct GenerateJsxRequest {
    pub prompt: String,
    /// Optional image URL (or data URL) sent to the model with the prompt.
    #[serde(default)]
    pub image: Option<String>,
    /// Send the user's current component to the model as a starting point.
    #[serde(default)]
    pub modify_existing: bool,
    pub model: String,
    pub user_id: String,
}

/// The response payload sent after a component was generated and saved.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GenerateJsxResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// Generate a component from a prompt and save it for the user.
///
/// Requires `Authorization: Bearer <token>`.
#[utoipa::path(
    post,
    path = "/generate_jsx",
    request_body = GenerateJsxRequest,
    responses(
        (status = 200, description = "Component generated and saved", body = GenerateJsxResponse),
        (status = 400, description = "Invalid user_id", body = ErrorBody),
        (status = 401, description = "Invalid token", body = ErrorBody),
        (status = 404, description = "The model reply contained no code block", body = ErrorBody),
        (status = 422, description = "Malformed or incomplete request body", body = ErrorBody),
        (status = 500, description = "Upstream or filesystem failure", body = ErrorBody)
    ),
    params(
        ("Authorization" = String, Header, description = "Bearer <token>")
    )
)]
pub async fn generate_jsx_handler(
    State(app_state): State<Arc<AppState>>,
    payload: Result<Json<GenerateJsxRequest>, JsonRejection>,
) -> Result<Json<GenerateJsxResponse>, HttpError> {
    let Json(payload) =
        payload.map_err(|rejection| HttpError::new(rejection.status(), rejection.body_text()))?;

    let request = GenerationRequest {
        user_id: UserId::parse(&payload.user_id)
            .map_err(|e| HttpError::from(GenerationError::from(e)))?,
        prompt: payload.prompt,
        image: payload.image.filter(|image| !image.is_empty()),
        modify_existing: payload.modify_existing,
        model: payload.model,
    };

    match app_state.generator.generate(&request).await {
        Ok(_) => Ok(Json(GenerateJsxResponse {
            success: true,
            message: "Component generated successfully".to_string(),
        })),
        Err(e) => {
            error!(user_id = %request.user_id, "Failed to generate component: {}", e);
            Err(e.into())
        }
    }
}

/// Liveness check.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is running", body = HealthResponse)
    )
)]
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
