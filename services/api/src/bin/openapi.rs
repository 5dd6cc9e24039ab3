//! services/api/src/bin/openapi.rs
//!
//! Writes the OpenAPI document served at `/api-docs/openapi.json` to disk, so
//! front-end clients can be generated without starting the server.
//!
//! The output path comes from `OPENAPI_OUTPUT` and defaults to `openapi.json`.

use api_lib::{error::ApiError, web::rest::ApiDoc};
use std::path::PathBuf;
use utoipa::OpenApi;

const DEFAULT_OUTPUT: &str = "openapi.json";

fn main() -> Result<(), ApiError> {
    let output = std::env::var("OPENAPI_OUTPUT")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_OUTPUT));

    let document = ApiDoc::openapi()
        .to_pretty_json()
        .map_err(|e| ApiError::Internal(format!("Failed to serialize the OpenAPI document: {}", e)))?;
    std::fs::write(&output, document)?;

    println!("Wrote the component generator API document to {}", output.display());
    Ok(())
}
