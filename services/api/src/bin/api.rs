//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{FsComponentStore, OpenAiCompletionAdapter},
    config::{Config, ConfigError},
    error::ApiError,
    web::{build_router, state::AppState},
};
use async_openai::{config::OpenAIConfig, Client};
use component_generator_core::ComponentGenerator;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Initialize Service Adapters ---
    let mut openai_config = OpenAIConfig::new().with_api_key(
        config
            .openai_api_key
            .as_ref()
            .ok_or_else(|| ConfigError::MissingVar("OPENAI_API_KEY".to_string()))?,
    );
    if let Some(base_url) = &config.openai_base_url {
        info!("Using completion endpoint at {}", base_url);
        openai_config = openai_config.with_api_base(base_url);
    }
    let openai_client = Client::with_config(openai_config);

    let completion_adapter = Arc::new(OpenAiCompletionAdapter::new(
        openai_client,
        config.temperature,
    ));
    let component_store = Arc::new(FsComponentStore::new(
        config.website_base_path.clone(),
        config.backup_retention,
    ));
    info!(
        "Components are stored under {}",
        config.website_base_path.display()
    );

    // --- 3. Build the Shared AppState ---
    let app_state = Arc::new(AppState {
        config: config.clone(),
        generator: ComponentGenerator::new(completion_adapter, component_store),
    });

    // --- 4. Create the Web Router ---
    let app = build_router(app_state);

    // --- 5. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
