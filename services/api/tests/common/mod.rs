//! Shared helpers for the `api` integration tests.

#![allow(dead_code)]

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use api_lib::adapters::FsComponentStore;
use api_lib::config::{Config, DEFAULT_TEMPERATURE};
use api_lib::web::{build_router, state::AppState};
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use component_generator_core::{
    ChatPrompt, CompletionService, ComponentGenerator, PortError, PortResult,
};
use http_body_util::BodyExt;
use tower::ServiceExt;

pub const TEST_TOKEN: &str = "test-secret";

/// A `CompletionService` that returns a canned reply and records every call.
pub struct StubCompletion {
    reply: Result<String, String>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<(String, ChatPrompt)>>,
}

impl StubCompletion {
    pub fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(reply.to_string()),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(message.to_string()),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The `(model, prompt)` pairs received so far.
    pub fn prompts(&self) -> Vec<(String, ChatPrompt)> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionService for StubCompletion {
    async fn complete(&self, model: &str, prompt: &ChatPrompt) -> PortResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts
            .lock()
            .unwrap()
            .push((model.to_string(), prompt.clone()));
        self.reply.clone().map_err(PortError::Unexpected)
    }
}

/// Build a test `Config` rooted at `base_path`.
pub fn test_config(base_path: &Path) -> Config {
    Config {
        bind_address: "127.0.0.1:0".parse().unwrap(),
        log_level: tracing::Level::INFO,
        auth_token: TEST_TOKEN.to_string(),
        openai_api_key: None,
        openai_base_url: None,
        website_base_path: base_path.to_path_buf(),
        temperature: DEFAULT_TEMPERATURE,
        backup_retention: None,
    }
}

/// Build the full application router backed by the real filesystem store under
/// `base_path` and the given completion stub.
pub fn build_test_app(base_path: &Path, completion: Arc<StubCompletion>) -> Router {
    let config = test_config(base_path);
    let store = Arc::new(FsComponentStore::new(
        config.website_base_path.clone(),
        config.backup_retention,
    ));

    let state = AppState {
        config: Arc::new(config),
        generator: ComponentGenerator::new(completion, store),
    };

    build_router(Arc::new(state))
}

/// Send a `POST /generate_jsx` with the given authorization header value (if any).
pub async fn post_generate(
    app: Router,
    authorization: Option<&str>,
    body: serde_json::Value,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri("/generate_jsx")
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }

    let request = builder.body(Body::from(body.to_string())).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn bearer() -> String {
    format!("Bearer {}", TEST_TOKEN)
}

/// Number of files in the user's backup folder (0 if the folder does not exist).
pub fn backup_count(base_path: &Path, user_id: &str) -> usize {
    match std::fs::read_dir(base_path.join("backups").join(user_id)) {
        Ok(entries) => entries.count(),
        Err(_) => 0,
    }
}

pub fn current_component(base_path: &Path, user_id: &str) -> Option<String> {
    std::fs::read_to_string(
        base_path
            .join("components")
            .join("user")
            .join(format!("{}.tsx", user_id)),
    )
    .ok()
}
