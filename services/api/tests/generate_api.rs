//! Integration tests for `POST /generate_jsx`.
//!
//! Each test runs the real router and filesystem store inside a temporary
//! directory, with the upstream LLM replaced by `StubCompletion`.

mod common;

use axum::http::StatusCode;
use common::{
    backup_count, bearer, body_json, build_test_app, current_component, post_generate,
    StubCompletion,
};
use component_generator_core::{ChatMessage, UserContent};
use serde_json::json;

const BUTTON_REPLY: &str = "```tsx\nexport default function X(){return <button/>}\n```";

fn button_request(user_id: &str) -> serde_json::Value {
    json!({
        "prompt": "make a button",
        "model": "gpt-4o",
        "user_id": user_id,
        "modify_existing": false
    })
}

// ---------------------------------------------------------------------------
// Success path
// ---------------------------------------------------------------------------

#[tokio::test]
async fn generates_and_saves_component() {
    let dir = tempfile::tempdir().unwrap();
    let completion = StubCompletion::replying(BUTTON_REPLY);
    let app = build_test_app(dir.path(), completion.clone());

    let response = post_generate(app, Some(&bearer()), button_request("u1")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert!(json["message"].is_string());

    assert_eq!(
        current_component(dir.path(), "u1").as_deref(),
        Some("export default function X(){return <button/>}")
    );
    assert_eq!(backup_count(dir.path(), "u1"), 1);
    assert_eq!(completion.calls(), 1);
    assert_eq!(completion.prompts()[0].0, "gpt-4o");
}

#[tokio::test]
async fn each_success_adds_one_backup() {
    let dir = tempfile::tempdir().unwrap();
    let completion = StubCompletion::replying(BUTTON_REPLY);

    for expected in 1..=3 {
        let app = build_test_app(dir.path(), completion.clone());
        let response = post_generate(app, Some(&bearer()), button_request("u1")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(backup_count(dir.path(), "u1"), expected);
    }
}

#[tokio::test]
async fn modify_existing_sends_current_component_to_model() {
    let dir = tempfile::tempdir().unwrap();
    let completion = StubCompletion::replying(BUTTON_REPLY);

    let first = post_generate(
        build_test_app(dir.path(), completion.clone()),
        Some(&bearer()),
        button_request("u1"),
    )
    .await;
    assert_eq!(first.status(), StatusCode::OK);

    let second = post_generate(
        build_test_app(dir.path(), completion.clone()),
        Some(&bearer()),
        json!({
            "prompt": "make it red",
            "model": "gpt-4o",
            "user_id": "u1",
            "modify_existing": true
        }),
    )
    .await;
    assert_eq!(second.status(), StatusCode::OK);

    let prompts = completion.prompts();
    match prompts[1].1.messages.last() {
        Some(ChatMessage::User(UserContent::Text(text))) => {
            assert!(text.contains("export default function X(){return <button/>}"));
            assert!(text.contains("make it red"));
        }
        other => panic!("expected a text user message, got {:?}", other),
    }
}

#[tokio::test]
async fn image_is_sent_as_multimodal_content() {
    let dir = tempfile::tempdir().unwrap();
    let completion = StubCompletion::replying(BUTTON_REPLY);
    let app = build_test_app(dir.path(), completion.clone());

    let response = post_generate(
        app,
        Some(&bearer()),
        json!({
            "prompt": "build this screen",
            "image": "https://example.com/screen.png",
            "model": "gpt-4o",
            "user_id": "u2"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let prompts = completion.prompts();
    match prompts[0].1.messages.last() {
        Some(ChatMessage::User(UserContent::TextWithImage { text, image_url })) => {
            assert!(text.contains("build this screen"));
            assert_eq!(image_url, "https://example.com/screen.png");
        }
        other => panic!("expected multimodal content, got {:?}", other),
    }
}

// ---------------------------------------------------------------------------
// Authorization
// ---------------------------------------------------------------------------

#[tokio::test]
async fn bad_tokens_are_rejected_before_calling_the_model() {
    let dir = tempfile::tempdir().unwrap();
    let completion = StubCompletion::replying(BUTTON_REPLY);

    for authorization in [
        None,
        Some("Bearer wrong"),
        Some("test-secret"),
        Some("bearer test-secret"),
        Some("Bearer test-secret "),
        Some("Basic test-secret"),
    ] {
        let app = build_test_app(dir.path(), completion.clone());
        let response = post_generate(app, authorization, button_request("u1")).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{:?}", authorization);
        assert_eq!(body_json(response).await["detail"], "Invalid token");
    }

    assert_eq!(completion.calls(), 0);
    assert_eq!(current_component(dir.path(), "u1"), None);
}

// ---------------------------------------------------------------------------
// Failure paths
// ---------------------------------------------------------------------------

#[tokio::test]
async fn reply_without_code_block_returns_404_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let completion = StubCompletion::replying("export default function X(){return <button/>}");
    let app = build_test_app(dir.path(), completion.clone());

    let response = post_generate(app, Some(&bearer()), button_request("u1")).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await["detail"],
        "No JSX code block found in the response"
    );
    assert_eq!(current_component(dir.path(), "u1"), None);
    assert_eq!(backup_count(dir.path(), "u1"), 0);
}

#[tokio::test]
async fn upstream_failure_returns_500_with_message() {
    let dir = tempfile::tempdir().unwrap();
    let completion = StubCompletion::failing("upstream timed out");
    let app = build_test_app(dir.path(), completion.clone());

    let response = post_generate(app, Some(&bearer()), button_request("u1")).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let detail = body_json(response).await["detail"].as_str().unwrap().to_string();
    assert!(detail.contains("upstream timed out"));
    assert_eq!(current_component(dir.path(), "u1"), None);
}

#[tokio::test]
async fn path_traversal_user_id_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let completion = StubCompletion::replying(BUTTON_REPLY);

    for user_id in ["../escape", "a/b", "", ".."] {
        let app = build_test_app(dir.path(), completion.clone());
        let response = post_generate(app, Some(&bearer()), button_request(user_id)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{:?}", user_id);
    }

    assert_eq!(completion.calls(), 0);
    assert!(!dir.path().join("components").exists());
    assert!(!dir.path().join("backups").exists());
}

#[tokio::test]
async fn incomplete_body_returns_json_detail() {
    let dir = tempfile::tempdir().unwrap();
    let completion = StubCompletion::replying(BUTTON_REPLY);
    let app = build_test_app(dir.path(), completion.clone());

    let response = post_generate(
        app,
        Some(&bearer()),
        json!({ "prompt": "make a button", "user_id": "u1" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let detail = body_json(response).await["detail"].as_str().unwrap().to_string();
    assert!(detail.contains("model"), "{}", detail);
    assert_eq!(completion.calls(), 0);
    assert_eq!(current_component(dir.path(), "u1"), None);
}
