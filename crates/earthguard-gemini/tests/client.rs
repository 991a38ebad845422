//! Integration tests for `GeminiClient` and `ChatGateway` using wiremock HTTP mocks.

use earthguard_gemini::{build_prompt, ChatError, ChatGateway, GeminiClient};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL_PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

fn test_client(base_url: &str) -> GeminiClient {
    GeminiClient::with_base_url("test-key", "gemini-2.5-flash", 30, base_url)
        .expect("client construction should not fail")
}

fn text_response(parts: &[&str]) -> serde_json::Value {
    let parts: Vec<_> = parts.iter().map(|t| serde_json::json!({ "text": t })).collect();
    serde_json::json!({
        "candidates": [
            { "content": { "role": "model", "parts": parts }, "finishReason": "STOP" }
        ]
    })
}

fn google_error(code: u16, message: &str, status: &str) -> serde_json::Value {
    serde_json::json!({
        "error": { "code": code, "message": message, "status": status }
    })
}

async fn mount_error(server: &MockServer, code: u16, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(code).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn generate_content_returns_markdown_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(serde_json::json!({
            "contents": [{ "parts": [{ "text": "hello" }] }]
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(text_response(&["**Recycle** it."])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let text = client.generate_content("hello").await.expect("should succeed");

    assert_eq!(text, "**Recycle** it.");
}

#[tokio::test]
async fn multi_part_candidate_is_joined() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(text_response(&["### Tips\n", "* Rinse"])),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let text = client.generate_content("tips").await.unwrap();

    assert_eq!(text, "### Tips\n* Rinse");
}

#[tokio::test]
async fn gateway_sends_wrapped_prompt() {
    let server = MockServer::start().await;
    let question = "How do I dispose of old batteries?";

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .and(body_partial_json(serde_json::json!({
            "contents": [{ "parts": [{ "text": build_prompt(question) }] }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response(&["Take them to a drop-off point."])))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = ChatGateway::new(test_client(&server.uri()));
    let answer = gateway.ask(question).await.unwrap();

    assert_eq!(answer, "Take them to a drop-off point.");
}

#[tokio::test]
async fn unauthorized_status_is_auth_error() {
    let server = MockServer::start().await;
    mount_error(
        &server,
        401,
        google_error(401, "Request had invalid authentication credentials.", "UNAUTHENTICATED"),
    )
    .await;

    let err = test_client(&server.uri()).generate_content("q").await.unwrap_err();

    assert!(matches!(err, ChatError::Auth(_)), "got {err:?}");
}

#[tokio::test]
async fn invalid_key_message_on_bad_request_is_auth_error() {
    let server = MockServer::start().await;
    mount_error(
        &server,
        400,
        google_error(
            400,
            "API key not valid. Please pass a valid API key.",
            "INVALID_ARGUMENT",
        ),
    )
    .await;

    let err = test_client(&server.uri()).generate_content("q").await.unwrap_err();

    assert_eq!(
        err,
        ChatError::Auth("API key not valid. Please pass a valid API key.".to_string())
    );
}

#[tokio::test]
async fn too_many_requests_is_quota_error() {
    let server = MockServer::start().await;
    mount_error(
        &server,
        429,
        google_error(429, "Resource has been exhausted", "RESOURCE_EXHAUSTED"),
    )
    .await;

    let err = test_client(&server.uri()).generate_content("q").await.unwrap_err();

    assert!(matches!(err, ChatError::QuotaExceeded(_)), "got {err:?}");
}

#[tokio::test]
async fn quota_message_without_structured_status_is_quota_error() {
    let server = MockServer::start().await;
    mount_error(
        &server,
        500,
        serde_json::json!({ "error": { "code": 500, "message": "Daily quota exceeded" } }),
    )
    .await;

    let err = test_client(&server.uri()).generate_content("q").await.unwrap_err();

    assert!(matches!(err, ChatError::QuotaExceeded(_)), "got {err:?}");
}

#[tokio::test]
async fn server_error_is_transient() {
    let server = MockServer::start().await;
    mount_error(
        &server,
        500,
        google_error(500, "Internal error encountered.", "INTERNAL"),
    )
    .await;

    let err = test_client(&server.uri()).generate_content("q").await.unwrap_err();

    assert_eq!(
        err,
        ChatError::Transient("Internal error encountered.".to_string())
    );
}

#[tokio::test]
async fn empty_candidates_is_transient() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "candidates": [] })),
        )
        .mount(&server)
        .await;

    let err = test_client(&server.uri()).generate_content("q").await.unwrap_err();

    assert!(matches!(err, ChatError::Transient(_)), "got {err:?}");
}

#[tokio::test]
async fn malformed_success_body_is_transient() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = test_client(&server.uri()).generate_content("q").await.unwrap_err();

    assert!(matches!(err, ChatError::Transient(_)), "got {err:?}");
}
