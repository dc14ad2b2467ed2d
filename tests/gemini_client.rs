//! Drives the Gemini client against a throw-away local server standing in
//! for the generateContent endpoint.

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::http::{HeaderMap, StatusCode, Uri, header};
use quick_answer::answer::{AnswerRequester, SYSTEM_INSTRUCTION};
use quick_answer::clients::{AnswerModel, GeminiClient, LlmError};
use serde_json::Value;

#[derive(Debug, Default, Clone)]
struct Captured {
    path: String,
    api_key: Option<String>,
    body: Value,
}

async fn spawn_mock(status: StatusCode, reply: &'static str) -> (String, Arc<Mutex<Captured>>) {
    let captured = Arc::new(Mutex::new(Captured::default()));
    let sink = captured.clone();

    let app = Router::new().fallback(move |uri: Uri, headers: HeaderMap, body: String| {
        let sink = sink.clone();
        async move {
            *sink.lock().unwrap() = Captured {
                path: uri.path().to_string(),
                api_key: headers
                    .get("x-goog-api-key")
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string),
                body: serde_json::from_str(&body).unwrap_or(Value::Null),
            };
            (status, [(header::CONTENT_TYPE, "application/json")], reply)
        }
    });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/v1beta", addr), captured)
}

fn client(api_base: String) -> GeminiClient {
    GeminiClient::new("test-key".into(), "gemini-2.5-flash".into(), api_base).unwrap()
}

#[tokio::test]
async fn sends_instruction_and_question_and_returns_text() {
    let (base, captured) = spawn_mock(
        StatusCode::OK,
        r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Four."}]},"finishReason":"STOP"}]}"#,
    )
    .await;

    let answer = client(base)
        .generate(SYSTEM_INSTRUCTION, "What is 2 + 2?")
        .await
        .unwrap();
    assert_eq!(answer, "Four.");

    let seen = captured.lock().unwrap().clone();
    assert_eq!(seen.path, "/v1beta/models/gemini-2.5-flash:generateContent");
    assert_eq!(seen.api_key.as_deref(), Some("test-key"));
    assert_eq!(
        seen.body["systemInstruction"]["parts"][0]["text"],
        SYSTEM_INSTRUCTION
    );
    assert_eq!(seen.body["contents"][0]["role"], "user");
    assert_eq!(seen.body["contents"][0]["parts"][0]["text"], "What is 2 + 2?");
}

#[tokio::test]
async fn api_error_status_surfaces_through_requester() {
    let (base, _) = spawn_mock(
        StatusCode::FORBIDDEN,
        r#"{"error":{"code":403,"message":"Permission denied.","status":"PERMISSION_DENIED"}}"#,
    )
    .await;

    let requester = AnswerRequester::Ready(Arc::new(client(base)));
    assert_eq!(
        requester.get_answer("hi").await,
        "An error occurred with the LLM API: 403 PERMISSION_DENIED. Permission denied."
    );
}

#[tokio::test]
async fn malformed_body_is_a_parse_error() {
    let (base, _) = spawn_mock(StatusCode::OK, "not json").await;
    let err = client(base).generate("sys", "q").await.unwrap_err();
    assert!(matches!(err, LlmError::Parse(_)));
}

#[tokio::test]
async fn unreachable_endpoint_is_a_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let requester = AnswerRequester::Ready(Arc::new(client(format!("http://{}/v1beta", addr))));
    let answer = requester.get_answer("hello?").await;
    assert!(answer.starts_with("An error occurred with the LLM API: request failed: "));
}

#[tokio::test]
#[cfg(feature = "live_llm")]
async fn live_gemini_call() {
    quick_answer::config::Config::load_env_files();
    let Ok(key) = std::env::var("GEMINI_API_KEY") else {
        eprintln!("Skipping live Gemini test - set GEMINI_API_KEY to run");
        return;
    };
    let client = GeminiClient::new(
        key,
        quick_answer::clients::gemini::DEFAULT_MODEL.into(),
        quick_answer::clients::gemini::DEFAULT_API_BASE.into(),
    )
    .unwrap();
    let answer = client
        .generate(SYSTEM_INSTRUCTION, "Reply with the single word: test")
        .await
        .unwrap();
    assert!(answer.to_lowercase().contains("test"));
}
