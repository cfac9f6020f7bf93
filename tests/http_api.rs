//! End-to-end tests of the HTTP API against a fake LLM provider and an
//! in-memory SMTP transport.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::Router;
use lettre::transport::smtp::authentication::Credentials;
use lettre::Message;
use tower::ServiceExt;

use notetaker::config::Settings;
use notetaker::email::{EmailNotifier, SmtpConfig, SmtpConnector, SmtpSession, TlsMode};
use notetaker::error::BoxError;
use notetaker::llm::{LlmConfig, SummarizerClient};
use notetaker::server::{create_router, AppState};

const FIXED_SUMMARY: &str = "## Q3 Roadmap\n- Alice owns the launch\n\n## Action Items\n- Bob: draft plan";

/// Start a fake chat-completion provider; returns its base URL and the
/// request bodies it received.
async fn spawn_provider(
    status: StatusCode,
    reply: serde_json::Value,
) -> (String, Arc<Mutex<Vec<serde_json::Value>>>) {
    let received = Arc::new(Mutex::new(Vec::new()));
    let sink = received.clone();
    let app = Router::new().route(
        "/v1/chat/completions",
        post(move |axum::Json(body): axum::Json<serde_json::Value>| {
            let sink = sink.clone();
            let reply = reply.clone();
            async move {
                sink.lock().unwrap().push(body);
                (status, axum::Json(reply)).into_response()
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}", addr), received)
}

#[derive(Default)]
struct MemoryConnector {
    log: Arc<Mutex<Vec<String>>>,
}

struct MemorySession {
    log: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl SmtpConnector for MemoryConnector {
    async fn connect(
        &self,
        host: &str,
        port: u16,
        tls: TlsMode,
    ) -> Result<Box<dyn SmtpSession>, BoxError> {
        self.log
            .lock()
            .unwrap()
            .push(format!("connect {}:{} {:?}", host, port, tls));
        Ok(Box::new(MemorySession {
            log: self.log.clone(),
        }))
    }
}

#[async_trait]
impl SmtpSession for MemorySession {
    async fn starttls(&mut self) -> Result<(), BoxError> {
        self.log.lock().unwrap().push("starttls".to_string());
        Ok(())
    }

    async fn authenticate(&mut self, _credentials: &Credentials) -> Result<(), BoxError> {
        self.log.lock().unwrap().push("auth".to_string());
        Ok(())
    }

    async fn send(&mut self, message: &Message) -> Result<(), BoxError> {
        let raw = String::from_utf8_lossy(&message.formatted()).to_string();
        self.log.lock().unwrap().push(format!("send {}", raw));
        Ok(())
    }

    async fn close(&mut self) {
        self.log.lock().unwrap().push("close".to_string());
    }
}

struct TestApp {
    router: Router,
    smtp_log: Arc<Mutex<Vec<String>>>,
}

fn build_app(base_url: &str, smtp: SmtpConfig) -> TestApp {
    let mut settings = Settings::default();
    settings.llm = LlmConfig::default()
        .with_api_key("sk-test")
        .with_base_url(base_url)
        .with_model("gpt-test");
    settings.smtp = smtp.clone();

    let connector = Arc::new(MemoryConnector::default());
    let smtp_log = connector.log.clone();
    let state = AppState::from_parts(
        settings.clone(),
        SummarizerClient::new(&settings.llm).unwrap(),
        EmailNotifier::with_connector(smtp, connector),
    )
    .unwrap();

    TestApp {
        router: create_router(state),
        smtp_log,
    }
}

fn smtp_with_credentials() -> SmtpConfig {
    SmtpConfig {
        host: "smtp.example.com".to_string(),
        user: "bot@example.com".to_string(),
        password: "app-password".to_string(),
        ..SmtpConfig::default()
    }
}

fn json_request(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn form_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn multipart_request(filename: &str, content: &[u8]) -> Request<Body> {
    let boundary = "notetaker-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\n",
            filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri("/upload-file")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn summarize_returns_provider_content() {
    let (base, received) = spawn_provider(
        StatusCode::OK,
        serde_json::json!({"choices": [{"message": {"role": "assistant", "content": FIXED_SUMMARY}}]}),
    )
    .await;
    let app = build_app(&base, smtp_with_credentials());

    let response = app
        .router
        .oneshot(json_request(
            "/summarize",
            serde_json::json!({"transcript": "Alice and Bob discussed the Q3 roadmap.", "prompt": ""}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({"summary": FIXED_SUMMARY})
    );

    let received = received.lock().unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0]["model"], "gpt-test");
    assert_eq!(
        received[0]["messages"][1]["content"],
        "Custom instruction: Summarize the meeting clearly.\n\nTranscript:\nAlice and Bob discussed the Q3 roadmap."
    );
}

#[tokio::test]
async fn summarize_trims_custom_instruction() {
    let (base, received) = spawn_provider(
        StatusCode::OK,
        serde_json::json!({"choices": [{"message": {"content": "ok"}}]}),
    )
    .await;
    let app = build_app(&base, smtp_with_credentials());

    let response = app
        .router
        .oneshot(json_request(
            "/summarize",
            serde_json::json!({"transcript": "Weekly sync", "prompt": "  Focus on blockers  "}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let received = received.lock().unwrap();
    assert!(received[0]["messages"][1]["content"]
        .as_str()
        .unwrap()
        .starts_with("Custom instruction: Focus on blockers\n\n"));
}

#[tokio::test]
async fn summarize_blank_transcript_is_bad_request() {
    let (base, received) = spawn_provider(StatusCode::OK, serde_json::json!({})).await;
    let app = build_app(&base, smtp_with_credentials());

    let response = app
        .router
        .oneshot(json_request(
            "/summarize",
            serde_json::json!({"transcript": "   "}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["detail"], "Transcript is required.");
    assert!(received.lock().unwrap().is_empty());
}

#[tokio::test]
async fn summarize_upstream_failure_is_server_error() {
    let (base, _) = spawn_provider(
        StatusCode::TOO_MANY_REQUESTS,
        serde_json::json!({"error": {"message": "rate limited"}}),
    )
    .await;
    let app = build_app(&base, smtp_with_credentials());

    let response = app
        .router
        .oneshot(json_request(
            "/summarize",
            serde_json::json!({"transcript": "Retro notes"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let detail = body_json(response).await["detail"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(detail.starts_with("Summarization failed: HTTP 429"));
}

#[tokio::test]
async fn upload_file_rejects_non_txt() {
    let app = build_app("http://127.0.0.1:9", smtp_with_credentials());

    let response = app
        .router
        .oneshot(multipart_request("notes.pdf", b"%PDF-1.7"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn upload_file_returns_text_content() {
    let app = build_app("http://127.0.0.1:9", smtp_with_credentials());

    let response = app
        .router
        .oneshot(multipart_request("notes.txt", b"hello"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({"filename": "notes.txt", "content": "hello"})
    );
}

#[tokio::test]
async fn share_sends_one_message_over_starttls() {
    let app = build_app("http://127.0.0.1:9", smtp_with_credentials());

    let response = app
        .router
        .oneshot(form_request(
            "/share",
            "email=alice%40example.com&summary=Ship+on+Friday",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({"message": "Email sent successfully"})
    );

    let log = app.smtp_log.lock().unwrap().clone();
    assert_eq!(log.len(), 5);
    assert_eq!(log[0], "connect smtp.example.com:587 StartTls");
    assert_eq!(log[1], "starttls");
    assert_eq!(log[2], "auth");
    assert!(log[3].contains("Subject: Meeting Summary"));
    assert!(log[3].contains("To: alice@example.com"));
    assert!(log[3].contains("Ship on Friday"));
    assert_eq!(log[4], "close");
}

#[tokio::test]
async fn share_over_implicit_tls_uses_custom_subject() {
    let smtp = SmtpConfig {
        port: 465,
        tls: TlsMode::Implicit,
        ..smtp_with_credentials()
    };
    let app = build_app("http://127.0.0.1:9", smtp);

    let response = app
        .router
        .oneshot(form_request(
            "/share",
            "email=alice%40example.com&subject=Sprint+review&summary=Demo+went+well",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let log = app.smtp_log.lock().unwrap().clone();
    assert_eq!(log[0], "connect smtp.example.com:465 Implicit");
    assert!(!log.iter().any(|entry| entry == "starttls"));
    assert!(log.iter().any(|entry| entry.contains("Subject: Sprint review")));
}

#[tokio::test]
async fn share_without_credentials_never_connects() {
    let app = build_app("http://127.0.0.1:9", SmtpConfig::default());

    let response = app
        .router
        .oneshot(form_request(
            "/share",
            "email=alice%40example.com&summary=Notes",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(app.smtp_log.lock().unwrap().is_empty());
}

#[tokio::test]
async fn share_blank_summary_is_bad_request() {
    let app = build_app("http://127.0.0.1:9", smtp_with_credentials());

    let response = app
        .router
        .oneshot(form_request("/share", "email=alice%40example.com&summary=+"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(app.smtp_log.lock().unwrap().is_empty());
}
