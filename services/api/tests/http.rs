mod common;

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

async fn send(app: axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

fn question_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/ai-interview")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn audio_upload(field: &str, content: &[u8]) -> Request<Body> {
    let boundary = "interview-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"recording.wav\"\r\nContent-Type: audio/wav\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/api/process-audio")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn ai_interview_returns_question_and_audio() {
    let (status, body) = send(
        common::app(common::working_state()),
        question_request(json!({
            "userProfile": {"name": "Ava", "jobRole": "backend", "skills": "Rust"},
            "questionNumber": 4,
            "previousResponse": "I like queues."
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["question"], "Question 4 for Ava");
    assert_eq!(body["audio"], "SUQz");
}

#[tokio::test]
async fn ai_interview_rejects_incomplete_profile() {
    let (status, body) = send(
        common::app(common::working_state()),
        question_request(json!({
            "userProfile": {"name": "Ava"},
            "questionNumber": 1
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("jobRole"));
}

#[tokio::test]
async fn ai_interview_malformed_body_is_json_error() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/ai-interview")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"userProfile\":"))
        .unwrap();

    let (status, body) = send(common::app(common::working_state()), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn ai_interview_collaborator_failure_is_generic_500() {
    let (status, body) = send(
        common::app(common::failing_state()),
        question_request(json!({
            "userProfile": {"name": "Ava", "jobRole": "backend"},
            "questionNumber": 1
        })),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Failed to generate question"}));
}

#[tokio::test]
async fn process_audio_transcribes_upload() {
    let (status, body) = send(
        common::app(common::working_state()),
        audio_upload("audio", b"RIFFDATA"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["transcript"], "8 bytes heard");
    assert_eq!(body["confidence"], 0.5);
}

#[tokio::test]
async fn process_audio_requires_audio_field() {
    let (status, body) = send(
        common::app(common::working_state()),
        audio_upload("video", b"RIFFDATA"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "No audio file provided"}));
}

#[tokio::test]
async fn process_audio_collaborator_failure_is_generic_500() {
    let (status, body) = send(
        common::app(common::failing_state()),
        audio_upload("audio", b"RIFFDATA"),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Failed to process audio"}));
}

#[tokio::test]
async fn results_and_health() {
    let state = common::working_state();

    let (status, body) = send(
        common::app(state.clone()),
        Request::get("/api/results").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["overallScore"], 78);
    assert_eq!(body["strengths"].as_array().unwrap().len(), 4);

    let (status, body) = send(
        common::app(state),
        Request::get("/health").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok", "activeSessions": 0}));
}
