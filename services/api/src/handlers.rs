use crate::state::AppState;
use axum::{
    Json,
    extract::{Multipart, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use interview_core::generator::QuestionRequest;
use interview_core::report::InterviewReport;
use interview_core::spoken::{SpokenQuestion, spoken_question};
use interview_core::transcription::Transcript;
use serde_json::json;

/// Errors surfaced to HTTP callers as `{"error": "..."}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Upstream(&'static str),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// `POST /api/ai-interview`: generate a question and voice it.
pub async fn ai_interview(
    State(state): State<AppState>,
    body: Result<Json<QuestionRequest>, JsonRejection>,
) -> Result<Json<SpokenQuestion>, ApiError> {
    let Json(mut request) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    request.user_profile = request
        .user_profile
        .validated()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    spoken_question(&*state.generator, &*state.synthesizer, &request)
        .await
        .map(Json)
        .map_err(|e| {
            tracing::error!("Error generating interview question: {}", e);
            ApiError::Upstream("Failed to generate question")
        })
}

/// `POST /api/process-audio`: transcribe the multipart `audio` field.
pub async fn process_audio(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Transcript>, ApiError> {
    let mut audio = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        if field.name() == Some("audio") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::BadRequest(e.to_string()))?;
            audio = Some(bytes);
            break;
        }
    }

    let audio = audio
        .filter(|bytes| !bytes.is_empty())
        .ok_or_else(|| ApiError::BadRequest("No audio file provided".to_string()))?;
    tracing::debug!("Transcribing {} bytes of audio", audio.len());

    state
        .transcriber
        .transcribe(&audio)
        .await
        .map(Json)
        .map_err(|e| {
            tracing::error!("Error processing audio: {}", e);
            ApiError::Upstream("Failed to process audio")
        })
}

/// `GET /api/results`
pub async fn results() -> Json<InterviewReport> {
    Json(InterviewReport::canned())
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "activeSessions": state.relay.store().len(),
    }))
}
