#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use interview_api::state::AppState;
use interview_core::CollaboratorError;
use interview_core::SessionStore;
use interview_core::generator::{QuestionGenerator, QuestionRequest};
use interview_core::speech::SpeechSynthesizer;
use interview_core::transcription::{Transcriber, Transcript};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Echoes the requested question number back so tests can check the wiring.
pub struct FixedGenerator;

#[async_trait]
impl QuestionGenerator for FixedGenerator {
    async fn generate_question(
        &self,
        request: &QuestionRequest,
    ) -> Result<String, CollaboratorError> {
        Ok(format!(
            "Question {} for {}",
            request.question_number, request.user_profile.name
        ))
    }
}

pub struct FixedSynthesizer;

#[async_trait]
impl SpeechSynthesizer for FixedSynthesizer {
    async fn synthesize(&self, _text: &str) -> Result<Bytes, CollaboratorError> {
        Ok(Bytes::from_static(b"ID3"))
    }
}

pub struct FixedTranscriber;

#[async_trait]
impl Transcriber for FixedTranscriber {
    async fn transcribe(&self, audio: &[u8]) -> Result<Transcript, CollaboratorError> {
        Ok(Transcript {
            transcript: format!("{} bytes heard", audio.len()),
            confidence: 0.5,
        })
    }
}

/// Every call fails the way an unconfigured service does.
pub struct Unavailable;

#[async_trait]
impl QuestionGenerator for Unavailable {
    async fn generate_question(&self, _: &QuestionRequest) -> Result<String, CollaboratorError> {
        Err(CollaboratorError::NotConfigured {
            service: "question generator",
        })
    }
}

#[async_trait]
impl SpeechSynthesizer for Unavailable {
    async fn synthesize(&self, _: &str) -> Result<Bytes, CollaboratorError> {
        Err(CollaboratorError::NotConfigured {
            service: "speech synthesizer",
        })
    }
}

#[async_trait]
impl Transcriber for Unavailable {
    async fn transcribe(&self, _: &[u8]) -> Result<Transcript, CollaboratorError> {
        Err(CollaboratorError::NotConfigured {
            service: "transcriber",
        })
    }
}

pub fn working_state() -> AppState {
    AppState::new(
        Arc::new(SessionStore::new()),
        Arc::new(FixedGenerator),
        Arc::new(FixedSynthesizer),
        Arc::new(FixedTranscriber),
    )
}

pub fn failing_state() -> AppState {
    AppState::new(
        Arc::new(SessionStore::new()),
        Arc::new(Unavailable),
        Arc::new(Unavailable),
        Arc::new(Unavailable),
    )
}

pub fn app(state: AppState) -> axum::Router {
    interview_api::app(state, CorsLayer::permissive())
}
