use interview_core::generator::QuestionGenerator;
use interview_core::speech::SpeechSynthesizer;
use interview_core::transcription::Transcriber;
use interview_core::{Relay, SessionStore};
use std::sync::Arc;

/// Everything the handlers share. Cloned per request; the contents are all behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub relay: Relay,
    pub generator: Arc<dyn QuestionGenerator>,
    pub synthesizer: Arc<dyn SpeechSynthesizer>,
    pub transcriber: Arc<dyn Transcriber>,
}

impl AppState {
    pub fn new(
        store: Arc<SessionStore>,
        generator: Arc<dyn QuestionGenerator>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        transcriber: Arc<dyn Transcriber>,
    ) -> Self {
        Self {
            relay: Relay::new(store),
            generator,
            synthesizer,
            transcriber,
        }
    }
}
