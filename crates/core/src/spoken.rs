use crate::collaborator::CollaboratorError;
use crate::generator::{QuestionGenerator, QuestionRequest};
use crate::speech::SpeechSynthesizer;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;

/// A generated question together with its synthesized audio (base64 MPEG).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpokenQuestion {
    pub question: String,
    pub audio: String,
}

/// Generates the question text, then voices it. Either failure aborts the whole call.
pub async fn spoken_question<G, S>(
    generator: &G,
    synthesizer: &S,
    request: &QuestionRequest,
) -> Result<SpokenQuestion, CollaboratorError>
where
    G: QuestionGenerator + ?Sized,
    S: SpeechSynthesizer + ?Sized,
{
    let question = generator.generate_question(request).await?;
    tracing::debug!(
        question_number = request.question_number,
        "Generated question: {question}"
    );
    let audio = synthesizer.synthesize(&question).await?;
    Ok(SpokenQuestion {
        question,
        audio: STANDARD.encode(&audio),
    })
}
