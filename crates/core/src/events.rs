//! Wire format of the interview channel.
//!
//! Every frame is a JSON object `{"event": <name>, "data": <payload>}`. The
//! event names match the ones the browser client already emits and listens for.

use crate::profile::{CandidateProfile, ProfileError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const START_INTERVIEW: &str = "start-interview";
pub const USER_RESPONSE: &str = "user-response";
pub const END_INTERVIEW: &str = "end-interview";

#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("frame is not a valid event envelope: {0}")]
    MalformedEnvelope(#[source] serde_json::Error),
    #[error("unknown event '{0}'")]
    UnknownEvent(String),
    #[error("invalid payload for '{event}': {source}")]
    InvalidPayload {
        event: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    InvalidProfile(#[from] ProfileError),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub transcript: String,
    /// Turn number claimed by the client. Informational only.
    #[serde(default, alias = "questionNumber")]
    pub turn_number: Option<u32>,
}

/// Events a connected client can send.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    Start(CandidateProfile),
    Response(UserResponse),
    End,
}

/// Events the server delivers to a connection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "data")]
pub enum ServerEvent {
    #[serde(rename = "ai-response")]
    NextQuestion {
        question: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        audio: Option<String>,
    },
    #[serde(rename = "interview-complete")]
    Complete,
    #[serde(rename = "error")]
    Error { message: String },
}

impl ServerEvent {
    pub fn question(question: impl Into<String>) -> Self {
        Self::NextQuestion {
            question: question.into(),
            audio: None,
        }
    }

    pub fn to_frame(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[derive(Deserialize)]
struct Envelope {
    event: String,
    #[serde(default)]
    data: Value,
}

/// Decodes one text frame into a validated client event.
pub fn parse_frame(text: &str) -> Result<ClientEvent, ProtocolError> {
    let envelope: Envelope =
        serde_json::from_str(text).map_err(ProtocolError::MalformedEnvelope)?;

    match envelope.event.as_str() {
        START_INTERVIEW => {
            let profile: CandidateProfile = serde_json::from_value(envelope.data).map_err(
                |source| ProtocolError::InvalidPayload {
                    event: START_INTERVIEW,
                    source,
                },
            )?;
            Ok(ClientEvent::Start(profile.validated()?))
        }
        USER_RESPONSE => {
            let response = serde_json::from_value(envelope.data).map_err(|source| {
                ProtocolError::InvalidPayload {
                    event: USER_RESPONSE,
                    source,
                }
            })?;
            Ok(ClientEvent::Response(response))
        }
        END_INTERVIEW => Ok(ClientEvent::End),
        other => Err(ProtocolError::UnknownEvent(other.to_string())),
    }
}
