use crate::profile::CandidateProfile;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// Number of accepted responses after which an interview is complete.
pub const MAX_TURNS: u32 = 10;

/// Opaque identifier the channel assigns to each connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseRecord {
    /// Turn the response answered, taken from the server's own counter.
    pub turn: u32,
    pub transcript: String,
    pub received_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterviewState {
    NotStarted,
    InProgress { turn_index: u32 },
    Completed,
}

/// Progress of one interview, owned by the session store.
#[derive(Debug, Clone)]
pub struct Session {
    pub connection_id: ConnectionId,
    pub profile: CandidateProfile,
    turn_index: u32,
    responses: Vec<ResponseRecord>,
}

impl Session {
    pub fn new(connection_id: ConnectionId, profile: CandidateProfile) -> Self {
        Self {
            connection_id,
            profile,
            turn_index: 0,
            responses: Vec::new(),
        }
    }

    pub fn turn_index(&self) -> u32 {
        self.turn_index
    }

    pub fn responses(&self) -> &[ResponseRecord] {
        &self.responses
    }

    pub fn is_complete(&self) -> bool {
        self.turn_index >= MAX_TURNS
    }

    pub fn state(&self) -> InterviewState {
        if self.is_complete() {
            InterviewState::Completed
        } else {
            InterviewState::InProgress {
                turn_index: self.turn_index,
            }
        }
    }

    /// Appends a response and advances the turn counter, keeping
    /// `turn_index == responses.len()`. Returns the new turn index, or `None`
    /// when the interview is already complete and nothing was recorded.
    pub fn record_response(&mut self, transcript: String) -> Option<u32> {
        if self.is_complete() {
            return None;
        }
        self.responses.push(ResponseRecord {
            turn: self.turn_index,
            transcript,
            received_at: Utc::now(),
        });
        self.turn_index += 1;
        Some(self.turn_index)
    }
}
