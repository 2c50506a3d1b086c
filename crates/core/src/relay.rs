//! The interview state machine.
//!
//! A connection is `NotStarted` until a start event creates its session, then
//! `InProgress` for turns 0..=9, then `Completed` after the tenth accepted
//! response. Every inbound event goes through [`Relay::handle`], which mutates
//! the session synchronously and delivers at most one event to the connection.

use crate::events::{ClientEvent, ServerEvent, UserResponse};
use crate::profile::CandidateProfile;
use crate::questions;
use crate::session_state::{ConnectionId, InterviewState, MAX_TURNS};
use crate::store::SessionStore;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

/// Events queued per connection before new ones are dropped.
pub const OUTBOX_CAPACITY: usize = 64;

/// Fire-and-forget delivery handle for one connection.
///
/// Bounded: a client that stops reading loses events instead of growing the
/// queue.
#[derive(Debug, Clone)]
pub struct Outbox {
    tx: mpsc::Sender<ServerEvent>,
}

impl Outbox {
    pub fn channel() -> (Self, mpsc::Receiver<ServerEvent>) {
        Self::with_capacity(OUTBOX_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> (Self, mpsc::Receiver<ServerEvent>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }

    pub fn deliver(&self, event: ServerEvent) {
        match self.tx.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                tracing::debug!("Outbox full, dropping {:?}", event);
            }
            Err(TrySendError::Closed(event)) => {
                // The writer is gone, so the connection is closing anyway.
                tracing::debug!("Dropping event for closed connection: {:?}", event);
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Relay {
    store: Arc<SessionStore>,
}

impl Relay {
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn state(&self, connection_id: &ConnectionId) -> InterviewState {
        self.store
            .get(connection_id)
            .map(|session| session.state())
            .unwrap_or(InterviewState::NotStarted)
    }

    pub fn handle(&self, connection_id: ConnectionId, event: ClientEvent, outbox: &Outbox) {
        match event {
            ClientEvent::Start(profile) => self.start(connection_id, profile, outbox),
            ClientEvent::Response(response) => self.respond(connection_id, response, outbox),
            ClientEvent::End => self.end(connection_id),
        }
    }

    /// Channel-level loss of the connection. Always discards the session.
    pub fn disconnect(&self, connection_id: ConnectionId) {
        if self.store.delete(&connection_id) {
            tracing::info!(%connection_id, "Discarded session on disconnect");
        }
    }

    fn start(&self, connection_id: ConnectionId, profile: CandidateProfile, outbox: &Outbox) {
        tracing::info!(%connection_id, "Starting interview for {}", profile.name);
        let session = self.store.create(connection_id, profile);
        let question = questions::next_question(session.turn_index(), &session.profile);
        outbox.deliver(ServerEvent::question(question));
    }

    fn respond(&self, connection_id: ConnectionId, response: UserResponse, outbox: &Outbox) {
        let reply = self.store.with_session_mut(&connection_id, |session| {
            if let Some(claimed) = response.turn_number {
                if claimed != session.turn_index() + 1 {
                    tracing::debug!(
                        %connection_id,
                        claimed,
                        turn_index = session.turn_index(),
                        "Client turn number disagrees with server counter"
                    );
                }
            }
            match session.record_response(response.transcript) {
                Some(turn) if turn >= MAX_TURNS => {
                    tracing::info!(%connection_id, "Interview complete");
                    ServerEvent::Complete
                }
                Some(turn) => ServerEvent::question(questions::next_question(turn, &session.profile)),
                None => ServerEvent::Complete,
            }
        });

        match reply {
            Some(event) => outbox.deliver(event),
            None => tracing::debug!(%connection_id, "Ignoring response without an active session"),
        }
    }

    fn end(&self, connection_id: ConnectionId) {
        if self.store.delete(&connection_id) {
            tracing::info!(%connection_id, "Interview ended");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questions::{FOLLOW_UP_QUESTIONS, greeting};

    fn relay() -> Relay {
        Relay::new(Arc::new(SessionStore::new()))
    }

    fn ava() -> CandidateProfile {
        CandidateProfile::new("Ava", "backend")
    }

    fn answer(text: &str) -> ClientEvent {
        ClientEvent::Response(UserResponse {
            transcript: text.to_string(),
            turn_number: None,
        })
    }

    fn question_text(event: ServerEvent) -> String {
        match event {
            ServerEvent::NextQuestion { question, .. } => question,
            other => panic!("expected a question, got {other:?}"),
        }
    }

    #[test]
    fn start_emits_personalized_greeting() {
        let relay = relay();
        let (outbox, mut rx) = Outbox::channel();
        let id = ConnectionId::new();

        relay.handle(id, ClientEvent::Start(ava()), &outbox);

        let question = question_text(rx.try_recv().unwrap());
        assert!(question.contains("Ava"));
        assert!(question.contains("backend"));
        assert_eq!(relay.state(&id), InterviewState::InProgress { turn_index: 0 });
    }

    #[test]
    fn full_interview_runs_ten_turns_then_completes() {
        let relay = relay();
        let (outbox, mut rx) = Outbox::channel();
        let id = ConnectionId::new();

        relay.handle(id, ClientEvent::Start(ava()), &outbox);
        assert_eq!(question_text(rx.try_recv().unwrap()), greeting(&ava()));

        for n in 1..=9u32 {
            relay.handle(id, answer(&format!("answer {n}")), &outbox);
            let session = relay.store().get(&id).unwrap();
            assert_eq!(session.turn_index(), n);
            assert_eq!(session.responses().len(), n as usize);
            assert_eq!(
                question_text(rx.try_recv().unwrap()),
                FOLLOW_UP_QUESTIONS[n as usize - 1]
            );
        }

        relay.handle(id, answer("last"), &outbox);
        assert_eq!(rx.try_recv().unwrap(), ServerEvent::Complete);
        assert!(rx.try_recv().is_err(), "no question after completion");
        assert_eq!(relay.state(&id), InterviewState::Completed);
        assert_eq!(relay.store().get(&id).unwrap().responses().len(), 10);
    }

    #[test]
    fn completed_session_persists_until_end() {
        let relay = relay();
        let (outbox, mut rx) = Outbox::channel();
        let id = ConnectionId::new();

        relay.handle(id, ClientEvent::Start(ava()), &outbox);
        for _ in 0..MAX_TURNS {
            relay.handle(id, answer("ok"), &outbox);
        }
        while rx.try_recv().is_ok() {}

        relay.handle(id, answer("one more"), &outbox);
        assert_eq!(rx.try_recv().unwrap(), ServerEvent::Complete);
        assert_eq!(relay.store().get(&id).unwrap().turn_index(), MAX_TURNS);

        relay.handle(id, ClientEvent::End, &outbox);
        assert_eq!(relay.state(&id), InterviewState::NotStarted);
    }

    #[test]
    fn response_without_session_is_silent() {
        let relay = relay();
        let (outbox, mut rx) = Outbox::channel();
        let id = ConnectionId::new();

        relay.handle(id, answer("hello?"), &outbox);

        assert!(rx.try_recv().is_err());
        assert!(relay.store().get(&id).is_none());
        assert_eq!(relay.state(&id), InterviewState::NotStarted);
    }

    #[test]
    fn end_without_session_is_a_no_op() {
        let relay = relay();
        let (outbox, mut rx) = Outbox::channel();
        relay.handle(ConnectionId::new(), ClientEvent::End, &outbox);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn restart_resets_progress() {
        let relay = relay();
        let (outbox, mut rx) = Outbox::channel();
        let id = ConnectionId::new();

        relay.handle(id, ClientEvent::Start(ava()), &outbox);
        relay.handle(id, answer("a"), &outbox);
        relay.handle(id, answer("b"), &outbox);
        assert_eq!(relay.store().get(&id).unwrap().turn_index(), 2);

        relay.handle(id, ClientEvent::Start(CandidateProfile::new("Bo", "data")), &outbox);
        let session = relay.store().get(&id).unwrap();
        assert_eq!(session.turn_index(), 0);
        assert!(session.responses().is_empty());

        let events: Vec<_> = std::iter::from_fn(|| rx.try_recv().ok()).collect();
        assert!(question_text(events.last().unwrap().clone()).contains("Bo"));
    }

    #[test]
    fn disconnect_discards_mid_interview_and_restart_begins_fresh() {
        let relay = relay();
        let (outbox, mut rx) = Outbox::channel();
        let id = ConnectionId::new();

        relay.handle(id, ClientEvent::Start(ava()), &outbox);
        relay.handle(id, answer("a"), &outbox);
        relay.disconnect(id);
        assert_eq!(relay.state(&id), InterviewState::NotStarted);
        relay.disconnect(id);

        relay.handle(id, ClientEvent::Start(ava()), &outbox);
        assert_eq!(relay.state(&id), InterviewState::InProgress { turn_index: 0 });
        let last = std::iter::from_fn(|| rx.try_recv().ok()).last().unwrap();
        assert_eq!(question_text(last), greeting(&ava()));
    }

    #[test]
    fn claimed_turn_number_is_not_trusted() {
        let relay = relay();
        let (outbox, mut rx) = Outbox::channel();
        let id = ConnectionId::new();

        relay.handle(id, ClientEvent::Start(ava()), &outbox);
        relay.handle(
            id,
            ClientEvent::Response(UserResponse {
                transcript: "skip ahead".to_string(),
                turn_number: Some(7),
            }),
            &outbox,
        );

        let session = relay.store().get(&id).unwrap();
        assert_eq!(session.turn_index(), 1);
        assert_eq!(session.responses()[0].turn, 0);
        let last = std::iter::from_fn(|| rx.try_recv().ok()).last().unwrap();
        assert_eq!(question_text(last), FOLLOW_UP_QUESTIONS[0]);
    }

    #[test]
    fn connections_do_not_interfere() {
        let relay = relay();
        let (outbox_a, mut rx_a) = Outbox::channel();
        let (outbox_b, mut rx_b) = Outbox::channel();
        let a = ConnectionId::new();
        let b = ConnectionId::new();

        relay.handle(a, ClientEvent::Start(ava()), &outbox_a);
        relay.handle(b, ClientEvent::Start(CandidateProfile::new("Bo", "data")), &outbox_b);
        relay.handle(a, answer("x"), &outbox_a);
        relay.disconnect(b);

        assert_eq!(relay.state(&a), InterviewState::InProgress { turn_index: 1 });
        assert_eq!(relay.state(&b), InterviewState::NotStarted);
        assert_eq!(std::iter::from_fn(|| rx_a.try_recv().ok()).count(), 2);
        assert_eq!(std::iter::from_fn(|| rx_b.try_recv().ok()).count(), 1);
    }

    #[test]
    fn stalled_reader_caps_the_outbox() {
        let relay = relay();
        let (outbox, mut rx) = Outbox::with_capacity(8);
        let id = ConnectionId::new();

        relay.handle(id, ClientEvent::Start(ava()), &outbox);
        for _ in 0..1_000 {
            relay.handle(id, answer("flood"), &outbox);
        }

        assert_eq!(std::iter::from_fn(|| rx.try_recv().ok()).count(), 8);
        // Dropped events do not stop the session from advancing.
        assert_eq!(relay.state(&id), InterviewState::Completed);
    }
}
