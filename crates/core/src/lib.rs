pub mod collaborator;
pub mod events;
pub mod generator;
pub mod profile;
pub mod prompt_loader;
pub mod questions;
pub mod relay;
pub mod report;
pub mod session_state;
pub mod speech;
pub mod spoken;
pub mod store;
pub mod transcription;

pub use collaborator::CollaboratorError;
pub use events::{ClientEvent, ServerEvent};
pub use profile::CandidateProfile;
pub use relay::{Outbox, Relay};
pub use session_state::{ConnectionId, InterviewState, MAX_TURNS, Session};
pub use store::SessionStore;
