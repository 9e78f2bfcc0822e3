//! Conversation engine for FloatChat.
//!
//! Turns a user utterance into one backend request, normalizes whatever
//! comes back into canonical message and visualization artifacts, and keeps
//! the conversation log, in-flight flag, and dashboard snapshot consistent
//! across overlapping submissions and partial failures.

pub mod error;
pub mod normalize;
pub mod orchestrator;
pub mod state;

pub use error::ChatError;
pub use normalize::{normalize, NormalizedResponse, FALLBACK_NARRATIVE};
pub use orchestrator::ChatOrchestrator;
pub use state::{SessionPhase, SessionState, Transition};
