//! Conversation session state with pure transitions.
//!
//! A session is a value: the append-only message log plus a request phase.
//! Every change is a `Transition` applied through `SessionState::apply`:
//! - Idle -> Awaiting (user query accepted, request issued)
//! - Awaiting -> Idle (response applied, or failure recorded)
//!
//! Keeping the reducer pure makes the whole conversation lifecycle
//! unit-testable without a transport or a UI harness; the orchestrator owns
//! the lock, this module owns the meaning.

use std::fmt;

use floatchat_core::Message;

/// Request phase of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionPhase {
    /// No request outstanding. Ready to submit.
    Idle,
    /// A query has been sent and its outcome not yet applied.
    Awaiting,
}

impl Default for SessionPhase {
    fn default() -> Self {
        SessionPhase::Idle
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionPhase::Idle => write!(f, "Idle"),
            SessionPhase::Awaiting => write!(f, "Awaiting"),
        }
    }
}

/// One step of the conversation lifecycle.
#[derive(Debug, Clone)]
pub enum Transition {
    /// A user query was accepted and its request issued.
    Submitted { message: Message },
    /// The backend answered; `message` is the normalized assistant reply.
    Responded { message: Message },
    /// The request failed; `message` is the synthetic assistant reply.
    Failed { message: Message },
}

/// Value-typed session state.
///
/// `log` is append-only; index order is chronological and is the display
/// order. Messages are never removed or reordered within a session.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub log: Vec<Message>,
    pub phase: SessionPhase,
}

impl SessionState {
    /// Apply a transition, returning the successor state.
    ///
    /// Total: every transition applies from every state. Admission control
    /// (rejecting a submit while `Awaiting`) happens before a `Submitted`
    /// transition is ever constructed.
    pub fn apply(mut self, transition: Transition) -> SessionState {
        match transition {
            Transition::Submitted { message } => {
                self.log.push(message);
                self.phase = SessionPhase::Awaiting;
            }
            Transition::Responded { message } | Transition::Failed { message } => {
                self.log.push(message);
                self.phase = SessionPhase::Idle;
            }
        }
        self
    }
}

// =============================================================================
// Tests
// =============================================================================
