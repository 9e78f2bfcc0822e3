//! Conversation orchestration.
//!
//! `ChatOrchestrator` is the single writer of session state: it validates a
//! submission, appends the user message, issues the one outstanding request,
//! normalizes the result, appends the assistant reply, and publishes the
//! artifacts to the dashboard hub. Readers only ever observe fully-applied
//! transitions.
//!
//! Failure policy: a transport failure becomes a synthetic assistant message
//! in the log plus a `QueryFailed` notice; the dashboard keeps its last good
//! artifacts. `submit` itself errs only for invalid input and single-flight
//! rejection.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::broadcast;

use floatchat_client::{ChatPayload, ChatTransport, TransportError};
use floatchat_core::events::SessionNotice;
use floatchat_core::{DashboardSnapshot, Message, Timestamp};
use floatchat_dashboard::DashboardHub;

use crate::error::ChatError;
use crate::normalize::normalize;
use crate::state::{SessionPhase, SessionState, Transition};

/// Buffered notices per subscriber before a slow consumer starts lagging.
const NOTICE_CAPACITY: usize = 256;

/// Owns the conversation log, the in-flight flag, and artifact publication.
pub struct ChatOrchestrator<T: ChatTransport> {
    transport: T,
    state: Mutex<SessionState>,
    dashboard: Arc<DashboardHub>,
    notice_tx: broadcast::Sender<SessionNotice>,
}

impl<T: ChatTransport> ChatOrchestrator<T> {
    /// Create an orchestrator with an empty log in the `Idle` phase.
    pub fn new(transport: T, dashboard: Arc<DashboardHub>) -> Self {
        let (notice_tx, _) = broadcast::channel(NOTICE_CAPACITY);
        Self {
            transport,
            state: Mutex::new(SessionState::default()),
            dashboard,
            notice_tx,
        }
    }

    /// Run one conversation turn for `query`.
    ///
    /// Appends the user message, issues exactly one request, and returns the
    /// assistant reply that was appended for this turn; on transport failure
    /// that reply is the synthetic error message. Errs only when the query
    /// is empty after trimming or another request is still in flight; in
    /// both cases nothing is appended and no request is issued.
    pub async fn submit(&self, query: &str) -> Result<Message, ChatError> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(ChatError::EmptyQuery);
        }

        let user_message = Message::user(trimmed.to_string());
        let message_id = user_message.id.clone();

        // Admission check and user-message append commit under one lock, so
        // two racing submits cannot both pass the phase check.
        {
            let mut state = self.lock_state();
            if state.phase == SessionPhase::Awaiting {
                return Err(ChatError::RequestInFlight);
            }
            *state = std::mem::take(&mut *state).apply(Transition::Submitted {
                message: user_message,
            });
        }

        self.notify(SessionNotice::QuerySubmitted {
            message_id,
            query_len: trimmed.len(),
            timestamp: Timestamp::now(),
        });
        tracing::info!(query_len = trimmed.len(), "Submitting query to backend");

        let reply = match self.transport.send(trimmed).await {
            Ok(payload) => self.apply_response(&payload),
            Err(err) => self.apply_failure(err),
        };
        Ok(reply)
    }

    /// Returns a copy of the conversation log in display order.
    pub fn history(&self) -> Vec<Message> {
        self.lock_state().log.clone()
    }

    /// Returns the current request phase.
    pub fn phase(&self) -> SessionPhase {
        self.lock_state().phase
    }

    /// Subscribe to out-of-band session notices.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionNotice> {
        self.notice_tx.subscribe()
    }

    // -- Private helpers --

    /// Normalize a successful payload, append the assistant reply, and
    /// publish the artifacts when the turn produced any.
    fn apply_response(&self, payload: &ChatPayload) -> Message {
        let normalized = normalize(payload);
        let has_chart = normalized.chart.is_some();
        let location_count = normalized.locations.len();
        let has_artifacts = normalized.has_artifacts();

        let generated_query = if normalized.generated_query.is_empty() {
            None
        } else {
            Some(normalized.generated_query.clone())
        };
        let assistant = Message::assistant(
            normalized.narrative,
            normalized.chart.clone(),
            generated_query,
        );

        {
            let mut state = self.lock_state();
            *state = std::mem::take(&mut *state).apply(Transition::Responded {
                message: assistant.clone(),
            });
        }

        self.notify(SessionNotice::ResponseApplied {
            message_id: assistant.id.clone(),
            has_chart,
            location_count,
            timestamp: Timestamp::now(),
        });

        if has_artifacts {
            let snapshot = DashboardSnapshot {
                chart: normalized.chart,
                generated_query: normalized.generated_query,
                locations: normalized.locations,
            };
            if let Some(revision) = self.dashboard.present(snapshot) {
                self.notify(SessionNotice::SnapshotPublished {
                    revision,
                    has_chart,
                    location_count,
                    timestamp: Timestamp::now(),
                });
            }
        }

        tracing::info!(has_chart, location_count, "Applied assistant response");
        assistant
    }

    /// Record a failed turn: synthetic assistant reply, `QueryFailed`
    /// notice, dashboard untouched.
    fn apply_failure(&self, err: TransportError) -> Message {
        let detail = err.to_string();
        tracing::warn!(error = %detail, "Query failed; recording synthetic reply");

        let assistant = Message::assistant(format!("I encountered an error: {}", detail), None, None);

        {
            let mut state = self.lock_state();
            *state = std::mem::take(&mut *state).apply(Transition::Failed {
                message: assistant.clone(),
            });
        }

        self.notify(SessionNotice::QueryFailed {
            message_id: assistant.id.clone(),
            detail,
            timestamp: Timestamp::now(),
        });
        assistant
    }

    /// Best-effort broadcast; a send with no subscribers is not an error.
    fn notify(&self, notice: SessionNotice) {
        let _ = self.notice_tx.send(notice);
    }

    fn lock_state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// =============================================================================
// Tests
// =============================================================================
