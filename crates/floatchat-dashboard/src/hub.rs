//! Shared snapshot hub for the dashboard surfaces.
//!
//! The hub holds the single `DashboardSnapshot` derived from the most recent
//! artifact-bearing assistant response. The conversation engine replaces it
//! wholesale; display surfaces only read it. A revision counter lets pollers
//! detect change without comparing snapshots.

use std::sync::{Mutex, MutexGuard, PoisonError};

use floatchat_core::DashboardSnapshot;

/// Snapshot and revision move together, so they share one lock.
#[derive(Debug, Default)]
struct HubState {
    snapshot: DashboardSnapshot,
    revision: u64,
}

/// Thread-safe holder of the latest dashboard artifacts.
///
/// Starts empty at revision 0. Every accepted `present` advances the
/// revision by exactly one; readers that cached a revision can cheaply ask
/// whether anything changed since.
#[derive(Debug, Default)]
pub struct DashboardHub {
    state: Mutex<HubState>,
}

impl DashboardHub {
    /// Create a hub holding the empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current snapshot wholesale.
    ///
    /// Idempotent: presenting a snapshot equal to the current one changes
    /// nothing observable and returns `None`. Otherwise the new snapshot is
    /// swapped in and the advanced revision is returned.
    pub fn present(&self, snapshot: DashboardSnapshot) -> Option<u64> {
        let mut state = self.lock_state();
        if state.snapshot == snapshot {
            tracing::debug!(
                revision = state.revision,
                "Snapshot unchanged; skipping republish"
            );
            return None;
        }
        state.snapshot = snapshot;
        state.revision += 1;
        tracing::debug!(
            revision = state.revision,
            has_chart = state.snapshot.chart.is_some(),
            location_count = state.snapshot.locations.len(),
            "Dashboard snapshot replaced"
        );
        Some(state.revision)
    }

    /// Returns the current snapshot.
    pub fn snapshot(&self) -> DashboardSnapshot {
        self.lock_state().snapshot.clone()
    }

    /// Returns the monotonic change counter. 0 until the first publication.
    pub fn revision(&self) -> u64 {
        self.lock_state().revision
    }

    /// Reset the dashboard to the empty snapshot.
    ///
    /// A no-op when the dashboard is already empty.
    pub fn clear(&self) {
        if self.present(DashboardSnapshot::default()).is_some() {
            tracing::debug!("Dashboard cleared");
        }
    }

    // -- Private helpers --

    fn lock_state(&self) -> MutexGuard<'_, HubState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// =============================================================================
// Tests
// =============================================================================
