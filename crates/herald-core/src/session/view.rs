//! Derived session state machine.
//!
//! The state is recomputed from scratch from the latest status fetch; there is
//! no hidden history between refresh cycles.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::model::{ScanArtifact, SessionStatus};
use crate::error::{HeraldError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// Status fetched, not ready, and not waiting for a scan.
    Disconnected,
    /// Status fetched, not ready, backend waiting for a scan.
    AwaitingScan,
    /// Status fetched and ready.
    Connected,
    /// The latest status fetch failed outright, or none has resolved yet.
    BackendUnreachable,
}

impl SessionState {
    pub fn label(&self) -> &'static str {
        match self {
            SessionState::Disconnected => "Not connected",
            SessionState::AwaitingScan => "Awaiting scan",
            SessionState::Connected => "Connected",
            SessionState::BackendUnreachable => "Backend offline",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What the status panel shows for one refresh cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    pub state: SessionState,
    /// Backend label, when the status fetch succeeded.
    pub raw_state: Option<String>,
    /// Present only in `AwaitingScan` when the artifact fetch succeeded.
    pub artifact: Option<ScanArtifact>,
    /// Why the status fetch failed, for `BackendUnreachable`.
    pub error: Option<HeraldError>,
}

impl Default for SessionView {
    fn default() -> Self {
        Self::initial()
    }
}

impl SessionView {
    /// State before the first status fetch resolves.
    pub fn initial() -> Self {
        Self {
            state: SessionState::BackendUnreachable,
            raw_state: None,
            artifact: None,
            error: None,
        }
    }

    /// Derives the view from the outcome of the latest status fetch.
    pub fn from_status(outcome: &Result<SessionStatus>) -> Self {
        match outcome {
            Ok(status) => {
                let state = if status.ready {
                    SessionState::Connected
                } else if status.is_awaiting_scan() {
                    SessionState::AwaitingScan
                } else {
                    SessionState::Disconnected
                };
                Self {
                    state,
                    raw_state: Some(status.raw_state.clone()),
                    artifact: None,
                    error: None,
                }
            }
            Err(err) => Self {
                state: SessionState::BackendUnreachable,
                raw_state: None,
                artifact: None,
                error: Some(err.clone()),
            },
        }
    }

    /// Whether this cycle should issue the secondary scan-artifact request.
    pub fn wants_artifact(&self) -> bool {
        self.state == SessionState::AwaitingScan
    }

    /// Attaches the outcome of the scan-artifact request.
    ///
    /// A failed or empty fetch only means no artifact is shown; the state is
    /// never changed here.
    pub fn with_artifact(mut self, outcome: Result<Option<ScanArtifact>>) -> Self {
        if self.wants_artifact() {
            self.artifact = outcome.ok().flatten();
        }
        self
    }
}
