//! Timeout-bounded reads of the three remote states.
//!
//! Each fetch catches its own failure and reports it as an `Err` local to that
//! fetch. The three run concurrently and none can stall or abort the others.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use herald_core::config::PersistedConfig;
use herald_core::error::{HeraldError, Result};
use herald_core::gateway::BackendGateway;
use herald_core::roster::Roster;
use herald_core::session::{ScanArtifact, SessionStatus};

/// Identifies one refresh cycle; later tickets supersede earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshTicket {
    pub generation: u64,
}

/// Everything one refresh cycle read from the backend.
#[derive(Debug, Clone)]
pub struct RemoteSnapshot {
    pub ticket: RefreshTicket,
    pub fetched_at: DateTime<Utc>,
    pub status: Result<SessionStatus>,
    /// `None` when the status did not call for a scan artifact.
    pub artifact: Option<Result<Option<ScanArtifact>>>,
    pub config: Result<PersistedConfig>,
    pub groups: Result<Roster>,
}

pub struct RemoteStateFetcher {
    gateway: Arc<dyn BackendGateway>,
    timeout: Duration,
}

impl RemoteStateFetcher {
    pub fn new(gateway: Arc<dyn BackendGateway>, timeout: Duration) -> Self {
        Self { gateway, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn bounded<T, F>(&self, operation: &str, call: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let outcome = match tokio::time::timeout(self.timeout, call).await {
            Ok(outcome) => outcome,
            Err(_) => Err(HeraldError::timeout(
                operation,
                self.timeout.as_millis() as u64,
            )),
        };
        if let Err(err) = &outcome {
            tracing::warn!(operation, error = %err, "fetch failed");
        }
        outcome
    }

    pub async fn fetch_status(&self) -> Result<SessionStatus> {
        self.bounded("GET /status", self.gateway.fetch_status()).await
    }

    /// Fetches the scan artifact; a null artifact is `Ok(None)`.
    pub async fn fetch_scan_artifact(&self) -> Result<Option<ScanArtifact>> {
        self.bounded("GET /qr", self.gateway.fetch_scan_artifact())
            .await
            .map(|payload| payload.into_artifact())
    }

    pub async fn fetch_config(&self) -> Result<PersistedConfig> {
        self.bounded("GET /config", self.gateway.fetch_config()).await
    }

    pub async fn fetch_groups(&self) -> Result<Roster> {
        self.bounded("GET /groups", self.gateway.fetch_groups())
            .await
            .map(Roster::from)
    }

    /// Status, then the scan artifact only when the status calls for one.
    async fn fetch_session(&self) -> (Result<SessionStatus>, Option<Result<Option<ScanArtifact>>>) {
        let status = self.fetch_status().await;
        let artifact = match &status {
            Ok(status) if status.is_awaiting_scan() => Some(self.fetch_scan_artifact().await),
            _ => None,
        };
        (status, artifact)
    }

    /// Runs all fetches concurrently and waits for every one to settle.
    pub async fn fetch_all(&self, ticket: RefreshTicket) -> RemoteSnapshot {
        let ((status, artifact), config, groups) =
            tokio::join!(self.fetch_session(), self.fetch_config(), self.fetch_groups());

        RemoteSnapshot {
            ticket,
            fetched_at: Utc::now(),
            status,
            artifact,
            config,
            groups,
        }
    }
}

/// Merge rule for the roster: keep `previous` unless the fetch produced a
/// non-empty roster.
///
/// This is the one fetch failure that is masked from the operator.
pub fn merge_roster(previous: Roster, fetched: Result<Roster>) -> Roster {
    match fetched {
        Ok(roster) if !roster.is_empty() => roster,
        Ok(_) => {
            tracing::debug!(kept = previous.len(), "empty roster fetched, keeping previous");
            previous
        }
        Err(err) => {
            tracing::debug!(kept = previous.len(), error = %err, "roster fetch failed, keeping previous");
            previous
        }
    }
}
