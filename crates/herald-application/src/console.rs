//! The refresh cycle.
//!
//! `ConsoleView` is owned by the caller and threaded through every cycle:
//! fetch, reconcile, then hand the view back for rendering. Outbound actions
//! go through the same use case so a successful save is followed by a fresh
//! read of the backend.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use herald_core::config::{ConfigEditor, PersistedConfig, RefreshMode};
use herald_core::error::{HeraldError, Result};
use herald_core::gateway::BackendGateway;
use herald_core::roster::Roster;
use herald_core::session::SessionView;

use crate::dispatcher::{SubmitReceipt, UpdateDispatcher};
use crate::fetcher::{RefreshTicket, RemoteSnapshot, RemoteStateFetcher, merge_roster};

/// Shown when no roster has ever been fetched.
pub const EMPTY_ROSTER_HINT: &str =
    "No groups found yet. Wait for the client to sync, then refresh.";

/// Everything the operator sees, plus the draft being edited.
#[derive(Debug, Clone, Default)]
pub struct ConsoleView {
    pub session: SessionView,
    /// Last-known-good roster.
    pub roster: Roster,
    /// Configuration from the latest successful fetch.
    pub config: Option<PersistedConfig>,
    /// Why the latest configuration fetch failed.
    pub config_error: Option<HeraldError>,
    pub editor: ConfigEditor,
    pub fetched_at: Option<DateTime<Utc>>,
    issued: u64,
    applied: u64,
}

impl ConsoleView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues the ticket for a new cycle. Any earlier ticket becomes stale.
    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.issued += 1;
        RefreshTicket {
            generation: self.issued,
        }
    }

    /// True when every issued cycle has been applied.
    pub fn is_settled(&self) -> bool {
        self.issued == self.applied
    }

    /// Reconciles `snapshot` into the view.
    ///
    /// Returns false, leaving the view untouched, when a newer ticket has
    /// been issued since the snapshot's cycle began.
    pub fn apply(&mut self, snapshot: RemoteSnapshot, mode: RefreshMode) -> bool {
        let generation = snapshot.ticket.generation;
        if generation != self.issued || generation <= self.applied {
            tracing::debug!(
                generation,
                latest = self.issued,
                "discarding stale snapshot"
            );
            return false;
        }

        let mut session = SessionView::from_status(&snapshot.status);
        if let Some(artifact) = snapshot.artifact {
            session = session.with_artifact(artifact);
        }
        self.session = session;

        self.roster = merge_roster(std::mem::take(&mut self.roster), snapshot.groups);

        match snapshot.config {
            Ok(config) => {
                if self.editor.seed(&config, &self.roster, mode) {
                    tracing::debug!(?mode, "draft seeded from backend configuration");
                }
                self.config = Some(config);
                self.config_error = None;
            }
            Err(err) => {
                self.config = None;
                self.config_error = Some(err);
            }
        }
        self.editor.reconcile(&self.roster);

        self.fetched_at = Some(snapshot.fetched_at);
        self.applied = generation;
        true
    }

    /// Hint to show instead of an empty roster.
    pub fn roster_hint(&self) -> Option<&'static str> {
        self.roster.is_empty().then_some(EMPTY_ROSTER_HINT)
    }
}

/// Runs refresh cycles and outbound actions against one backend.
pub struct ConsoleUseCase {
    fetcher: RemoteStateFetcher,
    dispatcher: UpdateDispatcher,
}

impl ConsoleUseCase {
    pub fn new(gateway: Arc<dyn BackendGateway>, timeout: Duration) -> Self {
        Self {
            fetcher: RemoteStateFetcher::new(gateway.clone(), timeout),
            dispatcher: UpdateDispatcher::new(gateway),
        }
    }

    pub fn fetcher(&self) -> &RemoteStateFetcher {
        &self.fetcher
    }

    /// One full cycle: fetch everything, then reconcile into `view`.
    pub async fn refresh(&self, mut view: ConsoleView, mode: RefreshMode) -> ConsoleView {
        let ticket = view.begin_refresh();
        let snapshot = self.fetcher.fetch_all(ticket).await;
        view.apply(snapshot, mode);
        tracing::debug!(
            generation = ticket.generation,
            state = %view.session.state,
            groups = view.roster.len(),
            "refresh settled"
        );
        view
    }

    /// Saves the draft. On success the draft is discarded and the view is
    /// re-fetched, which seeds a fresh draft from what the backend now holds.
    pub async fn save(&self, mut view: ConsoleView) -> (ConsoleView, Result<SubmitReceipt>) {
        let outcome = self
            .dispatcher
            .submit(view.editor.draft(), &view.roster)
            .await;
        if outcome.is_ok() {
            view.editor.discard();
            view = self.refresh(view, RefreshMode::Auto).await;
        }
        (view, outcome)
    }

    /// Broadcasts the persisted configuration now.
    pub async fn trigger(&self) -> Result<()> {
        self.dispatcher.trigger_now().await
    }
}
