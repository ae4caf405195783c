//! In-memory backend used by the application tests.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use herald_core::config::{Attachment, ConfigUpdate, PersistedConfig, Schedule};
use herald_core::error::Result;
use herald_core::gateway::BackendGateway;
use herald_core::roster::TargetGroup;
use herald_core::session::{ScanPayload, SessionStatus};

/// Canned outcomes per endpoint plus a log of every call.
pub struct MockBackendGateway {
    status: Mutex<Result<SessionStatus>>,
    scan: Mutex<Result<ScanPayload>>,
    config: Mutex<Result<PersistedConfig>>,
    groups: Mutex<Result<Vec<TargetGroup>>>,
    groups_delay: Mutex<Option<Duration>>,
    save: Mutex<Result<()>>,
    trigger: Mutex<Result<()>>,
    calls: Mutex<Vec<String>>,
    saved: Mutex<Vec<(ConfigUpdate, Option<Attachment>)>>,
}

impl MockBackendGateway {
    /// A ready backend with two groups and a config targeting `g1`.
    pub fn connected() -> Self {
        Self {
            status: Mutex::new(Ok(SessionStatus::new("Connected", true))),
            scan: Mutex::new(Ok(ScanPayload::default())),
            config: Mutex::new(Ok(PersistedConfig {
                confirmation_number: "972500000000@c.us".to_string(),
                schedule: Schedule::new("08:00", "08:00", "20:00"),
                message: "Good morning".to_string(),
                target_group_ids: vec!["g1".to_string()],
                attachment: None,
            })),
            groups: Mutex::new(Ok(vec![
                TargetGroup::new("g1", "Family"),
                TargetGroup::new("g2", "Work"),
            ])),
            groups_delay: Mutex::new(None),
            save: Mutex::new(Ok(())),
            trigger: Mutex::new(Ok(())),
            calls: Mutex::new(Vec::new()),
            saved: Mutex::new(Vec::new()),
        }
    }

    pub fn set_status(&self, outcome: Result<SessionStatus>) {
        *self.status.lock().unwrap() = outcome;
    }

    pub fn set_scan(&self, qr: Option<&str>) {
        *self.scan.lock().unwrap() = Ok(ScanPayload {
            qr: qr.map(str::to_string),
        });
    }

    pub fn set_scan_outcome(&self, outcome: Result<ScanPayload>) {
        *self.scan.lock().unwrap() = outcome;
    }

    pub fn set_config(&self, outcome: Result<PersistedConfig>) {
        *self.config.lock().unwrap() = outcome;
    }

    pub fn set_groups(&self, outcome: Result<Vec<TargetGroup>>) {
        *self.groups.lock().unwrap() = outcome;
    }

    pub fn set_groups_delay(&self, delay: Duration) {
        *self.groups_delay.lock().unwrap() = Some(delay);
    }

    pub fn set_save(&self, outcome: Result<()>) {
        *self.save.lock().unwrap() = outcome;
    }

    pub fn set_trigger(&self, outcome: Result<()>) {
        *self.trigger.lock().unwrap() = outcome;
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| *c == call).count()
    }

    pub fn saved(&self) -> Vec<(ConfigUpdate, Option<Attachment>)> {
        self.saved.lock().unwrap().clone()
    }

    fn record(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }
}

#[async_trait]
impl BackendGateway for MockBackendGateway {
    async fn fetch_status(&self) -> Result<SessionStatus> {
        self.record("GET /status");
        self.status.lock().unwrap().clone()
    }

    async fn fetch_scan_artifact(&self) -> Result<ScanPayload> {
        self.record("GET /qr");
        self.scan.lock().unwrap().clone()
    }

    async fn fetch_config(&self) -> Result<PersistedConfig> {
        self.record("GET /config");
        self.config.lock().unwrap().clone()
    }

    async fn fetch_groups(&self) -> Result<Vec<TargetGroup>> {
        self.record("GET /groups");
        let delay = *self.groups_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.groups.lock().unwrap().clone()
    }

    async fn save_config(&self, update: &ConfigUpdate, image: Option<&Attachment>) -> Result<()> {
        self.record("POST /config");
        let outcome = self.save.lock().unwrap().clone();
        if outcome.is_ok() {
            self.saved
                .lock()
                .unwrap()
                .push((update.clone(), image.cloned()));
        }
        outcome
    }

    async fn trigger_broadcast(&self) -> Result<()> {
        self.record("POST /broadcast");
        self.trigger.lock().unwrap().clone()
    }
}
