//! Backend gateway trait.
//!
//! Defines the only way the console talks to the broadcast backend. Each call
//! maps to one HTTP endpoint of the backend.

use async_trait::async_trait;

use crate::config::{Attachment, ConfigUpdate, PersistedConfig};
use crate::error::Result;
use crate::roster::TargetGroup;
use crate::session::{ScanPayload, SessionStatus};

/// Access to the broadcast backend.
///
/// Implementations perform a single attempt per call; they never retry.
#[async_trait]
pub trait BackendGateway: Send + Sync {
    /// `GET /status`
    async fn fetch_status(&self) -> Result<SessionStatus>;

    /// `GET /qr`
    async fn fetch_scan_artifact(&self) -> Result<ScanPayload>;

    /// `GET /config`
    async fn fetch_config(&self) -> Result<PersistedConfig>;

    /// `GET /groups`
    async fn fetch_groups(&self) -> Result<Vec<TargetGroup>>;

    /// `POST /config`
    ///
    /// When `image` is `None` no image part is sent at all, which leaves the
    /// backend's saved image unchanged.
    async fn save_config(&self, update: &ConfigUpdate, image: Option<&Attachment>) -> Result<()>;

    /// `POST /broadcast`
    async fn trigger_broadcast(&self) -> Result<()>;
}
