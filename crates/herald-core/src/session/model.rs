//! Session status models as exchanged with the backend.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::error::{HeraldError, Result};

/// Raw label the backend reports while it waits for a scan.
pub const AWAITING_SCAN_LABEL: &str = "Scan QR Code";

/// `GET /status` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStatus {
    /// Free-form label from the backend ("Connected", "Scan QR Code", ...)
    #[serde(rename = "status", default)]
    pub raw_state: String,
    #[serde(default)]
    pub ready: bool,
}

impl SessionStatus {
    pub fn new(raw_state: impl Into<String>, ready: bool) -> Self {
        Self {
            raw_state: raw_state.into(),
            ready,
        }
    }

    /// Whether a scan artifact is worth requesting for this status.
    pub fn is_awaiting_scan(&self) -> bool {
        !self.ready && self.raw_state == AWAITING_SCAN_LABEL
    }
}

/// `GET /qr` payload. `qr` is null once the session is established.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanPayload {
    #[serde(default)]
    pub qr: Option<String>,
}

impl ScanPayload {
    /// Converts the payload into an artifact, treating null or blank as absent.
    pub fn into_artifact(self) -> Option<ScanArtifact> {
        self.qr
            .filter(|qr| !qr.trim().is_empty())
            .map(ScanArtifact::new)
    }
}

/// Backend-issued image used to re-establish a session.
///
/// Only ever displayed, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanArtifact {
    data_url: String,
}

impl ScanArtifact {
    pub fn new(data_url: impl Into<String>) -> Self {
        Self {
            data_url: data_url.into(),
        }
    }

    /// The `data:image/png;base64,...` URL exactly as received.
    pub fn data_url(&self) -> &str {
        &self.data_url
    }

    /// MIME type declared by the data URL, if any.
    pub fn mime_type(&self) -> Option<&str> {
        let rest = self.data_url.strip_prefix("data:")?;
        let header = rest.split(',').next()?;
        let mime = header.split(';').next()?;
        (!mime.is_empty()).then_some(mime)
    }

    /// Decodes the base64 image bytes carried by the data URL.
    pub fn decode_image(&self) -> Result<Vec<u8>> {
        let (header, payload) = self
            .data_url
            .split_once(',')
            .ok_or_else(|| HeraldError::decode("scan artifact is not a data URL"))?;
        if !header.starts_with("data:") || !header.ends_with(";base64") {
            return Err(HeraldError::decode(format!(
                "unsupported scan artifact encoding: {}",
                header
            )));
        }
        STANDARD
            .decode(payload.trim())
            .map_err(|e| HeraldError::decode(format!("invalid scan artifact payload: {}", e)))
    }
}
