//! reqwest implementation of [`BackendGateway`].
//!
//! One attempt per call, each bounded by the configured timeout. Transport
//! failures are classified into the console's error taxonomy here so the
//! upper layers never see reqwest types.

use std::time::Duration;

use async_trait::async_trait;
use herald_core::config::{Attachment, ConfigUpdate, PersistedConfig};
use herald_core::error::{HeraldError, Result};
use herald_core::gateway::BackendGateway;
use herald_core::roster::TargetGroup;
use herald_core::session::{ScanPayload, SessionStatus};
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use uuid::Uuid;

pub const STATUS_PATH: &str = "/status";
pub const SCAN_PATH: &str = "/qr";
pub const CONFIG_PATH: &str = "/config";
pub const GROUPS_PATH: &str = "/groups";
pub const BROADCAST_PATH: &str = "/broadcast";

/// Talks to the backend over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBackendGateway {
    base_url: String,
    timeout: Duration,
    http: reqwest::Client,
}

impl HttpBackendGateway {
    /// Creates a gateway for `base_url`; the URL must be non-empty.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            timeout,
            http: reqwest::Client::new(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn endpoint(&self, path: &str) -> String {
        let path = path.trim();
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    fn request(&self, method: reqwest::Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, self.endpoint(path))
            .header("x-request-id", format!("req_{}", Uuid::new_v4().simple()))
            .timeout(self.timeout)
    }

    async fn send(&self, operation: &str, request: RequestBuilder) -> Result<Response> {
        tracing::debug!(operation, "sending backend request");
        let response = request
            .send()
            .await
            .map_err(|e| self.classify(operation, e))?;
        tracing::debug!(operation, status = %response.status(), "backend responded");
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let operation = format!("GET {}", path);
        let response = self
            .send(&operation, self.request(reqwest::Method::GET, path))
            .await?;
        let bytes = self.read_success_body(&operation, response).await?;
        serde_json::from_slice::<T>(&bytes)
            .map_err(|e| HeraldError::decode(format!("{}: {}", operation, e)))
    }

    /// Reads the body, turning any non-success status into `BadResponse`.
    async fn read_success_body(&self, operation: &str, response: Response) -> Result<Vec<u8>> {
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.classify(operation, e))?;

        if !status.is_success() {
            return Err(HeraldError::bad_response(
                status.as_u16(),
                String::from_utf8_lossy(&bytes),
            ));
        }
        Ok(bytes.to_vec())
    }

    fn classify(&self, operation: &str, err: reqwest::Error) -> HeraldError {
        if err.is_timeout() {
            HeraldError::timeout(operation, self.timeout.as_millis() as u64)
        } else if err.is_decode() {
            HeraldError::decode(format!("{}: {}", operation, err))
        } else {
            HeraldError::unreachable(format!("{}: {}", operation, err))
        }
    }
}

#[async_trait]
impl BackendGateway for HttpBackendGateway {
    async fn fetch_status(&self) -> Result<SessionStatus> {
        self.get_json(STATUS_PATH).await
    }

    async fn fetch_scan_artifact(&self) -> Result<ScanPayload> {
        self.get_json(SCAN_PATH).await
    }

    async fn fetch_config(&self) -> Result<PersistedConfig> {
        self.get_json(CONFIG_PATH).await
    }

    async fn fetch_groups(&self) -> Result<Vec<TargetGroup>> {
        self.get_json(GROUPS_PATH).await
    }

    async fn save_config(&self, update: &ConfigUpdate, image: Option<&Attachment>) -> Result<()> {
        let operation = format!("POST {}", CONFIG_PATH);
        let data = update.to_data_field()?;
        let request = self.request(reqwest::Method::POST, CONFIG_PATH);

        let request = match image {
            Some(attachment) => {
                let part = Part::bytes(attachment.bytes.clone())
                    .file_name(attachment.file_name.clone())
                    .mime_str(&attachment.mime_type)
                    .map_err(|e| {
                        HeraldError::attachment(format!(
                            "invalid MIME type '{}': {}",
                            attachment.mime_type, e
                        ))
                    })?;
                request.multipart(Form::new().text("data", data).part("image", part))
            }
            None => request.form(&[("data", data)]),
        };

        let response = self.send(&operation, request).await?;
        self.read_success_body(&operation, response).await?;
        Ok(())
    }

    async fn trigger_broadcast(&self) -> Result<()> {
        let operation = format!("POST {}", BROADCAST_PATH);
        let response = self
            .send(&operation, self.request(reqwest::Method::POST, BROADCAST_PATH))
            .await?;
        self.read_success_body(&operation, response).await?;
        Ok(())
    }
}

/// Trims the URL and strips trailing slashes; empty is a configuration error.
pub fn normalize_base_url(base_url: &str) -> Result<String> {
    let trimmed = base_url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(HeraldError::config("backend URL is empty"));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_builder_normalizes_paths() {
        let gateway =
            HttpBackendGateway::new("http://backend:3000/", Duration::from_secs(2)).unwrap();
        assert_eq!(gateway.base_url(), "http://backend:3000");
        assert_eq!(gateway.endpoint("/status"), "http://backend:3000/status");
        assert_eq!(gateway.endpoint("groups"), "http://backend:3000/groups");
    }

    #[test]
    fn test_blank_base_url_is_rejected() {
        let err = HttpBackendGateway::new("  / ", Duration::from_secs(2)).unwrap_err();
        assert!(matches!(err, HeraldError::Config(_)));
    }
}
