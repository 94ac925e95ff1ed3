//! Form configuration supplied by the host. Nothing is read from the environment.

use std::time::Duration;

use anyhow::Context;
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

pub const DEFAULT_STATUS_VISIBLE_MS: u64 = 3_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormConfig {
    /// Collection endpoint receiving the multipart POST.
    pub endpoint: String,
    /// Optional limit on one submission; unset relies on the transport's own behavior.
    #[serde(default)]
    pub request_timeout_ms: Option<u64>,
    /// How long a submission status stays visible.
    #[serde(default = "FormConfig::default_status_visible_ms")]
    pub status_visible_ms: u64,
}

impl FormConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self { endpoint: endpoint.into(), request_timeout_ms: None, status_visible_ms: DEFAULT_STATUS_VISIBLE_MS }
    }

    fn default_status_visible_ms() -> u64 { DEFAULT_STATUS_VISIBLE_MS }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout_ms = Some(timeout.as_millis() as u64);
        self
    }

    pub fn from_json_str(text: &str) -> anyhow::Result<Self> {
        let cfg: FormConfig = serde_json::from_str(text).context("invalid form configuration JSON")?;
        cfg.endpoint_url().context("invalid form configuration")?;
        Ok(cfg)
    }

    pub fn endpoint_url(&self) -> AppResult<Url> {
        let url = Url::parse(&self.endpoint)
            .map_err(|e| AppError::config("invalid_endpoint", format!("{}: {}", self.endpoint, e).as_str()))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(AppError::config("invalid_endpoint", format!("unsupported scheme '{}'", other).as_str())),
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> { self.request_timeout_ms.map(Duration::from_millis) }

    pub fn status_visible_for(&self) -> Duration { Duration::from_millis(self.status_visible_ms) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_defaults() {
        let cfg = FormConfig::from_json_str(r#"{"endpoint":"https://collect.example.com/forms"}"#).unwrap();
        assert_eq!(cfg.status_visible_for(), Duration::from_secs(3));
        assert_eq!(cfg.request_timeout(), None);
    }

    #[test]
    fn json_with_timeout() {
        let cfg = FormConfig::from_json_str(r#"{"endpoint":"http://127.0.0.1:9000/c","request_timeout_ms":2500}"#).unwrap();
        assert_eq!(cfg.request_timeout(), Some(Duration::from_millis(2500)));
    }

    #[test]
    fn rejects_bad_endpoints() {
        assert!(FormConfig::from_json_str(r#"{"endpoint":"not a url"}"#).is_err());
        assert!(FormConfig::from_json_str(r#"{"endpoint":"ftp://example.com/x"}"#).is_err());
        assert!(FormConfig::from_json_str(r#"{"request_timeout_ms":10}"#).is_err());
        let err = FormConfig::new("mailto:someone").endpoint_url().unwrap_err();
        assert_eq!(err.code_str(), "invalid_endpoint");
    }
}
