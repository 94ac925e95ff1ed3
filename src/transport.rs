//! Delivery of a validated payload to the collection endpoint.
//! `Transport` is the seam the submission controller talks to; `HttpTransport` is the
//! production implementation posting multipart form data with reqwest.

use std::future::Future;

use reqwest::header::{HeaderValue, ACCEPT};
use reqwest::multipart::{Form, Part};
use reqwest::Url;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::FormConfig;
use crate::error::{AppError, AppResult};
use crate::payload::{MultipartPayload, PartBody};

#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    /// Best-effort JSON body, only read for failed requests and only used for logging.
    pub body: Option<serde_json::Value>,
}

impl TransportResponse {
    pub fn new(status: u16) -> Self { Self { status, body: None } }
    pub fn is_success(&self) -> bool { (200..300).contains(&self.status) }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
    #[error("could not build request: {0}")]
    Build(String),
}

impl From<TransportError> for AppError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Timeout => AppError::timeout("request timed out"),
            TransportError::Network(msg) => AppError::transport("network", msg.as_str()),
            TransportError::Build(msg) => AppError::internal("request_build", msg.as_str()),
        }
    }
}

pub trait Transport: Send + Sync + 'static {
    fn send(&self, payload: MultipartPayload) -> impl Future<Output = Result<TransportResponse, TransportError>> + Send;
}

#[derive(Clone)]
pub struct HttpTransport {
    endpoint: Url,
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(endpoint: Url) -> Self { Self::with_client(endpoint, reqwest::Client::new()) }

    pub fn with_client(endpoint: Url, client: reqwest::Client) -> Self { Self { endpoint, client } }

    pub fn from_config(cfg: &FormConfig) -> AppResult<Self> { Ok(Self::new(cfg.endpoint_url()?)) }

    pub fn endpoint(&self) -> &Url { &self.endpoint }
}

// Trimmed, lowercased content type if it parses as a MIME type. Anything else is sent untyped.
fn usable_mime(field: &str, content_type: &str) -> Option<String> {
    let normalized = content_type.trim().to_ascii_lowercase();
    if normalized.is_empty() {
        return None;
    }
    match Part::bytes(Vec::<u8>::new()).mime_str(&normalized) {
        Ok(_) => Some(normalized),
        Err(e) => {
            warn!(target: "regform::submit", field, error = %e, "unparseable content type; sending part without one");
            None
        }
    }
}

fn build_form(payload: MultipartPayload) -> Result<Form, TransportError> {
    let mut form = Form::new();
    for part in payload.into_parts() {
        form = match part.body {
            PartBody::Text(text) => form.text(part.name, text),
            PartBody::File { file_name, content_type, bytes } => {
                let mut file_part = Part::bytes(bytes).file_name(file_name);
                if let Some(mime) = usable_mime(part.name, &content_type) {
                    file_part = file_part
                        .mime_str(&mime)
                        .map_err(|e| TransportError::Build(format!("{}: {}", part.name, e)))?;
                }
                form.part(part.name, file_part)
            }
        };
    }
    Ok(form)
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() { TransportError::Timeout } else { TransportError::Network(err.to_string()) }
}

impl Transport for HttpTransport {
    async fn send(&self, payload: MultipartPayload) -> Result<TransportResponse, TransportError> {
        let part_count = payload.len();
        let form = build_form(payload)?;
        debug!(target: "regform::submit", endpoint = %self.endpoint, parts = part_count, "posting multipart form");
        let resp = self
            .client
            .post(self.endpoint.clone())
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let status = resp.status();
        if status.is_success() {
            return Ok(TransportResponse::new(status.as_u16()));
        }
        let body: Option<serde_json::Value> = resp.json().await.ok();
        warn!(target: "regform::submit", status = status.as_u16(), body = ?body, "collection endpoint rejected submission");
        Ok(TransportResponse { status: status.as_u16(), body })
    }
}
