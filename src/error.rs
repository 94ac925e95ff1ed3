//! Unified error model for the form engine.
//! Field-level errors (missing value, pattern mismatch) are resolved client-side before any
//! network call; submission errors (transport, server rejection, timeout) end one attempt
//! but leave the form usable. Every class maps to exactly one user-visible message.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub const REQUIRED_MESSAGE: &str = "This field is required";
pub const SERVER_REJECTION_MESSAGE: &str = "Failed to submit. Please try again.";
pub const TRANSPORT_FAILURE_MESSAGE: &str = "An error occurred. Please try again later.";
pub const TIMEOUT_MESSAGE: &str = "The request timed out. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AppError {
    MissingField { code: String, message: String },
    PatternMismatch { code: String, message: String },
    TransportFailure { code: String, message: String },
    ServerRejection { code: String, message: String, status: u16 },
    Timeout { code: String, message: String },
    Config { code: String, message: String },
    Internal { code: String, message: String },
}

impl AppError {
    pub fn code_str(&self) -> &str {
        match self {
            AppError::MissingField { code, .. }
            | AppError::PatternMismatch { code, .. }
            | AppError::TransportFailure { code, .. }
            | AppError::ServerRejection { code, .. }
            | AppError::Timeout { code, .. }
            | AppError::Config { code, .. }
            | AppError::Internal { code, .. } => code.as_str(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            AppError::MissingField { message, .. }
            | AppError::PatternMismatch { message, .. }
            | AppError::TransportFailure { message, .. }
            | AppError::ServerRejection { message, .. }
            | AppError::Timeout { message, .. }
            | AppError::Config { message, .. }
            | AppError::Internal { message, .. } => message.as_str(),
        }
    }

    pub fn missing_field<S: Into<String>>(field_id: S) -> Self {
        AppError::MissingField { code: field_id.into(), message: REQUIRED_MESSAGE.into() }
    }
    pub fn pattern_mismatch<S: Into<String>>(field_id: S, msg: S) -> Self {
        AppError::PatternMismatch { code: field_id.into(), message: msg.into() }
    }
    pub fn transport<S: Into<String>>(code: S, msg: S) -> Self { AppError::TransportFailure { code: code.into(), message: msg.into() } }
    pub fn server_rejection(status: u16) -> Self {
        AppError::ServerRejection { code: "server_rejection".into(), message: format!("collection endpoint answered HTTP {}", status), status }
    }
    pub fn timeout<S: Into<String>>(msg: S) -> Self { AppError::Timeout { code: "timeout".into(), message: msg.into() } }
    pub fn config<S: Into<String>>(code: S, msg: S) -> Self { AppError::Config { code: code.into(), message: msg.into() } }
    pub fn internal<S: Into<String>>(code: S, msg: S) -> Self { AppError::Internal { code: code.into(), message: msg.into() } }

    /// True for errors detected before any network call.
    pub fn is_client_side(&self) -> bool {
        matches!(self, AppError::MissingField { .. } | AppError::PatternMismatch { .. })
    }

    /// The message shown to the user for this error class.
    pub fn user_message(&self) -> &str {
        match self {
            AppError::MissingField { .. } => REQUIRED_MESSAGE,
            AppError::PatternMismatch { message, .. } => message.as_str(),
            AppError::ServerRejection { .. } => SERVER_REJECTION_MESSAGE,
            AppError::Timeout { .. } => TIMEOUT_MESSAGE,
            AppError::TransportFailure { .. } | AppError::Config { .. } | AppError::Internal { .. } => TRANSPORT_FAILURE_MESSAGE,
        }
    }
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code_str(), self.message())
    }
}

impl std::error::Error for AppError {}

pub type AppResult<T> = Result<T, AppError>;

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal { code: "internal".into(), message: err.to_string() }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
