//! Error types for the HRMS API client.
//!
//! # Design
//! Every failure a caller sees from `ApiClient::fetch_api` is a
//! `NormalizedError`, whatever the cause. `ErrorKind` lets callers branch on
//! validation vs. server vs. network failures without inspecting the status.
//! `TransportError` only lives between the transport and the wrapper; it is
//! collapsed into the network-error shape before reaching callers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Field name to human-readable message.
pub type FieldErrors = BTreeMap<String, String>;

/// Status attached to failures that never produced a response.
pub const NETWORK_ERROR_STATUS: u16 = 500;

pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please check your connection.";

/// Used when a non-success response carries no usable `message`.
pub const FALLBACK_ERROR_MESSAGE: &str = "An error occurred";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The server rejected the input and reported per-field messages.
    Validation,
    /// The server answered with a non-success status and no field messages.
    Server,
    /// No usable response: connection failure or unparseable body.
    Network,
}

/// The single error shape produced by the wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message} (status {status})")]
pub struct NormalizedError {
    pub kind: ErrorKind,
    pub status: u16,
    pub message: String,
    pub errors: FieldErrors,
}

impl NormalizedError {
    /// Error for a response that arrived with a non-success status.
    pub fn from_status(status: u16, message: String, errors: FieldErrors) -> Self {
        let kind = if errors.is_empty() {
            ErrorKind::Server
        } else {
            ErrorKind::Validation
        };
        Self {
            kind,
            status,
            message,
            errors,
        }
    }

    pub fn network() -> Self {
        Self {
            kind: ErrorKind::Network,
            status: NETWORK_ERROR_STATUS,
            message: NETWORK_ERROR_MESSAGE.to_string(),
            errors: FieldErrors::new(),
        }
    }

    pub fn is_validation(&self) -> bool {
        self.kind == ErrorKind::Validation
    }

    pub fn is_network(&self) -> bool {
        self.kind == ErrorKind::Network
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }
}

/// Failure raised by a `Transport` before any status was available.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request could not be built: {0}")]
    Request(String),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("response body could not be read: {0}")]
    Body(String),
}

/// Errors from loading `ClientConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid base_url {0:?}: must start with http:// or https://")]
    InvalidBaseUrl(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_error_has_fixed_shape() {
        let err = NormalizedError::network();
        assert_eq!(err.status, 500);
        assert_eq!(err.message, NETWORK_ERROR_MESSAGE);
        assert!(err.errors.is_empty());
        assert!(err.is_network());
    }

    #[test]
    fn kind_follows_field_errors() {
        let mut errors = FieldErrors::new();
        assert_eq!(
            NormalizedError::from_status(404, "gone".into(), errors.clone()).kind,
            ErrorKind::Server
        );
        errors.insert("email".into(), "taken".into());
        let err = NormalizedError::from_status(400, "Validation failed".into(), errors);
        assert!(err.is_validation());
        assert_eq!(err.field("email"), Some("taken"));
    }

    #[test]
    fn display_includes_status() {
        let err = NormalizedError::from_status(403, "nope".into(), FieldErrors::new());
        assert_eq!(err.to_string(), "nope (status 403)");
    }
}
