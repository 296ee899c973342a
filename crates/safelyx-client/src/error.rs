// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for the Safelyx client
//!
//! A returned error means the check could not be performed at all. A service
//! that performed the check but reached no conclusion answers with a
//! [`Verdict::UNEVALUATED`](safelyx_types::Verdict::UNEVALUATED) result instead,
//! which is not an error.

use std::time::Duration;

use safelyx_types::{CheckKind, VerdictError};
use thiserror::Error;

/// Result type alias for client operations
pub type SafelyxResult<T> = Result<T, SafelyxError>;

/// Errors returned by [`SafelyxClient`](crate::SafelyxClient)
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum SafelyxError {
    /// The request payload could not be serialized
    #[error("failed to encode {kind} check request: {source}")]
    Encode {
        kind: CheckKind,
        #[source]
        source: serde_json::Error,
    },

    /// Connection, DNS or protocol failure
    #[error("{kind} check request failed: {source}")]
    Transport {
        kind: CheckKind,
        #[source]
        source: reqwest::Error,
    },

    /// The configured timeout elapsed before the response arrived
    #[error("{kind} check timed out after {timeout:?}")]
    Timeout {
        kind: CheckKind,
        timeout: Duration,
        #[source]
        source: reqwest::Error,
    },

    /// The response body is not JSON or does not have the expected shape
    #[error("failed to decode {kind} check response (HTTP {status}): {source}")]
    Decode {
        kind: CheckKind,
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    /// The response decoded but carries a verdict outside the defined value space
    #[error("{kind} check response violates the verdict contract: {source}")]
    ContractViolation {
        kind: CheckKind,
        #[source]
        source: VerdictError,
    },

    /// Invalid client configuration
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl SafelyxError {
    /// Create a configuration error
    pub fn config<T: ToString>(message: T) -> Self {
        Self::Configuration {
            message: message.to_string(),
        }
    }

    /// Check kind the failed request belonged to
    pub fn kind(&self) -> Option<CheckKind> {
        match self {
            Self::Encode { kind, .. }
            | Self::Transport { kind, .. }
            | Self::Timeout { kind, .. }
            | Self::Decode { kind, .. }
            | Self::ContractViolation { kind, .. } => Some(*kind),
            Self::Configuration { .. } => None,
        }
    }

    /// HTTP status of the response, when one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Decode { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the request timed out
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Whether the request never produced a response, timeouts included
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Timeout { .. })
    }

    /// Whether the response could not be decoded
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }

    /// Whether the service sent a verdict outside the defined value space
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, Self::ContractViolation { .. })
    }

    /// Whether the client configuration was rejected
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }
}

impl From<config::ConfigError> for SafelyxError {
    fn from(err: config::ConfigError) -> Self {
        Self::Configuration {
            message: err.to_string(),
        }
    }
}
