// src/check/error.rs
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt;
use std::time::Duration;

/// Coarse classification of a failed check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidInput,
    Transport,
    Timeout,
    StatusMismatch,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::Transport => "transport",
            ErrorKind::Timeout => "timeout",
            ErrorKind::StatusMismatch => "status_mismatch",
        };
        f.write_str(name)
    }
}

/// What went wrong below HTTP when a navigation did not produce a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportKind {
    Dns,
    ConnectionRefused,
    Connect,
    Redirect,
    Other,
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransportKind::Dns => "dns",
            TransportKind::ConnectionRefused => "connection refused",
            TransportKind::Connect => "connect",
            TransportKind::Redirect => "redirect",
            TransportKind::Other => "transport",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckError {
    #[error("invalid target url {url:?}: {reason}")]
    InvalidInput { url: String, reason: String },

    #[error("{kind} failure: {message}")]
    Transport { kind: TransportKind, message: String },

    #[error("no response within {0:?}")]
    Timeout(Duration),

    #[error("expected {expected}, got {observed}")]
    StatusMismatch { expected: u16, observed: u16 },
}

impl CheckError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CheckError::InvalidInput { .. } => ErrorKind::InvalidInput,
            CheckError::Transport { .. } => ErrorKind::Transport,
            CheckError::Timeout(_) => ErrorKind::Timeout,
            CheckError::StatusMismatch { .. } => ErrorKind::StatusMismatch,
        }
    }

    pub fn transport_kind(&self) -> Option<TransportKind> {
        match self {
            CheckError::Transport { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

// Rendered as `{ "kind": ..., "message": ... }` in serialized results.
impl Serialize for CheckError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("CheckError", 2)?;
        state.serialize_field("kind", &self.kind())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}
