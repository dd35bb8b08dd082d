// src/check/result.rs
use super::error::{CheckError, TransportKind};
use super::request::CheckRequest;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// Outcome of exactly one navigation attempt.
#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    pub check_id: Uuid,
    pub name: Option<String>,
    pub target: String,
    pub expected_status: u16,
    pub observed_status: Option<u16>,
    pub passed: bool,
    pub error: Option<CheckError>,
    pub elapsed_ms: u64,
    pub checked_at: DateTime<Utc>,
}

impl CheckResult {
    /// `passed` is derived from `error`, so the two can never disagree.
    pub(crate) fn completed(
        check_id: Uuid,
        request: &CheckRequest,
        observed_status: Option<u16>,
        error: Option<CheckError>,
        elapsed_ms: u64,
        checked_at: DateTime<Utc>,
    ) -> Self {
        Self {
            check_id,
            name: request.name().map(str::to_string),
            target: request.target_url().to_string(),
            expected_status: request.expected_status(),
            observed_status,
            passed: error.is_none(),
            error,
            elapsed_ms,
            checked_at,
        }
    }

    /// A check whose task died before producing a result.
    pub(crate) fn aborted(request: &CheckRequest, reason: String) -> Self {
        Self::completed(
            Uuid::new_v4(),
            request,
            None,
            Some(CheckError::Transport {
                kind: TransportKind::Other,
                message: reason,
            }),
            0,
            Utc::now(),
        )
    }

    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.target)
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.error, self.observed_status) {
            (None, Some(status)) => write!(
                f,
                "PASS {} ({}) HTTP {} in {}ms",
                self.label(),
                self.target,
                status,
                self.elapsed_ms
            ),
            (None, None) => write!(f, "PASS {} ({})", self.label(), self.target),
            (Some(err), _) => write!(
                f,
                "FAIL {} ({}): {}",
                self.label(),
                self.target,
                err
            ),
        }
    }
}
