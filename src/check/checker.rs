// src/check/checker.rs
use super::error::CheckError;
use super::navigator::{HttpNavigator, NavigationError, Navigator};
use super::request::{parse_target, CheckRequest};
use super::result::CheckResult;
use crate::config::CheckSettings;
use chrono::Utc;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

/// Single-shot page reachability check.
///
/// Each call to [`check`](Self::check) issues at most one navigation and
/// always returns a [`CheckResult`]; no failure escapes as an error or panic.
/// The checker holds no mutable state, so one instance can serve any number
/// of concurrent checks.
#[derive(Clone)]
pub struct ReachabilityChecker {
    navigator: Arc<dyn Navigator>,
    timeout: Duration,
}

impl ReachabilityChecker {
    pub fn new(settings: &CheckSettings) -> reqwest::Result<Self> {
        let navigator = HttpNavigator::new(settings)?;
        Ok(Self::with_navigator(Arc::new(navigator), settings.timeout()))
    }

    pub fn with_navigator(navigator: Arc<dyn Navigator>, timeout: Duration) -> Self {
        Self { navigator, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn check(&self, request: &CheckRequest) -> CheckResult {
        let check_id = Uuid::new_v4();
        let span = info_span!(
            "check",
            %check_id,
            target = %request.target_url(),
            navigator = self.navigator.name(),
        );

        async move {
            let checked_at = Utc::now();
            let start = Instant::now();

            let (observed_status, error) = match parse_target(request.target_url()) {
                Ok(url) => self.navigate(&url, request.expected_status()).await,
                Err(e) => (None, Some(e)),
            };

            let elapsed_ms = start.elapsed().as_millis() as u64;
            let result = CheckResult::completed(
                check_id,
                request,
                observed_status,
                error,
                elapsed_ms,
                checked_at,
            );

            match &result.error {
                None => info!(
                    status = ?result.observed_status,
                    elapsed_ms,
                    "Page reachable"
                ),
                Some(e) => warn!(
                    kind = %e.kind(),
                    status = ?result.observed_status,
                    elapsed_ms,
                    "Reachability check failed: {}",
                    e
                ),
            }

            result
        }
        .instrument(span)
        .await
    }

    async fn navigate(&self, url: &url::Url, expected: u16) -> (Option<u16>, Option<CheckError>) {
        debug!("Navigating to {}", url);

        match timeout(self.timeout, self.navigator.navigate(url)).await {
            Ok(Ok(observed)) if observed == expected => (Some(observed), None),
            Ok(Ok(observed)) => (
                Some(observed),
                Some(CheckError::StatusMismatch { expected, observed }),
            ),
            Ok(Err(NavigationError::Transport { kind, message })) => {
                (None, Some(CheckError::Transport { kind, message }))
            }
            Ok(Err(NavigationError::TimedOut(limit))) => (None, Some(CheckError::Timeout(limit))),
            Err(_) => (None, Some(CheckError::Timeout(self.timeout))),
        }
    }
}
