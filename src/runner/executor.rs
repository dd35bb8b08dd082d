// src/runner/executor.rs
use super::summary::RunSummary;
use crate::check::{CheckRequest, CheckResult, ReachabilityChecker};
use std::sync::Arc;
use tracing::{error, info};

/// Runs independent checks side by side, one task per target.
pub struct Runner {
    checker: Arc<ReachabilityChecker>,
}

impl Runner {
    pub fn new(checker: ReachabilityChecker) -> Self {
        Self {
            checker: Arc::new(checker),
        }
    }

    /// Results come back in the order of `requests`.
    pub async fn run(&self, requests: Vec<CheckRequest>) -> RunSummary {
        info!("Running {} reachability check(s)", requests.len());

        let tasks: Vec<_> = requests
            .iter()
            .cloned()
            .map(|request| {
                let checker = self.checker.clone();
                tokio::spawn(async move { checker.check(&request).await })
            })
            .collect();

        let joined = futures::future::join_all(tasks).await;

        let results: Vec<CheckResult> = requests
            .iter()
            .zip(joined)
            .map(|(request, outcome)| match outcome {
                Ok(result) => result,
                Err(e) => {
                    error!("Check task for {} failed: {}", request.target_url(), e);
                    CheckResult::aborted(request, format!("check task failed: {}", e))
                }
            })
            .collect();

        let summary = RunSummary::new(results);
        info!(
            "Reachability run complete: {} passed, {} failed",
            summary.passed(),
            summary.failed()
        );
        summary
    }
}
