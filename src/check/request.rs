// src/check/request.rs
use super::error::CheckError;
use url::Url;

pub const DEFAULT_EXPECTED_STATUS: u16 = 200;

/// One page to probe and the status it must answer with.
///
/// The target is kept exactly as supplied; it is parsed when the check
/// runs so a malformed value turns into a failed result instead of an
/// error at construction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckRequest {
    name: Option<String>,
    target_url: String,
    expected_status: u16,
}

impl CheckRequest {
    pub fn new(target_url: impl Into<String>) -> Self {
        Self {
            name: None,
            target_url: target_url.into(),
            expected_status: DEFAULT_EXPECTED_STATUS,
        }
    }

    pub fn with_expected_status(mut self, expected_status: u16) -> Self {
        self.expected_status = expected_status;
        self
    }

    /// Attach the environment alias the target was resolved from.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn target_url(&self) -> &str {
        &self.target_url
    }

    pub fn expected_status(&self) -> u16 {
        self.expected_status
    }
}

/// Parse a target into a URL that can be navigated to with a GET.
pub fn parse_target(raw: &str) -> Result<Url, CheckError> {
    let invalid = |reason: String| CheckError::InvalidInput {
        url: raw.to_string(),
        reason,
    };

    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        other => return Err(invalid(format!("unsupported scheme `{}`", other))),
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(invalid("missing host".to_string()));
    }

    Ok(url)
}
