// src/config/models.rs
use crate::check::DEFAULT_EXPECTED_STATUS;
use anyhow::{bail, ensure, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub check: CheckSettings,

    /// Named environments, e.g. `home`, `staging`.
    #[serde(default)]
    pub targets: BTreeMap<String, TargetConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckSettings {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_expected_status")]
    pub expected_status: u16,

    /// Honour `HTTP_PROXY`/`HTTPS_PROXY` from the environment.
    #[serde(default = "default_use_system_proxy")]
    pub use_system_proxy: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TargetConfig {
    pub url: Url,

    /// Falls back to `check.expected_status` when absent.
    #[serde(default)]
    pub expected_status: Option<u16>,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_max_redirects() -> usize {
    10
}

fn default_user_agent() -> String {
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_expected_status() -> u16 {
    DEFAULT_EXPECTED_STATUS
}

fn default_use_system_proxy() -> bool {
    true
}

impl Default for CheckSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            max_redirects: default_max_redirects(),
            user_agent: default_user_agent(),
            expected_status: default_expected_status(),
            use_system_proxy: default_use_system_proxy(),
        }
    }
}

impl CheckSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

impl TargetConfig {
    pub fn expected_status_or(&self, default: u16) -> u16 {
        self.expected_status.unwrap_or(default)
    }
}

fn is_http_status(status: u16) -> bool {
    (100..=599).contains(&status)
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        let check = &self.check;

        ensure!(check.timeout_secs > 0, "check.timeout_secs must be greater than 0");
        ensure!(
            check.connect_timeout_secs > 0,
            "check.connect_timeout_secs must be greater than 0"
        );
        ensure!(
            check.connect_timeout_secs <= check.timeout_secs,
            "check.connect_timeout_secs ({}) must not exceed check.timeout_secs ({})",
            check.connect_timeout_secs,
            check.timeout_secs
        );
        ensure!(
            is_http_status(check.expected_status),
            "check.expected_status {} is not an HTTP status code",
            check.expected_status
        );

        for (name, target) in &self.targets {
            if name.trim().is_empty() {
                bail!("Target names must not be empty");
            }
            if !matches!(target.url.scheme(), "http" | "https") {
                bail!(
                    "Target '{}' has unsupported scheme '{}'",
                    name,
                    target.url.scheme()
                );
            }
            if let Some(status) = target.expected_status {
                ensure!(
                    is_http_status(status),
                    "Target '{}' expected_status {} is not an HTTP status code",
                    name,
                    status
                );
            }
        }

        Ok(())
    }
}
