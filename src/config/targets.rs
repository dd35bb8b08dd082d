// src/config/targets.rs
use super::models::Config;
use crate::check::CheckRequest;
use anyhow::{bail, Result};
use std::str::FromStr;

/// A target given on the command line as `NAME=URL` or a bare `URL`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetSpec {
    pub name: Option<String>,
    pub url: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TargetParseError {
    #[error("target must not be empty")]
    Empty,

    #[error("target '{0}' has no URL after '='")]
    MissingUrl(String),
}

fn is_alias(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

impl FromStr for TargetSpec {
    type Err = TargetParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(TargetParseError::Empty);
        }

        // `=` may also appear inside a URL query, so only split when the
        // left side looks like an alias.
        match s.split_once('=') {
            Some((name, url)) if is_alias(name) => {
                if url.trim().is_empty() {
                    return Err(TargetParseError::MissingUrl(name.to_string()));
                }
                Ok(Self {
                    name: Some(name.to_string()),
                    url: url.trim().to_string(),
                })
            }
            _ => Ok(Self {
                name: None,
                url: s.to_string(),
            }),
        }
    }
}

/// Where the targets of one run come from.
#[derive(Debug, Clone, Default)]
pub struct TargetSelection {
    /// Single `--home` page; overrides every other source.
    pub home: Option<String>,
    pub targets: Vec<TargetSpec>,
    /// Environments to pick from the config file; empty means all.
    pub envs: Vec<String>,
    pub expected_status: Option<u16>,
}

impl TargetSelection {
    /// Resolve into check requests. CLI targets take precedence over the
    /// config file; URLs are passed through unvalidated so a malformed one
    /// fails its own check.
    pub fn resolve(&self, config: &Config) -> Result<Vec<CheckRequest>> {
        let default_status = self.expected_status.unwrap_or(config.check.expected_status);

        if let Some(home) = &self.home {
            return Ok(vec![CheckRequest::new(home.clone())
                .named("home")
                .with_expected_status(default_status)]);
        }

        if !self.targets.is_empty() {
            return Ok(self
                .targets
                .iter()
                .map(|spec| {
                    let request = CheckRequest::new(spec.url.clone())
                        .with_expected_status(default_status);
                    match &spec.name {
                        Some(name) => request.named(name.clone()),
                        None => request,
                    }
                })
                .collect());
        }

        if config.targets.is_empty() {
            bail!("No targets given: pass --home, --target or a config file with targets");
        }

        let names: Vec<&String> = if self.envs.is_empty() {
            config.targets.keys().collect()
        } else {
            self.envs.iter().collect()
        };

        let mut requests = Vec::with_capacity(names.len());
        for name in names {
            let Some(target) = config.targets.get(name) else {
                bail!("Unknown environment '{}'", name);
            };
            let status = self
                .expected_status
                .unwrap_or_else(|| target.expected_status_or(config.check.expected_status));

            requests.push(
                CheckRequest::new(target.url.as_str())
                    .named(name.clone())
                    .with_expected_status(status),
            );
        }

        Ok(requests)
    }
}
