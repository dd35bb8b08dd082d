// src/check/navigator.rs
use super::error::TransportKind;
use crate::config::CheckSettings;
use async_trait::async_trait;
use reqwest::{redirect, Client};
use std::error::Error as StdError;
use std::time::Duration;
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum NavigationError {
    #[error("{kind} failure: {message}")]
    Transport { kind: TransportKind, message: String },

    /// Carries the limit that fired, which may be shorter than the check's.
    #[error("request timed out after {0:?}")]
    TimedOut(Duration),
}

/// Performs the single outbound GET behind a check.
#[async_trait]
pub trait Navigator: Send + Sync {
    /// Navigate to `url` and return the status of the final response.
    async fn navigate(&self, url: &Url) -> Result<u16, NavigationError>;

    fn name(&self) -> &'static str;
}

pub struct HttpNavigator {
    client: Client,
    connect_timeout: Duration,
}

impl HttpNavigator {
    pub fn new(settings: &CheckSettings) -> reqwest::Result<Self> {
        let mut builder = Client::builder()
            .user_agent(settings.user_agent.clone())
            .connect_timeout(settings.connect_timeout())
            .redirect(redirect::Policy::limited(settings.max_redirects));

        if !settings.use_system_proxy {
            builder = builder.no_proxy();
        }

        Ok(Self {
            client: builder.build()?,
            connect_timeout: settings.connect_timeout(),
        })
    }
}

#[async_trait]
impl Navigator for HttpNavigator {
    async fn navigate(&self, url: &Url) -> Result<u16, NavigationError> {
        // Only the head is awaited; the body is dropped unread.
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| self.classify(e))?;
        Ok(response.status().as_u16())
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

impl HttpNavigator {
    fn classify(&self, err: reqwest::Error) -> NavigationError {
        // No whole-request timeout is set on the client, so the only one
        // reqwest can report is the connect timeout.
        if err.is_timeout() {
            return NavigationError::TimedOut(self.connect_timeout);
        }

        let kind = if err.is_redirect() {
            TransportKind::Redirect
        } else if err.is_connect() {
            classify_connect(&err)
        } else {
            TransportKind::Other
        };

        NavigationError::Transport {
            kind,
            message: describe(&err),
        }
    }
}

/// Walk the source chain of a connect failure to tell DNS from refusal.
pub(crate) fn classify_connect(err: &(dyn StdError + 'static)) -> TransportKind {
    let mut current: Option<&(dyn StdError + 'static)> = Some(err);

    while let Some(e) = current {
        if let Some(io) = e.downcast_ref::<std::io::Error>() {
            if io.kind() == std::io::ErrorKind::ConnectionRefused {
                return TransportKind::ConnectionRefused;
            }
        }

        let text = e.to_string();
        if text.contains("dns error") || text.contains("failed to lookup address") {
            return TransportKind::Dns;
        }

        current = e.source();
    }

    TransportKind::Connect
}

/// Flatten an error and its sources into one line.
fn describe(err: &(dyn StdError + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();

    while let Some(e) = source {
        let text = e.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = e.source();
    }

    message
}
