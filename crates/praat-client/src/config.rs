//! Client configuration.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::form::Route;

/// Address used when neither the config nor `PRAAT_SERVER_URL` names one.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/";

/// Praat client configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base address of the processing service. Routes are appended to it.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Whole-request timeout in milliseconds. `None` leaves the
    /// transport's default in place.
    #[serde(default)]
    pub timeout_ms: Option<u32>,

    /// Connection timeout in milliseconds.
    #[serde(default)]
    pub connect_timeout_ms: Option<u32>,

    /// User-Agent header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Log request and response summaries at info level.
    #[serde(default)]
    pub debug: bool,
}

fn default_base_url() -> String {
    // PRAAT_SERVER_URL overrides the compiled-in localhost address.
    match std::env::var("PRAAT_SERVER_URL") {
        Ok(url) if !url.trim().is_empty() => normalize_base_url(&url),
        _ => DEFAULT_BASE_URL.to_string(),
    }
}

fn default_user_agent() -> String {
    format!("praat-client/{}", env!("CARGO_PKG_VERSION"))
}

fn normalize_base_url(url: &str) -> String {
    format!("{}/", url.trim().trim_end_matches('/'))
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: None,
            connect_timeout_ms: None,
            user_agent: default_user_agent(),
            debug: false,
        }
    }
}

impl ClientConfig {
    /// Create a config pointing at the given service address.
    pub fn new(base_url: impl AsRef<str>) -> Self {
        Self {
            base_url: normalize_base_url(base_url.as_ref()),
            ..Default::default()
        }
    }

    /// Load a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut config: ClientConfig = serde_json::from_str(json)?;
        config.base_url = normalize_base_url(&config.base_url);
        Ok(config)
    }

    /// Set the service address.
    pub fn with_base_url(mut self, url: impl AsRef<str>) -> Self {
        self.base_url = normalize_base_url(url.as_ref());
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout_ms: u32) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    /// Set the connection timeout.
    pub fn with_connect_timeout(mut self, timeout_ms: u32) -> Self {
        self.connect_timeout_ms = Some(timeout_ms);
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Enable debug mode.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Full URL of a route on the configured service.
    pub fn route_url(&self, route: Route) -> String {
        format!("{}{}", self.base_url, route.path())
    }
}
