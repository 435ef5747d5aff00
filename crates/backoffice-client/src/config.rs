// Client configuration loaded from environment variables.
// Decision: BACKOFFICE_ prefix for all client settings
// Decision: Default to the real HTTP transport; the fake backend is opt-in

use std::env;
use std::fmt;
use std::str::FromStr;

use crate::error::ClientError;

pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Which transport carries API requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransportMode {
    /// Real backend over HTTP
    #[default]
    Http,
    /// In-memory fake backend seeded with demo data
    Fake,
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportMode::Http => write!(f, "http"),
            TransportMode::Fake => write!(f, "fake"),
        }
    }
}

impl FromStr for TransportMode {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "http" | "real" => Ok(TransportMode::Http),
            "fake" | "mock" => Ok(TransportMode::Fake),
            other => Err(ClientError::config(format!(
                "unknown transport mode: {other} (expected http or fake)"
            ))),
        }
    }
}

/// Complete client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_url: String,
    pub api_token: Option<String>,
    pub transport: TransportMode,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_token: None,
            transport: TransportMode::default(),
        }
    }
}

impl ClientConfig {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Default::default()
        }
    }

    /// Read `BACKOFFICE_API_URL`, `BACKOFFICE_API_TOKEN` and `BACKOFFICE_TRANSPORT`
    pub fn from_env() -> Self {
        let api_url = env::var("BACKOFFICE_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let api_token = env::var("BACKOFFICE_API_TOKEN")
            .ok()
            .filter(|t| !t.is_empty());
        let transport = match env::var("BACKOFFICE_TRANSPORT") {
            Ok(value) => value.parse().unwrap_or_else(|e| {
                tracing::warn!(error = %e, "falling back to http transport");
                TransportMode::Http
            }),
            Err(_) => TransportMode::Http,
        };

        Self {
            api_url,
            api_token,
            transport,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    pub fn with_transport(mut self, transport: TransportMode) -> Self {
        self.transport = transport;
        self
    }

    /// Check the settings the selected transport depends on
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.transport == TransportMode::Http
            && !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://"))
        {
            return Err(ClientError::config(format!(
                "api url must start with http:// or https://, got {:?}",
                self.api_url
            )));
        }
        Ok(())
    }
}
