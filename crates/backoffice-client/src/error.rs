// Error types for API calls

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors surfaced by services. Nothing is retried or swallowed.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure (connection refused, TLS, ...)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status. Displays exactly the server or fallback message.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Success status but the body did not match the expected shape
    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Id that cannot be used as a path segment; nothing was sent
    #[error("Invalid {kind} ID: {id:?}")]
    InvalidId { kind: &'static str, id: String },

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        ClientError::Api {
            status,
            message: message.into(),
        }
    }

    pub fn invalid_id(kind: &'static str, id: impl Into<String>) -> Self {
        ClientError::InvalidId {
            kind,
            id: id.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        ClientError::Config(msg.into())
    }

    /// HTTP status for API errors
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }
}
