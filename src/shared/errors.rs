//! Error handling for the application

use thiserror::Error;

/// Quote service errors. Every variant ends up as a `FetchOutcome::Failure`.
#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Request timed out after {0} ms")]
    Timeout(u64),

    #[error("Quote service returned status {status}")]
    Status { status: u16 },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Response has no ask field")]
    MissingAsk,

    #[error("Invalid ask value: {0}")]
    InvalidAsk(String),
}

impl QuoteError {
    /// True for malformed or unexpected responses, as opposed to transport
    /// failures and timeouts.
    pub fn is_protocol(&self) -> bool {
        matches!(
            self,
            QuoteError::Status { .. }
                | QuoteError::Decode(_)
                | QuoteError::MissingAsk
                | QuoteError::InvalidAsk(_)
        )
    }
}

impl From<reqwest::Error> for QuoteError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            QuoteError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            QuoteError::Status {
                status: status.as_u16(),
            }
        } else {
            QuoteError::Transport(err.to_string())
        }
    }
}

/// General application error
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("HTTP client error: {0}")]
    ClientError(String),
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::ConfigError(err.to_string())
    }
}
