use thiserror::Error;

/// Application-wide error type
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Version error: {0}")]
    Version(#[from] semver::Error),

    #[error("Failed to persist update preferences: {0}")]
    Persist(String),

    #[error("Cannot {action} while {state}")]
    InvalidTransition { action: &'static str, state: &'static str },

    #[error("Unsupported encoding: {0}")]
    UnsupportedEncoding(String),

    #[error("Failed to open {url}: {reason}")]
    Launch { url: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience Result type using our Error
pub type Result<T> = std::result::Result<T, Error>;
