// file: src/error.rs
// version: 1.0.0
// guid: 3f8a2c41-9b07-4d6e-8a15-c2d94e70b318

use thiserror::Error;

/// Result type alias for the application
pub type Result<T> = std::result::Result<T, ReimageError>;

/// Error types for the MAAS reimage tool
#[derive(Error, Debug)]
pub enum ReimageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Credential error: {0}")]
    Credential(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("MAAS server responded with error: {status} {message}")]
    Api { status: u16, message: String },

    #[error("Machine not found: {0}")]
    MachineNotFound(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl ReimageError {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new credential error
    pub fn credential(msg: impl Into<String>) -> Self {
        Self::Credential(msg.into())
    }

    /// Create a new file not found error
    pub fn file_not_found(msg: impl Into<String>) -> Self {
        Self::FileNotFound(msg.into())
    }

    /// Create a new network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create a new timeout error
    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::Timeout(msg.into())
    }

    /// Create a new API error from a status code and response body
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }
}
