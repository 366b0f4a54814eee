//! Error types for moodlens operations.

use thiserror::Error;

/// Result type for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Errors surfaced to whoever submitted an analysis.
///
/// `Display` yields exactly the message a view should show.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Input rejected before any network call.
    #[error("{0}")]
    Validation(String),

    /// Transport failure or non-success response from the service.
    #[error("{0}")]
    Request(String),

    /// The service answered, but the payload did not match the expected shape.
    #[error("Invalid response from analysis service: {0}")]
    InvalidResponse(String),
}

impl AnalysisError {
    pub fn validation(message: impl Into<String>) -> Self {
        AnalysisError::Validation(message.into())
    }

    pub fn request(message: impl Into<String>) -> Self {
        AnalysisError::Request(message.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, AnalysisError::Validation(_))
    }
}

impl From<serde_json::Error> for AnalysisError {
    fn from(e: serde_json::Error) -> Self {
        AnalysisError::InvalidResponse(e.to_string())
    }
}

/// Errors from a key/value persistence backend.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage write failed: {0}")]
    WriteError(String),

    #[error("Failed to encode stored value: {0}")]
    EncodeError(String),

    #[error("IO error: {0}")]
    IoError(String),
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::IoError(e.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::EncodeError(e.to_string())
    }
}

/// Errors producing a JSON export.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExportError {
    #[error("No history to export")]
    EmptyHistory,

    #[error("Failed to encode export: {0}")]
    EncodeError(String),
}

impl From<serde_json::Error> for ExportError {
    fn from(e: serde_json::Error) -> Self {
        ExportError::EncodeError(e.to_string())
    }
}

/// Errors in client configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    ParseError(String),

    #[error("Invalid api_url '{0}': expected an http(s) URL")]
    InvalidApiUrl(String),

    #[error("timeout_secs must be greater than zero")]
    InvalidTimeout,
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(e: serde_yaml::Error) -> Self {
        ConfigError::ParseError(e.to_string())
    }
}
