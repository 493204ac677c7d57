//! Common error types for rems-copy

use thiserror::Error;

/// Common result type for rems-copy operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised before any migration work starts
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON configuration could not be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML configuration could not be parsed
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Environment name not present in the configuration file
    #[error("Unknown environment '{0}', not found in configuration")]
    UnknownEnvironment(String),

    /// Selected language is not enabled at one of the instances
    #[error("Language '{language}' is not supported at {environment}, available: {available:?}")]
    UnsupportedLocale {
        language: String,
        environment: String,
        available: Vec<String>,
    },
}
