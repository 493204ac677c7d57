//! Gateway trait and transport errors

use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// HTTP verb of a gateway call, kept for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
        };
        f.write_str(name)
    }
}

/// Failure of a single gateway call
///
/// Every variant is fatal to the pipeline run that issued the call.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection failure, timeout or other error before a response arrived
    #[error("{method} {path} at {environment} failed: {message}")]
    Network {
        environment: String,
        method: Method,
        path: String,
        message: String,
    },

    /// Response arrived with a non-2xx status
    #[error("{method} {path} at {environment} responded with {status}, {body}")]
    Status {
        environment: String,
        method: Method,
        path: String,
        status: u16,
        body: String,
    },

    /// Response body was not valid JSON
    #[error("{method} {path} at {environment} returned an unreadable body: {message}")]
    Decode {
        environment: String,
        method: Method,
        path: String,
        message: String,
    },
}

impl TransportError {
    /// HTTP status of the failed call, if a response was received
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Authenticated access to one REMS instance
///
/// Implementations attach the instance's API key and acting user to every
/// request and return the decoded JSON body.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Environment name, used in logs and error messages
    fn environment(&self) -> &str;

    /// GET `path` with the given query parameters
    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Value, TransportError>;

    /// POST a JSON body to `path`
    async fn post(&self, path: &str, body: &Value) -> Result<Value, TransportError>;

    /// PUT a JSON body to `path`
    async fn put(&self, path: &str, body: &Value) -> Result<Value, TransportError>;
}
