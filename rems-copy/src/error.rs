//! Error types for rems-copy
//!
//! Everything here is fatal to the running pipeline. Entity-local problems
//! (unresolved dependencies, rejected creates) are recorded as failed
//! outcomes instead, see [`crate::report::FailureReason`].

use rems_common::api::TransportError;
use thiserror::Error;

/// Fatal migration error
#[derive(Debug, Error)]
pub enum MigrationError {
    /// Gateway call failed (network, non-2xx status, unreadable body)
    #[error("{operation} failed: {source}")]
    Transport {
        operation: String,
        #[source]
        source: TransportError,
    },

    /// Response decoded as JSON but not into the expected schema
    #[error("{operation} at {environment} returned an unexpected payload: {source}")]
    Payload {
        operation: String,
        environment: String,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration or locale error
    #[error(transparent)]
    Common(#[from] rems_common::Error),
}

/// Result type for migration operations
pub type MigrationResult<T> = Result<T, MigrationError>;
