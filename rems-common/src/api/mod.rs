//! Transport layer for the REMS HTTP API
//!
//! The migration engine only talks to an instance through the [`Gateway`]
//! trait. [`HttpGateway`] is the production implementation; tests provide an
//! in-memory instance.

pub mod gateway;
pub mod http;

pub use gateway::{Gateway, Method, TransportError};
pub use http::HttpGateway;
