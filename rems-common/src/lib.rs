//! # REMS Common Library
//!
//! Shared code for the rems-copy tooling:
//! - Error types
//! - Configuration loading (environments, selected language)
//! - The `Gateway` transport seam and its HTTP implementation
//! - Typed wire schemas for every REMS entity kind

pub mod api;
pub mod config;
pub mod entities;
pub mod error;

pub use config::{ConfigFile, Environment, MigrationConfig};
pub use error::{Error, Result};
