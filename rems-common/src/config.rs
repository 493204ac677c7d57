//! Configuration loading and environment resolution
//!
//! The configuration file maps environment names to instance credentials and
//! optionally selects the comparison language:
//!
//! ```json
//! {
//!   "language": "en",
//!   "test": {
//!     "url": "https://rems-test.example.org",
//!     "key": "api-key",
//!     "username": "owner",
//!     "organisation": "example-org"
//!   }
//! }
//! ```
//!
//! Files ending in `.toml` are read as TOML with the same layout, everything
//! else is read as JSON.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

/// Language used when neither the command line nor the file selects one
pub const DEFAULT_LANGUAGE: &str = "en";

/// One instance entry as written in the configuration file
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EnvironmentConfig {
    /// Base URL of the instance
    pub url: String,
    /// API key sent as `x-rems-api-key`
    #[serde(alias = "api_key")]
    pub key: String,
    /// Acting user sent as `x-rems-user-id`
    #[serde(alias = "user")]
    pub username: String,
    /// Organization that owns everything created at this instance
    #[serde(alias = "organization")]
    pub organisation: String,
}

/// Parsed configuration file
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ConfigFile {
    /// Language code used for natural key comparison
    #[serde(default)]
    pub language: Option<String>,
    /// Every other top-level table is an environment
    #[serde(flatten)]
    pub environments: BTreeMap<String, EnvironmentConfig>,
}

impl ConfigFile {
    /// Load a configuration file, choosing the format by extension
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let is_toml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("toml"))
            .unwrap_or(false);

        let config: ConfigFile = if is_toml {
            toml::from_str(&content)?
        } else {
            serde_json::from_str(&content)?
        };

        info!(
            path = %path.display(),
            environments = config.environments.len(),
            "Loaded configuration"
        );

        Ok(config)
    }

    /// Resolve a named environment into a validated `Environment`
    pub fn environment(&self, name: &str) -> Result<Environment> {
        let entry = self
            .environments
            .get(name)
            .ok_or_else(|| Error::UnknownEnvironment(name.to_string()))?;

        Environment::from_entry(name, entry)
    }
}

/// A resolved instance: where it lives and who acts there
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    /// Environment name as given on the command line
    pub name: String,
    /// Base URL without trailing slash
    pub url: String,
    pub api_key: String,
    pub acting_user: String,
    pub organization_id: String,
}

impl Environment {
    fn from_entry(name: &str, entry: &EnvironmentConfig) -> Result<Self> {
        let required = [
            ("url", &entry.url),
            ("key", &entry.key),
            ("username", &entry.username),
            ("organisation", &entry.organisation),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(Error::Config(format!(
                    "Environment '{}' has an empty '{}'",
                    name, field
                )));
            }
        }

        Ok(Self {
            name: name.to_string(),
            url: entry.url.trim_end_matches('/').to_string(),
            api_key: entry.key.clone(),
            acting_user: entry.username.clone(),
            organization_id: entry.organisation.clone(),
        })
    }

    /// Join an API path onto the base URL
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.url, path.trim_start_matches('/'))
    }
}

/// Everything one migration run needs, passed explicitly to every component
#[derive(Debug, Clone)]
pub struct MigrationConfig {
    pub source: Environment,
    pub destination: Environment,
    /// Language code used to compare localized titles
    pub language: String,
}

impl MigrationConfig {
    /// Build the run configuration
    ///
    /// Language priority: command-line override, then the file's `language`,
    /// then [`DEFAULT_LANGUAGE`].
    pub fn resolve(
        file: &ConfigFile,
        source: &str,
        destination: &str,
        language_override: Option<&str>,
    ) -> Result<Self> {
        let language = language_override
            .map(str::to_string)
            .or_else(|| file.language.clone())
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());

        if language.trim().is_empty() {
            return Err(Error::Config("Language code must not be empty".to_string()));
        }

        let config = Self {
            source: file.environment(source)?,
            destination: file.environment(destination)?,
            language,
        };

        debug!(
            source = %config.source.name,
            destination = %config.destination.name,
            language = %config.language,
            "Resolved migration configuration"
        );

        Ok(config)
    }
}
