//! Language check against `GET /api/config`

use crate::error::{MigrationError, MigrationResult};
use rems_common::api::Gateway;
use rems_common::entities::InstanceConfig;
use rems_common::Error;

const CONFIG_PATH: &str = "/api/config";

/// Languages enabled at an instance
pub async fn get_languages(gateway: &dyn Gateway) -> MigrationResult<Vec<String>> {
    let operation = "get languages".to_string();
    let body = gateway
        .get(CONFIG_PATH, &[])
        .await
        .map_err(|source| MigrationError::Transport {
            operation: operation.clone(),
            source,
        })?;

    let config: InstanceConfig =
        serde_json::from_value(body).map_err(|source| MigrationError::Payload {
            operation,
            environment: gateway.environment().to_string(),
            source,
        })?;

    Ok(config.languages)
}

/// Fail unless `language` is enabled at the instance
pub async fn verify_language(gateway: &dyn Gateway, language: &str) -> MigrationResult<()> {
    let available = get_languages(gateway).await?;

    if available.iter().any(|l| l == language) {
        tracing::debug!(
            environment = %gateway.environment(),
            language = %language,
            "Language supported"
        );
        Ok(())
    } else {
        Err(Error::UnsupportedLocale {
            language: language.to_string(),
            environment: gateway.environment().to_string(),
            available,
        }
        .into())
    }
}
