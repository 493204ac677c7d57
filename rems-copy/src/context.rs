//! Per-run migration context: both gateways, the run configuration and mode

use crate::error::{MigrationError, MigrationResult};
use crate::identity::IdTranslator;
use crate::report::RunMode;
use rems_common::api::{Gateway, Method};
use rems_common::entities::{Entity, Kind, OrganizationRef, WriteResponse};
use rems_common::MigrationConfig;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Which instance a call targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Source,
    Destination,
}

/// Everything a pipeline needs, passed explicitly
pub struct MigrationContext<'a> {
    source: &'a dyn Gateway,
    destination: &'a dyn Gateway,
    config: &'a MigrationConfig,
    mode: RunMode,
}

impl<'a> MigrationContext<'a> {
    pub fn new(
        source: &'a dyn Gateway,
        destination: &'a dyn Gateway,
        config: &'a MigrationConfig,
        mode: RunMode,
    ) -> Self {
        Self {
            source,
            destination,
            config,
            mode,
        }
    }

    pub fn mode(&self) -> RunMode {
        self.mode
    }

    /// Language used for natural key comparison
    pub fn language(&self) -> &str {
        &self.config.language
    }

    /// Ownership assigned to everything created at the destination
    pub fn organization(&self) -> OrganizationRef {
        OrganizationRef::new(self.config.destination.organization_id.as_str())
    }

    pub fn gateway(&self, side: Side) -> &'a dyn Gateway {
        match side {
            Side::Source => self.source,
            Side::Destination => self.destination,
        }
    }

    /// Environment name of one side
    pub fn environment(&self, side: Side) -> &str {
        self.gateway(side).environment()
    }

    /// Fetch every active entity of one kind
    pub async fn fetch_list<E: Entity>(&self, side: Side) -> MigrationResult<Vec<E>> {
        let kind = E::KIND;
        let gateway = self.gateway(side);
        tracing::info!("downloading {} from {}", kind, gateway.environment());

        let operation = format!("get {}", kind);
        let body = gateway
            .get(kind.list_path(), kind.list_query())
            .await
            .map_err(|source| MigrationError::Transport {
                operation: operation.clone(),
                source,
            })?;

        let entities: Vec<E> = self.decode(side, &operation, body)?;
        tracing::debug!(
            kind = %kind,
            environment = %gateway.environment(),
            count = entities.len(),
            "Fetched entity list"
        );
        Ok(entities)
    }

    /// Fetch the full record of one entity
    pub async fn fetch_detail<E: Entity>(&self, side: Side, id: i64) -> MigrationResult<E> {
        let kind = E::KIND;
        let gateway = self.gateway(side);
        let operation = format!("get {} #{}", kind.singular(), id);

        let body = gateway
            .get(&kind.detail_path(id), &[])
            .await
            .map_err(|source| MigrationError::Transport {
                operation: operation.clone(),
                source,
            })?;

        self.decode(side, &operation, body)
    }

    /// Fetch both snapshots of a kind and build its translator
    pub async fn translator<E: Entity>(&self) -> MigrationResult<IdTranslator> {
        let sources: Vec<E> = self.fetch_list(Side::Source).await?;
        let destinations: Vec<E> = self.fetch_list(Side::Destination).await?;
        Ok(IdTranslator::build(&sources, &destinations, self.language()))
    }

    /// Verify the selected language is enabled at both instances
    pub async fn verify_language(&self) -> MigrationResult<()> {
        for side in [Side::Source, Side::Destination] {
            crate::locale::verify_language(self.gateway(side), self.language()).await?;
        }
        Ok(())
    }

    /// Create an entity at the destination
    pub async fn create<P: Serialize>(&self, kind: Kind, payload: &P) -> MigrationResult<WriteResponse> {
        let operation = format!("create {}", kind.singular());
        self.write(Method::Post, kind.create_path(), operation, payload)
            .await
    }

    /// Update an entity at the destination
    pub async fn update<P: Serialize>(
        &self,
        kind: Kind,
        path: &str,
        payload: &P,
    ) -> MigrationResult<WriteResponse> {
        let operation = format!("update {}", kind.singular());
        self.write(Method::Put, path, operation, payload).await
    }

    async fn write<P: Serialize>(
        &self,
        method: Method,
        path: &str,
        operation: String,
        payload: &P,
    ) -> MigrationResult<WriteResponse> {
        let destination = self.destination;
        let body = serde_json::to_value(payload).map_err(|source| MigrationError::Payload {
            operation: operation.clone(),
            environment: destination.environment().to_string(),
            source,
        })?;

        let result = match method {
            Method::Put => destination.put(path, &body).await,
            _ => destination.post(path, &body).await,
        };

        let response = result.map_err(|source| MigrationError::Transport {
            operation: operation.clone(),
            source,
        })?;
        WriteResponse::from_value(response).map_err(|source| MigrationError::Payload {
            operation,
            environment: destination.environment().to_string(),
            source,
        })
    }

    fn decode<T: DeserializeOwned>(&self, side: Side, operation: &str, body: Value) -> MigrationResult<T> {
        serde_json::from_value(body).map_err(|source| MigrationError::Payload {
            operation: operation.to_string(),
            environment: self.environment(side).to_string(),
            source,
        })
    }
}
