//! Generic migration pipeline, instantiated once per entity kind
//!
//! State progression:
//! FETCH_SOURCE → FETCH_DESTINATION → FETCH_AUX_DEPENDENCIES →
//! PER_ENTITY_MATCH_AND_CREATE → REPORT
//!
//! Per entity: compute the natural key, skip it when the destination already
//! has it, resolve its references, and create it from a projected payload.
//! An entity with unresolved references is recorded as failed and the loop
//! continues. A second source entity with an already created key is failed
//! as a duplicate. Transport errors end the run.

pub mod catalogue;
pub mod categories;
pub mod forms;
pub mod licenses;
pub mod resources;
pub mod workflows;

pub use catalogue::CatalogueItems;
pub use categories::Categories;
pub use forms::Forms;
pub use licenses::Licenses;
pub use resources::Resources;
pub use workflows::Workflows;

use crate::context::{MigrationContext, Side};
use crate::error::MigrationResult;
use crate::identity;
use crate::report::{FailureReason, MigrationOutcome};
use crate::resolver::UnresolvedDependency;
use async_trait::async_trait;
use rems_common::entities::Entity;
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Kind-specific steps plugged into [`run`]
#[async_trait]
pub trait MigrationKind: Send + Sync {
    type Entity: Entity;
    /// Translators for the kinds this kind references
    type Links: Send + Sync;
    /// Destination IDs of one entity's references
    type Resolved: Send;
    type Payload: Serialize + Send + Sync;

    /// Fetch auxiliary lists and build the translators needed by `resolve`
    async fn load_links(&self, ctx: &MigrationContext<'_>) -> MigrationResult<Self::Links>;

    /// Variants that cannot be copied are reported as unsupported
    fn is_supported(&self, _entity: &Self::Entity) -> bool {
        true
    }

    /// Translate every reference of `entity` into the destination ID space
    fn resolve(
        &self,
        entity: &Self::Entity,
        links: &Self::Links,
    ) -> Result<Self::Resolved, Vec<UnresolvedDependency>>;

    /// Project the create payload, owned by the destination organization
    async fn build_payload(
        &self,
        ctx: &MigrationContext<'_>,
        entity: &Self::Entity,
        resolved: Self::Resolved,
    ) -> MigrationResult<Self::Payload>;
}

/// Label for an entity that has no natural key to show
pub(crate) fn fallback_key<E: Entity>(entity: &E) -> String {
    format!("{} #{}", E::KIND.singular(), entity.id())
}

/// Run one pipeline to completion
pub async fn run<K: MigrationKind>(
    ctx: &MigrationContext<'_>,
    kind: &K,
) -> MigrationResult<MigrationOutcome> {
    run_titled(ctx, kind, K::Entity::KIND.label()).await
}

pub(crate) async fn run_titled<K: MigrationKind>(
    ctx: &MigrationContext<'_>,
    kind: &K,
    title: &str,
) -> MigrationResult<MigrationOutcome> {
    let entity_kind = K::Entity::KIND;
    let language = ctx.language();
    info!("{}", title);

    let sources: Vec<K::Entity> = ctx.fetch_list(Side::Source).await?;
    let destinations: Vec<K::Entity> = ctx.fetch_list(Side::Destination).await?;
    let links = kind.load_links(ctx).await?;

    let mut outcome = MigrationOutcome::new(title, ctx.mode());

    let (supported, unsupported): (Vec<_>, Vec<_>) =
        sources.iter().partition(|entity| kind.is_supported(entity));
    for entity in unsupported {
        let key = entity
            .natural_key(language)
            .map(str::to_string)
            .unwrap_or_else(|| fallback_key(entity));
        warn!(kind = %entity_kind, key = %key, "Skipping unsupported variant");
        outcome.unsupported.push(key);
    }

    // Keys created (or queued) by this run, invisible in the destination snapshot
    let mut claimed: HashSet<String> = HashSet::new();

    let total = supported.len();
    for (i, entity) in supported.into_iter().enumerate() {
        debug!("copying {} {}/{}", entity_kind, i + 1, total);

        let Some(key) = entity.natural_key(language) else {
            outcome.fail(
                fallback_key(entity),
                FailureReason::MissingTitle {
                    language: language.to_string(),
                },
            );
            continue;
        };
        let key = key.to_string();

        if identity::exists(entity, &destinations, language) {
            outcome.skipped.push(key);
            continue;
        }

        if claimed.contains(&key) {
            outcome.fail(key, FailureReason::DuplicateKey);
            continue;
        }

        let resolved = match kind.resolve(entity, &links) {
            Ok(resolved) => resolved,
            Err(unresolved) => {
                outcome.fail(key, FailureReason::Unresolved(unresolved));
                continue;
            }
        };

        if ctx.mode().is_check() {
            claimed.insert(key.clone());
            outcome.created.push(key);
            continue;
        }

        let payload = kind.build_payload(ctx, entity, resolved).await?;
        let response = ctx.create(entity_kind, &payload).await?;

        if response.success {
            debug!(kind = %entity_kind, key = %key, id = ?response.id, "Created");
            claimed.insert(key.clone());
            outcome.created.push(key);
        } else {
            outcome.fail(key, FailureReason::Rejected(response.error_summary()));
        }
    }

    info!(
        "{}: skipped {}, {} {}, failed {} at {}",
        title,
        outcome.skipped.len(),
        if ctx.mode().is_check() { "would create" } else { "created" },
        outcome.created.len(),
        outcome.failed.len(),
        ctx.environment(Side::Destination)
    );

    Ok(outcome)
}
