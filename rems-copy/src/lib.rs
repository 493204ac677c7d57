//! rems-copy library interface
//!
//! Copies REMS configuration entities from a source instance to a
//! destination instance. Entities are matched across instances by natural
//! key, references are translated into the destination's ID space, and
//! kinds run in dependency order:
//!
//! licenses → forms → resources → workflows → catalogue items → categories

pub mod context;
pub mod error;
pub mod identity;
pub mod locale;
pub mod pipeline;
pub mod reconcile;
pub mod report;
pub mod resolver;

pub use crate::context::{MigrationContext, Side};
pub use crate::error::{MigrationError, MigrationResult};
pub use crate::report::{FailedEntity, FailureReason, MigrationOutcome, RunMode};

use rems_common::entities::Kind;

/// Migrate one kind; categories yield one outcome per reconciliation stage
pub async fn migrate(ctx: &MigrationContext<'_>, kind: Kind) -> MigrationResult<Vec<MigrationOutcome>> {
    let outcome = match kind {
        Kind::License => pipeline::run(ctx, &pipeline::Licenses).await?,
        Kind::Form => pipeline::run(ctx, &pipeline::Forms).await?,
        Kind::Resource => pipeline::run(ctx, &pipeline::Resources).await?,
        Kind::Workflow => pipeline::run(ctx, &pipeline::Workflows).await?,
        Kind::CatalogueItem => pipeline::run(ctx, &pipeline::CatalogueItems).await?,
        Kind::Category => {
            return Ok(reconcile::reconcile_categories(ctx).await?.into_outcomes());
        }
    };
    Ok(vec![outcome])
}

/// Migrate several kinds, always in dependency order
pub async fn migrate_all(
    ctx: &MigrationContext<'_>,
    kinds: &[Kind],
) -> MigrationResult<Vec<MigrationOutcome>> {
    let mut ordered = kinds.to_vec();
    ordered.sort();
    ordered.dedup();

    let mut outcomes = Vec::new();
    for kind in ordered {
        outcomes.extend(migrate(ctx, kind).await?);
    }
    Ok(outcomes)
}
