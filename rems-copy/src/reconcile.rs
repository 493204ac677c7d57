//! Category reconciliation
//!
//! Categories form a tree and catalogue items carry category tags. Neither
//! relation can be created before the referenced nodes exist, so categories
//! migrate in three strictly ordered stages:
//!
//! 1. create missing nodes without children
//! 2. link children, using a translator rebuilt from a fresh destination list
//! 3. retag catalogue items, again from fresh snapshots of both sides
//!
//! Each stage depends only on the source snapshot and the destination as it
//! is when the stage starts, so an interrupted run can simply be repeated.

use crate::context::{MigrationContext, Side};
use crate::error::MigrationResult;
use crate::identity::IdTranslator;
use crate::pipeline::{self, fallback_key, Categories};
use crate::report::{FailureReason, MigrationOutcome};
use crate::resolver::{resolve_all, resolve_required, UnresolvedDependency};
use rems_common::entities::{
    CatalogueItem, Category, CategoryRef, EditCatalogueItem, Entity, Kind, UpdateCategory,
    WriteResponse,
};
use tracing::{debug, info};

const STAGE_NODES: &str = "categories stage 1/3: create categories";
const STAGE_CHILDREN: &str = "categories stage 2/3: update category children";
const STAGE_TAGS: &str = "categories stage 3/3: update catalogue items";

/// Outcomes of the three stages
#[derive(Debug, Clone)]
pub struct CategoryReport {
    pub nodes: MigrationOutcome,
    pub children: MigrationOutcome,
    pub tags: MigrationOutcome,
}

impl CategoryReport {
    pub fn into_outcomes(self) -> Vec<MigrationOutcome> {
        vec![self.nodes, self.children, self.tags]
    }
}

/// Run all three stages in order
pub async fn reconcile_categories(ctx: &MigrationContext<'_>) -> MigrationResult<CategoryReport> {
    let nodes = create_nodes(ctx).await?;
    let children = link_children(ctx).await?;
    let tags = retag_catalogue_items(ctx).await?;

    Ok(CategoryReport {
        nodes,
        children,
        tags,
    })
}

/// Stage 1: create every missing category with its children stripped
pub async fn create_nodes(ctx: &MigrationContext<'_>) -> MigrationResult<MigrationOutcome> {
    pipeline::run_titled(ctx, &Categories, STAGE_NODES).await
}

/// Stage 2: replace each destination parent's children with the translated
/// children of its source counterpart
pub async fn link_children(ctx: &MigrationContext<'_>) -> MigrationResult<MigrationOutcome> {
    info!("{}", STAGE_CHILDREN);
    let language = ctx.language();

    let sources: Vec<Category> = ctx.fetch_list(Side::Source).await?;
    let destinations: Vec<Category> = ctx.fetch_list(Side::Destination).await?;
    let translator = IdTranslator::build(&sources, &destinations, language);

    let mut outcome = MigrationOutcome::new(STAGE_CHILDREN, ctx.mode());
    let total = sources.len();

    for (i, source) in sources.iter().enumerate() {
        debug!("updating category children {}/{}", i + 1, total);

        let Some(key) = source.natural_key(language).map(str::to_string) else {
            outcome.fail(
                fallback_key(source),
                FailureReason::MissingTitle {
                    language: language.to_string(),
                },
            );
            continue;
        };

        if source.children.is_empty() {
            outcome.skipped.push(key);
            continue;
        }

        let parent = resolve_required(source.id, &translator);
        let children = resolve_all(source.children.iter().map(|c| c.id), &translator);
        let (parent, children) = match (parent, children) {
            (Ok(parent), Ok(children)) => (parent, children),
            (parent, children) => {
                let mut missing: Vec<_> = parent.err().into_iter().collect();
                missing.extend(children.err().unwrap_or_default());
                outcome.fail(key, FailureReason::Unresolved(missing));
                continue;
            }
        };

        let Some(destination) = destinations.iter().find(|c| c.id == parent) else {
            outcome.fail(key, missing_at_destination(source));
            continue;
        };

        if ctx.mode().is_check() {
            outcome.updated.push(key);
            continue;
        }

        let children = children.into_iter().map(|id| CategoryRef { id }).collect();
        let payload = UpdateCategory::with_children(destination, children);
        let response = ctx
            .update(Kind::Category, UpdateCategory::PATH, &payload)
            .await?;
        record_update(&mut outcome, key, response);
    }

    info!(
        "skipped {} categories without children, updated {}",
        outcome.skipped.len(),
        outcome.updated.len()
    );
    Ok(outcome)
}

/// Stage 3: replace each destination catalogue item's category tags with the
/// translated tags of its source counterpart
///
/// Tags are read from the source item's detail record and the localizations
/// sent back are the destination item's own, also from its detail record.
pub async fn retag_catalogue_items(ctx: &MigrationContext<'_>) -> MigrationResult<MigrationOutcome> {
    info!("{}", STAGE_TAGS);
    let language = ctx.language();

    let categories = ctx.translator::<Category>().await?;
    let sources: Vec<CatalogueItem> = ctx.fetch_list(Side::Source).await?;
    let destinations: Vec<CatalogueItem> = ctx.fetch_list(Side::Destination).await?;
    let items = IdTranslator::build(&sources, &destinations, language);

    let mut outcome = MigrationOutcome::new(STAGE_TAGS, ctx.mode());
    let total = sources.len();

    for (i, listed) in sources.iter().enumerate() {
        debug!("updating catalogue items {}/{}", i + 1, total);

        let Some(key) = listed.natural_key(language).map(str::to_string) else {
            outcome.fail(
                fallback_key(listed),
                FailureReason::MissingTitle {
                    language: language.to_string(),
                },
            );
            continue;
        };

        let source: CatalogueItem = ctx.fetch_detail(Side::Source, listed.id).await?;
        if source.categories.is_empty() {
            outcome.skipped.push(key);
            continue;
        }

        let target = resolve_required(source.id, &items);
        let tags = resolve_all(source.categories.iter().map(|c| c.id), &categories);
        let (target, tags) = match (target, tags) {
            (Ok(target), Ok(tags)) => (target, tags),
            (target, tags) => {
                let mut missing: Vec<_> = target.err().into_iter().collect();
                missing.extend(tags.err().unwrap_or_default());
                outcome.fail(key, FailureReason::Unresolved(missing));
                continue;
            }
        };

        if ctx.mode().is_check() {
            outcome.updated.push(key);
            continue;
        }

        let destination: CatalogueItem = ctx.fetch_detail(Side::Destination, target).await?;
        let payload = EditCatalogueItem {
            id: destination.id,
            localizations: destination.localizations,
            categories: tags.into_iter().map(|id| CategoryRef { id }).collect(),
        };
        let response = ctx
            .update(Kind::CatalogueItem, EditCatalogueItem::PATH, &payload)
            .await?;
        record_update(&mut outcome, key, response);
    }

    info!(
        "skipped {} catalogue items without categories, updated {}",
        outcome.skipped.len(),
        outcome.updated.len()
    );
    Ok(outcome)
}

fn missing_at_destination<E: Entity>(entity: &E) -> FailureReason {
    FailureReason::Unresolved(vec![UnresolvedDependency {
        kind: E::KIND,
        source_id: entity.id(),
    }])
}

fn record_update(outcome: &mut MigrationOutcome, key: String, response: WriteResponse) {
    if response.success {
        outcome.updated.push(key);
    } else {
        outcome.fail(key, FailureReason::Rejected(response.error_summary()));
    }
}
