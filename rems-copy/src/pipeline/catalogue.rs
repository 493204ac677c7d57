//! Catalogue item pipeline
//!
//! A catalogue item ties a resource, a workflow and an optional form
//! together. Workflow and resource are mandatory; a null form stays null.
//! Category tags are attached later by the reconciliation pass.

use super::MigrationKind;
use crate::context::MigrationContext;
use crate::error::MigrationResult;
use crate::identity::IdTranslator;
use crate::resolver::{collect_unresolved, resolve_optional, resolve_required, UnresolvedDependency};
use async_trait::async_trait;
use rems_common::entities::{CatalogueItem, CreateCatalogueItem, Form, Resource, Workflow};

pub struct CatalogueItems;

/// Translators for everything a catalogue item references
pub struct CatalogueLinks {
    pub forms: IdTranslator,
    pub workflows: IdTranslator,
    pub resources: IdTranslator,
}

/// Destination IDs of one catalogue item's references
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedItem {
    pub form: Option<i64>,
    pub workflow: i64,
    pub resource: i64,
}

#[async_trait]
impl MigrationKind for CatalogueItems {
    type Entity = CatalogueItem;
    type Links = CatalogueLinks;
    type Resolved = ResolvedItem;
    type Payload = CreateCatalogueItem;

    async fn load_links(&self, ctx: &MigrationContext<'_>) -> MigrationResult<CatalogueLinks> {
        Ok(CatalogueLinks {
            forms: ctx.translator::<Form>().await?,
            workflows: ctx.translator::<Workflow>().await?,
            resources: ctx.translator::<Resource>().await?,
        })
    }

    fn resolve(
        &self,
        item: &CatalogueItem,
        links: &CatalogueLinks,
    ) -> Result<ResolvedItem, Vec<UnresolvedDependency>> {
        let form = resolve_optional(item.form_id, &links.forms);
        let workflow = resolve_required(item.workflow_id, &links.workflows);
        let resource = resolve_required(item.resource_id, &links.resources);

        match (form, workflow, resource) {
            (Ok(form), Ok(workflow), Ok(resource)) => Ok(ResolvedItem {
                form,
                workflow,
                resource,
            }),
            (form, workflow, resource) => Err(collect_unresolved([
                form.err(),
                workflow.err(),
                resource.err(),
            ])),
        }
    }

    async fn build_payload(
        &self,
        ctx: &MigrationContext<'_>,
        item: &CatalogueItem,
        resolved: ResolvedItem,
    ) -> MigrationResult<CreateCatalogueItem> {
        Ok(CreateCatalogueItem {
            form: resolved.form,
            resid: resolved.resource,
            wfid: resolved.workflow,
            organization: ctx.organization(),
            localizations: item.localizations.clone(),
            enabled: true,
            archived: false,
        })
    }
}
