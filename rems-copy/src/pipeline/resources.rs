//! Resource pipeline
//!
//! Every license attached to a source resource must exist at the
//! destination before the resource can be created.

use super::MigrationKind;
use crate::context::MigrationContext;
use crate::error::MigrationResult;
use crate::identity::IdTranslator;
use crate::resolver::{resolve_all, UnresolvedDependency};
use async_trait::async_trait;
use rems_common::entities::{CreateResource, License, Resource};

pub struct Resources;

#[async_trait]
impl MigrationKind for Resources {
    type Entity = Resource;
    type Links = IdTranslator;
    /// Destination license IDs
    type Resolved = Vec<i64>;
    type Payload = CreateResource;

    async fn load_links(&self, ctx: &MigrationContext<'_>) -> MigrationResult<IdTranslator> {
        ctx.translator::<License>().await
    }

    fn resolve(
        &self,
        resource: &Resource,
        licenses: &IdTranslator,
    ) -> Result<Vec<i64>, Vec<UnresolvedDependency>> {
        resolve_all(resource.licenses.iter().map(|l| l.id), licenses)
    }

    async fn build_payload(
        &self,
        ctx: &MigrationContext<'_>,
        resource: &Resource,
        licenses: Vec<i64>,
    ) -> MigrationResult<CreateResource> {
        Ok(CreateResource {
            resid: resource.resid.clone(),
            organization: ctx.organization(),
            licenses,
        })
    }
}
