//! License pipeline
//!
//! Licenses reference nothing. Attachment licenses are reported as
//! unsupported because their files live in instance storage.

use super::MigrationKind;
use crate::context::{MigrationContext, Side};
use crate::error::MigrationResult;
use crate::resolver::UnresolvedDependency;
use async_trait::async_trait;
use rems_common::entities::{CreateLicense, License};

pub struct Licenses;

#[async_trait]
impl MigrationKind for Licenses {
    type Entity = License;
    type Links = ();
    type Resolved = ();
    type Payload = CreateLicense;

    async fn load_links(&self, _ctx: &MigrationContext<'_>) -> MigrationResult<()> {
        Ok(())
    }

    fn is_supported(&self, license: &License) -> bool {
        !license.is_attachment()
    }

    fn resolve(&self, _license: &License, _links: &()) -> Result<(), Vec<UnresolvedDependency>> {
        Ok(())
    }

    async fn build_payload(
        &self,
        ctx: &MigrationContext<'_>,
        license: &License,
        _resolved: (),
    ) -> MigrationResult<CreateLicense> {
        let detail: License = ctx.fetch_detail(Side::Source, license.id).await?;
        Ok(CreateLicense::from_license(&detail, ctx.organization()))
    }
}
