//! Category node pipeline (reconciliation stage 1)
//!
//! Nodes are created without children; links are restored by
//! [`crate::reconcile`] once every node exists.

use super::MigrationKind;
use crate::context::MigrationContext;
use crate::error::MigrationResult;
use crate::resolver::UnresolvedDependency;
use async_trait::async_trait;
use rems_common::entities::{Category, CreateCategory};

pub struct Categories;

#[async_trait]
impl MigrationKind for Categories {
    type Entity = Category;
    type Links = ();
    type Resolved = ();
    type Payload = CreateCategory;

    async fn load_links(&self, _ctx: &MigrationContext<'_>) -> MigrationResult<()> {
        Ok(())
    }

    fn resolve(&self, _category: &Category, _links: &()) -> Result<(), Vec<UnresolvedDependency>> {
        Ok(())
    }

    async fn build_payload(
        &self,
        _ctx: &MigrationContext<'_>,
        category: &Category,
        _resolved: (),
    ) -> MigrationResult<CreateCategory> {
        Ok(CreateCategory::from_category(category))
    }
}
