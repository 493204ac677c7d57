//! Form pipeline
//!
//! The form list omits field definitions, so each created form is copied
//! from its detail record.

use super::MigrationKind;
use crate::context::{MigrationContext, Side};
use crate::error::MigrationResult;
use crate::resolver::UnresolvedDependency;
use async_trait::async_trait;
use rems_common::entities::{CreateForm, Form};

pub struct Forms;

#[async_trait]
impl MigrationKind for Forms {
    type Entity = Form;
    type Links = ();
    type Resolved = ();
    type Payload = CreateForm;

    async fn load_links(&self, _ctx: &MigrationContext<'_>) -> MigrationResult<()> {
        Ok(())
    }

    fn resolve(&self, _form: &Form, _links: &()) -> Result<(), Vec<UnresolvedDependency>> {
        Ok(())
    }

    async fn build_payload(
        &self,
        ctx: &MigrationContext<'_>,
        form: &Form,
        _resolved: (),
    ) -> MigrationResult<CreateForm> {
        let detail: Form = ctx.fetch_detail(Side::Source, form.id).await?;
        Ok(CreateForm::from_form(&detail, ctx.organization()))
    }
}
