//! Workflow pipeline
//!
//! Workflow forms are translated to destination form IDs. Handlers are
//! users of the source instance and are not copied.

use super::MigrationKind;
use crate::context::MigrationContext;
use crate::error::MigrationResult;
use crate::identity::IdTranslator;
use crate::resolver::{resolve_all, UnresolvedDependency};
use async_trait::async_trait;
use rems_common::entities::{CreateWorkflow, Form, FormRef, Workflow};

pub struct Workflows;

#[async_trait]
impl MigrationKind for Workflows {
    type Entity = Workflow;
    type Links = IdTranslator;
    /// Destination form IDs
    type Resolved = Vec<i64>;
    type Payload = CreateWorkflow;

    async fn load_links(&self, ctx: &MigrationContext<'_>) -> MigrationResult<IdTranslator> {
        ctx.translator::<Form>().await
    }

    fn resolve(
        &self,
        workflow: &Workflow,
        forms: &IdTranslator,
    ) -> Result<Vec<i64>, Vec<UnresolvedDependency>> {
        resolve_all(workflow.workflow.forms.iter().map(|f| f.id), forms)
    }

    async fn build_payload(
        &self,
        ctx: &MigrationContext<'_>,
        workflow: &Workflow,
        forms: Vec<i64>,
    ) -> MigrationResult<CreateWorkflow> {
        Ok(CreateWorkflow {
            organization: ctx.organization(),
            title: workflow.title.clone(),
            workflow_type: workflow.workflow.workflow_type.clone(),
            forms: forms.into_iter().map(|id| FormRef { id }).collect(),
            handlers: Vec::new(),
        })
    }
}
