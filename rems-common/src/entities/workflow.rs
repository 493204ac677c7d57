//! Workflow schema

use super::{Entity, Kind, OrganizationRef};
use serde::{Deserialize, Serialize};

/// Workflow as returned by `GET /api/workflows`
///
/// Workflow titles are not localized in REMS.
#[derive(Debug, Clone, Deserialize)]
pub struct Workflow {
    pub id: i64,
    pub title: String,
    pub workflow: WorkflowBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WorkflowBody {
    #[serde(rename = "type")]
    pub workflow_type: String,
    #[serde(default)]
    pub forms: Vec<FormRef>,
}

/// Form reference inside a workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct FormRef {
    #[serde(rename = "form/id")]
    pub id: i64,
}

impl Entity for Workflow {
    const KIND: Kind = Kind::Workflow;

    fn id(&self) -> i64 {
        self.id
    }

    fn natural_key(&self, _language: &str) -> Option<&str> {
        Some(&self.title)
    }
}

/// Body of `POST /api/workflows/create`
///
/// Handlers are instance-local users and always start empty.
#[derive(Debug, Clone, Serialize)]
pub struct CreateWorkflow {
    pub organization: OrganizationRef,
    pub title: String,
    #[serde(rename = "type")]
    pub workflow_type: String,
    pub forms: Vec<FormRef>,
    pub handlers: Vec<String>,
}
