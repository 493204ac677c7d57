//! Wire schemas for REMS entities
//!
//! Read models deserialize what the API returns and ignore everything the
//! migration does not need. Create and update payloads are separate structs
//! built by projection, so a field is only ever sent when it is listed here.

pub mod catalogue;
pub mod category;
pub mod form;
pub mod license;
pub mod resource;
pub mod workflow;

pub use catalogue::{
    CatalogueItem, CatalogueItemLocalization, CreateCatalogueItem, EditCatalogueItem,
};
pub use category::{Category, CategoryRef, CreateCategory, UpdateCategory};
pub use form::{CreateForm, Form};
pub use license::{CreateLicense, License, LicenseLocalization};
pub use resource::{CreateResource, LicenseRef, Resource};
pub use workflow::{CreateWorkflow, FormRef, Workflow, WorkflowBody};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Entity kinds, in the order they must be migrated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Kind {
    License,
    Form,
    Resource,
    Workflow,
    CatalogueItem,
    Category,
}

impl Kind {
    /// All kinds in dependency order
    pub const ALL: [Kind; 6] = [
        Kind::License,
        Kind::Form,
        Kind::Resource,
        Kind::Workflow,
        Kind::CatalogueItem,
        Kind::Category,
    ];

    /// Plural label used in logs and reports
    pub fn label(&self) -> &'static str {
        match self {
            Kind::License => "licenses",
            Kind::Form => "forms",
            Kind::Resource => "resources",
            Kind::Workflow => "workflows",
            Kind::CatalogueItem => "catalogue items",
            Kind::Category => "categories",
        }
    }

    /// Singular label used when naming one entity
    pub fn singular(&self) -> &'static str {
        match self {
            Kind::License => "license",
            Kind::Form => "form",
            Kind::Resource => "resource",
            Kind::Workflow => "workflow",
            Kind::CatalogueItem => "catalogue item",
            Kind::Category => "category",
        }
    }

    /// Collection endpoint
    pub fn list_path(&self) -> &'static str {
        match self {
            Kind::License => "/api/licenses",
            Kind::Form => "/api/forms",
            Kind::Resource => "/api/resources",
            Kind::Workflow => "/api/workflows",
            Kind::CatalogueItem => "/api/catalogue-items",
            Kind::Category => "/api/categories",
        }
    }

    /// Single entity endpoint
    pub fn detail_path(&self, id: i64) -> String {
        format!("{}/{}", self.list_path(), id)
    }

    /// Creation endpoint
    pub fn create_path(&self) -> &'static str {
        match self {
            Kind::License => "/api/licenses/create",
            Kind::Form => "/api/forms/create",
            Kind::Resource => "/api/resources/create",
            Kind::Workflow => "/api/workflows/create",
            Kind::CatalogueItem => "/api/catalogue-items/create",
            // Categories are created by POSTing to the collection
            Kind::Category => "/api/categories",
        }
    }

    /// Query parameters for listing only active entities
    ///
    /// The categories endpoint has no enabled/archived state.
    pub fn list_query(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Kind::Category => &[],
            _ => &[("disabled", "false"), ("archived", "false")],
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A record that can be matched across instances
pub trait Entity: DeserializeOwned + Send + Sync {
    const KIND: Kind;

    /// Instance-local identifier
    fn id(&self) -> i64;

    /// Value compared across instances, evaluated in `language`
    ///
    /// `None` when the entity has no title in that language.
    fn natural_key(&self, language: &str) -> Option<&str>;
}

/// Organization reference as accepted on create
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OrganizationRef {
    #[serde(rename = "organization/id")]
    pub id: String,
}

impl OrganizationRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Subset of `GET /api/config` used to verify the selected language
#[derive(Debug, Clone, Deserialize)]
pub struct InstanceConfig {
    #[serde(default)]
    pub languages: Vec<String>,
}

/// Body of a create or update response
///
/// REMS answers validation problems with HTTP 200 and `"success": false`.
#[derive(Debug, Clone, Deserialize)]
pub struct WriteResponse {
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub errors: Vec<Value>,
}

fn default_success() -> bool {
    true
}

impl WriteResponse {
    /// Interpret a response body
    ///
    /// Empty and non-object bodies count as success. An object that does not
    /// match the schema is an error.
    pub fn from_value(value: Value) -> serde_json::Result<Self> {
        if !value.is_object() {
            return Ok(Self {
                success: true,
                id: None,
                errors: Vec::new(),
            });
        }
        serde_json::from_value(value)
    }

    /// Compact description of the returned errors
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return "rejected without error details".to_string();
        }
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_paths() {
        assert_eq!(Kind::License.detail_path(7), "/api/licenses/7");
        assert_eq!(Kind::Category.create_path(), "/api/categories");
        assert!(Kind::Category.list_query().is_empty());
        assert_eq!(Kind::Form.list_query().len(), 2);
    }

    #[test]
    fn test_write_response_rejection() {
        let response = WriteResponse::from_value(json!({
            "success": false,
            "errors": [{"type": "t.form.validation/invalid-value"}]
        }))
        .unwrap();
        assert!(!response.success);
        assert!(response.error_summary().contains("invalid-value"));
    }

    #[test]
    fn test_write_response_tolerates_empty_body() {
        let response = WriteResponse::from_value(Value::Null).unwrap();
        assert!(response.success);
        assert_eq!(response.id, None);
    }

    #[test]
    fn test_write_response_with_unexpected_shape_is_an_error() {
        let result = WriteResponse::from_value(json!({
            "success": false,
            "errors": "Invalid organization"
        }));
        assert!(result.is_err());
    }
}
