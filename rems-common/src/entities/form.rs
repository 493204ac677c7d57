//! Form schema

use super::{Entity, Kind, OrganizationRef};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Form as returned by `GET /api/forms` and `GET /api/forms/{id}`
///
/// The list view omits `form/fields`; the detail view carries them.
#[derive(Debug, Clone, Deserialize)]
pub struct Form {
    #[serde(rename = "form/id")]
    pub id: i64,
    #[serde(rename = "form/internal-name", default)]
    pub internal_name: Option<String>,
    #[serde(rename = "form/external-title", default)]
    pub external_title: BTreeMap<String, String>,
    /// Single title used by older REMS versions
    #[serde(rename = "form/title", default)]
    pub title: Option<String>,
    #[serde(rename = "form/fields", default)]
    pub fields: Vec<Value>,
}

impl Entity for Form {
    const KIND: Kind = Kind::Form;

    fn id(&self) -> i64 {
        self.id
    }

    fn natural_key(&self, language: &str) -> Option<&str> {
        self.external_title
            .get(language)
            .or(self.internal_name.as_ref())
            .or(self.title.as_ref())
            .map(String::as_str)
    }
}

/// Body of `POST /api/forms/create`
///
/// Field definitions are form-local and copied verbatim.
#[derive(Debug, Clone, Serialize)]
pub struct CreateForm {
    pub organization: OrganizationRef,
    #[serde(rename = "form/internal-name", skip_serializing_if = "Option::is_none")]
    pub internal_name: Option<String>,
    #[serde(rename = "form/external-title", skip_serializing_if = "BTreeMap::is_empty")]
    pub external_title: BTreeMap<String, String>,
    #[serde(rename = "form/title", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "form/fields")]
    pub fields: Vec<Value>,
}

impl CreateForm {
    pub fn from_form(form: &Form, organization: OrganizationRef) -> Self {
        Self {
            organization,
            internal_name: form.internal_name.clone(),
            external_title: form.external_title.clone(),
            title: form.title.clone(),
            fields: form.fields.clone(),
        }
    }
}
