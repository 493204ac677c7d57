//! Catalogue item schema

use super::{CategoryRef, Entity, Kind, OrganizationRef};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Catalogue item as returned by `GET /api/catalogue-items`
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogueItem {
    pub id: i64,
    /// Form is optional in REMS
    #[serde(rename = "formid", default)]
    pub form_id: Option<i64>,
    #[serde(rename = "wfid")]
    pub workflow_id: i64,
    #[serde(rename = "resource-id")]
    pub resource_id: i64,
    #[serde(default)]
    pub localizations: BTreeMap<String, CatalogueItemLocalization>,
    #[serde(default)]
    pub categories: Vec<CategoryRef>,
}

/// Localized catalogue item text, without the read-only `id` and `langcode`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CatalogueItemLocalization {
    pub title: String,
    #[serde(default)]
    pub infourl: Option<String>,
}

impl Entity for CatalogueItem {
    const KIND: Kind = Kind::CatalogueItem;

    fn id(&self) -> i64 {
        self.id
    }

    fn natural_key(&self, language: &str) -> Option<&str> {
        self.localizations.get(language).map(|l| l.title.as_str())
    }
}

/// Body of `POST /api/catalogue-items/create`
///
/// `form` is serialized as `null` when the item has no form.
#[derive(Debug, Clone, Serialize)]
pub struct CreateCatalogueItem {
    pub form: Option<i64>,
    /// Destination resource ID (numeric, not the external `resid`)
    pub resid: i64,
    pub wfid: i64,
    pub organization: OrganizationRef,
    pub localizations: BTreeMap<String, CatalogueItemLocalization>,
    pub enabled: bool,
    pub archived: bool,
}

/// Body of `PUT /api/catalogue-items/edit`
#[derive(Debug, Clone, Serialize)]
pub struct EditCatalogueItem {
    pub id: i64,
    pub localizations: BTreeMap<String, CatalogueItemLocalization>,
    pub categories: Vec<CategoryRef>,
}

impl EditCatalogueItem {
    pub const PATH: &'static str = "/api/catalogue-items/edit";
}
