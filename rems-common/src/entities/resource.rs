//! Resource schema

use super::{Entity, Kind, OrganizationRef};
use serde::{Deserialize, Serialize};

/// Resource as returned by `GET /api/resources`
#[derive(Debug, Clone, Deserialize)]
pub struct Resource {
    pub id: i64,
    /// External identifier, stable across instances
    pub resid: String,
    #[serde(default)]
    pub licenses: Vec<LicenseRef>,
}

/// License embedded in a resource; only its ID is needed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct LicenseRef {
    pub id: i64,
}

impl Entity for Resource {
    const KIND: Kind = Kind::Resource;

    fn id(&self) -> i64 {
        self.id
    }

    fn natural_key(&self, _language: &str) -> Option<&str> {
        Some(&self.resid)
    }
}

/// Body of `POST /api/resources/create`
#[derive(Debug, Clone, Serialize)]
pub struct CreateResource {
    pub resid: String,
    pub organization: OrganizationRef,
    /// Destination license IDs
    pub licenses: Vec<i64>,
}
