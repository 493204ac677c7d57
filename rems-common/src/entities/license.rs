//! License schema

use super::{Entity, Kind, OrganizationRef};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// License type that cannot be copied: attachments live in instance storage
pub const ATTACHMENT_LICENSE: &str = "attachment";

/// License as returned by `GET /api/licenses` and `GET /api/licenses/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct License {
    pub id: i64,
    pub licensetype: String,
    #[serde(default)]
    pub localizations: BTreeMap<String, LicenseLocalization>,
}

/// Localized license text
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LicenseLocalization {
    pub title: String,
    #[serde(default)]
    pub textcontent: String,
}

impl License {
    pub fn is_attachment(&self) -> bool {
        self.licensetype == ATTACHMENT_LICENSE
    }
}

impl Entity for License {
    const KIND: Kind = Kind::License;

    fn id(&self) -> i64 {
        self.id
    }

    fn natural_key(&self, language: &str) -> Option<&str> {
        self.localizations.get(language).map(|l| l.title.as_str())
    }
}

/// Body of `POST /api/licenses/create`
#[derive(Debug, Clone, Serialize)]
pub struct CreateLicense {
    pub licensetype: String,
    pub organization: OrganizationRef,
    pub localizations: BTreeMap<String, LicenseLocalization>,
}

impl CreateLicense {
    pub fn from_license(license: &License, organization: OrganizationRef) -> Self {
        Self {
            licensetype: license.licensetype.clone(),
            organization,
            localizations: license.localizations.clone(),
        }
    }
}
