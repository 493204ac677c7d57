//! Category schema

use super::{Entity, Kind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Category as returned by `GET /api/categories`
#[derive(Debug, Clone, Deserialize)]
pub struct Category {
    #[serde(rename = "category/id")]
    pub id: i64,
    #[serde(rename = "category/title", default)]
    pub title: BTreeMap<String, String>,
    #[serde(rename = "category/description", default)]
    pub description: BTreeMap<String, String>,
    #[serde(rename = "category/display-order", default)]
    pub display_order: Option<i64>,
    #[serde(rename = "category/children", default)]
    pub children: Vec<CategoryRef>,
}

/// Reference to a category by ID, used for children and catalogue item tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct CategoryRef {
    #[serde(rename = "category/id")]
    pub id: i64,
}

impl Entity for Category {
    const KIND: Kind = Kind::Category;

    fn id(&self) -> i64 {
        self.id
    }

    fn natural_key(&self, language: &str) -> Option<&str> {
        self.title.get(language).map(String::as_str)
    }
}

/// Body of `POST /api/categories`
///
/// Children cannot be created together with the parent; they are linked
/// afterwards with [`UpdateCategory`].
#[derive(Debug, Clone, Serialize)]
pub struct CreateCategory {
    #[serde(rename = "category/title")]
    pub title: BTreeMap<String, String>,
    #[serde(rename = "category/description", skip_serializing_if = "BTreeMap::is_empty")]
    pub description: BTreeMap<String, String>,
    #[serde(rename = "category/display-order", skip_serializing_if = "Option::is_none")]
    pub display_order: Option<i64>,
    #[serde(rename = "category/children")]
    pub children: Vec<CategoryRef>,
}

impl CreateCategory {
    /// Childless copy of a category
    pub fn from_category(category: &Category) -> Self {
        Self {
            title: category.title.clone(),
            description: category.description.clone(),
            display_order: category.display_order,
            children: Vec::new(),
        }
    }
}

/// Body of `PUT /api/categories`
#[derive(Debug, Clone, Serialize)]
pub struct UpdateCategory {
    #[serde(rename = "category/id")]
    pub id: i64,
    #[serde(rename = "category/title")]
    pub title: BTreeMap<String, String>,
    #[serde(rename = "category/description", skip_serializing_if = "BTreeMap::is_empty")]
    pub description: BTreeMap<String, String>,
    #[serde(rename = "category/display-order", skip_serializing_if = "Option::is_none")]
    pub display_order: Option<i64>,
    #[serde(rename = "category/children")]
    pub children: Vec<CategoryRef>,
}

impl UpdateCategory {
    pub const PATH: &'static str = "/api/categories";

    /// Keep the destination category as it is, replacing only its children
    pub fn with_children(destination: &Category, children: Vec<CategoryRef>) -> Self {
        Self {
            id: destination.id,
            title: destination.title.clone(),
            description: destination.description.clone(),
            display_order: destination.display_order,
            children,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parent() -> Category {
        serde_json::from_value(json!({
            "category/id": 1,
            "category/title": {"en": "Life sciences"},
            "category/display-order": 2,
            "category/children": [
                {"category/id": 2, "category/title": {"en": "Genomics"}}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_create_strips_children_and_id() {
        let payload = serde_json::to_value(CreateCategory::from_category(&parent())).unwrap();

        assert_eq!(
            payload,
            json!({
                "category/title": {"en": "Life sciences"},
                "category/display-order": 2,
                "category/children": []
            })
        );
    }

    #[test]
    fn test_update_replaces_children() {
        let update = UpdateCategory::with_children(&parent(), vec![CategoryRef { id: 40 }]);
        let payload = serde_json::to_value(update).unwrap();

        assert_eq!(payload["category/id"], 1);
        assert_eq!(payload["category/children"], json!([{"category/id": 40}]));
    }
}
