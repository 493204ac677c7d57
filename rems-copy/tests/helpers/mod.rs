//! Test helpers: an in-memory REMS instance behind the `Gateway` trait
//!
//! `FakeInstance` stores entities as the JSON the real API returns, answers
//! list/detail/create/update calls the way REMS does, and records every
//! request so tests can assert on what was sent.

#![allow(dead_code)]

use async_trait::async_trait;
use rems_common::api::{Gateway, Method, TransportError};
use rems_common::{Environment, MigrationConfig};
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

pub const LICENSES: &str = "/api/licenses";
pub const FORMS: &str = "/api/forms";
pub const RESOURCES: &str = "/api/resources";
pub const WORKFLOWS: &str = "/api/workflows";
pub const CATALOGUE: &str = "/api/catalogue-items";
pub const CATEGORIES: &str = "/api/categories";

/// One recorded gateway call
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

struct State {
    next_id: i64,
    languages: Vec<String>,
    collections: HashMap<&'static str, Vec<Value>>,
    requests: Vec<Request>,
    canned_creates: HashMap<String, Value>,
    broken_paths: HashSet<String>,
}

pub struct FakeInstance {
    name: String,
    state: Mutex<State>,
}

fn id_key(collection: &str) -> &'static str {
    match collection {
        FORMS => "form/id",
        CATEGORIES => "category/id",
        _ => "id",
    }
}

fn collection_of(path: &str) -> Option<&'static str> {
    [LICENSES, FORMS, RESOURCES, WORKFLOWS, CATALOGUE, CATEGORIES]
        .into_iter()
        .find(|c| path == *c || path.starts_with(&format!("{}/", c)))
}

impl FakeInstance {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            state: Mutex::new(State {
                // Keep generated IDs well away from fixture IDs
                next_id: 1000,
                languages: vec!["en".to_string(), "fi".to_string()],
                collections: HashMap::new(),
                requests: Vec::new(),
                canned_creates: HashMap::new(),
                broken_paths: HashSet::new(),
            }),
        }
    }

    pub fn with_languages(self, languages: &[&str]) -> Self {
        self.state.lock().unwrap().languages = languages.iter().map(|l| l.to_string()).collect();
        self
    }

    /// Store a fixture entity in a collection
    pub fn insert(&self, collection: &'static str, entity: Value) {
        self.state
            .lock()
            .unwrap()
            .collections
            .entry(collection)
            .or_default()
            .push(entity);
    }

    pub fn with(self, collection: &'static str, entity: Value) -> Self {
        self.insert(collection, entity);
        self
    }

    /// Answer creates whose English title or resid equals `title` with `"success": false`
    pub fn reject_creates_of(self, title: &str) -> Self {
        self.answer_creates_of(
            title,
            json!({
                "success": false,
                "errors": [{"type": "t.actions.errors/duplicate"}]
            }),
        )
    }

    /// Answer creates of `title` with `response` and store nothing
    pub fn answer_creates_of(self, title: &str, response: Value) -> Self {
        self.state
            .lock()
            .unwrap()
            .canned_creates
            .insert(title.to_string(), response);
        self
    }

    /// Answer every call to `path` with HTTP 500
    pub fn break_path(self, path: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .broken_paths
            .insert(path.to_string());
        self
    }

    pub fn collection(&self, collection: &'static str) -> Vec<Value> {
        self.state
            .lock()
            .unwrap()
            .collections
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    /// Entity whose English title (or resid / workflow title) equals `title`
    pub fn find(&self, collection: &'static str, title: &str) -> Option<Value> {
        self.collection(collection)
            .into_iter()
            .find(|e| title_of(e).as_deref() == Some(title))
    }

    /// Entity by instance-local ID
    pub fn get_by_id(&self, collection: &'static str, id: i64) -> Option<Value> {
        let key = id_key(collection);
        self.collection(collection)
            .into_iter()
            .find(|e| e[key].as_i64() == Some(id))
    }

    pub fn requests(&self) -> Vec<Request> {
        self.state.lock().unwrap().requests.clone()
    }

    /// Number of writes (POST or PUT) received
    pub fn write_count(&self) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method != Method::Get)
            .count()
    }

    pub fn writes_to(&self, path: &str) -> Vec<Value> {
        self.requests()
            .into_iter()
            .filter(|r| r.method != Method::Get && r.path == path)
            .filter_map(|r| r.body)
            .collect()
    }

    fn record(&self, method: Method, path: &str, body: Option<&Value>) -> Result<(), TransportError> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(Request {
            method,
            path: path.to_string(),
            body: body.cloned(),
        });
        if state.broken_paths.contains(path) {
            return Err(TransportError::Status {
                environment: self.name.clone(),
                method,
                path: path.to_string(),
                status: 500,
                body: "{\"error\":\"internal\"}".to_string(),
            });
        }
        Ok(())
    }

    fn not_found(&self, method: Method, path: &str) -> TransportError {
        TransportError::Status {
            environment: self.name.clone(),
            method,
            path: path.to_string(),
            status: 404,
            body: "not found".to_string(),
        }
    }
}

/// English title, resid or workflow title of a stored entity
fn title_of(entity: &Value) -> Option<String> {
    let candidates = [
        entity["localizations"]["en"]["title"].as_str(),
        entity["category/title"]["en"].as_str(),
        entity["form/external-title"]["en"].as_str(),
        entity["form/internal-name"].as_str(),
        entity["resid"].as_str(),
        entity["title"].as_str(),
    ];
    candidates.into_iter().flatten().next().map(str::to_string)
}

/// Convert a create payload into the shape the list endpoint returns
fn stored_entity(collection: &str, id: i64, body: &Value) -> Value {
    match collection {
        RESOURCES => json!({
            "id": id,
            "resid": body["resid"],
            "organization": body["organization"],
            "licenses": body["licenses"]
                .as_array()
                .map(|ids| ids.iter().map(|l| json!({"id": l})).collect::<Vec<_>>())
                .unwrap_or_default(),
        }),
        WORKFLOWS => json!({
            "id": id,
            "title": body["title"],
            "organization": body["organization"],
            "workflow": {
                "type": body["type"],
                "forms": body["forms"],
                "handlers": body["handlers"],
            },
        }),
        CATALOGUE => json!({
            "id": id,
            "formid": body["form"],
            "wfid": body["wfid"],
            "resource-id": body["resid"],
            "organization": body["organization"],
            "localizations": body["localizations"],
            "categories": [],
            "enabled": body["enabled"],
            "archived": body["archived"],
        }),
        _ => {
            let mut stored = body.clone();
            stored[id_key(collection)] = json!(id);
            stored
        }
    }
}

#[async_trait]
impl Gateway for FakeInstance {
    fn environment(&self) -> &str {
        &self.name
    }

    async fn get(&self, path: &str, _query: &[(&str, &str)]) -> Result<Value, TransportError> {
        self.record(Method::Get, path, None)?;

        if path == "/api/config" {
            let languages = self.state.lock().unwrap().languages.clone();
            return Ok(json!({ "languages": languages }));
        }

        let collection = collection_of(path).ok_or_else(|| self.not_found(Method::Get, path))?;
        if path == collection {
            return Ok(Value::Array(self.collection(collection)));
        }

        let id: i64 = path[collection.len() + 1..]
            .parse()
            .map_err(|_| self.not_found(Method::Get, path))?;
        self.get_by_id(collection, id)
            .ok_or_else(|| self.not_found(Method::Get, path))
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value, TransportError> {
        self.record(Method::Post, path, Some(body))?;

        let collection = collection_of(path).ok_or_else(|| self.not_found(Method::Post, path))?;
        let mut state = self.state.lock().unwrap();

        if let Some(title) = title_of(body) {
            if let Some(response) = state.canned_creates.get(&title) {
                return Ok(response.clone());
            }
        }

        let id = state.next_id;
        state.next_id += 1;
        let entity = stored_entity(collection, id, body);
        state.collections.entry(collection).or_default().push(entity);

        Ok(json!({ "success": true, "id": id }))
    }

    async fn put(&self, path: &str, body: &Value) -> Result<Value, TransportError> {
        self.record(Method::Put, path, Some(body))?;

        let (collection, fields): (&'static str, &[&str]) = match path {
            "/api/categories" => (
                CATEGORIES,
                &[
                    "category/title",
                    "category/description",
                    "category/display-order",
                    "category/children",
                ],
            ),
            "/api/catalogue-items/edit" => (CATALOGUE, &["localizations", "categories"]),
            _ => return Err(self.not_found(Method::Put, path)),
        };

        let key = id_key(collection);
        let mut state = self.state.lock().unwrap();
        let entity = state
            .collections
            .entry(collection)
            .or_default()
            .iter_mut()
            .find(|e| e[key] == body[key]);

        match entity {
            Some(entity) => {
                for field in fields {
                    if let Some(value) = body.get(*field) {
                        entity[*field] = value.clone();
                    }
                }
                Ok(json!({ "success": true }))
            }
            None => Ok(json!({
                "success": false,
                "errors": [{"type": "t.actions.errors/not-found"}]
            })),
        }
    }
}

// =============================================================================
// Fixture builders (REMS list shapes)
// =============================================================================

pub fn license(id: i64, title: &str) -> Value {
    json!({
        "id": id,
        "licensetype": "link",
        "enabled": true,
        "archived": false,
        "organization": {
            "organization/id": "source-org",
            "organization/short-name": {"en": "SRC"},
            "organization/name": {"en": "Source organization"}
        },
        "localizations": {
            "en": {"title": title, "textcontent": format!("https://licenses.example.org/{}", title)},
            "fi": {"title": format!("{} (fi)", title), "textcontent": ""}
        }
    })
}

pub fn attachment_license(id: i64, title: &str) -> Value {
    let mut value = license(id, title);
    value["licensetype"] = json!("attachment");
    value
}

pub fn form(id: i64, title: &str) -> Value {
    json!({
        "form/id": id,
        "form/internal-name": format!("{}-internal", title),
        "form/external-title": {"en": title, "fi": format!("{} (fi)", title)},
        "form/fields": [
            {"field/id": "fld1", "field/type": "text", "field/optional": false,
             "field/title": {"en": "Purpose", "fi": "Tarkoitus"}}
        ],
        "form/errors": null,
        "enabled": true,
        "archived": false,
        "organization": {"organization/id": "source-org", "organization/name": {"en": "Source"}}
    })
}

pub fn resource(id: i64, resid: &str, licenses: &[i64]) -> Value {
    json!({
        "id": id,
        "resid": resid,
        "enabled": true,
        "archived": false,
        "organization": {"organization/id": "source-org"},
        "licenses": licenses
            .iter()
            .map(|l| json!({"id": l, "licensetype": "link", "localizations": {}}))
            .collect::<Vec<_>>()
    })
}

pub fn workflow(id: i64, title: &str, forms: &[i64]) -> Value {
    json!({
        "id": id,
        "title": title,
        "enabled": true,
        "archived": false,
        "organization": {"organization/id": "source-org"},
        "workflow": {
            "type": "workflow/default",
            "handlers": [{"userid": "source-handler"}],
            "forms": forms.iter().map(|f| json!({"form/id": f})).collect::<Vec<_>>()
        }
    })
}

pub fn catalogue_item(
    id: i64,
    title: &str,
    form: Option<i64>,
    workflow: i64,
    resource: i64,
    categories: &[i64],
) -> Value {
    json!({
        "id": id,
        "formid": form,
        "wfid": workflow,
        "resource-id": resource,
        "resid": format!("urn:resource:{}", resource),
        "enabled": true,
        "archived": false,
        "organization": {"organization/id": "source-org"},
        "localizations": {
            "en": {"id": id, "langcode": "en", "title": title, "infourl": null}
        },
        "categories": categories
            .iter()
            .map(|c| json!({"category/id": c}))
            .collect::<Vec<_>>()
    })
}

pub fn category(id: i64, title: &str, children: &[i64]) -> Value {
    json!({
        "category/id": id,
        "category/title": {"en": title, "fi": format!("{} (fi)", title)},
        "category/children": children
            .iter()
            .map(|c| json!({"category/id": c}))
            .collect::<Vec<_>>()
    })
}

// =============================================================================
// Run configuration
// =============================================================================

fn environment(name: &str, organization: &str) -> Environment {
    Environment {
        name: name.to_string(),
        url: format!("https://{}.rems.example.org", name),
        api_key: format!("{}-key", name),
        acting_user: "owner".to_string(),
        organization_id: organization.to_string(),
    }
}

pub fn config(language: &str) -> MigrationConfig {
    MigrationConfig {
        source: environment("source", "source-org"),
        destination: environment("destination", "destination-org"),
        language: language.to_string(),
    }
}

/// English title list of a collection, sorted
pub fn titles(instance: &FakeInstance, collection: &'static str) -> Vec<String> {
    let mut titles: Vec<String> = instance
        .collection(collection)
        .iter()
        .filter_map(title_of)
        .collect();
    titles.sort();
    titles
}
