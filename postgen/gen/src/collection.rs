//! The collection document store.
//!
//! A [`Collection`] accumulates registered endpoints in a [`PathTree`] along
//! with collection variables, placeholder defaults and bearer auth, and
//! renders the whole thing as a Postman collection document.
//!
//! ## Examples
//!
//! ```
//! use postgen_define::{FieldDescriptor, RecordShape, TypeShape};
//! use postgen_gen::collection::Collection;
//! use postgen_gen::compiler::Registration;
//! use postgen_gen::postman::SchemaVersion;
//!
//! let shape = RecordShape::builder("GetUser")
//!     .field(FieldDescriptor::new("UserID", TypeShape::String).param("userId"))
//!     .build();
//!
//! let mut collection = Collection::new("My API", "Generated collection");
//! collection
//!     .add_variable("base_url", "http://localhost:8080")
//!     .add_placeholder("userId", "u-1");
//! collection.register(Registration::new("GET", "/users/:userId", shape)).unwrap();
//!
//! let json = String::from_utf8(collection.serialize(SchemaVersion::V210).unwrap()).unwrap();
//! assert!(json.contains("\"raw\": \"{{base_url}}/users/:userId\""));
//! ```

use std::io::Write;
use std::path::Path;

use postgen_define::Shaped;
use tracing::{debug, info};

use crate::compiler::{PathVariablePolicy, Registration, compile};
use crate::errors::GeneratorError;
use crate::output::write_atomic;
use crate::placeholder::PlaceholderDefaults;
use crate::postman::{Auth, Folder, Info, Item, PostmanCollection, Request, RequestItem, SchemaVersion, Variable};
use crate::tree::{NodeId, PathTree};

/// Variable the bearer token is read from unless configured otherwise.
pub const DEFAULT_TOKEN_VARIABLE: &str = "token";

/// A collection under construction.
#[derive(Debug, Clone)]
pub struct Collection {
    name: String,
    description: String,
    variables: Vec<(String, String)>,
    token_variable: Option<String>,
    defaults: PlaceholderDefaults,
    policy: PathVariablePolicy,
    tree: PathTree,
}

impl Collection {
    /// Creates an empty collection with bearer auth bound to `{{token}}`.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            variables: Vec::new(),
            token_variable: Some(DEFAULT_TOKEN_VARIABLE.to_string()),
            defaults: PlaceholderDefaults::new(),
            policy: PathVariablePolicy::default(),
            tree: PathTree::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Appends a collection variable. Duplicate keys are kept in order.
    pub fn add_variable(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.variables.push((key.into(), value.into()));
        self
    }

    /// Sets a placeholder default used for fields without an example.
    ///
    /// Affects only endpoints registered afterwards.
    pub fn add_placeholder(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.defaults.insert(key, value);
        self
    }

    /// Binds bearer auth to the collection variable `token_variable`.
    pub fn add_auth_bearer(&mut self, token_variable: impl Into<String>) -> &mut Self {
        self.token_variable = Some(token_variable.into());
        self
    }

    /// Removes collection-level auth.
    pub fn without_auth(&mut self) -> &mut Self {
        self.token_variable = None;
        self
    }

    /// Chooses how unmatched `:variable` segments are handled on registration.
    pub fn with_path_variable_policy(&mut self, policy: PathVariablePolicy) -> &mut Self {
        self.policy = policy;
        self
    }

    pub fn variables(&self) -> impl Iterator<Item = (&str, &str)> {
        self.variables.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn placeholders(&self) -> &PlaceholderDefaults {
        &self.defaults
    }

    pub fn tree(&self) -> &PathTree {
        &self.tree
    }

    /// Compiles `registration` and files it in the tree.
    ///
    /// On error the collection is left unchanged.
    pub fn register(&mut self, registration: Registration) -> Result<NodeId, GeneratorError> {
        let request = compile(&registration, &self.defaults, self.policy)?;
        let leaf = self.tree.attach(request);
        debug!(
            method = %registration.method,
            path = %registration.path,
            node = leaf.index(),
            "registered endpoint"
        );
        Ok(leaf)
    }

    /// Registers the shape of `T`.
    pub fn register_type<T: Shaped + ?Sized>(
        &mut self,
        method: impl Into<String>,
        path: impl Into<String>,
    ) -> Result<NodeId, GeneratorError> {
        self.register(Registration::of::<T>(method, path))
    }

    /// Builds the wire document for `version`.
    pub fn to_document(&self, version: SchemaVersion) -> PostmanCollection {
        PostmanCollection {
            info: Info {
                name: self.name.clone(),
                description: self.description.clone(),
                schema: version.schema_url(),
            },
            item: self.items(self.tree.root(), version),
            auth: self
                .token_variable
                .as_deref()
                .map(|variable| Auth::bearer(variable, version)),
            variable: self
                .variables
                .iter()
                .map(|(key, value)| Variable::string(key.as_str(), value.as_str()))
                .collect(),
        }
    }

    fn items(&self, id: NodeId, version: SchemaVersion) -> Vec<Item> {
        self.tree
            .children(id)
            .map(|(child, node)| match &node.request {
                Some(request) => Item::Request(RequestItem {
                    name: node.name.clone(),
                    request: Request::from_compiled(request, version),
                    response: Vec::new(),
                }),
                None => Item::Folder(Folder {
                    name: node.name.clone(),
                    item: self.items(child, version),
                }),
            })
            .collect()
    }

    /// Pretty-printed JSON for `version`.
    pub fn serialize(&self, version: SchemaVersion) -> Result<Vec<u8>, GeneratorError> {
        serde_json::to_vec_pretty(&self.to_document(version))
            .map_err(GeneratorError::CollectionSerialization)
    }

    /// Writes the collection to `writer`.
    pub fn write<W: Write>(&self, writer: &mut W, version: SchemaVersion) -> Result<(), GeneratorError> {
        let bytes = self.serialize(version)?;
        writer
            .write_all(&bytes)
            .and_then(|_| writer.flush())
            .map_err(|e| GeneratorError::WriteError {
                path: "<writer>".to_string(),
                source: e,
            })
    }

    /// Writes the collection to `path` atomically, creating parent directories.
    pub fn write_to_file(&self, path: impl AsRef<Path>, version: SchemaVersion) -> Result<(), GeneratorError> {
        let path = path.as_ref();
        let bytes = self.serialize(version)?;
        write_atomic(path, &bytes)?;
        info!(path = %path.display(), schema = %version, "collection written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use postgen_define::{FieldDescriptor, RecordShape, TypeShape};
    use serde_json::{Value, json};

    fn empty(method: &str, path: &str) -> Registration {
        Registration::new(method, path, RecordShape::builder("Empty").build())
    }

    fn document(collection: &Collection, version: SchemaVersion) -> Value {
        serde_json::to_value(collection.to_document(version)).unwrap()
    }

    #[test]
    fn new_collection_has_default_bearer_auth() {
        let collection = Collection::new("My API", "desc");
        let doc = document(&collection, SchemaVersion::V210);

        assert_eq!(doc["info"]["name"], json!("My API"));
        assert_eq!(doc["info"]["description"], json!("desc"));
        assert_eq!(doc["auth"]["bearer"][0]["value"], json!("{{token}}"));
        assert_eq!(doc["item"], json!([]));
        assert!(doc.get("variable").is_none());
    }

    #[test]
    fn auth_can_be_rebound_or_removed() {
        let mut collection = Collection::new("api", "");
        collection.add_auth_bearer("jwt");
        let doc = document(&collection, SchemaVersion::V200);
        assert_eq!(doc["auth"]["bearer"]["token"], json!("{{jwt}}"));

        collection.without_auth();
        assert!(document(&collection, SchemaVersion::V210).get("auth").is_none());
    }

    #[test]
    fn variables_keep_insertion_order() {
        let mut collection = Collection::new("api", "");
        collection
            .add_variable("base_url", "http://localhost:8080")
            .add_variable("token", "");

        let doc = document(&collection, SchemaVersion::V210);
        assert_eq!(
            doc["variable"],
            json!([
                { "key": "base_url", "value": "http://localhost:8080", "type": "string" },
                { "key": "token", "value": "", "type": "string" }
            ])
        );
    }

    #[test]
    fn folders_nest_by_path() {
        let mut collection = Collection::new("api", "");
        collection.register(empty("POST", "/users")).unwrap();
        collection.register(empty("GET", "/users/:userId")).unwrap();

        let doc = document(&collection, SchemaVersion::V210);
        let items = doc["item"].as_array().unwrap();
        assert_eq!(items.len(), 2);

        assert_eq!(items[0]["name"], json!("users"));
        assert_eq!(items[0]["request"]["method"], json!("POST"));
        assert_eq!(items[0]["response"], json!([]));

        assert_eq!(items[1]["name"], json!("users"));
        assert!(items[1].get("request").is_none());
        assert_eq!(items[1]["item"][0]["name"], json!(":userId"));
    }

    #[test]
    fn failed_registration_leaves_tree_untouched() {
        let mut collection = Collection::new("api", "");
        collection.with_path_variable_policy(PathVariablePolicy::Reject);

        let err = collection.register(empty("GET", "/users/:userId")).unwrap_err();
        assert!(matches!(err, GeneratorError::UnmatchedPathVariable { .. }));
        assert!(collection.tree().is_empty());
    }

    #[test]
    fn placeholders_apply_to_later_registrations_only() {
        let shape = || {
            RecordShape::builder("Q")
                .field(FieldDescriptor::new("Page", TypeShape::Integer).query("page"))
                .build()
        };

        let mut collection = Collection::new("api", "");
        let before = collection.register(Registration::new("GET", "/a", shape())).unwrap();
        collection.add_placeholder("page", "3");
        let after = collection.register(Registration::new("GET", "/b", shape())).unwrap();

        let value = |id| {
            collection.tree().node(id).request.as_ref().unwrap().url.query[0]
                .value
                .clone()
        };
        assert_eq!(value(before), "0");
        assert_eq!(value(after), "3");
    }

    #[test]
    fn write_emits_pretty_json() {
        let mut collection = Collection::new("api", "");
        collection.register(empty("GET", "/health")).unwrap();

        let mut out = Vec::new();
        collection.write(&mut out, SchemaVersion::V210).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("{\n  \"info\""));
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["item"][0]["request"]["url"]["raw"], json!("{{base_url}}/health"));
    }

    #[test]
    fn write_to_file_round_trips() {
        let dir = tempfile::TempDir::new().unwrap();
        let target = dir.path().join("out/collection.json");

        let collection = Collection::new("api", "");
        collection.write_to_file(&target, SchemaVersion::V200).unwrap();

        let parsed: Value = serde_json::from_slice(&std::fs::read(&target).unwrap()).unwrap();
        assert_eq!(
            parsed["info"]["schema"],
            json!("https://schema.getpostman.com/json/collection/v2.0.0/collection.json")
        );
    }
}
