//! Postman collection wire format.
//!
//! Serializable mirror of the subset of the Postman collection schema the
//! generator emits. Two schema versions are supported; they differ in how
//! auth parameters and URLs are written:
//!
//! | | v2.0.0 | v2.1.0 |
//! |---|---|---|
//! | `auth.bearer` | `{ "token": "{{token}}" }` | `[{ "key": "token", "value": "{{token}}", "type": "string" }]` |
//! | `request.url` | raw string | object with `raw`, `host`, `path`, `query`, `variable` |

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use strum::{Display, EnumString};

use crate::request::{CompiledRequest, RequestBody, UrlParam};

/// Collection schema version.
///
/// ```
/// use std::str::FromStr;
/// use postgen_gen::postman::SchemaVersion;
///
/// assert_eq!(SchemaVersion::from_str("v2.1").unwrap(), SchemaVersion::V210);
/// assert_eq!(SchemaVersion::V200.to_string(), "v2.0.0");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
pub enum SchemaVersion {
    #[strum(to_string = "v2.0.0", serialize = "v2.0", serialize = "2.0.0", serialize = "2.0")]
    V200,
    #[default]
    #[strum(to_string = "v2.1.0", serialize = "v2.1", serialize = "2.1.0", serialize = "2.1")]
    V210,
}

impl SchemaVersion {
    /// The `info.schema` URL for this version.
    pub fn schema_url(self) -> String {
        format!(
            "https://schema.getpostman.com/json/collection/{}/collection.json",
            self
        )
    }
}

/// Top-level collection document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostmanCollection {
    pub info: Info,
    pub item: Vec<Item>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth: Option<Auth>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub variable: Vec<Variable>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Info {
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub schema: String,
}

/// A folder or a request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Item {
    Folder(Folder),
    Request(RequestItem),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Folder {
    pub name: String,
    pub item: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestItem {
    pub name: String,
    pub request: Request,
    /// Saved example responses; always empty.
    pub response: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Request {
    pub method: String,
    pub header: Vec<HeaderEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Body>,
    pub url: Url,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderEntry {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Url {
    Raw(String),
    Structured(UrlObject),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UrlObject {
    pub raw: String,
    pub host: Vec<String>,
    pub path: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub query: Vec<QueryParam>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub variable: Vec<Variable>,
}

/// Query parameters always carry a description, possibly empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryParam {
    pub key: String,
    pub value: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Variable {
    pub key: String,
    pub value: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
}

impl Variable {
    pub fn string(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            kind: "string".to_string(),
            description: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Body {
    Raw { raw: String, options: BodyOptions },
    Formdata { formdata: Vec<FormDataEntry> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodyOptions {
    pub raw: RawOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawOptions {
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormDataEntry {
    pub key: String,
    pub value: String,
    /// `text` or `file`.
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Auth {
    #[serde(rename = "type")]
    pub kind: String,
    pub bearer: AuthParams,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AuthParams {
    List(Vec<Variable>),
    Map(BTreeMap<String, String>),
}

impl Auth {
    /// Bearer auth whose token comes from the collection variable `token_variable`.
    pub fn bearer(token_variable: &str, version: SchemaVersion) -> Self {
        let value = format!("{{{{{}}}}}", token_variable);
        let bearer = match version {
            SchemaVersion::V200 => AuthParams::Map(BTreeMap::from([("token".to_string(), value)])),
            SchemaVersion::V210 => AuthParams::List(vec![Variable::string("token", value)]),
        };
        Self {
            kind: "bearer".to_string(),
            bearer,
        }
    }
}

impl Request {
    /// Converts a compiled request into its wire form.
    pub fn from_compiled(request: &CompiledRequest, version: SchemaVersion) -> Self {
        let url = match version {
            SchemaVersion::V200 => Url::Raw(request.url.raw.clone()),
            SchemaVersion::V210 => Url::Structured(UrlObject {
                raw: request.url.raw.clone(),
                host: request.url.host.clone(),
                path: request.url.path.clone(),
                query: request.url.query.iter().map(query_param).collect(),
                variable: request.url.variables.iter().map(path_variable).collect(),
            }),
        };

        let body = match &request.body {
            RequestBody::None => None,
            RequestBody::Json { raw, .. } => Some(Body::Raw {
                raw: raw.clone(),
                options: BodyOptions {
                    raw: RawOptions {
                        language: "json".to_string(),
                    },
                },
            }),
            RequestBody::Form(params) => Some(Body::Formdata {
                formdata: params
                    .iter()
                    .map(|param| FormDataEntry {
                        key: param.key.clone(),
                        value: param.value.clone(),
                        kind: param.kind.to_string(),
                        description: param.description.clone(),
                    })
                    .collect(),
            }),
        };

        Self {
            method: request.method.clone(),
            header: request
                .headers
                .iter()
                .map(|header| HeaderEntry {
                    key: header.key.clone(),
                    value: header.value.clone(),
                })
                .collect(),
            body,
            url,
        }
    }
}

fn query_param(param: &UrlParam) -> QueryParam {
    QueryParam {
        key: param.key.clone(),
        value: param.value.clone(),
        description: param.description.clone(),
    }
}

fn path_variable(param: &UrlParam) -> Variable {
    Variable {
        description: param.description.clone(),
        ..Variable::string(param.key.as_str(), param.value.as_str())
    }
}
