//! Compiled request model.
//!
//! The output of the compiler: one fully resolved endpoint with its URL,
//! headers and body, independent of any particular collection format.

use serde_json::{Map, Value};
use strum::{Display, EnumString};

/// A compiled endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledRequest {
    /// Display name; the last path segment.
    pub name: String,
    /// HTTP method, as registered.
    pub method: String,
    pub url: RequestUrl,
    pub headers: Vec<Header>,
    pub body: RequestBody,
}

impl CompiledRequest {
    /// The URL path segments (variables kept as `:name`).
    pub fn path_segments(&self) -> &[String] {
        &self.url.path
    }

    /// Value of the `Content-Type` header, if one was emitted.
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .iter()
            .find(|header| header.key.eq_ignore_ascii_case("content-type"))
            .map(|header| header.value.as_str())
    }
}

/// URL of a compiled request.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RequestUrl {
    /// `{{base_url}}` followed by the joined path segments.
    pub raw: String,
    pub host: Vec<String>,
    pub path: Vec<String>,
    pub query: Vec<UrlParam>,
    /// One entry per `:variable` segment, in path order.
    pub variables: Vec<UrlParam>,
}

/// A query parameter or path variable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UrlParam {
    pub key: String,
    pub value: String,
    pub description: String,
}

impl UrlParam {
    pub fn new(key: impl Into<String>, value: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            description: description.into(),
        }
    }
}

/// A request header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub key: String,
    pub value: String,
}

impl Header {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// How the body is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum BodyMode {
    None,
    Json,
    Form,
}

/// Request body.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestBody {
    /// No body and no content type.
    #[default]
    None,
    /// A JSON object.
    Json {
        /// Field values keyed by JSON key.
        fields: Map<String, Value>,
        /// `fields` pretty-printed with two-space indentation.
        raw: String,
    },
    /// A multipart form.
    Form(Vec<FormParam>),
}

impl RequestBody {
    pub fn mode(&self) -> BodyMode {
        match self {
            Self::None => BodyMode::None,
            Self::Json { .. } => BodyMode::Json,
            Self::Form(_) => BodyMode::Form,
        }
    }
}

/// Kind of a multipart form part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum FormParamKind {
    Text,
    /// The value is a display placeholder, not file contents.
    File,
}

/// One multipart form part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormParam {
    pub key: String,
    pub value: String,
    pub kind: FormParamKind,
    pub description: String,
}
