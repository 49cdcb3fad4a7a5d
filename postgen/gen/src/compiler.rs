//! Request compilation.
//!
//! Turns a [`Registration`] (method, path template and request shape) into a
//! [`CompiledRequest`]: URL with path variables and query parameters,
//! headers, and a JSON or multipart body.
//!
//! ## Field routing
//!
//! Each classified field with at least one active routing tag is visited
//! once. Its placeholder is resolved (example, then caller default), falling
//! back to a synthesized zero value. The JSON slot keeps native JSON types
//! for synthesized values; every other slot receives text.
//!
//! ## Body selection
//!
//! Any form or formFile field makes the body multipart; otherwise any JSON
//! field makes it JSON; otherwise there is no body and no content type.

use postgen_define::{Role, Shaped, TypeShape};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{Display, EnumString};
use tracing::{debug, trace, warn};

use crate::classify::walk_fields;
use crate::errors::GeneratorError;
use crate::parser::{BASE_URL, path_variable, raw_url, split_path};
use crate::placeholder::{PlaceholderDefaults, resolve};
use crate::request::{
    CompiledRequest, FormParam, FormParamKind, Header, RequestBody, RequestUrl, UrlParam,
};
use crate::zero::{render, zero_value};

/// Strongly-typed registration argument.
#[derive(Debug, Clone, PartialEq)]
pub struct Registration {
    /// Free-form HTTP method (e.g. `"GET"`).
    pub method: String,
    /// Path template with `:variable` segments.
    pub path: String,
    /// Shape of the request record.
    pub shape: TypeShape,
}

impl Registration {
    pub fn new(method: impl Into<String>, path: impl Into<String>, shape: TypeShape) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            shape,
        }
    }

    /// Registration for a type that describes itself.
    pub fn of<T: Shaped + ?Sized>(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(method, path, T::shape())
    }
}

/// What to do with a `:variable` segment that no `param` field matches.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PathVariablePolicy {
    /// Emit the variable with its literal segment (`:name`) as value.
    #[default]
    Literal,
    /// Fail with [`GeneratorError::UnmatchedPathVariable`].
    Reject,
}

/// Compiles one registration.
///
/// ## Examples
///
/// ```
/// use postgen_define::{FieldDescriptor, RecordShape, TypeShape};
/// use postgen_gen::compiler::{PathVariablePolicy, Registration, compile};
/// use postgen_gen::placeholder::PlaceholderDefaults;
///
/// let shape = RecordShape::builder("GetUser")
///     .field(FieldDescriptor::new("UserID", TypeShape::String).param("userId").with_example("abc"))
///     .build();
///
/// let request = compile(
///     &Registration::new("GET", "/users/:userId", shape),
///     &PlaceholderDefaults::new(),
///     PathVariablePolicy::Literal,
/// ).unwrap();
///
/// assert_eq!(request.url.raw, "{{base_url}}/users/:userId");
/// assert_eq!(request.url.variables[0].value, "abc");
/// ```
///
/// ## Errors
///
/// - `GeneratorError::InvalidRegistration` for an empty or whitespace-bearing method,
///   a path without segments, or a shape that is not a record
/// - `GeneratorError::UnmatchedPathVariable` under [`PathVariablePolicy::Reject`]
/// - `GeneratorError::BodySerialization` if the JSON body cannot be encoded
pub fn compile(
    registration: &Registration,
    defaults: &PlaceholderDefaults,
    policy: PathVariablePolicy,
) -> Result<CompiledRequest, GeneratorError> {
    let method = validate_method(&registration.method)?;
    if registration.shape.as_record().is_none() {
        return Err(GeneratorError::InvalidRegistration(format!(
            "request shape for {} {} must be a record or pointer to record",
            method, registration.path
        )));
    }
    let segments = split_path(&registration.path)?;

    let mut json_fields = Map::new();
    let mut form_params = Vec::new();
    let mut query_params = Vec::new();
    let mut param_candidates: Vec<UrlParam> = Vec::new();

    for field in walk_fields(&registration.shape) {
        let tags = &field.tags;
        if !tags.any_active() {
            trace!(field = %field.name, "field has no routing tag");
            continue;
        }

        let resolved = resolve(field, defaults);

        if tags.is_active(Role::Json) {
            let value = match resolved {
                Some(text) => Value::String(text.to_string()),
                None => zero_value(&field.shape, false),
            };
            json_fields.insert(field.key(Role::Json).to_string(), value);
        }

        let display = match resolved {
            Some(text) => text.to_string(),
            None => render(&zero_value(&field.shape, true)),
        };

        for (role, kind) in [
            (Role::Form, FormParamKind::Text),
            (Role::FormFile, FormParamKind::File),
        ] {
            if tags.is_active(role) {
                form_params.push(FormParam {
                    key: field.key(role).to_string(),
                    value: display.clone(),
                    kind,
                    description: field.description.clone(),
                });
            }
        }

        if tags.is_active(Role::Query) {
            query_params.push(UrlParam::new(
                field.key(Role::Query),
                display.clone(),
                field.description.clone(),
            ));
        }

        if tags.is_active(Role::Param) {
            param_candidates.push(UrlParam::new(
                field.key(Role::Param),
                display,
                field.description.clone(),
            ));
        }
    }

    let variables = bind_path_variables(&registration.path, &segments, &param_candidates, policy)?;

    let mut headers = Vec::new();
    let body = if !form_params.is_empty() {
        headers.push(Header::new("Content-Type", "multipart/form-data"));
        RequestBody::Form(form_params)
    } else if !json_fields.is_empty() {
        let raw = serde_json::to_string_pretty(&json_fields).map_err(GeneratorError::BodySerialization)?;
        headers.push(Header::new("Content-Type", "application/json"));
        RequestBody::Json {
            fields: json_fields,
            raw,
        }
    } else {
        RequestBody::None
    };

    let name = segments.last().cloned().unwrap_or_default();

    debug!(
        method = %method,
        path = %registration.path,
        name = %name,
        mode = %body.mode(),
        "compiled request"
    );

    Ok(CompiledRequest {
        name,
        method: method.to_string(),
        url: RequestUrl {
            raw: raw_url(&segments),
            host: vec![BASE_URL.to_string()],
            path: segments,
            query: query_params,
            variables,
        },
        headers,
        body,
    })
}

fn validate_method(method: &str) -> Result<&str, GeneratorError> {
    let trimmed = method.trim();
    if trimmed.is_empty() {
        return Err(GeneratorError::InvalidRegistration("method must not be empty".to_string()));
    }
    if trimmed.chars().any(char::is_whitespace) {
        return Err(GeneratorError::InvalidRegistration(format!(
            "method '{}' must not contain whitespace",
            method
        )));
    }
    Ok(trimmed)
}

/// Emits one URL variable per `:variable` segment.
///
/// A matching `param` field supplies value and description; otherwise the
/// policy decides between the literal segment and an error.
fn bind_path_variables(
    path: &str,
    segments: &[String],
    candidates: &[UrlParam],
    policy: PathVariablePolicy,
) -> Result<Vec<UrlParam>, GeneratorError> {
    let mut variables = Vec::new();

    for segment in segments {
        let Some(key) = path_variable(segment) else {
            continue;
        };

        match candidates.iter().find(|candidate| candidate.key == key) {
            Some(candidate) => variables.push(candidate.clone()),
            None => match policy {
                PathVariablePolicy::Literal => {
                    warn!(path = %path, variable = %key, "no param field for path variable; using literal segment");
                    variables.push(UrlParam::new(key, segment.as_str(), ""));
                }
                PathVariablePolicy::Reject => {
                    return Err(GeneratorError::UnmatchedPathVariable {
                        path: path.to_string(),
                        variable: key.to_string(),
                    });
                }
            },
        }
    }

    Ok(variables)
}
