//! Field descriptors and routing tags.
//!
//! Every declared field of a record carries up to five routing tags, one per
//! [`Role`]. A tag decides which part of a generated request the field lands
//! in; its value is the key used there.
//!
//! ## Tag semantics
//!
//! - A tag is **active** when it is present, non-empty and not `"-"`.
//! - The **key** for a role is the tag value, falling back to the field's
//!   declared name when the tag is absent, empty or `"-"`. Keys are computed
//!   for every role, active or not, because placeholder defaults are probed
//!   across all five of them.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::shape::TypeShape;

/// Value that marks a tag or example as explicitly unset.
pub const SENTINEL: &str = "-";

/// Returns `true` if `value` is neither empty nor the `"-"` sentinel.
pub fn is_meaningful(value: &str) -> bool {
    !value.is_empty() && value != SENTINEL
}

/// The part of a request a field can be routed to.
///
/// Iteration order is the placeholder-default probe order:
/// json, form, formFile, query, param.
///
/// ```
/// use postgen_define::Role;
/// use strum::IntoEnumIterator;
///
/// let order: Vec<String> = Role::iter().map(|r| r.to_string()).collect();
/// assert_eq!(order, ["json", "form", "formFile", "query", "param"]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "camelCase")]
pub enum Role {
    /// A key in the JSON body.
    Json,
    /// A text part of a multipart form.
    Form,
    /// A file part of a multipart form.
    FormFile,
    /// A URL query parameter.
    Query,
    /// A URL path variable.
    Param,
}

/// Per-role tag values for one field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingTags {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form: Option<String>,
    #[serde(
        default,
        rename = "formFile",
        alias = "form_file",
        skip_serializing_if = "Option::is_none"
    )]
    pub form_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
}

impl RoutingTags {
    /// The raw tag value for `role`, if any.
    pub fn get(&self, role: Role) -> Option<&str> {
        match role {
            Role::Json => self.json.as_deref(),
            Role::Form => self.form.as_deref(),
            Role::FormFile => self.form_file.as_deref(),
            Role::Query => self.query.as_deref(),
            Role::Param => self.param.as_deref(),
        }
    }

    /// Sets the tag value for `role`.
    pub fn set(&mut self, role: Role, value: impl Into<String>) {
        let slot = match role {
            Role::Json => &mut self.json,
            Role::Form => &mut self.form,
            Role::FormFile => &mut self.form_file,
            Role::Query => &mut self.query,
            Role::Param => &mut self.param,
        };
        *slot = Some(value.into());
    }

    /// Whether the field is routed to `role`.
    pub fn is_active(&self, role: Role) -> bool {
        self.get(role).is_some_and(is_meaningful)
    }

    /// Whether the field is routed anywhere at all.
    pub fn any_active(&self) -> bool {
        Role::iter().any(|role| self.is_active(role))
    }

    /// The key used for `role`, defaulting to `declared_name`.
    ///
    /// ```
    /// use postgen_define::{Role, RoutingTags};
    ///
    /// let mut tags = RoutingTags::default();
    /// tags.set(Role::Json, "user_name");
    /// tags.set(Role::Query, "-");
    ///
    /// assert_eq!(tags.key(Role::Json, "UserName"), "user_name");
    /// assert_eq!(tags.key(Role::Query, "UserName"), "UserName");
    /// assert_eq!(tags.key(Role::Param, "UserName"), "UserName");
    /// ```
    pub fn key<'a>(&'a self, role: Role, declared_name: &'a str) -> &'a str {
        match self.get(role) {
            Some(value) if is_meaningful(value) => value,
            _ => declared_name,
        }
    }
}

/// Everything the generator knows about one declared field.
///
/// ## Examples
///
/// ```
/// use postgen_define::{FieldDescriptor, Role, TypeShape};
///
/// let field = FieldDescriptor::new("UserID", TypeShape::String)
///     .param("userId")
///     .with_description("ID of the user to retrieve")
///     .with_example("user-abc-123");
///
/// assert!(field.tags.is_active(Role::Param));
/// assert!(!field.tags.is_active(Role::Json));
/// assert_eq!(field.key(Role::Json), "UserID");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Name as declared on the record.
    pub name: String,
    #[serde(flatten)]
    pub tags: RoutingTags,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Explicit example value; empty or `"-"` means none.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub example: String,
    /// Non-exported fields are invisible to the generator.
    #[serde(default = "default_exported")]
    pub exported: bool,
    /// Embedded records are expanded in place of the field.
    #[serde(default)]
    pub embedded: bool,
    #[serde(rename = "type")]
    pub shape: TypeShape,
}

fn default_exported() -> bool {
    true
}

impl FieldDescriptor {
    /// An exported, untagged field.
    pub fn new(name: impl Into<String>, shape: TypeShape) -> Self {
        Self {
            name: name.into(),
            tags: RoutingTags::default(),
            description: String::new(),
            example: String::new(),
            exported: true,
            embedded: false,
            shape,
        }
    }

    /// Sets the tag for `role`.
    pub fn tag(mut self, role: Role, value: impl Into<String>) -> Self {
        self.tags.set(role, value);
        self
    }

    pub fn json(self, key: impl Into<String>) -> Self {
        self.tag(Role::Json, key)
    }

    pub fn form(self, key: impl Into<String>) -> Self {
        self.tag(Role::Form, key)
    }

    pub fn form_file(self, key: impl Into<String>) -> Self {
        self.tag(Role::FormFile, key)
    }

    pub fn query(self, key: impl Into<String>) -> Self {
        self.tag(Role::Query, key)
    }

    pub fn param(self, key: impl Into<String>) -> Self {
        self.tag(Role::Param, key)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.example = example.into();
        self
    }

    /// Marks the field as not exported.
    pub fn private(mut self) -> Self {
        self.exported = false;
        self
    }

    /// Marks the field as an embedded record.
    pub fn embedded(mut self) -> Self {
        self.embedded = true;
        self
    }

    /// The key this field uses for `role`.
    pub fn key(&self, role: Role) -> &str {
        self.tags.key(role, &self.name)
    }

    /// The explicit example, if one is set.
    pub fn explicit_example(&self) -> Option<&str> {
        is_meaningful(&self.example).then_some(self.example.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn sentinel_and_empty_tags_are_inactive() {
        let field = FieldDescriptor::new("Name", TypeShape::String)
            .json("-")
            .form("");
        assert!(!field.tags.is_active(Role::Json));
        assert!(!field.tags.is_active(Role::Form));
        assert!(!field.tags.any_active());
    }

    #[test]
    fn keys_fall_back_to_declared_name() {
        let field = FieldDescriptor::new("TenantID", TypeShape::String).query("tenant_id");
        assert_eq!(field.key(Role::Query), "tenant_id");
        assert_eq!(field.key(Role::Json), "TenantID");
        assert_eq!(field.key(Role::FormFile), "TenantID");
    }

    #[test]
    fn explicit_example_ignores_sentinel() {
        let field = FieldDescriptor::new("A", TypeShape::String).with_example("-");
        assert_eq!(field.explicit_example(), None);

        let field = FieldDescriptor::new("A", TypeShape::String).with_example("abc");
        assert_eq!(field.explicit_example(), Some("abc"));
    }

    #[test]
    fn role_parses_from_tag_name() {
        assert_eq!(Role::from_str("formFile").unwrap(), Role::FormFile);
        assert_eq!(Role::from_str("param").unwrap(), Role::Param);
        assert!(Role::from_str("header").is_err());
    }

    #[test]
    fn form_file_tag_accepts_both_spellings() {
        let camel: RoutingTags = serde_json::from_str(r#"{"formFile":"avatar"}"#).unwrap();
        let snake: RoutingTags = serde_json::from_str(r#"{"form_file":"avatar"}"#).unwrap();
        assert_eq!(camel, snake);
        assert_eq!(camel.form_file.as_deref(), Some("avatar"));
    }
}
