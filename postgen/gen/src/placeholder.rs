//! Placeholder resolution.
//!
//! Decides the literal example value rendered for a field. Precedence:
//!
//! 1. the field's explicit `example`, unless empty or `"-"`
//! 2. a caller-registered default, probed by the field's json, form,
//!    formFile, query and param keys in that order (first hit wins, whatever
//!    role the field is actually routed to)
//! 3. nothing; the caller falls back to a synthesized zero value

use std::collections::HashMap;

use postgen_define::{FieldDescriptor, Role, is_meaningful};
use strum::IntoEnumIterator;

/// Caller-registered placeholder values, keyed by field key.
///
/// Lookups are exact and role-agnostic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceholderDefaults {
    values: HashMap<String, String>,
}

impl PlaceholderDefaults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) the default for `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Probes the field's role keys in order and returns the first hit.
    pub fn probe<'a>(&'a self, field: &FieldDescriptor) -> Option<&'a str> {
        Role::iter().find_map(|role| self.get(field.key(role)))
    }
}

impl<K, V> FromIterator<(K, V)> for PlaceholderDefaults
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut defaults = Self::new();
        for (key, value) in iter {
            defaults.insert(key, value);
        }
        defaults
    }
}

/// Resolves the explicit placeholder for `field`, if there is one.
///
/// Returns `None` when neither an example nor a default applies, or when
/// the winning default is itself empty or `"-"`; the caller then synthesizes
/// a zero value.
///
/// ## Examples
///
/// ```
/// use postgen_define::{FieldDescriptor, TypeShape};
/// use postgen_gen::placeholder::{PlaceholderDefaults, resolve};
///
/// let defaults: PlaceholderDefaults = [("tenant_id", "default-tenant-001")].into_iter().collect();
///
/// let tenant = FieldDescriptor::new("TenantID", TypeShape::String).query("tenant_id");
/// assert_eq!(resolve(&tenant, &defaults), Some("default-tenant-001"));
///
/// let format = FieldDescriptor::new("Format", TypeShape::String)
///     .query("format")
///     .with_example("full");
/// assert_eq!(resolve(&format, &defaults), Some("full"));
/// ```
pub fn resolve<'a>(field: &'a FieldDescriptor, defaults: &'a PlaceholderDefaults) -> Option<&'a str> {
    if let Some(example) = field.explicit_example() {
        return Some(example);
    }

    defaults.probe(field).filter(|value| is_meaningful(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use postgen_define::TypeShape;

    fn defaults(pairs: &[(&str, &str)]) -> PlaceholderDefaults {
        pairs.iter().copied().collect()
    }

    #[test]
    fn example_beats_defaults() {
        let field = FieldDescriptor::new("Name", TypeShape::String)
            .json("name")
            .with_example("from-example");
        let defaults = defaults(&[("name", "from-default")]);
        assert_eq!(resolve(&field, &defaults), Some("from-example"));
    }

    #[test]
    fn sentinel_example_defers_to_defaults() {
        let field = FieldDescriptor::new("Name", TypeShape::String)
            .json("name")
            .with_example("-");
        let defaults = defaults(&[("name", "from-default")]);
        assert_eq!(resolve(&field, &defaults), Some("from-default"));
    }

    #[test]
    fn json_key_wins_over_query_key() {
        let field = FieldDescriptor::new("Id", TypeShape::String)
            .json("user_id")
            .query("uid");
        let defaults = defaults(&[("uid", "from-query"), ("user_id", "from-json")]);
        assert_eq!(resolve(&field, &defaults), Some("from-json"));
    }

    #[test]
    fn probe_order_is_json_form_file_query_param() {
        let field = FieldDescriptor::new("X", TypeShape::String)
            .form("f")
            .form_file("ff")
            .query("q")
            .param("p");

        assert_eq!(
            resolve(&field, &defaults(&[("p", "param"), ("q", "query")])),
            Some("query")
        );
        assert_eq!(
            resolve(&field, &defaults(&[("ff", "file"), ("q", "query")])),
            Some("file")
        );
        assert_eq!(
            resolve(&field, &defaults(&[("ff", "file"), ("f", "form")])),
            Some("form")
        );
    }

    #[test]
    fn inactive_roles_still_probe_declared_name() {
        // Routed only as a param, but a default keyed by the declared name
        // matches through the json probe.
        let field = FieldDescriptor::new("userId", TypeShape::String).param("uid");
        let defaults = defaults(&[("userId", "by-name")]);
        assert_eq!(resolve(&field, &defaults), Some("by-name"));
    }

    #[test]
    fn empty_winning_default_falls_through() {
        let field = FieldDescriptor::new("Name", TypeShape::String)
            .json("name")
            .query("q");
        let defaults = defaults(&[("name", ""), ("q", "later")]);
        assert_eq!(resolve(&field, &defaults), None);
    }

    #[test]
    fn nothing_matches() {
        let field = FieldDescriptor::new("Age", TypeShape::Integer).json("age");
        assert_eq!(resolve(&field, &PlaceholderDefaults::new()), None);
    }
}
