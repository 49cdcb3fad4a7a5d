//! Zero-value synthesis.
//!
//! When a field has neither an example nor a default, the generated request
//! still shows a value of the right type. Two variants exist:
//!
//! - native (`prefer_string = false`): used for JSON body slots, keeps JSON
//!   types (`0`, `false`, `{...}`)
//! - string-preferring (`prefer_string = true`): used for query, path and form
//!   slots, which are rendered as text; records become their JSON encoding

use postgen_define::{RoutingTags, Role, SENTINEL, TypeShape};
use serde_json::{Map, Value};

use crate::classify::walk_fields;

/// Synthesizes a representative value for `shape`.
///
/// - pointers are looked through
/// - records, when `prefer_string`, become their zero value encoded as a JSON string
/// - sequences become a one-element array holding the element's synthesized value
/// - everything else is the natural zero value (see [`natural_zero`])
///
/// ## Examples
///
/// ```
/// use postgen_define::TypeShape;
/// use postgen_gen::zero::zero_value;
/// use serde_json::json;
///
/// assert_eq!(zero_value(&TypeShape::Integer, false), json!(0));
/// assert_eq!(zero_value(&TypeShape::pointer(TypeShape::Bool), true), json!(false));
/// assert_eq!(zero_value(&TypeShape::sequence(TypeShape::String), false), json!([""]));
/// ```
pub fn zero_value(shape: &TypeShape, prefer_string: bool) -> Value {
    match shape {
        TypeShape::Pointer { of } => zero_value(of, prefer_string),
        TypeShape::Record(_) if prefer_string => Value::String(natural_zero(shape).to_string()),
        TypeShape::Sequence { of } => Value::Array(vec![zero_value(of, prefer_string)]),
        other => natural_zero(other),
    }
}

/// The zero value `shape` would serialize to.
///
/// Pointers and `Any` are `null`, sequences are empty, maps are empty
/// objects. A record is an object holding the natural zero of each exported
/// field under its JSON name; embedded records are flattened and fields
/// tagged `json:"-"` are left out.
pub fn natural_zero(shape: &TypeShape) -> Value {
    match shape {
        TypeShape::Bool => Value::Bool(false),
        TypeShape::Integer | TypeShape::Unsigned => Value::from(0),
        TypeShape::Float => Value::from(0.0),
        TypeShape::String => Value::String(String::new()),
        TypeShape::Any | TypeShape::Pointer { .. } => Value::Null,
        TypeShape::Sequence { .. } => Value::Array(Vec::new()),
        TypeShape::Map { .. } => Value::Object(Map::new()),
        TypeShape::Record(_) => {
            let mut object = Map::new();
            for field in walk_fields(shape) {
                if let Some(key) = json_name(&field.tags, &field.name) {
                    object.insert(key.to_string(), natural_zero(&field.shape));
                }
            }
            Value::Object(object)
        }
    }
}

/// The name a field takes in a serialized record, or `None` if it is omitted.
fn json_name<'a>(tags: &'a RoutingTags, declared: &'a str) -> Option<&'a str> {
    match tags.get(Role::Json) {
        Some(tag) if tag == SENTINEL => None,
        _ => Some(tags.key(Role::Json, declared)),
    }
}

/// Renders a synthesized value for a text slot.
///
/// Strings are used verbatim and `null` renders empty. Floats print like
/// numbers in a URL (`0`, `2.5`), other scalars use their JSON text and
/// composites their compact JSON encoding.
///
/// ```
/// use postgen_gen::zero::render;
/// use serde_json::json;
///
/// assert_eq!(render(&json!("abc")), "abc");
/// assert_eq!(render(&json!(0)), "0");
/// assert_eq!(render(&json!(false)), "false");
/// assert_eq!(render(&json!(null)), "");
/// assert_eq!(render(&json!([0])), "[0]");
/// ```
pub fn render(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        Value::Number(number) if number.is_f64() => number
            .as_f64()
            .map_or_else(|| number.to_string(), |float| float.to_string()),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use postgen_define::{FieldDescriptor, RecordShape};
    use serde_json::json;

    fn address() -> TypeShape {
        RecordShape::builder("Address")
            .field(FieldDescriptor::new("Street", TypeShape::String).json("street"))
            .field(FieldDescriptor::new("Zip", TypeShape::Unsigned))
            .field(FieldDescriptor::new("Internal", TypeShape::String).json("-"))
            .field(FieldDescriptor::new("geo", TypeShape::Float).private())
            .build()
    }

    #[test]
    fn primitives_have_natural_zeros() {
        assert_eq!(zero_value(&TypeShape::Bool, false), json!(false));
        assert_eq!(zero_value(&TypeShape::Unsigned, false), json!(0));
        assert_eq!(zero_value(&TypeShape::Float, false), json!(0.0));
        assert_eq!(zero_value(&TypeShape::String, true), json!(""));
        assert_eq!(zero_value(&TypeShape::Any, true), Value::Null);
        assert_eq!(zero_value(&TypeShape::map(TypeShape::Integer), false), json!({}));
    }

    #[test]
    fn record_zero_uses_json_names() {
        assert_eq!(
            zero_value(&address(), false),
            json!({ "street": "", "Zip": 0 })
        );
    }

    #[test]
    fn record_zero_prefers_string_encoding_for_text_slots() {
        let value = zero_value(&TypeShape::pointer(address()), true);
        assert_eq!(value, json!(r#"{"Zip":0,"street":""}"#));
    }

    #[test]
    fn sequence_gets_one_representative_element() {
        let shape = TypeShape::sequence(address());
        assert_eq!(
            zero_value(&shape, false),
            json!([{ "street": "", "Zip": 0 }])
        );
        assert_eq!(
            zero_value(&shape, true),
            json!([r#"{"Zip":0,"street":""}"#])
        );
    }

    #[test]
    fn nested_sequences_recurse() {
        let shape = TypeShape::sequence(TypeShape::sequence(TypeShape::Integer));
        assert_eq!(zero_value(&shape, false), json!([[0]]));
    }

    #[test]
    fn natural_zero_of_nested_containers_is_empty() {
        let shape = RecordShape::builder("Outer")
            .field(FieldDescriptor::new("Tags", TypeShape::sequence(TypeShape::String)).json("tags"))
            .field(FieldDescriptor::new("Parent", TypeShape::pointer(address())).json("parent"))
            .field(FieldDescriptor::new("Address", address()).embedded())
            .build();

        assert_eq!(
            natural_zero(&shape),
            json!({ "tags": [], "parent": null, "street": "", "Zip": 0 })
        );
    }

    #[test]
    fn render_composites_as_compact_json() {
        assert_eq!(render(&json!([""])), r#"[""]"#);
        assert_eq!(render(&json!({ "a": 1 })), r#"{"a":1}"#);
    }

    #[test]
    fn render_floats_without_a_zero_fraction() {
        assert_eq!(render(&zero_value(&TypeShape::Float, true)), "0");
        assert_eq!(render(&json!(2.5)), "2.5");
        assert_eq!(render(&json!(-3)), "-3");
    }
}
