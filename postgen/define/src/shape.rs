//! Type descriptors for request shapes.
//!
//! A [`TypeShape`] is the introspection surface the generator works against.
//! It answers the handful of questions needed to classify a field and to
//! synthesize an example value for it:
//!
//! - is this a pointer (and what does it point to)?
//! - is this a record (and what are its fields)?
//! - is this a sequence (and of what)?
//! - otherwise, which primitive is it?
//!
//! Shapes are plain data. They can be produced by the [`Shaped`](crate::Shaped)
//! trait (usually via `#[derive(Shaped)]`), assembled by hand with
//! [`RecordShape::builder`], or deserialized from a manifest file.

use serde::{Deserialize, Serialize};

use crate::field::FieldDescriptor;

/// Structural description of a type.
///
/// The serialized form is internally tagged on `kind`, which keeps manifest
/// files readable:
///
/// ```
/// use postgen_define::TypeShape;
///
/// let shape: TypeShape = serde_json::from_str(
///     r#"{ "kind": "sequence", "of": { "kind": "integer" } }"#,
/// ).unwrap();
///
/// assert_eq!(shape, TypeShape::sequence(TypeShape::Integer));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeShape {
    /// `true` / `false`
    Bool,
    /// Signed integers of any width.
    Integer,
    /// Unsigned integers of any width.
    Unsigned,
    /// Floating point numbers.
    Float,
    /// Text.
    String,
    /// Arbitrary JSON; no structure is known.
    Any,
    /// An optional or indirect value (`Option<T>`, `Box<T>`, ...).
    Pointer {
        /// The pointee.
        of: Box<TypeShape>,
    },
    /// An ordered collection of elements.
    Sequence {
        /// The element type.
        of: Box<TypeShape>,
    },
    /// A string-keyed map.
    Map {
        /// The value type.
        of: Box<TypeShape>,
    },
    /// A composite type with named fields.
    Record(RecordShape),
}

impl TypeShape {
    /// Wraps `shape` in a pointer.
    pub fn pointer(shape: TypeShape) -> Self {
        Self::Pointer { of: Box::new(shape) }
    }

    /// A sequence of `shape`.
    pub fn sequence(shape: TypeShape) -> Self {
        Self::Sequence { of: Box::new(shape) }
    }

    /// A string-keyed map with values of `shape`.
    pub fn map(shape: TypeShape) -> Self {
        Self::Map { of: Box::new(shape) }
    }

    /// Returns `true` for the scalar kinds (including [`TypeShape::Any`]).
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            Self::Bool | Self::Integer | Self::Unsigned | Self::Float | Self::String | Self::Any
        )
    }

    /// Returns `true` if this is a pointer.
    pub fn is_pointer(&self) -> bool {
        matches!(self, Self::Pointer { .. })
    }

    /// Returns `true` if this is a sequence.
    pub fn is_sequence(&self) -> bool {
        matches!(self, Self::Sequence { .. })
    }

    /// Removes exactly one level of pointer indirection.
    ///
    /// ```
    /// use postgen_define::TypeShape;
    ///
    /// let nested = TypeShape::pointer(TypeShape::pointer(TypeShape::Bool));
    /// assert_eq!(nested.deref_pointer(), &TypeShape::pointer(TypeShape::Bool));
    /// assert_eq!(TypeShape::Bool.deref_pointer(), &TypeShape::Bool);
    /// ```
    pub fn deref_pointer(&self) -> &TypeShape {
        match self {
            Self::Pointer { of } => of,
            other => other,
        }
    }

    /// Returns the record behind this shape, looking through one pointer.
    pub fn as_record(&self) -> Option<&RecordShape> {
        match self.deref_pointer() {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }
}

/// A named composite type and its declared fields, in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordShape {
    /// Type name, used for cycle detection when expanding embedded records.
    pub name: String,
    /// Declared fields.
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
}

impl RecordShape {
    /// A record with no fields.
    ///
    /// Also used as the stand-in for a record that refers back to itself.
    pub fn opaque(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Starts an explicit field table for a record.
    ///
    /// ## Examples
    ///
    /// ```
    /// use postgen_define::{FieldDescriptor, RecordShape, TypeShape};
    ///
    /// let shape = RecordShape::builder("CreateUser")
    ///     .field(FieldDescriptor::new("Username", TypeShape::String).json("username"))
    ///     .field(FieldDescriptor::new("Age", TypeShape::Integer).json("age"))
    ///     .build();
    ///
    /// let record = shape.as_record().unwrap();
    /// assert_eq!(record.fields.len(), 2);
    /// ```
    pub fn builder(name: impl Into<String>) -> RecordBuilder {
        RecordBuilder {
            record: Self::opaque(name),
        }
    }
}

/// Builder for hand-written field tables.
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    record: RecordShape,
}

impl RecordBuilder {
    /// Appends a field.
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.record.fields.push(field);
        self
    }

    /// Finishes the record as a [`TypeShape`].
    pub fn build(self) -> TypeShape {
        TypeShape::Record(self.record)
    }
}
