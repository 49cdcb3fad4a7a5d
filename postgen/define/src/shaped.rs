//! Compile-time type introspection.
//!
//! Rust has no runtime reflection, so request types describe themselves
//! through the [`Shaped`] trait. Implementations for the standard scalar and
//! container types live here; records implement it with `#[derive(Shaped)]`.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

use crate::field::FieldDescriptor;
use crate::shape::{RecordShape, TypeShape};

/// A type that can describe its own structure.
///
/// ## Examples
///
/// ```
/// use postgen_define::{Shaped, TypeShape};
///
/// assert_eq!(<Option<u32>>::shape(), TypeShape::pointer(TypeShape::Unsigned));
/// assert_eq!(<Vec<String>>::shape(), TypeShape::sequence(TypeShape::String));
/// ```
pub trait Shaped {
    /// Describes `Self`, using `cx` to cut cycles between records.
    fn describe(cx: &mut ShapeContext) -> TypeShape;

    /// Describes `Self` from a fresh context.
    fn shape() -> TypeShape {
        Self::describe(&mut ShapeContext::default())
    }
}

/// How many copies of one record may be open on a single path.
const MAX_SELF_NESTING: usize = 2;

/// Tracks which records are currently being described.
///
/// A record that (directly or through its fields) refers back to itself is
/// expanded one more time inside itself, so the nested copy keeps its field
/// list. References below that become opaque records with the same name and
/// no fields.
#[derive(Debug, Default)]
pub struct ShapeContext {
    in_progress: Vec<&'static str>,
}

impl ShapeContext {
    /// Describes a record type, guarding against self-reference.
    ///
    /// `key` identifies the Rust type (typically `std::any::type_name::<Self>()`),
    /// `name` is the display name stored in the shape.
    pub fn record<F>(&mut self, key: &'static str, name: &str, fields: F) -> TypeShape
    where
        F: FnOnce(&mut Self) -> Vec<FieldDescriptor>,
    {
        let open = self.in_progress.iter().filter(|k| **k == key).count();
        if open >= MAX_SELF_NESTING {
            return TypeShape::Record(RecordShape::opaque(name));
        }

        self.in_progress.push(key);
        let fields = fields(self);
        self.in_progress.pop();

        TypeShape::Record(RecordShape {
            name: name.to_string(),
            fields,
        })
    }

    /// Number of records currently being described.
    pub fn depth(&self) -> usize {
        self.in_progress.len()
    }
}

macro_rules! impl_scalar {
    ($variant:ident => $($ty:ty),+ $(,)?) => {
        $(
            impl Shaped for $ty {
                fn describe(_cx: &mut ShapeContext) -> TypeShape {
                    TypeShape::$variant
                }
            }
        )+
    };
}

impl_scalar!(Bool => bool);
impl_scalar!(Integer => i8, i16, i32, i64, i128, isize);
impl_scalar!(Unsigned => u8, u16, u32, u64, u128, usize);
impl_scalar!(Float => f32, f64);
impl_scalar!(String => String, str, char);
impl_scalar!(Any => serde_json::Value);

macro_rules! impl_pointer {
    ($($ptr:ident),+) => {
        $(
            impl<T: Shaped + ?Sized> Shaped for $ptr<T> {
                fn describe(cx: &mut ShapeContext) -> TypeShape {
                    TypeShape::pointer(T::describe(cx))
                }
            }
        )+
    };
}

impl_pointer!(Box, Rc, Arc);

impl<T: Shaped> Shaped for Option<T> {
    fn describe(cx: &mut ShapeContext) -> TypeShape {
        TypeShape::pointer(T::describe(cx))
    }
}

impl<T: Shaped + ?Sized> Shaped for &T {
    fn describe(cx: &mut ShapeContext) -> TypeShape {
        T::describe(cx)
    }
}

impl<T: Shaped> Shaped for Vec<T> {
    fn describe(cx: &mut ShapeContext) -> TypeShape {
        TypeShape::sequence(T::describe(cx))
    }
}

impl<T: Shaped> Shaped for VecDeque<T> {
    fn describe(cx: &mut ShapeContext) -> TypeShape {
        TypeShape::sequence(T::describe(cx))
    }
}

impl<T: Shaped> Shaped for [T] {
    fn describe(cx: &mut ShapeContext) -> TypeShape {
        TypeShape::sequence(T::describe(cx))
    }
}

impl<T: Shaped, const N: usize> Shaped for [T; N] {
    fn describe(cx: &mut ShapeContext) -> TypeShape {
        TypeShape::sequence(T::describe(cx))
    }
}

impl<V: Shaped, S> Shaped for HashMap<String, V, S> {
    fn describe(cx: &mut ShapeContext) -> TypeShape {
        TypeShape::map(V::describe(cx))
    }
}

impl<V: Shaped> Shaped for BTreeMap<String, V> {
    fn describe(cx: &mut ShapeContext) -> TypeShape {
        TypeShape::map(V::describe(cx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Node;

    impl Shaped for Node {
        fn describe(cx: &mut ShapeContext) -> TypeShape {
            cx.record(std::any::type_name::<Self>(), "Node", |cx| {
                vec![
                    FieldDescriptor::new("Label", String::describe(cx)).json("label"),
                    FieldDescriptor::new("Children", <Vec<Node>>::describe(cx)).json("children"),
                ]
            })
        }
    }

    #[test]
    fn scalars_map_to_primitive_kinds() {
        assert_eq!(bool::shape(), TypeShape::Bool);
        assert_eq!(i64::shape(), TypeShape::Integer);
        assert_eq!(u8::shape(), TypeShape::Unsigned);
        assert_eq!(f32::shape(), TypeShape::Float);
        assert_eq!(<&str>::shape(), TypeShape::String);
        assert_eq!(serde_json::Value::shape(), TypeShape::Any);
    }

    #[test]
    fn containers_wrap_their_element() {
        assert_eq!(
            <Box<Option<i32>>>::shape(),
            TypeShape::pointer(TypeShape::pointer(TypeShape::Integer))
        );
        assert_eq!(<[u8; 4]>::shape(), TypeShape::sequence(TypeShape::Unsigned));
        assert_eq!(
            <HashMap<String, bool>>::shape(),
            TypeShape::map(TypeShape::Bool)
        );
    }

    fn children_of(shape: &TypeShape) -> &TypeShape {
        let record = shape.as_record().unwrap();
        let TypeShape::Sequence { of } = &record.fields[1].shape else {
            panic!("Expected sequence of nodes");
        };
        of
    }

    #[test]
    fn self_reference_keeps_one_nested_copy() {
        let shape = Node::shape();
        assert_eq!(shape.as_record().unwrap().fields.len(), 2);

        // The nested node still has its fields.
        let nested = children_of(&shape);
        assert_eq!(nested.as_record().unwrap().name, "Node");
        assert_eq!(nested.as_record().unwrap().fields.len(), 2);

        // Below that the recursion is cut.
        assert_eq!(
            *children_of(nested),
            TypeShape::Record(RecordShape::opaque("Node"))
        );
    }

    #[test]
    fn context_is_balanced_after_describe() {
        let mut cx = ShapeContext::default();
        Node::describe(&mut cx);
        assert_eq!(cx.depth(), 0);
    }
}
