//! Field classification.
//!
//! Flattens a record shape into the sequence of fields the compiler routes:
//! declaration order, embedded records expanded depth-first at the point
//! where they are declared, non-exported fields dropped.

use postgen_define::{FieldDescriptor, RecordShape, TypeShape};

/// Lazily walks the fields of `shape`.
///
/// A pointer to a record is looked through once. Anything that is not a
/// record yields no fields.
///
/// ## Examples
///
/// ```
/// use postgen_define::{FieldDescriptor, RecordShape, TypeShape};
/// use postgen_gen::classify::walk_fields;
///
/// let base = RecordShape::builder("Base")
///     .field(FieldDescriptor::new("TenantID", TypeShape::String).query("tenant_id"))
///     .build();
///
/// let shape = RecordShape::builder("ListUsers")
///     .field(FieldDescriptor::new("Base", TypeShape::pointer(base)).embedded())
///     .field(FieldDescriptor::new("Page", TypeShape::Integer).query("page"))
///     .field(FieldDescriptor::new("secret", TypeShape::String).private())
///     .build();
///
/// let names: Vec<&str> = walk_fields(&shape).map(|f| f.name.as_str()).collect();
/// assert_eq!(names, ["TenantID", "Page"]);
/// ```
pub fn walk_fields(shape: &TypeShape) -> Fields<'_> {
    let stack = shape
        .as_record()
        .map(|record| vec![Frame { record, next: 0 }])
        .unwrap_or_default();

    Fields { stack }
}

#[derive(Debug, Clone, Copy)]
struct Frame<'a> {
    record: &'a RecordShape,
    next: usize,
}

/// Iterator returned by [`walk_fields`].
#[derive(Debug, Clone)]
pub struct Fields<'a> {
    stack: Vec<Frame<'a>>,
}

impl<'a> Iterator for Fields<'a> {
    type Item = &'a FieldDescriptor;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let frame = self.stack.last_mut()?;
            let record = frame.record;
            let Some(field) = record.fields.get(frame.next) else {
                self.stack.pop();
                continue;
            };
            frame.next += 1;

            if !field.exported {
                continue;
            }

            if field.embedded
                && let Some(inner) = field.shape.as_record()
            {
                tracing::trace!(record = %inner.name, within = %record.name, "expanding embedded record");
                self.stack.push(Frame {
                    record: inner,
                    next: 0,
                });
                continue;
            }

            tracing::trace!(field = %field.name, record = %record.name, "classified field");
            return Some(field);
        }
    }
}
