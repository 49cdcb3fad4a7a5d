//! Convenient re-exports for declaring request shapes.
//!
//! ```
//! use postgen_define::prelude::*;
//!
//! let shape = RecordShape::builder("Ping").build();
//! assert!(shape.as_record().is_some());
//! ```

pub use crate::field::{FieldDescriptor, Role, RoutingTags};
pub use crate::shape::{RecordShape, TypeShape};
pub use crate::shaped::{ShapeContext, Shaped};
