//! Request shape primitives.
//!
//! This crate provides the introspection surface used by `postgen-gen` to turn
//! annotated request types into collection entries. It knows nothing about
//! URLs or bodies; it only describes types.
//!
//! ## Core Types
//!
//! - [`TypeShape`] - Structural description of a type (pointer, record, sequence, scalar)
//! - [`RecordShape`] - A named record and its declared fields
//! - [`FieldDescriptor`] - One declared field with its routing tags, description and example
//! - [`RoutingTags`] / [`Role`] - Where a field is routed (json, form, formFile, query, param)
//! - [`Shaped`] - Trait implemented by types that can describe themselves
//!
//! ## Declaring Shapes
//!
//! With the `derive` feature (on by default):
//!
//! ```
//! use postgen_define::{Role, Shaped};
//!
//! #[derive(Shaped)]
//! pub struct GetUserRequest {
//!     #[postgen(param = "userId", example = "user-abc-123")]
//!     pub user_id: String,
//!     #[postgen(query = "format", description = "Response format")]
//!     pub format: Option<String>,
//! }
//!
//! let shape = GetUserRequest::shape();
//! let record = shape.as_record().unwrap();
//! assert_eq!(record.fields[0].key(Role::Param), "userId");
//! ```
//!
//! Or by hand, as an explicit field table:
//!
//! ```
//! use postgen_define::{FieldDescriptor, RecordShape, TypeShape};
//!
//! let shape = RecordShape::builder("GetUserRequest")
//!     .field(FieldDescriptor::new("user_id", TypeShape::String).param("userId"))
//!     .build();
//! ```

pub mod field;
pub mod prelude;
pub mod shape;
pub mod shaped;

pub use field::{FieldDescriptor, Role, RoutingTags, SENTINEL, is_meaningful};
pub use shape::{RecordBuilder, RecordShape, TypeShape};
pub use shaped::{ShapeContext, Shaped};

#[cfg(feature = "derive")]
pub use postgen_derive::Shaped;
