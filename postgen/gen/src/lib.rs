//! Postman collection generator library.
//!
//! This crate compiles request shapes described with `postgen-define` into a
//! Postman collection. Each registered endpoint becomes one request whose
//! URL, query parameters, path variables and body are derived from the
//! routing tags on its fields.
//!
//! ## Pipeline
//!
//! 1. [`classify`] walks a record's exported fields, expanding embedded records
//! 2. [`placeholder`] resolves an example value per field from its explicit
//!    example or the collection's placeholder defaults
//! 3. [`zero`] synthesizes a typed default for fields nothing resolves
//! 4. [`compiler`] assembles a [`request::CompiledRequest`]
//! 5. [`tree`] files compiled requests into nested folders by path segment
//! 6. [`collection`] renders the tree as a [`postman`] document
//!
//! ## Modules
//!
//! - [`manifest`] - Loading collections and endpoint shapes from YAML, TOML or JSON
//! - [`output`] - Atomic file writing
//! - [`parser`] - Path template utilities
//! - [`errors`] - Error types for the generator
//!
//! ## Example Usage
//!
//! ```
//! use postgen_define::Shaped;
//! use postgen_gen::collection::Collection;
//! use postgen_gen::postman::SchemaVersion;
//!
//! #[derive(Shaped)]
//! pub struct CreateUserRequest {
//!     #[postgen(json = "name", example = "John Doe")]
//!     pub name: String,
//!     #[postgen(json = "email")]
//!     pub email: String,
//! }
//!
//! let mut collection = Collection::new("My API", "Generated collection");
//! collection.add_variable("base_url", "http://localhost:8080");
//! collection.register_type::<CreateUserRequest>("POST", "/users").unwrap();
//!
//! let json = String::from_utf8(collection.serialize(SchemaVersion::V210).unwrap()).unwrap();
//! assert!(json.contains("John Doe"));
//! ```

pub mod classify;
pub mod collection;
pub mod compiler;
pub mod errors;
pub mod manifest;
pub mod output;
pub mod parser;
pub mod placeholder;
pub mod postman;
pub mod request;
pub mod tree;
pub mod zero;
