//! Error types for the collection generator.

use thiserror::Error;

/// Errors that can occur while compiling requests or producing a collection.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Method, path or request shape is missing or malformed.
    #[error("Invalid registration: {0}")]
    InvalidRegistration(String),

    /// The JSON body could not be encoded.
    #[error("Failed to serialize request body: {0}")]
    BodySerialization(#[source] serde_json::Error),

    /// The collection document could not be encoded.
    #[error("Failed to serialize collection: {0}")]
    CollectionSerialization(#[source] serde_json::Error),

    /// A `:variable` path segment has no matching `param` field and the
    /// generator is configured to reject that.
    #[error("Path '{path}' declares variable ':{variable}' but no field is tagged param:\"{variable}\"")]
    UnmatchedPathVariable {
        /// The registered path.
        path: String,
        /// The variable name, without the leading colon.
        variable: String,
    },

    /// Failed to write output file
    #[error("Failed to write output file '{path}': {source}")]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A manifest file could not be read or parsed.
    #[error("Invalid manifest '{path}': {reason}")]
    Manifest {
        /// Path of the manifest.
        path: String,
        /// What went wrong.
        reason: String,
    },

    /// The manifest extension is not one of yaml, yml, toml or json.
    #[error("Unsupported manifest format '{0}' (expected .yaml, .yml, .toml or .json)")]
    UnsupportedManifestFormat(String),
}
