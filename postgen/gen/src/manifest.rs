//! Collection manifests.
//!
//! A manifest describes a collection and its endpoint shapes as data, so the
//! `postgen` binary can build a collection without compiling Rust types.
//! The format is picked from the file extension: `.yaml`/`.yml`, `.toml` or
//! `.json`.
//!
//! ```yaml
//! name: My API
//! description: Generated collection
//! auth_token_variable: token
//! path_variables: literal
//! variables:
//!   - { key: base_url, value: "http://localhost:8080" }
//! placeholders:
//!   tenant_id: default-tenant-001
//! endpoints:
//!   - method: GET
//!     path: /users/:userId
//!     shape:
//!       kind: record
//!       name: GetUser
//!       fields:
//!         - { name: UserID, param: userId, type: { kind: string } }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use postgen_define::TypeShape;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::debug;

use crate::collection::{Collection, DEFAULT_TOKEN_VARIABLE};
use crate::compiler::{PathVariablePolicy, Registration};
use crate::errors::GeneratorError;

/// Manifest serialization format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ManifestFormat {
    #[strum(to_string = "yaml", serialize = "yml")]
    Yaml,
    Toml,
    Json,
}

impl ManifestFormat {
    /// Picks the format from the extension of `path`.
    ///
    /// ```
    /// use std::path::Path;
    /// use postgen_gen::manifest::ManifestFormat;
    ///
    /// assert_eq!(ManifestFormat::from_path(Path::new("api.yml")).unwrap(), ManifestFormat::Yaml);
    /// assert!(ManifestFormat::from_path(Path::new("api.ini")).is_err());
    /// ```
    pub fn from_path(path: &Path) -> Result<Self, GeneratorError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        extension
            .parse()
            .map_err(|_| GeneratorError::UnsupportedManifestFormat(path.display().to_string()))
    }
}

/// A collection variable entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableEntry {
    pub key: String,
    #[serde(default)]
    pub value: String,
}

/// One endpoint to register.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointEntry {
    pub method: String,
    pub path: String,
    pub shape: TypeShape,
}

/// Top-level manifest document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionManifest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Collection variable holding the bearer token. `None` disables auth.
    #[serde(default = "default_token_variable")]
    pub auth_token_variable: Option<String>,
    #[serde(default)]
    pub path_variables: PathVariablePolicy,
    #[serde(default)]
    pub variables: Vec<VariableEntry>,
    #[serde(default)]
    pub placeholders: BTreeMap<String, String>,
    #[serde(default)]
    pub endpoints: Vec<EndpointEntry>,
}

fn default_token_variable() -> Option<String> {
    Some(DEFAULT_TOKEN_VARIABLE.to_string())
}

impl CollectionManifest {
    /// Reads and parses the manifest at `path`.
    ///
    /// ## Errors
    ///
    /// - `GeneratorError::UnsupportedManifestFormat` for an unknown extension
    /// - `GeneratorError::Manifest` when the file cannot be read or parsed
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GeneratorError> {
        let path = path.as_ref();
        let format = ManifestFormat::from_path(path)?;
        let text = fs::read_to_string(path).map_err(|e| GeneratorError::Manifest {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let manifest = Self::parse(&text, format).map_err(|reason| GeneratorError::Manifest {
            path: path.display().to_string(),
            reason,
        })?;
        debug!(
            path = %path.display(),
            %format,
            endpoints = manifest.endpoints.len(),
            "loaded manifest"
        );
        Ok(manifest)
    }

    /// Parses manifest text in the given format.
    pub fn parse(text: &str, format: ManifestFormat) -> Result<Self, String> {
        match format {
            ManifestFormat::Yaml => serde_yaml::from_str(text).map_err(|e| e.to_string()),
            ManifestFormat::Toml => toml::from_str(text).map_err(|e| e.to_string()),
            ManifestFormat::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
        }
    }

    /// Builds a collection and registers every endpoint in order.
    ///
    /// ## Errors
    ///
    /// The first registration error, annotated with the failing endpoint.
    pub fn into_collection(self) -> Result<Collection, GeneratorError> {
        let mut collection = Collection::new(self.name, self.description);
        match self.auth_token_variable {
            Some(variable) => collection.add_auth_bearer(variable),
            None => collection.without_auth(),
        };
        collection.with_path_variable_policy(self.path_variables);

        for VariableEntry { key, value } in self.variables {
            collection.add_variable(key, value);
        }
        for (key, value) in self.placeholders {
            collection.add_placeholder(key, value);
        }

        for endpoint in self.endpoints {
            let label = format!("{} {}", endpoint.method, endpoint.path);
            collection
                .register(Registration::new(endpoint.method, endpoint.path, endpoint.shape))
                .map_err(|e| match e {
                    GeneratorError::InvalidRegistration(reason) => {
                        GeneratorError::InvalidRegistration(format!("{}: {}", label, reason))
                    }
                    other => other,
                })?;
        }

        Ok(collection)
    }
}
