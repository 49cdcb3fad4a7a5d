//! Writing generated collections to disk.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::errors::GeneratorError;

/// Writes `content` to `path` through a sibling temp file and a rename.
///
/// Readers see either the previous file or the complete new one. Missing
/// parent directories are created.
///
/// ## Errors
///
/// Returns `GeneratorError::WriteError` naming the path that failed: the
/// parent directory, the temp file, or the final path.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<(), GeneratorError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| GeneratorError::WriteError {
            path: parent.display().to_string(),
            source: e,
        })?;
    }

    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content).map_err(|e| GeneratorError::WriteError {
        path: temp_path.display().to_string(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| GeneratorError::WriteError {
        path: path.display().to_string(),
        source: e,
    })?;

    debug!(path = %path.display(), bytes = content.len(), "wrote collection");
    Ok(())
}
