//! Path template handling.
//!
//! Registered paths use colon-prefixed variables: `/users/:userId/picture`.

use crate::errors::GeneratorError;

/// Host placeholder every generated URL starts with.
pub const BASE_URL: &str = "{{base_url}}";

/// Splits a path template into segments, trimming leading/trailing slashes.
///
/// ## Examples
///
/// ```
/// use postgen_gen::parser::split_path;
///
/// assert_eq!(split_path("/users/:userId/").unwrap(), vec!["users", ":userId"]);
/// assert!(split_path("/").is_err());
/// assert!(split_path("/users//picture").is_err());
/// ```
///
/// ## Errors
///
/// Returns `GeneratorError::InvalidRegistration` if the path is empty or contains an
/// empty interior segment.
pub fn split_path(path: &str) -> Result<Vec<String>, GeneratorError> {
    let trimmed = path.trim().trim_matches('/');
    if trimmed.is_empty() {
        return Err(GeneratorError::InvalidRegistration(format!(
            "path '{}' has no segments",
            path
        )));
    }

    let segments: Vec<String> = trimmed.split('/').map(str::to_string).collect();
    if segments.iter().any(String::is_empty) {
        return Err(GeneratorError::InvalidRegistration(format!(
            "path '{}' contains an empty segment",
            path
        )));
    }

    Ok(segments)
}

/// Returns the variable name if `segment` is a `:variable`.
///
/// ```
/// use postgen_gen::parser::path_variable;
///
/// assert_eq!(path_variable(":userId"), Some("userId"));
/// assert_eq!(path_variable("users"), None);
/// ```
pub fn path_variable(segment: &str) -> Option<&str> {
    segment.strip_prefix(':')
}

/// Builds the raw URL for a list of segments.
///
/// Variables stay in their `:name` form.
pub fn raw_url(segments: &[String]) -> String {
    format!("{}/{}", BASE_URL, segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_single_segment() {
        assert_eq!(split_path("users").unwrap(), vec!["users"]);
        assert_eq!(split_path("/users").unwrap(), vec!["users"]);
    }

    #[test]
    fn split_keeps_variables_verbatim() {
        assert_eq!(
            split_path("/users/:userId/picture").unwrap(),
            vec!["users", ":userId", "picture"]
        );
    }

    #[test]
    fn split_rejects_empty_paths() {
        assert!(matches!(split_path(""), Err(GeneratorError::InvalidRegistration(_))));
        assert!(matches!(split_path("//"), Err(GeneratorError::InvalidRegistration(_))));
        assert!(matches!(split_path("  "), Err(GeneratorError::InvalidRegistration(_))));
    }

    #[test]
    fn only_colon_segments_are_variables() {
        let variables: Vec<_> = split_path("/orgs/:org/repos/:repo")
            .unwrap()
            .iter()
            .filter_map(|segment| path_variable(segment).map(str::to_string))
            .collect();
        assert_eq!(variables, ["org", "repo"]);
        assert_eq!(path_variable("users:id"), None);
    }

    #[test]
    fn raw_url_joins_segments() {
        let segments = vec!["users".to_string(), ":userId".to_string()];
        assert_eq!(raw_url(&segments), "{{base_url}}/users/:userId");
    }
}
