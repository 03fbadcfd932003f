//! Shape loading from files and strings.

use std::path::Path;

use serde_json::Value;

use crate::error::LoadError;

/// Load a shape document from a file path.
///
/// # Errors
///
/// Returns `LoadError::FileNotFound` if the file doesn't exist,
/// or `LoadError::InvalidJson` if the file isn't valid JSON.
pub fn load_shape(path: &Path) -> Result<Value, LoadError> {
    if !path.exists() {
        return Err(LoadError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| LoadError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), bytes = content.len(), "loaded shape");
    load_shape_str(&content)
}

/// Load a shape document from a JSON string.
///
/// # Errors
///
/// Returns `LoadError::InvalidJson` if the string isn't valid JSON.
pub fn load_shape_str(content: &str) -> Result<Value, LoadError> {
    serde_json::from_str(content).map_err(|source| LoadError::InvalidJson { source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::path::PathBuf;

    #[test]
    fn missing_file() {
        let err = load_shape(&PathBuf::from("/nonexistent/shape.json")).unwrap_err();
        assert!(matches!(err, LoadError::FileNotFound { .. }));
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn parses_string() {
        let shape = load_shape_str(r#"{"startTime":"08:00"}"#).unwrap();
        assert_eq!(shape, json!({ "startTime": "08:00" }));
    }

    #[test]
    fn invalid_json() {
        let err = load_shape_str("{ nope").unwrap_err();
        assert!(matches!(err, LoadError::InvalidJson { .. }));
        assert_eq!(err.exit_code(), 2);
    }
}
