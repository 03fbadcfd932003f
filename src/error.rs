//! Error types for form validation and shape loading.

use std::fmt;
use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result of reducing a shape through a form node.
pub type Validated<T> = Result<T, FieldError>;

/// Symbolic reason a leaf field failed.
///
/// The serialized names are stable; UI layers use them as keys into their
/// message tables (see [`crate::messages`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorTag {
    /// A mandatory value is absent.
    Required,
    /// A time, time range or date range is malformed or inconsistent.
    TimeFormat,
    /// A select value is not one of the declared options.
    InvalidOption,
    /// The shape does not have the JSON type the node declares.
    Shape,
}

impl ErrorTag {
    /// All tags, in declaration order.
    pub const ALL: [ErrorTag; 4] = [
        ErrorTag::Required,
        ErrorTag::TimeFormat,
        ErrorTag::InvalidOption,
        ErrorTag::Shape,
    ];

    /// Stable wire name of the tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorTag::Required => "required",
            ErrorTag::TimeFormat => "timeFormat",
            ErrorTag::InvalidOption => "invalidOption",
            ErrorTag::Shape => "shape",
        }
    }
}

impl fmt::Display for ErrorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation failure of a form node.
///
/// Leaf nodes fail with a single tag. Object and array nodes fail with a
/// mapping from field name (or item index) to the child's error; children
/// that validated successfully have no entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldError {
    Leaf(ErrorTag),
    Object(IndexMap<String, FieldError>),
}

impl FieldError {
    /// The leaf tag, if this is a leaf error.
    pub fn tag(&self) -> Option<ErrorTag> {
        match self {
            FieldError::Leaf(tag) => Some(*tag),
            FieldError::Object(_) => None,
        }
    }

    /// Error of a direct child field, if that field failed.
    pub fn field(&self, name: &str) -> Option<&FieldError> {
        match self {
            FieldError::Object(fields) => fields.get(name),
            FieldError::Leaf(_) => None,
        }
    }

    /// Walk the error tree by a `/`-separated field path.
    ///
    /// An empty path returns `self`. Returns `None` when any segment did not
    /// fail.
    pub fn get(&self, path: &str) -> Option<&FieldError> {
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .try_fold(self, |current, segment| current.field(segment))
    }

    /// Flatten the tree into one issue per failing leaf.
    ///
    /// Paths are JSON Pointers (RFC 6901) into the shape.
    pub fn issues(&self) -> Vec<FieldIssue> {
        let mut issues = Vec::new();
        collect_issues(self, "", &mut issues);
        issues
    }
}

impl From<ErrorTag> for FieldError {
    fn from(tag: ErrorTag) -> Self {
        FieldError::Leaf(tag)
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let issues = self.issues();
        for (i, issue) in issues.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", issue)?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldError {}

fn collect_issues(error: &FieldError, path: &str, out: &mut Vec<FieldIssue>) {
    match error {
        FieldError::Leaf(tag) => out.push(FieldIssue {
            path: path.to_string(),
            tag: *tag,
        }),
        FieldError::Object(fields) => {
            for (name, child) in fields {
                // JSON Pointer escaping (~ -> ~0, / -> ~1)
                let segment = name.replace('~', "~0").replace('/', "~1");
                collect_issues(child, &format!("{}/{}", path, segment), out);
            }
        }
    }
}

/// Single failing leaf with path context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    /// JSON Pointer (RFC 6901) to the invalid field; empty for the root.
    pub path: String,
    pub tag: ErrorTag,
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "(root): {}", self.tag)
        } else {
            write!(f, "{}: {}", self.path, self.tag)
        }
    }
}

/// Errors while loading a shape document.
#[derive(Debug, Error)]
pub enum LoadError {
    // IO errors (exit code 3)
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("cannot read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Parse errors (exit code 2)
    #[error("invalid JSON: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },
}

impl LoadError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            LoadError::FileNotFound { .. } | LoadError::ReadError { .. } => 3,
            LoadError::InvalidJson { .. } => 2,
        }
    }
}

/// Errors while validating a shape document against a built-in form.
#[derive(Debug, Error)]
pub enum ValidateError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("validation failed with {} error(s)", error.issues().len())]
    Invalid { error: FieldError },
}

impl ValidateError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            ValidateError::Load(e) => e.exit_code(),
            ValidateError::Invalid { .. } => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nested() -> FieldError {
        let mut times = IndexMap::new();
        times.insert("startTime".to_string(), ErrorTag::TimeFormat.into());
        let mut root = IndexMap::new();
        root.insert("date".to_string(), ErrorTag::Required.into());
        root.insert("times".to_string(), FieldError::Object(times));
        FieldError::Object(root)
    }

    #[test]
    fn get_walks_field_path() {
        let err = nested();
        assert_eq!(
            err.get("times/startTime"),
            Some(&FieldError::Leaf(ErrorTag::TimeFormat))
        );
        assert_eq!(err.get("date").and_then(FieldError::tag), Some(ErrorTag::Required));
        assert_eq!(err.get(""), Some(&err));
        assert!(err.get("times/endTime").is_none());
        assert!(err.get("date/nested").is_none());
    }

    #[test]
    fn issues_use_json_pointers() {
        let issues = nested().issues();
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].path, "/date");
        assert_eq!(issues[1].path, "/times/startTime");
        assert_eq!(issues[1].tag, ErrorTag::TimeFormat);
    }

    #[test]
    fn issues_escape_pointer_segments() {
        let mut fields = IndexMap::new();
        fields.insert("a/b~c".to_string(), ErrorTag::Shape.into());
        let issues = FieldError::Object(fields).issues();
        assert_eq!(issues[0].path, "/a~1b~0c");
    }

    #[test]
    fn leaf_error_issue_points_at_root() {
        let issues = FieldError::from(ErrorTag::TimeFormat).issues();
        assert_eq!(issues[0].path, "");
        assert_eq!(issues[0].to_string(), "(root): timeFormat");
    }

    #[test]
    fn slash_path_names_an_empty_key() {
        let mut fields = IndexMap::new();
        fields.insert(String::new(), FieldError::Leaf(ErrorTag::Shape));
        let issues = FieldError::Object(fields).issues();
        assert_eq!(issues[0].path, "/");
    }

    #[test]
    fn serializes_like_the_shape() {
        let json = serde_json::to_value(nested()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "date": "required", "times": { "startTime": "timeFormat" } })
        );
    }

    #[test]
    fn tag_names_match_serde() {
        for tag in ErrorTag::ALL {
            assert_eq!(serde_json::to_value(tag).unwrap(), tag.as_str());
        }
    }

    #[test]
    fn exit_codes() {
        let err = LoadError::FileNotFound {
            path: PathBuf::from("shape.json"),
        };
        assert_eq!(err.exit_code(), 3);

        let err = ValidateError::Invalid { error: nested() };
        assert_eq!(err.exit_code(), 1);
        assert_eq!(err.to_string(), "validation failed with 2 error(s)");
    }
}
