//! Shape document validation against the built-in forms.

use std::path::Path;

use serde_json::Value;

use crate::error::ValidateError;
use crate::forms::FormKind;
use crate::loader::load_shape;

/// Validate a shape against a built-in form.
///
/// Returns the validated output encoded as JSON.
///
/// # Errors
///
/// Returns `ValidateError::Invalid` carrying the full error tree if any
/// field fails.
pub fn validate(kind: FormKind, shape: &Value) -> Result<Value, ValidateError> {
    kind.validate(shape).map_err(|error| {
        tracing::info!(
            form = kind.name(),
            issues = error.issues().len(),
            "shape rejected"
        );
        ValidateError::Invalid { error }
    })
}

/// Load a shape document from `path` and validate it.
///
/// # Errors
///
/// Returns `ValidateError::Load` if the file can't be read or parsed, or
/// `ValidateError::Invalid` if the shape doesn't pass the form.
pub fn validate_file(kind: FormKind, path: &Path) -> Result<Value, ValidateError> {
    let shape = load_shape(path)?;
    validate(kind, &shape)
}
