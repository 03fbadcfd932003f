//! Composite nodes: named-field objects and homogeneous arrays.
//!
//! Children of an object are validated independently and every failure is
//! collected, so one pass reports all invalid fields at once:
//!
//! ```
//! use daycare_forms::{object, string, local_time, ErrorTag, Form};
//! use serde_json::json;
//!
//! let form = object()
//!     .field("name", string())
//!     .field("arrival", local_time())
//!     .field("departure", local_time());
//!
//! let err = form
//!     .validate(&json!({ "name": "Aino", "arrival": "8:3", "departure": "25:00" }))
//!     .unwrap_err();
//!
//! assert!(err.field("name").is_none());
//! assert_eq!(err.get("arrival").and_then(|e| e.tag()), Some(ErrorTag::TimeFormat));
//! assert_eq!(err.get("departure").and_then(|e| e.tag()), Some(ErrorTag::TimeFormat));
//! ```

use std::fmt;
use std::marker::PhantomData;

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{ErrorTag, FieldError, Validated};
use crate::form::{read_as, Form};

/// Object-safe view of a child node whose output is re-encoded as JSON.
trait ErasedForm: Send + Sync {
    fn validate_json(&self, shape: &Value) -> Validated<Value>;
}

impl<F> ErasedForm for F
where
    F: Form + Send + Sync,
    F::Output: Serialize,
{
    fn validate_json(&self, shape: &Value) -> Validated<Value> {
        let output = self.validate(shape)?;
        serde_json::to_value(output).map_err(|e| {
            tracing::debug!(error = %e, "child output is not representable as JSON");
            FieldError::Leaf(ErrorTag::Shape)
        })
    }
}

/// Node composing named children.
///
/// The shape is a JSON object with the same keys; a missing key is read as
/// `null`, unknown keys are ignored. The output is the mapping from field
/// name to child output, read as `T`.
pub struct ObjectForm<T = Map<String, Value>> {
    fields: IndexMap<String, Box<dyn ErasedForm>>,
    _marker: PhantomData<fn() -> T>,
}

/// Start an object node with an untyped JSON map output.
pub fn object() -> ObjectForm<Map<String, Value>> {
    object_as()
}

/// Start an object node whose output is deserialized into `T`.
///
/// Field names must match `T`'s serde field names.
pub fn object_as<T: DeserializeOwned>() -> ObjectForm<T> {
    ObjectForm {
        fields: IndexMap::new(),
        _marker: PhantomData,
    }
}

impl<T> ObjectForm<T> {
    /// Add a named child. Re-using a name replaces the earlier child.
    pub fn field<F>(mut self, name: impl Into<String>, form: F) -> Self
    where
        F: Form + Send + Sync + 'static,
        F::Output: Serialize,
    {
        self.fields.insert(name.into(), Box::new(form));
        self
    }

    /// Field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

impl<T> fmt::Debug for ObjectForm<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectForm")
            .field("fields", &self.fields.keys().collect::<Vec<_>>())
            .field("output", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T: DeserializeOwned> Form for ObjectForm<T> {
    type Output = T;

    fn validate(&self, shape: &Value) -> Validated<T> {
        let Value::Object(map) = shape else {
            tracing::debug!("object shape is not a JSON object");
            return Err(ErrorTag::Shape.into());
        };

        let mut outputs = Map::new();
        let mut errors = IndexMap::new();

        for (name, child) in &self.fields {
            let child_shape = map.get(name).unwrap_or(&Value::Null);
            match child.validate_json(child_shape) {
                Ok(output) => {
                    outputs.insert(name.clone(), output);
                }
                Err(error) => {
                    errors.insert(name.clone(), error);
                }
            }
        }

        if !errors.is_empty() {
            tracing::debug!(
                failed = ?errors.keys().collect::<Vec<_>>(),
                "object validation failed"
            );
            return Err(FieldError::Object(errors));
        }

        read_as(Value::Object(outputs))
    }
}

/// Node validating every element of a JSON array with the same child.
#[derive(Debug)]
pub struct ArrayForm<F> {
    item: F,
}

/// List of shapes validated by `item`.
///
/// Errors are keyed by the failing element's index.
pub fn array<F: Form>(item: F) -> ArrayForm<F> {
    ArrayForm { item }
}

impl<F: Form> Form for ArrayForm<F> {
    type Output = Vec<F::Output>;

    fn validate(&self, shape: &Value) -> Validated<Self::Output> {
        let Value::Array(items) = shape else {
            return Err(ErrorTag::Shape.into());
        };

        let mut outputs = Vec::with_capacity(items.len());
        let mut errors = IndexMap::new();

        for (index, item) in items.iter().enumerate() {
            match self.item.validate(item) {
                Ok(output) => outputs.push(output),
                Err(error) => {
                    errors.insert(index.to_string(), error);
                }
            }
        }

        if errors.is_empty() {
            Ok(outputs)
        } else {
            Err(FieldError::Object(errors))
        }
    }
}
