//! Daycare Forms
//!
//! Composable form schemas and validation for structured user input of the
//! daycare service: dates, date ranges, times and time ranges, and the
//! application forms built from them.
//!
//! A form is described once by composing nodes, and any number of shapes
//! (the raw JSON state behind the inputs) are then reduced through it to
//! either a validated domain value or a structured error.
//!
//! # Example
//!
//! ```
//! use daycare_forms::{local_date, local_time_range, object, ErrorTag, Form};
//! use serde_json::json;
//!
//! let form = object()
//!     .field("date", local_date())
//!     .field("times", local_time_range());
//!
//! let ok = form.validate(&json!({
//!     "date": "2024-01-05",
//!     "times": { "startTime": "08:00", "endTime": "16:00" }
//! }));
//! assert!(ok.is_ok());
//!
//! let err = form
//!     .validate(&json!({
//!         "date": null,
//!         "times": { "startTime": "16:00", "endTime": "08:00" }
//!     }))
//!     .unwrap_err();
//! assert_eq!(err.get("date").and_then(|e| e.tag()), Some(ErrorTag::Required));
//! assert_eq!(err.get("times").and_then(|e| e.tag()), Some(ErrorTag::TimeFormat));
//! ```
//!
//! # Node kinds
//!
//! | Node | Shape | Output | Fails |
//! |------|-------|--------|-------|
//! | [`value`] | scalar | the shape | never (except foreign JSON types) |
//! | [`transformed`] | inner shape | transform result | when the transform says so |
//! | [`mapped`] | inner shape | mapped inner output | only when the inner node fails |
//! | [`object`] | `{ name: child shape }` | `{ name: child output }` | per failing child |

mod compose;
pub mod config;
mod error;
mod fields;
mod form;
pub mod forms;
mod loader;
pub mod messages;
mod types;
mod validator;

pub use compose::{array, object, object_as, ArrayForm, ObjectForm};
pub use error::{ErrorTag, FieldError, FieldIssue, LoadError, ValidateError, Validated};
pub use fields::{
    boolean, local_date, local_date_range, local_open_ended_date_range, local_time,
    local_time_range, number, one_of, optional_local_date, string,
};
pub use form::{
    mapped, required, transformed, validated, value, Checked, Form, Mapped, Required,
    Transformed, ValueForm,
};
pub use loader::{load_shape, load_shape_str};
pub use types::{
    format_local_time, parse_local_time, Chronological, DateRange, FiniteDateRange, LocalDate,
    LocalTime, TimeRange,
};
pub use validator::{validate, validate_file};
