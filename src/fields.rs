//! Pre-built field nodes for common domain primitives.
//!
//! Shapes follow the browser inputs they back: text inputs hold strings,
//! date pickers hold an ISO date or `null`, checkboxes hold booleans. Range
//! fields are objects of two such inputs.
//!
//! Optionality is decided per field rather than by a generic nullable
//! wrapper. Range fields accept exactly these cases:
//!
//! | start | end | closed range | open-ended range |
//! |-------|-----|--------------|------------------|
//! | unset | unset | `Ok(None)` | `Ok(None)` |
//! | set | set, not before start | `Ok(Some(range))` | `Ok(Some(range))` |
//! | set | unset | `timeFormat` | `Ok(Some(open range))` |
//! | unset | set | `timeFormat` | `timeFormat` |
//! | set | set, before start | `timeFormat` | `timeFormat` |
//!
//! An end is unset when it is `null`, blank or missing. Range fields read
//! their ends from the raw shape, so an end that does not parse also fails
//! the range with `timeFormat`.

use serde::Deserialize;
use serde_json::Value;

use crate::compose::object_as;
use crate::error::{ErrorTag, FieldError, Validated};
use crate::form::{mapped, transformed, value, Form};
use crate::types::{
    parse_local_time, DateRange, FiniteDateRange, LocalDate, LocalTime, TimeRange,
};

fn time_format<T>() -> Validated<T> {
    Err(FieldError::Leaf(ErrorTag::TimeFormat))
}

/// Text input. Leading and trailing whitespace is trimmed; never fails.
pub fn string() -> impl Form<Output = String> + Send + Sync {
    mapped(value::<String>(), |s: String| s.trim().to_string())
}

/// Checkbox.
pub fn boolean() -> impl Form<Output = bool> + Send + Sync {
    value::<bool>()
}

/// Numeric input.
pub fn number() -> impl Form<Output = f64> + Send + Sync {
    value::<f64>()
}

/// Mandatory date picker. An absent date always fails with
/// [`ErrorTag::Required`], deliberately as a leaf error on the field itself
/// rather than as a failure of the enclosing object, so it reads like any
/// other required input. Use [`optional_local_date`] when empty is valid.
pub fn local_date() -> impl Form<Output = LocalDate> + Send + Sync {
    transformed(value::<Option<LocalDate>>(), |date| {
        date.ok_or(FieldError::Leaf(ErrorTag::Required))
    })
}

/// Date picker that may be left empty.
pub fn optional_local_date() -> impl Form<Output = Option<LocalDate>> + Send + Sync {
    value::<Option<LocalDate>>()
}

/// Time text input in strict `HH:mm` form. Blank or `null` input is
/// `Ok(None)`.
pub fn local_time() -> impl Form<Output = Option<LocalTime>> + Send + Sync {
    transformed(value::<Option<String>>(), |input| {
        match input.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(input) => match parse_local_time(input) {
                Some(time) => Ok(Some(time)),
                None => time_format(),
            },
        }
    })
}

/// Both ends of a range as the inputs hold them, before any parsing.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRange {
    #[serde(alias = "startTime", alias = "startDate")]
    start: Value,
    #[serde(alias = "endTime", alias = "endDate")]
    end: Value,
}

fn raw_range(start: &str, end: &str) -> impl Form<Output = RawRange> + Send + Sync {
    object_as::<RawRange>()
        .field(start, value::<Value>())
        .field(end, value::<Value>())
}

/// Read one raw range end. `Ok(None)` when blank, `Err` when unparsable.
fn range_end<T>(raw: &Value, parse: impl Fn(&str) -> Option<T>) -> Validated<Option<T>> {
    match raw {
        Value::Null => Ok(None),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => match parse(s.trim()) {
            Some(parsed) => Ok(Some(parsed)),
            None => time_format(),
        },
        _ => time_format(),
    }
}

fn parse_local_date(input: &str) -> Option<LocalDate> {
    LocalDate::parse_from_str(input, "%Y-%m-%d").ok()
}

/// Pair of time inputs `{ startTime, endTime }`. Equal ends are valid.
///
/// The ends are read from the raw shape, so an unparsable end fails the
/// range as a whole with `timeFormat`.
pub fn local_time_range() -> impl Form<Output = Option<TimeRange>> + Send + Sync {
    transformed(raw_range("startTime", "endTime"), |raw| {
        let start = range_end(&raw.start, parse_local_time)?;
        let end = range_end(&raw.end, parse_local_time)?;
        match (start, end) {
            (None, None) => Ok(None),
            (Some(start), Some(end)) => match TimeRange::new(start, end) {
                Some(range) => Ok(Some(range)),
                None => time_format(),
            },
            _ => time_format(),
        }
    })
}

/// Pair of date pickers `{ startDate, endDate }` producing a closed range.
pub fn local_date_range() -> impl Form<Output = Option<FiniteDateRange>> + Send + Sync {
    transformed(raw_range("startDate", "endDate"), |raw| {
        let start = range_end(&raw.start, parse_local_date)?;
        let end = range_end(&raw.end, parse_local_date)?;
        match (start, end) {
            (None, None) => Ok(None),
            (Some(start), Some(end)) => match FiniteDateRange::new(start, end) {
                Some(range) => Ok(Some(range)),
                None => time_format(),
            },
            _ => time_format(),
        }
    })
}

/// Pair of date pickers `{ startDate, endDate }` where the end may be left
/// open.
pub fn local_open_ended_date_range() -> impl Form<Output = Option<DateRange>> + Send + Sync {
    transformed(raw_range("startDate", "endDate"), |raw| {
        let start = range_end(&raw.start, parse_local_date)?;
        let end = range_end(&raw.end, parse_local_date)?;
        match (start, end) {
            (None, None) => Ok(None),
            (Some(start), end) => match DateRange::new(start, end) {
                Some(range) => Ok(Some(range)),
                None => time_format(),
            },
            (None, Some(_)) => time_format(),
        }
    })
}

/// Select input over a closed set of option values. Blank input is
/// `Ok(None)`; anything outside the set fails with
/// [`ErrorTag::InvalidOption`].
pub fn one_of(options: &[&str]) -> impl Form<Output = Option<String>> + Send + Sync {
    let options: Vec<String> = options.iter().map(|o| o.to_string()).collect();
    transformed(string(), move |input| {
        if input.is_empty() {
            Ok(None)
        } else if options.contains(&input) {
            Ok(Some(input))
        } else {
            Err(ErrorTag::InvalidOption.into())
        }
    })
}
