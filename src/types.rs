//! Domain value types consumed by the field constructors.

use chrono::{NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Calendar date without time zone.
pub type LocalDate = NaiveDate;

/// Wall-clock time of day.
pub type LocalTime = NaiveTime;

static TIME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{2}):(\d{2})$").expect("time pattern is valid"));

/// Parse a strict `HH:mm` time.
///
/// Returns `None` for anything else, including single-digit components and
/// out-of-range hours or minutes.
pub fn parse_local_time(input: &str) -> Option<LocalTime> {
    let caps = TIME_PATTERN.captures(input)?;
    let hour = caps[1].parse().ok()?;
    let minute = caps[2].parse().ok()?;
    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Format a time the way [`parse_local_time`] reads it.
pub fn format_local_time(time: LocalTime) -> String {
    time.format("%H:%M").to_string()
}

/// Ordering helpers shared by dates and times.
pub trait Chronological: Ord + Sized {
    fn is_before(&self, other: &Self) -> bool {
        self < other
    }

    fn is_equal(&self, other: &Self) -> bool {
        self == other
    }
}

impl Chronological for LocalDate {}
impl Chronological for LocalTime {}

/// Inclusive date range with both ends set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FiniteDateRange {
    pub start: LocalDate,
    pub end: LocalDate,
}

impl FiniteDateRange {
    /// Returns `None` when `end` is before `start`.
    pub fn new(start: LocalDate, end: LocalDate) -> Option<Self> {
        if end.is_before(&start) {
            None
        } else {
            Some(Self { start, end })
        }
    }

    pub fn includes(&self, date: LocalDate) -> bool {
        !date.is_before(&self.start) && !self.end.is_before(&date)
    }

    /// Number of days in the range, both ends included.
    pub fn duration_in_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// Date range whose end may be open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DateRange {
    pub start: LocalDate,
    pub end: Option<LocalDate>,
}

impl DateRange {
    /// Returns `None` when `end` is set and before `start`.
    pub fn new(start: LocalDate, end: Option<LocalDate>) -> Option<Self> {
        match end {
            Some(end) if end.is_before(&start) => None,
            _ => Some(Self { start, end }),
        }
    }

    pub fn includes(&self, date: LocalDate) -> bool {
        !date.is_before(&self.start) && self.end.map_or(true, |end| !end.is_before(&date))
    }

    /// The closed counterpart, if the end is set.
    pub fn as_finite(&self) -> Option<FiniteDateRange> {
        self.end.map(|end| FiniteDateRange {
            start: self.start,
            end,
        })
    }
}

impl From<FiniteDateRange> for DateRange {
    fn from(range: FiniteDateRange) -> Self {
        DateRange {
            start: range.start,
            end: Some(range.end),
        }
    }
}

/// Time range within one day. `start == end` is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: LocalTime,
    pub end: LocalTime,
}

impl TimeRange {
    /// Returns `None` when `end` is before `start`.
    pub fn new(start: LocalTime, end: LocalTime) -> Option<Self> {
        if end.is_before(&start) {
            None
        } else {
            Some(Self { start, end })
        }
    }
}
