//! Built-in application forms.
//!
//! Each form is built once into a `static` and exposes a typed output plus a
//! converter from that output back to a shape, which is what an edit view
//! uses to open a form pre-filled with existing data.

use clap::ValueEnum;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::compose::{object_as, ObjectForm};
use crate::error::{ErrorTag, Validated};
use crate::fields::{
    boolean, local_date, local_date_range, local_open_ended_date_range, local_time_range,
    number, one_of, string,
};
use crate::form::{required, validated, Form};
use crate::types::{format_local_time, DateRange, FiniteDateRange, LocalDate, TimeRange};

/// Attendance reservation for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub date: LocalDate,
    /// `None` when the child is reserved as present without set hours.
    pub times: Option<TimeRange>,
    pub absent: bool,
}

impl Reservation {
    pub fn to_shape(&self) -> Value {
        json!({
            "date": self.date,
            "times": time_range_shape(self.times),
            "absent": self.absent,
        })
    }
}

/// Absence category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AbsenceType {
    OtherAbsence,
    Sickleave,
    UnknownAbsence,
    PlannedAbsence,
    Parentleave,
    ForceMajeure,
}

impl AbsenceType {
    pub const ALL: [AbsenceType; 6] = [
        AbsenceType::OtherAbsence,
        AbsenceType::Sickleave,
        AbsenceType::UnknownAbsence,
        AbsenceType::PlannedAbsence,
        AbsenceType::Parentleave,
        AbsenceType::ForceMajeure,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AbsenceType::OtherAbsence => "OTHER_ABSENCE",
            AbsenceType::Sickleave => "SICKLEAVE",
            AbsenceType::UnknownAbsence => "UNKNOWN_ABSENCE",
            AbsenceType::PlannedAbsence => "PLANNED_ABSENCE",
            AbsenceType::Parentleave => "PARENTLEAVE",
            AbsenceType::ForceMajeure => "FORCE_MAJEURE",
        }
    }
}

/// Absence marked by a guardian or employee over a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Absence {
    pub period: FiniteDateRange,
    pub absence_type: AbsenceType,
    pub note: String,
}

impl Absence {
    pub fn to_shape(&self) -> Value {
        json!({
            "period": date_range_shape(Some(self.period.start), Some(self.period.end)),
            "absenceType": self.absence_type.as_str(),
            "note": self.note,
        })
    }
}

/// Placement of a child in a unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    pub unit_id: String,
    pub period: DateRange,
    pub hours_per_week: f64,
    pub preparatory: bool,
}

impl Placement {
    pub fn to_shape(&self) -> Value {
        json!({
            "unitId": self.unit_id,
            "period": date_range_shape(Some(self.period.start), self.period.end),
            "hoursPerWeek": self.hours_per_week,
            "preparatory": self.preparatory,
        })
    }
}

fn time_range_shape(range: Option<TimeRange>) -> Value {
    match range {
        Some(range) => json!({
            "startTime": format_local_time(range.start),
            "endTime": format_local_time(range.end),
        }),
        None => json!({ "startTime": "", "endTime": "" }),
    }
}

fn date_range_shape(start: Option<LocalDate>, end: Option<LocalDate>) -> Value {
    json!({ "startDate": start, "endDate": end })
}

static RESERVATION: Lazy<ObjectForm<Reservation>> = Lazy::new(|| {
    object_as::<Reservation>()
        .field("date", local_date())
        .field("times", local_time_range())
        .field("absent", boolean())
});

static ABSENCE: Lazy<ObjectForm<Absence>> = Lazy::new(|| {
    object_as::<Absence>()
        .field("period", required(local_date_range()))
        .field(
            "absenceType",
            required(one_of(&AbsenceType::ALL.map(|t| t.as_str()))),
        )
        .field("note", string())
});

static PLACEMENT: Lazy<ObjectForm<Placement>> = Lazy::new(|| {
    object_as::<Placement>()
        .field(
            "unitId",
            validated(string(), |id| id.is_empty().then_some(ErrorTag::Required)),
        )
        .field("period", required(local_open_ended_date_range()))
        .field("hoursPerWeek", number())
        .field("preparatory", boolean())
});

pub fn reservation_form() -> &'static ObjectForm<Reservation> {
    &RESERVATION
}

pub fn absence_form() -> &'static ObjectForm<Absence> {
    &ABSENCE
}

pub fn placement_form() -> &'static ObjectForm<Placement> {
    &PLACEMENT
}

/// Built-in form selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FormKind {
    Reservation,
    Absence,
    Placement,
}

impl FormKind {
    pub fn name(&self) -> &'static str {
        match self {
            FormKind::Reservation => "reservation",
            FormKind::Absence => "absence",
            FormKind::Placement => "placement",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            FormKind::Reservation => "attendance reservation for one day",
            FormKind::Absence => "absence over a closed date range",
            FormKind::Placement => "placement in a unit over an open-ended date range",
        }
    }

    /// Top-level field names of the form's shape.
    pub fn fields(&self) -> Vec<&'static str> {
        match self {
            FormKind::Reservation => RESERVATION.field_names().collect(),
            FormKind::Absence => ABSENCE.field_names().collect(),
            FormKind::Placement => PLACEMENT.field_names().collect(),
        }
    }

    /// Validate `shape` and re-encode the typed output as JSON.
    pub fn validate(&self, shape: &Value) -> Validated<Value> {
        match self {
            FormKind::Reservation => validate_json(&*RESERVATION, shape),
            FormKind::Absence => validate_json(&*ABSENCE, shape),
            FormKind::Placement => validate_json(&*PLACEMENT, shape),
        }
    }
}

fn validate_json<F>(form: &F, shape: &Value) -> Validated<Value>
where
    F: Form,
    F::Output: Serialize,
{
    let output = form.validate(shape)?;
    serde_json::to_value(output).map_err(|e| {
        tracing::warn!(error = %e, "validated output is not representable as JSON");
        ErrorTag::Shape.into()
    })
}
