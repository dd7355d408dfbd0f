//! Read-only projection of an intervention as delivered by the backend.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::types::{InterventionId, TechnicianName, TimeSlot};

const NAIVE_DATETIME_FORMATS: [&str; 5] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Intervention record consumed by the calendar.
///
/// Timestamps and dates are kept as the raw backend strings: a malformed
/// value must never reject the whole record, it simply behaves as absent
/// when the calendar needs a concrete instant.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Intervention {
    pub id: InterventionId,
    pub company_name: Option<String>,
    pub technician_name: Option<String>,
    pub date: Option<String>,
    pub time_slot: Option<String>,
    pub from_datetime: Option<String>,
    pub to_datetime: Option<String>,
    pub assigned_to_name: Option<String>,
    pub report_id: Option<Value>,
    pub approved_by_name: Option<String>,
    pub report_is_failed: Option<bool>,
    pub cancelled_by: Option<Value>,
    pub invoiced_by: Option<Value>,
    pub calendar_notes: Option<String>,
    pub manual_check: Option<bool>,
    /// Status key stored by the backend, if any.
    pub status: Option<String>,
}

/// Returns `true` when the text is present and not just whitespace.
pub fn has_text(value: Option<&str>) -> bool {
    value.is_some_and(|s| !s.trim().is_empty())
}

/// Returns `true` when a loosely typed JSON field carries a value.
pub fn has_value(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(_) => true,
    }
}

/// Parses a backend timestamp into wall-clock time of the display offset.
///
/// RFC 3339 values are converted into `offset`; naive values are assumed to
/// already be expressed in it.
pub fn parse_instant(raw: &str, offset: &FixedOffset) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.with_timezone(offset).naive_local());
    }
    let parsed = NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok());
    if parsed.is_none() {
        log::debug!("Ignoring unparseable timestamp {raw:?}");
    }
    parsed
}

/// Parses the `YYYY-MM-DD` prefix of a backend date.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let parsed = raw
        .get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok());
    if parsed.is_none() && !raw.is_empty() {
        log::debug!("Ignoring unparseable date {raw:?}");
    }
    parsed
}

impl Intervention {
    /// Creates a record carrying only its identifier.
    pub fn new(id: InterventionId) -> Self {
        Self {
            id,
            company_name: None,
            technician_name: None,
            date: None,
            time_slot: None,
            from_datetime: None,
            to_datetime: None,
            assigned_to_name: None,
            report_id: None,
            approved_by_name: None,
            report_is_failed: None,
            cancelled_by: None,
            invoiced_by: None,
            calendar_notes: None,
            manual_check: None,
            status: None,
        }
    }

    /// Technician shown on the calendar, the placeholder when unassigned.
    pub fn technician(&self) -> TechnicianName {
        self.technician_name
            .as_deref()
            .and_then(|name| TechnicianName::new(name).ok())
            .unwrap_or_else(TechnicianName::unassigned)
    }

    pub fn slot(&self) -> Option<TimeSlot> {
        self.time_slot.as_deref().and_then(TimeSlot::parse)
    }

    pub fn start(&self, offset: &FixedOffset) -> Option<NaiveDateTime> {
        self.from_datetime
            .as_deref()
            .and_then(|raw| parse_instant(raw, offset))
    }

    pub fn end(&self, offset: &FixedOffset) -> Option<NaiveDateTime> {
        self.to_datetime
            .as_deref()
            .and_then(|raw| parse_instant(raw, offset))
    }

    /// Calendar day of the intervention: the start's date, else `date`.
    pub fn calendar_date(&self, offset: &FixedOffset) -> Option<NaiveDate> {
        self.start(offset)
            .map(|start| start.date())
            .or_else(|| self.date.as_deref().and_then(parse_date))
    }

    /// Free-text notes with markup stripped for safe display.
    pub fn sanitized_notes(&self) -> Option<String> {
        self.calendar_notes
            .as_deref()
            .map(|notes| ammonia::clean(notes.trim()))
            .filter(|notes| !notes.is_empty())
    }
}
