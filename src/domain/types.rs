//! Strongly-typed value objects used by the calendar engine.
//!
//! Backend payloads are loosely typed; these wrappers give the rest of the
//! crate closed enumerations and normalized strings to work with.
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided date could not be parsed as `YYYY-MM-DD`.
    #[error("invalid date: {0}")]
    InvalidDate(String),
    /// Provided calendar mode is neither `weekly` nor `daily`.
    #[error("invalid calendar mode: {0}")]
    InvalidMode(String),
}

/// Lower-cases and trims a label so filter values compare loosely.
pub fn normalize_label(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Parses a strict `YYYY-MM-DD` day.
pub fn parse_day(value: &str) -> Result<NaiveDate, TypeConstraintError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| TypeConstraintError::InvalidDate(value.to_string()))
}

/// Unique identifier of an intervention.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InterventionId(i64);

impl InterventionId {
    /// Creates a new identifier ensuring it is greater than zero.
    pub fn new(value: i64) -> Result<Self, TypeConstraintError> {
        if value > 0 {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::NonPositiveId)
        }
    }

    /// Returns the raw `i64` backing this identifier.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl Display for InterventionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Trimmed, non-empty technician display name.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TechnicianName(String);

impl TechnicianName {
    /// Constructs a trimmed, non-empty value.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self(trimmed))
    }

    /// Placeholder technician for interventions nobody has been assigned to.
    pub fn unassigned() -> Self {
        Self(crate::UNASSIGNED_TECHNICIAN.to_string())
    }

    /// Whether this is the unassigned placeholder.
    pub fn is_unassigned(&self) -> bool {
        self.0 == crate::UNASSIGNED_TECHNICIAN
    }

    /// Borrow the value as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for TechnicianName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Coarse scheduling slot used when precise timestamps are missing.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TimeSlot {
    Morning,
    Afternoon,
    FullDay,
}

impl TimeSlot {
    /// Parses the backend value, returning `None` for anything unrecognized.
    pub fn parse(value: &str) -> Option<Self> {
        match normalize_label(value).as_str() {
            "morning" => Some(TimeSlot::Morning),
            "afternoon" => Some(TimeSlot::Afternoon),
            "full_day" => Some(TimeSlot::FullDay),
            _ => None,
        }
    }

    /// Wall-clock start of the slot.
    pub fn start_time(self) -> NaiveTime {
        let hour = match self {
            TimeSlot::Morning | TimeSlot::FullDay => 8,
            TimeSlot::Afternoon => 14,
        };
        NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or_default()
    }

    /// Nominal length of the slot.
    pub fn duration(self) -> TimeDelta {
        match self {
            TimeSlot::Morning => TimeDelta::hours(5),
            TimeSlot::Afternoon => TimeDelta::hours(4),
            TimeSlot::FullDay => TimeDelta::hours(10),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimeSlot::Morning => "morning",
            TimeSlot::Afternoon => "afternoon",
            TimeSlot::FullDay => "full_day",
        }
    }
}

impl Display for TimeSlot {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Duration assumed for an intervention without usable end timestamp.
pub fn fallback_duration(slot: Option<TimeSlot>) -> TimeDelta {
    slot.map(TimeSlot::duration)
        .unwrap_or_else(|| TimeDelta::hours(1))
}

/// Calendar presentation mode.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CalendarMode {
    /// Columns are the days of one week.
    #[default]
    Weekly,
    /// Columns are the technicians working on one day.
    Daily,
}

impl FromStr for CalendarMode {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "weekly" => Ok(CalendarMode::Weekly),
            "daily" => Ok(CalendarMode::Daily),
            _ => Err(TypeConstraintError::InvalidMode(s.to_string())),
        }
    }
}
