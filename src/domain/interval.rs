//! Time spans of interventions and their overlap semantics.

use chrono::{FixedOffset, NaiveDateTime, TimeDelta};
use serde::Serialize;

use crate::domain::intervention::{Intervention, parse_date};
use crate::domain::types::{InterventionId, fallback_duration};

/// Time span occupied by an intervention on the calendar.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub struct Interval {
    pub id: InterventionId,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// Both bounds come from concrete backend timestamps.
    pub precise: bool,
}

impl Interval {
    pub fn new(id: InterventionId, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            id,
            start,
            end,
            precise: true,
        }
    }

    /// Builds the interval of an intervention in the display offset.
    ///
    /// Missing or unparseable bounds fall back to the time slot: the start
    /// defaults to the slot start on the intervention's day and the end to
    /// the start plus the slot's nominal duration. Returns `None` when no
    /// day can be determined or the fallback end is out of range.
    pub fn from_intervention(intervention: &Intervention, offset: &FixedOffset) -> Option<Self> {
        let slot = intervention.slot();
        let start = intervention.start(offset);
        let end = intervention.end(offset);

        if let (Some(start), Some(end)) = (start, end) {
            return Some(Self::new(intervention.id, start, end));
        }

        let start = match start {
            Some(start) => start,
            None => {
                let day = intervention.date.as_deref().and_then(parse_date)?;
                let time = slot.map(|slot| slot.start_time()).unwrap_or_default();
                day.and_time(time)
            }
        };

        let Some(end) = start.checked_add_signed(fallback_duration(slot)) else {
            log::debug!("Intervention {} ends out of range, skipping", intervention.id);
            return None;
        };

        Some(Self {
            id: intervention.id,
            start,
            end,
            precise: false,
        })
    }

    /// Length of the interval; never negative.
    pub fn duration(&self) -> TimeDelta {
        (self.end - self.start).max(TimeDelta::zero())
    }

    pub fn duration_hours(&self) -> f64 {
        self.duration().num_minutes() as f64 / 60.0
    }
}

/// Half-open intersection test between two interventions' intervals.
///
/// Touching endpoints do not overlap, and intervals without concrete
/// timestamps never overlap anything.
pub fn overlaps(a: &Interval, b: &Interval) -> bool {
    if !a.precise || !b.precise {
        return false;
    }
    a.start < b.end && b.start < a.end
}
