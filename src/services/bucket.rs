//! Grouping of interventions into calendar cells.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use chrono::{FixedOffset, NaiveDate};
use serde::Serialize;

use crate::domain::filter::CalendarFilter;
use crate::domain::intervention::Intervention;
use crate::domain::status::display_status;
use crate::domain::types::{CalendarMode, TechnicianName};

/// Calendar column an intervention belongs to.
#[derive(Clone, Debug, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum BucketAxis {
    Day(NaiveDate),
    Technician(TechnicianName),
}

impl Display for BucketAxis {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            BucketAxis::Day(day) => write!(f, "{day}"),
            BucketAxis::Technician(name) => write!(f, "{name}"),
        }
    }
}

/// Calendar cell: a column crossed with the `HH:MM` row the block starts in.
#[derive(Clone, Debug, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BucketKey {
    pub axis: BucketAxis,
    pub slot: String,
}

/// Row label of an intervention: the literal start time when a usable
/// timestamp exists, else the start of its time slot.
pub fn slot_label(intervention: &Intervention, offset: &FixedOffset) -> Option<String> {
    if let Some(start) = intervention.start(offset) {
        return Some(start.format("%H:%M").to_string());
    }
    intervention
        .slot()
        .map(|slot| slot.start_time().format("%H:%M").to_string())
}

/// Column of an intervention under the given mode, if it is shown at all.
fn axis_of(
    intervention: &Intervention,
    filter: &CalendarFilter,
    offset: &FixedOffset,
) -> Option<BucketAxis> {
    let day = intervention.calendar_date(offset)?;
    match filter.mode {
        CalendarMode::Weekly => filter.contains_day(day).then_some(BucketAxis::Day(day)),
        CalendarMode::Daily => {
            (day == filter.anchor).then(|| BucketAxis::Technician(intervention.technician()))
        }
    }
}

/// Groups interventions into cells after applying the filters.
///
/// Within a cell interventions keep their input order. Records without a
/// usable day or row are left out silently.
pub fn bucket<'a>(
    interventions: &'a [Intervention],
    filter: &CalendarFilter,
    offset: &FixedOffset,
) -> BTreeMap<BucketKey, Vec<&'a Intervention>> {
    let mut buckets: BTreeMap<BucketKey, Vec<&'a Intervention>> = BTreeMap::new();

    for intervention in interventions {
        if !filter.accepts_technician(intervention)
            || !filter.accepts_status(&display_status(intervention))
        {
            continue;
        }

        let Some(axis) = axis_of(intervention, filter, offset) else {
            continue;
        };

        let Some(slot) = slot_label(intervention, offset) else {
            log::debug!(
                "Intervention {} has no start time nor slot, skipping",
                intervention.id
            );
            continue;
        };

        buckets
            .entry(BucketKey { axis, slot })
            .or_default()
            .push(intervention);
    }

    buckets
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::types::InterventionId;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    fn intervention(id: i64, technician: &str, date: &str, slot: Option<&str>) -> Intervention {
        let mut i = Intervention::new(InterventionId::new(id).unwrap());
        i.technician_name = Some(technician.to_string());
        i.date = Some(date.to_string());
        i.time_slot = slot.map(str::to_string);
        i
    }

    fn ids(items: &[&Intervention]) -> Vec<i64> {
        items.iter().map(|i| i.id.get()).collect()
    }

    #[test]
    fn weekly_buckets_by_day_and_slot_start() {
        let data = vec![
            intervention(1, "Mario", "2024-05-06", Some("morning")),
            intervention(2, "Luigi", "2024-05-06", Some("full_day")),
            intervention(3, "Mario", "2024-05-07", Some("afternoon")),
        ];
        let filter = CalendarFilter::new(CalendarMode::Weekly, day(8));

        let buckets = bucket(&data, &filter, &utc());

        let monday_morning = BucketKey {
            axis: BucketAxis::Day(day(6)),
            slot: "08:00".to_string(),
        };
        let tuesday_afternoon = BucketKey {
            axis: BucketAxis::Day(day(7)),
            slot: "14:00".to_string(),
        };
        assert_eq!(buckets.len(), 2);
        assert_eq!(ids(&buckets[&monday_morning]), vec![1, 2]);
        assert_eq!(ids(&buckets[&tuesday_afternoon]), vec![3]);
    }

    #[test]
    fn precise_start_overrides_slot_and_date() {
        let mut i = intervention(1, "Mario", "2024-05-06", Some("morning"));
        i.from_datetime = Some("2024-05-07T10:30:00Z".to_string());
        i.to_datetime = Some("2024-05-07T11:30:00Z".to_string());
        let data = vec![i];
        let filter = CalendarFilter::new(CalendarMode::Weekly, day(6));

        let buckets = bucket(&data, &filter, &utc());

        let key = buckets.keys().next().expect("one bucket");
        assert_eq!(key.axis, BucketAxis::Day(day(7)));
        assert_eq!(key.slot, "10:30");
    }

    #[test]
    fn daily_buckets_by_technician_on_anchor_day() {
        let data = vec![
            intervention(1, "Mario", "2024-05-06", Some("morning")),
            intervention(2, " ", "2024-05-06", Some("morning")),
            intervention(3, "Mario", "2024-05-07", Some("morning")),
        ];
        let filter = CalendarFilter::new(CalendarMode::Daily, day(6));

        let buckets = bucket(&data, &filter, &utc());

        let axes: Vec<_> = buckets.keys().map(|k| k.axis.to_string()).collect();
        assert_eq!(axes, vec!["-".to_string(), "Mario".to_string()]);
    }

    #[test]
    fn filters_are_combined() {
        let mut cancelled = intervention(2, "Mario", "2024-05-06", Some("morning"));
        cancelled.cancelled_by = Some(json!("admin"));
        let data = vec![
            intervention(1, "Mario", "2024-05-06", Some("morning")),
            cancelled,
            intervention(3, "Luigi", "2024-05-06", Some("morning")),
        ];
        let filter = CalendarFilter::new(CalendarMode::Weekly, day(6))
            .technician("mario")
            .status("To Assign");

        let buckets = bucket(&data, &filter, &utc());

        let all: Vec<i64> = buckets.values().flat_map(|v| ids(v)).collect();
        assert_eq!(all, vec![1]);
    }

    #[test]
    fn inconsistent_records_are_skipped() {
        let data = vec![
            intervention(1, "Mario", "2024-05-06", None),
            intervention(2, "Mario", "not a date", Some("morning")),
            intervention(3, "Mario", "2024-06-06", Some("morning")),
        ];
        let filter = CalendarFilter::new(CalendarMode::Weekly, day(6));

        assert!(bucket(&data, &filter, &utc()).is_empty());
    }
}
