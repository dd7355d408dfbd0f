//! Active calendar filters and the date range they select.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, TimeDelta};

use crate::domain::intervention::Intervention;
use crate::domain::status::Status;
use crate::domain::types::{CalendarMode, normalize_label};

/// Filter state of the calendar view.
///
/// Technician and status sets hold normalized values; an empty set means
/// the dimension is not filtered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CalendarFilter {
    pub mode: CalendarMode,
    /// Day the view is anchored on: any day of the shown week, or the day.
    pub anchor: NaiveDate,
    pub technicians: BTreeSet<String>,
    pub statuses: BTreeSet<String>,
}

impl CalendarFilter {
    pub fn new(mode: CalendarMode, anchor: NaiveDate) -> Self {
        Self {
            mode,
            anchor,
            technicians: BTreeSet::new(),
            statuses: BTreeSet::new(),
        }
    }

    pub fn technician(mut self, name: &str) -> Self {
        let normalized = normalize_label(name);
        if !normalized.is_empty() {
            self.technicians.insert(normalized);
        }
        self
    }

    pub fn status(mut self, label: &str) -> Self {
        let normalized = normalize_label(label);
        if !normalized.is_empty() {
            self.statuses.insert(normalized);
        }
        self
    }

    /// First shown day and the day after the last one.
    pub fn visible_range(&self) -> (NaiveDate, NaiveDate) {
        match self.mode {
            CalendarMode::Weekly => {
                let offset = i64::from(self.anchor.weekday().num_days_from_monday());
                let monday = self.anchor - TimeDelta::days(offset);
                (monday, monday + TimeDelta::days(7))
            }
            CalendarMode::Daily => (self.anchor, self.anchor + TimeDelta::days(1)),
        }
    }

    /// Every day shown by the view, in order.
    pub fn visible_days(&self) -> Vec<NaiveDate> {
        let (first, end) = self.visible_range();
        first.iter_days().take_while(|day| *day < end).collect()
    }

    pub fn contains_day(&self, day: NaiveDate) -> bool {
        let (first, end) = self.visible_range();
        first <= day && day < end
    }

    pub fn accepts_technician(&self, intervention: &Intervention) -> bool {
        self.technicians.is_empty()
            || self
                .technicians
                .contains(&normalize_label(intervention.technician().as_str()))
    }

    pub fn accepts_status(&self, status: &Status) -> bool {
        self.statuses.is_empty() || self.statuses.iter().any(|entry| status.matches(entry))
    }
}
