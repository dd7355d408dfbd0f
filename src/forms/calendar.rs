//! Filter form submitted through the calendar's query string.

use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::domain::filter::CalendarFilter;
use crate::domain::types::{CalendarMode, parse_day};
use crate::forms::FormError;

/// Raw filter state: `mode`, `date` and repeated `technician` / `status`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CalendarFilterForm {
    /// `weekly` or `daily`; the configured default when absent.
    pub mode: Option<String>,
    /// Anchor day as `YYYY-MM-DD`; today when absent.
    #[validate(length(equal = 10))]
    pub date: Option<String>,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub technician: Vec<String>,
    #[serde(default)]
    #[validate(length(max = 20))]
    pub status: Vec<String>,
}

impl CalendarFilterForm {
    /// Decodes the form from a URL query string (without the leading `?`).
    pub fn from_query(query: &str) -> Result<Self, FormError> {
        serde_html_form::from_str(query.trim_start_matches('?'))
            .map_err(|err| FormError::Query(err.to_string()))
    }

    /// Validates the form and resolves defaults into a [`CalendarFilter`].
    pub fn into_filter(
        self,
        default_mode: CalendarMode,
        today: NaiveDate,
    ) -> Result<CalendarFilter, FormError> {
        self.validate()?;

        let mode = match self.mode.as_deref().map(str::trim) {
            Some(mode) if !mode.is_empty() => mode.parse::<CalendarMode>()?,
            _ => default_mode,
        };

        let anchor = match self.date.as_deref().map(str::trim) {
            Some(date) if !date.is_empty() => parse_day(date)?,
            _ => today,
        };

        let filter = self
            .technician
            .iter()
            .fold(CalendarFilter::new(mode, anchor), |filter, name| {
                filter.technician(name)
            });

        Ok(self
            .status
            .iter()
            .fold(filter, |filter, label| filter.status(label)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 9).unwrap()
    }

    #[test]
    fn decodes_repeated_query_parameters() {
        let form = CalendarFilterForm::from_query(
            "?mode=daily&date=2024-05-06&technician=Mario&technician=%20Luigi&status=In%20progress",
        )
        .expect("valid query");

        let filter = form
            .into_filter(CalendarMode::Weekly, today())
            .expect("valid filter");

        assert_eq!(filter.mode, CalendarMode::Daily);
        assert_eq!(filter.anchor, NaiveDate::from_ymd_opt(2024, 5, 6).unwrap());
        assert_eq!(
            filter.technicians.into_iter().collect::<Vec<_>>(),
            vec!["luigi".to_string(), "mario".to_string()]
        );
        assert!(filter.statuses.contains("in progress"));
    }

    #[test]
    fn empty_form_uses_defaults() {
        let filter = CalendarFilterForm::default()
            .into_filter(CalendarMode::Weekly, today())
            .expect("valid filter");

        assert_eq!(filter, CalendarFilter::new(CalendarMode::Weekly, today()));
    }

    #[test]
    fn rejects_unknown_mode() {
        let form = CalendarFilterForm {
            mode: Some("monthly".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            form.into_filter(CalendarMode::Weekly, today()),
            Err(FormError::InvalidMode)
        ));
    }

    #[test]
    fn rejects_malformed_date() {
        let form = CalendarFilterForm {
            date: Some("2024-13-01".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            form.into_filter(CalendarMode::Weekly, today()),
            Err(FormError::InvalidDate)
        ));

        let form = CalendarFilterForm {
            date: Some("9 May".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            form.into_filter(CalendarMode::Weekly, today()),
            Err(FormError::Validation(_))
        ));
    }

    #[test]
    fn rejects_oversized_status_filter() {
        let form = CalendarFilterForm {
            status: vec!["completed".to_string(); 21],
            ..Default::default()
        };
        assert!(matches!(
            form.into_filter(CalendarMode::Weekly, today()),
            Err(FormError::Validation(_))
        ));
    }
}
