//! Lifecycle status derived from the raw intervention fields.
//!
//! Classification is an ordered rule ladder: rules are evaluated top-down and
//! the first one whose predicate holds decides the status. Later rules may
//! therefore assume every earlier predicate was false.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::domain::intervention::{Intervention, has_text, has_value};
use crate::domain::types::normalize_label;

/// Closed set of lifecycle states shown on the calendar.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StatusKey {
    DaAssegnare,
    AttesaPreventivo,
    AttesaRicambio,
    InCarico,
    DaConfermare,
    Completato,
    NonCompletato,
    Annullato,
    Fatturato,
    Collocamento,
}

impl StatusKey {
    /// Every key, in the order the filter UI lists them.
    pub const ALL: [StatusKey; 10] = [
        StatusKey::DaAssegnare,
        StatusKey::AttesaPreventivo,
        StatusKey::AttesaRicambio,
        StatusKey::InCarico,
        StatusKey::DaConfermare,
        StatusKey::Completato,
        StatusKey::NonCompletato,
        StatusKey::Annullato,
        StatusKey::Fatturato,
        StatusKey::Collocamento,
    ];

    /// Parses a backend key, tolerating surrounding whitespace and case.
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = normalize_label(value);
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == normalized)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            StatusKey::DaAssegnare => "da_assegnare",
            StatusKey::AttesaPreventivo => "attesa_preventivo",
            StatusKey::AttesaRicambio => "attesa_ricambio",
            StatusKey::InCarico => "in_carico",
            StatusKey::DaConfermare => "da_confermare",
            StatusKey::Completato => "completato",
            StatusKey::NonCompletato => "non_completato",
            StatusKey::Annullato => "annullato",
            StatusKey::Fatturato => "fatturato",
            StatusKey::Collocamento => "collocamento",
        }
    }

    /// Human-facing label.
    pub const fn label(self) -> &'static str {
        match self {
            StatusKey::DaAssegnare => "To assign",
            StatusKey::AttesaPreventivo => "Awaiting quote",
            StatusKey::AttesaRicambio => "Awaiting spare part",
            StatusKey::InCarico => "In progress",
            StatusKey::DaConfermare => "To confirm",
            StatusKey::Completato => "Completed",
            StatusKey::NonCompletato => "Not completed",
            StatusKey::Annullato => "Cancelled",
            StatusKey::Fatturato => "Invoiced",
            StatusKey::Collocamento => "Placement",
        }
    }

    /// States the backend sets directly and the rule ladder never derives.
    pub const fn is_pass_through(self) -> bool {
        matches!(
            self,
            StatusKey::AttesaPreventivo | StatusKey::AttesaRicambio | StatusKey::Collocamento
        )
    }
}

impl Display for StatusKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of classifying an intervention.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub struct Status {
    pub label: &'static str,
    pub key: StatusKey,
}

impl From<StatusKey> for Status {
    fn from(key: StatusKey) -> Self {
        Self {
            label: key.label(),
            key,
        }
    }
}

impl Status {
    /// Whether a normalized filter entry selects this status.
    pub fn matches(&self, normalized: &str) -> bool {
        normalize_label(self.label) == normalized || self.key.as_str() == normalized
    }
}

/// One step of the classification ladder.
pub struct StatusRule {
    pub name: &'static str,
    pub applies: fn(&Intervention) -> bool,
    pub key: StatusKey,
}

fn is_invoiced(i: &Intervention) -> bool {
    has_value(i.invoiced_by.as_ref())
}

fn is_cancelled(i: &Intervention) -> bool {
    has_value(i.cancelled_by.as_ref())
}

fn lacks_scheduling(i: &Intervention) -> bool {
    [
        i.assigned_to_name.as_deref(),
        i.date.as_deref(),
        i.time_slot.as_deref(),
        i.from_datetime.as_deref(),
        i.to_datetime.as_deref(),
    ]
    .into_iter()
    .any(|field| !has_text(field))
}

fn has_report(i: &Intervention) -> bool {
    has_value(i.report_id.as_ref())
}

fn is_approved(i: &Intervention) -> bool {
    has_report(i) && has_text(i.approved_by_name.as_deref())
}

fn is_approved_failure(i: &Intervention) -> bool {
    is_approved(i) && i.report_is_failed == Some(true)
}

fn always(_: &Intervention) -> bool {
    true
}

/// Classification ladder, highest priority first. The last rule always
/// applies, which makes [`classify`] total.
pub const STATUS_RULES: &[StatusRule] = &[
    StatusRule {
        name: "invoiced",
        applies: is_invoiced,
        key: StatusKey::Fatturato,
    },
    StatusRule {
        name: "cancelled",
        applies: is_cancelled,
        key: StatusKey::Annullato,
    },
    StatusRule {
        name: "missing scheduling",
        applies: lacks_scheduling,
        key: StatusKey::DaAssegnare,
    },
    StatusRule {
        name: "approved failed report",
        applies: is_approved_failure,
        key: StatusKey::NonCompletato,
    },
    StatusRule {
        name: "approved report",
        applies: is_approved,
        key: StatusKey::Completato,
    },
    StatusRule {
        name: "report awaiting review",
        applies: has_report,
        key: StatusKey::DaConfermare,
    },
    StatusRule {
        name: "scheduled",
        applies: always,
        key: StatusKey::InCarico,
    },
];

/// Derives the lifecycle status of an intervention.
pub fn classify(intervention: &Intervention) -> Status {
    STATUS_RULES
        .iter()
        .find(|rule| (rule.applies)(intervention))
        .map(|rule| rule.key)
        .unwrap_or(StatusKey::InCarico)
        .into()
}

/// Status shown to the user: the derived status, or the backend's own key
/// when the ladder only reached its baseline and the backend stored one of
/// the states it cannot derive.
pub fn display_status(intervention: &Intervention) -> Status {
    let derived = classify(intervention);
    if derived.key != StatusKey::InCarico {
        return derived;
    }
    intervention
        .status
        .as_deref()
        .and_then(StatusKey::parse)
        .filter(|key| key.is_pass_through())
        .map(Status::from)
        .unwrap_or(derived)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::types::InterventionId;

    fn scheduled() -> Intervention {
        let mut intervention = Intervention::new(InterventionId::new(1).unwrap());
        intervention.assigned_to_name = Some("Dispatcher".to_string());
        intervention.date = Some("2024-05-06".to_string());
        intervention.time_slot = Some("morning".to_string());
        intervention.from_datetime = Some("2024-05-06T09:00:00Z".to_string());
        intervention.to_datetime = Some("2024-05-06T10:00:00Z".to_string());
        intervention
    }

    #[test]
    fn invoiced_wins_over_everything() {
        let mut intervention = Intervention::new(InterventionId::new(1).unwrap());
        intervention.invoiced_by = Some(json!(4));
        intervention.cancelled_by = Some(json!("admin"));
        intervention.report_is_failed = Some(true);

        assert_eq!(classify(&intervention).key, StatusKey::Fatturato);
        assert_eq!(classify(&intervention).label, "Invoiced");
    }

    #[test]
    fn cancelled_beats_missing_scheduling() {
        let mut intervention = Intervention::new(InterventionId::new(1).unwrap());
        intervention.cancelled_by = Some(json!("admin"));
        assert_eq!(classify(&intervention).key, StatusKey::Annullato);
    }

    #[test]
    fn any_blank_scheduling_field_means_to_assign() {
        let mut intervention = scheduled();
        intervention.to_datetime = Some("  ".to_string());
        assert_eq!(classify(&intervention).key, StatusKey::DaAssegnare);

        let mut intervention = scheduled();
        intervention.assigned_to_name = None;
        assert_eq!(classify(&intervention).key, StatusKey::DaAssegnare);
    }

    #[test]
    fn unparseable_timestamp_still_counts_as_scheduled() {
        let mut intervention = scheduled();
        intervention.from_datetime = Some("garbage".to_string());
        assert_eq!(classify(&intervention).key, StatusKey::InCarico);
    }

    #[test]
    fn fully_scheduled_is_in_progress() {
        assert_eq!(classify(&scheduled()), Status::from(StatusKey::InCarico));
    }

    #[test]
    fn report_without_approval_is_to_confirm() {
        let mut intervention = scheduled();
        intervention.report_id = Some(json!(77));
        assert_eq!(classify(&intervention).key, StatusKey::DaConfermare);
    }

    #[test]
    fn approved_report_resolves_by_failure_flag() {
        let mut intervention = scheduled();
        intervention.report_id = Some(json!(77));
        intervention.approved_by_name = Some("Boss".to_string());
        assert_eq!(classify(&intervention).key, StatusKey::Completato);

        intervention.report_is_failed = Some(false);
        assert_eq!(classify(&intervention).key, StatusKey::Completato);

        intervention.report_is_failed = Some(true);
        assert_eq!(classify(&intervention).key, StatusKey::NonCompletato);
    }

    #[test]
    fn approval_without_report_stays_in_progress() {
        let mut intervention = scheduled();
        intervention.approved_by_name = Some("Boss".to_string());
        intervention.report_is_failed = Some(true);
        assert_eq!(classify(&intervention).key, StatusKey::InCarico);
    }

    #[test]
    fn classification_is_deterministic() {
        let mut intervention = scheduled();
        intervention.report_id = Some(json!("r-1"));
        assert_eq!(classify(&intervention), classify(&intervention));
    }

    #[test]
    fn pass_through_keys_only_replace_baseline() {
        let mut intervention = scheduled();
        intervention.status = Some(" Attesa_Ricambio ".to_string());
        assert_eq!(display_status(&intervention).key, StatusKey::AttesaRicambio);

        intervention.status = Some("fatturato".to_string());
        assert_eq!(display_status(&intervention).key, StatusKey::InCarico);

        intervention.report_id = Some(json!(1));
        intervention.status = Some("collocamento".to_string());
        assert_eq!(display_status(&intervention).key, StatusKey::DaConfermare);
    }

    #[test]
    fn parse_round_trips_every_key() {
        for key in StatusKey::ALL {
            assert_eq!(StatusKey::parse(key.as_str()), Some(key));
        }
        assert_eq!(StatusKey::parse("archiviato"), None);
    }

    #[test]
    fn status_matches_label_or_key() {
        let status = Status::from(StatusKey::DaConfermare);
        assert!(status.matches("to confirm"));
        assert!(status.matches("da_confermare"));
        assert!(!status.matches("completed"));
    }
}
