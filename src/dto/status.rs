//! Visual category of each status key.

use serde::Serialize;

use crate::domain::status::StatusKey;

/// Color family the rendering layer paints a status with.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StatusCategory {
    Red,
    Orange,
    Amber,
    Blue,
    Purple,
    Green,
    Rose,
    Gray,
    Teal,
    Indigo,
    /// Anything the backend sends that is not a known key.
    Neutral,
}

impl From<StatusKey> for StatusCategory {
    fn from(key: StatusKey) -> Self {
        match key {
            StatusKey::DaAssegnare => StatusCategory::Red,
            StatusKey::AttesaPreventivo => StatusCategory::Orange,
            StatusKey::AttesaRicambio => StatusCategory::Amber,
            StatusKey::InCarico => StatusCategory::Blue,
            StatusKey::DaConfermare => StatusCategory::Purple,
            StatusKey::Completato => StatusCategory::Green,
            StatusKey::NonCompletato => StatusCategory::Rose,
            StatusKey::Annullato => StatusCategory::Gray,
            StatusKey::Fatturato => StatusCategory::Teal,
            StatusKey::Collocamento => StatusCategory::Indigo,
        }
    }
}

/// Looks up the category of a raw key; unknown keys map to `Neutral`.
pub fn category_for(raw_key: &str) -> StatusCategory {
    StatusKey::parse(raw_key)
        .map(StatusCategory::from)
        .unwrap_or(StatusCategory::Neutral)
}

/// Entry of the status filter dropdown.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct StatusOption {
    pub key: StatusKey,
    pub label: &'static str,
    pub category: StatusCategory,
}

/// Every status the filter UI offers, including the pass-through ones.
pub fn status_options() -> Vec<StatusOption> {
    StatusKey::ALL
        .into_iter()
        .map(|key| StatusOption {
            key,
            label: key.label(),
            category: key.into(),
        })
        .collect()
}
