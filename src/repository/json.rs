//! Intervention source backed by a JSON export of the backend response.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::domain::intervention::Intervention;
use crate::domain::types::InterventionId;
use crate::repository::InterventionReader;
use crate::repository::errors::RepositoryResult;

/// Reads the intervention array from a file on every call.
#[derive(Clone, Debug)]
pub struct JsonInterventionRepository {
    path: PathBuf,
}

impl JsonInterventionRepository {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl InterventionReader for JsonInterventionRepository {
    fn list_interventions(&self) -> RepositoryResult<Vec<Intervention>> {
        let payload = std::fs::read_to_string(&self.path)?;
        parse_interventions(&payload)
    }
}

/// Decodes a JSON array of interventions.
///
/// The payload must be an array, but individual malformed records are
/// skipped so they do not hide the rest of the calendar.
pub fn parse_interventions(payload: &str) -> RepositoryResult<Vec<Intervention>> {
    let records: Vec<Value> = serde_json::from_str(payload)?;
    let total = records.len();

    let interventions: Vec<Intervention> = records
        .into_iter()
        .enumerate()
        .filter_map(
            |(position, record)| match serde_json::from_value::<Intervention>(record) {
                Ok(intervention) if InterventionId::new(intervention.id.get()).is_ok() => {
                    Some(intervention)
                }
                Ok(intervention) => {
                    log::warn!("Skipping intervention with invalid id {}", intervention.id);
                    None
                }
                Err(err) => {
                    log::warn!("Skipping malformed intervention at position {position}: {err}");
                    None
                }
            },
        )
        .collect();

    if interventions.len() < total {
        log::warn!(
            "Loaded {} of {total} interventions, the rest were malformed",
            interventions.len()
        );
    }

    Ok(interventions)
}
