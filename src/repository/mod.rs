//! Read-only sources of intervention records.

use crate::domain::intervention::Intervention;
use crate::repository::errors::RepositoryResult;

pub mod errors;
pub mod json;
#[cfg(feature = "test-mocks")]
pub mod mock;

pub use json::JsonInterventionRepository;

pub trait InterventionReader {
    /// Returns every intervention the backend exposes to the calendar.
    fn list_interventions(&self) -> RepositoryResult<Vec<Intervention>>;
}
