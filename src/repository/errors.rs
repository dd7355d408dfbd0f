//! Errors raised by intervention sources.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("failed to read interventions: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed interventions payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("intervention source unavailable: {0}")]
    Unavailable(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;
