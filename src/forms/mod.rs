//! Form definitions carrying the calendar's filter state.

use thiserror::Error;
use validator::ValidationErrors;

pub mod calendar;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("malformed query string: {0}")]
    Query(String),

    #[error("invalid date")]
    InvalidDate,

    #[error("invalid calendar mode")]
    InvalidMode,
}
