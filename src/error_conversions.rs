//! Error conversion glue between layers.
//!
//! The domain layer must not depend on service or form error types, so the
//! conversions from its constraint errors live here.

use crate::domain::types::TypeConstraintError;
use crate::forms::FormError;
use crate::services::errors::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(val.to_string())
    }
}

impl From<TypeConstraintError> for FormError {
    fn from(val: TypeConstraintError) -> Self {
        match val {
            TypeConstraintError::InvalidDate(_) => FormError::InvalidDate,
            TypeConstraintError::InvalidMode(_) => FormError::InvalidMode,
            other => FormError::Query(other.to_string()),
        }
    }
}
