pub mod bucket;
pub mod calendar;
pub mod errors;
pub mod layout;
pub mod z_order;

pub use errors::{ServiceError, ServiceResult};
