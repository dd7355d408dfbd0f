//! DTO modules handed to the rendering layer.

pub mod calendar;
pub mod status;
