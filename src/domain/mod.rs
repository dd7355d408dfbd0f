//! Domain values and pure rules of the intervention calendar.

pub mod filter;
pub mod intervention;
pub mod interval;
pub mod status;
pub mod types;
