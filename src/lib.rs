//! Presentation engine for the field-service intervention calendar.
//!
//! Raw intervention records delivered by the backend are classified into a
//! lifecycle status, grouped into calendar buckets, laid out into
//! conflict-free columns and finally stacked for rendering.

pub mod domain;
pub mod dto;
pub mod error_conversions;
pub mod forms;
pub mod models;
pub mod repository;
pub mod services;

/// Fixed vertical scale of the calendar grid.
pub const PIXELS_PER_HOUR: f64 = 80.0;

/// Technician placeholder used by the backend for unassigned interventions.
pub const UNASSIGNED_TECHNICIAN: &str = "-";
