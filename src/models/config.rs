//! Configuration model loaded from external sources.

use chrono::{FixedOffset, Offset, Utc};
use serde::Deserialize;

use crate::domain::types::CalendarMode;

#[derive(Clone, Debug, Deserialize)]
/// Settings of the calendar renderer.
pub struct CalendarConfig {
    /// JSON file with the backend's intervention array.
    pub interventions_path: String,
    /// Offset of the wall clock the calendar is displayed in.
    #[serde(default)]
    pub utc_offset_minutes: i32,
    #[serde(default)]
    pub default_mode: CalendarMode,
}

impl CalendarConfig {
    /// Display offset, UTC when the configured value is out of range.
    pub fn display_offset(&self) -> FixedOffset {
        self.utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| {
                log::warn!(
                    "Ignoring out of range utc_offset_minutes {}",
                    self.utc_offset_minutes
                );
                Utc.fix()
            })
    }
}
