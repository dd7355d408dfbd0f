//! DTOs describing a rendered calendar page.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::intervention::Intervention;
use crate::domain::status::Status;
use crate::domain::types::{CalendarMode, InterventionId};
use crate::dto::status::{StatusCategory, StatusOption};
use crate::services::bucket::{BucketAxis, BucketKey};

/// One intervention ready for absolute positioning.
#[derive(Clone, Debug, Serialize)]
pub struct CalendarBlock {
    pub intervention: Intervention,
    pub status: Status,
    pub category: StatusCategory,
    pub column: usize,
    pub total_columns: usize,
    pub z_index: i32,
    /// Minutes between the top of the hour row and the block start.
    pub start_offset_minutes: u32,
    pub top_px: f64,
    pub height_px: f64,
    pub duration_hours: f64,
    /// The block overlaps another one and may be restacked by the user.
    pub reorderable: bool,
    pub notes_html: Option<String>,
    pub manual_check: Option<bool>,
}

impl CalendarBlock {
    pub fn id(&self) -> InterventionId {
        self.intervention.id
    }
}

/// Blocks sharing one calendar cell, in paint order of their base index.
#[derive(Clone, Debug, Serialize)]
pub struct CalendarCell {
    pub key: BucketKey,
    pub blocks: Vec<CalendarBlock>,
}

/// Data required to render the calendar view.
#[derive(Clone, Debug, Serialize)]
pub struct CalendarPageData {
    pub mode: CalendarMode,
    pub anchor: NaiveDate,
    /// Days covered by the view.
    pub days: Vec<NaiveDate>,
    /// Columns of the grid: days in weekly mode, technicians in daily mode.
    pub columns: Vec<BucketAxis>,
    pub cells: Vec<CalendarCell>,
    /// Technicians available in the technician filter.
    pub technicians: Vec<String>,
    pub status_options: Vec<StatusOption>,
}

impl CalendarPageData {
    pub fn blocks(&self) -> impl Iterator<Item = &CalendarBlock> {
        self.cells.iter().flat_map(|cell| cell.blocks.iter())
    }

    pub fn find_block(&self, id: InterventionId) -> Option<&CalendarBlock> {
        self.blocks().find(|block| block.id() == id)
    }
}
