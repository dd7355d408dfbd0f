//! Manual stacking order of calendar blocks.
//!
//! Placement comes from the column layout; this only decides which of two
//! overlapping blocks is painted on top.

use std::collections::HashMap;

use crate::domain::types::InterventionId;

/// Stacking value of the first block in a cell.
pub const BASE_Z_INDEX: i32 = 20;
/// Lowest value `send_to_back` may reach, above the grid chrome.
pub const MIN_Z_INDEX: i32 = 5;
const SEND_TO_BACK_STEP: i32 = 3;

/// Per-view stacking overrides, seeded from each block's position in its
/// cell. Owned by one calendar view and discarded with it.
#[derive(Debug, Default, Clone)]
pub struct ZOrderManager {
    order: HashMap<InterventionId, i32>,
}

impl ZOrderManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the base value of a block the first time it is seen.
    pub fn observe(&mut self, id: InterventionId, index_in_bucket: usize) -> i32 {
        *self
            .order
            .entry(id)
            .or_insert_with(|| base_for(index_in_bucket))
    }

    /// Current value of a block, or its base value when never observed.
    pub fn get(&self, id: InterventionId, fallback_index: usize) -> i32 {
        self.order
            .get(&id)
            .copied()
            .unwrap_or_else(|| base_for(fallback_index))
    }

    /// Lifts a block above every tracked block.
    pub fn bring_to_front(&mut self, id: InterventionId) -> i32 {
        let top = self
            .order
            .values()
            .copied()
            .max()
            .unwrap_or(BASE_Z_INDEX)
            .max(BASE_Z_INDEX);
        let value = top.saturating_add(1);
        self.order.insert(id, value);
        log::debug!("Intervention {id} brought to front at {value}");
        value
    }

    /// Pushes a block down a few levels, never below [`MIN_Z_INDEX`].
    pub fn send_to_back(&mut self, id: InterventionId) -> i32 {
        let current = self.order.get(&id).copied().unwrap_or(BASE_Z_INDEX);
        let value = (current - SEND_TO_BACK_STEP).max(MIN_Z_INDEX);
        self.order.insert(id, value);
        log::debug!("Intervention {id} sent to back at {value}");
        value
    }

    /// Forgets every override.
    pub fn reset(&mut self) {
        self.order.clear();
    }
}

fn base_for(index: usize) -> i32 {
    i32::try_from(index)
        .map(|index| BASE_Z_INDEX.saturating_add(index))
        .unwrap_or(i32::MAX)
}
