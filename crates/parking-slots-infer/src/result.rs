use parking_slots_core::Detection;
use serde::{Deserialize, Serialize};

use crate::{CanonicalSlot, EmptySlot, EmptySpaceCoordinates};

/// Per-row diagnostics.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RowSummary {
    pub index: usize,
    /// Positions of the row members in the detector input.
    pub source_indices: Vec<usize>,
    pub reference_center_y: f64,
    /// `None` when the row was skipped.
    pub canonical: Option<CanonicalSlot>,
    pub num_slots: usize,
}

/// A row whose gaps could not be inferred.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SkippedRow {
    pub row: usize,
    pub reason: String,
}

/// Output of [`crate::EmptySlotDetector::detect`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EmptySlotResult {
    /// Number of detections carrying the target label.
    pub num_detections: usize,
    /// Number of detections dropped because of their label.
    pub num_ignored: usize,
    pub rows: Vec<RowSummary>,
    /// Slots in row order, then pair order, then tiling order.
    pub empty_slots: Vec<EmptySlot>,
    #[serde(default)]
    pub skipped_rows: Vec<SkippedRow>,
}

impl EmptySlotResult {
    /// Boxes for an overlay renderer, labelled `"empty_space"` with score `1.0`.
    pub fn render_boxes(&self) -> Vec<Detection> {
        self.empty_slots.iter().map(EmptySlot::to_detection).collect()
    }

    pub fn coordinates(&self) -> EmptySpaceCoordinates {
        EmptySpaceCoordinates::from_slots(&self.empty_slots)
    }
}
