//! Empty parking slot inference from car detections.
//!
//! ## Quickstart
//!
//! ```
//! use parking_slots_core::{BoundingBox, Detection};
//! use parking_slots_infer::{EmptySlotDetector, EmptySlotParams};
//!
//! let cars = vec![
//!     Detection::car(BoundingBox::new(0.00, 0.40, 0.10, 0.55), 0.9),
//!     Detection::car(BoundingBox::new(0.30, 0.41, 0.40, 0.56), 0.8),
//! ];
//! let detector = EmptySlotDetector::new(EmptySlotParams::default()).unwrap();
//! let result = detector.detect(&cars).unwrap();
//! assert_eq!(result.empty_slots.len(), 2);
//! ```
//!
//! Algorithm:
//! 1. Keep detections carrying the target label (`"car"` by default).
//! 2. Sort by `(y_min, x_min)` and group into rows: a row collects every
//!    unassigned detection whose vertical center is within
//!    `center_tolerance` of the row's reference (first unassigned) detection.
//! 3. Per row, take the median car width/height as the canonical slot size.
//! 4. For each x-adjacent pair whose gap exceeds `min_gap_fraction` of the
//!    canonical width, tile `round(gap / width)` canonical boxes starting
//!    at the left car, on the left car's top edge.
//! 5. Emit the slots in row, pair, tiling order, as render boxes
//!    (`"empty_space"`, score `1.0`) and as a coordinate list.

mod detector;
mod error;
mod export;
mod gaps;
mod params;
mod pipeline;
mod result;
mod rows;

pub use detector::EmptySlotDetector;
pub use error::SlotError;
pub use export::{EmptySpace, EmptySpaceCoordinates, SlotCoordinates};
pub use gaps::{infer_row_gaps, CanonicalSlot, EmptySlot, RowGaps};
pub use params::{EmptySlotParams, GapParams, RowGroupingParams};
pub use pipeline::{EmptySlotPipeline, PipelineError, PipelineOutput};
pub use result::{EmptySlotResult, RowSummary, SkippedRow};
pub use rows::{group_rows, Row};
