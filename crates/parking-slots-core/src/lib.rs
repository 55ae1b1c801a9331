//! Core types and capabilities for parking slot inference.
//!
//! This crate is intentionally small and purely geometric. It does *not*
//! depend on any concrete object detector or image type: detection and
//! overlay rendering are modelled as capability traits that callers inject.

mod bbox;
mod capability;
mod detection;

pub use bbox::{BoundingBox, BoxError};
pub use capability::{BoxOverlay, NoopOverlay, ObjectDetector};
pub use detection::{Detection, CAR_LABEL, EMPTY_SPACE_LABEL};
