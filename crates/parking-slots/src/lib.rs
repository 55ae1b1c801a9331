//! High-level facade crate for the `parking-slots-*` workspace.
//!
//! This crate provides:
//! - stable, convenient re-exports of the core types and the slot inference crate
//! - JSON config / report helpers ([`io`])
//! - (feature-gated) an `image::RgbImage` overlay renderer and end-to-end
//!   helpers that run an injected object detector and draw the inferred slots.
//!
//! ## Quickstart
//!
//! ```
//! use parking_slots::{BoundingBox, Detection, EmptySlotDetector, EmptySlotParams};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cars = vec![
//!     Detection::car(BoundingBox::new(0.0, 0.5, 0.1, 0.7), 0.91),
//!     Detection::car(BoundingBox::new(0.2, 0.5, 0.3, 0.7), 0.88),
//! ];
//! let detector = EmptySlotDetector::new(EmptySlotParams::default())?;
//! let result = detector.detect(&cars)?;
//! println!("{}", result.coordinates().to_json_pretty()?);
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `parking_slots::core`: boxes, detections, capability traits.
//! - `parking_slots::infer`: row grouping, gap inference, pipeline.
//! - `parking_slots::io`: JSON detections, config and report files.
//! - `parking_slots::detect` (feature `image`): RGB overlay and end-to-end helpers.
//! - `parking_slots::logging` (feature `tracing`): subscriber setup for binaries.

pub use parking_slots_core as core;
pub use parking_slots_infer as infer;

pub use parking_slots_core::{
    BoundingBox, BoxOverlay, Detection, NoopOverlay, ObjectDetector, CAR_LABEL, EMPTY_SPACE_LABEL,
};
pub use parking_slots_infer::{
    EmptySlot, EmptySlotDetector, EmptySlotParams, EmptySlotPipeline, EmptySlotResult,
    EmptySpaceCoordinates, PipelineError, SlotError,
};

#[cfg(feature = "image")]
pub mod detect;
pub mod io;
#[cfg(feature = "tracing")]
pub mod logging;

#[cfg(feature = "tracing")]
pub use logging::init_tracing_with_log;
