//! End-to-end run over injected capabilities:
//! object detector -> row grouping / gap inference -> overlay renderer.

use std::error::Error;

use parking_slots_core::{BoxOverlay, ObjectDetector};

use crate::{EmptySlotDetector, EmptySlotParams, EmptySlotResult, EmptySpaceCoordinates, SlotError};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Errors of a full pipeline run. Capability failures are passed through untouched.
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error("object detector failed")]
    Detector(#[source] Box<dyn Error + Send + Sync>),
    #[error("overlay renderer failed")]
    Overlay(#[source] Box<dyn Error + Send + Sync>),
    #[error(transparent)]
    Slots(#[from] SlotError),
}

/// Annotated image plus the structured slot list.
#[derive(Clone, Debug)]
pub struct PipelineOutput<I> {
    pub image: I,
    pub result: EmptySlotResult,
    pub coordinates: EmptySpaceCoordinates,
}

/// Empty slot pipeline with a pluggable detector and renderer.
pub struct EmptySlotPipeline<D, O> {
    detector: D,
    overlay: O,
    slots: EmptySlotDetector,
}

impl<D, O> EmptySlotPipeline<D, O>
where
    D: ObjectDetector,
    O: BoxOverlay<Image = D::Image>,
{
    pub fn new(detector: D, overlay: O, params: EmptySlotParams) -> Result<Self, SlotError> {
        Ok(Self {
            detector,
            overlay,
            slots: EmptySlotDetector::new(params)?,
        })
    }

    #[inline]
    pub fn slot_detector(&self) -> &EmptySlotDetector {
        &self.slots
    }

    /// Detect cars, infer the empty slots and draw them.
    ///
    /// The detector is prompted with the configured target label. No retries
    /// are attempted on capability failures.
    #[cfg_attr(feature = "tracing", instrument(level = "info", skip_all))]
    pub fn run(&self, image: &D::Image) -> Result<PipelineOutput<D::Image>, PipelineError> {
        let prompt = &self.slots.params().target_label;
        let detections = self
            .detector
            .detect(prompt, image)
            .map_err(|e| PipelineError::Detector(Box::new(e)))?;
        log::debug!("detector returned {} boxes for {prompt:?}", detections.len());

        let result = self.slots.detect(&detections)?;
        let image = self
            .overlay
            .overlay(image, &result.render_boxes())
            .map_err(|e| PipelineError::Overlay(Box::new(e)))?;
        let coordinates = result.coordinates();

        Ok(PipelineOutput {
            image,
            result,
            coordinates,
        })
    }
}
