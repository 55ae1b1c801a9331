//! Injected external capabilities.
//!
//! Neither object detection nor pixel drawing happens in this workspace's
//! core: callers plug in whatever detector and renderer they have.

use std::convert::Infallible;
use std::error::Error;
use std::marker::PhantomData;

use crate::Detection;

/// Object detector queried with a class prompt (e.g. `"car"`).
pub trait ObjectDetector {
    type Image;
    type Error: Error + Send + Sync + 'static;

    fn detect(&self, prompt: &str, image: &Self::Image) -> Result<Vec<Detection>, Self::Error>;
}

/// Renderer that draws labelled boxes over an image and returns a new image.
pub trait BoxOverlay {
    type Image;
    type Error: Error + Send + Sync + 'static;

    fn overlay(&self, image: &Self::Image, boxes: &[Detection]) -> Result<Self::Image, Self::Error>;
}

/// Overlay that returns the input untouched.
///
/// Useful for running the full pipeline with synthetic detections in tests.
#[derive(Debug)]
pub struct NoopOverlay<I>(PhantomData<fn() -> I>);

impl<I> NoopOverlay<I> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<I> Default for NoopOverlay<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I> Clone for NoopOverlay<I> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I> Copy for NoopOverlay<I> {}

impl<I: Clone> BoxOverlay for NoopOverlay<I> {
    type Image = I;
    type Error = Infallible;

    fn overlay(&self, image: &I, _boxes: &[Detection]) -> Result<I, Infallible> {
        Ok(image.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BoundingBox;

    #[test]
    fn noop_overlay_returns_a_copy() {
        let overlay = NoopOverlay::<Vec<u8>>::new();
        let image = vec![1u8, 2, 3];
        let boxes = [Detection::empty_space(BoundingBox::new(0.0, 0.0, 1.0, 1.0))];
        let out = overlay.overlay(&image, &boxes).unwrap();
        assert_eq!(out, image);
    }
}
