use std::convert::Infallible;

use ::image::{Rgb, RgbImage};
use serde::{Deserialize, Serialize};

use crate::core::{BoundingBox, BoxOverlay, Detection, ObjectDetector};
use crate::infer::{EmptySlotParams, EmptySlotPipeline, PipelineError, PipelineOutput, SlotError};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Errors produced by the high-level facade helpers.
#[derive(thiserror::Error, Debug)]
pub enum DetectError {
    #[error("invalid RGB image buffer length (expected {expected} bytes, got {got})")]
    InvalidRgbBuffer { expected: usize, got: usize },

    #[error("invalid RGB image dimensions (width={width}, height={height})")]
    InvalidRgbDimensions { width: u32, height: u32 },

    #[error(transparent)]
    Slots(#[from] SlotError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

/// Coordinate system of the boxes handed to [`RgbOverlay`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoxCoordinates {
    /// Boxes are in pixels.
    #[default]
    Pixels,
    /// Boxes are normalized to `[0, 1]` and scaled by the image size.
    Normalized,
}

/// Draws hollow rectangles onto a copy of an RGB image.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RgbOverlay {
    pub color: [u8; 3],
    /// Border width in pixels, drawn inwards.
    pub thickness: u32,
    pub coordinates: BoxCoordinates,
}

impl Default for RgbOverlay {
    fn default() -> Self {
        Self {
            color: [0, 255, 0],
            thickness: 2,
            coordinates: BoxCoordinates::Pixels,
        }
    }
}

impl RgbOverlay {
    pub fn normalized() -> Self {
        Self {
            coordinates: BoxCoordinates::Normalized,
            ..Self::default()
        }
    }

    /// Draw every box in place.
    pub fn draw(&self, img: &mut RgbImage, boxes: &[Detection]) {
        let color = Rgb(self.color);
        for det in boxes {
            let Some(rect) = self.pixel_rect(&det.bbox, img.width(), img.height()) else {
                log::trace!("box {:?} is outside the image", det.bbox);
                continue;
            };
            draw_hollow_rect(img, rect, color, self.thickness);
        }
    }

    /// Inclusive pixel rectangle `[x0, y0, x1, y1]`, not clipped. `None` when
    /// it does not touch the image.
    fn pixel_rect(&self, bbox: &BoundingBox, width: u32, height: u32) -> Option<[i64; 4]> {
        if width == 0 || height == 0 {
            return None;
        }
        let b = match self.coordinates {
            BoxCoordinates::Pixels => *bbox,
            BoxCoordinates::Normalized => bbox.scaled(width as f64, height as f64),
        };
        if b.validate().is_err() {
            return None;
        }

        let x0 = b.x_min.round() as i64;
        let y0 = b.y_min.round() as i64;
        let x1 = (b.x_max.round() as i64).saturating_sub(1).max(x0);
        let y1 = (b.y_max.round() as i64).saturating_sub(1).max(y0);
        let (w, h) = (i64::from(width), i64::from(height));
        if x1 < 0 || y1 < 0 || x0 >= w || y0 >= h {
            return None;
        }
        Some([x0, y0, x1, y1])
    }
}

/// Sides that fall outside the image are skipped; the others are clipped to it.
fn draw_hollow_rect(img: &mut RgbImage, [x0, y0, x1, y1]: [i64; 4], color: Rgb<u8>, thickness: u32) {
    let (w, h) = (i64::from(img.width()), i64::from(img.height()));
    for t in 0..i64::from(thickness.max(1)) {
        let (l, r) = (x0.saturating_add(t), x1.saturating_sub(t));
        let (top, bottom) = (y0.saturating_add(t), y1.saturating_sub(t));
        if l > r || top > bottom {
            break;
        }
        let xs = l.max(0)..=r.min(w - 1);
        let ys = top.max(0)..=bottom.min(h - 1);
        for y in [top, bottom] {
            if (0..h).contains(&y) {
                for x in xs.clone() {
                    img.put_pixel(x as u32, y as u32, color);
                }
            }
        }
        for x in [l, r] {
            if (0..w).contains(&x) {
                for y in ys.clone() {
                    img.put_pixel(x as u32, y as u32, color);
                }
            }
        }
    }
}

impl BoxOverlay for RgbOverlay {
    type Image = RgbImage;
    type Error = Infallible;

    fn overlay(&self, image: &RgbImage, boxes: &[Detection]) -> Result<RgbImage, Infallible> {
        let mut out = image.clone();
        self.draw(&mut out, boxes);
        Ok(out)
    }
}

/// Run an injected car detector on `img`, infer the empty slots and draw them.
#[cfg_attr(
    feature = "tracing",
    instrument(
        level = "info",
        skip(img, detector, overlay, params),
        fields(width = img.width(), height = img.height())
    )
)]
pub fn detect_empty_slots<D>(
    img: &RgbImage,
    detector: D,
    overlay: RgbOverlay,
    params: EmptySlotParams,
) -> Result<PipelineOutput<RgbImage>, DetectError>
where
    D: ObjectDetector<Image = RgbImage>,
{
    let pipeline = EmptySlotPipeline::new(detector, overlay, params)?;
    Ok(pipeline.run(img)?)
}

/// Build an `image::RgbImage` from a raw interleaved RGB buffer.
pub fn rgb_image_from_slice(width: u32, height: u32, pixels: &[u8]) -> Result<RgbImage, DetectError> {
    let w = usize::try_from(width).ok();
    let h = usize::try_from(height).ok();
    let Some((w, h)) = w.zip(h) else {
        return Err(DetectError::InvalidRgbDimensions { width, height });
    };
    let Some(expected) = w.checked_mul(h).and_then(|n| n.checked_mul(3)) else {
        return Err(DetectError::InvalidRgbDimensions { width, height });
    };
    if pixels.len() != expected {
        return Err(DetectError::InvalidRgbBuffer {
            expected,
            got: pixels.len(),
        });
    }
    RgbImage::from_raw(width, height, pixels.to_vec())
        .ok_or(DetectError::InvalidRgbDimensions { width, height })
}

pub fn detect_empty_slots_from_rgb_u8<D>(
    width: u32,
    height: u32,
    pixels: &[u8],
    detector: D,
    overlay: RgbOverlay,
    params: EmptySlotParams,
) -> Result<PipelineOutput<RgbImage>, DetectError>
where
    D: ObjectDetector<Image = RgbImage>,
{
    let img = rgb_image_from_slice(width, height, pixels)?;
    detect_empty_slots(&img, detector, overlay, params)
}
