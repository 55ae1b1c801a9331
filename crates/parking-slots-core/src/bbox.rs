use serde::{Deserialize, Serialize};

/// Reasons a bounding box cannot take part in row grouping.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum BoxError {
    #[error("bbox has a non-finite coordinate")]
    NonFinite,
    #[error("bbox has non-positive width (x_min={x_min}, x_max={x_max})")]
    EmptyWidth { x_min: f64, x_max: f64 },
    #[error("bbox has non-positive height (y_min={y_min}, y_max={y_max})")]
    EmptyHeight { y_min: f64, y_max: f64 },
}

/// Axis-aligned box in image coordinates (y grows downwards).
///
/// Serialized as the flat array `[x_min, y_min, x_max, y_max]`, which is the
/// layout object detectors usually emit.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct BoundingBox {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl BoundingBox {
    pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Vertical center `(y_min + y_max) / 2`.
    #[inline]
    pub fn center_y(&self) -> f64 {
        (self.y_min + self.y_max) / 2.0
    }

    /// Check that all coordinates are finite and the box has positive extent.
    pub fn validate(&self) -> Result<(), BoxError> {
        let coords = [self.x_min, self.y_min, self.x_max, self.y_max];
        if coords.iter().any(|v| !v.is_finite()) {
            return Err(BoxError::NonFinite);
        }
        if self.x_min >= self.x_max {
            return Err(BoxError::EmptyWidth {
                x_min: self.x_min,
                x_max: self.x_max,
            });
        }
        if self.y_min >= self.y_max {
            return Err(BoxError::EmptyHeight {
                y_min: self.y_min,
                y_max: self.y_max,
            });
        }
        Ok(())
    }

    /// Scale x by `sx` and y by `sy`, e.g. to map normalized boxes to pixels.
    pub fn scaled(&self, sx: f64, sy: f64) -> Self {
        Self {
            x_min: self.x_min * sx,
            y_min: self.y_min * sy,
            x_max: self.x_max * sx,
            y_max: self.y_max * sy,
        }
    }

    #[inline]
    pub fn to_array(&self) -> [f64; 4] {
        [self.x_min, self.y_min, self.x_max, self.y_max]
    }
}

impl From<[f64; 4]> for BoundingBox {
    fn from([x_min, y_min, x_max, y_max]: [f64; 4]) -> Self {
        Self::new(x_min, y_min, x_max, y_max)
    }
}

impl From<BoundingBox> for [f64; 4] {
    fn from(b: BoundingBox) -> Self {
        b.to_array()
    }
}
