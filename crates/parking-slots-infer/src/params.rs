use parking_slots_core::CAR_LABEL;
use serde::{Deserialize, Serialize};

use crate::SlotError;

/// Row grouping settings.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct RowGroupingParams {
    /// Maximum vertical-center distance from a row's reference detection,
    /// in bbox units (exclusive).
    ///
    /// The default `0.1` assumes boxes normalized to `[0, 1]`, i.e. 10 % of
    /// the image height. For pixel boxes use
    /// [`EmptySlotParams::for_image_height`].
    pub center_tolerance: f64,
}

impl Default for RowGroupingParams {
    fn default() -> Self {
        Self {
            center_tolerance: 0.1,
        }
    }
}

impl RowGroupingParams {
    pub fn validate(&self) -> Result<(), SlotError> {
        let tol = self.center_tolerance;
        if !tol.is_finite() || tol <= 0.0 {
            return Err(SlotError::InvalidParams(format!(
                "row center tolerance must be positive and finite, got {tol}"
            )));
        }
        Ok(())
    }
}

/// Gap inference settings.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct GapParams {
    /// A gap holds at least one slot when it is wider than
    /// `min_gap_fraction * median_width` (exclusive).
    pub min_gap_fraction: f64,
    /// Upper bound on the slots tiled into one gap. A row whose gap would
    /// need more is treated as degenerate geometry and skipped.
    #[serde(default = "default_max_slots_per_gap")]
    pub max_slots_per_gap: usize,
}

fn default_max_slots_per_gap() -> usize {
    100
}

impl Default for GapParams {
    fn default() -> Self {
        Self {
            min_gap_fraction: 0.5,
            max_slots_per_gap: default_max_slots_per_gap(),
        }
    }
}

impl GapParams {
    pub fn validate(&self) -> Result<(), SlotError> {
        let frac = self.min_gap_fraction;
        if !frac.is_finite() || frac < 0.0 {
            return Err(SlotError::InvalidParams(format!(
                "minimum gap fraction must be non-negative and finite, got {frac}"
            )));
        }
        if self.max_slots_per_gap == 0 {
            return Err(SlotError::InvalidParams(
                "max slots per gap must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Parameters for [`crate::EmptySlotDetector`].
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct EmptySlotParams {
    /// Only detections with this label are grouped into rows.
    #[serde(default = "default_target_label")]
    pub target_label: String,
    #[serde(default)]
    pub rows: RowGroupingParams,
    #[serde(default)]
    pub gaps: GapParams,
}

fn default_target_label() -> String {
    CAR_LABEL.to_string()
}

impl Default for EmptySlotParams {
    fn default() -> Self {
        Self {
            target_label: default_target_label(),
            rows: RowGroupingParams::default(),
            gaps: GapParams::default(),
        }
    }
}

impl EmptySlotParams {
    /// Defaults for pixel-space boxes: the row tolerance becomes 10 % of
    /// `image_height` pixels.
    pub fn for_image_height(image_height: f64) -> Self {
        let mut params = Self::default();
        params.rows.center_tolerance *= image_height;
        params
    }

    pub fn validate(&self) -> Result<(), SlotError> {
        self.rows.validate()?;
        self.gaps.validate()
    }
}
