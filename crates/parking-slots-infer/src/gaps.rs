//! Gap inferrer: synthesize empty slots between adjacent cars of one row.

use parking_slots_core::{BoundingBox, Detection};
use serde::{Deserialize, Serialize};

use crate::{GapParams, Row, SlotError};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Canonical car footprint of a row: median width and height of its detections.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CanonicalSlot {
    pub median_width: f64,
    pub median_height: f64,
}

impl CanonicalSlot {
    /// `None` for an empty slice.
    pub fn from_detections(detections: &[Detection]) -> Option<Self> {
        let mut widths: Vec<f64> = detections.iter().map(|d| d.bbox.width()).collect();
        let mut heights: Vec<f64> = detections.iter().map(|d| d.bbox.height()).collect();
        Some(Self {
            median_width: median(&mut widths)?,
            median_height: median(&mut heights)?,
        })
    }
}

/// One inferred empty parking slot.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EmptySlot {
    pub bbox: BoundingBox,
    /// Row the slot was inferred in.
    pub row: usize,
    /// Index of the left flanking detection in the row's x-sorted order.
    pub pair: usize,
    /// Tiling position inside the gap, counted from the left car.
    pub slot: usize,
}

impl EmptySlot {
    /// Render request for this slot (`"empty_space"`, score `1.0`).
    pub fn to_detection(&self) -> Detection {
        Detection::empty_space(self.bbox)
    }
}

/// Gap inference output for a single row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RowGaps {
    pub canonical: CanonicalSlot,
    pub slots: Vec<EmptySlot>,
}

/// Median with numpy semantics: even counts average the two middle values.
pub(crate) fn median(values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        Some(values[mid])
    } else {
        Some((values[mid - 1] + values[mid]) / 2.0)
    }
}

/// Infer the empty slots of one row.
///
/// Adjacent pairs are taken in `x_min` order. A horizontal gap wider than
/// `min_gap_fraction * median_width` is tiled from the left car's `x_max`
/// with `round_ties_even(gap / median_width)` boxes of the canonical size,
/// all sharing the left car's `y_min` as top edge.
///
/// A gap needing more than `max_slots_per_gap` boxes (or a non-finite
/// count) means the canonical width is degenerate for this row and yields
/// [`SlotError::DegenerateGeometry`] before anything is allocated.
///
/// `row_index` is only used to tag the emitted slots and errors.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(row, params), fields(row = row_index, len = row.len()))
)]
pub fn infer_row_gaps(
    row: &Row,
    row_index: usize,
    params: &GapParams,
) -> Result<RowGaps, SlotError> {
    let mut cars: Vec<&Detection> = row.detections.iter().collect();
    cars.sort_by(|a, b| a.bbox.x_min.total_cmp(&b.bbox.x_min));

    let Some(canonical) = CanonicalSlot::from_detections(&row.detections) else {
        return Err(SlotError::DegenerateGeometry {
            row: row_index,
            median_width: 0.0,
        });
    };
    if cars.len() < 2 {
        return Ok(RowGaps {
            canonical,
            slots: Vec::new(),
        });
    }

    let CanonicalSlot {
        median_width,
        median_height,
    } = canonical;
    if !median_width.is_finite() || median_width <= 0.0 {
        return Err(SlotError::DegenerateGeometry {
            row: row_index,
            median_width,
        });
    }

    let mut counts = Vec::with_capacity(cars.len() - 1);
    for win in cars.windows(2) {
        let gap_width = win[1].bbox.x_min - win[0].bbox.x_max;
        if gap_width <= params.min_gap_fraction * median_width {
            counts.push(0);
            continue;
        }
        let ratio = (gap_width / median_width).round_ties_even();
        if !ratio.is_finite() || ratio > params.max_slots_per_gap as f64 {
            return Err(SlotError::DegenerateGeometry {
                row: row_index,
                median_width,
            });
        }
        counts.push(ratio as usize);
    }

    let mut slots = Vec::with_capacity(counts.iter().sum());
    for (pair, (win, &count)) in cars.windows(2).zip(&counts).enumerate() {
        if count == 0 {
            continue;
        }
        let (left, right) = (&win[0].bbox, &win[1].bbox);
        let gap_width = right.x_min - left.x_max;
        log::trace!(
            "row {row_index} pair {pair}: gap {gap_width:.4} holds {count} slot(s)"
        );
        for j in 0..count {
            slots.push(EmptySlot {
                bbox: BoundingBox::new(
                    left.x_max + j as f64 * median_width,
                    left.y_min,
                    left.x_max + (j + 1) as f64 * median_width,
                    left.y_min + median_height,
                ),
                row: row_index,
                pair,
                slot: j,
            });
        }
    }

    Ok(RowGaps { canonical, slots })
}
