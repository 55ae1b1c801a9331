//! Row grouper: partition detections into horizontal parking rows.
//!
//! Two phases:
//! 1. Validate, stable-sort by `(y_min, x_min)` and compute every vertical center.
//! 2. Walk the sorted order. The first unassigned detection becomes the
//!    reference of a new row, and every still-unassigned detection whose
//!    center lies strictly within `center_tolerance` of the reference center
//!    joins that row.
//!
//! A detection that is close to two references always lands in the row whose
//! reference comes first in sorted order.

use parking_slots_core::Detection;
use serde::{Deserialize, Serialize};

use crate::{RowGroupingParams, SlotError};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// A cluster of detections judged to be on the same horizontal parking line.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Row {
    /// Members in `(y_min, x_min)` order. The first member is the reference.
    pub detections: Vec<Detection>,
    /// Position of each member in the grouper input, aligned with `detections`.
    pub source_indices: Vec<usize>,
    /// Vertical center of the reference detection.
    pub reference_center_y: f64,
}

impl Row {
    #[inline]
    pub fn len(&self) -> usize {
        self.detections.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.detections.is_empty()
    }

    /// The detection that seeded this row.
    pub fn reference(&self) -> Option<&Detection> {
        self.detections.first()
    }
}

/// Group `detections` into rows.
///
/// Every input detection ends up in exactly one row. An empty input yields no
/// rows. Any detection with a non-finite or empty bbox aborts the call.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(detections, params), fields(num_detections = detections.len()))
)]
pub fn group_rows(
    detections: &[Detection],
    params: &RowGroupingParams,
) -> Result<Vec<Row>, SlotError> {
    params.validate()?;
    for (index, det) in detections.iter().enumerate() {
        det.bbox
            .validate()
            .map_err(|reason| SlotError::InvalidDetection { index, reason })?;
    }

    let mut order: Vec<usize> = (0..detections.len()).collect();
    order.sort_by(|&a, &b| {
        let (ba, bb) = (&detections[a].bbox, &detections[b].bbox);
        ba.y_min
            .total_cmp(&bb.y_min)
            .then(ba.x_min.total_cmp(&bb.x_min))
    });
    let centers: Vec<f64> = order
        .iter()
        .map(|&i| detections[i].bbox.center_y())
        .collect();

    let tol = params.center_tolerance;
    let mut assigned = vec![false; order.len()];
    let mut rows = Vec::new();

    for pos in 0..order.len() {
        if assigned[pos] {
            continue;
        }
        let reference_center_y = centers[pos];

        // Everything before `pos` is already assigned.
        let mut source_indices = Vec::new();
        for cand in pos..order.len() {
            if !assigned[cand] && (centers[cand] - reference_center_y).abs() < tol {
                assigned[cand] = true;
                source_indices.push(order[cand]);
            }
        }

        log::debug!(
            "row {}: reference center {:.4}, {} detections",
            rows.len(),
            reference_center_y,
            source_indices.len()
        );
        rows.push(Row {
            detections: source_indices
                .iter()
                .map(|&i| detections[i].clone())
                .collect(),
            source_indices,
            reference_center_y,
        });
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_slots_core::{BoundingBox, BoxError};

    fn car(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Detection {
        Detection::car(BoundingBox::new(x_min, y_min, x_max, y_max), 0.9)
    }

    fn params() -> RowGroupingParams {
        RowGroupingParams::default()
    }

    #[test]
    fn empty_input_gives_no_rows() {
        let rows = group_rows(&[], &params()).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn splits_close_centers_from_far_ones() {
        // centers 0.50, 0.505, 0.90
        let dets = vec![
            car(0.0, 0.45, 0.1, 0.55),
            car(0.2, 0.455, 0.3, 0.555),
            car(0.0, 0.85, 0.1, 0.95),
        ];
        let rows = group_rows(&dets, &params()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].source_indices, vec![0, 1]);
        assert_eq!(rows[1].source_indices, vec![2]);
    }

    #[test]
    fn every_detection_lands_in_exactly_one_row() {
        let mut dets = Vec::new();
        for r in 0..4 {
            for c in 0..7 {
                let y = 0.05 + 0.22 * r as f64 + 0.003 * c as f64;
                let x = 0.13 * c as f64;
                dets.push(car(x, y, x + 0.1, y + 0.12));
            }
        }
        dets.reverse();

        let rows = group_rows(&dets, &params()).unwrap();
        let mut seen: Vec<usize> = rows
            .iter()
            .flat_map(|r| r.source_indices.iter().copied())
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..dets.len()).collect::<Vec<_>>());
        assert_eq!(rows.len(), 4);
        assert!(rows.iter().all(|r| r.len() == 7));
    }

    #[test]
    fn members_are_strictly_within_tolerance_of_reference() {
        let dets = vec![
            car(0.0, 0.10, 0.1, 0.20),
            car(0.2, 0.18, 0.3, 0.28),
            car(0.4, 0.24, 0.5, 0.34),
            car(0.6, 0.30, 0.7, 0.40),
        ];
        let p = params();
        let rows = group_rows(&dets, &p).unwrap();
        for row in &rows {
            for det in &row.detections {
                assert!((det.bbox.center_y() - row.reference_center_y).abs() < p.center_tolerance);
            }
        }
        // reference 0.15 takes 0.23; 0.29 and 0.35 start a new row
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].source_indices, vec![0, 1]);
        assert_eq!(rows[1].source_indices, vec![2, 3]);
    }

    #[test]
    fn borderline_detection_joins_first_reference() {
        // centers 0.30, 0.38, 0.46: the middle box is within tolerance of both
        // outer boxes and goes to the row seeded first.
        let dets = vec![
            car(0.0, 0.41, 0.1, 0.51),
            car(0.2, 0.33, 0.3, 0.43),
            car(0.4, 0.25, 0.5, 0.35),
        ];
        let rows = group_rows(&dets, &params()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].source_indices, vec![2, 1]);
        assert_eq!(rows[1].source_indices, vec![0]);
    }

    #[test]
    fn rows_are_ordered_by_reference() {
        let dets = vec![car(0.0, 0.7, 0.1, 0.8), car(0.0, 0.1, 0.1, 0.2)];
        let rows = group_rows(&dets, &params()).unwrap();
        assert_eq!(rows[0].source_indices, vec![1]);
        assert_eq!(rows[1].source_indices, vec![0]);
        assert!(rows[0].reference_center_y < rows[1].reference_center_y);
    }

    #[test]
    fn ties_keep_input_order() {
        let dets = vec![car(0.5, 0.1, 0.6, 0.2), car(0.5, 0.1, 0.6, 0.2)];
        let rows = group_rows(&dets, &params()).unwrap();
        assert_eq!(rows[0].source_indices, vec![0, 1]);
    }

    #[test]
    fn malformed_detection_aborts_the_call() {
        let dets = vec![car(0.0, 0.1, 0.1, 0.2), car(0.3, 0.1, 0.3, 0.2)];
        let err = group_rows(&dets, &params()).unwrap_err();
        assert_eq!(
            err,
            SlotError::InvalidDetection {
                index: 1,
                reason: BoxError::EmptyWidth {
                    x_min: 0.3,
                    x_max: 0.3
                }
            }
        );
    }
}
