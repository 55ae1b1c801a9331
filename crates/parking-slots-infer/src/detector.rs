use parking_slots_core::Detection;

use crate::gaps::infer_row_gaps;
use crate::rows::group_rows;
use crate::{EmptySlotParams, EmptySlotResult, RowSummary, SkippedRow, SlotError};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Row-based empty slot detector.
///
/// Pure function of its input: no state is carried between calls, so the
/// same detection list always yields the same slots.
#[derive(Clone, Debug)]
pub struct EmptySlotDetector {
    params: EmptySlotParams,
}

impl EmptySlotDetector {
    /// Create a detector, rejecting non-positive tolerances.
    pub fn new(params: EmptySlotParams) -> Result<Self, SlotError> {
        params.validate()?;
        Ok(Self { params })
    }

    #[inline]
    pub fn params(&self) -> &EmptySlotParams {
        &self.params
    }

    /// Group the target-label detections into rows and infer the gaps of each row.
    ///
    /// Detections with another label are ignored. A malformed detection
    /// aborts the call; a row with degenerate geometry is skipped and listed
    /// in [`EmptySlotResult::skipped_rows`].
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, detections), fields(num_detections = detections.len()))
    )]
    pub fn detect(&self, detections: &[Detection]) -> Result<EmptySlotResult, SlotError> {
        let (kept, targets): (Vec<usize>, Vec<Detection>) = detections
            .iter()
            .enumerate()
            .filter(|(_, d)| d.has_label(&self.params.target_label))
            .map(|(i, d)| (i, d.clone()))
            .unzip();
        let num_ignored = detections.len() - targets.len();
        if num_ignored > 0 {
            log::debug!(
                "ignoring {num_ignored} detections not labelled {:?}",
                self.params.target_label
            );
        }

        let rows = group_rows(&targets, &self.params.rows).map_err(|err| match err {
            SlotError::InvalidDetection { index, reason } => SlotError::InvalidDetection {
                index: kept[index],
                reason,
            },
            other => other,
        })?;

        let mut result = EmptySlotResult {
            num_detections: targets.len(),
            num_ignored,
            ..EmptySlotResult::default()
        };

        for (index, row) in rows.iter().enumerate() {
            let source_indices: Vec<usize> = row.source_indices.iter().map(|&i| kept[i]).collect();
            let (canonical, num_slots) = match infer_row_gaps(row, index, &self.params.gaps) {
                Ok(gaps) => {
                    let num_slots = gaps.slots.len();
                    result.empty_slots.extend(gaps.slots);
                    (Some(gaps.canonical), num_slots)
                }
                Err(err @ SlotError::DegenerateGeometry { .. }) => {
                    log::warn!("skipping row {index}: {err}");
                    result.skipped_rows.push(SkippedRow {
                        row: index,
                        reason: err.to_string(),
                    });
                    (None, 0)
                }
                Err(err) => return Err(err),
            };
            result.rows.push(RowSummary {
                index,
                source_indices,
                reference_center_y: row.reference_center_y,
                canonical,
                num_slots,
            });
        }

        log::info!(
            "{} rows, {} empty slots from {} detections",
            result.rows.len(),
            result.empty_slots.len(),
            result.num_detections
        );
        Ok(result)
    }
}
