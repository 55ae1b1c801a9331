use parking_slots_core::BoxError;

/// Errors returned by row grouping and gap inference.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SlotError {
    #[error("invalid detection #{index}: {reason}")]
    InvalidDetection { index: usize, reason: BoxError },
    #[error("row {row} has degenerate canonical width {median_width}")]
    DegenerateGeometry { row: usize, median_width: f64 },
    #[error("invalid parameters: {0}")]
    InvalidParams(String),
}
