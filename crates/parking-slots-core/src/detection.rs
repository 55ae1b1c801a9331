use serde::{Deserialize, Serialize};

use crate::BoundingBox;

/// Class label the external detector is queried with.
pub const CAR_LABEL: &str = "car";

/// Label attached to every inferred empty slot.
pub const EMPTY_SPACE_LABEL: &str = "empty_space";

/// One labelled box, as produced by an object detector or handed to an overlay renderer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub bbox: BoundingBox,
    pub label: String,
    #[serde(default = "default_score")]
    pub score: f32,
}

fn default_score() -> f32 {
    1.0
}

impl Detection {
    pub fn new(bbox: BoundingBox, label: impl Into<String>, score: f32) -> Self {
        Self {
            bbox,
            label: label.into(),
            score,
        }
    }

    /// Convenience constructor for a `"car"` detection.
    pub fn car(bbox: BoundingBox, score: f32) -> Self {
        Self::new(bbox, CAR_LABEL, score)
    }

    /// Render request for an inferred slot: label `"empty_space"`, score `1.0`.
    pub fn empty_space(bbox: BoundingBox) -> Self {
        Self::new(bbox, EMPTY_SPACE_LABEL, 1.0)
    }

    #[inline]
    pub fn has_label(&self, label: &str) -> bool {
        self.label == label
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_detector_output() {
        let raw = r#"{"bbox":[0.1,0.2,0.3,0.4],"label":"car","score":0.87}"#;
        let det: Detection = serde_json::from_str(raw).unwrap();
        assert!(det.has_label(CAR_LABEL));
        assert_eq!(det.bbox, BoundingBox::new(0.1, 0.2, 0.3, 0.4));
        assert!((det.score - 0.87).abs() < 1e-6);
    }

    #[test]
    fn missing_bbox_is_an_error() {
        let raw = r#"{"label":"car","score":0.5}"#;
        assert!(serde_json::from_str::<Detection>(raw).is_err());
    }

    #[test]
    fn empty_space_has_unit_score() {
        let det = Detection::empty_space(BoundingBox::new(0.0, 0.0, 1.0, 1.0));
        assert_eq!(det.label, EMPTY_SPACE_LABEL);
        assert_eq!(det.score, 1.0);
    }
}
