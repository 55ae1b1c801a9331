//! Structured coordinate list handed to exporters.
//!
//! JSON shape:
//! `{"empty_spaces": [{"coordinates": {"x_min": .., "y_min": .., "x_max": .., "y_max": ..}}]}`

use parking_slots_core::BoundingBox;
use serde::{Deserialize, Serialize};

use crate::EmptySlot;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SlotCoordinates {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl From<BoundingBox> for SlotCoordinates {
    fn from(b: BoundingBox) -> Self {
        Self {
            x_min: b.x_min,
            y_min: b.y_min,
            x_max: b.x_max,
            y_max: b.y_max,
        }
    }
}

impl From<SlotCoordinates> for BoundingBox {
    fn from(c: SlotCoordinates) -> Self {
        BoundingBox::new(c.x_min, c.y_min, c.x_max, c.y_max)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EmptySpace {
    pub coordinates: SlotCoordinates,
}

/// Inferred slots in emission order: row, then pair, then tiling position.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EmptySpaceCoordinates {
    pub empty_spaces: Vec<EmptySpace>,
}

impl EmptySpaceCoordinates {
    pub fn from_slots(slots: &[EmptySlot]) -> Self {
        Self {
            empty_spaces: slots
                .iter()
                .map(|s| EmptySpace {
                    coordinates: s.bbox.into(),
                })
                .collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.empty_spaces.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.empty_spaces.is_empty()
    }

    pub fn boxes(&self) -> impl Iterator<Item = BoundingBox> + '_ {
        self.empty_spaces.iter().map(|e| e.coordinates.into())
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
