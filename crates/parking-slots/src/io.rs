//! JSON configuration and report helpers for empty slot detection.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::core::Detection;
use crate::infer::{
    EmptySlotDetector, EmptySlotParams, EmptySlotResult, EmptySpaceCoordinates, RowSummary,
    SkippedRow, SlotError,
};

#[derive(thiserror::Error, Debug)]
pub enum IoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn read_json<T: for<'de> Deserialize<'de>>(path: impl AsRef<Path>) -> Result<T, IoError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn write_json<T: Serialize>(value: &T, path: impl AsRef<Path>) -> Result<(), IoError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}

/// A detector dump: JSON array of `{bbox, label, score}` records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DetectionList(pub Vec<Detection>);

impl DetectionList {
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, IoError> {
        read_json(path)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), IoError> {
        write_json(self, path)
    }
}

/// Configuration for an empty slot detection run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmptySlotConfig {
    pub detections_path: String,
    #[serde(default)]
    pub output_path: Option<String>,
    #[serde(default)]
    pub coordinates_path: Option<String>,
    #[serde(default)]
    pub params: EmptySlotParams,
    /// When set, `params.rows.center_tolerance` is read as a fraction of this
    /// height (pixel-space detections).
    #[serde(default)]
    pub image_height: Option<f64>,
}

impl EmptySlotConfig {
    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, IoError> {
        read_json(path)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), IoError> {
        write_json(self, path)
    }

    /// Resolve the output report path.
    pub fn output_path(&self) -> PathBuf {
        self.output_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("empty_slots_report.json"))
    }

    /// Resolve the coordinate list path.
    pub fn coordinates_path(&self) -> PathBuf {
        self.coordinates_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("empty_spaces.json"))
    }

    /// Detector parameters with the image-height scaling applied.
    pub fn build_params(&self) -> EmptySlotParams {
        let mut params = self.params.clone();
        if let Some(height) = self.image_height {
            params.rows.center_tolerance *= height;
        }
        params
    }

    pub fn build_detector(&self) -> Result<EmptySlotDetector, SlotError> {
        EmptySlotDetector::new(self.build_params())
    }

    pub fn load_detections(&self) -> Result<DetectionList, IoError> {
        DetectionList::load_json(&self.detections_path)
    }
}

/// Report written after a detection run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmptySlotReport {
    pub detections_path: String,
    pub config_path: String,
    pub num_input_detections: usize,
    pub num_detections: usize,
    pub num_ignored: usize,
    pub rows: Vec<RowSummary>,
    pub empty_spaces: EmptySpaceCoordinates,
    #[serde(default)]
    pub skipped_rows: Vec<SkippedRow>,
    #[serde(default)]
    pub error: Option<String>,
}

impl EmptySlotReport {
    /// Build a base report from the input config.
    pub fn new(cfg: &EmptySlotConfig, config_path: &Path, num_input_detections: usize) -> Self {
        Self {
            detections_path: cfg.detections_path.clone(),
            config_path: config_path.to_string_lossy().into_owned(),
            num_input_detections,
            num_detections: 0,
            num_ignored: 0,
            rows: Vec::new(),
            empty_spaces: EmptySpaceCoordinates::default(),
            skipped_rows: Vec::new(),
            error: None,
        }
    }

    /// Populate report fields from a successful detection.
    pub fn set_result(&mut self, res: EmptySlotResult) {
        self.empty_spaces = res.coordinates();
        self.num_detections = res.num_detections;
        self.num_ignored = res.num_ignored;
        self.rows = res.rows;
        self.skipped_rows = res.skipped_rows;
        self.error = None;
    }

    /// Record a detection error.
    pub fn set_error(&mut self, err: &SlotError) {
        self.error = Some(err.to_string());
    }

    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, IoError> {
        read_json(path)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), IoError> {
        write_json(self, path)
    }
}

/// Write the coordinate list in the `{"empty_spaces": [...]}` export format.
pub fn write_coordinates_json(
    coordinates: &EmptySpaceCoordinates,
    path: impl AsRef<Path>,
) -> Result<(), IoError> {
    write_json(coordinates, path)
}
