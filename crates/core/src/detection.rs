//! Lesion detection domain: findings, tunable settings, and the detector
//! strategy seam.
//!
//! Detector implementations are synchronous and CPU-bound; async callers
//! run them through `spawn_blocking`. The default implementation is
//! [`StubLesionDetector`], which emits a single fixed finding so the
//! persistence and verification flows downstream can be exercised before
//! a real model is wired in.

use image::DynamicImage;
use serde::{Deserialize, Serialize};

/* --------------------------------------------------------------------------
Findings
-------------------------------------------------------------------------- */

/// Rectangular image region in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// A single lesion candidate produced by a detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// Lesion classification label (e.g. `sample_lesion`).
    pub label: String,
    /// Detector confidence. Clamped into `[0.0, 1.0]` by [`apply_settings`].
    pub confidence: f64,
    pub region: Region,
}

/* --------------------------------------------------------------------------
Settings
-------------------------------------------------------------------------- */

/// Tunable parameters applied to detector output.
///
/// Every field has a default, and unspecified fields fall back to it when
/// deserialized from a request. `processing_interval` is a pacing hint in
/// milliseconds for continuous stream processing; single-shot calls ignore
/// it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionSettings {
    pub confidence_threshold: f64,
    pub min_detection_size: u32,
    pub max_detection_size: u32,
    pub processing_interval: u32,
}

impl Default for DetectionSettings {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.5,
            min_detection_size: 20,
            max_detection_size: 200,
            processing_interval: 100,
        }
    }
}

/* --------------------------------------------------------------------------
Detector strategy
-------------------------------------------------------------------------- */

/// Error raised by a detector implementation.
#[derive(Debug, thiserror::Error)]
#[error("Detection failed: {0}")]
pub struct DetectError(pub String);

/// Strategy seam for lesion detectors.
pub trait LesionDetector: Send + Sync {
    /// Short detector name, used in logs.
    fn name(&self) -> &'static str;

    /// Detect lesion candidates in a decoded image.
    ///
    /// Output is raw: threshold and size filtering happen afterwards via
    /// [`apply_settings`], so implementations do not need to read the
    /// settings at all.
    fn detect(
        &self,
        image: &DynamicImage,
        settings: &DetectionSettings,
    ) -> Result<Vec<Finding>, DetectError>;
}

/// Placeholder detector that emits one fixed finding per image.
pub struct StubLesionDetector;

impl LesionDetector for StubLesionDetector {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn detect(
        &self,
        _image: &DynamicImage,
        _settings: &DetectionSettings,
    ) -> Result<Vec<Finding>, DetectError> {
        Ok(vec![Finding {
            label: "sample_lesion".to_string(),
            confidence: 0.85,
            region: Region {
                x: 100,
                y: 100,
                width: 50,
                height: 50,
            },
        }])
    }
}

/// Apply settings to raw detector output.
///
/// Clamps each confidence into `[0.0, 1.0]`, then drops findings below the
/// confidence threshold or whose region width or height falls outside the
/// configured size bounds. Region coordinates are not checked against the
/// image dimensions.
pub fn apply_settings(findings: Vec<Finding>, settings: &DetectionSettings) -> Vec<Finding> {
    let min = settings.min_detection_size;
    let max = settings.max_detection_size;
    findings
        .into_iter()
        .map(|mut finding| {
            finding.confidence = finding.confidence.clamp(0.0, 1.0);
            finding
        })
        .filter(|f| f.confidence >= settings.confidence_threshold)
        .filter(|f| (min..=max).contains(&f.region.width) && (min..=max).contains(&f.region.height))
        .collect()
}
