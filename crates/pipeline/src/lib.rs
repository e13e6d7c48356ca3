//! Detection pipeline: decode an uploaded frame, run the configured
//! detector strategy, filter its output, and persist the survivors.
//!
//! The pipeline owns the database pool and the detector; handlers hold it
//! behind an `Arc` and call single async operations. Decode and inference
//! are CPU-bound and run on the blocking thread pool.

use std::sync::Arc;

use antemortem_core::detection::{apply_settings, DetectError, DetectionSettings, Finding, LesionDetector};
use antemortem_core::types::DbId;
use antemortem_db::models::detection::{CreateDetection, Detection};
use antemortem_db::repositories::{DetectionRepo, InspectionRepo};
use antemortem_db::DbPool;

/// Errors surfaced by pipeline operations.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Inspection not found: {0}")]
    InspectionNotFound(DbId),

    #[error("Detection not found: {0}")]
    DetectionNotFound(DbId),

    #[error("Invalid image data: {0}")]
    InvalidImage(String),

    #[error(transparent)]
    Detector(#[from] DetectError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal pipeline error: {0}")]
    Internal(String),
}

/// Orchestrates detection over stored inspections.
pub struct DetectionPipeline {
    pool: DbPool,
    detector: Arc<dyn LesionDetector>,
}

impl DetectionPipeline {
    pub fn new(pool: DbPool, detector: Arc<dyn LesionDetector>) -> Self {
        Self { pool, detector }
    }

    /// Run detection over one uploaded frame and persist the findings.
    ///
    /// The inspection must exist; the bytes must decode as an image. Raw
    /// detector output is filtered through the settings (confidence
    /// threshold, size bounds, confidence clamping) before persistence,
    /// and the persisted rows are returned in creation order. No failure
    /// path leaves detections behind.
    pub async fn process(
        &self,
        inspection_id: DbId,
        image_bytes: Vec<u8>,
        settings: &DetectionSettings,
    ) -> Result<Vec<Detection>, PipelineError> {
        InspectionRepo::find_by_id(&self.pool, inspection_id)
            .await?
            .ok_or(PipelineError::InspectionNotFound(inspection_id))?;

        let detector = Arc::clone(&self.detector);
        let task_settings = settings.clone();
        let findings = tokio::task::spawn_blocking(move || -> Result<Vec<Finding>, PipelineError> {
            let image = image::load_from_memory(&image_bytes)
                .map_err(|e| PipelineError::InvalidImage(e.to_string()))?;
            let raw = detector.detect(&image, &task_settings)?;
            Ok(apply_settings(raw, &task_settings))
        })
        .await
        .map_err(|e| PipelineError::Internal(format!("detection task failed: {e}")))??;

        let mut persisted = Vec::with_capacity(findings.len());
        for finding in findings {
            let location_data = serde_json::to_value(finding.region)
                .map_err(|e| PipelineError::Internal(format!("region serialization failed: {e}")))?;
            let input = CreateDetection {
                inspection_id,
                image_id: None,
                lesion_type: finding.label,
                confidence_score: finding.confidence,
                location_data,
            };
            persisted.push(DetectionRepo::create(&self.pool, &input).await?);
        }

        tracing::info!(
            inspection_id,
            detector = self.detector.name(),
            count = persisted.len(),
            "Detections persisted"
        );
        Ok(persisted)
    }

    /// List all detections recorded for an inspection, in storage order.
    pub async fn list_for_inspection(
        &self,
        inspection_id: DbId,
    ) -> Result<Vec<Detection>, PipelineError> {
        Ok(DetectionRepo::list_by_inspection(&self.pool, inspection_id).await?)
    }

    /// Set the verification state of a detection, returning the updated row.
    pub async fn verify(
        &self,
        detection_id: DbId,
        verified: bool,
        verified_by: Option<&str>,
    ) -> Result<Detection, PipelineError> {
        DetectionRepo::update_verification(&self.pool, detection_id, verified, verified_by)
            .await?
            .ok_or(PipelineError::DetectionNotFound(detection_id))
    }

    /// Permanently remove a detection.
    pub async fn delete(&self, detection_id: DbId) -> Result<(), PipelineError> {
        if DetectionRepo::delete(&self.pool, detection_id).await? {
            Ok(())
        } else {
            Err(PipelineError::DetectionNotFound(detection_id))
        }
    }
}
