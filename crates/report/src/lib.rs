//! PDF report generation over stored inspection records.
//!
//! Inspections are archived as flat JSON files by the transport layer; this
//! crate reads them back, aggregates monthly statistics, and renders the
//! single-inspection and monthly summary PDFs into a reports directory.

pub mod error;
pub mod monthly;
pub mod record;
pub mod render;
pub mod store;

use std::path::{Path, PathBuf};

pub use error::ReportError;
pub use monthly::{aggregate_month, validate_month};
pub use record::{InspectionRecord, MonthlyEntry, MonthlyReport};
pub use render::PdfRenderer;
pub use store::RecordStore;

/// Generates report PDFs from the record store.
///
/// Rendering is CPU-bound and runs on the blocking pool; generated files are
/// written to `reports_dir` and regenerated (overwritten) on every request so
/// reports always reflect the records on disk.
pub struct ReportService {
    store: RecordStore,
    reports_dir: PathBuf,
}

impl ReportService {
    pub fn new(inspections_dir: impl Into<PathBuf>, reports_dir: impl Into<PathBuf>) -> Self {
        Self {
            store: RecordStore::new(inspections_dir),
            reports_dir: reports_dir.into(),
        }
    }

    /// The backing record store, for writing records as inspections close.
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn reports_dir(&self) -> &Path {
        &self.reports_dir
    }

    /// Generates the detail PDF for one inspection and returns its path.
    pub async fn inspection_report(&self, id: &str) -> Result<PathBuf, ReportError> {
        let record = self.store.load(id).await?;
        let bytes = tokio::task::spawn_blocking(move || PdfRenderer::render_inspection(&record))
            .await
            .map_err(|e| ReportError::Internal(e.to_string()))??;
        let path = self
            .write_report(format!("inspection_report_{id}.pdf"), &bytes)
            .await?;
        tracing::info!(id, path = %path.display(), "Generated inspection report");
        Ok(path)
    }

    /// Generates the summary PDF for one calendar month and returns its
    /// path. Months outside 1..=12 are rejected before anything is read or
    /// written.
    pub async fn monthly_report(&self, year: i32, month: u32) -> Result<PathBuf, ReportError> {
        validate_month(month)?;
        let records = self.store.load_all().await?;
        let report = aggregate_month(records, year, month);
        let bytes = tokio::task::spawn_blocking(move || PdfRenderer::render_monthly(&report))
            .await
            .map_err(|e| ReportError::Internal(e.to_string()))??;
        let path = self
            .write_report(format!("monthly_report_{year}_{month:02}.pdf"), &bytes)
            .await?;
        tracing::info!(year, month, path = %path.display(), "Generated monthly report");
        Ok(path)
    }

    async fn write_report(&self, file_name: String, bytes: &[u8]) -> Result<PathBuf, ReportError> {
        tokio::fs::create_dir_all(&self.reports_dir).await?;
        let path = self.reports_dir.join(file_name);
        tokio::fs::write(&path, bytes).await?;
        Ok(path)
    }
}
