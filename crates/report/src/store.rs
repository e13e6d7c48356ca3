use std::path::{Path, PathBuf};

use crate::error::ReportError;
use crate::record::InspectionRecord;

/// Filesystem store for per-inspection JSON records.
///
/// Records live flat in one directory as `inspection_{id}.json`. The
/// directory is created lazily on the first write, so a store pointed at a
/// fresh data dir simply reads back empty.
pub struct RecordStore {
    dir: PathBuf,
}

impl RecordStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path a record with this id is stored at, whether or not it exists.
    pub fn record_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("inspection_{id}.json"))
    }

    /// Loads one record by id.
    pub async fn load(&self, id: &str) -> Result<InspectionRecord, ReportError> {
        let path = self.record_path(id);
        let raw = match tokio::fs::read(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ReportError::RecordNotFound(id.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        serde_json::from_slice(&raw).map_err(|e| ReportError::MalformedRecord {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Writes a record as pretty-printed JSON, creating the directory if
    /// needed. Returns the path written.
    pub async fn save(&self, record: &InspectionRecord) -> Result<PathBuf, ReportError> {
        let id = record
            .id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ReportError::InvalidRecord("record id is required".to_string()))?;
        if id.contains(['/', '\\']) {
            return Err(ReportError::InvalidRecord(format!(
                "record id contains path characters: {id}"
            )));
        }
        let json = serde_json::to_vec_pretty(record)
            .map_err(|e| ReportError::Internal(e.to_string()))?;
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.record_path(id);
        tokio::fs::write(&path, json).await?;
        tracing::debug!(id, path = %path.display(), "Saved inspection record");
        Ok(path)
    }

    /// Loads every `inspection_*.json` record in the store.
    ///
    /// Unreadable or unparseable files are logged and skipped so one bad
    /// record cannot block monthly reporting. A missing directory reads as
    /// an empty store.
    pub async fn load_all(&self) -> Result<Vec<InspectionRecord>, ReportError> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut records = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if !name.starts_with("inspection_") || !name.ends_with(".json") {
                continue;
            }
            let path = entry.path();
            let parsed = match tokio::fs::read(&path).await {
                Ok(raw) => serde_json::from_slice::<InspectionRecord>(&raw)
                    .map_err(|e| e.to_string()),
                Err(e) => Err(e.to_string()),
            };
            match parsed {
                Ok(record) => records.push(record),
                Err(reason) => {
                    tracing::warn!(path = %path.display(), %reason, "Skipping unreadable inspection record");
                }
            }
        }
        Ok(records)
    }
}
