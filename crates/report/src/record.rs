use serde::{Deserialize, Deserializer, Serialize};

/// Placeholder rendered for fields a record never filled in.
pub const NOT_AVAILABLE: &str = "N/A";

/// One stored inspection record, persisted as `inspection_{id}.json`.
///
/// Records are written by clients at the end of an inspection and read back
/// for report generation. Every field besides the payload shape itself is
/// optional so that partially filled records still render (missing values
/// fall back to [`NOT_AVAILABLE`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectionRecord {
    /// Record identifier, also embedded in the file name. Accepts both JSON
    /// strings and numbers since older clients sent numeric ids.
    #[serde(default, deserialize_with = "id_string_or_number")]
    pub id: Option<String>,
    /// Inspection date in `YYYY-MM-DD` form.
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub inspector: Option<String>,
    #[serde(default)]
    pub animal_type: Option<String>,
    /// Outcome label, `"Passed"` or `"Failed"` once the inspection closes.
    #[serde(default)]
    pub health_status: Option<String>,
    #[serde(default)]
    pub observations: Option<String>,
    /// Paths of captured images to embed in the single-inspection report.
    #[serde(default)]
    pub images: Vec<String>,
    /// Whether follow-up work is still outstanding for this inspection.
    #[serde(default)]
    pub pending_actions: bool,
}

fn id_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(serde_json::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "record id must be a string or number, got {other}"
        ))),
    }
}

/// Aggregated counts and listing for one calendar month.
#[derive(Debug, Clone, Serialize)]
pub struct MonthlyReport {
    pub year: i32,
    pub month: u32,
    pub total_inspections: u32,
    pub passed_inspections: u32,
    pub failed_inspections: u32,
    pub pending_actions: u32,
    /// Admitted records in date order (record id breaks ties).
    pub inspections: Vec<MonthlyEntry>,
}

impl MonthlyReport {
    pub fn empty(year: i32, month: u32) -> Self {
        Self {
            year,
            month,
            total_inspections: 0,
            passed_inspections: 0,
            failed_inspections: 0,
            pending_actions: 0,
            inspections: Vec::new(),
        }
    }

    /// Human-readable month heading, e.g. `February 2024`.
    pub fn month_label(&self) -> String {
        match chrono::NaiveDate::from_ymd_opt(self.year, self.month, 1) {
            Some(first) => first.format("%B %Y").to_string(),
            None => format!("{}-{:02}", self.year, self.month),
        }
    }
}

/// One row of the monthly inspection list.
#[derive(Debug, Clone, Serialize)]
pub struct MonthlyEntry {
    pub date: chrono::NaiveDate,
    pub id: String,
    pub animal_type: String,
    pub status: String,
}
