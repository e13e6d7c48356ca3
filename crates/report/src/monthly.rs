use chrono::{Datelike, NaiveDate};

use crate::error::ReportError;
use crate::record::{InspectionRecord, MonthlyEntry, MonthlyReport, NOT_AVAILABLE};

/// Rejects months outside the calendar range before any work happens.
pub fn validate_month(month: u32) -> Result<(), ReportError> {
    if (1..=12).contains(&month) {
        Ok(())
    } else {
        Err(ReportError::InvalidMonth(month))
    }
}

/// Folds stored records into the summary for one calendar month.
///
/// A record is admitted when its `date` parses as `YYYY-MM-DD` and falls in
/// the requested month. Records without a parseable date cannot be assigned
/// to any month and are skipped with a warning. Counting rules:
///
/// - `passed_inspections` / `failed_inspections` count exact
///   `health_status` labels; anything else contributes to neither.
/// - `pending_actions` counts records flagged as still needing follow-up.
pub fn aggregate_month(records: Vec<InspectionRecord>, year: i32, month: u32) -> MonthlyReport {
    let mut report = MonthlyReport::empty(year, month);
    for record in records {
        let date = record
            .date
            .as_deref()
            .and_then(|raw| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok());
        let Some(date) = date else {
            tracing::warn!(
                id = record.id.as_deref().unwrap_or("unknown"),
                date = record.date.as_deref().unwrap_or(""),
                "Skipping inspection record without a parseable date"
            );
            continue;
        };
        if date.year() != year || date.month() != month {
            continue;
        }

        report.total_inspections += 1;
        match record.health_status.as_deref() {
            Some("Passed") => report.passed_inspections += 1,
            Some("Failed") => report.failed_inspections += 1,
            _ => {}
        }
        if record.pending_actions {
            report.pending_actions += 1;
        }
        report.inspections.push(MonthlyEntry {
            date,
            id: record.id.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            animal_type: record
                .animal_type
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            status: record
                .health_status
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        });
    }
    report
        .inspections
        .sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
    report
}
