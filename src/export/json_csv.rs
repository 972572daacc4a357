// src/export/json_csv.rs

use crate::errors::{AppError, AppResult};
use crate::export::model::{get_headers, mark_numeric, rows_to_table};
use crate::export::notify_export_success;
use crate::models::report::AttendanceReport;
use crate::ui::messages::info;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Export the whole report (columns, rows, chart, summary) pretty-printed.
pub(crate) fn export_json(report: &AttendanceReport, path: &Path) -> AppResult<()> {
    info(format!("Exporting to JSON: {}", path.display()));

    let json_data = serde_json::to_string_pretty(report)
        .map_err(|e| AppError::Export(format!("JSON serialization error: {e}")))?;

    let mut file = File::create(path)?;
    file.write_all(json_data.as_bytes())?;

    notify_export_success("JSON", path);
    Ok(())
}

/// Export the attendance grid: label header, then one line per attendee (1/0 per day).
pub(crate) fn export_csv(report: &AttendanceReport, path: &Path) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));

    let mut wtr = csv::Writer::from_path(path)
        .map_err(|e| AppError::Export(format!("CSV open error: {e}")))?;

    wtr.write_record(get_headers(report))
        .map_err(|e| AppError::Export(format!("CSV write error: {e}")))?;

    for row in rows_to_table(report, mark_numeric) {
        wtr.write_record(&row)
            .map_err(|e| AppError::Export(format!("CSV write error: {e}")))?;
    }

    wtr.flush()?;

    notify_export_success("CSV", path);
    Ok(())
}
