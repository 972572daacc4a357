// src/export/model.rs

use crate::models::report::{AttendanceReport, AttendanceRow};

/// Header row: the report column labels, in order.
pub(crate) fn get_headers(report: &AttendanceReport) -> Vec<String> {
    report.columns.iter().map(|c| c.label.clone()).collect()
}

/// Flatten one row into strings; `mark` renders a day flag.
pub(crate) fn row_to_cells(row: &AttendanceRow, mark: fn(bool) -> &'static str) -> Vec<String> {
    let mut cells = vec![
        row.ticket.clone(),
        row.attendee_name.clone().unwrap_or_default(),
        row.attendee_email.clone().unwrap_or_default(),
        row.ticket_type.clone().unwrap_or_default(),
    ];
    cells.extend(row.attendance.iter().map(|p| mark(*p).to_string()));
    cells
}

pub(crate) fn rows_to_table(
    report: &AttendanceReport,
    mark: fn(bool) -> &'static str,
) -> Vec<Vec<String>> {
    report.rows.iter().map(|r| row_to_cells(r, mark)).collect()
}

/// Check fields as stored: 1 / 0.
pub(crate) fn mark_numeric(present: bool) -> &'static str {
    if present { "1" } else { "0" }
}

/// Check fields for printed output (ASCII only, PDF base fonts lack ✔).
pub(crate) fn mark_printable(present: bool) -> &'static str {
    if present { "X" } else { "" }
}

/// "label: value" lines of the summary cards.
pub(crate) fn summary_lines(report: &AttendanceReport) -> Vec<String> {
    report
        .summary
        .iter()
        .map(|s| format!("{}: {}", s.label, s.value))
        .collect()
}
