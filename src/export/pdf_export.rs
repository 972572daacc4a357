// src/export/pdf_export.rs

use crate::errors::{AppError, AppResult};
use crate::export::model::{get_headers, mark_printable, rows_to_table, summary_lines};
use crate::export::notify_export_success;
use crate::export::pdf::PdfManager;
use crate::models::report::AttendanceReport;
use crate::ui::messages::info;
use std::path::Path;

/// More than this many day columns switches to landscape pages.
const PORTRAIT_MAX_DAYS: usize = 4;

/// Export PDF: the attendance grid followed by a summary page.
pub(crate) fn export_pdf(report: &AttendanceReport, path: &Path, title: &str) -> AppResult<()> {
    info(format!("Exporting to PDF: {}", path.display()));

    let headers = get_headers(report);
    let rows = rows_to_table(report, mark_printable);

    let mut pdf = PdfManager::new(report.date_axis.len() > PORTRAIT_MAX_DAYS);
    pdf.write_table(title, &headers, &rows);
    pdf.write_lines(&format!("{title} - summary"), &summary_lines(report));

    pdf.save(path)
        .map_err(|e| AppError::Export(format!("PDF export error: {e}")))?;

    notify_export_success("PDF", path);
    Ok(())
}
