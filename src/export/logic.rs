// src/export/logic.rs

use crate::config::Config;
use crate::core::event::EventLogic;
use crate::core::report::{self, ReportOptions};
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::pdf_export::export_pdf;
use crate::export::xlsx::export_xlsx;
use crate::ui::messages::warning;
use crate::utils::path::expand_tilde;
use std::path::Path;

/// High-level export of the attendance report.
pub struct ExportLogic;

impl ExportLogic {
    /// Build the attendance report of `event` and write it to `file`.
    ///
    /// - `file` must be an absolute path (`~/` is expanded)
    /// - an existing file is only replaced with `force` or after confirmation
    /// - an event without check-ins produces no file, only a warning
    pub fn export(
        pool: &mut DbPool,
        cfg: &Config,
        event: &str,
        format: ExportFormat,
        file: &str,
        force: bool,
    ) -> AppResult<bool> {
        let path_buf = expand_tilde(file);
        let path: &Path = &path_buf;

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "Output file path must be absolute: {file}"
            )));
        }

        if !format.matches_extension(path) {
            warning(format!(
                "'{}' does not end in .{}; writing {} anyway.",
                path.display(),
                format.as_str(),
                format.as_str().to_uppercase()
            ));
        }

        let ev = EventLogic::get(pool, event)?;

        ensure_writable(path, force)?;

        let opts = ReportOptions {
            chart_color: cfg.chart_color.clone(),
        };
        let rep = report::execute(&*pool, Some(&ev.name), &opts)?;

        if rep.is_empty() {
            warning(format!("No check-ins found for event {}. Nothing to export.", ev.name));
            return Ok(false);
        }

        match format {
            ExportFormat::Csv => export_csv(&rep, path)?,
            ExportFormat::Json => export_json(&rep, path)?,
            ExportFormat::Xlsx => export_xlsx(&rep, path)?,
            ExportFormat::Pdf => {
                let title = format!("Attendance summary - {} ({})", ev.title, ev.name);
                export_pdf(&rep, path, &title)?
            }
        }

        ttlog_quiet(
            &pool.conn,
            "export",
            &path.to_string_lossy(),
            &format!(
                "Exported attendance of {} as {} ({} attendees)",
                ev.name,
                format.as_str(),
                rep.rows.len()
            ),
        );

        Ok(true)
    }
}
