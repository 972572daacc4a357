// src/export/xlsx.rs

use crate::errors::{AppError, AppResult};
use crate::export::model::get_headers;
use crate::export::notify_export_success;
use crate::models::report::AttendanceReport;
use crate::ui::messages::info;
use rust_xlsxwriter::{
    Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet,
};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

const BAND_1: u32 = 0xEAF3FB;
const BAND_2: u32 = 0xFFFFFF;

fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F75B5))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin)
}

fn cell_format(band: u32) -> Format {
    Format::new()
        .set_background_color(Color::RGB(band))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin)
}

/// Export XLSX: an "Attendance" sheet with the grid (day flags as booleans)
/// and a "Summary" sheet with the per-day counts and the total.
pub(crate) fn export_xlsx(report: &AttendanceReport, path: &Path) -> AppResult<()> {
    info(format!("Exporting to XLSX: {}", path.display()));

    let mut workbook = Workbook::new();

    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Attendance").map_err(to_app_error)?;
        write_grid(sheet, report)?;
    }

    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Summary").map_err(to_app_error)?;
        write_summary(sheet, report)?;
    }

    workbook.save(path).map_err(to_app_error)?;

    notify_export_success("XLSX", path);
    Ok(())
}

fn write_grid(sheet: &mut Worksheet, report: &AttendanceReport) -> AppResult<()> {
    let headers = get_headers(report);
    let hdr = header_format();

    for (col, header) in headers.iter().enumerate() {
        sheet
            .write_with_format(0, col as u16, header.as_str(), &hdr)
            .map_err(to_app_error)?;
    }
    sheet.set_freeze_panes(1, 4).map_err(to_app_error)?;

    let mut col_widths: Vec<usize> = headers
        .iter()
        .map(|h| UnicodeWidthStr::width(h.as_str()))
        .collect();

    for (idx, row) in report.rows.iter().enumerate() {
        let r = (idx + 1) as u32;
        let band = if idx % 2 == 0 { BAND_1 } else { BAND_2 };
        let text_fmt = cell_format(band);
        let flag_fmt = cell_format(band).set_align(FormatAlign::Center);

        let texts = [
            row.ticket.as_str(),
            row.attendee_name.as_deref().unwrap_or(""),
            row.attendee_email.as_deref().unwrap_or(""),
            row.ticket_type.as_deref().unwrap_or(""),
        ];
        for (col, text) in texts.iter().enumerate() {
            sheet
                .write_with_format(r, col as u16, *text, &text_fmt)
                .map_err(to_app_error)?;
            col_widths[col] = col_widths[col].max(UnicodeWidthStr::width(*text));
        }

        for (i, present) in row.attendance.iter().enumerate() {
            sheet
                .write_boolean_with_format(r, (texts.len() + i) as u16, *present, &flag_fmt)
                .map_err(to_app_error)?;
        }
    }

    for (c, w) in col_widths.iter().enumerate() {
        sheet
            .set_column_width(c as u16, *w as f64 + 2.0)
            .map_err(to_app_error)?;
    }

    Ok(())
}

fn write_summary(sheet: &mut Worksheet, report: &AttendanceReport) -> AppResult<()> {
    let hdr = header_format();
    sheet
        .write_with_format(0, 0, "Day", &hdr)
        .map_err(to_app_error)?;
    sheet
        .write_with_format(0, 1, "Attendees", &hdr)
        .map_err(to_app_error)?;

    let mut label_w = "Day".len();
    for (idx, item) in report.summary.iter().enumerate() {
        let r = (idx + 1) as u32;
        let fmt = cell_format(if idx % 2 == 0 { BAND_1 } else { BAND_2 });
        sheet
            .write_with_format(r, 0, item.label.as_str(), &fmt)
            .map_err(to_app_error)?;
        sheet
            .write_with_format(r, 1, item.value as f64, &fmt)
            .map_err(to_app_error)?;
        label_w = label_w.max(UnicodeWidthStr::width(item.label.as_str()));
    }

    sheet
        .set_column_width(0, label_w as f64 + 2.0)
        .map_err(to_app_error)?;
    sheet.set_column_width(1, 12.0).map_err(to_app_error)?;
    Ok(())
}

fn to_app_error<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Export(e.to_string())
}
