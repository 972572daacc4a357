//! Terminal rendering of the attendance report.

use crate::models::report::AttendanceReport;
use crate::ui::messages::{header, warning};
use crate::utils::colors::{
    GREY, RESET, attendance_mark, color_for_indicator, color_for_optional_field,
};
use crate::utils::table::{Column, Table};

const BAR_WIDTH: usize = 30;

fn optional_cell(value: Option<&str>) -> String {
    let color = color_for_optional_field(value);
    match value {
        Some(v) if !v.trim().is_empty() => format!("{color}{v}{RESET}"),
        _ => format!("{color}--{RESET}"),
    }
}

/// Print grid, per-day bars and summary cards for `title`.
pub fn print_report(title: &str, report: &AttendanceReport) {
    header(format!("Attendance summary: {}", title));

    if report.is_empty() {
        warning("No check-ins recorded for this event.");
        return;
    }

    let mut table = Table::new(
        report
            .columns
            .iter()
            .map(|c| Column::new(c.label.as_str()))
            .collect(),
    );

    for row in &report.rows {
        let mut cells = vec![
            row.ticket.clone(),
            optional_cell(row.attendee_name.as_deref()),
            optional_cell(row.attendee_email.as_deref()),
            optional_cell(row.ticket_type.as_deref()),
        ];
        cells.extend(row.attendance.iter().map(|p| attendance_mark(*p)));
        table.add_row(cells);
    }

    print!("{}", table.render());
    println!();

    if let Some(chart) = &report.chart {
        let values = chart.values();
        let max = values.iter().copied().max().unwrap_or(0).max(1);
        let label_w = chart
            .data
            .labels
            .iter()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0);

        for (label, value) in chart.data.labels.iter().zip(values) {
            let len = value * BAR_WIDTH / max;
            println!(
                "  {:<label_w$} {}{}{}{} {}",
                label,
                "█".repeat(len),
                GREY,
                "░".repeat(BAR_WIDTH - len),
                RESET,
                value,
            );
        }
        println!();
    }

    for item in &report.summary {
        println!(
            "  {}{:>5}{}  {}",
            color_for_indicator(&item.indicator),
            item.value,
            RESET,
            item.label
        );
    }
    println!();
}
