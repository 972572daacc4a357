//! Event attendance summary.
//!
//! Builds a per-attendee, per-day check-in matrix for one event, plus a bar
//! chart and summary cards. Pure read over an [`AttendanceSource`] snapshot:
//! nothing is cached and nothing is written back.

use crate::errors::AppResult;
use crate::models::report::{
    AttendanceReport, AttendanceRow, Chart, ChartData, ChartDataset, FieldType, ReportColumn,
    SummaryItem, day_fieldname,
};
use crate::utils::date::{long_label, short_label};
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

/// A submitted check-in as seen by the report: which ticket, which day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckInEntry {
    pub ticket: String,
    pub date: Option<NaiveDate>,
}

/// Ticket fields shown in the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketInfo {
    pub name: String,
    pub attendee_name: Option<String>,
    pub attendee_email: Option<String>,
    pub ticket_type: Option<String>,
}

/// Read side of the record store needed by the report.
pub trait AttendanceSource {
    /// Distinct dates of submitted, dated check-ins for `event`, ascending.
    fn check_in_dates(&self, event: &str) -> AppResult<Vec<NaiveDate>>;

    /// Every submitted check-in for `event`.
    fn submitted_check_ins(&self, event: &str) -> AppResult<Vec<CheckInEntry>>;

    /// Ticket details for exactly the given ticket names.
    fn tickets_by_ids(&self, ids: &[String]) -> AppResult<Vec<TicketInfo>>;
}

/// Presentation knobs that do not change the numbers.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub chart_color: String,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            chart_color: "#4F46E5".to_string(),
        }
    }
}

pub const TOTAL_LABEL: &str = "Total Unique Attendees";
pub const DATASET_NAME: &str = "Attendees";

/// Build the attendance report for `event`.
///
/// A missing or blank event yields an empty report (no columns at all).
pub fn execute<S: AttendanceSource + ?Sized>(
    source: &S,
    event: Option<&str>,
    opts: &ReportOptions,
) -> AppResult<AttendanceReport> {
    let Some(event) = event.map(str::trim).filter(|e| !e.is_empty()) else {
        return Ok(AttendanceReport::default());
    };

    let date_axis = source.check_in_dates(event)?;
    let columns = build_columns(&date_axis);
    let rows = build_rows(source, event, &date_axis)?;
    let chart = build_chart(&rows, &date_axis, opts);
    let summary = build_summary(&rows, &date_axis);

    Ok(AttendanceReport {
        columns,
        rows,
        chart,
        summary,
        date_axis,
    })
}

fn build_columns(date_axis: &[NaiveDate]) -> Vec<ReportColumn> {
    let mut columns = vec![
        ReportColumn::link("Ticket", "ticket", "Event Ticket", 120),
        ReportColumn::new("Attendee Name", "attendee_name", FieldType::Data, 180),
        ReportColumn::new("Attendee Email", "attendee_email", FieldType::Data, 200),
        ReportColumn::link("Ticket Type", "ticket_type", "Event Ticket Type", 150),
    ];

    for (i, d) in date_axis.iter().enumerate() {
        columns.push(ReportColumn::new(
            &short_label(d),
            &day_fieldname(i),
            FieldType::Check,
            80,
        ));
    }

    columns
}

fn build_rows<S: AttendanceSource + ?Sized>(
    source: &S,
    event: &str,
    date_axis: &[NaiveDate],
) -> AppResult<Vec<AttendanceRow>> {
    let check_ins = source.submitted_check_ins(event)?;
    if check_ins.is_empty() {
        return Ok(Vec::new());
    }

    // ticket → days attended; an undated check-in still registers the ticket
    let mut attended: BTreeMap<String, BTreeSet<NaiveDate>> = BTreeMap::new();
    for ci in check_ins {
        let days = attended.entry(ci.ticket).or_default();
        if let Some(d) = ci.date {
            days.insert(d);
        }
    }

    let ids: Vec<String> = attended.keys().cloned().collect();
    let tickets = source.tickets_by_ids(&ids)?;

    let mut rows: Vec<AttendanceRow> = tickets
        .into_iter()
        .filter_map(|t| {
            let days = attended.get(&t.name)?;
            Some(AttendanceRow {
                attendance: date_axis.iter().map(|d| days.contains(d)).collect(),
                ticket: t.name,
                attendee_name: t.attendee_name,
                attendee_email: t.attendee_email,
                ticket_type: t.ticket_type,
            })
        })
        .collect();

    rows.sort_by_cached_key(AttendanceRow::sort_key);
    Ok(rows)
}

/// Attendees present on each day of the axis.
fn day_counts(rows: &[AttendanceRow], days: usize) -> Vec<usize> {
    (0..days)
        .map(|i| rows.iter().filter(|r| r.attendance[i]).count())
        .collect()
}

fn build_chart(
    rows: &[AttendanceRow],
    date_axis: &[NaiveDate],
    opts: &ReportOptions,
) -> Option<Chart> {
    if rows.is_empty() || date_axis.is_empty() {
        return None;
    }

    Some(Chart {
        data: ChartData {
            labels: date_axis.iter().map(short_label).collect(),
            datasets: vec![ChartDataset {
                name: DATASET_NAME.to_string(),
                values: day_counts(rows, date_axis.len()),
            }],
        },
        chart_type: "bar".to_string(),
        colors: vec![opts.chart_color.clone()],
    })
}

fn build_summary(rows: &[AttendanceRow], date_axis: &[NaiveDate]) -> Vec<SummaryItem> {
    if rows.is_empty() {
        return Vec::new();
    }

    let mut summary: Vec<SummaryItem> = date_axis
        .iter()
        .zip(day_counts(rows, date_axis.len()))
        .map(|(d, count)| SummaryItem::int(count, long_label(d), "blue"))
        .collect();

    summary.push(SummaryItem::int(rows.len(), TOTAL_LABEL, "green"));
    summary
}
