//! Output types of the attendance report.
//!
//! The serialized shape is what a reporting front-end consumes: column
//! descriptors, rows keyed by column fieldname, a bar chart and summary cards.

use chrono::NaiveDate;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum FieldType {
    Link,
    Data,
    Check,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ReportColumn {
    pub label: String,
    pub fieldname: String,
    pub fieldtype: FieldType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<String>,
    pub width: u32,
}

impl ReportColumn {
    pub fn new(label: &str, fieldname: &str, fieldtype: FieldType, width: u32) -> Self {
        Self {
            label: label.to_string(),
            fieldname: fieldname.to_string(),
            fieldtype,
            options: None,
            width,
        }
    }

    pub fn link(label: &str, fieldname: &str, options: &str, width: u32) -> Self {
        Self {
            options: Some(options.to_string()),
            ..Self::new(label, fieldname, FieldType::Link, width)
        }
    }
}

/// Fieldname of the i-th day column.
pub fn day_fieldname(i: usize) -> String {
    format!("day_{i}")
}

/// One attendee line: fixed ticket fields plus one flag per report day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceRow {
    pub ticket: String,
    pub attendee_name: Option<String>,
    pub attendee_email: Option<String>,
    pub ticket_type: Option<String>,
    pub attendance: Vec<bool>,
}

impl AttendanceRow {
    pub fn days_attended(&self) -> usize {
        self.attendance.iter().filter(|p| **p).count()
    }

    /// Case-insensitive name, missing names sort first.
    pub fn sort_key(&self) -> String {
        self.attendee_name
            .as_deref()
            .unwrap_or("")
            .to_lowercase()
    }
}

impl Serialize for AttendanceRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(4 + self.attendance.len()))?;
        map.serialize_entry("ticket", &self.ticket)?;
        map.serialize_entry("attendee_name", &self.attendee_name)?;
        map.serialize_entry("attendee_email", &self.attendee_email)?;
        map.serialize_entry("ticket_type", &self.ticket_type)?;
        for (i, present) in self.attendance.iter().enumerate() {
            map.serialize_entry(&day_fieldname(i), &u8::from(*present))?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ChartDataset {
    pub name: String,
    pub values: Vec<usize>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Chart {
    pub data: ChartData,
    #[serde(rename = "type")]
    pub chart_type: String,
    pub colors: Vec<String>,
}

impl Chart {
    /// Values of the first dataset (the only one this report draws).
    pub fn values(&self) -> &[usize] {
        self.data
            .datasets
            .first()
            .map(|d| d.values.as_slice())
            .unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SummaryItem {
    pub value: usize,
    pub label: String,
    pub datatype: String,
    pub indicator: String,
}

impl SummaryItem {
    pub fn int(value: usize, label: impl Into<String>, indicator: &str) -> Self {
        Self {
            value,
            label: label.into(),
            datatype: "Int".to_string(),
            indicator: indicator.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct AttendanceReport {
    pub columns: Vec<ReportColumn>,
    pub rows: Vec<AttendanceRow>,
    pub chart: Option<Chart>,
    pub summary: Vec<SummaryItem>,
    #[serde(skip)]
    pub date_axis: Vec<NaiveDate>,
}

impl AttendanceReport {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
