use chrono::NaiveDate;

/// Storage format for every date column.
pub const DB_DATE_FMT: &str = "%Y-%m-%d";

/// Short label used for report columns and chart bars (e.g. "12 Dec").
pub const SHORT_LABEL_FMT: &str = "%-d %b";

/// Long label used for summary entries (e.g. "12 Dec 2025").
pub const LONG_LABEL_FMT: &str = "%-d %b %Y";

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DB_DATE_FMT).ok()
}

/// Parse an optional CLI date, falling back to today.
pub fn parse_or_today(s: Option<&str>) -> Result<NaiveDate, String> {
    match s {
        Some(raw) => parse_date(raw).ok_or_else(|| raw.to_string()),
        None => Ok(today()),
    }
}

pub fn to_db(d: &NaiveDate) -> String {
    d.format(DB_DATE_FMT).to_string()
}

pub fn short_label(d: &NaiveDate) -> String {
    d.format(SHORT_LABEL_FMT).to_string()
}

pub fn long_label(d: &NaiveDate) -> String {
    d.format(LONG_LABEL_FMT).to_string()
}
