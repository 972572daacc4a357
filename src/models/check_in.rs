use super::doc_status::DocStatus;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct CheckInRecord {
    pub name: String, // ⇔ check_ins.name ("CI001")
    pub ticket: String,
    pub event: String,
    pub date: Option<NaiveDate>, // ⇔ check_ins.date (nullable)
    pub checkin_time: String,    // ISO 8601 local time
    pub status: DocStatus,
}

/// Result of a check-in attempt at the door.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckInOutcome {
    CheckedIn(String),
    AlreadyCheckedIn,
}

/// What a scanner learns from a ticket code.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TicketVerification {
    pub ticket: String,
    pub attendee_name: String,
    pub event: String,
    pub checked_in: bool,
}
