use crate::models::doc_status::DocStatus;
use chrono::NaiveDate;
use serde::Serialize;

/// Review state of an event proposal.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum ProposalStatus {
    Received,
    InReview,
    Approved,
    EventCreated,
    Rejected,
}

impl ProposalStatus {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            ProposalStatus::Received => "Received",
            ProposalStatus::InReview => "In Review",
            ProposalStatus::Approved => "Approved",
            ProposalStatus::EventCreated => "Event Created",
            ProposalStatus::Rejected => "Rejected",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "Received" => Some(ProposalStatus::Received),
            "In Review" => Some(ProposalStatus::InReview),
            "Approved" => Some(ProposalStatus::Approved),
            "Event Created" => Some(ProposalStatus::EventCreated),
            "Rejected" => Some(ProposalStatus::Rejected),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Proposal {
    pub name: String,             // ⇔ proposals.name ("EPR001")
    pub title: String,
    pub category: Option<String>, // ⇔ event_categories.name
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub host: Option<String>,
    pub status: ProposalStatus,
    pub doc_status: DocStatus,
    pub event: Option<String>,    // set once the proposal produced an event
    pub created_at: String,
}

/// Input for recording a new proposal.
#[derive(Debug, Clone, Default)]
pub struct NewProposal {
    pub title: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub category: Option<String>,
    pub host: Option<String>,
}
