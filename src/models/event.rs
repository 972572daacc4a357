use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Event {
    pub name: String,              // ⇔ events.name ("EV001")
    pub title: String,             // ⇔ events.title
    pub route: Option<String>,     // ⇔ events.route (slug, set when published)
    pub category: Option<String>,  // ⇔ events.category
    pub start_date: NaiveDate,     // ⇔ events.start_date (TEXT "YYYY-MM-DD")
    pub end_date: Option<NaiveDate>,
    pub is_published: bool,
    pub default_ticket_type: Option<String>,
    pub proposal: Option<String>,  // ⇔ events.proposal (source proposal, if any)
}

/// Input for creating a new event.
#[derive(Debug, Clone, Default)]
pub struct NewEvent {
    pub title: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub route: Option<String>,
    pub category: Option<String>,
    pub is_published: bool,
    pub proposal: Option<String>,
}
