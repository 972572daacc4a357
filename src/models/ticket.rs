use super::doc_status::DocStatus;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Ticket {
    pub name: String,  // ⇔ tickets.name ("T001"), also the QR payload
    pub event: String, // ⇔ tickets.event
    pub attendee_name: String,
    pub attendee_email: String,
    pub ticket_type: String,
    pub coupon_used: Option<String>,
    pub status: DocStatus, // ⇔ tickets.docstatus
    pub created_at: String,
}

/// Input for booking a ticket.
#[derive(Debug, Clone)]
pub struct NewTicket {
    pub event: String,
    pub attendee_name: String,
    pub attendee_email: String,
    pub ticket_type: Option<String>,
    pub coupon_code: Option<String>,
}
