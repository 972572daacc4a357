//! Unified application error type.
//! All modules (db, core, cli, export) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid discount type: {0}")]
    InvalidDiscountType(String),

    // ---------------------------
    // Lookup errors
    // ---------------------------
    #[error("Event not found: {0}")]
    EventNotFound(String),

    #[error("Ticket not found: {0}")]
    TicketNotFound(String),

    #[error("Check-in not found: {0}")]
    CheckInNotFound(String),

    #[error("Coupon not found: {0}")]
    CouponNotFound(String),

    #[error("Event category not found: {0}")]
    CategoryNotFound(String),

    #[error("Proposal not found: {0}")]
    ProposalNotFound(String),

    #[error("Ticket type '{ticket_type}' does not exist for event {event}")]
    TicketTypeNotFound { event: String, ticket_type: String },

    // ---------------------------
    // Validation / lifecycle errors
    // ---------------------------
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Duplicate(String),

    #[error("Ticket {0} is cancelled")]
    TicketCancelled(String),

    #[error("Coupon has been already used up maximum number of times!")]
    CouponUsedUp(String),

    #[error("Cannot cancel {name}: document is not submitted")]
    NotSubmitted { name: String },

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
