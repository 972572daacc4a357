use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::db::queries::{
    insert_check_in, list_check_ins, load_check_in, load_ticket, next_name,
    set_check_in_status, submitted_check_in_exists,
};
use crate::errors::{AppError, AppResult};
use crate::models::check_in::{CheckInOutcome, CheckInRecord, TicketVerification};
use crate::models::doc_status::DocStatus;
use chrono::{Local, NaiveDate};

/// Door-side logic: verify scanned tickets and record check-ins.
pub struct CheckInLogic;

impl CheckInLogic {
    /// Look a scanned ticket code up. `None` when no such ticket exists.
    pub fn verify(
        pool: &mut DbPool,
        ticket: &str,
        date: NaiveDate,
    ) -> AppResult<Option<TicketVerification>> {
        let Some(t) = load_ticket(&pool.conn, ticket.trim())? else {
            return Ok(None);
        };

        let checked_in = submitted_check_in_exists(&pool.conn, &t.name, &date)?;

        Ok(Some(TicketVerification {
            ticket: t.name,
            attendee_name: t.attendee_name,
            event: t.event,
            checked_in,
        }))
    }

    /// Record that a ticket holder is present on `date`.
    ///
    /// At most one submitted check-in exists per ticket and day; a repeated
    /// scan reports [`CheckInOutcome::AlreadyCheckedIn`] and writes nothing.
    pub fn mark(pool: &mut DbPool, ticket: &str, date: NaiveDate) -> AppResult<CheckInOutcome> {
        let ticket = ticket.trim();
        let t = load_ticket(&pool.conn, ticket)?
            .ok_or_else(|| AppError::TicketNotFound(ticket.to_string()))?;

        match t.status {
            DocStatus::Submitted => {}
            DocStatus::Cancelled => return Err(AppError::TicketCancelled(t.name)),
            DocStatus::Draft => {
                return Err(AppError::Validation(format!(
                    "Ticket {} has not been submitted yet.",
                    t.name
                )));
            }
        }

        let tx = pool.conn.transaction()?;

        if submitted_check_in_exists(&tx, &t.name, &date)? {
            return Ok(CheckInOutcome::AlreadyCheckedIn);
        }

        let record = CheckInRecord {
            name: next_name(&tx, "check_ins", "CI")?,
            ticket: t.name.clone(),
            event: t.event.clone(),
            date: Some(date),
            checkin_time: Local::now().to_rfc3339(),
            status: DocStatus::Submitted,
        };

        insert_check_in(&tx, &record)?;
        tx.commit()?;

        ttlog_quiet(
            &pool.conn,
            "checkin",
            &record.name,
            &format!("{} ({}) checked in on {}", t.attendee_name, t.name, date),
        );

        Ok(CheckInOutcome::CheckedIn(record.name))
    }

    /// Cancel a submitted check-in; the attendance report ignores it afterwards.
    pub fn cancel(pool: &mut DbPool, name: &str) -> AppResult<CheckInRecord> {
        let record = load_check_in(&pool.conn, name)?
            .ok_or_else(|| AppError::CheckInNotFound(name.to_string()))?;

        if !record.status.is_submitted() {
            return Err(AppError::NotSubmitted { name: record.name });
        }

        set_check_in_status(&pool.conn, &record.name, DocStatus::Cancelled)?;
        ttlog_quiet(
            &pool.conn,
            "checkin_cancel",
            &record.name,
            &format!("Cancelled check-in of ticket {}", record.ticket),
        );

        Ok(CheckInRecord {
            status: DocStatus::Cancelled,
            ..record
        })
    }

    pub fn list(pool: &mut DbPool, event: &str) -> AppResult<Vec<CheckInRecord>> {
        list_check_ins(&pool.conn, event)
    }
}
