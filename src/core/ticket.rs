use crate::core::event::EventLogic;
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::db::queries::{
    increment_coupon_claim, insert_ticket, list_tickets, load_coupon_by_code, load_ticket,
    next_name, set_ticket_status, ticket_type_exists,
};
use crate::errors::{AppError, AppResult};
use crate::models::doc_status::DocStatus;
use crate::models::ticket::{NewTicket, Ticket};
use chrono::Local;

/// High-level business logic for tickets.
pub struct TicketLogic;

impl TicketLogic {
    /// Book (and submit) a ticket for an event.
    ///
    /// A coupon, when given, must belong to the same event and still have
    /// claims left; booking consumes one claim in the same transaction.
    pub fn book(pool: &mut DbPool, input: NewTicket, fallback_type: &str) -> AppResult<Ticket> {
        let attendee_name = input.attendee_name.trim().to_string();
        let attendee_email = input.attendee_email.trim().to_string();

        if attendee_name.is_empty() {
            return Err(AppError::Validation("Attendee name is required.".into()));
        }
        if !attendee_email.contains('@') {
            return Err(AppError::Validation(format!(
                "Invalid attendee email '{}'.",
                attendee_email
            )));
        }

        let event = EventLogic::get(pool, &input.event)?;

        let ticket_type = input
            .ticket_type
            .filter(|t| !t.trim().is_empty())
            .or(event.default_ticket_type.clone())
            .unwrap_or_else(|| fallback_type.to_string());

        let tx = pool.conn.transaction()?;

        if !ticket_type_exists(&tx, &event.name, &ticket_type)? {
            return Err(AppError::TicketTypeNotFound {
                event: event.name.clone(),
                ticket_type,
            });
        }

        let coupon_used = match input.coupon_code.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(code) => {
                let coupon = load_coupon_by_code(&tx, code)?
                    .ok_or_else(|| AppError::CouponNotFound(code.to_string()))?;

                if coupon.event != event.name {
                    return Err(AppError::Validation(format!(
                        "Coupon '{}' is not valid for event {}.",
                        code, event.name
                    )));
                }
                if coupon.is_used_up() {
                    return Err(AppError::CouponUsedUp(coupon.code));
                }

                increment_coupon_claim(&tx, &coupon.name)?;
                Some(coupon.name)
            }
        };

        let ticket = Ticket {
            name: next_name(&tx, "tickets", "T")?,
            event: event.name.clone(),
            attendee_name,
            attendee_email,
            ticket_type,
            coupon_used,
            status: DocStatus::Submitted,
            created_at: Local::now().to_rfc3339(),
        };

        insert_ticket(&tx, &ticket)?;
        tx.commit()?;

        ttlog_quiet(
            &pool.conn,
            "ticket_book",
            &ticket.name,
            &format!(
                "Booked {} ticket for {} <{}> (event {})",
                ticket.ticket_type, ticket.attendee_name, ticket.attendee_email, ticket.event
            ),
        );

        Ok(ticket)
    }

    pub fn get(pool: &mut DbPool, name: &str) -> AppResult<Ticket> {
        load_ticket(&pool.conn, name)?.ok_or_else(|| AppError::TicketNotFound(name.to_string()))
    }

    /// Cancel a submitted ticket. Existing check-ins are left untouched.
    pub fn cancel(pool: &mut DbPool, name: &str) -> AppResult<Ticket> {
        let ticket = Self::get(pool, name)?;

        if !ticket.status.is_submitted() {
            return Err(AppError::NotSubmitted {
                name: ticket.name,
            });
        }

        set_ticket_status(&pool.conn, &ticket.name, DocStatus::Cancelled)?;
        ttlog_quiet(
            &pool.conn,
            "ticket_cancel",
            &ticket.name,
            &format!("Cancelled ticket of {}", ticket.attendee_name),
        );

        Ok(Ticket {
            status: DocStatus::Cancelled,
            ..ticket
        })
    }

    pub fn list(pool: &mut DbPool, event: &str) -> AppResult<Vec<Ticket>> {
        EventLogic::get(pool, event)?;
        list_tickets(&pool.conn, event)
    }
}
