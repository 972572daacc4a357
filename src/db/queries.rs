use crate::errors::{AppError, AppResult};
use crate::models::category::EventCategory;
use crate::models::check_in::CheckInRecord;
use crate::models::coupon::{Coupon, DiscountType};
use crate::models::doc_status::DocStatus;
use crate::models::event::Event;
use crate::models::proposal::{Proposal, ProposalStatus};
use crate::models::ticket::Ticket;
use crate::utils::date::{DB_DATE_FMT, to_db};
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

fn conversion_error(col: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(col, rusqlite::types::Type::Text, Box::new(err))
}

fn get_date(row: &Row, col: &str) -> Result<NaiveDate> {
    let raw: String = row.get(col)?;
    NaiveDate::parse_from_str(&raw, DB_DATE_FMT)
        .map_err(|_| conversion_error(0, AppError::InvalidDate(raw.clone())))
}

fn get_opt_date(row: &Row, col: &str) -> Result<Option<NaiveDate>> {
    let raw: Option<String> = row.get(col)?;
    match raw {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => NaiveDate::parse_from_str(&s, DB_DATE_FMT)
            .map(Some)
            .map_err(|_| conversion_error(0, AppError::InvalidDate(s.clone()))),
    }
}

fn get_status(row: &Row) -> Result<DocStatus> {
    let v: i32 = row.get("docstatus")?;
    DocStatus::from_db(v)
        .ok_or_else(|| conversion_error(0, AppError::Other(format!("Invalid docstatus: {}", v))))
}

/// Next name of a naming series: `prefix` followed by a zero-padded counter
/// ("T001", "T002", ...). Names widen naturally past 999.
pub fn next_name(conn: &Connection, table: &'static str, prefix: &str) -> Result<String> {
    let sql = format!("SELECT IFNULL(MAX(id), 0) + 1 FROM {table}");
    let next: i64 = conn.query_row(&sql, [], |row| row.get(0))?;
    Ok(format!("{prefix}{next:03}"))
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

pub fn map_event(row: &Row) -> Result<Event> {
    Ok(Event {
        name: row.get("name")?,
        title: row.get("title")?,
        route: row.get("route")?,
        category: row.get("category")?,
        start_date: get_date(row, "start_date")?,
        end_date: get_opt_date(row, "end_date")?,
        is_published: row.get::<_, i32>("is_published")? == 1,
        default_ticket_type: row.get("default_ticket_type")?,
        proposal: row.get("proposal")?,
    })
}

pub fn insert_event(conn: &Connection, ev: &Event, created_at: &str) -> AppResult<()> {
    conn.execute(
        "INSERT INTO events (name, title, route, category, start_date, end_date,
                             is_published, default_ticket_type, proposal, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            ev.name,
            ev.title,
            ev.route,
            ev.category,
            to_db(&ev.start_date),
            ev.end_date.as_ref().map(to_db),
            if ev.is_published { 1 } else { 0 },
            ev.default_ticket_type,
            ev.proposal,
            created_at,
        ],
    )?;
    Ok(())
}

pub fn load_event(conn: &Connection, name: &str) -> AppResult<Option<Event>> {
    let mut stmt = conn.prepare_cached("SELECT * FROM events WHERE name = ?1")?;
    Ok(stmt.query_row([name], map_event).optional()?)
}

pub fn list_events(conn: &Connection) -> AppResult<Vec<Event>> {
    let mut stmt = conn.prepare("SELECT * FROM events ORDER BY start_date ASC, id ASC")?;
    let rows = stmt.query_map([], map_event)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn route_exists(conn: &Connection, route: &str) -> AppResult<bool> {
    let mut stmt = conn.prepare_cached("SELECT 1 FROM events WHERE route = ?1 LIMIT 1")?;
    Ok(stmt.exists([route])?)
}

pub fn set_default_ticket_type(conn: &Connection, event: &str, title: &str) -> AppResult<()> {
    conn.execute(
        "UPDATE events SET default_ticket_type = ?1 WHERE name = ?2",
        params![title, event],
    )?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Event categories
// ---------------------------------------------------------------------------

pub fn map_category(row: &Row) -> Result<EventCategory> {
    Ok(EventCategory {
        name: row.get("name")?,
        slug: row.get("slug")?,
        description: row.get("description")?,
    })
}

pub fn insert_category(conn: &Connection, c: &EventCategory) -> AppResult<()> {
    conn.execute(
        "INSERT INTO event_categories (name, slug, description) VALUES (?1, ?2, ?3)",
        params![c.name, c.slug, c.description],
    )?;
    Ok(())
}

/// Look a category up by its name or its slug.
pub fn load_category(conn: &Connection, key: &str) -> AppResult<Option<EventCategory>> {
    let mut stmt =
        conn.prepare_cached("SELECT * FROM event_categories WHERE name = ?1 OR slug = ?1")?;
    Ok(stmt.query_row([key], map_category).optional()?)
}

pub fn category_exists(conn: &Connection, name: &str, slug: &str) -> AppResult<bool> {
    let mut stmt = conn
        .prepare_cached("SELECT 1 FROM event_categories WHERE name = ?1 OR slug = ?2 LIMIT 1")?;
    Ok(stmt.exists(params![name, slug])?)
}

pub fn list_categories(conn: &Connection) -> AppResult<Vec<EventCategory>> {
    let mut stmt = conn.prepare("SELECT * FROM event_categories ORDER BY name ASC")?;
    let rows = stmt.query_map([], map_category)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Ticket types
// ---------------------------------------------------------------------------

pub fn insert_ticket_type(conn: &Connection, event: &str, title: &str) -> AppResult<()> {
    conn.execute(
        "INSERT INTO ticket_types (event, title) VALUES (?1, ?2)",
        params![event, title],
    )?;
    Ok(())
}

pub fn ticket_type_exists(conn: &Connection, event: &str, title: &str) -> AppResult<bool> {
    let mut stmt = conn
        .prepare_cached("SELECT 1 FROM ticket_types WHERE event = ?1 AND title = ?2 LIMIT 1")?;
    Ok(stmt.exists(params![event, title])?)
}

pub fn list_ticket_types(conn: &Connection, event: &str) -> AppResult<Vec<String>> {
    let mut stmt =
        conn.prepare("SELECT title FROM ticket_types WHERE event = ?1 ORDER BY id ASC")?;
    let rows = stmt.query_map([event], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Tickets
// ---------------------------------------------------------------------------

pub fn map_ticket(row: &Row) -> Result<Ticket> {
    Ok(Ticket {
        name: row.get("name")?,
        event: row.get("event")?,
        attendee_name: row.get("attendee_name")?,
        attendee_email: row.get("attendee_email")?,
        ticket_type: row.get("ticket_type")?,
        coupon_used: row.get("coupon_used")?,
        status: get_status(row)?,
        created_at: row.get("created_at")?,
    })
}

pub fn insert_ticket(conn: &Connection, t: &Ticket) -> AppResult<()> {
    conn.execute(
        "INSERT INTO tickets (name, event, attendee_name, attendee_email, ticket_type,
                              coupon_used, docstatus, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            t.name,
            t.event,
            t.attendee_name,
            t.attendee_email,
            t.ticket_type,
            t.coupon_used,
            t.status.to_db(),
            t.created_at,
        ],
    )?;
    Ok(())
}

pub fn load_ticket(conn: &Connection, name: &str) -> AppResult<Option<Ticket>> {
    let mut stmt = conn.prepare_cached("SELECT * FROM tickets WHERE name = ?1")?;
    Ok(stmt.query_row([name], map_ticket).optional()?)
}

pub fn list_tickets(conn: &Connection, event: &str) -> AppResult<Vec<Ticket>> {
    let mut stmt = conn.prepare("SELECT * FROM tickets WHERE event = ?1 ORDER BY id ASC")?;
    let rows = stmt.query_map([event], map_ticket)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn set_ticket_status(conn: &Connection, name: &str, status: DocStatus) -> AppResult<usize> {
    Ok(conn.execute(
        "UPDATE tickets SET docstatus = ?1 WHERE name = ?2",
        params![status.to_db(), name],
    )?)
}

// ---------------------------------------------------------------------------
// Check-ins
// ---------------------------------------------------------------------------

pub fn map_check_in(row: &Row) -> Result<CheckInRecord> {
    Ok(CheckInRecord {
        name: row.get("name")?,
        ticket: row.get("ticket")?,
        event: row.get("event")?,
        date: get_opt_date(row, "date")?,
        checkin_time: row.get("checkin_time")?,
        status: get_status(row)?,
    })
}

pub fn insert_check_in(conn: &Connection, ci: &CheckInRecord) -> AppResult<()> {
    conn.execute(
        "INSERT INTO check_ins (name, ticket, event, date, checkin_time, docstatus)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            ci.name,
            ci.ticket,
            ci.event,
            ci.date.as_ref().map(to_db),
            ci.checkin_time,
            ci.status.to_db(),
        ],
    )?;
    Ok(())
}

pub fn load_check_in(conn: &Connection, name: &str) -> AppResult<Option<CheckInRecord>> {
    let mut stmt = conn.prepare_cached("SELECT * FROM check_ins WHERE name = ?1")?;
    Ok(stmt.query_row([name], map_check_in).optional()?)
}

/// True when `ticket` already has a submitted check-in dated `date`.
pub fn submitted_check_in_exists(
    conn: &Connection,
    ticket: &str,
    date: &NaiveDate,
) -> AppResult<bool> {
    let mut stmt = conn.prepare_cached(
        "SELECT 1 FROM check_ins
         WHERE ticket = ?1 AND date = ?2 AND docstatus = 1
         LIMIT 1",
    )?;
    Ok(stmt.exists(params![ticket, to_db(date)])?)
}

pub fn set_check_in_status(conn: &Connection, name: &str, status: DocStatus) -> AppResult<usize> {
    Ok(conn.execute(
        "UPDATE check_ins SET docstatus = ?1 WHERE name = ?2",
        params![status.to_db(), name],
    )?)
}

pub fn list_check_ins(conn: &Connection, event: &str) -> AppResult<Vec<CheckInRecord>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM check_ins WHERE event = ?1
         ORDER BY date ASC, checkin_time ASC",
    )?;
    let rows = stmt.query_map([event], map_check_in)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Coupons
// ---------------------------------------------------------------------------

pub fn map_coupon(row: &Row) -> Result<Coupon> {
    let raw_type: String = row.get("discount_type")?;
    let discount_type = DiscountType::from_db_str(&raw_type)
        .ok_or_else(|| conversion_error(0, AppError::InvalidDiscountType(raw_type.clone())))?;

    Ok(Coupon {
        name: row.get("name")?,
        code: row.get("code")?,
        event: row.get("event")?,
        discount_type,
        discount_amt: row.get("discount_amt")?,
        coupons_granted: row.get("coupons_granted")?,
        claimed_coupon: row.get("claimed_coupon")?,
        valid_from: get_opt_date(row, "valid_from")?,
        valid_to: get_opt_date(row, "valid_to")?,
    })
}

pub fn insert_coupon(conn: &Connection, c: &Coupon) -> AppResult<()> {
    conn.execute(
        "INSERT INTO coupons (name, code, event, discount_type, discount_amt,
                              coupons_granted, claimed_coupon, valid_from, valid_to)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            c.name,
            c.code,
            c.event,
            c.discount_type.to_db_str(),
            c.discount_amt,
            c.coupons_granted,
            c.claimed_coupon,
            c.valid_from.as_ref().map(to_db),
            c.valid_to.as_ref().map(to_db),
        ],
    )?;
    Ok(())
}

pub fn load_coupon_by_code(conn: &Connection, code: &str) -> AppResult<Option<Coupon>> {
    let mut stmt = conn.prepare_cached("SELECT * FROM coupons WHERE code = ?1")?;
    Ok(stmt.query_row([code], map_coupon).optional()?)
}

pub fn increment_coupon_claim(conn: &Connection, name: &str) -> AppResult<()> {
    conn.execute(
        "UPDATE coupons SET claimed_coupon = claimed_coupon + 1 WHERE name = ?1",
        [name],
    )?;
    Ok(())
}

pub fn delete_coupon(conn: &Connection, name: &str) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM coupons WHERE name = ?1", [name])?)
}

// ---------------------------------------------------------------------------
// Proposals
// ---------------------------------------------------------------------------

pub fn map_proposal(row: &Row) -> Result<Proposal> {
    let raw_status: String = row.get("status")?;
    let status = ProposalStatus::from_db_str(&raw_status).ok_or_else(|| {
        conversion_error(0, AppError::Other(format!("Invalid proposal status: {}", raw_status)))
    })?;

    Ok(Proposal {
        name: row.get("name")?,
        title: row.get("title")?,
        category: row.get("category")?,
        start_date: get_date(row, "start_date")?,
        end_date: get_opt_date(row, "end_date")?,
        host: row.get("host")?,
        status,
        doc_status: get_status(row)?,
        event: row.get("event")?,
        created_at: row.get("created_at")?,
    })
}

pub fn insert_proposal(conn: &Connection, p: &Proposal) -> AppResult<()> {
    conn.execute(
        "INSERT INTO proposals (name, title, category, start_date, end_date, host,
                                status, docstatus, event, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            p.name,
            p.title,
            p.category,
            to_db(&p.start_date),
            p.end_date.as_ref().map(to_db),
            p.host,
            p.status.to_db_str(),
            p.doc_status.to_db(),
            p.event,
            p.created_at,
        ],
    )?;
    Ok(())
}

pub fn load_proposal(conn: &Connection, name: &str) -> AppResult<Option<Proposal>> {
    let mut stmt = conn.prepare_cached("SELECT * FROM proposals WHERE name = ?1")?;
    Ok(stmt.query_row([name], map_proposal).optional()?)
}

pub fn list_proposals(conn: &Connection) -> AppResult<Vec<Proposal>> {
    let mut stmt = conn.prepare("SELECT * FROM proposals ORDER BY id ASC")?;
    let rows = stmt.query_map([], map_proposal)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Persist the mutable part of a proposal: host, review status, docstatus and event link.
pub fn update_proposal(conn: &Connection, p: &Proposal) -> AppResult<usize> {
    Ok(conn.execute(
        "UPDATE proposals SET host = ?1, status = ?2, docstatus = ?3, event = ?4
         WHERE name = ?5",
        params![
            p.host,
            p.status.to_db_str(),
            p.doc_status.to_db(),
            p.event,
            p.name
        ],
    )?)
}

// ---------------------------------------------------------------------------
// Internal log
// ---------------------------------------------------------------------------

/// Rows of the `log` table, oldest first: (id, date, operation, target, message).
pub fn load_log(conn: &Connection) -> AppResult<Vec<(i64, String, String, String, String)>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, date, operation, IFNULL(target, ''), message FROM log ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok((
            row.get(0)?,
            row.get(1)?,
            row.get(2)?,
            row.get(3)?,
            row.get(4)?,
        ))
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
