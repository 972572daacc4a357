//! SQLite-backed [`AttendanceSource`].

use crate::core::report::{AttendanceSource, CheckInEntry, TicketInfo};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::utils::date::parse_date;
use chrono::NaiveDate;
use rusqlite::Connection;

/// Max bound parameters per `IN (...)` lookup.
const IN_CHUNK: usize = 500;

fn parse_stored_date(raw: &str) -> AppResult<NaiveDate> {
    parse_date(raw).ok_or_else(|| AppError::InvalidDate(raw.to_string()))
}

impl AttendanceSource for Connection {
    fn check_in_dates(&self, event: &str) -> AppResult<Vec<NaiveDate>> {
        let mut stmt = self.prepare_cached(
            "SELECT DISTINCT date
             FROM check_ins
             WHERE event = ?1 AND docstatus = 1 AND date IS NOT NULL AND date <> ''
             ORDER BY date ASC",
        )?;

        let rows = stmt.query_map([event], |row| row.get::<_, String>(0))?;

        let mut out = Vec::new();
        for r in rows {
            out.push(parse_stored_date(&r?)?);
        }
        Ok(out)
    }

    fn submitted_check_ins(&self, event: &str) -> AppResult<Vec<CheckInEntry>> {
        let mut stmt = self.prepare_cached(
            "SELECT ticket, date
             FROM check_ins
             WHERE event = ?1 AND docstatus = 1",
        )?;

        let rows = stmt.query_map([event], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, Option<String>>(1)?))
        })?;

        let mut out = Vec::new();
        for r in rows {
            let (ticket, raw_date) = r?;
            let date = match raw_date.as_deref().map(str::trim) {
                None | Some("") => None,
                Some(s) => Some(parse_stored_date(s)?),
            };
            out.push(CheckInEntry { ticket, date });
        }
        Ok(out)
    }

    fn tickets_by_ids(&self, ids: &[String]) -> AppResult<Vec<TicketInfo>> {
        let mut out = Vec::with_capacity(ids.len());

        for chunk in ids.chunks(IN_CHUNK) {
            let placeholders = vec!["?"; chunk.len()].join(",");
            let sql = format!(
                "SELECT name, attendee_name, attendee_email, ticket_type
                 FROM tickets
                 WHERE name IN ({placeholders})
                 ORDER BY id ASC"
            );

            let mut stmt = self.prepare(&sql)?;
            let rows = stmt.query_map(rusqlite::params_from_iter(chunk.iter()), |row| {
                Ok(TicketInfo {
                    name: row.get(0)?,
                    attendee_name: row.get(1)?,
                    attendee_email: row.get(2)?,
                    ticket_type: row.get(3)?,
                })
            })?;

            for r in rows {
                out.push(r?);
            }
        }

        Ok(out)
    }
}

impl AttendanceSource for DbPool {
    fn check_in_dates(&self, event: &str) -> AppResult<Vec<NaiveDate>> {
        self.conn.check_in_dates(event)
    }

    fn submitted_check_ins(&self, event: &str) -> AppResult<Vec<CheckInEntry>> {
        self.conn.submitted_check_ins(event)
    }

    fn tickets_by_ids(&self, ids: &[String]) -> AppResult<Vec<TicketInfo>> {
        self.conn.tickets_by_ids(ids)
    }
}
