use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists: it also records applied migrations.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

struct Migration {
    version: &'static str,
    message: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250301_0001_core_schema",
        message: "Created events, ticket_types, tickets and check_ins tables",
        sql: r#"
        CREATE TABLE IF NOT EXISTS events (
            id                  INTEGER PRIMARY KEY AUTOINCREMENT,
            name                TEXT NOT NULL UNIQUE,
            title               TEXT NOT NULL,
            route               TEXT UNIQUE,
            category            TEXT,
            start_date          TEXT NOT NULL,          -- YYYY-MM-DD
            end_date            TEXT,
            is_published        INTEGER NOT NULL DEFAULT 0,
            default_ticket_type TEXT,
            created_at          TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS ticket_types (
            id      INTEGER PRIMARY KEY AUTOINCREMENT,
            event   TEXT NOT NULL REFERENCES events(name),
            title   TEXT NOT NULL,
            UNIQUE (event, title)
        );

        CREATE TABLE IF NOT EXISTS tickets (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            name           TEXT NOT NULL UNIQUE,
            event          TEXT NOT NULL REFERENCES events(name),
            attendee_name  TEXT NOT NULL,
            attendee_email TEXT NOT NULL,
            ticket_type    TEXT NOT NULL,
            coupon_used    TEXT,
            docstatus      INTEGER NOT NULL DEFAULT 0 CHECK (docstatus IN (0,1,2)),
            created_at     TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS check_ins (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            name         TEXT NOT NULL UNIQUE,
            ticket       TEXT NOT NULL,
            event        TEXT NOT NULL,
            date         TEXT,                         -- YYYY-MM-DD, nullable
            checkin_time TEXT NOT NULL,
            docstatus    INTEGER NOT NULL DEFAULT 0 CHECK (docstatus IN (0,1,2))
        );

        CREATE INDEX IF NOT EXISTS idx_tickets_event ON tickets(event);
        "#,
    },
    Migration {
        version: "20250318_0002_coupons",
        message: "Created coupons table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS coupons (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            name            TEXT NOT NULL UNIQUE,
            code            TEXT NOT NULL UNIQUE,
            event           TEXT NOT NULL REFERENCES events(name),
            discount_type   TEXT NOT NULL CHECK (discount_type IN ('Amount','Percentage')),
            discount_amt    REAL NOT NULL DEFAULT 0,
            coupons_granted INTEGER NOT NULL DEFAULT 0,
            claimed_coupon  INTEGER NOT NULL DEFAULT 0,
            valid_from      TEXT,
            valid_to        TEXT
        );
        "#,
    },
    Migration {
        version: "20250402_0003_checkin_indexes",
        message: "Added check-in lookup indexes for the attendance report",
        sql: r#"
        CREATE INDEX IF NOT EXISTS idx_check_ins_event_status_date
            ON check_ins(event, docstatus, date);
        CREATE INDEX IF NOT EXISTS idx_check_ins_ticket_date
            ON check_ins(ticket, date);
        "#,
    },
    Migration {
        version: "20250420_0004_categories_proposals",
        message: "Created event_categories and proposals tables, linked events to proposals",
        sql: r#"
        CREATE TABLE IF NOT EXISTS event_categories (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL UNIQUE,
            slug        TEXT NOT NULL UNIQUE,
            description TEXT
        );

        CREATE TABLE IF NOT EXISTS proposals (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            name       TEXT NOT NULL UNIQUE,
            title      TEXT NOT NULL,
            category   TEXT,
            start_date TEXT NOT NULL,
            end_date   TEXT,
            host       TEXT,
            status     TEXT NOT NULL DEFAULT 'Received'
                       CHECK (status IN ('Received','In Review','Approved','Event Created','Rejected')),
            docstatus  INTEGER NOT NULL DEFAULT 0 CHECK (docstatus IN (0,1,2)),
            event      TEXT,
            created_at TEXT NOT NULL
        );

        ALTER TABLE events ADD COLUMN proposal TEXT;
        "#,
    },
];

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &Connection, m: &Migration) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(m.sql)?;
    tx.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [m.version, m.message],
    )?;
    tx.commit()
}

/// Versions recorded as applied, oldest first.
pub fn applied_versions(conn: &Connection) -> Result<Vec<String>> {
    ensure_log_table(conn)?;
    let mut stmt = conn.prepare(
        "SELECT target FROM log WHERE operation = 'migration_applied' ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
    rows.collect()
}

/// Public entry point: run all pending migrations, in order.
///
/// Invoked by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    for m in MIGRATIONS {
        if is_applied(conn, m.version)? {
            continue;
        }
        apply(conn, m)?;
        success(format!("Migration applied: {} → {}", m.version, m.message));
    }

    Ok(())
}
