use crate::db::migrate::applied_versions;
use crate::db::pool::DbPool;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

fn count(pool: &DbPool, sql: &str) -> rusqlite::Result<i64> {
    pool.conn.query_row(sql, [], |row| row.get(0))
}

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) RECORD COUNTS
    //
    let counts = [
        ("Events", "SELECT COUNT(*) FROM events"),
        ("Tickets", "SELECT COUNT(*) FROM tickets WHERE docstatus = 1"),
        ("Check-ins", "SELECT COUNT(*) FROM check_ins WHERE docstatus = 1"),
        ("Coupons", "SELECT COUNT(*) FROM coupons"),
        ("Proposals", "SELECT COUNT(*) FROM proposals"),
    ];
    for (label, sql) in counts {
        let n = count(pool, sql)?;
        println!("{}• {}:{} {}{}{}", CYAN, label, RESET, GREEN, n, RESET);
    }

    //
    // 3) CHECK-IN DATE RANGE
    //
    let first: Option<String> = pool
        .conn
        .query_row(
            "SELECT MIN(date) FROM check_ins WHERE docstatus = 1 AND date IS NOT NULL",
            [],
            |row| row.get::<_, Option<String>>(0),
        )
        .optional()?
        .flatten();

    let last: Option<String> = pool
        .conn
        .query_row(
            "SELECT MAX(date) FROM check_ins WHERE docstatus = 1 AND date IS NOT NULL",
            [],
            |row| row.get::<_, Option<String>>(0),
        )
        .optional()?
        .flatten();

    println!("{}• Check-in range:{}", CYAN, RESET);
    println!(
        "    from: {}",
        first.unwrap_or_else(|| format!("{GREY}--{RESET}"))
    );
    println!(
        "    to:   {}",
        last.unwrap_or_else(|| format!("{GREY}--{RESET}"))
    );

    //
    // 4) SCHEMA VERSION
    //
    let versions = applied_versions(&pool.conn)?;
    let latest = versions
        .last()
        .cloned()
        .unwrap_or_else(|| format!("{GREY}none{RESET}"));
    println!("{}• Schema:{} {} ({} migrations)", CYAN, RESET, latest, versions.len());

    println!();
    Ok(())
}
