/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";

/// Returns GREY when the field is empty (None or ""), RESET otherwise.
pub fn color_for_optional_field<T: AsRef<str>>(value: Option<T>) -> &'static str {
    match value {
        Some(v) if !v.as_ref().trim().is_empty() => RESET,
        _ => GREY,
    }
}

/// Attendance cell: green check when present, grey dot when absent.
pub fn attendance_mark(present: bool) -> String {
    if present {
        format!("{GREEN}✔{RESET}")
    } else {
        format!("{GREY}·{RESET}")
    }
}

/// Summary indicator names → ANSI color.
pub fn color_for_indicator(indicator: &str) -> &'static str {
    match indicator {
        "blue" => BLUE,
        "green" => GREEN,
        "red" => RED,
        "yellow" | "orange" => YELLOW,
        _ => RESET,
    }
}
