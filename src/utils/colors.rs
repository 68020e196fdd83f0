/// ANSI color helper utilities for terminal output.
/// Keep escapes out of table cells: widths are measured on plain text.
pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";

/// Completion color:
/// 100 → green
/// ≥50 → yellow
/// else → red
pub fn color_for_percent(pct: u32) -> &'static str {
    if pct >= 100 {
        GREEN
    } else if pct >= 50 {
        YELLOW
    } else {
        RED
    }
}

pub fn colorize_percent(pct: Option<u32>) -> String {
    match pct {
        Some(p) => format!("{}{p}%{RESET}", color_for_percent(p)),
        None => "no data".to_string(),
    }
}
