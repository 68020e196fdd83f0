#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{NaiveDate, NaiveDateTime};
use rplanner::core::calendar::RollingCalendar;
use rplanner::models::month::YearMonth;
use rplanner::models::row::Row;
use rplanner::store::memory::MemoryTransport;
use rplanner::store::{RemoteTableStore, RetryPolicy};
use rplanner::sync::{ReconcilingWriter, TableRegistry};
use rplanner::utils::date::Clock;
use std::env;
use std::fs;
use std::path::PathBuf;

pub const PROJECTS: &str = "Projects";
pub const ACTIVITIES: &str = "Activities";

pub type MemWriter = ReconcilingWriter<RemoteTableStore<MemoryTransport>>;

pub fn rp() -> Command {
    cargo_bin_cmd!("rplanner")
}

/// Unique, empty config home inside the system temp dir
pub fn setup_home(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rplanner_home", name));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).expect("create temp home");
    path.to_string_lossy().to_string()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// 2026-10-17 12:00: current working month is 2026-09.
pub fn fixed_now() -> NaiveDateTime {
    date(2026, 10, 17).and_hms_opt(12, 0, 0).expect("valid time")
}

pub fn calendar() -> RollingCalendar {
    RollingCalendar::new(YearMonth::new(2026, 1).expect("valid month"))
}

/// Writer over an in-memory store: no waits, 3 attempts, fixed clock.
pub fn writer(transport: &MemoryTransport) -> MemWriter {
    let store = RemoteTableStore::new(transport.clone(), RetryPolicy::immediate(3));
    ReconcilingWriter::new(store, TableRegistry::default(), calendar()).with_clock(Clock::Fixed(fixed_now()))
}

pub fn row(pairs: &[(&str, &str)]) -> Row {
    Row::from_pairs(pairs.iter().copied())
}

pub fn task_row(order: &str, project: &str, task: &str, status: &str) -> Row {
    row(&[
        ("Area", "Ops"),
        ("Project", project),
        ("Task", task),
        ("Progress", status),
        ("Order", order),
    ])
}

pub fn activity_row(order: &str, macro_id: &str, micro_id: &str, name: &str) -> Row {
    row(&[
        ("Area", "Finance"),
        ("ID", macro_id),
        ("Sub ID", micro_id),
        ("Activity", name),
        ("Order", order),
    ])
}

/// Stored rows of a table, panicking if it was never written.
pub fn stored(transport: &MemoryTransport, table: &str) -> Vec<Row> {
    transport
        .snapshot(table)
        .expect("lock")
        .expect("table exists")
}

pub fn find(rows: &[Row], order: i64) -> Row {
    rows.iter()
        .find(|r| r.order() == Some(order))
        .cloned()
        .unwrap_or_else(|| panic!("row {order} not found"))
}
