//! Typed-defaults table and schema reconciliation.
//!
//! Rows come back from the store with whatever columns the last writer had.
//! `reconcile` fills the gaps and coerces every value to its canonical text,
//! so code downstream never has to handle a missing column.

use crate::core::calendar::ColumnKey;
use crate::models::calendar_cell::CalendarCell;
use crate::models::columns::{self, activity, task};
use crate::models::row::{Row, parse_integer};
use crate::models::task::{Priority, TaskStatus};
use crate::utils::date::{format_timestamp, parse_flexible_date};
use chrono::NaiveDateTime;
use std::collections::HashSet;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// Free text, default ""
    Text,
    /// Optional date stored as YYYY-MM-DD, default ""
    Date,
    /// Task status, default "Not started"
    Status,
    /// Task priority, default "Low"
    Priority,
    /// Boolean flag, default "false"
    Flag,
    /// Month status cell, default Unset
    Calendar,
    /// Last-modified stamp, default now()
    Timestamp,
    /// Row identity, default max + 1
    Order,
    /// Hierarchical id columns: kept verbatim, renumbering owns them
    HierId,
}

impl ColumnType {
    /// Default text for a missing column. `Order` is handled per row-set.
    pub fn default_text(&self, now: NaiveDateTime) -> String {
        match self {
            ColumnType::Text | ColumnType::Date | ColumnType::HierId | ColumnType::Order => String::new(),
            ColumnType::Status => TaskStatus::default().as_str().to_string(),
            ColumnType::Priority => Priority::default().as_str().to_string(),
            ColumnType::Flag => "false".to_string(),
            ColumnType::Calendar => CalendarCell::Unset.as_str().to_string(),
            ColumnType::Timestamp => format_timestamp(now),
        }
    }

    /// Canonical text for a present value; `None` when it cannot be coerced
    /// and the default applies instead.
    fn coerce(&self, raw: &str) -> Option<String> {
        let s = raw.trim();
        match self {
            ColumnType::Text => Some(raw.to_string()),
            ColumnType::HierId => Some(s.to_string()),
            ColumnType::Date => {
                if s.is_empty() {
                    Some(String::new())
                } else {
                    parse_flexible_date(s).map(|d| d.format("%Y-%m-%d").to_string())
                }
            }
            ColumnType::Status => TaskStatus::parse(s).map(|v| v.as_str().to_string()),
            ColumnType::Priority => Priority::parse(s).map(|v| v.as_str().to_string()),
            ColumnType::Flag => Some(parse_flag(s).to_string()),
            ColumnType::Calendar => Some(CalendarCell::normalize(s).as_str().to_string()),
            ColumnType::Timestamp => (!s.is_empty()).then(|| s.to_string()),
            ColumnType::Order => parse_integer(s).map(|i| i.to_string()),
        }
    }
}

fn parse_flag(s: &str) -> bool {
    matches!(s.to_lowercase().as_str(), "true" | "1" | "yes" | "y" | "x")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: String,
    pub kind: ColumnType,
}

impl ColumnSpec {
    pub fn new(name: impl Into<String>, kind: ColumnType) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Tasks,
    Activities,
}

#[derive(Debug, Clone)]
pub struct TableSchema {
    pub kind: TableKind,
    pub columns: Vec<ColumnSpec>,
}

impl TableSchema {
    pub fn tasks() -> Self {
        use ColumnType::*;
        Self {
            kind: TableKind::Tasks,
            columns: vec![
                ColumnSpec::new(task::AREA, Text),
                ColumnSpec::new(task::PROJECT, Text),
                ColumnSpec::new(task::TASK, Text),
                ColumnSpec::new(task::OWNER, Text),
                ColumnSpec::new(task::PROGRESS, Status),
                ColumnSpec::new(task::PRIORITY, Priority),
                ColumnSpec::new(task::RELEASE_DATE, Date),
                ColumnSpec::new(task::DUE_DATE, Date),
                ColumnSpec::new(task::NOTES, Text),
                ColumnSpec::new(task::LAST_UPDATED, Timestamp),
                ColumnSpec::new(task::ORDER, Order),
            ],
        }
    }

    /// Activity columns followed by one calendar column per key, oldest first.
    pub fn activities<'a>(calendar: impl IntoIterator<Item = &'a ColumnKey>) -> Self {
        use ColumnType::*;
        let mut columns = vec![
            ColumnSpec::new(activity::AREA, Text),
            ColumnSpec::new(activity::MACRO_ID, HierId),
            ColumnSpec::new(activity::MICRO_ID, HierId),
            ColumnSpec::new(activity::ACTIVITY, Text),
            ColumnSpec::new(activity::FREQUENCY, Text),
            ColumnSpec::new(activity::FILES, Text),
            ColumnSpec::new(activity::LAST_UPDATED, Timestamp),
            ColumnSpec::new(activity::ORDER, Order),
        ];
        columns.extend(calendar.into_iter().map(|k| ColumnSpec::new(k.name(), Calendar)));
        Self {
            kind: TableKind::Activities,
            columns,
        }
    }

    pub fn column(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// Complete every row with the required columns, coerce values, and give
/// every row a unique order key. Extra columns are kept after the required
/// ones, in their original order.
pub fn reconcile(rows: Vec<Row>, required: &[ColumnSpec], now: NaiveDateTime) -> Vec<Row> {
    let order_col = required.iter().find(|c| c.kind == ColumnType::Order);

    let mut out: Vec<Row> = rows
        .into_iter()
        .map(|row| reconcile_row(row, required, now))
        .collect();

    if let Some(spec) = order_col {
        assign_orders(&mut out, &spec.name);
    }

    out
}

fn reconcile_row(mut row: Row, required: &[ColumnSpec], now: NaiveDateTime) -> Row {
    let mut fixed = Row::new();

    for spec in required {
        let value = match row.remove(&spec.name) {
            Some(v) => {
                let raw = crate::models::row::value_to_text(&v);
                match spec.kind.coerce(&raw) {
                    Some(text) => text,
                    None => {
                        if !raw.trim().is_empty() {
                            warn!(column = %spec.name, value = %raw, "unrecognised value, using default");
                        }
                        spec.kind.default_text(now)
                    }
                }
            }
            None => spec.kind.default_text(now),
        };
        fixed.set(spec.name.clone(), value);
    }

    // forward compatibility: columns written by newer clients survive
    for (name, value) in row.into_map() {
        fixed.set(name, crate::models::row::value_to_text(&value));
    }

    fixed
}

/// Missing or duplicated order keys get `max + 1`, in storage order.
fn assign_orders(rows: &mut [Row], column: &str) {
    let mut seen = HashSet::new();
    let mut max = rows
        .iter()
        .filter_map(|r| parse_integer(&r.text(column)))
        .max()
        .unwrap_or(0);

    for row in rows.iter_mut() {
        match parse_integer(&row.text(column)) {
            Some(k) if seen.insert(k) => {}
            existing => {
                max += 1;
                if existing.is_some() {
                    warn!(column, duplicate = ?existing, new = max, "duplicate order key reassigned");
                } else {
                    debug!(column, new = max, "order key assigned");
                }
                row.set(column, max.to_string());
                seen.insert(max);
            }
        }
    }
}

/// Largest order key in a reconciled row-set (0 when empty).
pub fn max_order(rows: &[Row]) -> i64 {
    rows.iter()
        .filter_map(|r| r.order())
        .max()
        .unwrap_or(0)
}

/// Columns every row of this table shares regardless of kind.
pub fn is_system_column(name: &str) -> bool {
    name == columns::ORDER || name == columns::LAST_UPDATED
}
