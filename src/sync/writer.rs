//! Read-modify-write against a store with no transactions.
//!
//! Every mutation reloads the table right before merging, so the window in
//! which another session's write can be lost shrinks from "since the page
//! was loaded" to "between this reload and this write". It is not closed:
//! two sessions writing in that window still end last-writer-wins for the
//! whole table, and the loss is neither detected nor reported. A store with
//! row-level upserts or version tokens would make the reload unnecessary.

use super::mutation::{ApplyOutcome, FieldChanges, Mutation};
use crate::config::Config;
use crate::core::calendar::{ColumnKey, RollingCalendar, keys_in_rows};
use crate::core::renumber::renumber;
use crate::core::schema::{self, ColumnType, TableKind, TableSchema, is_system_column};
use crate::errors::{AppError, AppResult};
use crate::models::calendar_cell::CalendarCell;
use crate::models::columns::{activity, task};
use crate::models::row::Row;
use crate::store::TableStore;
use crate::utils::date::{Clock, format_timestamp};
use chrono::NaiveDateTime;
use std::collections::BTreeSet;
use tracing::{debug, info};

/// Which schema applies to which remote table.
#[derive(Debug, Clone)]
pub struct TableRegistry {
    pub projects: String,
    pub activities: String,
}

impl Default for TableRegistry {
    fn default() -> Self {
        Self {
            projects: "Projects".to_string(),
            activities: "Activities".to_string(),
        }
    }
}

impl TableRegistry {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            projects: cfg.projects_table.clone(),
            activities: cfg.activities_table.clone(),
        }
    }

    pub fn kind_of(&self, table: &str) -> AppResult<TableKind> {
        if table == self.projects {
            Ok(TableKind::Tasks)
        } else if table == self.activities {
            Ok(TableKind::Activities)
        } else {
            Err(AppError::UnknownTable(table.to_string()))
        }
    }
}

pub struct ReconcilingWriter<S: TableStore> {
    store: S,
    registry: TableRegistry,
    calendar: RollingCalendar,
    horizon_months: u32,
    clock: Clock,
}

impl<S: TableStore> ReconcilingWriter<S> {
    pub fn new(store: S, registry: TableRegistry, calendar: RollingCalendar) -> Self {
        Self {
            store,
            registry,
            calendar,
            horizon_months: 1,
            clock: Clock::System,
        }
    }

    pub fn from_config(store: S, cfg: &Config) -> AppResult<Self> {
        let calendar = RollingCalendar::new(cfg.calendar_start()?)
            .with_window(cfg.past_months, cfg.future_months);
        Ok(Self::new(store, TableRegistry::from_config(cfg), calendar).with_horizon(cfg.horizon_months))
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_horizon(mut self, months: u32) -> Self {
        self.horizon_months = months;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn registry(&self) -> &TableRegistry {
        &self.registry
    }

    pub fn calendar(&self) -> &RollingCalendar {
        &self.calendar
    }

    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Required columns for `table` given what is already stored: for the
    /// activity table, every generated month plus every month already present.
    pub fn schema_for(&self, kind: TableKind, rows: &[Row]) -> TableSchema {
        match kind {
            TableKind::Tasks => TableSchema::tasks(),
            TableKind::Activities => {
                let mut keys: BTreeSet<ColumnKey> = keys_in_rows(rows);
                keys.extend(
                    self.calendar
                        .all_columns(self.clock.today(), self.horizon_months),
                );
                TableSchema::activities(&keys)
            }
        }
    }

    /// Fresh, reconciled copy of a table. Read-only.
    pub fn load(&self, table: &str) -> AppResult<Vec<Row>> {
        let kind = self.registry.kind_of(table)?;
        let rows = self.store.fetch_all(table)?;
        let schema = self.schema_for(kind, &rows);
        Ok(schema::reconcile(rows, &schema.columns, self.clock.now()))
    }

    /// Reload, merge `mutation` by order key, write the whole table back.
    ///
    /// On any error nothing has been merged into caller state; if the error
    /// came from the final write the remote table may have been cleared by
    /// the failed attempt, and callers must re-fetch before showing data.
    pub fn apply(&self, table: &str, mutation: &Mutation) -> AppResult<ApplyOutcome> {
        let kind = self.registry.kind_of(table)?;
        let now = self.clock.now();

        // 1. reload authoritative copy
        let fetched = self.store.fetch_all(table)?;

        // 2. schema
        let schema = self.schema_for(kind, &fetched);
        validate_changes(&schema, mutation)?;
        let missing_columns = fetched
            .iter()
            .any(|r| schema.columns.iter().any(|c| !r.contains(&c.name)));
        let mut rows = schema::reconcile(fetched, &schema.columns, now);

        // 3-4. merge by key
        let affected = merge(&mut rows, mutation, &schema, now)?;

        let needs_write = !affected.is_empty()
            || (matches!(mutation, Mutation::EnsureColumns) && missing_columns);
        if !needs_write {
            debug!(table, "nothing to write");
            return Ok(ApplyOutcome {
                table: table.to_string(),
                affected,
                written: false,
                row_count: rows.len(),
            });
        }

        // 5. structural edits keep activity ids dense
        if kind == TableKind::Activities && (mutation.is_structural() || touches_ids(mutation)) {
            rows = renumber(rows);
        }

        let schema = self.schema_for(kind, &rows);
        let rows = schema::reconcile(rows, &schema.columns, now);

        // 6. write back
        self.store.replace_all(table, &rows)?;

        info!(table, affected = affected.len(), rows = rows.len(), "table written");
        Ok(ApplyOutcome {
            table: table.to_string(),
            affected,
            written: true,
            row_count: rows.len(),
        })
    }
}

fn touches_ids(mutation: &Mutation) -> bool {
    mutation
        .changes()
        .iter()
        .any(|(c, _)| c == activity::MACRO_ID || c == activity::MICRO_ID)
}

/// Reject changes the store must never receive: identity/stamp columns and
/// values that do not fit a typed column.
fn validate_changes(schema: &TableSchema, mutation: &Mutation) -> AppResult<()> {
    for (column, value) in mutation.changes() {
        if is_system_column(column) {
            return Err(AppError::InvalidField(format!("'{column}' is managed by the writer")));
        }
        let Some(spec) = schema.column(column) else {
            continue;
        };
        let ok = match spec.kind {
            ColumnType::Status => crate::models::task::TaskStatus::parse(value).is_some(),
            ColumnType::Priority => crate::models::task::Priority::parse(value).is_some(),
            ColumnType::Date => {
                value.trim().is_empty() || crate::utils::date::parse_flexible_date(value).is_some()
            }
            _ => true,
        };
        if !ok {
            return Err(AppError::InvalidField(format!("'{value}' is not valid for '{column}'")));
        }
    }
    Ok(())
}

fn apply_changes(row: &mut Row, changes: &FieldChanges, now: NaiveDateTime) {
    for (column, value) in changes {
        if ColumnKey::parse(column).is_some() {
            row.set(column.clone(), CalendarCell::normalize(value).as_str());
        } else {
            row.set(column.clone(), value.clone());
        }
    }
    row.set(task::LAST_UPDATED, format_timestamp(now));
}

fn new_row(key: i64, changes: &FieldChanges, schema: &TableSchema, now: NaiveDateTime) -> Row {
    let mut row = Row::new();
    row.set(task::ORDER, key.to_string());
    if schema.kind == TableKind::Tasks {
        row.set(task::RELEASE_DATE, now.date().format("%Y-%m-%d").to_string());
    }
    apply_changes(&mut row, changes, now);
    row
}

fn position(rows: &[Row], key: i64) -> Option<usize> {
    rows.iter().position(|r| r.order() == Some(key))
}

/// Apply `mutation` in place; returns the order keys it touched.
fn merge(rows: &mut Vec<Row>, mutation: &Mutation, schema: &TableSchema, now: NaiveDateTime) -> AppResult<Vec<i64>> {
    let mut next_key = schema::max_order(rows);
    let mut fresh_key = || {
        next_key += 1;
        next_key
    };

    let affected = match mutation {
        Mutation::Upsert { key, changes } => {
            match position(rows, *key) {
                Some(i) => apply_changes(&mut rows[i], changes, now),
                None => rows.push(new_row(*key, changes, schema, now)),
            }
            vec![*key]
        }
        Mutation::Update { key, changes } => {
            let i = position(rows, *key).ok_or(AppError::RowNotFound(*key))?;
            apply_changes(&mut rows[i], changes, now);
            vec![*key]
        }
        Mutation::Insert { changes } => {
            let key = fresh_key();
            rows.push(new_row(key, changes, schema, now));
            vec![key]
        }
        Mutation::Delete { key } => {
            let i = position(rows, *key).ok_or(AppError::RowNotFound(*key))?;
            rows.remove(i);
            vec![*key]
        }
        Mutation::DeleteWhere { filter } => {
            let removed: Vec<i64> = rows
                .iter()
                .filter(|r| filter.matches(r))
                .filter_map(|r| r.order())
                .collect();
            rows.retain(|r| !filter.matches(r));
            removed
        }
        Mutation::UpdateWhere { filter, changes } => {
            let mut touched = Vec::new();
            for row in rows.iter_mut().filter(|r| filter.matches(r)) {
                apply_changes(row, changes, now);
                touched.extend(row.order());
            }
            touched
        }
        Mutation::BulkReplace {
            filter,
            rows: replacement,
        } => {
            let mut touched: Vec<i64> = rows
                .iter()
                .filter(|r| filter.matches(r))
                .filter_map(|r| r.order())
                .collect();
            rows.retain(|r| !filter.matches(r));
            for changes in replacement {
                let key = fresh_key();
                rows.push(new_row(key, changes, schema, now));
                touched.push(key);
            }
            touched
        }
        Mutation::EnsureColumns => Vec::new(),
    };

    Ok(affected)
}
