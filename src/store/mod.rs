//! Remote tabular store access.
//!
//! The store only knows two operations on a whole table: read everything and
//! replace everything. `Transport` is one attempt at each raw call;
//! `RemoteTableStore` adds the per-call retry loop and the clear/settle/write
//! sequence, and exposes the `TableStore` capability the writer depends on.

pub mod cache;
pub mod http;
pub mod memory;

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::row::Row;
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

/// Full-table read / full-table replace. Nothing finer is available.
pub trait TableStore {
    /// All rows of `table`; an empty or missing table is an empty Vec.
    fn fetch_all(&self, table: &str) -> AppResult<Vec<Row>>;

    /// Replace the whole content of `table` with `rows`.
    fn replace_all(&self, table: &str, rows: &[Row]) -> AppResult<()>;
}

impl<S: TableStore + ?Sized> TableStore for &S {
    fn fetch_all(&self, table: &str) -> AppResult<Vec<Row>> {
        (**self).fetch_all(table)
    }

    fn replace_all(&self, table: &str, rows: &[Row]) -> AppResult<()> {
        (**self).replace_all(table, rows)
    }
}

/// One attempt at each raw endpoint call. Timeouts are the transport's job.
pub trait Transport {
    /// `None` when the table does not exist.
    fn get(&self, table: &str) -> AppResult<Option<Vec<Row>>>;
    /// Empty the table's whole addressable range.
    fn clear(&self, table: &str) -> AppResult<()>;
    fn put(&self, table: &str, rows: &[Row]) -> AppResult<()>;
}

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts, first one included.
    pub max_attempts: u32,
    /// Fixed pause between attempts.
    pub delay: Duration,
    /// Pause between clearing a table and writing it back.
    pub settle: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(1),
            settle: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            max_attempts: cfg.max_attempts.max(1),
            delay: cfg.retry_delay(),
            settle: cfg.settle(),
        }
    }

    /// No waiting at all; for in-process stores.
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay: Duration::ZERO,
            settle: Duration::ZERO,
        }
    }
}

pub struct RemoteTableStore<T: Transport> {
    transport: T,
    policy: RetryPolicy,
}

impl<T: Transport> RemoteTableStore<T> {
    pub fn new(transport: T, policy: RetryPolicy) -> Self {
        Self { transport, policy }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Run `op` until it succeeds, fails permanently, or the attempt budget
    /// is spent. Each attempt starts from scratch.
    fn with_retry<R>(&self, table: &str, what: &str, mut op: impl FnMut() -> AppResult<R>) -> AppResult<R> {
        let max = self.policy.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match op() {
                Ok(v) => {
                    if attempt > 1 {
                        debug!(table, what, attempt, "succeeded after retry");
                    }
                    return Ok(v);
                }
                Err(e) if e.is_transient() && attempt < max => {
                    warn!(table, what, attempt, max, error = %e, "transient store failure, retrying");
                    if !self.policy.delay.is_zero() {
                        thread::sleep(self.policy.delay);
                    }
                    attempt += 1;
                }
                Err(e) => {
                    warn!(table, what, attempt, error = %e, "giving up");
                    return Err(AppError::StoreUnavailable {
                        table: table.to_string(),
                        attempts: attempt,
                        reason: e.to_string(),
                    });
                }
            }
        }
    }
}

impl<T: Transport> TableStore for RemoteTableStore<T> {
    fn fetch_all(&self, table: &str) -> AppResult<Vec<Row>> {
        let rows = self.with_retry(table, "fetch", || self.transport.get(table))?;
        Ok(rows.unwrap_or_default())
    }

    fn replace_all(&self, table: &str, rows: &[Row]) -> AppResult<()> {
        self.with_retry(table, "replace", || {
            self.transport.clear(table)?;
            if !self.policy.settle.is_zero() {
                debug!(table, settle_ms = self.policy.settle.as_millis() as u64, "waiting after clear");
                thread::sleep(self.policy.settle);
            }
            self.transport.put(table, rows)
        })
    }
}
