//! In-process transport with the same text-only, whole-table semantics as
//! the remote endpoint. Clones share one backing state, so several sessions
//! can point at the same "remote" tables. Failures can be injected per call
//! kind to exercise the retry and abort paths.

use super::Transport;
use crate::errors::{AppError, AppResult};
use crate::models::row::{Row, value_to_text};
use std::collections::HashMap;
use std::io;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default)]
struct MemoryState {
    tables: HashMap<String, Vec<Row>>,
    fail_gets: u32,
    fail_clears: u32,
    fail_puts: u32,
    calls: CallCounts,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub gets: u32,
    pub clears: u32,
    pub puts: u32,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryTransport {
    state: Arc<Mutex<MemoryState>>,
}

fn injected(kind: &str) -> AppError {
    AppError::Io(io::Error::new(
        io::ErrorKind::TimedOut,
        format!("injected {kind} failure"),
    ))
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> AppResult<MutexGuard<'_, MemoryState>> {
        self.state
            .lock()
            .map_err(|_| AppError::Other("memory store lock poisoned".into()))
    }

    /// Seed a table, values stored as text.
    pub fn seed(&self, table: &str, rows: Vec<Row>) -> AppResult<()> {
        let mut st = self.lock()?;
        st.tables.insert(table.to_string(), rows.iter().map(as_text_row).collect());
        Ok(())
    }

    /// Current stored rows, `None` if the table was never written.
    pub fn snapshot(&self, table: &str) -> AppResult<Option<Vec<Row>>> {
        Ok(self.lock()?.tables.get(table).cloned())
    }

    /// Next `n` reads time out.
    pub fn fail_next_gets(&self, n: u32) -> AppResult<()> {
        self.lock()?.fail_gets = n;
        Ok(())
    }

    /// Next `n` clears time out.
    pub fn fail_next_clears(&self, n: u32) -> AppResult<()> {
        self.lock()?.fail_clears = n;
        Ok(())
    }

    /// Next `n` writes time out.
    pub fn fail_next_puts(&self, n: u32) -> AppResult<()> {
        self.lock()?.fail_puts = n;
        Ok(())
    }

    pub fn calls(&self) -> AppResult<CallCounts> {
        Ok(self.lock()?.calls)
    }
}

fn as_text_row(row: &Row) -> Row {
    let mut out = Row::new();
    for (k, v) in row.clone().into_map() {
        out.set(k, value_to_text(&v));
    }
    out
}

impl Transport for MemoryTransport {
    fn get(&self, table: &str) -> AppResult<Option<Vec<Row>>> {
        let mut st = self.lock()?;
        st.calls.gets += 1;
        if st.fail_gets > 0 {
            st.fail_gets -= 1;
            return Err(injected("get"));
        }
        Ok(st.tables.get(table).cloned())
    }

    fn clear(&self, table: &str) -> AppResult<()> {
        let mut st = self.lock()?;
        st.calls.clears += 1;
        if st.fail_clears > 0 {
            st.fail_clears -= 1;
            return Err(injected("clear"));
        }
        if let Some(rows) = st.tables.get_mut(table) {
            rows.clear();
        }
        Ok(())
    }

    fn put(&self, table: &str, rows: &[Row]) -> AppResult<()> {
        let mut st = self.lock()?;
        st.calls.puts += 1;
        if st.fail_puts > 0 {
            st.fail_puts -= 1;
            return Err(injected("put"));
        }
        st.tables
            .insert(table.to_string(), rows.iter().map(as_text_row).collect());
        Ok(())
    }
}
