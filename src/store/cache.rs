use crate::models::row::Row;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Short-lived per-session cache for read views.
///
/// Entries expire after `ttl`; the session drops a table's entry right after
/// each successful write of its own.
#[derive(Debug)]
pub struct ReadCache {
    ttl: Duration,
    entries: HashMap<String, (Instant, Vec<Row>)>,
}

impl ReadCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    pub fn get(&self, table: &str) -> Option<&[Row]> {
        self.entries
            .get(table)
            .filter(|(at, _)| at.elapsed() < self.ttl)
            .map(|(_, rows)| rows.as_slice())
    }

    pub fn put(&mut self, table: &str, rows: Vec<Row>) {
        self.entries.insert(table.to_string(), (Instant::now(), rows));
    }

    pub fn invalidate(&mut self, table: &str) {
        self.entries.remove(table);
    }
}
