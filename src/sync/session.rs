use super::mutation::{ApplyOutcome, Mutation};
use super::writer::ReconcilingWriter;
use crate::config::Config;
use crate::errors::AppResult;
use crate::models::row::Row;
use crate::store::cache::ReadCache;
use crate::store::http::HttpTransport;
use crate::store::{RemoteTableStore, RetryPolicy, TableStore};
use tracing::debug;

/// One user's view of the shared tables: cached reads, synchronous writes.
pub struct Session<S: TableStore> {
    writer: ReconcilingWriter<S>,
    cache: ReadCache,
}

pub type RemoteSession = Session<RemoteTableStore<HttpTransport>>;

impl RemoteSession {
    /// Session against the configured HTTP endpoint.
    pub fn connect(cfg: &Config) -> AppResult<Self> {
        let store = RemoteTableStore::new(HttpTransport::from_config(cfg), RetryPolicy::from_config(cfg));
        Ok(Session::new(ReconcilingWriter::from_config(store, cfg)?, cfg))
    }
}

impl<S: TableStore> Session<S> {
    pub fn new(writer: ReconcilingWriter<S>, cfg: &Config) -> Self {
        Self {
            writer,
            cache: ReadCache::new(cfg.cache_ttl()),
        }
    }

    pub fn writer(&self) -> &ReconcilingWriter<S> {
        &self.writer
    }

    /// Rows for display; served from the cache while fresh.
    pub fn view(&mut self, table: &str) -> AppResult<Vec<Row>> {
        if let Some(rows) = self.cache.get(table) {
            debug!(table, "cache hit");
            return Ok(rows.to_vec());
        }
        let rows = self.writer.load(table)?;
        self.cache.put(table, rows.clone());
        Ok(rows)
    }

    /// What the session currently shows, without touching the store.
    pub fn cached(&self, table: &str) -> Option<&[Row]> {
        self.cache.get(table)
    }

    /// Apply one mutation. The cache is only dropped after a successful
    /// write; a failure leaves the session exactly as it was.
    pub fn apply(&mut self, table: &str, mutation: &Mutation) -> AppResult<ApplyOutcome> {
        let outcome = self.writer.apply(table, mutation)?;
        if outcome.written {
            self.cache.invalidate(table);
        }
        Ok(outcome)
    }
}
