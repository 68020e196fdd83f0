mod common;
use common::{PROJECTS, row, stored, task_row};
use rplanner::errors::{AppError, AppResult};
use rplanner::models::row::Row;
use rplanner::store::cache::ReadCache;
use rplanner::store::memory::{CallCounts, MemoryTransport};
use rplanner::store::{RemoteTableStore, RetryPolicy, TableStore, Transport};
use serde_json::json;
use std::cell::Cell;
use std::time::Duration;

fn store(transport: &MemoryTransport) -> RemoteTableStore<MemoryTransport> {
    RemoteTableStore::new(transport.clone(), RetryPolicy::immediate(3))
}

/// Answers every call with a fixed HTTP status.
struct StatusTransport {
    status: u16,
    calls: Cell<u32>,
}

impl StatusTransport {
    fn new(status: u16) -> Self {
        Self {
            status,
            calls: Cell::new(0),
        }
    }

    fn fail<T>(&self) -> AppResult<T> {
        self.calls.set(self.calls.get() + 1);
        Err(AppError::Http {
            status: self.status,
            message: "fixed".into(),
        })
    }
}

impl Transport for StatusTransport {
    fn get(&self, _table: &str) -> AppResult<Option<Vec<Row>>> {
        self.fail()
    }

    fn clear(&self, _table: &str) -> AppResult<()> {
        self.fail()
    }

    fn put(&self, _table: &str, _rows: &[Row]) -> AppResult<()> {
        self.fail()
    }
}

#[test]
fn test_missing_table_reads_as_empty() {
    let mem = MemoryTransport::new();
    let rows = store(&mem).fetch_all(PROJECTS).expect("fetch");
    assert!(rows.is_empty());
}

#[test]
fn test_fetch_recovers_from_transient_failures() {
    let mem = MemoryTransport::new();
    mem.seed(PROJECTS, vec![task_row("1", "Alpha", "a", "Completed")])
        .expect("seed");
    mem.fail_next_gets(2).expect("inject");

    let rows = store(&mem).fetch_all(PROJECTS).expect("fetch after retries");
    assert_eq!(rows.len(), 1);
    assert_eq!(mem.calls().expect("calls").gets, 3);
}

#[test]
fn test_exhausted_retries_report_store_unavailable() {
    let mem = MemoryTransport::new();
    mem.fail_next_gets(5).expect("inject");

    let err = store(&mem).fetch_all(PROJECTS).expect_err("should give up");
    match err {
        AppError::StoreUnavailable { table, attempts, .. } => {
            assert_eq!(table, PROJECTS);
            assert_eq!(attempts, 3);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(mem.calls().expect("calls").gets, 3);
}

#[test]
fn test_replace_clears_then_writes() {
    let mem = MemoryTransport::new();
    mem.seed(
        PROJECTS,
        vec![
            task_row("1", "Old", "a", "Completed"),
            task_row("2", "Old", "b", "Completed"),
        ],
    )
    .expect("seed");

    let new_rows = vec![task_row("7", "New", "z", "In progress")];
    store(&mem).replace_all(PROJECTS, &new_rows).expect("replace");

    let rows = stored(&mem, PROJECTS);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].text("Project"), "New");
    assert_eq!(
        mem.calls().expect("calls"),
        CallCounts {
            gets: 0,
            clears: 1,
            puts: 1
        }
    );
}

#[test]
fn test_failed_write_is_retried_from_the_clear() {
    let mem = MemoryTransport::new();
    mem.fail_next_puts(1).expect("inject");

    let rows = vec![task_row("1", "Alpha", "a", "Completed")];
    store(&mem).replace_all(PROJECTS, &rows).expect("replace");

    let calls = mem.calls().expect("calls");
    assert_eq!(calls.clears, 2);
    assert_eq!(calls.puts, 2);
    assert_eq!(stored(&mem, PROJECTS).len(), 1);
}

#[test]
fn test_failed_clear_leaves_remote_untouched() {
    let mem = MemoryTransport::new();
    mem.seed(PROJECTS, vec![task_row("1", "Alpha", "a", "Completed")])
        .expect("seed");
    mem.fail_next_clears(3).expect("inject");

    let err = store(&mem)
        .replace_all(PROJECTS, &[])
        .expect_err("should give up");
    assert!(matches!(err, AppError::StoreUnavailable { .. }));
    assert_eq!(mem.calls().expect("calls").puts, 0);
    assert_eq!(stored(&mem, PROJECTS).len(), 1);
}

#[test]
fn test_client_errors_are_not_retried() {
    let transport = StatusTransport::new(400);
    let store = RemoteTableStore::new(transport, RetryPolicy::immediate(3));

    let err = store.fetch_all(PROJECTS).expect_err("bad request");
    assert!(matches!(err, AppError::StoreUnavailable { attempts: 1, .. }));
    assert_eq!(store.transport().calls.get(), 1);
}

#[test]
fn test_server_errors_are_retried() {
    let transport = StatusTransport::new(503);
    let store = RemoteTableStore::new(transport, RetryPolicy::immediate(4));

    let err = store.replace_all(PROJECTS, &[]).expect_err("unavailable");
    assert!(matches!(err, AppError::StoreUnavailable { attempts: 4, .. }));
    assert_eq!(store.transport().calls.get(), 4);
}

#[test]
fn test_stored_values_are_text() {
    let mem = MemoryTransport::new();
    let typed: Row = serde_json::from_value(json!({"Order": 4, "Flag": true, "Note": null}))
        .expect("row");
    store(&mem).replace_all(PROJECTS, &[typed]).expect("replace");

    let rows = stored(&mem, PROJECTS);
    assert_eq!(rows[0].get("Order"), Some(&json!("4")));
    assert_eq!(rows[0].get("Flag"), Some(&json!("true")));
    assert_eq!(rows[0].get("Note"), Some(&json!("")));
}

#[test]
fn test_read_cache_expires_and_invalidates() {
    let mut cache = ReadCache::new(Duration::from_secs(60));
    cache.put(PROJECTS, vec![row(&[("Project", "Alpha")])]);
    assert_eq!(cache.get(PROJECTS).map(|r| r.len()), Some(1));

    cache.invalidate(PROJECTS);
    assert!(cache.get(PROJECTS).is_none());

    let mut stale = ReadCache::new(Duration::ZERO);
    stale.put(PROJECTS, vec![]);
    assert!(stale.get(PROJECTS).is_none());
}
