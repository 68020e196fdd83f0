//! Keeping the local working set consistent with the shared remote tables.

pub mod mutation;
pub mod session;
pub mod writer;

pub use mutation::{ApplyOutcome, FieldChanges, Mutation, RowFilter};
pub use session::{RemoteSession, Session};
pub use writer::{ReconcilingWriter, TableRegistry};
