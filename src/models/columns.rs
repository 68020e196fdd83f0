//! Stored column names for the two shared tables.
//!
//! The remote store has no schema; these strings are the only contract with
//! other clients of the same tables. Calendar column names are generated
//! (see `core::calendar`) and are not listed here.

/// Columns shared by every table.
pub const LAST_UPDATED: &str = "Last Updated";
pub const ORDER: &str = "Order";

/// `Projects` table.
pub mod task {
    pub use super::{LAST_UPDATED, ORDER};

    pub const AREA: &str = "Area";
    pub const PROJECT: &str = "Project";
    pub const TASK: &str = "Task";
    pub const OWNER: &str = "Owner";
    /// Task status (NotStarted / InProgress / Completed)
    pub const PROGRESS: &str = "Progress";
    pub const PRIORITY: &str = "Priority";
    pub const RELEASE_DATE: &str = "Release Date";
    pub const DUE_DATE: &str = "Due Date";
    pub const NOTES: &str = "Notes";
}

/// `Activities` table (plus one generated column per tracked month).
pub mod activity {
    pub use super::{LAST_UPDATED, ORDER};

    pub const AREA: &str = "Area";
    /// Group number: "3"
    pub const MACRO_ID: &str = "ID";
    /// Child number inside the group: "3.2", empty on group header rows
    pub const MICRO_ID: &str = "Sub ID";
    pub const ACTIVITY: &str = "Activity";
    pub const FREQUENCY: &str = "Frequency";
    pub const FILES: &str = "Files";
}
