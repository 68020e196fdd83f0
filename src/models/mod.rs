pub mod activity;
pub mod calendar_cell;
pub mod columns;
pub mod hier_id;
pub mod month;
pub mod row;
pub mod task;
