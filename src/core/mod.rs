//! Pure table logic: no I/O, no clock reads.

pub mod aggregate;
pub mod calendar;
pub mod renumber;
pub mod schema;
