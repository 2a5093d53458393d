//! Domain models persisted in the data file.
//!
//! Field names on the wire are camelCase to match what the app client
//! already sends and reads.

pub mod activity;
pub mod order;
pub mod report;
pub mod user;

pub use activity::{EventLog, LOG_CAPACITY, LogEntry};
pub use order::Order;
pub use report::Report;
pub use user::User;
