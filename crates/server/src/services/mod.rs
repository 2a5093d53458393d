//! Business logic over the in-memory store.
//!
//! # Services
//!
//! - `ledger` - Account creation, purchases, elite tier, roulette, admin credits
//! - `support` - Support reports and replies
//! - `admin` - Dashboard snapshot and log maintenance
//!
//! Services mutate a borrowed [`StoreData`](crate::store::StoreData) and never
//! touch the file system. Handlers hold the store lock across the call and
//! the following save.

pub mod admin;
mod error;
pub mod ledger;
pub mod support;

pub use error::ServiceError;
pub use ledger::{ADMIN_ACTOR, Ledger};
pub use support::SupportDesk;
