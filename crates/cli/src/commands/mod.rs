//! Operator subcommands.
//!
//! Every command opens the data file strictly: a missing or unparsable file
//! is an error, never an empty store that would be saved over it.

pub mod adjust;
pub mod inspect;
pub mod logs;

use thiserror::Error;

use coinhall_core::EmailError;
use coinhall_server::services::ServiceError;
use coinhall_server::store::StoreError;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Reading or writing the data file failed.
    #[error("Data file error: {0}")]
    Store(#[from] StoreError),

    /// The ledger declined the change.
    #[error("Rejected: {0}")]
    Rejected(#[from] ServiceError),

    /// Invalid email.
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),
}
