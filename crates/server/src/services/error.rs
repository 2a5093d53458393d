//! Service error types.

use thiserror::Error;

use coinhall_core::{Coins, Email, EmailError, ReportId};

/// Reasons a request is declined.
///
/// None of these leave a partial mutation behind: every operation checks
/// its preconditions before touching the store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// A required request field was absent.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The email field was present but empty.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// The balance does not cover the price.
    #[error("insufficient funds: balance {balance}, price {price}")]
    InsufficientFunds {
        /// Balance at the time of the attempt.
        balance: Coins,
        /// Price that was asked for.
        price: Coins,
    },

    /// No user is registered under this email.
    #[error("user not found: {0}")]
    UserNotFound(Email),

    /// No support report has this ID.
    #[error("report not found: {0}")]
    ReportNotFound(ReportId),

    /// An admin amount could not be read as an integer.
    #[error("invalid amount")]
    InvalidAmount,

    /// The admin secret did not match.
    #[error("wrong admin secret")]
    WrongSecret,
}

impl ServiceError {
    /// Message shown to the client in the failure envelope, if any.
    ///
    /// Presence and secret failures carry no message.
    #[must_use]
    pub const fn client_message(&self) -> Option<&'static str> {
        match self {
            Self::InsufficientFunds { .. } => Some("Insufficient funds"),
            Self::UserNotFound(_) => Some("User not found"),
            Self::ReportNotFound(_) => Some("Report not found"),
            Self::MissingField(_) | Self::InvalidEmail(_) | Self::InvalidAmount | Self::WrongSecret => {
                None
            }
        }
    }
}
