//! Virtual currency amounts.

use core::fmt;

use serde::{Deserialize, Serialize};

/// An amount of the in-app currency.
///
/// Balances, prices and admin adjustments are all whole coins. The value is
/// signed: an administrator may push a balance below zero, and purchases never
/// can (see [`Coins::debit`]).
///
/// Serializes as a bare JSON integer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Coins(i64);

impl Coins {
    /// No coins.
    pub const ZERO: Self = Self(0);

    /// Create an amount.
    #[must_use]
    pub const fn new(amount: i64) -> Self {
        Self(amount)
    }

    /// Get the underlying integer amount.
    #[must_use]
    pub const fn amount(self) -> i64 {
        self.0
    }

    /// Subtract `price` if this balance covers it.
    ///
    /// Returns `None` when `price` exceeds the balance; the caller must then
    /// leave the balance untouched.
    #[must_use]
    pub const fn debit(self, price: Self) -> Option<Self> {
        if self.0 < price.0 {
            return None;
        }
        match self.0.checked_sub(price.0) {
            Some(rest) => Some(Self(rest)),
            None => None,
        }
    }

    /// Add a signed adjustment with no lower bound.
    ///
    /// Saturates at the integer limits rather than wrapping.
    #[must_use]
    pub const fn adjust(self, delta: Self) -> Self {
        Self(self.0.saturating_add(delta.0))
    }

    /// Magnitude of the amount.
    #[must_use]
    pub const fn unsigned_abs(self) -> u64 {
        self.0.unsigned_abs()
    }

    /// Whether the amount is strictly positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }
}

impl fmt::Display for Coins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}

impl From<i64> for Coins {
    fn from(amount: i64) -> Self {
        Self(amount)
    }
}

impl From<Coins> for i64 {
    fn from(coins: Coins) -> Self {
        coins.0
    }
}
