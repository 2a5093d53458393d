//! User domain type.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use coinhall_core::{Coins, Email};

/// How recently (in seconds) a user must have been seen to count as online.
pub const ONLINE_WINDOW_SECS: i64 = 120;

/// A player account, keyed by email in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Current balance. Only an admin adjustment can make it negative.
    pub balance: Coins,
    /// Display name derived from the email's local part.
    pub name: String,
    /// Whether the elite tier has been bought.
    pub is_elite: bool,
    /// When the user was created.
    pub joined: DateTime<Utc>,
    /// Last time the user touched a client endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_seen: Option<DateTime<Utc>>,
}

impl User {
    /// A fresh account for `email` with the given starting balance.
    #[must_use]
    pub fn new(email: &Email, balance: Coins, now: DateTime<Utc>) -> Self {
        Self {
            balance,
            name: email.display_name(),
            is_elite: false,
            joined: now,
            last_seen: None,
        }
    }

    /// Record activity at `now`.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_seen = Some(now);
    }

    /// Whether the user was seen within [`ONLINE_WINDOW_SECS`] of `now`.
    #[must_use]
    pub fn is_online(&self, now: DateTime<Utc>) -> bool {
        self.last_seen.is_some_and(|seen| {
            now.signed_duration_since(seen) < Duration::seconds(ONLINE_WINDOW_SECS)
        })
    }
}
