//! Administrator views and privileged maintenance.

use chrono::{DateTime, Utc};
use serde::Serialize;

use coinhall_core::{Coins, Email};

use super::ServiceError;
use crate::config::ServerConfig;
use crate::models::{EventLog, Order, Report};
use crate::store::StoreData;

/// One row of the admin user table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub email: Email,
    pub balance: Coins,
    /// Seen within the last two minutes.
    pub is_online: bool,
    pub is_elite: bool,
    /// `null` if the user never checked in.
    pub last_seen: Option<DateTime<Utc>>,
}

/// Everything the admin dashboard shows.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub users: Vec<UserSummary>,
    pub orders: Vec<Order>,
    pub logs: EventLog,
    pub reports: Vec<Report>,
}

/// Snapshot every collection, deriving each user's online flag at `now`.
#[must_use]
pub fn dashboard(data: &StoreData, now: DateTime<Utc>) -> Dashboard {
    let users = data
        .users
        .iter()
        .map(|(email, user)| UserSummary {
            email: email.clone(),
            balance: user.balance,
            is_online: user.is_online(now),
            is_elite: user.is_elite,
            last_seen: user.last_seen,
        })
        .collect();

    Dashboard {
        users,
        orders: data.orders.clone(),
        logs: data.logs.clone(),
        reports: data.reports.clone(),
    }
}

/// Empty the activity log if `password` matches the configured admin secret.
///
/// # Errors
///
/// `WrongSecret` for any other value, including when no secret is
/// configured. The log is left untouched.
pub fn clear_logs(data: &mut StoreData, config: &ServerConfig, password: &str) -> Result<(), ServiceError> {
    if !config.admin_secret_matches(password) {
        tracing::warn!("Rejected activity log clear: wrong admin secret");
        return Err(ServiceError::WrongSecret);
    }

    let dropped = data.logs.len();
    data.logs.clear();
    tracing::warn!(dropped, "Activity log cleared by admin");
    Ok(())
}
