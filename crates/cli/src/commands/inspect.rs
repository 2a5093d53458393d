//! Summarize the data file.

use std::fmt;
use std::path::Path;

use chrono::{DateTime, Utc};

use coinhall_core::{Coins, Email, ReportId};
use coinhall_server::store::{Store, StoreData};

use super::CommandError;

/// What `inspect` prints.
#[derive(Debug, PartialEq, Eq)]
pub struct Summary {
    pub users: usize,
    pub elite: usize,
    pub online: usize,
    pub orders: usize,
    pub logs: usize,
    pub reports: usize,
    /// Richest first; ties by email.
    pub top_balances: Vec<(Email, Coins)>,
    /// Newest first.
    pub unanswered: Vec<(ReportId, Email, String)>,
}

impl Summary {
    #[must_use]
    pub fn of(data: &StoreData, top: usize, now: DateTime<Utc>) -> Self {
        let mut balances: Vec<_> = data
            .users
            .iter()
            .map(|(email, user)| (email.clone(), user.balance))
            .collect();
        balances.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        balances.truncate(top);

        Self {
            users: data.users.len(),
            elite: data.users.values().filter(|u| u.is_elite).count(),
            online: data.users.values().filter(|u| u.is_online(now)).count(),
            orders: data.orders.len(),
            logs: data.logs.len(),
            reports: data.reports.len(),
            top_balances: balances,
            unanswered: data
                .reports
                .iter()
                .filter(|r| !r.is_answered())
                .map(|r| (r.id, r.email.clone(), r.question.clone()))
                .collect(),
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "users: {} ({} elite, {} online)",
            self.users, self.elite, self.online
        )?;
        writeln!(f, "orders: {}", self.orders)?;
        writeln!(f, "logs: {}", self.logs)?;
        writeln!(f, "reports: {} ({} unanswered)", self.reports, self.unanswered.len())?;

        if !self.top_balances.is_empty() {
            writeln!(f, "\ntop balances:")?;
            for (email, balance) in &self.top_balances {
                writeln!(f, "  {:>12}  {email}", balance.to_string())?;
            }
        }

        if !self.unanswered.is_empty() {
            writeln!(f, "\nunanswered reports:")?;
            for (id, email, question) in &self.unanswered {
                writeln!(f, "  #{id}  {email}: {question}")?;
            }
        }

        Ok(())
    }
}

/// Load `path` and print its summary.
///
/// # Errors
///
/// Returns `CommandError::Store` if the file cannot be opened.
pub fn run(path: &Path, top: usize) -> Result<(), CommandError> {
    let store = Store::open(path)?;
    let summary = Summary::of(store.data(), top, Utc::now());

    #[allow(clippy::print_stdout)]
    {
        print!("{summary}");
    }
    Ok(())
}
