//! Support tickets.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use coinhall_core::{Email, ReportId};

/// A support question and, once an admin replies, its answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub id: ReportId,
    pub email: Email,
    pub question: String,
    /// `null` until answered. A later reply overwrites an earlier one.
    pub answer: Option<String>,
    pub date: DateTime<Utc>,
}

impl Report {
    /// Whether an admin has replied.
    #[must_use]
    pub const fn is_answered(&self) -> bool {
        self.answer.is_some()
    }
}
