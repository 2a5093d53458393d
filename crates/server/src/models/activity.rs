//! Bounded activity log.
//!
//! The log is newest-first and never holds more than [`LOG_CAPACITY`]
//! entries: recording past the cap drops the oldest entry. Entries are never
//! edited or removed individually; the only other mutation is a full clear.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};

use coinhall_core::EventKind;

/// Maximum number of entries kept.
pub const LOG_CAPACITY: usize = 200;

/// One line of the activity log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub time: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: EventKind,
    /// Who acted: a user email, or an admin label for admin actions.
    #[serde(rename = "email")]
    pub actor: String,
    #[serde(rename = "desc")]
    pub description: String,
}

impl LogEntry {
    #[must_use]
    pub fn new(
        time: DateTime<Utc>,
        kind: EventKind,
        actor: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            time,
            kind,
            actor: actor.into(),
            description: description.into(),
        }
    }
}

/// Newest-first, capacity-bounded sequence of [`LogEntry`].
///
/// Serializes as a plain JSON array. Deserializing an over-long array keeps
/// the newest [`LOG_CAPACITY`] entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "VecDeque<LogEntry>")]
pub struct EventLog {
    entries: VecDeque<LogEntry>,
}

impl EventLog {
    /// Prepend an entry, evicting the oldest one past capacity.
    pub fn record(&mut self, entry: LogEntry) {
        tracing::debug!(kind = %entry.kind, actor = %entry.actor, "{}", entry.description);
        self.entries.push_front(entry);
        self.entries.truncate(LOG_CAPACITY);
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// The most recent entry.
    #[must_use]
    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.front()
    }
}

impl From<VecDeque<LogEntry>> for EventLog {
    fn from(mut entries: VecDeque<LogEntry>) -> Self {
        entries.truncate(LOG_CAPACITY);
        Self { entries }
    }
}

impl Serialize for EventLog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}
