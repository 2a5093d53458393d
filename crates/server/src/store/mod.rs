//! File-backed store for every persistent collection.
//!
//! # Data file
//!
//! One pretty-printed JSON document holds users, orders, logs and reports
//! (see [`document`] for the layout). It is read once at startup and
//! rewritten in full after every mutation.
//!
//! # Writes
//!
//! [`Store::save`] writes to a sibling `*.tmp` file and renames it over the
//! data file, so readers never observe a half-written document. Callers
//! serialize access through the mutex in [`crate::state::AppState`]; two
//! processes pointed at the same file still overwrite each other.

pub mod document;

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;

use coinhall_core::{Email, OrderId, ReportId};

use crate::models::{EventLog, Order, Report, User};
use document::{StoreDocument, StoreDocumentRef};

/// Errors raised while persisting the store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the data file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The document could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// In-memory state of all collections.
///
/// `orders` and `reports` are newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreData {
    pub users: BTreeMap<Email, User>,
    pub orders: Vec<Order>,
    pub logs: EventLog,
    pub reports: Vec<Report>,
    next_order_id: Option<OrderId>,
    next_report_id: Option<ReportId>,
}

impl StoreData {
    /// Allocate the next order ID.
    ///
    /// IDs continue from the largest ID present, so they stay unique across
    /// restarts and when the file still holds timestamp-based IDs.
    pub fn next_order_id(&mut self) -> OrderId {
        let id = self.next_order_id.unwrap_or_else(|| {
            self.orders
                .iter()
                .map(|order| order.id.next())
                .max()
                .unwrap_or(OrderId::FIRST)
        });
        self.next_order_id = Some(id.next());
        id
    }

    /// Allocate the next report ID.
    pub fn next_report_id(&mut self) -> ReportId {
        let id = self.next_report_id.unwrap_or_else(|| {
            self.reports
                .iter()
                .map(|report| report.id.next())
                .max()
                .unwrap_or(ReportId::FIRST)
        });
        self.next_report_id = Some(id.next());
        id
    }

    fn document(&self) -> StoreDocumentRef<'_> {
        StoreDocumentRef {
            users: &self.users,
            orders: &self.orders,
            logs: &self.logs,
            reports: &self.reports,
        }
    }

    /// Whether the persistent collections match, ignoring ID allocation state.
    #[must_use]
    pub fn same_records(&self, other: &Self) -> bool {
        self.users == other.users
            && self.orders == other.orders
            && self.logs == other.logs
            && self.reports == other.reports
    }
}

impl From<StoreDocument> for StoreData {
    fn from(doc: StoreDocument) -> Self {
        Self {
            users: doc.users,
            orders: doc.orders,
            logs: doc.logs,
            reports: doc.reports,
            next_order_id: None,
            next_report_id: None,
        }
    }
}

/// The store bound to its data file.
#[derive(Debug)]
pub struct Store {
    path: PathBuf,
    data: StoreData,
}

impl Store {
    /// Load the store from `path`.
    ///
    /// Never fails: a missing file yields an empty store, and an unreadable
    /// or unparsable file is logged, copied aside to `<file>.unreadable`, and
    /// replaced by an empty store.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let data = match std::fs::read(&path) {
            Ok(bytes) => match serde_json::from_slice::<StoreDocument>(&bytes) {
                Ok(doc) => {
                    let data = StoreData::from(doc);
                    tracing::info!(
                        path = %path.display(),
                        users = data.users.len(),
                        orders = data.orders.len(),
                        logs = data.logs.len(),
                        reports = data.reports.len(),
                        "Loaded data file"
                    );
                    data
                }
                Err(e) => {
                    tracing::error!(path = %path.display(), error = %e, "Failed to parse data file, starting empty");
                    preserve_unreadable(&path);
                    StoreData::default()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "No data file yet, starting empty");
                StoreData::default()
            }
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "Failed to read data file, starting empty");
                preserve_unreadable(&path);
                StoreData::default()
            }
        };

        Self { path, data }
    }

    /// Load the store from `path`, failing instead of starting empty.
    ///
    /// For offline tools that must not overwrite a file they cannot read.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the file is missing, unreadable or unparsable.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let bytes = std::fs::read(&path)?;
        let doc: StoreDocument = serde_json::from_slice(&bytes)?;
        Ok(Self {
            path,
            data: StoreData::from(doc),
        })
    }

    /// Wrap existing state without touching the file system.
    #[must_use]
    pub fn with_data(path: impl Into<PathBuf>, data: StoreData) -> Self {
        Self {
            path: path.into(),
            data,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub const fn data(&self) -> &StoreData {
        &self.data
    }

    pub const fn data_mut(&mut self) -> &mut StoreData {
        &mut self.data
    }

    /// Serialize all collections and replace the data file.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if encoding fails or the file cannot be written.
    pub fn save(&self) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(&self.data.document())?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let tmp = sibling(&self.path, "tmp");
        std::fs::write(&tmp, &json)?;
        replace_file(&tmp, &self.path)?;

        tracing::debug!(path = %self.path.display(), bytes = json.len(), "Saved data file");
        Ok(())
    }
}

/// `<path>.<suffix>` in the same directory.
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".");
    name.push(suffix);
    path.with_file_name(name)
}

/// Rename `tmp` over `dest`.
///
/// Where rename refuses an existing target, the target is removed and the
/// rename retried. The temp file is removed if that also fails.
fn replace_file(tmp: &Path, dest: &Path) -> std::io::Result<()> {
    if let Err(first) = std::fs::rename(tmp, dest) {
        let _ = std::fs::remove_file(dest);
        std::fs::rename(tmp, dest).map_err(|retry| {
            let _ = std::fs::remove_file(tmp);
            std::io::Error::new(
                retry.kind(),
                format!("replacing {} failed (first: {first}, retry: {retry})", dest.display()),
            )
        })?;
    }
    Ok(())
}

fn preserve_unreadable(path: &Path) {
    let backup = sibling(path, "unreadable");
    match std::fs::copy(path, &backup) {
        Ok(_) => tracing::warn!(backup = %backup.display(), "Kept a copy of the unreadable data file"),
        Err(e) => tracing::warn!(error = %e, "Could not copy the unreadable data file"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use coinhall_core::{Coins, EventKind};
    use tempfile::TempDir;

    use super::*;
    use crate::models::LogEntry;

    fn sample_data() -> StoreData {
        let now = Utc::now();
        let email = Email::parse("player@example.com").unwrap();
        let mut data = StoreData::default();
        data.users
            .insert(email.clone(), User::new(&email, Coins::new(40), now));
        let id = data.next_order_id();
        data.orders.insert(
            0,
            Order {
                id,
                email: email.clone(),
                item: "Sword".to_string(),
                price: Coins::new(60),
                date: now,
            },
        );
        let id = data.next_report_id();
        data.reports.insert(
            0,
            Report {
                id,
                email: email.clone(),
                question: "Where is my sword?".to_string(),
                answer: None,
                date: now,
            },
        );
        data.logs.record(LogEntry::new(
            now,
            EventKind::Buy,
            email.as_str(),
            "Bought Sword (-$60)",
        ));
        data
    }

    #[test]
    fn test_missing_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        let store = Store::load(dir.path().join("database.json"));
        assert_eq!(store.data(), &StoreData::default());
    }

    #[test]
    fn test_unparsable_file_starts_empty_and_is_preserved() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("database.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = Store::load(&path);

        assert!(store.data().users.is_empty());
        let backup = dir.path().join("database.json.unreadable");
        assert_eq!(std::fs::read_to_string(backup).unwrap(), "{ not json");
    }

    #[test]
    fn test_open_is_strict() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("database.json");
        assert!(matches!(Store::open(&path), Err(StoreError::Io(_))));

        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(Store::open(&path), Err(StoreError::Serialize(_))));

        let data = sample_data();
        Store::with_data(&path, data.clone()).save().unwrap();
        assert!(Store::open(&path).unwrap().data().same_records(&data));
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("database.json");
        let store = Store::with_data(&path, sample_data());

        store.save().unwrap();
        let reloaded = Store::load(&path);

        assert!(reloaded.data().same_records(store.data()));
    }

    #[test]
    fn test_save_is_pretty_printed_with_named_collections() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("database.json");
        Store::with_data(&path, sample_data()).save().unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains('\n'));
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert!(json["users"]["player@example.com"].is_object());
        assert!(json["orders"].is_array());
        assert!(json["logs"].is_array());
        assert!(json["reports"].is_array());
        assert!(!dir.path().join("database.json.tmp").exists());
    }

    #[test]
    fn test_save_replaces_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("database.json");
        Store::with_data(&path, sample_data()).save().unwrap();

        Store::with_data(&path, StoreData::default()).save().unwrap();

        assert!(Store::open(&path).unwrap().data().users.is_empty());
        assert!(!dir.path().join("database.json.tmp").exists());
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("database.json");
        Store::with_data(&path, StoreData::default()).save().unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_ids_continue_after_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("database.json");
        Store::with_data(&path, sample_data()).save().unwrap();

        let mut reloaded = Store::load(&path);

        assert_eq!(reloaded.data_mut().next_order_id(), OrderId::new(2));
        assert_eq!(reloaded.data_mut().next_report_id(), ReportId::new(2));
    }

    #[test]
    fn test_ids_continue_from_legacy_timestamps() {
        let email = Email::parse("player@example.com").unwrap();
        let mut data = StoreData::default();
        data.orders.push(Order {
            id: OrderId::new(1_718_035_200_123),
            email,
            item: "Shield".to_string(),
            price: Coins::new(10),
            date: Utc::now(),
        });

        assert_eq!(data.next_order_id(), OrderId::new(1_718_035_200_124));
        assert_eq!(data.next_order_id(), OrderId::new(1_718_035_200_125));
    }
}
