//! Activity log maintenance.

use std::path::Path;

use coinhall_server::store::Store;

use super::CommandError;

/// Empty the activity log and save the file.
///
/// File access stands in for the admin secret the HTTP endpoint asks for.
///
/// # Errors
///
/// Fails if the file cannot be opened or saved.
pub fn clear(path: &Path) -> Result<(), CommandError> {
    let mut store = Store::open(path)?;
    let dropped = store.data().logs.len();
    store.data_mut().logs.clear();
    store.save()?;

    tracing::info!(dropped, path = %path.display(), "Activity log cleared");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use coinhall_core::EventKind;
    use coinhall_server::models::LogEntry;
    use coinhall_server::store::StoreData;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_clear_keeps_other_collections() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("database.json");
        let mut data = StoreData::default();
        data.logs.record(LogEntry::new(
            Utc::now(),
            EventKind::Support,
            "player@example.com",
            "Asked: \"hello\"",
        ));
        Store::with_data(&path, data).save().unwrap();

        clear(&path).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["logs"], serde_json::json!([]));
        assert!(json["users"].is_object());
    }

    #[test]
    fn test_clear_refuses_unparsable_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("database.json");
        std::fs::write(&path, "garbage").unwrap();

        assert!(clear(&path).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "garbage");
    }
}
