//! Admin balance adjustment from the command line.

use std::path::Path;

use chrono::Utc;

use coinhall_core::{Coins, Email};
use coinhall_server::config::EconomyConfig;
use coinhall_server::services::Ledger;
use coinhall_server::store::Store;

use super::CommandError;

/// Add `amount` to the balance of `email` and save the file.
///
/// Logged as an `ADMIN` entry exactly like the HTTP endpoint.
///
/// # Errors
///
/// Fails if the file cannot be opened or saved, the email is empty, or no
/// user has this email. Nothing is written on failure.
pub fn run(path: &Path, email: &str, amount: i64) -> Result<Coins, CommandError> {
    let email = Email::parse(email)?;
    let mut store = Store::open(path)?;

    let economy = EconomyConfig::default();
    let balance =
        Ledger::new(store.data_mut(), &economy, Utc::now()).admin_adjust(&email, Coins::new(amount))?;
    store.save()?;

    tracing::info!(%email, amount, %balance, "Balance adjusted");
    Ok(balance)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use coinhall_core::EventKind;
    use coinhall_server::services::ServiceError;
    use coinhall_server::store::StoreData;
    use tempfile::TempDir;

    use super::*;

    fn seeded(dir: &TempDir) -> std::path::PathBuf {
        let path = dir.path().join("database.json");
        let mut data = StoreData::default();
        let economy = EconomyConfig::default();
        Ledger::new(&mut data, &economy, Utc::now())
            .get_or_create_user(&Email::parse("player@example.com").unwrap());
        Store::with_data(&path, data).save().unwrap();
        path
    }

    #[test]
    fn test_adjust_saves_balance_and_log() {
        let dir = TempDir::new().unwrap();
        let path = seeded(&dir);

        let balance = run(&path, "player@example.com", -25).unwrap();

        assert_eq!(balance, Coins::new(-25));
        let store = Store::open(&path).unwrap();
        let email = Email::parse("player@example.com").unwrap();
        assert_eq!(store.data().users[&email].balance, Coins::new(-25));
        assert_eq!(store.data().logs.latest().unwrap().kind, EventKind::Admin);
    }

    #[test]
    fn test_adjust_unknown_user_leaves_file() {
        let dir = TempDir::new().unwrap();
        let path = seeded(&dir);
        let before = std::fs::read_to_string(&path).unwrap();

        let err = run(&path, "ghost@example.com", 10).unwrap_err();

        assert!(matches!(err, CommandError::Rejected(ServiceError::UserNotFound(_))));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn test_adjust_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = run(&dir.path().join("absent.json"), "player@example.com", 10).unwrap_err();
        assert!(matches!(err, CommandError::Store(_)));
        assert!(!dir.path().join("absent.json").exists());
    }
}
