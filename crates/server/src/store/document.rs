//! On-disk layout of the data file.
//!
//! ```json
//! {
//!   "users":   { "<email>": { "balance": 0, "name": "...", ... } },
//!   "orders":  [ { "id": 2, ... }, { "id": 1, ... } ],
//!   "logs":    [ { "time": "...", "type": "BUY", "email": "...", "desc": "..." } ],
//!   "reports": [ { "id": 1, "question": "...", "answer": null, ... } ]
//! }
//! ```
//!
//! Every top-level key is optional on read; a missing or `null` key loads as
//! an empty collection. Unknown keys are ignored.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use coinhall_core::Email;

use crate::models::{EventLog, Order, Report, User};

/// Owned form, used when reading the file.
#[derive(Debug, Default, Deserialize)]
pub struct StoreDocument {
    #[serde(default, deserialize_with = "null_as_default")]
    pub users: BTreeMap<Email, User>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub orders: Vec<Order>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub logs: EventLog,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reports: Vec<Report>,
}

/// Borrowed form, used when writing the file without cloning the store.
#[derive(Debug, Serialize)]
pub struct StoreDocumentRef<'a> {
    pub users: &'a BTreeMap<Email, User>,
    pub orders: &'a [Order],
    pub logs: &'a EventLog,
    pub reports: &'a [Report],
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
