//! Purchase records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use coinhall_core::{Coins, Email, OrderId};

/// A completed purchase. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub email: Email,
    /// Name of the purchased item as supplied by the client.
    pub item: String,
    pub price: Coins,
    pub date: DateTime<Utc>,
}
