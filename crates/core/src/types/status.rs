//! Event kinds recorded in the activity log.

use serde::{Deserialize, Serialize};

/// The tag attached to every activity log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    /// A user record was created on first contact.
    Register,
    /// A purchase was placed.
    Buy,
    /// The reward wheel was spun.
    Roulette,
    /// The elite tier was bought.
    Elite,
    /// A support ticket was filed or answered.
    Support,
    /// An administrator changed a balance.
    Admin,
}

impl EventKind {
    /// The wire tag, e.g. `REGISTER`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Register => "REGISTER",
            Self::Buy => "BUY",
            Self::Roulette => "ROULETTE",
            Self::Elite => "ELITE",
            Self::Support => "SUPPORT",
            Self::Admin => "ADMIN",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EventKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "REGISTER" => Ok(Self::Register),
            "BUY" => Ok(Self::Buy),
            "ROULETTE" => Ok(Self::Roulette),
            "ELITE" => Ok(Self::Elite),
            "SUPPORT" => Ok(Self::Support),
            "ADMIN" => Ok(Self::Admin),
            _ => Err(format!("invalid event kind: {s}")),
        }
    }
}
