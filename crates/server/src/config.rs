//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `COINHALL_HOST` - Bind address (default: 127.0.0.1)
//! - `COINHALL_PORT` - Listen port (default: 3000)
//! - `COINHALL_DATA_FILE` - Path of the JSON data file (default: database.json)
//! - `COINHALL_OPERATOR_EMAIL` - Email that receives the operator allowance on first contact
//! - `COINHALL_OPERATOR_ALLOWANCE` - Starting balance for the operator email (default: 100000)
//! - `COINHALL_ADMIN_SECRET` - Secret required to clear the activity log (unset: clearing is disabled)
//! - `COINHALL_ROULETTE_BONUS` - Bonus percentage reported by a roulette spin (default: 5)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use coinhall_core::{Coins, Email};

const MIN_ADMIN_SECRET_LENGTH: usize = 12;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.0;

/// Default starting balance for the operator email.
pub const DEFAULT_OPERATOR_ALLOWANCE: i64 = 100_000;

/// Price of the elite tier.
pub const ELITE_PRICE: Coins = Coins::new(100);

/// Default bonus percentage reported by a roulette spin.
pub const DEFAULT_ROULETTE_BONUS: u32 = 5;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// JSON file holding every persistent collection
    pub data_file: PathBuf,
    /// Economy rules applied by the ledger
    pub economy: EconomyConfig,
    /// Secret for the privileged log clear (`None` disables it)
    pub admin_secret: Option<SecretString>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Rules the ledger applies when creating and charging users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EconomyConfig {
    /// Email granted [`EconomyConfig::operator_allowance`] when first seen.
    pub operator_email: Option<Email>,
    /// Starting balance for the operator email.
    pub operator_allowance: Coins,
    /// Fixed price of the elite tier.
    pub elite_price: Coins,
    /// Bonus reported by a roulette spin. It is never credited.
    pub roulette_bonus: u32,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            operator_email: None,
            operator_allowance: Coins::new(DEFAULT_OPERATOR_ALLOWANCE),
            elite_price: ELITE_PRICE,
            roulette_bonus: DEFAULT_ROULETTE_BONUS,
        }
    }
}

impl EconomyConfig {
    /// Starting balance for a newly created user.
    #[must_use]
    pub fn starting_balance(&self, email: &Email) -> Coins {
        if self.operator_email.as_ref() == Some(email) {
            self.operator_allowance
        } else {
            Coins::ZERO
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable cannot be parsed or the admin
    /// secret fails validation (placeholder detection, length, entropy).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// See [`ServerConfig::from_env`].
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = parse_var(&lookup, "COINHALL_HOST", "127.0.0.1")?;
        let port = parse_var(&lookup, "COINHALL_PORT", "3000")?;
        let data_file =
            PathBuf::from(lookup("COINHALL_DATA_FILE").unwrap_or_else(|| "database.json".into()));

        let operator_email = lookup("COINHALL_OPERATOR_EMAIL")
            .map(|value| {
                Email::parse(&value).map_err(|e| {
                    ConfigError::InvalidEnvVar("COINHALL_OPERATOR_EMAIL".to_string(), e.to_string())
                })
            })
            .transpose()?;
        let operator_allowance = Coins::new(parse_var(
            &lookup,
            "COINHALL_OPERATOR_ALLOWANCE",
            &DEFAULT_OPERATOR_ALLOWANCE.to_string(),
        )?);
        let roulette_bonus = parse_var(
            &lookup,
            "COINHALL_ROULETTE_BONUS",
            &DEFAULT_ROULETTE_BONUS.to_string(),
        )?;

        let admin_secret = lookup("COINHALL_ADMIN_SECRET")
            .map(|value| {
                validate_secret_strength(&value, "COINHALL_ADMIN_SECRET")?;
                Ok::<_, ConfigError>(SecretString::from(value))
            })
            .transpose()?;

        Ok(Self {
            host,
            port,
            data_file,
            economy: EconomyConfig {
                operator_email,
                operator_allowance,
                elite_price: ELITE_PRICE,
                roulette_bonus,
            },
            admin_secret,
            sentry_dsn: lookup("SENTRY_DSN"),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Check a candidate against the configured admin secret.
    ///
    /// Always `false` when no secret is configured.
    #[must_use]
    pub fn admin_secret_matches(&self, candidate: &str) -> bool {
        self.admin_secret
            .as_ref()
            .is_some_and(|secret| secret.expose_secret() == candidate)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a variable, falling back to `default` when it is unset.
fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key)
        .unwrap_or_else(|| default.to_string())
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.chars().count() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is long enough, not a placeholder, and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    if secret.chars().count() < MIN_ADMIN_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!("must be at least {MIN_ADMIN_SECRET_LENGTH} characters"),
        ));
    }

    let lower = secret.to_lowercase();
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated secret."
            ),
        ));
    }

    Ok(())
}
