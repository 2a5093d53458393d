//! Balance-changing operations on user accounts.
//!
//! Every successful operation appends exactly one activity log entry.
//! A declined operation changes nothing. Persisting the result is the
//! caller's job.

use chrono::{DateTime, Utc};

use coinhall_core::{Coins, Email, EventKind};

use super::ServiceError;
use crate::config::EconomyConfig;
use crate::models::{LogEntry, Order, User};
use crate::store::StoreData;

/// Actor label recorded for administrator actions.
pub const ADMIN_ACTOR: &str = "admin";

/// Ledger over the store's user accounts.
pub struct Ledger<'a> {
    data: &'a mut StoreData,
    economy: &'a EconomyConfig,
    now: DateTime<Utc>,
}

impl<'a> Ledger<'a> {
    /// Create a ledger acting at time `now`.
    #[must_use]
    pub const fn new(data: &'a mut StoreData, economy: &'a EconomyConfig, now: DateTime<Utc>) -> Self {
        Self { data, economy, now }
    }

    /// Return the user for `email`, creating the account on first contact.
    ///
    /// New accounts start at zero, except the configured operator email which
    /// starts with the operator allowance. Creation logs a `REGISTER` entry.
    pub fn get_or_create_user(&mut self, email: &Email) -> &mut User {
        let now = self.now;
        let economy = self.economy;
        let logs = &mut self.data.logs;

        self.data.users.entry(email.clone()).or_insert_with(|| {
            let balance = economy.starting_balance(email);
            tracing::info!(%email, %balance, "Registering new user");
            logs.record(LogEntry::new(now, EventKind::Register, email.as_str(), "New user"));
            User::new(email, balance, now)
        })
    }

    /// Get-or-create the user and mark them as seen now.
    ///
    /// Returns a snapshot of the account.
    pub fn check_in(&mut self, email: &Email) -> User {
        let now = self.now;
        let user = self.get_or_create_user(email);
        user.touch(now);
        user.clone()
    }

    /// Buy `item` for `price`.
    ///
    /// Succeeds only when the balance covers the price; then the balance is
    /// debited, an order is prepended and a `BUY` entry logged. Returns the
    /// new balance.
    ///
    /// # Errors
    ///
    /// `UserNotFound` for an unknown email, `InsufficientFunds` when the
    /// balance is below the price.
    pub fn purchase(&mut self, email: &Email, item: &str, price: Coins) -> Result<Coins, ServiceError> {
        let now = self.now;
        let user = self.user_mut(email)?;
        let balance = user
            .balance
            .debit(price)
            .ok_or(ServiceError::InsufficientFunds {
                balance: user.balance,
                price,
            })?;
        user.balance = balance;
        user.touch(now);

        let id = self.data.next_order_id();
        self.data.orders.insert(
            0,
            Order {
                id,
                email: email.clone(),
                item: item.to_owned(),
                price,
                date: now,
            },
        );
        self.data.logs.record(LogEntry::new(
            now,
            EventKind::Buy,
            email.as_str(),
            format!("Bought {item} (-{price})"),
        ));

        tracing::info!(%email, %item, %price, order_id = %id, %balance, "Purchase completed");
        Ok(balance)
    }

    /// Buy the elite tier at its fixed price.
    ///
    /// Same debit contract as [`Ledger::purchase`] but records no order.
    /// Buying again while already elite charges again.
    ///
    /// # Errors
    ///
    /// `UserNotFound` or `InsufficientFunds`.
    pub fn buy_elite(&mut self, email: &Email) -> Result<Coins, ServiceError> {
        let price = self.economy.elite_price;
        let user = self.user_mut(email)?;
        let balance = user
            .balance
            .debit(price)
            .ok_or(ServiceError::InsufficientFunds {
                balance: user.balance,
                price,
            })?;
        user.balance = balance;
        user.is_elite = true;

        self.data.logs.record(LogEntry::new(
            self.now,
            EventKind::Elite,
            email.as_str(),
            format!("Bought ELITE status (-{price})"),
        ));

        tracing::info!(%email, %balance, "Elite status purchased");
        Ok(balance)
    }

    /// Add `amount` (possibly negative) to a balance with no bounds check.
    ///
    /// Logs an `ADMIN` entry stating whether coins were credited or debited.
    ///
    /// # Errors
    ///
    /// `UserNotFound` for an unknown email.
    pub fn admin_adjust(&mut self, email: &Email, amount: Coins) -> Result<Coins, ServiceError> {
        let user = self.user_mut(email)?;
        user.balance = user.balance.adjust(amount);
        let balance = user.balance;

        let magnitude = amount.unsigned_abs();
        let description = if amount.is_positive() {
            format!("Credited ${magnitude} to {email}")
        } else {
            format!("Debited ${magnitude} from {email}")
        };
        self.data.logs.record(LogEntry::new(
            self.now,
            EventKind::Admin,
            ADMIN_ACTOR,
            description,
        ));

        tracing::info!(%email, %amount, %balance, "Admin balance adjustment");
        Ok(balance)
    }

    /// Spin the reward wheel.
    ///
    /// Reports the configured bonus without crediting it, logs a `ROULETTE`
    /// entry and marks the user as seen.
    ///
    /// # Errors
    ///
    /// `UserNotFound` for an unknown email.
    pub fn spin_roulette(&mut self, email: &Email) -> Result<u32, ServiceError> {
        let now = self.now;
        let bonus = self.economy.roulette_bonus;
        self.user_mut(email)?.touch(now);

        self.data.logs.record(LogEntry::new(
            now,
            EventKind::Roulette,
            email.as_str(),
            format!("Spun the roulette. Prize: {bonus}%"),
        ));

        Ok(bonus)
    }

    fn user_mut(&mut self, email: &Email) -> Result<&mut User, ServiceError> {
        self.data
            .users
            .get_mut(email)
            .ok_or_else(|| ServiceError::UserNotFound(email.clone()))
    }
}
