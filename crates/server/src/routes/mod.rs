//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (data directory present)
//!
//! # Player
//! POST /get-balance            - Check in, creating the account on first contact
//! POST /buy-item               - Buy a shop item
//! POST /spin-roulette          - Spin the reward wheel
//! POST /buy-elite              - Buy the elite tier
//! POST /send-report            - File a support question
//! POST /my-reports             - List own support questions
//!
//! # Admin
//! GET  /admin/data             - Users, orders, logs and reports
//! POST /admin/money            - Credit or debit a balance
//! POST /admin/reply-report     - Answer a support question
//! POST /admin/clear-logs       - Empty the activity log (needs the secret)
//! ```
//!
//! Mutating handlers reply with an envelope: `{"success": true, ...}` on
//! success, `{"success": false, "message"?: ...}` when declined (see
//! [`crate::error::AppError`]).

pub mod admin;
pub mod client;
pub mod health;
pub mod input;

use axum::{
    Router,
    routing::{get, post},
};
use serde::Serialize;

use crate::state::AppState;

/// Success envelope around a handler's payload.
#[derive(Debug, Serialize)]
pub struct Accepted<T> {
    success: bool,
    #[serde(flatten)]
    body: T,
}

impl<T> Accepted<T> {
    pub const fn new(body: T) -> Self {
        Self {
            success: true,
            body,
        }
    }
}

/// Payload of a bare `{"success": true}`.
#[derive(Debug, Serialize)]
pub struct Done {}

impl Accepted<Done> {
    #[must_use]
    pub const fn done() -> Self {
        Self::new(Done {})
    }
}

/// Create the player routes router.
pub fn client_routes() -> Router<AppState> {
    Router::new()
        .route("/get-balance", post(client::get_balance))
        .route("/buy-item", post(client::buy_item))
        .route("/spin-roulette", post(client::spin_roulette))
        .route("/buy-elite", post(client::buy_elite))
        .route("/send-report", post(client::send_report))
        .route("/my-reports", post(client::my_reports))
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/data", get(admin::data))
        .route("/money", post(admin::money))
        .route("/reply-report", post(admin::reply_report))
        .route("/clear-logs", post(admin::clear_logs))
}

/// Create all routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .merge(client_routes())
        .nest("/admin", admin_routes())
}
