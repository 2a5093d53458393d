//! Player route handlers.
//!
//! Identity is whatever `email` the client sends; there is no session.

use axum::{Json, extract::State};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::instrument;

use coinhall_core::Coins;

use super::input::{self, LenientJson};
use super::{Accepted, Done};
use crate::error::{Result, set_sentry_user};
use crate::models::Report;
use crate::services::{Ledger, ServiceError, SupportDesk, support};
use crate::state::AppState;

/// Body carrying only the player's email.
#[derive(Debug, Default, Deserialize)]
pub struct EmailRequest {
    pub email: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyItemRequest {
    pub email: Option<String>,
    pub item_name: Option<String>,
    /// Number or numeric string.
    pub price: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SendReportRequest {
    pub email: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceBody {
    pub balance: Coins,
    pub name: String,
    pub is_elite: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBalanceBody {
    pub new_balance: Coins,
}

#[derive(Debug, Serialize)]
pub struct BonusBody {
    pub bonus: u32,
}

#[derive(Debug, Serialize)]
pub struct ReportsResponse {
    pub reports: Vec<Report>,
}

/// Return the balance, registering the player on first contact.
#[instrument(skip_all, fields(email = req.email.as_deref()))]
pub async fn get_balance(
    State(state): State<AppState>,
    LenientJson(req): LenientJson<EmailRequest>,
) -> Result<Json<Accepted<BalanceBody>>> {
    let email = input::email(req.email.as_deref())?;
    set_sentry_user(&email);

    let mut store = state.store().lock().await;
    let user = Ledger::new(store.data_mut(), &state.config().economy, Utc::now()).check_in(&email);
    store.save()?;

    Ok(Json(Accepted::new(BalanceBody {
        balance: user.balance,
        name: user.name,
        is_elite: user.is_elite,
    })))
}

/// Buy a shop item.
#[instrument(skip_all, fields(email = req.email.as_deref(), item = req.item_name.as_deref()))]
pub async fn buy_item(
    State(state): State<AppState>,
    LenientJson(req): LenientJson<BuyItemRequest>,
) -> Result<Json<Accepted<NewBalanceBody>>> {
    let email = input::email(req.email.as_deref())?;
    let item = input::text("itemName", req.item_name.as_deref())?;
    let price = req
        .price
        .as_ref()
        .ok_or(ServiceError::MissingField("price"))
        .and_then(|value| input::coins(value).ok_or(ServiceError::InvalidAmount))?;
    set_sentry_user(&email);

    let mut store = state.store().lock().await;
    let new_balance =
        Ledger::new(store.data_mut(), &state.config().economy, Utc::now()).purchase(&email, item, price)?;
    store.save()?;

    Ok(Json(Accepted::new(NewBalanceBody { new_balance })))
}

/// Spin the reward wheel. The bonus is reported, not credited.
#[instrument(skip_all, fields(email = req.email.as_deref()))]
pub async fn spin_roulette(
    State(state): State<AppState>,
    LenientJson(req): LenientJson<EmailRequest>,
) -> Result<Json<Accepted<BonusBody>>> {
    let email = input::email(req.email.as_deref())?;
    set_sentry_user(&email);

    let mut store = state.store().lock().await;
    let bonus = Ledger::new(store.data_mut(), &state.config().economy, Utc::now()).spin_roulette(&email)?;
    store.save()?;

    Ok(Json(Accepted::new(BonusBody { bonus })))
}

/// Buy the elite tier.
#[instrument(skip_all, fields(email = req.email.as_deref()))]
pub async fn buy_elite(
    State(state): State<AppState>,
    LenientJson(req): LenientJson<EmailRequest>,
) -> Result<Json<Accepted<NewBalanceBody>>> {
    let email = input::email(req.email.as_deref())?;
    set_sentry_user(&email);

    let mut store = state.store().lock().await;
    let new_balance = Ledger::new(store.data_mut(), &state.config().economy, Utc::now()).buy_elite(&email)?;
    store.save()?;

    Ok(Json(Accepted::new(NewBalanceBody { new_balance })))
}

/// File a support question.
#[instrument(skip_all, fields(email = req.email.as_deref()))]
pub async fn send_report(
    State(state): State<AppState>,
    LenientJson(req): LenientJson<SendReportRequest>,
) -> Result<Json<Accepted<Done>>> {
    let email = input::email(req.email.as_deref())?;
    let question = input::text("message", req.message.as_deref())?;

    let mut store = state.store().lock().await;
    SupportDesk::new(store.data_mut(), Utc::now()).submit(&email, question);
    store.save()?;

    Ok(Json(Accepted::done()))
}

/// List the caller's support questions, newest first.
///
/// A missing or empty email matches nothing.
#[instrument(skip_all, fields(email = req.email.as_deref()))]
pub async fn my_reports(
    State(state): State<AppState>,
    LenientJson(req): LenientJson<EmailRequest>,
) -> Json<ReportsResponse> {
    let Ok(email) = input::email(req.email.as_deref()) else {
        return Json(ReportsResponse { reports: Vec::new() });
    };

    let store = state.store().lock().await;
    Json(ReportsResponse {
        reports: support::reports_for(store.data(), &email),
    })
}
