//! Admin route handlers.

use axum::{Json, extract::State};
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;
use tracing::instrument;

use coinhall_core::ReportId;

use super::input::{self, LenientJson};
use super::{Accepted, Done};
use crate::error::Result;
use crate::services::{Ledger, ServiceError, SupportDesk, admin};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct MoneyRequest {
    pub email: Option<String>,
    /// Signed; number or numeric string.
    pub amount: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReplyRequest {
    pub id: Option<Value>,
    pub answer: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ClearLogsRequest {
    pub password: Option<String>,
}

/// Dashboard snapshot of every collection.
#[instrument(skip_all)]
pub async fn data(State(state): State<AppState>) -> Json<admin::Dashboard> {
    let store = state.store().lock().await;
    Json(admin::dashboard(store.data(), Utc::now()))
}

/// Credit or debit a player's balance.
#[instrument(skip_all, fields(email = req.email.as_deref()))]
pub async fn money(
    State(state): State<AppState>,
    LenientJson(req): LenientJson<MoneyRequest>,
) -> Result<Json<Accepted<Done>>> {
    let email = input::email(req.email.as_deref())?;
    let amount = req
        .amount
        .as_ref()
        .and_then(input::coins)
        .ok_or(ServiceError::InvalidAmount)?;

    let mut store = state.store().lock().await;
    Ledger::new(store.data_mut(), &state.config().economy, Utc::now()).admin_adjust(&email, amount)?;
    store.save()?;

    Ok(Json(Accepted::done()))
}

/// Answer a support question.
#[instrument(skip_all)]
pub async fn reply_report(
    State(state): State<AppState>,
    LenientJson(req): LenientJson<ReplyRequest>,
) -> Result<Json<Accepted<Done>>> {
    let id = req
        .id
        .as_ref()
        .ok_or(ServiceError::MissingField("id"))?;
    let id = input::integer(id)
        .map(ReportId::new)
        .ok_or(ServiceError::MissingField("id"))?;
    let answer = input::text("answer", req.answer.as_deref())?;

    let mut store = state.store().lock().await;
    SupportDesk::new(store.data_mut(), Utc::now()).reply(id, answer)?;
    store.save()?;

    Ok(Json(Accepted::done()))
}

/// Empty the activity log.
#[instrument(skip_all)]
pub async fn clear_logs(
    State(state): State<AppState>,
    LenientJson(req): LenientJson<ClearLogsRequest>,
) -> Result<Json<Accepted<Done>>> {
    let password = req.password.unwrap_or_default();

    let mut store = state.store().lock().await;
    admin::clear_logs(store.data_mut(), state.config(), &password)?;
    store.save()?;

    Ok(Json(Accepted::done()))
}
