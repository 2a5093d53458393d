//! Admin dashboard, money and log maintenance over HTTP.

#![allow(clippy::unwrap_used)]

use coinhall_integration_tests::{ADMIN_SECRET, TestContext};
use serde_json::json;

const PLAYER: &str = "player@coinhall.test";

#[tokio::test]
async fn test_admin_debit_has_no_floor() {
    let ctx = TestContext::new().await;
    ctx.funded_user(PLAYER, 30).await;

    let reply = ctx
        .post("/admin/money", &json!({ "email": PLAYER, "amount": -50 }))
        .await;
    assert_eq!(reply, json!({ "success": true }));

    let balance = ctx.post("/get-balance", &json!({ "email": PLAYER })).await;
    assert_eq!(balance["balance"], -20);

    let logs = ctx.data_file_json()["logs"].clone();
    let admin_entries: Vec<_> = logs
        .as_array()
        .unwrap()
        .iter()
        .filter(|e| e["type"] == "ADMIN")
        .collect();
    // One from funding, one from the debit.
    assert_eq!(admin_entries.len(), 2);
    assert_eq!(admin_entries[0]["desc"], format!("Debited $50 from {PLAYER}"));
}

#[tokio::test]
async fn test_admin_money_parses_leading_integer() {
    let ctx = TestContext::new().await;
    ctx.post("/get-balance", &json!({ "email": PLAYER })).await;

    let reply = ctx
        .post("/admin/money", &json!({ "email": PLAYER, "amount": "25abc" }))
        .await;
    assert_eq!(reply, json!({ "success": true }));

    let bad = ctx
        .post("/admin/money", &json!({ "email": PLAYER, "amount": "abc" }))
        .await;
    assert_eq!(bad, json!({ "success": false }));

    let balance = ctx.post("/get-balance", &json!({ "email": PLAYER })).await;
    assert_eq!(balance["balance"], 25);
}

#[tokio::test]
async fn test_admin_money_unknown_user() {
    let ctx = TestContext::new().await;

    let reply = ctx
        .post(
            "/admin/money",
            &json!({ "email": "ghost@coinhall.test", "amount": 5 }),
        )
        .await;

    assert_eq!(reply["success"], false);
}

#[tokio::test]
async fn test_dashboard_lists_users_with_presence() {
    let ctx = TestContext::new().await;
    ctx.post("/get-balance", &json!({ "email": PLAYER })).await;

    let data = ctx.get_json("/admin/data").await;

    let users = data["users"].as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["email"], PLAYER);
    assert_eq!(users[0]["balance"], 0);
    assert_eq!(users[0]["isOnline"], true);
    assert_eq!(users[0]["isElite"], false);
    assert!(users[0]["lastSeen"].is_string());
    assert_eq!(data["logs"][0]["type"], "REGISTER");
    assert!(data["orders"].as_array().unwrap().is_empty());
    assert!(data["reports"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_clear_logs_requires_secret() {
    let ctx = TestContext::new().await;
    ctx.funded_user(PLAYER, 10).await;

    let wrong = ctx
        .post("/admin/clear-logs", &json!({ "password": "letmein" }))
        .await;
    assert_eq!(wrong, json!({ "success": false }));
    assert_eq!(ctx.data_file_json()["logs"].as_array().unwrap().len(), 2);

    let right = ctx
        .post("/admin/clear-logs", &json!({ "password": ADMIN_SECRET }))
        .await;
    assert_eq!(right, json!({ "success": true }));
    assert!(ctx.data_file_json()["logs"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_clear_logs_disabled_without_secret() {
    let ctx = TestContext::without_admin_secret().await;
    ctx.funded_user(PLAYER, 10).await;

    let reply = ctx.post("/admin/clear-logs", &json!({ "password": "" })).await;

    assert_eq!(reply, json!({ "success": false }));
    assert_eq!(ctx.data_file_json()["logs"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_log_keeps_latest_two_hundred() {
    let ctx = TestContext::new().await;
    ctx.funded_user(PLAYER, 0).await;

    // Two entries from funding, then 205 spins.
    for _ in 0..205 {
        ctx.post("/spin-roulette", &json!({ "email": PLAYER })).await;
    }

    let logs = ctx.data_file_json()["logs"].clone();
    let logs = logs.as_array().unwrap();
    assert_eq!(logs.len(), 200);
    assert!(logs.iter().all(|e| e["type"] == "ROULETTE"));
}
