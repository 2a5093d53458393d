//! Support report flows over HTTP.

#![allow(clippy::unwrap_used)]

use coinhall_integration_tests::TestContext;
use serde_json::json;

#[tokio::test]
async fn test_my_reports_filters_and_orders_newest_first() {
    let ctx = TestContext::new().await;

    for (email, message) in [
        ("x@coinhall.test", "first from x"),
        ("y@coinhall.test", "from y"),
        ("x@coinhall.test", "second from x"),
    ] {
        let reply = ctx
            .post("/send-report", &json!({ "email": email, "message": message }))
            .await;
        assert_eq!(reply, json!({ "success": true }));
    }

    let reply = ctx
        .post("/my-reports", &json!({ "email": "x@coinhall.test" }))
        .await;
    let questions: Vec<_> = reply["reports"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["question"].as_str().unwrap().to_string())
        .collect();

    assert_eq!(questions, ["second from x", "first from x"]);
}

#[tokio::test]
async fn test_send_report_requires_fields() {
    let ctx = TestContext::new().await;

    let no_message = ctx
        .post("/send-report", &json!({ "email": "x@coinhall.test" }))
        .await;
    let no_email = ctx.post("/send-report", &json!({ "message": "help" })).await;

    assert_eq!(no_message, json!({ "success": false }));
    assert_eq!(no_email, json!({ "success": false }));
    assert!(!ctx.data_file.exists());
}

#[tokio::test]
async fn test_reply_is_visible_to_sender() {
    let ctx = TestContext::new().await;
    ctx.post(
        "/send-report",
        &json!({ "email": "x@coinhall.test", "message": "Lost my sword" }),
    )
    .await;
    let id = ctx.data_file_json()["reports"][0]["id"].clone();

    let reply = ctx
        .post("/admin/reply-report", &json!({ "id": id, "answer": "Restored" }))
        .await;
    assert_eq!(reply, json!({ "success": true }));

    let mine = ctx
        .post("/my-reports", &json!({ "email": "x@coinhall.test" }))
        .await;
    assert_eq!(mine["reports"][0]["answer"], "Restored");

    let logs = ctx.data_file_json()["logs"].clone();
    assert_eq!(logs[0]["type"], "SUPPORT");
    assert_eq!(logs[0]["email"], "admin");
}

#[tokio::test]
async fn test_reply_accepts_string_id() {
    let ctx = TestContext::new().await;
    ctx.post(
        "/send-report",
        &json!({ "email": "x@coinhall.test", "message": "Hello?" }),
    )
    .await;

    let reply = ctx
        .post("/admin/reply-report", &json!({ "id": "1", "answer": "Hi" }))
        .await;

    assert_eq!(reply, json!({ "success": true }));
}

#[tokio::test]
async fn test_reply_unknown_report() {
    let ctx = TestContext::new().await;

    let reply = ctx
        .post("/admin/reply-report", &json!({ "id": 999, "answer": "Hi" }))
        .await;

    assert_eq!(reply["success"], false);
}

#[tokio::test]
async fn test_my_reports_without_email_is_empty() {
    let ctx = TestContext::new().await;
    ctx.post(
        "/send-report",
        &json!({ "email": "x@coinhall.test", "message": "Hello?" }),
    )
    .await;

    let reply = ctx.post("/my-reports", &json!({})).await;

    assert_eq!(reply, json!({ "reports": [] }));
}
