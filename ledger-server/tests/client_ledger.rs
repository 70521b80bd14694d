mod common;

use common::{TestApp, code_of, id_of};
use http::StatusCode;
use serde_json::{Value, json};

async fn create_client(app: &TestApp, store: i64) -> i64 {
    let (status, body) = app
        .post(
            "/api/clients",
            json!({ "storeId": store, "name": "Dona Cida", "phone": "11 95555-1234" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    id_of(&body)
}

async fn record(app: &TestApp, client: i64, value: Value, ty: &str) -> (StatusCode, Value) {
    app.post(
        &format!("/api/clients/{client}/ledger"),
        json!({ "value": value, "type": ty }),
    )
    .await
}

#[tokio::test]
async fn deve_with_open_register_mirrors_a_fiado_transaction() {
    let app = TestApp::new().await;
    let store = app.create_store().await;
    let reg = app.open_register(store, "0").await;
    let client = create_client(&app, store).await;

    let (status, entry) = record(&app, client, json!(25), "deve").await;
    assert_eq!(status, StatusCode::CREATED, "{entry}");
    assert_eq!(entry["value"], "25.00");
    assert_eq!(entry["type"], "deve");
    assert_eq!(entry["warnings"], json!([]));
    let txn_id = entry["cashTransactionId"].as_i64().unwrap();

    let (_, txns) = app
        .get(&format!("/api/registers/{reg}/transactions"))
        .await;
    assert_eq!(txns.as_array().unwrap().len(), 1);
    assert_eq!(txns[0]["id"], txn_id);
    assert_eq!(txns[0]["type"], "fiado_pending");
    assert_eq!(txns[0]["paymentMethod"], "fiado");
    assert_eq!(txns[0]["amount"], "25.00");
    assert_eq!(txns[0]["description"], "Cliente: Dona Cida");
}

#[tokio::test]
async fn deve_without_open_register_only_records_the_entry() {
    let app = TestApp::new().await;
    let store = app.create_store().await;
    let client = create_client(&app, store).await;

    let (status, entry) = record(&app, client, json!("25"), "deve").await;
    assert_eq!(status, StatusCode::CREATED, "{entry}");
    assert!(entry["cashTransactionId"].is_null());
    assert_eq!(entry["warnings"], json!([]));

    let (_, ledger) = app.get(&format!("/api/clients/{client}/ledger")).await;
    assert_eq!(ledger.as_array().unwrap().len(), 1);
    let (_, registers) = app.get(&format!("/api/registers?storeId={store}")).await;
    assert_eq!(registers, json!([]));
}

#[tokio::test]
async fn pago_counts_as_income_without_breakdown_entry() {
    let app = TestApp::new().await;
    let store = app.create_store().await;
    let reg = app.open_register(store, "50").await;
    let client = create_client(&app, store).await;

    record(&app, client, json!("30.00"), "pago").await;

    let (_, closed) = app
        .patch(&format!("/api/registers/{reg}/close"), None)
        .await;
    assert_eq!(closed["totalIncoming"], "30.00");
    assert_eq!(closed["closingAmount"], "80.00");

    let (_, detail) = app.get(&format!("/api/registers/{reg}")).await;
    assert_eq!(detail["breakdown"], json!([]));
    assert_eq!(detail["transactions"][0]["paymentMethod"], "fiado_payment");
}

#[tokio::test]
async fn summary_nets_payments_against_debt() {
    let app = TestApp::new().await;
    let store = app.create_store().await;
    let client = create_client(&app, store).await;

    record(&app, client, json!("40.10"), "deve").await;
    record(&app, client, json!(0.1), "deve").await;
    record(&app, client, json!("15.20"), "pago").await;

    let (status, summary) = app.get(&format!("/api/clients/{client}/summary")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        summary,
        json!({ "income": "15.20", "outcome": "40.20", "total": "-25.00" })
    );
}

#[tokio::test]
async fn deleting_an_entry_keeps_the_cash_transaction() {
    let app = TestApp::new().await;
    let store = app.create_store().await;
    let reg = app.open_register(store, "0").await;
    let client = create_client(&app, store).await;
    let (_, entry) = record(&app, client, json!("9.99"), "pago").await;
    let value_id = id_of(&entry);

    let (status, _) = app
        .delete(&format!("/api/clients/{client}/ledger/{value_id}"))
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, body) = app
        .delete(&format!("/api/clients/{client}/ledger/{value_id}"))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(code_of(&body), 6002);

    let (_, txns) = app
        .get(&format!("/api/registers/{reg}/transactions"))
        .await;
    assert_eq!(txns.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn bridge_failure_is_a_warning_and_an_audit_entry() {
    let app = TestApp::new().await;
    let store = app.create_store().await;
    app.open_register(store, "0").await;
    let client = create_client(&app, store).await;

    sqlx::query(
        "CREATE TRIGGER reject_txn BEFORE INSERT ON cash_transactions \
         BEGIN SELECT RAISE(ABORT, 'disk full'); END",
    )
    .execute(app.state.pool())
    .await
    .unwrap();

    let (status, entry) = record(&app, client, json!("25"), "deve").await;
    assert_eq!(status, StatusCode::CREATED, "{entry}");
    assert!(entry["cashTransactionId"].is_null());
    assert_eq!(entry["warnings"].as_array().unwrap().len(), 1);

    let (_, ledger) = app.get(&format!("/api/clients/{client}/ledger")).await;
    assert_eq!(ledger[0]["id"], entry["id"]);

    let (_, audit) = app.get(&format!("/api/audit?storeId={store}")).await;
    let failure = audit
        .as_array()
        .unwrap()
        .iter()
        .find(|e| e["action"] == "credit_bridge_failed")
        .expect("bridge failure audited");
    assert_eq!(failure["resourceId"], entry["id"]);
    assert_eq!(failure["details"]["clientName"], "Dona Cida");
    assert_eq!(failure["details"]["transactionType"], "fiado_pending");
}

#[tokio::test]
async fn client_validation_and_updates() {
    let app = TestApp::new().await;
    let store = app.create_store().await;
    let client = create_client(&app, store).await;

    let (status, _) = app
        .post(
            "/api/clients",
            json!({ "storeId": store, "name": "", "phone": "1" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, updated) = app
        .patch(
            &format!("/api/clients/{client}"),
            Some(json!({ "phone": " 11 94444-0000 " })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{updated}");
    assert_eq!(updated["phone"], "11 94444-0000");
    assert_eq!(updated["name"], "Dona Cida");

    let (status, body) = record(&app, client, json!("-5"), "pago").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(code_of(&body), 5002);

    let (status, body) = app.get(&format!("/api/clients/{}", client + 1)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(code_of(&body), 6001);

    let (_, list) = app.get(&format!("/api/clients?storeId={store}")).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}
