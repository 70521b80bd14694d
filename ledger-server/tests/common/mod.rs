//! In-process test harness: the real router over an in-memory database

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use ledger_server::db::DbService;
use ledger_server::{Config, ServerState, api};
use serde_json::{Value, json};
use tower::ServiceExt;

pub const OWNER: &str = "user-owner";
pub const STRANGER: &str = "user-stranger";

pub struct TestApp {
    pub state: ServerState,
    router: Router,
}

impl TestApp {
    pub async fn new() -> Self {
        let db = DbService::in_memory().await.expect("in-memory database");
        let state = ServerState::with_db(Config::in_memory(), db);
        let router = api::build_router(state.clone());
        Self { state, router }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        user: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(user) = user {
            builder = builder.header("x-user-id", user);
        }
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");

        let response = self.router.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, Some(OWNER), None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(OWNER), Some(body)).await
    }

    pub async fn patch(&self, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        self.request(Method::PATCH, uri, Some(OWNER), body).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, Some(OWNER), None).await
    }

    /// Store owned by [`OWNER`]; returns its id
    pub async fn create_store(&self) -> i64 {
        let (status, body) = self.post("/api/stores", json!({ "name": "Mercadinho" })).await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        id_of(&body)
    }

    /// Open a register; returns its id
    pub async fn open_register(&self, store_id: i64, opening_amount: &str) -> i64 {
        let (status, body) = self
            .post(
                "/api/registers",
                json!({ "storeId": store_id, "openingAmount": opening_amount }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        id_of(&body)
    }

    pub async fn attach(
        &self,
        register_id: i64,
        amount: &str,
        ty: &str,
        method: &str,
    ) -> (StatusCode, Value) {
        self.post(
            &format!("/api/registers/{register_id}/transactions"),
            json!({ "amount": amount, "type": ty, "paymentMethod": method }),
        )
        .await
    }
}

pub fn id_of(body: &Value) -> i64 {
    body["id"].as_i64().expect("id in body")
}

/// Error code of an `ApiResponse` error body
pub fn code_of(body: &Value) -> u64 {
    body["code"].as_u64().expect("code in body")
}
