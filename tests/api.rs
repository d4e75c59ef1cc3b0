use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use roundup_savings::{build_router, AppState, EngineConfig, SavingsService};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

const BASE: &str = "/blackrock/challenge/v1";

fn app() -> Router {
    let service = SavingsService::new(EngineConfig::default()).expect("default config is valid");
    build_router(AppState::new(Arc::new(service)))
}

fn expenses() -> Value {
    json!([
        {"timestamp": "2023-10-12 20:15:00", "amount": 250},
        {"timestamp": "2023-02-28 15:49:00", "amount": 375},
        {"timestamp": "2023-07-01 21:59:00", "amount": 620},
        {"timestamp": "2023-12-17 08:09:00", "amount": 480}
    ])
}

fn q_periods() -> Value {
    json!([{"fixed": 0, "start": "2023-07-01 00:00:00", "end": "2023-07-31 23:59:00"}])
}

fn p_periods() -> Value {
    json!([{"extra": 25, "start": "2023-10-01 08:00:00", "end": "2023-12-31 19:59:00"}])
}

fn k_periods() -> Value {
    json!([
        {"start": "2023-03-01 00:00:00", "end": "2023-11-30 23:59:00"},
        {"start": "2023-01-01 00:00:00", "end": "2023-12-31 23:59:00"}
    ])
}

async fn send(method: Method, path: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(path);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn post(path: &str, body: Value) -> (StatusCode, Value) {
    send(Method::POST, &format!("{BASE}{path}"), Some(body)).await
}

async fn parsed_transactions() -> Value {
    let (status, body) = post("/transactions:parse", json!({"expenses": expenses()})).await;
    assert_eq!(status, StatusCode::OK);
    body
}

fn sum(items: &Value, field: &str) -> f64 {
    items
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item[field].as_f64().unwrap())
        .sum()
}

#[tokio::test]
async fn parse_rounds_reference_fixture() {
    let data = parsed_transactions().await;
    assert_eq!(data.as_array().unwrap().len(), 4);
    assert_eq!(sum(&data, "remanent"), 175.0);
    assert_eq!(sum(&data, "amount"), 1725.0);
    assert_eq!(
        data[0],
        json!({"date": "2023-10-12 20:15:00", "amount": 250, "ceiling": 300, "remanent": 50})
    );
}

#[tokio::test]
async fn parse_accepts_bare_array_and_date_alias() {
    let (status, data) = post("/transactions:parse", expenses()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(data.as_array().unwrap().len(), 4);

    let (status, data) = post(
        "/transactions:parse",
        json!({"expenses": [{"date": "2023-01-15 12:00:00", "amount": 199}]}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(data[0]["ceiling"], 200);
    assert_eq!(data[0]["remanent"], 1);
}

#[tokio::test]
async fn parse_empty_and_malformed_payloads() {
    let (status, data) = post("/transactions:parse", json!({"expenses": []})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(data, json!([]));

    let (status, _) = post("/transactions:parse", json!({"expenses": "not-a-list"})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let (status, _) = post("/transactions:parse", json!({})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn parse_rejects_negative_amount() {
    let (status, body) = post(
        "/transactions:parse",
        json!([{"timestamp": "2023-01-15 12:00:00", "amount": -5}]),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].as_str().unwrap().contains("negative"));
}

#[tokio::test]
async fn parse_rejects_out_of_range_amounts() {
    for amount in [json!("1e300000000"), json!("1e-300000000"), json!(1e300)] {
        let (status, _) = post(
            "/transactions:parse",
            json!([{"timestamp": "2023-01-15 12:00:00", "amount": amount}]),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{amount}");
    }
}

#[tokio::test]
async fn parse_output_with_long_fraction_passes_validator() {
    let (status, transactions) = post(
        "/transactions:parse",
        json!([{"timestamp": "2023-01-15 12:00:00", "amount": 0.12345678901234568}]),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, data) = post(
        "/transactions:validator",
        json!({"wage": 50_000, "transactions": transactions}),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{data}");
    assert_eq!(data["valid"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn validator_accepts_unique_transactions() {
    let transactions = parsed_transactions().await;
    let (status, data) = post(
        "/transactions:validator",
        json!({"wage": 50_000, "transactions": transactions}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(data["valid"].as_array().unwrap().len(), 4);
    assert_eq!(data["invalid"], json!([]));

    let (status, data) = post("/transactions:validator", json!({"wage": 1000, "transactions": []})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(data, json!({"valid": [], "invalid": []}));
}

#[tokio::test]
async fn validator_reports_duplicates_and_cap() {
    let transactions = parsed_transactions().await;
    let mut duplicated = transactions.as_array().unwrap().clone();
    duplicated.push(duplicated[0].clone());

    let (status, data) = post(
        "/transactions:validator",
        json!({"wage": 50_000, "transactions": duplicated}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(data["valid"].as_array().unwrap().len(), 4);
    assert_eq!(data["invalid"].as_array().unwrap().len(), 1);
    let message = data["invalid"][0]["message"].as_str().unwrap();
    assert!(message.to_lowercase().contains("duplicate"));

    let (status, data) = post(
        "/transactions:validator",
        json!({"wage": 50_000, "transactions": transactions, "maxInvest": 10}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(data["invalid"]
        .as_array()
        .unwrap()
        .iter()
        .any(|inv| inv["message"].as_str().unwrap().contains("exceeds maximum")));
}

#[tokio::test]
async fn validator_requires_transactions() {
    let (status, _) = post("/transactions:validator", json!({"wage": 1000})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn filter_reference_buckets() {
    let transactions = parsed_transactions().await;
    let (status, data) = post(
        "/transactions:filter",
        json!({"q": q_periods(), "p": p_periods(), "k": k_periods(), "transactions": transactions}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(data["savingsByDates"].as_array().unwrap().len(), 2);
    assert_eq!(data["savingsByDates"][0]["amount"], 75);
    assert_eq!(data["savingsByDates"][1]["amount"], 145);
    for tx in data["valid"].as_array().unwrap() {
        assert_eq!(tx["inKPeriod"], true);
        assert!(tx.get("remanent").is_some());
    }
    assert_eq!(data["savingsByDates"][0]["start"], "2023-03-01 00:00:00");
}

#[tokio::test]
async fn filter_without_k_periods_has_no_buckets() {
    let transactions = parsed_transactions().await;
    let (status, data) = post(
        "/transactions:filter",
        json!({"q": [], "p": [], "k": [], "transactions": transactions}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(data["savingsByDates"], json!([]));
}

#[tokio::test]
async fn filter_flags_duplicates() {
    let transactions = parsed_transactions().await;
    let mut duplicated = transactions.as_array().unwrap().clone();
    duplicated.push(duplicated[0].clone());

    let (status, data) = post(
        "/transactions:filter",
        json!({"q": [], "p": [], "k": k_periods(), "transactions": duplicated}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(data["invalid"]
        .as_array()
        .unwrap()
        .iter()
        .any(|inv| inv["message"].as_str().unwrap().contains("Duplicate")));
}

#[tokio::test]
async fn filter_rejects_inverted_period() {
    let transactions = parsed_transactions().await;
    let (status, body) = post(
        "/transactions:filter",
        json!({
            "q": [],
            "p": [],
            "k": [{"start": "2023-12-31 00:00:00", "end": "2023-01-01 00:00:00"}],
            "transactions": transactions
        }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].as_str().unwrap().contains("before start"));
}

#[tokio::test]
async fn returns_nps_reference_scenario() {
    let transactions = parsed_transactions().await;
    let (status, data) = post(
        "/returns:nps",
        json!({
            "age": 29, "wage": 50_000, "inflation": 0.055,
            "q": q_periods(), "p": p_periods(), "k": k_periods(),
            "transactions": transactions
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(data["transactionsTotalAmount"], 1725);
    assert_eq!(data["transactionsTotalCeiling"], 1900);
    let year = &data["savingsByDates"][1];
    assert_eq!(year["amount"], 145);
    assert!((year["profits"].as_f64().unwrap() - 86.88).abs() < 2.0);
    assert_eq!(year["taxBenefit"], 0);
}

#[tokio::test]
async fn returns_nps_accepts_percentage_inflation() {
    let transactions = parsed_transactions().await;
    let (status, data) = post(
        "/returns:nps",
        json!({
            "age": 29, "wage": 50_000, "inflation": 5.5,
            "q": q_periods(), "p": p_periods(), "k": k_periods(),
            "transactions": transactions
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    for item in data["savingsByDates"].as_array().unwrap() {
        for field in ["start", "end", "amount", "profits", "taxBenefit"] {
            assert!(item.get(field).is_some(), "missing {field}");
        }
    }
}

#[tokio::test]
async fn returns_index_reference_scenario() {
    let transactions = parsed_transactions().await;
    let (status, data) = post(
        "/returns:index",
        json!({
            "age": 29, "wage": 50_000, "inflation": 0.055,
            "q": q_periods(), "p": p_periods(), "k": k_periods(),
            "transactions": transactions
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let year = &data["savingsByDates"][1];
    assert_eq!(year["amount"], 145);
    assert!((year["profits"].as_f64().unwrap() - (1829.5 - 145.0)).abs() < 30.0);

    let (status, data) = post(
        "/returns:index",
        json!({
            "age": 60, "wage": 50_000, "inflation": 5.5,
            "q": [], "p": [], "k": k_periods(),
            "transactions": parsed_transactions().await
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(data["savingsByDates"][0]["profits"].is_number());
}

#[tokio::test]
async fn returns_require_transactions() {
    let (status, _) = post("/returns:nps", json!({"age": 29, "wage": 50_000})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn performance_reports_process_stats() {
    let (status, data) = send(Method::GET, &format!("{BASE}/performance"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(data["time"].is_string());
    assert!(data["memory"].as_str().unwrap().contains("MB"));
    assert!(data["threads"].is_u64());
}

#[tokio::test]
async fn health_is_ok() {
    let (status, data) = send(Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(data, json!({"status": "ok"}));
}

#[tokio::test]
async fn wrong_method_and_unknown_path() {
    let (status, _) = send(Method::POST, &format!("{BASE}/performance"), Some(json!({}))).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

    for path in [
        "/transactions:parse",
        "/transactions:validator",
        "/transactions:filter",
        "/returns:nps",
        "/returns:index",
    ] {
        let (status, _) = send(Method::GET, &format!("{BASE}{path}"), None).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "GET {path}");
    }

    let (status, _) = send(Method::GET, &format!("{BASE}/nonexistent"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
