//! HTTP-level tests for the sales endpoints against a seeded SQLite store

use async_trait::async_trait;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use chrono::NaiveDate;
use salescope_api_types::{FilterOptions, QueryBuilderRequest, QueryBuilderResponse, Sale, SalesStats};
use salescope_config::QueryConfig;
use salescope_interfaces::{DatabaseError, Repository, SaleRepository};
use salescope_rest_api::{create_rest_app, AppConfig, SalesContext};
use salescope_storage::testing::{factories, SaleBuilder, TestDatabase};
use serde_json::{json, Value};
use std::sync::Arc;

async fn create_test_server(sales: Vec<Sale>) -> (TestServer, TestDatabase) {
    let db = TestDatabase::new().await.unwrap();
    db.seed_sales(sales).await.unwrap();

    let context = SalesContext::new(Arc::new(db.repository()), QueryConfig::default());
    let server = TestServer::new(create_rest_app(context, AppConfig::default())).unwrap();
    (server, db)
}

fn dated(id: &str, date: (i32, u32, u32)) -> Sale {
    SaleBuilder::new()
        .with_id(id)
        .with_date(NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap())
        .build()
}

#[tokio::test]
async fn test_default_page_of_thousand_records() {
    let (server, _db) = create_test_server(factories::generated_sales(1000)).await;

    let response = server.post("/api/sales").json(&json!({})).await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 10);
    assert_eq!(body["totalElements"], 1000);
    assert_eq!(body["totalPages"], 100);
    assert_eq!(body["currentPage"], 0);
    assert_eq!(body["sortBy"], "date");
    assert_eq!(body["sortDir"], "desc");
}

#[tokio::test]
async fn test_page_size_capped_at_hundred() {
    let (server, _db) = create_test_server(factories::generated_sales(150)).await;

    let body: Value = server
        .post("/api/sales")
        .json(&json!({ "pageSize": 500 }))
        .await
        .json();
    assert_eq!(body["pageSize"], 100);
    assert_eq!(body["data"].as_array().unwrap().len(), 100);
    assert_eq!(body["totalPages"], 2);
}

#[tokio::test]
async fn test_huge_page_number_returns_empty_page() {
    let (server, _db) = create_test_server(factories::generated_sales(5)).await;

    let response = server
        .post("/api/sales")
        .json(&json!({ "currentPage": i64::MAX / 2, "pageSize": 10 }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["data"], json!([]));
    assert_eq!(body["totalElements"], 5);
    assert_eq!(body["totalPages"], 1);
    assert_eq!(body["currentPage"], i64::MAX / 2);
}

#[tokio::test]
async fn test_sorted_by_date_desc_by_default() {
    let sales = vec![
        dated("A", (2023, 1, 5)),
        dated("B", (2023, 3, 1)),
        dated("C", (2022, 12, 31)),
    ];
    let (server, _db) = create_test_server(sales).await;

    let body: Value = server.post("/api/sales").json(&json!({})).await.json();
    let ids: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|sale| sale["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["B", "A", "C"]);
}

#[tokio::test]
async fn test_search_is_case_insensitive() {
    let sales = vec![
        SaleBuilder::new().with_id("1").with_customer_name("Neha Kumar").build(),
        SaleBuilder::new().with_id("2").with_customer_name("Arjun Mehta").build(),
        SaleBuilder::new().with_id("3").with_customer_name("KUMARI Das").build(),
    ];
    let (server, _db) = create_test_server(sales).await;

    let lower: Value = server
        .post("/api/sales")
        .json(&json!({ "searchPhrase": "kumar" }))
        .await
        .json();
    let upper: Value = server
        .post("/api/sales")
        .json(&json!({ "searchPhrase": "KUMAR" }))
        .await
        .json();

    assert_eq!(lower["totalElements"], 2);
    assert_eq!(lower["totalElements"], upper["totalElements"]);
    assert_eq!(lower["searchOn"], json!(["customerName", "phoneNumber"]));
}

#[tokio::test]
async fn test_ui_filters_and_stats_agree() {
    let (server, _db) = create_test_server(factories::generated_sales(200)).await;
    let filters = json!({ "customerRegion": ["North"], "gender": "Female", "tags": ["organic"] });

    let page: Value = server
        .post("/api/sales")
        .json(&json!({ "filters": filters, "pageSize": 100 }))
        .await
        .json();
    let total = page["totalElements"].as_u64().unwrap();
    assert!(total > 0);
    for sale in page["data"].as_array().unwrap() {
        assert_eq!(sale["customerRegion"], "North");
        assert_eq!(sale["gender"], "Female");
        assert!(sale["tags"].as_array().unwrap().contains(&json!("organic")));
    }

    let stats: SalesStats = server
        .post("/api/sales/stats")
        .json(&json!({ "filters": filters }))
        .await
        .json();
    assert_eq!(stats.total_sales_records, total);
    assert!((stats.total_discount - (stats.total_amount - stats.total_revenue)).abs() < 1e-6);
}

#[tokio::test]
async fn test_raw_filter_list() {
    let (server, _db) = create_test_server(factories::generated_sales(100)).await;

    let body: Value = server
        .post("/api/sales")
        .json(&json!({
            "filters": [{ "field": "age", "operation": "BETWEEN", "value": [20, 25] }],
            "pageSize": 100
        }))
        .await
        .json();
    for sale in body["data"].as_array().unwrap() {
        let age = sale["age"].as_i64().unwrap();
        assert!((20..=25).contains(&age));
    }
    assert_eq!(body["filters"][0]["operation"], "BETWEEN");
}

#[tokio::test]
async fn test_filter_options() {
    let (server, _db) = create_test_server(factories::generated_sales(50)).await;

    let response = server.get("/api/sales/filters").await;
    response.assert_status_ok();

    let options: FilterOptions = response.json();
    assert_eq!(options.customer_regions, vec!["Central", "East", "North", "South", "West"]);
    assert_eq!(options.genders, vec!["Female", "Male"]);
    assert_eq!(options.age_range.min, 18);
}

#[tokio::test]
async fn test_validation_errors() {
    let (server, _db) = create_test_server(vec![]).await;

    let response = server.post("/api/sales").json(&json!({ "sortBy": "password" })).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["field"], "password");

    let response = server
        .post("/api/sales")
        .json(&json!({ "filters": [{ "field": "age", "operation": "SOUNDS_LIKE", "value": 1 }] }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = server.post("/api/sales").text("{ not json").await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_route_and_method() {
    let (server, _db) = create_test_server(vec![]).await;

    let response = server.get("/api/nope").await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "NOT_FOUND");
    assert_eq!(body["error"]["message"], "Cannot GET /api/nope");

    server.get("/api/sales").await.assert_status(StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_health_endpoints() {
    let (server, _db) = create_test_server(vec![]).await;

    let body: Value = server.get("/health").await.json();
    assert_eq!(body["status"], "ok");
    assert!(body["timestamp"].is_string());

    let body: Value = server.get("/health/detailed").await.json();
    assert_eq!(body["checks"]["database"]["status"], "ok");

    server.get("/ready").await.assert_status_ok();
    server.get("/live").await.assert_status_ok();
}

#[tokio::test]
async fn test_request_id_echoed() {
    let (server, _db) = create_test_server(vec![]).await;

    let response = server
        .get("/health")
        .add_header(HeaderName::from_static("x-request-id"), HeaderValue::from_static("abc-123"))
        .await;
    assert_eq!(response.header("x-request-id"), "abc-123");
}

/// Store whose every call fails the way an unreachable database does
struct UnreachableStore {
    error: fn() -> DatabaseError,
}

#[async_trait]
impl Repository for UnreachableStore {
    async fn health_check(&self) -> Result<(), DatabaseError> {
        Err((self.error)())
    }
}

#[async_trait]
impl SaleRepository for UnreachableStore {
    async fn query_sales(&self, _request: &QueryBuilderRequest) -> Result<QueryBuilderResponse<Sale>, DatabaseError> {
        Err((self.error)())
    }

    async fn filter_options(&self) -> Result<FilterOptions, DatabaseError> {
        Err((self.error)())
    }

    async fn sales_stats(&self, _request: &QueryBuilderRequest) -> Result<SalesStats, DatabaseError> {
        Err((self.error)())
    }
}

fn server_over(error: fn() -> DatabaseError) -> TestServer {
    let context = SalesContext::new(Arc::new(UnreachableStore { error }), QueryConfig::default());
    TestServer::new(create_rest_app(context, AppConfig::default())).unwrap()
}

#[tokio::test]
async fn test_store_failures_are_not_leaked() {
    let server = server_over(|| DatabaseError::Internal {
        message: "no such table: sales".to_string(),
    });

    let response = server.post("/api/sales").json(&json!({})).await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
    assert!(!body["error"]["message"].as_str().unwrap().contains("no such table"));

    let server = server_over(|| DatabaseError::Connection {
        message: "pool timed out".to_string(),
    });
    server.get("/api/sales/filters").await.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    server.get("/ready").await.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    let body: Value = server.get("/health/detailed").await.json();
    assert_eq!(body["status"], "unhealthy");
}
