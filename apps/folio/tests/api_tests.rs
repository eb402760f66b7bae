//! Integration tests for the Folio HTTP API.
//!
//! Uses axum-test to test the API handlers without starting a real server.

// Allow unwrap and panic in tests - these are standard for test code
// Allow holding MutexGuard across await - tests are serialized
// intentionally to avoid env var conflicts
#![allow(clippy::unwrap_used, clippy::panic, clippy::await_holding_lock)]

use axum::http::{HeaderValue, StatusCode, header};
use axum_test::TestServer;
use folio::api::{
    AppState, ContactResponse, ErrorResponse, HashResponse, HealthResponse, ProjectsResponse,
    TableResponse, create_router,
};
use folio_core::{Catalogue, SortDirection, primitives::MAX_FACET_SELECTIONS};
use serde_json::{Value, json};
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Mutex to serialize tests since router creation reads env vars.
static ENV_TEST_MUTEX: Mutex<()> = Mutex::new(());

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Guard wrapper that holds the mutex and ensures cleanup on drop.
struct TestGuard {
    _guard: std::sync::MutexGuard<'static, ()>,
}

impl Drop for TestGuard {
    fn drop(&mut self) {
        // SAFETY: Tests run sequentially under ENV_TEST_MUTEX, so no concurrent env access.
        unsafe { std::env::remove_var("FOLIO_RATE_LIMIT") };
    }
}

fn lock_env() -> TestGuard {
    let guard = ENV_TEST_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    // SAFETY: Tests run sequentially under ENV_TEST_MUTEX, so no concurrent env access.
    unsafe {
        std::env::remove_var("FOLIO_RATE_LIMIT");
        std::env::remove_var("FOLIO_CORS_ORIGINS");
    }
    TestGuard { _guard: guard }
}

/// Create a test server over the built-in catalogue.
/// Returns a guard that must be kept alive during the test.
fn create_test_server() -> (TestServer, TestGuard) {
    create_server_with(AppState::new(Catalogue::builtin()).unwrap())
}

fn create_server_with(state: AppState) -> (TestServer, TestGuard) {
    let guard = lock_env();
    let router = create_router(state);
    (TestServer::new(router).unwrap(), guard)
}

fn ids(values: &[Value]) -> Vec<u64> {
    values.iter().map(|p| p["id"].as_u64().unwrap()).collect()
}

// =============================================================================
// HEALTH ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let (server, _guard) = create_test_server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    let health: HealthResponse = response.json();
    assert_eq!(health.status, "ok");
    assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
}

// =============================================================================
// CATALOGUE ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_catalogue_etag_matches_hash() {
    let (server, _guard) = create_test_server();

    let hash: HashResponse = server.get("/api/hash").await.json();
    assert_eq!(hash.algorithm, "blake3");
    assert_eq!(hash.hash.len(), 64);

    let response = server.get("/api/catalogue").await;
    response.assert_status_ok();
    let etag = response.header(header::ETAG);
    assert_eq!(etag.to_str().unwrap(), format!("\"{}\"", hash.hash));

    let body: Value = response.json();
    assert_eq!(body["profile"]["name"], "Jordan Avery");
    assert_eq!(body["projects"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_catalogue_not_modified() {
    let (server, _guard) = create_test_server();

    let etag = server.get("/api/catalogue").await.header(header::ETAG);

    let response = server
        .get("/api/catalogue")
        .add_header(header::IF_NONE_MATCH, etag)
        .await;

    response.assert_status(StatusCode::NOT_MODIFIED);
}

#[tokio::test]
async fn test_catalogue_stale_etag_returns_body() {
    let (server, _guard) = create_test_server();

    let response = server
        .get("/api/catalogue")
        .add_header(header::IF_NONE_MATCH, HeaderValue::from_static("\"stale\""))
        .await;

    response.assert_status_ok();
}

#[tokio::test]
async fn test_profile_and_collections() {
    let (server, _guard) = create_test_server();

    let profile: Value = server.get("/api/profile").await.json();
    assert_eq!(profile["name"], "Jordan Avery");

    let certifications: Vec<Value> = server.get("/api/certifications").await.json();
    assert_eq!(certifications.len(), 4);
    assert_eq!(certifications[1]["status"], "in_progress");

    let skills: Vec<Value> = server.get("/api/skills").await.json();
    assert_eq!(skills.len(), 4);
}

#[tokio::test]
async fn test_experience_is_most_recent_first() {
    let (server, _guard) = create_test_server();

    let timeline: Vec<Value> = server.get("/api/experience").await.json();
    assert_eq!(ids(&timeline), vec![3, 2, 1]);
    assert!(timeline[0]["end"].is_null());
}

#[tokio::test]
async fn test_facets() {
    let (server, _guard) = create_test_server();

    let facets: Value = server.get("/api/facets").await.json();
    assert_eq!(facets["skills"]["Portfolio Optimization"], 2);
    assert_eq!(facets["tools"]["Excel"], 4);
    assert_eq!(facets["industries"]["Asset Management"], 2);
}

// =============================================================================
// PROJECT ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_projects_unfiltered() {
    let (server, _guard) = create_test_server();

    let response = server.get("/api/projects").await;

    response.assert_status_ok();
    let result: ProjectsResponse = response.json();
    assert_eq!(result.count, 5);
    let ids: Vec<u64> = result.projects.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn test_projects_skill_filter() {
    let (server, _guard) = create_test_server();

    let result: ProjectsResponse = server
        .get("/api/projects")
        .add_query_param("skills", "Portfolio Optimization")
        .await
        .json();

    let titles: Vec<&str> = result.projects.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["Fixed Income Portfolio Analysis", "Portfolio Optimization"]
    );
}

#[tokio::test]
async fn test_projects_or_within_and_across() {
    let (server, _guard) = create_test_server();

    // OR within skills: LBO Modeling or Market Sizing
    let either: ProjectsResponse = server
        .get("/api/projects")
        .add_query_param("skills", "LBO Modeling, Market Sizing")
        .await
        .json();
    assert_eq!(either.count, 2);

    // AND across dimensions
    let both: ProjectsResponse = server
        .get("/api/projects")
        .add_query_param("skills", "Excel")
        .add_query_param("industry", "Retail")
        .await
        .json();
    let ids: Vec<u64> = both.projects.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1]);
}

#[tokio::test]
async fn test_projects_empty_result_is_ok() {
    let (server, _guard) = create_test_server();

    let response = server
        .get("/api/projects")
        .add_query_param("industry", "Aerospace")
        .await;

    response.assert_status_ok();
    let result: ProjectsResponse = response.json();
    assert_eq!(result.count, 0);
    assert!(result.projects.is_empty());
}

#[tokio::test]
async fn test_projects_oversized_value_rejected() {
    let (server, _guard) = create_test_server();

    let response = server
        .get("/api/projects")
        .add_query_param("tools", "x".repeat(500))
        .await;

    response.assert_status_bad_request();
    let error: ErrorResponse = response.json();
    assert!(!error.success);
}

#[tokio::test]
async fn test_projects_repeated_skill_keeps_commas() {
    let mut data = Catalogue::builtin().data().clone();
    data.projects[0].skills.insert("Mergers, Acquisitions".to_string());
    let catalogue = Catalogue::from_data(data).unwrap();
    let (server, _guard) = create_server_with(AppState::new(catalogue).unwrap());

    let whole: ProjectsResponse = server
        .get("/api/projects")
        .add_query_param("skill", "Mergers, Acquisitions")
        .await
        .json();
    let ids: Vec<u64> = whole.projects.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1]);

    // The list form splits on the comma and matches neither half
    let split: ProjectsResponse = server
        .get("/api/projects")
        .add_query_param("skills", "Mergers, Acquisitions")
        .await
        .json();
    assert_eq!(split.count, 0);
}

#[tokio::test]
async fn test_projects_repeated_and_list_params_combine() {
    let (server, _guard) = create_test_server();

    let result: ProjectsResponse = server
        .get("/api/projects")
        .add_query_param("skill", "LBO Modeling")
        .add_query_param("skills", "Market Sizing")
        .await
        .json();
    assert_eq!(result.count, 2);
}

#[tokio::test]
async fn test_project_detail() {
    let (server, _guard) = create_test_server();

    let response = server.get("/api/projects/3").await;

    response.assert_status_ok();
    let project: Value = response.json();
    assert_eq!(project["title"], "Portfolio Optimization");
    assert_eq!(project["charts"][0]["kind"], "pie");
}

#[tokio::test]
async fn test_project_not_found() {
    let (server, _guard) = create_test_server();

    let response = server.get("/api/projects/42").await;

    response.assert_status_not_found();
    let error: ErrorResponse = response.json();
    assert!(!error.success);
    assert!(error.error.contains("42"));
}

#[tokio::test]
async fn test_project_id_must_be_numeric() {
    let (server, _guard) = create_test_server();

    let response = server.get("/api/projects/abc").await;
    assert!(response.status_code().is_client_error());
}

// =============================================================================
// TABLE ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_table_authored_order_without_sort() {
    let (server, _guard) = create_test_server();

    let table: TableResponse = server.get("/api/projects/1/tables/cash-flow").await.json();

    assert_eq!(table.sort.column(), None);
    let years: Vec<String> = table
        .rows
        .iter()
        .map(|r| r.get("Year").unwrap().render())
        .collect();
    assert_eq!(
        years,
        vec!["2024E", "2025E", "2026E", "2027E", "2028E", "Terminal"]
    );
}

#[tokio::test]
async fn test_table_sorted_ascending_mixed_column() {
    let (server, _guard) = create_test_server();

    let table: TableResponse = server
        .get("/api/projects/1/tables/cash-flow")
        .add_query_param("sort", "Revenue ($B)")
        .await
        .json();

    let years: Vec<String> = table
        .rows
        .iter()
        .map(|r| r.get("Year").unwrap().render())
        .collect();
    assert_eq!(
        years,
        vec!["Terminal", "2024E", "2025E", "2026E", "2027E", "2028E"]
    );
}

#[tokio::test]
async fn test_table_sorted_descending() {
    let (server, _guard) = create_test_server();

    let table: TableResponse = server
        .get("/api/projects/1/tables/cash-flow")
        .add_query_param("sort", "Revenue ($B)")
        .add_query_param("dir", "desc")
        .await
        .json();

    assert_eq!(table.sort.direction(), SortDirection::Desc);
    assert_eq!(table.rows[0].get("Year").unwrap().render(), "2028E");
    assert_eq!(table.rows[5].get("Year").unwrap().render(), "Terminal");
}

#[tokio::test]
async fn test_table_unknown_column_rejected() {
    let (server, _guard) = create_test_server();

    let response = server
        .get("/api/projects/1/tables/cash-flow")
        .add_query_param("sort", "Ticker")
        .await;

    response.assert_status_bad_request();
    let error: ErrorResponse = response.json();
    assert!(error.error.contains("Ticker"));
}

#[tokio::test]
async fn test_table_bad_direction_rejected() {
    let (server, _guard) = create_test_server();

    let response = server
        .get("/api/projects/1/tables/cash-flow")
        .add_query_param("sort", "Year")
        .add_query_param("dir", "sideways")
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_table_not_found() {
    let (server, _guard) = create_test_server();

    server
        .get("/api/projects/1/tables/holdings")
        .await
        .assert_status_not_found();
    server
        .get("/api/projects/9/tables/cash-flow")
        .await
        .assert_status_not_found();
}

// =============================================================================
// VIEW ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_view_initial_state() {
    let (server, _guard) = create_test_server();

    let response = server.post("/api/view").json(&json!({})).await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(ids(body["visible"].as_array().unwrap()), vec![1, 2, 3, 4, 5]);
    assert!(body["open"].is_null());
}

#[tokio::test]
async fn test_view_round_trip() {
    let (server, _guard) = create_test_server();

    let first: Value = server
        .post("/api/view")
        .json(&json!({
            "action": {"type": "toggle_skill", "value": "Portfolio Optimization"}
        }))
        .await
        .json();
    assert_eq!(ids(first["visible"].as_array().unwrap()), vec![2, 3]);

    let second: Value = server
        .post("/api/view")
        .json(&json!({
            "state": first["state"],
            "action": {"type": "open", "id": 3}
        }))
        .await
        .json();
    assert_eq!(second["open"]["project"]["id"], 3);
    assert_eq!(second["open"]["tables"][0]["slug"], "frontier");
    // Filters survive opening a project
    assert_eq!(ids(second["visible"].as_array().unwrap()), vec![2, 3]);

    let click = json!({"type": "sort_table", "table": "frontier", "column": "Sharpe Ratio"});
    let third: Value = server
        .post("/api/view")
        .json(&json!({"state": second["state"], "action": click}))
        .await
        .json();
    let rows = third["open"]["tables"][0]["rows"].as_array().unwrap();
    assert_eq!(rows[0]["Portfolio"], "Minimum variance");
    assert_eq!(third["open"]["tables"][0]["sort"]["direction"], "asc");

    let fourth: Value = server
        .post("/api/view")
        .json(&json!({"state": third["state"], "action": click}))
        .await
        .json();
    let rows = fourth["open"]["tables"][0]["rows"].as_array().unwrap();
    assert_eq!(rows[0]["Portfolio"], "Tangency");
}

#[tokio::test]
async fn test_view_close_returns_to_list() {
    let (server, _guard) = create_test_server();

    let opened: Value = server
        .post("/api/view")
        .json(&json!({"action": {"type": "open", "id": 1}}))
        .await
        .json();
    assert!(!opened["open"].is_null());

    let closed: Value = server
        .post("/api/view")
        .json(&json!({"state": opened["state"], "action": {"type": "close"}}))
        .await
        .json();
    assert!(closed["open"].is_null());
}

#[tokio::test]
async fn test_view_unknown_action_rejected() {
    let (server, _guard) = create_test_server();

    let response = server
        .post("/api/view")
        .json(&json!({"action": {"type": "explode"}}))
        .await;

    assert!(response.status_code().is_client_error());
}

#[tokio::test]
async fn test_view_oversized_state_rejected() {
    let (server, _guard) = create_test_server();

    let skills: Vec<String> = (0..=MAX_FACET_SELECTIONS).map(|i| format!("s{}", i)).collect();
    let response = server
        .post("/api/view")
        .json(&json!({"state": {"filters": {"selected_skills": skills}}}))
        .await;

    response.assert_status_bad_request();
    let error: ErrorResponse = response.json();
    assert!(!error.success);
}

#[tokio::test]
async fn test_view_oversized_action_value_rejected() {
    let (server, _guard) = create_test_server();

    for action in [
        json!({"type": "toggle_skill", "value": "x".repeat(500)}),
        json!({"type": "toggle_tool", "value": "x".repeat(500)}),
        json!({"type": "select_industry", "value": "x".repeat(500)}),
    ] {
        let response = server
            .post("/api/view")
            .json(&json!({"action": action}))
            .await;
        response.assert_status_bad_request();
    }
}

#[tokio::test]
async fn test_view_toggle_past_selection_limit_rejected() {
    let (server, _guard) = create_test_server();

    let skills: Vec<String> = (0..MAX_FACET_SELECTIONS).map(|i| format!("s{}", i)).collect();
    let at_limit = json!({"filters": {"selected_skills": skills}});

    server
        .post("/api/view")
        .json(&json!({"state": at_limit}))
        .await
        .assert_status_ok();

    server
        .post("/api/view")
        .json(&json!({
            "state": at_limit,
            "action": {"type": "toggle_skill", "value": "one more"}
        }))
        .await
        .assert_status_bad_request();
}

// =============================================================================
// CONTACT ENDPOINT TESTS
// =============================================================================

fn contact_body() -> Value {
    json!({
        "name": "Dana Whitfield",
        "email": "dana@example.com",
        "subject": "Analyst role",
        "message": "Enjoyed the LBO model - open to a chat?"
    })
}

#[tokio::test]
async fn test_contact_accepted_with_receipt() {
    let (server, _guard) = create_test_server();

    let response = server.post("/api/contact").json(&contact_body()).await;

    response.assert_status_ok();
    let result: ContactResponse = response.json();
    assert!(result.success);
    assert_eq!(result.receipt.len(), 12);
    assert!(result.receipt.chars().all(|c| c.is_ascii_hexdigit()));

    let again: ContactResponse = server.post("/api/contact").json(&contact_body()).await.json();
    assert_eq!(again.receipt, result.receipt);
}

#[tokio::test]
async fn test_contact_invalid_email_rejected() {
    let (server, _guard) = create_test_server();

    let mut body = contact_body();
    body["email"] = json!("not-an-address");

    let response = server.post("/api/contact").json(&body).await;

    response.assert_status_bad_request();
    let error: ErrorResponse = response.json();
    assert!(!error.success);
    assert!(error.error.contains("email"));
}

#[tokio::test]
async fn test_contact_waits_for_configured_delay() {
    let state = AppState::new(Catalogue::builtin())
        .unwrap()
        .with_contact_delay(Duration::from_millis(50));
    let (server, _guard) = create_server_with(state);

    let start = Instant::now();
    server
        .post("/api/contact")
        .json(&contact_body())
        .await
        .assert_status_ok();
    assert!(start.elapsed() >= Duration::from_millis(50));
}

// =============================================================================
// STATIC SITE TESTS
// =============================================================================

#[tokio::test]
async fn test_static_site_fallback() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>Folio</h1>").unwrap();

    let state = AppState::new(Catalogue::builtin())
        .unwrap()
        .with_site_dir(Some(dir.path().to_path_buf()));
    let (server, _guard) = create_server_with(state);

    let response = server.get("/index.html").await;
    response.assert_status_ok();
    assert!(response.text().contains("Folio"));

    // API routes still win over the site directory
    server.get("/health").await.assert_status_ok();
    server.get("/missing.css").await.assert_status_not_found();
}

// =============================================================================
// ERROR HANDLING TESTS
// =============================================================================

#[tokio::test]
async fn test_404_on_unknown_endpoint() {
    let (server, _guard) = create_test_server();

    let response = server.get("/unknown").await;
    response.assert_status_not_found();
}

#[tokio::test]
async fn test_method_not_allowed() {
    let (server, _guard) = create_test_server();

    // /health is GET only
    let response = server.post("/health").await;
    assert_eq!(response.status_code().as_u16(), 405);
}

#[tokio::test]
async fn test_invalid_json_body() {
    let (server, _guard) = create_test_server();

    let response = server
        .post("/api/contact")
        .text("not valid json")
        .content_type("application/json")
        .await;

    assert!(response.status_code().is_client_error());
}

// =============================================================================
// RATE LIMIT TESTS
// =============================================================================

#[tokio::test]
async fn test_rate_limit_from_env() {
    let guard = lock_env();
    // SAFETY: Tests run sequentially under ENV_TEST_MUTEX, so no concurrent env access.
    unsafe { std::env::set_var("FOLIO_RATE_LIMIT", "2") };
    let router = create_router(AppState::new(Catalogue::builtin()).unwrap());
    let server = TestServer::new(router).unwrap();

    server.get("/health").await.assert_status_ok();
    server.get("/health").await.assert_status_ok();
    let response = server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::TOO_MANY_REQUESTS);

    drop(guard);
}
