//! Server API tests

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use chrono::NaiveDate;
use http_body_util::BodyExt;
use spendboard_core::{Category, Transaction};
use tower::ServiceExt;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn test_table() -> Table {
    Table::new(vec![
        Transaction::new(date(2024, 1, 5), "walmart grocery run", 50.0, Category::Shopping),
        Transaction::new(date(2024, 1, 20), "dominos pizza", 20.0, Category::Restaurants),
        Transaction::new(date(2024, 2, 1), "walmart", 30.0, Category::Shopping),
        Transaction::new(date(2024, 2, 9), "fruit stall", 12.5, Category::Groceries),
        Transaction::new(date(2024, 2, 10), "bank transfer", 7.0, Category::Unassigned),
    ])
}

fn setup_test_app() -> Router {
    create_router(test_table(), ServerConfig::default())
}

async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn get_body_json(response: Response) -> serde_json::Value {
    let body = response.into_body();
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn get_body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

// ========== Health / Summary ==========

#[tokio::test]
async fn test_health() {
    let response = get(setup_test_app(), "/api/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["transactions"], 5);
}

#[tokio::test]
async fn test_summary() {
    let json = get_body_json(get(setup_test_app(), "/api/summary").await).await;
    assert_eq!(json["transactions"], 5);
    assert_eq!(json["total"], 119.5);
    assert_eq!(json["first_date"], "2024-01-05");
    assert_eq!(json["last_date"], "2024-02-10");
    assert_eq!(json["uncategorized"], 1);
}

// ========== Tabs ==========

#[tokio::test]
async fn test_list_categories() {
    let response = get(setup_test_app(), "/api/categories").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    let tabs = json["tabs"].as_array().unwrap();
    assert_eq!(tabs.len(), 10);
    assert_eq!(tabs[0]["label"], "Groceries");
    assert_eq!(tabs[0]["value"], "Groceries");
    assert_eq!(tabs[9]["label"], "Total Spending");
    assert_eq!(tabs[9]["value"], "Total");
    assert_eq!(json["default"], "Groceries");
}

// ========== Dashboard views ==========

#[tokio::test]
async fn test_dashboard_defaults_to_groceries() {
    let json = get_body_json(get(setup_test_app(), "/api/dashboard").await).await;
    assert_eq!(json["selection"], "Groceries");
    assert_eq!(json["pie"]["title"], "Groceries Breakdown");
    assert_eq!(json["pie"]["slices"][0]["label"], "fruit stall");
    assert_eq!(json["scatter"]["title"], "Scatter Plot for Groceries");
}

#[tokio::test]
async fn test_dashboard_total() {
    let response = get(setup_test_app(), "/api/dashboard?category=Total").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["selection"], "Total");
    assert_eq!(json["pie"]["title"], "Total Spending Breakdown");

    let slices = json["pie"]["slices"].as_array().unwrap();
    assert_eq!(slices[0]["label"], "Shopping");
    assert_eq!(slices[0]["amount"], 80.0);
    assert_eq!(slices[1]["label"], "Restaurants");
    assert_eq!(slices[3]["label"], "unassigned");

    let bars = json["bar"]["bars"].as_array().unwrap();
    assert_eq!(bars.len(), 2);
    assert_eq!(bars[0]["month_year"], "Jan 2024");
    assert_eq!(bars[0]["amount"], 70.0);
    assert_eq!(bars[1]["month_year"], "Feb 2024");
    assert_eq!(bars[1]["amount"], 49.5);

    assert_eq!(json["scatter"]["title"], "Scatter Plot for All Categories");
    assert_eq!(json["scatter"]["points"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_dashboard_accepts_tab_label() {
    let response = get(setup_test_app(), "/api/dashboard?category=Total%20Spending").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["selection"], "Total");
}

#[tokio::test]
async fn test_dashboard_empty_category() {
    let json = get_body_json(get(setup_test_app(), "/api/dashboard?category=Fuel").await).await;
    assert_eq!(json["pie"]["title"], "Fuel Breakdown");
    assert!(json["pie"]["slices"].as_array().unwrap().is_empty());
    assert!(json["bar"]["bars"].as_array().unwrap().is_empty());
    assert!(json["scatter"]["points"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_empty_tab_keeps_full_table() {
    let app = setup_test_app();

    let json = get_body_json(get(app.clone(), "/api/dashboard?category=HealthCare").await).await;
    assert_eq!(json["pie"]["title"], "HealthCare Breakdown");
    assert!(json["pie"]["slices"].as_array().unwrap().is_empty());
    assert!(json["bar"]["bars"].as_array().unwrap().is_empty());
    assert!(json["scatter"]["points"].as_array().unwrap().is_empty());

    let txs = get_body_json(get(app, "/api/transactions").await).await;
    let txs = txs.as_array().unwrap();
    assert_eq!(txs.len(), 5);
    assert!(txs.iter().all(|tx| tx["category"] != "HealthCare"));
}

#[tokio::test]
async fn test_dashboard_unknown_category() {
    let response = get(setup_test_app(), "/api/dashboard?category=Gadgets").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = get_body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("Gadgets"));
}

#[tokio::test]
async fn test_individual_views() {
    let pie = get_body_json(get(setup_test_app(), "/api/views/pie?category=Shopping").await).await;
    assert_eq!(pie["title"], "Shopping Breakdown");
    assert_eq!(pie["slices"].as_array().unwrap().len(), 2);

    let bar = get_body_json(get(setup_test_app(), "/api/views/bar?category=Shopping").await).await;
    assert_eq!(bar["title"], "Monthly Spending Overview");
    assert_eq!(bar["bars"][0]["amount"], 50.0);
    assert_eq!(bar["bars"][1]["amount"], 30.0);

    let scatter =
        get_body_json(get(setup_test_app(), "/api/views/scatter?category=unassigned").await).await;
    assert_eq!(scatter["points"][0]["date"], "2024-02-10");
    assert_eq!(scatter["points"][0]["category"], "unassigned");

    let bad = get(setup_test_app(), "/api/views/bar?category=nope").await;
    assert_eq!(bad.status(), StatusCode::BAD_REQUEST);
}

// ========== Transactions ==========

#[tokio::test]
async fn test_list_transactions_in_table_order() {
    let json = get_body_json(get(setup_test_app(), "/api/transactions").await).await;
    let txs = json.as_array().unwrap();
    assert_eq!(txs.len(), 5);
    assert_eq!(txs[0]["date"], "2024-01-05");
    assert_eq!(txs[0]["description"], "walmart grocery run");
    assert_eq!(txs[0]["category"], "Shopping");
    assert_eq!(txs[0]["month"], 1);
    assert_eq!(txs[0]["year"], 2024);
    assert_eq!(txs[0]["month_year"], "Jan 2024");
    assert_eq!(txs[4]["category"], "unassigned");
}

// ========== Page and assets ==========

#[tokio::test]
async fn test_index_page() {
    let response = get(setup_test_app(), "/").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/html"));
    assert_eq!(response.headers()[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
    assert_eq!(response.headers()[header::X_FRAME_OPTIONS], "DENY");
    assert!(response.headers().contains_key(header::CONTENT_SECURITY_POLICY));

    let html = get_body_text(response).await;
    assert!(html.contains("Personal Expenses Dashboard"));
    assert!(html.contains("/dashboard.js"));

    // One header per transaction field
    let start = html.find("<thead>").unwrap() + "<thead>".len();
    let thead = &html[start..html.find("</thead>").unwrap()];
    assert_eq!(thead.matches("<th").count(), 7);
    for label in ["Date", "Description", "Amount", "Category", ">Month<", "Year", "Month Year"] {
        assert!(thead.contains(label), "missing column {label}");
    }
}

#[tokio::test]
async fn test_assets() {
    let js = get(setup_test_app(), "/dashboard.js").await;
    assert_eq!(js.status(), StatusCode::OK);
    let script = get_body_text(js).await;
    assert!(script.contains("/api/dashboard"));
    assert!(script.contains("tx.month_year"));
    assert!(script.contains("String(tx.year)"));
    // Charts scale around zero instead of clamping negative amounts
    assert!(script.contains("valueScale"));
    assert!(!script.contains("Math.max(bar.amount, 0)"));
    assert!(!script.contains("Math.max(point.amount, 0)"));

    let css = get(setup_test_app(), "/dashboard.css").await;
    assert_eq!(css.status(), StatusCode::OK);
    assert!(css.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/css"));
}

#[tokio::test]
async fn test_unknown_path_without_static_dir() {
    let response = get(setup_test_app(), "/favicon.ico").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_static_dir_fallback() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("notes.txt"), "hello").unwrap();

    let config = ServerConfig {
        static_dir: Some(dir.path().to_path_buf()),
    };
    let app = create_router(test_table(), config);

    let response = get(app.clone(), "/notes.txt").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(get_body_text(response).await, "hello");

    // Routes still win over the fallback
    let response = get(app, "/api/health").await;
    assert_eq!(response.status(), StatusCode::OK);
}
