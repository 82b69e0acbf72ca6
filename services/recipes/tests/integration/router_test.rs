//! HTTP surface checks that resolve before any storage access, plus response
//! framing over a scripted database.

use std::collections::BTreeMap;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
use serde_json::{Value, json};

use foodgram_auth_types::identity::{ROLE_USER, USER_ID_HEADER, USER_ROLE_HEADER};
use foodgram_recipes::router::build_router;
use foodgram_recipes::state::AppState;
use foodgram_testing::auth::MockAuth;

fn server() -> TestServer {
    server_with(DatabaseConnection::Disconnected)
}

fn server_with(db: DatabaseConnection) -> TestServer {
    TestServer::new(build_router(AppState { db })).unwrap()
}

fn recipe_body() -> Value {
    json!({
        "name": "Блины",
        "text": "Смешать и пожарить.",
        "image": "recipes/images/pancakes.png",
        "cooking_time": 20,
        "ingredients": [{ "id": 1, "amount": 200 }],
        "tags": [1],
    })
}

#[tokio::test]
async fn should_answer_liveness_check() {
    let resp = server().get("/healthz").await;
    assert_eq!(resp.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn should_report_not_ready_without_database() {
    let resp = server().get("/readyz").await;
    assert_eq!(resp.status_code(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn should_reject_anonymous_recipe_creation() {
    let resp = server().post("/api/recipes").json(&recipe_body()).await;
    assert_eq!(resp.status_code(), StatusCode::UNAUTHORIZED);
    let body: Value = resp.json();
    assert_eq!(body["kind"], "UNAUTHENTICATED");
}

#[tokio::test]
async fn should_reject_anonymous_shopping_list_download() {
    let resp = server()
        .get("/api/recipes/download_shopping_cart")
        .await;
    assert_eq!(resp.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_reject_malformed_identity_header() {
    let resp = server()
        .get("/api/recipes")
        .add_header(
            HeaderName::from_static(USER_ID_HEADER),
            HeaderValue::from_static("not-a-uuid"),
        )
        .add_header(
            HeaderName::from_static(USER_ROLE_HEADER),
            HeaderValue::from(u16::from(ROLE_USER)),
        )
        .await;
    assert_eq!(resp.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_reject_unknown_flag_value() {
    let resp = server().get("/api/recipes?is_favorited=maybe").await;
    assert_eq!(resp.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json();
    assert_eq!(body["kind"], "INVALID_QUERY");
}

#[tokio::test]
async fn should_reject_malformed_author_filter() {
    let resp = server().get("/api/recipes?author=42").await;
    assert_eq!(resp.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json();
    assert_eq!(body["kind"], "INVALID_QUERY");
}

#[tokio::test]
async fn should_reject_self_subscription() {
    let auth = MockAuth::user();
    let [(id_name, id_value), (role_name, role_value)] = auth.header_pairs();
    let resp = server()
        .post(&format!("/api/users/{}/subscribe", auth.user_id))
        .add_header(id_name, id_value)
        .add_header(role_name, role_value)
        .await;
    assert_eq!(resp.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json();
    assert_eq!(body["kind"], "SELF_FOLLOW");
}

#[tokio::test]
async fn should_forbid_tag_creation_for_regular_users() {
    let [(id_name, id_value), (role_name, role_value)] = MockAuth::user().header_pairs();
    let resp = server()
        .post("/api/tags")
        .add_header(id_name, id_value)
        .add_header(role_name, role_value)
        .json(&json!({ "name": "Завтрак", "color": "#E26C2D", "slug": "breakfast" }))
        .await;
    assert_eq!(resp.status_code(), StatusCode::FORBIDDEN);
    let body: Value = resp.json();
    assert_eq!(body["kind"], "FORBIDDEN");
}

#[tokio::test]
async fn should_forbid_ingredient_creation_for_regular_users() {
    let [(id_name, id_value), (role_name, role_value)] = MockAuth::user().header_pairs();
    let resp = server()
        .post("/api/ingredients")
        .add_header(id_name, id_value)
        .add_header(role_name, role_value)
        .json(&json!({ "name": "Мука", "measurement_unit": "г" }))
        .await;
    assert_eq!(resp.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn should_serve_shopping_list_as_text_attachment() {
    let row = |name: &str, unit: &str, total: i64| {
        BTreeMap::from([
            ("name", sea_orm::Value::from(name)),
            ("measurement_unit", sea_orm::Value::from(unit)),
            ("total", sea_orm::Value::from(total)),
        ])
    };
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![row("Яйца", "шт", 2), row("Мука", "г", 500)]])
        .into_connection();
    let [(id_name, id_value), (role_name, role_value)] = MockAuth::user().header_pairs();

    let resp = server_with(db)
        .get("/api/recipes/download_shopping_cart")
        .add_header(id_name, id_value)
        .add_header(role_name, role_value)
        .await;

    assert_eq!(resp.status_code(), StatusCode::OK);
    assert_eq!(resp.header("content-type"), "text/plain; charset=utf-8");
    assert_eq!(
        resp.header("content-disposition"),
        "attachment; filename=\"shopping_list.txt\""
    );
    assert_eq!(resp.text(), "Список покупок:\n\nМука - 500 г\nЯйца - 2 шт");
}

#[tokio::test]
async fn should_refuse_download_of_empty_cart() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<BTreeMap<&str, sea_orm::Value>>::new()])
        .into_connection();
    let [(id_name, id_value), (role_name, role_value)] = MockAuth::user().header_pairs();

    let resp = server_with(db)
        .get("/api/recipes/download_shopping_cart")
        .add_header(id_name, id_value)
        .add_header(role_name, role_value)
        .await;

    assert_eq!(resp.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json();
    assert_eq!(body["kind"], "EMPTY_CART");
}
