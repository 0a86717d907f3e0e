//! Portfolio and section lifecycle over REST: generated ids, float ordering,
//! metadata, renumbering and moves.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_superuser_with_token, delete_auth, get_auth, post_json_auth, put_json_auth,
};
use serde_json::{json, Value};
use sqlx::PgPool;

async fn create(pool: &PgPool, token: &str, uri: &str, body: Value) -> Value {
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, uri, body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED, "POST {uri}");
    body_json(response).await
}

/// A category and an empty portfolio to hang sections on.
async fn seed(pool: &PgPool, token: &str) -> (Value, Value) {
    let category = create(pool, token, "/api/v1/categories", json!({ "title": "Dept A" })).await;
    let portfolio = create(pool, token, "/api/v1/portfolios", json!({})).await;
    (category, portfolio)
}

async fn add_section(pool: &PgPool, token: &str, portfolio: &Value, category: &Value) -> Value {
    create(
        pool,
        token,
        "/api/v1/sections",
        json!({ "portfolio_id": portfolio["id"], "category_id": category["id"] }),
    )
    .await
}

// ---------------------------------------------------------------------------
// Generated ids
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn portfolio_gets_prefixed_id_that_never_changes(pool: PgPool) {
    let (_, token) = create_superuser_with_token(&pool, "admin@example.com").await;
    let first = create(&pool, &token, "/api/v1/portfolios", json!({})).await;
    let second = create(&pool, &token, "/api/v1/portfolios", json!({})).await;

    let public_id = first["public_id"].as_str().unwrap().to_string();
    assert!(public_id.starts_with("pf_"));
    assert_eq!(public_id.len(), "pf_".len() + 32);
    assert_ne!(first["public_id"], second["public_id"]);
    // Reference falls back to the generated id.
    assert_eq!(first["reference"], first["public_id"]);

    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(
        app,
        &format!("/api/v1/portfolios/{}", first["id"]),
        json!({ "reference": "Q3 onboarding", "public_id": "pf_hijacked" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["reference"], "Q3 onboarding");
    assert_eq!(updated["public_id"], public_id.as_str());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn portfolio_metadata_round_trips(pool: PgPool) {
    let (_, token) = create_superuser_with_token(&pool, "admin@example.com").await;
    let meta = json!({ "client": "Acme", "tags": ["north", "priority"], "budget": 1200 });
    let created = create(&pool, &token, "/api/v1/portfolios", json!({ "meta": meta })).await;

    let app = common::build_test_app(pool);
    let response = get_auth(app, &format!("/api/v1/portfolios/{}", created["id"]), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["meta"], meta);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn scalar_metadata_is_rejected(pool: PgPool) {
    let (_, token) = create_superuser_with_token(&pool, "admin@example.com").await;
    let app = common::build_test_app(pool);
    let response =
        post_json_auth(app, "/api/v1/portfolios", json!({ "meta": "text" }), &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["fields"]["meta"].is_array());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn null_clears_completion_and_metadata(pool: PgPool) {
    let (_, token) = create_superuser_with_token(&pool, "admin@example.com").await;
    let created = create(
        &pool,
        &token,
        "/api/v1/portfolios",
        json!({ "completed_at": "2026-01-01T00:00:00Z", "meta": { "stage": "done" } }),
    )
    .await;
    let uri = format!("/api/v1/portfolios/{}", created["id"]);

    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(app, &uri, json!({ "completed_at": null }), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["completed_at"].is_null());
    assert_eq!(json["meta"]["stage"], "done");

    let app = common::build_test_app(pool);
    let response = put_json_auth(app, &uri, json!({ "meta": null }), &token).await;
    let json = body_json(response).await;
    assert!(json["meta"].is_null());
    assert_eq!(json["reference"], created["reference"]);
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn sections_are_ordered_by_tenths(pool: PgPool) {
    let (_, token) = create_superuser_with_token(&pool, "admin@example.com").await;
    let (category, portfolio) = seed(&pool, &token).await;

    let first = add_section(&pool, &token, &portfolio, &category).await;
    let second = add_section(&pool, &token, &portfolio, &category).await;

    assert_eq!(first["sort_order"].as_f64(), Some(0.1));
    assert_eq!(second["sort_order"].as_f64(), Some(0.2));
    assert!(first["public_id"].as_str().unwrap().starts_with("sec_"));

    let app = common::build_test_app(pool);
    let response = get_auth(app, &format!("/api/v1/portfolios/{}", portfolio["id"]), &token).await;
    let detail = body_json(response).await;
    let ids: Vec<&Value> = detail["sections"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| &s["id"])
        .collect();
    assert_eq!(ids, vec![&first["id"], &second["id"]]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn explicit_order_is_kept(pool: PgPool) {
    let (_, token) = create_superuser_with_token(&pool, "admin@example.com").await;
    let (category, portfolio) = seed(&pool, &token).await;

    let pinned = create(
        &pool,
        &token,
        "/api/v1/sections",
        json!({
            "portfolio_id": portfolio["id"],
            "category_id": category["id"],
            "sort_order": 5.0,
        }),
    )
    .await;
    let next = add_section(&pool, &token, &portfolio, &category).await;

    assert_eq!(pinned["sort_order"].as_f64(), Some(5.0));
    assert!(next["sort_order"].as_f64().unwrap() > 5.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn section_moves_between_siblings(pool: PgPool) {
    let (_, token) = create_superuser_with_token(&pool, "admin@example.com").await;
    let (category, portfolio) = seed(&pool, &token).await;
    let a = add_section(&pool, &token, &portfolio, &category).await;
    let b = add_section(&pool, &token, &portfolio, &category).await;
    let c = add_section(&pool, &token, &portfolio, &category).await;

    // Move c between a and b.
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/sections/{}/move", c["id"]),
        json!({ "after_id": a["id"] }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let moved = body_json(response).await["sort_order"].as_f64().unwrap();
    assert!(moved > a["sort_order"].as_f64().unwrap());
    assert!(moved < b["sort_order"].as_f64().unwrap());

    // Renumbering keeps the new sequence.
    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        &format!("/api/v1/portfolios/{}/sections/renumber", portfolio["id"]),
        json!({}),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let sections = body_json(response).await["data"].clone();
    let sections = sections.as_array().unwrap();
    assert_eq!(sections[0]["id"], a["id"]);
    assert_eq!(sections[1]["id"], c["id"]);
    assert_eq!(sections[2]["id"], b["id"]);
    assert_eq!(sections[1]["sort_order"].as_f64(), Some(0.2));
}

// ---------------------------------------------------------------------------
// Deletes and filters
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleting_portfolio_cascades_to_sections(pool: PgPool) {
    let (_, token) = create_superuser_with_token(&pool, "admin@example.com").await;
    let (category, portfolio) = seed(&pool, &token).await;
    let section = add_section(&pool, &token, &portfolio, &category).await;

    let app = common::build_test_app(pool.clone());
    let uri = format!("/api/v1/portfolios/{}", portfolio["id"]);
    let response = delete_auth(app, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = get_auth(app, &format!("/api/v1/sections/{}", section["id"]), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn portfolios_filter_by_public_id(pool: PgPool) {
    let (_, token) = create_superuser_with_token(&pool, "admin@example.com").await;
    let wanted = create(&pool, &token, "/api/v1/portfolios", json!({})).await;
    create(&pool, &token, "/api/v1/portfolios", json!({})).await;

    let app = common::build_test_app(pool);
    let uri = format!("/api/v1/portfolios?public_id={}", wanted["public_id"].as_str().unwrap());
    let json = body_json(get_auth(app, &uri, &token).await).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["id"], wanted["id"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn section_with_unknown_category_is_a_bad_reference(pool: PgPool) {
    let (_, token) = create_superuser_with_token(&pool, "admin@example.com").await;
    let portfolio = create(&pool, &token, "/api/v1/portfolios", json!({})).await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/sections",
        json!({ "portfolio_id": portfolio["id"], "category_id": 999_999 }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
