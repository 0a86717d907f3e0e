//! Categories and tasks archive on delete instead of disappearing.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_superuser_with_token, delete_auth, get_auth, post_json_auth};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleted_task_is_archived_and_hidden(pool: PgPool) {
    let (_, token) = create_superuser_with_token(&pool, "admin@example.com").await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/tasks",
        json!({ "title": "Send welcome pack", "duration": 15 }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let task = body_json(response).await;
    assert_eq!(task["completion_days"], 1);

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &format!("/api/v1/tasks/{}", task["id"]), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool.clone());
    let json = body_json(get_auth(app, "/api/v1/tasks", &token).await).await;
    assert!(json["data"].as_array().unwrap().is_empty());

    let app = common::build_test_app(pool.clone());
    let json = body_json(get_auth(app, "/api/v1/tasks?include_archived=true", &token).await).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert!(data[0]["archived_at"].is_string());

    let still_there: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tasks")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(still_there, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn categories_filter_by_title(pool: PgPool) {
    let (_, token) = create_superuser_with_token(&pool, "admin@example.com").await;
    for title in ["Sales North", "Sales South", "Finance"] {
        let app = common::build_test_app(pool.clone());
        post_json_auth(app, "/api/v1/categories", json!({ "title": title }), &token).await;
    }

    let app = common::build_test_app(pool);
    let json = body_json(get_auth(app, "/api/v1/categories?title=sales", &token).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn long_category_title_is_rejected(pool: PgPool) {
    let (_, token) = create_superuser_with_token(&pool, "admin@example.com").await;
    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/categories",
        json!({ "title": "x".repeat(81) }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["fields"]["title"].is_array());
}
