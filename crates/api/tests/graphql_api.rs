//! GraphQL surface: same permissions and errors as REST, nested resolvers.

mod common;

use common::{create_superuser_with_token, create_user_with_token, graphql, grant, TEST_PASSWORD};
use serde_json::json;
use sqlx::PgPool;

const PERMISSION_DENIED: &str = "You do not have permission to perform this action.";

#[sqlx::test(migrations = "../../db/migrations")]
async fn anonymous_query_is_denied(pool: PgPool) {
    let app = common::build_test_app(pool);
    let json = graphql(app, "{ portfolios { id } }", json!({}), None).await;

    assert!(json["data"].is_null());
    assert_eq!(json["errors"][0]["message"], PERMISSION_DENIED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn query_requires_view_permission(pool: PgPool) {
    let (user, token) = create_user_with_token(&pool, "reader@example.com").await;

    let app = common::build_test_app(pool.clone());
    let json = graphql(app, "{ tasks { id } }", json!({}), Some(&token)).await;
    assert_eq!(json["errors"][0]["message"], PERMISSION_DENIED);
    assert_eq!(json["errors"][0]["extensions"]["code"], "FORBIDDEN");

    grant(&pool, user.id, &["view_task"]).await;

    let app = common::build_test_app(pool);
    let json = graphql(app, "{ tasks { id } }", json!({}), Some(&token)).await;
    assert!(json.get("errors").is_none());
    assert_eq!(json["data"]["tasks"], json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_row_reads_does_not_exist(pool: PgPool) {
    let (_, token) = create_superuser_with_token(&pool, "admin@example.com").await;
    let app = common::build_test_app(pool);
    let json = graphql(app, "{ portfolio(id: 424242) { id } }", json!({}), Some(&token)).await;

    assert_eq!(
        json["errors"][0]["message"],
        "Portfolio matching query does not exist."
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn mutations_create_nested_graph(pool: PgPool) {
    let (admin, token) = create_superuser_with_token(&pool, "admin@example.com").await;

    let app = common::build_test_app(pool.clone());
    let json = graphql(
        app,
        r#"mutation($meta: JSON) {
            createPortfolio(input: { reference: "Acme", meta: $meta }) { id publicId createdById }
            createCategory(input: { title: "Dept A" }) { id }
        }"#,
        json!({ "meta": { "stage": "kickoff" } }),
        Some(&token),
    )
    .await;
    assert!(json.get("errors").is_none(), "{json}");
    let portfolio = &json["data"]["createPortfolio"];
    assert_eq!(portfolio["createdById"], admin.id);
    assert!(portfolio["publicId"].as_str().unwrap().starts_with("pf_"));
    let category_id = json["data"]["createCategory"]["id"].clone();

    for _ in 0..2 {
        let app = common::build_test_app(pool.clone());
        let json = graphql(
            app,
            "mutation($p: Int!, $c: Int!) { createSection(input: { portfolioId: $p, categoryId: $c }) { id } }",
            json!({ "p": portfolio["id"], "c": category_id }),
            Some(&token),
        )
        .await;
        assert!(json.get("errors").is_none(), "{json}");
    }

    let app = common::build_test_app(pool);
    let json = graphql(
        app,
        "query($id: Int!) { portfolio(id: $id) { meta sections { sortOrder category { title } } } }",
        json!({ "id": portfolio["id"] }),
        Some(&token),
    )
    .await;
    let detail = &json["data"]["portfolio"];
    assert_eq!(detail["meta"], json!({ "stage": "kickoff" }));
    let sections = detail["sections"].as_array().unwrap();
    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0]["sortOrder"].as_f64(), Some(0.1));
    assert_eq!(sections[1]["sortOrder"].as_f64(), Some(0.2));
    assert_eq!(sections[0]["category"]["title"], "Dept A");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn validation_errors_carry_fields(pool: PgPool) {
    let (_, token) = create_superuser_with_token(&pool, "admin@example.com").await;
    let app = common::build_test_app(pool);
    let json = graphql(
        app,
        r#"mutation { createCategory(input: { title: "" }) { id } }"#,
        json!({}),
        Some(&token),
    )
    .await;

    let error = &json["errors"][0];
    assert_eq!(error["message"], "Validation failed");
    assert!(error["extensions"]["fields"]["title"].is_array());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn token_auth_and_current_user(pool: PgPool) {
    create_user_with_token(&pool, "gql@example.com").await;

    let app = common::build_test_app(pool.clone());
    let json = graphql(
        app,
        "mutation($e: String!, $p: String!) { tokenAuth(email: $e, password: $p) { token user { email } } }",
        json!({ "e": "gql@example.com", "p": TEST_PASSWORD }),
        None,
    )
    .await;
    let token = json["data"]["tokenAuth"]["token"].as_str().unwrap().to_string();
    assert_eq!(json["data"]["tokenAuth"]["user"]["email"], "gql@example.com");

    let app = common::build_test_app(pool);
    let json = graphql(
        app,
        "{ currentUser { email profile { firstName } } myPermissions { codename } }",
        json!({}),
        Some(&token),
    )
    .await;
    assert_eq!(json["data"]["currentUser"]["email"], "gql@example.com");
    assert!(json["data"]["currentUser"]["profile"].is_object());
    assert_eq!(json["data"]["myPermissions"], json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_user_is_open_to_anonymous_callers(pool: PgPool) {
    let app = common::build_test_app(pool);
    let json = graphql(
        app,
        r#"mutation { createUser(email: "open@example.com", password: "s3cret-pass") { id email } }"#,
        json!({}),
        None,
    )
    .await;
    assert!(json.get("errors").is_none(), "{json}");
    assert_eq!(json["data"]["createUser"]["email"], "open@example.com");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_user_mirrors_rest(pool: PgPool) {
    let (_, admin_token) = create_superuser_with_token(&pool, "admin@example.com").await;
    let (target, token) = create_user_with_token(&pool, "target@example.com").await;
    let mutation = r#"mutation($id: Int!, $input: UpdateUserInput!) {
        updateUser(id: $id, input: $input) { id email isActive isStaff }
    }"#;

    let app = common::build_test_app(pool.clone());
    let json = graphql(
        app,
        mutation,
        json!({ "id": target.id, "input": { "email": "renamed@example.com", "isStaff": true } }),
        Some(&token),
    )
    .await;
    assert_eq!(json["errors"][0]["message"], PERMISSION_DENIED);

    let app = common::build_test_app(pool);
    let json = graphql(
        app,
        mutation,
        json!({ "id": target.id, "input": { "email": "renamed@example.com", "isActive": false } }),
        Some(&admin_token),
    )
    .await;
    assert!(json.get("errors").is_none(), "{json}");
    let user = &json["data"]["updateUser"];
    assert_eq!(user["id"], target.id);
    assert_eq!(user["email"], "renamed@example.com");
    assert_eq!(user["isActive"], false);
    assert_eq!(user["isStaff"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn explicit_null_clears_and_omitted_keeps(pool: PgPool) {
    let (_, token) = create_superuser_with_token(&pool, "admin@example.com").await;

    let app = common::build_test_app(pool.clone());
    let json = graphql(
        app,
        r#"mutation {
            createPortfolio(input: { completedAt: "2026-01-01T00:00:00Z", meta: { a: 1 } }) { id }
        }"#,
        json!({}),
        Some(&token),
    )
    .await;
    let id = json["data"]["createPortfolio"]["id"].clone();

    let app = common::build_test_app(pool);
    let json = graphql(
        app,
        "mutation($id: Int!) { updatePortfolio(id: $id, input: { completedAt: null }) { completedAt meta } }",
        json!({ "id": id }),
        Some(&token),
    )
    .await;
    assert!(json.get("errors").is_none(), "{json}");
    assert!(json["data"]["updatePortfolio"]["completedAt"].is_null());
    assert_eq!(json["data"]["updatePortfolio"]["meta"]["a"], 1);
}
