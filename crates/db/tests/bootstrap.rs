use sqlx::PgPool;

/// Full bootstrap test: connect, migrate, verify seed data.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    workbound_db::health_check(&pool).await.unwrap();

    let tables = ["role_types", "permissions"];
    for table in tables {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert!(count.0 > 0, "{table} should have seed data, got 0 rows");
    }
}

/// Every (action, model) pair has a seeded permission row with the expected name.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_permissions_seeded_for_every_model(pool: PgPool) {
    let rows = workbound_db::repositories::PermissionRepo::list_all(&pool, None)
        .await
        .unwrap();
    assert_eq!(rows.len(), 28);

    for permission in workbound_core::permissions::Permission::all() {
        let row = rows
            .iter()
            .find(|r| r.codename == permission.codename())
            .unwrap_or_else(|| panic!("missing {}", permission.codename()));
        assert_eq!(row.name, permission.name());
        assert_eq!(row.model, permission.model.as_str());
    }
}

/// The two seeded role types carry the levels the object rule relies on.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_role_types_seeded(pool: PgPool) {
    let types = workbound_db::repositories::RoleTypeRepo::list(&pool)
        .await
        .unwrap();
    let names: Vec<(&str, f64)> = types.iter().map(|t| (t.name.as_str(), t.level)).collect();
    assert_eq!(names, vec![("User", 1.0), ("Manager", 9.0)]);
}
