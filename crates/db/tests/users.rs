//! User provisioning, profiles, permissions and API tokens.

use sqlx::PgPool;
use workbound_db::models::profile::UpdateProfile;
use workbound_db::models::user::{CreateUser, UpdateUser};
use workbound_db::repositories::{AuthTokenRepo, PermissionRepo, ProfileRepo, UserRepo};

fn new_user(email: &str) -> CreateUser {
    CreateUser {
        email: email.to_string(),
        password_hash: "hash".to_string(),
        ..Default::default()
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_user_creates_profile_and_default_permissions(pool: PgPool) {
    let defaults = vec!["view_task".to_string(), "add_task".to_string(), "bogus".to_string()];
    let user = UserRepo::create_with_profile(&pool, &new_user("new@example.com"), &defaults)
        .await
        .unwrap();

    let profile = ProfileRepo::find_by_user_id(&pool, user.id)
        .await
        .unwrap()
        .expect("profile created alongside user");
    assert!(profile.image_path.is_none());

    let perms = PermissionRepo::list_for_user(&pool, user.id, None)
        .await
        .unwrap();
    let mut codenames: Vec<&str> = perms.iter().map(|p| p.codename.as_str()).collect();
    codenames.sort_unstable();
    assert_eq!(codenames, vec!["add_task", "view_task"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_email_leaves_no_partial_rows(pool: PgPool) {
    UserRepo::create_with_profile(&pool, &new_user("dup@example.com"), &[])
        .await
        .unwrap();
    let err = UserRepo::create_with_profile(&pool, &new_user("dup@example.com"), &[])
        .await
        .unwrap_err();
    assert!(matches!(err, sqlx::Error::Database(_)));

    assert_eq!(UserRepo::count(&pool).await.unwrap(), 1);
    let profiles: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM profiles")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(profiles, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_identity_uid_backfilled_once(pool: PgPool) {
    let user = UserRepo::create_with_profile(&pool, &new_user("uid@example.com"), &[])
        .await
        .unwrap();
    assert!(user.identity_uid.is_none());

    let linked = UserRepo::set_identity_uid(&pool, user.id, "uid-1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(linked.identity_uid.as_deref(), Some("uid-1"));

    let unchanged = UserRepo::set_identity_uid(&pool, user.id, "uid-2")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(unchanged.identity_uid.as_deref(), Some("uid-1"));

    let found = UserRepo::find_by_identity_uid(&pool, "uid-1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, user.id);
    assert!(UserRepo::find_by_email(&pool, "UID@example.com")
        .await
        .unwrap()
        .is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_grant_and_revoke_permission(pool: PgPool) {
    let user = UserRepo::create_with_profile(&pool, &new_user("perm@example.com"), &[])
        .await
        .unwrap();

    assert!(!PermissionRepo::user_has_permission(&pool, user.id, "view_portfolio")
        .await
        .unwrap());

    let granted = PermissionRepo::grant(&pool, user.id, "view_portfolio")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(granted.name, "Can view Portfolio");
    // Granting again is a no-op.
    PermissionRepo::grant(&pool, user.id, "view_portfolio")
        .await
        .unwrap();
    assert!(PermissionRepo::grant(&pool, user.id, "fly_portfolio")
        .await
        .unwrap()
        .is_none());

    assert!(PermissionRepo::user_has_permission(&pool, user.id, "view_portfolio")
        .await
        .unwrap());
    assert_eq!(
        PermissionRepo::list_for_user(&pool, user.id, Some("portfolio"))
            .await
            .unwrap()
            .len(),
        1
    );

    assert!(PermissionRepo::revoke(&pool, user.id, "view_portfolio")
        .await
        .unwrap());
    assert!(!PermissionRepo::user_has_permission(&pool, user.id, "view_portfolio")
        .await
        .unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_token_rotation_and_inactive_users(pool: PgPool) {
    let user = UserRepo::create_with_profile(&pool, &new_user("token@example.com"), &[])
        .await
        .unwrap();

    AuthTokenRepo::replace_for_user(&pool, user.id, "hash-one")
        .await
        .unwrap();
    AuthTokenRepo::replace_for_user(&pool, user.id, "hash-two")
        .await
        .unwrap();

    assert!(AuthTokenRepo::find_active_user(&pool, "hash-one")
        .await
        .unwrap()
        .is_none());
    let owner = AuthTokenRepo::find_active_user(&pool, "hash-two")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(owner.id, user.id);

    UserRepo::update(
        &pool,
        user.id,
        &UpdateUser {
            is_active: Some(false),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert!(AuthTokenRepo::find_active_user(&pool, "hash-two")
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_profile_image_paths_set_and_cleared(pool: PgPool) {
    let user = UserRepo::create_with_profile(&pool, &new_user("pic@example.com"), &[])
        .await
        .unwrap();

    let profile = ProfileRepo::update(
        &pool,
        user.id,
        &UpdateProfile {
            first_name: Some(Some("Ada".to_string())),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(profile.first_name.as_deref(), Some("Ada"));

    let with_image = ProfileRepo::set_image(
        &pool,
        user.id,
        Some("user_1/avatar.png"),
        Some("user_1/avatar_thumb.png"),
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(with_image.thumbnail_path.as_deref(), Some("user_1/avatar_thumb.png"));
    assert_eq!(with_image.first_name.as_deref(), Some("Ada"));

    let cleared = ProfileRepo::set_image(&pool, user.id, None, None)
        .await
        .unwrap()
        .unwrap();
    assert!(cleared.image_path.is_none());
    assert!(cleared.thumbnail_path.is_none());
}
