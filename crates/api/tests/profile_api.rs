//! Profile edits over multipart, including thumbnail generation.

mod common;

use std::io::Cursor;

use axum::http::StatusCode;
use common::{body_json, create_user_with_token, put_multipart_auth};
use image::{ImageFormat, RgbImage};
use sqlx::PgPool;
use workbound_db::repositories::ProfileRepo;

fn png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, image::Rgb([10, 120, 200]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).unwrap();
    out.into_inner()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn upload_stores_image_and_200px_thumbnail(pool: PgPool) {
    let (user, token) = create_user_with_token(&pool, "pic@example.com").await;
    let config = common::test_config();
    let media_root = config.media_root.clone();
    let image = png(800, 400);

    let app = common::build_app_with(pool, config, None);
    let response = put_multipart_auth(
        app,
        "/api/v1/user/me/profile",
        &[("first_name", None, b"Ada".as_slice()), ("image", Some("me.png"), image.as_slice())],
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let profile = body_json(response).await;
    assert_eq!(profile["first_name"], "Ada");
    let image_path = profile["image_path"].as_str().unwrap();
    let thumb_path = profile["thumbnail_path"].as_str().unwrap();
    assert!(image_path.starts_with(&format!("user_{}/", user.id)));
    assert!(thumb_path.ends_with("_thumb.png"));

    let thumb = image::open(media_root.join(thumb_path)).unwrap();
    assert_eq!(thumb.height(), 200);
    assert_eq!(thumb.width(), 400);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn clear_image_drops_both_paths(pool: PgPool) {
    let (_, token) = create_user_with_token(&pool, "clear@example.com").await;
    let config = common::test_config();
    let image = png(300, 300);

    let app = common::build_app_with(pool.clone(), config.clone(), None);
    let response = put_multipart_auth(
        app,
        "/api/v1/user/me/profile",
        &[("image", Some("me.png"), image.as_slice())],
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // A name-only edit leaves the image alone.
    let app = common::build_app_with(pool.clone(), config.clone(), None);
    let response = put_multipart_auth(
        app,
        "/api/v1/user/me/profile",
        &[("last_name", None, b"Lovelace".as_slice())],
        &token,
    )
    .await;
    let profile = body_json(response).await;
    assert!(profile["thumbnail_path"].is_string());

    let app = common::build_app_with(pool, config, None);
    let response = put_multipart_auth(
        app,
        "/api/v1/user/me/profile",
        &[("clear_image", None, b"true".as_slice())],
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let profile = body_json(response).await;
    assert!(profile["image_path"].is_null());
    assert!(profile["thumbnail_path"].is_null());
    assert_eq!(profile["last_name"], "Lovelace");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn non_image_upload_is_a_field_error(pool: PgPool) {
    let (_, token) = create_user_with_token(&pool, "bad@example.com").await;
    let app = common::build_test_app(pool);
    let response = put_multipart_auth(
        app,
        "/api/v1/user/me/profile",
        &[("image", Some("notes.txt"), b"definitely not pixels".as_slice())],
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["fields"]["image"].is_array());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn rejected_image_leaves_text_fields_untouched(pool: PgPool) {
    let (user, token) = create_user_with_token(&pool, "atomic@example.com").await;
    let app = common::build_test_app(pool.clone());
    let response = put_multipart_auth(
        app,
        "/api/v1/user/me/profile",
        &[
            ("first_name", None, b"Mallory".as_slice()),
            ("image", Some("notes.txt"), b"not an image".as_slice()),
        ],
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let profile = ProfileRepo::find_by_user_id(&pool, user.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(profile.first_name, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn extremely_wide_image_is_rejected(pool: PgPool) {
    let (user, token) = create_user_with_token(&pool, "wide@example.com").await;
    let image = png(100_000, 1);

    let app = common::build_test_app(pool.clone());
    let response = put_multipart_auth(
        app,
        "/api/v1/user/me/profile",
        &[("image", Some("strip.png"), image.as_slice())],
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["fields"]["image"].is_array());

    let profile = ProfileRepo::find_by_user_id(&pool, user.id)
        .await
        .unwrap()
        .unwrap();
    assert!(profile.image_path.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn empty_text_field_clears_value(pool: PgPool) {
    let (_, token) = create_user_with_token(&pool, "phone@example.com").await;
    let app = common::build_test_app(pool.clone());
    let response = put_multipart_auth(
        app,
        "/api/v1/user/me/profile",
        &[("phone", None, b"+44 20 7946 0958".as_slice())],
        &token,
    )
    .await;
    assert_eq!(body_json(response).await["phone"], "+44 20 7946 0958");

    let app = common::build_test_app(pool);
    let response = put_multipart_auth(
        app,
        "/api/v1/user/me/profile",
        &[("phone", None, b"".as_slice())],
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await["phone"].is_null());
}
