//! HTTP-level integration tests for `/api/admin`.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, create_user, get, login, post_json, send, TEST_PASSWORD};
use serde_json::json;
use sqlx::MySqlPool;
use tratics_core::roles::Role;
use tratics_db::repositories::UserRepo;

async fn admin_session(pool: &MySqlPool, app: &axum::Router) -> (i64, String) {
    let admin = create_user(pool, "root@x.com", Role::Admin).await;
    let cookies = login(app, "root@x.com", TEST_PASSWORD).await;
    (admin.id, cookies)
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_admin_routes_reject_non_admins(pool: MySqlPool) {
    create_user(&pool, "plain@x.com", Role::User).await;
    let app = common::build_test_app(pool);
    let cookies = login(&app, "plain@x.com", TEST_PASSWORD).await;

    for uri in [
        "/api/admin/dashboard",
        "/api/admin/users",
        "/api/admin/stats/views",
        "/api/admin/stats/users",
    ] {
        let response = get(&app, uri, Some(&cookies)).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN, "{uri}");
        assert_eq!(body_json(response).await["message"], "Admin access required");

        let response = get(&app, uri, None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_admin_cannot_delete_self(pool: MySqlPool) {
    let app = common::build_test_app(pool.clone());
    let (admin_id, cookies) = admin_session(&pool, &app).await;

    let uri = format!("/api/admin/users/{admin_id}");
    let response = send(&app, Method::DELETE, &uri, None, Some(&cookies)).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        body_json(response).await["message"],
        "You cannot delete your own account"
    );
    assert!(UserRepo::find_by_id(&pool, admin_id).await.unwrap().is_some());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_user_then_404(pool: MySqlPool) {
    let app = common::build_test_app(pool.clone());
    let (_, cookies) = admin_session(&pool, &app).await;
    let victim = create_user(&pool, "victim@x.com", Role::User).await;

    let uri = format!("/api/admin/users/{}", victim.id);
    let response = send(&app, Method::DELETE, &uri, None, Some(&cookies)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "ok": true, "message": "User deleted" })
    );

    let response = send(&app, Method::DELETE, &uri, None, Some(&cookies)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["message"], "User not found");

    let response = send(&app, Method::DELETE, "/api/admin/users/abc", None, Some(&cookies)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "Invalid user id");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_users_paginates(pool: MySqlPool) {
    let app = common::build_test_app(pool.clone());
    let (_, cookies) = admin_session(&pool, &app).await;
    for i in 0..4 {
        create_user(&pool, &format!("u{i}@x.com"), Role::User).await;
    }

    let response = get(&app, "/api/admin/users?page=2&limit=2", Some(&cookies)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["total"], 5);
    assert_eq!(json["data"]["page"], 2);
    assert_eq!(json["data"]["limit"], 2);
    assert_eq!(json["data"]["total_pages"], 3);
    let users = json["data"]["users"].as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert!(users[0].get("password_hash").is_none());
    assert!(users[0]["is_active"].is_boolean());

    let response = get(&app, "/api/admin/users?limit=500", Some(&cookies)).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["limit"], 100);
    assert_eq!(json["data"]["page"], 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_users_huge_page_is_empty(pool: MySqlPool) {
    let app = common::build_test_app(pool.clone());
    let (_, cookies) = admin_session(&pool, &app).await;

    let uri = format!("/api/admin/users?page={}&limit=100", i64::MAX);
    let response = get(&app, &uri, Some(&cookies)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["total"], 1);
    assert_eq!(json["data"]["users"], json!([]));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_patch_user(pool: MySqlPool) {
    let app = common::build_test_app(pool.clone());
    let (_, cookies) = admin_session(&pool, &app).await;
    let target = create_user(&pool, "t@x.com", Role::User).await;
    create_user(&pool, "taken@x.com", Role::User).await;
    let uri = format!("/api/admin/users/{}", target.id);

    let response = send(
        &app,
        Method::PATCH,
        &uri,
        Some(json!({ "role": "admin", "username": null })),
        Some(&cookies),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["role"], "admin");
    assert_eq!(json["data"]["username"], serde_json::Value::Null);
    assert_eq!(json["data"]["email"], "t@x.com");

    let response = send(&app, Method::PATCH, &uri, Some(json!({})), Some(&cookies)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "No valid fields to update");

    let response = send(
        &app,
        Method::PATCH,
        &uri,
        Some(json!({ "role": "owner" })),
        Some(&cookies),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["message"],
        "Role must be \"user\" or \"admin\""
    );

    let response = send(
        &app,
        Method::PATCH,
        &uri,
        Some(json!({ "email": "taken@x.com" })),
        Some(&cookies),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = send(
        &app,
        Method::PATCH,
        "/api/admin/users/999999",
        Some(json!({ "is_active": false })),
        Some(&cookies),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["message"], "User not found");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_deactivated_user_loses_access(pool: MySqlPool) {
    let app = common::build_test_app(pool.clone());
    let (_, admin_cookies) = admin_session(&pool, &app).await;
    create_user(&pool, "d@x.com", Role::User).await;
    let user = UserRepo::find_by_email(&pool, "d@x.com").await.unwrap().unwrap();
    let user_cookies = login(&app, "d@x.com", TEST_PASSWORD).await;

    let uri = format!("/api/admin/users/{}", user.id);
    let response = send(
        &app,
        Method::PATCH,
        &uri,
        Some(json!({ "is_active": false })),
        Some(&admin_cookies),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["is_active"], false);

    let response = get(&app, "/api/me", Some(&user_cookies)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_stats_endpoints(pool: MySqlPool) {
    let app = common::build_test_app(pool.clone());
    let (_, cookies) = admin_session(&pool, &app).await;

    for page in ["movie", "movie", "series"] {
        let body = json!({ "page_type": page, "wp_post_id": 7, "page_slug": "seven" });
        let response = post_json(&app, "/api/views", body, None).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = get(&app, "/api/admin/stats/views", Some(&cookies)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let views = body_json(response).await["data"].clone();
    assert_eq!(views["total_views"], 3);
    assert_eq!(views["views_today"], 3);
    assert_eq!(views["top_movies"][0]["wp_post_id"], 7);
    assert_eq!(views["top_movies"][0]["view_count"], 2);
    assert_eq!(views["top_series"][0]["view_count"], 1);

    let response = get(&app, "/api/admin/stats/users", Some(&cookies)).await;
    let users = body_json(response).await["data"].clone();
    assert_eq!(users["total_users"], 1);
    assert_eq!(users["users_this_month"], 1);
    assert_eq!(users["users_with_lists"], 0);

    let response = get(&app, "/api/admin/dashboard", Some(&cookies)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let dashboard = body_json(response).await["data"].clone();
    assert_eq!(dashboard["users"]["total_users"], 1);
    assert_eq!(dashboard["views"]["total_views"], 3);
    assert_eq!(dashboard["lists"]["total_watchlist_items"], 0);
    assert_eq!(dashboard["recent_users"][0]["email"], "root@x.com");
}
