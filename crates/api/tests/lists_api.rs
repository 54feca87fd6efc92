//! HTTP-level integration tests for `/api/me` and the list endpoints.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, create_user, get, login, post_json, send, TEST_PASSWORD};
use serde_json::json;
use sqlx::MySqlPool;
use tratics_core::roles::Role;

async fn delete_json(
    app: &axum::Router,
    body: serde_json::Value,
    cookies: &str,
) -> axum::response::Response {
    send(app, Method::DELETE, "/api/me/lists", Some(body), Some(cookies)).await
}

/// register -> login -> me -> add twice -> delete -> delete again.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_end_to_end_list_scenario(pool: MySqlPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        &app,
        "/api/auth/register",
        json!({ "email": "a@x.com", "username": "alice", "password": "password123" }),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["data"]["user"]["role"], "user");

    let cookies = login(&app, "a@x.com", "password123").await;
    assert!(cookies.contains("access_token="));
    assert!(cookies.contains("refresh_token="));

    let response = get(&app, "/api/auth/me", Some(&cookies)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["user"]["email"], "a@x.com");

    let item = json!({
        "list_type": "watchlist",
        "item_type": "movie",
        "wp_post_id": 42,
        "wp_slug": "foo",
    });
    let first = post_json(&app, "/api/me/lists", item.clone(), Some(&cookies)).await;
    assert_eq!(first.status(), StatusCode::OK);
    let first = body_json(first).await;
    let second = post_json(&app, "/api/me/lists", item, Some(&cookies)).await;
    assert_eq!(second.status(), StatusCode::OK);
    let second = body_json(second).await;
    assert_eq!(first["data"]["id"], second["data"]["id"]);
    assert_eq!(first["data"]["wp_slug"], "foo");

    let key = json!({ "list_type": "watchlist", "item_type": "movie", "wp_post_id": 42 });
    let response = delete_json(&app, key.clone(), &cookies).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "ok": true, "message": "Item removed from list" })
    );

    let response = delete_json(&app, key, &cookies).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["message"], "Item not found in list");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_profile_shape(pool: MySqlPool) {
    let user = create_user(&pool, "p@x.com", Role::User).await;
    let app = common::build_test_app(pool);
    let cookies = login(&app, "p@x.com", TEST_PASSWORD).await;

    let response = get(&app, "/api/me", Some(&cookies)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], user.id);
    assert_eq!(json["data"]["email"], "p@x.com");
    assert!(json["data"]["created_at"].is_string());
    assert!(json["data"].get("role").is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_routes_require_auth(pool: MySqlPool) {
    let app = common::build_test_app(pool);

    for uri in ["/api/me", "/api/me/lists", "/api/me/lists/check"] {
        let response = get(&app, uri, None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_add_validation(pool: MySqlPool) {
    create_user(&pool, "v@x.com", Role::User).await;
    let app = common::build_test_app(pool);
    let cookies = login(&app, "v@x.com", TEST_PASSWORD).await;

    let cases = [
        (
            json!({ "list_type": "watchlist", "item_type": "movie", "wp_post_id": 1 }),
            "Missing required fields: list_type, item_type, wp_post_id, wp_slug",
        ),
        (
            json!({ "list_type": "later", "item_type": "movie", "wp_post_id": 1, "wp_slug": "s" }),
            "Invalid list_type. Must be \"watchlist\" or \"favorite\"",
        ),
        (
            json!({ "list_type": "favorite", "item_type": "song", "wp_post_id": 1, "wp_slug": "s" }),
            "Invalid item_type. Must be \"movie\", \"series\", or \"episode\"",
        ),
        (
            json!({ "list_type": "favorite", "item_type": "movie", "wp_post_id": -3, "wp_slug": "s" }),
            "Invalid wp_post_id",
        ),
    ];

    for (body, message) in cases {
        let response = post_json(&app, "/api/me/lists", body, Some(&cookies)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["message"], message);
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_add_trims_slug_and_rejects_blank(pool: MySqlPool) {
    create_user(&pool, "s@x.com", Role::User).await;
    let app = common::build_test_app(pool);
    let cookies = login(&app, "s@x.com", TEST_PASSWORD).await;

    let body = json!({
        "list_type": "watchlist",
        "item_type": "movie",
        "wp_post_id": 11,
        "wp_slug": "  blade-runner \n"
    });
    let response = post_json(&app, "/api/me/lists", body, Some(&cookies)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["wp_slug"], "blade-runner");

    let body = json!({
        "list_type": "watchlist",
        "item_type": "movie",
        "wp_post_id": 12,
        "wp_slug": "   "
    });
    let response = post_json(&app, "/api/me/lists", body, Some(&cookies)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_get_lists_filters(pool: MySqlPool) {
    create_user(&pool, "f@x.com", Role::User).await;
    let app = common::build_test_app(pool);
    let cookies = login(&app, "f@x.com", TEST_PASSWORD).await;

    for (list_type, item_type, id) in [
        ("watchlist", "movie", 1),
        ("watchlist", "series", 2),
        ("favorite", "episode", 3),
    ] {
        let body = json!({
            "list_type": list_type,
            "item_type": item_type,
            "wp_post_id": id,
            "wp_slug": format!("slug-{id}"),
        });
        let response = post_json(&app, "/api/me/lists", body, Some(&cookies)).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = get(&app, "/api/me/lists", Some(&cookies)).await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 3);

    let response = get(&app, "/api/me/lists?list_type=watchlist", Some(&cookies)).await;
    let json = body_json(response).await;
    let ids: Vec<i64> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["wp_post_id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![2, 1], "newest first");

    let response = get(&app, "/api/me/lists?item_type=episode", Some(&cookies)).await;
    assert_eq!(body_json(response).await["data"][0]["wp_post_id"], 3);

    let response = get(&app, "/api/me/lists?list_type=later", Some(&cookies)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_check_list_status(pool: MySqlPool) {
    create_user(&pool, "c@x.com", Role::User).await;
    let app = common::build_test_app(pool);
    let cookies = login(&app, "c@x.com", TEST_PASSWORD).await;

    let uri = "/api/me/lists/check?list_type=favorite&item_type=series&wp_post_id=9";
    let response = get(&app, uri, Some(&cookies)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"], json!({ "isInList": false }));

    let body = json!({
        "list_type": "favorite",
        "item_type": "series",
        "wp_post_id": 9,
        "wp_slug": "show",
    });
    post_json(&app, "/api/me/lists", body, Some(&cookies)).await;

    let response = get(&app, uri, Some(&cookies)).await;
    assert_eq!(body_json(response).await["data"], json!({ "isInList": true }));

    let response = get(&app, "/api/me/lists/check?list_type=favorite", Some(&cookies)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["message"],
        "Missing required query params: list_type, item_type, wp_post_id"
    );

    let response = get(
        &app,
        "/api/me/lists/check?list_type=favorite&item_type=series&wp_post_id=abc",
        Some(&cookies),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "Invalid wp_post_id");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_lists_are_private_to_each_user(pool: MySqlPool) {
    create_user(&pool, "one@x.com", Role::User).await;
    create_user(&pool, "two@x.com", Role::User).await;
    let app = common::build_test_app(pool);
    let one = login(&app, "one@x.com", TEST_PASSWORD).await;
    let two = login(&app, "two@x.com", TEST_PASSWORD).await;

    let body = json!({
        "list_type": "watchlist",
        "item_type": "movie",
        "wp_post_id": 5,
        "wp_slug": "five",
    });
    post_json(&app, "/api/me/lists", body, Some(&one)).await;

    let response = get(&app, "/api/me/lists", Some(&two)).await;
    assert_eq!(body_json(response).await["data"], json!([]));

    let key = json!({ "list_type": "watchlist", "item_type": "movie", "wp_post_id": 5 });
    let response = delete_json(&app, key, &two).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
