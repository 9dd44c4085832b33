//! Database-backed tests for project creation and plan usage.

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

use inflio_db::repositories::{ProfileRepo, ProjectRepo};
use inflio_storage::MemoryProvider;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn create_project_as(pool: &PgPool, user: &str, title: &str) -> (StatusCode, Value) {
    let app = common::build_app_with(
        pool.clone(),
        common::test_config(),
        Arc::new(MemoryProvider::new()),
    );
    let body = json!({
        "title": title,
        "video_url": "https://cdn.example.com/source.mp4",
    });
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/projects")
        .header("content-type", "application/json")
        .header("x-user-id", user)
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

async fn set_usage_limit(pool: &PgPool, user: &str, limit: i32) {
    ProfileRepo::find_or_create(pool, user).await.unwrap();
    sqlx::query("UPDATE profiles SET usage_limit = $2 WHERE user_id = $1")
        .bind(user)
        .bind(limit)
        .execute(pool)
        .await
        .unwrap();
}

// ---------------------------------------------------------------------------
// Test: creation consumes plan usage and stops at the limit
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn create_consumes_usage_and_stops_at_the_limit(pool: PgPool) {
    set_usage_limit(&pool, "user-1", 1).await;

    let (status, json) = create_project_as(&pool, "user-1", "First video").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["data"]["usage"]["used"], 1);
    assert_eq!(json["data"]["usage"]["limit"], 1);

    let (status, json) = create_project_as(&pool, "user-1", "Second video").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["code"], "FORBIDDEN");

    let projects = ProjectRepo::list_for_user(&pool, "user-1").await.unwrap();
    assert_eq!(projects.len(), 1);
}

// ---------------------------------------------------------------------------
// Test: the usage gate checks and increments in one statement
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn usage_consumption_is_a_single_conditional_update(pool: PgPool) {
    set_usage_limit(&pool, "user-1", 1).await;

    let first = ProfileRepo::try_consume_usage(&pool, "user-1")
        .await
        .unwrap()
        .expect("one unit should remain");
    assert_eq!(first.usage_used, 1);

    // Exhausted: a concurrent caller that lost the race gets nothing
    // back instead of an over-limit row.
    let second = ProfileRepo::try_consume_usage(&pool, "user-1").await.unwrap();
    assert!(second.is_none());

    let profile = ProfileRepo::find_or_create(&pool, "user-1").await.unwrap();
    assert_eq!(profile.usage_used, 1);
}
