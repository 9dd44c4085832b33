//! Database-backed tests for the personas API.
//!
//! Rows are seeded through the repository layer, then exercised over
//! HTTP with different caller identities.

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

use inflio_db::models::persona::{CreatePersona, PERSONA_STATUS_ANALYZING};
use inflio_db::repositories::PersonaRepo;
use inflio_storage::MemoryProvider;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn test_app(pool: PgPool) -> Router {
    common::build_app_with(pool, common::test_config(), Arc::new(MemoryProvider::new()))
}

async fn patch_json_as(pool: &PgPool, user: &str, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("PATCH")
        .uri(uri)
        .header("content-type", "application/json")
        .header("x-user-id", user)
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = test_app(pool.clone()).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

fn new_persona(name: &str) -> CreatePersona {
    CreatePersona {
        name: name.to_string(),
        description: None,
        photo_urls: vec![],
    }
}

// ---------------------------------------------------------------------------
// Test: a caller cannot flip another user's persona status
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn status_update_only_touches_the_owners_persona(pool: PgPool) {
    let persona = PersonaRepo::create(&pool, "owner-1", &new_persona("Studio Look"))
        .await
        .unwrap();

    let uri = format!("/api/v1/personas/{}/status", persona.id);
    let (status, json) =
        patch_json_as(&pool, "intruder-1", &uri, json!({ "status": "ready" })).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");

    let rows = PersonaRepo::list_for_user(&pool, "owner-1").await.unwrap();
    assert_eq!(rows[0].status, PERSONA_STATUS_ANALYZING);
}

// ---------------------------------------------------------------------------
// Test: the owner can move a persona through the status pipeline
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn owner_can_update_persona_status(pool: PgPool) {
    let persona = PersonaRepo::create(&pool, "owner-1", &new_persona("Studio Look"))
        .await
        .unwrap();

    let uri = format!("/api/v1/personas/{}/status", persona.id);
    let (status, json) = patch_json_as(&pool, "owner-1", &uri, json!({ "status": "ready" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["status"], "ready");
}
