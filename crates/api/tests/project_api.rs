//! HTTP-level integration tests for the `/api/projects` endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json, put_json};
use folio_db::repositories::ProjectRepo;
use serde_json::json;

async fn create_project(pool: &folio_db::DbPool, body: serde_json::Value) -> serde_json::Value {
    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/projects", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

#[tokio::test]
async fn test_create_then_get_portfolio_site() {
    let (_dir, pool) = common::test_pool().await;
    let created = create_project(&pool, json!({"title": "Portfolio Site"})).await;

    assert_eq!(created["id"], 1);
    assert_eq!(created["title"], "Portfolio Site");
    assert_eq!(created["description"], "");
    assert_eq!(created["technologies"], "");
    assert_eq!(created["link"], "");

    let app = common::build_test_app(pool);
    let response = get(app, "/api/projects/1").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, created);
}

#[tokio::test]
async fn test_create_project_with_all_fields() {
    let (_dir, pool) = common::test_pool().await;
    let created = create_project(
        &pool,
        json!({
            "title": "Folio",
            "description": "Personal site backend",
            "technologies": "Rust, Axum, SQLite",
            "link": "https://example.com/folio"
        }),
    )
    .await;

    assert_eq!(created["description"], "Personal site backend");
    assert_eq!(created["technologies"], "Rust, Axum, SQLite");
    assert_eq!(created["link"], "https://example.com/folio");
    assert!(created["created_at"].is_string());
}

#[tokio::test]
async fn test_create_project_missing_title_returns_400() {
    let (_dir, pool) = common::test_pool().await;
    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/projects", json!({"description": "untitled"})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Title is required");
    assert_eq!(ProjectRepo::count(&pool).await.unwrap(), 0);
}

#[tokio::test]
async fn test_create_project_with_wrong_field_type_returns_400() {
    let (_dir, pool) = common::test_pool().await;
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/projects", json!({"title": 42})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_get_nonexistent_project_returns_404() {
    let (_dir, pool) = common::test_pool().await;
    let app = common::build_test_app(pool);
    let response = get(app, "/api/projects/999999").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Project not found");
}

#[tokio::test]
async fn test_list_projects_newest_first() {
    let (_dir, pool) = common::test_pool().await;
    let p1 = create_project(&pool, json!({"title": "P1"})).await;
    let p2 = create_project(&pool, json!({"title": "P2"})).await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/projects").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json, json!([p2, p1]));
}

#[tokio::test]
async fn test_update_project() {
    let (_dir, pool) = common::test_pool().await;
    let created = create_project(&pool, json!({"title": "Original", "link": "https://old"})).await;
    let id = created["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        &format!("/api/projects/{id}"),
        json!({
            "title": "Updated",
            "description": "now with docs",
            "technologies": "Rust",
            "link": "https://new"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Project updated successfully");

    let app = common::build_test_app(pool);
    let stored = body_json(get(app, &format!("/api/projects/{id}")).await).await;
    assert_eq!(stored["title"], "Updated");
    assert_eq!(stored["description"], "now with docs");
    assert_eq!(stored["technologies"], "Rust");
    assert_eq!(stored["link"], "https://new");
    assert_eq!(stored["created_at"], created["created_at"]);
}

#[tokio::test]
async fn test_update_nonexistent_project_returns_404_and_leaves_table() {
    let (_dir, pool) = common::test_pool().await;
    let existing = create_project(&pool, json!({"title": "Keep"})).await;

    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        "/api/projects/9999",
        json!({"title": "Ghost", "description": "", "technologies": "", "link": ""}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let app = common::build_test_app(pool);
    let listed = body_json(get(app, "/api/projects").await).await;
    assert_eq!(listed, json!([existing]));
}

#[tokio::test]
async fn test_delete_project_then_get_returns_404() {
    let (_dir, pool) = common::test_pool().await;
    let created = create_project(&pool, json!({"title": "Delete Me"})).await;
    let id = created["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/projects/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Project deleted successfully");

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/projects/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_nonexistent_project_returns_404() {
    let (_dir, pool) = common::test_pool().await;
    let app = common::build_test_app(pool);
    let response = delete(app, "/api/projects/9999").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
