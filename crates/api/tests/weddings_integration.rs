//! Integration tests for wedding management endpoints.
//!
//! Requires a PostgreSQL database (see `TEST_DATABASE_URL`).

mod common;

use axum::http::{Method, StatusCode};
use axum::Router;
use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;

use common::*;

async fn setup() -> (Router, sqlx::PgPool) {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(test_config(), pool.clone());
    (app, pool)
}

#[tokio::test]
async fn test_create_and_get_wedding() {
    let (app, _pool) = setup().await;
    let auth = create_authenticated_owner();

    let slug = unique_slug();
    let response = app
        .clone()
        .oneshot(json_request_with_auth(
            Method::POST,
            "/api/v1/weddings",
            json!({
                "slug": slug,
                "bride_name": "Anna",
                "groom_name": "Ben",
                "wedding_date": "2026-06-20",
                "venue": "Rosewood Hall",
                "city": "Vienna",
                "country": "Austria"
            }),
            &auth.access_token,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = parse_response_body(response).await;
    assert_eq!(body["slug"], slug);
    assert_eq!(body["bride_name"], "Anna");
    assert_eq!(body["owner_user_id"], auth.user_id.to_string());
    assert_eq!(body["is_private"], false);
    let wedding_id = body["id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(get_request_with_auth(
            &format!("/api/v1/weddings/{}", wedding_id),
            &auth.access_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["id"], wedding_id);
    assert_eq!(body["wedding_date"], "2026-06-20");
}

#[tokio::test]
async fn test_create_wedding_duplicate_slug_conflict() {
    let (app, _pool) = setup().await;
    let auth = create_authenticated_owner();
    let (_wedding_id, slug) = create_test_wedding(&app, &auth).await;

    // Slugs are globally unique, even across owners
    let stranger = create_authenticated_owner();
    let response = app
        .clone()
        .oneshot(json_request_with_auth(
            Method::POST,
            "/api/v1/weddings",
            json!({
                "slug": slug,
                "bride_name": "Clara",
                "groom_name": "David",
                "wedding_date": "2027-01-15"
            }),
            &stranger.access_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_create_wedding_rejects_bad_slug() {
    let (app, _pool) = setup().await;
    let auth = create_authenticated_owner();

    let response = app
        .clone()
        .oneshot(json_request_with_auth(
            Method::POST,
            "/api/v1/weddings",
            json!({
                "slug": "Not A Valid Slug!",
                "bride_name": "Anna",
                "groom_name": "Ben",
                "wedding_date": "2026-06-20"
            }),
            &auth.access_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_weddings_only_own() {
    let (app, _pool) = setup().await;
    let auth = create_authenticated_owner();
    let stranger = create_authenticated_owner();

    let (first, _) = create_test_wedding(&app, &auth).await;
    let (second, _) = create_test_wedding(&app, &auth).await;
    create_test_wedding(&app, &stranger).await;

    let response = app
        .clone()
        .oneshot(get_request_with_auth("/api/v1/weddings", &auth.access_token))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    let ids: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&first.to_string().as_str()));
    assert!(ids.contains(&second.to_string().as_str()));
}

#[tokio::test]
async fn test_get_foreign_wedding_not_found() {
    let (app, _pool) = setup().await;
    let auth = create_authenticated_owner();
    let stranger = create_authenticated_owner();
    let (wedding_id, _slug) = create_test_wedding(&app, &auth).await;

    // Ownership scoping hides the wedding entirely
    let response = app
        .clone()
        .oneshot(get_request_with_auth(
            &format!("/api/v1/weddings/{}", wedding_id),
            &stranger.access_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_wedding_cascades_to_guests() {
    let (app, pool) = setup().await;
    let auth = create_authenticated_owner();
    let (wedding_id, _slug) = create_test_wedding(&app, &auth).await;
    create_test_guest(&app, &auth, wedding_id, &unique_test_email()).await;

    let response = app
        .clone()
        .oneshot(delete_request_with_auth(
            &format!("/api/v1/weddings/{}", wedding_id),
            &auth.access_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .clone()
        .oneshot(get_request_with_auth(
            &format!("/api/v1/weddings/{}", wedding_id),
            &auth.access_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let guests: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM guests WHERE wedding_id = $1")
        .bind(wedding_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(guests, 0);
}

#[tokio::test]
async fn test_delete_foreign_wedding_not_found() {
    let (app, _pool) = setup().await;
    let auth = create_authenticated_owner();
    let stranger = create_authenticated_owner();
    let (wedding_id, _slug) = create_test_wedding(&app, &auth).await;

    let response = app
        .clone()
        .oneshot(delete_request_with_auth(
            &format!("/api/v1/weddings/{}", wedding_id),
            &stranger.access_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Still there for the real owner
    let response = app
        .clone()
        .oneshot(get_request_with_auth(
            &format!("/api/v1/weddings/{}", wedding_id),
            &auth.access_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_wedding_endpoints_require_auth() {
    let (app, _pool) = setup().await;

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/v1/weddings",
            json!({
                "slug": unique_slug(),
                "bride_name": "Anna",
                "groom_name": "Ben",
                "wedding_date": "2026-06-20"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .clone()
        .oneshot(
            axum::http::Request::builder()
                .method(Method::GET)
                .uri("/api/v1/weddings")
                .header("Authorization", "Bearer not-a-real-token")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .clone()
        .oneshot(
            axum::http::Request::builder()
                .method(Method::GET)
                .uri(format!("/api/v1/weddings/{}", Uuid::new_v4()))
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_endpoints() {
    let (app, _pool) = setup().await;

    for path in ["/api/health", "/api/health/ready", "/api/health/live"] {
        let response = app
            .clone()
            .oneshot(
                axum::http::Request::builder()
                    .method(Method::GET)
                    .uri(path)
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK, "path: {}", path);
    }
}
