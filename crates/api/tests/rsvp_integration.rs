//! Integration tests for the public RSVP endpoint.
//!
//! Requires a PostgreSQL database (see `TEST_DATABASE_URL`).

mod common;

use axum::http::{Method, StatusCode};
use axum::Router;
use serde_json::json;
use tower::ServiceExt;

use common::*;

async fn setup() -> (Router, sqlx::PgPool) {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let app = create_test_app(test_config(), pool.clone());
    (app, pool)
}

fn rsvp_body(wedding_id: uuid::Uuid, email: &str, status: &str) -> serde_json::Value {
    json!({
        "wedding_id": wedding_id,
        "name": "Clara Novak",
        "email": email,
        "status": status,
        "number_of_guests": 2,
        "message": "Looking forward to it!"
    })
}

#[tokio::test]
async fn test_rsvp_creates_guest() {
    let (app, _pool) = setup().await;
    let auth = create_authenticated_owner();
    let (wedding_id, _slug) = create_test_wedding(&app, &auth).await;

    let email = unique_test_email();
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/public/v1/rsvp",
            rsvp_body(wedding_id, &email, "attending"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = parse_response_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["created"], true);
    assert_eq!(body["guest"]["email"], email);
    assert_eq!(body["guest"]["status"], "attending");
    assert_eq!(body["guest"]["number_of_guests"], 2);
    assert_eq!(body["guest"]["checked_in"], false);
    // A fresh RSVP mints the guest's QR token
    assert!(body["guest"]["qr_code"]
        .as_str()
        .unwrap()
        .starts_with("guest-"));
}

#[tokio::test]
async fn test_rsvp_resubmission_updates_in_place() {
    let (app, _pool) = setup().await;
    let auth = create_authenticated_owner();
    let (wedding_id, _slug) = create_test_wedding(&app, &auth).await;

    let email = unique_test_email();
    let first = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/public/v1/rsvp",
            rsvp_body(wedding_id, &email, "attending"),
        ))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);
    let first_body = parse_response_body(first).await;
    let guest_id = first_body["guest"]["id"].as_str().unwrap().to_string();
    let qr_code = first_body["guest"]["qr_code"].as_str().unwrap().to_string();

    let mut update = rsvp_body(wedding_id, &email, "not-attending");
    update["number_of_guests"] = json!(1);
    update["message"] = json!("Sorry, plans changed.");
    let second = app
        .clone()
        .oneshot(json_request(Method::POST, "/api/public/v1/rsvp", update))
        .await
        .unwrap();

    assert_eq!(second.status(), StatusCode::OK);
    let second_body = parse_response_body(second).await;
    assert_eq!(second_body["created"], false);
    // Same guest record, updated fields, original QR token preserved
    assert_eq!(second_body["guest"]["id"], guest_id.as_str());
    assert_eq!(second_body["guest"]["status"], "not-attending");
    assert_eq!(second_body["guest"]["number_of_guests"], 1);
    assert_eq!(second_body["guest"]["message"], "Sorry, plans changed.");
    assert_eq!(second_body["guest"]["qr_code"], qr_code.as_str());
}

#[tokio::test]
async fn test_rsvp_email_is_case_insensitive() {
    let (app, _pool) = setup().await;
    let auth = create_authenticated_owner();
    let (wedding_id, _slug) = create_test_wedding(&app, &auth).await;

    let email = unique_test_email();
    let upper = email.to_uppercase();

    let first = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/public/v1/rsvp",
            rsvp_body(wedding_id, &upper, "attending"),
        ))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);
    let first_body = parse_response_body(first).await;
    assert_eq!(first_body["guest"]["email"], email);

    let second = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/public/v1/rsvp",
            rsvp_body(wedding_id, &email, "attending"),
        ))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::OK);
    let second_body = parse_response_body(second).await;
    assert_eq!(second_body["created"], false);
    assert_eq!(second_body["guest"]["id"], first_body["guest"]["id"]);
}

#[tokio::test]
async fn test_rsvp_resolves_wedding_by_slug() {
    let (app, _pool) = setup().await;
    let auth = create_authenticated_owner();
    let (wedding_id, slug) = create_test_wedding(&app, &auth).await;

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/public/v1/rsvp",
            json!({
                "wedding_slug": slug,
                "name": "Clara Novak",
                "email": unique_test_email(),
                "status": "attending"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = parse_response_body(response).await;
    assert_eq!(body["guest"]["wedding_id"], wedding_id.to_string());
    // Omitted party size defaults to 1
    assert_eq!(body["guest"]["number_of_guests"], 1);
}

#[tokio::test]
async fn test_rsvp_party_size_coerced() {
    let (app, _pool) = setup().await;
    let auth = create_authenticated_owner();
    let (wedding_id, _slug) = create_test_wedding(&app, &auth).await;

    let mut body = rsvp_body(wedding_id, &unique_test_email(), "attending");
    body["number_of_guests"] = json!(0);
    let response = app
        .clone()
        .oneshot(json_request(Method::POST, "/api/public/v1/rsvp", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let parsed = parse_response_body(response).await;
    assert_eq!(parsed["guest"]["number_of_guests"], 1);

    let mut body = rsvp_body(wedding_id, &unique_test_email(), "attending");
    body["number_of_guests"] = json!(500);
    let response = app
        .clone()
        .oneshot(json_request(Method::POST, "/api/public/v1/rsvp", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let parsed = parse_response_body(response).await;
    assert_eq!(parsed["guest"]["number_of_guests"], 20);
}

#[tokio::test]
async fn test_rsvp_requires_exactly_one_wedding_ref() {
    let (app, _pool) = setup().await;
    let auth = create_authenticated_owner();
    let (wedding_id, slug) = create_test_wedding(&app, &auth).await;

    // Both references
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/public/v1/rsvp",
            json!({
                "wedding_id": wedding_id,
                "wedding_slug": slug,
                "name": "Clara Novak",
                "email": unique_test_email(),
                "status": "attending"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Neither reference
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/public/v1/rsvp",
            json!({
                "name": "Clara Novak",
                "email": unique_test_email(),
                "status": "attending"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_rsvp_unknown_wedding_not_found() {
    let (app, _pool) = setup().await;

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/public/v1/rsvp",
            rsvp_body(uuid::Uuid::new_v4(), &unique_test_email(), "attending"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_rsvp_rejects_invalid_email() {
    let (app, _pool) = setup().await;
    let auth = create_authenticated_owner();
    let (wedding_id, _slug) = create_test_wedding(&app, &auth).await;

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/public/v1/rsvp",
            rsvp_body(wedding_id, "not-an-email", "attending"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_rsvp_does_not_reset_check_in_state() {
    let (app, _pool) = setup().await;
    let auth = create_authenticated_owner();
    let (wedding_id, _slug) = create_test_wedding(&app, &auth).await;

    let email = unique_test_email();
    let first = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/public/v1/rsvp",
            rsvp_body(wedding_id, &email, "attending"),
        ))
        .await
        .unwrap();
    let first_body = parse_response_body(first).await;
    let qr_code = first_body["guest"]["qr_code"].as_str().unwrap().to_string();

    // Check the guest in at the venue
    let check_in = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            &format!("/api/public/v1/weddings/{}/check-in", wedding_id),
            json!({ "qr_code": qr_code }),
        ))
        .await
        .unwrap();
    assert_eq!(check_in.status(), StatusCode::OK);

    // A late resubmission must not undo the check-in
    let second = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/public/v1/rsvp",
            rsvp_body(wedding_id, &email, "not-attending"),
        ))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::OK);
    let second_body = parse_response_body(second).await;
    assert_eq!(second_body["guest"]["checked_in"], true);
    assert!(second_body["guest"]["checked_in_at"].is_string());
}
