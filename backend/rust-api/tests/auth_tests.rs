mod common;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

#[tokio::test]
async fn request_otp_requires_email() {
    let (app, state) = common::create_test_app().await;

    let response = app
        .oneshot(post_json("/api/auth/request-otp", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert!(state.db.read().await.unwrap().otps.is_empty());
}

#[tokio::test]
async fn request_otp_rejects_malformed_email() {
    let (app, _state) = common::create_test_app().await;

    let response = app
        .oneshot(post_json(
            "/api/auth/request-otp",
            json!({ "email": "not-an-email" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn otp_flow_issues_token_accepted_by_me_endpoint() {
    let (app, state) = common::create_test_app().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/auth/request-otp",
            json!({ "email": "anna@example.com" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // without SMTP configured the OTP lands in the store and the log
    let otp = state.db.read().await.unwrap().otps[0].otp.clone();

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/auth/verify-otp",
            json!({ "email": "anna@example.com", "otp": otp, "name": "Anna" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let auth: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(auth["ok"], true);
    assert_eq!(auth["user"]["name"], "Anna");
    let token = auth["token"].as_str().unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/me")
                .header("authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let me: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(me["email"], "anna@example.com");
}

#[tokio::test]
async fn invalid_otp_is_rejected() {
    let (app, _state) = common::create_test_app().await;

    app.clone()
        .oneshot(post_json(
            "/api/auth/request-otp",
            json!({ "email": "anna@example.com" }),
        ))
        .await
        .unwrap();

    let response = app
        .oneshot(post_json(
            "/api/auth/verify-otp",
            json!({ "email": "anna@example.com", "otp": "000000" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"], "invalid otp");
}

#[tokio::test]
async fn me_requires_a_valid_token() {
    let (app, _state) = common::create_test_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/me")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/me")
                .header("authorization", "Bearer not-a-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
