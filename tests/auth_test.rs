mod common;

use assert_matches::assert_matches;
use axum::http::StatusCode;
use chrono::Duration;
use pretty_assertions::assert_eq;
use serde_json::json;

use common::{TestApp, TEST_PASSWORD, TEST_SECRET};
use volley_platform::auth::{AuthError, JwtService, UserRole};
use volley_platform::store::UserStore;
use volley_platform::ErrorKind;

#[tokio::test]
async fn test_login_returns_bearer_token() {
    let app = TestApp::new();
    let coach = app.create_user(UserRole::Coach, None).await;

    let (status, body) = app
        .post(
            "/api/auth/login",
            None,
            json!({ "email": coach.email, "password": TEST_PASSWORD }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "bearer");
    assert_eq!(body["expires_in"], 3600);

    let token = body["access_token"].as_str().unwrap();
    assert_eq!(app.jwt.verify(token).unwrap(), coach.id.to_string());
}

#[tokio::test]
async fn test_unknown_email_and_wrong_password_are_indistinguishable() {
    let app = TestApp::new();
    let coach = app.create_user(UserRole::Coach, None).await;

    let ghost = app
        .post(
            "/api/auth/login",
            None,
            json!({ "email": "ghost@x.com", "password": "whatever" }),
        )
        .await;
    let wrong = app
        .post(
            "/api/auth/login",
            None,
            json!({ "email": coach.email, "password": "not-the-password" }),
        )
        .await;

    assert_eq!(ghost.0, StatusCode::UNAUTHORIZED);
    assert_eq!(ghost.1["message"], "Incorrect email or password");
    assert_eq!(ghost, wrong);
}

#[tokio::test]
async fn test_authenticate_errors_match() {
    let app = TestApp::new();
    let coach = app.create_user(UserRole::Coach, None).await;

    let missing = app.state.auth.authenticate("ghost@x.com", TEST_PASSWORD).await.unwrap_err();
    let wrong = app.state.auth.authenticate(&coach.email, "nope").await.unwrap_err();

    assert_eq!(missing.kind(), ErrorKind::InvalidCredentials);
    assert_eq!(missing.kind(), wrong.kind());
    assert_eq!(missing.to_string(), wrong.to_string());
}

#[tokio::test]
async fn test_me_returns_public_profile() {
    let app = TestApp::new();
    let coach = app.create_user(UserRole::Coach, None).await;
    let token = app.token_for(&coach);

    let (status, body) = app.get("/api/auth/me", Some(&token)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], coach.id);
    assert_eq!(body["email"], coach.email.as_str());
    assert_eq!(body["role"], "coach");
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_me_rejects_bad_credentials() {
    let app = TestApp::new();
    let coach = app.create_user(UserRole::Coach, None).await;

    let (status, body) = app.get("/api/auth/me", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "missing_token");

    let (status, body) = app.get("/api/auth/me", Some("not.a.jwt")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "malformed");

    let expired = app.jwt.issue(&coach.id.to_string(), Duration::zero()).unwrap();
    let (status, body) = app.get("/api/auth/me", Some(&expired)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "expired");

    let foreign = JwtService::new("another-secret", Duration::minutes(5))
        .create_access_token(coach.id)
        .unwrap();
    let (status, body) = app.get("/api/auth/me", Some(&foreign.token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "invalid_signature");
}

#[tokio::test]
async fn test_token_for_deleted_subject_is_user_not_found() {
    let app = TestApp::new();
    let token = JwtService::new(TEST_SECRET, Duration::minutes(5))
        .create_access_token(4242)
        .unwrap();

    let (status, body) = app.get("/api/auth/me", Some(&token.token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "user_not_found");
}

#[tokio::test]
async fn test_role_change_between_issuance_and_resolution() {
    let app = TestApp::new();
    let reviewer = app.create_user(UserRole::FederationAdmin, None).await;
    let token = app.token_for(&reviewer);

    let (status, _) = app.get("/api/suggestions/exercises", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);

    app.store
        .update_user_role(reviewer.id, UserRole::Coach)
        .await
        .unwrap();

    let (status, body) = app.get("/api/suggestions/exercises", Some(&token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "forbidden");

    assert_matches!(
        app.state.guard.authorize(&token, UserRole::REVIEWERS).await,
        Err(AuthError::Forbidden)
    );
}
