mod common;

use authkit::session_token_hash;
use common::TestApp;
use common::TestUser;
use reqwest::header::SET_COOKIE;
use reqwest::StatusCode;
use serde_json::json;

fn alice() -> TestUser {
    TestUser::new("alice", "s3cret-password", "a1b2c3d4token")
}

#[tokio::test]
async fn test_login_success_sets_hash_bound_cookie() {
    let app = TestApp::spawn(vec![alice()]).await;

    let response = app
        .post("/api/auth/login")
        .json(&json!({
            "login": "alice",
            "password": "s3cret-password"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let set_cookies: Vec<String> = response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect();

    let auth_cookie = set_cookies
        .iter()
        .find(|c| c.starts_with("sl_auth="))
        .expect("auth cookie missing");

    // Cookie carries the login-bound hash, never the raw token
    assert!(auth_cookie.contains(&session_token_hash("alice", "a1b2c3d4token")));
    assert!(!auth_cookie.contains("a1b2c3d4token="));
    assert!(auth_cookie.contains("HttpOnly"));
    // Session cookie: no fixed expiry without remember-me
    assert!(!auth_cookie.contains("Max-Age"));

    // Session id was regenerated and issued alongside
    assert!(set_cookies.iter().any(|c| c.starts_with("sl_sessid=")));

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["login"], "alice");

    // Pending password-reset request was cleared
    assert_eq!(app.directory.cleared_resets(), vec!["alice".to_string()]);
}

#[tokio::test]
async fn test_login_remember_me_sets_max_age() {
    let app = TestApp::spawn(vec![alice()]).await;

    let response = app
        .post("/api/auth/login")
        .json(&json!({
            "login": "alice",
            "password": "s3cret-password",
            "remember_me": true
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let auth_cookie = response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap())
        .find(|c| c.starts_with("sl_auth="))
        .expect("auth cookie missing")
        .to_string();

    assert!(auth_cookie.contains("Max-Age=1209600"));
}

#[tokio::test]
async fn test_login_wrong_password_deletes_cookie() {
    let app = TestApp::spawn(vec![alice()]).await;

    let response = app
        .post("/api/auth/login")
        .json(&json!({
            "login": "alice",
            "password": "wrong-password",
            "remember_me": true
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Failure path still writes the cookie removal
    let removal = response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap())
        .find(|c| c.starts_with("sl_auth="))
        .expect("cookie removal missing")
        .to_string();
    assert!(removal.contains("Max-Age=0"));

    // No reset record touched on failure
    assert!(app.directory.cleared_resets().is_empty());
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::spawn(vec![alice()]).await;

    let wrong_password = app
        .post("/api/auth/login")
        .json(&json!({
            "login": "alice",
            "password": "wrong-password"
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    let wrong_password: serde_json::Value =
        wrong_password.json().await.expect("Failed to parse response");

    let unknown_login = app
        .post("/api/auth/login")
        .json(&json!({
            "login": "ghost",
            "password": "wrong-password"
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(unknown_login.status(), StatusCode::UNAUTHORIZED);
    let unknown_login: serde_json::Value =
        unknown_login.json().await.expect("Failed to parse response");

    // Same body either way, so logins cannot be probed
    assert_eq!(wrong_password["data"]["message"], "Invalid credentials");
    assert_eq!(
        wrong_password["data"]["message"],
        unknown_login["data"]["message"]
    );
}

#[tokio::test]
async fn test_login_unknown_login_rejected() {
    let app = TestApp::spawn(vec![alice()]).await;

    let response = app
        .post("/api/auth/login")
        .json(&json!({
            "login": "ghost",
            "password": "whatever"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    // Identical message to a wrong password, so logins cannot be probed
    assert_eq!(body["data"]["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_cookie_authenticates_protected_route() {
    let app = TestApp::spawn(vec![alice().superuser()]).await;

    app.post("/api/auth/login")
        .json(&json!({
            "login": "alice",
            "password": "s3cret-password"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    let response = app
        .get("/api/auth/me")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["login"], "alice");
    assert_eq!(body["data"]["superuser_access"], true);
}

#[tokio::test]
async fn test_protected_route_without_cookie() {
    let app = TestApp::spawn(vec![alice()]).await;

    let response = app
        .get("/api/auth/me")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_ends_session() {
    let app = TestApp::spawn(vec![alice()]).await;

    app.post("/api/auth/login")
        .json(&json!({
            "login": "alice",
            "password": "s3cret-password"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    let response = app
        .post("/api/auth/logout")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    // Client honored the removal, so the protected route rejects us
    let response = app
        .get("/api/auth/me")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_verify_token_success() {
    let app = TestApp::spawn(vec![alice()]).await;

    let response = app
        .post("/api/auth/verify")
        .json(&json!({
            "token_auth": "a1b2c3d4token"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["code"], "success");
    assert_eq!(body["data"]["login"], "alice");
    assert_eq!(body["data"]["token_auth"], "a1b2c3d4token");
}

#[tokio::test]
async fn test_verify_token_superuser() {
    let app = TestApp::spawn(vec![alice().superuser()]).await;

    let response = app
        .post("/api/auth/verify")
        .json(&json!({
            "token_auth": "a1b2c3d4token"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["code"], "success_superuser");
}

#[tokio::test]
async fn test_verify_hashed_token_returns_canonical_token() {
    let app = TestApp::spawn(vec![alice()]).await;

    let response = app
        .post("/api/auth/verify")
        .json(&json!({
            "login": "alice",
            "token_auth": session_token_hash("alice", "a1b2c3d4token")
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    // The canonical stored token comes back, not the submitted hash
    assert_eq!(body["data"]["token_auth"], "a1b2c3d4token");
}

#[tokio::test]
async fn test_verify_unknown_token_rejected() {
    let app = TestApp::spawn(vec![alice()]).await;

    let response = app
        .post("/api/auth/verify")
        .json(&json!({
            "token_auth": "not-a-real-token"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
