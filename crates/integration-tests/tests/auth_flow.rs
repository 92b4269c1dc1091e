//! Signup, login, and logout through the HTML forms.

use axum::http::StatusCode;
use insura_integration_tests::{DEMO_EMAIL, DEMO_PASSWORD, TestApp};
use insura_storefront::store::{SessionRepository, UserRepository};

#[tokio::test]
async fn test_signup_then_login() {
    let mut app = TestApp::new();

    let resp = app
        .signup("budi@example.com", "rahasia1", "Budi Santoso", "081234567890")
        .await;
    resp.assert_redirect("/auth/login?success=registered");
    assert!(
        UserRepository::new(app.storage())
            .find_by_email("budi@example.com")
            .is_some()
    );

    let page = app.get("/auth/login?success=registered").await;
    assert!(page.contains("Registration successful. Please log in."));

    let resp = app.login("budi@example.com", "rahasia1").await;
    resp.assert_redirect("/");

    let home = app.get("/").await;
    assert!(home.contains("budi@example.com"));
    assert!(home.contains("You are logged in"));
}

#[tokio::test]
async fn test_signup_rejects_weak_password() {
    let mut app = TestApp::new();
    let resp = app
        .signup("budi@example.com", "abc", "Budi Santoso", "081234567890")
        .await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.contains("Password must be at least 8 characters."));
    assert!(UserRepository::new(app.storage()).list().is_empty());
}

#[tokio::test]
async fn test_signup_rejects_bad_phone_and_name() {
    let mut app = TestApp::new();

    let resp = app
        .signup("budi@example.com", "rahasia1", "Budi Santoso", "0712345678")
        .await;
    assert!(resp.contains("Phone number must start with 08"));

    let resp = app
        .signup("budi@example.com", "rahasia1", "Budi 2", "081234567890")
        .await;
    assert!(resp.contains("Full name must be 3-32 characters"));
}

#[tokio::test]
async fn test_signup_rejects_mismatched_confirmation() {
    let mut app = TestApp::new();
    let resp = app
        .post_form(
            "/auth/signup",
            &[
                ("email", "budi@example.com"),
                ("password", "rahasia1"),
                ("password_confirm", "rahasia2"),
                ("name", "Budi Santoso"),
                ("phone", "081234567890"),
            ],
        )
        .await;

    assert!(resp.contains("Password and confirmation do not match."));
}

#[tokio::test]
async fn test_signup_rejects_duplicate_email() {
    let mut app = TestApp::with_demo_user();
    let resp = app
        .signup(DEMO_EMAIL, "another1", "Someone Else", "081299998888")
        .await;

    assert!(resp.contains("Email is already registered."));
    assert_eq!(UserRepository::new(app.storage()).list().len(), 1);
}

#[tokio::test]
async fn test_login_rejects_wrong_password() {
    let mut app = TestApp::with_demo_user();
    let resp = app.login(DEMO_EMAIL, "wrong-password").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.contains("Invalid email or password."));
    assert!(SessionRepository::new(app.storage()).current().is_none());
}

#[tokio::test]
async fn test_login_requires_both_fields() {
    let mut app = TestApp::with_demo_user();
    let resp = app.login("", "").await;
    assert!(resp.contains("Email and password are required."));
}

#[tokio::test]
async fn test_logout_clears_session() {
    let mut app = TestApp::with_demo_user();
    app.login(DEMO_EMAIL, DEMO_PASSWORD).await;
    assert_eq!(
        SessionRepository::new(app.storage()).current().as_deref(),
        Some(DEMO_EMAIL)
    );

    app.post_form("/auth/logout", &[]).await.assert_redirect("/");
    assert!(SessionRepository::new(app.storage()).current().is_none());
    assert!(app.get("/").await.contains("Sign Up"));
}
