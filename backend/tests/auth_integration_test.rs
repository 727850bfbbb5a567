//! Integration tests for the registration, login, and session flow

mod common;

use axum::http::StatusCode;

fn unique_email(prefix: &str) -> String {
    format!("{}_{}@example.com", prefix, uuid::Uuid::new_v4())
}

fn register_body(name: &str, email: &str, password: &str, password2: &str) -> String {
    format!(
        "name={}&email={}&password={}&password2={}",
        name,
        email.replace('@', "%40"),
        password,
        password2
    )
}

fn login_body(email: &str, password: &str) -> String {
    format!("email={}&password={}", email.replace('@', "%40"), password)
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_register_then_login_reaches_dashboard() {
    let app = common::TestApp::new().await;
    let email = unique_email("register_login");

    let response = app
        .post_form(
            "/register",
            &register_body("Alice", &email, "SecurePassword123", "SecurePassword123"),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location.as_deref(), Some("/login"));

    let response = app
        .post_form("/login", &login_body(&email, "SecurePassword123"), None)
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location.as_deref(), Some("/dashboard"));
    let cookie = response.cookie.expect("login should set a session cookie");

    let response = app.get("/dashboard", Some(&cookie)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Alice"));
    assert!(response.body.contains(&email));
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_register_success_flashes_on_login_page() {
    let app = common::TestApp::new().await;
    let email = unique_email("register_flash");

    let response = app
        .post_form(
            "/register",
            &register_body("Bob", &email, "SecurePassword123", "SecurePassword123"),
            None,
        )
        .await;
    let cookie = response.cookie.expect("flash needs a session cookie");

    let response = app.get("/login", Some(&cookie)).await;
    assert!(response
        .body
        .contains("You are now registered and can log in"));

    // Flash is read-once
    let response = app.get("/login", Some(&cookie)).await;
    assert!(!response
        .body
        .contains("You are now registered and can log in"));
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_duplicate_email_is_rejected_without_overwriting() {
    let app = common::TestApp::new().await;
    let email = unique_email("duplicate");

    let response = app
        .post_form(
            "/register",
            &register_body("Carol", &email, "OriginalPassword1", "OriginalPassword1"),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);

    // Second registration with the same email re-renders with the error
    let response = app
        .post_form(
            "/register",
            &register_body("Mallory", &email, "OtherPassword2", "OtherPassword2"),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Email already registered"));
    assert_eq!(app.user_count(&email).await, 1);

    // The original credentials still work, so the record was not overwritten
    let response = app
        .post_form("/login", &login_body(&email, "OriginalPassword1"), None)
        .await;
    assert_eq!(response.location.as_deref(), Some("/dashboard"));
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_invalid_credentials_are_indistinguishable() {
    let app = common::TestApp::new().await;
    let email = unique_email("wrong_pass");

    app.post_form(
        "/register",
        &register_body("Dave", &email, "CorrectPassword1", "CorrectPassword1"),
        None,
    )
    .await;

    let wrong_password = app
        .post_form("/login", &login_body(&email, "WrongPassword1"), None)
        .await;
    let unknown_email = app
        .post_form(
            "/login",
            &login_body(&unique_email("nonexistent"), "AnyPassword1"),
            None,
        )
        .await;

    // Both failures produce the same externally visible outcome
    assert_eq!(wrong_password.status, StatusCode::SEE_OTHER);
    assert_eq!(unknown_email.status, StatusCode::SEE_OTHER);
    assert_eq!(wrong_password.location, unknown_email.location);
    assert_eq!(wrong_password.location.as_deref(), Some("/login"));

    // And the flash is the same generic message
    let cookie = wrong_password.cookie.expect("failure should set a cookie");
    let response = app.get("/login", Some(&cookie)).await;
    assert!(response.body.contains("Invalid email or password"));
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_password_mismatch_writes_nothing() {
    let app = common::TestApp::new().await;
    let email = unique_email("mismatch");

    let response = app
        .post_form(
            "/register",
            &register_body("Erin", &email, "PasswordOne1", "PasswordTwo2"),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Passwords do not match"));
    assert_eq!(app.user_count(&email).await, 0);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_logout_ends_the_session() {
    let app = common::TestApp::new().await;
    let email = unique_email("logout");

    app.post_form(
        "/register",
        &register_body("Frank", &email, "SecurePassword123", "SecurePassword123"),
        None,
    )
    .await;
    let response = app
        .post_form("/login", &login_body(&email, "SecurePassword123"), None)
        .await;
    let cookie = response.cookie.expect("login should set a session cookie");

    // Session is live
    let response = app.get("/dashboard", Some(&cookie)).await;
    assert_eq!(response.status, StatusCode::OK);

    // Logout terminates it and confirms on the login page
    let response = app.get("/logout", Some(&cookie)).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location.as_deref(), Some("/login"));
    let fresh_cookie = response.cookie.expect("logout mints a fresh session");

    let response = app.get("/login", Some(&fresh_cookie)).await;
    assert!(response.body.contains("You are logged out"));

    // The old session no longer grants access
    let response = app.get("/dashboard", Some(&cookie)).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location.as_deref(), Some("/login"));
}
