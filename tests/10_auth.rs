mod common;

use anyhow::Result;
use serde_json::json;

use collab_client::services::{AuthService, UserService};
use collab_client::types::UserId;
use collab_client::validation::{
    FormSchema, ForgotPasswordInput, LoginInput, OnboardingInput, ResetPasswordInput, SignupInput, VerifyOtpInput,
};
use common::{user_json, MockBackend};

fn alice_login() -> Result<LoginInput> {
    Ok(LoginInput::validate(&json!({
        "email": "alice@example.com",
        "password": "secret1"
    }))?)
}

#[tokio::test]
async fn login_stores_cookie_and_sends_it_back() -> Result<()> {
    let backend = MockBackend::start().await?;
    backend.respond_with_cookie(
        "POST",
        "/auth/login",
        json!({ "success": true, "message": "Logged in", "data": { "user": user_json("u1", "Alice", "alice@example.com") } }),
        "token=abc123; Path=/; HttpOnly",
    );
    backend.respond(
        "GET",
        "/users/me",
        200,
        json!({ "success": true, "data": user_json("u1", "Alice", "alice@example.com") }),
    );

    let client = backend.client()?;
    let auth = AuthService::new(client.clone());
    let response = auth.login(&alice_login()?).await?;

    assert!(response.success);
    assert_eq!(response.message.as_deref(), Some("Logged in"));
    let user = response.data.expect("login payload").user;
    assert_eq!(user.id, UserId::new("u1"));

    let login = backend.last_request().expect("login request");
    assert_eq!(login.method, "POST");
    assert_eq!(login.path, "/api/auth/login");
    assert_eq!(login.content_type.as_deref(), Some("application/json"));
    assert_eq!(login.body, json!({ "email": "alice@example.com", "password": "secret1" }));

    assert_eq!(client.cookie_header().as_deref(), Some("token=abc123"));

    let me = UserService::new(client).me().await?;
    assert_eq!(me.data.map(|u| u.name), Some("Alice".to_string()));
    let me_request = backend.last_request().expect("me request");
    assert_eq!(me_request.cookie.as_deref(), Some("token=abc123"));

    Ok(())
}

#[tokio::test]
async fn restored_cookies_are_sent_by_a_fresh_client() -> Result<()> {
    let backend = MockBackend::start().await?;
    backend.respond(
        "POST",
        "/auth/refresh",
        200,
        json!({ "success": true, "data": { "user": user_json("u1", "Alice", "alice@example.com") } }),
    );

    let client = backend.client()?;
    client.restore_cookies("token=abc123; refresh=r1");
    AuthService::new(client).refresh().await?;

    let cookie = backend.last_request().and_then(|r| r.cookie).unwrap_or_default();
    assert!(cookie.contains("token=abc123"));
    assert!(cookie.contains("refresh=r1"));
    Ok(())
}

#[tokio::test]
async fn register_and_password_recovery_hit_their_paths() -> Result<()> {
    let backend = MockBackend::start().await?;
    let ok = json!({ "success": true, "message": "ok" });
    backend
        .respond(
            "POST",
            "/auth/register",
            201,
            json!({ "success": true, "data": { "user": user_json("u2", "Bob", "bob@example.com") } }),
        )
        .respond("POST", "/auth/forgot-password", 200, ok.clone())
        .respond("POST", "/auth/forgot-password/verify-otp", 200, ok.clone())
        .respond("POST", "/reset-password", 200, ok);

    let auth = AuthService::new(backend.client()?);

    let signup = SignupInput::validate(&json!({
        "name": "Bob",
        "email": "bob@example.com",
        "password": "hunter22",
        "confirmPassword": "hunter22"
    }))?;
    let created = auth.register(&signup).await?;
    assert_eq!(created.data.map(|p| p.user.email), Some("bob@example.com".to_string()));

    let forgot = ForgotPasswordInput::validate(&json!({ "email": "bob@example.com" }))?;
    auth.forgot_password(&forgot).await?;

    let otp = VerifyOtpInput::validate(&json!({ "email": "bob@example.com", "otp": "123456" }))?;
    auth.verify_otp(&otp).await?;

    let reset = ResetPasswordInput::validate(&json!({
        "token": "reset-token",
        "password": "newpass1",
        "confirmPassword": "newpass1"
    }))?;
    auth.reset_password(&reset).await?;

    let paths: Vec<String> = backend.requests().into_iter().map(|r| r.path).collect();
    assert_eq!(
        paths,
        vec![
            "/api/auth/register",
            "/api/auth/forgot-password",
            "/api/auth/forgot-password/verify-otp",
            "/api/reset-password",
        ]
    );

    let register_body = &backend.requests()[0].body;
    assert_eq!(register_body["confirmPassword"], json!("hunter22"));
    Ok(())
}

#[tokio::test]
async fn oauth_url_points_at_provider_with_redirect() -> Result<()> {
    let backend = MockBackend::start().await?;
    let auth = AuthService::new(backend.client()?);

    let url = auth.oauth_url("google")?;
    assert_eq!(url.path(), "/api/auth/google");
    let redirect: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    assert_eq!(
        redirect,
        vec![("redirect".to_string(), "http://localhost:3000/auth/callback".to_string())]
    );

    // Building the URL never contacts the backend
    assert!(backend.requests().is_empty());
    Ok(())
}

#[tokio::test]
async fn onboarding_sends_normalized_profile() -> Result<()> {
    let backend = MockBackend::start().await?;
    backend.respond(
        "PATCH",
        "/users/onboarding",
        200,
        json!({ "success": true, "data": user_json("u1", "Alice", "alice@example.com") }),
    );

    let profile = OnboardingInput::validate(&json!({
        "headline": "Rust engineer",
        "skills": "rust, tokio",
        "bio": "",
        "portfolioUrl": "https://alice.dev",
        "hourlyRate": "85"
    }))?;
    UserService::new(backend.client()?).complete_onboarding(&profile).await?;

    let request = backend.last_request().expect("onboarding request");
    assert_eq!(request.method, "PATCH");
    assert_eq!(request.body["skills"], json!(["rust", "tokio"]));
    assert_eq!(request.body["hourlyRate"], json!(85.0));
    assert_eq!(request.body["portfolioUrl"], json!("https://alice.dev"));
    Ok(())
}
