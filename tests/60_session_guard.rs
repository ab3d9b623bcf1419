mod common;

use anyhow::Result;
use serde_json::json;

use collab_client::api::routes;
use collab_client::guard::{GuardRoutes, Redirect, RouteGuard};
use collab_client::services::AuthService;
use collab_client::session::SessionStore;
use collab_client::validation::{FormSchema, LoginInput};
use common::{user_json, MockBackend};

#[tokio::test]
async fn login_flow_moves_guard_from_login_to_home() -> Result<()> {
    let backend = MockBackend::start().await?;
    backend.respond_with_cookie(
        "POST",
        "/auth/login",
        json!({ "success": true, "data": { "user": user_json("u1", "Alice", "alice@example.com") } }),
        "token=abc123; Path=/",
    );

    let store = SessionStore::new();
    let mut on_protected = RouteGuard::new(Vec::new());
    let mut on_login = RouteGuard::new(Vec::new());

    let login_page = GuardRoutes::USER.is_login_page("/login?next=%2Fhome");
    assert!(login_page);
    assert!(!GuardRoutes::USER.is_login_page(routes::admin::LOGIN));

    // Signed out: protected pages bounce to login, the login page stays put
    assert_eq!(on_protected.evaluate(store.current_user_id().as_ref(), false), Some(Redirect::ToLogin));
    assert_eq!(on_login.evaluate(store.current_user_id().as_ref(), login_page), None);

    let credentials = LoginInput::validate(&json!({ "email": "alice@example.com", "password": "secret1" }))?;
    let payload = AuthService::new(backend.client()?)
        .login(&credentials)
        .await?
        .data
        .expect("login payload");
    store.sign_in(payload.user);

    assert_eq!(on_protected.evaluate(store.current_user_id().as_ref(), false), None);
    assert_eq!(on_login.evaluate(store.current_user_id().as_ref(), login_page), Some(Redirect::ToHome));

    assert_eq!(on_protected.into_navigator(), vec![routes::auth::LOGIN.to_string()]);
    assert_eq!(on_login.into_navigator(), vec![routes::user::HOME.to_string()]);
    Ok(())
}

#[tokio::test]
async fn admin_guard_follows_admin_routes() -> Result<()> {
    let store = SessionStore::new();
    let guard = RouteGuard::with_routes(Vec::new(), GuardRoutes::ADMIN);
    let task = tokio::spawn(guard.follow(store.subscribe(), false));

    drop(store);
    let visited = task.await?;
    assert_eq!(visited, vec![routes::admin::LOGIN.to_string()]);
    Ok(())
}
