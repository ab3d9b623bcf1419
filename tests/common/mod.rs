#![allow(dead_code)]

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, HeaderValue, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use serde_json::{json, Value};
use tokio::task::JoinHandle;

use collab_client::config::{ClientConfig, Environment};
use collab_client::ApiClient;

/// One request as the mock backend saw it
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub cookie: Option<String>,
    pub content_type: Option<String>,
    pub body: Value,
}

#[derive(Debug, Clone)]
struct CannedResponse {
    status: StatusCode,
    body: String,
    set_cookies: Vec<String>,
}

#[derive(Default)]
struct BackendState {
    routes: Mutex<HashMap<(String, String), CannedResponse>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// In-process stand-in for the collaboration API, served under `/api`
/// on a free local port. Routes answer with canned responses registered
/// per test; anything else gets a 404 envelope.
pub struct MockBackend {
    pub port: u16,
    pub base_url: String,
    state: Arc<BackendState>,
    handle: JoinHandle<()>,
}

impl MockBackend {
    pub async fn start() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}/api", port);

        let state = Arc::new(BackendState::default());
        let app = Router::new().fallback(handle).with_state(state.clone());

        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind mock backend")?;
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self { port, base_url, state, handle })
    }

    /// Answer `method path` with `status` and a JSON body
    pub fn respond(&self, method: &str, path: &str, status: u16, body: Value) -> &Self {
        self.install(method, path, status, body.to_string(), Vec::new())
    }

    /// Same as `respond` with a 200, also setting a cookie on the response
    pub fn respond_with_cookie(&self, method: &str, path: &str, body: Value, cookie: &str) -> &Self {
        self.respond_with_cookies(method, path, body, &[cookie])
    }

    /// One `Set-Cookie` header per entry of `cookies`
    pub fn respond_with_cookies(&self, method: &str, path: &str, body: Value, cookies: &[&str]) -> &Self {
        let cookies = cookies.iter().map(|c| c.to_string()).collect();
        self.install(method, path, 200, body.to_string(), cookies)
    }

    /// Answer with a raw, possibly non-JSON, body
    pub fn respond_raw(&self, method: &str, path: &str, status: u16, body: &str) -> &Self {
        self.install(method, path, status, body.to_string(), Vec::new())
    }

    fn install(
        &self,
        method: &str,
        path: &str,
        status: u16,
        body: String,
        set_cookies: Vec<String>,
    ) -> &Self {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        self.state.routes.lock().unwrap().insert(
            (method.to_uppercase(), format!("/api{}", path)),
            CannedResponse { status, body, set_cookies },
        );
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.state.requests.lock().unwrap().last().cloned()
    }

    /// Client pointed at this backend with otherwise development defaults
    pub fn client(&self) -> Result<ApiClient> {
        let config = ClientConfig::for_environment(Environment::Development).with_base_url(&self.base_url);
        Ok(ApiClient::new(config)?)
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn handle(
    State(state): State<Arc<BackendState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let header_str = |name: header::HeaderName| {
        headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_string)
    };

    let recorded = RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        cookie: header_str(header::COOKIE),
        content_type: header_str(header::CONTENT_TYPE),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    };
    state.requests.lock().unwrap().push(recorded);

    let canned = state
        .routes
        .lock()
        .unwrap()
        .get(&(method.to_string(), uri.path().to_string()))
        .cloned();

    match canned {
        Some(canned) => {
            let mut response = (canned.status, canned.body).into_response();
            response
                .headers_mut()
                .insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
            for cookie in canned.set_cookies.iter().filter_map(|c| HeaderValue::from_str(c).ok()) {
                response.headers_mut().append(header::SET_COOKIE, cookie);
            }
            response
        }
        None => (
            StatusCode::NOT_FOUND,
            json!({ "success": false, "message": "Route not found" }).to_string(),
        )
            .into_response(),
    }
}

/// Fresh directory under the system temp dir, unique per call
pub fn scratch_dir(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    std::env::temp_dir().join(format!("collab-{}-{}-{}", name, std::process::id(), nanos))
}

pub fn user_json(id: &str, name: &str, email: &str) -> Value {
    json!({ "_id": id, "name": name, "email": email })
}

/// A project created by `creator` with the given contributor ids
pub fn project_json(id: &str, creator: &str, contributors: &[&str]) -> Value {
    json!({
        "_id": id,
        "title": format!("Project {}", id),
        "description": "Build something together",
        "creatorId": creator,
        "contributors": contributors
            .iter()
            .map(|c| json!({ "userId": c, "title": "Engineer" }))
            .collect::<Vec<_>>(),
        "skills": ["rust"],
        "budget": 1500.0
    })
}
