//! The one configured request client every service goes through.
//!
//! Every request carries `Content-Type: application/json` and the cookies
//! held in the client's jar; responses are decoded as JSON and handed back
//! untouched. Failures are returned as [`ClientError`] without retrying.

mod cookies;

pub use cookies::{CookieJar, SavedCookie};

use reqwest::cookie::CookieStore;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::api::Endpoint;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

#[derive(Debug, Clone)]
pub struct ApiClient {
    inner: reqwest::Client,
    jar: Arc<CookieJar>,
    base_url: Url,
    config: Arc<ClientConfig>,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        Self::with_cookie_jar(config, Arc::new(CookieJar::new()))
    }

    /// Build a client that shares an existing cookie jar
    pub fn with_cookie_jar(config: ClientConfig, jar: Arc<CookieJar>) -> ClientResult<Self> {
        config.validate()?;
        let base_url = Url::parse(&config.api.base_url).map_err(|source| ClientError::InvalidUrl {
            url: config.api.base_url.clone(),
            source,
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .cookie_provider(jar.clone())
            .user_agent(config.api.user_agent.clone());

        if let Some(secs) = config.api.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            inner: builder.build()?,
            jar,
            base_url,
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Absolute URL for an endpoint. The base URL's own path is kept, so a
    /// base of `http://host/api` and `/auth/login` gives `http://host/api/auth/login`.
    pub fn url_for(&self, endpoint: &Endpoint) -> ClientResult<Url> {
        let raw = format!(
            "{}{}",
            self.config.api.base_url.trim_end_matches('/'),
            endpoint.path
        );
        Url::parse(&raw).map_err(|source| ClientError::InvalidUrl { url: raw, source })
    }

    /// Cookie header the jar would send to the API, if any cookies are held
    pub fn cookie_header(&self) -> Option<String> {
        self.jar
            .cookies(&self.base_url)
            .and_then(|v| v.to_str().ok().map(str::to_string))
    }

    /// Seed the jar from a `name=value; name2=value2` header, scoped to the base URL
    pub fn restore_cookies(&self, header: &str) {
        for pair in header.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            self.jar.add(pair, &self.base_url);
        }
    }

    /// Every cookie the server has set on this client, with its scope
    pub fn saved_cookies(&self) -> Vec<SavedCookie> {
        self.jar.saved()
    }

    /// Replay cookies captured by [`ApiClient::saved_cookies`]
    pub fn restore_saved_cookies(&self, cookies: &[SavedCookie]) {
        self.jar.restore(cookies);
    }

    /// Issue a request without a body
    pub async fn send<T: DeserializeOwned>(&self, endpoint: &Endpoint) -> ClientResult<T> {
        self.dispatch::<(), T>(endpoint, None).await
    }

    /// Issue a request with a JSON body
    pub async fn send_json<B, T>(&self, endpoint: &Endpoint, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.dispatch(endpoint, Some(body)).await
    }

    async fn dispatch<B, T>(&self, endpoint: &Endpoint, body: Option<&B>) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url_for(endpoint)?;

        if self.config.api.enable_request_logging {
            tracing::debug!(method = endpoint.method.as_str(), path = %endpoint.path, "api request");
        }

        let mut request = self.inner.request(endpoint.method.to_reqwest(), url);
        if let Some(body) = body {
            let bytes = serde_json::to_vec(body).map_err(ClientError::Encode)?;
            request = request.body(bytes);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), endpoint = %endpoint, "api request failed");
            return Err(ClientError::from_status(status.as_u16(), text));
        }

        // 204 and other empty bodies decode as JSON null
        let payload = if text.trim().is_empty() { "null" } else { text.as_str() };
        serde_json::from_str(payload).map_err(|source| ClientError::Decode {
            path: endpoint.path.to_string(),
            source,
        })
    }
}
