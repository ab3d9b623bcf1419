//! Cookie jar that can be saved and replayed.
//!
//! reqwest's [`Jar`] only answers "which cookies go to this URL", so a
//! cookie scoped to a narrower path than the API base is invisible from the
//! base URL. This jar also keeps every `Set-Cookie` string with the URL that
//! set it; replaying those through the same jar restores each cookie with
//! its original attributes.

use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::HeaderValue;
use serde::{Deserialize, Serialize};
use std::sync::{PoisonError, RwLock};
use url::Url;

/// One `Set-Cookie` header and the response URL it arrived on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedCookie {
    pub set_cookie: String,
    pub url: String,
}

impl SavedCookie {
    fn name(&self) -> &str {
        cookie_name(&self.set_cookie)
    }
}

#[derive(Debug, Default)]
pub struct CookieJar {
    jar: Jar,
    saved: RwLock<Vec<SavedCookie>>,
}

impl CookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every cookie the server has set, latest value per (name, scope)
    pub fn saved(&self) -> Vec<SavedCookie> {
        self.saved.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Replay previously saved cookies. Entries with an unparseable URL are skipped.
    pub fn restore(&self, cookies: &[SavedCookie]) {
        for cookie in cookies {
            match Url::parse(&cookie.url) {
                Ok(url) => self.add(&cookie.set_cookie, &url),
                Err(e) => tracing::warn!(url = %cookie.url, "Skipping saved cookie: {}", e),
            }
        }
    }

    /// Add one `Set-Cookie` string as if `url` had returned it
    pub fn add(&self, set_cookie: &str, url: &Url) {
        self.jar.add_cookie_str(set_cookie, url);
        self.record(set_cookie, url);
    }

    fn record(&self, set_cookie: &str, url: &Url) {
        let entry = SavedCookie {
            set_cookie: set_cookie.to_string(),
            url: url.to_string(),
        };
        let key = scope_key(&entry);

        let mut saved = self.saved.write().unwrap_or_else(PoisonError::into_inner);
        saved.retain(|existing| scope_key(existing) != key);
        saved.push(entry);
    }
}

impl CookieStore for CookieJar {
    fn set_cookies(&self, cookie_headers: &mut dyn Iterator<Item = &HeaderValue>, url: &Url) {
        let headers: Vec<&HeaderValue> = cookie_headers.collect();
        for header in &headers {
            if let Ok(set_cookie) = header.to_str() {
                self.record(set_cookie, url);
            }
        }
        self.jar.set_cookies(&mut headers.into_iter(), url);
    }

    fn cookies(&self, url: &Url) -> Option<HeaderValue> {
        self.jar.cookies(url)
    }
}

fn cookie_name(set_cookie: &str) -> &str {
    set_cookie.split(['=', ';']).next().unwrap_or_default().trim()
}

/// Attribute value from a `Set-Cookie` string, matched case-insensitively
fn attribute<'a>(set_cookie: &'a str, name: &str) -> Option<&'a str> {
    set_cookie.split(';').skip(1).find_map(|part| {
        let (key, value) = part.split_once('=')?;
        key.trim().eq_ignore_ascii_case(name).then(|| value.trim())
    })
}

/// Directory of the request path, used when a cookie has no Path attribute
fn default_path(url: &str) -> String {
    let path = Url::parse(url).map(|u| u.path().to_string()).unwrap_or_default();
    match path.rfind('/') {
        Some(0) | None => "/".to_string(),
        Some(i) => path[..i].to_string(),
    }
}

/// A later cookie with the same key replaces an earlier one
fn scope_key(cookie: &SavedCookie) -> (String, String, String) {
    let domain = attribute(&cookie.set_cookie, "Domain")
        .map(|d| d.trim_start_matches('.').to_ascii_lowercase())
        .or_else(|| Url::parse(&cookie.url).ok().and_then(|u| u.host_str().map(str::to_string)))
        .unwrap_or_default();
    let path = attribute(&cookie.set_cookie, "Path")
        .map(str::to_string)
        .unwrap_or_else(|| default_path(&cookie.url));
    (cookie.name().to_string(), domain, path)
}
