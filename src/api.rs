//! Synchronous client for the **REST Countries API (v3.1)**.
//!
//! This module covers the `name/{name}?fullText=true` endpoint and returns the
//! first matching `models::Country`.
//!
//! ### Notes
//! - The endpoint answers with a JSON array; we take the first element. An empty
//!   array means "no such country" and is returned as `Ok(None)`.
//! - A non-2xx answer (the API sends 404 for unknown names) is a `FetchError::Status`.
//! - One request per call. There is no retry loop and, unless configured, no total
//!   request timeout; only the connect phase is bounded.
//!
//! Typical usage:
//! ```no_run
//! # use countries_rs::Client;
//! let client = Client::default();
//! if let Some(country) = client.fetch_country("France")? {
//!     println!("{} ({})", country.name.common, country.name.official);
//! }
//! # Ok::<(), countries_rs::FetchError>(())
//! ```
use crate::config::{DEFAULT_API_BASE, Settings};
use crate::error::FetchError;
use crate::models::Country;
use percent_encoding::{AsciiSet, CONTROLS};
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use serde_json::Value;
use std::time::Duration;

/// Anything that can resolve a key into an optional record. The query cache runs
/// fetchers on worker threads, hence `Send + Sync + 'static`.
pub trait Fetcher: Send + Sync + 'static {
    type Output: Send + Sync + 'static;

    fn fetch(&self, key: &str) -> Result<Option<Self::Output>, FetchError>;
}

#[derive(Debug, Clone)]
pub struct Client {
    pub base_url: String,
    http: HttpClient,
}

impl Default for Client {
    fn default() -> Self {
        Self::with_timeout(DEFAULT_API_BASE, None)
    }
}

// What a browser escapes in a path segment, plus `/` and `%` so the name always
// stays one literal segment. A browser would send those two unescaped.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'/')
    .add(b'%');

fn enc_segment(s: &str) -> String {
    percent_encoding::utf8_percent_encode(s, SEGMENT).to_string()
}

impl Client {
    /// Build a client against `base_url` with an optional total request timeout.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Option<Duration>) -> Self {
        // The blocking client defaults to a 30s total timeout; `None` must clear it.
        let http = HttpClient::builder()
            .timeout(timeout) // total request timeout
            .connect_timeout(Duration::from_secs(10)) // connect timeout
            .redirect(Policy::limited(5)) // cap redirects
            .user_agent(concat!("countries_rs/", env!("CARGO_PKG_VERSION"))) // set user agent
            .build()
            .unwrap_or_else(|e| {
                log::warn!("falling back to default http client: {e}");
                HttpClient::new()
            });
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::with_timeout(settings.api_base.clone(), settings.timeout)
    }

    /// URL requested for `name`.
    pub fn country_url(&self, name: &str) -> String {
        format!("{}/name/{}?fullText=true", self.base_url, enc_segment(name))
    }

    /// Fetch one country by its full name.
    ///
    /// ### Returns
    /// - `Ok(Some(country))`: the first element of the response array
    /// - `Ok(None)`: the API answered with an empty array
    ///
    /// ### Errors
    /// - `EmptyName` for `""` (no request is made)
    /// - network error, non-2xx status, JSON decoding error, non-array body
    pub fn fetch_country(&self, name: &str) -> Result<Option<Country>, FetchError> {
        if name.is_empty() {
            return Err(FetchError::EmptyName);
        }
        let url = self.country_url(name);
        log::debug!("GET {url}");

        let resp = self.http.get(&url).send()?;
        let status = resp.status();
        if !status.is_success() {
            log::debug!("GET {url} -> HTTP {status}");
            return Err(FetchError::Status(status));
        }
        let body = resp.text()?;
        first_country(&body)
    }
}

/// Parse an API body: expect an array, decode its first element.
pub fn first_country(body: &str) -> Result<Option<Country>, FetchError> {
    let v: Value = serde_json::from_str(body)?;
    let arr = match v {
        Value::Array(arr) => arr,
        other => {
            return Err(FetchError::Shape(format!(
                "expected a top-level array, got {}",
                kind(&other)
            )));
        }
    };
    match arr.into_iter().next() {
        Some(first) => Ok(Some(serde_json::from_value(first)?)),
        None => Ok(None),
    }
}

fn kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl Fetcher for Client {
    type Output = Country;

    fn fetch(&self, key: &str) -> Result<Option<Country>, FetchError> {
        self.fetch_country(key)
    }
}
