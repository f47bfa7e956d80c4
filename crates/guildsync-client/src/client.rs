//! Main backend client implementation.

use crate::api::{BansApi, GroupsApi, MembersApi, ServersApi, UpdatesApi};
use crate::config::{RateLimitConfig, DEFAULT_MAX_PAGES, DEFAULT_TIMEOUT};
use governor::{Quota, RateLimiter};
use guildsync_core::{Result, SyncError};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client as HttpClient, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

type DirectRateLimiter = RateLimiter<
    governor::state::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// Client for the community backend REST API
#[derive(Clone)]
pub struct GuildSyncClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: HttpClient,
    base_url: Url,
    timeout: Duration,
    max_pages: usize,
    rate_limiter: Option<DirectRateLimiter>,
}

impl std::fmt::Debug for GuildSyncClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GuildSyncClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("timeout", &self.inner.timeout)
            .field("max_pages", &self.inner.max_pages)
            .finish_non_exhaustive()
    }
}

impl GuildSyncClient {
    /// Create a client for `base_url` authenticating with `token`
    pub fn new(base_url: impl AsRef<str>, token: impl Into<String>) -> Result<Self> {
        GuildSyncClientBuilder::new(base_url, token).build()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder(base_url: impl AsRef<str>, token: impl Into<String>) -> GuildSyncClientBuilder {
        GuildSyncClientBuilder::new(base_url, token)
    }

    /// Access member endpoints
    #[must_use]
    pub fn members(&self) -> MembersApi<'_> {
        MembersApi::new(self)
    }

    /// Access server (guild) endpoints
    #[must_use]
    pub fn servers(&self) -> ServersApi<'_> {
        ServersApi::new(self)
    }

    /// Access the pending updates queue
    #[must_use]
    pub fn updates(&self) -> UpdatesApi<'_> {
        UpdatesApi::new(self)
    }

    /// Access group listings
    #[must_use]
    pub fn groups(&self) -> GroupsApi<'_> {
        GroupsApi::new(self)
    }

    /// Access ban listings
    #[must_use]
    pub fn bans(&self) -> BansApi<'_> {
        BansApi::new(self)
    }

    /// Backend base URL
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Per-request timeout
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.inner.timeout
    }

    pub(crate) fn max_pages(&self) -> usize {
        self.inner.max_pages
    }

    /// Build an absolute endpoint URL from a path such as `/api/servers/`
    pub fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Result<Url> {
        let base = self.inner.base_url.as_str().trim_end_matches('/');
        let mut url = Url::parse(&format!("{base}{path}"))
            .map_err(|e| SyncError::InvalidUrl(format!("{base}{path}: {e}")))?;

        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }

        Ok(url)
    }

    /// GET a single resource, failing on anything but 200
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T> {
        let response = self
            .send(self.inner.http.get(url.clone()), &Method::GET, url)
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(url = %url, status = status.as_u16(), "Request failed");
            return Err(SyncError::FetchFailed {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        self.parse_body(response, url).await
    }

    /// GET a single resource, treating any status other than 200 as absent
    pub(crate) async fn get_optional<T: DeserializeOwned>(&self, url: &Url) -> Result<Option<T>> {
        let response = self
            .send(self.inner.http.get(url.clone()), &Method::GET, url)
            .await?;

        self.parse_if(response, StatusCode::OK, url).await
    }

    /// POST a form, returning the parsed body only if the backend answers `expected`
    pub(crate) async fn post_form_optional<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        url: &Url,
        body: &B,
        expected: StatusCode,
    ) -> Result<Option<T>> {
        let response = self
            .send(self.inner.http.post(url.clone()).form(body), &Method::POST, url)
            .await?;

        self.parse_if(response, expected, url).await
    }

    /// Send a form-encoded mutation whose response body is not needed
    pub(crate) async fn mutate<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: &Url,
        body: Option<&B>,
    ) -> Result<()> {
        let mut request = self.inner.http.request(method.clone(), url.clone());
        if let Some(body) = body {
            request = request.form(body);
        }

        let response = self.send(request, &method, url).await?;
        self.handle_empty_response(&method, url, response).await
    }

    /// Wait for the rate limiter, then send the request
    async fn send(&self, request: RequestBuilder, method: &Method, url: &Url) -> Result<Response> {
        if let Some(limiter) = &self.inner.rate_limiter {
            limiter.until_ready().await;
        }

        debug!(method = %method, url = %url, "request");

        request
            .send()
            .await
            .map_err(|e| self.transport_error(&e, url))
    }

    /// The timeout covers the whole exchange, so it can fire while the body
    /// is still streaming as well as before the headers arrive.
    fn transport_error(&self, e: &reqwest::Error, url: &Url) -> SyncError {
        if e.is_timeout() {
            warn!(url = %url, "Request timed out");
            SyncError::Timeout {
                url: url.to_string(),
                secs: self.inner.timeout.as_secs(),
            }
        } else {
            SyncError::Http(e.to_string())
        }
    }

    async fn parse_if<T: DeserializeOwned>(
        &self,
        response: Response,
        expected: StatusCode,
        url: &Url,
    ) -> Result<Option<T>> {
        let status = response.status();
        if status == expected {
            self.parse_body(response, url).await.map(Some)
        } else {
            debug!(url = %url, status = status.as_u16(), "no record");
            Ok(None)
        }
    }

    async fn parse_body<T: DeserializeOwned>(&self, response: Response, url: &Url) -> Result<T> {
        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(&e, url))?;
        serde_json::from_str(&body).map_err(SyncError::Json)
    }

    /// Handle a mutation response whose body is discarded
    async fn handle_empty_response(
        &self,
        method: &Method,
        url: &Url,
        response: Response,
    ) -> Result<()> {
        let status = response.status();

        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        warn!(
            method = %method,
            url = %url,
            status = status.as_u16(),
            "Backend rejected mutation"
        );

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(SyncError::Unauthorized {
                status: status.as_u16(),
            }),
            _ => Err(SyncError::Api {
                code: status.as_u16(),
                message: Self::error_message(body),
            }),
        }
    }

    /// Pull `detail` out of a JSON error body, falling back to the raw text
    fn error_message(body: String) -> String {
        serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("detail").and_then(|e| e.as_str()).map(String::from))
            .unwrap_or(body)
    }
}

/// Builder for configuring a [`GuildSyncClient`]
pub struct GuildSyncClientBuilder {
    base_url: String,
    token: String,
    timeout: Duration,
    user_agent: String,
    max_pages: usize,
    rate_limit: Option<RateLimitConfig>,
}

impl GuildSyncClientBuilder {
    /// Create a new builder for the given backend and token
    #[must_use]
    pub fn new(base_url: impl AsRef<str>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.as_ref().to_string(),
            token: token.into(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("guildsync/{}", env!("CARGO_PKG_VERSION")),
            max_pages: DEFAULT_MAX_PAGES,
            rate_limit: None,
        }
    }

    /// Set the request timeout
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Set the maximum number of pages a single listing may span
    #[must_use]
    pub const fn max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Throttle outgoing requests
    #[must_use]
    pub const fn rate_limit(mut self, config: RateLimitConfig) -> Self {
        self.rate_limit = Some(config);
        self
    }

    /// Build the client
    pub fn build(self) -> Result<GuildSyncClient> {
        let base_url = Url::parse(&self.base_url)
            .map_err(|e| SyncError::InvalidUrl(format!("{}: {e}", self.base_url)))?;
        if !matches!(base_url.scheme(), "http" | "https") || base_url.cannot_be_a_base() {
            return Err(SyncError::InvalidUrl(format!(
                "{}: expected an absolute http(s) URL",
                self.base_url
            )));
        }

        if self.token.trim().is_empty() {
            return Err(SyncError::Config("backend token is empty".into()));
        }
        if self.max_pages == 0 {
            return Err(SyncError::Config("max_pages must be at least 1".into()));
        }
        if self.timeout.is_zero() {
            return Err(SyncError::Config("timeout must be non-zero".into()));
        }

        let mut auth = HeaderValue::from_str(&format!("Token {}", self.token))
            .map_err(|e| SyncError::Config(format!("invalid token: {e}")))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let http = HttpClient::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .default_headers(headers)
            .gzip(true)
            .build()
            .map_err(|e| SyncError::Http(e.to_string()))?;

        let rate_limiter = self.rate_limit.map(|config| {
            RateLimiter::direct(
                Quota::per_second(config.requests_per_second).allow_burst(config.burst_size),
            )
        });

        Ok(GuildSyncClient {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                timeout: self.timeout,
                max_pages: self.max_pages,
                rate_limiter,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_rejects_relative_base_url() {
        let err = GuildSyncClient::new("/api", "token").unwrap_err();
        assert!(matches!(err, SyncError::InvalidUrl(_)));
    }

    #[test]
    fn test_rejects_empty_token() {
        let err = GuildSyncClient::new("https://example.org", "  ").unwrap_err();
        assert!(matches!(err, SyncError::Config(_)));
    }

    #[test]
    fn test_rejects_zero_page_bound() {
        let err = GuildSyncClient::builder("https://example.org", "t")
            .max_pages(0)
            .build()
            .unwrap_err();
        assert!(matches!(err, SyncError::Config(_)));
    }

    #[test]
    fn test_endpoint_joins_path_and_encodes_query() {
        let client = GuildSyncClient::new("https://example.org/", "t").unwrap();
        let url = client
            .endpoint("/api/members/", &[("email", "a+b@example.org")])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.org/api/members/?email=a%2Bb%40example.org"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path_prefix() {
        let client = GuildSyncClient::new("https://example.org/backend", "t").unwrap();
        let url = client.endpoint("/api/servers/", &[]).unwrap();
        assert_eq!(url.as_str(), "https://example.org/backend/api/servers/");
    }

    #[tokio::test]
    async fn test_token_header_is_sent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/servers/1/"))
            .and(header("Authorization", "Token s3cret"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"ok\": true}"))
            .expect(1)
            .mount(&server)
            .await;

        let client = GuildSyncClient::new(server.uri(), "s3cret").unwrap();
        let url = client.endpoint("/api/servers/1/", &[]).unwrap();
        let body: serde_json::Value = client.get_json(&url).await.unwrap();
        assert_eq!(body["ok"], true);
    }

    #[tokio::test]
    async fn test_mutation_failure_carries_status() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/api/servers/1/"))
            .and(body_string_contains("name=Renamed"))
            .respond_with(
                ResponseTemplate::new(400).set_body_string("{\"detail\": \"bad name\"}"),
            )
            .mount(&server)
            .await;

        let client = GuildSyncClient::new(server.uri(), "t").unwrap();
        let url = client.endpoint("/api/servers/1/", &[]).unwrap();
        let err = client
            .mutate(Method::PATCH, &url, Some(&[("name", "Renamed")][..]))
            .await
            .unwrap_err();

        match err {
            SyncError::Api { code, message } => {
                assert_eq!(code, 400);
                assert_eq!(message, "bad name");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_mutation_unauthorized() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = GuildSyncClient::new(server.uri(), "t").unwrap();
        let url = client.endpoint("/api/updates/3/", &[]).unwrap();
        let err = client
            .mutate::<()>(Method::DELETE, &url, None)
            .await
            .unwrap_err();
        assert!(err.is_auth_error());
        assert_eq!(err.status_code(), Some(401));
        assert!(!err.is_fetch_failure());
    }

    #[tokio::test]
    async fn test_timeout_is_a_fetch_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let client = GuildSyncClient::builder(server.uri(), "t")
            .timeout(Duration::from_millis(50))
            .build()
            .unwrap();
        let url = client.endpoint("/api/servers/1/", &[]).unwrap();
        let err = client.get_json::<serde_json::Value>(&url).await.unwrap_err();

        assert!(matches!(err, SyncError::Timeout { .. }));
        assert!(err.is_fetch_failure());
    }

    #[tokio::test]
    async fn test_stalled_body_is_a_timeout() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 1024];
            let _ = socket.read(&mut request).await;
            socket
                .write_all(
                    b"HTTP/1.1 200 OK\r\ncontent-type: application/json\r\n\
                      content-length: 100\r\n\r\n{\"results\": [",
                )
                .await
                .unwrap();
            socket.flush().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
        });

        let client = GuildSyncClient::builder(format!("http://{addr}"), "t")
            .timeout(Duration::from_millis(300))
            .build()
            .unwrap();
        let url = client.endpoint("/api/servers/", &[]).unwrap();
        let err = client
            .fetch_paginated::<serde_json::Value>(url)
            .await
            .unwrap_err();

        assert!(matches!(err, SyncError::Timeout { .. }));
        assert!(err.is_fetch_failure());
    }
}
