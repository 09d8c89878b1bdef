//! HTTP client with fixed-delay retry
//!
//! Provides an HTTP client that handles:
//! - Retrying transport failures and non-200 statuses with a constant delay
//! - Cancellation of both in-flight requests and inter-retry waits
//! - Wrapping the last failure once attempts run out

use super::retry::RetryPolicy;
use crate::auth::Token;
use crate::decode::preview;
use crate::error::{Error, Result};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL for all requests
    pub base_url: Option<String>,
    /// Request timeout
    pub timeout: Duration,
    /// Retry policy for every request
    pub retry: RetryPolicy,
    /// Whether to verify TLS certificates
    pub verify_ssl: bool,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: Duration::from_secs(30),
            retry: RetryPolicy::default(),
            verify_ssl: true,
            default_headers: HashMap::new(),
            user_agent: format!("dctrack-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the retry policy
    pub fn retry(mut self, max_attempts: u32, delay: Duration) -> Self {
        self.config.retry = RetryPolicy::new(max_attempts, delay);
        self
    }

    /// Set TLS certificate verification
    pub fn verify_ssl(mut self, verify: bool) -> Self {
        self.config.verify_ssl = verify;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// Configuration for a single request
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    /// Query parameters, sent in insertion order
    pub query: Vec<(String, String)>,
    /// Request headers
    pub headers: HashMap<String, String>,
    /// Request body (JSON)
    pub body: Option<Value>,
    /// Bearer token for the Authorization header
    pub bearer: Option<Token>,
    /// Override timeout for this request
    pub timeout: Option<Duration>,
    /// Override retry policy for this request
    pub retry: Option<RetryPolicy>,
}

impl RequestConfig {
    /// Create a new request config
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set JSON body
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Authenticate with a bearer token
    #[must_use]
    pub fn bearer(mut self, token: Token) -> Self {
        self.bearer = Some(token);
        self
    }

    /// Set timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set retry policy
    #[must_use]
    pub fn retry(mut self, policy: RetryPolicy) -> Self {
        self.retry = Some(policy);
        self
    }
}

/// HTTP client with fixed-delay retry
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .danger_accept_invalid_certs(!config.verify_ssl)
            .build()?;

        Ok(Self { client, config })
    }

    /// Get the underlying reqwest client
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Get the client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Make a POST request and return the body of the 200 response
    pub async fn post_with_config(
        &self,
        url: &str,
        config: RequestConfig,
        cancel: &CancellationToken,
    ) -> Result<String> {
        self.request(Method::POST, url, config, cancel).await
    }

    /// Make a request, retrying transport failures and non-200 statuses.
    ///
    /// Returns the response body of the first 200 answer. When attempts run
    /// out the result is [`Error::RetriesExhausted`] wrapping the last
    /// failure. Cancellation ends the loop immediately with
    /// [`Error::Cancelled`].
    pub async fn request(
        &self,
        method: Method,
        url: &str,
        config: RequestConfig,
        cancel: &CancellationToken,
    ) -> Result<String> {
        let full_url = self.build_url(url);
        let policy = config.retry.unwrap_or(self.config.retry);
        let timeout = config.timeout.unwrap_or(self.config.timeout);

        let mut attempt = 0;
        loop {
            attempt += 1;
            if cancel.is_cancelled() {
                return Err(Error::Cancelled);
            }

            debug!(
                "Making request: {} {} (attempt {}/{})",
                method, full_url, attempt, policy.max_attempts
            );

            let req = self.build_request(method.clone(), &full_url, &config, timeout);
            match self.send_once(req, cancel).await {
                Ok(body) => {
                    debug!(
                        "Request succeeded: {} {} ({} bytes)",
                        method,
                        full_url,
                        body.len()
                    );
                    return Ok(body);
                }
                Err(e) if e.is_retryable() => {
                    if policy.should_retry(attempt) {
                        warn!(
                            "Request failed: {}, attempt {}/{}, retrying in {:?}",
                            e, attempt, policy.max_attempts, policy.delay
                        );
                        policy.wait(cancel).await?;
                        continue;
                    }
                    warn!("Request failed: {e}, giving up after {attempt} attempts");
                    return Err(Error::RetriesExhausted {
                        attempts: attempt,
                        source: Box::new(e),
                    });
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn build_request(
        &self,
        method: Method,
        url: &str,
        config: &RequestConfig,
        timeout: Duration,
    ) -> RequestBuilder {
        let mut req = self
            .client
            .request(method, url)
            .header(ACCEPT, "application/json")
            .timeout(timeout);

        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }

        for (key, value) in &config.headers {
            req = req.header(key.as_str(), value.as_str());
        }

        if let Some(token) = &config.bearer {
            req = req.header(AUTHORIZATION, format!("Bearer {}", token.as_str()));
        }

        if !config.query.is_empty() {
            req = req.query(&config.query);
        }

        if let Some(body) = &config.body {
            req = req.json(body);
        }

        req
    }

    /// One exchange: send, read the body, classify the status
    async fn send_once(&self, req: RequestBuilder, cancel: &CancellationToken) -> Result<String> {
        let response = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(Error::Cancelled),
            result = req.send() => result?,
        };

        let status = response.status();
        let body = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(Error::Cancelled),
            result = response.text() => result,
        };

        if status != StatusCode::OK {
            let body = body.unwrap_or_default();
            return Err(Error::http_status(status.as_u16(), preview(&body, 200)));
        }
        Ok(body?)
    }

    /// Build full URL from path
    fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }

        match &self.config.base_url {
            Some(base) => {
                let base = base.trim_end_matches('/');
                let path = path.trim_start_matches('/');
                format!("{base}/{path}")
            }
            None => path.to_string(),
        }
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
