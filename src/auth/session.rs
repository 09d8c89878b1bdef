//! Login exchange
//!
//! Sends credentials with HTTP basic auth to `{base}/authentication/login`
//! and pulls the bearer token out of the response. The token normally comes
//! back in the `Authorization` header; some service builds put it in the JSON
//! body instead, so both are checked.

use super::types::{Credentials, Token};
use crate::error::{AuthError, Error, Result};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Path of the login endpoint, relative to the API base URL
pub const LOGIN_PATH: &str = "authentication/login";

/// Body locations checked, in order, when the header carries no token
const BODY_TOKEN_PATHS: &[&str] = &["token", "access_token", "accessToken", "jwt", "data.token"];

/// Exchanges credentials for a bearer token.
///
/// Holds no token itself; each call to [`AuthSession::login`] returns a fresh
/// one owned by the caller.
#[derive(Debug, Clone)]
pub struct AuthSession {
    http_client: Client,
    login_url: String,
}

impl AuthSession {
    /// Create a session against the given API base URL
    pub fn new(base_url: &str) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a session that reuses an existing HTTP client
    pub fn with_client(base_url: &str, http_client: Client) -> Self {
        Self {
            http_client,
            login_url: format!("{}/{LOGIN_PATH}", base_url.trim_end_matches('/')),
        }
    }

    /// The full login URL
    pub fn login_url(&self) -> &str {
        &self.login_url
    }

    /// Log in once. Not retried: a rejected login is final.
    pub async fn login(
        &self,
        credentials: &Credentials,
        cancel: &CancellationToken,
    ) -> Result<Token> {
        debug!(
            "Making login request: POST {} as {}",
            self.login_url,
            credentials.username()
        );

        let request = self
            .http_client
            .post(&self.login_url)
            .basic_auth(credentials.username(), Some(credentials.password()))
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json");

        let response = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(Error::Cancelled),
            result = request.send() => result?,
        };

        let status = response.status();
        if status != StatusCode::OK {
            return Err(AuthError::InvalidCredentials {
                status: status.as_u16(),
            }
            .into());
        }

        let header = response
            .headers()
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        if let Some(token) = header.as_deref().and_then(bearer_token) {
            let token = Token::new(token);
            debug!("Obtained token from header ({} bytes)", token.len());
            return Ok(token);
        }

        let body = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(Error::Cancelled),
            result = response.text() => result?,
        };

        match token_from_body(&body) {
            Some(token) => {
                let token = Token::new(token);
                debug!("Obtained token from body ({} bytes)", token.len());
                Ok(token)
            }
            None => {
                let message = match header {
                    Some(_) => "Authorization header is not a Bearer token",
                    None => "no Authorization header and no token in body",
                };
                Err(AuthError::MalformedResponse {
                    message: message.to_string(),
                }
                .into())
            }
        }
    }
}

/// Extract `<token>` from a `Bearer <token>` header value
pub fn bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Find a token in a JSON login body under one of the conventional keys
pub fn token_from_body(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    BODY_TOKEN_PATHS.iter().find_map(|path| {
        let raw = extract_path(&value, path)?;
        let token = bearer_token(&raw).unwrap_or(raw.as_str()).trim();
        (!token.is_empty()).then(|| token.to_string())
    })
}

/// Walk a dot-separated path like `data.token` to a string value
fn extract_path(value: &Value, path: &str) -> Option<String> {
    let mut current = value;
    for part in path.split('.') {
        current = current.as_object()?.get(part)?;
    }
    current.as_str().map(str::to_string)
}
