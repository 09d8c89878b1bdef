//! Error types for the DCTrack client
//!
//! Every public API returns `Result<T, Error>` where Error is defined here.
//! Transport and status failures are retryable inside a single page fetch;
//! everything else ends the operation immediately.

use thiserror::Error;

/// Why a login exchange failed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The service rejected the credentials (any non-200 login status)
    #[error("invalid credentials: login returned status {status}")]
    InvalidCredentials { status: u16 },

    /// Status 200 but no usable token in the header or body
    #[error("malformed login response: {message}")]
    MalformedResponse { message: String },
}

/// The main error type for the DCTrack client
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Authentication Errors
    // ============================================================================
    #[error("Authentication failed: {0}")]
    Auth(#[from] AuthError),

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("All {attempts} attempts failed, last error: {source}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        source: Box<Error>,
    },

    #[error("Operation cancelled")]
    Cancelled,

    // ============================================================================
    // Data Processing Errors
    // ============================================================================
    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    #[error("Invalid record, field '{field}': {message}")]
    Mapping { field: String, message: String },

    #[error("Item with ID {id} not found")]
    NotFound { id: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a mapping error
    pub fn mapping(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Mapping {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Check if this error is retryable within a page fetch
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Transport(_) | Error::HttpStatus { .. })
    }

    /// Check if this error came from cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }

    /// The innermost cause behind a retry wrapper
    pub fn last_cause(&self) -> &Error {
        match self {
            Error::RetriesExhausted { source, .. } => source.last_cause(),
            other => other,
        }
    }
}

/// Result type alias for the DCTrack client
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::missing_field("url");
        assert_eq!(err.to_string(), "Missing required config field: url");

        let err = Error::http_status(503, "Service Unavailable");
        assert_eq!(err.to_string(), "HTTP 503: Service Unavailable");

        let err = Error::not_found("42");
        assert_eq!(err.to_string(), "Item with ID 42 not found");
    }

    #[test]
    fn test_auth_error_display() {
        let err: Error = AuthError::InvalidCredentials { status: 401 }.into();
        assert_eq!(
            err.to_string(),
            "Authentication failed: invalid credentials: login returned status 401"
        );
    }

    #[test]
    fn test_is_retryable() {
        assert!(Error::http_status(500, "").is_retryable());
        assert!(Error::http_status(404, "").is_retryable());

        assert!(!Error::decode("bad").is_retryable());
        assert!(!Error::Cancelled.is_retryable());
        assert!(!Error::from(AuthError::InvalidCredentials { status: 401 }).is_retryable());
        assert!(!Error::mapping("id", "empty").is_retryable());
    }

    #[test]
    fn test_retries_exhausted_wraps_last_cause() {
        let err = Error::RetriesExhausted {
            attempts: 3,
            source: Box::new(Error::http_status(502, "Bad Gateway")),
        };
        assert_eq!(
            err.to_string(),
            "All 3 attempts failed, last error: HTTP 502: Bad Gateway"
        );
        assert!(matches!(
            err.last_cause(),
            Error::HttpStatus { status: 502, .. }
        ));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_json_error_from() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = parse.into();
        assert!(matches!(err, Error::Json(_)));
        assert!(err.to_string().starts_with("JSON error: "));
        assert!(!err.is_retryable());
    }
}
