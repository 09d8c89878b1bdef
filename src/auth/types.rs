//! Auth value types
//!
//! Credentials go in, a token comes out. Neither prints its secret through
//! `Debug`.

use std::fmt;

/// Username and password for the login exchange
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Create credentials
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// The login name
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The password
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Opaque bearer token issued by the login endpoint.
///
/// Scoped to one fetch operation; nothing caches it.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    /// Wrap a raw token value
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw token value
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length of the token, for diagnostics
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the token is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token(<{} bytes>)", self.0.len())
    }
}

#[cfg(test)]
mod type_tests {
    use super::*;

    #[test]
    fn test_credentials_debug_hides_password() {
        let creds = Credentials::new("admin", "hunter2");
        let debug = format!("{creds:?}");
        assert!(debug.contains("admin"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_token_debug_hides_value() {
        let token = Token::new("secret-token");
        let debug = format!("{token:?}");
        assert_eq!(debug, "Token(<12 bytes>)");
        assert_eq!(token.as_str(), "secret-token");
        assert_eq!(token.len(), 12);
    }
}
