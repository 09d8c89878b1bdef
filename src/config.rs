//! Client configuration
//!
//! [`ClientConfig`] can be built in code, parsed from YAML, or read from
//! `DCTRACK_*` environment variables:
//!
//! ```yaml
//! url: https://dctrack.example.com/api/v2
//! username: reader
//! password_file: /run/secrets/dctrack
//! page_size: 500
//! max_retries: 3
//! retry_delay: 2s
//! timeout: 30s
//! verify_ssl: true
//! fields: minimal
//! ```

use crate::auth::Credentials;
use crate::error::{Error, Result};
use crate::fields::FieldSelection;
use crate::http::{HttpClientConfig, RetryPolicy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default records per page
pub const DEFAULT_PAGE_SIZE: u32 = 1000;
/// Default total attempts per page request
pub const DEFAULT_MAX_RETRIES: u32 = 3;
/// Default pause between attempts
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);
/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Prefix of every environment variable [`ClientConfig::from_env`] reads
pub const ENV_PREFIX: &str = "DCTRACK_";

// ============================================================================
// Client Config
// ============================================================================

/// Connection and request settings for a [`DcTrackClient`](crate::DcTrackClient)
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API base URL, e.g. `https://host/api/v2`
    pub url: String,

    /// Login name
    pub username: String,

    /// Password; may be left empty when `password_file` is set
    #[serde(default, skip_serializing)]
    pub password: String,

    /// File holding the password
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_file: Option<PathBuf>,

    /// Records requested per page
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Total attempts per page request, the first one included
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Fixed pause between attempts
    #[serde(default = "default_retry_delay", with = "duration_serde")]
    pub retry_delay: Duration,

    /// Per-request timeout
    #[serde(default = "default_timeout", with = "duration_serde")]
    pub timeout: Duration,

    /// Verify TLS certificates
    #[serde(default = "default_true")]
    pub verify_ssl: bool,

    /// Which columns to request
    #[serde(default)]
    pub fields: FieldSelection,
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_max_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}

fn default_retry_delay() -> Duration {
    DEFAULT_RETRY_DELAY
}

fn default_timeout() -> Duration {
    DEFAULT_TIMEOUT
}

fn default_true() -> bool {
    true
}

impl ClientConfig {
    /// Config with defaults for everything but the connection triple
    pub fn new(
        url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            username: username.into(),
            password: password.into(),
            password_file: None,
            page_size: DEFAULT_PAGE_SIZE,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: DEFAULT_RETRY_DELAY,
            timeout: DEFAULT_TIMEOUT,
            verify_ssl: true,
            fields: FieldSelection::default(),
        }
    }

    /// Start a builder from the connection triple
    pub fn builder(
        url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> ClientConfigBuilder {
        ClientConfigBuilder {
            config: Self::new(url, username, password),
        }
    }

    /// Parse YAML, resolve `password_file` and fill defaults
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.resolve_password()?.normalized().validated()
    }

    /// Load a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&content)
    }

    /// Read `DCTRACK_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup using the environment variable names
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(&format!("{ENV_PREFIX}{name}"))
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let url = var("URL").ok_or_else(|| Error::missing_field("DCTRACK_URL"))?;
        let username = var("USERNAME").ok_or_else(|| Error::missing_field("DCTRACK_USERNAME"))?;
        let mut config = Self::new(url, username, var("PASSWORD").unwrap_or_default());

        config.password_file = var("PASSWORD_FILE").map(PathBuf::from);

        if let Some(value) = var("PAGE_SIZE") {
            config.page_size = parse_number("DCTRACK_PAGE_SIZE", &value)?;
        }
        if let Some(value) = var("MAX_RETRIES") {
            config.max_retries = parse_number("DCTRACK_MAX_RETRIES", &value)?;
        }
        if let Some(value) = var("RETRY_DELAY") {
            config.retry_delay = parse_duration(&value)
                .map_err(|e| Error::invalid_value("DCTRACK_RETRY_DELAY", e))?;
        }
        if let Some(value) = var("TIMEOUT") {
            config.timeout =
                parse_duration(&value).map_err(|e| Error::invalid_value("DCTRACK_TIMEOUT", e))?;
        }
        if let Some(value) = var("VERIFY_SSL") {
            config.verify_ssl = parse_bool("DCTRACK_VERIFY_SSL", &value)?;
        }
        if let Some(value) = var("ALL_FIELDS") {
            config.fields = if parse_bool("DCTRACK_ALL_FIELDS", &value)? {
                FieldSelection::Full
            } else {
                FieldSelection::Minimal
            };
        }

        config.resolve_password()?.normalized().validated()
    }

    /// Read the password from `password_file` when none was given inline
    fn resolve_password(mut self) -> Result<Self> {
        if self.password.is_empty() {
            if let Some(path) = &self.password_file {
                let content = std::fs::read_to_string(path).map_err(|e| {
                    Error::invalid_value(
                        "password_file",
                        format!("cannot read {}: {e}", path.display()),
                    )
                })?;
                self.password = content.trim().to_string();
            }
        }
        Ok(self)
    }

    /// Replace zero values with defaults and drop a trailing `/` from the URL
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.url = self.url.trim().trim_end_matches('/').to_string();
        if self.page_size == 0 {
            self.page_size = DEFAULT_PAGE_SIZE;
        }
        if self.max_retries == 0 {
            self.max_retries = DEFAULT_MAX_RETRIES;
        }
        if self.retry_delay.is_zero() {
            self.retry_delay = DEFAULT_RETRY_DELAY;
        }
        if self.timeout.is_zero() {
            self.timeout = DEFAULT_TIMEOUT;
        }
        self
    }

    /// Check that the connection settings are usable
    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(Error::missing_field("url"));
        }
        let parsed = url::Url::parse(&self.url)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::invalid_value(
                "url",
                format!("unsupported scheme '{}'", parsed.scheme()),
            ));
        }
        if self.username.is_empty() {
            return Err(Error::missing_field("username"));
        }
        if self.password.is_empty() {
            return Err(Error::missing_field("password"));
        }
        Ok(())
    }

    fn validated(self) -> Result<Self> {
        self.validate()?;
        Ok(self)
    }

    /// Login credentials
    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.username, &self.password)
    }

    /// Retry policy for page requests
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_retries, self.retry_delay)
    }

    /// Settings for the shared HTTP client
    pub fn http_config(&self) -> HttpClientConfig {
        HttpClientConfig::builder()
            .base_url(self.url.clone())
            .timeout(self.timeout)
            .retry(self.max_retries, self.retry_delay)
            .verify_ssl(self.verify_ssl)
            .build()
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &"***")
            .field("password_file", &self.password_file)
            .field("page_size", &self.page_size)
            .field("max_retries", &self.max_retries)
            .field("retry_delay", &self.retry_delay)
            .field("timeout", &self.timeout)
            .field("verify_ssl", &self.verify_ssl)
            .field("fields", &self.fields)
            .finish()
    }
}

/// Fluent builder for [`ClientConfig`]
#[derive(Debug, Clone)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Records per page
    #[must_use]
    pub fn page_size(mut self, size: u32) -> Self {
        self.config.page_size = size;
        self
    }

    /// Total attempts per page request
    #[must_use]
    pub fn max_retries(mut self, attempts: u32) -> Self {
        self.config.max_retries = attempts;
        self
    }

    /// Pause between attempts
    #[must_use]
    pub fn retry_delay(mut self, delay: Duration) -> Self {
        self.config.retry_delay = delay;
        self
    }

    /// Per-request timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Accept invalid TLS certificates
    #[must_use]
    pub fn insecure(mut self) -> Self {
        self.config.verify_ssl = false;
        self
    }

    /// Column selection
    #[must_use]
    pub fn fields(mut self, fields: FieldSelection) -> Self {
        self.config.fields = fields;
        self
    }

    /// Read the password from a file when none was given
    #[must_use]
    pub fn password_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.password_file = Some(path.into());
        self
    }

    /// Resolve, normalize and validate
    pub fn build(self) -> Result<ClientConfig> {
        self.config.resolve_password()?.normalized().validated()
    }
}

// ============================================================================
// Value Parsing
// ============================================================================

/// Parse `"500ms"`, `"2s"`, `"1m"`, `"1h"` or bare seconds (`"5"`)
pub fn parse_duration(value: &str) -> std::result::Result<Duration, String> {
    let value = value.trim();
    let split = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());
    let (number, unit) = value.split_at(split);

    let number: u64 = number
        .parse()
        .map_err(|_| format!("invalid duration '{value}'"))?;

    match unit.trim() {
        "" | "s" => Ok(Duration::from_secs(number)),
        "ms" => Ok(Duration::from_millis(number)),
        "m" => Ok(Duration::from_secs(number * 60)),
        "h" => Ok(Duration::from_secs(number * 3600)),
        other => Err(format!(
            "invalid duration unit '{other}' in '{value}', expected ms, s, m or h"
        )),
    }
}

/// Render a duration the way [`parse_duration`] reads it
pub fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();
    if millis % 1000 != 0 {
        format!("{millis}ms")
    } else {
        format!("{}s", duration.as_secs())
    }
}

fn parse_number(field: &str, value: &str) -> Result<u32> {
    value
        .parse()
        .map_err(|_| Error::invalid_value(field, format!("'{value}' is not a number")))
}

fn parse_bool(field: &str, value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(Error::invalid_value(
            field,
            format!("'{value}' is not a boolean"),
        )),
    }
}

/// Durations as `"2s"` strings or bare integer seconds
mod duration_serde {
    use super::{format_duration, parse_duration};
    use serde::{de, Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Seconds(u64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_duration(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        match Raw::deserialize(deserializer)? {
            Raw::Seconds(secs) => Ok(Duration::from_secs(secs)),
            Raw::Text(text) => parse_duration(&text).map_err(de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use test_case::test_case;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_new_defaults() {
        let config = ClientConfig::new("https://dc.example.com/api/v2", "user", "pass");
        assert_eq!(config.page_size, 1000);
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.retry_delay, Duration::from_secs(1));
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.verify_ssl);
        assert_eq!(config.fields, FieldSelection::Full);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_yaml_config() {
        let yaml = r#"
url: "https://dctrack.example.com/api/v2/"
username: reader
password: secret
page_size: 250
max_retries: 5
retry_delay: 500ms
timeout: 10
verify_ssl: false
fields: minimal
"#;

        let config = ClientConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.url, "https://dctrack.example.com/api/v2");
        assert_eq!(config.username, "reader");
        assert_eq!(config.password, "secret");
        assert_eq!(config.page_size, 250);
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.retry_delay, Duration::from_millis(500));
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert!(!config.verify_ssl);
        assert_eq!(config.fields, FieldSelection::Minimal);
    }

    #[test]
    fn test_yaml_zero_values_normalized() {
        let yaml = r#"
url: "https://dc.example.com"
username: u
password: p
page_size: 0
max_retries: 0
retry_delay: 0s
"#;
        let config = ClientConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.max_retries, DEFAULT_MAX_RETRIES);
        assert_eq!(config.retry_delay, DEFAULT_RETRY_DELAY);
    }

    #[test]
    fn test_yaml_missing_password_rejected() {
        let yaml = "url: https://dc.example.com\nusername: u\n";
        let err = ClientConfig::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, Error::MissingConfigField { ref field } if field == "password"));
    }

    #[test]
    fn test_yaml_bad_duration_rejected() {
        let yaml = "url: https://dc.example.com\nusername: u\npassword: p\nretry_delay: soon\n";
        assert!(matches!(
            ClientConfig::from_yaml_str(yaml),
            Err(Error::YamlParse(_))
        ));
    }

    #[test]
    fn test_from_file_with_password_file() {
        let dir = tempfile::tempdir().unwrap();

        let secret_path = dir.path().join("secret");
        std::fs::write(&secret_path, "s3cret\n").unwrap();

        let config_path = dir.path().join("dctrack.yaml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(
            file,
            "url: https://dc.example.com\nusername: u\npassword_file: {}",
            secret_path.display()
        )
        .unwrap();

        let config = ClientConfig::from_file(&config_path).unwrap();
        assert_eq!(config.password, "s3cret");
    }

    #[test]
    fn test_unreadable_password_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ClientConfig::builder("https://dc.example.com", "u", "")
            .password_file(dir.path().join("missing"))
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue { ref field, .. } if field == "password_file"));
    }

    #[test]
    fn test_from_file_missing() {
        assert!(matches!(
            ClientConfig::from_file("/nonexistent/dctrack.yaml"),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn test_from_env_full() {
        let config = ClientConfig::from_lookup(env(&[
            ("DCTRACK_URL", "https://dc.example.com/api/v2"),
            ("DCTRACK_USERNAME", "user"),
            ("DCTRACK_PASSWORD", "pass"),
            ("DCTRACK_PAGE_SIZE", "100"),
            ("DCTRACK_MAX_RETRIES", "4"),
            ("DCTRACK_RETRY_DELAY", "2"),
            ("DCTRACK_TIMEOUT", "1m"),
            ("DCTRACK_VERIFY_SSL", "false"),
            ("DCTRACK_ALL_FIELDS", "false"),
        ]))
        .unwrap();

        assert_eq!(config.page_size, 100);
        assert_eq!(config.max_retries, 4);
        assert_eq!(config.retry_delay, Duration::from_secs(2));
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert!(!config.verify_ssl);
        assert_eq!(config.fields, FieldSelection::Minimal);
    }

    #[test]
    fn test_from_env_missing_url() {
        let err = ClientConfig::from_lookup(env(&[("DCTRACK_USERNAME", "u")])).unwrap_err();
        assert!(matches!(err, Error::MissingConfigField { ref field } if field == "DCTRACK_URL"));
    }

    #[test]
    fn test_from_env_invalid_number() {
        let err = ClientConfig::from_lookup(env(&[
            ("DCTRACK_URL", "https://dc.example.com"),
            ("DCTRACK_USERNAME", "u"),
            ("DCTRACK_PASSWORD", "p"),
            ("DCTRACK_PAGE_SIZE", "lots"),
        ]))
        .unwrap_err();
        assert!(
            matches!(err, Error::InvalidConfigValue { ref field, .. } if field == "DCTRACK_PAGE_SIZE")
        );
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let config = ClientConfig::new("not a url", "u", "p");
        assert!(matches!(config.validate(), Err(Error::InvalidUrl(_))));

        let config = ClientConfig::new("ftp://dc.example.com", "u", "p");
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfigValue { .. })
        ));

        let config = ClientConfig::new("", "u", "p");
        assert!(matches!(
            config.validate(),
            Err(Error::MissingConfigField { .. })
        ));
    }

    #[test]
    fn test_builder() {
        let config = ClientConfig::builder("https://dc.example.com/", "u", "p")
            .page_size(10)
            .max_retries(2)
            .retry_delay(Duration::from_millis(50))
            .timeout(Duration::from_secs(5))
            .insecure()
            .fields(FieldSelection::ServerDefault)
            .build()
            .unwrap();

        assert_eq!(config.url, "https://dc.example.com");
        assert_eq!(config.retry_policy(), RetryPolicy::new(2, Duration::from_millis(50)));
        assert_eq!(config.credentials().username(), "u");

        let http = config.http_config();
        assert_eq!(http.base_url.as_deref(), Some("https://dc.example.com"));
        assert_eq!(http.timeout, Duration::from_secs(5));
        assert!(!http.verify_ssl);
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = ClientConfig::new("https://dc.example.com", "u", "hunter2");
        let debug = format!("{config:?}");
        assert!(!debug.contains("hunter2"));
    }

    #[test_case("500ms", Duration::from_millis(500) ; "millis")]
    #[test_case("2s", Duration::from_secs(2) ; "seconds")]
    #[test_case("1m", Duration::from_secs(60) ; "minutes")]
    #[test_case("1h", Duration::from_secs(3600) ; "hours")]
    #[test_case("7", Duration::from_secs(7) ; "bare seconds")]
    #[test_case(" 3s ", Duration::from_secs(3) ; "padded")]
    fn test_parse_duration(input: &str, expected: Duration) {
        assert_eq!(parse_duration(input), Ok(expected));
    }

    #[test_case("" ; "empty")]
    #[test_case("s" ; "unit only")]
    #[test_case("5 days" ; "unknown unit")]
    #[test_case("-1s" ; "negative")]
    fn test_parse_duration_invalid(input: &str) {
        assert!(parse_duration(input).is_err());
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(1500)), "1500ms");
        assert_eq!(format_duration(Duration::from_secs(2)), "2s");
    }
}
