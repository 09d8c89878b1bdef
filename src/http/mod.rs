//! HTTP client module
//!
//! Provides the HTTP client used for every page request.
//!
//! # Features
//!
//! - **Fixed-delay retries**: transport failures and non-200 statuses are
//!   retried with a constant pause, attempts counted from one
//! - **Cancellation**: sends and inter-retry waits race a
//!   [`CancellationToken`](tokio_util::sync::CancellationToken)
//! - **Ordered query parameters**: sent exactly as added

mod client;
mod retry;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
pub use retry::RetryPolicy;
