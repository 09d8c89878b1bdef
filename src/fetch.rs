//! Single-page fetch
//!
//! One retrying POST, envelope decode, then per-record mapping. A record
//! that fails to map is logged and skipped; it never fails the page.

use crate::auth::Token;
use crate::decode::{decode_envelope, PageMeta};
use crate::error::Result;
use crate::http::{HttpClient, RequestConfig, RetryPolicy};
use crate::record::{Item, RecordMapper};
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// What to send for one page
#[derive(Debug, Clone)]
pub struct PageRequest {
    /// Full or base-relative URL of the search endpoint
    pub url: String,
    /// Query parameters in wire order
    pub query: Vec<(String, String)>,
    /// JSON body, normally a column selection
    pub payload: Value,
}

/// One mapped page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    /// Mapped items in service order
    pub items: Vec<Item>,
    /// Records the service returned, including skipped ones
    pub raw_count: usize,
    /// Records dropped because they failed to map
    pub skipped: usize,
    /// Metadata from the nested envelope shape, if present
    pub meta: Option<PageMeta>,
}

impl Page {
    /// Whether the service returned no records at all
    pub fn is_empty(&self) -> bool {
        self.raw_count == 0
    }
}

/// Fetches and maps single pages
#[derive(Debug, Clone)]
pub struct PageFetcher {
    http: HttpClient,
    mapper: RecordMapper,
}

impl PageFetcher {
    /// Create a fetcher over an HTTP client
    pub fn new(http: HttpClient) -> Self {
        Self {
            http,
            mapper: RecordMapper::new(),
        }
    }

    /// Fetch one page.
    ///
    /// Transport failures and non-200 statuses are retried under `policy`;
    /// decode failures are returned at once.
    pub async fn fetch(
        &self,
        request: &PageRequest,
        token: &Token,
        policy: RetryPolicy,
        cancel: &CancellationToken,
    ) -> Result<Page> {
        let config = RequestConfig {
            query: request.query.clone(),
            body: Some(request.payload.clone()),
            bearer: Some(token.clone()),
            retry: Some(policy),
            ..RequestConfig::default()
        };

        let body = self.http.post_with_config(&request.url, config, cancel).await?;
        let envelope = decode_envelope(&body)?;

        let raw_count = envelope.records.len();
        let mut items = Vec::with_capacity(raw_count);
        let mut skipped = 0;

        for (index, record) in envelope.records.iter().enumerate() {
            match self.mapper.map(record) {
                Ok(item) => items.push(item),
                Err(e) => {
                    warn!("Skipping record {index}: {e}");
                    skipped += 1;
                }
            }
        }

        debug!(
            "Fetched page: {} records, {} mapped, {} skipped",
            raw_count,
            items.len(),
            skipped
        );

        Ok(Page {
            items,
            raw_count,
            skipped,
            meta: envelope.meta,
        })
    }
}

#[cfg(test)]
mod fetch_tests {
    use super::*;
    use crate::error::Error;
    use crate::http::HttpClientConfig;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fetcher(server: &MockServer) -> PageFetcher {
        let config = HttpClientConfig::builder().base_url(server.uri()).build();
        PageFetcher::new(HttpClient::with_config(config).unwrap())
    }

    fn request() -> PageRequest {
        PageRequest {
            url: "quicksearch/items".to_string(),
            query: vec![("pageNumber".to_string(), "1".to_string())],
            payload: json!({}),
        }
    }

    #[tokio::test]
    async fn test_fetch_skips_unmappable_records() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/quicksearch/items"))
            .and(header("Authorization", "Bearer tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "records": [
                    {"id": "a", "tiName": "first"},
                    {"tiName": "no id"},
                    {"id": "c", "tiName": "third"}
                ]
            })))
            .mount(&server)
            .await;

        let page = fetcher(&server)
            .fetch(
                &request(),
                &Token::new("tok"),
                RetryPolicy::no_retry(),
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        assert_eq!(page.raw_count, 3);
        assert_eq!(page.skipped, 1);
        let ids: Vec<_> = page.items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["a", "c"]);
        assert!(page.meta.is_none());
    }

    #[tokio::test]
    async fn test_fetch_skips_null_record_and_keeps_page() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "totalRows": null,
                "searchResults": {"items": [{"id": "a"}, null]}
            })))
            .mount(&server)
            .await;

        let page = fetcher(&server)
            .fetch(
                &request(),
                &Token::new("tok"),
                RetryPolicy::no_retry(),
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        assert_eq!(page.raw_count, 2);
        assert_eq!(page.skipped, 1);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.meta.map(|m| m.total_rows), Some(0));
    }

    #[tokio::test]
    async fn test_fetch_nested_shape_keeps_meta() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "totalRows": 5,
                "pageNumber": 1,
                "pageSize": 2,
                "searchResults": {"items": [{"id": "x"}, {"id": "y"}]}
            })))
            .mount(&server)
            .await;

        let page = fetcher(&server)
            .fetch(
                &request(),
                &Token::new("tok"),
                RetryPolicy::no_retry(),
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        assert_eq!(page.items.len(), 2);
        assert_eq!(page.meta.map(|m| m.total_rows), Some(5));
    }

    #[tokio::test]
    async fn test_fetch_decode_error_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .expect(1)
            .mount(&server)
            .await;

        let err = fetcher(&server)
            .fetch(
                &request(),
                &Token::new("tok"),
                RetryPolicy::new(3, Duration::from_millis(5)),
                &CancellationToken::new(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Decode { .. }));
    }
}
