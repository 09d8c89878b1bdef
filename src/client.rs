//! DCTrack client
//!
//! [`DcTrackClient`] ties the pieces together: log in, walk the search pages,
//! map records. It holds configuration and a connection pool only. Each
//! operation logs in for its own token and drops it when done, so one client
//! can serve any number of concurrent operations.

use crate::auth::{AuthSession, Token};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::fetch::{Page, PageFetcher, PageRequest};
use crate::http::{HttpClient, RetryPolicy};
use crate::pagination::{Filter, PageSource, Paginator};
use crate::record::Item;
use async_trait::async_trait;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Search endpoint, relative to the API base URL
pub const SEARCH_PATH: &str = "quicksearch/items";

/// Client for the DCTrack item search API
#[derive(Debug, Clone)]
pub struct DcTrackClient {
    config: ClientConfig,
    auth: AuthSession,
    fetcher: PageFetcher,
}

impl DcTrackClient {
    /// Create a client; the config is normalized and validated first
    pub fn new(config: ClientConfig) -> Result<Self> {
        let config = config.normalized();
        config.validate()?;

        let http = HttpClient::with_config(config.http_config())?;
        let auth = AuthSession::with_client(&config.url, http.inner().clone());

        Ok(Self {
            config,
            auth,
            fetcher: PageFetcher::new(http),
        })
    }

    /// The effective configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Log in and return a fresh token
    pub async fn login(&self, cancel: &CancellationToken) -> Result<Token> {
        self.auth.login(&self.config.credentials(), cancel).await
    }

    /// Every item, using the configured page size
    pub async fn get_items(&self, cancel: &CancellationToken) -> Result<Vec<Item>> {
        self.get_items_with_params(&Filter::new(), cancel).await
    }

    /// Items matching `filter`.
    ///
    /// Logs in, then pages through results until the service runs out or
    /// the filter's pinned page has been fetched. Returns every item or an
    /// error, never a partial list.
    pub async fn get_items_with_params(
        &self,
        filter: &Filter,
        cancel: &CancellationToken,
    ) -> Result<Vec<Item>> {
        let token = self.login(cancel).await?;
        debug!("Logged in, token is {} bytes", token.len());

        let source = SearchPages {
            fetcher: &self.fetcher,
            filter,
            payload: self.config.fields.payload(),
            token,
            policy: self.config.retry_policy(),
        };

        let paginator = Paginator::for_filter(filter, self.config.page_size);
        let items = paginator.collect(&source, cancel).await?;

        info!("Fetched {} items from DCTrack", items.len());
        Ok(items)
    }

    /// The item whose id equals `id` exactly
    pub async fn get_item_by_id(&self, id: &str, cancel: &CancellationToken) -> Result<Item> {
        let id = id.trim();
        if id.is_empty() {
            return Err(Error::invalid_argument("item id must not be empty"));
        }

        self.get_items_with_params(&Filter::search(id), cancel)
            .await?
            .into_iter()
            .find(|item| item.id == id)
            .ok_or_else(|| Error::not_found(id))
    }

    /// Free-text search across item fields
    pub async fn search_items(
        &self,
        query: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<Item>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(Error::invalid_argument("search query must not be empty"));
        }

        self.get_items_with_params(&Filter::search(query), cancel)
            .await
    }
}

/// Search pages for one operation, bound to that operation's token
struct SearchPages<'a> {
    fetcher: &'a PageFetcher,
    filter: &'a Filter,
    payload: Value,
    token: Token,
    policy: RetryPolicy,
}

#[async_trait]
impl PageSource for SearchPages<'_> {
    async fn fetch_page(
        &self,
        page: u32,
        page_size: u32,
        cancel: &CancellationToken,
    ) -> Result<Page> {
        let request = PageRequest {
            url: SEARCH_PATH.to_string(),
            query: self.filter.query_params(page, page_size),
            payload: self.payload.clone(),
        };

        self.fetcher
            .fetch(&request, &self.token, self.policy, cancel)
            .await
    }
}
