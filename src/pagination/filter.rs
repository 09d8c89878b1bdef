//! Item filters
//!
//! A [`Filter`] narrows a search and optionally pins the page cursor. Every
//! field is optional; an absent or empty field leaves that dimension
//! unconstrained.

use serde::{Deserialize, Serialize};

/// Status the presets filter on
pub const INSTALLED: &str = "Installed";

/// Search criteria plus an optional page cursor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Filter {
    /// Location, partial match
    pub location: Option<String>,
    /// Status, e.g. `Installed` or `Planned`
    pub status: Option<String>,
    /// Item class, e.g. `Device` or `Network`
    pub item_class: Option<String>,
    /// Manufacturer
    pub make: Option<String>,
    /// Model
    pub model: Option<String>,
    /// Free-text search across fields
    pub search_text: Option<String>,
    /// Fetch only this page when set (and greater than zero)
    pub page_number: Option<u32>,
    /// Page size override
    pub page_size: Option<u32>,
}

impl Filter {
    /// An unconstrained filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a filter builder
    pub fn builder() -> FilterBuilder {
        FilterBuilder::default()
    }

    /// Installed items only
    pub fn installed_only() -> Self {
        Self {
            status: Some(INSTALLED.to_string()),
            ..Self::default()
        }
    }

    /// Installed items at a location
    pub fn by_location(location: impl Into<String>) -> Self {
        Self {
            location: Some(location.into()),
            status: Some(INSTALLED.to_string()),
            ..Self::default()
        }
    }

    /// Installed items from a manufacturer
    pub fn by_vendor(make: impl Into<String>) -> Self {
        Self {
            make: Some(make.into()),
            status: Some(INSTALLED.to_string()),
            ..Self::default()
        }
    }

    /// Free-text search
    pub fn search(text: impl Into<String>) -> Self {
        Self {
            search_text: Some(text.into()),
            ..Self::default()
        }
    }

    /// The pinned page, if the caller asked for exactly one
    pub fn single_page(&self) -> Option<u32> {
        self.page_number.filter(|&n| n > 0)
    }

    /// Page size to request, falling back to `default`
    pub fn effective_page_size(&self, default: u32) -> u32 {
        self.page_size.filter(|&n| n > 0).unwrap_or(default)
    }

    /// Query parameters for one page, in wire order.
    ///
    /// `pageNumber` and `pageSize` always lead; criteria follow and are
    /// omitted when absent or empty.
    pub fn query_params(&self, page: u32, page_size: u32) -> Vec<(String, String)> {
        let mut params = vec![
            ("pageNumber".to_string(), page.to_string()),
            ("pageSize".to_string(), page_size.to_string()),
        ];

        let criteria = [
            ("location", &self.location),
            ("status", &self.status),
            ("itemClass", &self.item_class),
            ("make", &self.make),
            ("model", &self.model),
            ("searchText", &self.search_text),
        ];

        for (key, value) in criteria {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                params.push((key.to_string(), value.to_string()));
            }
        }

        params
    }
}

/// Fluent builder for [`Filter`]
#[derive(Debug, Clone, Default)]
pub struct FilterBuilder {
    filter: Filter,
}

impl FilterBuilder {
    /// Filter by location
    #[must_use]
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.filter.location = Some(location.into());
        self
    }

    /// Filter by status
    #[must_use]
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.filter.status = Some(status.into());
        self
    }

    /// Filter by item class
    #[must_use]
    pub fn item_class(mut self, item_class: impl Into<String>) -> Self {
        self.filter.item_class = Some(item_class.into());
        self
    }

    /// Filter by manufacturer
    #[must_use]
    pub fn make(mut self, make: impl Into<String>) -> Self {
        self.filter.make = Some(make.into());
        self
    }

    /// Filter by model
    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.filter.model = Some(model.into());
        self
    }

    /// Free-text search
    #[must_use]
    pub fn search_text(mut self, text: impl Into<String>) -> Self {
        self.filter.search_text = Some(text.into());
        self
    }

    /// Fetch exactly page `page` with `size` records
    #[must_use]
    pub fn page(mut self, page: u32, size: u32) -> Self {
        self.filter.page_number = Some(page);
        self.filter.page_size = Some(size);
        self
    }

    /// Override the page size without pinning a page
    #[must_use]
    pub fn page_size(mut self, size: u32) -> Self {
        self.filter.page_size = Some(size);
        self
    }

    /// Build the filter
    pub fn build(self) -> Filter {
        self.filter
    }
}
