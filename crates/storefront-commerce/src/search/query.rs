//! Catalog query builder.

use crate::catalog::Product;
use crate::search::Filter;
use serde::{Deserialize, Serialize};

/// Category value that stands for "every category".
pub const ALL_CATEGORIES: &str = "all";

/// A catalog query: free text plus filters, all of which must match.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CatalogQuery {
    /// Text query as typed by the user.
    pub query: Option<String>,
    /// Filters to apply.
    pub filters: Vec<Filter>,
}

impl CatalogQuery {
    /// Create an empty query that matches every product.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text query. Blank input adds no filter.
    pub fn with_query(mut self, q: impl Into<String>) -> Self {
        let q = q.into();
        let trimmed = q.trim();
        if !trimmed.is_empty() {
            self.query = Some(trimmed.to_string());
            self.filters.push(Filter::Text(trimmed.to_string()));
        }
        self
    }

    /// Restrict to a category. `None` or `"all"` leaves the query unrestricted.
    pub fn with_category(mut self, category: Option<&str>) -> Self {
        match category.map(str::trim) {
            None | Some("") => {}
            Some(c) if c.eq_ignore_ascii_case(ALL_CATEGORIES) => {}
            Some(c) => self.filters.push(Filter::Category(c.to_string())),
        }
        self
    }

    /// Restrict to products offered in `size`.
    pub fn with_size(self, size: impl Into<String>) -> Self {
        self.with_filter(Filter::Size(size.into()))
    }

    /// Add a filter.
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Check if the query has no filters.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Check whether `product` passes every filter.
    pub fn matches(&self, product: &Product) -> bool {
        self.filters.iter().all(|f| f.matches(product))
    }
}
