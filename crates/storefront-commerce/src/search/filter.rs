//! Search filter types.

use crate::catalog::Product;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A catalog filter, evaluated in memory against a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Filter {
    /// Case-insensitive substring of the name or description.
    Text(String),
    /// Exact category, ignoring case.
    Category(String),
    /// Inclusive price range.
    PriceRange {
        min: Option<Money>,
        max: Option<Money>,
    },
    /// Product is offered in this size.
    Size(String),
}

impl Filter {
    /// Create a text search filter.
    pub fn text(query: impl Into<String>) -> Self {
        Filter::Text(query.into())
    }

    /// Create a category filter.
    pub fn category(name: impl Into<String>) -> Self {
        Filter::Category(name.into())
    }

    /// Create a price range filter.
    pub fn price_range(min: Option<Money>, max: Option<Money>) -> Self {
        Filter::PriceRange { min, max }
    }

    /// Create a size filter.
    pub fn size(size: impl Into<String>) -> Self {
        Filter::Size(size.into())
    }

    /// Check whether `product` passes this filter.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Filter::Text(query) => {
                let needle = query.to_lowercase();
                product.name.to_lowercase().contains(&needle)
                    || product.description.to_lowercase().contains(&needle)
            }
            Filter::Category(name) => product.category.to_lowercase() == name.to_lowercase(),
            Filter::PriceRange { min, max } => {
                let price = product.price.amount_cents;
                min.map_or(true, |m| price >= m.amount_cents)
                    && max.map_or(true, |m| price <= m.amount_cents)
            }
            Filter::Size(size) => product.has_size(size),
        }
    }
}
