//! Category summaries derived from the product list.

use crate::catalog::Product;
use serde::{Deserialize, Serialize};

/// A category with the number of products filed under it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategorySummary {
    /// Category name.
    pub name: String,
    /// Number of products in this category.
    pub product_count: usize,
}

/// Collect distinct categories in first-seen order.
pub(crate) fn summarize<'a>(products: impl IntoIterator<Item = &'a Product>) -> Vec<CategorySummary> {
    let mut summaries: Vec<CategorySummary> = Vec::new();
    for product in products {
        match summaries.iter_mut().find(|c| c.name == product.category) {
            Some(summary) => summary.product_count += 1,
            None => summaries.push(CategorySummary {
                name: product.category.clone(),
                product_count: 1,
            }),
        }
    }
    summaries
}
