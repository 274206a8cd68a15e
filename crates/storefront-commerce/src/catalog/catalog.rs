//! The product catalog.

use std::collections::HashSet;

use crate::catalog::category::{summarize, CategorySummary};
use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Currency;
use crate::search::CatalogQuery;
use serde::{Deserialize, Serialize};

/// An immutable, ordered list of products priced in one currency.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Catalog {
    /// Currency every product is priced in.
    #[serde(default)]
    pub currency: Currency,
    /// Products in display order.
    #[serde(default)]
    pub products: Vec<Product>,
}

impl Catalog {
    /// Create a catalog, checking it for consistency.
    pub fn new(currency: Currency, products: Vec<Product>) -> Result<Self, CommerceError> {
        let catalog = Self { currency, products };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Parse a catalog from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self, CommerceError> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Check ids are unique, every product has a size and prices are
    /// non-negative and in the catalog currency.
    pub fn validate(&self) -> Result<(), CommerceError> {
        let mut seen = HashSet::new();
        for product in &self.products {
            if !seen.insert(&product.id) {
                return Err(CommerceError::InvalidCatalog(format!(
                    "duplicate product id {}",
                    product.id
                )));
            }
            if product.sizes.is_empty() {
                return Err(CommerceError::InvalidCatalog(format!(
                    "product {} has no sizes",
                    product.id
                )));
            }
            if product.price.is_negative() {
                return Err(CommerceError::InvalidCatalog(format!(
                    "product {} has a negative price",
                    product.id
                )));
            }
            if product.price.currency != self.currency {
                return Err(CommerceError::InvalidCatalog(format!(
                    "product {} is priced in {}, catalog uses {}",
                    product.id, product.price.currency, self.currency
                )));
            }
        }
        Ok(())
    }

    /// All products in display order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Look up a product by ID.
    pub fn find(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Look up a product by ID, failing if absent.
    pub fn get(&self, id: &ProductId) -> Result<&Product, CommerceError> {
        self.find(id)
            .ok_or_else(|| CommerceError::ProductNotFound(id.to_string()))
    }

    /// Distinct categories with product counts, in first-seen order.
    pub fn categories(&self) -> Vec<CategorySummary> {
        summarize(&self.products)
    }

    /// Products matching `query`, in catalog order.
    pub fn search(&self, query: &CatalogQuery) -> Vec<&Product> {
        self.products.iter().filter(|p| query.matches(p)).collect()
    }
}
