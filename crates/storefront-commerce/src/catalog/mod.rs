//! Product catalog module.
//!
//! Contains types for products, category summaries and the catalog itself.

#[allow(clippy::module_inception)]
mod catalog;
mod category;
mod product;

pub use catalog::Catalog;
pub use category::CategorySummary;
pub use product::Product;
