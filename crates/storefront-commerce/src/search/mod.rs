//! Search module.
//!
//! Text and category filtering over the catalog.

mod filter;
mod query;

pub use filter::Filter;
pub use query::{CatalogQuery, ALL_CATEGORIES};
