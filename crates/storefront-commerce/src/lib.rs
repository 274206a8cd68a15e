//! Catalog, cart and checkout logic for the storefront.
//!
//! This crate holds everything the storefront needs outside of rendering:
//!
//! - **Catalog**: Products with sizes and categories
//! - **Search**: Free-text and category filtering over the catalog
//! - **Cart**: An owned cart store with line items, totals and observers
//! - **Checkout**: Form validation, order confirmation, cart clearing
//!
//! # Example
//!
//! ```rust
//! use storefront_commerce::prelude::*;
//!
//! let mut store = CartStore::new(Currency::RUB);
//! store.add("1", "Oversized Tee", Money::new(8990, Currency::RUB), "M");
//! store.add("1", "Oversized Tee", Money::new(8990, Currency::RUB), "M");
//!
//! let totals = store.totals();
//! assert_eq!(totals.total_items, 2);
//! assert_eq!(totals.total_price.amount_cents, 17980);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod search;

mod time;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{Catalog, CategorySummary, Product};

    // Search
    pub use crate::search::{CatalogQuery, Filter};

    // Cart
    pub use crate::cart::{
        Cart, CartEvent, CartObserver, CartSnapshot, CartStore, CartTotals, LineItem,
    };

    // Checkout
    pub use crate::checkout::{
        Address, CheckoutFlow, CheckoutForm, CheckoutStatus, ContactDetails, Order,
        PaymentMethod,
    };
}
