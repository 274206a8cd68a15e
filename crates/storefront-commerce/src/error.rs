//! Commerce error types.

use thiserror::Error;

/// Errors raised at the fallible edges of the storefront.
///
/// Cart mutations never fail; invalid cart input is ignored instead.
/// Only wrapping an existing cart in a store is checked.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommerceError {
    /// Product not found in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Catalog data is inconsistent.
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    /// Currency code is not supported.
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    /// Payment method name is not supported.
    #[error("Unknown payment method: {0}")]
    UnknownPaymentMethod(String),

    /// Cart contents break the line item invariants.
    #[error("Invalid cart: {0}")]
    InvalidCart(String),

    /// Checkout requested on an empty cart.
    #[error("Cannot check out an empty cart")]
    EmptyCart,

    /// Invalid checkout state transition.
    #[error("Invalid checkout transition from {from} to {to}")]
    InvalidCheckoutTransition { from: String, to: String },

    /// Required checkout fields are missing.
    #[error("Checkout incomplete: missing {0}")]
    CheckoutIncomplete(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
