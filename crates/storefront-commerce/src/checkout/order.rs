//! Order confirmation.

use crate::cart::{CartSnapshot, CartTotals, LineItem};
use crate::checkout::{Address, CheckoutForm, ContactDetails, PaymentMethod};
use crate::ids::OrderId;
use crate::time::current_timestamp;
use serde::{Deserialize, Serialize};

/// A submitted order. Built from the cart snapshot taken when checkout opened.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Order {
    /// Unique order identifier.
    pub id: OrderId,
    /// Human-readable order number.
    pub order_number: String,
    /// Customer contact details.
    pub contact: ContactDetails,
    /// Delivery address.
    pub shipping_address: Address,
    /// Payment method chosen.
    pub payment_method: PaymentMethod,
    /// Customer note.
    pub comment: Option<String>,
    /// Items ordered.
    pub items: Vec<LineItem>,
    /// Totals over `items`.
    pub totals: CartTotals,
    /// Unix timestamp of creation.
    pub created_at: i64,
}

impl Order {
    /// Build an order from a validated form and a cart snapshot.
    pub(crate) fn from_checkout(form: CheckoutForm, snapshot: CartSnapshot) -> Self {
        let now = current_timestamp();
        Self {
            id: OrderId::generate(),
            order_number: format!("ORD-{}", now),
            contact: form.contact,
            shipping_address: form.shipping_address,
            payment_method: form.payment_method,
            comment: form.comment,
            items: snapshot.items,
            totals: snapshot.totals,
            created_at: now,
        }
    }

    /// Get total item count.
    pub fn item_count(&self) -> i64 {
        self.totals.total_items
    }
}
