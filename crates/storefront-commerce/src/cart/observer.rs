//! Change notifications for cart views.

use crate::cart::CartSnapshot;
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// A mutation that changed the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CartEvent {
    /// A new line item was appended.
    ItemAdded {
        product_id: ProductId,
        size: String,
        quantity: i64,
    },
    /// An existing line item got a new quantity.
    QuantityChanged {
        product_id: ProductId,
        size: String,
        quantity: i64,
    },
    /// A line item was removed.
    ItemRemoved { product_id: ProductId, size: String },
    /// Every line item was removed.
    Cleared,
}

impl CartEvent {
    /// Short machine-readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            CartEvent::ItemAdded { .. } => "item_added",
            CartEvent::QuantityChanged { .. } => "quantity_changed",
            CartEvent::ItemRemoved { .. } => "item_removed",
            CartEvent::Cleared => "cleared",
        }
    }

    /// The `(product_id, size)` this event is about, if any.
    pub fn line(&self) -> Option<(&ProductId, &str)> {
        match self {
            CartEvent::ItemAdded {
                product_id, size, ..
            }
            | CartEvent::QuantityChanged {
                product_id, size, ..
            }
            | CartEvent::ItemRemoved { product_id, size } => Some((product_id, size.as_str())),
            CartEvent::Cleared => None,
        }
    }

    /// The line's quantity after the event, if it still exists.
    pub fn quantity(&self) -> Option<i64> {
        match self {
            CartEvent::ItemAdded { quantity, .. } | CartEvent::QuantityChanged { quantity, .. } => {
                Some(*quantity)
            }
            CartEvent::ItemRemoved { .. } | CartEvent::Cleared => None,
        }
    }
}

/// Receives every cart mutation together with the resulting snapshot.
///
/// Called synchronously, in subscription order, after the mutation is applied.
pub trait CartObserver {
    fn on_cart_event(&self, event: &CartEvent, snapshot: &CartSnapshot);
}

impl<F> CartObserver for F
where
    F: Fn(&CartEvent, &CartSnapshot),
{
    fn on_cart_event(&self, event: &CartEvent, snapshot: &CartSnapshot) {
        self(event, snapshot)
    }
}
