//! Checkout flow state machine.

use crate::cart::{CartSnapshot, CartStore};
use crate::checkout::{CheckoutForm, Order};
use crate::ids::CheckoutId;
use crate::CommerceError;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Where the checkout view is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStatus {
    /// Not shown.
    #[default]
    Closed,
    /// Shown with a cart snapshot, waiting for the form.
    Open,
    /// Order placed; the view has closed and the cart was cleared.
    Completed,
}

impl CheckoutStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutStatus::Closed => "closed",
            CheckoutStatus::Open => "open",
            CheckoutStatus::Completed => "completed",
        }
    }
}

/// Checkout flow state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CheckoutFlow {
    /// Identifier of the current checkout attempt, set on open.
    pub id: Option<CheckoutId>,
    /// Current status.
    pub status: CheckoutStatus,
    /// Cart contents captured when the flow opened.
    snapshot: Option<CartSnapshot>,
}

impl CheckoutFlow {
    /// Create a closed checkout flow.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open checkout over the current cart.
    ///
    /// Re-opening an open flow refreshes the snapshot. An empty cart cannot
    /// be checked out.
    pub fn open(&mut self, store: &CartStore) -> Result<&CartSnapshot, CommerceError> {
        if store.is_empty() {
            return Err(CommerceError::EmptyCart);
        }

        let id = CheckoutId::generate();
        debug!(checkout_id = %id, items = store.len(), "checkout opened");
        self.id = Some(id);
        self.status = CheckoutStatus::Open;
        Ok(self.snapshot.insert(store.snapshot()))
    }

    /// Leave checkout without ordering. The cart is untouched.
    pub fn close(&mut self) {
        if self.status == CheckoutStatus::Open {
            debug!("checkout closed without order");
        }
        self.status = CheckoutStatus::Closed;
        self.snapshot = None;
    }

    /// Place the order.
    ///
    /// Validates the form, builds the order from the snapshot taken at
    /// `open`, clears the cart and completes the flow. On a validation error
    /// the flow stays open and the cart is untouched.
    pub fn submit(
        &mut self,
        form: CheckoutForm,
        store: &mut CartStore,
    ) -> Result<Order, CommerceError> {
        if self.status != CheckoutStatus::Open {
            return Err(CommerceError::InvalidCheckoutTransition {
                from: self.status.as_str().to_string(),
                to: CheckoutStatus::Completed.as_str().to_string(),
            });
        }

        form.validate()?;

        let snapshot = self
            .snapshot
            .take()
            .unwrap_or_else(|| store.snapshot());
        let order = Order::from_checkout(form, snapshot);

        store.clear();
        self.status = CheckoutStatus::Completed;

        info!(
            order_number = %order.order_number,
            total_items = order.totals.total_items,
            total_price = %order.totals.total_price,
            "order placed"
        );
        Ok(order)
    }

    /// The snapshot shown while checkout is open.
    pub fn snapshot(&self) -> Option<&CartSnapshot> {
        self.snapshot.as_ref()
    }

    /// Check if the checkout view is showing.
    pub fn is_open(&self) -> bool {
        self.status == CheckoutStatus::Open
    }

    /// Check if an order was placed.
    pub fn is_complete(&self) -> bool {
        self.status == CheckoutStatus::Completed
    }
}
