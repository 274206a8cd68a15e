//! Cart and line item types.

use crate::cart::{CartEvent, CartTotals};
use crate::error::CommerceError;
use crate::ids::{CartId, ProductId};
use crate::money::{Currency, Money};
use crate::time::current_timestamp;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// A shopping cart.
///
/// Holds line items in insertion order. No two items share the same
/// `(product_id, size)` pair and every item has a quantity of at least one;
/// an item whose quantity would drop to zero is removed instead.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Cart {
    /// Unique cart identifier.
    pub id: CartId,
    /// Currency every line item is priced in.
    pub currency: Currency,
    /// Items in the cart.
    items: Vec<LineItem>,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last update.
    pub updated_at: i64,
}

impl Cart {
    /// Create an empty cart.
    pub fn new(currency: Currency) -> Self {
        let now = current_timestamp();
        Self {
            id: CartId::generate(),
            currency,
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Add one unit of `(product_id, size)`.
    ///
    /// An existing line gets its quantity bumped; otherwise a new line with
    /// quantity 1 is appended. Name and price are copied now and never
    /// refreshed. A negative price or a price in another currency is ignored
    /// and returns `None`.
    pub fn add(
        &mut self,
        product_id: ProductId,
        name: impl Into<String>,
        unit_price: Money,
        size: impl Into<String>,
    ) -> Option<CartEvent> {
        let size = size.into();

        if unit_price.is_negative() || unit_price.currency != self.currency {
            warn!(
                product_id = %product_id,
                size = %size,
                price = %unit_price,
                cart_currency = %self.currency,
                "ignoring add with invalid price"
            );
            return None;
        }

        if let Some(existing) = self.find_mut(&product_id, &size) {
            let quantity = existing.quantity.saturating_add(1);
            if quantity == existing.quantity {
                debug!(product_id = %product_id, size = %size, "line item quantity at maximum");
                return None;
            }
            existing.quantity = quantity;
            self.touch();
            debug!(product_id = %product_id, size = %size, quantity, "line item incremented");
            return Some(CartEvent::QuantityChanged {
                product_id,
                size,
                quantity,
            });
        }

        self.items.push(LineItem {
            product_id: product_id.clone(),
            name: name.into(),
            unit_price,
            size: size.clone(),
            quantity: 1,
        });
        self.touch();
        debug!(product_id = %product_id, size = %size, "line item added");
        Some(CartEvent::ItemAdded {
            product_id,
            size,
            quantity: 1,
        })
    }

    /// Replace the quantity of `(product_id, size)`.
    ///
    /// Unknown pairs are ignored. A quantity of zero or less removes the line;
    /// any positive quantity is stored as given.
    pub fn set_quantity(
        &mut self,
        product_id: &ProductId,
        size: &str,
        quantity: i64,
    ) -> Option<CartEvent> {
        if quantity <= 0 {
            return self.remove(product_id, size);
        }

        let item = self.find_mut(product_id, size)?;
        if item.quantity == quantity {
            return None;
        }
        item.quantity = quantity;
        self.touch();
        debug!(product_id = %product_id, size, quantity, "line item quantity set");
        Some(CartEvent::QuantityChanged {
            product_id: product_id.clone(),
            size: size.to_string(),
            quantity,
        })
    }

    /// Remove `(product_id, size)` if present.
    pub fn remove(&mut self, product_id: &ProductId, size: &str) -> Option<CartEvent> {
        let index = self.position(product_id, size)?;
        self.items.remove(index);
        self.touch();
        debug!(product_id = %product_id, size, "line item removed");
        Some(CartEvent::ItemRemoved {
            product_id: product_id.clone(),
            size: size.to_string(),
        })
    }

    /// Remove every line item.
    pub fn clear(&mut self) -> CartEvent {
        self.items.clear();
        self.touch();
        debug!(cart_id = %self.id, "cart cleared");
        CartEvent::Cleared
    }

    /// Total item count and price, recomputed from the line items.
    pub fn totals(&self) -> CartTotals {
        CartTotals::from_items(&self.items, self.currency)
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Get the line item for `(product_id, size)`.
    pub fn get(&self, product_id: &ProductId, size: &str) -> Option<&LineItem> {
        self.items.iter().find(|i| i.matches(product_id, size))
    }

    /// Number of distinct line items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Check the line item invariants: positive quantities, non-negative
    /// prices in the cart's currency and no repeated `(product_id, size)`.
    pub fn validate(&self) -> Result<(), CommerceError> {
        for (i, item) in self.items.iter().enumerate() {
            if item.quantity <= 0 {
                return Err(CommerceError::InvalidCart(format!(
                    "{} ({}) has quantity {}",
                    item.product_id, item.size, item.quantity
                )));
            }
            if item.unit_price.is_negative() || item.unit_price.currency != self.currency {
                return Err(CommerceError::InvalidCart(format!(
                    "{} ({}) is priced at {}",
                    item.product_id, item.size, item.unit_price
                )));
            }
            if self.items[..i].iter().any(|other| other.matches(&item.product_id, &item.size)) {
                return Err(CommerceError::InvalidCart(format!(
                    "{} ({}) appears more than once",
                    item.product_id, item.size
                )));
            }
        }
        Ok(())
    }

    fn position(&self, product_id: &ProductId, size: &str) -> Option<usize> {
        self.items.iter().position(|i| i.matches(product_id, size))
    }

    fn find_mut(&mut self, product_id: &ProductId, size: &str) -> Option<&mut LineItem> {
        self.items.iter_mut().find(|i| i.matches(product_id, size))
    }

    fn touch(&mut self) {
        self.updated_at = current_timestamp();
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new(Currency::default())
    }
}

/// One `(product, size)` selection in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LineItem {
    /// Product being purchased.
    pub product_id: ProductId,
    /// Product name at the time it was added.
    pub name: String,
    /// Unit price at the time it was added.
    pub unit_price: Money,
    /// Size label.
    pub size: String,
    /// Quantity, always at least one.
    pub quantity: i64,
}

impl LineItem {
    /// Check if this line is `(product_id, size)`.
    pub fn matches(&self, product_id: &ProductId, size: &str) -> bool {
        &self.product_id == product_id && self.size == size
    }

    /// Unit price times quantity.
    pub fn line_total(&self) -> Money {
        self.unit_price.saturating_multiply(self.quantity)
    }
}
