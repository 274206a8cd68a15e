//! Derived cart totals and snapshots.

use crate::cart::LineItem;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Item count and price of a cart. Never stored, always recomputed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartTotals {
    /// Sum of quantities.
    pub total_items: i64,
    /// Sum of unit price times quantity.
    pub total_price: Money,
}

impl CartTotals {
    /// Totals of an empty cart.
    pub fn zero(currency: Currency) -> Self {
        Self {
            total_items: 0,
            total_price: Money::zero(currency),
        }
    }

    /// Compute totals over `items`.
    pub fn from_items(items: &[LineItem], currency: Currency) -> Self {
        items.iter().fold(Self::zero(currency), |acc, item| Self {
            total_items: acc.total_items.saturating_add(item.quantity),
            total_price: acc.total_price.saturating_add(&item.line_total()),
        })
    }

    /// As a `(total_items, total_price_minor_units)` pair.
    pub fn as_tuple(&self) -> (i64, i64) {
        (self.total_items, self.total_price.amount_cents)
    }
}

/// The cart's contents and totals at one point in time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartSnapshot {
    /// Line items in insertion order.
    pub items: Vec<LineItem>,
    /// Totals over `items`.
    pub totals: CartTotals,
}

impl CartSnapshot {
    /// Snapshot `items`.
    pub fn new(items: &[LineItem], currency: Currency) -> Self {
        Self {
            items: items.to_vec(),
            totals: CartTotals::from_items(items, currency),
        }
    }

    /// Check if the snapshot has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ProductId;

    fn item(id: &str, size: &str, price: i64, quantity: i64) -> LineItem {
        LineItem {
            product_id: ProductId::new(id),
            name: format!("Product {}", id),
            unit_price: Money::new(price, Currency::RUB),
            size: size.to_string(),
            quantity,
        }
    }

    #[test]
    fn test_totals() {
        let items = vec![item("1", "M", 8990, 2), item("2", "L", 24990, 1)];
        let totals = CartTotals::from_items(&items, Currency::RUB);
        assert_eq!(totals.as_tuple(), (3, 42970));
    }

    #[test]
    fn test_empty_totals() {
        let totals = CartTotals::from_items(&[], Currency::RUB);
        assert_eq!(totals, CartTotals::zero(Currency::RUB));
        assert_eq!(totals.as_tuple(), (0, 0));
    }

    #[test]
    fn test_totals_saturate() {
        let items = vec![item("1", "M", i64::MAX, 2), item("2", "M", 1, 1)];
        let totals = CartTotals::from_items(&items, Currency::RUB);
        assert_eq!(totals.total_price.amount_cents, i64::MAX);
    }

    #[test]
    fn test_snapshot() {
        let items = vec![item("1", "M", 8990, 1)];
        let snapshot = CartSnapshot::new(&items, Currency::RUB);
        assert!(!snapshot.is_empty());
        assert_eq!(snapshot.totals.as_tuple(), (1, 8990));
    }
}
