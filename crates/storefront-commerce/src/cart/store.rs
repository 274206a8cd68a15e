//! Owned cart store with change notifications.

use std::fmt;

use crate::cart::{Cart, CartEvent, CartObserver, CartSnapshot, CartTotals, LineItem};
use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::{ProductId, SubscriptionId};
use crate::money::{Currency, Money};
use tracing::warn;

/// The cart of one storefront session.
///
/// Every mutation returns the resulting snapshot. Registered observers are
/// notified after each mutation that changed the cart, and on every
/// `clear`. Ignored input does not notify.
pub struct CartStore {
    cart: Cart,
    observers: Vec<(SubscriptionId, Box<dyn CartObserver>)>,
    next_subscription: u64,
}

impl CartStore {
    /// Create an empty store.
    pub fn new(currency: Currency) -> Self {
        Self::wrap(Cart::new(currency))
    }

    /// Wrap an existing cart, rejecting one that breaks the line item
    /// invariants.
    pub fn from_cart(cart: Cart) -> Result<Self, CommerceError> {
        cart.validate()?;
        Ok(Self::wrap(cart))
    }

    fn wrap(cart: Cart) -> Self {
        Self {
            cart,
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Register an observer.
    pub fn subscribe(&mut self, observer: Box<dyn CartObserver>) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, observer));
        id
    }

    /// Drop an observer. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let len_before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() < len_before
    }

    /// Number of registered observers.
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Add one unit of `(product_id, size)`.
    pub fn add(
        &mut self,
        product_id: impl Into<ProductId>,
        name: impl Into<String>,
        unit_price: Money,
        size: impl Into<String>,
    ) -> CartSnapshot {
        let event = self.cart.add(product_id.into(), name, unit_price, size);
        self.commit(event)
    }

    /// Add one unit of a catalog product in `size`.
    ///
    /// Name and price are copied from `product` as they are now. Sizes the
    /// product is not offered in are ignored.
    pub fn add_product(&mut self, product: &Product, size: &str) -> CartSnapshot {
        if !product.has_size(size) {
            warn!(product_id = %product.id, size, "ignoring add for unknown size");
            return self.snapshot();
        }
        self.add(product.id.clone(), product.name.clone(), product.price, size)
    }

    /// Set the quantity of `(product_id, size)`; zero or less removes it.
    pub fn set_quantity(
        &mut self,
        product_id: &ProductId,
        size: &str,
        quantity: i64,
    ) -> CartSnapshot {
        let event = self.cart.set_quantity(product_id, size, quantity);
        self.commit(event)
    }

    /// Raise the quantity of an existing line by one.
    pub fn increment(&mut self, product_id: &ProductId, size: &str) -> CartSnapshot {
        match self.cart.get(product_id, size).map(|i| i.quantity) {
            Some(quantity) => self.set_quantity(product_id, size, quantity.saturating_add(1)),
            None => self.snapshot(),
        }
    }

    /// Lower the quantity of an existing line by one, removing it at zero.
    pub fn decrement(&mut self, product_id: &ProductId, size: &str) -> CartSnapshot {
        match self.cart.get(product_id, size).map(|i| i.quantity) {
            Some(quantity) => self.set_quantity(product_id, size, quantity - 1),
            None => self.snapshot(),
        }
    }

    /// Remove `(product_id, size)` if present.
    pub fn remove(&mut self, product_id: &ProductId, size: &str) -> CartSnapshot {
        let event = self.cart.remove(product_id, size);
        self.commit(event)
    }

    /// Empty the cart.
    pub fn clear(&mut self) -> CartSnapshot {
        let event = self.cart.clear();
        self.commit(Some(event))
    }

    /// Current totals.
    pub fn totals(&self) -> CartTotals {
        self.cart.totals()
    }

    /// Current contents and totals.
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot::new(self.cart.items(), self.cart.currency)
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        self.cart.items()
    }

    /// Get the line item for `(product_id, size)`.
    pub fn get(&self, product_id: &ProductId, size: &str) -> Option<&LineItem> {
        self.cart.get(product_id, size)
    }

    /// Number of distinct line items.
    pub fn len(&self) -> usize {
        self.cart.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Currency of the cart.
    pub fn currency(&self) -> Currency {
        self.cart.currency
    }

    /// The underlying cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    fn commit(&self, event: Option<CartEvent>) -> CartSnapshot {
        let snapshot = self.snapshot();
        if let Some(event) = event {
            for (_, observer) in &self.observers {
                observer.on_cart_event(&event, &snapshot);
            }
        }
        snapshot
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new(Currency::default())
    }
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &self.cart)
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn rub(amount: i64) -> Money {
        Money::new(amount, Currency::RUB)
    }

    fn recorder(store: &mut CartStore) -> (SubscriptionId, Rc<RefCell<Vec<CartEvent>>>) {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        let id = store.subscribe(Box::new(move |event: &CartEvent, _: &CartSnapshot| {
            sink.borrow_mut().push(event.clone());
        }));
        (id, events)
    }

    #[test]
    fn test_add_twice_scenario() {
        let mut store = CartStore::new(Currency::RUB);
        store.add("1", "Tee", rub(8990), "M");
        let snapshot = store.add("1", "Tee", rub(8990), "M");

        assert_eq!(snapshot.items.len(), 1);
        assert_eq!(snapshot.items[0].quantity, 2);
        assert_eq!(snapshot.totals.as_tuple(), (2, 17980));
    }

    #[test]
    fn test_two_sizes_then_zero_scenario() {
        let mut store = CartStore::new(Currency::RUB);
        store.add("1", "Tee", rub(8990), "M");
        store.add("1", "Tee", rub(8990), "L");
        let snapshot = store.set_quantity(&ProductId::new("1"), "M", 0);

        assert_eq!(snapshot.items.len(), 1);
        assert_eq!(snapshot.items[0].size, "L");
        assert_eq!(snapshot.items[0].quantity, 1);
        assert_eq!(snapshot.totals.as_tuple(), (1, 8990));
    }

    #[test]
    fn test_observers_see_mutations_in_order() {
        let mut store = CartStore::new(Currency::RUB);
        let (_, events) = recorder(&mut store);
        let id = ProductId::new("1");

        store.add("1", "Tee", rub(8990), "M");
        store.increment(&id, "M");
        store.decrement(&id, "M");
        store.remove(&id, "M");
        store.clear();

        let names: Vec<_> = events.borrow().iter().map(|e| e.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "item_added",
                "quantity_changed",
                "quantity_changed",
                "item_removed",
                "cleared"
            ]
        );
    }

    #[test]
    fn test_noops_do_not_notify() {
        let mut store = CartStore::new(Currency::RUB);
        let (_, events) = recorder(&mut store);
        let missing = ProductId::new("9");

        store.remove(&missing, "M");
        store.set_quantity(&missing, "M", 4);
        store.increment(&missing, "M");
        store.decrement(&missing, "M");
        store.add("1", "Tee", rub(-5), "M");

        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_add_at_max_quantity_does_not_notify() {
        let mut store = CartStore::new(Currency::RUB);
        let id = ProductId::new("1");
        store.add("1", "Tee", rub(1), "M");
        store.set_quantity(&id, "M", i64::MAX);
        let (_, events) = recorder(&mut store);

        let snapshot = store.add("1", "Tee", rub(1), "M");
        store.increment(&id, "M");

        assert!(events.borrow().is_empty());
        assert_eq!(snapshot.items[0].quantity, i64::MAX);
    }

    #[test]
    fn test_from_cart_keeps_valid_cart() {
        let mut cart = Cart::new(Currency::RUB);
        cart.add(ProductId::new("1"), "Tee", rub(8990), "M");
        let store = CartStore::from_cart(cart.clone()).unwrap();
        assert_eq!(store.cart(), &cart);
    }

    #[test]
    fn test_observer_receives_post_mutation_snapshot() {
        let mut store = CartStore::new(Currency::RUB);
        let seen = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&seen);
        store.subscribe(Box::new(move |_: &CartEvent, snapshot: &CartSnapshot| {
            *sink.borrow_mut() = Some(snapshot.totals);
        }));

        store.add("1", "Tee", rub(8990), "M");
        assert_eq!(seen.borrow().map(|t| t.as_tuple()), Some((1, 8990)));
    }

    #[test]
    fn test_unsubscribe() {
        let mut store = CartStore::new(Currency::RUB);
        let (id, events) = recorder(&mut store);

        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        assert_eq!(store.observer_count(), 0);

        store.add("1", "Tee", rub(8990), "M");
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_decrement_from_one_removes() {
        let mut store = CartStore::new(Currency::RUB);
        store.add("1", "Tee", rub(8990), "M");
        let snapshot = store.decrement(&ProductId::new("1"), "M");
        assert!(snapshot.is_empty());
    }

    #[test]
    fn test_add_product_checks_size() {
        let product = Product::new("1", "Tee", "T-Shirts", rub(8990)).with_sizes(["S", "M"]);
        let mut store = CartStore::new(Currency::RUB);

        assert!(store.add_product(&product, "XXL").is_empty());
        let snapshot = store.add_product(&product, "M");
        assert_eq!(snapshot.items[0].name, "Tee");
        assert_eq!(snapshot.totals.as_tuple(), (1, 8990));
    }

    #[test]
    fn test_clear_totals_are_zero() {
        let mut store = CartStore::new(Currency::RUB);
        store.add("1", "Tee", rub(8990), "M");
        store.add("2", "Coat", rub(24990), "L");
        store.clear();
        assert_eq!(store.totals().as_tuple(), (0, 0));
    }
}
