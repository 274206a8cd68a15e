//! Shopping cart module.
//!
//! Contains the cart model, its owned store, derived totals and observers.

#[allow(clippy::module_inception)]
mod cart;
mod observer;
mod store;
mod totals;

pub use cart::{Cart, LineItem};
pub use observer::{CartEvent, CartObserver};
pub use store::CartStore;
pub use totals::{CartSnapshot, CartTotals};
