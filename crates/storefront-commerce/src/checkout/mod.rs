//! Checkout module.
//!
//! Contains the checkout flow, form, addresses and orders.

mod address;
mod flow;
mod form;
mod order;

pub use address::{Address, ContactDetails};
pub use flow::{CheckoutFlow, CheckoutStatus};
pub use form::{CheckoutForm, PaymentMethod};
pub use order::Order;
