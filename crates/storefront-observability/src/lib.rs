//! Observability for the storefront.
//!
//! This crate provides:
//! - `StructuredLogger` - Structured logging keyed by a storefront session
//! - `CartEventLogger` - A cart observer that logs every mutation
//! - `init_tracing` - Stderr subscriber for `tracing` events
//! - `SessionId` - Re-exported from storefront-commerce for convenience

mod error;
mod logging;
mod observer;
mod subscriber;

pub use error::ObservabilityError;
pub use logging::*;
pub use observer::CartEventLogger;
pub use subscriber::init_tracing;

pub use storefront_commerce::ids::SessionId;
