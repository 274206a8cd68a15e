//! Cart observer that writes every mutation to a structured log.

use storefront_commerce::cart::{CartEvent, CartObserver, CartSnapshot};

use crate::{LogLevel, StructuredLogger};

/// Logs each cart event with the resulting totals.
///
/// Entries carry `event`, `product_id`, `size`, `quantity`, `total_items`,
/// `total_price` (minor units) and `currency`. Line fields are omitted for
/// events that do not refer to a single line.
#[derive(Debug, Clone)]
pub struct CartEventLogger {
    logger: StructuredLogger,
    level: LogLevel,
}

impl CartEventLogger {
    /// Create an observer writing through `logger` at info level.
    pub fn new(logger: StructuredLogger) -> Self {
        Self {
            logger,
            level: LogLevel::Info,
        }
    }

    /// Set the level entries are written at.
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// The underlying logger.
    pub fn logger(&self) -> &StructuredLogger {
        &self.logger
    }
}

impl CartObserver for CartEventLogger {
    fn on_cart_event(&self, event: &CartEvent, snapshot: &CartSnapshot) {
        if !self.logger.enabled(self.level) {
            return;
        }

        let (product_id, size) = match event.line() {
            Some((id, size)) => (Some(id.to_string()), Some(size.to_string())),
            None => (None, None),
        };

        let mut entry = crate::LogBuilder::new(&self.logger, self.level, "cart updated")
            .field("event", event.as_str())
            .field_opt("product_id", product_id)
            .field_opt("size", size);
        if let Some(quantity) = event.quantity() {
            entry = entry.field_i64("quantity", quantity);
        }
        entry
            .field_i64("total_items", snapshot.totals.total_items)
            .field_i64("total_price", snapshot.totals.total_price.amount_cents)
            .field("currency", snapshot.totals.total_price.currency.code())
            .emit();
    }
}
