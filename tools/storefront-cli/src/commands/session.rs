//! Replay a scripted shopping session against the catalog.
//!
//! A script is a TOML file with a list of steps:
//!
//! ```toml
//! [[steps]]
//! action = "add"
//! product = "1"
//! size = "M"
//!
//! [[steps]]
//! action = "set_quantity"
//! product = "1"
//! size = "M"
//! quantity = 3
//!
//! [[steps]]
//! action = "checkout"
//! payment = "cash"
//! contact = { first_name = "Anna", last_name = "Ivanova", phone = "+7 900 000-00-00", email = "anna@example.com" }
//! address = { street = "Nevsky pr. 1", city = "Saint Petersburg" }
//! ```

use std::path::Path;

use anyhow::{bail, Context as _, Result};
use serde::{Deserialize, Serialize};
use storefront_commerce::cart::{CartSnapshot, CartStore};
use storefront_commerce::catalog::Catalog;
use storefront_commerce::checkout::{
    Address, CheckoutFlow, CheckoutForm, ContactDetails, Order, PaymentMethod,
};
use storefront_commerce::ProductId;
use storefront_observability::CartEventLogger;

use super::SessionArgs;
use crate::context::Context;
use crate::output::{format_timestamp, status_badge};

/// A parsed session script.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SessionScript {
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl SessionScript {
    /// Parse a script from TOML.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid session script")
    }

    /// Read a script file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read session script: {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("In {}", path.display()))
    }
}

/// One scripted cart action.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    Add {
        product: String,
        size: String,
    },
    SetQuantity {
        product: String,
        size: String,
        quantity: i64,
    },
    Increment {
        product: String,
        size: String,
    },
    Decrement {
        product: String,
        size: String,
    },
    Remove {
        product: String,
        size: String,
    },
    Clear,
    Checkout {
        #[serde(default)]
        contact: ContactDetails,
        #[serde(default)]
        address: Address,
        /// "card" or "cash"; card when unset.
        #[serde(default)]
        payment: Option<String>,
        #[serde(default)]
        comment: Option<String>,
    },
}

impl Step {
    /// Action name as written in scripts.
    pub fn action(&self) -> &'static str {
        match self {
            Step::Add { .. } => "add",
            Step::SetQuantity { .. } => "set_quantity",
            Step::Increment { .. } => "increment",
            Step::Decrement { .. } => "decrement",
            Step::Remove { .. } => "remove",
            Step::Clear => "clear",
            Step::Checkout { .. } => "checkout",
        }
    }

    /// Short description for progress output.
    pub fn describe(&self) -> String {
        match self {
            Step::Add { product, size }
            | Step::Increment { product, size }
            | Step::Decrement { product, size }
            | Step::Remove { product, size } => {
                format!("{} {} ({})", self.action(), product, size)
            }
            Step::SetQuantity {
                product,
                size,
                quantity,
            } => format!("set_quantity {} ({}) = {}", product, size, quantity),
            Step::Clear | Step::Checkout { .. } => self.action().to_string(),
        }
    }
}

/// Result of one applied step.
#[derive(Debug, Clone, Serialize)]
pub struct StepOutcome {
    /// Cart after the step.
    pub cart: CartSnapshot,
    /// Order placed by a checkout step.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<Order>,
    /// Set when the step left the cart unchanged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Cart and checkout state for one scripted session.
pub struct Session<'a> {
    catalog: &'a Catalog,
    store: CartStore,
    checkout: CheckoutFlow,
}

impl<'a> Session<'a> {
    /// Start a session with an empty cart in the catalog's currency.
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            store: CartStore::new(catalog.currency),
            checkout: CheckoutFlow::new(),
        }
    }

    /// The cart store, for subscribing observers.
    pub fn store_mut(&mut self) -> &mut CartStore {
        &mut self.store
    }

    /// The cart store.
    pub fn store(&self) -> &CartStore {
        &self.store
    }

    /// Apply one step.
    ///
    /// Unknown products and sizes the product is not offered in are errors.
    /// Line operations on a pair that is not in the cart succeed with a note.
    pub fn apply(&mut self, step: &Step) -> Result<StepOutcome> {
        match step {
            Step::Add { product, size } => {
                let product = self.catalog.get(&ProductId::new(product.as_str()))?;
                if !product.has_size(size) {
                    bail!(
                        "{} is not offered in size {} (available: {})",
                        product.name,
                        size,
                        product.sizes_label()
                    );
                }
                let cart = self.store.add_product(product, size);
                Ok(Self::changed(cart))
            }
            Step::SetQuantity {
                product,
                size,
                quantity,
            } => {
                let id = ProductId::new(product.as_str());
                let note = self.missing_line(&id, size);
                let cart = self.store.set_quantity(&id, size, *quantity);
                Ok(StepOutcome {
                    cart,
                    order: None,
                    note,
                })
            }
            Step::Increment { product, size } => {
                let id = ProductId::new(product.as_str());
                let note = self.missing_line(&id, size);
                let cart = self.store.increment(&id, size);
                Ok(StepOutcome {
                    cart,
                    order: None,
                    note,
                })
            }
            Step::Decrement { product, size } => {
                let id = ProductId::new(product.as_str());
                let note = self.missing_line(&id, size);
                let cart = self.store.decrement(&id, size);
                Ok(StepOutcome {
                    cart,
                    order: None,
                    note,
                })
            }
            Step::Remove { product, size } => {
                let id = ProductId::new(product.as_str());
                let note = self.missing_line(&id, size);
                let cart = self.store.remove(&id, size);
                Ok(StepOutcome {
                    cart,
                    order: None,
                    note,
                })
            }
            Step::Clear => Ok(Self::changed(self.store.clear())),
            Step::Checkout {
                contact,
                address,
                payment,
                comment,
            } => self.checkout(contact, address, payment.as_deref(), comment.as_deref()),
        }
    }

    fn checkout(
        &mut self,
        contact: &ContactDetails,
        address: &Address,
        payment: Option<&str>,
        comment: Option<&str>,
    ) -> Result<StepOutcome> {
        let payment_method = match payment {
            Some(name) => name.parse::<PaymentMethod>()?,
            None => PaymentMethod::default(),
        };

        let mut form = CheckoutForm::new(contact.clone(), address.clone())
            .with_payment_method(payment_method);
        if let Some(comment) = comment {
            form = form.with_comment(comment);
        }

        self.checkout.open(&self.store)?;
        match self.checkout.submit(form, &mut self.store) {
            Ok(order) => Ok(StepOutcome {
                cart: self.store.snapshot(),
                order: Some(order),
                note: None,
            }),
            Err(err) => {
                self.checkout.close();
                Err(err.into())
            }
        }
    }

    fn missing_line(&self, id: &ProductId, size: &str) -> Option<String> {
        if self.store.get(id, size).is_some() {
            None
        } else {
            Some(format!("{} ({}) is not in the cart", id, size))
        }
    }

    fn changed(cart: CartSnapshot) -> StepOutcome {
        StepOutcome {
            cart,
            order: None,
            note: None,
        }
    }
}

/// JSON record for one step.
#[derive(Debug, Serialize)]
struct StepRecord {
    step: usize,
    action: &'static str,
    #[serde(flatten)]
    outcome: Option<StepOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Run the session command.
pub fn run(args: SessionArgs, ctx: &Context) -> Result<()> {
    let script_path = ctx.resolve_path(&args.script);
    let script = SessionScript::load(&script_path)?;
    let catalog = ctx.catalog()?;

    let logger = ctx.logger("cart");
    let mut session = Session::new(&catalog);
    session
        .store_mut()
        .subscribe(Box::new(CartEventLogger::new(logger.clone())));

    logger
        .info_builder("session started")
        .field("script", script_path.display().to_string())
        .field_i64("steps", script.steps.len() as i64)
        .emit();

    ctx.output.header(&format!(
        "{} session ({} steps)",
        ctx.config.store.name,
        script.steps.len()
    ));

    let total = script.steps.len();
    let mut records = Vec::with_capacity(total);
    let mut failed = 0;

    for (index, step) in script.steps.iter().enumerate() {
        let number = index + 1;
        ctx.output.step(number, total, &step.describe());

        match session.apply(step) {
            Ok(outcome) => {
                if let Some(note) = &outcome.note {
                    ctx.output.debug(note);
                }
                if let Some(order) = &outcome.order {
                    print_order(order, ctx);
                    logger
                        .info_builder("order placed")
                        .field("order_number", order.order_number.as_str())
                        .field_i64("total_items", order.totals.total_items)
                        .field_i64("total_price", order.totals.total_price.amount_cents)
                        .emit();
                } else {
                    ctx.output.cart(&outcome.cart);
                }
                records.push(StepRecord {
                    step: number,
                    action: step.action(),
                    outcome: Some(outcome),
                    error: None,
                });
            }
            Err(err) => {
                logger
                    .warn_builder("step failed")
                    .field_i64("step", number as i64)
                    .field("action", step.action())
                    .field("error", format!("{:#}", err))
                    .emit();
                if args.strict {
                    return Err(err.context(format!("Step {} ({}) failed", number, step.action())));
                }
                ctx.output.warn(&format!("Step {} skipped: {:#}", number, err));
                failed += 1;
                records.push(StepRecord {
                    step: number,
                    action: step.action(),
                    outcome: None,
                    error: Some(format!("{:#}", err)),
                });
            }
        }
    }

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "session_id": logger.session_id(),
            "steps": records,
            "cart": session.store().snapshot(),
        }));
        return Ok(());
    }

    if failed == 0 {
        ctx.output.success(&format!("Session finished: {} step(s)", total));
    } else {
        ctx.output.warn(&format!(
            "Session finished: {} of {} step(s) skipped",
            failed, total
        ));
    }
    Ok(())
}

fn print_order(order: &Order, ctx: &Context) {
    ctx.output.success(&format!("Order {} placed", order.order_number));
    ctx.output.kv("status", &status_badge("completed"));
    ctx.output.kv("customer", &order.contact.full_name());
    ctx.output.kv("phone", &order.contact.phone);
    ctx.output.kv("email", &order.contact.email);
    ctx.output.kv("deliver to", &order.shipping_address.one_line());
    ctx.output
        .kv("payment", order.payment_method.display_name());
    if let Some(comment) = &order.comment {
        ctx.output.kv("comment", comment);
    }
    ctx.output.kv("placed at", &format_timestamp(order.created_at));
    ctx.output.cart(&CartSnapshot {
        items: order.items.clone(),
        totals: order.totals,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::parse_catalog;

    const SCRIPT: &str = r#"
[[steps]]
action = "add"
product = "1"
size = "M"

[[steps]]
action = "add"
product = "1"
size = "M"

[[steps]]
action = "add"
product = "3"
size = "L"

[[steps]]
action = "decrement"
product = "3"
size = "L"

[[steps]]
action = "checkout"
payment = "cash"
comment = "Leave at the door"
contact = { first_name = "Anna", last_name = "Ivanova", phone = "+7 900 000-00-00", email = "anna@example.com" }
address = { street = "Nevsky pr. 1", city = "Saint Petersburg", postal_code = "191186" }
"#;

    fn catalog() -> Catalog {
        parse_catalog(include_str!("../../catalog.toml"), false).unwrap()
    }

    #[test]
    fn test_parse_script() {
        let script = SessionScript::parse(SCRIPT).unwrap();
        assert_eq!(script.steps.len(), 5);
        assert_eq!(
            script.steps[0],
            Step::Add {
                product: "1".to_string(),
                size: "M".to_string()
            }
        );
        assert_eq!(script.steps[4].action(), "checkout");
    }

    #[test]
    fn test_sample_script_places_order() {
        let catalog = catalog();
        let mut session = Session::new(&catalog);
        let script = SessionScript::parse(include_str!("../../scripts/checkout.toml")).unwrap();

        let mut last = None;
        for step in &script.steps {
            last = Some(session.apply(step).unwrap());
        }

        let order = last.and_then(|outcome| outcome.order).unwrap();
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.totals.as_tuple(), (2, 8990 + 24990));
        assert_eq!(order.shipping_address.postal_code.as_deref(), Some("191186"));
    }

    #[test]
    fn test_unknown_action_rejected() {
        let result = SessionScript::parse("[[steps]]\naction = \"teleport\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_run_script_to_order() {
        let catalog = catalog();
        let mut session = Session::new(&catalog);
        let script = SessionScript::parse(SCRIPT).unwrap();

        let outcomes: Vec<StepOutcome> = script
            .steps
            .iter()
            .map(|step| session.apply(step).unwrap())
            .collect();

        assert_eq!(outcomes[1].cart.totals.as_tuple(), (2, 17980));
        assert_eq!(outcomes[2].cart.totals.as_tuple(), (3, 17980 + 24990));
        assert_eq!(outcomes[3].cart.totals.as_tuple(), (2, 17980));

        let order = outcomes[4].order.as_ref().unwrap();
        assert_eq!(order.totals.as_tuple(), (2, 17980));
        assert_eq!(order.payment_method, PaymentMethod::CashOnDelivery);
        assert_eq!(order.comment.as_deref(), Some("Leave at the door"));
        assert!(outcomes[4].cart.is_empty());
        assert!(session.store().is_empty());
    }

    #[test]
    fn test_unknown_product_fails() {
        let catalog = catalog();
        let mut session = Session::new(&catalog);
        let step = Step::Add {
            product: "404".to_string(),
            size: "M".to_string(),
        };
        assert!(session.apply(&step).is_err());
        assert!(session.store().is_empty());
    }

    #[test]
    fn test_unavailable_size_fails() {
        let catalog = catalog();
        let mut session = Session::new(&catalog);
        let step = Step::Add {
            product: "3".to_string(),
            size: "XS".to_string(),
        };
        let err = session.apply(&step).unwrap_err();
        assert!(err.to_string().contains("not offered in size XS"));
    }

    #[test]
    fn test_missing_line_is_noted() {
        let catalog = catalog();
        let mut session = Session::new(&catalog);
        let outcome = session
            .apply(&Step::Remove {
                product: "1".to_string(),
                size: "M".to_string(),
            })
            .unwrap();
        assert!(outcome.note.is_some());
        assert!(outcome.cart.is_empty());
    }

    #[test]
    fn test_incomplete_checkout_keeps_cart() {
        let catalog = catalog();
        let mut session = Session::new(&catalog);
        session
            .apply(&Step::Add {
                product: "1".to_string(),
                size: "S".to_string(),
            })
            .unwrap();

        let checkout = Step::Checkout {
            contact: ContactDetails::new("Anna", "", "", "anna@example.com"),
            address: Address::default(),
            payment: None,
            comment: None,
        };
        let err = session.apply(&checkout).unwrap_err();

        assert!(err.to_string().contains("last name"));
        assert_eq!(session.store().totals().as_tuple(), (1, 8990));
    }

    #[test]
    fn test_checkout_empty_cart_fails() {
        let catalog = catalog();
        let mut session = Session::new(&catalog);
        let checkout = Step::Checkout {
            contact: ContactDetails::new("Anna", "Ivanova", "1", "a@example.com"),
            address: Address::new("Nevsky pr. 1", "Saint Petersburg"),
            payment: Some("card".to_string()),
            comment: None,
        };
        assert!(session.apply(&checkout).is_err());
    }

    #[test]
    fn test_unknown_payment_method_fails() {
        let catalog = catalog();
        let mut session = Session::new(&catalog);
        session
            .apply(&Step::Add {
                product: "7".to_string(),
                size: "One size".to_string(),
            })
            .unwrap();
        let checkout = Step::Checkout {
            contact: ContactDetails::new("Anna", "Ivanova", "1", "a@example.com"),
            address: Address::new("Nevsky pr. 1", "Saint Petersburg"),
            payment: Some("barter".to_string()),
            comment: None,
        };
        assert!(session.apply(&checkout).is_err());
        assert_eq!(session.store().len(), 1);
    }
}
