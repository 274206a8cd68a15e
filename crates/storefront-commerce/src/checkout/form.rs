//! The checkout form.

use crate::checkout::address::is_blank;
use crate::checkout::{Address, ContactDetails};
use crate::error::CommerceError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Bank card.
    #[default]
    Card,
    /// Cash on delivery.
    CashOnDelivery,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "card",
            PaymentMethod::CashOnDelivery => "cash_on_delivery",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "Bank card",
            PaymentMethod::CashOnDelivery => "Cash on delivery",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "card" => Ok(PaymentMethod::Card),
            "cash" | "cash_on_delivery" => Ok(PaymentMethod::CashOnDelivery),
            _ => Err(CommerceError::UnknownPaymentMethod(s.to_string())),
        }
    }
}

/// Everything the customer enters at checkout.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckoutForm {
    /// Contact details.
    pub contact: ContactDetails,
    /// Delivery address.
    pub shipping_address: Address,
    /// Payment method.
    #[serde(default)]
    pub payment_method: PaymentMethod,
    /// Free-form note for the order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl CheckoutForm {
    /// Create a form paying by card with no comment.
    pub fn new(contact: ContactDetails, shipping_address: Address) -> Self {
        Self {
            contact,
            shipping_address,
            payment_method: PaymentMethod::default(),
            comment: None,
        }
    }

    /// Set the payment method.
    pub fn with_payment_method(mut self, method: PaymentMethod) -> Self {
        self.payment_method = method;
        self
    }

    /// Set the comment. Blank comments are dropped.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        let comment = comment.into();
        self.comment = if is_blank(&comment) { None } else { Some(comment) };
        self
    }

    /// Required fields that are blank, in form order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = self.contact.missing_fields();
        missing.extend(self.shipping_address.missing_fields());
        missing
    }

    /// Check required fields are present.
    pub fn validate(&self) -> Result<(), CommerceError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(CommerceError::CheckoutIncomplete(missing.join(", ")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_form() -> CheckoutForm {
        CheckoutForm::new(
            ContactDetails::new("Anna", "Ivanova", "+7 812 123-45-67", "anna@example.com"),
            Address::new("Nevsky pr. 1", "Saint Petersburg"),
        )
    }

    #[test]
    fn test_complete_form_validates() {
        assert!(complete_form().validate().is_ok());
        assert_eq!(complete_form().payment_method, PaymentMethod::Card);
    }

    #[test]
    fn test_missing_fields_in_form_order() {
        let mut form = complete_form();
        form.contact.phone.clear();
        form.shipping_address.city = "  ".to_string();

        assert_eq!(
            form.validate(),
            Err(CommerceError::CheckoutIncomplete("phone, city".to_string()))
        );
    }

    #[test]
    fn test_empty_form() {
        let missing = CheckoutForm::default().missing_fields();
        assert_eq!(
            missing,
            vec!["first name", "last name", "phone", "email", "address", "city"]
        );
    }

    #[test]
    fn test_blank_comment_dropped() {
        assert_eq!(complete_form().with_comment("   ").comment, None);
        assert_eq!(
            complete_form().with_comment("Ring twice").comment.as_deref(),
            Some("Ring twice")
        );
    }

    #[test]
    fn test_payment_method_parse() {
        assert_eq!("cash".parse(), Ok(PaymentMethod::CashOnDelivery));
        assert_eq!(" CARD ".parse(), Ok(PaymentMethod::Card));
        assert_eq!(
            "crypto".parse::<PaymentMethod>(),
            Err(CommerceError::UnknownPaymentMethod("crypto".to_string()))
        );
    }
}
