//! Contact and shipping address types.

use serde::{Deserialize, Serialize};

/// Who the order is for.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ContactDetails {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Phone number.
    pub phone: String,
    /// Email address.
    pub email: String,
}

impl ContactDetails {
    /// Create contact details.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            phone: phone.into(),
            email: email.into(),
        }
    }

    /// Get full name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }

    /// Names of required fields that are blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("first name", &self.first_name),
            ("last name", &self.last_name),
            ("phone", &self.phone),
            ("email", &self.email),
        ]
        .into_iter()
        .filter(|(_, value)| is_blank(value))
        .map(|(name, _)| name)
        .collect()
    }
}

/// A delivery address.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Address {
    /// Street, house and apartment.
    pub street: String,
    /// City.
    pub city: String,
    /// Postal code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
}

impl Address {
    /// Create a new address without a postal code.
    pub fn new(street: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            street: street.into(),
            city: city.into(),
            postal_code: None,
        }
    }

    /// Set the postal code.
    pub fn with_postal_code(mut self, postal_code: impl Into<String>) -> Self {
        self.postal_code = Some(postal_code.into());
        self
    }

    /// Format as single line.
    pub fn one_line(&self) -> String {
        let mut parts = vec![self.street.trim(), self.city.trim()];
        if let Some(ref zip) = self.postal_code {
            if !is_blank(zip) {
                parts.push(zip.trim());
            }
        }
        parts.join(", ")
    }

    /// Names of required fields that are blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if is_blank(&self.street) {
            missing.push("address");
        }
        if is_blank(&self.city) {
            missing.push("city");
        }
        missing
    }

    /// Check if address is complete.
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
