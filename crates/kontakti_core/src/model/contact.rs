//! Contact domain model.
//!
//! # Responsibility
//! - Define the address-book record persisted by the contact store.
//! - Provide write-path validation shared by every repository.
//!
//! # Invariants
//! - `id` is `None` until the store assigns one and never changes afterwards.
//! - `name` and `email` must be non-empty before persistence.
//! - Optional fields keep `None` and `Some("")` distinct.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned row identifier.
pub type ContactId = i64;

static EMAIL_SHAPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+$").expect("valid email shape regex"));

/// Validation failure for contact write paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactValidationError {
    EmptyName,
    EmptyEmail,
    /// The operation targets an existing row but the contact carries no id.
    MissingId,
}

impl Display for ContactValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "contact name must not be empty"),
            Self::EmptyEmail => write!(f, "contact email must not be empty"),
            Self::MissingId => write!(f, "contact has no id; it was never persisted"),
        }
    }
}

impl Error for ContactValidationError {}

/// One address-book entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// Assigned by the store on creation.
    #[serde(default)]
    pub id: Option<ContactId>,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub address_line1: Option<String>,
    #[serde(default)]
    pub address_line2: Option<String>,
}

impl Contact {
    /// Creates an unsaved contact with only the required fields set.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: email.into(),
            phone_number: None,
            address_line1: None,
            address_line2: None,
        }
    }

    pub fn with_phone_number(mut self, phone_number: impl Into<String>) -> Self {
        self.phone_number = Some(phone_number.into());
        self
    }

    pub fn with_address(
        mut self,
        address_line1: impl Into<String>,
        address_line2: Option<String>,
    ) -> Self {
        self.address_line1 = Some(address_line1.into());
        self.address_line2 = address_line2;
        self
    }

    /// Checks the invariants every persisted row must satisfy.
    ///
    /// Whitespace-only `name` or `email` counts as empty.
    ///
    /// Email shape is not part of this check; see [`Contact::has_email_shape`].
    pub fn validate(&self) -> Result<(), ContactValidationError> {
        if self.name.trim().is_empty() {
            return Err(ContactValidationError::EmptyName);
        }
        if self.email.trim().is_empty() {
            return Err(ContactValidationError::EmptyEmail);
        }
        Ok(())
    }

    /// Returns the persisted id or `MissingId` for unsaved contacts.
    pub fn require_id(&self) -> Result<ContactId, ContactValidationError> {
        self.id.ok_or(ContactValidationError::MissingId)
    }

    /// Returns whether `email` looks like `local@domain`.
    ///
    /// Presentation layers use this for form validation; the store itself
    /// accepts any non-empty email.
    pub fn has_email_shape(&self) -> bool {
        EMAIL_SHAPE_RE.is_match(&self.email)
    }
}

#[cfg(test)]
mod tests {
    use super::{Contact, ContactValidationError};

    #[test]
    fn new_contact_has_no_id_and_no_optional_fields() {
        let contact = Contact::new("Alice", "a@x.com");
        assert_eq!(contact.id, None);
        assert_eq!(contact.phone_number, None);
        assert_eq!(contact.address_line1, None);
        assert_eq!(contact.address_line2, None);
        assert!(contact.validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_required_fields() {
        assert_eq!(
            Contact::new("", "a@x.com").validate(),
            Err(ContactValidationError::EmptyName)
        );
        assert_eq!(
            Contact::new("Alice", "").validate(),
            Err(ContactValidationError::EmptyEmail)
        );
        assert_eq!(
            Contact::new("   ", "a@x.com").validate(),
            Err(ContactValidationError::EmptyName)
        );
        assert_eq!(
            Contact::new("Alice", " \t ").validate(),
            Err(ContactValidationError::EmptyEmail)
        );
    }

    #[test]
    fn require_id_reports_unsaved_contact() {
        let mut contact = Contact::new("Alice", "a@x.com");
        assert_eq!(contact.require_id(), Err(ContactValidationError::MissingId));
        contact.id = Some(7);
        assert_eq!(contact.require_id(), Ok(7));
    }

    #[test]
    fn email_shape_check_is_lenient_but_requires_at_sign() {
        assert!(Contact::new("A", "a@x.com").has_email_shape());
        assert!(Contact::new("A", "first.last+tag@sub.example.org").has_email_shape());
        assert!(!Contact::new("A", "not-an-email").has_email_shape());
        assert!(!Contact::new("A", "a b@x.com").has_email_shape());
        assert!(!Contact::new("A", "a@@x.com").has_email_shape());
    }

    #[test]
    fn serializes_with_camel_case_field_names() {
        let contact = Contact::new("Alice", "a@x.com")
            .with_phone_number("555-0100")
            .with_address("1 Main St", None);
        let json = serde_json::to_value(&contact).unwrap();

        assert_eq!(json["phoneNumber"], "555-0100");
        assert_eq!(json["addressLine1"], "1 Main St");
        assert!(json["addressLine2"].is_null());
        assert!(json["id"].is_null());
    }

    #[test]
    fn deserializes_with_missing_optional_fields() {
        let contact: Contact =
            serde_json::from_str(r#"{"id": 3, "name": "Bob", "email": "b@x.com"}"#).unwrap();
        assert_eq!(contact.id, Some(3));
        assert_eq!(contact.name, "Bob");
        assert_eq!(contact.phone_number, None);
    }
}
