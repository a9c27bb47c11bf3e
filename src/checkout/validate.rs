//! Checkout form field rules and input normalizers.
//!
//! Pure string functions: the adapter wires [`format_phone_input`] /
//! [`format_zip_input`] to input events for format-as-you-type behavior and
//! calls [`validate_customer`] on submit. Error messages are the exact copy
//! the site shows next to each field.

use crate::domain::aggregates::order::CustomerInfo;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    FullName,
    Phone,
    Email,
    Zip,
    Address,
    City,
}

impl Field {
    /// Form field name, as used for ids and error-element lookups.
    pub fn name(self) -> &'static str {
        match self {
            Self::FullName => "fullName",
            Self::Phone => "phone",
            Self::Email => "email",
            Self::Zip => "zip",
            Self::Address => "address",
            Self::City => "city",
        }
    }

    /// Human label for "is required" messages.
    fn label(self) -> &'static str {
        match self {
            Self::FullName => "Full Name",
            Self::Phone => "Phone Number",
            Self::Email => "Email",
            Self::Zip => "ZIP Code",
            Self::Address => "Delivery Address",
            Self::City => "City",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

impl FieldError {
    pub fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field.name(), self.message)
    }
}

fn name_charset(value: &str) -> bool {
    value
        .chars()
        .all(|c| c.is_ascii_alphabetic() || c == ' ' || c == '-' || c == '\'')
}

fn digits(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

fn normalized_phone_shape(value: &str) -> bool {
    // (XXX) XXX-XXXX
    let b = value.as_bytes();
    b.len() == 14
        && b[0] == b'('
        && b[1..4].iter().all(u8::is_ascii_digit)
        && b[4] == b')'
        && b[5] == b' '
        && b[6..9].iter().all(u8::is_ascii_digit)
        && b[9] == b'-'
        && b[10..14].iter().all(u8::is_ascii_digit)
}

fn email_shape(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = value.splitn(2, '@');
    let (local, domain) = match (parts.next(), parts.next()) {
        (Some(l), Some(d)) => (l, d),
        _ => return false,
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    // at least one dot in the domain with something on both sides
    match domain.rfind('.') {
        Some(dot) => dot > 0 && dot < domain.len() - 1,
        None => false,
    }
}

fn zip_shape(value: &str) -> bool {
    let b = value.as_bytes();
    match b.len() {
        5 => b.iter().all(u8::is_ascii_digit),
        10 => {
            b[..5].iter().all(u8::is_ascii_digit)
                && b[5] == b'-'
                && b[6..].iter().all(u8::is_ascii_digit)
        }
        _ => false,
    }
}

/// Validate one field's trimmed value against its rule. Email is the only
/// optional field: empty email is valid.
pub fn validate_field(field: Field, value: &str) -> Result<(), FieldError> {
    let value = value.trim();

    if value.is_empty() {
        if field == Field::Email {
            return Ok(());
        }
        return Err(FieldError::new(
            field,
            format!("{} is required.", field.label()),
        ));
    }

    match field {
        Field::FullName => {
            if value.len() < 2 {
                Err(FieldError::new(field, "Name must be at least 2 characters long."))
            } else if !name_charset(value) {
                Err(FieldError::new(
                    field,
                    "Name can only contain letters, spaces, hyphens, and apostrophes.",
                ))
            } else {
                Ok(())
            }
        }
        Field::Phone => {
            if normalized_phone_shape(value) || digits(value).len() == 10 {
                Ok(())
            } else {
                Err(FieldError::new(field, "Please enter a valid 10-digit phone number."))
            }
        }
        Field::Email => {
            if email_shape(value) {
                Ok(())
            } else {
                Err(FieldError::new(field, "Please enter a valid email address."))
            }
        }
        Field::Zip => {
            if zip_shape(value) {
                Ok(())
            } else {
                Err(FieldError::new(
                    field,
                    "Please enter a valid ZIP code (e.g., 12345 or 12345-6789).",
                ))
            }
        }
        Field::Address => {
            if value.len() < 10 {
                Err(FieldError::new(
                    field,
                    "Please enter a complete address with street and number.",
                ))
            } else {
                Ok(())
            }
        }
        Field::City => {
            if value.len() < 2 {
                Err(FieldError::new(field, "Please enter a valid city name."))
            } else if !name_charset(value) {
                Err(FieldError::new(
                    field,
                    "City name can only contain letters, spaces, hyphens, and apostrophes.",
                ))
            } else {
                Ok(())
            }
        }
    }
}

/// Validate every checked field, collecting all errors rather than stopping
/// at the first.
pub fn validate_customer(customer: &CustomerInfo) -> Vec<FieldError> {
    let checks = [
        (Field::FullName, customer.full_name.as_str()),
        (Field::Phone, customer.phone.as_str()),
        (Field::Email, customer.email.as_str()),
        (Field::Zip, customer.zip.as_str()),
        (Field::Address, customer.address.as_str()),
        (Field::City, customer.city.as_str()),
    ];
    checks
        .into_iter()
        .filter_map(|(field, value)| validate_field(field, value).err())
        .collect()
}

/// Format a phone number as digits accumulate: `(123`, `(123) 456`,
/// `(123) 456-7890`. Input past ten digits is truncated.
pub fn format_phone_input(raw: &str) -> String {
    let mut d = digits(raw);
    if d.len() >= 10 {
        d.truncate(10);
        format!("({}) {}-{}", &d[..3], &d[3..6], &d[6..])
    } else if d.len() >= 6 {
        format!("({}) {}-{}", &d[..3], &d[3..6], &d[6..])
    } else if d.len() >= 3 {
        format!("({}) {}", &d[..3], &d[3..])
    } else {
        d
    }
}

/// Format a ZIP as digits accumulate: five digits plain, six to nine digits
/// get a hyphen after the fifth, anything longer falls back to the first five.
pub fn format_zip_input(raw: &str) -> String {
    let d = digits(raw);
    if d.len() >= 5 {
        if d.len() > 5 && d.len() <= 9 {
            format!("{}-{}", &d[..5], &d[5..])
        } else {
            d[..5].to_string()
        }
    } else {
        d
    }
}
