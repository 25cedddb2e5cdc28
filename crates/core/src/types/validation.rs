//! Registration field validation.
//!
//! Every rule is a fixed anchored pattern. Validation is a pure predicate:
//! it never mutates anything and never fails, it only answers "does this raw
//! string match".
//!
//! ## Patterns
//!
//! | Field              | Pattern                                            |
//! |--------------------|----------------------------------------------------|
//! | First / last name  | `^[A-Z][a-z]{1,}$`                                 |
//! | Email              | `^[a-zA-Z0-9._-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,6}$`  |
//! | Phone              | `^09\d{9}$` (ASCII digits)                         |
//! | Address            | `^.{10,}$` (browser semantics, see below)          |
//!
//! The address rule follows browser regex semantics rather than `regex`
//! defaults: `.` excludes `\n`, `\r`, U+2028 and U+2029, and length is
//! counted in UTF-16 code units.

use core::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][a-z]{1,}$").expect("Invalid regex"));

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,6}$").expect("Invalid regex")
});

// `\d` is Unicode-aware in `regex`; the local mobile format is ASCII only.
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^09[0-9]{9}$").expect("Invalid regex"));

// Line terminators a browser `.` refuses to match. Length is checked separately.
static ADDRESS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\n\r\x{2028}\x{2029}]*$").expect("Invalid regex"));

const ADDRESS_MIN_UTF16_LEN: usize = 10;

/// The kind of rule a field is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// A first or last name.
    Name,
    /// An email address.
    Email,
    /// A local mobile number.
    Phone,
    /// A delivery address.
    Address,
}

impl FieldKind {
    /// Check a raw input against this kind's pattern.
    #[must_use]
    pub fn is_valid(self, value: &str) -> bool {
        match self {
            Self::Name => NAME_RE.is_match(value),
            Self::Email => EMAIL_RE.is_match(value),
            Self::Phone => PHONE_RE.is_match(value),
            Self::Address => {
                value.encode_utf16().count() >= ADDRESS_MIN_UTF16_LEN
                    && ADDRESS_RE.is_match(value)
            }
        }
    }
}

/// A registration form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Phone,
    Address,
}

impl Field {
    /// All fields in form order.
    pub const ALL: [Self; 5] = [
        Self::FirstName,
        Self::LastName,
        Self::Email,
        Self::Phone,
        Self::Address,
    ];

    /// The rule this field is validated with.
    #[must_use]
    pub const fn kind(self) -> FieldKind {
        match self {
            Self::FirstName | Self::LastName => FieldKind::Name,
            Self::Email => FieldKind::Email,
            Self::Phone => FieldKind::Phone,
            Self::Address => FieldKind::Address,
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FirstName => "first name",
            Self::LastName => "last name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Address => "address",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "first_name" | "firstname" | "first" => Ok(Self::FirstName),
            "last_name" | "lastname" | "last" => Ok(Self::LastName),
            "email" => Ok(Self::Email),
            "phone" => Ok(Self::Phone),
            "address" => Ok(Self::Address),
            _ => Err(UnknownField(s.to_owned())),
        }
    }
}

/// Returned when parsing a [`Field`] from an unrecognized name.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown field: {0}")]
pub struct UnknownField(pub String);

/// Live per-field feedback shown while the customer types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldStatus {
    Accepted,
    Rejected,
}

impl FieldStatus {
    #[must_use]
    pub const fn from_valid(valid: bool) -> Self {
        if valid { Self::Accepted } else { Self::Rejected }
    }
}

/// One uppercase letter followed by at least one lowercase letter.
#[must_use]
pub fn is_valid_name(value: &str) -> bool {
    FieldKind::Name.is_valid(value)
}

#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    FieldKind::Email.is_valid(value)
}

/// Exactly eleven digits starting with `09`.
#[must_use]
pub fn is_valid_phone(value: &str) -> bool {
    FieldKind::Phone.is_valid(value)
}

/// At least ten UTF-16 code units on a single line.
#[must_use]
pub fn is_valid_address(value: &str) -> bool {
    FieldKind::Address.is_valid(value)
}

/// Accepted/rejected status for a field's current raw value.
#[must_use]
pub fn feedback(field: Field, value: &str) -> FieldStatus {
    FieldStatus::from_valid(field.kind().is_valid(value))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_name_accepts_capitalized_words() {
        assert!(is_valid_name("Ana"));
        assert!(is_valid_name("Jo"));
        assert!(is_valid_name("Maria"));
    }

    #[test]
    fn test_name_rejects() {
        assert!(!is_valid_name("ana"));
        assert!(!is_valid_name("Ana2"));
        assert!(!is_valid_name("A"));
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("Ana Marie"));
        assert!(!is_valid_name("Mary-Ann"));
        assert!(!is_valid_name("McDonald"));
        assert!(!is_valid_name("José"));
    }

    #[test]
    fn test_email() {
        assert!(is_valid_email("ana.cruz@example.com"));
        assert!(is_valid_email("a_b-c@mail.example.ph"));
        assert!(!is_valid_email("ana@example"));
        assert!(!is_valid_email("ana@example.c"));
        assert!(!is_valid_email("ana@example.abcdefg"));
        assert!(!is_valid_email("ana+tag@example.com"));
        assert!(!is_valid_email("@example.com"));
    }

    #[test]
    fn test_phone() {
        assert!(is_valid_phone("09171234567"));
        assert!(!is_valid_phone("0917123456"));
        assert!(!is_valid_phone("639171234567"));
        assert!(!is_valid_phone("091712345678"));
        assert!(!is_valid_phone("0917 123 456"));
        // Arabic-Indic digits are not accepted
        assert!(!is_valid_phone("09١٢٣٤٥٦٧٨٩"));
    }

    #[test]
    fn test_address() {
        assert!(is_valid_address("123 Rizal St"));
        assert!(is_valid_address("0123456789"));
        assert!(!is_valid_address("Short St"));
        assert!(!is_valid_address("12345\n67890"));
    }

    #[test]
    fn test_address_line_terminators() {
        assert!(!is_valid_address("12345\r67890"));
        assert!(!is_valid_address("12345\u{2028}67890"));
        assert!(!is_valid_address("12345\u{2029}67890"));
    }

    #[test]
    fn test_address_length_in_utf16_units() {
        // Each bowl is a surrogate pair
        assert!(is_valid_address("🍜🍜🍜🍜🍜"));
        assert!(!is_valid_address("🍜🍜🍜🍜"));
        assert!(is_valid_address("Calle Peñaranda"));
    }

    #[test]
    fn test_feedback() {
        assert_eq!(feedback(Field::Phone, "09171234567"), FieldStatus::Accepted);
        assert_eq!(feedback(Field::LastName, "cruz"), FieldStatus::Rejected);
    }

    #[test]
    fn test_field_from_str() {
        assert_eq!("first-name".parse::<Field>().unwrap(), Field::FirstName);
        assert_eq!("Phone".parse::<Field>().unwrap(), Field::Phone);
        assert!("zip".parse::<Field>().is_err());
    }
}
