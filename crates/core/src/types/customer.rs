//! Customer registration types.

use serde::{Deserialize, Serialize};

use super::validation::{Field, FieldStatus, feedback};

/// Errors that can occur when registering a customer.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// One or more fields failed their pattern.
    #[error("invalid {}", join_labels(.fields))]
    InvalidFields {
        /// Offending fields, in form order.
        fields: Vec<Field>,
    },
}

impl ValidationError {
    /// Fields that failed validation.
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        match self {
            Self::InvalidFields { fields } => fields,
        }
    }
}

fn join_labels(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|f| f.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Raw registration input, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl RegistrationForm {
    /// Raw value of a single field.
    #[must_use]
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::Address => &self.address,
        }
    }

    /// Replace the raw value of a single field.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::FirstName => &mut self.first_name,
            Field::LastName => &mut self.last_name,
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
            Field::Address => &mut self.address,
        };
        *slot = value.into();
    }

    /// Fields whose current value fails validation, in form order.
    #[must_use]
    pub fn invalid_fields(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|&field| feedback(field, self.value(field)) == FieldStatus::Rejected)
            .collect()
    }

    /// Validate every field and build a [`CustomerRecord`].
    ///
    /// All-or-nothing: no record is produced unless all five fields pass.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidFields`] listing every failing field.
    pub fn validate(self) -> Result<CustomerRecord, ValidationError> {
        let fields = self.invalid_fields();
        if !fields.is_empty() {
            return Err(ValidationError::InvalidFields { fields });
        }

        Ok(CustomerRecord {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            address: self.address,
        })
    }
}

/// A registered customer.
///
/// Only obtainable through [`RegistrationForm::validate`], and read-only
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerRecord {
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    address: String,
}

impl CustomerRecord {
    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn phone(&self) -> &str {
        &self.phone
    }

    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// First and last name separated by a space.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn valid_form() -> RegistrationForm {
        RegistrationForm {
            first_name: "Ana".to_string(),
            last_name: "Cruz".to_string(),
            email: "ana.cruz@example.com".to_string(),
            phone: "09171234567".to_string(),
            address: "12 Mabini Street, Manila".to_string(),
        }
    }

    #[test]
    fn test_validate_builds_record() {
        let record = valid_form().validate().unwrap();
        assert_eq!(record.full_name(), "Ana Cruz");
        assert_eq!(record.email(), "ana.cruz@example.com");
        assert_eq!(record.phone(), "09171234567");
        assert_eq!(record.address(), "12 Mabini Street, Manila");
    }

    #[test]
    fn test_validate_reports_every_invalid_field_in_order() {
        let mut form = valid_form();
        form.set(Field::Address, "short");
        form.set(Field::FirstName, "ana");

        let err = form.validate().unwrap_err();
        assert_eq!(err.fields(), &[Field::FirstName, Field::Address]);
        assert_eq!(err.to_string(), "invalid first name, address");
    }

    #[test]
    fn test_empty_form_fails_everywhere() {
        let err = RegistrationForm::default().validate().unwrap_err();
        assert_eq!(err.fields(), &Field::ALL);
    }

    #[test]
    fn test_value_and_set() {
        let mut form = RegistrationForm::default();
        form.set(Field::Phone, "09171234567");
        assert_eq!(form.value(Field::Phone), "09171234567");
        assert_eq!(form.value(Field::Email), "");
    }
}
