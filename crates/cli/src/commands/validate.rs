//! One-off field validation.

use std::io::Write;

use makcik_core::{Field, FieldStatus, feedback};

/// Check `value` against the rule for `field` and print the verdict.
///
/// # Errors
///
/// Returns an error for an unknown field name or a rejected value, so the
/// process exits non-zero.
pub fn check(field: &str, value: &str) -> Result<(), Box<dyn std::error::Error>> {
    let field: Field = field.parse()?;
    let status = feedback(field, value);

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{field}: {}", verdict(status))?;

    match status {
        FieldStatus::Accepted => Ok(()),
        FieldStatus::Rejected => Err(format!("{value:?} is not a valid {field}").into()),
    }
}

const fn verdict(status: FieldStatus) -> &'static str {
    match status {
        FieldStatus::Accepted => "accepted",
        FieldStatus::Rejected => "rejected",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check() {
        assert!(check("phone", "09171234567").is_ok());
        assert!(check("phone", "0917123456").is_err());
        assert!(check("zip", "1000").is_err());
    }
}
