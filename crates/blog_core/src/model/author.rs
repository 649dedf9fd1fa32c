//! Author domain model and field validators.
//!
//! # Responsibility
//! - Define the persisted `Author` record and its creation draft.
//! - Enforce name and phone number rules on every assignment.
//!
//! # Invariants
//! - `name` is non-empty and unique among authors at assignment time.
//! - `phone_number`, when set, is exactly ten ASCII decimal digits.
//! - Failed assignments leave the record unchanged.

use crate::model::validation::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::{Display, Formatter};

/// Number of digits a phone number must contain.
pub const PHONE_NUMBER_DIGITS: usize = 10;

static PHONE_NUMBER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"\A[0-9]{{{PHONE_NUMBER_DIGITS}}}\z")).expect("valid phone number regex")
});

/// System-assigned author identifier (SQLite rowid).
pub type AuthorId = i64;

/// Persisted author record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: AuthorId,
    pub name: String,
    pub phone_number: Option<String>,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds. `None` until the first update.
    pub updated_at: Option<i64>,
}

/// Creation draft for an author; `id` and timestamps come from storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAuthor {
    /// Missing in input deserializes to empty, which fails as `EmptyName`.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone_number: Option<String>,
}

/// Checks that `candidate` is a non-empty name absent from `current_names`.
///
/// The duplicate check runs before the emptiness check.
///
/// # Errors
/// - `DuplicateName` when `candidate` is already in `current_names`.
/// - `EmptyName` when `candidate` is empty.
pub fn validate_name<'a>(
    current_names: &HashSet<String>,
    candidate: &'a str,
) -> Result<&'a str, ValidationError> {
    if current_names.contains(candidate) {
        return Err(ValidationError::DuplicateName(candidate.to_string()));
    }
    if candidate.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(candidate)
}

/// Checks that `candidate` is exactly ten decimal digits, nothing else.
pub fn validate_phone_number(candidate: &str) -> Result<&str, ValidationError> {
    if PHONE_NUMBER_RE.is_match(candidate) {
        Ok(candidate)
    } else {
        Err(ValidationError::InvalidPhoneFormat)
    }
}

impl NewAuthor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone_number: None,
        }
    }

    pub fn with_phone_number(mut self, phone_number: impl Into<String>) -> Self {
        self.phone_number = Some(phone_number.into());
        self
    }

    /// Validates every field, reporting the first failure in field order.
    pub fn validate(&self, current_names: &HashSet<String>) -> Result<(), ValidationError> {
        validate_name(current_names, &self.name)?;
        if let Some(phone_number) = self.phone_number.as_deref() {
            validate_phone_number(phone_number)?;
        }
        Ok(())
    }
}

impl Author {
    /// Replaces `name` after checking it against `current_names`.
    ///
    /// Callers renaming a stored author should pass the names of the
    /// other authors only.
    pub fn set_name(
        &mut self,
        current_names: &HashSet<String>,
        value: impl Into<String>,
    ) -> Result<(), ValidationError> {
        let value = value.into();
        validate_name(current_names, &value)?;
        self.name = value;
        Ok(())
    }

    /// Replaces `phone_number`; `None` clears it without validation.
    pub fn set_phone_number(&mut self, value: Option<String>) -> Result<(), ValidationError> {
        if let Some(phone_number) = value.as_deref() {
            validate_phone_number(phone_number)?;
        }
        self.phone_number = value;
        Ok(())
    }

    /// Re-checks per-record rules. Uniqueness needs the full table and is
    /// left to the repository.
    pub fn validate_fields(&self) -> Result<(), ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if let Some(phone_number) = self.phone_number.as_deref() {
            validate_phone_number(phone_number)?;
        }
        Ok(())
    }
}

impl Display for Author {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Author(id={}, name={})", self.id, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::{validate_name, validate_phone_number, Author};
    use crate::model::validation::ValidationError;
    use std::collections::HashSet;

    fn stored(name: &str) -> Author {
        Author {
            id: 7,
            name: name.to_string(),
            phone_number: None,
            created_at: 0,
            updated_at: None,
        }
    }

    #[test]
    fn duplicate_check_runs_before_empty_check() {
        let names: HashSet<String> = [String::new()].into_iter().collect();
        assert_eq!(
            validate_name(&names, ""),
            Err(ValidationError::DuplicateName(String::new()))
        );
    }

    #[test]
    fn phone_regex_rejects_trailing_newline() {
        assert!(validate_phone_number("5551234567\n").is_err());
        assert!(validate_phone_number("٥٥٥١٢٣٤٥٦٧").is_err());
    }

    #[test]
    fn failed_set_name_keeps_previous_value() {
        let mut author = stored("Jane Doe");
        let names: HashSet<String> = ["John Roe".to_string()].into_iter().collect();

        let err = author.set_name(&names, "John Roe").unwrap_err();
        assert_eq!(err.code(), "duplicate_name");
        assert_eq!(author.name, "Jane Doe");
    }

    #[test]
    fn display_matches_repr_shape() {
        assert_eq!(stored("Jane Doe").to_string(), "Author(id=7, name=Jane Doe)");
    }
}
