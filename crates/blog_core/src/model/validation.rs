//! Field validation error taxonomy shared by author and post models.
//!
//! # Responsibility
//! - Name every business rule that can reject a field assignment.
//! - Give callers a stable machine-readable code per rule.
//!
//! # Invariants
//! - Each variant maps to exactly one field and one rule.
//! - `code()` values are stable and never reused for another rule.

use crate::model::post::{MAX_SUMMARY_CHARS, MIN_CONTENT_CHARS};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rejection reason for a single field assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Author name already used by another record.
    DuplicateName(String),
    /// Author name is empty or missing.
    EmptyName,
    /// Phone number is not exactly ten decimal digits.
    InvalidPhoneFormat,
    /// Post title lacks every required keyword.
    MissingRequiredKeyword,
    /// Post content is shorter than the minimum.
    ContentTooShort { chars: usize },
    /// Post summary is longer than the maximum.
    SummaryTooLong { chars: usize },
    /// Post category is not one of the fixed values.
    InvalidCategory(String),
}

impl ValidationError {
    /// Stable snake_case code for API-layer mapping and log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::DuplicateName(_) => "duplicate_name",
            Self::EmptyName => "empty_name",
            Self::InvalidPhoneFormat => "invalid_phone_format",
            Self::MissingRequiredKeyword => "missing_required_keyword",
            Self::ContentTooShort { .. } => "content_too_short",
            Self::SummaryTooLong { .. } => "summary_too_long",
            Self::InvalidCategory(_) => "invalid_category",
        }
    }

    /// Name of the field whose assignment was rejected.
    pub fn field(&self) -> &'static str {
        match self {
            Self::DuplicateName(_) | Self::EmptyName => "name",
            Self::InvalidPhoneFormat => "phone_number",
            Self::MissingRequiredKeyword => "title",
            Self::ContentTooShort { .. } => "content",
            Self::SummaryTooLong { .. } => "summary",
            Self::InvalidCategory(_) => "category",
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateName(_) => write!(f, "That name already exists"),
            Self::EmptyName => write!(f, "Author must have a name"),
            Self::InvalidPhoneFormat => write!(f, "Phone number must be exactly 10 digits"),
            Self::MissingRequiredKeyword => write!(
                f,
                "Title must contain one of the following: \"Won't Believe\", \"Secret\", \"Top\", \"Guess\""
            ),
            Self::ContentTooShort { .. } => write!(
                f,
                "Post content must be at least {MIN_CONTENT_CHARS} characters long."
            ),
            Self::SummaryTooLong { .. } => write!(
                f,
                "Post summary must be no more than {MAX_SUMMARY_CHARS} characters."
            ),
            Self::InvalidCategory(_) => {
                write!(f, "Post category must be either Fiction or Non-Fiction.")
            }
        }
    }
}

impl Error for ValidationError {}
