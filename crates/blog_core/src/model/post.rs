//! Post domain model and field validators.
//!
//! # Responsibility
//! - Define the persisted `Post` record, its creation draft and category.
//! - Enforce title, content, summary and category rules on assignment.
//!
//! # Invariants
//! - `title` contains at least one entry of `TITLE_KEYWORDS` verbatim.
//! - `content` has at least `MIN_CONTENT_CHARS` characters.
//! - `summary`, when set, has at most `MAX_SUMMARY_CHARS` characters.
//! - Lengths count Unicode scalar values, not bytes.

use crate::model::validation::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Substrings of which a title must contain at least one (case-sensitive).
pub const TITLE_KEYWORDS: [&str; 4] = ["Won't Believe", "Secret", "Top", "Guess"];
pub const MIN_CONTENT_CHARS: usize = 250;
pub const MAX_SUMMARY_CHARS: usize = 250;

/// System-assigned post identifier (SQLite rowid).
pub type PostId = i64;

/// Fixed post category set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Fiction")]
    Fiction,
    #[serde(rename = "Non-Fiction")]
    NonFiction,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Fiction, Category::NonFiction];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fiction => "Fiction",
            Self::NonFiction => "Non-Fiction",
        }
    }

    /// Exact, case-sensitive match against the stored spelling.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.as_str() == value)
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted post record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub summary: Option<String>,
    pub category: Category,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds. `None` until the first update.
    pub updated_at: Option<i64>,
}

/// Creation draft for a post.
///
/// `category` stays a plain string here so unknown values surface as
/// `InvalidCategory` rather than as a decode failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub category: String,
}

pub fn validate_title(candidate: &str) -> Result<&str, ValidationError> {
    if TITLE_KEYWORDS
        .iter()
        .any(|keyword| candidate.contains(keyword))
    {
        Ok(candidate)
    } else {
        Err(ValidationError::MissingRequiredKeyword)
    }
}

pub fn validate_content(candidate: &str) -> Result<&str, ValidationError> {
    let chars = candidate.chars().count();
    if chars < MIN_CONTENT_CHARS {
        return Err(ValidationError::ContentTooShort { chars });
    }
    Ok(candidate)
}

/// Upper bound only; an empty summary is accepted.
pub fn validate_summary(candidate: &str) -> Result<&str, ValidationError> {
    let chars = candidate.chars().count();
    if chars > MAX_SUMMARY_CHARS {
        return Err(ValidationError::SummaryTooLong { chars });
    }
    Ok(candidate)
}

/// Accepts exactly "Fiction" or "Non-Fiction".
///
/// Returns the typed category; `Category::as_str` yields the accepted
/// string unchanged.
pub fn validate_category(candidate: &str) -> Result<Category, ValidationError> {
    Category::parse(candidate).ok_or_else(|| ValidationError::InvalidCategory(candidate.to_string()))
}

impl NewPost {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            summary: None,
            category: category.into(),
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Validates every field, reporting the first failure in field order.
    ///
    /// Returns the parsed category on success.
    pub fn validate(&self) -> Result<Category, ValidationError> {
        validate_title(&self.title)?;
        validate_content(&self.content)?;
        if let Some(summary) = self.summary.as_deref() {
            validate_summary(summary)?;
        }
        validate_category(&self.category)
    }
}

impl Post {
    pub fn set_title(&mut self, value: impl Into<String>) -> Result<(), ValidationError> {
        let value = value.into();
        validate_title(&value)?;
        self.title = value;
        Ok(())
    }

    pub fn set_content(&mut self, value: impl Into<String>) -> Result<(), ValidationError> {
        let value = value.into();
        validate_content(&value)?;
        self.content = value;
        Ok(())
    }

    /// `None` clears the summary.
    pub fn set_summary(&mut self, value: Option<String>) -> Result<(), ValidationError> {
        if let Some(summary) = value.as_deref() {
            validate_summary(summary)?;
        }
        self.summary = value;
        Ok(())
    }

    pub fn set_category(&mut self, value: &str) -> Result<(), ValidationError> {
        self.category = validate_category(value)?;
        Ok(())
    }

    /// Re-checks every field rule against the current values.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_title(&self.title)?;
        validate_content(&self.content)?;
        if let Some(summary) = self.summary.as_deref() {
            validate_summary(summary)?;
        }
        Ok(())
    }
}

impl Display for Post {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Post(id={}, title={}, content={}, summary={})",
            self.id,
            self.title,
            self.content,
            self.summary.as_deref().unwrap_or("None")
        )
    }
}
