//! Domain model for authors and posts.
//!
//! # Responsibility
//! - Define persisted records, creation drafts and their field validators.
//! - Keep every business rule as a pure function callable before storage.
//!
//! # Invariants
//! - Records are only mutated through validating setters.
//! - Validators depend on nothing but their input and, for author names,
//!   a caller-supplied snapshot of existing names.

pub mod author;
pub mod post;
pub mod validation;
