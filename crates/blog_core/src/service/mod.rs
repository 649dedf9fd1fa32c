//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep API-layer callers decoupled from storage details.

pub mod author_service;
pub mod post_service;
