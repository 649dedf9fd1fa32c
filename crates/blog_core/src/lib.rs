//! Core domain logic for the blog backend.
//! This crate is the single source of truth for author and post field rules.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::author::{
    validate_name, validate_phone_number, Author, AuthorId, NewAuthor, PHONE_NUMBER_DIGITS,
};
pub use model::post::{
    validate_category, validate_content, validate_summary, validate_title, Category, NewPost,
    Post, PostId, MAX_SUMMARY_CHARS, MIN_CONTENT_CHARS, TITLE_KEYWORDS,
};
pub use model::validation::ValidationError;
pub use repo::author_repo::{AuthorListQuery, AuthorRepository, SqliteAuthorRepository};
pub use repo::post_repo::{PostListQuery, PostRepository, SqlitePostRepository};
pub use repo::{RepoError, RepoResult};
pub use service::author_service::AuthorService;
pub use service::post_service::PostService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
