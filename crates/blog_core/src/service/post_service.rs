//! Post use-case service.
//!
//! # Responsibility
//! - Provide create/get/list/delete entry points for API-layer callers.
//! - Provide one validate-and-set update per post field.
//!
//! # Invariants
//! - A rejected field update leaves the stored post untouched.
//! - Log events carry ids and error codes only, never post text.

use crate::model::post::{NewPost, Post, PostId};
use crate::model::validation::ValidationError;
use crate::repo::post_repo::{PostListQuery, PostRepository};
use crate::repo::{RepoError, RepoResult};
use log::{info, warn};

/// Use-case service wrapper for post operations.
pub struct PostService<R: PostRepository> {
    repo: R,
}

impl<R: PostRepository> PostService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates and stores a new post, returning the stored record.
    pub fn create_post(&self, draft: &NewPost) -> RepoResult<Post> {
        let result = self.repo.create_post(draft).and_then(|id| {
            self.repo.get_post(id)?.ok_or_else(|| {
                RepoError::InvalidData(format!("created post {id} not found in read-back"))
            })
        });
        match &result {
            Ok(post) => info!(
                "event=post_create module=service status=ok post_id={} category={}",
                post.id, post.category
            ),
            Err(err) => warn!(
                "event=post_create module=service status=error error_code={}",
                err.code()
            ),
        }
        result
    }

    pub fn get_post(&self, id: PostId) -> RepoResult<Option<Post>> {
        self.repo.get_post(id)
    }

    pub fn list_posts(&self, query: &PostListQuery) -> RepoResult<Vec<Post>> {
        self.repo.list_posts(query)
    }

    pub fn retitle_post(&self, id: PostId, title: impl Into<String>) -> RepoResult<Post> {
        self.update_field("post_retitle", id, |post| post.set_title(title))
    }

    pub fn set_post_content(&self, id: PostId, content: impl Into<String>) -> RepoResult<Post> {
        self.update_field("post_set_content", id, |post| post.set_content(content))
    }

    /// Replaces or clears (`None`) the summary.
    pub fn set_post_summary(&self, id: PostId, summary: Option<String>) -> RepoResult<Post> {
        self.update_field("post_set_summary", id, |post| post.set_summary(summary))
    }

    pub fn set_post_category(&self, id: PostId, category: &str) -> RepoResult<Post> {
        self.update_field("post_set_category", id, |post| post.set_category(category))
    }

    pub fn delete_post(&self, id: PostId) -> RepoResult<()> {
        let result = self.repo.delete_post(id);
        match &result {
            Ok(()) => info!("event=post_delete module=service status=ok post_id={id}"),
            Err(err) => warn!(
                "event=post_delete module=service status=error post_id={id} error_code={}",
                err.code()
            ),
        }
        result
    }

    fn update_field<F>(&self, event: &str, id: PostId, apply: F) -> RepoResult<Post>
    where
        F: FnOnce(&mut Post) -> Result<(), ValidationError>,
    {
        let result = self.load(id).and_then(|mut post| {
            apply(&mut post)?;
            self.repo.update_post(&post)?;
            self.load(id)
        });
        match &result {
            Ok(_) => info!("event={event} module=service status=ok post_id={id}"),
            Err(err) => warn!(
                "event={event} module=service status=error post_id={id} error_code={}",
                err.code()
            ),
        }
        result
    }

    fn load(&self, id: PostId) -> RepoResult<Post> {
        self.repo.get_post(id)?.ok_or(RepoError::PostNotFound(id))
    }
}
