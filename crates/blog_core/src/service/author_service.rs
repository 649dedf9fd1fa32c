//! Author use-case service.
//!
//! # Responsibility
//! - Provide create/get/list/delete entry points for API-layer callers.
//! - Provide field-level updates that load, validate-and-set, then persist.
//!
//! # Invariants
//! - Service APIs never bypass repository validation.
//! - Rename checks uniqueness against every other author's name.
//! - Log events carry ids and error codes only, never names or numbers.

use crate::model::author::{Author, AuthorId, NewAuthor};
use crate::repo::author_repo::{AuthorListQuery, AuthorRepository};
use crate::repo::{RepoError, RepoResult};
use log::{info, warn};

/// Use-case service wrapper for author operations.
pub struct AuthorService<R: AuthorRepository> {
    repo: R,
}

impl<R: AuthorRepository> AuthorService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates and stores a new author, returning the stored record.
    pub fn create_author(&self, draft: &NewAuthor) -> RepoResult<Author> {
        let result = self.repo.create_author(draft).and_then(|id| {
            self.repo.get_author(id)?.ok_or_else(|| {
                RepoError::InvalidData(format!("created author {id} not found in read-back"))
            })
        });
        match &result {
            Ok(author) => info!(
                "event=author_create module=service status=ok author_id={}",
                author.id
            ),
            Err(err) => warn!(
                "event=author_create module=service status=error error_code={}",
                err.code()
            ),
        }
        result
    }

    pub fn get_author(&self, id: AuthorId) -> RepoResult<Option<Author>> {
        self.repo.get_author(id)
    }

    pub fn list_authors(&self, query: &AuthorListQuery) -> RepoResult<Vec<Author>> {
        self.repo.list_authors(query)
    }

    /// Replaces the author's name.
    ///
    /// Renaming an author to its current name is accepted.
    pub fn rename_author(&self, id: AuthorId, name: impl Into<String>) -> RepoResult<Author> {
        let result = self.load(id).and_then(|mut author| {
            let mut other_names = self.repo.list_author_names()?;
            other_names.remove(&author.name);
            author.set_name(&other_names, name)?;
            self.repo.update_author(&author)?;
            self.load(id)
        });
        log_update("author_rename", id, &result);
        result
    }

    /// Replaces or clears (`None`) the author's phone number.
    pub fn set_author_phone_number(
        &self,
        id: AuthorId,
        phone_number: Option<String>,
    ) -> RepoResult<Author> {
        let result = self.load(id).and_then(|mut author| {
            author.set_phone_number(phone_number)?;
            self.repo.update_author(&author)?;
            self.load(id)
        });
        log_update("author_set_phone", id, &result);
        result
    }

    pub fn delete_author(&self, id: AuthorId) -> RepoResult<()> {
        let result = self.repo.delete_author(id);
        match &result {
            Ok(()) => info!("event=author_delete module=service status=ok author_id={id}"),
            Err(err) => warn!(
                "event=author_delete module=service status=error author_id={id} error_code={}",
                err.code()
            ),
        }
        result
    }

    fn load(&self, id: AuthorId) -> RepoResult<Author> {
        self.repo
            .get_author(id)?
            .ok_or(RepoError::AuthorNotFound(id))
    }
}

fn log_update(event: &str, id: AuthorId, result: &RepoResult<Author>) {
    match result {
        Ok(_) => info!("event={event} module=service status=ok author_id={id}"),
        Err(err) => warn!(
            "event={event} module=service status=error author_id={id} error_code={}",
            err.code()
        ),
    }
}
