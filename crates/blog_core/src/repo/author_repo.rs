//! Author repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over the `authors` table.
//! - Supply the current name snapshot used by uniqueness validation.
//!
//! # Invariants
//! - Create validates the draft against every stored name.
//! - Update validates the record against every stored name except its own.
//! - A `UNIQUE` violation from SQLite is reported as `DuplicateName`, so a
//!   write that raced past the snapshot check still cannot persist.
//! - Read paths reject invalid persisted rows instead of masking them.

use crate::model::author::{validate_name, Author, AuthorId, NewAuthor};
use crate::model::validation::ValidationError;
use crate::repo::{ensure_table, is_unique_violation, normalize_list_limit, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};
use std::collections::HashSet;

const AUTHOR_SELECT_SQL: &str = "SELECT
    id,
    name,
    phone_number,
    created_at,
    updated_at
FROM authors";

/// Pagination options for listing authors (ordered by id).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorListQuery {
    /// Defaults to `DEFAULT_LIST_LIMIT`, clamped to `MAX_LIST_LIMIT`.
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Repository interface for author CRUD operations.
pub trait AuthorRepository {
    fn create_author(&self, author: &NewAuthor) -> RepoResult<AuthorId>;
    fn get_author(&self, id: AuthorId) -> RepoResult<Option<Author>>;
    fn list_authors(&self, query: &AuthorListQuery) -> RepoResult<Vec<Author>>;
    /// Snapshot of every stored author name.
    fn list_author_names(&self) -> RepoResult<HashSet<String>>;
    fn count_authors(&self) -> RepoResult<u64>;
    /// Persists `name`/`phone_number` of an existing author and stamps
    /// `updated_at`.
    fn update_author(&self, author: &Author) -> RepoResult<()>;
    fn delete_author(&self, id: AuthorId) -> RepoResult<()>;
}

/// SQLite-backed author repository.
pub struct SqliteAuthorRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAuthorRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table(conn, "authors")?;
        Ok(Self { conn })
    }

    /// Names of all authors other than `id`; the snapshot used on rename.
    pub fn list_other_author_names(&self, id: AuthorId) -> RepoResult<HashSet<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM authors WHERE id != ?1;")?;
        let names = stmt
            .query_map([id], |row| row.get::<_, String>(0))?
            .collect::<Result<HashSet<_>, _>>()?;
        Ok(names)
    }

    fn author_exists(&self, id: AuthorId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM authors WHERE id = ?1);",
            [id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }
}

impl AuthorRepository for SqliteAuthorRepository<'_> {
    fn create_author(&self, author: &NewAuthor) -> RepoResult<AuthorId> {
        let current_names = self.list_author_names()?;
        author.validate(&current_names)?;

        self.conn
            .execute(
                "INSERT INTO authors (name, phone_number) VALUES (?1, ?2);",
                params![author.name.as_str(), author.phone_number.as_deref()],
            )
            .map_err(|err| map_name_conflict(err, &author.name))?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_author(&self, id: AuthorId) -> RepoResult<Option<Author>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{AUTHOR_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_author_row(row)?));
        }

        Ok(None)
    }

    fn list_authors(&self, query: &AuthorListQuery) -> RepoResult<Vec<Author>> {
        let limit = normalize_list_limit(query.limit);
        let mut stmt = self.conn.prepare(&format!(
            "{AUTHOR_SELECT_SQL} ORDER BY id ASC LIMIT ?1 OFFSET ?2;"
        ))?;
        let mut rows = stmt.query(params![i64::from(limit), i64::from(query.offset)])?;
        let mut authors = Vec::new();

        while let Some(row) = rows.next()? {
            authors.push(parse_author_row(row)?);
        }

        Ok(authors)
    }

    fn list_author_names(&self) -> RepoResult<HashSet<String>> {
        let mut stmt = self.conn.prepare("SELECT name FROM authors;")?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<HashSet<_>, _>>()?;
        Ok(names)
    }

    fn count_authors(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM authors;", [], |row| row.get(0))?;
        Ok(count.unsigned_abs())
    }

    fn update_author(&self, author: &Author) -> RepoResult<()> {
        if !self.author_exists(author.id)? {
            return Err(RepoError::AuthorNotFound(author.id));
        }

        author.validate_fields()?;
        let other_names = self.list_other_author_names(author.id)?;
        validate_name(&other_names, &author.name)?;

        let changed = self
            .conn
            .execute(
                "UPDATE authors
                 SET
                    name = ?1,
                    phone_number = ?2,
                    updated_at = (CAST(strftime('%s', 'now') AS INTEGER) * 1000)
                 WHERE id = ?3;",
                params![author.name.as_str(), author.phone_number.as_deref(), author.id],
            )
            .map_err(|err| map_name_conflict(err, &author.name))?;

        if changed == 0 {
            return Err(RepoError::AuthorNotFound(author.id));
        }

        Ok(())
    }

    fn delete_author(&self, id: AuthorId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM authors WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::AuthorNotFound(id));
        }

        Ok(())
    }
}

fn map_name_conflict(err: rusqlite::Error, name: &str) -> RepoError {
    if is_unique_violation(&err) {
        RepoError::Validation(ValidationError::DuplicateName(name.to_string()))
    } else {
        err.into()
    }
}

fn parse_author_row(row: &Row<'_>) -> RepoResult<Author> {
    let author = Author {
        id: row.get("id")?,
        name: row.get("name")?,
        phone_number: row.get("phone_number")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    };

    author.validate_fields().map_err(|err| {
        RepoError::InvalidData(format!(
            "author {} violates `{}` in authors.{}",
            author.id,
            err.code(),
            err.field()
        ))
    })?;
    Ok(author)
}
