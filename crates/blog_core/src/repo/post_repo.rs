//! Post repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over the `posts` table.
//!
//! # Invariants
//! - Write paths run every post validator before SQL mutations.
//! - Updating a missing post reports `PostNotFound` before any validation.
//! - List order is `created_at DESC, id DESC` (newest first).
//! - Read paths reject invalid persisted rows instead of masking them.

use crate::model::post::{Category, NewPost, Post, PostId};
use crate::repo::{ensure_table, normalize_list_limit, RepoError, RepoResult};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const POST_SELECT_SQL: &str = "SELECT
    id,
    title,
    content,
    category,
    summary,
    created_at,
    updated_at
FROM posts";

/// Filter and pagination options for listing posts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostListQuery {
    pub category: Option<Category>,
    /// Defaults to `DEFAULT_LIST_LIMIT`, clamped to `MAX_LIST_LIMIT`.
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Repository interface for post CRUD operations.
pub trait PostRepository {
    fn create_post(&self, post: &NewPost) -> RepoResult<PostId>;
    fn get_post(&self, id: PostId) -> RepoResult<Option<Post>>;
    fn list_posts(&self, query: &PostListQuery) -> RepoResult<Vec<Post>>;
    /// Total number of stored posts, ignoring pagination.
    fn count_posts(&self) -> RepoResult<u64>;
    /// Persists all mutable fields of an existing post and stamps
    /// `updated_at`.
    fn update_post(&self, post: &Post) -> RepoResult<()>;
    fn delete_post(&self, id: PostId) -> RepoResult<()>;
}

/// SQLite-backed post repository.
pub struct SqlitePostRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePostRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table(conn, "posts")?;
        Ok(Self { conn })
    }

    fn post_exists(&self, id: PostId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM posts WHERE id = ?1);",
            [id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }
}

impl PostRepository for SqlitePostRepository<'_> {
    fn create_post(&self, post: &NewPost) -> RepoResult<PostId> {
        let category = post.validate()?;

        self.conn.execute(
            "INSERT INTO posts (title, content, category, summary)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                post.title.as_str(),
                post.content.as_str(),
                category.as_str(),
                post.summary.as_deref(),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_post(&self, id: PostId) -> RepoResult<Option<Post>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{POST_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_post_row(row)?));
        }

        Ok(None)
    }

    fn list_posts(&self, query: &PostListQuery) -> RepoResult<Vec<Post>> {
        let mut sql = format!("{POST_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(category) = query.category {
            sql.push_str(" AND category = ?");
            bind_values.push(Value::Text(category.as_str().to_string()));
        }

        sql.push_str(" ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?");
        bind_values.push(Value::Integer(i64::from(normalize_list_limit(query.limit))));
        bind_values.push(Value::Integer(i64::from(query.offset)));

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut posts = Vec::new();

        while let Some(row) = rows.next()? {
            posts.push(parse_post_row(row)?);
        }

        Ok(posts)
    }

    fn count_posts(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM posts;", [], |row| row.get(0))?;
        Ok(count.unsigned_abs())
    }

    fn update_post(&self, post: &Post) -> RepoResult<()> {
        if !self.post_exists(post.id)? {
            return Err(RepoError::PostNotFound(post.id));
        }

        post.validate()?;

        let changed = self.conn.execute(
            "UPDATE posts
             SET
                title = ?1,
                content = ?2,
                category = ?3,
                summary = ?4,
                updated_at = (CAST(strftime('%s', 'now') AS INTEGER) * 1000)
             WHERE id = ?5;",
            params![
                post.title.as_str(),
                post.content.as_str(),
                post.category.as_str(),
                post.summary.as_deref(),
                post.id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::PostNotFound(post.id));
        }

        Ok(())
    }

    fn delete_post(&self, id: PostId) -> RepoResult<()> {
        let changed = self.conn.execute("DELETE FROM posts WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::PostNotFound(id));
        }

        Ok(())
    }
}

fn parse_post_row(row: &Row<'_>) -> RepoResult<Post> {
    let id: PostId = row.get("id")?;
    let category_text: String = row.get("category")?;
    let category = Category::parse(&category_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid category `{category_text}` in posts.category (post {id})"
        ))
    })?;

    let post = Post {
        id,
        title: row.get("title")?,
        content: row.get("content")?,
        summary: row.get("summary")?,
        category,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    };

    post.validate().map_err(|err| {
        RepoError::InvalidData(format!(
            "post {id} violates `{}` in posts.{}",
            err.code(),
            err.field()
        ))
    })?;
    Ok(post)
}
