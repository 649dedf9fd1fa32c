//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `blog_core` linkage and schema.
//! - Keep output deterministic for quick local sanity checks.
//!
//! Usage: `blog_cli [DB_PATH]`. Without a path an in-memory database is used.

use blog_core::db::{open_db, open_db_in_memory, schema_version};
use blog_core::{AuthorRepository, PostRepository, SqliteAuthorRepository, SqlitePostRepository};
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run(std::env::args().nth(1)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("blog_cli error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(db_path: Option<String>) -> Result<(), Box<dyn Error>> {
    let conn = match db_path.as_deref() {
        Some(path) => open_db(path)?,
        None => open_db_in_memory()?,
    };

    let authors = SqliteAuthorRepository::try_new(&conn)?;
    let posts = SqlitePostRepository::try_new(&conn)?;

    println!("blog_core version={}", blog_core::core_version());
    println!("blog_core schema_version={}", schema_version(&conn)?);
    println!("blog_core authors={}", authors.count_authors()?);
    println!("blog_core posts={}", posts.count_posts()?);
    Ok(())
}
