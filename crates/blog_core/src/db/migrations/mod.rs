//! Embedded schema registry for the `authors` and `posts` tables.
//!
//! Each entry is one SQL file applied once; the highest applied entry is
//! recorded in `PRAGMA user_version`. Entries are sorted by `version` and
//! versions are never reused.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        sql: include_str!("0001_authors.sql"),
    },
    Migration {
        version: 2,
        sql: include_str!("0002_posts.sql"),
    },
];

/// Newest schema version this build can produce.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Reads the schema version recorded in `PRAGMA user_version`.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get::<_, u32>(0))?)
}

/// Brings `conn` up to [`latest_version`] inside a single transaction.
///
/// A database already ahead of this build is left untouched and reported as
/// [`DbError::UnsupportedSchemaVersion`].
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let from_version = schema_version(conn)?;
    let pending = pending_after(from_version)?;
    let Some(target) = pending.last() else {
        return Ok(());
    };

    let tx = conn.transaction()?;
    for migration in pending {
        tx.execute_batch(migration.sql)?;
        tx.pragma_update(None, "user_version", migration.version)?;
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok from_version={from_version} to_version={} applied={}",
        target.version,
        pending.len()
    );
    Ok(())
}

fn pending_after(version: u32) -> DbResult<&'static [Migration]> {
    let latest = latest_version();
    if version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: version,
            latest_supported: latest,
        });
    }

    let applied = MIGRATIONS.partition_point(|migration| migration.version <= version);
    Ok(&MIGRATIONS[applied..])
}
