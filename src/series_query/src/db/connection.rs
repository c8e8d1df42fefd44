//! SQLite connection helpers.
//!
//! Provides [`connect_sqlite`] that opens a connection and applies recommended PRAGMAs:
//! WAL journaling, foreign_keys=ON, and a busy_timeout so that concurrent writers
//! wait for the lock instead of failing with `SQLITE_BUSY`.
//!
//! Example:
//! ```no_run
//! use series_query::db::connection::connect_sqlite;
//!
//! let path = std::env::temp_dir().join("series_query_example.db");
//! let _conn = connect_sqlite(path.to_str().unwrap()).expect("open sqlite");
//! ```

use anyhow::Context;
use diesel::{Connection, RunQueryDsl, SqliteConnection, sql_query};

use super::sqlite_path;

/// Busy timeout applied by [`connect_sqlite`].
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5000;

/// Open a SQLite connection and apply connection-wide PRAGMAs.
pub fn connect_sqlite(database_url: &str) -> anyhow::Result<SqliteConnection> {
    connect_sqlite_with_timeout(database_url, DEFAULT_BUSY_TIMEOUT_MS)
}

/// Like [`connect_sqlite`] with an explicit busy_timeout in milliseconds.
pub fn connect_sqlite_with_timeout(
    database_url: &str,
    busy_timeout_ms: u32,
) -> anyhow::Result<SqliteConnection> {
    let path = sqlite_path(database_url);
    let mut conn = SqliteConnection::establish(path)
        .with_context(|| format!("open sqlite database {path}"))?;

    sql_query("PRAGMA journal_mode=WAL;").execute(&mut conn)?;
    sql_query("PRAGMA foreign_keys=ON;").execute(&mut conn)?;
    sql_query(format!("PRAGMA busy_timeout={busy_timeout_ms};")).execute(&mut conn)?;
    Ok(conn)
}
