//! SQLite plumbing.
//!
//! - Connections: [`connection::connect_sqlite`] applies WAL, foreign_keys=ON, and a busy_timeout
//!   (5000ms unless configured otherwise through [`connection::connect_sqlite_with_timeout`]).
//! - The embedded `datapoints` migrations: [`migrate::run_sqlite`].
//!
//! Both accept a bare file path, `:memory:`, or a `sqlite://`/`sqlite:` prefixed URL
//! (see [`sqlite_path`]).
//!
//! Example:
//! ```no_run
//! use series_query::db::{migrate, connection};
//!
//! let db_path = std::env::temp_dir().join("series_query_example.db");
//! migrate::run_sqlite(db_path.to_str().unwrap()).expect("migrations");
//!
//! let _conn = connection::connect_sqlite(db_path.to_str().unwrap()).expect("connect");
//! ```

pub mod connection;
pub mod migrate;

/// Strip an optional `sqlite://` or `sqlite:` scheme so Diesel gets a plain path.
pub fn sqlite_path(database_url: &str) -> &str {
    database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))
        .unwrap_or(database_url)
}
