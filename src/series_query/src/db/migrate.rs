//! Embedded schema migrations.

use anyhow::anyhow;
use diesel::{Connection, SqliteConnection, connection::SimpleConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

use super::sqlite_path;

/// The `datapoints` schema, compiled into the binary from `migrations/`.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Switch the database at `url` to WAL and apply every pending migration.
///
/// Returns how many migrations ran; zero on an up-to-date database.
pub fn run_sqlite(url: &str) -> anyhow::Result<usize> {
    let mut conn = SqliteConnection::establish(sqlite_path(url))?;
    conn.batch_execute("PRAGMA journal_mode=WAL;")?;
    run_on(&mut conn)
}

/// Runs pending migrations on an already open connection.
pub fn run_on(conn: &mut SqliteConnection) -> anyhow::Result<usize> {
    let applied = conn.run_pending_migrations(MIGRATIONS).map_err(|e| anyhow!(e))?;
    if !applied.is_empty() {
        info!(count = applied.len(), "applied migrations");
    }
    Ok(applied.len())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn migrations_apply_on_temp_file() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        let path = temp.path().to_string_lossy().to_string();

        let n = run_sqlite(&path).expect("migration run");
        assert_eq!(n, 1);
        // second run is a no-op
        assert_eq!(run_sqlite(&path).expect("rerun"), 0);

        let mut conn = SqliteConnection::establish(&path).unwrap();
        conn.batch_execute(
            "INSERT INTO datapoints (date, freq, name, value) VALUES ('2016-06-30', 'm', 'CPI_rog', 100.6)",
        )
        .unwrap();
    }

    #[test]
    fn schema_rejects_unknown_freq_and_duplicate_keys() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        let path = temp.path().to_string_lossy().to_string();
        run_sqlite(&path).unwrap();
        let mut conn = SqliteConnection::establish(&path).unwrap();

        let bad_freq = conn.batch_execute(
            "INSERT INTO datapoints (date, freq, name, value) VALUES ('2016-06-30', 'x', 'A', 1.0)",
        );
        assert!(bad_freq.is_err());

        let insert = "INSERT INTO datapoints (date, freq, name, value) VALUES ('2016-06-30', 'm', 'A', 1.0)";
        conn.batch_execute(insert).unwrap();
        assert!(conn.batch_execute(insert).is_err());
    }
}
