#![allow(dead_code)]

use diesel::QueryableByName;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Integer, Text};
use series_query::db::{connection, migrate};
use series_query::ingest;
use series_query::models::Datapoint;
use series_query::store::{DatapointStore, SqliteStore};
use std::path::PathBuf;
use tempfile::TempDir;

#[derive(QueryableByName)]
struct JournalMode {
    #[diesel(sql_type = Text)]
    journal_mode: String,
}
#[derive(QueryableByName)]
struct BusyTimeout {
    #[diesel(sql_type = Integer, column_name = "timeout")]
    busy_timeout: i32,
}
#[derive(QueryableByName)]
struct Cnt {
    #[diesel(sql_type = BigInt)]
    n: i64,
}

pub struct TestDb {
    _dir: TempDir,    // keep alive for the life of the test
    pub path: String, // <tmpdir>/test.db
}

pub fn setup_db() -> (TestDb, SqliteConnection) {
    let dir = TempDir::new().expect("tempdir");
    let mut p = PathBuf::from(dir.path());
    p.push("test.db");
    let path = p.to_string_lossy().to_string();

    migrate::run_sqlite(&path).expect("migrations");

    let conn = connection::connect_sqlite(&path).expect("connect");
    (TestDb { _dir: dir, path }, conn)
}

pub fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/datapoints_2016H2.json")
}

pub fn fixture() -> Vec<Datapoint> {
    ingest::read_datapoints_path(fixture_path()).expect("fixture")
}

/// Migrated database preloaded with the fixture file.
pub fn setup_seeded_db() -> (TestDb, SqliteConnection) {
    let (db, mut conn) = setup_db();
    SqliteStore::new()
        .upsert_many(&mut conn, &fixture())
        .expect("seed fixture");
    (db, conn)
}

pub fn row_count(conn: &mut SqliteConnection) -> i64 {
    let c: Cnt = diesel::sql_query("SELECT COUNT(*) AS n FROM datapoints;")
        .get_result(conn)
        .unwrap();
    c.n
}

pub fn assert_sqlite_pragmas(conn: &mut SqliteConnection) {
    use diesel::sql_query;

    let jm: JournalMode = sql_query("PRAGMA journal_mode;").get_result(conn).unwrap();
    assert_eq!(jm.journal_mode.to_lowercase(), "wal"); // WAL is persistent per DB file

    let bt: BusyTimeout = sql_query("PRAGMA busy_timeout;").get_result(conn).unwrap();
    assert_eq!(bt.busy_timeout, 5000);
}
