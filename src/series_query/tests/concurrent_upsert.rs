use std::sync::{Arc, Barrier};
use std::thread;

use chrono::NaiveDate;
use series_query::db::connection::connect_sqlite;
use series_query::store::{DatapointStore, SqliteStore};
use series_query::{Datapoint, Freq};

mod common;

const WRITERS: usize = 8;
const ROUNDS: usize = 25;

// Every writer hammers the same (freq, name, date) key from its own connection.
#[test]
fn concurrent_upserts_on_one_key_never_duplicate() {
    let (db, mut conn) = common::setup_db();
    let date = NaiveDate::from_ymd_opt(2016, 4, 21).unwrap();
    let barrier = Arc::new(Barrier::new(WRITERS));

    let handles: Vec<_> = (0..WRITERS)
        .map(|writer| {
            let path = db.path.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let mut conn = connect_sqlite(&path).expect("connect");
                let store = SqliteStore::new();
                barrier.wait();
                for round in 0..ROUNDS {
                    let value = (writer * ROUNDS + round) as f64;
                    let point = Datapoint::new(date, Freq::Quarterly, "CPI_rog", value);
                    store.upsert(&mut conn, &point).expect("upsert");
                }
            })
        })
        .collect();

    for h in handles {
        h.join().expect("writer thread");
    }

    assert_eq!(common::row_count(&mut conn), 1);

    let found = SqliteStore::new()
        .select(&mut conn, "CPI_rog", Freq::Quarterly, Some(date), Some(date))
        .unwrap();
    assert_eq!(found.len(), 1);
    // the surviving value is the last round of some writer
    let last_rounds: Vec<f64> = (0..WRITERS)
        .map(|w| (w * ROUNDS + ROUNDS - 1) as f64)
        .collect();
    assert!(last_rounds.contains(&found[0].value), "{}", found[0].value);
}

#[test]
fn concurrent_batches_on_overlapping_keys() {
    let (db, mut conn) = common::setup_db();
    let fixture = Arc::new(common::fixture());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let path = db.path.clone();
            let points = Arc::clone(&fixture);
            thread::spawn(move || {
                let mut conn = connect_sqlite(&path).expect("connect");
                SqliteStore::new()
                    .upsert_many(&mut conn, &points)
                    .expect("batch")
            })
        })
        .collect();

    for h in handles {
        assert_eq!(h.join().expect("writer thread"), fixture.len());
    }
    assert_eq!(common::row_count(&mut conn), fixture.len() as i64);
}
