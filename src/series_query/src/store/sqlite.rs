//! SQLite implementation of [`DatapointStore`].

use chrono::NaiveDate;
use diesel::dsl::{max, min};
use diesel::prelude::*;
use diesel::upsert::excluded;
use tracing::{debug, info};

use crate::{
    error::{StoreError, StoreResult},
    freq::{Freq, db as freq_db},
    models::{Datapoint, DatapointRow, NewDatapointRow},
    schema::datapoints,
    store::DatapointStore,
};

use crate::schema::datapoints::dsl as dp;

/// [`DatapointStore`] backed by the `datapoints` table in SQLite.
#[derive(Debug, Default, Clone, Copy)]
pub struct SqliteStore;

impl SqliteStore {
    /// Create a new store handle. The connection is passed per call.
    pub fn new() -> Self {
        Self
    }
}

fn upsert_one(conn: &mut SqliteConnection, point: &Datapoint) -> StoreResult<Datapoint> {
    let row = NewDatapointRow::from(point);

    // Insert .. ON CONFLICT (freq, name, date) DO UPDATE .. RETURNING (Sqlite 3.35+)
    let stored: DatapointRow = diesel::insert_into(datapoints::table)
        .values(&row)
        .on_conflict((dp::freq, dp::name, dp::date))
        .do_update()
        .set(dp::value.eq(excluded(dp::value)))
        .returning(DatapointRow::as_returning())
        .get_result(conn)?;

    Datapoint::try_from(stored)
}

impl DatapointStore for SqliteStore {
    fn select(
        &self,
        conn: &mut SqliteConnection,
        name: &str,
        freq: Freq,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> StoreResult<Vec<Datapoint>> {
        let mut query = dp::datapoints
            .select(DatapointRow::as_select())
            .filter(dp::name.eq(name))
            .filter(dp::freq.eq(freq_db::to_db_str(freq)))
            .into_boxed();

        if let Some(start) = start {
            query = query.filter(dp::date.ge(start));
        }
        if let Some(end) = end {
            query = query.filter(dp::date.le(end));
        }

        let rows: Vec<DatapointRow> = query.order(dp::date.asc()).load(conn)?;
        debug!(name, %freq, ?start, ?end, rows = rows.len(), "select datapoints");

        rows.into_iter().map(Datapoint::try_from).collect()
    }

    fn upsert(&self, conn: &mut SqliteConnection, point: &Datapoint) -> StoreResult<Datapoint> {
        let stored = upsert_one(conn, point)?;
        debug!(name = %stored.name, freq = %stored.freq, date = %stored.date, "upsert datapoint");
        Ok(stored)
    }

    fn upsert_many(&self, conn: &mut SqliteConnection, points: &[Datapoint]) -> StoreResult<usize> {
        let written = conn.immediate_transaction::<_, StoreError, _>(|conn| {
            for point in points {
                upsert_one(conn, point)?;
            }
            Ok(points.len())
        })?;
        info!(rows = written, "upserted datapoint batch");
        Ok(written)
    }

    fn names(&self, conn: &mut SqliteConnection, freq: Option<Freq>) -> StoreResult<Vec<String>> {
        let mut query = dp::datapoints.select(dp::name).distinct().into_boxed();
        if let Some(freq) = freq {
            query = query.filter(dp::freq.eq(freq_db::to_db_str(freq)));
        }
        Ok(query.order(dp::name.asc()).load(conn)?)
    }

    fn date_span(
        &self,
        conn: &mut SqliteConnection,
        name: &str,
        freq: Freq,
    ) -> StoreResult<Option<(NaiveDate, NaiveDate)>> {
        let (first, last): (Option<NaiveDate>, Option<NaiveDate>) = dp::datapoints
            .filter(dp::name.eq(name))
            .filter(dp::freq.eq(freq_db::to_db_str(freq)))
            .select((min(dp::date), max(dp::date)))
            .first(conn)?;

        Ok(first.zip(last))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    use crate::db::{connection::connect_sqlite, migrate};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn temp_conn() -> (NamedTempFile, SqliteConnection) {
        let tmp = NamedTempFile::new().unwrap();
        let path = tmp.path().to_string_lossy().to_string();
        migrate::run_sqlite(&path).unwrap();
        let conn = connect_sqlite(&path).unwrap();
        (tmp, conn)
    }

    #[test]
    fn upsert_returns_stored_row() {
        let (_tmp, mut conn) = temp_conn();
        let store = SqliteStore::new();
        let point = Datapoint::new(ymd(2016, 6, 30), Freq::Monthly, "CPI_ALCOHOL_rog", 100.6);
        let stored = store.upsert(&mut conn, &point).unwrap();
        assert_eq!(stored, point);
    }

    #[test]
    fn select_orders_by_date_and_respects_bounds() {
        let (_tmp, mut conn) = temp_conn();
        let store = SqliteStore::new();
        for (m, v) in [(9, 3.0), (7, 1.0), (8, 2.0)] {
            let d = Datapoint::new(ymd(2016, m, 1), Freq::Monthly, "X", v);
            store.upsert(&mut conn, &d).unwrap();
        }

        let all = store.select(&mut conn, "X", Freq::Monthly, None, None).unwrap();
        let values: Vec<f64> = all.iter().map(|d| d.value).collect();
        assert_eq!(values, [1.0, 2.0, 3.0]);

        let from_aug = store
            .select(&mut conn, "X", Freq::Monthly, Some(ymd(2016, 8, 1)), None)
            .unwrap();
        assert_eq!(from_aug.len(), 2);

        let until_aug = store
            .select(&mut conn, "X", Freq::Monthly, None, Some(ymd(2016, 8, 1)))
            .unwrap();
        assert_eq!(until_aug.len(), 2);

        let other_freq = store.select(&mut conn, "X", Freq::Quarterly, None, None).unwrap();
        assert!(other_freq.is_empty());
    }

    #[test]
    fn date_span_of_missing_series_is_none() {
        let (_tmp, mut conn) = temp_conn();
        let store = SqliteStore::new();
        assert_eq!(store.date_span(&mut conn, "NOPE", Freq::Annual).unwrap(), None);
    }
}
