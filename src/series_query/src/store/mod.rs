//! Datapoint storage.
//!
//! [`DatapointStore`] is the portable surface; the SQLite implementation lives in
//! [`sqlite`]. Rows are unique on `(freq, name, date)` and [`DatapointStore::upsert`]
//! relies on that constraint: it is one `INSERT .. ON CONFLICT DO UPDATE`
//! statement, so concurrent upserts of one key cannot both insert.
//!
//! A select for a series the store lacks is simply empty. Rejecting such a
//! series as bad input is the query layer's job, using [`known::KnownSeries`].

pub mod known;
pub mod sqlite;

use chrono::NaiveDate;
use diesel::SqliteConnection;

use crate::error::StoreResult;
use crate::freq::Freq;
use crate::models::Datapoint;

pub use sqlite::SqliteStore;

/// Read/write access to persisted datapoints.
pub trait DatapointStore {
    /// All datapoints of series `name` at `freq` with `start <= date <= end`.
    ///
    /// A missing bound is unbounded on that side. An unknown series yields an
    /// empty vector. Results are ordered by date ascending.
    fn select(
        &self,
        conn: &mut SqliteConnection,
        name: &str,
        freq: Freq,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> StoreResult<Vec<Datapoint>>;

    /// Insert `dp`, or replace the value of the row with the same `(freq, name, date)`.
    ///
    /// Returns the row as stored.
    fn upsert(&self, conn: &mut SqliteConnection, dp: &Datapoint) -> StoreResult<Datapoint>;

    /// Upsert a batch inside one immediate transaction; all or nothing.
    ///
    /// Returns the number of rows written.
    fn upsert_many(&self, conn: &mut SqliteConnection, dps: &[Datapoint]) -> StoreResult<usize>;

    /// Sorted distinct series names, optionally only those stored at `freq`.
    fn names(&self, conn: &mut SqliteConnection, freq: Option<Freq>) -> StoreResult<Vec<String>>;

    /// First and last observation dates of a series, `None` if it has no rows.
    fn date_span(
        &self,
        conn: &mut SqliteConnection,
        name: &str,
        freq: Freq,
    ) -> StoreResult<Option<(NaiveDate, NaiveDate)>>;
}
