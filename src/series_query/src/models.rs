//! Datapoint types.
//!
//! [`Datapoint`] is the domain value handed in and out of the store and read
//! from ingest files. [`DatapointRow`] and [`NewDatapointRow`] mirror
//! [`crate::schema::datapoints`] for Diesel's Selectable/Insertable APIs; the
//! `freq` column is TEXT holding the one-letter code.

use chrono::NaiveDate;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::freq::{self, Freq};
use crate::schema::datapoints;

/// One observation of a named series at a frequency and date.
///
/// `(freq, name, date)` is the natural key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Datapoint {
    /// Observation date (period end by convention, e.g. 2016-06-30 for June).
    pub date: NaiveDate,
    /// Sampling frequency.
    pub freq: Freq,
    /// Series name, e.g. "CPI_NONFOOD_rog".
    pub name: String,
    /// Observed value.
    pub value: f64,
}

impl Datapoint {
    /// Convenience constructor.
    pub fn new(date: NaiveDate, freq: Freq, name: impl Into<String>, value: f64) -> Self {
        Self {
            date,
            freq,
            name: name.into(),
            value,
        }
    }
}

/// A row read back from [`crate::schema::datapoints`] (surrogate `id` omitted).
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = datapoints, check_for_backend(diesel::sqlite::Sqlite))]
pub struct DatapointRow {
    /// Observation date.
    pub date: NaiveDate,
    /// One-letter frequency code.
    pub freq: String,
    /// Series name.
    pub name: String,
    /// Observed value.
    pub value: f64,
}

impl TryFrom<DatapointRow> for Datapoint {
    type Error = StoreError;

    fn try_from(row: DatapointRow) -> Result<Self, Self::Error> {
        Ok(Datapoint {
            date: row.date,
            freq: freq::db::from_db_str(&row.freq)?,
            name: row.name,
            value: row.value,
        })
    }
}

/// Insertable form of [`Datapoint`].
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = datapoints)]
pub struct NewDatapointRow<'a> {
    /// Observation date.
    pub date: NaiveDate,
    /// One-letter frequency code.
    pub freq: &'a str,
    /// Series name.
    pub name: &'a str,
    /// Observed value.
    pub value: f64,
}

impl<'a> From<&'a Datapoint> for NewDatapointRow<'a> {
    fn from(dp: &'a Datapoint) -> Self {
        Self {
            date: dp.date,
            freq: freq::db::to_db_str(dp.freq),
            name: &dp.name,
            value: dp.value,
        }
    }
}
