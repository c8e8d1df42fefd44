//! Error types.
//!
//! [`ValidationError`] covers every way a client-supplied path or frequency can
//! be rejected. Callers translate it into a client error (HTTP 400 or a CLI
//! usage message). [`StoreError`] is everything that goes wrong below the
//! parsing layer and is passed through unmodified.

use chrono::NaiveDate;
use thiserror::Error;

use crate::freq::Freq;

/// A client-input validation failure raised while parsing a query path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// More than one token matched a single-valued category.
    #[error("ambiguous {category} tokens: {}", .values.join(", "))]
    AmbiguousToken {
        /// Category name, e.g. "finaliser", "rate", "aggregator".
        category: &'static str,
        /// Every allowed value that was found in the path.
        values: Vec<String>,
    },

    /// Both a rate and an aggregator token were present.
    #[error("rate and aggregation are mutually exclusive (got {rate} and {aggregator})")]
    MutuallyExclusiveModifiers {
        /// The rate token found.
        rate: String,
        /// The aggregator token found.
        aggregator: String,
    },

    /// Frequency code is not one of d, w, m, q, a.
    #[error("invalid frequency: <{0}>")]
    InvalidFrequency(String),

    /// A year token does not form a valid calendar date.
    #[error("malformed date from year token: {0}")]
    MalformedDate(String),

    /// More than two year tokens in one path.
    #[error("too many year tokens (at most start and end): {}", .0.join(", "))]
    TooManyYears(Vec<String>),

    /// The store holds no datapoints for this name at this frequency.
    #[error("unknown series {name} at frequency {freq}")]
    UnknownSeries {
        /// Full series name, unit suffix included.
        name: String,
        /// Requested frequency.
        freq: Freq,
    },

    /// The start date lies after the date the query was made.
    #[error("start date {start} is in the future (today is {today})")]
    StartDateInFuture {
        /// Requested start date.
        start: NaiveDate,
        /// Date the query was evaluated against.
        today: NaiveDate,
    },

    /// The end date precedes the start date.
    #[error("end date {end} is before start date {start}")]
    EndBeforeStart {
        /// Requested start date.
        start: NaiveDate,
        /// Requested end date.
        end: NaiveDate,
    },
}

/// Errors raised by [`crate::store::DatapointStore`] implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Any failure reported by the database driver.
    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),

    /// A persisted row carries a frequency code this crate does not know.
    #[error("stored row has unknown frequency code: {0}")]
    UnknownFreq(String),
}

/// Result alias used by the store layer.
pub type StoreResult<T> = Result<T, StoreError>;

/// Failure of [`crate::query::CustomQuery::fetch`]: rejected input or a store error.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The query was rejected before reaching the store.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The store failed while selecting.
    #[error(transparent)]
    Store(#[from] StoreError),
}
