//! Decompose custom time-series query paths and read/upsert datapoints.
//!
//! A path such as `oil/series/BRENT/m/eop/2015/2017/csv` is split into tokens
//! ([`path`]), validated into a [`query::QueryDescriptor`] and run against a
//! [`store::DatapointStore`] keyed by `(freq, name, date)`.

#![deny(missing_docs)]

pub mod config;
pub mod db;
pub mod error;
pub mod freq;
pub mod ingest;
pub mod models;
pub mod path;
pub mod query;
#[allow(missing_docs)]
pub mod schema;
pub mod store;

pub use error::{QueryError, StoreError, ValidationError};
pub use freq::Freq;
pub use models::Datapoint;
pub use query::{CustomQuery, QueryDescriptor};
pub use store::{DatapointStore, SqliteStore};
