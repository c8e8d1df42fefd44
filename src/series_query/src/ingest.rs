//! Loading datapoints from JSON ingest files.
//!
//! The file is a JSON array of records:
//!
//! ```json
//! [{"date": "2016-06-30", "freq": "m", "name": "CPI_ALCOHOL_rog", "value": 100.6}]
//! ```
//!
//! Frequency codes are validated while parsing; an unknown code fails the
//! whole file.

use std::{io::Read, path::Path};

use anyhow::Context;
use diesel::SqliteConnection;
use tracing::info;

use crate::models::Datapoint;
use crate::store::DatapointStore;

/// Parse datapoints from a JSON string.
pub fn read_datapoints_str(json: &str) -> anyhow::Result<Vec<Datapoint>> {
    serde_json::from_str(json).context("failed to parse datapoints JSON")
}

/// Parse datapoints from any reader.
pub fn read_datapoints<R: Read>(reader: R) -> anyhow::Result<Vec<Datapoint>> {
    serde_json::from_reader(reader).context("failed to parse datapoints JSON")
}

/// Read an ingest file from disk.
pub fn read_datapoints_path(path: impl AsRef<Path>) -> anyhow::Result<Vec<Datapoint>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .with_context(|| format!("open ingest file {}", path.display()))?;
    read_datapoints(std::io::BufReader::new(file))
        .with_context(|| format!("read ingest file {}", path.display()))
}

/// Read `path` and upsert every record in one transaction.
///
/// Returns the number of records written.
pub fn ingest_path<S: DatapointStore>(
    store: &S,
    conn: &mut SqliteConnection,
    path: impl AsRef<Path>,
) -> anyhow::Result<usize> {
    let points = read_datapoints_path(path.as_ref())?;
    let n = store.upsert_many(conn, &points)?;
    info!(rows = n, file = %path.as_ref().display(), "ingested datapoints");
    Ok(n)
}
