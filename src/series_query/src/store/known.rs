//! Which `(name, freq)` series the store currently holds.
//!
//! A query for a series the store has never seen is rejected up front with
//! [`ValidationError::UnknownSeries`] instead of running a select that can only
//! come back empty. [`KnownSeries`] answers that from memory: it is loaded from
//! `datapoints` once and reloaded after ingest, never per lookup.
//!
//! Lookups read an immutable snapshot through `ArcSwap`, so a reload running on
//! another thread never blocks them; each lookup sees either the old or the new
//! set of series.

use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use arc_swap::ArcSwap;
use diesel::prelude::*;
use once_cell::sync::Lazy;
use tracing::debug;

use crate::error::{StoreResult, ValidationError};
use crate::freq::{Freq, db as freq_db};
use crate::schema::datapoints::dsl as dp;

/// Series names grouped by frequency.
type NamesByFreq = HashMap<Freq, HashSet<String>>;

/// In-memory index of the series present in the store.
#[derive(Debug)]
pub struct KnownSeries {
    snapshot: ArcSwap<NamesByFreq>,
}

impl Default for KnownSeries {
    fn default() -> Self {
        Self::new()
    }
}

impl KnownSeries {
    /// An empty index; every series is unknown until [`KnownSeries::reload`].
    pub fn new() -> Self {
        Self {
            snapshot: ArcSwap::from_pointee(NamesByFreq::new()),
        }
    }

    /// Build an index from the current contents of `datapoints`.
    pub fn load(conn: &mut SqliteConnection) -> StoreResult<Self> {
        let known = Self::new();
        known.reload(conn)?;
        Ok(known)
    }

    /// Re-read the distinct `(name, freq)` pairs and swap them in.
    ///
    /// Returns the number of series now known.
    pub fn reload(&self, conn: &mut SqliteConnection) -> StoreResult<usize> {
        let pairs: Vec<(String, String)> = dp::datapoints
            .select((dp::name, dp::freq))
            .distinct()
            .load(conn)?;

        let mut by_freq = NamesByFreq::new();
        for (name, code) in pairs {
            let freq = freq_db::from_db_str(&code)?;
            by_freq.entry(freq).or_default().insert(name);
        }

        let series = by_freq.values().map(HashSet::len).sum();
        self.snapshot.store(Arc::new(by_freq));
        debug!(series, "reloaded known series");
        Ok(series)
    }

    /// `true` if `name` has datapoints at `freq` as of the last reload.
    pub fn contains(&self, name: &str, freq: Freq) -> bool {
        self.snapshot
            .load()
            .get(&freq)
            .is_some_and(|names| names.contains(name))
    }

    /// Reject a series absent from the index.
    pub fn check(&self, name: &str, freq: Freq) -> Result<(), ValidationError> {
        if self.contains(name, freq) {
            Ok(())
        } else {
            Err(ValidationError::UnknownSeries {
                name: name.to_string(),
                freq,
            })
        }
    }

    /// Number of known series across all frequencies.
    pub fn len(&self) -> usize {
        self.snapshot.load().values().map(HashSet::len).sum()
    }

    /// `true` before the first reload or when the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

static SHARED: Lazy<KnownSeries> = Lazy::new(KnownSeries::new);

/// Process-wide index for callers that serve many queries from one store.
pub fn shared() -> &'static KnownSeries {
    &SHARED
}
