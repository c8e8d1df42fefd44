//! Query descriptors built from a decomposed custom path.

use chrono::NaiveDate;
use diesel::SqliteConnection;
use tracing::debug;

use crate::error::{QueryError, ValidationError};
use crate::freq::Freq;
use crate::models::Datapoint;
use crate::path::{self, ExtractedAttributes, vocab::Finaliser};
use crate::store::{DatapointStore, known::KnownSeries};

/// What to read from the store: one series at one frequency over a date window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryDescriptor {
    /// Variable name, suffixed with `_{unit}` when a unit was given.
    pub series_name: String,
    /// Validated frequency.
    pub freq: Freq,
    /// Inclusive lower bound.
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper bound.
    pub end_date: Option<NaiveDate>,
}

/// `GDP` + `bln_rub` → `GDP_bln_rub`.
pub fn make_series_name(variable_name: &str, unit: Option<&str>) -> String {
    match unit {
        Some(u) => format!("{variable_name}_{u}"),
        None => variable_name.to_string(),
    }
}

impl QueryDescriptor {
    /// Combine the routed path components with extracted attributes.
    ///
    /// `domain` is reserved and accepted as-is. `variable_name` is not
    /// validated. Fails only on an unknown `freq`.
    pub fn build(
        _domain: &str,
        variable_name: &str,
        freq: &str,
        attrs: &ExtractedAttributes,
    ) -> Result<Self, ValidationError> {
        let freq: Freq = freq.parse()?;
        Ok(Self {
            series_name: make_series_name(variable_name, attrs.unit.as_deref()),
            freq,
            start_date: attrs.start_date,
            end_date: Some(attrs.end_date),
        })
    }

    /// Reject a window that starts after `today` or ends before it starts.
    pub fn check_dates(&self, today: NaiveDate) -> Result<(), ValidationError> {
        let Some(start) = self.start_date else {
            return Ok(());
        };
        if start > today {
            return Err(ValidationError::StartDateInFuture { start, today });
        }
        match self.end_date {
            Some(end) if end < start => Err(ValidationError::EndBeforeStart { start, end }),
            _ => Ok(()),
        }
    }
}

/// A fully parsed `{domain}/series/{varname}/{freq}/{inner_path}` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomQuery {
    /// Reserved domain component ("all", "ru", "oil", ...).
    pub domain: String,
    /// What to select.
    pub descriptor: QueryDescriptor,
    /// Output encoding the caller asked for, if any.
    pub finaliser: Option<Finaliser>,
}

impl CustomQuery {
    /// Parse with an explicit "today" for the default end date.
    ///
    /// Checks run in order: inner path, frequency, then the date window
    /// (see [`QueryDescriptor::check_dates`]).
    pub fn parse_at(
        domain: &str,
        variable_name: &str,
        freq: &str,
        inner_path: &str,
        today: NaiveDate,
    ) -> Result<Self, ValidationError> {
        let attrs = path::parse_inner_path_at(inner_path, today)?;
        let descriptor = QueryDescriptor::build(domain, variable_name, freq, &attrs)?;
        descriptor.check_dates(today)?;
        debug!(
            domain,
            series = %descriptor.series_name,
            freq = %descriptor.freq,
            "parsed custom query"
        );
        Ok(Self {
            domain: domain.to_string(),
            descriptor,
            finaliser: attrs.finaliser,
        })
    }

    /// Parse using the current UTC date as "today".
    pub fn parse(
        domain: &str,
        variable_name: &str,
        freq: &str,
        inner_path: &str,
    ) -> Result<Self, ValidationError> {
        Self::parse_at(
            domain,
            variable_name,
            freq,
            inner_path,
            chrono::Utc::now().date_naive(),
        )
    }

    /// Select the described datapoints.
    ///
    /// A series missing from `known` is a [`ValidationError::UnknownSeries`];
    /// the store is not queried.
    pub fn fetch<S: DatapointStore>(
        &self,
        store: &S,
        conn: &mut SqliteConnection,
        known: &KnownSeries,
    ) -> Result<Vec<Datapoint>, QueryError> {
        let d = &self.descriptor;
        known.check(&d.series_name, d.freq)?;
        Ok(store.select(conn, &d.series_name, d.freq, d.start_date, d.end_date)?)
    }
}
