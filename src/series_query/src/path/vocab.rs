//! Closed token vocabularies recognised in a query path.
//!
//! Each single-valued category (finaliser, rate, aggregator) is an enum that
//! implements [`Vocabulary`]. The extractor matches tokens against
//! [`Vocabulary::ALL`] generically, so adding a value means adding a variant.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A closed set of path tokens, one enum variant per allowed value.
pub trait Vocabulary: Copy + Eq + fmt::Debug + 'static {
    /// Category name used in error messages.
    const CATEGORY: &'static str;

    /// Every allowed value, in canonical order.
    const ALL: &'static [Self];

    /// The token text for this value.
    fn as_str(self) -> &'static str;

    /// Look up the value spelled exactly as `token`.
    fn from_token(token: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.as_str() == token)
    }
}

/// Requested output encoding for a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Finaliser {
    /// Comma-separated values.
    Csv,
    /// A JSON list of datapoint objects.
    Json,
}

/// Transform of a real variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rate {
    /// Change to previous period.
    Rog,
    /// Change to same period a year ago.
    Yoy,
    /// Base index.
    Base,
}

/// Period aggregation command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregator {
    /// End of period value.
    Eop,
    /// Period average.
    Avg,
}

impl Vocabulary for Finaliser {
    const CATEGORY: &'static str = "finaliser";
    const ALL: &'static [Self] = &[Finaliser::Csv, Finaliser::Json];

    fn as_str(self) -> &'static str {
        match self {
            Finaliser::Csv => "csv",
            Finaliser::Json => "json",
        }
    }
}

impl Vocabulary for Rate {
    const CATEGORY: &'static str = "rate";
    const ALL: &'static [Self] = &[Rate::Rog, Rate::Yoy, Rate::Base];

    fn as_str(self) -> &'static str {
        match self {
            Rate::Rog => "rog",
            Rate::Yoy => "yoy",
            Rate::Base => "base",
        }
    }
}

impl Vocabulary for Aggregator {
    const CATEGORY: &'static str = "aggregator";
    const ALL: &'static [Self] = &[Aggregator::Eop, Aggregator::Avg];

    fn as_str(self) -> &'static str {
        match self {
            Aggregator::Eop => "eop",
            Aggregator::Avg => "avg",
        }
    }
}

impl fmt::Display for Finaliser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Aggregator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
