//! Sampling frequency of a stored series.
//!
//! A [`Freq`] is one of the five one-letter codes accepted in a query path and
//! stored in the `datapoints.freq` column: `d` (daily), `w` (weekly),
//! `m` (monthly), `q` (quarterly), `a` (annual).
//!
//! ```
//! use series_query::freq::Freq;
//!
//! let f: Freq = "q".parse().unwrap();
//! assert_eq!(f, Freq::Quarterly);
//! assert_eq!(f.to_string(), "q");
//! assert!("x".parse::<Freq>().is_err());
//! ```

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::path::vocab::Vocabulary;

/// Sampling cadence code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Freq {
    /// `d`
    #[serde(rename = "d")]
    Daily,
    /// `w`
    #[serde(rename = "w")]
    Weekly,
    /// `m`
    #[serde(rename = "m")]
    Monthly,
    /// `q`
    #[serde(rename = "q")]
    Quarterly,
    /// `a`
    #[serde(rename = "a")]
    Annual,
}

impl Freq {
    /// The one-letter code used in paths and in the database.
    pub const fn code(self) -> &'static str {
        match self {
            Freq::Daily => "d",
            Freq::Weekly => "w",
            Freq::Monthly => "m",
            Freq::Quarterly => "q",
            Freq::Annual => "a",
        }
    }
}

impl Vocabulary for Freq {
    const CATEGORY: &'static str = "frequency";
    const ALL: &'static [Self] = &[
        Freq::Daily,
        Freq::Weekly,
        Freq::Monthly,
        Freq::Quarterly,
        Freq::Annual,
    ];

    fn as_str(self) -> &'static str {
        self.code()
    }
}

/// DB round-trip helpers for the `freq` TEXT column.
pub mod db {
    use super::*;
    use crate::error::StoreError;

    /// Column value for `freq`.
    pub fn to_db_str(freq: Freq) -> &'static str {
        freq.code()
    }

    /// Parse a stored `freq` column value.
    pub fn from_db_str(s: &str) -> Result<Freq, StoreError> {
        Freq::from_token(s).ok_or_else(|| StoreError::UnknownFreq(s.to_string()))
    }
}

impl fmt::Display for Freq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Freq {
    type Err = ValidationError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Freq::from_token(s).ok_or_else(|| ValidationError::InvalidFrequency(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_codes() {
        for code in ["d", "w", "m", "q", "a"] {
            let f: Freq = code.parse().unwrap();
            assert_eq!(f.code(), code);
        }
    }

    #[test]
    fn rejects_unknown_code() {
        assert_eq!(
            "biba".parse::<Freq>(),
            Err(ValidationError::InvalidFrequency("biba".into()))
        );
        assert!("M".parse::<Freq>().is_err());
        assert!("".parse::<Freq>().is_err());
    }

    #[test]
    fn db_helpers_round_trip() {
        for f in Freq::ALL {
            assert_eq!(db::from_db_str(db::to_db_str(*f)).unwrap(), *f);
        }
        assert!(db::from_db_str("z").is_err());
    }

    #[test]
    fn serde_uses_codes() {
        let s = serde_json::to_string(&Freq::Monthly).unwrap();
        assert_eq!(s, "\"m\"");
        let f: Freq = serde_json::from_str("\"a\"").unwrap();
        assert_eq!(f, Freq::Annual);
    }
}
