//! Query path decomposition.
//!
//! A custom query URL looks like
//!
//! ```text
//! {domain}/series/{varname}/{freq}/{?unit}/{?rate|?aggregator}/{?start_year}/{?end_year}/{?finaliser}
//! ```
//!
//! e.g. `oil/series/BRENT/m/eop/2015/2017/csv` or `ru/series/EXPORT_GOODS/m/bln_rub`.
//! The routing layer hands over `domain`, `varname` and `freq`; this module
//! handles the optional suffix after them (the "inner path"):
//!
//! - [`tokenizer`] splits the suffix into [`Tokens`]
//! - [`extract`] pulls years, finaliser, rate, aggregator and unit out of them
//! - [`vocab`] holds the closed value sets
//!
//! ```
//! use chrono::NaiveDate;
//! use series_query::path::{parse_inner_path_at, vocab::Aggregator};
//!
//! let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
//! let attrs = parse_inner_path_at("eop/2015/2017/csv", today).unwrap();
//! assert_eq!(attrs.aggregator, Some(Aggregator::Eop));
//! assert_eq!(attrs.end_date, NaiveDate::from_ymd_opt(2017, 12, 31).unwrap());
//! assert_eq!(attrs.unit, None);
//! ```

pub mod extract;
pub mod tokenizer;
pub mod vocab;

use chrono::{NaiveDate, Utc};

use crate::error::ValidationError;

pub use extract::ExtractedAttributes;
pub use tokenizer::Tokens;

/// Tokenize and extract `inner_path`, defaulting the end date to `today`.
pub fn parse_inner_path_at(
    inner_path: &str,
    today: NaiveDate,
) -> Result<ExtractedAttributes, ValidationError> {
    extract::extract(Tokens::tokenize(inner_path), today)
}

/// Tokenize and extract `inner_path`, defaulting the end date to the current UTC date.
pub fn parse_inner_path(inner_path: &str) -> Result<ExtractedAttributes, ValidationError> {
    parse_inner_path_at(inner_path, Utc::now().date_naive())
}
