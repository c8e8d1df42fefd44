//! Token extraction.
//!
//! Every step takes the remaining [`Tokens`] by value and returns what it matched
//! together with the reduced token set. [`extract`] threads the steps in their
//! fixed order:
//!
//! 1. years ([`take_years`])
//! 2. finaliser, 3. rate, 4. aggregator ([`take_one_of`])
//! 5. rate/aggregator exclusion ([`check_exclusive`])
//! 6. unit ([`take_unit`])

use chrono::NaiveDate;
use tracing::debug;

use crate::error::ValidationError;
use crate::path::tokenizer::Tokens;
use crate::path::vocab::{Aggregator, Finaliser, Rate, Vocabulary};

/// Attributes pulled out of a path suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedAttributes {
    /// Jan 1 of the start year, if one was given.
    pub start_date: Option<NaiveDate>,
    /// Dec 31 of the end year, or the extraction date when no end year was given.
    pub end_date: NaiveDate,
    /// Requested output encoding.
    pub finaliser: Option<Finaliser>,
    /// Rate transform.
    pub rate: Option<Rate>,
    /// Aggregation transform.
    pub aggregator: Option<Aggregator>,
    /// Unit suffix for the series name.
    pub unit: Option<String>,
}

/// Dates found among year tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct YearRange {
    /// Jan 1 of the first year token.
    pub start: Option<NaiveDate>,
    /// Dec 31 of the second year token.
    pub end: Option<NaiveDate>,
}

/// Year tokens are ASCII digits only; other Unicode digits stay ordinary tokens.
fn is_year_token(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

fn year_date(token: &str, month: u32, day: u32) -> Result<NaiveDate, ValidationError> {
    let malformed = || ValidationError::MalformedDate(token.to_string());
    let year: i32 = token.parse().map_err(|_| malformed())?;
    if !(1..=9999).contains(&year) {
        return Err(malformed());
    }
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(malformed)
}

/// Pull the start and end years out of `tokens`.
///
/// One year token gives a start date, two give start and end (in order of
/// appearance). More than two is rejected with [`ValidationError::TooManyYears`].
pub fn take_years(tokens: Tokens) -> Result<(YearRange, Tokens), ValidationError> {
    let positions: Vec<usize> = tokens
        .as_slice()
        .iter()
        .enumerate()
        .filter(|(_, t)| is_year_token(t))
        .map(|(i, _)| i)
        .collect();

    let tok = |i: usize| tokens.as_slice()[i].as_str();
    let range = match positions.as_slice() {
        [] => YearRange::default(),
        [s] => YearRange {
            start: Some(year_date(tok(*s), 1, 1)?),
            end: None,
        },
        [s, e] => YearRange {
            start: Some(year_date(tok(*s), 1, 1)?),
            end: Some(year_date(tok(*e), 12, 31)?),
        },
        _ => {
            return Err(ValidationError::TooManyYears(
                positions.iter().map(|&i| tok(i).to_string()).collect(),
            ));
        }
    };

    Ok((range, tokens.without(&positions)))
}

/// Find at most one value of vocabulary `V` among `tokens`.
///
/// Values are matched by exact token text. A value that appears more than once
/// counts once and only its first occurrence is consumed. Two or more distinct
/// values is an [`ValidationError::AmbiguousToken`] listing all of them in
/// vocabulary order.
pub fn take_one_of<V: Vocabulary>(tokens: Tokens) -> Result<(Option<V>, Tokens), ValidationError> {
    let found: Vec<(V, usize)> = V::ALL
        .iter()
        .filter_map(|v| tokens.position(v.as_str()).map(|i| (*v, i)))
        .collect();

    match found.as_slice() {
        [] => Ok((None, tokens)),
        [(value, at)] => {
            let (value, at) = (*value, *at);
            Ok((Some(value), tokens.without(&[at])))
        }
        _ => Err(ValidationError::AmbiguousToken {
            category: V::CATEGORY,
            values: found.iter().map(|(v, _)| v.as_str().to_string()).collect(),
        }),
    }
}

/// Rate and aggregator cannot be combined.
pub fn check_exclusive(
    rate: Option<Rate>,
    aggregator: Option<Aggregator>,
) -> Result<(), ValidationError> {
    match (rate, aggregator) {
        (Some(r), Some(a)) => Err(ValidationError::MutuallyExclusiveModifiers {
            rate: r.to_string(),
            aggregator: a.to_string(),
        }),
        _ => Ok(()),
    }
}

/// The unit is the first remaining token; failing that, the rate's own text.
///
/// Only a rate provides this fallback, an aggregator or finaliser never does.
pub fn take_unit(tokens: Tokens, rate: Option<Rate>) -> (Option<String>, Tokens) {
    match tokens.first() {
        Some(first) => {
            let unit = first.to_string();
            (Some(unit), tokens.without(&[0]))
        }
        None => (rate.map(|r| r.as_str().to_string()), tokens),
    }
}

/// Run every extraction step over `tokens`.
///
/// `today` fills `end_date` when the path names no end year. Tokens left over
/// after the unit is taken are ignored.
pub fn extract(tokens: Tokens, today: NaiveDate) -> Result<ExtractedAttributes, ValidationError> {
    let (years, tokens) = take_years(tokens)?;
    let (finaliser, tokens) = take_one_of::<Finaliser>(tokens)?;
    let (rate, tokens) = take_one_of::<Rate>(tokens)?;
    let (aggregator, tokens) = take_one_of::<Aggregator>(tokens)?;
    check_exclusive(rate, aggregator)?;
    let (unit, rest) = take_unit(tokens, rate);

    if !rest.is_empty() {
        debug!(ignored = ?rest.as_slice(), "unused path tokens");
    }

    Ok(ExtractedAttributes {
        start_date: years.start,
        end_date: years.end.unwrap_or(today),
        finaliser,
        rate,
        aggregator,
        unit,
    })
}
