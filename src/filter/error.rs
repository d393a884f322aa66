//! Filter errors

use thiserror::Error;

/// Errors raised when an edit would produce an invalid filter state
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterError {
    /// Range whose lower bound exceeds its upper bound
    #[error("invalid {field} range: {low} > {high}")]
    InvertedRange { field: &'static str, low: i64, high: i64 },
    /// Range reaching outside the field's domain
    #[error("{field} range {low}..={high} is outside {min}..={max}")]
    OutOfBounds {
        field: &'static str,
        low: i64,
        high: i64,
        min: i64,
        max: i64,
    },
    /// State abbreviation not in the state table
    #[error("unknown state '{0}'")]
    UnknownState(String),
    /// Metro identifier that is not a numeric CBSA code
    #[error("invalid metro identifier '{0}'")]
    InvalidMetro(String),
    /// Range given as something other than a `[low, high]` pair
    #[error("malformed range: {0}")]
    MalformedRange(String),
}
