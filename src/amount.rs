//! Parsing and validation helpers for user-supplied monetary amounts.
//!
//! Form input arrives as loose strings; these helpers convert it to validated
//! `f64` values so the aggregators only ever see well-formed numbers.

use crate::Error;

/// Parse an amount that must be strictly positive, e.g. a budget limit.
pub(crate) fn parse_positive(text: &str, field: &'static str) -> Result<f64, Error> {
    let value: f64 = text
        .trim()
        .parse()
        .map_err(|_| Error::NonPositiveAmount(field))?;

    require_positive(value, field)?;

    Ok(value)
}

/// Parse an amount that may be zero but not negative, e.g. a goal's starting
/// balance.
pub(crate) fn parse_non_negative(text: &str, field: &'static str) -> Result<f64, Error> {
    let value: f64 = text
        .trim()
        .parse()
        .map_err(|_| Error::NegativeAmount(field))?;

    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(Error::NegativeAmount(field))
    }
}

/// Reject amounts that are zero, negative, or non-finite.
pub(crate) fn require_positive(value: f64, field: &'static str) -> Result<(), Error> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::NonPositiveAmount(field))
    }
}
