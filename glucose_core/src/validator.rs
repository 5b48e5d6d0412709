//! Reading validator deciding whether a raw submission may be transmitted.
//!
//! Checks run in a fixed order and stop at the first failure:
//! 1. presence
//! 2. numeric parse
//! 3. 30..=700 mg/dL range
//! 4. dosing window gating

use crate::classifier::classify_time;
use crate::{Rejection, ValidatedReading, MAX_SUGAR_MG_DL, MIN_SUGAR_MG_DL};
use chrono::NaiveDateTime;

/// Outcome of reading a numeric form field
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum NumericField {
    Blank,
    Invalid,
    Value(f64),
}

impl NumericField {
    /// Parse a user-entered field. Surrounding whitespace is ignored and
    /// non-finite values count as invalid.
    pub(crate) fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return NumericField::Blank;
        }
        match trimmed.parse::<f64>() {
            Ok(value) if value.is_finite() => NumericField::Value(value),
            _ => NumericField::Invalid,
        }
    }
}

/// Validate a raw sugar concentration captured at `captured_at`
pub fn validate(
    sugar_concentration_raw: &str,
    captured_at: &NaiveDateTime,
) -> Result<ValidatedReading, Rejection> {
    let value = match NumericField::parse(sugar_concentration_raw) {
        NumericField::Blank => return Err(Rejection::MissingValue),
        NumericField::Invalid => return Err(Rejection::NotANumber),
        NumericField::Value(value) => value,
    };

    if !(MIN_SUGAR_MG_DL..=MAX_SUGAR_MG_DL).contains(&value) {
        return Err(Rejection::OutOfRange);
    }

    let session = classify_time(captured_at);
    if !session.is_named() {
        return Err(Rejection::OutsideAllowedWindow);
    }

    tracing::debug!("Validated reading {} mg/dL in session {}", value, session);
    Ok(ValidatedReading { value, session })
}
