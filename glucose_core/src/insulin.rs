//! Insulin dose entry for pending readings.
//!
//! A clinician records the dose given for a reading; doing so moves the
//! record from pending to completed.

use crate::validator::NumericField;
use crate::{InsulinRejection, RecordStatus, StoredRecord, MAX_INSULIN_UNITS, MIN_INSULIN_UNITS};

/// Validate a raw insulin dose in units
pub fn validate_insulin_intake(raw: &str) -> Result<f64, InsulinRejection> {
    let value = match NumericField::parse(raw) {
        NumericField::Blank => return Err(InsulinRejection::MissingValue),
        NumericField::Invalid => return Err(InsulinRejection::NotANumber),
        NumericField::Value(value) => value,
    };

    if !(MIN_INSULIN_UNITS..=MAX_INSULIN_UNITS).contains(&value) {
        return Err(InsulinRejection::OutOfRange);
    }

    Ok(value)
}

/// Record an insulin dose on a pending reading.
///
/// A completed record is never modified, whatever the dose.
pub fn complete_record(
    record: StoredRecord,
    insulin_intake_raw: &str,
) -> Result<StoredRecord, InsulinRejection> {
    if record.is_completed() {
        return Err(InsulinRejection::AlreadyCompleted);
    }

    let units = validate_insulin_intake(insulin_intake_raw)?;
    tracing::info!(
        "Recorded {} units on record {} ({} {})",
        units,
        record.id,
        record.datetime,
        record.session
    );

    Ok(StoredRecord {
        insulin_intake: Some(units),
        status: RecordStatus::Completed,
        ..record
    })
}
