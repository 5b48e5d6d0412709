//! Submission formatting and the single submission entry point.
//!
//! No network call happens here; the produced [`GlucoseRecord`] is the
//! payload handed to whatever transmits it.

use crate::{
    validator, GlucoseRecord, GlucoseUnit, ReadingInput, RecordStatus, Rejection,
    ValidatedReading,
};
use chrono::NaiveDateTime;

/// Calendar date format expected by the storage API
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// 24-hour time format expected by the storage API
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Build the outbound record for an already validated reading
pub fn format_submission(
    reading: &ValidatedReading,
    note: &str,
    username: &str,
    captured_at: &NaiveDateTime,
) -> GlucoseRecord {
    GlucoseRecord {
        date: captured_at.format(DATE_FORMAT).to_string(),
        time: captured_at.format(TIME_FORMAT).to_string(),
        sugar_concentration: reading.value,
        note: note.to_string(),
        unit: GlucoseUnit::MgDl,
        session: reading.session,
        username: username.to_string(),
        insulin_intake: None,
        status: RecordStatus::Pending,
    }
}

/// Validate a reading and, if accepted, produce the record to transmit.
///
/// The first failing check is returned; nothing is produced on rejection.
pub fn submit_reading(input: &ReadingInput) -> Result<GlucoseRecord, Rejection> {
    match validator::validate(&input.sugar_concentration_raw, &input.captured_at) {
        Ok(reading) => {
            let record =
                format_submission(&reading, &input.note, &input.username, &input.captured_at);
            tracing::info!(
                "Accepted {} mg/dL for {} in session {}",
                record.sugar_concentration,
                record.username,
                record.session
            );
            Ok(record)
        }
        Err(rejection) => {
            tracing::info!("Rejected reading for {}: {:?}", input.username, rejection);
            Err(rejection)
        }
    }
}
