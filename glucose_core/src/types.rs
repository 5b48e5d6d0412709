//! Core domain types for glucose entry.
//!
//! This module defines the fundamental types used throughout the system:
//! - Clinical dosing sessions and record status
//! - The raw reading input handed over by the entry form
//! - The normalized record handed to the storage API
//! - Records fetched back from the storage API

use crate::formatter::DATE_FORMAT;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Policy Constants
// ============================================================================

/// Lowest accepted sugar concentration (mg/dL, inclusive)
pub const MIN_SUGAR_MG_DL: f64 = 30.0;

/// Highest accepted sugar concentration (mg/dL, inclusive)
pub const MAX_SUGAR_MG_DL: f64 = 700.0;

/// Lowest accepted insulin dose (units, inclusive)
pub const MIN_INSULIN_UNITS: f64 = 0.0;

/// Highest accepted insulin dose (units, inclusive)
pub const MAX_INSULIN_UNITS: f64 = 30.0;

// ============================================================================
// Session and Status Types
// ============================================================================

/// Clinical dosing window a reading falls into
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ClassifiedSession {
    #[serde(rename = "Before Breakfast")]
    BeforeBreakfast,
    #[serde(rename = "Before Lunch")]
    BeforeLunch,
    #[serde(rename = "Before Dinner")]
    BeforeDinner,
    #[serde(rename = "Other")]
    Other,
}

impl ClassifiedSession {
    /// The three sessions a reading may be submitted in, in daily order
    pub const NAMED: [ClassifiedSession; 3] = [
        ClassifiedSession::BeforeBreakfast,
        ClassifiedSession::BeforeLunch,
        ClassifiedSession::BeforeDinner,
    ];

    /// Label used on the wire and in the UI
    pub fn label(self) -> &'static str {
        match self {
            ClassifiedSession::BeforeBreakfast => "Before Breakfast",
            ClassifiedSession::BeforeLunch => "Before Lunch",
            ClassifiedSession::BeforeDinner => "Before Dinner",
            ClassifiedSession::Other => "Other",
        }
    }

    /// Whether readings in this session may be submitted
    pub fn is_named(self) -> bool {
        !matches!(self, ClassifiedSession::Other)
    }
}

impl fmt::Display for ClassifiedSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lifecycle status of a stored reading
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    /// Waiting for a clinician to record the insulin dose
    #[default]
    Pending,
    /// Insulin dose recorded
    Completed,
}

/// Unit of a glucose reading. Only mg/dL is recorded by this app.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum GlucoseUnit {
    #[serde(rename = "mg/dL")]
    #[default]
    MgDl,
}

// ============================================================================
// Submission Types
// ============================================================================

/// Raw values captured by the entry form when the user submits
#[derive(Clone, Debug)]
pub struct ReadingInput {
    /// Local wall-clock time of the submission
    pub captured_at: NaiveDateTime,
    pub sugar_concentration_raw: String,
    pub note: String,
    pub username: String,
}

/// A reading that passed every validation step
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValidatedReading {
    /// Sugar concentration in mg/dL
    pub value: f64,
    /// Always one of [`ClassifiedSession::NAMED`]
    pub session: ClassifiedSession,
}

/// A new glucose record as sent to the storage API
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GlucoseRecord {
    pub date: String,
    pub time: String,
    pub sugar_concentration: f64,
    pub note: String,
    pub unit: GlucoseUnit,
    pub session: ClassifiedSession,
    pub username: String,
    #[serde(rename = "insulinintake")]
    pub insulin_intake: Option<f64>,
    pub status: RecordStatus,
}

// ============================================================================
// Stored Record Types
// ============================================================================

/// Row identifier as returned by the storage API, which may quote it
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum RecordId {
    Number(u64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{}", n),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

/// A glucose record as fetched back from the storage API
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct StoredRecord {
    pub id: RecordId,
    /// `YYYY-MM-DD HH:MM:SS` as stored by the server
    pub datetime: String,
    #[serde(deserialize_with = "numeric::required")]
    pub sugar_concentration: f64,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub unit: String,
    pub session: ClassifiedSession,
    #[serde(default)]
    pub username: String,
    #[serde(
        rename = "insulinintake",
        default,
        deserialize_with = "numeric::optional"
    )]
    pub insulin_intake: Option<f64>,
    #[serde(default)]
    pub status: RecordStatus,
}

impl StoredRecord {
    pub fn is_completed(&self) -> bool {
        self.status == RecordStatus::Completed
    }

    /// Calendar day of the reading, if `datetime` starts with `YYYY-MM-DD`
    pub fn date(&self) -> Option<NaiveDate> {
        self.datetime
            .get(..10)
            .and_then(|day| NaiveDate::parse_from_str(day, DATE_FORMAT).ok())
    }
}

/// Numeric fields that the storage API sends either as JSON numbers or as
/// decimal strings.
mod numeric {
    use serde::de::{Deserializer, Error};
    use serde::Deserialize;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText {
        Number(f64),
        Text(String),
    }

    fn parse_text<E: Error>(text: &str) -> Result<Option<f64>, E> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        match trimmed.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(Some(value)),
            _ => Err(E::custom(format!("invalid number {:?}", text))),
        }
    }

    pub fn required<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match NumberOrText::deserialize(deserializer)? {
            NumberOrText::Number(value) => Ok(value),
            NumberOrText::Text(text) => {
                parse_text(&text)?.ok_or_else(|| D::Error::custom("empty number"))
            }
        }
    }

    pub fn optional<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<f64>, D::Error> {
        match Option::<NumberOrText>::deserialize(deserializer)? {
            None => Ok(None),
            Some(NumberOrText::Number(value)) => Ok(Some(value)),
            Some(NumberOrText::Text(text)) => parse_text(&text),
        }
    }
}
