//! Error types for the glucose_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Reason a glucose reading was refused.
///
/// The display strings are the messages shown to the patient, one at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    /// No reading entered
    #[error("Please enter a sugar concentration value")]
    MissingValue,

    /// Reading is not a finite number
    #[error("Sugar concentration must be a number")]
    NotANumber,

    /// Reading outside 30..=700 mg/dL
    #[error("Sugar concentration must be between 30 and 700 mg/dL")]
    OutOfRange,

    /// Submission time is not inside a dosing window
    #[error("You can only submit during the designated times for your session")]
    OutsideAllowedWindow,
}

/// Reason an insulin dose could not be recorded on a reading
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InsulinRejection {
    #[error("Please enter the insulin intake value")]
    MissingValue,

    #[error("Insulin intake must be a number")]
    NotANumber,

    #[error("Insulin intake should be between 0 and 30 units")]
    OutOfRange,

    #[error("Insulin intake was already recorded for this reading")]
    AlreadyCompleted,
}

/// Core error type for glucose_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Glucose reading failed validation
    #[error("Reading rejected: {0}")]
    Rejected(#[from] Rejection),

    /// Insulin dose failed validation
    #[error("Insulin entry rejected: {0}")]
    Insulin(#[from] InsulinRejection),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
