#![forbid(unsafe_code)]

//! Core domain model and business logic for glucose entry.
//!
//! This crate provides:
//! - Domain types (sessions, readings, records)
//! - Session classification by time of day
//! - Reading validation and submission formatting
//! - Insulin dose completion
//! - Views over fetched records

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod classifier;
pub mod validator;
pub mod formatter;
pub mod insulin;
pub mod records;

// Re-export commonly used types
pub use error::{Error, InsulinRejection, Rejection, Result};
pub use types::*;
pub use config::Config;
pub use classifier::{classify, classify_minutes, classify_time, DosingWindow, DOSING_WINDOWS};
pub use validator::validate;
pub use formatter::{format_submission, submit_reading};
pub use insulin::{complete_record, validate_insulin_intake};
pub use records::{parse_record_list, partition_by_status, previous_day, DailySummary};
