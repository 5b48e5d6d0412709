//! Views over records fetched back from the storage API.
//!
//! - Parsing list responses (bare array or `{status, data}` envelope)
//! - Pending/completed split for the insulin entry list
//! - One-reading-per-session summary for a single day

use crate::{ClassifiedSession, Error, Result, StoredRecord};
use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum RecordListing {
    Bare(Vec<StoredRecord>),
    Envelope {
        status: String,
        #[serde(default)]
        message: Option<String>,
        #[serde(default)]
        data: Vec<StoredRecord>,
    },
}

/// Parse a record list as returned by the storage API.
///
/// Accepts either a bare JSON array or the `{"status": "success", "data": [...]}`
/// envelope. An envelope with any other status is an error carrying the
/// server's message.
pub fn parse_record_list(json: &str) -> Result<Vec<StoredRecord>> {
    match serde_json::from_str::<RecordListing>(json)? {
        RecordListing::Bare(records) => Ok(records),
        RecordListing::Envelope { status, data, .. } if status == "success" => Ok(data),
        RecordListing::Envelope {
            status, message, ..
        } => Err(Error::Other(format!(
            "Server returned status {:?}: {}",
            status,
            message.unwrap_or_default()
        ))),
    }
}

/// Split records into (pending, completed), preserving order.
///
/// Anything not marked completed is treated as pending.
pub fn partition_by_status(
    records: impl IntoIterator<Item = StoredRecord>,
) -> (Vec<StoredRecord>, Vec<StoredRecord>) {
    let (completed, pending) = records.into_iter().partition(StoredRecord::is_completed);
    (pending, completed)
}

/// The calendar day before `date`
pub fn previous_day(date: NaiveDate) -> Option<NaiveDate> {
    date.pred_opt()
}

/// Readings for one day, at most one per dosing session
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DailySummary {
    pub before_breakfast: Option<StoredRecord>,
    pub before_lunch: Option<StoredRecord>,
    pub before_dinner: Option<StoredRecord>,
}

impl DailySummary {
    /// Build the summary for `date`, keeping the first record seen per session.
    ///
    /// Records from other days, records in `Other`, and records whose
    /// datetime does not start with a calendar date are ignored.
    pub fn for_date<'a>(
        records: impl IntoIterator<Item = &'a StoredRecord>,
        date: NaiveDate,
    ) -> Self {
        let mut summary = DailySummary::default();

        for record in records {
            match record.date() {
                Some(d) if d == date => {}
                Some(_) => continue,
                None => {
                    tracing::warn!(
                        "Skipping record {} with bad datetime {:?}",
                        record.id,
                        record.datetime
                    );
                    continue;
                }
            }

            let slot = match record.session {
                ClassifiedSession::BeforeBreakfast => &mut summary.before_breakfast,
                ClassifiedSession::BeforeLunch => &mut summary.before_lunch,
                ClassifiedSession::BeforeDinner => &mut summary.before_dinner,
                ClassifiedSession::Other => continue,
            };
            if slot.is_none() {
                *slot = Some(record.clone());
            }
        }

        summary
    }

    /// Entry for a named session; `Other` never has one
    pub fn get(&self, session: ClassifiedSession) -> Option<&StoredRecord> {
        match session {
            ClassifiedSession::BeforeBreakfast => self.before_breakfast.as_ref(),
            ClassifiedSession::BeforeLunch => self.before_lunch.as_ref(),
            ClassifiedSession::BeforeDinner => self.before_dinner.as_ref(),
            ClassifiedSession::Other => None,
        }
    }

    /// Sessions of the day that have no reading yet
    pub fn missing_sessions(&self) -> Vec<ClassifiedSession> {
        ClassifiedSession::NAMED
            .into_iter()
            .filter(|s| self.get(*s).is_none())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RecordId, RecordStatus};

    fn record(
        id: u64,
        datetime: &str,
        session: ClassifiedSession,
        status: RecordStatus,
    ) -> StoredRecord {
        StoredRecord {
            id: RecordId::Number(id),
            datetime: datetime.into(),
            sugar_concentration: 100.0 + id as f64,
            note: String::new(),
            unit: "mg/dL".into(),
            session,
            username: "p-001".into(),
            insulin_intake: (status == RecordStatus::Completed).then_some(4.0),
            status,
        }
    }

    fn ids(records: &[StoredRecord]) -> Vec<String> {
        records.iter().map(|r| r.id.to_string()).collect()
    }

    #[test]
    fn test_parse_bare_array() {
        let json = r#"[
            {"id": "7", "datetime": "2024-05-02 08:30:00", "sugar_concentration": "150",
             "session": "Before Breakfast", "insulinintake": null, "status": "pending"}
        ]"#;
        let records = parse_record_list(json).unwrap();
        assert_eq!(ids(&records), vec!["7"]);
        assert_eq!(records[0].sugar_concentration, 150.0);
    }

    #[test]
    fn test_parse_success_envelope() {
        let json = r#"{"status": "success", "data": [
            {"id": 1, "datetime": "2024-05-02 13:00:00", "sugar_concentration": 120,
             "session": "Before Lunch", "status": "completed", "insulinintake": "3"}
        ]}"#;
        let records = parse_record_list(json).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].insulin_intake, Some(3.0));
    }

    #[test]
    fn test_parse_error_envelope() {
        let json = r#"{"status": "error", "message": "No records found"}"#;
        let err = parse_record_list(json).unwrap_err();
        assert!(matches!(err, Error::Other(_)));
        assert!(err.to_string().contains("No records found"));
    }

    #[test]
    fn test_partition_preserves_order() {
        use ClassifiedSession::*;
        use RecordStatus::*;

        let records = vec![
            record(1, "2024-05-01 08:00:00", BeforeBreakfast, Pending),
            record(2, "2024-05-01 13:00:00", BeforeLunch, Completed),
            record(3, "2024-05-01 20:00:00", BeforeDinner, Pending),
            record(4, "2024-05-02 08:00:00", BeforeBreakfast, Completed),
        ];

        let (pending, completed) = partition_by_status(records);
        assert_eq!(ids(&pending), vec!["1", "3"]);
        assert_eq!(ids(&completed), vec!["2", "4"]);
    }

    #[test]
    fn test_previous_day_rolls_over() {
        let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();
        assert_eq!(previous_day(d(2024, 5, 2)), Some(d(2024, 5, 1)));
        assert_eq!(previous_day(d(2024, 3, 1)), Some(d(2024, 2, 29)));
        assert_eq!(previous_day(d(2023, 3, 1)), Some(d(2023, 2, 28)));
        assert_eq!(previous_day(d(2024, 1, 1)), Some(d(2023, 12, 31)));
    }

    #[test]
    fn test_daily_summary_first_per_session() {
        use ClassifiedSession::*;
        use RecordStatus::*;

        let records = vec![
            record(1, "2024-05-01 08:00:00", BeforeBreakfast, Completed),
            record(2, "2024-05-02 08:10:00", BeforeBreakfast, Pending),
            record(3, "2024-05-02 09:40:00", BeforeBreakfast, Pending),
            record(4, "2024-05-02 11:00:00", Other, Pending),
            record(5, "2024-05-02 19:30:00", BeforeDinner, Completed),
            record(6, "not-a-date", BeforeLunch, Pending),
        ];

        let date = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        let summary = DailySummary::for_date(&records, date);

        let id_of = |s| summary.get(s).map(|r: &StoredRecord| r.id.to_string());
        assert_eq!(id_of(BeforeBreakfast).as_deref(), Some("2"));
        assert_eq!(id_of(BeforeLunch), None);
        assert_eq!(id_of(BeforeDinner).as_deref(), Some("5"));
        assert_eq!(id_of(Other), None);
        assert_eq!(summary.missing_sessions(), vec![BeforeLunch]);
    }

    #[test]
    fn test_daily_summary_empty_day() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        let records: Vec<StoredRecord> = Vec::new();
        let summary = DailySummary::for_date(&records, date);
        assert_eq!(summary, DailySummary::default());
        assert_eq!(summary.missing_sessions().len(), 3);
    }
}
