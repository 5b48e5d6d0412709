//! Session classifier mapping a clock time to a clinical dosing window.
//!
//! The day is reduced to minutes since midnight and tested against three
//! closed intervals. Seconds never influence the result.

use crate::ClassifiedSession;
use chrono::Timelike;

/// A closed interval of minutes since midnight belonging to one session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DosingWindow {
    pub session: ClassifiedSession,
    pub start_minute: u32,
    pub end_minute: u32,
}

impl DosingWindow {
    pub fn contains(&self, minute: u32) -> bool {
        (self.start_minute..=self.end_minute).contains(&minute)
    }

    /// Format a window boundary as `HH:MM`
    pub fn format_minute(minute: u32) -> String {
        format!("{:02}:{:02}", minute / 60, minute % 60)
    }
}

/// Dosing windows in the order they are tested
pub const DOSING_WINDOWS: [DosingWindow; 3] = [
    // 07:00-10:00
    DosingWindow {
        session: ClassifiedSession::BeforeBreakfast,
        start_minute: 420,
        end_minute: 600,
    },
    // 12:00-15:00
    DosingWindow {
        session: ClassifiedSession::BeforeLunch,
        start_minute: 720,
        end_minute: 900,
    },
    // 19:00-22:00
    DosingWindow {
        session: ClassifiedSession::BeforeDinner,
        start_minute: 1140,
        end_minute: 1320,
    },
];

/// Classify a number of minutes since midnight
pub fn classify_minutes(total_minutes: u32) -> ClassifiedSession {
    DOSING_WINDOWS
        .iter()
        .find(|window| window.contains(total_minutes))
        .map(|window| window.session)
        .unwrap_or(ClassifiedSession::Other)
}

/// Classify an hour (0-23) and minute (0-59) pair.
///
/// Values outside those ranges are not a time of day and classify as `Other`.
pub fn classify(hours: u32, minutes: u32) -> ClassifiedSession {
    if hours > 23 || minutes > 59 {
        tracing::warn!("Ignoring invalid time of day {}:{}", hours, minutes);
        return ClassifiedSession::Other;
    }
    classify_minutes(hours * 60 + minutes)
}

/// Classify any chrono time-of-day value
pub fn classify_time<T: Timelike>(time: &T) -> ClassifiedSession {
    classify(time.hour(), time.minute())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    #[test]
    fn test_breakfast_window_inclusive() {
        for m in 420..=600 {
            assert_eq!(classify_minutes(m), ClassifiedSession::BeforeBreakfast, "minute {m}");
        }
        assert_ne!(classify_minutes(419), ClassifiedSession::BeforeBreakfast);
        assert_ne!(classify_minutes(601), ClassifiedSession::BeforeBreakfast);
    }

    #[test]
    fn test_lunch_window_inclusive() {
        for m in 720..=900 {
            assert_eq!(classify_minutes(m), ClassifiedSession::BeforeLunch, "minute {m}");
        }
        assert_ne!(classify_minutes(719), ClassifiedSession::BeforeLunch);
        assert_ne!(classify_minutes(901), ClassifiedSession::BeforeLunch);
    }

    #[test]
    fn test_dinner_window_inclusive() {
        for m in 1140..=1320 {
            assert_eq!(classify_minutes(m), ClassifiedSession::BeforeDinner, "minute {m}");
        }
        assert_ne!(classify_minutes(1139), ClassifiedSession::BeforeDinner);
        assert_ne!(classify_minutes(1321), ClassifiedSession::BeforeDinner);
    }

    #[test]
    fn test_everything_else_is_other() {
        let in_window = |m: u32| DOSING_WINDOWS.iter().any(|w| w.contains(m));
        for m in (0..24 * 60).filter(|m| !in_window(*m)) {
            assert_eq!(classify_minutes(m), ClassifiedSession::Other, "minute {m}");
        }
    }

    #[test]
    fn test_classify_hours_and_minutes() {
        assert_eq!(classify(7, 0), ClassifiedSession::BeforeBreakfast);
        assert_eq!(classify(10, 0), ClassifiedSession::BeforeBreakfast);
        assert_eq!(classify(10, 1), ClassifiedSession::Other);
        assert_eq!(classify(11, 0), ClassifiedSession::Other);
        assert_eq!(classify(15, 0), ClassifiedSession::BeforeLunch);
        assert_eq!(classify(16, 0), ClassifiedSession::Other);
        assert_eq!(classify(22, 0), ClassifiedSession::BeforeDinner);
        assert_eq!(classify(0, 0), ClassifiedSession::Other);
        assert_eq!(classify(23, 59), ClassifiedSession::Other);
    }

    #[test]
    fn test_out_of_range_components_are_other() {
        // 6:90 must not alias 07:30
        assert_eq!(classify(6, 90), ClassifiedSession::Other);
        assert_eq!(classify(9, 75), ClassifiedSession::Other);
        assert_eq!(classify(8, 60), ClassifiedSession::Other);
        assert_eq!(classify(24, 0), ClassifiedSession::Other);
        assert_eq!(classify(u32::MAX, u32::MAX), ClassifiedSession::Other);
        assert_eq!(classify_minutes(u32::MAX), ClassifiedSession::Other);
    }

    #[test]
    fn test_seconds_are_ignored() {
        let time = NaiveTime::from_hms_opt(10, 0, 59).unwrap();
        assert_eq!(classify_time(&time), ClassifiedSession::BeforeBreakfast);
    }

    #[test]
    fn test_format_minute() {
        assert_eq!(DosingWindow::format_minute(420), "07:00");
        assert_eq!(DosingWindow::format_minute(1320), "22:00");
    }
}
