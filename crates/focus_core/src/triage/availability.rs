//! Availability predicate for the "Available" view.

use crate::calendar::DayContext;
use crate::model::task::{TaskRecord, TaskStatus};
use chrono::TimeZone;

/// Returns whether `task` can be worked on today.
///
/// Rules, checked in order:
/// 1. status must be `active`;
/// 2. the task must not carry `completed_at`;
/// 3. a defer day, when set, must not be after today (today itself counts).
///
/// The due date never affects availability.
pub fn is_available<Tz: TimeZone>(task: &TaskRecord, days: &DayContext<Tz>) -> bool {
    if task.status != TaskStatus::Active {
        return false;
    }
    if task.completed_at.is_some() {
        return false;
    }
    match &task.defer_date {
        Some(defer) => days.day_of(defer) <= days.today(),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::is_available;
    use crate::calendar::DayContext;
    use crate::model::task::{TaskRecord, TaskStatus};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn today() -> DayContext<Utc> {
        DayContext::new(NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(), Utc)
    }

    fn active(title: &str) -> TaskRecord {
        let mut task = TaskRecord::new(title);
        task.status = TaskStatus::Active;
        task
    }

    #[test]
    fn defer_later_the_same_day_is_still_available() {
        let mut task = active("stand-up notes");
        task.defer_date = Some(Utc.with_ymd_and_hms(2024, 6, 10, 23, 59, 0).unwrap());
        assert!(is_available(&task, &today()));
    }

    #[test]
    fn completed_at_wins_over_active_status() {
        let mut task = active("half-saved update");
        task.completed_at = Some(Utc.with_ymd_and_hms(2024, 6, 9, 8, 0, 0).unwrap());
        assert!(!is_available(&task, &today()));
    }
}
