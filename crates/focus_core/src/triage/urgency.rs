//! Per-task urgency checks used for badge styling.
//!
//! # Invariants
//! - Completed tasks are never overdue or deferred.
//! - `is_overdue` and `is_deferred` are independent; both may hold at once.

use crate::calendar::{DayContext, WEEK_HORIZON_DAYS};
use crate::model::task::{TaskRecord, TaskStatus};
use chrono::TimeZone;
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// Uncompleted, with a due day before today.
pub fn is_overdue<Tz: TimeZone>(task: &TaskRecord, days: &DayContext<Tz>) -> bool {
    if task.completed_at.is_some() {
        return false;
    }
    task.due_date
        .as_ref()
        .is_some_and(|due| days.day_of(due) < days.today())
}

/// Uncompleted, with a defer day after today.
pub fn is_deferred<Tz: TimeZone>(task: &TaskRecord, days: &DayContext<Tz>) -> bool {
    if task.completed_at.is_some() {
        return false;
    }
    task.defer_date
        .as_ref()
        .is_some_and(|defer| days.day_of(defer) > days.today())
}

/// Short due-date hint shown next to a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyLabel {
    Overdue,
    DueToday,
    DueTomorrow,
    /// Due in 2..=7 days.
    DueInDays(u32),
}

impl Display for UrgencyLabel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Overdue => f.write_str("Overdue"),
            Self::DueToday => f.write_str("Due today"),
            Self::DueTomorrow => f.write_str("Due tomorrow"),
            Self::DueInDays(n) => write!(f, "Due in {n} days"),
        }
    }
}

/// Returns the due-date hint, or `None` when there is no due date or it is
/// further out than the week horizon.
///
/// Completion is not considered; callers hide hints for finished tasks.
pub fn urgency_label<Tz: TimeZone>(
    task: &TaskRecord,
    days: &DayContext<Tz>,
) -> Option<UrgencyLabel> {
    let due = task.due_date.as_ref()?;
    match days.days_until(due) {
        n if n < 0 => Some(UrgencyLabel::Overdue),
        0 => Some(UrgencyLabel::DueToday),
        1 => Some(UrgencyLabel::DueTomorrow),
        n if n <= WEEK_HORIZON_DAYS as i64 => u32::try_from(n).ok().map(UrgencyLabel::DueInDays),
        _ => None,
    }
}

/// Badge tone for a task row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeTone {
    Done,
    Inbox,
    Someday,
    Overdue,
    Default,
}

impl BadgeTone {
    /// Stable color name consumed by the presentation layer.
    pub fn color(self) -> &'static str {
        match self {
            Self::Done => "green",
            Self::Inbox => "blue",
            Self::Someday => "gray",
            Self::Overdue => "red",
            Self::Default => "default",
        }
    }
}

/// Picks the badge tone: completion first, then status, then overdue.
pub fn badge_tone<Tz: TimeZone>(task: &TaskRecord, days: &DayContext<Tz>) -> BadgeTone {
    if task.completed_at.is_some() {
        return BadgeTone::Done;
    }
    match task.status {
        TaskStatus::Inbox => BadgeTone::Inbox,
        TaskStatus::Someday => BadgeTone::Someday,
        _ if is_overdue(task, days) => BadgeTone::Overdue,
        _ => BadgeTone::Default,
    }
}

#[cfg(test)]
mod tests {
    use super::{badge_tone, urgency_label, BadgeTone, UrgencyLabel};
    use crate::calendar::DayContext;
    use crate::model::task::{TaskRecord, TaskStatus};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn days() -> DayContext<Utc> {
        DayContext::new(NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(), Utc)
    }

    fn due_on(day: u32, hour: u32) -> TaskRecord {
        let mut task = TaskRecord::new("report");
        task.status = TaskStatus::Active;
        task.due_date = Some(Utc.with_ymd_and_hms(2024, 6, day, hour, 0, 0).unwrap());
        task
    }

    #[test]
    fn label_counts_calendar_days_not_hours() {
        // Due early on the 11th is still "tomorrow" even under 24h away.
        assert_eq!(
            urgency_label(&due_on(11, 1), &days()),
            Some(UrgencyLabel::DueTomorrow)
        );
        assert_eq!(
            urgency_label(&due_on(10, 0), &days()),
            Some(UrgencyLabel::DueToday)
        );
        assert_eq!(
            urgency_label(&due_on(17, 23), &days()),
            Some(UrgencyLabel::DueInDays(7))
        );
        assert_eq!(urgency_label(&due_on(18, 0), &days()), None);
        assert_eq!(
            urgency_label(&due_on(3, 12), &days()),
            Some(UrgencyLabel::Overdue)
        );
    }

    #[test]
    fn label_text_matches_list_copy() {
        assert_eq!(UrgencyLabel::DueInDays(3).to_string(), "Due in 3 days");
        assert_eq!(UrgencyLabel::DueToday.to_string(), "Due today");
    }

    #[test]
    fn badge_prefers_completion_then_status() {
        let mut task = due_on(1, 9);
        assert_eq!(badge_tone(&task, &days()), BadgeTone::Overdue);

        task.status = TaskStatus::Someday;
        assert_eq!(badge_tone(&task, &days()), BadgeTone::Someday);

        task.mark_completed(Utc.with_ymd_and_hms(2024, 6, 2, 9, 0, 0).unwrap());
        assert_eq!(badge_tone(&task, &days()), BadgeTone::Done);
        assert_eq!(BadgeTone::Done.color(), "green");
    }
}
