//! Priority ordering for flat task lists.

use crate::calendar::DayContext;
use crate::model::task::TaskRecord;
use crate::triage::urgency::is_overdue;
use chrono::TimeZone;
use std::cmp::Ordering;

/// Returns `tasks` in storage list order: `sort_order` ascending, then
/// newest `created_at`.
pub fn sort_by_storage_order(tasks: &[TaskRecord]) -> Vec<TaskRecord> {
    let mut sorted = tasks.to_vec();
    sorted.sort_by(|a, b| {
        a.sort_order
            .cmp(&b.sort_order)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
    sorted
}

/// Returns `tasks` sorted for display.
///
/// Keys, in order: open before completed, overdue first, then earliest due
/// date. Two dated tasks are settled by due date alone, so equal due dates
/// keep input order. Dated tasks precede undated ones, and undated tasks
/// fall back to newest `created_at`.
pub fn sort_by_priority<Tz: TimeZone>(
    tasks: &[TaskRecord],
    days: &DayContext<Tz>,
) -> Vec<TaskRecord> {
    let mut sorted = tasks.to_vec();
    sorted.sort_by(|a, b| compare_priority(a, b, days));
    sorted
}

fn compare_priority<Tz: TimeZone>(
    a: &TaskRecord,
    b: &TaskRecord,
    days: &DayContext<Tz>,
) -> Ordering {
    a.is_done()
        .cmp(&b.is_done())
        .then_with(|| is_overdue(b, days).cmp(&is_overdue(a, days)))
        .then_with(|| match (&a.due_date, &b.due_date) {
            (Some(a_due), Some(b_due)) => a_due.cmp(b_due),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => b.created_at.cmp(&a.created_at),
        })
}
