//! Plain-text rendering of task lists and due-date sections.

use chrono::TimeZone;
use focus_core::{
    badge_tone, count_incomplete_subtasks, is_deferred, urgency_label, BadgeTone, DayContext,
    DueBucket, GroupedView, TaskRecord, TaskStatus,
};

const EMPTY_AVAILABLE: &str = "No tasks available to work on right now.";
const EMPTY_LIST: &str = "No tasks.";

/// One line per task.
///
/// `context` is the full snapshot, used for subtask counts.
pub fn render_list<Tz: TimeZone>(
    tasks: &[TaskRecord],
    context: &[TaskRecord],
    days: &DayContext<Tz>,
) -> String {
    if tasks.is_empty() {
        return format!("{EMPTY_LIST}\n");
    }
    let mut out = String::new();
    for task in tasks {
        out.push_str(&render_task_line(task, context, days));
        out.push('\n');
    }
    out
}

/// Non-empty sections in display order, each with a count heading.
pub fn render_grouped<Tz: TimeZone>(
    grouped: &GroupedView,
    context: &[TaskRecord],
    days: &DayContext<Tz>,
) -> String {
    if grouped.tasks().is_empty() {
        return format!("{EMPTY_AVAILABLE}\n");
    }
    let mut out = String::new();
    for bucket in DueBucket::ALL {
        let tasks = grouped.tasks_in(bucket);
        if tasks.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&format!("{} ({})\n", bucket.title(), tasks.len()));
        for task in tasks {
            out.push_str(&render_task_line(task, context, days));
            out.push('\n');
        }
    }
    out
}

fn render_task_line<Tz: TimeZone>(
    task: &TaskRecord,
    context: &[TaskRecord],
    days: &DayContext<Tz>,
) -> String {
    let check = if task.is_done() { "[x]" } else { "[ ]" };
    let mut details: Vec<String> = Vec::new();

    if task.status == TaskStatus::Inbox {
        details.push(TaskStatus::Inbox.display_label().to_string());
    }
    if let Some(defer) = &task.defer_date {
        let day = days.day_of(defer).format("%b %-d");
        if is_deferred(task, days) {
            details.push(format!("Deferred until {day}"));
        } else {
            details.push(format!("Available {day}"));
        }
    }
    if let Some(due) = &task.due_date {
        let day = days.day_of(due).format("%b %-d");
        match urgency_label(task, days).filter(|_| !task.is_done()) {
            Some(label) => details.push(format!("Due {day} ({label})")),
            None => details.push(format!("Due {day}")),
        }
    }
    let open_subtasks = count_incomplete_subtasks(task.id, context);
    if open_subtasks > 0 {
        details.push(format!("{open_subtasks} subtasks"));
    }

    let tone = badge_tone(task, days);
    let marker = if tone == BadgeTone::Default {
        String::new()
    } else {
        format!(" <{}>", tone.color())
    };

    if details.is_empty() {
        format!("{check} {}{marker}", task.title)
    } else {
        format!("{check} {}{marker} - {}", task.title, details.join(" | "))
    }
}

#[cfg(test)]
mod tests {
    use super::{render_grouped, render_list};
    use chrono::{NaiveDate, TimeZone, Utc};
    use focus_core::{DayContext, GroupedView, TaskRecord, TaskStatus};

    fn days() -> DayContext<Utc> {
        DayContext::new(NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(), Utc)
    }

    fn active(title: &str) -> TaskRecord {
        let mut task = TaskRecord::new(title);
        task.status = TaskStatus::Active;
        task
    }

    #[test]
    fn list_line_shows_badges_and_dates() {
        let mut late = active("Renew passport");
        late.due_date = Some(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap());
        let mut deferred = active("Plan vacation");
        deferred.defer_date = Some(Utc.with_ymd_and_hms(2024, 6, 15, 0, 0, 0).unwrap());
        let inbox = TaskRecord::new("Call dentist");

        let out = render_list(&[late, deferred, inbox], &[], &days());
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "[ ] Renew passport <red> - Due Jun 1 (Overdue)");
        assert_eq!(lines[1], "[ ] Plan vacation - Deferred until Jun 15");
        assert_eq!(lines[2], "[ ] Call dentist <blue> - Inbox");
    }

    #[test]
    fn list_counts_open_subtasks() {
        let parent = active("Move house");
        let mut child = active("Buy boxes");
        child.parent_id = Some(parent.id);
        let context = vec![parent.clone(), child];

        let out = render_list(std::slice::from_ref(&parent), &context, &days());
        assert_eq!(out, "[ ] Move house - 1 subtasks\n");
    }

    #[test]
    fn grouped_skips_empty_sections_in_display_order() {
        let mut tomorrow = active("Pick up parcel");
        tomorrow.due_date = Some(Utc.with_ymd_and_hms(2024, 6, 11, 9, 0, 0).unwrap());
        let floating = active("Read book");
        let tasks = vec![floating, tomorrow];
        let grouped = GroupedView::new(tasks.clone(), &days());

        let out = render_grouped(&grouped, &tasks, &days());
        assert_eq!(
            out,
            "Tomorrow (1)\n[ ] Pick up parcel - Due Jun 11 (Due tomorrow)\n\nNo Due Date (1)\n[ ] Read book\n"
        );
    }

    #[test]
    fn grouped_empty_prints_hint() {
        let grouped = GroupedView::new(Vec::new(), &days());
        assert_eq!(
            render_grouped(&grouped, &[], &days()),
            "No tasks available to work on right now.\n"
        );
    }
}
