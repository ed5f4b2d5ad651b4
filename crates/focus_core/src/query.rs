//! List views over task snapshots.
//!
//! # Responsibility
//! - Map the named list views (inbox, available, ...) to record filters.
//! - Combine view, status and project filters the way list requests do.
//!
//! # Invariants
//! - Filters never reorder records.
//! - Unknown view names are rejected, never mapped to `all`.

use crate::calendar::DayContext;
use crate::model::task::{ProjectId, TaskRecord, TaskStatus};
use crate::triage::availability::is_available;
use chrono::TimeZone;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Named task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskView {
    Inbox,
    Available,
    #[default]
    All,
    Completed,
    Someday,
}

impl TaskView {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Inbox => "inbox",
            Self::Available => "available",
            Self::All => "all",
            Self::Completed => "completed",
            Self::Someday => "someday",
        }
    }

    /// Parses a view name.
    pub fn parse(value: &str) -> Result<Self, ViewParseError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "inbox" => Ok(Self::Inbox),
            "available" => Ok(Self::Available),
            "all" => Ok(Self::All),
            "completed" => Ok(Self::Completed),
            "someday" => Ok(Self::Someday),
            other => Err(ViewParseError(other.to_string())),
        }
    }

    /// Returns whether `task` belongs in this view.
    pub fn matches<Tz: TimeZone>(self, task: &TaskRecord, days: &DayContext<Tz>) -> bool {
        match self {
            Self::All => true,
            Self::Inbox => task.status == TaskStatus::Inbox,
            Self::Someday => task.status == TaskStatus::Someday,
            Self::Completed => task.is_done() || task.status == TaskStatus::Completed,
            Self::Available => is_available(task, days),
        }
    }
}

/// Unknown view name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewParseError(pub String);

impl Display for ViewParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unsupported view `{}`; expected inbox|available|all|completed|someday",
            self.0
        )
    }
}

impl Error for ViewParseError {}

/// Filter options for listing tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskQuery {
    /// Exact status match, applied first.
    pub status: Option<TaskStatus>,
    pub project_id: Option<ProjectId>,
    pub view: TaskView,
}

impl TaskQuery {
    /// Query for one named view with no extra filters.
    pub fn view(view: TaskView) -> Self {
        Self {
            view,
            ..Self::default()
        }
    }

    pub fn matches<Tz: TimeZone>(&self, task: &TaskRecord, days: &DayContext<Tz>) -> bool {
        if self.status.is_some_and(|status| task.status != status) {
            return false;
        }
        if self.project_id.is_some() && task.project_id != self.project_id {
            return false;
        }
        self.view.matches(task, days)
    }

    /// Returns matching records in input order.
    pub fn apply<Tz: TimeZone>(
        &self,
        tasks: &[TaskRecord],
        days: &DayContext<Tz>,
    ) -> Vec<TaskRecord> {
        tasks
            .iter()
            .filter(|task| self.matches(task, days))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{TaskView, ViewParseError};

    #[test]
    fn parse_round_trips_every_view_name() {
        for view in [
            TaskView::Inbox,
            TaskView::Available,
            TaskView::All,
            TaskView::Completed,
            TaskView::Someday,
        ] {
            assert_eq!(TaskView::parse(view.as_str()), Ok(view));
        }
    }

    #[test]
    fn parse_rejects_unknown_view() {
        assert_eq!(
            TaskView::parse("Overdue"),
            Err(ViewParseError("overdue".to_string()))
        );
    }
}
