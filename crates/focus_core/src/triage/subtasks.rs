//! Subtask counts over a flat task list linked by `parent_id`.

use crate::model::task::{TaskId, TaskRecord};

/// Returns whether any task in `tasks` names `parent` as its parent.
pub fn has_subtasks(parent: TaskId, tasks: &[TaskRecord]) -> bool {
    tasks.iter().any(|task| task.parent_id == Some(parent))
}

/// Counts direct children of `parent` without a completion timestamp.
pub fn count_incomplete_subtasks(parent: TaskId, tasks: &[TaskRecord]) -> usize {
    tasks
        .iter()
        .filter(|task| task.parent_id == Some(parent) && !task.is_done())
        .count()
}
