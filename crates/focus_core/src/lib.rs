//! Core domain logic for Focus.
//! Decides which tasks are actionable now and how urgent they are.

pub mod calendar;
pub mod logging;
pub mod model;
pub mod query;
pub mod service;
pub mod triage;

pub use calendar::{parse_task_date, DateParseError, DayContext};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::task::{
    ProjectId, RawTaskRecord, TaskDecodeError, TaskId, TaskRecord, TaskStatus,
    TaskValidationError,
};
pub use query::{TaskQuery, TaskView, ViewParseError};
pub use service::triage_service::{
    GroupedView, InMemoryTaskSource, SourceError, TaskSource, TriageError, TriageResult,
    TriageService,
};
pub use triage::availability::is_available;
pub use triage::grouping::{filter_available, group_by_due_date, DueBucket, DueBuckets};
pub use triage::ordering::{sort_by_priority, sort_by_storage_order};
pub use triage::subtasks::{count_incomplete_subtasks, has_subtasks};
pub use triage::urgency::{
    badge_tone, is_deferred, is_overdue, urgency_label, BadgeTone, UrgencyLabel,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
