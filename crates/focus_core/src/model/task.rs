//! Task record model.
//!
//! # Responsibility
//! - Define the canonical task snapshot read by triage functions.
//! - Provide lifecycle helpers for completion and reopening.
//!
//! # Invariants
//! - `id` is never the nil UUID.
//! - `title` is non-empty after trimming and at most `TITLE_MAX_CHARS` long.
//! - Date fields are optional; absence is `None`, never a sentinel value.

use crate::calendar::{parse_task_date, DateParseError};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier of a task.
pub type TaskId = Uuid;

/// Stable identifier of the project a task belongs to.
pub type ProjectId = Uuid;

/// Maximum title length in characters.
pub const TITLE_MAX_CHARS: usize = 500;
/// Maximum notes length in characters.
pub const NOTES_MAX_CHARS: usize = 5000;

/// Lifecycle state of a task.
///
/// Mutually exclusive and never derived from dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Captured but not yet processed.
    Inbox,
    /// Committed work that may show up in the available view.
    Active,
    /// Deliberately parked outside of triage.
    Someday,
    /// Finished.
    Completed,
}

impl TaskStatus {
    /// Stable wire string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Inbox => "inbox",
            Self::Active => "active",
            Self::Someday => "someday",
            Self::Completed => "completed",
        }
    }

    /// Parses a wire string. Surrounding whitespace and case are ignored.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "inbox" => Some(Self::Inbox),
            "active" => Some(Self::Active),
            "someday" => Some(Self::Someday),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    /// Human-readable label for list headers and badges.
    pub fn display_label(self) -> &'static str {
        match self {
            Self::Inbox => "Inbox",
            Self::Active => "Active",
            Self::Someday => "Someday",
            Self::Completed => "Completed",
        }
    }
}

impl Display for TaskStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation failures for task records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    NilId,
    EmptyTitle,
    TitleTooLong { chars: usize, max: usize },
    NotesTooLong { chars: usize, max: usize },
    /// `reopen` only accepts a status that is not `completed`.
    ReopenAsCompleted,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "task id must not be the nil uuid"),
            Self::EmptyTitle => write!(f, "task title is required"),
            Self::TitleTooLong { chars, max } => {
                write!(f, "task title is too long ({chars} chars, max {max})")
            }
            Self::NotesTooLong { chars, max } => {
                write!(f, "task notes are too long ({chars} chars, max {max})")
            }
            Self::ReopenAsCompleted => write!(f, "cannot reopen a task as `completed`"),
        }
    }
}

impl Error for TaskValidationError {}

/// Failures while turning a wire record into a `TaskRecord`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskDecodeError {
    Date {
        field: &'static str,
        error: DateParseError,
    },
    Invalid(TaskValidationError),
}

impl Display for TaskDecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Date { field, error } => write!(f, "field `{field}`: {error}"),
            Self::Invalid(error) => write!(f, "{error}"),
        }
    }
}

impl Error for TaskDecodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Date { error, .. } => Some(error),
            Self::Invalid(error) => Some(error),
        }
    }
}

impl From<TaskValidationError> for TaskDecodeError {
    fn from(value: TaskValidationError) -> Self {
        Self::Invalid(value)
    }
}

/// Snapshot of one task as supplied by the storage collaborator.
///
/// The triage engine only reads `status`, `completed_at`, `due_date` and
/// `defer_date`; the remaining fields support views and ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTaskRecord")]
pub struct TaskRecord {
    pub id: TaskId,
    pub title: String,
    pub notes: Option<String>,
    pub status: TaskStatus,
    /// "Must be done by." Compared at calendar-day granularity.
    pub due_date: Option<DateTime<Utc>>,
    /// "Not actionable before." Compared at calendar-day granularity.
    pub defer_date: Option<DateTime<Utc>>,
    /// Authoritative completion marker, independent of `status`.
    pub completed_at: Option<DateTime<Utc>>,
    pub project_id: Option<ProjectId>,
    /// Parent task for subtasks.
    pub parent_id: Option<TaskId>,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

impl TaskRecord {
    /// Creates an inbox task with a generated id.
    pub fn new(title: impl Into<String>) -> Self {
        Self::build(Uuid::new_v4(), title.into())
    }

    /// Creates an inbox task with a caller-provided id.
    ///
    /// Used by import paths where identity already exists externally.
    ///
    /// # Errors
    /// - `NilId` when `id` is the nil UUID.
    pub fn with_id(id: TaskId, title: impl Into<String>) -> Result<Self, TaskValidationError> {
        if id.is_nil() {
            return Err(TaskValidationError::NilId);
        }
        Ok(Self::build(id, title.into()))
    }

    fn build(id: TaskId, title: String) -> Self {
        Self {
            id,
            title,
            notes: None,
            status: TaskStatus::Inbox,
            due_date: None,
            defer_date: None,
            completed_at: None,
            project_id: None,
            parent_id: None,
            sort_order: 0,
            created_at: Utc::now(),
        }
    }

    /// Validates identity and text limits.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.id.is_nil() {
            return Err(TaskValidationError::NilId);
        }
        if self.title.trim().is_empty() {
            return Err(TaskValidationError::EmptyTitle);
        }
        let title_chars = self.title.chars().count();
        if title_chars > TITLE_MAX_CHARS {
            return Err(TaskValidationError::TitleTooLong {
                chars: title_chars,
                max: TITLE_MAX_CHARS,
            });
        }
        if let Some(notes) = &self.notes {
            let notes_chars = notes.chars().count();
            if notes_chars > NOTES_MAX_CHARS {
                return Err(TaskValidationError::NotesTooLong {
                    chars: notes_chars,
                    max: NOTES_MAX_CHARS,
                });
            }
        }
        Ok(())
    }

    /// Marks the task done at `at`.
    pub fn mark_completed(&mut self, at: DateTime<Utc>) {
        self.status = TaskStatus::Completed;
        self.completed_at = Some(at);
    }

    /// Clears the completion marker and moves the task to an open status.
    pub fn reopen(&mut self, status: TaskStatus) -> Result<(), TaskValidationError> {
        if status == TaskStatus::Completed {
            return Err(TaskValidationError::ReopenAsCompleted);
        }
        self.status = status;
        self.completed_at = None;
        Ok(())
    }

    /// Returns whether the task carries a completion timestamp.
    pub fn is_done(&self) -> bool {
        self.completed_at.is_some()
    }
}

/// Task record as it arrives on the wire, date fields still unparsed.
///
/// Date fields take RFC 3339 timestamps or bare `YYYY-MM-DD` days; which
/// midnight a bare day means depends on the zone passed to `into_record`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTaskRecord {
    id: TaskId,
    title: String,
    notes: Option<String>,
    status: TaskStatus,
    due_date: Option<String>,
    defer_date: Option<String>,
    completed_at: Option<String>,
    project_id: Option<ProjectId>,
    parent_id: Option<TaskId>,
    #[serde(default)]
    sort_order: i32,
    created_at: Option<String>,
}

impl RawTaskRecord {
    /// Parses dates in `tz` and validates the result.
    ///
    /// A missing `created_at` becomes the Unix epoch.
    ///
    /// # Errors
    /// - Any date field that is neither blank, a real day, nor RFC 3339.
    /// - Any `validate` failure.
    pub fn into_record<Tz: TimeZone>(self, tz: &Tz) -> Result<TaskRecord, TaskDecodeError> {
        let record = TaskRecord {
            id: self.id,
            title: self.title,
            notes: self.notes,
            status: self.status,
            due_date: parse_field("due_date", self.due_date.as_deref(), tz)?,
            defer_date: parse_field("defer_date", self.defer_date.as_deref(), tz)?,
            completed_at: parse_field("completed_at", self.completed_at.as_deref(), tz)?,
            project_id: self.project_id,
            parent_id: self.parent_id,
            sort_order: self.sort_order,
            created_at: parse_field("created_at", self.created_at.as_deref(), tz)?
                .unwrap_or_default(),
        };
        record.validate()?;
        Ok(record)
    }
}

fn parse_field<Tz: TimeZone>(
    field: &'static str,
    value: Option<&str>,
    tz: &Tz,
) -> Result<Option<DateTime<Utc>>, TaskDecodeError> {
    match value {
        Some(value) => {
            parse_task_date(value, tz).map_err(|error| TaskDecodeError::Date { field, error })
        }
        None => Ok(None),
    }
}

/// Zone-less decoding reads bare days as UTC midnight.
impl TryFrom<RawTaskRecord> for TaskRecord {
    type Error = TaskDecodeError;

    fn try_from(raw: RawTaskRecord) -> Result<Self, Self::Error> {
        raw.into_record(&Utc)
    }
}
