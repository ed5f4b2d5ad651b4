//! Triage use-case service.
//!
//! # Responsibility
//! - Load task snapshots through the `TaskSource` seam.
//! - Serve list, available, grouped and sorted use cases.
//!
//! # Invariants
//! - Loaded records are validated before any triage runs on them.
//! - The service never writes back to its source.
//! - Log lines carry counts and view names only, never task text.

use crate::calendar::DayContext;
use crate::model::task::{TaskRecord, TaskValidationError};
use crate::query::{TaskQuery, TaskView};
use crate::triage::grouping::{filter_available, group_by_due_date, DueBucket, DueBuckets};
use crate::triage::ordering::sort_by_priority;
use chrono::TimeZone;
use log::{debug, warn};
use serde::Serialize;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type TriageResult<T> = Result<T, TriageError>;

/// Failure while fetching records from a task source.
#[derive(Debug)]
pub enum SourceError {
    Io(std::io::Error),
    /// Records exist but cannot be decoded.
    Decode(String),
    /// The source cannot serve records right now.
    Unavailable(String),
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Decode(message) => write!(f, "invalid task snapshot: {message}"),
            Self::Unavailable(message) => write!(f, "task source unavailable: {message}"),
        }
    }
}

impl Error for SourceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Decode(_) => None,
            Self::Unavailable(_) => None,
        }
    }
}

impl From<std::io::Error> for SourceError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Service-level error.
#[derive(Debug)]
pub enum TriageError {
    Source(SourceError),
    InvalidRecord {
        index: usize,
        error: TaskValidationError,
    },
}

impl Display for TriageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Source(err) => write!(f, "{err}"),
            Self::InvalidRecord { index, error } => {
                write!(f, "invalid task record at index {index}: {error}")
            }
        }
    }
}

impl Error for TriageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Source(err) => Some(err),
            Self::InvalidRecord { error, .. } => Some(error),
        }
    }
}

impl From<SourceError> for TriageError {
    fn from(value: SourceError) -> Self {
        Self::Source(value)
    }
}

/// Supplier of task snapshots (storage, API responses, files).
pub trait TaskSource {
    fn load_tasks(&self) -> Result<Vec<TaskRecord>, SourceError>;
}

/// Source backed by an owned in-memory snapshot.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskSource {
    tasks: Vec<TaskRecord>,
}

impl InMemoryTaskSource {
    pub fn new(tasks: Vec<TaskRecord>) -> Self {
        Self { tasks }
    }
}

impl TaskSource for InMemoryTaskSource {
    fn load_tasks(&self) -> Result<Vec<TaskRecord>, SourceError> {
        Ok(self.tasks.clone())
    }
}

/// Available tasks together with their due-date sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupedView {
    tasks: Vec<TaskRecord>,
    buckets: DueBuckets,
    /// Positions into `tasks`, per bucket; ids alone are ambiguous on
    /// duplicate input.
    #[serde(skip)]
    positions: BTreeMap<DueBucket, Vec<usize>>,
}

impl GroupedView {
    /// Groups `tasks` by due day.
    pub fn new<Tz: TimeZone>(tasks: Vec<TaskRecord>, days: &DayContext<Tz>) -> Self {
        let buckets = group_by_due_date(&tasks, days);
        let mut positions: BTreeMap<DueBucket, Vec<usize>> = BTreeMap::new();
        for (index, task) in tasks.iter().enumerate() {
            let bucket = DueBucket::classify(task.due_date.as_ref(), days);
            positions.entry(bucket).or_default().push(index);
        }
        Self {
            tasks,
            buckets,
            positions,
        }
    }

    pub fn tasks(&self) -> &[TaskRecord] {
        &self.tasks
    }

    pub fn buckets(&self) -> &DueBuckets {
        &self.buckets
    }

    /// Records in `bucket`, in section order.
    pub fn tasks_in(&self, bucket: DueBucket) -> Vec<&TaskRecord> {
        self.positions
            .get(&bucket)
            .into_iter()
            .flatten()
            .filter_map(|index| self.tasks.get(*index))
            .collect()
    }
}

/// Use-case service over a task source.
pub struct TriageService<S: TaskSource> {
    source: S,
}

impl<S: TaskSource> TriageService<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Lists records matching `query`, in source order.
    pub fn list<Tz: TimeZone>(
        &self,
        query: &TaskQuery,
        days: &DayContext<Tz>,
    ) -> TriageResult<Vec<TaskRecord>> {
        let tasks = self.load()?;
        let listed = query.apply(&tasks, days);
        debug!(
            "event=tasks_list module=service status=ok view={} today={} input={} output={}",
            query.view.as_str(),
            days.today(),
            tasks.len(),
            listed.len()
        );
        Ok(listed)
    }

    /// Lists records available today.
    pub fn available<Tz: TimeZone>(
        &self,
        days: &DayContext<Tz>,
    ) -> TriageResult<Vec<TaskRecord>> {
        let tasks = self.load()?;
        let available = filter_available(&tasks, days);
        debug!(
            "event=tasks_available module=service status=ok today={} input={} output={}",
            days.today(),
            tasks.len(),
            available.len()
        );
        Ok(available)
    }

    /// Available records split into due-date sections.
    pub fn available_grouped<Tz: TimeZone>(
        &self,
        days: &DayContext<Tz>,
    ) -> TriageResult<GroupedView> {
        let grouped = GroupedView::new(self.available(days)?, days);
        let buckets = grouped.buckets();
        debug!(
            "event=tasks_grouped module=service status=ok today={} overdue={} today_count={} no_due={}",
            days.today(),
            buckets.get(DueBucket::Overdue).len(),
            buckets.get(DueBucket::Today).len(),
            buckets.get(DueBucket::NoDueDate).len()
        );
        Ok(grouped)
    }

    /// Lists records matching `query` in priority order.
    pub fn sorted<Tz: TimeZone>(
        &self,
        query: &TaskQuery,
        days: &DayContext<Tz>,
    ) -> TriageResult<Vec<TaskRecord>> {
        let listed = self.list(query, days)?;
        Ok(sort_by_priority(&listed, days))
    }

    /// Convenience for a named view without extra filters.
    pub fn view<Tz: TimeZone>(
        &self,
        view: TaskView,
        days: &DayContext<Tz>,
    ) -> TriageResult<Vec<TaskRecord>> {
        self.list(&TaskQuery::view(view), days)
    }

    fn load(&self) -> TriageResult<Vec<TaskRecord>> {
        let tasks = self.source.load_tasks().map_err(|err| {
            warn!("event=tasks_load module=service status=error error={err}");
            TriageError::from(err)
        })?;
        for (index, task) in tasks.iter().enumerate() {
            task.validate().map_err(|error| {
                warn!("event=tasks_load module=service status=error index={index} reason=invalid_record");
                TriageError::InvalidRecord { index, error }
            })?;
        }
        Ok(tasks)
    }
}

#[cfg(test)]
mod tests {
    use super::{
        GroupedView, InMemoryTaskSource, SourceError, TaskSource, TriageError, TriageService,
    };
    use crate::calendar::DayContext;
    use crate::model::task::{TaskRecord, TaskStatus, TaskValidationError};
    use crate::triage::grouping::DueBucket;
    use chrono::{NaiveDate, TimeZone, Utc};

    struct OfflineSource;

    impl TaskSource for OfflineSource {
        fn load_tasks(&self) -> Result<Vec<TaskRecord>, SourceError> {
            Err(SourceError::Unavailable("replica offline".to_string()))
        }
    }

    fn days() -> DayContext<Utc> {
        DayContext::new(NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(), Utc)
    }

    #[test]
    fn source_errors_are_propagated() {
        let service = TriageService::new(OfflineSource);
        let err = service.available(&days()).unwrap_err();
        assert!(matches!(err, TriageError::Source(SourceError::Unavailable(_))));
        assert!(err.to_string().contains("replica offline"));
    }

    #[test]
    fn invalid_records_fail_the_whole_load() {
        let good = TaskRecord::new("fine");
        let mut bad = TaskRecord::new("broken");
        bad.title = "x".repeat(501);

        let service = TriageService::new(InMemoryTaskSource::new(vec![good, bad]));
        let err = service.available(&days()).unwrap_err();
        match err {
            TriageError::InvalidRecord { index, error } => {
                assert_eq!(index, 1);
                assert_eq!(
                    error,
                    TaskValidationError::TitleTooLong {
                        chars: 501,
                        max: 500
                    }
                );
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn tasks_in_resolves_duplicate_ids_by_position() {
        let mut late = TaskRecord::new("late copy");
        late.status = TaskStatus::Active;
        late.due_date = Some(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap());
        let mut current = late.clone();
        current.title = "current copy".to_string();
        current.due_date = Some(Utc.with_ymd_and_hms(2024, 6, 10, 9, 0, 0).unwrap());

        let grouped = GroupedView::new(vec![late, current], &days());
        let titles = |bucket| -> Vec<String> {
            grouped
                .tasks_in(bucket)
                .into_iter()
                .map(|task| task.title.clone())
                .collect()
        };
        assert_eq!(titles(DueBucket::Overdue), vec!["late copy"]);
        assert_eq!(titles(DueBucket::Today), vec!["current copy"]);
        assert!(titles(DueBucket::Later).is_empty());
    }
}
