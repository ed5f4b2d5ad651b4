//! Collection-level filtering and due-date bucketing.
//!
//! # Responsibility
//! - Produce the canonical "Available" feed.
//! - Partition tasks into the six due-date sections of the available view.
//!
//! # Invariants
//! - Input order is preserved within every output sequence.
//! - `group_by_due_date` places each input task in exactly one bucket.
//! - Bucketing looks at `due_date` only; status filtering happens upstream.

use crate::calendar::DayContext;
use crate::model::task::{TaskId, TaskRecord};
use crate::triage::availability::is_available;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Returns the available subset of `tasks`, in input order.
pub fn filter_available<Tz: TimeZone>(
    tasks: &[TaskRecord],
    days: &DayContext<Tz>,
) -> Vec<TaskRecord> {
    tasks
        .iter()
        .filter(|task| is_available(task, days))
        .cloned()
        .collect()
}

/// Due-date section. Variant order is the display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DueBucket {
    Overdue,
    Today,
    Tomorrow,
    ThisWeek,
    Later,
    NoDueDate,
}

impl DueBucket {
    /// All buckets in display order.
    pub const ALL: [DueBucket; 6] = [
        Self::Overdue,
        Self::Today,
        Self::Tomorrow,
        Self::ThisWeek,
        Self::Later,
        Self::NoDueDate,
    ];

    /// Stable wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Overdue => "overdue",
            Self::Today => "today",
            Self::Tomorrow => "tomorrow",
            Self::ThisWeek => "this_week",
            Self::Later => "later",
            Self::NoDueDate => "no_due_date",
        }
    }

    /// Section heading.
    pub fn title(self) -> &'static str {
        match self {
            Self::Overdue => "Overdue",
            Self::Today => "Today",
            Self::Tomorrow => "Tomorrow",
            Self::ThisWeek => "This Week",
            Self::Later => "Later",
            Self::NoDueDate => "No Due Date",
        }
    }

    /// Bucket for an optional due date.
    pub fn classify<Tz: TimeZone>(due: Option<&DateTime<Utc>>, days: &DayContext<Tz>) -> Self {
        match due {
            Some(due) => Self::for_due_day(days.day_of(due), days),
            None => Self::NoDueDate,
        }
    }

    /// Bucket for a due calendar day.
    ///
    /// "This week" is `(tomorrow, week_end]`, inclusive of `week_end`.
    pub fn for_due_day<Tz: TimeZone>(due_day: NaiveDate, days: &DayContext<Tz>) -> Self {
        if due_day < days.today() {
            Self::Overdue
        } else if due_day == days.today() {
            Self::Today
        } else if due_day == days.tomorrow() {
            Self::Tomorrow
        } else if due_day <= days.week_end() {
            Self::ThisWeek
        } else {
            Self::Later
        }
    }
}

/// Enum-keyed partition of task ids. Every bucket is always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DueBuckets {
    buckets: BTreeMap<DueBucket, Vec<TaskId>>,
}

impl DueBuckets {
    fn empty() -> Self {
        Self {
            buckets: DueBucket::ALL
                .into_iter()
                .map(|bucket| (bucket, Vec::new()))
                .collect(),
        }
    }

    /// Ids in `bucket`, in input order.
    pub fn get(&self, bucket: DueBucket) -> &[TaskId] {
        self.buckets.get(&bucket).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Buckets in display order, empty ones included.
    pub fn iter(&self) -> impl Iterator<Item = (DueBucket, &[TaskId])> + '_ {
        self.buckets
            .iter()
            .map(|(bucket, ids)| (*bucket, ids.as_slice()))
    }

    /// Bucket holding `id`, if it was part of the input.
    pub fn bucket_of(&self, id: TaskId) -> Option<DueBucket> {
        self.iter()
            .find(|(_, ids)| ids.contains(&id))
            .map(|(bucket, _)| bucket)
    }

    /// Total number of ids across all buckets.
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Partitions `tasks` into due-date buckets.
///
/// Typical callers pass the output of `filter_available`; completed or
/// deferred tasks passed here are bucketed by due date like any other.
pub fn group_by_due_date<Tz: TimeZone>(
    tasks: &[TaskRecord],
    days: &DayContext<Tz>,
) -> DueBuckets {
    let mut grouped = DueBuckets::empty();
    for task in tasks {
        let bucket = DueBucket::classify(task.due_date.as_ref(), days);
        grouped.buckets.entry(bucket).or_default().push(task.id);
    }
    grouped
}
