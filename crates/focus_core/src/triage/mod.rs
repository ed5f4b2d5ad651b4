//! Task triage engine.
//!
//! # Responsibility
//! - Decide whether a task is actionable today.
//! - Classify tasks into due-date urgency buckets.
//! - Apply both across collections without mutating the input.
//!
//! # Invariants
//! - Every function takes the reference day as a `DayContext`; none reads
//!   the wall clock.
//! - Date comparisons happen on calendar days, never on raw timestamps.

pub mod availability;
pub mod grouping;
pub mod ordering;
pub mod subtasks;
pub mod urgency;
