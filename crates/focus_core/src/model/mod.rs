//! Task domain model consumed by the triage engine.
//!
//! # Responsibility
//! - Define the task record shape shared with storage and presentation.
//! - Reject malformed records at the deserialization boundary.
//!
//! # Invariants
//! - Every task is identified by a stable, non-nil `TaskId`.
//! - `completed_at` presence, not `status`, decides whether a task is done.

pub mod task;
