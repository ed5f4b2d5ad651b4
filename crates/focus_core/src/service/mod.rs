//! Core use-case services.
//!
//! # Responsibility
//! - Run triage use cases over records fetched from a task source.
//! - Keep CLI/UI callers decoupled from where records come from.

pub mod triage_service;
