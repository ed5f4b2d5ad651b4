//! Command-line front end for the triage engine.
//!
//! # Responsibility
//! - Load a JSON task snapshot and print one list view.
//! - Pin "today" once, at startup, and pass it down explicitly.

mod render;
mod source;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use focus_core::{
    default_log_level, init_logging, DayContext, InMemoryTaskSource, TaskQuery, TaskSource,
    TaskStatus, TaskView, TriageService,
};
use log::info;
use source::JsonSnapshotSource;
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(name = "focus", version, about = "Show which tasks are actionable today")]
struct Cli {
    /// JSON snapshot: an array of tasks or `{ "tasks": [...] }`.
    #[arg(long, env = "FOCUS_TASKS")]
    tasks: PathBuf,

    /// inbox | available | all | completed | someday
    #[arg(long, default_value = "available", value_parser = TaskView::parse)]
    view: TaskView,

    /// Exact status filter applied before the view.
    #[arg(long, value_parser = parse_status)]
    status: Option<TaskStatus>,

    /// Project id filter.
    #[arg(long)]
    project: Option<Uuid>,

    /// Reference day (YYYY-MM-DD); defaults to the local calendar day.
    #[arg(long, value_parser = parse_day)]
    today: Option<NaiveDate>,

    /// Split available tasks into due-date sections.
    #[arg(long)]
    grouped: bool,

    /// Order by priority instead of snapshot order.
    #[arg(long, conflicts_with = "grouped")]
    sort: bool,

    /// Print JSON instead of text.
    #[arg(long)]
    json: bool,

    #[arg(long, env = "FOCUS_LOG_LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for rolling log files; logging is off without it.
    #[arg(long, env = "FOCUS_LOG_DIR")]
    log_dir: Option<String>,
}

impl Cli {
    fn query(&self) -> TaskQuery {
        TaskQuery {
            status: self.status,
            project_id: self.project,
            view: self.view,
        }
    }
}

fn parse_status(value: &str) -> Result<TaskStatus, String> {
    TaskStatus::parse(value).ok_or_else(|| {
        format!("unsupported status `{value}`; expected inbox|active|someday|completed")
    })
}

fn parse_day(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|err| format!("invalid day `{value}`: {err}"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir).context("failed to initialize logging")?;
    }

    let days = match cli.today {
        Some(day) => DayContext::new(day, Local),
        None => DayContext::local_now(),
    };
    info!(
        "event=cli_run module=cli status=start view={} grouped={} sort={} today={}",
        cli.view.as_str(),
        cli.grouped,
        cli.sort,
        days.today()
    );

    let snapshot = JsonSnapshotSource::new(&cli.tasks, *days.timezone())
        .load_tasks()
        .with_context(|| format!("failed to load tasks from `{}`", cli.tasks.display()))?;
    let service = TriageService::new(InMemoryTaskSource::new(snapshot.clone()));

    let output = if cli.grouped {
        let grouped = service
            .available_grouped(&days)
            .context("failed to group available tasks")?;
        if cli.json {
            serde_json::to_string_pretty(&grouped)? + "\n"
        } else {
            render::render_grouped(&grouped, &snapshot, &days)
        }
    } else {
        let query = cli.query();
        let tasks = if cli.sort {
            service.sorted(&query, &days)
        } else {
            service.list(&query, &days)
        }
        .context("failed to list tasks")?;
        if cli.json {
            serde_json::to_string_pretty(&tasks)? + "\n"
        } else {
            render::render_list(&tasks, &snapshot, &days)
        }
    };

    print!("{output}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::Parser;
    use focus_core::{TaskStatus, TaskView};

    #[test]
    fn defaults_to_available_view() {
        let cli = Cli::try_parse_from(["focus", "--tasks", "/tmp/tasks.json"]).unwrap();
        assert_eq!(cli.view, TaskView::Available);
        assert!(!cli.grouped);
        assert_eq!(cli.query().status, None);
    }

    #[test]
    fn parses_filters_and_reference_day() {
        let cli = Cli::try_parse_from([
            "focus",
            "--tasks",
            "/tmp/tasks.json",
            "--view",
            "inbox",
            "--status",
            "Inbox",
            "--today",
            "2024-06-10",
        ])
        .unwrap();
        assert_eq!(cli.view, TaskView::Inbox);
        assert_eq!(cli.status, Some(TaskStatus::Inbox));
        assert_eq!(
            cli.today,
            Some(chrono::NaiveDate::from_ymd_opt(2024, 6, 10).unwrap())
        );
    }

    #[test]
    fn rejects_unknown_view_and_bad_day() {
        assert!(Cli::try_parse_from(["focus", "--tasks", "t.json", "--view", "later"]).is_err());
        assert!(
            Cli::try_parse_from(["focus", "--tasks", "t.json", "--today", "June 10"]).is_err()
        );
    }

    #[test]
    fn grouped_and_sort_conflict() {
        assert!(
            Cli::try_parse_from(["focus", "--tasks", "t.json", "--grouped", "--sort"]).is_err()
        );
    }
}
