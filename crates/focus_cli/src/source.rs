//! JSON snapshot task source.
//!
//! Accepts either a bare array of task records or the list-endpoint
//! envelope `{ "tasks": [...] }`. Bare `YYYY-MM-DD` dates are read as
//! midnight in the source's zone. Records come back in storage list order.

use chrono::TimeZone;
use focus_core::{sort_by_storage_order, RawTaskRecord, SourceError, TaskRecord, TaskSource};
use serde_json::Value;
use std::path::PathBuf;

pub struct JsonSnapshotSource<Tz: TimeZone> {
    path: PathBuf,
    tz: Tz,
}

impl<Tz: TimeZone> JsonSnapshotSource<Tz> {
    pub fn new(path: impl Into<PathBuf>, tz: Tz) -> Self {
        Self {
            path: path.into(),
            tz,
        }
    }
}

impl<Tz: TimeZone> TaskSource for JsonSnapshotSource<Tz> {
    fn load_tasks(&self) -> Result<Vec<TaskRecord>, SourceError> {
        let text = std::fs::read_to_string(&self.path)?;
        decode_snapshot(&text, &self.tz)
    }
}

fn decode_snapshot<Tz: TimeZone>(text: &str, tz: &Tz) -> Result<Vec<TaskRecord>, SourceError> {
    let value: Value =
        serde_json::from_str(text).map_err(|err| SourceError::Decode(err.to_string()))?;
    let records = match value {
        Value::Array(_) => value,
        Value::Object(mut envelope) => envelope.remove("tasks").ok_or_else(|| {
            SourceError::Decode("expected a `tasks` field in snapshot object".to_string())
        })?,
        _ => {
            return Err(SourceError::Decode(
                "snapshot must be an array or an object with `tasks`".to_string(),
            ))
        }
    };
    let raw: Vec<RawTaskRecord> =
        serde_json::from_value(records).map_err(|err| SourceError::Decode(err.to_string()))?;
    let tasks = raw
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            record
                .into_record(tz)
                .map_err(|err| SourceError::Decode(format!("record {index}: {err}")))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(sort_by_storage_order(&tasks))
}

#[cfg(test)]
mod tests {
    use super::{decode_snapshot, JsonSnapshotSource};
    use chrono::{FixedOffset, TimeZone, Utc};
    use focus_core::{SourceError, TaskSource, TaskStatus};
    use std::io::Write;

    const RECORD: &str = r#"{
        "id": "11111111-2222-4333-8444-555555555555",
        "title": "Buy groceries",
        "status": "active",
        "due_date": "2024-06-12T00:00:00Z"
    }"#;

    #[test]
    fn accepts_bare_array_and_envelope() {
        let bare = decode_snapshot(&format!("[{RECORD}]"), &Utc).unwrap();
        let wrapped = decode_snapshot(&format!("{{\"tasks\": [{RECORD}]}}"), &Utc).unwrap();
        assert_eq!(bare, wrapped);
        assert_eq!(bare[0].status, TaskStatus::Active);
    }

    #[test]
    fn rejects_envelope_without_tasks() {
        let err = decode_snapshot(r#"{"items": []}"#, &Utc).unwrap_err();
        assert!(matches!(err, SourceError::Decode(_)));
    }

    #[test]
    fn rejects_malformed_dates_instead_of_dropping_them() {
        let broken = RECORD.replace("2024-06-12T00:00:00Z", "June 12th");
        let err = decode_snapshot(&format!("[{broken}]"), &Utc).unwrap_err();
        assert!(matches!(err, SourceError::Decode(_)));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[{RECORD}]").unwrap();

        let tasks = JsonSnapshotSource::new(file.path(), Utc).load_tasks().unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Buy groceries");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = JsonSnapshotSource::new(dir.path().join("absent.json"), Utc)
            .load_tasks()
            .unwrap_err();
        assert!(matches!(err, SourceError::Io(_)));
    }

    #[test]
    fn date_only_values_load_as_local_midnight() {
        let minus_four = FixedOffset::west_opt(4 * 3600).unwrap();
        let record = RECORD.replace("2024-06-12T00:00:00Z", "2024-06-09");
        let tasks = decode_snapshot(&format!("[{record}]"), &minus_four).unwrap();
        assert_eq!(
            tasks[0].due_date,
            Some(Utc.with_ymd_and_hms(2024, 6, 9, 4, 0, 0).unwrap())
        );
    }

    #[test]
    fn impossible_day_names_record_and_field() {
        let record = RECORD.replace("2024-06-12T00:00:00Z", "2024-02-30");
        let err = decode_snapshot(&format!("[{record}]"), &Utc).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("record 0"));
        assert!(message.contains("due_date"));
    }

    #[test]
    fn records_come_back_in_storage_order() {
        let snapshot = r#"[
            {"id": "11111111-2222-4333-8444-000000000001", "title": "Old",
             "status": "inbox", "created_at": "2024-06-01"},
            {"id": "11111111-2222-4333-8444-000000000002", "title": "New",
             "status": "inbox", "created_at": "2024-06-05"},
            {"id": "11111111-2222-4333-8444-000000000003", "title": "Pinned",
             "status": "inbox", "sort_order": -1, "created_at": "2024-05-01"}
        ]"#;
        let titles: Vec<String> = decode_snapshot(snapshot, &Utc)
            .unwrap()
            .into_iter()
            .map(|task| task.title)
            .collect();
        assert_eq!(titles, vec!["Pinned", "New", "Old"]);
    }
}
