//! Calendar-day reference context and boundary date parsing.
//!
//! # Responsibility
//! - Carry the injected "today" used by every triage function.
//! - Truncate points in time to calendar days in one time zone.
//! - Parse user/storage date strings, rejecting anything ambiguous.
//!
//! # Invariants
//! - Triage code never reads the wall clock; only `DayContext::local_now`
//!   does, and only outermost call sites use it.
//! - `tomorrow` and `week_end` are derived from `today` once, at construction.

use chrono::{DateTime, Days, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Days between `today` and the inclusive end of the "this week" bucket.
pub const WEEK_HORIZON_DAYS: u64 = 7;

static DATE_ONLY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date-only regex"));

/// Reference day plus the time zone used for day truncation.
#[derive(Debug, Clone)]
pub struct DayContext<Tz: TimeZone> {
    today: NaiveDate,
    tomorrow: NaiveDate,
    week_end: NaiveDate,
    tz: Tz,
}

impl<Tz: TimeZone> DayContext<Tz> {
    /// Creates a context for an explicit reference day.
    pub fn new(today: NaiveDate, tz: Tz) -> Self {
        Self {
            today,
            tomorrow: add_days_saturating(today, 1),
            week_end: add_days_saturating(today, WEEK_HORIZON_DAYS),
            tz,
        }
    }

    /// Creates a context from an instant, using the instant's own zone.
    pub fn at(now: DateTime<Tz>) -> Self {
        Self::new(now.date_naive(), now.timezone())
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn tomorrow(&self) -> NaiveDate {
        self.tomorrow
    }

    /// Last day, inclusive, of the "this week" bucket.
    pub fn week_end(&self) -> NaiveDate {
        self.week_end
    }

    pub fn timezone(&self) -> &Tz {
        &self.tz
    }

    /// Local calendar day of a point in time.
    pub fn day_of(&self, instant: &DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.tz).date_naive()
    }

    /// Whole calendar days from today to the day of `instant`.
    ///
    /// Negative for past days.
    pub fn days_until(&self, instant: &DateTime<Utc>) -> i64 {
        self.day_of(instant).signed_duration_since(self.today).num_days()
    }

    /// Instant of local midnight on `day`.
    ///
    /// Returns `None` when midnight does not exist in this zone (DST gap).
    pub fn start_of_day(&self, day: NaiveDate) -> Option<DateTime<Utc>> {
        start_of_local_day(day, &self.tz)
    }
}

impl DayContext<Local> {
    /// Reads the wall clock once and pins today's local day.
    pub fn local_now() -> Self {
        Self::at(Local::now())
    }
}

fn add_days_saturating(day: NaiveDate, days: u64) -> NaiveDate {
    day.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX)
}

fn start_of_local_day<Tz: TimeZone>(day: NaiveDate, tz: &Tz) -> Option<DateTime<Utc>> {
    tz.from_local_datetime(&day.and_time(NaiveTime::MIN))
        .earliest()
        .map(|local| local.with_timezone(&Utc))
}

/// Errors for date strings that cannot be mapped to one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateParseError {
    /// Looked like `YYYY-MM-DD` but is not a real calendar day.
    InvalidCalendarDay { value: String },
    /// Neither a calendar day nor an RFC 3339 timestamp.
    InvalidTimestamp { value: String, message: String },
    /// Local midnight of the day is skipped by a DST transition.
    NonexistentLocalMidnight { day: NaiveDate },
}

impl Display for DateParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCalendarDay { value } => write!(f, "invalid calendar day `{value}`"),
            Self::InvalidTimestamp { value, message } => {
                write!(f, "invalid timestamp `{value}`: {message}")
            }
            Self::NonexistentLocalMidnight { day } => {
                write!(f, "local midnight does not exist on {day}")
            }
        }
    }
}

impl Error for DateParseError {}

/// Parses a task date field.
///
/// Accepts `YYYY-MM-DD` (local midnight in `tz`) or an RFC 3339 timestamp.
/// Empty input means the field is absent and yields `Ok(None)`.
///
/// # Errors
/// - Any other shape, or an impossible day, is rejected instead of guessed.
pub fn parse_task_date<Tz: TimeZone>(
    value: &str,
    tz: &Tz,
) -> Result<Option<DateTime<Utc>>, DateParseError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    if DATE_ONLY_RE.is_match(trimmed) {
        let day = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| {
            DateParseError::InvalidCalendarDay {
                value: trimmed.to_string(),
            }
        })?;
        return start_of_local_day(day, tz)
            .map(Some)
            .ok_or(DateParseError::NonexistentLocalMidnight { day });
    }

    DateTime::parse_from_rfc3339(trimmed)
        .map(|parsed| Some(parsed.with_timezone(&Utc)))
        .map_err(|err| DateParseError::InvalidTimestamp {
            value: trimmed.to_string(),
            message: err.to_string(),
        })
}
