//! Deadline presentation for tasks.
//!
//! The backend exchanges deadlines as UTC instants (`2024-01-02T03:04:05.000Z`).
//! Edit forms and task cards work with minute-precision strings in the
//! viewer's time zone. Everything here is a pure function: callers pass the
//! reference "now" explicitly and may pin the time zone with the `*_in`
//! variants.

use chrono::{
    DateTime, Datelike, Local, LocalResult, NaiveDateTime, SecondsFormat, TimeZone, Timelike, Utc,
};
use std::fmt;

use super::error::TimeViewError;

/// An absolute point in time as exchanged with the backend.
pub type Instant = DateTime<Utc>;

/// Appended to the formatted deadline of a task whose deadline has passed.
pub const OVERDUE_MARKER: &str = "※期限が過ぎたタスクです";

const SECONDS_PER_DAY: i64 = 86_400;
const SECONDS_PER_HOUR: i64 = 3_600;
const SECONDS_PER_MINUTE: i64 = 60;

// Both the `datetime-local` form (T) and the pre-filled value (space) are
// submitted back unchanged when the user does not touch the field.
const EDITABLE_INPUT_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
];

/// Textual layout of a local, minute-precision timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// `YYYY-MM-DDTHH:MM`, the value of a date/time input control.
    Editable,
    /// `YYYY-MM-DD HH:MM`, used to pre-fill an edit form.
    Prefill,
    /// `YYYY/MM/DD HH:MM`, read-only display.
    Display,
}

impl Layout {
    fn separators(self) -> (char, char) {
        match self {
            Layout::Editable => ('-', 'T'),
            Layout::Prefill => ('-', ' '),
            Layout::Display => ('/', ' '),
        }
    }
}

/// A formatted deadline together with its overdue flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayDeadline {
    pub text: String,
    pub is_overdue: bool,
}

impl fmt::Display for DisplayDeadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_overdue {
            write!(f, "{} {}", self.text, OVERDUE_MARKER)
        } else {
            write!(f, "{}", self.text)
        }
    }
}

/// Whole days, hours and minutes left until a deadline. Never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RemainingTime {
    pub days: u64,
    pub hours: u32,
    pub minutes: u32,
}

impl RemainingTime {
    pub const ZERO: RemainingTime = RemainingTime {
        days: 0,
        hours: 0,
        minutes: 0,
    };

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl fmt::Display for RemainingTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}日 {}時間 {}分", self.days, self.hours, self.minutes)
    }
}

/// Parse an RFC 3339 instant with any offset and normalize it to UTC.
pub fn parse_instant(input: &str) -> Result<Instant, TimeViewError> {
    DateTime::parse_from_rfc3339(input.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|err| TimeViewError::parse(input, err))
}

/// Canonical form sent to the backend: millisecond precision, `Z` suffix.
pub fn format_instant(instant: Instant) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Format `instant` in `tz`, truncated to the minute.
pub fn format_local<Tz: TimeZone>(instant: Instant, tz: &Tz, layout: Layout) -> String {
    let local = instant.with_timezone(tz);
    let (date_sep, time_sep) = layout.separators();
    format!(
        "{:04}{date_sep}{:02}{date_sep}{:02}{time_sep}{:02}:{:02}",
        local.year(),
        local.month(),
        local.day(),
        local.hour(),
        local.minute()
    )
}

/// Convert a backend instant string to the local layout requested.
pub fn to_local_in<Tz: TimeZone>(
    input: &str,
    tz: &Tz,
    layout: Layout,
) -> Result<String, TimeViewError> {
    let instant = parse_instant(input)?;
    Ok(format_local(instant, tz, layout))
}

pub fn to_editable_local_in<Tz: TimeZone>(input: &str, tz: &Tz) -> Result<String, TimeViewError> {
    to_local_in(input, tz, Layout::Editable)
}

/// Backend instant to `YYYY-MM-DDTHH:MM` in the local time zone.
pub fn to_editable_local(input: &str) -> Result<String, TimeViewError> {
    to_editable_local_in(input, &Local)
}

/// Interpret an edited local timestamp in `tz`.
///
/// A wall time skipped by a DST transition is rejected; one repeated by a
/// transition resolves to the earlier instant.
pub fn parse_editable_local_in<Tz: TimeZone>(text: &str, tz: &Tz) -> Result<Instant, TimeViewError> {
    let trimmed = text.trim();
    let naive = EDITABLE_INPUT_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| TimeViewError::parse(text, "expected YYYY-MM-DDTHH:MM"))?;
    // Minute precision; seconds typed by hand are dropped.
    let naive = naive.with_second(0).unwrap_or(naive);

    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest.with_timezone(&Utc)),
        LocalResult::None => Err(TimeViewError::parse(
            text,
            "local time does not exist in this time zone",
        )),
    }
}

pub fn from_editable_local_in<Tz: TimeZone>(text: &str, tz: &Tz) -> Result<String, TimeViewError> {
    parse_editable_local_in(text, tz).map(format_instant)
}

/// Local `YYYY-MM-DDTHH:MM` back to the canonical UTC instant string.
pub fn from_editable_local(text: &str) -> Result<String, TimeViewError> {
    from_editable_local_in(text, &Local)
}

pub fn render_deadline_in<Tz: TimeZone>(deadline: Instant, now: Instant, tz: &Tz) -> DisplayDeadline {
    DisplayDeadline {
        text: format_local(deadline, tz, Layout::Display),
        is_overdue: now > deadline,
    }
}

/// `YYYY/MM/DD HH:MM` in the local time zone; overdue only when `now` is
/// strictly after the deadline.
pub fn render_deadline(deadline: Instant, now: Instant) -> DisplayDeadline {
    render_deadline_in(deadline, now, &Local)
}

/// Time left until `deadline`, floored to the minute and clamped at zero.
pub fn remaining_time(deadline: Instant, now: Instant) -> RemainingTime {
    if now >= deadline {
        return RemainingTime::ZERO;
    }

    let seconds = (deadline - now).num_seconds();
    RemainingTime {
        days: (seconds / SECONDS_PER_DAY) as u64,
        hours: ((seconds % SECONDS_PER_DAY) / SECONDS_PER_HOUR) as u32,
        minutes: ((seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE) as u32,
    }
}
