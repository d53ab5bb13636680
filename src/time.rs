//! Wall-clock parsing and relative time formatting.
//!
//! Tasks carry a `YYYY-MM-DD` date and a 12-hour `h:mm AM/PM` time. Both are
//! validated strictly: a malformed value is an error, never a best guess,
//! because a wrong instant silently misfires or skips notifications.

use crate::error::{ReminderError, Result};
use chrono::{DateTime, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};
use std::fmt;
use std::str::FromStr;

/// A validated time of day with minute precision, stored on a 24-hour clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WallClockTime {
    hour: u8,
    minute: u8,
}

impl WallClockTime {
    /// Build from 24-hour components.
    ///
    /// # Errors
    ///
    /// Returns [`ReminderError::InvalidTime`] when `hour > 23` or `minute > 59`.
    pub fn from_hm(hour: u8, minute: u8) -> Result<Self> {
        if hour > 23 || minute > 59 {
            return Err(ReminderError::InvalidTime(format!(
                "{hour:02}:{minute:02} is not a valid time of day"
            )));
        }
        Ok(Self { hour, minute })
    }

    /// Hour on a 24-hour clock (0-23).
    pub fn hour(&self) -> u8 {
        self.hour
    }

    /// Minute (0-59).
    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Convert to a chrono [`NaiveTime`].
    pub fn to_naive(self) -> NaiveTime {
        NaiveTime::from_hms_opt(u32::from(self.hour), u32::from(self.minute), 0)
            .unwrap_or(NaiveTime::MIN)
    }
}

impl FromStr for WallClockTime {
    type Err = ReminderError;

    /// Parse `h:mm AM` / `hh:mm PM` (marker case-insensitive, space optional).
    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: &str| ReminderError::InvalidTime(format!("{s:?}: {reason}"));

        let upper = s.trim().to_ascii_uppercase();
        let (clock, pm) = if let Some(rest) = upper.strip_suffix("AM") {
            (rest, false)
        } else if let Some(rest) = upper.strip_suffix("PM") {
            (rest, true)
        } else {
            return Err(invalid("missing AM/PM marker"));
        };

        let (h, m) = clock
            .trim_end()
            .split_once(':')
            .ok_or_else(|| invalid("expected h:mm"))?;

        if h.is_empty() || h.len() > 2 || !h.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("hour must be numeric"));
        }
        if m.len() != 2 || !m.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("minute must be two digits"));
        }

        let hour: u8 = h.parse().map_err(|_| invalid("hour must be numeric"))?;
        let minute: u8 = m.parse().map_err(|_| invalid("minute must be numeric"))?;
        if !(1..=12).contains(&hour) {
            return Err(invalid("hour must be 1-12"));
        }
        if minute > 59 {
            return Err(invalid("minute must be 0-59"));
        }

        let hour = match (hour, pm) {
            (12, false) => 0,
            (12, true) => 12,
            (h, false) => h,
            (h, true) => h + 12,
        };
        Ok(Self { hour, minute })
    }
}

impl fmt::Display for WallClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (hour, marker) = match self.hour {
            0 => (12, "AM"),
            h @ 1..=11 => (h, "AM"),
            12 => (12, "PM"),
            h => (h - 12, "PM"),
        };
        write!(f, "{hour}:{:02} {marker}", self.minute)
    }
}

/// Parse a `YYYY-MM-DD` calendar date.
///
/// # Errors
///
/// Returns [`ReminderError::InvalidTime`] for anything else.
pub fn parse_date(date: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|e| ReminderError::InvalidTime(format!("{date:?}: {e}")))
}

/// Resolve a local date and wall-clock time to an instant in `tz`.
///
/// An ambiguous local time (clocks rolled back) resolves to the earlier
/// instant; a local time skipped by a forward transition is an error.
///
/// # Errors
///
/// Returns [`ReminderError::InvalidTime`] when the local time does not exist.
pub fn resolve_local<Tz: TimeZone>(
    date: NaiveDate,
    time: WallClockTime,
    tz: &Tz,
) -> Result<DateTime<Tz>> {
    let naive = date.and_time(time.to_naive());
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(dt),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest),
        LocalResult::None => Err(ReminderError::InvalidTime(format!(
            "{naive} does not exist in the configured time zone"
        ))),
    }
}

/// Combine a `YYYY-MM-DD` date with a 12-hour `h:mm AM/PM` time in `tz`.
///
/// # Errors
///
/// Returns [`ReminderError::InvalidTime`] for malformed input or a
/// non-existent local time.
pub fn parse_wall_clock_time<Tz: TimeZone>(date: &str, time12h: &str, tz: &Tz) -> Result<DateTime<Tz>> {
    let date = parse_date(date)?;
    let time: WallClockTime = time12h.parse()?;
    resolve_local(date, time, tz)
}

/// Describe how long ago `instant` was, relative to `now`.
///
/// Minutes below one hour, hours below one day, days otherwise. Instants in
/// the future are clamped to zero minutes.
pub fn format_relative_past(instant: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - instant).num_minutes().max(0);
    if minutes < 60 {
        plural(minutes, "minute")
    } else if minutes < 1440 {
        plural(minutes / 60, "hour")
    } else {
        plural(minutes / 1440, "day")
    }
}

/// `"1 hour"`, `"3 hours"`.
pub(crate) fn count_with_unit(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("{count} {unit}")
    } else {
        format!("{count} {unit}s")
    }
}

fn plural(count: i64, unit: &str) -> String {
    format!("{} ago", count_with_unit(count, unit))
}
