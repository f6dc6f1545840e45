//! Calendar day key used for the daily post tally.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{Timestamp, ValidationError};

/// A UTC calendar day, serialized as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarDay(NaiveDate);

impl CalendarDay {
    /// Wraps a date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Builds a day from year/month/day, `None` if the date does not exist.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// The day `ts` falls on.
    pub fn of(ts: &Timestamp) -> Self {
        ts.day()
    }

    /// Returns the inner date.
    pub fn as_date(&self) -> NaiveDate {
        self.0
    }

    /// The following day. Saturates at the last representable date.
    pub fn next(&self) -> Self {
        Self(self.0.succ_opt().unwrap_or(self.0))
    }

    /// Midnight UTC at the start of this day.
    pub fn start(&self) -> Timestamp {
        Timestamp::from_datetime(self.0.and_time(NaiveTime::default()).and_utc())
    }
}

impl fmt::Display for CalendarDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for CalendarDay {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Self)
            .map_err(|e| ValidationError::invalid_format("calendar_day", e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_displays_iso_format() {
        let day: CalendarDay = "2024-02-29".parse().unwrap();
        assert_eq!(day.to_string(), "2024-02-29");
    }

    #[test]
    fn rejects_invalid_dates() {
        assert!("2023-02-29".parse::<CalendarDay>().is_err());
        assert!(CalendarDay::from_ymd(2023, 13, 1).is_none());
    }

    #[test]
    fn next_rolls_over_month() {
        let day = CalendarDay::from_ymd(2024, 1, 31).unwrap();
        assert_eq!(day.next(), CalendarDay::from_ymd(2024, 2, 1).unwrap());
    }

    #[test]
    fn start_is_midnight_of_same_day() {
        let day = CalendarDay::from_ymd(2024, 6, 1).unwrap();
        assert_eq!(day.start().day(), day);
        assert_eq!(day.start().to_string(), "2024-06-01T00:00:00+00:00");
    }

    #[test]
    fn serializes_as_date_string() {
        let day = CalendarDay::from_ymd(2024, 6, 1).unwrap();
        assert_eq!(serde_json::to_string(&day).unwrap(), "\"2024-06-01\"");
    }
}
