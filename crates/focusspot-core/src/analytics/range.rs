//! Inclusive date ranges for analytics queries.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Inclusive `[start_date, end_date]` instant range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

impl DateRange {
    /// # Errors
    /// Returns [`ValidationError::InvalidTimeRange`] when `end` precedes `start`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, ValidationError> {
        if end < start {
            return Err(ValidationError::InvalidTimeRange { start, end });
        }
        Ok(Self {
            start_date: start,
            end_date: end,
        })
    }

    /// The `days` days leading up to `now`.
    pub fn last_days(now: DateTime<Utc>, days: u32) -> Self {
        Self {
            start_date: now - Duration::days(i64::from(days)),
            end_date: now,
        }
    }

    /// Whole calendar days: midnight of `start` through 23:59:59 of `end`.
    ///
    /// # Errors
    /// Returns an error when `end` is before `start`.
    pub fn from_dates(start: NaiveDate, end: NaiveDate) -> Result<Self, ValidationError> {
        Self::new(midnight(start), end_of_day(midnight(end)))
    }

    /// Parse user supplied bounds. Each bound is either `YYYY-MM-DD` or an
    /// RFC 3339 timestamp; the end bound is extended to cover its whole day.
    ///
    /// # Errors
    /// Returns an error if either bound is malformed or the range is inverted.
    pub fn parse(start: &str, end: &str) -> Result<Self, ValidationError> {
        let start = parse_instant(start)?;
        let end = parse_instant(end)?;
        Self::new(start, end_of_day(end))
    }

    pub fn contains(&self, t: &DateTime<Utc>) -> bool {
        *t >= self.start_date && *t <= self.end_date
    }
}

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

fn end_of_day(t: DateTime<Utc>) -> DateTime<Utc> {
    t + Duration::days(1) - Duration::seconds(1)
}

fn parse_instant(s: &str) -> Result<DateTime<Utc>, ValidationError> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(midnight(date));
    }
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|_| ValidationError::InvalidDate(s.to_string()))
}
