//! Trend period granularity and calendar truncation.
//!
//! Every timestamp maps to exactly one period start: its calendar day,
//! the Monday of its ISO week, or the 1st of its month. Bucket contiguity
//! in the trend series depends on [`Period::truncate`] and
//! [`Period::advance`] agreeing with each other.

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Daily,
    #[default]
    Weekly,
    Monthly,
}

impl Period {
    pub fn as_str(self) -> &'static str {
        match self {
            Period::Daily => "daily",
            Period::Weekly => "weekly",
            Period::Monthly => "monthly",
        }
    }

    /// Lenient parse: anything unrecognized is weekly.
    pub fn parse_or_default(s: &str) -> Self {
        s.parse().unwrap_or_else(|_| {
            tracing::debug!(period = s, "unrecognized trend period, using weekly");
            Period::Weekly
        })
    }

    /// Start date of the period containing `t`.
    pub fn truncate(self, t: &DateTime<Utc>) -> NaiveDate {
        let date = t.date_naive();
        match self {
            Period::Daily => date,
            Period::Weekly => start_of_iso_week(date),
            Period::Monthly => start_of_month(date),
        }
    }

    /// Start of the period following the one starting at `start`.
    ///
    /// `None` only at the edge of the representable calendar.
    pub fn advance(self, start: NaiveDate) -> Option<NaiveDate> {
        match self {
            Period::Daily => start.checked_add_days(Days::new(1)),
            Period::Weekly => start.checked_add_days(Days::new(7)),
            Period::Monthly => start.checked_add_months(Months::new(1)),
        }
    }

    /// Display label for the period starting at `start`.
    ///
    /// Daily `"Mar 04"`, weekly `"Mar 4-10"` or `"Feb 26-Mar 03"` across a
    /// month boundary, monthly `"Mar 2024"`.
    pub fn label(self, start: NaiveDate) -> String {
        match self {
            Period::Daily => start.format("%b %d").to_string(),
            Period::Weekly => {
                let end = start.checked_add_days(Days::new(6)).unwrap_or(start);
                if start.month() == end.month() {
                    format!("{} {}-{}", start.format("%b"), start.day(), end.day())
                } else {
                    format!("{}-{}", start.format("%b %d"), end.format("%b %d"))
                }
            }
            Period::Monthly => start.format("%b %Y").to_string(),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Period::Daily),
            "weekly" => Ok(Period::Weekly),
            "monthly" => Ok(Period::Monthly),
            other => Err(ValidationError::UnknownPeriod(other.to_string())),
        }
    }
}

/// Monday of the ISO week containing `date`; Sunday belongs to the week
/// that began six days earlier.
pub fn start_of_iso_week(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}

/// First day of the month containing `date`.
pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}
