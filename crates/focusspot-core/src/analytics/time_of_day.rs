//! Day-part classification.

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of five fixed parts of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    /// 05:00-08:59
    EarlyMorning,
    /// 09:00-11:59
    LateMorning,
    /// 12:00-16:59
    Afternoon,
    /// 17:00-20:59
    Evening,
    /// 21:00-04:59
    Night,
}

impl TimeOfDay {
    /// All day-parts in their fixed enumeration order.
    pub const ALL: [TimeOfDay; 5] = [
        TimeOfDay::EarlyMorning,
        TimeOfDay::LateMorning,
        TimeOfDay::Afternoon,
        TimeOfDay::Evening,
        TimeOfDay::Night,
    ];

    /// Classify an hour of the day (0-23).
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=8 => TimeOfDay::EarlyMorning,
            9..=11 => TimeOfDay::LateMorning,
            12..=16 => TimeOfDay::Afternoon,
            17..=20 => TimeOfDay::Evening,
            _ => TimeOfDay::Night,
        }
    }

    /// Classify a timestamp by its hour.
    pub fn of(timestamp: &DateTime<Utc>) -> Self {
        Self::from_hour(timestamp.hour())
    }

    /// Position in [`TimeOfDay::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Human-readable label used in rendered reports.
    pub fn label(self) -> &'static str {
        match self {
            TimeOfDay::EarlyMorning => "Early Morning (5:00-8:59)",
            TimeOfDay::LateMorning => "Late Morning (9:00-11:59)",
            TimeOfDay::Afternoon => "Afternoon (12:00-16:59)",
            TimeOfDay::Evening => "Evening (17:00-20:59)",
            TimeOfDay::Night => "Night (21:00-4:59)",
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
