//! Day-of-week category, ordered Sunday first.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DayOfWeek {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl DayOfWeek {
    /// Sunday through Saturday.
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Sunday,
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
    ];

    pub fn of(timestamp: &DateTime<Utc>) -> Self {
        Self::ALL[timestamp.weekday().num_days_from_sunday() as usize]
    }

    /// Position in [`DayOfWeek::ALL`] (Sunday = 0).
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            DayOfWeek::Sunday => "Sunday",
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn maps_chrono_weekdays() {
        // 2024-03-03 was a Sunday
        let sunday = Utc.with_ymd_and_hms(2024, 3, 3, 12, 0, 0).unwrap();
        assert_eq!(DayOfWeek::of(&sunday), DayOfWeek::Sunday);
        let saturday = Utc.with_ymd_and_hms(2024, 3, 9, 23, 59, 0).unwrap();
        assert_eq!(DayOfWeek::of(&saturday), DayOfWeek::Saturday);
    }

    #[test]
    fn index_is_sunday_based() {
        assert_eq!(DayOfWeek::Sunday.index(), 0);
        assert_eq!(DayOfWeek::Saturday.index(), 6);
        assert_eq!(DayOfWeek::Wednesday.to_string(), "Wednesday");
    }
}
