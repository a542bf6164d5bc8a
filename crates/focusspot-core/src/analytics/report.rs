//! Display-ready rendering of [`ProductivityStats`].

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::range::DateRange;
use super::stats::ProductivityStats;
use super::weekday::DayOfWeek;

/// Stats with weekday and day-part keys rendered as display strings.
///
/// A missing day winner renders as Sunday, the first weekday; the other
/// missing winners render as an empty string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductivityStatsReport {
    pub total_sessions: u32,
    pub completed_sessions: u32,
    pub cancelled_sessions: u32,
    pub total_duration: u64,
    pub average_duration: f64,

    pub average_rating: f64,
    pub average_focus: f64,
    pub average_energy: f64,
    pub average_mood: f64,
    pub average_distractions: f64,

    pub productivity_by_day: IndexMap<String, f64>,
    pub most_productive_day: String,
    pub productivity_by_time: IndexMap<String, f64>,
    pub most_productive_time: String,
    pub productivity_by_location: IndexMap<String, f64>,
    pub most_productive_location: String,
    pub productivity_by_location_type: IndexMap<String, f64>,
    pub most_productive_location_type: String,

    pub date_range: DateRange,
}

impl From<&ProductivityStats> for ProductivityStatsReport {
    fn from(stats: &ProductivityStats) -> Self {
        Self {
            total_sessions: stats.total_sessions,
            completed_sessions: stats.completed_sessions,
            cancelled_sessions: stats.cancelled_sessions,
            total_duration: stats.total_duration,
            average_duration: stats.average_duration(),
            average_rating: stats.average_rating,
            average_focus: stats.average_focus,
            average_energy: stats.average_energy,
            average_mood: stats.average_mood,
            average_distractions: stats.average_distractions,
            productivity_by_day: stats
                .productivity_by_day
                .iter()
                .map(|(day, score)| (day.name().to_string(), *score))
                .collect(),
            most_productive_day: stats
                .most_productive_day
                .unwrap_or(DayOfWeek::Sunday)
                .name()
                .to_string(),
            productivity_by_time: stats
                .productivity_by_time
                .iter()
                .map(|(tod, score)| (tod.label().to_string(), *score))
                .collect(),
            most_productive_time: stats
                .most_productive_time
                .map(|t| t.label().to_string())
                .unwrap_or_default(),
            productivity_by_location: stats.productivity_by_location.clone(),
            most_productive_location: stats.most_productive_location.clone().unwrap_or_default(),
            productivity_by_location_type: stats.productivity_by_location_type.clone(),
            most_productive_location_type: stats
                .most_productive_location_type
                .clone()
                .unwrap_or_default(),
            date_range: stats.date_range,
        }
    }
}
