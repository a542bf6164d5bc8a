//! Productivity statistics over a set of sessions.
//!
//! One pass over the sessions fills per-category counters for weekday,
//! day-part, location and location type, plus global metric totals. A
//! second, tiny pass turns the counters into average-score maps and
//! picks the most productive category of each dimension.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::counter::{rank_categories, MetricCounter, OrderedCounters, RunningMean};
use super::range::DateRange;
use super::time_of_day::TimeOfDay;
use super::weekday::DayOfWeek;
use crate::session::{Session, SessionStatus};

/// Aggregated productivity statistics for one user and date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductivityStats {
    pub date_range: DateRange,
    pub total_sessions: u32,
    pub completed_sessions: u32,
    pub cancelled_sessions: u32,
    /// Minutes
    pub total_duration: u64,
    pub average_rating: f64,
    pub average_focus: f64,
    pub average_energy: f64,
    pub average_mood: f64,
    pub average_distractions: f64,

    pub productivity_by_day: IndexMap<DayOfWeek, f64>,
    pub most_productive_day: Option<DayOfWeek>,

    pub productivity_by_time: IndexMap<TimeOfDay, f64>,
    pub most_productive_time: Option<TimeOfDay>,

    pub productivity_by_location: IndexMap<String, f64>,
    pub most_productive_location: Option<String>,

    pub productivity_by_location_type: IndexMap<String, f64>,
    pub most_productive_location_type: Option<String>,
}

impl ProductivityStats {
    /// Stats with every count at zero and no winners.
    pub fn empty(date_range: DateRange) -> Self {
        Self {
            date_range,
            total_sessions: 0,
            completed_sessions: 0,
            cancelled_sessions: 0,
            total_duration: 0,
            average_rating: 0.0,
            average_focus: 0.0,
            average_energy: 0.0,
            average_mood: 0.0,
            average_distractions: 0.0,
            productivity_by_day: IndexMap::new(),
            most_productive_day: None,
            productivity_by_time: IndexMap::new(),
            most_productive_time: None,
            productivity_by_location: IndexMap::new(),
            most_productive_location: None,
            productivity_by_location_type: IndexMap::new(),
            most_productive_location_type: None,
        }
    }

    /// Mean minutes per completed session.
    pub fn average_duration(&self) -> f64 {
        if self.completed_sessions == 0 {
            0.0
        } else {
            self.total_duration as f64 / f64::from(self.completed_sessions)
        }
    }
}

/// Working state of one aggregation call.
#[derive(Debug, Default)]
struct Accumulator {
    by_day: [MetricCounter; 7],
    by_time: [MetricCounter; 5],
    by_location: OrderedCounters,
    by_location_type: OrderedCounters,
    completed: u32,
    cancelled: u32,
    total_duration: u64,
    rating: RunningMean,
    focus: RunningMean,
    energy: RunningMean,
    mood: RunningMean,
    distractions: RunningMean,
}

impl Accumulator {
    fn record(&mut self, session: &Session) {
        let Some(actual) = session.actual_duration else {
            return;
        };
        let score = session.productivity_score();

        self.completed += 1;
        self.total_duration += u64::from(actual);

        self.by_day[DayOfWeek::of(&session.start_time).index()].record(session, score);
        self.by_time[TimeOfDay::of(&session.start_time).index()].record(session, score);

        if let Some(location) = &session.location {
            self.by_location.entry(&location.name).record(session, score);
            if let Some(kind) = location.kind() {
                self.by_location_type.entry(kind).record(session, score);
            }
        }

        self.rating.add_opt(session.rating);
        self.focus.add_opt(session.focus);
        self.energy.add_opt(session.energy);
        self.mood.add_opt(session.mood);
        self.distractions.add_opt(session.distractions);
    }

    fn finish(self, date_range: DateRange, total_sessions: u32) -> ProductivityStats {
        let (productivity_by_day, most_productive_day) =
            rank_categories(DayOfWeek::ALL.into_iter().zip(self.by_day.iter()));
        let (productivity_by_time, most_productive_time) =
            rank_categories(TimeOfDay::ALL.into_iter().zip(self.by_time.iter()));
        let (productivity_by_location, most_productive_location) =
            rank_categories(self.by_location.iter().map(|(k, c)| (k.clone(), c)));
        let (productivity_by_location_type, most_productive_location_type) =
            rank_categories(self.by_location_type.iter().map(|(k, c)| (k.clone(), c)));

        ProductivityStats {
            date_range,
            total_sessions,
            completed_sessions: self.completed,
            cancelled_sessions: self.cancelled,
            total_duration: self.total_duration,
            average_rating: self.rating.mean(),
            average_focus: self.focus.mean(),
            average_energy: self.energy.mean(),
            average_mood: self.mood.mean(),
            average_distractions: self.distractions.mean(),
            productivity_by_day,
            most_productive_day,
            productivity_by_time,
            most_productive_time,
            productivity_by_location,
            most_productive_location,
            productivity_by_location_type,
            most_productive_location_type,
        }
    }
}

/// Summarizes sessions already selected for a date range.
///
/// The aggregator does not filter by date; it trusts the caller for
/// that. It does apply the completed-with-duration gate itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatsAggregator;

impl StatsAggregator {
    pub fn new() -> Self {
        Self
    }

    pub fn aggregate(&self, sessions: &[Session], date_range: DateRange) -> ProductivityStats {
        let total_sessions = u32::try_from(sessions.len()).unwrap_or(u32::MAX);
        let mut acc = Accumulator::default();

        for session in sessions {
            if session.counts_toward_metrics() {
                acc.record(session);
            } else if session.status == SessionStatus::Cancelled {
                acc.cancelled += 1;
            }
        }

        if acc.completed == 0 {
            tracing::debug!(total_sessions, "no qualifying sessions in range");
            let mut stats = ProductivityStats::empty(date_range);
            stats.total_sessions = total_sessions;
            stats.cancelled_sessions = acc.cancelled;
            return stats;
        }

        tracing::debug!(
            total_sessions,
            completed = acc.completed,
            cancelled = acc.cancelled,
            locations = acc.by_location.len(),
            "aggregated productivity stats"
        );
        acc.finish(date_range, total_sessions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        // March 2024: the 3rd is a Sunday, the 4th a Monday
        Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap()
    }

    fn range() -> DateRange {
        DateRange::parse("2024-03-01", "2024-03-31").unwrap()
    }

    fn done(day: u32, hour: u32, rating: u8) -> Session {
        Session::planned("u1", "work", at(day, hour), 50)
            .completed(50)
            .with_rating(rating)
    }

    #[test]
    fn empty_input_is_not_an_error() {
        let stats = StatsAggregator::new().aggregate(&[], range());
        assert_eq!(stats.total_sessions, 0);
        assert_eq!(stats.completed_sessions, 0);
        assert!(stats.productivity_by_day.is_empty());
        assert!(stats.productivity_by_time.is_empty());
        assert!(stats.productivity_by_location.is_empty());
        assert_eq!(stats.most_productive_day, None);
        assert_eq!(stats.average_duration(), 0.0);
    }

    #[test]
    fn only_cancelled_sessions() {
        let sessions = vec![
            Session::planned("u1", "a", at(4, 10), 25).cancelled(),
            Session::planned("u1", "b", at(4, 11), 25),
        ];
        let stats = StatsAggregator::new().aggregate(&sessions, range());
        assert_eq!(stats.total_sessions, 2);
        assert_eq!(stats.cancelled_sessions, 1);
        assert_eq!(stats.completed_sessions, 0);
        assert!(stats.productivity_by_day.is_empty());
    }

    #[test]
    fn counts_and_durations() {
        let sessions = vec![
            done(4, 10, 4),
            Session::planned("u1", "b", at(5, 10), 30).completed(40),
            Session::planned("u1", "c", at(5, 14), 30).cancelled(),
            Session::planned("u1", "d", at(6, 14), 30),
        ];
        let stats = StatsAggregator::new().aggregate(&sessions, range());
        assert_eq!(stats.total_sessions, 4);
        assert_eq!(stats.completed_sessions, 2);
        assert_eq!(stats.cancelled_sessions, 1);
        assert_eq!(stats.total_duration, 90);
        assert_eq!(stats.average_duration(), 45.0);
        // only one session supplied a rating
        assert_eq!(stats.average_rating, 4.0);
    }

    #[test]
    fn metric_averages_use_their_own_presence_counts() {
        let sessions = vec![
            done(4, 10, 4).with_focus(8),
            done(4, 11, 2),
            done(4, 12, 3).with_focus(6).with_energy(5),
        ];
        let stats = StatsAggregator::new().aggregate(&sessions, range());
        assert_eq!(stats.average_rating, 3.0);
        assert_eq!(stats.average_focus, 7.0);
        assert_eq!(stats.average_energy, 5.0);
        assert_eq!(stats.average_mood, 0.0);
    }

    #[test]
    fn weekday_counts_sum_to_completed() {
        let sessions: Vec<_> = (1..=20).map(|d| done(d, 9 + d % 10, (d % 5 + 1) as u8)).collect();
        let acc = sessions.iter().fold(Accumulator::default(), |mut acc, s| {
            acc.record(s);
            acc
        });
        let total: u32 = acc.by_day.iter().map(|c| c.count).sum();
        assert_eq!(total, acc.completed);
        assert_eq!(total, 20);
    }

    #[test]
    fn most_productive_day_prefers_earlier_weekday_on_tie() {
        // Sunday and Monday score identically, Tuesday lower
        let sessions = vec![done(5, 10, 2), done(4, 10, 4), done(3, 10, 4)];
        let stats = StatsAggregator::new().aggregate(&sessions, range());
        assert_eq!(stats.productivity_by_day.len(), 3);
        assert_eq!(stats.most_productive_day, Some(DayOfWeek::Sunday));
        let days: Vec<_> = stats.productivity_by_day.keys().copied().collect();
        assert_eq!(days, [DayOfWeek::Sunday, DayOfWeek::Monday, DayOfWeek::Tuesday]);
    }

    #[test]
    fn most_productive_time_of_day() {
        let sessions = vec![done(4, 6, 2), done(4, 13, 5), done(4, 22, 5)];
        let stats = StatsAggregator::new().aggregate(&sessions, range());
        assert_eq!(stats.most_productive_time, Some(TimeOfDay::Afternoon));
        assert_eq!(stats.productivity_by_time[&TimeOfDay::EarlyMorning], 1.0);
        assert!(!stats.productivity_by_time.contains_key(&TimeOfDay::Evening));
    }

    #[test]
    fn locations_tie_break_by_first_seen() {
        let sessions = vec![
            done(4, 10, 3).with_location("Home", ""),
            done(4, 11, 5).with_location("Cafe Luna", "coffee shop"),
            done(4, 12, 5).with_location("City Library", "library"),
            done(4, 13, 2),
        ];
        let stats = StatsAggregator::new().aggregate(&sessions, range());
        let names: Vec<_> = stats.productivity_by_location.keys().cloned().collect();
        assert_eq!(names, ["Home", "Cafe Luna", "City Library"]);
        assert_eq!(stats.most_productive_location.as_deref(), Some("Cafe Luna"));

        // empty type is skipped, not bucketed
        let kinds: Vec<_> = stats.productivity_by_location_type.keys().cloned().collect();
        assert_eq!(kinds, ["coffee shop", "library"]);
        assert_eq!(stats.most_productive_location_type.as_deref(), Some("coffee shop"));
    }

    #[test]
    fn unrated_sessions_produce_no_winner() {
        // Tuesday afternoon, completed but never rated: score 0.0
        let sessions = vec![Session::planned("u1", "a", at(5, 14), 30)
            .completed(30)
            .with_location("Cafe", "coffee shop")];
        let stats = StatsAggregator::new().aggregate(&sessions, range());

        assert_eq!(stats.completed_sessions, 1);
        assert_eq!(stats.productivity_by_day[&DayOfWeek::Tuesday], 0.0);
        assert_eq!(stats.productivity_by_time[&TimeOfDay::Afternoon], 0.0);
        assert_eq!(stats.productivity_by_location["Cafe"], 0.0);
        assert_eq!(stats.most_productive_day, None);
        assert_eq!(stats.most_productive_time, None);
        assert_eq!(stats.most_productive_location, None);
        assert_eq!(stats.most_productive_location_type, None);
    }
}
