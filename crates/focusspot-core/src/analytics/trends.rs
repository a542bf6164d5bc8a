//! Productivity trends bucketed by day, ISO week or month.

use chrono::{DateTime, Duration, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::counter::RunningMean;
use super::period::Period;
use super::range::DateRange;
use crate::session::Session;

/// Accumulated metrics of one calendar period.
#[derive(Debug, Clone, Default)]
struct PeriodBucket {
    sessions: u32,
    duration: u64,
    rating: RunningMean,
    focus: RunningMean,
    energy: RunningMean,
    mood: RunningMean,
    productivity: RunningMean,
}

impl PeriodBucket {
    fn record(&mut self, session: &Session, actual: u32) {
        self.sessions += 1;
        self.duration += u64::from(actual);
        self.rating.add_opt(session.rating);
        self.focus.add_opt(session.focus);
        self.energy.add_opt(session.energy);
        self.mood.add_opt(session.mood);

        // A zero score means the session could not be scored.
        let score = session.productivity_score();
        if score > 0.0 {
            self.productivity.add(score);
        }
    }
}

/// Chronological per-period series. All vectors have the same length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductivityTrends {
    pub period: Period,
    /// Start date of each bucket
    pub period_starts: Vec<NaiveDate>,
    /// Display labels
    pub dates: Vec<String>,
    /// Total minutes per bucket
    pub durations: Vec<u64>,
    pub ratings: Vec<f64>,
    pub focus: Vec<f64>,
    pub energy: Vec<f64>,
    pub mood: Vec<f64>,
    pub productivity: Vec<f64>,
}

impl ProductivityTrends {
    fn with_capacity(period: Period, n: usize) -> Self {
        Self {
            period,
            period_starts: Vec::with_capacity(n),
            dates: Vec::with_capacity(n),
            durations: Vec::with_capacity(n),
            ratings: Vec::with_capacity(n),
            focus: Vec::with_capacity(n),
            energy: Vec::with_capacity(n),
            mood: Vec::with_capacity(n),
            productivity: Vec::with_capacity(n),
        }
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Mean productivity over buckets that have any.
    pub fn average_productivity(&self) -> f64 {
        let mut mean = RunningMean::default();
        for p in self.productivity.iter().filter(|p| **p > 0.0) {
            mean.add(*p);
        }
        mean.mean()
    }

    /// Whether the later half of the scored buckets beats the earlier half.
    pub fn is_improving(&self) -> bool {
        let scored: Vec<f64> = self
            .productivity
            .iter()
            .copied()
            .filter(|p| *p > 0.0)
            .collect();
        if scored.len() < 2 {
            return false;
        }
        let (earlier, later) = scored.split_at(scored.len() / 2);
        let mean = |xs: &[f64]| xs.iter().sum::<f64>() / xs.len() as f64;
        mean(later) > mean(earlier)
    }
}

/// How far back the default trend range reaches for each period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendWindow {
    pub daily_days: u32,
    pub weekly_weeks: u32,
    pub monthly_months: u32,
}

impl Default for TrendWindow {
    fn default() -> Self {
        Self {
            daily_days: 30,
            weekly_weeks: 12,
            monthly_months: 12,
        }
    }
}

impl TrendWindow {
    /// Range ending at `now` covering this window for `period`.
    pub fn range_for(&self, period: Period, now: DateTime<Utc>) -> DateRange {
        let start = match period {
            Period::Daily => now - Duration::days(i64::from(self.daily_days)),
            Period::Weekly => now - Duration::weeks(i64::from(self.weekly_weeks)),
            Period::Monthly => now
                .checked_sub_months(Months::new(self.monthly_months))
                .unwrap_or(now),
        };
        DateRange {
            start_date: start,
            end_date: now,
        }
    }
}

/// Builds contiguous per-period series from a list of sessions.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrendBuilder;

impl TrendBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Bucket qualifying sessions by `period` over `range`.
    ///
    /// Every period between the truncated range bounds gets an entry,
    /// zero-filled when no session landed in it. Sessions whose period
    /// falls outside the range are dropped.
    pub fn build(&self, sessions: &[Session], period: Period, range: &DateRange) -> ProductivityTrends {
        let mut buckets = seed_buckets(period, range);

        let mut dropped = 0usize;
        for session in sessions {
            if !session.counts_toward_metrics() {
                continue;
            }
            let Some(actual) = session.actual_duration else {
                continue;
            };
            match buckets.get_mut(&period.truncate(&session.start_time)) {
                Some(bucket) => bucket.record(session, actual),
                None => {
                    dropped += 1;
                    tracing::trace!(session = %session.id, "session outside trend range");
                }
            }
        }

        tracing::debug!(
            %period,
            buckets = buckets.len(),
            sessions = sessions.len(),
            dropped,
            "built productivity trends"
        );

        // BTreeMap iteration is ascending by period start.
        let mut trends = ProductivityTrends::with_capacity(period, buckets.len());
        for (start, bucket) in buckets {
            trends.period_starts.push(start);
            trends.dates.push(period.label(start));
            trends.durations.push(bucket.duration);
            trends.ratings.push(bucket.rating.mean());
            trends.focus.push(bucket.focus.mean());
            trends.energy.push(bucket.energy.mean());
            trends.mood.push(bucket.mood.mean());
            trends.productivity.push(bucket.productivity.mean());
        }
        trends
    }
}

/// One empty bucket per period from `truncate(start)` to `truncate(end)` inclusive.
fn seed_buckets(period: Period, range: &DateRange) -> BTreeMap<NaiveDate, PeriodBucket> {
    let last = period.truncate(&range.end_date);
    let mut buckets = BTreeMap::new();
    let mut current = Some(period.truncate(&range.start_date));
    while let Some(start) = current.filter(|s| *s <= last) {
        buckets.insert(start, PeriodBucket::default());
        current = period.advance(start);
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn done(start: DateTime<Utc>, actual: u32, rating: u8) -> Session {
        Session::planned("u1", "work", start, 50)
            .completed(actual)
            .with_rating(rating)
    }

    #[test]
    fn daily_range_has_one_entry_per_day_with_gaps_zero_filled() {
        let range = DateRange::parse("2024-03-04", "2024-03-06").unwrap();
        let sessions = vec![
            done(at(2024, 3, 4, 9), 60, 4).with_focus(6),
            done(at(2024, 3, 6, 9), 30, 2),
            done(at(2024, 3, 6, 15), 90, 5),
        ];
        let trends = TrendBuilder::new().build(&sessions, Period::Daily, &range);

        assert_eq!(trends.len(), 3);
        assert_eq!(trends.dates, ["Mar 04", "Mar 05", "Mar 06"]);
        assert_eq!(trends.durations, [60, 0, 120]);
        assert_eq!(trends.productivity[1], 0.0);
        assert_eq!(trends.ratings[1], 0.0);
        assert_eq!(trends.ratings[2], 3.5);
        assert_eq!(trends.focus[0], 6.0);
        assert_eq!(trends.focus[2], 0.0);
    }

    #[test]
    fn weekly_buckets_start_on_monday() {
        // Wednesday Feb 28 to Sunday Mar 10
        let range = DateRange::parse("2024-02-28", "2024-03-10").unwrap();
        let sessions = vec![done(at(2024, 3, 10, 20), 40, 3)];
        let trends = TrendBuilder::new().build(&sessions, Period::Weekly, &range);

        assert_eq!(
            trends.period_starts,
            [
                NaiveDate::from_ymd_opt(2024, 2, 26).unwrap(),
                NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            ]
        );
        assert_eq!(trends.dates, ["Feb 26-Mar 03", "Mar 4-10"]);
        // Sunday session lands in the week that started Monday the 4th
        assert_eq!(trends.durations, [0, 40]);
    }

    #[test]
    fn monthly_buckets_and_labels() {
        let range = DateRange::parse("2023-11-15", "2024-02-02").unwrap();
        let sessions = vec![
            done(at(2023, 12, 31, 23), 25, 4),
            done(at(2024, 2, 1, 8), 25, 4),
        ];
        let trends = TrendBuilder::new().build(&sessions, Period::Monthly, &range);
        assert_eq!(trends.dates, ["Nov 2023", "Dec 2023", "Jan 2024", "Feb 2024"]);
        assert_eq!(trends.durations, [0, 25, 0, 25]);
    }

    #[test]
    fn non_qualifying_and_out_of_range_sessions_are_ignored() {
        let range = DateRange::parse("2024-03-04", "2024-03-05").unwrap();
        let sessions = vec![
            Session::planned("u1", "planned", at(2024, 3, 4, 9), 30),
            Session::planned("u1", "cancelled", at(2024, 3, 4, 9), 30).cancelled(),
            done(at(2024, 3, 20, 9), 30, 5),
        ];
        let trends = TrendBuilder::new().build(&sessions, Period::Daily, &range);
        assert_eq!(trends.durations, [0, 0]);
        assert_eq!(trends.productivity, [0.0, 0.0]);
    }

    #[test]
    fn unscored_sessions_count_duration_but_not_productivity() {
        let range = DateRange::parse("2024-03-04", "2024-03-04").unwrap();
        let sessions = vec![
            Session::planned("u1", "no rating", at(2024, 3, 4, 9), 30).completed(30),
            done(at(2024, 3, 4, 11), 70, 5),
        ];
        let trends = TrendBuilder::new().build(&sessions, Period::Daily, &range);
        assert_eq!(trends.durations, [100]);
        // 5 + 1 for running over plan
        assert_eq!(trends.productivity, [6.0]);
    }

    #[test]
    fn trend_summaries() {
        let mut trends = ProductivityTrends::with_capacity(Period::Weekly, 4);
        trends.productivity = vec![2.0, 0.0, 4.0, 6.0];
        assert_eq!(trends.average_productivity(), 4.0);
        assert!(trends.is_improving());

        trends.productivity = vec![6.0, 2.0];
        assert!(!trends.is_improving());

        trends.productivity = vec![0.0, 5.0];
        assert!(!trends.is_improving());
        assert_eq!(trends.average_productivity(), 5.0);
    }

    #[test]
    fn default_windows() {
        let now = at(2024, 6, 15, 12);
        let window = TrendWindow::default();
        assert_eq!(window.range_for(Period::Daily, now).start_date, at(2024, 5, 16, 12));
        assert_eq!(window.range_for(Period::Weekly, now).start_date, at(2024, 3, 23, 12));
        assert_eq!(window.range_for(Period::Monthly, now).start_date, at(2023, 6, 15, 12));
    }

    proptest! {
        #[test]
        fn daily_series_is_contiguous(offset in 0i64..2000, days in 0i64..120) {
            let start = at(2020, 1, 1, 0) + Duration::days(offset) + Duration::hours(offset % 24);
            let range = DateRange::new(start, start + Duration::days(days)).unwrap();
            let trends = TrendBuilder::new().build(&[], Period::Daily, &range);
            prop_assert_eq!(trends.len() as i64, days + 1);
            for pair in trends.period_starts.windows(2) {
                prop_assert_eq!(pair[1] - pair[0], Duration::days(1));
            }
        }

        #[test]
        fn weekly_series_is_contiguous(offset in 0i64..2000, days in 0i64..400) {
            let start = at(2020, 1, 1, 0) + Duration::days(offset);
            let range = DateRange::new(start, start + Duration::days(days)).unwrap();
            let trends = TrendBuilder::new().build(&[], Period::Weekly, &range);
            prop_assert!(!trends.is_empty());
            for pair in trends.period_starts.windows(2) {
                prop_assert_eq!(pair[1] - pair[0], Duration::days(7));
            }
        }
    }
}
