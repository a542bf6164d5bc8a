//! Analytics queries against the session store.
//!
//! Resolves default date ranges from configuration, loads the user's
//! sessions and hands them to the engine.

use chrono::{DateTime, Utc};

use crate::analytics::{
    DateRange, Period, ProductivityStats, ProductivityTrends, StatsAggregator, TrendBuilder,
};
use crate::error::Result;
use crate::storage::{Config, SessionStore};

pub struct AnalyticsService<'a> {
    store: &'a SessionStore,
    config: &'a Config,
}

impl<'a> AnalyticsService<'a> {
    pub fn new(store: &'a SessionStore, config: &'a Config) -> Self {
        Self { store, config }
    }

    /// Productivity stats over `range`, or the configured trailing window
    /// ending at `now` when no range is given.
    ///
    /// # Errors
    /// Returns an error if sessions cannot be loaded.
    pub fn stats(
        &self,
        user_id: &str,
        range: Option<DateRange>,
        now: DateTime<Utc>,
    ) -> Result<ProductivityStats> {
        let range =
            range.unwrap_or_else(|| DateRange::last_days(now, self.config.stats.default_window_days));
        let sessions = self.store.sessions_in_range(user_id, &range)?;
        Ok(StatsAggregator::new().aggregate(&sessions, range))
    }

    /// Trend series for `period` over the configured window ending at `now`.
    ///
    /// # Errors
    /// Returns an error if sessions cannot be loaded.
    pub fn trends(
        &self,
        user_id: &str,
        period: Period,
        now: DateTime<Utc>,
    ) -> Result<ProductivityTrends> {
        let range = self.config.trends.window().range_for(period, now);
        let sessions = self.store.sessions_in_range(user_id, &range)?;
        Ok(TrendBuilder::new().build(&sessions, period, &range))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;
    use chrono::{Duration, TimeZone};

    #[test]
    fn stats_default_to_trailing_window() {
        let store = SessionStore::open_memory().unwrap();
        let config = Config::default();
        let now = Utc.with_ymd_and_hms(2024, 3, 31, 12, 0, 0).unwrap();

        store
            .insert(&Session::planned("u1", "recent", now - Duration::days(2), 30).completed(30))
            .unwrap();
        store
            .insert(&Session::planned("u1", "old", now - Duration::days(45), 30).completed(30))
            .unwrap();

        let stats = AnalyticsService::new(&store, &config)
            .stats("u1", None, now)
            .unwrap();
        assert_eq!(stats.total_sessions, 1);
        assert_eq!(stats.date_range.end_date, now);
    }

    #[test]
    fn trends_use_configured_window() {
        let store = SessionStore::open_memory().unwrap();
        let mut config = Config::default();
        config.trends.daily_window_days = 6;
        let now = Utc.with_ymd_and_hms(2024, 3, 31, 12, 0, 0).unwrap();

        let trends = AnalyticsService::new(&store, &config)
            .trends("u1", Period::Daily, now)
            .unwrap();
        assert_eq!(trends.len(), 7);
        assert_eq!(trends.dates.last().map(String::as_str), Some("Mar 31"));
    }
}
