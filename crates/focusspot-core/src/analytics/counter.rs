//! Running accumulators shared by the stats and trend passes.

use indexmap::IndexMap;
use std::hash::Hash;

use crate::session::Session;

/// Sum and presence count of one optional metric.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunningMean {
    pub sum: f64,
    pub count: u32,
}

impl RunningMean {
    pub fn add(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    /// Add `value` only when present.
    pub fn add_opt<T: Into<f64>>(&mut self, value: Option<T>) {
        if let Some(v) = value {
            self.add(v.into());
        }
    }

    /// Arithmetic mean, or `0.0` when nothing was added.
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / f64::from(self.count)
        }
    }
}

/// Accumulated metrics for one category value (one weekday, one location, ...).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MetricCounter {
    pub count: u32,
    pub total_score: f64,
    pub total_duration: u64,
    pub rating: RunningMean,
    pub focus: RunningMean,
    pub energy: RunningMean,
    pub mood: RunningMean,
    pub distractions: RunningMean,
}

impl MetricCounter {
    /// Fold one qualifying session and its precomputed score into the counter.
    pub fn record(&mut self, session: &Session, score: f64) {
        self.count += 1;
        self.total_score += score;
        self.total_duration += u64::from(session.actual_duration.unwrap_or(0));
        self.rating.add_opt(session.rating);
        self.focus.add_opt(session.focus);
        self.energy.add_opt(session.energy);
        self.mood.add_opt(session.mood);
        self.distractions.add_opt(session.distractions);
    }

    /// Mean score, `None` for an untouched counter.
    pub fn average_score(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.total_score / f64::from(self.count))
        }
    }
}

/// Counters for an open set of string categories, iterated in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct OrderedCounters {
    counters: IndexMap<String, MetricCounter>,
}

impl OrderedCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counter for `key`, created on first encounter.
    pub fn entry(&mut self, key: &str) -> &mut MetricCounter {
        let index = match self.counters.get_index_of(key) {
            Some(index) => index,
            None => {
                self.counters
                    .insert_full(key.to_string(), MetricCounter::default())
                    .0
            }
        };
        &mut self.counters[index]
    }

    pub fn len(&self) -> usize {
        self.counters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &MetricCounter)> {
        self.counters.iter()
    }
}

/// Average score per category plus the arg-max winner.
///
/// Categories with no sessions are skipped. The running maximum starts at
/// `0.0`, so a winner needs a positive average; among those, the first
/// category reaching the maximum wins and later equal averages do not
/// displace it.
pub fn rank_categories<'a, K, I>(counters: I) -> (IndexMap<K, f64>, Option<K>)
where
    K: Hash + Eq + Clone,
    I: IntoIterator<Item = (K, &'a MetricCounter)>,
{
    let mut averages = IndexMap::new();
    let mut best = None;
    let mut max = 0.0;

    for (key, counter) in counters {
        let Some(avg) = counter.average_score() else {
            continue;
        };
        averages.insert(key.clone(), avg);
        if avg > max {
            max = avg;
            best = Some(key);
        }
    }

    (averages, best)
}
