//! Productivity analytics engine.
//!
//! Pure, synchronous computations over an immutable slice of sessions:
//!
//! - [`productivity_score`]: bounded score for one completed session
//! - [`TimeOfDay`] / [`DayOfWeek`]: fixed category domains
//! - [`StatsAggregator`]: cross-cut summaries with "most productive" winners
//! - [`TrendBuilder`]: contiguous daily/weekly/monthly series
//!
//! Nothing here performs I/O or holds state between calls, so separate
//! calls may run concurrently without coordination.

mod counter;
mod period;
mod range;
mod report;
pub mod scoring;
mod stats;
mod time_of_day;
mod trends;
mod weekday;

pub use counter::{rank_categories, MetricCounter, OrderedCounters, RunningMean};
pub use period::{start_of_iso_week, start_of_month, Period};
pub use range::DateRange;
pub use report::ProductivityStatsReport;
pub use scoring::productivity_score;
pub use stats::{ProductivityStats, StatsAggregator};
pub use time_of_day::TimeOfDay;
pub use trends::{ProductivityTrends, TrendBuilder, TrendWindow};
pub use weekday::DayOfWeek;
