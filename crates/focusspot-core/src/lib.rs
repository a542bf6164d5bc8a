//! # FocusSpot Core Library
//!
//! Tracks timed focus sessions and derives productivity analytics from
//! them. The CLI binary is a thin layer over this library.
//!
//! ## Architecture
//!
//! - **Session model**: planned/active/completed/cancelled focus blocks with
//!   optional self-reported rating, focus, energy, mood and distractions
//! - **Analytics**: per-session scoring, cross-cut statistics by weekday,
//!   time of day and location, and contiguous daily/weekly/monthly trends
//! - **Storage**: SQLite session store and TOML configuration
//!
//! ## Key Components
//!
//! - [`StatsAggregator`]: summarizes a set of sessions
//! - [`TrendBuilder`]: buckets sessions into calendar periods
//! - [`SessionStore`]: session persistence
//! - [`Config`]: application configuration management

pub mod analytics;
pub mod error;
pub mod service;
pub mod session;
pub mod storage;

pub use analytics::{
    productivity_score, DateRange, DayOfWeek, Period, ProductivityStats,
    ProductivityStatsReport, ProductivityTrends, StatsAggregator, TimeOfDay, TrendBuilder,
    TrendWindow,
};
pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use service::AnalyticsService;
pub use session::{LocationDetails, Session, SessionStatus};
pub use storage::{Config, SessionStore};
