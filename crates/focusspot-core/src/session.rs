//! Focus session records.
//!
//! A [`Session`] is one planned, running, finished or abandoned block of
//! focus time, optionally annotated with self-reported wellbeing metrics
//! when it ends. The analytics engine only ever reads sessions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::analytics::scoring;
use crate::error::ValidationError;

/// Lifecycle status of a focus session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Planned,
    Active,
    Completed,
    Cancelled,
}

impl SessionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SessionStatus::Planned => "planned",
            SessionStatus::Active => "active",
            SessionStatus::Completed => "completed",
            SessionStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SessionStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "planned" => Ok(SessionStatus::Planned),
            "active" => Ok(SessionStatus::Active),
            "completed" => Ok(SessionStatus::Completed),
            "cancelled" => Ok(SessionStatus::Cancelled),
            other => Err(ValidationError::UnknownStatus(other.to_string())),
        }
    }
}

/// Where a session took place.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationDetails {
    /// Display name, used verbatim as the location category key
    pub name: String,
    /// Kind of place (coffee shop, library, ...). Empty means unknown.
    #[serde(default, rename = "type", skip_serializing_if = "String::is_empty")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

impl LocationDetails {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            ..Self::default()
        }
    }

    /// Location type, if one was recorded.
    pub fn kind(&self) -> Option<&str> {
        if self.kind.is_empty() {
            None
        } else {
            Some(&self.kind)
        }
    }
}

/// One focus session.
///
/// Optional metrics stay `None` when the user did not report them, so a
/// missing rating is never confused with a rating of zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: Uuid,
    pub user_id: String,
    #[serde(default)]
    pub title: String,
    pub start_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    /// Planned length in minutes
    pub duration_planned: u32,
    /// Minutes actually worked; only set once the session completed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_duration: Option<u32>,
    pub status: SessionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<LocationDetails>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes: String,
    /// Self rating, 1-5
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    /// Focus level, 1-10
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus: Option<u8>,
    /// Energy level, 1-10
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy: Option<u8>,
    /// Mood, 1-10
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distractions: Option<u32>,
}

impl Session {
    /// Create a planned session with no metrics.
    pub fn planned(
        user_id: impl Into<String>,
        title: impl Into<String>,
        start_time: DateTime<Utc>,
        duration_planned: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            title: title.into(),
            start_time,
            end_time: None,
            duration_planned,
            actual_duration: None,
            status: SessionStatus::Planned,
            location: None,
            tags: Vec::new(),
            notes: String::new(),
            rating: None,
            focus: None,
            energy: None,
            mood: None,
            distractions: None,
        }
    }

    /// Mark the session completed after `actual_duration` minutes.
    pub fn completed(mut self, actual_duration: u32) -> Self {
        self.status = SessionStatus::Completed;
        self.actual_duration = Some(actual_duration);
        self.end_time =
            Some(self.start_time + chrono::Duration::minutes(i64::from(actual_duration)));
        self
    }

    pub fn cancelled(mut self) -> Self {
        self.status = SessionStatus::Cancelled;
        self
    }

    pub fn with_rating(mut self, rating: u8) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_focus(mut self, focus: u8) -> Self {
        self.focus = Some(focus);
        self
    }

    pub fn with_energy(mut self, energy: u8) -> Self {
        self.energy = Some(energy);
        self
    }

    pub fn with_mood(mut self, mood: u8) -> Self {
        self.mood = Some(mood);
        self
    }

    pub fn with_distractions(mut self, distractions: u32) -> Self {
        self.distractions = Some(distractions);
        self
    }

    pub fn with_location(mut self, name: impl Into<String>, kind: impl Into<String>) -> Self {
        self.location = Some(LocationDetails::new(name, kind));
        self
    }

    /// Whether this session feeds per-dimension metrics and trend series.
    ///
    /// Only completed sessions with a recorded actual duration qualify.
    pub fn counts_toward_metrics(&self) -> bool {
        self.status == SessionStatus::Completed && self.actual_duration.is_some()
    }

    /// Productivity score in `[0, 10]`; `0.0` when the session cannot be scored.
    pub fn productivity_score(&self) -> f64 {
        scoring::productivity_score(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 4, 10, 0, 0).unwrap()
    }

    #[test]
    fn status_parses_and_displays() {
        for status in [
            SessionStatus::Planned,
            SessionStatus::Active,
            SessionStatus::Completed,
            SessionStatus::Cancelled,
        ] {
            assert_eq!(status.to_string().parse::<SessionStatus>().unwrap(), status);
        }
        assert!("paused".parse::<SessionStatus>().is_err());
    }

    #[test]
    fn completed_sets_end_time_and_gate() {
        let s = Session::planned("u1", "Write", start(), 50).completed(45);
        assert!(s.counts_toward_metrics());
        assert_eq!(s.end_time, Some(start() + chrono::Duration::minutes(45)));
    }

    #[test]
    fn cancelled_and_planned_are_gated_out() {
        let planned = Session::planned("u1", "Read", start(), 25);
        assert!(!planned.counts_toward_metrics());
        assert!(!planned.clone().cancelled().counts_toward_metrics());

        let mut no_actual = planned;
        no_actual.status = SessionStatus::Completed;
        assert!(!no_actual.counts_toward_metrics());
    }

    #[test]
    fn empty_location_kind_is_absent() {
        assert_eq!(LocationDetails::new("Home", "").kind(), None);
        assert_eq!(LocationDetails::new("Cafe", "coffee shop").kind(), Some("coffee shop"));
    }

    #[test]
    fn serializes_with_camel_case_and_omits_missing_metrics() {
        let s = Session::planned("u1", "Write", start(), 50)
            .completed(60)
            .with_rating(4)
            .with_location("Library", "library");
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["durationPlanned"], 50);
        assert_eq!(json["actualDuration"], 60);
        assert_eq!(json["status"], "completed");
        assert_eq!(json["location"]["type"], "library");
        assert!(json.get("focus").is_none());

        let back: Session = serde_json::from_value(json).unwrap();
        assert_eq!(back, s);
    }
}
