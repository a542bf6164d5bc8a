pub mod config;
pub mod session;
pub mod stats;
pub mod trends;

use chrono::{DateTime, NaiveDateTime, Utc};
use focusspot_core::ValidationError;

/// Parse an RFC 3339 timestamp, or `YYYY-MM-DDTHH:MM` taken as UTC.
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, ValidationError> {
    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Ok(t.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M")
        .map(|t| t.and_utc())
        .map_err(|_| ValidationError::InvalidDate(s.to_string()))
}

pub fn print_json<T: serde::Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
