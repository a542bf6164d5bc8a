//! SQLite-backed session storage.
//!
//! Supplies the analytics engine with one user's sessions for a date
//! range. Optional metrics are stored as NULL so that "not reported"
//! survives a round trip distinct from zero.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use uuid::Uuid;

use super::migrations;
use crate::analytics::DateRange;
use crate::error::{DatabaseError, Result};
use crate::session::{LocationDetails, Session, SessionStatus};

const SESSION_COLUMNS: &str = "id, user_id, title, start_time, end_time, duration_planned,
     actual_duration, status, location_name, location_type, location_address,
     latitude, longitude, tags, notes, rating, focus, energy, mood, distractions";

/// Timestamps are stored in a fixed-width UTC form so that text
/// comparison orders them chronologically.
fn encode_time(t: &DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn decode_time(id: &str, s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| DatabaseError::CorruptRow {
            id: id.to_string(),
            message: format!("bad timestamp '{s}': {e}"),
        })
}

/// Raw column values of one `sessions` row.
struct SessionRow {
    id: String,
    user_id: String,
    title: String,
    start_time: String,
    end_time: Option<String>,
    duration_planned: u32,
    actual_duration: Option<u32>,
    status: String,
    location_name: Option<String>,
    location_type: Option<String>,
    location_address: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    tags: String,
    notes: String,
    rating: Option<u8>,
    focus: Option<u8>,
    energy: Option<u8>,
    mood: Option<u8>,
    distractions: Option<u32>,
}

impl SessionRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            user_id: row.get(1)?,
            title: row.get(2)?,
            start_time: row.get(3)?,
            end_time: row.get(4)?,
            duration_planned: row.get(5)?,
            actual_duration: row.get(6)?,
            status: row.get(7)?,
            location_name: row.get(8)?,
            location_type: row.get(9)?,
            location_address: row.get(10)?,
            latitude: row.get(11)?,
            longitude: row.get(12)?,
            tags: row.get(13)?,
            notes: row.get(14)?,
            rating: row.get(15)?,
            focus: row.get(16)?,
            energy: row.get(17)?,
            mood: row.get(18)?,
            distractions: row.get(19)?,
        })
    }

    fn into_session(self) -> Result<Session, DatabaseError> {
        let corrupt = |message: String| DatabaseError::CorruptRow {
            id: self.id.clone(),
            message,
        };
        let id = Uuid::parse_str(&self.id).map_err(|e| corrupt(e.to_string()))?;
        let status = self
            .status
            .parse::<SessionStatus>()
            .map_err(|e| corrupt(e.to_string()))?;
        let tags: Vec<String> =
            serde_json::from_str(&self.tags).map_err(|e| corrupt(e.to_string()))?;
        let start_time = decode_time(&self.id, &self.start_time)?;
        let end_time = self
            .end_time
            .as_deref()
            .map(|s| decode_time(&self.id, s))
            .transpose()?;

        let location = self.location_name.map(|name| LocationDetails {
            name,
            kind: self.location_type.unwrap_or_default(),
            address: self.location_address,
            latitude: self.latitude,
            longitude: self.longitude,
        });

        Ok(Session {
            id,
            user_id: self.user_id,
            title: self.title,
            start_time,
            end_time,
            duration_planned: self.duration_planned,
            actual_duration: self.actual_duration,
            status,
            location,
            tags,
            notes: self.notes,
            rating: self.rating,
            focus: self.focus,
            energy: self.energy,
            mood: self.mood,
            distractions: self.distractions,
        })
    }
}

/// SQLite database of focus sessions.
pub struct SessionStore {
    conn: Connection,
}

impl SessionStore {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database named by the configuration inside the data directory.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open(config: &super::Config) -> Result<Self> {
        let path = super::data_dir()?.join(&config.storage.database_file);
        Self::open_path(&path)
    }

    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_path(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::with_connection(conn)
    }

    /// Open an in-memory database.
    ///
    /// # Errors
    /// Returns an error if the schema cannot be created.
    pub fn open_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        migrations::migrate(&conn).map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(Self { conn })
    }

    /// Store a new session.
    ///
    /// # Errors
    /// Returns an error if the insert fails, e.g. on a duplicate id.
    pub fn insert(&self, session: &Session) -> Result<()> {
        let location = session.location.as_ref();
        self.conn.execute(
            "INSERT INTO sessions (
                id, user_id, title, start_time, end_time, duration_planned,
                actual_duration, status, location_name, location_type, location_address,
                latitude, longitude, tags, notes, rating, focus, energy, mood, distractions,
                created_at
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15,
                       ?16, ?17, ?18, ?19, ?20, ?21)",
            params![
                session.id.to_string(),
                session.user_id,
                session.title,
                encode_time(&session.start_time),
                session.end_time.as_ref().map(encode_time),
                session.duration_planned,
                session.actual_duration,
                session.status.as_str(),
                location.map(|l| l.name.as_str()),
                location.and_then(|l| l.kind()),
                location.and_then(|l| l.address.as_deref()),
                location.and_then(|l| l.latitude),
                location.and_then(|l| l.longitude),
                serde_json::to_string(&session.tags)?,
                session.notes,
                session.rating,
                session.focus,
                session.energy,
                session.mood,
                session.distractions,
                encode_time(&Utc::now()),
            ],
        )?;
        tracing::debug!(id = %session.id, status = %session.status, "stored session");
        Ok(())
    }

    /// Fetch one session by id.
    ///
    /// # Errors
    /// Returns an error if the query fails or the stored row is corrupt.
    pub fn get(&self, id: Uuid) -> Result<Option<Session>> {
        let sql = format!("SELECT {SESSION_COLUMNS} FROM sessions WHERE id = ?1");
        let row = self
            .conn
            .query_row(&sql, params![id.to_string()], SessionRow::from_row)
            .optional()?;
        match row {
            Some(row) => Ok(Some(row.into_session()?)),
            None => Ok(None),
        }
    }

    /// All of a user's sessions starting within `range`, oldest first.
    ///
    /// Rows that cannot be decoded are logged and skipped.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn sessions_in_range(&self, user_id: &str, range: &DateRange) -> Result<Vec<Session>> {
        let sql = format!(
            "SELECT {SESSION_COLUMNS} FROM sessions
             WHERE user_id = ?1 AND start_time >= ?2 AND start_time <= ?3
             ORDER BY start_time ASC"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(
            params![
                user_id,
                encode_time(&range.start_date),
                encode_time(&range.end_date)
            ],
            SessionRow::from_row,
        )?;
        Self::decode_rows(rows)
    }

    /// A page of a user's sessions, newest first.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn list(&self, user_id: &str, limit: u32, offset: u32) -> Result<Vec<Session>> {
        let sql = format!(
            "SELECT {SESSION_COLUMNS} FROM sessions
             WHERE user_id = ?1
             ORDER BY start_time DESC
             LIMIT ?2 OFFSET ?3"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![user_id, limit, offset], SessionRow::from_row)?;
        Self::decode_rows(rows)
    }

    fn decode_rows(
        rows: impl Iterator<Item = rusqlite::Result<SessionRow>>,
    ) -> Result<Vec<Session>> {
        let mut sessions = Vec::new();
        for row in rows {
            match row?.into_session() {
                Ok(session) => sessions.push(session),
                Err(e) => tracing::warn!(error = %e, "skipping unreadable session row"),
            }
        }
        Ok(sessions)
    }
}
