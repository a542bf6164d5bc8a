//! Database schema migrations for focusspot.
//!
//! Migrations are versioned and applied automatically when opening the database.
//! The `schema_version` table tracks the current migration version.

use rusqlite::{Connection, Result as SqliteResult};

/// Current schema version.
pub const SCHEMA_VERSION: i32 = 2;

/// Apply all pending migrations to bring the database to the current schema version.
///
/// # Errors
/// Returns an error if migration fails.
pub fn migrate(conn: &Connection) -> SqliteResult<()> {
    create_schema_version_table(conn)?;

    let current_version = get_schema_version(conn);

    if current_version < 1 {
        migrate_v1(conn)?;
    }
    if current_version < 2 {
        migrate_v2(conn)?;
    }

    Ok(())
}

fn create_schema_version_table(conn: &Connection) -> SqliteResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY
        );",
    )
}

/// Returns 0 if no version is set (initial database).
pub fn get_schema_version(conn: &Connection) -> i32 {
    conn.query_row("SELECT version FROM schema_version", [], |row| {
        row.get::<_, i32>(0)
    })
    .unwrap_or_else(|e| {
        if !matches!(e, rusqlite::Error::QueryReturnedNoRows) {
            tracing::warn!(error = %e, "failed to read schema_version");
        }
        0
    })
}

fn set_schema_version(conn: &Connection, version: i32) -> SqliteResult<()> {
    conn.execute("DELETE FROM schema_version", [])?;
    conn.execute("INSERT INTO schema_version (version) VALUES (?1)", [version])?;
    Ok(())
}

/// v1: session table with nullable self-reported metrics.
fn migrate_v1(conn: &Connection) -> SqliteResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS sessions (
            id               TEXT PRIMARY KEY,
            user_id          TEXT NOT NULL,
            title            TEXT NOT NULL DEFAULT '',
            start_time       TEXT NOT NULL,
            end_time         TEXT,
            duration_planned INTEGER NOT NULL,
            actual_duration  INTEGER,
            status           TEXT NOT NULL,
            location_name    TEXT,
            location_type    TEXT,
            notes            TEXT NOT NULL DEFAULT '',
            rating           INTEGER,
            focus            INTEGER,
            energy           INTEGER,
            mood             INTEGER,
            distractions     INTEGER,
            created_at       TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_sessions_user_start ON sessions(user_id, start_time);",
    )?;
    set_schema_version(conn, 1)
}

/// v2: tags and full location details.
fn migrate_v2(conn: &Connection) -> SqliteResult<()> {
    conn.execute_batch(
        "ALTER TABLE sessions ADD COLUMN tags TEXT NOT NULL DEFAULT '[]';
         ALTER TABLE sessions ADD COLUMN location_address TEXT;
         ALTER TABLE sessions ADD COLUMN latitude REAL;
         ALTER TABLE sessions ADD COLUMN longitude REAL;",
    )?;
    set_schema_version(conn, 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_database_reaches_current_version() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();
        assert_eq!(get_schema_version(&conn), SCHEMA_VERSION);
    }

    #[test]
    fn migrate_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();
        migrate(&conn).unwrap();
        assert_eq!(get_schema_version(&conn), SCHEMA_VERSION);
        let cols: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM pragma_table_info('sessions') WHERE name = 'tags'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(cols, 1);
    }
}
