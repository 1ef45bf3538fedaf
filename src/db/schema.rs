use rusqlite::Connection;
use std::path::Path;

/// Opens a short-lived connection for the current request and makes sure
/// the schema exists. Creation is idempotent, so every caller can go
/// through here.
pub fn open_db(path: &Path) -> Result<Connection, rusqlite::Error> {
    let conn = Connection::open(path)?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS admins (
               id             INTEGER PRIMARY KEY AUTOINCREMENT,
               email          TEXT NOT NULL UNIQUE,
               password_hash  TEXT NOT NULL,
               name           TEXT,
               is_super_admin INTEGER NOT NULL DEFAULT 0,
               created_at     DATETIME DEFAULT CURRENT_TIMESTAMP,
               updated_at     DATETIME DEFAULT CURRENT_TIMESTAMP
           )",
        [],
    )?;

    // Multi-valued questionnaire fields are stored as JSON text columns.
    conn.execute(
        "CREATE TABLE IF NOT EXISTS responses (
               id                    INTEGER PRIMARY KEY AUTOINCREMENT,
               respondent_first_name TEXT NOT NULL,
               respondent_last_name  TEXT NOT NULL,
               respondent_email      TEXT NOT NULL,
               respondent_phone      TEXT,
               club_name             TEXT NOT NULL,
               respondent_role       TEXT NOT NULL,
               other_role            TEXT,
               has_label             TEXT NOT NULL,
               wants_label_support   TEXT,
               has_welcomed_disabled TEXT NOT NULL,
               handicap_types        TEXT NOT NULL DEFAULT '[]',
               other_handicap_type   TEXT,
               public_types          TEXT NOT NULL DEFAULT '[]',
               adaptation_story      TEXT,
               support_expectations  TEXT NOT NULL DEFAULT '[]',
               other_expectation     TEXT,
               adapted_material      TEXT NOT NULL DEFAULT '[]',
               other_material        TEXT,
               desired_access        TEXT NOT NULL DEFAULT '[]',
               additional_comments   TEXT,
               created_at            DATETIME DEFAULT CURRENT_TIMESTAMP
           )",
        [],
    )?;

    Ok(())
}
