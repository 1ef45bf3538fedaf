use crate::{errors::ApiError, models::admin::Admin};
use chrono::{DateTime, NaiveDateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Result as RusqliteResult};

const ADMIN_COLUMNS: &str =
    "id, email, password_hash, name, is_super_admin, created_at, updated_at";

pub struct AdminRepository {
    conn: Connection,
}

impl AdminRepository {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    fn map_row_to_admin(row: &rusqlite::Row) -> RusqliteResult<Admin> {
        Ok(Admin {
            id: row.get(0)?,
            email: row.get(1)?,
            password_hash: row.get(2)?,
            name: row.get(3)?,
            is_super_admin: row.get::<_, i64>(4)? != 0,
            created_at: parse_timestamp(row.get(5)?),
            updated_at: parse_timestamp(row.get(6)?),
        })
    }

    pub fn find_admin_by_email(&self, email: &str) -> Result<Option<Admin>, ApiError> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM admins WHERE email = ?1", ADMIN_COLUMNS),
                params![email],
                Self::map_row_to_admin,
            )
            .optional()
            .map_err(|e| ApiError::DatabaseError(e.to_string()))
    }

    pub fn find_admin_by_id(&self, id: i64) -> Result<Option<Admin>, ApiError> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM admins WHERE id = ?1", ADMIN_COLUMNS),
                params![id],
                Self::map_row_to_admin,
            )
            .optional()
            .map_err(|e| ApiError::DatabaseError(e.to_string()))
    }

    pub fn list_admins(&self) -> Result<Vec<Admin>, ApiError> {
        let mut stmt = self
            .conn
            .prepare(&format!(
                "SELECT {} FROM admins ORDER BY created_at DESC, id DESC",
                ADMIN_COLUMNS
            ))
            .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

        let rows = stmt
            .query_map([], Self::map_row_to_admin)
            .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

        rows.collect::<RusqliteResult<Vec<Admin>>>()
            .map_err(|e| ApiError::DatabaseError(e.to_string()))
    }

    pub fn create_admin(
        &self,
        email: &str,
        password_hash: &str,
        name: Option<&str>,
        is_super_admin: bool,
    ) -> Result<Admin, ApiError> {
        self.conn
            .execute(
                "INSERT INTO admins (email, password_hash, name, is_super_admin)
                 VALUES (?1, ?2, ?3, ?4)",
                params![email, password_hash, name, is_super_admin as i64],
            )
            .map_err(|e| match e {
                // The UNIQUE column backstops the check-then-insert race.
                rusqlite::Error::SqliteFailure(f, _)
                    if f.code == rusqlite::ErrorCode::ConstraintViolation =>
                {
                    ApiError::Conflict("An admin with this email already exists".to_string())
                }
                other => ApiError::DatabaseError(other.to_string()),
            })?;

        let id = self.conn.last_insert_rowid();
        self.find_admin_by_id(id)?
            .ok_or_else(|| ApiError::DatabaseError("Created admin row not found".to_string()))
    }

    /// Returns the number of deleted rows (0 when the id is unknown).
    pub fn delete_admin(&self, id: i64) -> Result<usize, ApiError> {
        self.conn
            .execute("DELETE FROM admins WHERE id = ?1", params![id])
            .map_err(|e| ApiError::DatabaseError(e.to_string()))
    }
}

pub(crate) fn parse_timestamp(value: Option<String>) -> Option<DateTime<Utc>> {
    value.and_then(|s| {
        NaiveDateTime::parse_from_str(&s, "%Y-%m-%d %H:%M:%S")
            .ok()
            .map(|dt| dt.and_utc())
    })
}
