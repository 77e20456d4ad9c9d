//! libSQL backend — local-file sessions for the onboarding tables.
//!
//! Every `open` builds a fresh `libsql::Database` handle and connection on
//! the configured file, so no state is shared between submissions.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use libsql::{Connection, Database as LibSqlDatabase, params};
use tracing::debug;

use crate::error::DatabaseError;
use crate::onboarding::model::UserId;
use crate::store::schema::SQLITE_SCHEMA;
use crate::store::traits::{NewProfile, NewUser, Session, SessionFactory};

/// Primary result code for constraint failures; extended codes share the low byte.
const SQLITE_CONSTRAINT: i32 = 19;

/// How long a write waits on another session's lock before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens sessions on a local libSQL database file.
#[derive(Debug, Clone)]
pub struct LibSqlSessionFactory {
    path: PathBuf,
}

impl LibSqlSessionFactory {
    /// Use the database file at `path`, creating parent directories if needed.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, DatabaseError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                DatabaseError::Connect(format!("Failed to create database directory: {e}"))
            })?;
        }
        Ok(Self { path })
    }

    /// Accepts `file:<path>`, `sqlite://<path>` or `sqlite:<path>`.
    pub fn from_url(url: &str) -> Result<Self, DatabaseError> {
        let path = path_from_url(url)
            .ok_or_else(|| DatabaseError::Connect(format!("Not a local database URL: {url}")))?;
        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn path_from_url(url: &str) -> Option<&str> {
    let path = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))
        .or_else(|| url.strip_prefix("file://"))
        .or_else(|| url.strip_prefix("file:"))?;
    (!path.is_empty()).then_some(path)
}

#[async_trait]
impl SessionFactory for LibSqlSessionFactory {
    fn backend(&self) -> &'static str {
        "libsql"
    }

    async fn open(&self) -> Result<Box<dyn Session>, DatabaseError> {
        let db = libsql::Builder::new_local(&self.path)
            .build()
            .await
            .map_err(|e| DatabaseError::Connect(format!("Failed to open libSQL database: {e}")))?;

        let conn = db
            .connect()
            .map_err(|e| DatabaseError::Connect(format!("Failed to create connection: {e}")))?;

        conn.busy_timeout(BUSY_TIMEOUT)
            .map_err(|e| DatabaseError::Connect(format!("Failed to set busy timeout: {e}")))?;

        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Connect(format!("Failed to enable foreign keys: {e}")))?;

        debug!(path = %self.path.display(), "libSQL session opened");
        Ok(Box::new(LibSqlSession {
            conn: Some(conn),
            db: Some(db),
        }))
    }
}

/// A single libSQL connection.
pub struct LibSqlSession {
    conn: Option<Connection>,
    db: Option<LibSqlDatabase>,
}

impl LibSqlSession {
    fn conn(&self) -> Result<&Connection, DatabaseError> {
        self.conn.as_ref().ok_or(DatabaseError::Closed)
    }

    async fn execute_plain(&self, op: &str, sql: &str) -> Result<(), DatabaseError> {
        self.conn()?
            .execute(sql, ())
            .await
            .map_err(|e| query_error(op, e))?;
        Ok(())
    }
}

fn opt_text(s: Option<&str>) -> libsql::Value {
    match s {
        Some(s) => libsql::Value::Text(s.to_string()),
        None => libsql::Value::Null,
    }
}

fn query_error(op: &str, e: libsql::Error) -> DatabaseError {
    match e {
        libsql::Error::SqliteFailure(code, msg) if code & 0xff == SQLITE_CONSTRAINT => {
            DatabaseError::Constraint(format!("{op}: {msg}"))
        }
        other => DatabaseError::Query(format!("{op}: {other}")),
    }
}

#[async_trait]
impl Session for LibSqlSession {
    async fn insert_user(&mut self, user: &NewUser<'_>) -> Result<UserId, DatabaseError> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO users (whatsapp_number, email) VALUES (?1, ?2)",
            params![user.whatsapp_number, user.email],
        )
        .await
        .map_err(|e| query_error("insert_user", e))?;

        Ok(conn.last_insert_rowid())
    }

    async fn insert_profile(&mut self, profile: &NewProfile<'_>) -> Result<(), DatabaseError> {
        self.conn()?
            .execute(
                "INSERT INTO profiles
                    (user_id, age, height_cm, weight_kg, target_weight_kg, preferences, veg_days)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    profile.user_id,
                    i64::from(profile.age),
                    profile.height_cm,
                    profile.weight_kg,
                    profile.target_weight_kg,
                    opt_text(profile.preferences),
                    profile.veg_days.as_str(),
                ],
            )
            .await
            .map_err(|e| query_error("insert_profile", e))?;
        Ok(())
    }

    async fn insert_allergy(&mut self, user_id: UserId, allergy: &str) -> Result<(), DatabaseError> {
        self.conn()?
            .execute(
                "INSERT INTO allergies (user_id, allergy) VALUES (?1, ?2)",
                params![user_id, allergy],
            )
            .await
            .map_err(|e| query_error("insert_allergy", e))?;
        Ok(())
    }

    async fn begin(&mut self) -> Result<(), DatabaseError> {
        // Take the write lock up front so two open transactions cannot deadlock.
        self.execute_plain("begin", "BEGIN IMMEDIATE").await
    }

    async fn commit(&mut self) -> Result<(), DatabaseError> {
        self.execute_plain("commit", "COMMIT").await
    }

    async fn rollback(&mut self) -> Result<(), DatabaseError> {
        self.execute_plain("rollback", "ROLLBACK").await
    }

    async fn apply_schema(&mut self) -> Result<(), DatabaseError> {
        self.conn()?
            .execute_batch(SQLITE_SCHEMA)
            .await
            .map_err(|e| DatabaseError::Migration(format!("sqlite schema: {e}")))?;
        Ok(())
    }

    async fn close(&mut self) -> Result<(), DatabaseError> {
        // libSQL releases the file handle on drop; connection first.
        if self.conn.take().is_some() {
            debug!("libSQL session closed");
        }
        self.db.take();
        Ok(())
    }
}
