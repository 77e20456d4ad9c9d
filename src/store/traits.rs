//! Storage seam — one short-lived session per submission.
//!
//! A `SessionFactory` opens a fresh connection for every call to `open`;
//! nothing is pooled or shared between submissions. Callers must `close`
//! the session on every exit path.

use async_trait::async_trait;

use crate::error::DatabaseError;
use crate::onboarding::model::UserId;

/// Row written to `users`.
#[derive(Debug, Clone, Copy)]
pub struct NewUser<'a> {
    pub whatsapp_number: &'a str,
    pub email: &'a str,
}

/// Row written to `profiles`.
#[derive(Debug, Clone)]
pub struct NewProfile<'a> {
    pub user_id: UserId,
    pub age: i32,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub target_weight_kg: f64,
    pub preferences: Option<&'a str>,
    /// Weekly schedule already serialized to JSON text.
    pub veg_days: String,
}

/// Opens database sessions.
#[async_trait]
pub trait SessionFactory: Send + Sync {
    /// Short backend name for logs.
    fn backend(&self) -> &'static str;

    /// Open a new, unshared session.
    async fn open(&self) -> Result<Box<dyn Session>, DatabaseError>;
}

/// One open connection to the relational store.
#[async_trait]
pub trait Session: Send {
    /// Insert a user and return its generated identifier.
    async fn insert_user(&mut self, user: &NewUser<'_>) -> Result<UserId, DatabaseError>;

    async fn insert_profile(&mut self, profile: &NewProfile<'_>) -> Result<(), DatabaseError>;

    async fn insert_allergy(&mut self, user_id: UserId, allergy: &str) -> Result<(), DatabaseError>;

    async fn begin(&mut self) -> Result<(), DatabaseError>;

    async fn commit(&mut self) -> Result<(), DatabaseError>;

    async fn rollback(&mut self) -> Result<(), DatabaseError>;

    /// Create the `users`, `profiles` and `allergies` tables if missing.
    async fn apply_schema(&mut self) -> Result<(), DatabaseError>;

    /// Release the connection. Later calls on this session fail with
    /// `DatabaseError::Closed`; closing twice is a no-op.
    async fn close(&mut self) -> Result<(), DatabaseError>;
}
