//! Recording in-memory session factory for unit tests.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::DatabaseError;
use crate::onboarding::model::UserId;
use crate::store::traits::{NewProfile, NewUser, Session, SessionFactory};

/// What the mock saw, in order.
#[derive(Debug, Clone, Default)]
pub struct MockLog {
    pub opened: usize,
    pub closed: usize,
    pub calls: Vec<String>,
    pub allergies: Vec<String>,
    pub profiles: Vec<(UserId, Option<String>, String)>,
}

pub struct MockFactory {
    log: Arc<Mutex<MockLog>>,
    next_id: Arc<AtomicI64>,
    fail_on: Option<&'static str>,
    fail_open: bool,
}

impl MockFactory {
    pub fn new() -> Self {
        Self {
            log: Arc::new(Mutex::new(MockLog::default())),
            next_id: Arc::new(AtomicI64::new(1)),
            fail_on: None,
            fail_open: false,
        }
    }

    /// Fail the named call (`insert_user`, `insert_profile`, ...) with a
    /// constraint violation.
    pub fn failing_on(mut self, call: &'static str) -> Self {
        self.fail_on = Some(call);
        self
    }

    pub fn failing_open(mut self) -> Self {
        self.fail_open = true;
        self
    }

    pub fn log(&self) -> MockLog {
        self.log.lock().unwrap().clone()
    }
}

#[async_trait]
impl SessionFactory for MockFactory {
    fn backend(&self) -> &'static str {
        "mock"
    }

    async fn open(&self) -> Result<Box<dyn Session>, DatabaseError> {
        if self.fail_open {
            return Err(DatabaseError::Connect("connection refused".to_string()));
        }
        self.log.lock().unwrap().opened += 1;
        Ok(Box::new(MockSession {
            log: Arc::clone(&self.log),
            next_id: Arc::clone(&self.next_id),
            fail_on: self.fail_on,
            closed: false,
        }))
    }
}

struct MockSession {
    log: Arc<Mutex<MockLog>>,
    next_id: Arc<AtomicI64>,
    fail_on: Option<&'static str>,
    closed: bool,
}

impl MockSession {
    fn record(&self, call: &'static str) -> Result<(), DatabaseError> {
        if self.closed {
            return Err(DatabaseError::Closed);
        }
        self.log.lock().unwrap().calls.push(call.to_string());
        if self.fail_on == Some(call) {
            return Err(DatabaseError::Constraint(format!("{call}: simulated")));
        }
        Ok(())
    }
}

#[async_trait]
impl Session for MockSession {
    async fn insert_user(&mut self, _user: &NewUser<'_>) -> Result<UserId, DatabaseError> {
        self.record("insert_user")?;
        Ok(self.next_id.fetch_add(1, Ordering::SeqCst))
    }

    async fn insert_profile(&mut self, profile: &NewProfile<'_>) -> Result<(), DatabaseError> {
        self.record("insert_profile")?;
        self.log.lock().unwrap().profiles.push((
            profile.user_id,
            profile.preferences.map(str::to_string),
            profile.veg_days.clone(),
        ));
        Ok(())
    }

    async fn insert_allergy(&mut self, _user_id: UserId, allergy: &str) -> Result<(), DatabaseError> {
        self.record("insert_allergy")?;
        self.log.lock().unwrap().allergies.push(allergy.to_string());
        Ok(())
    }

    async fn begin(&mut self) -> Result<(), DatabaseError> {
        self.record("begin")
    }

    async fn commit(&mut self) -> Result<(), DatabaseError> {
        self.record("commit")
    }

    async fn rollback(&mut self) -> Result<(), DatabaseError> {
        self.record("rollback")
    }

    async fn apply_schema(&mut self) -> Result<(), DatabaseError> {
        self.record("apply_schema")
    }

    async fn close(&mut self) -> Result<(), DatabaseError> {
        if !self.closed {
            self.closed = true;
            self.log.lock().unwrap().closed += 1;
        }
        Ok(())
    }
}
