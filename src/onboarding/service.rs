//! OnboardingService — persists one submission as three dependent writes.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::DATABASE_URL_ENV;
use crate::error::{ConfigError, DatabaseError, Result};
use crate::store::{NewProfile, NewUser, Session, SessionFactory};

use super::model::{OnboardingRequest, UserId};

/// Writes onboarding submissions to the store.
///
/// Holds no per-request state. Each `submit` opens its own session and
/// closes it before returning, whatever the outcome.
pub struct OnboardingService {
    sessions: Option<Arc<dyn SessionFactory>>,
    atomic_writes: bool,
}

impl OnboardingService {
    /// `None` means no connection string was configured; every submission
    /// then fails with a configuration error before any connection attempt.
    pub fn new(sessions: Option<Arc<dyn SessionFactory>>) -> Self {
        Self {
            sessions,
            atomic_writes: false,
        }
    }

    /// Wrap the user/profile/allergy writes in one transaction.
    pub fn with_atomic_writes(mut self, atomic_writes: bool) -> Self {
        self.atomic_writes = atomic_writes;
        self
    }

    /// Persist one submission and return the new user's id.
    ///
    /// Without atomic writes a failure after the user insert leaves that
    /// user row behind; nothing is retried.
    pub async fn submit(&self, request: &OnboardingRequest) -> Result<UserId> {
        let factory = self
            .sessions
            .as_ref()
            .ok_or_else(|| ConfigError::MissingEnvVar(DATABASE_URL_ENV.to_string()))?;

        let mut session = factory.open().await?;
        debug!(backend = factory.backend(), "Session opened for onboarding submission");

        let result = if self.atomic_writes {
            persist_atomically(session.as_mut(), request).await
        } else {
            persist(session.as_mut(), request).await
        };

        if let Err(e) = session.close().await {
            warn!(error = %e, "Failed to close database session");
        }

        let user_id = result?;
        info!(user_id, "Onboarding submission stored");
        Ok(user_id)
    }
}

async fn persist(
    session: &mut dyn Session,
    request: &OnboardingRequest,
) -> std::result::Result<UserId, DatabaseError> {
    let user_id = session
        .insert_user(&NewUser {
            whatsapp_number: &request.whatsapp_number,
            email: &request.email,
        })
        .await?;
    debug!(user_id, "User row inserted");

    let veg_days = request
        .veg_days
        .unwrap_or_default()
        .to_json()
        .map_err(|e| DatabaseError::Serialization(format!("veg_days: {e}")))?;

    session
        .insert_profile(&NewProfile {
            user_id,
            age: request.age,
            height_cm: request.height_cm,
            weight_kg: request.weight_kg,
            target_weight_kg: request.target_weight_kg,
            preferences: request.preferences.as_deref(),
            veg_days,
        })
        .await?;
    debug!(user_id, "Profile row inserted");

    let allergies = request.allergy_list();
    for allergy in &allergies {
        session.insert_allergy(user_id, allergy).await?;
    }
    debug!(user_id, count = allergies.len(), "Allergy rows inserted");

    Ok(user_id)
}

async fn persist_atomically(
    session: &mut dyn Session,
    request: &OnboardingRequest,
) -> std::result::Result<UserId, DatabaseError> {
    session.begin().await?;
    match persist(session, request).await {
        Ok(user_id) => {
            session.commit().await?;
            Ok(user_id)
        }
        Err(e) => {
            if let Err(rollback_err) = session.rollback().await {
                warn!(error = %rollback_err, "Rollback failed");
            }
            Err(e)
        }
    }
}
