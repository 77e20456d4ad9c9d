//! Form collector — gathers one onboarding record and submits it.
//!
//! The form is plain editable state; submission is a single POST whose
//! HTTP status alone decides between success and error.

pub mod client;
pub mod form;
pub mod prompt;
pub mod status;

pub use client::OnboardingClient;
pub use form::{FormField, OnboardingForm};
pub use status::SubmitState;

use tracing::{info, warn};

use crate::error::FormError;

/// Owns the form, its submission state and the client.
pub struct Collector {
    form: OnboardingForm,
    state: SubmitState,
    client: OnboardingClient,
}

impl Collector {
    pub fn new(client: OnboardingClient) -> Self {
        Self {
            form: OnboardingForm::default(),
            state: SubmitState::Idle,
            client,
        }
    }

    pub fn form(&self) -> &OnboardingForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut OnboardingForm {
        &mut self.form
    }

    pub fn state(&self) -> &SubmitState {
        &self.state
    }

    /// Submit the current form once.
    ///
    /// Refused with `FormError::MissingRequired` while required fields are
    /// empty; the state is left untouched in that case.
    pub async fn submit(&mut self) -> Result<&SubmitState, FormError> {
        let payload = self.form.to_payload()?;

        self.state = SubmitState::Submitting;
        let outcome = self.client.submit(&payload).await;
        self.state = SubmitState::settle(&outcome);

        match &outcome {
            Ok(user_id) => info!(user_id = ?user_id, "Onboarding form submitted"),
            Err(e) => warn!(error = %e, "Onboarding form submission failed"),
        }
        Ok(&self.state)
    }
}
