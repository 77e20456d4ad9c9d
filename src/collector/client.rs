//! HTTP client for the onboarding endpoint.

use tracing::debug;

use crate::error::ClientError;
use crate::onboarding::model::{OnboardingRequest, OnboardingResponse, UserId};
use crate::onboarding::routes::ONBOARDING_PATH;

/// Posts onboarding records to a running server. One request per call,
/// never retried.
#[derive(Debug, Clone)]
pub struct OnboardingClient {
    http: reqwest::Client,
    endpoint: String,
}

impl OnboardingClient {
    /// `base_url` is the server root, e.g. `http://127.0.0.1:3000`.
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), ONBOARDING_PATH),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send the record as JSON.
    ///
    /// Any 2xx is success; the returned id is whatever the body carries,
    /// `None` if it cannot be read. Other statuses become `ClientError::Status`.
    pub async fn submit(&self, payload: &OnboardingRequest) -> Result<Option<UserId>, ClientError> {
        let response = self.http.post(&self.endpoint).json(payload).send().await?;

        let status = response.status();
        debug!(status = status.as_u16(), "Onboarding endpoint responded");
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }

        Ok(response
            .json::<OnboardingResponse>()
            .await
            .ok()
            .map(|body| body.user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_base_and_path() {
        assert_eq!(
            OnboardingClient::new("http://intake.local/").endpoint(),
            "http://intake.local/api/onboarding"
        );
        assert_eq!(
            OnboardingClient::new("http://127.0.0.1:3000").endpoint(),
            "http://127.0.0.1:3000/api/onboarding"
        );
    }
}
