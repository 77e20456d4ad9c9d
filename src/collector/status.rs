//! Submission status as shown to the person filling in the form.

use crate::error::ClientError;
use crate::onboarding::model::UserId;

/// The four observable submission states.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SubmitState {
    #[default]
    Idle,
    Submitting,
    /// 2xx from the server. The id is present when the body carried one.
    Success { user_id: Option<UserId> },
    /// Non-2xx status or transport failure.
    Error { reason: String },
}

impl SubmitState {
    /// Outcome of one submission attempt, decided by HTTP status alone.
    pub fn settle(outcome: &Result<Option<UserId>, ClientError>) -> Self {
        match outcome {
            Ok(user_id) => Self::Success { user_id: *user_id },
            Err(e) => Self::Error {
                reason: e.to_string(),
            },
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Submitting => "submitting",
            Self::Success { .. } => "success",
            Self::Error { .. } => "error",
        }
    }
}

impl std::fmt::Display for SubmitState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "Not submitted yet"),
            Self::Submitting => write!(f, "Submitting..."),
            Self::Success { user_id: Some(id) } => write!(f, "Submitted (user {id})"),
            Self::Success { user_id: None } => write!(f, "Submitted"),
            Self::Error { reason } => write!(f, "Submission failed: {reason}"),
        }
    }
}
