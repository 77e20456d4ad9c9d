//! Error types for the onboarding intake.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

/// Body returned for every failed submission. The caller only ever sees this.
pub const GENERIC_FAILURE_MESSAGE: &str = "Internal Server Error";

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Database-related errors.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Schema setup failed: {0}")]
    Migration(String),

    #[error("Session already closed")]
    Closed,
}

/// Everything that can go wrong while handling one onboarding submission.
#[derive(Debug, thiserror::Error)]
pub enum OnboardingError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
}

impl IntoResponse for OnboardingError {
    fn into_response(self) -> Response {
        // Detail stays in the server log; the caller gets the generic body.
        error!(error = %self, "Onboarding submission failed");

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": GENERIC_FAILURE_MESSAGE })),
        )
            .into_response()
    }
}

/// Errors raised while editing the collector's form.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum FormError {
    #[error("Unknown form field: {0}")]
    UnknownField(String),

    #[error("{field} must be a number, got {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Required fields missing: {}", .0.join(", "))]
    MissingRequired(Vec<&'static str>),
}

/// Errors raised while submitting the collector's form.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server answered with status {0}")]
    Status(u16),
}

/// Result type alias for submission handling.
pub type Result<T> = std::result::Result<T, OnboardingError>;
