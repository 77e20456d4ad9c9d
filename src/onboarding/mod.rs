//! Onboarding intake — accepts one form submission and persists it as a
//! user row, a profile row and zero or more allergy rows.

pub mod model;
pub mod routes;
pub mod service;

pub use model::{OnboardingRequest, OnboardingResponse, UserId, VegDays, Weekday, parse_allergies};
pub use routes::{ONBOARDING_PATH, OnboardingRouteState, onboarding_routes};
pub use service::OnboardingService;
