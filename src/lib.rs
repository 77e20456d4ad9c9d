//! Onboard Intake — onboarding form collector and persistence service.

pub mod collector;
pub mod config;
pub mod error;
pub mod onboarding;
pub mod server;
pub mod store;
