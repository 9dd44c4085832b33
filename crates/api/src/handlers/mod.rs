//! HTTP handlers, one module per resource.

pub mod context7;
pub mod generate;
pub mod onboarding;
pub mod personas;
pub mod projects;
pub mod staging;
pub mod uploads;
