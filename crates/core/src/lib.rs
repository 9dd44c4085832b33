//! Inflio domain logic.
//!
//! Pure types and evaluation functions for the content-staging platform:
//! platform limits, staged-content validation and readiness, video upload
//! planning, avatar photo collection and quality scoring, and onboarding
//! step derivation. This crate has no database or network dependencies;
//! callers pre-load whatever data evaluation needs and pass it in.

pub mod avatar;
pub mod best_practices;
pub mod error;
pub mod onboarding;
pub mod photo_quality;
pub mod platform;
pub mod staging;
pub mod types;
pub mod upload;
