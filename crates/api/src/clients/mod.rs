//! Outbound HTTP clients for third-party services.

pub mod context7;
pub mod generation;
