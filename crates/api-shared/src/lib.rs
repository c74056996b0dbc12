//! # API Shared
//!
//! Shared utilities and definitions for the prestadores APIs.
//!
//! Contains:
//! - JSON wire types (`dto` module), mirroring the provider-portal contract field for field
//! - Shared services like `HealthService`
//! - Login validation (usable by any transport)
//!
//! Used by `prestadores-core` to shape responses and by `api-rest` to parse requests.

pub mod auth;
pub mod dto;
pub mod health;

pub use auth::{validate_login, AuthError};
pub use dto::*;
pub use health::HealthService;
