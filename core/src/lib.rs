//! # Account Core
//!
//! Domain layer for account email addresses: a validated, normalized
//! [`Email`] and the single-use [`VerificationCode`] that proves control of
//! it. Expiration is always judged against an injected [`DateTimeProvider`].

pub mod domain;
pub mod errors;
pub mod services;

pub use domain::*;
pub use errors::*;
pub use services::*;
