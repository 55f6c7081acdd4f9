//! Shared configuration and utilities for the account domain
//!
//! - Configuration types
//! - Tracing subscriber setup
//! - Encoding helpers

pub mod config;
pub mod logging;
pub mod utils;

pub use config::{AppConfig, Environment, LogFormat, LoggingConfig, VerificationConfig};
pub use logging::init_tracing;
pub use utils::encoding;
