//! Time source abstraction for expiration logic

use chrono::{DateTime, Duration, Utc};
use std::sync::{Mutex, PoisonError};

/// Source of the current UTC instant.
///
/// Every expiration decision in the domain goes through this trait, never
/// through `Utc::now()` directly.
pub trait DateTimeProvider: Send + Sync {
    /// The current instant
    fn utc_now(&self) -> DateTime<Utc>;
}

/// Wall-clock provider
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemDateTimeProvider;

impl DateTimeProvider for SystemDateTimeProvider {
    fn utc_now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Deterministic provider whose time only moves when told to.
#[derive(Debug)]
pub struct ManualDateTimeProvider {
    current: Mutex<DateTime<Utc>>,
}

impl ManualDateTimeProvider {
    pub fn new(initial: DateTime<Utc>) -> Self {
        Self {
            current: Mutex::new(initial),
        }
    }

    /// Move the clock to a specific instant
    pub fn set(&self, instant: DateTime<Utc>) {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = instant;
    }

    /// Advance the clock; negative durations move it backwards
    pub fn advance(&self, by: Duration) {
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        *current += by;
    }
}

impl Default for ManualDateTimeProvider {
    fn default() -> Self {
        Self::new(Utc::now())
    }
}

impl DateTimeProvider for ManualDateTimeProvider {
    fn utc_now(&self) -> DateTime<Utc> {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
