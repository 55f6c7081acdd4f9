//! Verification code configuration module

use serde::{Deserialize, Serialize};

/// Longest code lifetime accepted from the environment (one day)
pub const MAX_CODE_EXPIRATION_MINUTES: i64 = 24 * 60;

/// Settings for email verification codes
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Minutes a freshly issued code stays redeemable
    #[serde(default = "default_code_expiration_minutes")]
    pub code_expiration_minutes: i64,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            code_expiration_minutes: default_code_expiration_minutes(),
        }
    }
}

impl VerificationConfig {
    /// Create from environment variables
    ///
    /// Reads `VERIFICATION_CODE_EXPIRATION_MINUTES`; missing, unparsable or
    /// out-of-range values fall back to the default.
    pub fn from_env() -> Self {
        let raw = std::env::var("VERIFICATION_CODE_EXPIRATION_MINUTES").ok();

        Self {
            code_expiration_minutes: parse_code_expiration_minutes(raw.as_deref()),
        }
    }

    /// Override the code lifetime
    pub fn with_code_expiration_minutes(mut self, minutes: i64) -> Self {
        self.code_expiration_minutes = minutes;
        self
    }
}

fn default_code_expiration_minutes() -> i64 {
    5
}

/// Accepts `1..=MAX_CODE_EXPIRATION_MINUTES`, anything else yields the default.
fn parse_code_expiration_minutes(raw: Option<&str>) -> i64 {
    raw.and_then(|value| value.trim().parse::<i64>().ok())
        .filter(|minutes| (1..=MAX_CODE_EXPIRATION_MINUTES).contains(minutes))
        .unwrap_or_else(default_code_expiration_minutes)
}
