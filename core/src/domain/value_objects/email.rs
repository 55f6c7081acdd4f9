//! Email address value object with its verification workflow.

use acct_shared::config::VerificationConfig;
use acct_shared::utils::encoding::to_base64;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

use crate::errors::{DomainError, DomainResult};
use crate::services::date_time::DateTimeProvider;

use super::verification_code::VerificationCode;

/// Word segments joined by `-`, `+`, `.` or `'`, an `@`, then a domain of word
/// segments joined by `-` or `.` with at least one dot.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\w+([-+.']\w+)*@\w+([-.]\w+)*\.\w+([-.]\w+)*$").unwrap()
});

/// Normalized email address owning the code that proves control of it.
///
/// Two emails are equal when address, hash and verification state are equal;
/// the time source is not part of the value.
#[derive(Clone, Serialize)]
pub struct Email {
    address: String,
    hash: String,
    verification_code: VerificationCode,
    #[serde(skip)]
    date_time_provider: Arc<dyn DateTimeProvider>,
}

impl Email {
    /// Validates `address` and issues its verification code.
    ///
    /// The address is trimmed and lower-cased before pattern matching. The
    /// provider is kept for later calls to [`Email::verify`].
    ///
    /// # Errors
    ///
    /// * `DomainError::Argument` if `address` is empty
    /// * `DomainError::InvalidEmail` if the normalized address is malformed
    pub fn create(address: &str, date_time_provider: Arc<dyn DateTimeProvider>) -> DomainResult<Self> {
        let address = Self::normalize(address)?;
        let verification_code = VerificationCode::create(date_time_provider.as_ref());
        Ok(Self::assemble(address, verification_code, date_time_provider))
    }

    /// Same as [`Email::create`] with the code lifetime taken from `config`.
    ///
    /// # Errors
    ///
    /// * `DomainError::Argument` if `address` is empty, or if
    ///   `config.code_expiration_minutes` is not positive or out of range
    /// * `DomainError::InvalidEmail` if the normalized address is malformed
    pub fn create_with_config(
        address: &str,
        date_time_provider: Arc<dyn DateTimeProvider>,
        config: &VerificationConfig,
    ) -> DomainResult<Self> {
        let address = Self::normalize(address)?;
        let verification_code = VerificationCode::create_with_expiration(
            date_time_provider.as_ref(),
            config.code_expiration_minutes,
        )?;
        Ok(Self::assemble(address, verification_code, date_time_provider))
    }

    fn normalize(address: &str) -> DomainResult<String> {
        if address.is_empty() {
            tracing::warn!(event = "email_rejected", reason = "empty", "Email address rejected");
            return Err(DomainError::argument("Email address cannot be null or empty"));
        }

        let normalized = address.trim().to_lowercase();

        if !EMAIL_REGEX.is_match(&normalized) {
            tracing::warn!(
                event = "email_rejected",
                reason = "pattern",
                length = normalized.len(),
                "Email address rejected"
            );
            return Err(DomainError::InvalidEmail);
        }

        Ok(normalized)
    }

    fn assemble(
        address: String,
        verification_code: VerificationCode,
        date_time_provider: Arc<dyn DateTimeProvider>,
    ) -> Self {
        let hash = to_base64(&address);
        tracing::debug!(event = "email_created", "Email created with pending verification code");

        Self {
            address,
            hash,
            verification_code,
            date_time_provider,
        }
    }

    /// Redeems the owned verification code against the provider captured at
    /// creation. Fails exactly like [`VerificationCode::verify`].
    pub fn verify(&mut self, code: &str) -> DomainResult<()> {
        self.verification_code
            .verify(code, self.date_time_provider.as_ref())
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn as_str(&self) -> &str {
        &self.address
    }

    /// Base64 form of the normalized address
    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub fn verification_code(&self) -> &VerificationCode {
        &self.verification_code
    }

    pub fn is_verified(&self) -> bool {
        self.verification_code.is_active()
    }
}

impl PartialEq for Email {
    fn eq(&self, other: &Self) -> bool {
        self.address == other.address
            && self.hash == other.hash
            && self.verification_code == other.verification_code
    }
}

impl Eq for Email {}

impl fmt::Debug for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Email")
            .field("address", &self.address)
            .field("hash", &self.hash)
            .field("verification_code", &self.verification_code)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.address)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.address
    }
}
