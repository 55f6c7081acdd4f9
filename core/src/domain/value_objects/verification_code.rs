//! Verification code value object proving control of an email address.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::errors::{DomainError, DomainResult, VerificationFailure};
use crate::services::date_time::DateTimeProvider;

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Default expiration time for verification codes (5 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 5;

/// Characters a code is drawn from. `0`, `O`, `1` and `I` are left out so a
/// code read off a screen cannot be mistyped.
pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Lifecycle of a verification code.
///
/// `Unverified` is the only state a code is created in and `Verified` is
/// terminal. Expiration does not move a code between states; it only makes
/// the transition impossible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum VerificationState {
    Unverified { expires_at_utc: DateTime<Utc> },
    Verified { verified_at_utc: DateTime<Utc> },
}

/// Short-lived, single-use code sent to an email address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredVerificationCode")]
pub struct VerificationCode {
    code: String,
    state: VerificationState,
}

/// Unchecked wire form, validated into a [`VerificationCode`] on load.
#[derive(Deserialize)]
struct StoredVerificationCode {
    code: String,
    state: VerificationState,
}

impl TryFrom<StoredVerificationCode> for VerificationCode {
    type Error = DomainError;

    fn try_from(stored: StoredVerificationCode) -> Result<Self, Self::Error> {
        let code = stored.code.to_ascii_uppercase();

        if code.len() != CODE_LENGTH || !code.bytes().all(|b| CODE_ALPHABET.contains(&b)) {
            return Err(DomainError::argument(format!(
                "Stored verification code must be {} characters from the code alphabet",
                CODE_LENGTH
            )));
        }

        Ok(Self {
            code,
            state: stored.state,
        })
    }
}

impl VerificationCode {
    /// Issues a new code that expires [`DEFAULT_EXPIRATION_MINUTES`] after
    /// the provider's current instant.
    pub fn create(clock: &dyn DateTimeProvider) -> Self {
        let now = clock.utc_now();
        Self {
            code: Self::generate_code(),
            state: VerificationState::Unverified {
                expires_at_utc: now + Duration::minutes(DEFAULT_EXPIRATION_MINUTES),
            },
        }
    }

    /// Issues a new code with a custom lifetime
    ///
    /// # Errors
    ///
    /// `DomainError::Argument` if `expiration_minutes` is not positive, or so
    /// large that the expiration instant cannot be represented.
    pub fn create_with_expiration(
        clock: &dyn DateTimeProvider,
        expiration_minutes: i64,
    ) -> DomainResult<Self> {
        if expiration_minutes <= 0 {
            return Err(DomainError::argument(format!(
                "Verification code lifetime must be positive, got {} minute(s)",
                expiration_minutes
            )));
        }

        Duration::try_minutes(expiration_minutes)
            .and_then(|lifetime| Self::issue(clock.utc_now(), lifetime))
            .ok_or_else(|| {
                DomainError::argument(format!(
                    "Verification code lifetime of {} minute(s) is out of range",
                    expiration_minutes
                ))
            })
    }

    /// `None` when `now + lifetime` overflows.
    fn issue(now: DateTime<Utc>, lifetime: Duration) -> Option<Self> {
        let expires_at_utc = now.checked_add_signed(lifetime)?;
        Some(Self {
            code: Self::generate_code(),
            state: VerificationState::Unverified { expires_at_utc },
        })
    }

    fn generate_code() -> String {
        let mut rng = rand::thread_rng();
        (0..CODE_LENGTH)
            .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
            .collect()
    }

    /// Redeems the code.
    ///
    /// Checks run in a fixed order: blank input, length, already verified,
    /// expiration (`now >= expires_at_utc`), then a case-insensitive match.
    /// The first failing check is reported as
    /// `DomainError::InvalidVerificationCode` with its reason attached. On
    /// success the code becomes [`VerificationState::Verified`] at the
    /// provider's current instant.
    pub fn verify(&mut self, input_code: &str, clock: &dyn DateTimeProvider) -> DomainResult<()> {
        let now = clock.utc_now();

        if let Err(reason) = self.check(input_code, now) {
            tracing::warn!(
                reason = %reason,
                event = "verification_code_rejected",
                "Verification code rejected"
            );
            return Err(reason.into());
        }

        self.state = VerificationState::Verified { verified_at_utc: now };
        tracing::debug!(event = "verification_code_verified", "Verification code verified");
        Ok(())
    }

    fn check(&self, input_code: &str, now: DateTime<Utc>) -> Result<(), VerificationFailure> {
        if input_code.trim().is_empty() {
            return Err(VerificationFailure::Empty);
        }

        if input_code.chars().count() != self.code.chars().count() {
            return Err(VerificationFailure::LengthMismatch);
        }

        let expires_at_utc = match self.state {
            VerificationState::Verified { .. } => return Err(VerificationFailure::AlreadyVerified),
            VerificationState::Unverified { expires_at_utc } => expires_at_utc,
        };

        if now >= expires_at_utc {
            return Err(VerificationFailure::Expired);
        }

        let normalized = input_code.to_ascii_uppercase();
        if !constant_time_eq(normalized.as_bytes(), self.code.as_bytes()) {
            return Err(VerificationFailure::Mismatch);
        }

        Ok(())
    }

    /// The code value as issued (upper case)
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Current lifecycle state
    pub fn state(&self) -> VerificationState {
        self.state
    }

    /// Expiration instant; `None` once verified
    pub fn expires_at_utc(&self) -> Option<DateTime<Utc>> {
        match self.state {
            VerificationState::Unverified { expires_at_utc } => Some(expires_at_utc),
            VerificationState::Verified { .. } => None,
        }
    }

    /// Verification instant; `None` until verified
    pub fn verified_at_utc(&self) -> Option<DateTime<Utc>> {
        match self.state {
            VerificationState::Unverified { .. } => None,
            VerificationState::Verified { verified_at_utc } => Some(verified_at_utc),
        }
    }

    /// Whether the code has been successfully verified
    pub fn is_active(&self) -> bool {
        matches!(self.state, VerificationState::Verified { .. })
    }

    /// Whether an unverified code can no longer be redeemed
    pub fn is_expired(&self, clock: &dyn DateTimeProvider) -> bool {
        self.expires_at_utc()
            .is_some_and(|expires_at_utc| clock.utc_now() >= expires_at_utc)
    }

    /// Time left to redeem the code; zero once expired or verified
    pub fn time_until_expiration(&self, clock: &dyn DateTimeProvider) -> Duration {
        match self.expires_at_utc() {
            Some(expires_at_utc) => (expires_at_utc - clock.utc_now()).max(Duration::zero()),
            None => Duration::zero(),
        }
    }
}
