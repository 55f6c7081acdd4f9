//! Domain-specific error types and error handling.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a verification attempt was rejected.
///
/// Carried alongside [`DomainError::InvalidVerificationCode`] for diagnostics;
/// it is deliberately absent from the error message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationFailure {
    /// Input was empty or whitespace only
    Empty,
    /// Input length differs from the issued code
    LengthMismatch,
    /// The code was already redeemed
    AlreadyVerified,
    /// The code is past its expiration instant
    Expired,
    /// Input does not match the issued code
    Mismatch,
}

impl std::fmt::Display for VerificationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            VerificationFailure::Empty => "empty",
            VerificationFailure::LengthMismatch => "length_mismatch",
            VerificationFailure::AlreadyVerified => "already_verified",
            VerificationFailure::Expired => "expired",
            VerificationFailure::Mismatch => "mismatch",
        };
        f.write_str(reason)
    }
}

/// Core domain errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Argument error: {message}")]
    Argument { message: String },

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Invalid verification code")]
    InvalidVerificationCode { reason: VerificationFailure },
}

impl DomainError {
    /// Stable code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            DomainError::Argument { .. } => "ARGUMENT_ERROR",
            DomainError::InvalidEmail => "INVALID_EMAIL",
            DomainError::InvalidVerificationCode { .. } => "INVALID_VERIFICATION_CODE",
        }
    }

    /// Rejection reason, if this is a verification failure
    pub fn verification_failure(&self) -> Option<VerificationFailure> {
        match self {
            DomainError::InvalidVerificationCode { reason } => Some(*reason),
            _ => None,
        }
    }

    pub(crate) fn argument(message: impl Into<String>) -> Self {
        DomainError::Argument {
            message: message.into(),
        }
    }
}

impl From<VerificationFailure> for DomainError {
    fn from(reason: VerificationFailure) -> Self {
        DomainError::InvalidVerificationCode { reason }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
