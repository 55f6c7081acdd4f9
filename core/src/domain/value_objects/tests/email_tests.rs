//! Unit tests for the email value object

use std::sync::Arc;

use acct_shared::config::VerificationConfig;
use acct_shared::utils::encoding::from_base64;
use chrono::{Duration, TimeZone, Utc};

use crate::domain::value_objects::email::Email;
use crate::errors::{DomainError, VerificationFailure};
use crate::services::date_time::{DateTimeProvider, ManualDateTimeProvider};

fn clock() -> Arc<ManualDateTimeProvider> {
    Arc::new(ManualDateTimeProvider::new(
        Utc.with_ymd_and_hms(2024, 3, 15, 9, 30, 0).unwrap(),
    ))
}

#[test]
fn test_create_normalizes_address() {
    let email = Email::create("  User@Example.com ", clock()).unwrap();

    assert_eq!(email.address(), "user@example.com");
    assert_eq!(email.to_string(), "user@example.com");
    assert_eq!(email.as_ref(), "user@example.com");
}

#[test]
fn test_hash_is_base64_of_normalized_address() {
    let email = Email::create("User@Example.com", clock()).unwrap();

    assert_eq!(email.hash(), "dXNlckBleGFtcGxlLmNvbQ==");
    assert_eq!(from_base64(email.hash()).as_deref(), Some(email.as_str()));
}

#[test]
fn test_accepts_valid_addresses() {
    let valid = [
        "john@example.com",
        "john.doe@example.com",
        "john+newsletter@example.com",
        "o'neil@example.ie",
        "first-last@mail.example.co.uk",
        "user_1@sub-domain.example.org",
    ];

    for address in valid {
        assert!(Email::create(address, clock()).is_ok(), "{} should be valid", address);
    }
}

#[test]
fn test_rejects_malformed_addresses() {
    let invalid = [
        "not-an-email",
        "user@localhost",
        "user@@example.com",
        "@example.com",
        "user@example.",
        "user..name@example.com",
        "user name@example.com",
        ".user@example.com",
    ];

    for address in invalid {
        assert_eq!(
            Email::create(address, clock()).unwrap_err(),
            DomainError::InvalidEmail,
            "{} should be rejected",
            address
        );
    }
}

#[test]
fn test_rejects_empty_address_as_argument_error() {
    let err = Email::create("", clock()).unwrap_err();
    assert!(matches!(err, DomainError::Argument { .. }));
}

#[test]
fn test_whitespace_only_address_is_invalid_email() {
    assert_eq!(Email::create("   ", clock()).unwrap_err(), DomainError::InvalidEmail);
}

#[test]
fn test_create_issues_pending_code() {
    let clock = clock();
    let email = Email::create("user@example.com", clock.clone()).unwrap();
    let code = email.verification_code();

    assert!(!email.is_verified());
    assert_eq!(code.code().len(), 6);
    assert_eq!(code.expires_at_utc(), Some(clock.utc_now() + Duration::minutes(5)));
}

#[test]
fn test_verify_round_trip_succeeds_once() {
    let mut email = Email::create("user@example.com", clock()).unwrap();
    let code = email.verification_code().code().to_string();

    email.verify(&code).unwrap();
    assert!(email.is_verified());

    let err = email.verify(&code).unwrap_err();
    assert_eq!(err.verification_failure(), Some(VerificationFailure::AlreadyVerified));
}

#[test]
fn test_verify_uses_captured_clock() {
    let clock = clock();
    let mut email = Email::create("user@example.com", clock.clone()).unwrap();
    let code = email.verification_code().code().to_string();

    clock.advance(Duration::minutes(6));

    let err = email.verify(&code).unwrap_err();
    assert_eq!(err.verification_failure(), Some(VerificationFailure::Expired));
    assert!(!email.is_verified());
}

#[test]
fn test_verify_propagates_input_errors() {
    let mut email = Email::create("user@example.com", clock()).unwrap();

    for (input, reason) in [
        ("", VerificationFailure::Empty),
        ("  ", VerificationFailure::Empty),
        ("ABC", VerificationFailure::LengthMismatch),
        ("ABCDEFGH", VerificationFailure::LengthMismatch),
    ] {
        let err = email.verify(input).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_VERIFICATION_CODE");
        assert_eq!(err.verification_failure(), Some(reason));
    }
}

#[test]
fn test_create_with_config() {
    let clock = clock();
    let config = VerificationConfig::default().with_code_expiration_minutes(15);
    let email = Email::create_with_config("user@example.com", clock.clone(), &config).unwrap();

    assert_eq!(
        email.verification_code().expires_at_utc(),
        Some(clock.utc_now() + Duration::minutes(15))
    );
}

#[test]
fn test_create_with_config_rejects_non_positive_lifetime() {
    let config = VerificationConfig::default().with_code_expiration_minutes(0);
    let err = Email::create_with_config("user@example.com", clock(), &config).unwrap_err();
    assert!(matches!(err, DomainError::Argument { .. }));
}

#[test]
fn test_equality_is_structural() {
    let email = Email::create("user@example.com", clock()).unwrap();
    let copy = email.clone();
    assert_eq!(email, copy);

    // Same address but an independently issued code
    let mut other = Email::create("user@example.com", clock()).unwrap();
    while other.verification_code() == email.verification_code() {
        other = Email::create("user@example.com", clock()).unwrap();
    }
    assert_ne!(email, other);

    let mut verified = email.clone();
    let code = verified.verification_code().code().to_string();
    verified.verify(&code).unwrap();
    assert_ne!(email, verified);
}

#[test]
fn test_serialization_skips_clock() {
    let email = Email::create("user@example.com", clock()).unwrap();
    let json = serde_json::to_value(&email).unwrap();

    assert_eq!(json["address"], "user@example.com");
    assert_eq!(json["hash"], "dXNlckBleGFtcGxlLmNvbQ==");
    assert!(json.get("date_time_provider").is_none());
    assert_eq!(json["verification_code"]["state"]["status"], "unverified");
}

#[test]
fn test_create_with_config_rejects_out_of_range_lifetime() {
    let config = VerificationConfig::default().with_code_expiration_minutes(i64::MAX);
    let err = Email::create_with_config("a@b.com", clock(), &config).unwrap_err();
    assert!(matches!(err, DomainError::Argument { .. }));
}
