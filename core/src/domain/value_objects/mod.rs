//! Value objects representing immutable domain concepts.

pub mod email;
pub mod verification_code;

#[cfg(test)]
mod tests;

pub use email::Email;
pub use verification_code::{
    VerificationCode, VerificationState, CODE_ALPHABET, CODE_LENGTH, DEFAULT_EXPIRATION_MINUTES,
};
