//! This file defines types that handle password validation and hashing.
//! `RawPassword` wraps a non-empty plaintext password.
//! `PasswordHash` converts a `RawPassword` into a salted and hashed password.

use std::fmt::Display;

use crate::Error;

/// A plaintext password that has been checked to be non-empty, but not yet hashed.
///
/// This struct can be used to construct a [PasswordHash].
#[derive(Debug, Clone, PartialEq)]
pub struct RawPassword(String);

impl RawPassword {
    /// Create a new password from a string.
    ///
    /// # Errors
    ///
    /// Returns [Error::Validation] if the password is empty.
    pub fn new(raw_password_string: &str) -> Result<Self, Error> {
        if raw_password_string.is_empty() {
            return Err(Error::Validation("Password is required.".to_owned()));
        }

        Ok(Self(raw_password_string.to_owned()))
    }

    /// The plaintext password.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for RawPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", str::repeat("*", 8))
    }
}

/// A salted and hashed password.
#[derive(Debug, Clone, PartialEq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// The encryption cost used for hashing passwords outside of tests.
    pub const DEFAULT_COST: u32 = 10;

    /// Create a hashed password with the specified `cost`.
    ///
    /// `cost` increases the rounds of hashing and therefore the time needed to verify a password.
    /// Pass in [PasswordHash::DEFAULT_COST] to use the standard cost.
    ///
    /// # Errors
    ///
    /// This function will return an error if the password could not be hashed.
    pub fn new(password: &RawPassword, cost: u32) -> Result<Self, Error> {
        bcrypt::hash(&password.0, cost)
            .map(Self)
            .map_err(|error| Error::HashingError(error.to_string()))
    }

    /// Create a new `PasswordHash` without any validation.
    ///
    /// The caller should ensure that `raw_password_hash` is a valid password hash.
    pub fn new_unchecked(raw_password_hash: &str) -> Self {
        Self(raw_password_hash.to_owned())
    }

    /// Check that `raw_password` matches the stored password.
    ///
    /// # Errors
    ///
    /// Returns [Error::HashingError] if the stored hash is malformed.
    pub fn verify(&self, raw_password: &str) -> Result<bool, Error> {
        bcrypt::verify(raw_password, &self.0).map_err(|error| Error::HashingError(error.to_string()))
    }
}

impl AsRef<str> for PasswordHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}


#[cfg(test)]
mod password_hash_tests {
    use super::{PasswordHash, RawPassword};

    #[test]
    fn verify_password_succeeds_for_valid_password() {
        let hash = PasswordHash::new_unchecked(
            "$2b$12$Gwf0uvxH3L7JLfo0CC/NCOoijK2vQ/wbgP.LeNup8vj6gg31IiFkm",
        );
        let password = "okon";

        assert!(hash.verify(password).unwrap());
    }

    #[test]
    fn verify_password_fails_for_wrong_password() {
        let password = RawPassword::new("averysafeandsecurepassword").unwrap();
        let hash = PasswordHash::new(&password, 4).unwrap();

        assert!(!hash.verify("thewrongpassword").unwrap());
    }

    #[test]
    fn hash_is_salted() {
        let password = RawPassword::new("secret1").unwrap();

        let first = PasswordHash::new(&password, 4).unwrap();
        let second = PasswordHash::new(&password, 4).unwrap();

        assert_ne!(first, second);
        assert!(first.verify("secret1").unwrap());
        assert!(second.verify("secret1").unwrap());
    }

    #[test]
    fn verify_fails_on_malformed_hash() {
        let hash = PasswordHash::new_unchecked("not a hash");

        assert!(hash.verify("okon").is_err());
    }
}
