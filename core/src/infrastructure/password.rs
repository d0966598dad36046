// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Salted SHA-256 implementation of the password hasher port.
//!
//! Development and testing adapter. Production deployments plug a KDF-based
//! hasher (argon2/bcrypt) into the same port outside this crate; credential
//! hardening is not this core's concern.

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::application::ports::PasswordHasher;
use crate::domain::error::DomainError;

pub struct Sha256PasswordHasher;

impl Sha256PasswordHasher {
    pub fn new() -> Self {
        Self
    }

    fn digest(salt: &str, plain: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(salt.as_bytes());
        hasher.update(plain.as_bytes());
        hex::encode(hasher.finalize())
    }
}

impl Default for Sha256PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PasswordHasher for Sha256PasswordHasher {
    async fn hash(&self, plain: &str) -> Result<String, DomainError> {
        let salt = Uuid::new_v4().simple().to_string();
        Ok(format!("{salt}${}", Self::digest(&salt, plain)))
    }

    async fn compare(&self, plain: &str, hash: &str) -> Result<bool, DomainError> {
        let Some((salt, digest)) = hash.split_once('$') else {
            return Err(DomainError::internal("malformed password hash"));
        };
        Ok(Self::digest(salt, plain) == digest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hash_and_compare_round_trip() {
        let hasher = Sha256PasswordHasher::new();
        let hash = hasher.hash("secreta1").await.unwrap();

        assert!(hasher.compare("secreta1", &hash).await.unwrap());
        assert!(!hasher.compare("otra", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn hashes_are_salted() {
        let hasher = Sha256PasswordHasher::new();
        let first = hasher.hash("secreta1").await.unwrap();
        let second = hasher.hash("secreta1").await.unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn malformed_hash_is_an_error() {
        let hasher = Sha256PasswordHasher::new();
        assert!(hasher.compare("x", "sin-separador").await.is_err());
    }
}
