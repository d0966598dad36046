// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Service ports consumed by the orchestrators.
//!
//! Credential hashing, blob storage, and email delivery are external
//! collaborators; the core only sees these contracts. Implementations live
//! in `crate::infrastructure` (development adapters) or outside the crate.

use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::value_objects::{Email, FileUrl};

/// Credential hashing port.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, plain: &str) -> Result<String, DomainError>;
    async fn compare(&self, plain: &str, hash: &str) -> Result<bool, DomainError>;
}

/// Blob storage port. The core never interprets file contents; the returned
/// location is an opaque value object.
#[async_trait]
pub trait FileStorage: Send + Sync {
    async fn upload(
        &self,
        bytes: &[u8],
        folder: &str,
        filename: &str,
    ) -> Result<FileUrl, DomainError>;
    async fn delete(&self, url: &FileUrl) -> Result<(), DomainError>;
    fn public_url(&self, path: &str) -> String;
}

/// Outbound notification port. Fire-and-forget: the use cases themselves
/// never call this directly; the event-bus subscriber in
/// `infrastructure::notifier` does, after the state transition committed.
#[async_trait]
pub trait EmailService: Send + Sync {
    async fn send_welcome(&self, to: &Email, name: &str) -> Result<(), DomainError>;
    async fn send_application_approved(
        &self,
        to: &Email,
        restaurant_name: &str,
    ) -> Result<(), DomainError>;
    async fn send_application_rejected(
        &self,
        to: &Email,
        restaurant_name: &str,
        reason: Option<&str>,
    ) -> Result<(), DomainError>;
}
