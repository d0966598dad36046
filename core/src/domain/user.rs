// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! User Domain Model
//!
//! Identity root of the platform. Every account carries exactly one of
//! three roles (`Admin`, `RestaurantOwner`, `Client`); the role is
//! immutable once its role sub-record exists, and changing it goes through
//! the explicit [`User::with_role`] rebuild factory rather than mutation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::value_objects::{Email, Password, Phone};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Role taxonomy every authorization check depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    RestaurantOwner,
    Client,
}

impl UserRole {
    pub fn label(&self) -> &'static str {
        match self {
            UserRole::Admin => "Administrador",
            UserRole::RestaurantOwner => "Restaurantero",
            UserRole::Client => "Cliente",
        }
    }

    pub fn all() -> [UserRole; 3] {
        [UserRole::Admin, UserRole::RestaurantOwner, UserRole::Client]
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// User Aggregate Root
///
/// # Invariants
/// - Name has at least 3 characters
/// - Email is unique platform-wide (enforced at the repository boundary)
/// - Role changes only through [`User::with_role`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub password: Password,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        name: impl Into<String>,
        email: Email,
        password: Password,
        role: UserRole,
    ) -> Result<Self, DomainError> {
        let name = name.into().trim().to_string();
        if name.len() < 3 {
            return Err(DomainError::validation(
                "El nombre debe tener al menos 3 caracteres",
            ));
        }
        let now = Utc::now();
        Ok(Self {
            id: UserId::new(),
            name,
            email,
            password,
            role,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn update_name(&mut self, new_name: impl AsRef<str>) -> Result<(), DomainError> {
        let new_name = new_name.as_ref().trim();
        if new_name.len() < 3 {
            return Err(DomainError::validation(
                "El nombre debe tener al menos 3 caracteres",
            ));
        }
        self.name = new_name.to_string();
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn update_email(&mut self, new_email: Email) {
        self.email = new_email;
        self.updated_at = Utc::now();
    }

    pub fn set_password(&mut self, password: Password) {
        self.password = password;
        self.updated_at = Utc::now();
    }

    /// Rebuild this user with a different role. Identity, credentials, and
    /// the creation timestamp are preserved; only the role changes.
    pub fn with_role(&self, role: UserRole) -> User {
        User {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            role,
            created_at: self.created_at,
            updated_at: Utc::now(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    pub fn is_restaurant_owner(&self) -> bool {
        self.role == UserRole::RestaurantOwner
    }

    pub fn is_client(&self) -> bool {
        self.role == UserRole::Client
    }
}

/// Administrator role sub-record, created atomically with the user (or on
/// promotion).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Administrator {
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}

impl Administrator {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id, created_at: Utc::now() }
    }
}

/// Restaurant owner role sub-record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantOwner {
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}

impl RestaurantOwner {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id, created_at: Utc::now() }
    }
}

/// Client role sub-record. Carries the optional contact phone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub user_id: UserId,
    pub phone: Option<Phone>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Client {
    pub fn new(user_id: UserId, phone: Option<Phone>) -> Self {
        let now = Utc::now();
        Self { user_id, phone, created_at: now, updated_at: now }
    }

    pub fn update_phone(&mut self, phone: Option<Phone>) {
        self.phone = phone;
        self.updated_at = Utc::now();
    }

    pub fn has_phone(&self) -> bool {
        self.phone.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user(role: UserRole) -> User {
        User::new(
            "Ana López",
            Email::new("ana@example.com").unwrap(),
            Password::from_hash("hash"),
            role,
        )
        .unwrap()
    }

    #[test]
    fn user_ids_are_unique() {
        assert_ne!(UserId::new(), UserId::new());
    }

    #[test]
    fn new_user_rejects_short_names() {
        let result = User::new(
            "Al",
            Email::new("al@example.com").unwrap(),
            Password::from_hash("hash"),
            UserRole::Client,
        );
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[test]
    fn with_role_preserves_identity() {
        let user = sample_user(UserRole::RestaurantOwner);
        let promoted = user.with_role(UserRole::Admin);
        assert_eq!(promoted.id, user.id);
        assert_eq!(promoted.email, user.email);
        assert_eq!(promoted.created_at, user.created_at);
        assert!(promoted.is_admin());
        assert!(!user.is_admin());
    }

    #[test]
    fn role_labels() {
        assert_eq!(UserRole::Admin.label(), "Administrador");
        assert_eq!(UserRole::RestaurantOwner.label(), "Restaurantero");
        assert_eq!(UserRole::Client.label(), "Cliente");
    }

    #[test]
    fn client_phone_update() {
        let mut client = Client::new(UserId::new(), None);
        assert!(!client.has_phone());
        client.update_phone(Some(Phone::new("5512345678").unwrap()));
        assert!(client.has_phone());
    }
}
