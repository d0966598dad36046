// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Registration and login use cases.
//!
//! Registration creates the user and its role sub-record in one operation
//! and publishes an account event for the welcome notification. Login is
//! split by entry point: the back-office login accepts admins and
//! restaurant owners, the client login accepts clients only.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::application::ports::PasswordHasher;
use crate::domain::error::DomainError;
use crate::domain::events::AccountEvent;
use crate::domain::repository::{
    AdministratorRepository, ClientRepository, RestaurantOwnerRepository, UserRepository,
};
use crate::domain::user::{Administrator, Client, RestaurantOwner, User, UserId, UserRole};
use crate::domain::value_objects::{Email, Password, Phone};
use crate::infrastructure::event_bus::EventBus;

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClientRegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
}

/// Identity summary returned by logins and registration. Never carries the
/// password hash.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResult {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

impl LoginResult {
    fn from_user(user: &User) -> Self {
        Self {
            user_id: user.id,
            name: user.name.clone(),
            email: user.email.as_str().to_string(),
            role: user.role,
        }
    }
}

pub struct AuthService {
    users: Arc<dyn UserRepository>,
    administrators: Arc<dyn AdministratorRepository>,
    owners: Arc<dyn RestaurantOwnerRepository>,
    clients: Arc<dyn ClientRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    event_bus: EventBus,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        administrators: Arc<dyn AdministratorRepository>,
        owners: Arc<dyn RestaurantOwnerRepository>,
        clients: Arc<dyn ClientRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            users,
            administrators,
            owners,
            clients,
            password_hasher,
            event_bus,
        }
    }

    /// Register an administrator or restaurant owner.
    pub async fn register(&self, request: RegisterRequest) -> Result<LoginResult, DomainError> {
        if request.role == UserRole::Client {
            return Err(DomainError::validation(
                "Tipo de usuario inválido para este registro. Use el registro de cliente.",
            ));
        }
        let email = Email::new(&request.email)?;
        if self.users.exists_by_email(email.as_str()).await? {
            return Err(DomainError::email_already_exists());
        }

        // Validates the plaintext rules before hashing.
        Password::new(&request.password)?;
        let hash = self.password_hasher.hash(&request.password).await?;

        let user = User::new(request.name, email, Password::from_hash(hash), request.role)?;
        self.users.save(&user).await?;

        match request.role {
            UserRole::Admin => {
                self.administrators.save(&Administrator::new(user.id)).await?;
            }
            UserRole::RestaurantOwner => {
                self.owners.save(&RestaurantOwner::new(user.id)).await?;
            }
            UserRole::Client => unreachable!("rejected above"),
        }

        info!(user_id = %user.id, role = %user.role, "user registered");
        self.event_bus.publish_account_event(AccountEvent::UserRegistered {
            user_id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            registered_at: Utc::now(),
        });

        Ok(LoginResult::from_user(&user))
    }

    /// Register a client account.
    pub async fn register_client(
        &self,
        request: ClientRegisterRequest,
    ) -> Result<LoginResult, DomainError> {
        let email = Email::new(&request.email)?;
        if self.users.exists_by_email(email.as_str()).await? {
            return Err(DomainError::email_already_exists());
        }
        let phone = request.phone.as_deref().map(Phone::new).transpose()?;

        Password::new(&request.password)?;
        let hash = self.password_hasher.hash(&request.password).await?;

        let user = User::new(request.name, email, Password::from_hash(hash), UserRole::Client)?;
        self.users.save(&user).await?;
        self.clients.save(&Client::new(user.id, phone)).await?;

        info!(user_id = %user.id, "client registered");
        self.event_bus.publish_account_event(AccountEvent::UserRegistered {
            user_id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: UserRole::Client,
            registered_at: Utc::now(),
        });

        Ok(LoginResult::from_user(&user))
    }

    /// Back-office login: administrators and restaurant owners only.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResult, DomainError> {
        let user = self
            .users
            .find_by_email(email.trim().to_lowercase().as_str())
            .await?
            .ok_or_else(DomainError::invalid_credentials)?;

        if user.is_client() {
            return Err(DomainError::wrong_user_type("administrador o restaurantero"));
        }
        self.verify_password(password, &user).await?;
        Ok(LoginResult::from_user(&user))
    }

    /// Client login entry point.
    pub async fn client_login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<LoginResult, DomainError> {
        let user = self
            .users
            .find_by_email(email.trim().to_lowercase().as_str())
            .await?
            .ok_or_else(DomainError::invalid_credentials)?;

        if !user.is_client() {
            return Err(DomainError::wrong_user_type("cliente"));
        }
        self.verify_password(password, &user).await?;
        Ok(LoginResult::from_user(&user))
    }

    pub async fn change_password(
        &self,
        user_id: UserId,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), DomainError> {
        let mut user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::user_not_found(user_id))?;

        let current_ok = self
            .password_hasher
            .compare(current_password, user.password.as_str())
            .await?;
        if !current_ok {
            return Err(DomainError::wrong_current_password());
        }

        let same = self
            .password_hasher
            .compare(new_password, user.password.as_str())
            .await?;
        if same {
            return Err(DomainError::validation(
                "La nueva contraseña debe ser diferente a la actual",
            ));
        }

        Password::new(new_password)?;
        let hash = self.password_hasher.hash(new_password).await?;
        user.set_password(Password::from_hash(hash));
        self.users.update(&user).await?;
        info!(user_id = %user_id, "password changed");
        Ok(())
    }

    async fn verify_password(&self, password: &str, user: &User) -> Result<(), DomainError> {
        let ok = self
            .password_hasher
            .compare(password, user.password.as_str())
            .await?;
        if !ok {
            return Err(DomainError::invalid_credentials());
        }
        Ok(())
    }
}
