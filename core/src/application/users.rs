// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! User directory, account updates, admin-gated deletion, and role
//! promotions.
//!
//! Deletion order matters: the role sub-record goes first, then the user
//! row, and an owner with registered restaurants is refused outright.
//! Promotions rebuild the user with [`User::with_role`] and create the new
//! role sub-record; a pre-existing conflicting sub-record blocks the
//! promotion.

use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use tracing::info;

use crate::domain::access::{self, Actor, Resource};
use crate::domain::error::DomainError;
use crate::domain::events::AccountEvent;
use crate::domain::repository::{
    AdministratorRepository, ClientRepository, RestaurantOwnerRepository, RestaurantRepository,
    UserRepository,
};
use crate::domain::user::{Administrator, RestaurantOwner, User, UserId, UserRole};
use crate::domain::value_objects::Email;
use crate::infrastructure::event_bus::EventBus;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

pub struct UserService {
    users: Arc<dyn UserRepository>,
    administrators: Arc<dyn AdministratorRepository>,
    owners: Arc<dyn RestaurantOwnerRepository>,
    clients: Arc<dyn ClientRepository>,
    restaurants: Arc<dyn RestaurantRepository>,
    event_bus: EventBus,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        administrators: Arc<dyn AdministratorRepository>,
        owners: Arc<dyn RestaurantOwnerRepository>,
        clients: Arc<dyn ClientRepository>,
        restaurants: Arc<dyn RestaurantRepository>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            users,
            administrators,
            owners,
            clients,
            restaurants,
            event_bus,
        }
    }

    pub async fn get_user(&self, id: UserId) -> Result<User, DomainError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::user_not_found(id))
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<User, DomainError> {
        self.users
            .find_by_email(email.trim().to_lowercase().as_str())
            .await?
            .ok_or_else(|| DomainError::not_found("Usuario", email))
    }

    pub async fn list_users(&self, actor: &Actor) -> Result<Vec<User>, DomainError> {
        access::ensure_admin(actor)?;
        Ok(self.users.list_all().await?)
    }

    pub async fn list_administrators(&self, actor: &Actor) -> Result<Vec<User>, DomainError> {
        access::ensure_admin(actor)?;
        Ok(self.users.find_by_role(UserRole::Admin).await?)
    }

    pub async fn list_restaurant_owners(&self, actor: &Actor) -> Result<Vec<User>, DomainError> {
        access::ensure_admin(actor)?;
        Ok(self.users.find_by_role(UserRole::RestaurantOwner).await?)
    }

    /// Users may edit their own profile; admins may edit anyone's.
    pub async fn update_user(
        &self,
        actor: &Actor,
        user_id: UserId,
        request: UpdateUserRequest,
    ) -> Result<User, DomainError> {
        access::ensure_owner_or_admin(actor, user_id, Resource::User)?;
        let mut user = self.get_user(user_id).await?;

        if let Some(name) = request.name {
            user.update_name(name)?;
        }
        if let Some(email) = request.email {
            let email = Email::new(email)?;
            if email != user.email && self.users.exists_by_email(email.as_str()).await? {
                return Err(DomainError::email_already_exists());
            }
            user.update_email(email);
        }
        self.users.update(&user).await?;
        Ok(user)
    }

    /// Delete a user. Admin-only, never oneself, and never a restaurant
    /// owner who still has restaurants registered.
    pub async fn delete_user(&self, actor: &Actor, user_id: UserId) -> Result<(), DomainError> {
        access::ensure_admin(actor)?;
        access::ensure_not_self(actor, user_id)?;

        let user = self.get_user(user_id).await?;

        if user.is_restaurant_owner() {
            let restaurants = self.restaurants.find_by_owner(user_id).await?;
            if !restaurants.is_empty() {
                return Err(DomainError::resource_in_use(
                    "No se puede eliminar el restaurantero porque tiene restaurantes registrados",
                ));
            }
        }

        match user.role {
            UserRole::Admin => self.administrators.delete(user_id).await?,
            UserRole::RestaurantOwner => self.owners.delete(user_id).await?,
            UserRole::Client => self.clients.delete(user_id).await?,
        }
        self.users.delete(user_id).await?;

        info!(user_id = %user_id, deleted_by = %actor.id, "user deleted");
        self.event_bus.publish_account_event(AccountEvent::UserDeleted {
            user_id,
            deleted_by: actor.id,
            deleted_at: Utc::now(),
        });
        Ok(())
    }

    /// Promote an owner to administrator. Clients cannot be promoted
    /// directly.
    pub async fn promote_to_admin(
        &self,
        actor: &Actor,
        user_id: UserId,
    ) -> Result<(), DomainError> {
        access::ensure_admin(actor)?;
        let user = self.get_user(user_id).await?;

        if user.is_admin() {
            return Err(DomainError::conflict(
                "ALREADY_ADMIN",
                "Este usuario ya es administrador",
            ));
        }
        if user.is_client() {
            return Err(DomainError::validation(
                "No se puede promover a un cliente a administrador directamente",
            ));
        }
        if self.administrators.find_by_user(user_id).await?.is_some() {
            return Err(DomainError::conflict(
                "ALREADY_ADMIN",
                "Este usuario ya tiene un registro de administrador",
            ));
        }

        let promoted = user.with_role(UserRole::Admin);
        self.users.update(&promoted).await?;
        self.administrators.save(&Administrator::new(user_id)).await?;

        info!(user_id = %user_id, "user promoted to administrator");
        self.event_bus.publish_account_event(AccountEvent::UserPromoted {
            user_id,
            new_role: UserRole::Admin,
            promoted_at: Utc::now(),
        });
        Ok(())
    }

    /// Promote an administrator to restaurant owner.
    pub async fn promote_to_owner(
        &self,
        actor: &Actor,
        user_id: UserId,
    ) -> Result<(), DomainError> {
        access::ensure_admin(actor)?;
        let user = self.get_user(user_id).await?;

        if user.is_restaurant_owner() {
            return Err(DomainError::conflict(
                "ALREADY_OWNER",
                "Este usuario ya es restaurantero",
            ));
        }
        if user.is_client() {
            return Err(DomainError::validation(
                "No se puede promover a un cliente a restaurantero directamente",
            ));
        }
        if self.owners.find_by_user(user_id).await?.is_some() {
            return Err(DomainError::conflict(
                "ALREADY_OWNER",
                "Este usuario ya tiene un registro de restaurantero",
            ));
        }

        let promoted = user.with_role(UserRole::RestaurantOwner);
        self.users.update(&promoted).await?;
        self.owners.save(&RestaurantOwner::new(user_id)).await?;

        info!(user_id = %user_id, "user promoted to restaurant owner");
        self.event_bus.publish_account_event(AccountEvent::UserPromoted {
            user_id,
            new_role: UserRole::RestaurantOwner,
            promoted_at: Utc::now(),
        });
        Ok(())
    }
}
