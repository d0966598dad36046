// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Access Control Policy
//!
//! One stateless implementation of "ownership or admin", reused unchanged by
//! every mutating use case. The policy answers three questions:
//!
//! - may the actor touch a resource owned by someone
//!   ([`ensure_owner_or_admin`])
//! - does the action require the admin role ([`ensure_admin`])
//! - is the actor trying a self-referential destructive action
//!   ([`ensure_not_self`]), denied even for admins
//!
//! Admins pass every ownership check unconditionally; everyone else must
//! match the recorded owner id. There is no role hierarchy beyond that.

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;
use crate::domain::user::{User, UserId, UserRole};

/// The authenticated identity performing an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: UserId,
    pub role: UserRole,
}

impl Actor {
    pub fn new(id: UserId, role: UserRole) -> Self {
        Self { id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

impl From<&User> for Actor {
    fn from(user: &User) -> Self {
        Actor::new(user.id, user.role)
    }
}

/// Resource kinds the policy can report in "not-your-resource" denials.
/// The label is the user-facing name carried in the error message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Restaurant,
    Menu,
    Zone,
    Document,
    Image,
    Photo,
    Survey,
    User,
    Application,
}

impl Resource {
    pub fn label(&self) -> &'static str {
        match self {
            Resource::Restaurant => "restaurante",
            Resource::Menu => "menú",
            Resource::Zone => "zona",
            Resource::Document => "documento",
            Resource::Image => "imagen",
            Resource::Photo => "foto",
            Resource::Survey => "encuesta",
            Resource::User => "usuario",
            Resource::Application => "solicitud",
        }
    }
}

/// Allow when the actor is an admin or the recorded owner of the resource.
pub fn ensure_owner_or_admin(
    actor: &Actor,
    owner_id: UserId,
    resource: Resource,
) -> Result<(), DomainError> {
    if actor.is_admin() || actor.id == owner_id {
        return Ok(());
    }
    Err(DomainError::not_your_resource(resource.label()))
}

/// Allow only admins, regardless of ownership.
pub fn ensure_admin(actor: &Actor) -> Result<(), DomainError> {
    if actor.is_admin() {
        return Ok(());
    }
    Err(DomainError::insufficient_role("administrador"))
}

/// Deny self-referential destructive actions unconditionally: an admin
/// deleting their own account is refused like anyone else.
pub fn ensure_not_self(actor: &Actor, target: UserId) -> Result<(), DomainError> {
    if actor.id == target {
        return Err(DomainError::cannot_delete_self());
    }
    Ok(())
}
