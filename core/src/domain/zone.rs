// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Zone: a named grouping of restaurants owned by a user. Zones with
//! restaurants still referencing them cannot be deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::user::UserId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ZoneId(pub Uuid);

impl ZoneId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for ZoneId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ZoneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Zone {
    pub id: ZoneId,
    pub name: String,
    pub owner_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Zone {
    pub fn new(name: impl Into<String>, owner_id: UserId) -> Result<Self, DomainError> {
        let name = name.into().trim().to_string();
        if name.len() < 3 {
            return Err(DomainError::validation(
                "El nombre de la zona debe tener al menos 3 caracteres",
            ));
        }
        let now = Utc::now();
        Ok(Self { id: ZoneId::new(), name, owner_id, created_at: now, updated_at: now })
    }

    pub fn rename(&mut self, new_name: impl AsRef<str>) -> Result<(), DomainError> {
        let new_name = new_name.as_ref().trim();
        if new_name.len() < 3 {
            return Err(DomainError::validation(
                "El nombre de la zona debe tener al menos 3 caracteres",
            ));
        }
        self.name = new_name.to_string();
        self.updated_at = Utc::now();
        Ok(())
    }
}
