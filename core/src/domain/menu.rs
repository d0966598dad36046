// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Menu Domain Model
//!
//! A restaurant's downloadable menu. The lifecycle moves freely between
//! `Pending`, `Revision`, `Active`, and `Inactive`; which menu is "the
//! active one" for download queries is a repository query contract
//! (`find_active_by_restaurant`), not an in-memory invariant here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::application::StatusDetails;
use crate::domain::restaurant::RestaurantId;
use crate::domain::value_objects::FileUrl;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MenuId(pub Uuid);

impl MenuId {
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

impl Default for MenuId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MenuId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuStatus {
    Active,
    Inactive,
    Pending,
    Revision,
}

impl MenuStatus {
    pub fn details(&self) -> StatusDetails {
        match self {
            MenuStatus::Active => StatusDetails {
                label: "Activo",
                color: "green",
                icon: "📗",
                description: "Menú activo y disponible para descarga",
            },
            MenuStatus::Inactive => StatusDetails {
                label: "Inactivo",
                color: "gray",
                icon: "📕",
                description: "Menú inactivo, no visible para clientes",
            },
            MenuStatus::Pending => StatusDetails {
                label: "Pendiente",
                color: "yellow",
                icon: "⏳",
                description: "Menú pendiente de aprobación",
            },
            MenuStatus::Revision => StatusDetails {
                label: "En Revisión",
                color: "orange",
                icon: "🔍",
                description: "Menú en revisión por administrador",
            },
        }
    }
}

impl std::fmt::Display for MenuStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.details().label)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Menu {
    pub id: MenuId,
    /// Location of the uploaded source file in storage.
    pub file_url: FileUrl,
    /// Public URL handed to clients on download.
    pub menu_url: FileUrl,
    pub status: MenuStatus,
    pub restaurant_id: RestaurantId,
    /// Incremented only by the gated download operation.
    pub download_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Menu {
    pub fn new(
        file_url: FileUrl,
        menu_url: FileUrl,
        status: MenuStatus,
        restaurant_id: RestaurantId,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: MenuId::new(),
            file_url,
            menu_url,
            status,
            restaurant_id,
            download_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn set_status(&mut self, status: MenuStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }

    pub fn increment_download_count(&mut self) -> u32 {
        self.download_count += 1;
        self.updated_at = Utc::now();
        self.download_count
    }

    pub fn is_active(&self) -> bool {
        self.status == MenuStatus::Active
    }
}
