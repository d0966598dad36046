// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Favorite (like) join entity.
//!
//! At most one favorite exists per (client, restaurant) pair; the pair
//! uniqueness is backstopped by the repository. Favorites are hard-deleted
//! on unlike (no tombstones), and their creation/removal is the only path
//! that moves a restaurant's `likes_count`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::restaurant::RestaurantId;
use crate::domain::user::UserId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FavoriteId(pub Uuid);

impl FavoriteId {
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

impl Default for FavoriteId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for FavoriteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Favorite {
    pub id: FavoriteId,
    pub client_id: UserId,
    pub restaurant_id: RestaurantId,
    pub created_at: DateTime<Utc>,
}

impl Favorite {
    pub fn new(client_id: UserId, restaurant_id: RestaurantId) -> Self {
        Self {
            id: FavoriteId::new(),
            client_id,
            restaurant_id,
            created_at: Utc::now(),
        }
    }
}
