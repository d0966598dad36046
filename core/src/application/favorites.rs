// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Engagement ledger: favorite toggling with atomic counter maintenance.
//!
//! The toggle performs two writes in a fixed order: first the favorite
//! record, then the restaurant's `likes_count` through the repository's
//! atomic increment/decrement. Both writes belong to one logical unit at
//! the persistence boundary; a failure in either step propagates, it is
//! never swallowed here.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::info;

use crate::domain::error::DomainError;
use crate::domain::events::EngagementEvent;
use crate::domain::favorite::Favorite;
use crate::domain::repository::{FavoriteRepository, RestaurantRepository};
use crate::domain::restaurant::RestaurantId;
use crate::domain::user::UserId;
use crate::infrastructure::event_bus::EventBus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ToggleFavoriteResult {
    pub is_favorite: bool,
    pub likes_count: u32,
}

pub struct FavoriteService {
    favorites: Arc<dyn FavoriteRepository>,
    restaurants: Arc<dyn RestaurantRepository>,
    event_bus: EventBus,
}

impl FavoriteService {
    pub fn new(
        favorites: Arc<dyn FavoriteRepository>,
        restaurants: Arc<dyn RestaurantRepository>,
        event_bus: EventBus,
    ) -> Self {
        Self { favorites, restaurants, event_bus }
    }

    /// Like or unlike a restaurant. Toggling twice returns to the original
    /// state and the original count.
    pub async fn toggle(
        &self,
        client_id: UserId,
        restaurant_id: RestaurantId,
    ) -> Result<ToggleFavoriteResult, DomainError> {
        if self.restaurants.find_by_id(restaurant_id).await?.is_none() {
            return Err(DomainError::restaurant_not_found(restaurant_id));
        }

        let existing = self
            .favorites
            .find_by_client_and_restaurant(client_id, restaurant_id)
            .await?;

        let result = match existing {
            Some(favorite) => {
                self.favorites.delete(favorite.id).await?;
                let likes_count = self.restaurants.decrement_likes_count(restaurant_id).await?;
                self.event_bus.publish_engagement_event(EngagementEvent::FavoriteRemoved {
                    client_id,
                    restaurant_id,
                    likes_count,
                    at: Utc::now(),
                });
                ToggleFavoriteResult { is_favorite: false, likes_count }
            }
            None => {
                let favorite = Favorite::new(client_id, restaurant_id);
                self.favorites.save(&favorite).await?;
                let likes_count = self.restaurants.increment_likes_count(restaurant_id).await?;
                self.event_bus.publish_engagement_event(EngagementEvent::FavoriteAdded {
                    client_id,
                    restaurant_id,
                    likes_count,
                    at: Utc::now(),
                });
                ToggleFavoriteResult { is_favorite: true, likes_count }
            }
        };

        info!(
            client_id = %client_id,
            restaurant_id = %restaurant_id,
            is_favorite = result.is_favorite,
            likes_count = result.likes_count,
            "favorite toggled"
        );
        Ok(result)
    }

    pub async fn is_favorite(
        &self,
        client_id: UserId,
        restaurant_id: RestaurantId,
    ) -> Result<bool, DomainError> {
        Ok(self
            .favorites
            .exists_by_client_and_restaurant(client_id, restaurant_id)
            .await?)
    }

    pub async fn client_favorites(
        &self,
        client_id: UserId,
    ) -> Result<Vec<Favorite>, DomainError> {
        Ok(self.favorites.find_by_client(client_id).await?)
    }

    /// Like count straight from the favorite records, the source of truth
    /// the cached `likes_count` must agree with.
    pub async fn restaurant_likes(
        &self,
        restaurant_id: RestaurantId,
    ) -> Result<usize, DomainError> {
        Ok(self.favorites.count_by_restaurant(restaurant_id).await?)
    }

    pub async fn most_favorited(
        &self,
        limit: usize,
    ) -> Result<Vec<(RestaurantId, usize)>, DomainError> {
        Ok(self.favorites.find_most_favorited(limit).await?)
    }
}
