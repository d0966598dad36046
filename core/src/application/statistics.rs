// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Read-only statistics across aggregates: per-restaurant engagement,
//! owner dashboards, platform totals, and the popularity report built on
//! the scoring service.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::future::try_join_all;
use serde::Serialize;

use crate::domain::application::ApplicationStatus;
use crate::domain::error::DomainError;
use crate::domain::popularity::{LikesInsights, Milestone, PopularityLevel, PopularityService};
use crate::domain::repository::{
    ApplicationRepository, FavoriteRepository, MenuRepository, RestaurantRepository,
    UserPhotoRepository, UserRepository, ZoneRepository,
};
use crate::domain::restaurant::RestaurantId;
use crate::domain::user::{UserId, UserRole};

#[derive(Debug, Clone, Serialize)]
pub struct RestaurantStats {
    pub restaurant_id: RestaurantId,
    pub restaurant_name: String,
    pub likes: usize,
    pub user_photos: usize,
    pub menu_downloads: u32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RestaurantEngagement {
    pub restaurant_id: RestaurantId,
    pub name: String,
    pub likes: usize,
    pub photos: usize,
    pub downloads: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct OwnerStats {
    pub total_restaurants: usize,
    pub restaurants: Vec<RestaurantEngagement>,
    pub total_likes: usize,
    pub total_photos: usize,
    pub total_downloads: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct GlobalStats {
    pub total_users: usize,
    pub total_clients: usize,
    pub total_owners: usize,
    pub total_restaurants: usize,
    pub total_zones: usize,
    pub pending_applications: usize,
}

/// Popularity report for a single restaurant, derived from the scoring
/// service with `now` fixed at call time.
#[derive(Debug, Clone, Serialize)]
pub struct PopularityReport {
    pub restaurant_id: RestaurantId,
    pub score: f64,
    pub level: PopularityLevel,
    pub is_popular: bool,
    pub is_trending: bool,
    pub featured: bool,
    pub next_milestone: Milestone,
    pub insights: LikesInsights,
    pub recommendations: Vec<&'static str>,
}

pub struct StatisticsService {
    restaurants: Arc<dyn RestaurantRepository>,
    favorites: Arc<dyn FavoriteRepository>,
    photos: Arc<dyn UserPhotoRepository>,
    menus: Arc<dyn MenuRepository>,
    users: Arc<dyn UserRepository>,
    zones: Arc<dyn ZoneRepository>,
    applications: Arc<dyn ApplicationRepository>,
}

impl StatisticsService {
    pub fn new(
        restaurants: Arc<dyn RestaurantRepository>,
        favorites: Arc<dyn FavoriteRepository>,
        photos: Arc<dyn UserPhotoRepository>,
        menus: Arc<dyn MenuRepository>,
        users: Arc<dyn UserRepository>,
        zones: Arc<dyn ZoneRepository>,
        applications: Arc<dyn ApplicationRepository>,
    ) -> Self {
        Self {
            restaurants,
            favorites,
            photos,
            menus,
            users,
            zones,
            applications,
        }
    }

    pub async fn restaurant_stats(
        &self,
        restaurant_id: RestaurantId,
    ) -> Result<RestaurantStats, DomainError> {
        let restaurant = self
            .restaurants
            .find_by_id(restaurant_id)
            .await?
            .ok_or_else(|| DomainError::restaurant_not_found(restaurant_id))?;

        let (likes, user_photos, menu_downloads) = tokio::try_join!(
            self.favorites.count_by_restaurant(restaurant_id),
            self.photos.count_by_restaurant(restaurant_id),
            self.menus.total_downloads_by_restaurant(restaurant_id),
        )?;

        Ok(RestaurantStats {
            restaurant_id,
            restaurant_name: restaurant.name,
            likes,
            user_photos,
            menu_downloads,
            created_at: restaurant.created_at,
        })
    }

    pub async fn owner_stats(&self, owner_id: UserId) -> Result<OwnerStats, DomainError> {
        let restaurants = self.restaurants.find_by_owner(owner_id).await?;

        let rows = try_join_all(restaurants.iter().map(|restaurant| async move {
            let (likes, photos, downloads) = tokio::try_join!(
                self.favorites.count_by_restaurant(restaurant.id),
                self.photos.count_by_restaurant(restaurant.id),
                self.menus.total_downloads_by_restaurant(restaurant.id),
            )?;
            Ok::<_, DomainError>(RestaurantEngagement {
                restaurant_id: restaurant.id,
                name: restaurant.name.clone(),
                likes,
                photos,
                downloads,
            })
        }))
        .await?;

        let total_likes = rows.iter().map(|r| r.likes).sum();
        let total_photos = rows.iter().map(|r| r.photos).sum();
        let total_downloads = rows.iter().map(|r| r.downloads).sum();

        Ok(OwnerStats {
            total_restaurants: restaurants.len(),
            restaurants: rows,
            total_likes,
            total_photos,
            total_downloads,
        })
    }

    pub async fn global_stats(&self) -> Result<GlobalStats, DomainError> {
        let (total_users, total_clients, total_owners, total_restaurants, total_zones, pending) =
            tokio::try_join!(
                self.users.count(),
                self.users.count_by_role(UserRole::Client),
                self.users.count_by_role(UserRole::RestaurantOwner),
                self.restaurants.count(),
                self.zones.count(),
                self.applications.count_by_status(ApplicationStatus::Pending),
            )?;

        Ok(GlobalStats {
            total_users,
            total_clients,
            total_owners,
            total_restaurants,
            total_zones,
            pending_applications: pending,
        })
    }

    /// Score a restaurant's current engagement. `previous_likes` feeds the
    /// growth insight; pass the like count from the previous period, or 0.
    pub async fn popularity_report(
        &self,
        restaurant_id: RestaurantId,
        previous_likes: u32,
    ) -> Result<PopularityReport, DomainError> {
        let restaurant = self
            .restaurants
            .find_by_id(restaurant_id)
            .await?
            .ok_or_else(|| DomainError::restaurant_not_found(restaurant_id))?;

        let (photos, downloads) = tokio::try_join!(
            self.photos.count_by_restaurant(restaurant_id),
            self.menus.total_downloads_by_restaurant(restaurant_id),
        )?;

        let now = Utc::now();
        let likes = restaurant.likes_count;
        let age_days = (now - restaurant.created_at).num_days();
        let score = PopularityService::score(likes, restaurant.created_at, photos as u32, now);

        Ok(PopularityReport {
            restaurant_id,
            score,
            level: PopularityService::popularity_level(likes),
            is_popular: PopularityService::is_popular(likes),
            is_trending: PopularityService::is_trending(likes),
            featured: PopularityService::should_feature(likes, age_days),
            next_milestone: PopularityService::next_milestone(likes),
            insights: PopularityService::insights(likes, previous_likes),
            recommendations: PopularityService::recommendations(likes, photos as u32, downloads),
        })
    }
}
