// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Restaurant lifecycle use cases.
//!
//! Creation is gated on an approved onboarding application and on the 1:1
//! application↔restaurant rule. Updates and deletion apply the single
//! ownership-or-admin policy.

use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use tracing::info;

use crate::domain::access::{self, Actor, Resource};
use crate::domain::application::ApplicationId;
use crate::domain::error::DomainError;
use crate::domain::events::OnboardingEvent;
use crate::domain::repository::{ApplicationRepository, RestaurantRepository};
use crate::domain::restaurant::{Restaurant, RestaurantId, RestaurantUpdate};
use crate::domain::user::UserId;
use crate::domain::value_objects::{Phone, Url};
use crate::domain::zone::ZoneId;
use crate::infrastructure::event_bus::EventBus;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateRestaurantRequest {
    pub name: String,
    pub schedule: String,
    pub phone: String,
    pub tags: Vec<String>,
    pub address: String,
    pub facebook: Option<String>,
    pub instagram: Option<String>,
    pub zone_id: Option<ZoneId>,
    pub owner_id: UserId,
    pub application_id: ApplicationId,
}

pub struct RestaurantService {
    restaurants: Arc<dyn RestaurantRepository>,
    applications: Arc<dyn ApplicationRepository>,
    event_bus: EventBus,
}

impl RestaurantService {
    pub fn new(
        restaurants: Arc<dyn RestaurantRepository>,
        applications: Arc<dyn ApplicationRepository>,
        event_bus: EventBus,
    ) -> Self {
        Self { restaurants, applications, event_bus }
    }

    /// Create a restaurant from an approved application. Fails if the
    /// application is missing, not approved, or already has a restaurant.
    pub async fn create(
        &self,
        request: CreateRestaurantRequest,
    ) -> Result<Restaurant, DomainError> {
        let application = self
            .applications
            .find_by_id(request.application_id)
            .await?
            .ok_or_else(|| DomainError::application_not_found(request.application_id))?;

        if !application.is_approved() {
            return Err(DomainError::validation(
                "La solicitud debe estar aprobada para crear el restaurante",
            ));
        }
        if self
            .restaurants
            .exists_by_application(request.application_id)
            .await?
        {
            return Err(DomainError::restaurant_for_application_exists());
        }

        let phone = Phone::new(&request.phone)?;
        let facebook = request.facebook.as_deref().map(Url::new).transpose()?;
        let instagram = request.instagram.as_deref().map(Url::new).transpose()?;

        let restaurant = Restaurant::new(
            request.name,
            request.schedule,
            phone,
            request.tags,
            request.address,
            facebook,
            instagram,
            request.zone_id,
            request.owner_id,
            request.application_id,
        )?;
        self.restaurants.save(&restaurant).await?;

        info!(
            restaurant_id = %restaurant.id,
            application_id = %restaurant.application_id,
            "restaurant created"
        );
        self.event_bus.publish_onboarding_event(OnboardingEvent::RestaurantCreated {
            restaurant_id: restaurant.id,
            application_id: restaurant.application_id,
            owner_id: restaurant.owner_id,
            created_at: Utc::now(),
        });

        Ok(restaurant)
    }

    pub async fn update(
        &self,
        actor: &Actor,
        restaurant_id: RestaurantId,
        update: RestaurantUpdate,
    ) -> Result<Restaurant, DomainError> {
        let mut restaurant = self.load(restaurant_id).await?;
        access::ensure_owner_or_admin(actor, restaurant.owner_id, Resource::Restaurant)?;

        restaurant.update_info(update)?;
        self.restaurants.update(&restaurant).await?;
        Ok(restaurant)
    }

    pub async fn delete(
        &self,
        actor: &Actor,
        restaurant_id: RestaurantId,
    ) -> Result<(), DomainError> {
        let restaurant = self.load(restaurant_id).await?;
        access::ensure_owner_or_admin(actor, restaurant.owner_id, Resource::Restaurant)?;

        self.restaurants.delete(restaurant_id).await?;
        info!(restaurant_id = %restaurant_id, deleted_by = %actor.id, "restaurant deleted");
        Ok(())
    }

    pub async fn get(&self, restaurant_id: RestaurantId) -> Result<Restaurant, DomainError> {
        self.load(restaurant_id).await
    }

    pub async fn list_all(&self) -> Result<Vec<Restaurant>, DomainError> {
        Ok(self.restaurants.find_all().await?)
    }

    pub async fn restaurants_by_owner(
        &self,
        owner_id: UserId,
    ) -> Result<Vec<Restaurant>, DomainError> {
        Ok(self.restaurants.find_by_owner(owner_id).await?)
    }

    pub async fn restaurants_by_zone(
        &self,
        zone_id: ZoneId,
    ) -> Result<Vec<Restaurant>, DomainError> {
        Ok(self.restaurants.find_by_zone(zone_id).await?)
    }

    pub async fn most_popular(&self, limit: usize) -> Result<Vec<Restaurant>, DomainError> {
        Ok(self.restaurants.find_most_popular(limit).await?)
    }

    pub async fn search(&self, name: &str) -> Result<Vec<Restaurant>, DomainError> {
        Ok(self.restaurants.search_by_name(name).await?)
    }

    async fn load(&self, restaurant_id: RestaurantId) -> Result<Restaurant, DomainError> {
        self.restaurants
            .find_by_id(restaurant_id)
            .await?
            .ok_or_else(|| DomainError::restaurant_not_found(restaurant_id))
    }
}
