// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Menu management and the gated download operation.
//!
//! Downloads require an existing favorite from the requesting client. The
//! active menu is resolved by the repository query, never by filtering
//! here. On deletion the stored files are removed first; a failing file
//! deletion is logged and does not abort the record deletion, which is the
//! source of truth for "the menu is gone".

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::application::ports::FileStorage;
use crate::domain::access::{self, Actor, Resource};
use crate::domain::error::DomainError;
use crate::domain::events::EngagementEvent;
use crate::domain::menu::{Menu, MenuId, MenuStatus};
use crate::domain::repository::{FavoriteRepository, MenuRepository, RestaurantRepository};
use crate::domain::restaurant::RestaurantId;
use crate::domain::user::UserId;
use crate::domain::value_objects::FileUrl;
use crate::infrastructure::event_bus::EventBus;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateMenuRequest {
    pub file_url: String,
    pub menu_url: String,
    pub status: MenuStatus,
    pub restaurant_id: RestaurantId,
}

#[derive(Debug, Clone, Serialize)]
pub struct DownloadMenuResult {
    pub menu_url: FileUrl,
    pub file_name: String,
}

pub struct MenuService {
    menus: Arc<dyn MenuRepository>,
    restaurants: Arc<dyn RestaurantRepository>,
    favorites: Arc<dyn FavoriteRepository>,
    storage: Arc<dyn FileStorage>,
    event_bus: EventBus,
}

impl MenuService {
    pub fn new(
        menus: Arc<dyn MenuRepository>,
        restaurants: Arc<dyn RestaurantRepository>,
        favorites: Arc<dyn FavoriteRepository>,
        storage: Arc<dyn FileStorage>,
        event_bus: EventBus,
    ) -> Self {
        Self { menus, restaurants, favorites, storage, event_bus }
    }

    pub async fn create(
        &self,
        actor: &Actor,
        request: CreateMenuRequest,
    ) -> Result<Menu, DomainError> {
        let restaurant = self
            .restaurants
            .find_by_id(request.restaurant_id)
            .await?
            .ok_or_else(|| DomainError::restaurant_not_found(request.restaurant_id))?;
        access::ensure_owner_or_admin(actor, restaurant.owner_id, Resource::Restaurant)?;

        let menu = Menu::new(
            FileUrl::new(&request.file_url)?,
            FileUrl::new(&request.menu_url)?,
            request.status,
            request.restaurant_id,
        );
        self.menus.save(&menu).await?;
        info!(menu_id = %menu.id, restaurant_id = %menu.restaurant_id, "menu created");
        Ok(menu)
    }

    pub async fn update_status(
        &self,
        actor: &Actor,
        menu_id: MenuId,
        status: MenuStatus,
    ) -> Result<Menu, DomainError> {
        let mut menu = self.load(menu_id).await?;
        let restaurant = self
            .restaurants
            .find_by_id(menu.restaurant_id)
            .await?
            .ok_or_else(|| DomainError::restaurant_not_found(menu.restaurant_id))?;
        access::ensure_owner_or_admin(actor, restaurant.owner_id, Resource::Menu)?;

        menu.set_status(status);
        self.menus.update(&menu).await?;
        Ok(menu)
    }

    pub async fn delete(&self, actor: &Actor, menu_id: MenuId) -> Result<(), DomainError> {
        let menu = self.load(menu_id).await?;
        let restaurant = self
            .restaurants
            .find_by_id(menu.restaurant_id)
            .await?
            .ok_or_else(|| DomainError::restaurant_not_found(menu.restaurant_id))?;
        access::ensure_owner_or_admin(actor, restaurant.owner_id, Resource::Menu)?;

        // Files first, record second; file cleanup is non-fatal.
        for url in [&menu.file_url, &menu.menu_url] {
            if let Err(err) = self.storage.delete(url).await {
                warn!(menu_id = %menu_id, url = %url, %err, "failed to delete menu file");
            }
        }
        self.menus.delete(menu_id).await?;
        info!(menu_id = %menu_id, deleted_by = %actor.id, "menu deleted");
        Ok(())
    }

    /// Download the restaurant's active menu. Requires an existing favorite
    /// from the client ("like required").
    pub async fn download(
        &self,
        client_id: UserId,
        restaurant_id: RestaurantId,
    ) -> Result<DownloadMenuResult, DomainError> {
        let has_favorite = self
            .favorites
            .exists_by_client_and_restaurant(client_id, restaurant_id)
            .await?;
        if !has_favorite {
            return Err(DomainError::like_required());
        }

        let menu = self
            .menus
            .find_active_by_restaurant(restaurant_id)
            .await?
            .ok_or_else(|| DomainError::active_menu_not_found(restaurant_id))?;

        self.menus.increment_download_count(menu.id).await?;

        self.event_bus.publish_engagement_event(EngagementEvent::MenuDownloaded {
            client_id,
            restaurant_id,
            menu_id: menu.id,
            at: Utc::now(),
        });
        info!(menu_id = %menu.id, client_id = %client_id, "menu downloaded");

        Ok(DownloadMenuResult {
            menu_url: menu.menu_url.clone(),
            file_name: format!("menu-restaurante-{restaurant_id}.pdf"),
        })
    }

    pub async fn menus_by_restaurant(
        &self,
        restaurant_id: RestaurantId,
    ) -> Result<Vec<Menu>, DomainError> {
        Ok(self.menus.find_by_restaurant(restaurant_id).await?)
    }

    pub async fn menus_by_status(&self, status: MenuStatus) -> Result<Vec<Menu>, DomainError> {
        Ok(self.menus.find_by_status(status).await?)
    }

    pub async fn menus_by_owner(&self, owner_id: UserId) -> Result<Vec<Menu>, DomainError> {
        let mut menus = Vec::new();
        for restaurant in self.restaurants.find_by_owner(owner_id).await? {
            menus.extend(self.menus.find_by_restaurant(restaurant.id).await?);
        }
        Ok(menus)
    }

    pub async fn active_menu(
        &self,
        restaurant_id: RestaurantId,
    ) -> Result<Option<Menu>, DomainError> {
        Ok(self.menus.find_active_by_restaurant(restaurant_id).await?)
    }

    async fn load(&self, menu_id: MenuId) -> Result<Menu, DomainError> {
        self.menus
            .find_by_id(menu_id)
            .await?
            .ok_or_else(|| DomainError::menu_not_found(menu_id))
    }
}
