// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Zone use cases. Zone names are unique, and a zone with restaurants
//! still assigned to it cannot be deleted.

use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use crate::domain::access::{self, Actor, Resource};
use crate::domain::error::DomainError;
use crate::domain::repository::{RestaurantRepository, ZoneRepository};
use crate::domain::user::UserId;
use crate::domain::zone::{Zone, ZoneId};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateZoneRequest {
    pub name: String,
    pub owner_id: UserId,
}

pub struct ZoneService {
    zones: Arc<dyn ZoneRepository>,
    restaurants: Arc<dyn RestaurantRepository>,
}

impl ZoneService {
    pub fn new(zones: Arc<dyn ZoneRepository>, restaurants: Arc<dyn RestaurantRepository>) -> Self {
        Self { zones, restaurants }
    }

    pub async fn create(&self, request: CreateZoneRequest) -> Result<Zone, DomainError> {
        if self.zones.find_by_name(request.name.trim()).await?.is_some() {
            return Err(DomainError::zone_already_exists(request.name.trim()));
        }
        let zone = Zone::new(request.name, request.owner_id)?;
        self.zones.save(&zone).await?;
        info!(zone_id = %zone.id, "zone created");
        Ok(zone)
    }

    pub async fn rename(
        &self,
        actor: &Actor,
        zone_id: ZoneId,
        new_name: &str,
    ) -> Result<Zone, DomainError> {
        let mut zone = self.load(zone_id).await?;
        access::ensure_owner_or_admin(actor, zone.owner_id, Resource::Zone)?;

        let new_name = new_name.trim();
        if new_name != zone.name && self.zones.exists_by_name(new_name).await? {
            return Err(DomainError::zone_already_exists(new_name));
        }
        zone.rename(new_name)?;
        self.zones.update(&zone).await?;
        Ok(zone)
    }

    /// Delete a zone. Refused while restaurants still reference it.
    pub async fn delete(&self, actor: &Actor, zone_id: ZoneId) -> Result<(), DomainError> {
        let zone = self.load(zone_id).await?;
        access::ensure_owner_or_admin(actor, zone.owner_id, Resource::Zone)?;

        let referencing = self.restaurants.find_by_zone(zone_id).await?;
        if !referencing.is_empty() {
            return Err(DomainError::resource_in_use(
                "No se puede eliminar la zona porque tiene restaurantes asociados",
            ));
        }
        self.zones.delete(zone_id).await?;
        info!(zone_id = %zone_id, deleted_by = %actor.id, "zone deleted");
        Ok(())
    }

    pub async fn get(&self, zone_id: ZoneId) -> Result<Zone, DomainError> {
        self.load(zone_id).await
    }

    pub async fn list_all(&self) -> Result<Vec<Zone>, DomainError> {
        Ok(self.zones.find_all().await?)
    }

    pub async fn zones_by_owner(&self, owner_id: UserId) -> Result<Vec<Zone>, DomainError> {
        Ok(self.zones.find_by_owner(owner_id).await?)
    }

    async fn load(&self, zone_id: ZoneId) -> Result<Zone, DomainError> {
        self.zones
            .find_by_id(zone_id)
            .await?
            .ok_or_else(|| DomainError::zone_not_found(zone_id))
    }
}
