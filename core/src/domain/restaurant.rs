// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Restaurant Domain Model
//!
//! The core resource of the platform. A restaurant is created exclusively
//! from an approved onboarding application (1:1) and is owned by the
//! restaurant owner who submitted it.
//!
//! `likes_count` is a denormalized cache of the favorite records pointing at
//! this restaurant. It changes only through the favorite-toggle path; every
//! other orchestrator treats it as read-only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::application::ApplicationId;
use crate::domain::error::DomainError;
use crate::domain::user::UserId;
use crate::domain::value_objects::{Phone, Url};
use crate::domain::zone::ZoneId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RestaurantId(pub Uuid);

impl RestaurantId {
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

impl Default for RestaurantId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RestaurantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Restaurant Aggregate Root
///
/// # Invariants
/// - Name ≥ 3 characters, address ≥ 5 characters, schedule non-blank
/// - `owner_id` and `application_id` are set at creation and never reassigned
/// - `likes_count` equals the number of favorite records referencing this
///   restaurant (maintained by the engagement ledger, floored at 0)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: RestaurantId,
    pub name: String,
    pub schedule: String,
    pub phone: Phone,
    pub tags: Vec<String>,
    pub address: String,
    pub facebook: Option<Url>,
    pub instagram: Option<Url>,
    pub zone_id: Option<ZoneId>,
    pub owner_id: UserId,
    pub application_id: ApplicationId,
    pub likes_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Optional field set for profile updates; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RestaurantUpdate {
    pub name: Option<String>,
    pub schedule: Option<String>,
    pub phone: Option<Phone>,
    pub tags: Option<Vec<String>>,
    pub address: Option<String>,
    pub facebook: Option<Url>,
    pub instagram: Option<Url>,
    pub zone_id: Option<ZoneId>,
}

impl Restaurant {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        schedule: impl Into<String>,
        phone: Phone,
        tags: Vec<String>,
        address: impl Into<String>,
        facebook: Option<Url>,
        instagram: Option<Url>,
        zone_id: Option<ZoneId>,
        owner_id: UserId,
        application_id: ApplicationId,
    ) -> Result<Self, DomainError> {
        let name = name.into().trim().to_string();
        if name.len() < 3 {
            return Err(DomainError::validation(
                "El nombre del restaurante debe tener al menos 3 caracteres",
            ));
        }
        let schedule = schedule.into().trim().to_string();
        if schedule.is_empty() {
            return Err(DomainError::validation("El horario es obligatorio"));
        }
        let address = address.into().trim().to_string();
        if address.len() < 5 {
            return Err(DomainError::validation(
                "La dirección debe tener al menos 5 caracteres",
            ));
        }
        let now = Utc::now();
        Ok(Self {
            id: RestaurantId::new(),
            name,
            schedule,
            phone,
            tags,
            address,
            facebook,
            instagram,
            zone_id,
            owner_id,
            application_id,
            likes_count: 0,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn increment_likes(&mut self) -> u32 {
        self.likes_count += 1;
        self.likes_count
    }

    /// Floors at 0: a decrement on an already-zero counter is a no-op.
    pub fn decrement_likes(&mut self) -> u32 {
        self.likes_count = self.likes_count.saturating_sub(1);
        self.likes_count
    }

    pub fn update_info(&mut self, update: RestaurantUpdate) -> Result<(), DomainError> {
        if let Some(name) = update.name {
            let name = name.trim().to_string();
            if name.len() < 3 {
                return Err(DomainError::validation(
                    "El nombre debe tener al menos 3 caracteres",
                ));
            }
            self.name = name;
        }
        if let Some(schedule) = update.schedule {
            self.schedule = schedule.trim().to_string();
        }
        if let Some(phone) = update.phone {
            self.phone = phone;
        }
        if let Some(tags) = update.tags {
            self.tags = tags;
        }
        if let Some(address) = update.address {
            self.address = address.trim().to_string();
        }
        if let Some(facebook) = update.facebook {
            self.facebook = Some(facebook);
        }
        if let Some(instagram) = update.instagram {
            self.instagram = Some(instagram);
        }
        if let Some(zone_id) = update.zone_id {
            self.zone_id = Some(zone_id);
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn add_tag(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
            self.updated_at = Utc::now();
        }
    }

    pub fn remove_tag(&mut self, tag: &str) {
        self.tags.retain(|t| t != tag);
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Restaurant {
        Restaurant::new(
            "Taquería El Paso",
            "Lun-Sab 12:00-22:00",
            Phone::new("5512345678").unwrap(),
            vec!["tacos".into(), "mexicana".into()],
            "Av. Juárez 123, Centro",
            None,
            None,
            None,
            UserId::new(),
            ApplicationId::new(),
        )
        .unwrap()
    }

    #[test]
    fn creation_validates_fields() {
        let phone = Phone::new("5512345678").unwrap();
        let owner = UserId::new();
        let app = ApplicationId::new();
        assert!(Restaurant::new("El", "L-D", phone.clone(), vec![], "Calle 1 #5", None, None, None, owner, app).is_err());
        assert!(Restaurant::new("El Paso", "  ", phone.clone(), vec![], "Calle 1 #5", None, None, None, owner, app).is_err());
        assert!(Restaurant::new("El Paso", "L-D", phone, vec![], "C1", None, None, None, owner, app).is_err());
    }

    #[test]
    fn likes_counter_floors_at_zero() {
        let mut restaurant = sample();
        assert_eq!(restaurant.likes_count, 0);
        assert_eq!(restaurant.decrement_likes(), 0);
        assert_eq!(restaurant.increment_likes(), 1);
        assert_eq!(restaurant.increment_likes(), 2);
        assert_eq!(restaurant.decrement_likes(), 1);
        assert_eq!(restaurant.decrement_likes(), 0);
        assert_eq!(restaurant.decrement_likes(), 0);
    }

    #[test]
    fn update_info_touches_only_given_fields() {
        let mut restaurant = sample();
        let original_schedule = restaurant.schedule.clone();
        restaurant
            .update_info(RestaurantUpdate {
                name: Some("Taquería El Paso Norte".into()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(restaurant.name, "Taquería El Paso Norte");
        assert_eq!(restaurant.schedule, original_schedule);

        let err = restaurant
            .update_info(RestaurantUpdate { name: Some("El".into()), ..Default::default() })
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));
    }

    #[test]
    fn tags_are_deduplicated() {
        let mut restaurant = sample();
        restaurant.add_tag("tacos");
        assert_eq!(restaurant.tags.len(), 2);
        restaurant.add_tag("mariscos");
        assert_eq!(restaurant.tags.len(), 3);
        restaurant.remove_tag("tacos");
        assert!(!restaurant.tags.iter().any(|t| t == "tacos"));
    }
}
