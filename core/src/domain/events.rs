// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Domain events emitted by the use-case orchestrators.
//!
//! State transitions never perform side effects like sending email; they
//! publish one of these events and the surrounding layer (here, the
//! `infrastructure::notifier` subscriber) reacts to it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::application::ApplicationId;
use crate::domain::menu::MenuId;
use crate::domain::restaurant::RestaurantId;
use crate::domain::user::{UserId, UserRole};
use crate::domain::value_objects::Email;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AccountEvent {
    UserRegistered {
        user_id: UserId,
        name: String,
        email: Email,
        role: UserRole,
        registered_at: DateTime<Utc>,
    },
    UserDeleted {
        user_id: UserId,
        deleted_by: UserId,
        deleted_at: DateTime<Utc>,
    },
    UserPromoted {
        user_id: UserId,
        new_role: UserRole,
        promoted_at: DateTime<Utc>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OnboardingEvent {
    ApplicationSubmitted {
        application_id: ApplicationId,
        owner_id: UserId,
        proposed_restaurant_name: String,
        submitted_at: DateTime<Utc>,
    },
    ApplicationInReview {
        application_id: ApplicationId,
        reviewed_by: UserId,
        at: DateTime<Utc>,
    },
    ApplicationApproved {
        application_id: ApplicationId,
        owner_id: UserId,
        contact_email: Email,
        proposed_restaurant_name: String,
        approved_by: UserId,
        approved_at: DateTime<Utc>,
    },
    ApplicationRejected {
        application_id: ApplicationId,
        owner_id: UserId,
        contact_email: Email,
        proposed_restaurant_name: String,
        rejected_by: UserId,
        reason: Option<String>,
        rejected_at: DateTime<Utc>,
    },
    RestaurantCreated {
        restaurant_id: RestaurantId,
        application_id: ApplicationId,
        owner_id: UserId,
        created_at: DateTime<Utc>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EngagementEvent {
    FavoriteAdded {
        client_id: UserId,
        restaurant_id: RestaurantId,
        likes_count: u32,
        at: DateTime<Utc>,
    },
    FavoriteRemoved {
        client_id: UserId,
        restaurant_id: RestaurantId,
        likes_count: u32,
        at: DateTime<Utc>,
    },
    MenuDownloaded {
        client_id: UserId,
        restaurant_id: RestaurantId,
        menu_id: MenuId,
        at: DateTime<Utc>,
    },
    PhotoUploaded {
        client_id: UserId,
        restaurant_id: RestaurantId,
        at: DateTime<Utc>,
    },
}
