// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Onboarding workflow use cases: submission and administration of
//! restaurant registration requests.
//!
//! The transition guards live in the `Application` entity; this service
//! adds the repository-backed one-open-application-per-owner rule, the
//! admin gate on review decisions, and the events the email notifier
//! reacts to.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::access::{self, Actor};
use crate::domain::application::{Application, ApplicationId, ApplicationStatus};
use crate::domain::error::DomainError;
use crate::domain::events::OnboardingEvent;
use crate::domain::repository::{ApplicationRepository, RestaurantOwnerRepository};
use crate::domain::user::UserId;
use crate::domain::value_objects::Email;
use crate::infrastructure::event_bus::EventBus;

#[derive(Debug, Clone, Deserialize)]
pub struct SubmitApplicationRequest {
    pub proposed_restaurant_name: String,
    pub owner_name: String,
    pub email: String,
    pub schedule: String,
    pub owner_id: UserId,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmittedApplication {
    pub application_id: ApplicationId,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
}

pub struct OnboardingService {
    applications: Arc<dyn ApplicationRepository>,
    owners: Arc<dyn RestaurantOwnerRepository>,
    event_bus: EventBus,
}

impl OnboardingService {
    pub fn new(
        applications: Arc<dyn ApplicationRepository>,
        owners: Arc<dyn RestaurantOwnerRepository>,
        event_bus: EventBus,
    ) -> Self {
        Self { applications, owners, event_bus }
    }

    /// Submit a registration request. One non-terminal application per
    /// owner at a time.
    pub async fn submit(
        &self,
        request: SubmitApplicationRequest,
    ) -> Result<SubmittedApplication, DomainError> {
        self.owners
            .find_by_user(request.owner_id)
            .await?
            .ok_or_else(|| DomainError::owner_not_found(request.owner_id))?;

        if self.applications.has_open_for_owner(request.owner_id).await? {
            return Err(DomainError::duplicate_application());
        }

        let email = Email::new(&request.email)?;
        let application = Application::new(
            request.proposed_restaurant_name,
            request.owner_name,
            email,
            request.schedule,
            request.owner_id,
        )?;
        self.applications.save(&application).await?;

        info!(
            application_id = %application.id,
            owner_id = %application.owner_id,
            "application submitted"
        );
        self.event_bus.publish_onboarding_event(OnboardingEvent::ApplicationSubmitted {
            application_id: application.id,
            owner_id: application.owner_id,
            proposed_restaurant_name: application.proposed_restaurant_name.clone(),
            submitted_at: Utc::now(),
        });

        Ok(SubmittedApplication {
            application_id: application.id,
            status: application.status,
            created_at: application.created_at,
        })
    }

    /// Move a pending application into review. Admin-only.
    pub async fn mark_in_review(
        &self,
        actor: &Actor,
        application_id: ApplicationId,
    ) -> Result<(), DomainError> {
        access::ensure_admin(actor)?;
        let mut application = self.load(application_id).await?;

        application.mark_in_review()?;
        self.applications.update(&application).await?;

        self.event_bus.publish_onboarding_event(OnboardingEvent::ApplicationInReview {
            application_id,
            reviewed_by: actor.id,
            at: Utc::now(),
        });
        Ok(())
    }

    /// Approve a pending or in-review application. Admin-only.
    pub async fn approve(
        &self,
        actor: &Actor,
        application_id: ApplicationId,
    ) -> Result<(), DomainError> {
        access::ensure_admin(actor)?;
        let mut application = self.load(application_id).await?;

        application.approve()?;
        self.applications.update(&application).await?;

        info!(application_id = %application_id, approved_by = %actor.id, "application approved");
        self.event_bus.publish_onboarding_event(OnboardingEvent::ApplicationApproved {
            application_id,
            owner_id: application.owner_id,
            contact_email: application.email.clone(),
            proposed_restaurant_name: application.proposed_restaurant_name.clone(),
            approved_by: actor.id,
            approved_at: Utc::now(),
        });
        Ok(())
    }

    /// Reject a pending or in-review application. Admin-only.
    pub async fn reject(
        &self,
        actor: &Actor,
        application_id: ApplicationId,
        reason: Option<String>,
    ) -> Result<(), DomainError> {
        access::ensure_admin(actor)?;
        let mut application = self.load(application_id).await?;

        application.reject()?;
        self.applications.update(&application).await?;

        info!(application_id = %application_id, rejected_by = %actor.id, "application rejected");
        self.event_bus.publish_onboarding_event(OnboardingEvent::ApplicationRejected {
            application_id,
            owner_id: application.owner_id,
            contact_email: application.email.clone(),
            proposed_restaurant_name: application.proposed_restaurant_name.clone(),
            rejected_by: actor.id,
            reason,
            rejected_at: Utc::now(),
        });
        Ok(())
    }

    pub async fn get(&self, application_id: ApplicationId) -> Result<Application, DomainError> {
        self.load(application_id).await
    }

    pub async fn applications_by_owner(
        &self,
        owner_id: UserId,
    ) -> Result<Vec<Application>, DomainError> {
        Ok(self.applications.find_by_owner(owner_id).await?)
    }

    pub async fn applications_by_status(
        &self,
        actor: &Actor,
        status: ApplicationStatus,
    ) -> Result<Vec<Application>, DomainError> {
        access::ensure_admin(actor)?;
        Ok(self.applications.find_by_status(status).await?)
    }

    pub async fn pending_applications(
        &self,
        actor: &Actor,
    ) -> Result<Vec<Application>, DomainError> {
        self.applications_by_status(actor, ApplicationStatus::Pending).await
    }

    async fn load(&self, application_id: ApplicationId) -> Result<Application, DomainError> {
        self.applications
            .find_by_id(application_id)
            .await?
            .ok_or_else(|| DomainError::application_not_found(application_id))
    }
}
