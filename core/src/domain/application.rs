// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Onboarding Application Domain Model
//!
//! A restaurant owner's registration request, governed by a small state
//! machine:
//!
//! ```text
//! Pending ──▶ InReview ──▶ Approved
//!    │            │
//!    ├────────────┴──────▶ Rejected
//!    └───────────────────▶ Approved
//! ```
//!
//! Approved and Rejected are absorbing. The whole legal-transition table
//! lives inside this entity; calling `approve`/`reject` directly is subject
//! to the same guards the orchestrator relies on, so there is exactly one
//! authority for what is legal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::user::UserId;
use crate::domain::value_objects::Email;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub Uuid);

impl ApplicationId {
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

impl Default for ApplicationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    InReview,
    Approved,
    Rejected,
}

/// Presentation record for a status. One `match` instead of parallel lookup
/// tables, so adding a variant forces every field to be filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusDetails {
    pub label: &'static str,
    pub color: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
}

impl ApplicationStatus {
    pub fn details(&self) -> StatusDetails {
        match self {
            ApplicationStatus::Pending => StatusDetails {
                label: "Pendiente",
                color: "yellow",
                icon: "⏳",
                description: "Tu solicitud está pendiente de revisión",
            },
            ApplicationStatus::InReview => StatusDetails {
                label: "En Revisión",
                color: "blue",
                icon: "🔍",
                description: "Tu solicitud está siendo revisada por un administrador",
            },
            ApplicationStatus::Approved => StatusDetails {
                label: "Aprobado",
                color: "green",
                icon: "✅",
                description: "Tu solicitud ha sido aprobada",
            },
            ApplicationStatus::Rejected => StatusDetails {
                label: "Rechazado",
                color: "red",
                icon: "❌",
                description: "Tu solicitud ha sido rechazada",
            },
        }
    }

    /// Terminal states admit no further transition.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ApplicationStatus::Approved | ApplicationStatus::Rejected)
    }

    /// An owner may edit the request while pending or after a rejection.
    pub fn is_editable(&self) -> bool {
        matches!(self, ApplicationStatus::Pending | ApplicationStatus::Rejected)
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.details().label)
    }
}

/// Onboarding Application Aggregate Root
///
/// # Invariants
/// - Proposed restaurant name and owner name have at least 3 characters
/// - Schedule is non-blank
/// - One non-terminal application per owner (repository-backed check)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    pub id: ApplicationId,
    pub proposed_restaurant_name: String,
    pub owner_name: String,
    pub email: Email,
    pub schedule: String,
    pub status: ApplicationStatus,
    pub owner_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Application {
    /// Create a new application in `Pending`.
    pub fn new(
        proposed_restaurant_name: impl Into<String>,
        owner_name: impl Into<String>,
        email: Email,
        schedule: impl Into<String>,
        owner_id: UserId,
    ) -> Result<Self, DomainError> {
        let proposed_restaurant_name = proposed_restaurant_name.into().trim().to_string();
        if proposed_restaurant_name.len() < 3 {
            return Err(DomainError::validation(
                "El nombre del restaurante debe tener al menos 3 caracteres",
            ));
        }
        let owner_name = owner_name.into().trim().to_string();
        if owner_name.len() < 3 {
            return Err(DomainError::validation(
                "El nombre del propietario debe tener al menos 3 caracteres",
            ));
        }
        let schedule = schedule.into().trim().to_string();
        if schedule.is_empty() {
            return Err(DomainError::validation("El horario es obligatorio"));
        }
        let now = Utc::now();
        Ok(Self {
            id: ApplicationId::new(),
            proposed_restaurant_name,
            owner_name,
            email,
            schedule,
            status: ApplicationStatus::Pending,
            owner_id,
            created_at: now,
            updated_at: now,
        })
    }

    /// `Pending → InReview`. Repeating the call while already in review is
    /// a no-op; from a terminal state it is an error.
    pub fn mark_in_review(&mut self) -> Result<(), DomainError> {
        match self.status {
            ApplicationStatus::Pending => {
                self.status = ApplicationStatus::InReview;
                self.updated_at = Utc::now();
                Ok(())
            }
            ApplicationStatus::InReview => Ok(()),
            ApplicationStatus::Approved | ApplicationStatus::Rejected => {
                Err(DomainError::validation(
                    "Solo se pueden revisar solicitudes pendientes",
                ))
            }
        }
    }

    /// `{Pending, InReview} → Approved`. Re-approving is a conflict;
    /// approving a rejected application is a validation error.
    pub fn approve(&mut self) -> Result<(), DomainError> {
        match self.status {
            ApplicationStatus::Pending | ApplicationStatus::InReview => {
                self.status = ApplicationStatus::Approved;
                self.updated_at = Utc::now();
                Ok(())
            }
            ApplicationStatus::Approved => Err(DomainError::already_approved()),
            ApplicationStatus::Rejected => Err(DomainError::validation(
                "Solo se pueden aprobar solicitudes pendientes o en revisión",
            )),
        }
    }

    /// `{Pending, InReview} → Rejected`. Mirror image of [`Self::approve`].
    pub fn reject(&mut self) -> Result<(), DomainError> {
        match self.status {
            ApplicationStatus::Pending | ApplicationStatus::InReview => {
                self.status = ApplicationStatus::Rejected;
                self.updated_at = Utc::now();
                Ok(())
            }
            ApplicationStatus::Rejected => Err(DomainError::already_rejected()),
            ApplicationStatus::Approved => Err(DomainError::validation(
                "Solo se pueden rechazar solicitudes pendientes o en revisión",
            )),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == ApplicationStatus::Pending
    }

    pub fn is_in_review(&self) -> bool {
        self.status == ApplicationStatus::InReview
    }

    pub fn is_approved(&self) -> bool {
        self.status == ApplicationStatus::Approved
    }

    pub fn is_rejected(&self) -> bool {
        self.status == ApplicationStatus::Rejected
    }

    /// Non-terminal applications count against the one-per-owner rule.
    pub fn is_open(&self) -> bool {
        !self.status.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Application {
        Application::new(
            "La Cocina de Doña Rosa",
            "Rosa Martínez",
            Email::new("rosa@example.com").unwrap(),
            "Lun-Dom 9:00-21:00",
            UserId::new(),
        )
        .unwrap()
    }

    #[test]
    fn new_application_starts_pending() {
        let app = sample();
        assert!(app.is_pending());
        assert!(app.is_open());
    }

    #[test]
    fn validation_rules_on_creation() {
        let email = Email::new("rosa@example.com").unwrap();
        let owner = UserId::new();
        assert!(Application::new("La", "Rosa Martínez", email.clone(), "L-D", owner).is_err());
        assert!(Application::new("La Cocina", "Ro", email.clone(), "L-D", owner).is_err());
        assert!(Application::new("La Cocina", "Rosa Martínez", email, "   ", owner).is_err());
    }

    #[test]
    fn approve_from_pending_and_from_in_review() {
        let mut direct = sample();
        direct.approve().unwrap();
        assert!(direct.is_approved());

        let mut reviewed = sample();
        reviewed.mark_in_review().unwrap();
        assert!(reviewed.is_in_review());
        reviewed.approve().unwrap();
        assert!(reviewed.is_approved());
    }

    #[test]
    fn mark_in_review_repeat_is_noop() {
        let mut app = sample();
        app.mark_in_review().unwrap();
        let updated_at = app.updated_at;
        app.mark_in_review().unwrap();
        assert!(app.is_in_review());
        assert_eq!(app.updated_at, updated_at);
    }

    #[test]
    fn mark_in_review_fails_from_terminal() {
        let mut app = sample();
        app.approve().unwrap();
        assert!(matches!(
            app.mark_in_review(),
            Err(DomainError::Validation { .. })
        ));
    }

    #[test]
    fn approved_is_absorbing() {
        let mut app = sample();
        app.approve().unwrap();

        let again = app.approve().unwrap_err();
        assert_eq!(again.code(), "ALREADY_APPROVED");

        // Crossing to the other terminal is a validation error, not a
        // conflict: the transition was never legal to begin with.
        let cross = app.reject().unwrap_err();
        assert!(matches!(cross, DomainError::Validation { .. }));
        assert!(app.is_approved());
    }

    #[test]
    fn rejected_is_absorbing() {
        let mut app = sample();
        app.mark_in_review().unwrap();
        app.reject().unwrap();

        let again = app.reject().unwrap_err();
        assert_eq!(again.code(), "ALREADY_REJECTED");
        assert!(matches!(app.approve(), Err(DomainError::Validation { .. })));
        assert!(app.is_rejected());
        assert!(!app.is_open());
    }

    #[test]
    fn editability_follows_status() {
        assert!(ApplicationStatus::Pending.is_editable());
        assert!(ApplicationStatus::Rejected.is_editable());
        assert!(!ApplicationStatus::InReview.is_editable());
        assert!(!ApplicationStatus::Approved.is_editable());
    }

    #[test]
    fn status_details_are_exhaustive() {
        assert_eq!(ApplicationStatus::Pending.details().label, "Pendiente");
        assert_eq!(ApplicationStatus::InReview.details().color, "blue");
        assert_eq!(ApplicationStatus::Approved.details().icon, "✅");
        assert_eq!(
            ApplicationStatus::Rejected.details().description,
            "Tu solicitud ha sido rechazada"
        );
    }
}
