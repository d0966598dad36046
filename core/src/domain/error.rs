// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Domain error taxonomy.
//!
//! Every business-rule failure in the core is one of five recoverable
//! classes (`Validation`, `NotFound`, `Conflict`, `Forbidden`,
//! `Unauthorized`) plus `Internal` for unexpected infrastructure failures.
//! Each error carries a stable machine-readable code and a human-readable
//! message; orchestrators propagate them unchanged to the boundary.

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DomainError {
    /// Input violates a business rule (not a schema-level type error).
    #[error("{message}")]
    Validation { message: String },

    /// Referenced aggregate does not exist.
    #[error("{resource} con ID {id} no encontrado")]
    NotFound { resource: String, id: String },

    /// Operation would violate a uniqueness or state invariant.
    #[error("{message}")]
    Conflict { code: &'static str, message: String },

    /// Actor is authenticated but lacks permission.
    #[error("{message}")]
    Forbidden { code: &'static str, message: String },

    /// Credential or identity problem at a login-style check.
    #[error("{message}")]
    Unauthorized { code: &'static str, message: String },

    /// Unexpected failure outside the recoverable taxonomy. Never
    /// downgraded into one of the classes above.
    #[error("{message}")]
    Internal { message: String },
}

impl DomainError {
    /// Stable machine-readable code for boundary mapping.
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::Validation { .. } => "VALIDATION_ERROR",
            DomainError::NotFound { .. } => "NOT_FOUND",
            DomainError::Conflict { code, .. } => code,
            DomainError::Forbidden { code, .. } => code,
            DomainError::Unauthorized { code, .. } => code,
            DomainError::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    pub fn is_recoverable(&self) -> bool {
        !matches!(self, DomainError::Internal { .. })
    }

    // ---- Validation ----

    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation { message: message.into() }
    }

    // ---- NotFound ----

    pub fn not_found(resource: impl Into<String>, id: impl ToString) -> Self {
        DomainError::NotFound {
            resource: resource.into(),
            id: id.to_string(),
        }
    }

    pub fn user_not_found(id: impl ToString) -> Self {
        Self::not_found("Usuario", id)
    }

    pub fn client_not_found(id: impl ToString) -> Self {
        Self::not_found("Cliente", id)
    }

    pub fn owner_not_found(id: impl ToString) -> Self {
        Self::not_found("Restaurantero", id)
    }

    pub fn restaurant_not_found(id: impl ToString) -> Self {
        Self::not_found("Restaurante", id)
    }

    pub fn application_not_found(id: impl ToString) -> Self {
        Self::not_found("Solicitud", id)
    }

    pub fn menu_not_found(id: impl ToString) -> Self {
        Self::not_found("Menú", id)
    }

    /// No active menu for the restaurant, even though the caller passed the
    /// favorite gate.
    pub fn active_menu_not_found(restaurant_id: impl ToString) -> Self {
        Self::not_found("Menú activo del restaurante", restaurant_id)
    }

    pub fn photo_not_found(id: impl ToString) -> Self {
        Self::not_found("Foto", id)
    }

    pub fn document_not_found(id: impl ToString) -> Self {
        Self::not_found("Documento", id)
    }

    pub fn image_not_found(id: impl ToString) -> Self {
        Self::not_found("Imagen", id)
    }

    pub fn zone_not_found(id: impl ToString) -> Self {
        Self::not_found("Zona", id)
    }

    pub fn survey_not_found(id: impl ToString) -> Self {
        Self::not_found("Encuesta", id)
    }

    pub fn download_not_found(id: impl ToString) -> Self {
        Self::not_found("Descarga", id)
    }

    // ---- Conflict ----

    pub fn conflict(code: &'static str, message: impl Into<String>) -> Self {
        DomainError::Conflict { code, message: message.into() }
    }

    pub fn email_already_exists() -> Self {
        Self::conflict("DUPLICATE_EMAIL", "El correo electrónico ya está registrado")
    }

    pub fn duplicate_application() -> Self {
        Self::conflict("DUPLICATE_APPLICATION", "Ya tienes una solicitud pendiente")
    }

    pub fn already_approved() -> Self {
        Self::conflict("ALREADY_APPROVED", "La solicitud ya está aprobada")
    }

    pub fn already_rejected() -> Self {
        Self::conflict("ALREADY_REJECTED", "La solicitud ya está rechazada")
    }

    pub fn restaurant_for_application_exists() -> Self {
        Self::conflict(
            "RESTAURANT_ALREADY_EXISTS",
            "Ya existe un restaurante asociado a esta solicitud",
        )
    }

    pub fn survey_already_submitted() -> Self {
        Self::conflict("DUPLICATE_SURVEY", "Ya has respondido esta encuesta")
    }

    pub fn zone_already_exists(name: &str) -> Self {
        Self::conflict(
            "DUPLICATE_ZONE",
            format!("Ya existe una zona con el nombre \"{name}\""),
        )
    }

    pub fn resource_in_use(message: impl Into<String>) -> Self {
        Self::conflict("RESOURCE_IN_USE", message)
    }

    // ---- Forbidden ----

    pub fn forbidden(code: &'static str, message: impl Into<String>) -> Self {
        DomainError::Forbidden { code, message: message.into() }
    }

    /// "not-your-resource": carries the resource label for messaging.
    pub fn not_your_resource(resource: &str) -> Self {
        Self::forbidden(
            "NOT_OWNER",
            format!("No puedes acceder a este {resource} porque no te pertenece"),
        )
    }

    pub fn insufficient_role(required: &str) -> Self {
        Self::forbidden("INSUFFICIENT_ROLE", format!("Se requiere rol de {required}"))
    }

    pub fn cannot_delete_self() -> Self {
        Self::forbidden("CANNOT_DELETE_SELF", "No puedes eliminar tu propia cuenta")
    }

    pub fn like_required() -> Self {
        Self::forbidden(
            "LIKE_REQUIRED",
            "Debes agregar el restaurante a favoritos antes de descargar el menú",
        )
    }

    pub fn favorite_required_for_photo() -> Self {
        Self::forbidden(
            "FAVORITE_REQUIRED",
            "Solo puedes subir fotos de restaurantes que hayas marcado como favoritos",
        )
    }

    // ---- Unauthorized ----

    pub fn unauthorized(code: &'static str, message: impl Into<String>) -> Self {
        DomainError::Unauthorized { code, message: message.into() }
    }

    pub fn invalid_credentials() -> Self {
        Self::unauthorized("INVALID_CREDENTIALS", "Credenciales inválidas")
    }

    pub fn wrong_user_type(expected: &str) -> Self {
        Self::unauthorized(
            "WRONG_USER_TYPE",
            format!("Este usuario no está registrado como {expected}"),
        )
    }

    pub fn wrong_current_password() -> Self {
        Self::unauthorized("WRONG_CURRENT_PASSWORD", "La contraseña actual es incorrecta")
    }

    // ---- Internal ----

    pub fn internal(message: impl Into<String>) -> Self {
        DomainError::Internal { message: message.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(DomainError::validation("x").code(), "VALIDATION_ERROR");
        assert_eq!(DomainError::restaurant_not_found("y").code(), "NOT_FOUND");
        assert_eq!(DomainError::duplicate_application().code(), "DUPLICATE_APPLICATION");
        assert_eq!(DomainError::like_required().code(), "LIKE_REQUIRED");
        assert_eq!(DomainError::invalid_credentials().code(), "INVALID_CREDENTIALS");
    }

    #[test]
    fn not_found_message_carries_resource_and_id() {
        let err = DomainError::restaurant_not_found("42");
        assert_eq!(err.to_string(), "Restaurante con ID 42 no encontrado");
    }

    #[test]
    fn internal_is_not_recoverable() {
        assert!(!DomainError::internal("boom").is_recoverable());
        assert!(DomainError::cannot_delete_self().is_recoverable());
    }

    #[test]
    fn json_shape_is_tagged_by_kind() {
        let json = serde_json::to_value(DomainError::like_required()).unwrap();
        assert_eq!(json["kind"], "forbidden");
        assert_eq!(json["code"], "LIKE_REQUIRED");

        let json = serde_json::to_value(DomainError::restaurant_not_found("42")).unwrap();
        assert_eq!(json["kind"], "not_found");
        assert_eq!(json["resource"], "Restaurante");
        assert_eq!(json["id"], "42");
    }
}
