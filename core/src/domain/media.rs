// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Attachment entities: visit photos, onboarding documents, and restaurant
//! images. All three share the same shape (owner, restaurant, file
//! location, upload timestamp) but differ in the prerequisite that gates
//! their creation: a photo requires an existing favorite from the client,
//! documents and images require restaurant ownership (or admin).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::application::ApplicationId;
use crate::domain::restaurant::RestaurantId;
use crate::domain::user::UserId;
use crate::domain::value_objects::FileUrl;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserPhotoId(pub Uuid);

impl UserPhotoId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for UserPhotoId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for UserPhotoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Visit-evidence photo uploaded by a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPhoto {
    pub id: UserPhotoId,
    pub photo_url: FileUrl,
    pub client_id: UserId,
    pub restaurant_id: RestaurantId,
    pub uploaded_at: DateTime<Utc>,
}

impl UserPhoto {
    pub fn new(photo_url: FileUrl, client_id: UserId, restaurant_id: RestaurantId) -> Self {
        Self {
            id: UserPhotoId::new(),
            photo_url,
            client_id,
            restaurant_id,
            uploaded_at: Utc::now(),
        }
    }
}

/// Kinds of paperwork a restaurant owner uploads during onboarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    ProofOfAddress,
    RestaurantMenu,
    OperatingLicense,
    HealthPermit,
    FoodHandlingCertificate,
    TaxId,
    Other,
}

impl DocumentType {
    pub fn label(&self) -> &'static str {
        match self {
            DocumentType::ProofOfAddress => "Comprobante de Domicilio",
            DocumentType::RestaurantMenu => "Menú del Restaurante",
            DocumentType::OperatingLicense => "Licencia de Funcionamiento",
            DocumentType::HealthPermit => "Permiso de Sanidad",
            DocumentType::FoodHandlingCertificate => "Certificado de Manipulación de Alimentos",
            DocumentType::TaxId => "RFC",
            DocumentType::Other => "Otro",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            DocumentType::ProofOfAddress => "Documento que acredita el domicilio del restaurante",
            DocumentType::RestaurantMenu => "Menú oficial del restaurante",
            DocumentType::OperatingLicense => "Licencia oficial para operar el negocio",
            DocumentType::HealthPermit => "Permiso de sanidad e higiene",
            DocumentType::FoodHandlingCertificate => {
                "Certificado de manipulación higiénica de alimentos"
            }
            DocumentType::TaxId => "Registro Federal de Contribuyentes",
            DocumentType::Other => "Otro tipo de documento",
        }
    }

    /// Documents required to complete an onboarding file.
    pub fn required() -> [DocumentType; 3] {
        [
            DocumentType::ProofOfAddress,
            DocumentType::OperatingLicense,
            DocumentType::HealthPermit,
        ]
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentId(pub Uuid);

impl DocumentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub doc_type: DocumentType,
    pub file_url: FileUrl,
    pub restaurant_id: RestaurantId,
    pub application_id: ApplicationId,
    pub owner_id: UserId,
    pub uploaded_at: DateTime<Utc>,
}

impl Document {
    pub fn new(
        doc_type: DocumentType,
        file_url: FileUrl,
        restaurant_id: RestaurantId,
        application_id: ApplicationId,
        owner_id: UserId,
    ) -> Self {
        Self {
            id: DocumentId::new(),
            doc_type,
            file_url,
            restaurant_id,
            application_id,
            owner_id,
            uploaded_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageId(pub Uuid);

impl ImageId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for ImageId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ImageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Promotional image uploaded by the restaurant owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub id: ImageId,
    pub image_url: FileUrl,
    pub restaurant_id: RestaurantId,
    pub application_id: ApplicationId,
    pub owner_id: UserId,
    pub uploaded_at: DateTime<Utc>,
}

impl Image {
    pub fn new(
        image_url: FileUrl,
        restaurant_id: RestaurantId,
        application_id: ApplicationId,
        owner_id: UserId,
    ) -> Self {
        Self {
            id: ImageId::new(),
            image_url,
            restaurant_id,
            application_id,
            owner_id,
            uploaded_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_type_labels_cover_all_variants() {
        assert_eq!(DocumentType::TaxId.label(), "RFC");
        assert_eq!(
            DocumentType::HealthPermit.description(),
            "Permiso de sanidad e higiene"
        );
        assert_eq!(DocumentType::required().len(), 3);
    }
}
