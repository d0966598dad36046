// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Attachment use cases: visit photos, onboarding documents, and
//! restaurant images.
//!
//! Each upload checks its prerequisite before touching storage: photos
//! require an existing favorite from the client, documents and images
//! require restaurant ownership or admin. Deletions remove the stored file
//! first (non-fatal on failure), then the record.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::application::ports::FileStorage;
use crate::domain::access::{self, Actor, Resource};
use crate::domain::application::ApplicationId;
use crate::domain::error::DomainError;
use crate::domain::events::EngagementEvent;
use crate::domain::media::{
    Document, DocumentId, DocumentType, Image, ImageId, UserPhoto, UserPhotoId,
};
use crate::domain::repository::{
    DocumentRepository, FavoriteRepository, ImageRepository, RestaurantRepository,
    UserPhotoRepository,
};
use crate::domain::restaurant::{Restaurant, RestaurantId};
use crate::domain::user::UserId;
use crate::domain::value_objects::FileUrl;
use crate::infrastructure::event_bus::EventBus;

/// Upload input for owner-side attachments (documents and images).
#[derive(Debug, Clone)]
pub struct UploadAttachmentRequest {
    pub restaurant_id: RestaurantId,
    pub application_id: ApplicationId,
    pub owner_id: UserId,
    pub bytes: Vec<u8>,
    pub filename: String,
}

#[derive(Debug, Clone)]
pub struct UploadDocumentRequest {
    pub doc_type: DocumentType,
    pub attachment: UploadAttachmentRequest,
}

pub struct MediaService {
    photos: Arc<dyn UserPhotoRepository>,
    documents: Arc<dyn DocumentRepository>,
    images: Arc<dyn ImageRepository>,
    favorites: Arc<dyn FavoriteRepository>,
    restaurants: Arc<dyn RestaurantRepository>,
    storage: Arc<dyn FileStorage>,
    event_bus: EventBus,
}

impl MediaService {
    pub fn new(
        photos: Arc<dyn UserPhotoRepository>,
        documents: Arc<dyn DocumentRepository>,
        images: Arc<dyn ImageRepository>,
        favorites: Arc<dyn FavoriteRepository>,
        restaurants: Arc<dyn RestaurantRepository>,
        storage: Arc<dyn FileStorage>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            photos,
            documents,
            images,
            favorites,
            restaurants,
            storage,
            event_bus,
        }
    }

    // ---- Visit photos (client side) ----

    /// Upload a visit photo. The client must have the restaurant in their
    /// favorites.
    pub async fn upload_user_photo(
        &self,
        client_id: UserId,
        restaurant_id: RestaurantId,
        bytes: &[u8],
        filename: &str,
    ) -> Result<UserPhoto, DomainError> {
        self.load_restaurant(restaurant_id).await?;

        let has_favorite = self
            .favorites
            .exists_by_client_and_restaurant(client_id, restaurant_id)
            .await?;
        if !has_favorite {
            return Err(DomainError::favorite_required_for_photo());
        }

        let photo_url = self.storage.upload(bytes, "user-photos", filename).await?;
        let photo = UserPhoto::new(photo_url, client_id, restaurant_id);
        self.photos.save(&photo).await?;

        info!(photo_id = %photo.id, client_id = %client_id, "user photo uploaded");
        self.event_bus.publish_engagement_event(EngagementEvent::PhotoUploaded {
            client_id,
            restaurant_id,
            at: Utc::now(),
        });
        Ok(photo)
    }

    /// Delete a visit photo: the uploading client or an admin.
    pub async fn delete_user_photo(
        &self,
        actor: &Actor,
        photo_id: UserPhotoId,
    ) -> Result<(), DomainError> {
        let photo = self
            .photos
            .find_by_id(photo_id)
            .await?
            .ok_or_else(|| DomainError::photo_not_found(photo_id))?;
        access::ensure_owner_or_admin(actor, photo.client_id, Resource::Photo)?;

        self.delete_file_best_effort(&photo.photo_url).await;
        self.photos.delete(photo_id).await?;
        info!(photo_id = %photo_id, deleted_by = %actor.id, "user photo deleted");
        Ok(())
    }

    pub async fn photos_by_client(
        &self,
        client_id: UserId,
    ) -> Result<Vec<UserPhoto>, DomainError> {
        Ok(self.photos.find_by_client(client_id).await?)
    }

    pub async fn photos_by_restaurant(
        &self,
        restaurant_id: RestaurantId,
    ) -> Result<Vec<UserPhoto>, DomainError> {
        Ok(self.photos.find_by_restaurant(restaurant_id).await?)
    }

    // ---- Documents (owner side) ----

    pub async fn upload_document(
        &self,
        actor: &Actor,
        request: UploadDocumentRequest,
    ) -> Result<Document, DomainError> {
        let attachment = request.attachment;
        let restaurant = self.load_restaurant(attachment.restaurant_id).await?;
        access::ensure_owner_or_admin(actor, restaurant.owner_id, Resource::Restaurant)?;

        let file_url = self
            .storage
            .upload(&attachment.bytes, "documents", &attachment.filename)
            .await?;
        let document = Document::new(
            request.doc_type,
            file_url,
            attachment.restaurant_id,
            attachment.application_id,
            attachment.owner_id,
        );
        self.documents.save(&document).await?;
        info!(document_id = %document.id, doc_type = %document.doc_type, "document uploaded");
        Ok(document)
    }

    pub async fn delete_document(
        &self,
        actor: &Actor,
        document_id: DocumentId,
    ) -> Result<(), DomainError> {
        let document = self
            .documents
            .find_by_id(document_id)
            .await?
            .ok_or_else(|| DomainError::document_not_found(document_id))?;
        let restaurant = self.load_restaurant(document.restaurant_id).await?;
        access::ensure_owner_or_admin(actor, restaurant.owner_id, Resource::Document)?;

        self.delete_file_best_effort(&document.file_url).await;
        self.documents.delete(document_id).await?;
        info!(document_id = %document_id, deleted_by = %actor.id, "document deleted");
        Ok(())
    }

    pub async fn documents_by_restaurant(
        &self,
        restaurant_id: RestaurantId,
    ) -> Result<Vec<Document>, DomainError> {
        Ok(self.documents.find_by_restaurant(restaurant_id).await?)
    }

    pub async fn documents_by_type(
        &self,
        doc_type: DocumentType,
    ) -> Result<Vec<Document>, DomainError> {
        Ok(self.documents.find_by_type(doc_type).await?)
    }

    // ---- Restaurant images (owner side) ----

    pub async fn upload_image(
        &self,
        actor: &Actor,
        request: UploadAttachmentRequest,
    ) -> Result<Image, DomainError> {
        let restaurant = self.load_restaurant(request.restaurant_id).await?;
        access::ensure_owner_or_admin(actor, restaurant.owner_id, Resource::Restaurant)?;

        let image_url = self
            .storage
            .upload(&request.bytes, "restaurant-images", &request.filename)
            .await?;
        let image = Image::new(
            image_url,
            request.restaurant_id,
            request.application_id,
            request.owner_id,
        );
        self.images.save(&image).await?;
        info!(image_id = %image.id, restaurant_id = %image.restaurant_id, "image uploaded");
        Ok(image)
    }

    pub async fn delete_image(&self, actor: &Actor, image_id: ImageId) -> Result<(), DomainError> {
        let image = self
            .images
            .find_by_id(image_id)
            .await?
            .ok_or_else(|| DomainError::image_not_found(image_id))?;
        let restaurant = self.load_restaurant(image.restaurant_id).await?;
        access::ensure_owner_or_admin(actor, restaurant.owner_id, Resource::Image)?;

        self.delete_file_best_effort(&image.image_url).await;
        self.images.delete(image_id).await?;
        info!(image_id = %image_id, deleted_by = %actor.id, "image deleted");
        Ok(())
    }

    pub async fn images_by_restaurant(
        &self,
        restaurant_id: RestaurantId,
    ) -> Result<Vec<Image>, DomainError> {
        Ok(self.images.find_by_restaurant(restaurant_id).await?)
    }

    pub async fn images_by_owner(&self, owner_id: UserId) -> Result<Vec<Image>, DomainError> {
        Ok(self.images.find_by_owner(owner_id).await?)
    }

    // ---- helpers ----

    async fn load_restaurant(
        &self,
        restaurant_id: RestaurantId,
    ) -> Result<Restaurant, DomainError> {
        self.restaurants
            .find_by_id(restaurant_id)
            .await?
            .ok_or_else(|| DomainError::restaurant_not_found(restaurant_id))
    }

    /// File cleanup is non-fatal: the database record is the source of
    /// truth for whether the resource exists.
    async fn delete_file_best_effort(&self, url: &FileUrl) {
        if let Err(err) = self.storage.delete(url).await {
            warn!(url = %url, %err, "failed to delete stored file");
        }
    }
}
