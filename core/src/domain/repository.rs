// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Domain Repository Interfaces
//!
//! Persistence contracts for each aggregate root, following the DDD
//! Repository pattern: one repository per aggregate, interface defined in
//! the domain layer, implemented in `crate::infrastructure::repositories`.
//!
//! Contract notes:
//! - identity is assigned by the entity constructor; `save` persists and
//!   enforces the aggregate's uniqueness backstops (email, favorite pair,
//!   one open application per owner, application↔restaurant 1:1), surfacing
//!   violations as [`RepositoryError::Conflict`];
//! - `update`/`delete` of a missing id is an error, never silently ignored;
//! - counter operations (`increment_likes_count`, `decrement_likes_count`,
//!   `increment_download_count`) are atomic at the repository boundary, and
//!   the likes decrement floors at 0.

use async_trait::async_trait;

use crate::domain::application::{Application, ApplicationId, ApplicationStatus};
use crate::domain::download::{Download, DownloadId};
use crate::domain::error::DomainError;
use crate::domain::favorite::{Favorite, FavoriteId};
use crate::domain::media::{
    Document, DocumentId, DocumentType, Image, ImageId, UserPhoto, UserPhotoId,
};
use crate::domain::menu::{Menu, MenuId, MenuStatus};
use crate::domain::restaurant::{Restaurant, RestaurantId};
use crate::domain::survey::{Survey, SurveyId};
use crate::domain::user::{Administrator, Client, RestaurantOwner, User, UserId, UserRole};
use crate::domain::zone::{Zone, ZoneId};

/// Repository errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Constraint violation: {0}")]
    Conflict(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<RepositoryError> for DomainError {
    fn from(err: RepositoryError) -> Self {
        match err {
            // A uniqueness backstop fired under a race the orchestrator's
            // check-then-act missed; still a conflict to the caller.
            RepositoryError::Conflict(message) => DomainError::Conflict {
                code: "CONSTRAINT_VIOLATION",
                message,
            },
            // Update/delete of a missing id after a successful load, or a
            // storage fault: not part of the recoverable taxonomy.
            other => DomainError::internal(other.to_string()),
        }
    }
}

pub type RepoResult<T> = Result<T, RepositoryError>;

/// Repository interface for User aggregates
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn save(&self, user: &User) -> RepoResult<()>;
    async fn update(&self, user: &User) -> RepoResult<()>;
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>>;
    /// Lookup is case-insensitive; the stored email is already lowercased.
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;
    async fn find_by_role(&self, role: UserRole) -> RepoResult<Vec<User>>;
    async fn list_all(&self) -> RepoResult<Vec<User>>;
    async fn delete(&self, id: UserId) -> RepoResult<()>;
    async fn exists_by_email(&self, email: &str) -> RepoResult<bool>;
    async fn count(&self) -> RepoResult<usize>;
    async fn count_by_role(&self, role: UserRole) -> RepoResult<usize>;
}

/// Repository interface for Administrator role sub-records
#[async_trait]
pub trait AdministratorRepository: Send + Sync {
    async fn save(&self, admin: &Administrator) -> RepoResult<()>;
    async fn find_by_user(&self, user_id: UserId) -> RepoResult<Option<Administrator>>;
    async fn list_all(&self) -> RepoResult<Vec<Administrator>>;
    async fn delete(&self, user_id: UserId) -> RepoResult<()>;
}

/// Repository interface for RestaurantOwner role sub-records
#[async_trait]
pub trait RestaurantOwnerRepository: Send + Sync {
    async fn save(&self, owner: &RestaurantOwner) -> RepoResult<()>;
    async fn find_by_user(&self, user_id: UserId) -> RepoResult<Option<RestaurantOwner>>;
    async fn list_all(&self) -> RepoResult<Vec<RestaurantOwner>>;
    async fn delete(&self, user_id: UserId) -> RepoResult<()>;
}

/// Repository interface for Client role sub-records
#[async_trait]
pub trait ClientRepository: Send + Sync {
    async fn save(&self, client: &Client) -> RepoResult<()>;
    async fn update(&self, client: &Client) -> RepoResult<()>;
    async fn find_by_user(&self, user_id: UserId) -> RepoResult<Option<Client>>;
    async fn list_all(&self) -> RepoResult<Vec<Client>>;
    async fn delete(&self, user_id: UserId) -> RepoResult<()>;
}

/// Repository interface for onboarding Application aggregates
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    async fn save(&self, application: &Application) -> RepoResult<()>;
    async fn update(&self, application: &Application) -> RepoResult<()>;
    async fn find_by_id(&self, id: ApplicationId) -> RepoResult<Option<Application>>;
    async fn find_by_owner(&self, owner_id: UserId) -> RepoResult<Vec<Application>>;
    async fn find_by_status(&self, status: ApplicationStatus) -> RepoResult<Vec<Application>>;
    /// One-open-application-per-owner check (Pending or InReview).
    async fn has_open_for_owner(&self, owner_id: UserId) -> RepoResult<bool>;
    async fn count_by_status(&self, status: ApplicationStatus) -> RepoResult<usize>;
    async fn find_recent(&self, limit: usize) -> RepoResult<Vec<Application>>;
    async fn delete(&self, id: ApplicationId) -> RepoResult<()>;
}

/// Repository interface for Restaurant aggregates
#[async_trait]
pub trait RestaurantRepository: Send + Sync {
    async fn save(&self, restaurant: &Restaurant) -> RepoResult<()>;
    async fn update(&self, restaurant: &Restaurant) -> RepoResult<()>;
    async fn find_by_id(&self, id: RestaurantId) -> RepoResult<Option<Restaurant>>;
    async fn find_all(&self) -> RepoResult<Vec<Restaurant>>;
    async fn find_by_owner(&self, owner_id: UserId) -> RepoResult<Vec<Restaurant>>;
    async fn find_by_zone(&self, zone_id: ZoneId) -> RepoResult<Vec<Restaurant>>;
    async fn delete(&self, id: RestaurantId) -> RepoResult<()>;
    /// Atomic counter adjustment; returns the new count.
    async fn increment_likes_count(&self, id: RestaurantId) -> RepoResult<u32>;
    /// Atomic counter adjustment, floored at 0; returns the new count.
    async fn decrement_likes_count(&self, id: RestaurantId) -> RepoResult<u32>;
    async fn exists_by_application(&self, application_id: ApplicationId) -> RepoResult<bool>;
    async fn count(&self) -> RepoResult<usize>;
    async fn find_most_popular(&self, limit: usize) -> RepoResult<Vec<Restaurant>>;
    async fn search_by_name(&self, name: &str) -> RepoResult<Vec<Restaurant>>;
}

/// Repository interface for Favorite join records
#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    async fn save(&self, favorite: &Favorite) -> RepoResult<()>;
    async fn delete(&self, id: FavoriteId) -> RepoResult<()>;
    async fn find_by_client(&self, client_id: UserId) -> RepoResult<Vec<Favorite>>;
    async fn find_by_restaurant(&self, restaurant_id: RestaurantId) -> RepoResult<Vec<Favorite>>;
    async fn find_by_client_and_restaurant(
        &self,
        client_id: UserId,
        restaurant_id: RestaurantId,
    ) -> RepoResult<Option<Favorite>>;
    async fn exists_by_client_and_restaurant(
        &self,
        client_id: UserId,
        restaurant_id: RestaurantId,
    ) -> RepoResult<bool>;
    async fn count_by_restaurant(&self, restaurant_id: RestaurantId) -> RepoResult<usize>;
    async fn count_by_client(&self, client_id: UserId) -> RepoResult<usize>;
    /// Restaurants ranked by favorite count, descending.
    async fn find_most_favorited(&self, limit: usize)
        -> RepoResult<Vec<(RestaurantId, usize)>>;
}

/// Repository interface for Menu aggregates
#[async_trait]
pub trait MenuRepository: Send + Sync {
    async fn save(&self, menu: &Menu) -> RepoResult<()>;
    async fn update(&self, menu: &Menu) -> RepoResult<()>;
    async fn find_by_id(&self, id: MenuId) -> RepoResult<Option<Menu>>;
    async fn find_by_restaurant(&self, restaurant_id: RestaurantId) -> RepoResult<Vec<Menu>>;
    async fn find_by_status(&self, status: MenuStatus) -> RepoResult<Vec<Menu>>;
    /// The menu served by download queries. At most one per restaurant by
    /// query contract.
    async fn find_active_by_restaurant(
        &self,
        restaurant_id: RestaurantId,
    ) -> RepoResult<Option<Menu>>;
    async fn delete(&self, id: MenuId) -> RepoResult<()>;
    /// Atomic download-counter increment; returns the new count.
    async fn increment_download_count(&self, id: MenuId) -> RepoResult<u32>;
    async fn total_downloads_by_restaurant(
        &self,
        restaurant_id: RestaurantId,
    ) -> RepoResult<u32>;
    async fn count_by_status(&self, status: MenuStatus) -> RepoResult<usize>;
}

/// Repository interface for UserPhoto attachments
#[async_trait]
pub trait UserPhotoRepository: Send + Sync {
    async fn save(&self, photo: &UserPhoto) -> RepoResult<()>;
    async fn find_by_id(&self, id: UserPhotoId) -> RepoResult<Option<UserPhoto>>;
    async fn find_by_client(&self, client_id: UserId) -> RepoResult<Vec<UserPhoto>>;
    async fn find_by_restaurant(&self, restaurant_id: RestaurantId) -> RepoResult<Vec<UserPhoto>>;
    async fn count_by_restaurant(&self, restaurant_id: RestaurantId) -> RepoResult<usize>;
    async fn delete(&self, id: UserPhotoId) -> RepoResult<()>;
}

/// Repository interface for Document attachments
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    async fn save(&self, document: &Document) -> RepoResult<()>;
    async fn find_by_id(&self, id: DocumentId) -> RepoResult<Option<Document>>;
    async fn find_by_restaurant(&self, restaurant_id: RestaurantId) -> RepoResult<Vec<Document>>;
    async fn find_by_type(&self, doc_type: DocumentType) -> RepoResult<Vec<Document>>;
    async fn delete(&self, id: DocumentId) -> RepoResult<()>;
}

/// Repository interface for Image attachments
#[async_trait]
pub trait ImageRepository: Send + Sync {
    async fn save(&self, image: &Image) -> RepoResult<()>;
    async fn find_by_id(&self, id: ImageId) -> RepoResult<Option<Image>>;
    async fn find_by_restaurant(&self, restaurant_id: RestaurantId) -> RepoResult<Vec<Image>>;
    async fn find_by_owner(&self, owner_id: UserId) -> RepoResult<Vec<Image>>;
    async fn delete(&self, id: ImageId) -> RepoResult<()>;
}

/// Repository interface for Survey aggregates
#[async_trait]
pub trait SurveyRepository: Send + Sync {
    async fn save(&self, survey: &Survey) -> RepoResult<()>;
    async fn find_by_id(&self, id: SurveyId) -> RepoResult<Option<Survey>>;
    async fn find_by_client(&self, client_id: UserId) -> RepoResult<Vec<Survey>>;
    async fn find_by_restaurant(&self, restaurant_id: RestaurantId) -> RepoResult<Vec<Survey>>;
    async fn exists_by_client_and_restaurant(
        &self,
        client_id: UserId,
        restaurant_id: RestaurantId,
    ) -> RepoResult<bool>;
    async fn count(&self) -> RepoResult<usize>;
    async fn count_completed(&self) -> RepoResult<usize>;
    async fn count_by_restaurant(&self, restaurant_id: RestaurantId) -> RepoResult<usize>;
    async fn find_recent(&self, limit: usize) -> RepoResult<Vec<Survey>>;
    async fn delete(&self, id: SurveyId) -> RepoResult<()>;
}

/// Repository interface for Zone aggregates
#[async_trait]
pub trait ZoneRepository: Send + Sync {
    async fn save(&self, zone: &Zone) -> RepoResult<()>;
    async fn update(&self, zone: &Zone) -> RepoResult<()>;
    async fn find_by_id(&self, id: ZoneId) -> RepoResult<Option<Zone>>;
    async fn find_all(&self) -> RepoResult<Vec<Zone>>;
    async fn find_by_owner(&self, owner_id: UserId) -> RepoResult<Vec<Zone>>;
    async fn find_by_name(&self, name: &str) -> RepoResult<Option<Zone>>;
    async fn exists_by_name(&self, name: &str) -> RepoResult<bool>;
    async fn delete(&self, id: ZoneId) -> RepoResult<()>;
    async fn count(&self) -> RepoResult<usize>;
}

/// Repository interface for Download tracking records
#[async_trait]
pub trait DownloadRepository: Send + Sync {
    async fn save(&self, download: &Download) -> RepoResult<()>;
    async fn update(&self, download: &Download) -> RepoResult<()>;
    async fn find_by_id(&self, id: DownloadId) -> RepoResult<Option<Download>>;
    async fn find_by_owner(&self, owner_id: UserId) -> RepoResult<Vec<Download>>;
    async fn list_all(&self) -> RepoResult<Vec<Download>>;
    async fn delete(&self, id: DownloadId) -> RepoResult<()>;
}
