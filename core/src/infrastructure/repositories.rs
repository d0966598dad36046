// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! In-memory repository implementations.
//!
//! Development and testing backends for the domain repository contracts.
//! Each repository guards its map with a single `parking_lot` lock, which
//! provides the per-aggregate atomicity the contracts require: counter
//! adjustments and uniqueness backstops (email, favorite pair, one open
//! application per owner, application↔restaurant 1:1) execute under the
//! same lock that serves reads.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domain::application::{Application, ApplicationId, ApplicationStatus};
use crate::domain::download::{Download, DownloadId};
use crate::domain::favorite::{Favorite, FavoriteId};
use crate::domain::media::{
    Document, DocumentId, DocumentType, Image, ImageId, UserPhoto, UserPhotoId,
};
use crate::domain::menu::{Menu, MenuId, MenuStatus};
use crate::domain::repository::*;
use crate::domain::restaurant::{Restaurant, RestaurantId};
use crate::domain::survey::{Survey, SurveyId};
use crate::domain::user::{Administrator, Client, RestaurantOwner, User, UserId, UserRole};
use crate::domain::zone::{Zone, ZoneId};

#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn save(&self, user: &User) -> RepoResult<()> {
        let mut users = self.users.write();
        if users
            .values()
            .any(|u| u.email == user.email && u.id != user.id)
        {
            return Err(RepositoryError::Conflict(format!(
                "email already registered: {}",
                user.email
            )));
        }
        users.insert(user.id, user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> RepoResult<()> {
        let mut users = self.users.write();
        if !users.contains_key(&user.id) {
            return Err(RepositoryError::NotFound(format!("user {}", user.id)));
        }
        users.insert(user.id, user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        Ok(self.users.read().get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let needle = email.to_lowercase();
        Ok(self
            .users
            .read()
            .values()
            .find(|u| u.email.as_str() == needle)
            .cloned())
    }

    async fn find_by_role(&self, role: UserRole) -> RepoResult<Vec<User>> {
        Ok(self
            .users
            .read()
            .values()
            .filter(|u| u.role == role)
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> RepoResult<Vec<User>> {
        Ok(self.users.read().values().cloned().collect())
    }

    async fn delete(&self, id: UserId) -> RepoResult<()> {
        if self.users.write().remove(&id).is_none() {
            return Err(RepositoryError::NotFound(format!("user {id}")));
        }
        Ok(())
    }

    async fn exists_by_email(&self, email: &str) -> RepoResult<bool> {
        let needle = email.to_lowercase();
        Ok(self.users.read().values().any(|u| u.email.as_str() == needle))
    }

    async fn count(&self) -> RepoResult<usize> {
        Ok(self.users.read().len())
    }

    async fn count_by_role(&self, role: UserRole) -> RepoResult<usize> {
        Ok(self.users.read().values().filter(|u| u.role == role).count())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryAdministratorRepository {
    records: Arc<RwLock<HashMap<UserId, Administrator>>>,
}

impl InMemoryAdministratorRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AdministratorRepository for InMemoryAdministratorRepository {
    async fn save(&self, admin: &Administrator) -> RepoResult<()> {
        self.records.write().insert(admin.user_id, admin.clone());
        Ok(())
    }

    async fn find_by_user(&self, user_id: UserId) -> RepoResult<Option<Administrator>> {
        Ok(self.records.read().get(&user_id).cloned())
    }

    async fn list_all(&self) -> RepoResult<Vec<Administrator>> {
        Ok(self.records.read().values().cloned().collect())
    }

    async fn delete(&self, user_id: UserId) -> RepoResult<()> {
        if self.records.write().remove(&user_id).is_none() {
            return Err(RepositoryError::NotFound(format!("administrator {user_id}")));
        }
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryRestaurantOwnerRepository {
    records: Arc<RwLock<HashMap<UserId, RestaurantOwner>>>,
}

impl InMemoryRestaurantOwnerRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RestaurantOwnerRepository for InMemoryRestaurantOwnerRepository {
    async fn save(&self, owner: &RestaurantOwner) -> RepoResult<()> {
        self.records.write().insert(owner.user_id, owner.clone());
        Ok(())
    }

    async fn find_by_user(&self, user_id: UserId) -> RepoResult<Option<RestaurantOwner>> {
        Ok(self.records.read().get(&user_id).cloned())
    }

    async fn list_all(&self) -> RepoResult<Vec<RestaurantOwner>> {
        Ok(self.records.read().values().cloned().collect())
    }

    async fn delete(&self, user_id: UserId) -> RepoResult<()> {
        if self.records.write().remove(&user_id).is_none() {
            return Err(RepositoryError::NotFound(format!(
                "restaurant owner {user_id}"
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryClientRepository {
    records: Arc<RwLock<HashMap<UserId, Client>>>,
}

impl InMemoryClientRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ClientRepository for InMemoryClientRepository {
    async fn save(&self, client: &Client) -> RepoResult<()> {
        self.records.write().insert(client.user_id, client.clone());
        Ok(())
    }

    async fn update(&self, client: &Client) -> RepoResult<()> {
        let mut records = self.records.write();
        if !records.contains_key(&client.user_id) {
            return Err(RepositoryError::NotFound(format!("client {}", client.user_id)));
        }
        records.insert(client.user_id, client.clone());
        Ok(())
    }

    async fn find_by_user(&self, user_id: UserId) -> RepoResult<Option<Client>> {
        Ok(self.records.read().get(&user_id).cloned())
    }

    async fn list_all(&self) -> RepoResult<Vec<Client>> {
        Ok(self.records.read().values().cloned().collect())
    }

    async fn delete(&self, user_id: UserId) -> RepoResult<()> {
        if self.records.write().remove(&user_id).is_none() {
            return Err(RepositoryError::NotFound(format!("client {user_id}")));
        }
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryApplicationRepository {
    applications: Arc<RwLock<HashMap<ApplicationId, Application>>>,
}

impl InMemoryApplicationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ApplicationRepository for InMemoryApplicationRepository {
    async fn save(&self, application: &Application) -> RepoResult<()> {
        let mut applications = self.applications.write();
        // Backstop for the one-open-application-per-owner invariant under
        // concurrent submissions.
        if application.is_open()
            && applications
                .values()
                .any(|a| a.owner_id == application.owner_id && a.is_open() && a.id != application.id)
        {
            return Err(RepositoryError::Conflict(format!(
                "owner {} already has an open application",
                application.owner_id
            )));
        }
        applications.insert(application.id, application.clone());
        Ok(())
    }

    async fn update(&self, application: &Application) -> RepoResult<()> {
        let mut applications = self.applications.write();
        if !applications.contains_key(&application.id) {
            return Err(RepositoryError::NotFound(format!(
                "application {}",
                application.id
            )));
        }
        applications.insert(application.id, application.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: ApplicationId) -> RepoResult<Option<Application>> {
        Ok(self.applications.read().get(&id).cloned())
    }

    async fn find_by_owner(&self, owner_id: UserId) -> RepoResult<Vec<Application>> {
        Ok(self
            .applications
            .read()
            .values()
            .filter(|a| a.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn find_by_status(&self, status: ApplicationStatus) -> RepoResult<Vec<Application>> {
        Ok(self
            .applications
            .read()
            .values()
            .filter(|a| a.status == status)
            .cloned()
            .collect())
    }

    async fn has_open_for_owner(&self, owner_id: UserId) -> RepoResult<bool> {
        Ok(self
            .applications
            .read()
            .values()
            .any(|a| a.owner_id == owner_id && a.is_open()))
    }

    async fn count_by_status(&self, status: ApplicationStatus) -> RepoResult<usize> {
        Ok(self
            .applications
            .read()
            .values()
            .filter(|a| a.status == status)
            .count())
    }

    async fn find_recent(&self, limit: usize) -> RepoResult<Vec<Application>> {
        let mut applications: Vec<Application> =
            self.applications.read().values().cloned().collect();
        applications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        applications.truncate(limit);
        Ok(applications)
    }

    async fn delete(&self, id: ApplicationId) -> RepoResult<()> {
        if self.applications.write().remove(&id).is_none() {
            return Err(RepositoryError::NotFound(format!("application {id}")));
        }
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryRestaurantRepository {
    restaurants: Arc<RwLock<HashMap<RestaurantId, Restaurant>>>,
}

impl InMemoryRestaurantRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RestaurantRepository for InMemoryRestaurantRepository {
    async fn save(&self, restaurant: &Restaurant) -> RepoResult<()> {
        let mut restaurants = self.restaurants.write();
        // One restaurant per application.
        if restaurants
            .values()
            .any(|r| r.application_id == restaurant.application_id && r.id != restaurant.id)
        {
            return Err(RepositoryError::Conflict(format!(
                "application {} already has a restaurant",
                restaurant.application_id
            )));
        }
        restaurants.insert(restaurant.id, restaurant.clone());
        Ok(())
    }

    async fn update(&self, restaurant: &Restaurant) -> RepoResult<()> {
        let mut restaurants = self.restaurants.write();
        if !restaurants.contains_key(&restaurant.id) {
            return Err(RepositoryError::NotFound(format!(
                "restaurant {}",
                restaurant.id
            )));
        }
        restaurants.insert(restaurant.id, restaurant.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: RestaurantId) -> RepoResult<Option<Restaurant>> {
        Ok(self.restaurants.read().get(&id).cloned())
    }

    async fn find_all(&self) -> RepoResult<Vec<Restaurant>> {
        Ok(self.restaurants.read().values().cloned().collect())
    }

    async fn find_by_owner(&self, owner_id: UserId) -> RepoResult<Vec<Restaurant>> {
        Ok(self
            .restaurants
            .read()
            .values()
            .filter(|r| r.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn find_by_zone(&self, zone_id: ZoneId) -> RepoResult<Vec<Restaurant>> {
        Ok(self
            .restaurants
            .read()
            .values()
            .filter(|r| r.zone_id == Some(zone_id))
            .cloned()
            .collect())
    }

    async fn delete(&self, id: RestaurantId) -> RepoResult<()> {
        if self.restaurants.write().remove(&id).is_none() {
            return Err(RepositoryError::NotFound(format!("restaurant {id}")));
        }
        Ok(())
    }

    async fn increment_likes_count(&self, id: RestaurantId) -> RepoResult<u32> {
        let mut restaurants = self.restaurants.write();
        let restaurant = restaurants
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::NotFound(format!("restaurant {id}")))?;
        Ok(restaurant.increment_likes())
    }

    async fn decrement_likes_count(&self, id: RestaurantId) -> RepoResult<u32> {
        let mut restaurants = self.restaurants.write();
        let restaurant = restaurants
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::NotFound(format!("restaurant {id}")))?;
        Ok(restaurant.decrement_likes())
    }

    async fn exists_by_application(&self, application_id: ApplicationId) -> RepoResult<bool> {
        Ok(self
            .restaurants
            .read()
            .values()
            .any(|r| r.application_id == application_id))
    }

    async fn count(&self) -> RepoResult<usize> {
        Ok(self.restaurants.read().len())
    }

    async fn find_most_popular(&self, limit: usize) -> RepoResult<Vec<Restaurant>> {
        let mut restaurants: Vec<Restaurant> =
            self.restaurants.read().values().cloned().collect();
        restaurants.sort_by(|a, b| b.likes_count.cmp(&a.likes_count));
        restaurants.truncate(limit);
        Ok(restaurants)
    }

    async fn search_by_name(&self, name: &str) -> RepoResult<Vec<Restaurant>> {
        let needle = name.to_lowercase();
        Ok(self
            .restaurants
            .read()
            .values()
            .filter(|r| r.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryFavoriteRepository {
    favorites: Arc<RwLock<HashMap<FavoriteId, Favorite>>>,
}

impl InMemoryFavoriteRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FavoriteRepository for InMemoryFavoriteRepository {
    async fn save(&self, favorite: &Favorite) -> RepoResult<()> {
        let mut favorites = self.favorites.write();
        // Uniqueness constraint on (client, restaurant): the backstop for
        // concurrent toggles racing past the orchestrator's lookup.
        if favorites.values().any(|f| {
            f.client_id == favorite.client_id
                && f.restaurant_id == favorite.restaurant_id
                && f.id != favorite.id
        }) {
            return Err(RepositoryError::Conflict(format!(
                "favorite already exists for client {} and restaurant {}",
                favorite.client_id, favorite.restaurant_id
            )));
        }
        favorites.insert(favorite.id, favorite.clone());
        Ok(())
    }

    async fn delete(&self, id: FavoriteId) -> RepoResult<()> {
        if self.favorites.write().remove(&id).is_none() {
            return Err(RepositoryError::NotFound(format!("favorite {id}")));
        }
        Ok(())
    }

    async fn find_by_client(&self, client_id: UserId) -> RepoResult<Vec<Favorite>> {
        Ok(self
            .favorites
            .read()
            .values()
            .filter(|f| f.client_id == client_id)
            .cloned()
            .collect())
    }

    async fn find_by_restaurant(&self, restaurant_id: RestaurantId) -> RepoResult<Vec<Favorite>> {
        Ok(self
            .favorites
            .read()
            .values()
            .filter(|f| f.restaurant_id == restaurant_id)
            .cloned()
            .collect())
    }

    async fn find_by_client_and_restaurant(
        &self,
        client_id: UserId,
        restaurant_id: RestaurantId,
    ) -> RepoResult<Option<Favorite>> {
        Ok(self
            .favorites
            .read()
            .values()
            .find(|f| f.client_id == client_id && f.restaurant_id == restaurant_id)
            .cloned())
    }

    async fn exists_by_client_and_restaurant(
        &self,
        client_id: UserId,
        restaurant_id: RestaurantId,
    ) -> RepoResult<bool> {
        Ok(self
            .favorites
            .read()
            .values()
            .any(|f| f.client_id == client_id && f.restaurant_id == restaurant_id))
    }

    async fn count_by_restaurant(&self, restaurant_id: RestaurantId) -> RepoResult<usize> {
        Ok(self
            .favorites
            .read()
            .values()
            .filter(|f| f.restaurant_id == restaurant_id)
            .count())
    }

    async fn count_by_client(&self, client_id: UserId) -> RepoResult<usize> {
        Ok(self
            .favorites
            .read()
            .values()
            .filter(|f| f.client_id == client_id)
            .count())
    }

    async fn find_most_favorited(
        &self,
        limit: usize,
    ) -> RepoResult<Vec<(RestaurantId, usize)>> {
        let mut counts: HashMap<RestaurantId, usize> = HashMap::new();
        for favorite in self.favorites.read().values() {
            *counts.entry(favorite.restaurant_id).or_default() += 1;
        }
        let mut ranked: Vec<(RestaurantId, usize)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(limit);
        Ok(ranked)
    }
}

#[derive(Clone, Default)]
pub struct InMemoryMenuRepository {
    menus: Arc<RwLock<HashMap<MenuId, Menu>>>,
}

impl InMemoryMenuRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MenuRepository for InMemoryMenuRepository {
    async fn save(&self, menu: &Menu) -> RepoResult<()> {
        self.menus.write().insert(menu.id, menu.clone());
        Ok(())
    }

    async fn update(&self, menu: &Menu) -> RepoResult<()> {
        let mut menus = self.menus.write();
        if !menus.contains_key(&menu.id) {
            return Err(RepositoryError::NotFound(format!("menu {}", menu.id)));
        }
        menus.insert(menu.id, menu.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: MenuId) -> RepoResult<Option<Menu>> {
        Ok(self.menus.read().get(&id).cloned())
    }

    async fn find_by_restaurant(&self, restaurant_id: RestaurantId) -> RepoResult<Vec<Menu>> {
        Ok(self
            .menus
            .read()
            .values()
            .filter(|m| m.restaurant_id == restaurant_id)
            .cloned()
            .collect())
    }

    async fn find_by_status(&self, status: MenuStatus) -> RepoResult<Vec<Menu>> {
        Ok(self
            .menus
            .read()
            .values()
            .filter(|m| m.status == status)
            .cloned()
            .collect())
    }

    async fn find_active_by_restaurant(
        &self,
        restaurant_id: RestaurantId,
    ) -> RepoResult<Option<Menu>> {
        // Query contract: the single menu served to clients. Ties resolve
        // to the most recently updated active menu.
        Ok(self
            .menus
            .read()
            .values()
            .filter(|m| m.restaurant_id == restaurant_id && m.is_active())
            .max_by_key(|m| m.updated_at)
            .cloned())
    }

    async fn delete(&self, id: MenuId) -> RepoResult<()> {
        if self.menus.write().remove(&id).is_none() {
            return Err(RepositoryError::NotFound(format!("menu {id}")));
        }
        Ok(())
    }

    async fn increment_download_count(&self, id: MenuId) -> RepoResult<u32> {
        let mut menus = self.menus.write();
        let menu = menus
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::NotFound(format!("menu {id}")))?;
        Ok(menu.increment_download_count())
    }

    async fn total_downloads_by_restaurant(
        &self,
        restaurant_id: RestaurantId,
    ) -> RepoResult<u32> {
        Ok(self
            .menus
            .read()
            .values()
            .filter(|m| m.restaurant_id == restaurant_id)
            .map(|m| m.download_count)
            .sum())
    }

    async fn count_by_status(&self, status: MenuStatus) -> RepoResult<usize> {
        Ok(self.menus.read().values().filter(|m| m.status == status).count())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryUserPhotoRepository {
    photos: Arc<RwLock<HashMap<UserPhotoId, UserPhoto>>>,
}

impl InMemoryUserPhotoRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserPhotoRepository for InMemoryUserPhotoRepository {
    async fn save(&self, photo: &UserPhoto) -> RepoResult<()> {
        self.photos.write().insert(photo.id, photo.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: UserPhotoId) -> RepoResult<Option<UserPhoto>> {
        Ok(self.photos.read().get(&id).cloned())
    }

    async fn find_by_client(&self, client_id: UserId) -> RepoResult<Vec<UserPhoto>> {
        Ok(self
            .photos
            .read()
            .values()
            .filter(|p| p.client_id == client_id)
            .cloned()
            .collect())
    }

    async fn find_by_restaurant(
        &self,
        restaurant_id: RestaurantId,
    ) -> RepoResult<Vec<UserPhoto>> {
        Ok(self
            .photos
            .read()
            .values()
            .filter(|p| p.restaurant_id == restaurant_id)
            .cloned()
            .collect())
    }

    async fn count_by_restaurant(&self, restaurant_id: RestaurantId) -> RepoResult<usize> {
        Ok(self
            .photos
            .read()
            .values()
            .filter(|p| p.restaurant_id == restaurant_id)
            .count())
    }

    async fn delete(&self, id: UserPhotoId) -> RepoResult<()> {
        if self.photos.write().remove(&id).is_none() {
            return Err(RepositoryError::NotFound(format!("user photo {id}")));
        }
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryDocumentRepository {
    documents: Arc<RwLock<HashMap<DocumentId, Document>>>,
}

impl InMemoryDocumentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentRepository for InMemoryDocumentRepository {
    async fn save(&self, document: &Document) -> RepoResult<()> {
        self.documents.write().insert(document.id, document.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: DocumentId) -> RepoResult<Option<Document>> {
        Ok(self.documents.read().get(&id).cloned())
    }

    async fn find_by_restaurant(
        &self,
        restaurant_id: RestaurantId,
    ) -> RepoResult<Vec<Document>> {
        Ok(self
            .documents
            .read()
            .values()
            .filter(|d| d.restaurant_id == restaurant_id)
            .cloned()
            .collect())
    }

    async fn find_by_type(&self, doc_type: DocumentType) -> RepoResult<Vec<Document>> {
        Ok(self
            .documents
            .read()
            .values()
            .filter(|d| d.doc_type == doc_type)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: DocumentId) -> RepoResult<()> {
        if self.documents.write().remove(&id).is_none() {
            return Err(RepositoryError::NotFound(format!("document {id}")));
        }
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryImageRepository {
    images: Arc<RwLock<HashMap<ImageId, Image>>>,
}

impl InMemoryImageRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ImageRepository for InMemoryImageRepository {
    async fn save(&self, image: &Image) -> RepoResult<()> {
        self.images.write().insert(image.id, image.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: ImageId) -> RepoResult<Option<Image>> {
        Ok(self.images.read().get(&id).cloned())
    }

    async fn find_by_restaurant(&self, restaurant_id: RestaurantId) -> RepoResult<Vec<Image>> {
        Ok(self
            .images
            .read()
            .values()
            .filter(|i| i.restaurant_id == restaurant_id)
            .cloned()
            .collect())
    }

    async fn find_by_owner(&self, owner_id: UserId) -> RepoResult<Vec<Image>> {
        Ok(self
            .images
            .read()
            .values()
            .filter(|i| i.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: ImageId) -> RepoResult<()> {
        if self.images.write().remove(&id).is_none() {
            return Err(RepositoryError::NotFound(format!("image {id}")));
        }
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct InMemorySurveyRepository {
    surveys: Arc<RwLock<HashMap<SurveyId, Survey>>>,
}

impl InMemorySurveyRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SurveyRepository for InMemorySurveyRepository {
    async fn save(&self, survey: &Survey) -> RepoResult<()> {
        let mut surveys = self.surveys.write();
        // One survey per (client, restaurant).
        if surveys.values().any(|s| {
            s.client_id == survey.client_id
                && s.restaurant_id == survey.restaurant_id
                && s.id != survey.id
        }) {
            return Err(RepositoryError::Conflict(format!(
                "survey already exists for client {} and restaurant {}",
                survey.client_id, survey.restaurant_id
            )));
        }
        surveys.insert(survey.id, survey.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: SurveyId) -> RepoResult<Option<Survey>> {
        Ok(self.surveys.read().get(&id).cloned())
    }

    async fn find_by_client(&self, client_id: UserId) -> RepoResult<Vec<Survey>> {
        Ok(self
            .surveys
            .read()
            .values()
            .filter(|s| s.client_id == client_id)
            .cloned()
            .collect())
    }

    async fn find_by_restaurant(&self, restaurant_id: RestaurantId) -> RepoResult<Vec<Survey>> {
        Ok(self
            .surveys
            .read()
            .values()
            .filter(|s| s.restaurant_id == restaurant_id)
            .cloned()
            .collect())
    }

    async fn exists_by_client_and_restaurant(
        &self,
        client_id: UserId,
        restaurant_id: RestaurantId,
    ) -> RepoResult<bool> {
        Ok(self
            .surveys
            .read()
            .values()
            .any(|s| s.client_id == client_id && s.restaurant_id == restaurant_id))
    }

    async fn count(&self) -> RepoResult<usize> {
        Ok(self.surveys.read().len())
    }

    async fn count_completed(&self) -> RepoResult<usize> {
        Ok(self.surveys.read().values().filter(|s| s.is_complete()).count())
    }

    async fn count_by_restaurant(&self, restaurant_id: RestaurantId) -> RepoResult<usize> {
        Ok(self
            .surveys
            .read()
            .values()
            .filter(|s| s.restaurant_id == restaurant_id)
            .count())
    }

    async fn find_recent(&self, limit: usize) -> RepoResult<Vec<Survey>> {
        let mut surveys: Vec<Survey> = self.surveys.read().values().cloned().collect();
        surveys.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        surveys.truncate(limit);
        Ok(surveys)
    }

    async fn delete(&self, id: SurveyId) -> RepoResult<()> {
        if self.surveys.write().remove(&id).is_none() {
            return Err(RepositoryError::NotFound(format!("survey {id}")));
        }
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryZoneRepository {
    zones: Arc<RwLock<HashMap<ZoneId, Zone>>>,
}

impl InMemoryZoneRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ZoneRepository for InMemoryZoneRepository {
    async fn save(&self, zone: &Zone) -> RepoResult<()> {
        let mut zones = self.zones.write();
        if zones
            .values()
            .any(|z| z.name.eq_ignore_ascii_case(&zone.name) && z.id != zone.id)
        {
            return Err(RepositoryError::Conflict(format!(
                "zone name already exists: {}",
                zone.name
            )));
        }
        zones.insert(zone.id, zone.clone());
        Ok(())
    }

    async fn update(&self, zone: &Zone) -> RepoResult<()> {
        let mut zones = self.zones.write();
        if !zones.contains_key(&zone.id) {
            return Err(RepositoryError::NotFound(format!("zone {}", zone.id)));
        }
        zones.insert(zone.id, zone.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: ZoneId) -> RepoResult<Option<Zone>> {
        Ok(self.zones.read().get(&id).cloned())
    }

    async fn find_all(&self) -> RepoResult<Vec<Zone>> {
        Ok(self.zones.read().values().cloned().collect())
    }

    async fn find_by_owner(&self, owner_id: UserId) -> RepoResult<Vec<Zone>> {
        Ok(self
            .zones
            .read()
            .values()
            .filter(|z| z.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn find_by_name(&self, name: &str) -> RepoResult<Option<Zone>> {
        Ok(self
            .zones
            .read()
            .values()
            .find(|z| z.name.eq_ignore_ascii_case(name))
            .cloned())
    }

    async fn exists_by_name(&self, name: &str) -> RepoResult<bool> {
        Ok(self
            .zones
            .read()
            .values()
            .any(|z| z.name.eq_ignore_ascii_case(name)))
    }

    async fn delete(&self, id: ZoneId) -> RepoResult<()> {
        if self.zones.write().remove(&id).is_none() {
            return Err(RepositoryError::NotFound(format!("zone {id}")));
        }
        Ok(())
    }

    async fn count(&self) -> RepoResult<usize> {
        Ok(self.zones.read().len())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryDownloadRepository {
    downloads: Arc<RwLock<HashMap<DownloadId, Download>>>,
}

impl InMemoryDownloadRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DownloadRepository for InMemoryDownloadRepository {
    async fn save(&self, download: &Download) -> RepoResult<()> {
        self.downloads.write().insert(download.id, download.clone());
        Ok(())
    }

    async fn update(&self, download: &Download) -> RepoResult<()> {
        let mut downloads = self.downloads.write();
        if !downloads.contains_key(&download.id) {
            return Err(RepositoryError::NotFound(format!("download {}", download.id)));
        }
        downloads.insert(download.id, download.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: DownloadId) -> RepoResult<Option<Download>> {
        Ok(self.downloads.read().get(&id).cloned())
    }

    async fn find_by_owner(&self, owner_id: UserId) -> RepoResult<Vec<Download>> {
        Ok(self
            .downloads
            .read()
            .values()
            .filter(|d| d.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> RepoResult<Vec<Download>> {
        Ok(self.downloads.read().values().cloned().collect())
    }

    async fn delete(&self, id: DownloadId) -> RepoResult<()> {
        if self.downloads.write().remove(&id).is_none() {
            return Err(RepositoryError::NotFound(format!("download {id}")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{Email, Password, Phone};

    fn sample_restaurant(owner: UserId) -> Restaurant {
        Restaurant::new(
            "Fonda Luz",
            "Lun-Dom 8:00-20:00",
            Phone::new("5511122233").unwrap(),
            vec![],
            "Calle Hidalgo 45",
            None,
            None,
            None,
            owner,
            ApplicationId::new(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn favorite_pair_uniqueness_backstop() {
        let repo = InMemoryFavoriteRepository::new();
        let client = UserId::new();
        let restaurant = RestaurantId::new();

        repo.save(&Favorite::new(client, restaurant)).await.unwrap();
        let duplicate = Favorite::new(client, restaurant);
        assert!(matches!(
            repo.save(&duplicate).await,
            Err(RepositoryError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn likes_counter_is_adjusted_under_the_write_lock() {
        let repo = InMemoryRestaurantRepository::new();
        let restaurant = sample_restaurant(UserId::new());
        let id = restaurant.id;
        repo.save(&restaurant).await.unwrap();

        assert_eq!(repo.increment_likes_count(id).await.unwrap(), 1);
        assert_eq!(repo.increment_likes_count(id).await.unwrap(), 2);
        assert_eq!(repo.decrement_likes_count(id).await.unwrap(), 1);
        assert_eq!(repo.decrement_likes_count(id).await.unwrap(), 0);
        // Floors at zero.
        assert_eq!(repo.decrement_likes_count(id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn user_email_uniqueness_is_case_insensitive() {
        let repo = InMemoryUserRepository::new();
        let user = User::new(
            "Ana López",
            Email::new("Ana@Example.com").unwrap(),
            Password::from_hash("h"),
            UserRole::Client,
        )
        .unwrap();
        repo.save(&user).await.unwrap();

        assert!(repo.exists_by_email("ana@example.com").await.unwrap());
        let found = repo.find_by_email("ana@example.com").await.unwrap();
        assert!(found.is_some());

        let twin = User::new(
            "Otra Ana",
            Email::new("ANA@example.COM").unwrap(),
            Password::from_hash("h"),
            UserRole::Client,
        )
        .unwrap();
        assert!(matches!(
            repo.save(&twin).await,
            Err(RepositoryError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn update_of_missing_entity_errors() {
        let repo = InMemoryRestaurantRepository::new();
        let restaurant = sample_restaurant(UserId::new());
        assert!(matches!(
            repo.update(&restaurant).await,
            Err(RepositoryError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn active_menu_query_returns_latest_active() {
        let repo = InMemoryMenuRepository::new();
        let restaurant_id = RestaurantId::new();

        let inactive = Menu::new(
            crate::domain::value_objects::FileUrl::new("a.pdf").unwrap(),
            crate::domain::value_objects::FileUrl::new("b.pdf").unwrap(),
            MenuStatus::Inactive,
            restaurant_id,
        );
        repo.save(&inactive).await.unwrap();
        assert!(repo
            .find_active_by_restaurant(restaurant_id)
            .await
            .unwrap()
            .is_none());

        let active = Menu::new(
            crate::domain::value_objects::FileUrl::new("c.pdf").unwrap(),
            crate::domain::value_objects::FileUrl::new("d.pdf").unwrap(),
            MenuStatus::Active,
            restaurant_id,
        );
        repo.save(&active).await.unwrap();
        let found = repo
            .find_active_by_restaurant(restaurant_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, active.id);
    }
}
