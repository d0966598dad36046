// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Integration tests for the engagement ledger: favorite toggling with
//! counter maintenance, and the gates it enforces on menu downloads and
//! photo uploads.

use std::sync::Arc;

use mesa_core::application::{FavoriteService, MediaService, MenuService};
use mesa_core::domain::application::ApplicationId;
use mesa_core::domain::error::DomainError;
use mesa_core::domain::menu::{Menu, MenuStatus};
use mesa_core::domain::repository::{
    FavoriteRepository, MenuRepository, RestaurantRepository, UserPhotoRepository,
};
use mesa_core::domain::restaurant::{Restaurant, RestaurantId};
use mesa_core::domain::user::UserId;
use mesa_core::domain::value_objects::{FileUrl, Phone};
use mesa_core::infrastructure::event_bus::EventBus;
use mesa_core::infrastructure::repositories::{
    InMemoryDocumentRepository, InMemoryFavoriteRepository, InMemoryImageRepository,
    InMemoryMenuRepository, InMemoryRestaurantRepository, InMemoryUserPhotoRepository,
};
use mesa_core::infrastructure::storage::LocalFileStorage;

struct World {
    favorites: Arc<InMemoryFavoriteRepository>,
    restaurants: Arc<InMemoryRestaurantRepository>,
    menus: Arc<InMemoryMenuRepository>,
    photos: Arc<InMemoryUserPhotoRepository>,
    favorite_service: FavoriteService,
    menu_service: MenuService,
    media_service: MediaService,
    _tempdir: tempfile::TempDir,
}

fn build_world() -> World {
    let favorites = Arc::new(InMemoryFavoriteRepository::new());
    let restaurants = Arc::new(InMemoryRestaurantRepository::new());
    let menus = Arc::new(InMemoryMenuRepository::new());
    let photos = Arc::new(InMemoryUserPhotoRepository::new());
    let documents = Arc::new(InMemoryDocumentRepository::new());
    let images = Arc::new(InMemoryImageRepository::new());
    let tempdir = tempfile::tempdir().unwrap();
    let storage = Arc::new(LocalFileStorage::new(
        tempdir.path(),
        "http://localhost:8080/files",
    ));
    let event_bus = EventBus::new(64);

    let favorite_service = FavoriteService::new(
        favorites.clone(),
        restaurants.clone(),
        event_bus.clone(),
    );
    let menu_service = MenuService::new(
        menus.clone(),
        restaurants.clone(),
        favorites.clone(),
        storage.clone(),
        event_bus.clone(),
    );
    let media_service = MediaService::new(
        photos.clone(),
        documents,
        images,
        favorites.clone(),
        restaurants.clone(),
        storage,
        event_bus,
    );

    World {
        favorites,
        restaurants,
        menus,
        photos,
        favorite_service,
        menu_service,
        media_service,
        _tempdir: tempdir,
    }
}

async fn seed_restaurant(world: &World) -> RestaurantId {
    let restaurant = Restaurant::new(
        "Taquería El Paso",
        "Lun-Sab 12:00-22:00",
        Phone::new("5512345678").unwrap(),
        vec!["tacos".into()],
        "Av. Juárez 123, Centro",
        None,
        None,
        None,
        UserId::new(),
        ApplicationId::new(),
    )
    .unwrap();
    let id = restaurant.id;
    world.restaurants.save(&restaurant).await.unwrap();
    id
}

async fn seed_active_menu(world: &World, restaurant_id: RestaurantId) -> Menu {
    let menu = Menu::new(
        FileUrl::new("http://localhost:8080/files/menus/origen.pdf").unwrap(),
        FileUrl::new("http://localhost:8080/files/menus/carta.pdf").unwrap(),
        MenuStatus::Active,
        restaurant_id,
    );
    world.menus.save(&menu).await.unwrap();
    menu
}

#[tokio::test]
async fn toggle_creates_then_removes_the_favorite() {
    let world = build_world();
    let restaurant_id = seed_restaurant(&world).await;
    let client_id = UserId::new();

    let liked = world
        .favorite_service
        .toggle(client_id, restaurant_id)
        .await
        .unwrap();
    assert!(liked.is_favorite);
    assert_eq!(liked.likes_count, 1);

    let unliked = world
        .favorite_service
        .toggle(client_id, restaurant_id)
        .await
        .unwrap();
    assert!(!unliked.is_favorite);
    assert_eq!(unliked.likes_count, 0);

    // Hard delete: no favorite record remains.
    assert!(world
        .favorites
        .find_by_client_and_restaurant(client_id, restaurant_id)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn toggle_on_missing_restaurant_is_not_found() {
    let world = build_world();
    let err = world
        .favorite_service
        .toggle(UserId::new(), RestaurantId::new())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn likes_cache_matches_favorite_records_after_any_toggle_sequence() {
    let world = build_world();
    let restaurant_id = seed_restaurant(&world).await;
    let clients: Vec<UserId> = (0..5).map(|_| UserId::new()).collect();

    // Everyone likes; two unlike; one likes again.
    for client in &clients {
        world.favorite_service.toggle(*client, restaurant_id).await.unwrap();
    }
    world.favorite_service.toggle(clients[0], restaurant_id).await.unwrap();
    world.favorite_service.toggle(clients[1], restaurant_id).await.unwrap();
    let last = world
        .favorite_service
        .toggle(clients[0], restaurant_id)
        .await
        .unwrap();

    let cached = world
        .restaurants
        .find_by_id(restaurant_id)
        .await
        .unwrap()
        .unwrap()
        .likes_count;
    let truth = world
        .favorites
        .count_by_restaurant(restaurant_id)
        .await
        .unwrap();

    assert_eq!(cached as usize, truth);
    assert_eq!(cached, 4);
    assert_eq!(last.likes_count, 4);
}

#[tokio::test]
async fn download_without_favorite_is_forbidden_and_changes_nothing() {
    let world = build_world();
    let restaurant_id = seed_restaurant(&world).await;
    let menu = seed_active_menu(&world, restaurant_id).await;
    let client_id = UserId::new();

    let err = world
        .menu_service
        .download(client_id, restaurant_id)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "LIKE_REQUIRED");

    let restaurant = world
        .restaurants
        .find_by_id(restaurant_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(restaurant.likes_count, 0);
    let menu = world.menus.find_by_id(menu.id).await.unwrap().unwrap();
    assert_eq!(menu.download_count, 0);
}

#[tokio::test]
async fn download_with_favorite_but_no_active_menu_is_not_found() {
    let world = build_world();
    let restaurant_id = seed_restaurant(&world).await;
    let client_id = UserId::new();
    world
        .favorite_service
        .toggle(client_id, restaurant_id)
        .await
        .unwrap();

    // An inactive menu exists, but the active-menu query finds nothing.
    let menu = Menu::new(
        FileUrl::new("a.pdf").unwrap(),
        FileUrl::new("b.pdf").unwrap(),
        MenuStatus::Inactive,
        restaurant_id,
    );
    world.menus.save(&menu).await.unwrap();

    let err = world
        .menu_service
        .download(client_id, restaurant_id)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn download_with_favorite_increments_the_counter_and_returns_the_url() {
    let world = build_world();
    let restaurant_id = seed_restaurant(&world).await;
    let menu = seed_active_menu(&world, restaurant_id).await;
    let client_id = UserId::new();
    world
        .favorite_service
        .toggle(client_id, restaurant_id)
        .await
        .unwrap();

    let result = world
        .menu_service
        .download(client_id, restaurant_id)
        .await
        .unwrap();
    assert_eq!(result.menu_url, menu.menu_url);
    assert_eq!(result.file_name, format!("menu-restaurante-{restaurant_id}.pdf"));

    let stored = world.menus.find_by_id(menu.id).await.unwrap().unwrap();
    assert_eq!(stored.download_count, 1);
}

#[tokio::test]
async fn photo_upload_requires_a_favorite() {
    let world = build_world();
    let restaurant_id = seed_restaurant(&world).await;
    let client_id = UserId::new();

    let err = world
        .media_service
        .upload_user_photo(client_id, restaurant_id, b"jpeg", "visita.jpg")
        .await
        .unwrap_err();
    assert_eq!(err.code(), "FAVORITE_REQUIRED");
    assert!(world.photos.find_by_client(client_id).await.unwrap().is_empty());

    world
        .favorite_service
        .toggle(client_id, restaurant_id)
        .await
        .unwrap();
    let photo = world
        .media_service
        .upload_user_photo(client_id, restaurant_id, b"jpeg", "visita.jpg")
        .await
        .unwrap();
    assert_eq!(photo.client_id, client_id);
    assert_eq!(world.photos.count_by_restaurant(restaurant_id).await.unwrap(), 1);
}

#[tokio::test]
async fn double_toggle_is_an_identity_on_the_visible_state() {
    let world = build_world();
    let restaurant_id = seed_restaurant(&world).await;
    let spectator = UserId::new();
    let client = UserId::new();

    // Background likes from another client.
    world.favorite_service.toggle(spectator, restaurant_id).await.unwrap();

    let before = world
        .restaurants
        .find_by_id(restaurant_id)
        .await
        .unwrap()
        .unwrap()
        .likes_count;

    world.favorite_service.toggle(client, restaurant_id).await.unwrap();
    world.favorite_service.toggle(client, restaurant_id).await.unwrap();

    let after = world
        .restaurants
        .find_by_id(restaurant_id)
        .await
        .unwrap()
        .unwrap()
        .likes_count;
    assert_eq!(before, after);
    assert!(!world
        .favorite_service
        .is_favorite(client, restaurant_id)
        .await
        .unwrap());
}
