// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Integration tests for restaurant management permissions, zones,
//! surveys, menu file cleanup, download tracking, and statistics.

use std::sync::Arc;

use mesa_core::application::{
    CreateMenuRequest, CreateZoneRequest, DownloadTrackingService, MenuService, RestaurantService,
    StatisticsService, SubmitSurveyRequest, SurveyService, TrackDownloadRequest, ZoneService,
};
use mesa_core::domain::access::Actor;
use mesa_core::domain::application::ApplicationId;
use mesa_core::domain::download::{DownloadOrigin, OpinionType};
use mesa_core::domain::favorite::Favorite;
use mesa_core::domain::media::UserPhoto;
use mesa_core::domain::menu::MenuStatus;
use mesa_core::domain::repository::{
    ClientRepository, FavoriteRepository, MenuRepository, RestaurantRepository,
    UserPhotoRepository,
};
use mesa_core::domain::restaurant::{Restaurant, RestaurantId, RestaurantUpdate};
use mesa_core::domain::user::{Client, UserId, UserRole};
use mesa_core::domain::value_objects::{FileUrl, Phone};
use mesa_core::infrastructure::event_bus::EventBus;
use mesa_core::infrastructure::repositories::{
    InMemoryApplicationRepository, InMemoryClientRepository, InMemoryDownloadRepository,
    InMemoryFavoriteRepository, InMemoryMenuRepository, InMemoryRestaurantRepository,
    InMemorySurveyRepository, InMemoryUserPhotoRepository, InMemoryUserRepository,
    InMemoryZoneRepository,
};
use mesa_core::infrastructure::storage::LocalFileStorage;

struct World {
    restaurant_repo: Arc<InMemoryRestaurantRepository>,
    menu_repo: Arc<InMemoryMenuRepository>,
    favorite_repo: Arc<InMemoryFavoriteRepository>,
    photo_repo: Arc<InMemoryUserPhotoRepository>,
    client_repo: Arc<InMemoryClientRepository>,
    restaurants: RestaurantService,
    menus: MenuService,
    zones: ZoneService,
    surveys: SurveyService,
    downloads: DownloadTrackingService,
    statistics: StatisticsService,
    _tempdir: tempfile::TempDir,
}

fn build_world() -> World {
    let restaurant_repo = Arc::new(InMemoryRestaurantRepository::new());
    let application_repo = Arc::new(InMemoryApplicationRepository::new());
    let menu_repo = Arc::new(InMemoryMenuRepository::new());
    let favorite_repo = Arc::new(InMemoryFavoriteRepository::new());
    let photo_repo = Arc::new(InMemoryUserPhotoRepository::new());
    let client_repo = Arc::new(InMemoryClientRepository::new());
    let zone_repo = Arc::new(InMemoryZoneRepository::new());
    let survey_repo = Arc::new(InMemorySurveyRepository::new());
    let download_repo = Arc::new(InMemoryDownloadRepository::new());
    let user_repo = Arc::new(InMemoryUserRepository::new());
    let tempdir = tempfile::tempdir().unwrap();
    let storage = Arc::new(LocalFileStorage::new(
        tempdir.path(),
        "http://localhost:8080/files",
    ));
    let event_bus = EventBus::new(64);

    let restaurants = RestaurantService::new(
        restaurant_repo.clone(),
        application_repo.clone(),
        event_bus.clone(),
    );
    let menus = MenuService::new(
        menu_repo.clone(),
        restaurant_repo.clone(),
        favorite_repo.clone(),
        storage,
        event_bus,
    );
    let zones = ZoneService::new(zone_repo.clone(), restaurant_repo.clone());
    let surveys = SurveyService::new(
        survey_repo,
        client_repo.clone(),
        restaurant_repo.clone(),
    );
    let downloads = DownloadTrackingService::new(download_repo);
    let statistics = StatisticsService::new(
        restaurant_repo.clone(),
        favorite_repo.clone(),
        photo_repo.clone(),
        menu_repo.clone(),
        user_repo,
        zone_repo,
        application_repo,
    );

    World {
        restaurant_repo,
        menu_repo,
        favorite_repo,
        photo_repo,
        client_repo,
        restaurants,
        menus,
        zones,
        surveys,
        downloads,
        statistics,
        _tempdir: tempdir,
    }
}

async fn seed_restaurant(world: &World, owner_id: UserId) -> RestaurantId {
    let restaurant = Restaurant::new(
        "Taquería El Paso",
        "Lun-Sab 12:00-22:00",
        Phone::new("5512345678").unwrap(),
        vec!["tacos".into()],
        "Av. Juárez 123, Centro",
        None,
        None,
        None,
        owner_id,
        ApplicationId::new(),
    )
    .unwrap();
    let id = restaurant.id;
    world.restaurant_repo.save(&restaurant).await.unwrap();
    id
}

#[tokio::test]
async fn non_owner_update_is_denied_with_the_resource_label() {
    let world = build_world();
    let restaurant_id = seed_restaurant(&world, UserId::new()).await;
    let stranger = Actor::new(UserId::new(), UserRole::RestaurantOwner);

    let err = world
        .restaurants
        .update(
            &stranger,
            restaurant_id,
            RestaurantUpdate { name: Some("Otro Nombre".into()), ..Default::default() },
        )
        .await
        .unwrap_err();
    assert_eq!(err.code(), "NOT_OWNER");
    assert!(err.to_string().contains("restaurante"));
}

#[tokio::test]
async fn admin_override_on_restaurant_update() {
    let world = build_world();
    let restaurant_id = seed_restaurant(&world, UserId::new()).await;
    let admin = Actor::new(UserId::new(), UserRole::Admin);

    let updated = world
        .restaurants
        .update(
            &admin,
            restaurant_id,
            RestaurantUpdate { schedule: Some("Mar-Dom 13:00-23:00".into()), ..Default::default() },
        )
        .await
        .unwrap();
    assert_eq!(updated.schedule, "Mar-Dom 13:00-23:00");
}

#[tokio::test]
async fn owner_can_delete_their_restaurant() {
    let world = build_world();
    let owner_id = UserId::new();
    let restaurant_id = seed_restaurant(&world, owner_id).await;
    let owner = Actor::new(owner_id, UserRole::RestaurantOwner);

    world.restaurants.delete(&owner, restaurant_id).await.unwrap();
    assert!(world
        .restaurant_repo
        .find_by_id(restaurant_id)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn zone_names_are_unique_and_deletion_waits_for_restaurants() {
    let world = build_world();
    let owner_id = UserId::new();
    let owner = Actor::new(owner_id, UserRole::RestaurantOwner);

    let zone = world
        .zones
        .create(CreateZoneRequest { name: "Centro Histórico".into(), owner_id })
        .await
        .unwrap();

    let err = world
        .zones
        .create(CreateZoneRequest { name: "centro histórico".into(), owner_id })
        .await
        .unwrap_err();
    assert_eq!(err.code(), "DUPLICATE_ZONE");

    // Attach a restaurant to the zone; deletion must refuse.
    let restaurant_id = seed_restaurant(&world, owner_id).await;
    let admin = Actor::new(UserId::new(), UserRole::Admin);
    world
        .restaurants
        .update(
            &admin,
            restaurant_id,
            RestaurantUpdate { zone_id: Some(zone.id), ..Default::default() },
        )
        .await
        .unwrap();

    let err = world.zones.delete(&owner, zone.id).await.unwrap_err();
    assert_eq!(err.code(), "RESOURCE_IN_USE");

    // Detach and retry.
    world.restaurants.delete(&admin, restaurant_id).await.unwrap();
    world.zones.delete(&owner, zone.id).await.unwrap();
}

#[tokio::test]
async fn surveys_are_unique_per_client_and_restaurant() {
    let world = build_world();
    let client_id = UserId::new();
    world
        .client_repo
        .save(&Client::new(client_id, None))
        .await
        .unwrap();
    let restaurant_id = seed_restaurant(&world, UserId::new()).await;

    let result = world
        .surveys
        .submit(SubmitSurveyRequest {
            client_id,
            restaurant_id,
            answers: [
                Some("Excelente".into()),
                Some("Muy bueno".into()),
                Some("Sí".into()),
                None,
                None,
            ],
        })
        .await
        .unwrap();
    assert!(!result.is_complete);
    assert_eq!(result.completion_percentage, 60.0);

    let err = world
        .surveys
        .submit(SubmitSurveyRequest {
            client_id,
            restaurant_id,
            answers: Default::default(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.code(), "DUPLICATE_SURVEY");

    let stats = world.surveys.stats().await.unwrap();
    assert_eq!(stats.total, 1);
    assert_eq!(stats.completed, 0);
}

#[tokio::test]
async fn menu_deletion_survives_missing_files() {
    let world = build_world();
    let owner_id = UserId::new();
    let restaurant_id = seed_restaurant(&world, owner_id).await;
    let owner = Actor::new(owner_id, UserRole::RestaurantOwner);

    // URLs point into the storage root but no file was ever written, so
    // the cleanup fails and must not abort the record deletion.
    let menu = world
        .menus
        .create(
            &owner,
            CreateMenuRequest {
                file_url: "http://localhost:8080/files/menus/perdido.pdf".into(),
                menu_url: "http://localhost:8080/files/menus/perdido-publico.pdf".into(),
                status: MenuStatus::Active,
                restaurant_id,
            },
        )
        .await
        .unwrap();

    world.menus.delete(&owner, menu.id).await.unwrap();
    assert!(world.menu_repo.find_by_id(menu.id).await.unwrap().is_none());
}

#[tokio::test]
async fn menu_creation_is_denied_for_strangers() {
    let world = build_world();
    let restaurant_id = seed_restaurant(&world, UserId::new()).await;
    let stranger = Actor::new(UserId::new(), UserRole::RestaurantOwner);

    let err = world
        .menus
        .create(
            &stranger,
            CreateMenuRequest {
                file_url: "a.pdf".into(),
                menu_url: "b.pdf".into(),
                status: MenuStatus::Pending,
                restaurant_id,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.code(), "NOT_OWNER");
}

#[tokio::test]
async fn download_tracking_aggregates_by_origin_and_opinion() {
    let world = build_world();
    let owner_id = UserId::new();

    for (origin, opinion) in [
        (DownloadOrigin::National, OpinionType::Food),
        (DownloadOrigin::National, OpinionType::Location),
        (DownloadOrigin::Foreign, OpinionType::Food),
    ] {
        world
            .downloads
            .track(TrackDownloadRequest { owner_id, origin, opinion })
            .await
            .unwrap();
    }

    let stats = world.downloads.stats_for_owner(owner_id).await.unwrap();
    assert_eq!(stats.total, 3);
    assert_eq!(stats.national, 2);
    assert_eq!(stats.foreign, 1);
    let food = stats
        .by_opinion
        .iter()
        .find(|(o, _)| *o == OpinionType::Food)
        .unwrap();
    assert_eq!(food.1, 2);
}

#[tokio::test]
async fn popularity_report_reflects_engagement() {
    let world = build_world();
    let restaurant_id = seed_restaurant(&world, UserId::new()).await;

    for _ in 0..20 {
        world
            .restaurant_repo
            .increment_likes_count(restaurant_id)
            .await
            .unwrap();
    }
    for _ in 0..2 {
        let photo = UserPhoto::new(
            FileUrl::new("http://localhost:8080/files/user-photos/x.jpg").unwrap(),
            UserId::new(),
            restaurant_id,
        );
        world.photo_repo.save(&photo).await.unwrap();
    }

    let report = world
        .statistics
        .popularity_report(restaurant_id, 0)
        .await
        .unwrap();

    // Fresh restaurant: 20 likes · 1.5 new boost · 1.2 photo boost.
    assert_eq!(report.score, 36.0);
    assert!(report.is_popular);
    assert!(!report.is_trending);
    assert!(report.featured);
    assert_eq!(report.next_milestone.likes, 30);
    assert_eq!(report.next_milestone.remaining, 10);
}

#[tokio::test]
async fn owner_stats_sum_across_restaurants() {
    let world = build_world();
    let owner_id = UserId::new();
    let first = seed_restaurant(&world, owner_id).await;

    let second_restaurant = Restaurant::new(
        "Fonda Luz",
        "Lun-Dom 8:00-20:00",
        Phone::new("5511122233").unwrap(),
        vec![],
        "Calle Hidalgo 45",
        None,
        None,
        None,
        owner_id,
        ApplicationId::new(),
    )
    .unwrap();
    let second = second_restaurant.id;
    world.restaurant_repo.save(&second_restaurant).await.unwrap();

    // Owner stats read the favorite records, not the cached counter.
    world
        .favorite_repo
        .save(&Favorite::new(UserId::new(), first))
        .await
        .unwrap();
    world
        .favorite_repo
        .save(&Favorite::new(UserId::new(), first))
        .await
        .unwrap();
    world
        .favorite_repo
        .save(&Favorite::new(UserId::new(), second))
        .await
        .unwrap();

    let photo = UserPhoto::new(
        FileUrl::new("http://localhost:8080/files/user-photos/y.jpg").unwrap(),
        UserId::new(),
        second,
    );
    world.photo_repo.save(&photo).await.unwrap();

    let stats = world.statistics.owner_stats(owner_id).await.unwrap();
    assert_eq!(stats.total_restaurants, 2);
    assert_eq!(stats.total_likes, 3);
    assert_eq!(stats.total_photos, 1);
    assert_eq!(stats.total_downloads, 0);

    let first_row = stats
        .restaurants
        .iter()
        .find(|r| r.restaurant_id == first)
        .unwrap();
    assert_eq!(first_row.likes, 2);

    let global = world.statistics.global_stats().await.unwrap();
    assert_eq!(global.total_restaurants, 2);
    assert_eq!(global.pending_applications, 0);
}
