// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Application Layer
//!
//! Use-case orchestrators. Each service sequences the same four steps:
//! load aggregates through repository ports, apply the access-control
//! policy, invoke the domain transition, persist, then shape a result DTO.
//! Business rules live in the domain layer; these services only coordinate.

pub mod applications;
pub mod auth;
pub mod downloads;
pub mod favorites;
pub mod media;
pub mod menus;
pub mod ports;
pub mod restaurants;
pub mod statistics;
pub mod surveys;
pub mod users;
pub mod zones;

pub use applications::{OnboardingService, SubmitApplicationRequest, SubmittedApplication};
pub use auth::{AuthService, ClientRegisterRequest, LoginResult, RegisterRequest};
pub use downloads::{DownloadStats, DownloadTrackingService, TrackDownloadRequest};
pub use favorites::{FavoriteService, ToggleFavoriteResult};
pub use media::{MediaService, UploadAttachmentRequest, UploadDocumentRequest};
pub use menus::{CreateMenuRequest, DownloadMenuResult, MenuService};
pub use ports::{EmailService, FileStorage, PasswordHasher};
pub use restaurants::{CreateRestaurantRequest, RestaurantService};
pub use statistics::{GlobalStats, OwnerStats, RestaurantStats, StatisticsService};
pub use surveys::{SubmitSurveyRequest, SubmitSurveyResult, SurveyService};
pub use users::{UpdateUserRequest, UserService};
pub use zones::{CreateZoneRequest, ZoneService};
