// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Domain Layer
//!
//! Entities, value objects, the access-control policy, the popularity
//! scoring service, domain events, the error taxonomy, and the repository
//! contracts every aggregate persists through.

pub mod access;
pub mod application;
pub mod download;
pub mod error;
pub mod events;
pub mod favorite;
pub mod media;
pub mod menu;
pub mod popularity;
pub mod repository;
pub mod restaurant;
pub mod survey;
pub mod user;
pub mod value_objects;
pub mod zone;
