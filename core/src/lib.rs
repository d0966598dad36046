// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Mesa Core
//!
//! Application and domain core of the Mesa restaurant discovery platform.
//!
//! # Architecture
//!
//! - **Layer:** `domain`: entities, value objects, policies, domain services
//! - **Layer:** `application`: use-case orchestrators and service ports
//! - **Layer:** `infrastructure`: in-memory repositories, adapters, event bus
//!
//! The HTTP surface, SQL persistence, JWT issuance, and real email/file
//! delivery live outside this crate and consume it through the repository
//! traits and ports defined here.

pub mod domain;
pub mod application;
pub mod infrastructure;

pub use domain::*;
