// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Menu-download tracking record.
//!
//! When a client downloads a menu they may answer a short optional survey
//! (where are you from, what drew you in); owners see the aggregate in
//! their statistics. Separate from the per-menu `download_count`, which
//! counts raw downloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::user::UserId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DownloadId(pub Uuid);

impl DownloadId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for DownloadId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DownloadId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where the downloading user comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DownloadOrigin {
    National,
    Foreign,
}

impl DownloadOrigin {
    pub fn label(&self) -> &'static str {
        match self {
            DownloadOrigin::National => "Nacional",
            DownloadOrigin::Foreign => "Extranjero",
        }
    }
}

impl std::fmt::Display for DownloadOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// What drew the user to this restaurant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpinionType {
    Food,
    Location,
    Recommendation,
    Schedule,
    View,
}

impl OpinionType {
    pub fn label(&self) -> &'static str {
        match self {
            OpinionType::Food => "La comida",
            OpinionType::Location => "La ubicación",
            OpinionType::Recommendation => "Recomendación",
            OpinionType::Schedule => "El horario",
            OpinionType::View => "La vista",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            OpinionType::Food => "Me interesa probar la comida",
            OpinionType::Location => "La ubicación me parece conveniente",
            OpinionType::Recommendation => "Me lo recomendaron",
            OpinionType::Schedule => "El horario se ajusta a mis necesidades",
            OpinionType::View => "Me gusta la vista del lugar",
        }
    }
}

impl std::fmt::Display for OpinionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Download {
    pub id: DownloadId,
    pub download_count: u32,
    pub origin: DownloadOrigin,
    pub opinion: OpinionType,
    pub owner_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Download {
    pub fn new(origin: DownloadOrigin, opinion: OpinionType, owner_id: UserId) -> Self {
        let now = Utc::now();
        Self {
            id: DownloadId::new(),
            download_count: 1,
            origin,
            opinion,
            owner_id,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn increment(&mut self) -> u32 {
        self.download_count += 1;
        self.updated_at = Utc::now();
        self.download_count
    }

    pub fn update_opinion(&mut self, opinion: OpinionType) {
        self.opinion = opinion;
        self.updated_at = Utc::now();
    }

    pub fn update_origin(&mut self, origin: DownloadOrigin) {
        self.origin = origin;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn download_starts_at_one_and_increments() {
        let mut download =
            Download::new(DownloadOrigin::National, OpinionType::Food, UserId::new());
        assert_eq!(download.download_count, 1);
        assert_eq!(download.increment(), 2);
        download.update_opinion(OpinionType::View);
        assert_eq!(download.opinion.label(), "La vista");
    }
}
