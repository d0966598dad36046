// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Menu-download tracking: the optional "where are you from / what drew
//! you in" survey recorded when clients download menus, aggregated for
//! owner dashboards.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::download::{Download, DownloadId, DownloadOrigin, OpinionType};
use crate::domain::error::DomainError;
use crate::domain::repository::DownloadRepository;
use crate::domain::user::UserId;

#[derive(Debug, Clone, Deserialize)]
pub struct TrackDownloadRequest {
    pub owner_id: UserId,
    pub origin: DownloadOrigin,
    pub opinion: OpinionType,
}

#[derive(Debug, Clone, Serialize)]
pub struct DownloadStats {
    pub total: u32,
    pub national: u32,
    pub foreign: u32,
    pub by_opinion: Vec<(OpinionType, u32)>,
}

pub struct DownloadTrackingService {
    downloads: Arc<dyn DownloadRepository>,
}

impl DownloadTrackingService {
    pub fn new(downloads: Arc<dyn DownloadRepository>) -> Self {
        Self { downloads }
    }

    pub async fn track(&self, request: TrackDownloadRequest) -> Result<Download, DomainError> {
        let download = Download::new(request.origin, request.opinion, request.owner_id);
        self.downloads.save(&download).await?;
        Ok(download)
    }

    pub async fn update(
        &self,
        download_id: DownloadId,
        origin: Option<DownloadOrigin>,
        opinion: Option<OpinionType>,
    ) -> Result<Download, DomainError> {
        let mut download = self
            .downloads
            .find_by_id(download_id)
            .await?
            .ok_or_else(|| DomainError::download_not_found(download_id))?;

        if let Some(origin) = origin {
            download.update_origin(origin);
        }
        if let Some(opinion) = opinion {
            download.update_opinion(opinion);
        }
        self.downloads.update(&download).await?;
        Ok(download)
    }

    pub async fn downloads_by_owner(
        &self,
        owner_id: UserId,
    ) -> Result<Vec<Download>, DomainError> {
        Ok(self.downloads.find_by_owner(owner_id).await?)
    }

    pub async fn stats_for_owner(&self, owner_id: UserId) -> Result<DownloadStats, DomainError> {
        let downloads = self.downloads.find_by_owner(owner_id).await?;
        Ok(Self::aggregate(&downloads))
    }

    pub async fn global_stats(&self) -> Result<DownloadStats, DomainError> {
        let downloads = self.downloads.list_all().await?;
        Ok(Self::aggregate(&downloads))
    }

    fn aggregate(downloads: &[Download]) -> DownloadStats {
        let mut total = 0;
        let mut national = 0;
        let mut foreign = 0;
        let opinions = [
            OpinionType::Food,
            OpinionType::Location,
            OpinionType::Recommendation,
            OpinionType::Schedule,
            OpinionType::View,
        ];
        let mut by_opinion: Vec<(OpinionType, u32)> =
            opinions.iter().map(|o| (*o, 0)).collect();

        for download in downloads {
            total += download.download_count;
            match download.origin {
                DownloadOrigin::National => national += download.download_count,
                DownloadOrigin::Foreign => foreign += download.download_count,
            }
            if let Some(entry) = by_opinion.iter_mut().find(|(o, _)| *o == download.opinion) {
                entry.1 += download.download_count;
            }
        }

        DownloadStats { total, national, foreign, by_opinion }
    }
}
