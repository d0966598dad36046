// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Visit survey use cases. A client answers at most one survey per
//! restaurant; completeness is computed from the stored answers.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::error::DomainError;
use crate::domain::repository::{ClientRepository, RestaurantRepository, SurveyRepository};
use crate::domain::restaurant::RestaurantId;
use crate::domain::survey::{Survey, SurveyId, SURVEY_QUESTION_COUNT};
use crate::domain::user::UserId;

#[derive(Debug, Clone, Deserialize)]
pub struct SubmitSurveyRequest {
    pub client_id: UserId,
    pub restaurant_id: RestaurantId,
    pub answers: [Option<String>; SURVEY_QUESTION_COUNT],
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmitSurveyResult {
    pub survey_id: SurveyId,
    pub is_complete: bool,
    pub completion_percentage: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SurveyStats {
    pub total: usize,
    pub completed: usize,
    pub completion_rate: f64,
}

pub struct SurveyService {
    surveys: Arc<dyn SurveyRepository>,
    clients: Arc<dyn ClientRepository>,
    restaurants: Arc<dyn RestaurantRepository>,
}

impl SurveyService {
    pub fn new(
        surveys: Arc<dyn SurveyRepository>,
        clients: Arc<dyn ClientRepository>,
        restaurants: Arc<dyn RestaurantRepository>,
    ) -> Self {
        Self { surveys, clients, restaurants }
    }

    pub async fn submit(
        &self,
        request: SubmitSurveyRequest,
    ) -> Result<SubmitSurveyResult, DomainError> {
        self.clients
            .find_by_user(request.client_id)
            .await?
            .ok_or_else(|| DomainError::client_not_found(request.client_id))?;

        if self
            .restaurants
            .find_by_id(request.restaurant_id)
            .await?
            .is_none()
        {
            return Err(DomainError::restaurant_not_found(request.restaurant_id));
        }

        if self
            .surveys
            .exists_by_client_and_restaurant(request.client_id, request.restaurant_id)
            .await?
        {
            return Err(DomainError::survey_already_submitted());
        }

        let survey = Survey::new(request.client_id, request.restaurant_id, request.answers);
        self.surveys.save(&survey).await?;

        info!(survey_id = %survey.id, client_id = %survey.client_id, "survey submitted");
        Ok(SubmitSurveyResult {
            survey_id: survey.id,
            is_complete: survey.is_complete(),
            completion_percentage: survey.completion_percentage(),
        })
    }

    pub async fn client_surveys(&self, client_id: UserId) -> Result<Vec<Survey>, DomainError> {
        Ok(self.surveys.find_by_client(client_id).await?)
    }

    pub async fn restaurant_surveys(
        &self,
        restaurant_id: RestaurantId,
    ) -> Result<Vec<Survey>, DomainError> {
        Ok(self.surveys.find_by_restaurant(restaurant_id).await?)
    }

    pub async fn stats(&self) -> Result<SurveyStats, DomainError> {
        let total = self.surveys.count().await?;
        let completed = self.surveys.count_completed().await?;
        let completion_rate = if total > 0 {
            (completed as f64 / total as f64) * 100.0
        } else {
            0.0
        };
        Ok(SurveyStats { total, completed, completion_rate })
    }
}
