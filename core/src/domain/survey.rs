// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Visit survey: up to five optional free-text answers from a client about
//! a restaurant. One survey per (client, restaurant) pair; completeness is
//! derived from the answers, never stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::restaurant::RestaurantId;
use crate::domain::user::UserId;

pub const SURVEY_QUESTION_COUNT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SurveyId(pub Uuid);

impl SurveyId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for SurveyId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SurveyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Survey {
    pub id: SurveyId,
    pub client_id: UserId,
    pub restaurant_id: RestaurantId,
    /// Answers in question order; blank submissions are stored as `None`.
    pub answers: [Option<String>; SURVEY_QUESTION_COUNT],
    pub created_at: DateTime<Utc>,
}

impl Survey {
    pub fn new(
        client_id: UserId,
        restaurant_id: RestaurantId,
        answers: [Option<String>; SURVEY_QUESTION_COUNT],
    ) -> Self {
        let answers = answers.map(|answer| {
            answer.and_then(|a| {
                let trimmed = a.trim().to_string();
                (!trimmed.is_empty()).then_some(trimmed)
            })
        });
        Self {
            id: SurveyId::new(),
            client_id,
            restaurant_id,
            answers,
            created_at: Utc::now(),
        }
    }

    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_some()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.answered_count() == SURVEY_QUESTION_COUNT
    }

    pub fn completion_percentage(&self) -> f64 {
        (self.answered_count() as f64 / SURVEY_QUESTION_COUNT as f64) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completeness_is_derived_from_answers() {
        let survey = Survey::new(
            UserId::new(),
            RestaurantId::new(),
            [
                Some("Excelente".into()),
                Some("Muy bueno".into()),
                None,
                Some("  ".into()),
                None,
            ],
        );
        assert_eq!(survey.answered_count(), 2);
        assert!(!survey.is_complete());
        assert_eq!(survey.completion_percentage(), 40.0);
    }

    #[test]
    fn all_answers_make_a_complete_survey() {
        let survey = Survey::new(
            UserId::new(),
            RestaurantId::new(),
            std::array::from_fn(|i| Some(format!("respuesta {i}"))),
        );
        assert!(survey.is_complete());
        assert_eq!(survey.completion_percentage(), 100.0);
    }
}
