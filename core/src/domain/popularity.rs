// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Popularity Scoring Service
//!
//! Deterministic, persistence-free scoring of a restaurant's engagement
//! signals. Every function is pure: callers pass `now` explicitly, so the
//! same inputs always produce the same outputs.
//!
//! The ranking score combines the raw like count with three factors:
//!
//! - a 1.5× boost for restaurants up to 60 days old
//! - `1 + 0.1·photos` for client photo engagement
//! - an age penalty decaying linearly after 180 days, floored at 0.5
//!
//! rounded to two decimals.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Featuring threshold: at least this many likes counts as "popular".
pub const POPULAR_THRESHOLD: u32 = 10;
/// Likes needed to rank as trending.
pub const TRENDING_THRESHOLD: u32 = 50;

const MILESTONES: [(u32, &str); 7] = [
    (10, "Popular"),
    (30, "Muy Popular"),
    (50, "Trending"),
    (100, "Top 100"),
    (250, "Top 50"),
    (500, "Top 10"),
    (1000, "Leyenda"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PopularityLevel {
    Low,
    Medium,
    High,
    Trending,
}

impl PopularityLevel {
    pub fn label(&self) -> &'static str {
        match self {
            PopularityLevel::Low => "Nuevo",
            PopularityLevel::Medium => "Popular",
            PopularityLevel::High => "Muy Popular",
            PopularityLevel::Trending => "🔥 Trending",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            PopularityLevel::Low => "#9CA3AF",
            PopularityLevel::Medium => "#3B82F6",
            PopularityLevel::High => "#8B5CF6",
            PopularityLevel::Trending => "#EF4444",
        }
    }
}

/// The next like-count milestone ahead of a restaurant, or the terminal
/// marker once every milestone has been passed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Milestone {
    pub likes: u32,
    pub label: &'static str,
    pub remaining: u32,
}

/// Growth report for an owner's dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct LikesInsights {
    pub current: u32,
    pub previous: u32,
    pub growth: i64,
    pub growth_percentage: String,
    pub is_growing: bool,
    pub level: PopularityLevel,
    pub label: &'static str,
    pub color: &'static str,
    pub is_popular: bool,
    pub is_trending: bool,
    pub next_milestone: Milestone,
}

/// Stateless domain service; all functions are associated.
pub struct PopularityService;

impl PopularityService {
    pub fn is_popular(likes_count: u32) -> bool {
        likes_count >= POPULAR_THRESHOLD
    }

    pub fn is_trending(likes_count: u32) -> bool {
        likes_count >= TRENDING_THRESHOLD
    }

    pub fn popularity_level(likes_count: u32) -> PopularityLevel {
        match likes_count {
            0..=9 => PopularityLevel::Low,
            10..=29 => PopularityLevel::Medium,
            30..=49 => PopularityLevel::High,
            _ => PopularityLevel::Trending,
        }
    }

    /// Ranking score, rounded to two decimals.
    pub fn score(
        likes_count: u32,
        created_at: DateTime<Utc>,
        photos_count: u32,
        now: DateTime<Utc>,
    ) -> f64 {
        let age_days = (now - created_at).num_days();

        let new_restaurant_boost = if age_days <= 60 { 1.5 } else { 1.0 };
        let photo_boost = 1.0 + 0.1 * photos_count as f64;
        let age_penalty = if age_days > 180 {
            (1.0 - (age_days - 180) as f64 / 1000.0).max(0.5)
        } else {
            1.0
        };

        let raw = likes_count as f64 * new_restaurant_boost * photo_boost * age_penalty;
        (raw * 100.0).round() / 100.0
    }

    /// Relative popularity from 0 to 100. Without a reference maximum, the
    /// trending threshold counts as 100%.
    pub fn popularity_percentage(likes_count: u32, max_likes: Option<u32>) -> f64 {
        let reference = match max_likes {
            Some(max) if max > 0 => max,
            _ => TRENDING_THRESHOLD,
        };
        ((likes_count as f64 / reference as f64) * 100.0).min(100.0)
    }

    /// Whether a restaurant belongs in the featured section: young with
    /// early engagement, or simply popular.
    pub fn should_feature(likes_count: u32, age_days: i64) -> bool {
        if age_days <= 30 && likes_count >= 5 {
            return true;
        }
        Self::is_popular(likes_count)
    }

    /// First milestone strictly above the current count; terminal
    /// "Máximo Nivel" marker with zero remaining once all are passed.
    pub fn next_milestone(current_likes: u32) -> Milestone {
        for (likes, label) in MILESTONES {
            if likes > current_likes {
                return Milestone {
                    likes,
                    label,
                    remaining: likes - current_likes,
                };
            }
        }
        Milestone {
            likes: current_likes,
            label: "Máximo Nivel",
            remaining: 0,
        }
    }

    pub fn insights(likes_count: u32, previous_likes_count: u32) -> LikesInsights {
        let growth = likes_count as i64 - previous_likes_count as i64;
        let growth_percentage = if previous_likes_count > 0 {
            format!("{:.1}%", (growth as f64 / previous_likes_count as f64) * 100.0)
        } else {
            "0%".to_string()
        };
        let level = Self::popularity_level(likes_count);

        LikesInsights {
            current: likes_count,
            previous: previous_likes_count,
            growth,
            growth_percentage,
            is_growing: growth > 0,
            level,
            label: level.label(),
            color: level.color(),
            is_popular: Self::is_popular(likes_count),
            is_trending: Self::is_trending(likes_count),
            next_milestone: Self::next_milestone(likes_count),
        }
    }

    /// Actionable suggestions for an owner who wants more engagement.
    pub fn recommendations(
        likes_count: u32,
        photos_count: u32,
        menu_downloads: u32,
    ) -> Vec<&'static str> {
        let mut recommendations = Vec::new();

        if likes_count < POPULAR_THRESHOLD {
            recommendations.push("Comparte tu restaurante en redes sociales");
            recommendations.push("Invita a tus clientes a marcar como favorito");
        }
        if photos_count < 5 {
            recommendations.push("Anima a tus clientes a subir fotos de su visita");
        }
        if (menu_downloads as f64) < likes_count as f64 * 0.5 {
            recommendations.push("Asegúrate de tener un menú atractivo y actualizado");
        }
        if (POPULAR_THRESHOLD..TRENDING_THRESHOLD).contains(&likes_count) {
            recommendations.push("Mantén tu información actualizada para seguir creciendo");
            recommendations.push("Responde a los comentarios de tus clientes");
        }

        recommendations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn zero_likes_score_zero() {
        let now = Utc::now();
        assert_eq!(PopularityService::score(0, now, 0, now), 0.0);
    }

    #[test]
    fn score_is_deterministic() {
        let now = Utc::now();
        let created = now - Duration::days(10);
        let a = PopularityService::score(20, created, 2, now);
        let b = PopularityService::score(20, created, 2, now);
        assert_eq!(a, b);
    }

    #[test]
    fn young_restaurant_gets_new_boost_and_photo_boost() {
        let now = Utc::now();
        let created = now - Duration::days(10);
        // 20 * 1.5 * 1.2 * 1.0
        assert_eq!(PopularityService::score(20, created, 2, now), 36.0);
    }

    #[test]
    fn old_restaurant_pays_age_penalty() {
        let now = Utc::now();
        let created = now - Duration::days(380);
        // 10 * 1.0 * 1.0 * (1 - 200/1000)
        assert_eq!(PopularityService::score(10, created, 0, now), 8.0);
    }

    #[test]
    fn age_penalty_floors_at_half() {
        let now = Utc::now();
        let created = now - Duration::days(2000);
        assert_eq!(PopularityService::score(10, created, 0, now), 5.0);
    }

    #[test]
    fn levels_follow_thresholds() {
        assert_eq!(PopularityService::popularity_level(0), PopularityLevel::Low);
        assert_eq!(PopularityService::popularity_level(9), PopularityLevel::Low);
        assert_eq!(PopularityService::popularity_level(10), PopularityLevel::Medium);
        assert_eq!(PopularityService::popularity_level(29), PopularityLevel::Medium);
        assert_eq!(PopularityService::popularity_level(30), PopularityLevel::High);
        assert_eq!(PopularityService::popularity_level(49), PopularityLevel::High);
        assert_eq!(PopularityService::popularity_level(50), PopularityLevel::Trending);
        assert!(!PopularityService::is_popular(9));
        assert!(PopularityService::is_popular(10));
        assert!(PopularityService::is_trending(50));
    }

    #[test]
    fn next_milestone_is_strictly_greater() {
        let m = PopularityService::next_milestone(0);
        assert_eq!((m.likes, m.label, m.remaining), (10, "Popular", 10));

        let m = PopularityService::next_milestone(10);
        assert_eq!((m.likes, m.label, m.remaining), (30, "Muy Popular", 20));

        let m = PopularityService::next_milestone(999);
        assert_eq!((m.likes, m.label, m.remaining), (1000, "Leyenda", 1));
    }

    #[test]
    fn milestone_terminal_marker_after_the_last() {
        let m = PopularityService::next_milestone(1000);
        assert_eq!(m.label, "Máximo Nivel");
        assert_eq!(m.remaining, 0);
        assert_eq!(m.likes, 1000);

        let m = PopularityService::next_milestone(4321);
        assert_eq!(m.label, "Máximo Nivel");
        assert_eq!(m.remaining, 0);
    }

    #[test]
    fn featuring_rules() {
        assert!(PopularityService::should_feature(5, 10));
        assert!(!PopularityService::should_feature(4, 10));
        assert!(PopularityService::should_feature(10, 400));
        assert!(!PopularityService::should_feature(9, 40));
    }

    #[test]
    fn percentage_caps_at_hundred() {
        assert_eq!(PopularityService::popularity_percentage(25, None), 50.0);
        assert_eq!(PopularityService::popularity_percentage(80, None), 100.0);
        assert_eq!(PopularityService::popularity_percentage(25, Some(100)), 25.0);
        assert_eq!(PopularityService::popularity_percentage(25, Some(0)), 50.0);
    }

    #[test]
    fn insights_report_growth() {
        let insights = PopularityService::insights(30, 20);
        assert_eq!(insights.growth, 10);
        assert_eq!(insights.growth_percentage, "50.0%");
        assert!(insights.is_growing);
        assert_eq!(insights.level, PopularityLevel::High);
        assert_eq!(insights.next_milestone.likes, 50);

        let flat = PopularityService::insights(5, 0);
        assert_eq!(flat.growth_percentage, "0%");
    }

    #[test]
    fn recommendations_match_engagement_gaps() {
        let recs = PopularityService::recommendations(3, 1, 0);
        assert!(recs.contains(&"Comparte tu restaurante en redes sociales"));
        assert!(recs.contains(&"Anima a tus clientes a subir fotos de su visita"));

        let growing = PopularityService::recommendations(20, 10, 15);
        assert!(growing.contains(&"Responde a los comentarios de tus clientes"));
        assert!(!growing.contains(&"Comparte tu restaurante en redes sociales"));
    }
}
