use anyhow::Result;
use chrono::{Duration, NaiveDate, Utc};
use log::warn;
use std::sync::Arc;

use crate::backend::storage::traits::{DialogueStorage, ProfileStorage};

// How many favorite topics the profile screen shows
const FAVORITE_TOPIC_LIMIT: usize = 3;

/// Service computing learning statistics.
///
/// Every getter recomputes its number from repository-reported counts;
/// nothing is updated incrementally and the getters are independent
/// reads with no snapshot consistency.
#[derive(Clone)]
pub struct LearningStatsService {
    dialogue: Arc<dyn DialogueStorage>,
    profiles: Arc<dyn ProfileStorage>,
}

impl LearningStatsService {
    /// Create a new LearningStatsService
    pub fn new(dialogue: Arc<dyn DialogueStorage>, profiles: Arc<dyn ProfileStorage>) -> Self {
        Self { dialogue, profiles }
    }

    /// Total stories completed, summed over the profile's per-topic counters
    pub async fn stories_completed(&self) -> Result<u32> {
        let profile = self.profiles.get_any_profile().await?;
        Ok(profile
            .map(|p| p.learning_progress.values().sum())
            .unwrap_or(0))
    }

    /// Number of distinct days with at least one dialogue message
    pub async fn learning_days(&self) -> Result<u32> {
        let days = self.dialogue.list_active_days().await?;
        Ok(days.len() as u32)
    }

    /// Consecutive-day streak ending today or yesterday
    pub async fn current_streak(&self) -> Result<u32> {
        let days = self.dialogue.list_active_days().await?;
        let parsed: Vec<NaiveDate> = days
            .iter()
            .filter_map(|day| match NaiveDate::parse_from_str(day, "%Y-%m-%d") {
                Ok(date) => Some(date),
                Err(_) => {
                    warn!("Skipping malformed active day in cache: {}", day);
                    None
                }
            })
            .collect();

        Ok(streak_from_days(&parsed, Utc::now().date_naive()))
    }

    /// Topics with the most completed stories, most popular first
    pub async fn favorite_topics(&self) -> Result<Vec<String>> {
        let profile = self.profiles.get_any_profile().await?;
        let Some(profile) = profile else {
            return Ok(Vec::new());
        };

        let mut topics: Vec<(String, u32)> = profile.learning_progress.into_iter().collect();
        // Ties resolve alphabetically so the list is stable across loads
        topics.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        Ok(topics
            .into_iter()
            .take(FAVORITE_TOPIC_LIMIT)
            .map(|(topic, _)| topic)
            .collect())
    }

    /// Timestamp of the most recent learning activity, if any
    pub async fn last_learning_at(&self) -> Result<Option<String>> {
        self.dialogue.latest_message_timestamp().await
    }
}

/// Count the consecutive-day run ending today or yesterday.
///
/// `days` must be sorted ascending. A streak survives until a full
/// calendar day passes with no activity.
fn streak_from_days(days: &[NaiveDate], today: NaiveDate) -> u32 {
    let Some(&last) = days.last() else {
        return 0;
    };

    let yesterday = today - Duration::days(1);
    if last != today && last != yesterday {
        return 0;
    }

    let mut streak = 1;
    let mut expected = last - Duration::days(1);
    for &day in days.iter().rev().skip(1) {
        if day != expected {
            break;
        }
        streak += 1;
        expected = expected - Duration::days(1);
    }

    streak
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::sqlite::connection::DbConnection;
    use crate::backend::storage::sqlite::repositories::{DialogueRepository, ProfileRepository};
    use crate::backend::storage::traits::{DialogueStorage, ProfileStorage};
    use shared::{ChildProfile, Message, MessageRole};
    use std::collections::HashMap;

    fn date(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_streak_empty_days() {
        assert_eq!(streak_from_days(&[], date("2024-03-10")), 0);
    }

    #[test]
    fn test_streak_broken_by_missed_day() {
        let days = [date("2024-03-06"), date("2024-03-07")];
        // Two full days without activity
        assert_eq!(streak_from_days(&days, date("2024-03-10")), 0);
    }

    #[test]
    fn test_streak_ending_today() {
        let days = [date("2024-03-08"), date("2024-03-09"), date("2024-03-10")];
        assert_eq!(streak_from_days(&days, date("2024-03-10")), 3);
    }

    #[test]
    fn test_streak_survives_until_a_day_is_missed() {
        let days = [date("2024-03-08"), date("2024-03-09")];
        // Activity ended yesterday; the streak is still alive
        assert_eq!(streak_from_days(&days, date("2024-03-10")), 2);
    }

    #[test]
    fn test_streak_counts_only_the_latest_run() {
        let days = [
            date("2024-03-01"),
            date("2024-03-02"),
            date("2024-03-09"),
            date("2024-03-10"),
        ];
        assert_eq!(streak_from_days(&days, date("2024-03-10")), 2);
    }

    async fn setup_test() -> (LearningStatsService, Arc<DialogueRepository>, Arc<ProfileRepository>)
    {
        let db = DbConnection::init_test()
            .await
            .expect("Failed to create test database");
        let dialogue = Arc::new(DialogueRepository::new(db.clone()));
        let profiles = Arc::new(ProfileRepository::new(db));
        (
            LearningStatsService::new(dialogue.clone(), profiles.clone()),
            dialogue,
            profiles,
        )
    }

    fn progress_profile(progress: &[(&str, u32)]) -> ChildProfile {
        ChildProfile {
            id: "profile::1".to_string(),
            name: "Maya".to_string(),
            age: 6,
            avatar: "fox".to_string(),
            interests: vec![],
            learning_progress: progress
                .iter()
                .map(|(topic, count)| (topic.to_string(), *count))
                .collect(),
            created_at: "2024-03-01T09:00:00+00:00".to_string(),
            updated_at: "2024-03-01T09:00:00+00:00".to_string(),
        }
    }

    #[tokio::test]
    async fn test_stories_completed_sums_topic_counters() {
        let (service, _dialogue, profiles) = setup_test().await;

        assert_eq!(service.stories_completed().await.unwrap(), 0);

        profiles
            .store_profile(&progress_profile(&[("space", 3), ("bees", 2)]))
            .await
            .unwrap();
        assert_eq!(service.stories_completed().await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_favorite_topics_ordered_by_count_then_name() {
        let (service, _dialogue, profiles) = setup_test().await;

        profiles
            .store_profile(&progress_profile(&[
                ("space", 2),
                ("bees", 5),
                ("volcanoes", 2),
                ("dinosaurs", 1),
            ]))
            .await
            .unwrap();

        let topics = service.favorite_topics().await.unwrap();
        assert_eq!(topics, vec!["bees", "space", "volcanoes"]);
    }

    #[tokio::test]
    async fn test_favorite_topics_empty_without_profile() {
        let (service, _dialogue, _profiles) = setup_test().await;
        assert!(service.favorite_topics().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_learning_days_counts_distinct_days() {
        let (service, dialogue, _profiles) = setup_test().await;

        for timestamp in [
            "2024-03-01T09:00:00+00:00",
            "2024-03-01T17:00:00+00:00",
            "2024-03-03T09:00:00+00:00",
        ] {
            let message = Message {
                id: Message::generate_id(),
                role: MessageRole::User,
                content: "hello".to_string(),
                timestamp: timestamp.to_string(),
                emotion: None,
                suggested_actions: None,
            };
            dialogue
                .store_message("conversation::a", &message)
                .await
                .unwrap();
        }

        assert_eq!(service.learning_days().await.unwrap(), 2);
        assert_eq!(
            service.last_learning_at().await.unwrap().as_deref(),
            Some("2024-03-03T09:00:00+00:00")
        );
    }
}
