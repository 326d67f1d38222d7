use anyhow::Result;
use log::info;
use std::sync::Arc;

use crate::backend::api::AiApi;
use crate::backend::storage::traits::ProfileStorage;
use shared::{GenerateStoryRequest, Story};

// Substituted when no profile exists yet; story generation never
// creates a profile on its own
const FALLBACK_AGE: u8 = 6;
const FALLBACK_INTERESTS: &[&str] = &["animals", "space"];

/// Service for generating stories through the remote AI service
#[derive(Clone)]
pub struct StoryService {
    api: Arc<dyn AiApi>,
    profiles: Arc<dyn ProfileStorage>,
}

impl StoryService {
    /// Create a new StoryService
    pub fn new(api: Arc<dyn AiApi>, profiles: Arc<dyn ProfileStorage>) -> Self {
        Self { api, profiles }
    }

    /// Generate a story, steering it with the stored profile when one
    /// exists and with defaults otherwise.
    ///
    /// The gateway's result is forwarded unchanged; there is no retry.
    pub async fn generate_story(&self, theme: Option<String>) -> Result<Story> {
        let profile = self.profiles.get_any_profile().await?;

        let request = match &profile {
            Some(profile) => GenerateStoryRequest {
                age: profile.age,
                interests: profile.interests.clone(),
                theme,
            },
            None => GenerateStoryRequest {
                age: FALLBACK_AGE,
                interests: FALLBACK_INTERESTS.iter().map(|s| s.to_string()).collect(),
                theme,
            },
        };

        info!(
            "Generating story: age={}, interests={:?}, theme={:?}",
            request.age, request.interests, request.theme
        );

        let response = self.api.generate_story(&request).await?;

        info!(
            "Generated story: {} ({} min)",
            response.story.title, response.story.duration_minutes
        );

        Ok(response.story)
    }
}
