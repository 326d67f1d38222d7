use log::warn;

use crate::backend::domain::{ProfileService, StoryService};
use shared::Story;

/// Fixed message shown when story generation fails
pub const STORY_ERROR_MESSAGE: &str = "The story machine is taking a nap. Try again soon!";

/// Praise shown for a correct answer
pub const FEEDBACK_CORRECT: &str = "That's right! Great listening!";

// Topic recorded when a story carries no theme metadata
const FALLBACK_TOPIC: &str = "stories";

/// Renderable state of the story screen
#[derive(Debug, Clone, PartialEq)]
pub enum StoryUiState {
    Idle,
    Generating,
    Ready(Story),
    Error(String),
}

/// State holder for the story screen
pub struct StoryScreen {
    stories: StoryService,
    profiles: ProfileService,
    state: StoryUiState,
}

impl StoryScreen {
    pub fn new(stories: StoryService, profiles: ProfileService) -> Self {
        Self {
            stories,
            profiles,
            state: StoryUiState::Idle,
        }
    }

    /// Latest renderable state
    pub fn state(&self) -> &StoryUiState {
        &self.state
    }

    /// Generate a story for an optional theme
    pub async fn generate(&mut self, theme: Option<String>) {
        self.state = StoryUiState::Generating;

        self.state = match self.stories.generate_story(theme).await {
            Ok(story) => StoryUiState::Ready(story),
            Err(e) => {
                warn!("Story generation failed: {}", e);
                StoryUiState::Error(STORY_ERROR_MESSAGE.to_string())
            }
        };
    }

    /// Record the child's answer to a comprehension question.
    ///
    /// First answer wins; answering again is a no-op.
    pub fn answer_question(&mut self, question_id: &str, selected: u32) {
        let StoryUiState::Ready(story) = &mut self.state else {
            return;
        };
        let Some(questions) = &mut story.questions else {
            return;
        };
        let Some(question) = questions.iter_mut().find(|q| q.id == question_id) else {
            return;
        };

        if question.answered {
            return;
        }

        question.answered = true;
        question.selected_answer = Some(selected);
        question.feedback = Some(if question.is_correct(selected) {
            FEEDBACK_CORRECT.to_string()
        } else {
            format!("Good try! {}", question.explanation)
        });
    }

    /// Record that the current story was finished
    pub async fn complete_story(&mut self) {
        let StoryUiState::Ready(story) = &self.state else {
            return;
        };

        let topic = story
            .metadata
            .as_ref()
            .and_then(|m| m.theme.clone())
            .unwrap_or_else(|| FALLBACK_TOPIC.to_string());

        let result = async {
            let profile = self.profiles.get_or_create_default().await?;
            self.profiles
                .record_story_completed(&profile.id, &topic)
                .await
        }
        .await;

        if let Err(e) = result {
            warn!("Failed to record completed story: {}", e);
        }
    }
}
