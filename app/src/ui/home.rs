use log::warn;

use crate::backend::domain::{LearningStatsService, ProfileService};

/// Fixed message shown when the home screen fails to load
pub const HOME_ERROR_MESSAGE: &str = "We couldn't wake up StoryPal. Please try again!";

// Story themes featured on the home screen
const SUGGESTED_THEMES: &[&str] = &[
    "Space adventure",
    "Under the sea",
    "Magical forest",
    "Dinosaur days",
];

/// Renderable state of the home screen
#[derive(Debug, Clone, PartialEq)]
pub enum HomeUiState {
    Loading,
    Ready {
        display_name: String,
        stories_completed: u32,
        streak_days: u32,
        suggested_themes: Vec<String>,
    },
    Error(String),
}

/// State holder for the home screen
pub struct HomeScreen {
    profiles: ProfileService,
    stats: LearningStatsService,
    state: HomeUiState,
}

impl HomeScreen {
    pub fn new(profiles: ProfileService, stats: LearningStatsService) -> Self {
        Self {
            profiles,
            stats,
            state: HomeUiState::Loading,
        }
    }

    /// Latest renderable state
    pub fn state(&self) -> &HomeUiState {
        &self.state
    }

    /// Load the greeting and headline numbers
    pub async fn load(&mut self) {
        self.state = HomeUiState::Loading;

        let loaded = self.load_content().await;
        self.state = match loaded {
            Ok(state) => state,
            Err(e) => {
                warn!("Home screen failed to load: {}", e);
                HomeUiState::Error(HOME_ERROR_MESSAGE.to_string())
            }
        };
    }

    async fn load_content(&self) -> anyhow::Result<HomeUiState> {
        let profile = self.profiles.get_or_create_default().await?;
        let stories_completed = self.stats.stories_completed().await?;
        let streak_days = self.stats.current_streak().await?;

        Ok(HomeUiState::Ready {
            display_name: profile.name,
            stories_completed,
            streak_days,
            suggested_themes: SUGGESTED_THEMES.iter().map(|s| s.to_string()).collect(),
        })
    }
}
