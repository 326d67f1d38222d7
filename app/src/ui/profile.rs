use log::warn;

use crate::backend::domain::{LearningStatsService, ProfileService};
use shared::{ChildProfile, LearningStats, UpdateProfileRequest};

/// Fixed message shown when the profile screen fails to load
pub const PROFILE_ERROR_MESSAGE: &str =
    "We couldn't open your explorer card. Please try again!";

/// Renderable state of the profile screen
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileUiState {
    Loading,
    Ready {
        profile: ChildProfile,
        stats: LearningStats,
    },
    Error(String),
}

/// State holder for the profile screen.
///
/// The statistics are four independent reads combined into one state
/// value; there is no snapshot consistency between them.
pub struct ProfileScreen {
    profiles: ProfileService,
    stats: LearningStatsService,
    state: ProfileUiState,
}

impl ProfileScreen {
    pub fn new(profiles: ProfileService, stats: LearningStatsService) -> Self {
        Self {
            profiles,
            stats,
            state: ProfileUiState::Loading,
        }
    }

    /// Latest renderable state
    pub fn state(&self) -> &ProfileUiState {
        &self.state
    }

    /// Load the profile and its learning statistics
    pub async fn load(&mut self) {
        self.state = ProfileUiState::Loading;

        self.state = match self.load_content().await {
            Ok(state) => state,
            Err(e) => {
                warn!("Profile screen failed to load: {}", e);
                ProfileUiState::Error(PROFILE_ERROR_MESSAGE.to_string())
            }
        };
    }

    /// Apply an explicit profile update, then reload
    pub async fn update(&mut self, request: UpdateProfileRequest) {
        let current = match &self.state {
            ProfileUiState::Ready { profile, .. } => profile.id.clone(),
            _ => match self.profiles.get_or_create_default().await {
                Ok(profile) => profile.id,
                Err(e) => {
                    warn!("Profile update failed: {}", e);
                    self.state = ProfileUiState::Error(PROFILE_ERROR_MESSAGE.to_string());
                    return;
                }
            },
        };

        match self.profiles.update_profile(&current, request).await {
            Ok(_) => self.load().await,
            Err(e) => {
                warn!("Profile update failed: {}", e);
                self.state = ProfileUiState::Error(PROFILE_ERROR_MESSAGE.to_string());
            }
        }
    }

    async fn load_content(&self) -> anyhow::Result<ProfileUiState> {
        let profile = self.profiles.get_or_create_default().await?;

        let stats = LearningStats {
            stories_completed: self.stats.stories_completed().await?,
            learning_days: self.stats.learning_days().await?,
            streak_days: self.stats.current_streak().await?,
            favorite_topics: self.stats.favorite_topics().await?,
            last_learning_at: self.stats.last_learning_at().await?,
        };

        Ok(ProfileUiState::Ready { profile, stats })
    }
}
