use anyhow::{bail, Result};
use chrono::Utc;
use log::{info, warn};
use std::collections::HashMap;
use std::sync::Arc;

use crate::backend::storage::traits::ProfileStorage;
use shared::{ChildProfile, CreateProfileRequest, ProfileResponse, UpdateProfileRequest};

/// Youngest supported listener age
pub const MIN_AGE: u8 = 3;
/// Oldest supported listener age
pub const MAX_AGE: u8 = 12;

// Starter profile used until the family fills in their own
const DEFAULT_NAME: &str = "Explorer";
const DEFAULT_AGE: u8 = 6;
const DEFAULT_AVATAR: &str = "fox";
const DEFAULT_INTERESTS: &[&str] = &["animals", "space"];

/// Service for managing the child profile
#[derive(Clone)]
pub struct ProfileService {
    storage: Arc<dyn ProfileStorage>,
}

impl ProfileService {
    /// Create a new ProfileService
    pub fn new(storage: Arc<dyn ProfileStorage>) -> Self {
        Self { storage }
    }

    /// Get the stored profile, creating the starter profile on first use
    pub async fn get_or_create_default(&self) -> Result<ChildProfile> {
        if let Some(profile) = self.storage.get_any_profile().await? {
            return Ok(profile);
        }

        info!("No profile found, creating starter profile");

        let now = Utc::now();
        let timestamp_rfc3339 = now.to_rfc3339();
        let profile = ChildProfile {
            id: ChildProfile::generate_id(now.timestamp_millis() as u64),
            name: DEFAULT_NAME.to_string(),
            age: DEFAULT_AGE,
            avatar: DEFAULT_AVATAR.to_string(),
            interests: DEFAULT_INTERESTS.iter().map(|s| s.to_string()).collect(),
            learning_progress: HashMap::new(),
            created_at: timestamp_rfc3339.clone(),
            updated_at: timestamp_rfc3339,
        };

        self.storage.store_profile(&profile).await?;
        Ok(profile)
    }

    /// Get a profile by ID
    pub async fn get_profile(&self, profile_id: &str) -> Result<Option<ChildProfile>> {
        let profile = self.storage.get_profile(profile_id).await?;

        if profile.is_none() {
            warn!("Profile not found: {}", profile_id);
        }

        Ok(profile)
    }

    /// Create a new profile
    pub async fn create_profile(&self, request: CreateProfileRequest) -> Result<ProfileResponse> {
        info!("Creating profile: name={}, age={}", request.name, request.age);

        Self::validate_name(&request.name)?;
        Self::validate_age(request.age)?;

        let now = Utc::now();
        let timestamp_rfc3339 = now.to_rfc3339();
        let profile = ChildProfile {
            id: ChildProfile::generate_id(now.timestamp_millis() as u64),
            name: request.name.trim().to_string(),
            age: request.age,
            avatar: request.avatar.unwrap_or_else(|| DEFAULT_AVATAR.to_string()),
            interests: request.interests,
            learning_progress: HashMap::new(),
            created_at: timestamp_rfc3339.clone(),
            updated_at: timestamp_rfc3339,
        };

        self.storage.store_profile(&profile).await?;

        info!("Created profile: {} with ID: {}", profile.name, profile.id);

        Ok(ProfileResponse {
            profile,
            success_message: "Profile created successfully".to_string(),
        })
    }

    /// Update an existing profile
    pub async fn update_profile(
        &self,
        profile_id: &str,
        request: UpdateProfileRequest,
    ) -> Result<ProfileResponse> {
        info!("Updating profile: {}", profile_id);

        let mut profile = self
            .storage
            .get_profile(profile_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Profile not found: {}", profile_id))?;

        if let Some(name) = request.name {
            Self::validate_name(&name)?;
            profile.name = name.trim().to_string();
        }
        if let Some(age) = request.age {
            Self::validate_age(age)?;
            profile.age = age;
        }
        if let Some(avatar) = request.avatar {
            profile.avatar = avatar;
        }
        if let Some(interests) = request.interests {
            profile.interests = interests;
        }

        profile.updated_at = Utc::now().to_rfc3339();
        self.storage.update_profile(&profile).await?;

        info!("Updated profile: {} with ID: {}", profile.name, profile.id);

        Ok(ProfileResponse {
            profile,
            success_message: "Profile updated successfully".to_string(),
        })
    }

    /// Bump the completed-story counter for a topic
    pub async fn record_story_completed(
        &self,
        profile_id: &str,
        topic: &str,
    ) -> Result<ChildProfile> {
        info!("Recording completed story for topic: {}", topic);

        let mut profile = self
            .storage
            .get_profile(profile_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Profile not found: {}", profile_id))?;

        let topic = topic.trim().to_lowercase();
        *profile.learning_progress.entry(topic).or_insert(0) += 1;
        profile.updated_at = Utc::now().to_rfc3339();

        self.storage.update_profile(&profile).await?;
        Ok(profile)
    }

    fn validate_name(name: &str) -> Result<()> {
        if name.trim().is_empty() {
            bail!("Profile name cannot be empty");
        }
        Ok(())
    }

    fn validate_age(age: u8) -> Result<()> {
        if !(MIN_AGE..=MAX_AGE).contains(&age) {
            bail!("Age must be between {} and {}", MIN_AGE, MAX_AGE);
        }
        Ok(())
    }
}
