//! # Backend Module
//!
//! Contains all non-UI logic for the StoryPal client.
//!
//! This module serves as the orchestration layer that brings together:
//! - **Api**: the remote AI gateway (story generation, dialogue chat,
//!   image recognition)
//! - **Domain**: use-case services
//! - **Storage**: the local SQLite cache
//!
//! The backend is UI-agnostic: the screen state holders in `crate::ui`
//! are its only consumer today, but nothing here depends on them.

pub mod api;
pub mod domain;
pub mod storage;

use anyhow::Result;
use log::info;
use std::sync::Arc;

use crate::backend::api::{AiApi, HttpAiClient};
use crate::backend::domain::{
    DialogueService, LearningStatsService, ProfileService, RecognitionService, StoryService,
};
use crate::backend::storage::{DbConnection, DialogueRepository, ProfileRepository};
use crate::config::AppConfig;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub profile_service: ProfileService,
    pub story_service: StoryService,
    pub dialogue_service: DialogueService,
    pub recognition_service: RecognitionService,
    pub stats_service: LearningStatsService,
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up local cache database");
    let db = DbConnection::init(&config.data_dir).await?;

    info!("Setting up remote AI gateway");
    let api: Arc<dyn AiApi> = Arc::new(HttpAiClient::new(
        config.api_base_url.clone(),
        config.api_key.clone(),
    ));

    Ok(build_app_state(api, db))
}

/// Wire the services over a gateway and an open database connection
fn build_app_state(api: Arc<dyn AiApi>, db: DbConnection) -> AppState {
    let dialogue_storage = Arc::new(DialogueRepository::new(db.clone()));
    let profile_storage = Arc::new(ProfileRepository::new(db));

    info!("Setting up domain services");
    AppState {
        profile_service: ProfileService::new(profile_storage.clone()),
        story_service: StoryService::new(api.clone(), profile_storage.clone()),
        dialogue_service: DialogueService::new(api.clone(), dialogue_storage.clone()),
        recognition_service: RecognitionService::new(api),
        stats_service: LearningStatsService::new(dialogue_storage, profile_storage),
    }
}

/// Backend over an in-memory database and a scripted gateway
#[cfg(test)]
pub async fn initialize_test_backend(api: Arc<dyn AiApi>) -> Result<AppState> {
    let db = DbConnection::init_test().await?;
    Ok(build_app_state(api, db))
}
