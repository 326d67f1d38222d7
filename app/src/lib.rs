//! StoryPal client library: configuration, backend services, and the
//! per-screen state holders.

pub mod backend;
pub mod config;
pub mod ui;

use anyhow::Result;
use log::info;

use crate::backend::{initialize_backend, AppState};
use crate::config::AppConfig;
use crate::ui::{CameraScreen, DialogueScreen, HomeScreen, ProfileScreen, StoryScreen};

/// All screen state holders of the application
pub struct Screens {
    pub home: HomeScreen,
    pub camera: CameraScreen,
    pub dialogue: DialogueScreen,
    pub story: StoryScreen,
    pub profile: ProfileScreen,
}

/// Construct the screen state holders over an initialized backend
pub fn build_screens(state: &AppState) -> Screens {
    Screens {
        home: HomeScreen::new(state.profile_service.clone(), state.stats_service.clone()),
        camera: CameraScreen::new(state.recognition_service.clone()),
        dialogue: DialogueScreen::new(state.dialogue_service.clone()),
        story: StoryScreen::new(state.story_service.clone(), state.profile_service.clone()),
        profile: ProfileScreen::new(state.profile_service.clone(), state.stats_service.clone()),
    }
}

/// Boot the application: load configuration, initialize the backend,
/// and bring up the home screen.
///
/// The rendering shell drives the returned screens; headless runs stop
/// after the home screen has loaded.
pub async fn run() -> Result<Screens> {
    let config = AppConfig::load()?;
    info!("🚀 Starting StoryPal (API: {})", config.api_base_url);

    let app_state = initialize_backend(&config).await?;
    let mut screens = build_screens(&app_state);

    screens.home.load().await;
    info!("✅ StoryPal ready");

    Ok(screens)
}
