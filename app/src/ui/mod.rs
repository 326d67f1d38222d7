//! # Screen State Holders
//!
//! One state holder per screen. Each holds the latest renderable state
//! of its screen, invokes a use case on a user action, and maps the
//! outcome into a state variant. Holders are single-writer (`&mut
//! self` actions) and the latest completed call wins.
//!
//! Failures never surface raw causes to the child: every screen maps
//! any failure to one fixed, friendly message.

pub mod camera;
pub mod dialogue;
pub mod home;
pub mod profile;
pub mod story;

pub use camera::{CameraScreen, CameraUiState};
pub use dialogue::DialogueScreen;
pub use home::{HomeScreen, HomeUiState};
pub use profile::{ProfileScreen, ProfileUiState};
pub use story::{StoryScreen, StoryUiState};
