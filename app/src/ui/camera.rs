use log::warn;
use std::path::Path;

use crate::backend::domain::RecognitionService;
use shared::RecognitionResponse;

/// Fixed message shown when recognition fails for any reason
pub const CAMERA_ERROR_MESSAGE: &str = "Hmm, I couldn't tell what that is. Try another photo!";

/// Renderable state of the camera screen
#[derive(Debug, Clone, PartialEq)]
pub enum CameraUiState {
    /// Viewfinder is up, waiting for a capture
    Capturing,
    /// A capture is being uploaded and analyzed
    Recognizing,
    RecognitionSuccess(RecognitionResponse),
    Error(String),
}

/// State holder for the camera screen
pub struct CameraScreen {
    recognition: RecognitionService,
    state: CameraUiState,
}

impl CameraScreen {
    pub fn new(recognition: RecognitionService) -> Self {
        Self {
            recognition,
            state: CameraUiState::Capturing,
        }
    }

    /// Latest renderable state
    pub fn state(&self) -> &CameraUiState {
        &self.state
    }

    /// Recognize a captured image file
    pub async fn recognize(&mut self, path: &Path) {
        self.state = CameraUiState::Recognizing;

        self.state = match self.recognition.recognize(path).await {
            Ok(response) => CameraUiState::RecognitionSuccess(response),
            Err(e) => {
                warn!("Image recognition failed: {}", e);
                CameraUiState::Error(CAMERA_ERROR_MESSAGE.to_string())
            }
        };
    }

    /// Return to the viewfinder
    pub fn reset(&mut self) {
        self.state = CameraUiState::Capturing;
    }
}
