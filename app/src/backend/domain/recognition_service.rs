use anyhow::{Context, Result};
use log::info;
use std::path::Path;
use std::sync::Arc;

use crate::backend::api::AiApi;
use shared::RecognitionResponse;

// Used when the capture path has no usable file name
const FALLBACK_FILE_NAME: &str = "photo.jpg";

/// Service for the camera image-recognition feature
#[derive(Clone)]
pub struct RecognitionService {
    api: Arc<dyn AiApi>,
}

impl RecognitionService {
    /// Create a new RecognitionService
    pub fn new(api: Arc<dyn AiApi>) -> Self {
        Self { api }
    }

    /// Upload a captured image and return what the AI sees in it.
    ///
    /// The gateway's result is forwarded unchanged.
    pub async fn recognize(&self, path: &Path) -> Result<RecognitionResponse> {
        let image = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read captured image: {}", path.display()))?;

        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(FALLBACK_FILE_NAME);

        info!("Recognizing image: {}", file_name);

        let response = self.api.recognize_image(image, file_name).await?;

        info!(
            "Recognized \"{}\" (confidence {:.2})",
            response.label, response.confidence
        );

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::api::mock::MockAiApi;
    use std::io::Write;

    #[tokio::test]
    async fn test_recognize_uploads_file_and_forwards_result() {
        let api = Arc::new(MockAiApi::new());
        let service = RecognitionService::new(api.clone());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bug.png");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"not really a png").unwrap();

        let response = service.recognize(&path).await.unwrap();
        assert_eq!(response.label, "ladybug");

        let uploads = api.recognition_uploads.lock().unwrap();
        assert_eq!(uploads.as_slice(), ["bug.png"]);
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let api = Arc::new(MockAiApi::new());
        let service = RecognitionService::new(api.clone());

        let result = service.recognize(Path::new("/nonexistent/photo.jpg")).await;
        assert!(result.is_err());

        // The gateway was never called
        assert!(api.recognition_uploads.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_gateway_failure_is_forwarded() {
        let api = Arc::new(MockAiApi::failing());
        let service = RecognitionService::new(api);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bug.jpg");
        std::fs::write(&path, b"bytes").unwrap();

        assert!(service.recognize(&path).await.is_err());
    }
}
