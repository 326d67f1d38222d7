//! Reqwest-based implementation of the remote AI gateway.

use async_trait::async_trait;
use log::{info, warn};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::backend::api::{AiApi, ApiError};
use shared::{
    ChatRequest, ChatResponse, GenerateStoryRequest, GenerateStoryResponse, RecognitionResponse,
};

// The remote service answers slowly when generating long stories
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// HTTP client for the remote AI service.
///
/// Holds one `reqwest::Client` reused across calls. Every request
/// carries the configured bearer token.
#[derive(Clone)]
pub struct HttpAiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpAiClient {
    /// Create a new client for the given base URL and bearer token
    pub fn new(base_url: String, api_key: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to construct HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Convert reqwest transport errors into [`ApiError`]
    fn convert_error(err: reqwest::Error) -> ApiError {
        if err.is_timeout() {
            ApiError::Timeout
        } else {
            ApiError::Connection(err.to_string())
        }
    }

    /// Send a prepared request and decode a JSON response body
    async fn execute<T: DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = builder
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(Self::convert_error)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!("Remote AI service returned status {}", status);
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl AiApi for HttpAiClient {
    async fn generate_story(
        &self,
        request: &GenerateStoryRequest,
    ) -> Result<GenerateStoryResponse, ApiError> {
        info!("Requesting story generation (theme: {:?})", request.theme);

        let builder = self
            .client
            .post(self.endpoint("/v1/stories/generate"))
            .json(request);
        self.execute(builder).await
    }

    async fn send_chat(&self, request: &ChatRequest) -> Result<ChatResponse, ApiError> {
        info!(
            "Sending chat turn for {} ({} history turns)",
            request.conversation_id,
            request.history.len()
        );

        let builder = self
            .client
            .post(self.endpoint("/v1/dialogue/chat"))
            .json(request);
        self.execute(builder).await
    }

    async fn recognize_image(
        &self,
        image: Vec<u8>,
        file_name: &str,
    ) -> Result<RecognitionResponse, ApiError> {
        info!(
            "Uploading image for recognition: {} ({} bytes)",
            file_name,
            image.len()
        );

        let part = reqwest::multipart::Part::bytes(image)
            .file_name(file_name.to_string())
            .mime_str(guess_mime(file_name))
            .map_err(|e| ApiError::Connection(e.to_string()))?;
        let form = reqwest::multipart::Form::new().part("image", part);

        let builder = self
            .client
            .post(self.endpoint("/v1/recognition/image"))
            .multipart(form);
        self.execute(builder).await
    }
}

/// Pick a MIME type from the uploaded file's extension
fn guess_mime(file_name: &str) -> &'static str {
    let extension = file_name.rsplit('.').next().unwrap_or_default();
    match extension.to_ascii_lowercase().as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "gif" => "image/gif",
        _ => "application/octet-stream",
    }
}
