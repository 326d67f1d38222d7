//! Scripted mock of the remote AI gateway for tests.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::backend::api::{AiApi, ApiError};
use shared::{
    ChatRequest, ChatResponse, GenerateStoryRequest, GenerateStoryResponse, RecognitionResponse,
    Story, StoryMetadata,
};

/// Mock AI gateway returning scripted responses and recording every
/// request it receives.
pub struct MockAiApi {
    story_result: Mutex<Result<GenerateStoryResponse, ApiError>>,
    chat_result: Mutex<Result<ChatResponse, ApiError>>,
    recognition_result: Mutex<Result<RecognitionResponse, ApiError>>,
    pub story_requests: Mutex<Vec<GenerateStoryRequest>>,
    pub chat_requests: Mutex<Vec<ChatRequest>>,
    pub recognition_uploads: Mutex<Vec<String>>,
}

impl MockAiApi {
    /// Mock with a canned success scripted for every endpoint
    pub fn new() -> Self {
        Self {
            story_result: Mutex::new(Ok(GenerateStoryResponse {
                story: Self::sample_story(),
            })),
            chat_result: Mutex::new(Ok(ChatResponse {
                reply: "What a great question!".to_string(),
                emotion: Some("curious".to_string()),
                suggested_actions: None,
            })),
            recognition_result: Mutex::new(Ok(RecognitionResponse {
                label: "ladybug".to_string(),
                description: "A tiny red beetle with black spots!".to_string(),
                confidence: 0.93,
                fun_fact: None,
            })),
            story_requests: Mutex::new(Vec::new()),
            chat_requests: Mutex::new(Vec::new()),
            recognition_uploads: Mutex::new(Vec::new()),
        }
    }

    pub fn sample_story() -> Story {
        Story {
            id: "story::1702516122000".to_string(),
            title: "The Moonlit Garden".to_string(),
            content: "Once upon a time, a little fox found a garden that only grew at night..."
                .to_string(),
            duration_minutes: 4,
            questions: None,
            metadata: Some(StoryMetadata {
                theme: Some("night animals".to_string()),
                age_range: Some("4-6".to_string()),
                vocabulary: vec!["moonlit".to_string()],
            }),
        }
    }

    pub fn set_story_result(&self, result: Result<GenerateStoryResponse, ApiError>) {
        *self.story_result.lock().unwrap() = result;
    }

    pub fn set_chat_result(&self, result: Result<ChatResponse, ApiError>) {
        *self.chat_result.lock().unwrap() = result;
    }

    pub fn set_recognition_result(&self, result: Result<RecognitionResponse, ApiError>) {
        *self.recognition_result.lock().unwrap() = result;
    }

    /// Shorthand for a mock whose every endpoint fails
    pub fn failing() -> Self {
        let mock = Self::new();
        let error = ApiError::Status {
            status: 503,
            message: "service unavailable".to_string(),
        };
        mock.set_story_result(Err(error.clone()));
        mock.set_chat_result(Err(error.clone()));
        mock.set_recognition_result(Err(error));
        mock
    }
}

#[async_trait]
impl AiApi for MockAiApi {
    async fn generate_story(
        &self,
        request: &GenerateStoryRequest,
    ) -> Result<GenerateStoryResponse, ApiError> {
        self.story_requests.lock().unwrap().push(request.clone());
        self.story_result.lock().unwrap().clone()
    }

    async fn send_chat(&self, request: &ChatRequest) -> Result<ChatResponse, ApiError> {
        self.chat_requests.lock().unwrap().push(request.clone());
        self.chat_result.lock().unwrap().clone()
    }

    async fn recognize_image(
        &self,
        _image: Vec<u8>,
        file_name: &str,
    ) -> Result<RecognitionResponse, ApiError> {
        self.recognition_uploads
            .lock()
            .unwrap()
            .push(file_name.to_string());
        self.recognition_result.lock().unwrap().clone()
    }
}
