//! # Remote AI Gateway
//!
//! Declares the three remote endpoints the client consumes — story
//! generation, dialogue chat, and image recognition — and provides the
//! HTTP implementation. The domain layer only sees the [`AiApi`]
//! trait, so services can be tested against a scripted mock without a
//! network.

pub mod client;
#[cfg(test)]
pub mod mock;

use async_trait::async_trait;
use thiserror::Error;

use shared::{
    ChatRequest, ChatResponse, GenerateStoryRequest, GenerateStoryResponse, RecognitionResponse,
};

/// Errors returned by the remote AI service client
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Could not reach the service at all
    #[error("Connection to the StoryPal service failed: {0}")]
    Connection(String),
    /// The service did not answer in time
    #[error("The StoryPal service timed out")]
    Timeout,
    /// The service answered with a non-success status
    #[error("The StoryPal service returned status {status}: {message}")]
    Status { status: u16, message: String },
    /// The response body did not match the declared contract
    #[error("Failed to decode the StoryPal service response: {0}")]
    Decode(String),
}

/// Trait declaring the remote AI service endpoints
#[async_trait]
pub trait AiApi: Send + Sync {
    /// Generate a story for a child of the given age and interests
    async fn generate_story(
        &self,
        request: &GenerateStoryRequest,
    ) -> Result<GenerateStoryResponse, ApiError>;

    /// Send one dialogue turn and receive the companion's reply
    async fn send_chat(&self, request: &ChatRequest) -> Result<ChatResponse, ApiError>;

    /// Upload a captured image and receive a child-friendly description
    async fn recognize_image(
        &self,
        image: Vec<u8>,
        file_name: &str,
    ) -> Result<RecognitionResponse, ApiError>;
}

pub use client::HttpAiClient;
