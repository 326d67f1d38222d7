use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Profile ID in format: "profile::<epoch_millis>"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildProfile {
    pub id: String,
    /// Display name of the child
    pub name: String,
    /// Age in whole years (valid range 3-12)
    pub age: u8,
    /// Avatar identifier used by the UI (e.g. "fox", "panda")
    pub avatar: String,
    /// Topics the child likes, used to steer story generation
    pub interests: Vec<String>,
    /// Topic -> number of completed stories for that topic
    pub learning_progress: HashMap<String, u32>,
    /// RFC 3339 timestamp
    pub created_at: String,
    /// RFC 3339 timestamp
    pub updated_at: String,
}

impl ChildProfile {
    /// Generate a profile ID based on timestamp
    pub fn generate_id(epoch_millis: u64) -> String {
        format!("profile::{}", epoch_millis)
    }

    /// Parse a profile ID to extract the timestamp
    pub fn parse_id(id: &str) -> Result<u64, ProfileIdError> {
        let parts: Vec<&str> = id.split("::").collect();
        if parts.len() != 2 || parts[0] != "profile" {
            return Err(ProfileIdError::InvalidFormat);
        }

        parts[1]
            .parse::<u64>()
            .map_err(|_| ProfileIdError::InvalidTimestamp)
    }

    /// Extract timestamp from profile ID
    pub fn extract_timestamp(&self) -> Result<u64, ProfileIdError> {
        Self::parse_id(&self.id)
    }
}

/// Errors that can occur when parsing profile IDs
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileIdError {
    InvalidFormat,
    InvalidTimestamp,
}

impl fmt::Display for ProfileIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileIdError::InvalidFormat => write!(f, "Invalid profile ID format"),
            ProfileIdError::InvalidTimestamp => write!(f, "Invalid timestamp in profile ID"),
        }
    }
}

impl std::error::Error for ProfileIdError {}

/// Story ID in format: "story::<epoch_millis>"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Story {
    pub id: String,
    pub title: String,
    /// Full story text, ready to render or read aloud
    pub content: String,
    /// Estimated reading time in minutes
    pub duration_minutes: u32,
    /// Comprehension questions attached to the story, if any
    pub questions: Option<Vec<Question>>,
    pub metadata: Option<StoryMetadata>,
}

impl Story {
    /// Generate a story ID based on timestamp
    pub fn generate_id(epoch_millis: u64) -> String {
        format!("story::{}", epoch_millis)
    }

    /// Parse a story ID to extract the timestamp
    pub fn parse_id(id: &str) -> Result<u64, StoryIdError> {
        let parts: Vec<&str> = id.split("::").collect();
        if parts.len() != 2 || parts[0] != "story" {
            return Err(StoryIdError::InvalidFormat);
        }

        parts[1]
            .parse::<u64>()
            .map_err(|_| StoryIdError::InvalidTimestamp)
    }

    /// Extract timestamp from story ID
    pub fn extract_timestamp(&self) -> Result<u64, StoryIdError> {
        Self::parse_id(&self.id)
    }
}

/// Errors that can occur when parsing story IDs
#[derive(Debug, Clone, PartialEq)]
pub enum StoryIdError {
    InvalidFormat,
    InvalidTimestamp,
}

impl fmt::Display for StoryIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoryIdError::InvalidFormat => write!(f, "Invalid story ID format"),
            StoryIdError::InvalidTimestamp => write!(f, "Invalid timestamp in story ID"),
        }
    }
}

impl std::error::Error for StoryIdError {}

/// Extra generation context attached to a story
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryMetadata {
    /// Theme the story was generated for, if one was requested
    pub theme: Option<String>,
    /// Intended age range, e.g. "4-6"
    pub age_range: Option<String>,
    /// New words the story introduces
    #[serde(default)]
    pub vocabulary: Vec<String>,
}

/// A comprehension question attached to a generated story
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub text: String,
    /// Answer choices shown to the child
    pub options: Vec<String>,
    /// Index into `options` of the correct answer
    pub correct_answer: u32,
    /// Shown after answering to explain the correct choice
    pub explanation: String,
    // Interaction state below is set by the UI and never sent back
    // to the story service.
    #[serde(default, skip_serializing)]
    pub answered: bool,
    #[serde(default, skip_serializing)]
    pub selected_answer: Option<u32>,
    #[serde(default, skip_serializing)]
    pub feedback: Option<String>,
}

impl Question {
    /// Check whether a selected option index is the correct answer
    pub fn is_correct(&self, selected: u32) -> bool {
        selected == self.correct_answer
    }
}

/// Who authored a dialogue message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Ai,
}

impl MessageRole {
    /// Stable string form used in the local database
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Ai => "ai",
        }
    }

    /// Parse the stable string form back into a role
    pub fn parse(value: &str) -> Option<MessageRole> {
        match value {
            "user" => Some(MessageRole::User),
            "ai" => Some(MessageRole::Ai),
            _ => None,
        }
    }
}

/// Message ID in format: "message::<uuid>"
///
/// One turn in a dialogue. Messages are appended to an ordered history
/// and never reordered or deduplicated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub role: MessageRole,
    pub content: String,
    /// RFC 3339 timestamp; non-decreasing within a conversation
    pub timestamp: String,
    /// Emotion tag reported by the AI companion, if any
    pub emotion: Option<String>,
    /// Follow-up activities suggested by the AI companion, if any
    pub suggested_actions: Option<Vec<String>>,
}

impl Message {
    /// Generate a message ID
    pub fn generate_id() -> String {
        format!("message::{}", uuid::Uuid::new_v4())
    }

    /// Generate a conversation ID
    pub fn generate_conversation_id() -> String {
        format!("conversation::{}", uuid::Uuid::new_v4())
    }
}

/// Aggregate learning statistics shown on the profile screen.
///
/// Recomputed from repository-reported counts on every load; nothing
/// is updated incrementally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningStats {
    /// Total stories the child has completed
    pub stories_completed: u32,
    /// Number of distinct days with learning activity
    pub learning_days: u32,
    /// Consecutive-day streak ending today or yesterday
    pub streak_days: u32,
    /// Topics with the most completed stories, most popular first
    pub favorite_topics: Vec<String>,
    /// RFC 3339 timestamp of the most recent activity, if any
    pub last_learning_at: Option<String>,
}

// ---------------------------------------------------------------------------
// Remote API contracts
// ---------------------------------------------------------------------------

/// Request body for the story generation endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateStoryRequest {
    /// Age of the listener in whole years
    pub age: u8,
    /// Topics to weave into the story
    pub interests: Vec<String>,
    /// Requested theme; the service picks one when absent
    pub theme: Option<String>,
}

/// Response body from the story generation endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateStoryResponse {
    pub story: Story,
}

/// One prior turn included in a chat request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: MessageRole,
    pub content: String,
}

/// Request body for the dialogue chat endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub conversation_id: String,
    /// The new user message
    pub message: String,
    /// Most recent prior turns, oldest first
    pub history: Vec<ChatTurn>,
}

/// Response body from the dialogue chat endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
    pub emotion: Option<String>,
    pub suggested_actions: Option<Vec<String>>,
}

/// Response body from the image recognition endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognitionResponse {
    /// Short label for the recognized subject, e.g. "ladybug"
    pub label: String,
    /// Child-friendly sentence describing the subject
    pub description: String,
    /// Recognition confidence in the range 0.0-1.0
    pub confidence: f32,
    /// Optional fun fact to read out with the result
    pub fun_fact: Option<String>,
}

// ---------------------------------------------------------------------------
// Profile operations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateProfileRequest {
    pub name: String,
    /// Age in whole years (valid range 3-12)
    pub age: u8,
    /// Avatar identifier; a default is used if not provided
    pub avatar: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub age: Option<u8>,
    pub avatar: Option<String>,
    pub interests: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub profile: ChildProfile,
    pub success_message: String,
}
