use anyhow::{bail, Result};
use chrono::Utc;
use log::{info, warn};
use std::sync::Arc;

use crate::backend::api::AiApi;
use crate::backend::storage::traits::DialogueStorage;
use shared::{ChatRequest, ChatTurn, Message, MessageRole};

// Most recent cached turns sent along with each chat request. The
// local cache itself is never evicted.
const HISTORY_LIMIT: usize = 20;

/// Service for the AI dialogue feature.
///
/// Every turn is cached locally before and after the remote call, so
/// the conversation survives restarts and a failed send still keeps
/// the child's message.
#[derive(Clone)]
pub struct DialogueService {
    api: Arc<dyn AiApi>,
    storage: Arc<dyn DialogueStorage>,
}

impl DialogueService {
    /// Create a new DialogueService
    pub fn new(api: Arc<dyn AiApi>, storage: Arc<dyn DialogueStorage>) -> Self {
        Self { api, storage }
    }

    /// Mint an ID for a fresh conversation
    pub fn start_conversation(&self) -> String {
        Message::generate_conversation_id()
    }

    /// Build and persist the child's message, returning it
    pub async fn record_user_message(
        &self,
        conversation_id: &str,
        text: &str,
    ) -> Result<Message> {
        let text = text.trim();
        if text.is_empty() {
            bail!("Message text cannot be empty");
        }

        let message = Message {
            id: Message::generate_id(),
            role: MessageRole::User,
            content: text.to_string(),
            timestamp: Utc::now().to_rfc3339(),
            emotion: None,
            suggested_actions: None,
        };

        self.storage.store_message(conversation_id, &message).await?;
        Ok(message)
    }

    /// Send a recorded user message to the AI companion and persist
    /// the reply.
    ///
    /// On remote failure the user message stays cached and the error
    /// propagates; the screen decides what the child sees.
    pub async fn request_reply(
        &self,
        conversation_id: &str,
        user_message: &Message,
    ) -> Result<Message> {
        let cached = self.storage.list_messages(conversation_id).await?;
        let mut prior: Vec<ChatTurn> = cached
            .iter()
            .filter(|m| m.id != user_message.id)
            .map(|m| ChatTurn {
                role: m.role,
                content: m.content.clone(),
            })
            .collect();
        // Keep only the most recent turns, oldest first
        let history = prior.split_off(prior.len().saturating_sub(HISTORY_LIMIT));

        let request = ChatRequest {
            conversation_id: conversation_id.to_string(),
            message: user_message.content.clone(),
            history,
        };

        info!(
            "Sending dialogue turn for {} with {} history turns",
            conversation_id,
            request.history.len()
        );

        let response = match self.api.send_chat(&request).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Dialogue send failed for {}: {}", conversation_id, e);
                return Err(e.into());
            }
        };

        let reply = Message {
            id: Message::generate_id(),
            role: MessageRole::Ai,
            content: response.reply,
            timestamp: Utc::now().to_rfc3339(),
            emotion: response.emotion,
            suggested_actions: response.suggested_actions,
        };

        self.storage.store_message(conversation_id, &reply).await?;
        Ok(reply)
    }

    /// Cached history of a conversation, in append order
    pub async fn history(&self, conversation_id: &str) -> Result<Vec<Message>> {
        self.storage.list_messages(conversation_id).await
    }
}
