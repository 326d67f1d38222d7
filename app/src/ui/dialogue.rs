use chrono::Utc;
use log::warn;

use crate::backend::domain::DialogueService;
use shared::{Message, MessageRole};

/// Fixed reply appended when the AI companion cannot be reached
pub const DIALOGUE_FALLBACK_REPLY: &str =
    "Oops! My ears got tangled. Can you say that again?";

/// State holder for the dialogue screen.
///
/// Holds the ordered conversation history; messages are only ever
/// appended, never reordered or deduplicated.
pub struct DialogueScreen {
    dialogue: DialogueService,
    conversation_id: String,
    messages: Vec<Message>,
    sending: bool,
}

impl DialogueScreen {
    pub fn new(dialogue: DialogueService) -> Self {
        let conversation_id = dialogue.start_conversation();
        Self {
            dialogue,
            conversation_id,
            messages: Vec::new(),
            sending: false,
        }
    }

    /// Resume a cached conversation instead of starting a fresh one
    pub fn with_conversation(dialogue: DialogueService, conversation_id: String) -> Self {
        Self {
            dialogue,
            conversation_id,
            messages: Vec::new(),
            sending: false,
        }
    }

    pub fn conversation_id(&self) -> &str {
        &self.conversation_id
    }

    /// Conversation history in append order
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Whether a send is currently in flight
    pub fn is_sending(&self) -> bool {
        self.sending
    }

    /// Load the cached history of this conversation
    pub async fn load_history(&mut self) {
        match self.dialogue.history(&self.conversation_id).await {
            Ok(messages) => self.messages = messages,
            Err(e) => warn!("Failed to load conversation history: {}", e),
        }
    }

    /// Send one message: append it, then append the AI reply, or the
    /// fixed fallback reply when the companion cannot answer.
    pub async fn send(&mut self, text: &str) {
        if text.trim().is_empty() {
            return;
        }

        self.sending = true;

        let user_message = match self
            .dialogue
            .record_user_message(&self.conversation_id, text)
            .await
        {
            Ok(message) => {
                self.messages.push(message.clone());
                message
            }
            Err(e) => {
                warn!("Failed to record user message: {}", e);
                self.messages.push(fallback_reply());
                self.sending = false;
                return;
            }
        };

        match self
            .dialogue
            .request_reply(&self.conversation_id, &user_message)
            .await
        {
            Ok(reply) => self.messages.push(reply),
            Err(e) => {
                warn!("Dialogue send failed: {}", e);
                self.messages.push(fallback_reply());
            }
        }

        self.sending = false;
    }
}

/// The fallback reply is UI-only and never written to the cache
fn fallback_reply() -> Message {
    Message {
        id: Message::generate_id(),
        role: MessageRole::Ai,
        content: DIALOGUE_FALLBACK_REPLY.to_string(),
        timestamp: Utc::now().to_rfc3339(),
        emotion: None,
        suggested_actions: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::api::mock::MockAiApi;
    use crate::backend::initialize_test_backend;
    use std::sync::Arc;

    async fn setup_screen(api: Arc<MockAiApi>) -> DialogueScreen {
        let state = initialize_test_backend(api).await.unwrap();
        DialogueScreen::new(state.dialogue_service)
    }

    #[tokio::test]
    async fn test_send_appends_user_then_reply() {
        let mut screen = setup_screen(Arc::new(MockAiApi::new())).await;

        screen.send("Hi!").await;

        let messages = screen.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, MessageRole::User);
        assert_eq!(messages[0].content, "Hi!");
        assert_eq!(messages[1].role, MessageRole::Ai);
        assert_eq!(messages[1].content, "What a great question!");
        assert!(!screen.is_sending());
    }

    #[tokio::test]
    async fn test_failure_appends_fixed_fallback_reply() {
        let mut screen = setup_screen(Arc::new(MockAiApi::failing())).await;

        screen.send("Hello?").await;

        let messages = screen.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].content, "Hello?");
        assert_eq!(messages[1].role, MessageRole::Ai);
        assert_eq!(messages[1].content, DIALOGUE_FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn test_blank_input_is_ignored() {
        let mut screen = setup_screen(Arc::new(MockAiApi::new())).await;

        screen.send("   ").await;

        assert!(screen.messages().is_empty());
    }

    #[tokio::test]
    async fn test_history_reloads_from_cache_in_order() {
        let api = Arc::new(MockAiApi::new());
        let state = initialize_test_backend(api).await.unwrap();

        let mut screen = DialogueScreen::new(state.dialogue_service.clone());
        screen.send("One").await;
        screen.send("Two").await;
        let conversation_id = screen.conversation_id().to_string();

        // A fresh holder over the same conversation sees the same history
        let mut resumed =
            DialogueScreen::with_conversation(state.dialogue_service, conversation_id);
        resumed.load_history().await;

        let contents: Vec<&str> = resumed
            .messages()
            .iter()
            .map(|m| m.content.as_str())
            .collect();
        assert_eq!(
            contents,
            vec!["One", "What a great question!", "Two", "What a great question!"]
        );
    }

    #[tokio::test]
    async fn test_fallback_reply_is_not_cached() {
        let api = Arc::new(MockAiApi::failing());
        let state = initialize_test_backend(api).await.unwrap();
        let mut screen = DialogueScreen::new(state.dialogue_service.clone());

        screen.send("Hello?").await;

        let cached = state
            .dialogue_service
            .history(screen.conversation_id())
            .await
            .unwrap();
        assert_eq!(cached.len(), 1);
        assert_eq!(cached[0].content, "Hello?");
    }
}
