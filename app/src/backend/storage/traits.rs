//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow
//! different storage backends to be used interchangeably in the domain
//! layer.

use anyhow::Result;
use async_trait::async_trait;
use shared::{ChildProfile, Message};

/// Trait defining the interface for dialogue message storage operations
///
/// Messages form an append-only history per conversation. They are
/// never reordered or deduplicated; timestamps are non-decreasing
/// within a conversation because rows are written in send order.
#[async_trait]
pub trait DialogueStorage: Send + Sync {
    /// Store a new dialogue message under a conversation
    async fn store_message(&self, conversation_id: &str, message: &Message) -> Result<()>;

    /// Retrieve a specific message by ID
    async fn get_message(&self, message_id: &str) -> Result<Option<Message>>;

    /// List all messages of a conversation in append order
    async fn list_messages(&self, conversation_id: &str) -> Result<Vec<Message>>;

    /// List the distinct calendar days (UTC, "YYYY-MM-DD") with at
    /// least one cached message, oldest first
    async fn list_active_days(&self) -> Result<Vec<String>>;

    /// Get the timestamp of the most recently stored message
    async fn latest_message_timestamp(&self) -> Result<Option<String>>;

    /// Delete all messages of a conversation
    /// Returns the number of messages deleted
    async fn delete_conversation(&self, conversation_id: &str) -> Result<u32>;
}

/// Trait defining the interface for child profile storage operations
#[async_trait]
pub trait ProfileStorage: Send + Sync {
    /// Store a new profile
    async fn store_profile(&self, profile: &ChildProfile) -> Result<()>;

    /// Retrieve a specific profile by ID
    async fn get_profile(&self, profile_id: &str) -> Result<Option<ChildProfile>>;

    /// Retrieve the earliest-created profile, if any exists
    ///
    /// The client is single-profile today; this is how "the" profile
    /// is looked up without tracking an active id.
    async fn get_any_profile(&self) -> Result<Option<ChildProfile>>;

    /// Update an existing profile
    async fn update_profile(&self, profile: &ChildProfile) -> Result<()>;

    /// Delete a profile by ID
    /// Returns true if the profile was found and deleted, false otherwise
    async fn delete_profile(&self, profile_id: &str) -> Result<bool>;
}
