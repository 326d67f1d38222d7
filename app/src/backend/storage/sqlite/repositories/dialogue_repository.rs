use anyhow::{anyhow, Result};
use async_trait::async_trait;
use sqlx::Row;

use crate::backend::storage::sqlite::connection::DbConnection;
use crate::backend::storage::traits::DialogueStorage;
use shared::{Message, MessageRole};

/// Row shape of the `dialogue_messages` table.
///
/// The suggested-actions list is stored as embedded JSON text so the
/// table stays a single flat row per message.
#[derive(Debug, Clone)]
struct DialogueMessageRecord {
    id: String,
    conversation_id: String,
    role: String,
    content: String,
    timestamp: String,
    emotion: Option<String>,
    suggested_actions: Option<String>,
}

impl DialogueMessageRecord {
    fn from_message(conversation_id: &str, message: &Message) -> Result<Self> {
        let suggested_actions = message
            .suggested_actions
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        Ok(Self {
            id: message.id.clone(),
            conversation_id: conversation_id.to_string(),
            role: message.role.as_str().to_string(),
            content: message.content.clone(),
            timestamp: message.timestamp.clone(),
            emotion: message.emotion.clone(),
            suggested_actions,
        })
    }

    fn into_message(self) -> Result<Message> {
        let role = MessageRole::parse(&self.role)
            .ok_or_else(|| anyhow!("Unknown message role in cache: {}", self.role))?;
        let suggested_actions = self
            .suggested_actions
            .as_deref()
            .map(serde_json::from_str)
            .transpose()?;

        Ok(Message {
            id: self.id,
            role,
            content: self.content,
            timestamp: self.timestamp,
            emotion: self.emotion,
            suggested_actions,
        })
    }
}

fn record_from_row(row: &sqlx::sqlite::SqliteRow) -> DialogueMessageRecord {
    DialogueMessageRecord {
        id: row.get("id"),
        conversation_id: row.get("conversation_id"),
        role: row.get("role"),
        content: row.get("content"),
        timestamp: row.get("timestamp"),
        emotion: row.get("emotion"),
        suggested_actions: row.get("suggested_actions"),
    }
}

/// Repository for cached dialogue messages
#[derive(Clone)]
pub struct DialogueRepository {
    db: DbConnection,
}

impl DialogueRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DialogueStorage for DialogueRepository {
    async fn store_message(&self, conversation_id: &str, message: &Message) -> Result<()> {
        let record = DialogueMessageRecord::from_message(conversation_id, message)?;

        sqlx::query(
            r#"
            INSERT INTO dialogue_messages
                (id, conversation_id, role, content, timestamp, emotion, suggested_actions)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.id)
        .bind(&record.conversation_id)
        .bind(&record.role)
        .bind(&record.content)
        .bind(&record.timestamp)
        .bind(&record.emotion)
        .bind(&record.suggested_actions)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get_message(&self, message_id: &str) -> Result<Option<Message>> {
        let row = sqlx::query(
            r#"
            SELECT id, conversation_id, role, content, timestamp, emotion, suggested_actions
            FROM dialogue_messages
            WHERE id = ?
            "#,
        )
        .bind(message_id)
        .fetch_optional(self.db.pool())
        .await?;

        match row {
            Some(r) => Ok(Some(record_from_row(&r).into_message()?)),
            None => Ok(None),
        }
    }

    async fn list_messages(&self, conversation_id: &str) -> Result<Vec<Message>> {
        // ROWID breaks ties between messages written within the same
        // millisecond, preserving append order
        let rows = sqlx::query(
            r#"
            SELECT id, conversation_id, role, content, timestamp, emotion, suggested_actions
            FROM dialogue_messages
            WHERE conversation_id = ?
            ORDER BY timestamp ASC, ROWID ASC
            "#,
        )
        .bind(conversation_id)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter()
            .map(|row| record_from_row(row).into_message())
            .collect()
    }

    async fn list_active_days(&self) -> Result<Vec<String>> {
        // Timestamps are RFC 3339, so the first ten characters are the
        // UTC calendar date
        let rows = sqlx::query(
            r#"
            SELECT DISTINCT substr(timestamp, 1, 10) AS day
            FROM dialogue_messages
            ORDER BY day ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.iter().map(|row| row.get("day")).collect())
    }

    async fn latest_message_timestamp(&self) -> Result<Option<String>> {
        let row = sqlx::query(
            r#"
            SELECT timestamp
            FROM dialogue_messages
            ORDER BY timestamp DESC, ROWID DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.map(|r| r.get("timestamp")))
    }

    async fn delete_conversation(&self, conversation_id: &str) -> Result<u32> {
        let result = sqlx::query(
            r#"
            DELETE FROM dialogue_messages WHERE conversation_id = ?
            "#,
        )
        .bind(conversation_id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() as u32)
    }
}
