use anyhow::Result;
use async_trait::async_trait;
use sqlx::Row;
use std::collections::HashMap;

use crate::backend::storage::sqlite::connection::DbConnection;
use crate::backend::storage::traits::ProfileStorage;
use shared::ChildProfile;

/// Repository for child profiles
///
/// Interests and the learning-progress map are stored as embedded JSON
/// text columns.
#[derive(Clone)]
pub struct ProfileRepository {
    db: DbConnection,
}

impl ProfileRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn profile_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<ChildProfile> {
        let interests: Vec<String> = serde_json::from_str(row.get("interests"))?;
        let learning_progress: HashMap<String, u32> =
            serde_json::from_str(row.get("learning_progress"))?;
        let age: i64 = row.get("age");

        Ok(ChildProfile {
            id: row.get("id"),
            name: row.get("name"),
            age: age as u8,
            avatar: row.get("avatar"),
            interests,
            learning_progress,
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        })
    }
}

#[async_trait]
impl ProfileStorage for ProfileRepository {
    async fn store_profile(&self, profile: &ChildProfile) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO child_profiles
                (id, name, age, avatar, interests, learning_progress, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&profile.id)
        .bind(&profile.name)
        .bind(profile.age as i64)
        .bind(&profile.avatar)
        .bind(serde_json::to_string(&profile.interests)?)
        .bind(serde_json::to_string(&profile.learning_progress)?)
        .bind(&profile.created_at)
        .bind(&profile.updated_at)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get_profile(&self, profile_id: &str) -> Result<Option<ChildProfile>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, age, avatar, interests, learning_progress, created_at, updated_at
            FROM child_profiles
            WHERE id = ?
            "#,
        )
        .bind(profile_id)
        .fetch_optional(self.db.pool())
        .await?;

        match row {
            Some(r) => Ok(Some(Self::profile_from_row(&r)?)),
            None => Ok(None),
        }
    }

    async fn get_any_profile(&self) -> Result<Option<ChildProfile>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, age, avatar, interests, learning_progress, created_at, updated_at
            FROM child_profiles
            ORDER BY created_at ASC
            LIMIT 1
            "#,
        )
        .fetch_optional(self.db.pool())
        .await?;

        match row {
            Some(r) => Ok(Some(Self::profile_from_row(&r)?)),
            None => Ok(None),
        }
    }

    async fn update_profile(&self, profile: &ChildProfile) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE child_profiles
            SET name = ?, age = ?, avatar = ?, interests = ?, learning_progress = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&profile.name)
        .bind(profile.age as i64)
        .bind(&profile.avatar)
        .bind(serde_json::to_string(&profile.interests)?)
        .bind(serde_json::to_string(&profile.learning_progress)?)
        .bind(&profile.updated_at)
        .bind(&profile.id)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn delete_profile(&self, profile_id: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM child_profiles WHERE id = ?
            "#,
        )
        .bind(profile_id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
