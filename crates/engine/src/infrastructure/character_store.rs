//! SQLite-backed character document storage.
//!
//! Each character is one JSON document keyed by its id, with the owner and
//! timestamps kept in plain columns for listing.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::{SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;

use chronicle_domain::{Character, CharacterId, UserId};

use crate::infrastructure::ports::{CharacterRecord, CharacterRepo, RepoError};

/// SQLite implementation of the character repository.
pub struct SqliteCharacterRepo {
    pool: SqlitePool,
}

impl SqliteCharacterRepo {
    /// Connect to `database_url` and create the schema if needed.
    ///
    /// `sqlite::memory:` databases are pinned to a single connection so
    /// every query sees the same data.
    pub async fn new(database_url: &str) -> Result<Self, RepoError> {
        let mut options = SqlitePoolOptions::new();
        if database_url.contains(":memory:") {
            options = options
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }
        let pool = options
            .connect(database_url)
            .await
            .map_err(|e| RepoError::database("connect", e))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS characters (
                id TEXT PRIMARY KEY NOT NULL,
                user_id TEXT NOT NULL,
                character_json TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| RepoError::database("create_schema", e))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_characters_user ON characters (user_id, created_at)",
        )
        .execute(&pool)
        .await
        .map_err(|e| RepoError::database("create_schema", e))?;

        Ok(Self { pool })
    }
}

fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, RepoError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|at| at.with_timezone(&Utc))
        .map_err(RepoError::serialization)
}

fn row_to_record(row: &SqliteRow) -> Result<CharacterRecord, RepoError> {
    let user_id: String = row.get("user_id");
    let json: String = row.get("character_json");
    let created_at: String = row.get("created_at");
    let updated_at: String = row.get("updated_at");

    let character: Character = serde_json::from_str(&json).map_err(RepoError::serialization)?;
    Ok(CharacterRecord {
        user_id: UserId::from_str(&user_id).map_err(RepoError::serialization)?,
        character,
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}

#[async_trait]
impl CharacterRepo for SqliteCharacterRepo {
    async fn get(&self, id: CharacterId) -> Result<Option<CharacterRecord>, RepoError> {
        let row = sqlx::query(
            "SELECT user_id, character_json, created_at, updated_at FROM characters WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::database("get_character", e))?;

        row.as_ref().map(row_to_record).transpose()
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<CharacterRecord>, RepoError> {
        let rows = sqlx::query(
            r#"
            SELECT user_id, character_json, created_at, updated_at
            FROM characters
            WHERE user_id = ?
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("list_characters", e))?;

        rows.iter().map(row_to_record).collect()
    }

    async fn insert(&self, record: &CharacterRecord) -> Result<(), RepoError> {
        let json = serde_json::to_string(&record.character).map_err(RepoError::serialization)?;

        sqlx::query(
            r#"
            INSERT INTO characters (id, user_id, character_json, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(record.id().to_string())
        .bind(record.user_id.to_string())
        .bind(json)
        .bind(format_timestamp(record.created_at))
        .bind(format_timestamp(record.updated_at))
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("insert_character", e))?;

        Ok(())
    }

    async fn update(&self, record: &CharacterRecord) -> Result<(), RepoError> {
        let json = serde_json::to_string(&record.character).map_err(RepoError::serialization)?;

        let result = sqlx::query(
            "UPDATE characters SET character_json = ?, updated_at = ? WHERE id = ?",
        )
        .bind(json)
        .bind(format_timestamp(record.updated_at))
        .bind(record.id().to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("update_character", e))?;

        if result.rows_affected() == 0 {
            return Err(RepoError::not_found("Character", record.id()));
        }
        Ok(())
    }

    async fn delete(&self, id: CharacterId) -> Result<(), RepoError> {
        sqlx::query("DELETE FROM characters WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("delete_character", e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use chronicle_domain::CharacterName;

    async fn memory_repo() -> SqliteCharacterRepo {
        SqliteCharacterRepo::new("sqlite::memory:").await.unwrap()
    }

    fn record(user_id: UserId, name: &str, at: DateTime<Utc>) -> CharacterRecord {
        let character = Character::new(CharacterName::new(name).unwrap());
        CharacterRecord::new(user_id, character, at)
    }

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 18, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn insert_then_get_roundtrips_document() {
        let repo = memory_repo().await;
        let mut saved = record(UserId::new(), "Ilyra", base_time());
        saved.character.set_experience_points(900);
        repo.insert(&saved).await.unwrap();

        let loaded = repo.get(saved.id()).await.unwrap().unwrap();
        assert_eq!(loaded, saved);
        assert_eq!(loaded.character.level(), 3);
    }

    #[tokio::test]
    async fn get_missing_returns_none() {
        let repo = memory_repo().await;
        assert!(repo.get(CharacterId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_replaces_snapshot_but_keeps_created_at() {
        let repo = memory_repo().await;
        let mut saved = record(UserId::new(), "Ilyra", base_time());
        repo.insert(&saved).await.unwrap();

        saved.character.add_experience(300);
        saved.touch(base_time() + Duration::minutes(5));
        repo.update(&saved).await.unwrap();

        let loaded = repo.get(saved.id()).await.unwrap().unwrap();
        assert_eq!(loaded.character.experience_points(), 300);
        assert_eq!(loaded.created_at, base_time());
        assert_eq!(loaded.updated_at, base_time() + Duration::minutes(5));
    }

    #[tokio::test]
    async fn update_of_missing_record_creates_nothing() {
        let repo = memory_repo().await;
        let owner = UserId::new();
        let missing = record(owner, "Ghost", base_time());

        let err = repo.update(&missing).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(repo.get(missing.id()).await.unwrap().is_none());
        assert!(repo.list_for_user(owner).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_after_delete_is_not_found() {
        let repo = memory_repo().await;
        let mut saved = record(UserId::new(), "Doomed", base_time());
        repo.insert(&saved).await.unwrap();
        repo.delete(saved.id()).await.unwrap();

        saved.character.add_experience(300);
        assert!(repo.update(&saved).await.unwrap_err().is_not_found());
        assert!(repo.get(saved.id()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_id() {
        let repo = memory_repo().await;
        let saved = record(UserId::new(), "Twice", base_time());
        repo.insert(&saved).await.unwrap();
        assert!(matches!(
            repo.insert(&saved).await,
            Err(RepoError::Database { .. })
        ));
    }

    #[tokio::test]
    async fn list_for_user_is_newest_first_and_scoped() {
        let repo = memory_repo().await;
        let owner = UserId::new();
        let older = record(owner, "Older", base_time());
        let newer = record(owner, "Newer", base_time() + Duration::hours(1));
        let foreign = record(UserId::new(), "Foreign", base_time());
        for r in [&older, &newer, &foreign] {
            repo.insert(r).await.unwrap();
        }

        let listed = repo.list_for_user(owner).await.unwrap();
        let names: Vec<&str> = listed.iter().map(|r| r.character.name().as_str()).collect();
        assert_eq!(names, vec!["Newer", "Older"]);
    }

    #[tokio::test]
    async fn delete_removes_record() {
        let repo = memory_repo().await;
        let saved = record(UserId::new(), "Doomed", base_time());
        repo.insert(&saved).await.unwrap();
        repo.delete(saved.id()).await.unwrap();
        assert!(repo.get(saved.id()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn file_database_survives_reconnect() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!(
            "sqlite:{}?mode=rwc",
            dir.path().join("chronicle.db").display()
        );
        let saved = record(UserId::new(), "Persistent", base_time());
        {
            let repo = SqliteCharacterRepo::new(&url).await.unwrap();
            repo.insert(&saved).await.unwrap();
        }
        let repo = SqliteCharacterRepo::new(&url).await.unwrap();
        assert!(repo.get(saved.id()).await.unwrap().is_some());
    }
}
