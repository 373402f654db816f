//! SQLite-backed store, listing newest first
//!
//! `vibes` is kept as a JSON array in a text column.

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use super::{not_found, MediaStore};
use crate::model::{MediaItem, MediaPatch, MediaStatus, MediaType, NewMedia, UserId};
use crate::{Error, Result};

const SELECT_COLUMNS: &str =
    "SELECT id, title, type, status, year, cover_url, vibes FROM media_items";

#[derive(Debug, Clone)]
pub struct SqliteStore {
    db: SqlitePool,
}

impl SqliteStore {
    /// Wrap a pool whose schema has been initialized
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.db
    }
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn decode_row(row: &SqliteRow) -> Result<MediaItem> {
    let id: String = row.try_get("id")?;
    let corrupt = |e: Error| Error::Transport(format!("Corrupt media row {}: {}", id, e));

    let kind = row.try_get::<String, _>("type")?.parse::<MediaType>().map_err(corrupt)?;
    let status = row.try_get::<String, _>("status")?.parse::<MediaStatus>().map_err(corrupt)?;
    let vibes: Vec<String> = serde_json::from_str(&row.try_get::<String, _>("vibes")?)?;

    Ok(MediaItem {
        title: row.try_get("title")?,
        kind,
        status,
        year: row.try_get("year")?,
        cover_url: row.try_get("cover_url")?,
        vibes,
        id,
    })
}

#[async_trait]
impl MediaStore for SqliteStore {
    async fn list_items(&self, user: &UserId) -> Result<Vec<MediaItem>> {
        let rows = sqlx::query(&format!(
            "{} WHERE user_id = ? ORDER BY created_at DESC, rowid DESC",
            SELECT_COLUMNS
        ))
        .bind(user.as_str())
        .fetch_all(&self.db)
        .await?;

        rows.iter().map(decode_row).collect()
    }

    async fn create_item(&self, user: &UserId, draft: NewMedia) -> Result<MediaItem> {
        let draft = draft.validated()?;
        let item = MediaItem::from_draft(uuid::Uuid::new_v4().to_string(), draft);
        let created_at = now();

        sqlx::query(
            r#"
            INSERT INTO media_items
                (id, user_id, title, type, status, year, cover_url, vibes, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&item.id)
        .bind(user.as_str())
        .bind(&item.title)
        .bind(item.kind.as_str())
        .bind(item.status.as_str())
        .bind(item.year)
        .bind(&item.cover_url)
        .bind(serde_json::to_string(&item.vibes)?)
        .bind(&created_at)
        .bind(&created_at)
        .execute(&self.db)
        .await?;

        debug!("Created media {} for {}", item.id, user);
        Ok(item)
    }

    async fn update_item(&self, user: &UserId, id: &str, patch: MediaPatch) -> Result<MediaItem> {
        let patch = patch.validated()?;
        let vibes = patch.vibes.as_ref().map(serde_json::to_string).transpose()?;

        // Single statement so concurrent writers queue on the write lock; last write wins
        let row = sqlx::query(
            r#"
            UPDATE media_items
            SET title = COALESCE(?, title),
                type = COALESCE(?, type),
                status = COALESCE(?, status),
                year = CASE WHEN ? THEN ? ELSE year END,
                cover_url = CASE WHEN ? THEN ? ELSE cover_url END,
                vibes = COALESCE(?, vibes),
                updated_at = ?
            WHERE id = ? AND user_id = ?
            RETURNING id, title, type, status, year, cover_url, vibes
            "#,
        )
        .bind(patch.title.as_deref())
        .bind(patch.kind.map(|kind| kind.as_str()))
        .bind(patch.status.map(|status| status.as_str()))
        .bind(patch.year.is_some())
        .bind(patch.year.flatten())
        .bind(patch.cover_url.is_some())
        .bind(patch.cover_url.clone().flatten())
        .bind(vibes)
        .bind(now())
        .bind(id)
        .bind(user.as_str())
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| not_found(id))?;

        decode_row(&row)
    }

    async fn delete_item(&self, user: &UserId, id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM media_items WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user.as_str())
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        debug!("Deleted media {} for {}", id, user);
        Ok(())
    }
}
