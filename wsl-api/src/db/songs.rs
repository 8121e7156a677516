//! Song database operations
//!
//! One statement per operation. Rows are kept in insertion order; the
//! `created_at`/`updated_at` columns are bookkeeping and never leave the store.

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use std::sync::Arc;
use tokio::sync::OnceCell;
use uuid::Uuid;
use wsl_common::{Error, Result, Song, SongDraft, SongPatch};

/// Song collection of one leader
#[derive(Clone)]
pub struct SongStore {
    pool: SqlitePool,
    database_name: &'static str,
    schema: Arc<OnceCell<()>>,
}

impl SongStore {
    pub fn new(pool: SqlitePool, database_name: &'static str) -> Self {
        Self {
            pool,
            database_name,
            schema: Arc::new(OnceCell::new()),
        }
    }

    pub fn database_name(&self) -> &'static str {
        self.database_name
    }

    /// Create the songs table if this store has not done so yet
    ///
    /// A failed attempt is not remembered, so the next call tries again.
    pub async fn ensure_schema(&self) -> Result<()> {
        self.schema
            .get_or_try_init(|| async {
                sqlx::query(
                    r#"
                    CREATE TABLE IF NOT EXISTS songs (
                        guid TEXT PRIMARY KEY,
                        title TEXT NOT NULL DEFAULT '',
                        song_key TEXT NOT NULL DEFAULT '',
                        created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
                        updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
                    )
                    "#,
                )
                .execute(&self.pool)
                .await?;

                tracing::debug!("Songs table ready in {}", self.database_name);
                Ok::<(), Error>(())
            })
            .await?;

        Ok(())
    }

    /// Insert a new song, assigning it a fresh id
    pub async fn insert(&self, draft: SongDraft) -> Result<Song> {
        self.ensure_schema().await?;

        let song = Song {
            id: Uuid::new_v4(),
            title: draft.title,
            key: draft.key,
        };

        sqlx::query(
            r#"
            INSERT INTO songs (guid, title, song_key, created_at, updated_at)
            VALUES (?, ?, ?, CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)
            "#,
        )
        .bind(song.id.to_string())
        .bind(&song.title)
        .bind(&song.key)
        .execute(&self.pool)
        .await?;

        Ok(song)
    }

    /// All songs in insertion order
    pub async fn list(&self) -> Result<Vec<Song>> {
        self.ensure_schema().await?;

        let rows = sqlx::query("SELECT guid, title, song_key FROM songs ORDER BY rowid")
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(song_from_row).collect()
    }

    /// Replace the fields present in `patch`; `None` if no song has this id
    pub async fn update(&self, id: Uuid, patch: SongPatch) -> Result<Option<Song>> {
        self.ensure_schema().await?;

        let row = sqlx::query(
            r#"
            UPDATE songs
            SET title = COALESCE(?, title),
                song_key = COALESCE(?, song_key),
                updated_at = CURRENT_TIMESTAMP
            WHERE guid = ?
            RETURNING guid, title, song_key
            "#,
        )
        .bind(patch.title)
        .bind(patch.key)
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(song_from_row).transpose()
    }

    /// Remove a song and return it; `None` if no song has this id
    pub async fn delete(&self, id: Uuid) -> Result<Option<Song>> {
        self.ensure_schema().await?;

        let row = sqlx::query("DELETE FROM songs WHERE guid = ? RETURNING guid, title, song_key")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(song_from_row).transpose()
    }
}

fn song_from_row(row: &SqliteRow) -> Result<Song> {
    let guid: String = row.try_get("guid")?;
    let id = Uuid::parse_str(&guid)
        .map_err(|e| Error::Internal(format!("Invalid song id {:?}: {}", guid, e)))?;

    Ok(Song {
        id,
        title: row.try_get("title")?,
        key: row.try_get("song_key")?,
    })
}
