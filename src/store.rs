//! SQLite-backed storage for notes.
//!
//! The [`NoteStore`] keeps one row per note in a date-indexed `notes` table.
//! Styling and tags are stored as JSON text columns and decoded on the way
//! out; a corrupt column decodes to "no styling" / "no tags" rather than
//! failing the read.
//!
//! Besides one-shot queries, the store hands out [`NoteFeed`]s that re-run
//! their query after every successful write, so several views can follow the
//! same notes and stay consistent.
//!
//! # Usage
//!
//! ```rust,no_run
//! use daybook_core::config::StoreConfig;
//! use daybook_core::domain::NewNote;
//! use daybook_core::store::{NoteQuery, NoteStore};
//! use chrono::NaiveDate;
//!
//! # async fn run() -> daybook_core::DaybookResult<()> {
//! let store = NoteStore::open(&StoreConfig::from_env()?).await?;
//! let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
//!
//! let mut feed = store.subscribe(NoteQuery::OnDate(date));
//! store.insert(&NewNote::new(date, "Walked by the river").into_note()?).await?;
//!
//! while let Some(notes) = feed.next().await {
//!     println!("{} notes today", notes?.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod feed;
mod schema;

pub use feed::{NoteFeed, NoteQuery};

use crate::config::StoreConfig;
use crate::domain::{self, Mood, Note, Priority, Weather};
use crate::error::{DaybookError, DaybookResult};
use crate::style;
use chrono::{NaiveDate, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use std::sync::Arc;
use tokio::sync::{Mutex, watch};

const SELECT_NOTES: &str = "SELECT id, date, content, content_style, tags, mood, priority, weather, location, created_at, updated_at FROM notes";

/// Handle to the note database. Cheap to clone; clones share one writer.
#[derive(Clone)]
pub struct NoteStore {
    pool: SqlitePool,
    write_lock: Arc<Mutex<()>>,
    revisions: Arc<watch::Sender<u64>>,
}

impl NoteStore {
    /// Opens (creating if needed) the database described by `config`.
    pub async fn open(config: &StoreConfig) -> DaybookResult<Self> {
        let pool = schema::connect(config).await?;
        let (revisions, _) = watch::channel(0);

        Ok(NoteStore {
            pool,
            write_lock: Arc::new(Mutex::new(())),
            revisions: Arc::new(revisions),
        })
    }

    /// Stores `note`, replacing any row with the same id.
    ///
    /// A note without an id gets a fresh one. Returns the row id.
    pub async fn insert(&self, note: &Note) -> DaybookResult<i64> {
        let _writer = self.write_lock.lock().await;

        let res = sqlx::query(
            "INSERT OR REPLACE INTO notes
                (id, date, content, content_style, tags, mood, priority, weather, location, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(note.id)
        .bind(note.date)
        .bind(&note.content)
        .bind(style::serialize(&note.styles))
        .bind(domain::encode_tags(&note.tags))
        .bind(note.mood.map(|m| m.as_str()).unwrap_or_default())
        .bind(note.priority.as_i64())
        .bind(note.weather.map(|w| w.as_str()).unwrap_or_default())
        .bind(&note.location)
        .bind(note.created_at)
        .bind(note.updated_at)
        .execute(&self.pool)
        .await?;

        let id = res.last_insert_rowid();
        tracing::debug!(id, date = %note.date, "inserted note");
        self.bump();

        Ok(id)
    }

    /// Overwrites the stored row for `note` and stamps `updated_at`.
    ///
    /// Returns `false` if no row has the note's id.
    ///
    /// # Errors
    /// Returns [`DaybookError::Unsaved`] if the note has no id.
    pub async fn update(&self, note: &Note) -> DaybookResult<bool> {
        self.update_stamped(note, Utc::now().timestamp_millis()).await
    }

    /// [`update`](NoteStore::update) with a caller-chosen `updated_at`.
    pub(crate) async fn update_stamped(&self, note: &Note, stamp: i64) -> DaybookResult<bool> {
        let id = note.id.ok_or(DaybookError::Unsaved)?;
        let _writer = self.write_lock.lock().await;

        let res = sqlx::query(
            "UPDATE notes SET
                date = ?, content = ?, content_style = ?, tags = ?, mood = ?,
                priority = ?, weather = ?, location = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(note.date)
        .bind(&note.content)
        .bind(style::serialize(&note.styles))
        .bind(domain::encode_tags(&note.tags))
        .bind(note.mood.map(|m| m.as_str()).unwrap_or_default())
        .bind(note.priority.as_i64())
        .bind(note.weather.map(|w| w.as_str()).unwrap_or_default())
        .bind(&note.location)
        .bind(stamp)
        .bind(id)
        .execute(&self.pool)
        .await?;

        let updated = res.rows_affected() > 0;
        tracing::debug!(id, updated, "updated note");
        if updated {
            self.bump();
        }

        Ok(updated)
    }

    /// Removes the stored row for `note`. Returns `false` if there was none.
    ///
    /// # Errors
    /// Returns [`DaybookError::Unsaved`] if the note has no id.
    pub async fn delete(&self, note: &Note) -> DaybookResult<bool> {
        let id = note.id.ok_or(DaybookError::Unsaved)?;
        let _writer = self.write_lock.lock().await;

        let res = sqlx::query("DELETE FROM notes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        let deleted = res.rows_affected() > 0;
        tracing::debug!(id, deleted, "deleted note");
        if deleted {
            self.bump();
        }

        Ok(deleted)
    }

    pub async fn get(&self, id: i64) -> DaybookResult<Option<Note>> {
        let row = sqlx::query(&format!("{SELECT_NOTES} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(note_from_row).transpose()
    }

    pub async fn notes_on_date(&self, date: NaiveDate) -> DaybookResult<Vec<Note>> {
        fetch_on_date(&self.pool, date).await
    }

    /// Notes dated from `start` through `end`, inclusive.
    pub async fn notes_in_range(&self, start: NaiveDate, end: NaiveDate) -> DaybookResult<Vec<Note>> {
        fetch_between(&self.pool, start, end).await
    }

    /// Every note, newest date first.
    pub async fn all_notes(&self) -> DaybookResult<Vec<Note>> {
        fetch_all(&self.pool).await
    }

    /// Starts following `query`; see [`NoteFeed`].
    pub fn subscribe(&self, query: NoteQuery) -> NoteFeed {
        NoteFeed::new(self.pool.clone(), query, self.revisions.subscribe())
    }

    pub(crate) fn revisions(&self) -> watch::Receiver<u64> {
        self.revisions.subscribe()
    }

    fn bump(&self) {
        self.revisions.send_modify(|rev| *rev += 1);
    }
}

pub(crate) async fn fetch_on_date(pool: &SqlitePool, date: NaiveDate) -> DaybookResult<Vec<Note>> {
    let rows = sqlx::query(&format!("{SELECT_NOTES} WHERE date = ? ORDER BY id"))
        .bind(date)
        .fetch_all(pool)
        .await?;

    rows.iter().map(note_from_row).collect()
}

pub(crate) async fn fetch_between(
    pool: &SqlitePool,
    start: NaiveDate,
    end: NaiveDate,
) -> DaybookResult<Vec<Note>> {
    let rows = sqlx::query(&format!(
        "{SELECT_NOTES} WHERE date BETWEEN ? AND ? ORDER BY date, id"
    ))
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;

    rows.iter().map(note_from_row).collect()
}

pub(crate) async fn fetch_all(pool: &SqlitePool) -> DaybookResult<Vec<Note>> {
    let rows = sqlx::query(&format!("{SELECT_NOTES} ORDER BY date DESC, id DESC"))
        .fetch_all(pool)
        .await?;

    rows.iter().map(note_from_row).collect()
}

fn note_from_row(row: &SqliteRow) -> DaybookResult<Note> {
    let id: i64 = row.try_get("id")?;
    let mood: String = row.try_get("mood")?;
    let weather: String = row.try_get("weather")?;
    let priority: i64 = row.try_get("priority")?;
    let content_style: String = row.try_get("content_style")?;
    let tags: String = row.try_get("tags")?;

    let mood = match mood.as_str() {
        "" => None,
        token => token
            .parse::<Mood>()
            .inspect_err(|e| tracing::debug!(id, error = %e, "dropping mood"))
            .ok(),
    };
    let weather = match weather.as_str() {
        "" => None,
        token => token
            .parse::<Weather>()
            .inspect_err(|e| tracing::debug!(id, error = %e, "dropping weather"))
            .ok(),
    };
    let priority = Priority::try_from(priority).unwrap_or_else(|e| {
        tracing::warn!(id, error = %e, "treating priority as normal");
        Priority::Normal
    });

    Ok(Note {
        id: Some(id),
        date: row.try_get("date")?,
        content: row.try_get("content")?,
        styles: style::deserialize(&content_style),
        tags: domain::decode_tags(&tags),
        mood,
        priority,
        weather,
        location: row.try_get("location")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
