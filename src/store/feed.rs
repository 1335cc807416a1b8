use crate::domain::Note;
use crate::error::DaybookResult;
use chrono::NaiveDate;
use sqlx::SqlitePool;
use tokio::sync::watch;

/// Which notes a feed follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteQuery {
    OnDate(NaiveDate),
    /// Inclusive on both ends.
    Between(NaiveDate, NaiveDate),
    All,
}

impl NoteQuery {
    pub(crate) async fn fetch(&self, pool: &SqlitePool) -> DaybookResult<Vec<Note>> {
        match *self {
            NoteQuery::OnDate(date) => super::fetch_on_date(pool, date).await,
            NoteQuery::Between(start, end) => super::fetch_between(pool, start, end).await,
            NoteQuery::All => super::fetch_all(pool).await,
        }
    }
}

/// A live view of a [`NoteQuery`].
///
/// The first [`next`](NoteFeed::next) returns the current notes; each later
/// call waits for the store's next successful write and re-runs the query.
/// Writes landing between two calls are coalesced into one result. Drop the
/// feed to stop following.
pub struct NoteFeed {
    pool: SqlitePool,
    query: NoteQuery,
    revisions: watch::Receiver<u64>,
}

impl NoteFeed {
    pub(crate) fn new(pool: SqlitePool, query: NoteQuery, mut revisions: watch::Receiver<u64>) -> Self {
        revisions.mark_changed();
        NoteFeed {
            pool,
            query,
            revisions,
        }
    }

    pub fn query(&self) -> NoteQuery {
        self.query
    }

    /// Waits for the next result list.
    ///
    /// Returns `None` once the store has been dropped.
    pub async fn next(&mut self) -> Option<DaybookResult<Vec<Note>>> {
        self.revisions.changed().await.ok()?;
        Some(self.query.fetch(&self.pool).await)
    }

    /// Returns `true` if a write has landed since the last result.
    pub fn has_changed(&self) -> bool {
        self.revisions.has_changed().unwrap_or(false)
    }
}
