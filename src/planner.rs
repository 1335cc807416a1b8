//! The planner ties the note store to what the user is looking at.
//!
//! It remembers the selected date, turns user actions into store writes and
//! exposes feeds that keep the week view and the full list current.

use crate::domain::{NewNote, Note};
use crate::editor::EditorSession;
use crate::error::DaybookResult;
use crate::store::{NoteFeed, NoteQuery, NoteStore};
use chrono::{Datelike, Days, Local, NaiveDate, Utc};
use tokio::sync::watch;

/// Returns the Monday and Sunday of the week containing `date`.
pub fn week_of(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let from_monday = u64::from(date.weekday().num_days_from_monday());
    let monday = date - Days::new(from_monday);
    (monday, monday + Days::new(6))
}

pub struct Planner {
    store: NoteStore,
    selected: watch::Sender<NaiveDate>,
}

impl Planner {
    /// Creates a planner with today's date selected.
    pub fn new(store: NoteStore) -> Self {
        Planner::with_date(store, Local::now().date_naive())
    }

    pub fn with_date(store: NoteStore, date: NaiveDate) -> Self {
        let (selected, _) = watch::channel(date);
        Planner { store, selected }
    }

    pub fn store(&self) -> &NoteStore {
        &self.store
    }

    pub fn selected_date(&self) -> NaiveDate {
        *self.selected.borrow()
    }

    pub fn select_date(&self, date: NaiveDate) {
        self.selected.send_replace(date);
    }

    /// Adds a plain note on the selected date. Returns its id.
    pub async fn add_note(&self, content: &str) -> DaybookResult<i64> {
        self.add_note_for_date(NewNote::new(self.selected_date(), content))
            .await
    }

    pub async fn add_note_for_date(&self, draft: NewNote) -> DaybookResult<i64> {
        let note = draft.into_note()?;
        self.store.insert(&note).await
    }

    pub async fn update_note(&self, note: &Note) -> DaybookResult<bool> {
        self.store.update(note).await
    }

    pub async fn delete_note(&self, note: &Note) -> DaybookResult<bool> {
        self.store.delete(note).await
    }

    /// Follows every note, newest date first.
    pub fn all_notes_feed(&self) -> NoteFeed {
        self.store.subscribe(NoteQuery::All)
    }

    /// Follows the notes of the selected date's week.
    pub fn week_feed(&self) -> WeekFeed {
        WeekFeed {
            store: self.store.clone(),
            dates: self.selected.subscribe(),
            revisions: self.store.revisions(),
            primed: false,
        }
    }

    pub fn open_editor(&self, note: &Note) -> EditorSession {
        EditorSession::from_note(note)
    }

    /// Writes the session's text and styling back to `note`'s row.
    ///
    /// A note that was never stored, or whose row was deleted while the editor
    /// was open, is inserted. Returns the note as saved.
    pub async fn save_editor(&self, session: &EditorSession, note: &Note) -> DaybookResult<Note> {
        let mut edited = session.to_note(note);
        edited.updated_at = Utc::now().timestamp_millis();

        match edited.id {
            Some(id) => {
                if !self.store.update_stamped(&edited, edited.updated_at).await? {
                    tracing::warn!(id, "note deleted while editing, storing it again");
                    self.store.insert(&edited).await?;
                }
            }
            None => {
                edited.id = Some(self.store.insert(&edited).await?);
            }
        }
        Ok(edited)
    }
}

/// Notes for the week around the selected date.
///
/// Re-queries when the selected date moves or the store is written to; only
/// the latest week is ever fetched.
pub struct WeekFeed {
    store: NoteStore,
    dates: watch::Receiver<NaiveDate>,
    revisions: watch::Receiver<u64>,
    primed: bool,
}

impl WeekFeed {
    /// The Monday..Sunday range the next result will cover.
    pub fn week(&self) -> (NaiveDate, NaiveDate) {
        week_of(*self.dates.borrow())
    }

    /// Waits for the next week's notes.
    ///
    /// Returns `None` once the planner has been dropped.
    pub async fn next(&mut self) -> Option<DaybookResult<Vec<Note>>> {
        if self.primed {
            tokio::select! {
                changed = self.dates.changed() => changed.ok()?,
                changed = self.revisions.changed() => changed.ok()?,
            }
        }
        self.primed = true;

        let date = *self.dates.borrow_and_update();
        self.revisions.borrow_and_update();

        let (monday, sunday) = week_of(date);
        Some(self.store.notes_in_range(monday, sunday).await)
    }
}
