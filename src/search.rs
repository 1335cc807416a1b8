//! Browsing notes by tag and text.

use crate::domain::{Note, Tag};
use std::collections::HashSet;

/// What to look for in a list of notes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteFilter {
    /// Exact tag name a note must carry.
    pub tag: Option<String>,

    /// Case-insensitive text to find in the content or a tag name.
    pub text: Option<String>,
}

impl NoteFilter {
    pub fn tag(name: impl Into<String>) -> Self {
        NoteFilter {
            tag: Some(name.into()),
            text: None,
        }
    }

    pub fn text(query: impl Into<String>) -> Self {
        NoteFilter {
            tag: None,
            text: Some(query.into()),
        }
    }

    pub fn with_text(mut self, query: impl Into<String>) -> Self {
        self.text = Some(query.into());
        self
    }

    /// Returns `true` if neither a tag nor any text is set.
    pub fn is_empty(&self) -> bool {
        self.tag.is_none() && self.text.as_deref().is_none_or(str::is_empty)
    }

    pub fn matches(&self, note: &Note) -> bool {
        let tag_ok = self.tag.as_deref().is_none_or(|name| note.has_tag(name));

        let text_ok = match self.text.as_deref() {
            None | Some("") => true,
            Some(query) => {
                let needle = query.to_lowercase();
                note.content.to_lowercase().contains(&needle)
                    || note
                        .tags
                        .iter()
                        .any(|tag| tag.name.to_lowercase().contains(&needle))
            }
        };

        tag_ok && text_ok
    }
}

/// The notes matching `filter`, most recently updated first.
///
/// An empty filter selects nothing: there is nothing to search for yet.
pub fn filter_notes(notes: &[Note], filter: &NoteFilter) -> Vec<Note> {
    if filter.is_empty() {
        return Vec::new();
    }

    let mut found: Vec<Note> = notes
        .iter()
        .filter(|note| filter.matches(note))
        .cloned()
        .collect();
    found.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    found
}

/// Every distinct tag across `notes`, by name, first occurrence first.
pub fn collect_tags(notes: &[Note]) -> Vec<Tag> {
    let mut seen = HashSet::new();
    notes
        .iter()
        .flat_map(|note| note.tags.iter())
        .filter(|tag| seen.insert(tag.name.as_str()))
        .cloned()
        .collect()
}
