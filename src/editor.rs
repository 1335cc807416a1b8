use crate::domain::Note;
use crate::style::{
    self, OverlapPolicy, Selection, SpanSet, StyleCommand, StyleRuns, ToolbarState,
};

/// What happens to span offsets when the text is edited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AnchorPolicy {
    /// Offsets stay where they were; edits before a span misalign it.
    #[default]
    Static,
    /// Offsets move with the text around them.
    ShiftOnEdit,
}

/// The editing state of one note: its text, styling and selection.
#[derive(Debug, Clone)]
pub struct EditorSession {
    text: String,
    spans: SpanSet,
    selection: Selection,
    anchors: AnchorPolicy,
    overlap: OverlapPolicy,
}

impl EditorSession {
    pub fn new(text: impl Into<String>, spans: SpanSet) -> Self {
        EditorSession {
            text: text.into(),
            spans,
            selection: Selection::default(),
            anchors: AnchorPolicy::default(),
            overlap: OverlapPolicy::default(),
        }
    }

    pub fn from_note(note: &Note) -> Self {
        EditorSession::new(note.content.clone(), note.styles.clone())
    }

    pub fn anchor_policy(mut self, anchors: AnchorPolicy) -> Self {
        self.anchors = anchors;
        self
    }

    pub fn overlap_policy(mut self, overlap: OverlapPolicy) -> Self {
        self.overlap = overlap;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn spans(&self) -> &SpanSet {
        &self.spans
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Replaces the buffer and selection after the user typed or deleted.
    pub fn edit(&mut self, text: impl Into<String>, selection: Selection) {
        let text = text.into();

        if self.anchors == AnchorPolicy::ShiftOnEdit {
            let (at, removed, inserted) = changed_region(&self.text, &text);
            if removed > 0 || inserted > 0 {
                self.spans.shift_for_edit(at, removed, inserted);
            }
        }

        let len = text.chars().count();
        self.text = text;
        self.selection = selection.clamp_to(len);
    }

    pub fn select(&mut self, selection: Selection) {
        self.selection = selection.clamp_to(self.text.chars().count());
    }

    /// Applies a formatting command to the current selection.
    ///
    /// Returns `false`, changing nothing, when there is no selection.
    pub fn apply(&mut self, command: StyleCommand) -> bool {
        if self.selection.is_empty() {
            return false;
        }

        self.spans = style::update_style_with(&self.spans, self.selection, command, self.overlap);
        true
    }

    pub fn toolbar(&self) -> ToolbarState {
        ToolbarState::project(&self.spans, self.selection)
    }

    pub fn runs(&self) -> StyleRuns {
        style::resolve(&self.spans, &self.text)
    }

    pub fn serialized_styles(&self) -> String {
        style::serialize(&self.spans)
    }

    /// Copies the session's text and styling into `note`.
    pub fn to_note(&self, note: &Note) -> Note {
        note.with_content(self.text.clone(), self.spans.clone())
    }
}

/// Finds the single replaced region turning `old` into `new`, in characters:
/// `(start, removed, inserted)`.
fn changed_region(old: &str, new: &str) -> (usize, usize, usize) {
    let old: Vec<char> = old.chars().collect();
    let new: Vec<char> = new.chars().collect();

    let prefix = old
        .iter()
        .zip(new.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let max_suffix = old.len().min(new.len()) - prefix;
    let suffix = old
        .iter()
        .rev()
        .zip(new.iter().rev())
        .take(max_suffix)
        .take_while(|(a, b)| a == b)
        .count();

    (prefix, old.len() - prefix - suffix, new.len() - prefix - suffix)
}
