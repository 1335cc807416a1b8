//! Inline rich-text styling for note content.
//!
//! A note's styling is a [`SpanSet`]: an ordered list of [`TextSpan`]s, each
//! marking a half-open character range `[start, end)` of the note text as
//! bold, italic, underlined and/or colored. Spans may overlap or repeat; at
//! render time their attributes are combined (see [`resolve`]).
//!
//! Offsets count Unicode scalar values (`char`s), not bytes.
//!
//! # Usage
//!
//! ```rust
//! use daybook_core::style::{self, Selection, SpanSet, StyleCommand};
//!
//! let spans = SpanSet::new();
//! let spans = style::update_style(&spans, Selection::new(0, 5), StyleCommand::SetBold(true));
//!
//! let stored = style::serialize(&spans);
//! assert_eq!(style::deserialize(&stored), spans);
//!
//! let runs: Vec<_> = style::resolve(&spans, "hello world").collect();
//! assert!(runs[0].style.bold);
//! ```

pub mod codec;
pub mod resolve;
pub mod toolbar;
pub mod update;

use serde::{Deserialize, Serialize};
use std::ops::Range;

pub use codec::{DecodeError, deserialize, serialize, try_deserialize};
pub use resolve::{Color, ResolvedStyle, StyleRuns, StyledRun, resolve, style_at};
pub use toolbar::ToolbarState;
pub use update::{OverlapPolicy, update_style, update_style_with};

/// One styling annotation over the character range `[start, end)`.
///
/// Offsets are signed so that whatever was persisted can be carried through
/// untouched; out-of-range values are clamped when resolving.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredSpan")]
pub struct TextSpan {
    pub start: i64,
    pub end: i64,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Wire form of [`TextSpan`], also accepting the older `isBold` /
/// `isItalic` / `isUnderline` names. A record carrying both spellings gets
/// the attribute if either one is set.
#[derive(Deserialize)]
struct StoredSpan {
    start: i64,
    end: i64,
    #[serde(default)]
    bold: bool,
    #[serde(default, rename = "isBold")]
    is_bold: bool,
    #[serde(default)]
    italic: bool,
    #[serde(default, rename = "isItalic")]
    is_italic: bool,
    #[serde(default)]
    underline: bool,
    #[serde(default, rename = "isUnderline")]
    is_underline: bool,
    #[serde(default)]
    color: Option<String>,
}

impl From<StoredSpan> for TextSpan {
    fn from(raw: StoredSpan) -> Self {
        TextSpan {
            start: raw.start,
            end: raw.end,
            bold: raw.bold || raw.is_bold,
            italic: raw.italic || raw.is_italic,
            underline: raw.underline || raw.is_underline,
            color: raw.color,
        }
    }
}

impl TextSpan {
    /// Creates an unstyled span over `[start, end)`.
    pub fn new(start: i64, end: i64) -> Self {
        TextSpan {
            start,
            end,
            ..Default::default()
        }
    }

    pub fn bold(mut self, on: bool) -> Self {
        self.bold = on;
        self
    }

    pub fn italic(mut self, on: bool) -> Self {
        self.italic = on;
        self
    }

    pub fn underline(mut self, on: bool) -> Self {
        self.underline = on;
        self
    }

    pub fn color(mut self, token: impl Into<String>) -> Self {
        self.color = Some(token.into());
        self
    }

    /// Returns `true` if the span covers no characters.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Returns `true` if the character at `offset` is inside the span.
    pub fn contains(&self, offset: i64) -> bool {
        self.start <= offset && offset < self.end
    }

    /// Copies the styling attributes of `other` onto a span with this range.
    pub(crate) fn with_attrs_of(&self, other: &TextSpan) -> TextSpan {
        TextSpan {
            start: self.start,
            end: self.end,
            bold: other.bold,
            italic: other.italic,
            underline: other.underline,
            color: other.color.clone(),
        }
    }

    /// Clamps the range to `[0, len]`.
    pub(crate) fn clamped(&self, len: usize) -> Range<usize> {
        let len = len as i64;
        let start = self.start.clamp(0, len) as usize;
        let end = self.end.clamp(0, len) as usize;
        start..end.max(start)
    }
}

/// The full styling of one text buffer.
///
/// Insertion order matters: it decides which color wins when spans overlap,
/// and it is preserved through serialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpanSet {
    spans: Vec<TextSpan>,
}

impl SpanSet {
    pub fn new() -> Self {
        SpanSet::default()
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TextSpan> {
        self.spans.iter()
    }

    pub fn as_slice(&self) -> &[TextSpan] {
        &self.spans
    }

    pub fn push(&mut self, span: TextSpan) {
        self.spans.push(span);
    }

    /// Re-anchors every span after a text edit.
    ///
    /// The edit replaced `removed` characters starting at `at` with `inserted`
    /// characters. Offsets past the removed region move by the length delta;
    /// offsets inside it collapse onto the edit point. Spans that end up empty
    /// are kept, since emptiness carries no visible effect.
    pub fn shift_for_edit(&mut self, at: usize, removed: usize, inserted: usize) {
        let at = at as i64;
        let removed_end = at + removed as i64;
        let delta = inserted as i64 - removed as i64;

        let shift = |offset: i64| -> i64 {
            if offset < at {
                offset
            } else if offset < removed_end {
                at
            } else {
                offset + delta
            }
        };

        for span in &mut self.spans {
            // Typing at a span's end extends it; typing at its start pushes it right.
            span.start = shift(span.start);
            span.end = shift(span.end).max(span.start);
        }
    }
}

impl From<Vec<TextSpan>> for SpanSet {
    fn from(spans: Vec<TextSpan>) -> Self {
        SpanSet { spans }
    }
}

impl FromIterator<TextSpan> for SpanSet {
    fn from_iter<I: IntoIterator<Item = TextSpan>>(iter: I) -> Self {
        SpanSet {
            spans: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for SpanSet {
    type Item = TextSpan;
    type IntoIter = std::vec::IntoIter<TextSpan>;

    fn into_iter(self) -> Self::IntoIter {
        self.spans.into_iter()
    }
}

impl<'a> IntoIterator for &'a SpanSet {
    type Item = &'a TextSpan;
    type IntoIter = std::slice::Iter<'a, TextSpan>;

    fn into_iter(self) -> Self::IntoIter {
        self.spans.iter()
    }
}

/// The user's highlighted range, `start <= end`. Empty when it is just a caret.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    /// Builds a selection from two offsets in either order.
    pub fn new(a: usize, b: usize) -> Self {
        Selection {
            start: a.min(b),
            end: a.max(b),
        }
    }

    /// A caret with nothing selected.
    pub fn caret(at: usize) -> Self {
        Selection { start: at, end: at }
    }

    /// Returns `true` for a caret, and for an inverted range assembled by
    /// hand from the public fields.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Limits both ends to `len`.
    pub fn clamp_to(self, len: usize) -> Self {
        Selection::new(self.start.min(len), self.end.min(len))
    }

    pub(crate) fn bounds(&self) -> (i64, i64) {
        (self.start as i64, self.end as i64)
    }
}

/// A formatting action issued for the current selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleCommand {
    SetBold(bool),
    SetItalic(bool),
    SetUnderline(bool),
    SetColor(String),
}

impl StyleCommand {
    /// Writes the attribute this command names onto `span`.
    pub fn apply_to(&self, span: &mut TextSpan) {
        match self {
            StyleCommand::SetBold(on) => span.bold = *on,
            StyleCommand::SetItalic(on) => span.italic = *on,
            StyleCommand::SetUnderline(on) => span.underline = *on,
            StyleCommand::SetColor(token) => span.color = Some(token.clone()),
        }
    }
}
