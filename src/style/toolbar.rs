use super::{Selection, SpanSet};

/// Which formatting toggles read as "on" for the current selection.
///
/// Always derived from the spans and the selection; recompute it whenever
/// either changes instead of keeping a copy around.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolbarState {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub color: Option<String>,
}

impl ToolbarState {
    /// Projects the toolbar state from the spans covering all of `selection`.
    ///
    /// A caret with no selection shows everything off.
    pub fn project(spans: &SpanSet, selection: Selection) -> ToolbarState {
        if selection.is_empty() {
            return ToolbarState::default();
        }

        let (start, end) = selection.bounds();
        let mut covering = spans
            .iter()
            .filter(|span| span.start <= start && span.end >= end)
            .peekable();

        let color = covering.peek().and_then(|span| span.color.clone());
        covering.fold(
            ToolbarState {
                color,
                ..Default::default()
            },
            |mut state, span| {
                state.bold |= span.bold;
                state.italic |= span.italic;
                state.underline |= span.underline;
                state
            },
        )
    }
}
