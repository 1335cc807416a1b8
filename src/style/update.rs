use super::{Selection, SpanSet, StyleCommand, TextSpan};

/// What happens to spans that overlap the selection without matching it exactly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OverlapPolicy {
    /// Overlapping spans are discarded whole.
    #[default]
    Drop,
    /// Overlapping spans keep their parts outside the selection.
    Clip,
}

/// Applies `command` to `selection`, returning the new span set.
///
/// Spans clear of the selection are kept in order. The first span whose range
/// equals the selection donates its attributes to the replacement span; every
/// other span touching the selection is dropped. An empty selection leaves the
/// set unchanged.
pub fn update_style(spans: &SpanSet, selection: Selection, command: StyleCommand) -> SpanSet {
    update_style_with(spans, selection, command, OverlapPolicy::Drop)
}

/// [`update_style`] with an explicit [`OverlapPolicy`].
///
/// Under [`OverlapPolicy::Clip`] the replacement span inherits from the first
/// span covering the whole selection, and overlapping spans are cut down to
/// their before/after remainders instead of vanishing.
pub fn update_style_with(
    spans: &SpanSet,
    selection: Selection,
    command: StyleCommand,
    policy: OverlapPolicy,
) -> SpanSet {
    if selection.is_empty() {
        return spans.clone();
    }

    let (sel_start, sel_end) = selection.bounds();
    let target = TextSpan::new(sel_start, sel_end);

    let base = match policy {
        OverlapPolicy::Drop => spans
            .iter()
            .find(|span| span.start == sel_start && span.end == sel_end),
        OverlapPolicy::Clip => spans
            .iter()
            .find(|span| span.start <= sel_start && span.end >= sel_end),
    };

    let mut replacement = match base {
        Some(base) => target.with_attrs_of(base),
        None => target,
    };
    command.apply_to(&mut replacement);

    let mut out = SpanSet::new();
    for span in spans {
        if span.start >= sel_end || span.end <= sel_start {
            out.push(span.clone());
            continue;
        }

        if policy == OverlapPolicy::Clip {
            if span.start < sel_start {
                out.push(TextSpan::new(span.start, sel_start).with_attrs_of(span));
            }
            if span.end > sel_end {
                out.push(TextSpan::new(sel_end, span.end).with_attrs_of(span));
            }
        }
    }
    out.push(replacement);

    out
}
