use daybook_core::domain::{Mood, NewNote};
use daybook_core::editor::{AnchorPolicy, EditorSession};
use daybook_core::style::{
    self, OverlapPolicy, Selection, SpanSet, StyleCommand, TextSpan, ToolbarState,
};

#[test]
fn apply_without_selection_does_nothing() {
    let mut editor = EditorSession::new("hello world", SpanSet::new());
    editor.select(Selection::caret(3));

    assert!(!editor.apply(StyleCommand::SetBold(true)));
    assert!(editor.spans().is_empty());
    assert_eq!(editor.serialized_styles(), "[]");
}

#[test]
fn toggles_build_up_on_the_same_selection() {
    let mut editor = EditorSession::new("hello world", SpanSet::new());
    editor.select(Selection::new(0, 5));

    assert!(editor.apply(StyleCommand::SetBold(true)));
    assert!(editor.apply(StyleCommand::SetUnderline(true)));
    assert!(editor.apply(StyleCommand::SetColor("#FF0000".into())));

    assert_eq!(
        editor.spans(),
        &SpanSet::from(vec![
            TextSpan::new(0, 5).bold(true).underline(true).color("#FF0000")
        ])
    );

    let toolbar = editor.toolbar();
    assert!(toolbar.bold && toolbar.underline && !toolbar.italic);
    assert_eq!(toolbar.color.as_deref(), Some("#FF0000"));

    let runs: Vec<_> = editor.runs().collect();
    assert_eq!(runs[0].slice(editor.text()), "hello");
    assert!(runs[0].style.bold);
}

#[test]
fn selection_is_clamped_to_the_text() {
    let mut editor = EditorSession::new("abc", SpanSet::new());
    editor.select(Selection::new(1, 50));

    assert_eq!(editor.selection(), Selection::new(1, 3));
}

#[test]
fn toolbar_follows_selection() {
    let spans = SpanSet::from(vec![
        TextSpan::new(0, 10).bold(true).color("#00FF00"),
        TextSpan::new(2, 6).italic(true).color("#0000FF"),
    ]);

    let inner = ToolbarState::project(&spans, Selection::new(3, 5));
    assert!(inner.bold && inner.italic && !inner.underline);
    assert_eq!(inner.color.as_deref(), Some("#00FF00"));

    let outer = ToolbarState::project(&spans, Selection::new(1, 8));
    assert!(outer.bold && !outer.italic);

    assert_eq!(ToolbarState::project(&spans, Selection::caret(4)), ToolbarState::default());
    assert_eq!(ToolbarState::project(&SpanSet::new(), Selection::new(0, 2)), ToolbarState::default());
}

#[test]
fn static_anchors_ignore_edits() {
    let spans = SpanSet::from(vec![TextSpan::new(6, 11).bold(true)]);
    let mut editor = EditorSession::new("hello world", spans.clone());

    editor.edit("oh, hello world", Selection::caret(4));

    assert_eq!(editor.spans(), &spans);
    assert_eq!(editor.text(), "oh, hello world");
}

#[test]
fn shifting_anchors_follow_inserted_text() {
    let spans = SpanSet::from(vec![TextSpan::new(6, 11).bold(true)]);
    let mut editor =
        EditorSession::new("hello world", spans).anchor_policy(AnchorPolicy::ShiftOnEdit);

    editor.edit("oh, hello world", Selection::caret(4));

    assert_eq!(editor.spans(), &SpanSet::from(vec![TextSpan::new(10, 15).bold(true)]));
    let runs: Vec<_> = editor.runs().collect();
    assert_eq!(runs[1].slice(editor.text()), "world");
}

#[test]
fn shifting_anchors_collapse_over_deleted_text() {
    let spans = SpanSet::from(vec![
        TextSpan::new(0, 5).italic(true),
        TextSpan::new(6, 11).bold(true),
    ]);
    let mut editor =
        EditorSession::new("hello world", spans).anchor_policy(AnchorPolicy::ShiftOnEdit);

    editor.edit("herld", Selection::caret(2));

    assert_eq!(
        editor.spans(),
        &SpanSet::from(vec![
            TextSpan::new(0, 2).italic(true),
            TextSpan::new(2, 5).bold(true),
        ])
    );
}

#[test]
fn shift_for_edit_extends_span_when_typing_at_its_end() {
    let mut spans = SpanSet::from(vec![TextSpan::new(2, 4).underline(true)]);
    spans.shift_for_edit(4, 0, 3);
    assert_eq!(spans, SpanSet::from(vec![TextSpan::new(2, 7).underline(true)]));

    let mut spans = SpanSet::from(vec![TextSpan::new(2, 4).underline(true)]);
    spans.shift_for_edit(2, 0, 3);
    assert_eq!(spans, SpanSet::from(vec![TextSpan::new(5, 7).underline(true)]));
}

#[test]
fn clip_policy_is_used_when_configured() {
    let spans = SpanSet::from(vec![TextSpan::new(0, 10).bold(true)]);
    let mut editor =
        EditorSession::new("0123456789", spans).overlap_policy(OverlapPolicy::Clip);
    editor.select(Selection::new(2, 5));

    editor.apply(StyleCommand::SetItalic(true));

    let at3 = style::style_at(editor.spans(), editor.text(), 3);
    let at7 = style::style_at(editor.spans(), editor.text(), 7);
    assert!(at3.bold && at3.italic);
    assert!(at7.bold && !at7.italic);
}

#[test]
fn to_note_carries_text_and_styles_over_the_note() {
    let date = chrono::NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
    let note = NewNote::new(date, "old text")
        .mood(Mood::Happy)
        .into_note()
        .unwrap();

    let mut editor = EditorSession::from_note(&note);
    editor.edit("new text", Selection::new(0, 3));
    editor.apply(StyleCommand::SetUnderline(true));

    let written = editor.to_note(&note);
    assert_eq!(written.content, "new text");
    assert_eq!(
        written.styles,
        SpanSet::from(vec![TextSpan::new(0, 3).underline(true)])
    );
    assert_eq!(written.mood, Some(Mood::Happy));
    assert_eq!(written.date, note.date);
    assert_eq!(note.content, "old text");
}
