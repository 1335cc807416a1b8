use chrono::NaiveDate;
use daybook_core::domain::{
    self, Mood, NewNote, NoteError, Priority, Tag, Weather,
};
use daybook_core::style::{SpanSet, TextSpan};

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 14).unwrap()
}

#[test]
fn draft_becomes_note_with_timestamps() -> Result<(), NoteError> {
    let note = NewNote::new(date(), "Picked up the bike")
        .mood(Mood::Happy)
        .weather(Weather::Sunny)
        .priority(Priority::Important)
        .location("Riga")
        .tag(Tag::new("errands", "#4CAF50"))
        .styles(SpanSet::from(vec![TextSpan::new(0, 6).bold(true)]))
        .into_note()?;

    assert_eq!(note.id, None);
    assert_eq!(note.date, date());
    assert_eq!(note.mood, Some(Mood::Happy));
    assert_eq!(note.weather, Some(Weather::Sunny));
    assert_eq!(note.priority, Priority::Important);
    assert_eq!(note.location, "Riga");
    assert!(note.has_tag("errands"));
    assert!(!note.has_tag("Errands"));
    assert!(note.created_at > 0);
    assert_eq!(note.created_at, note.updated_at);

    Ok(())
}

#[test]
fn blank_content_is_rejected() {
    let result = NewNote::new(date(), "   \n").into_note();
    assert!(matches!(result, Err(NoteError::EmptyContent)));
}

#[test]
fn with_content_replaces_text_and_styles_only() -> Result<(), NoteError> {
    let note = NewNote::new(date(), "first").mood(Mood::Sad).into_note()?;
    let styles = SpanSet::from(vec![TextSpan::new(0, 3).italic(true)]);

    let edited = note.with_content("second", styles.clone());

    assert_eq!(edited.content, "second");
    assert_eq!(edited.styles, styles);
    assert_eq!(edited.mood, Some(Mood::Sad));
    assert_eq!(edited.created_at, note.created_at);

    Ok(())
}

#[test]
fn tokens_parse_and_print() {
    for mood in [Mood::Happy, Mood::Neutral, Mood::Sad] {
        assert_eq!(mood.as_str().parse::<Mood>().unwrap(), mood);
    }
    for weather in [Weather::Sunny, Weather::Cloudy, Weather::Rainy] {
        assert_eq!(weather.to_string().parse::<Weather>().unwrap(), weather);
    }

    assert!(matches!("ecstatic".parse::<Mood>(), Err(NoteError::UnknownMood(_))));
    assert!(matches!("foggy".parse::<Weather>(), Err(NoteError::UnknownWeather(_))));
}

#[test]
fn priority_maps_to_levels() {
    assert_eq!(Priority::try_from(0).unwrap(), Priority::Normal);
    assert_eq!(Priority::try_from(2).unwrap(), Priority::Urgent);
    assert_eq!(Priority::Urgent.as_i64(), 2);
    assert!(matches!(Priority::try_from(7), Err(NoteError::InvalidPriority(7))));
    assert!(Priority::Urgent > Priority::Important);
}

#[test]
fn tag_lists_round_trip_and_fail_soft() {
    let tags = vec![Tag::new("work", "#2196F3"), Tag::new("idea", "#FFC107")];

    let encoded = domain::encode_tags(&tags);
    assert_eq!(domain::decode_tags(&encoded), tags);

    assert_eq!(domain::encode_tags(&[]), "");
    assert!(domain::decode_tags("").is_empty());
    assert!(domain::decode_tags("[{\"name\":\"oops\"}]").is_empty());
    assert!(domain::try_decode_tags("[{\"name\":").is_err());

    let lenient = domain::decode_tags(r##"[{"name":"a","color":"#000000","extra":1}]"##);
    assert_eq!(lenient, vec![Tag::new("a", "#000000")]);
}
