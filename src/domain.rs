use crate::style::SpanSet;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NoteError {
    #[error("note content is empty")]
    EmptyContent,
    #[error("unknown mood: {0}")]
    UnknownMood(String),
    #[error("unknown weather: {0}")]
    UnknownWeather(String),
    #[error("priority out of range: {0}")]
    InvalidPriority(i64),
    #[error("malformed tag list: {0}")]
    MalformedTags(#[from] serde_json::Error),
}

/// How the day felt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mood {
    Happy,
    Neutral,
    Sad,
}

impl Mood {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Neutral => "neutral",
            Mood::Sad => "sad",
        }
    }
}

impl FromStr for Mood {
    type Err = NoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "happy" => Ok(Mood::Happy),
            "neutral" => Ok(Mood::Neutral),
            "sad" => Ok(Mood::Sad),
            other => Err(NoteError::UnknownMood(other.to_owned())),
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weather {
    Sunny,
    Cloudy,
    Rainy,
}

impl Weather {
    pub fn as_str(&self) -> &'static str {
        match self {
            Weather::Sunny => "sunny",
            Weather::Cloudy => "cloudy",
            Weather::Rainy => "rainy",
        }
    }
}

impl FromStr for Weather {
    type Err = NoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sunny" => Ok(Weather::Sunny),
            "cloudy" => Ok(Weather::Cloudy),
            "rainy" => Ok(Weather::Rainy),
            other => Err(NoteError::UnknownWeather(other.to_owned())),
        }
    }
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    #[default]
    Normal = 0,
    Important = 1,
    Urgent = 2,
}

impl Priority {
    pub fn as_i64(self) -> i64 {
        self as i64
    }
}

impl TryFrom<i64> for Priority {
    type Error = NoteError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Priority::Normal),
            1 => Ok(Priority::Important),
            2 => Ok(Priority::Urgent),
            other => Err(NoteError::InvalidPriority(other)),
        }
    }
}

/// A colored label attached to a note.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    pub color: String,
}

impl Tag {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Tag {
            name: name.into(),
            color: color.into(),
        }
    }
}

/// Encodes a tag list as `[{"name":…,"color":…}]`.
pub fn encode_tags(tags: &[Tag]) -> String {
    if tags.is_empty() {
        return String::new();
    }
    match serde_json::to_string(tags) {
        Ok(encoded) => encoded,
        Err(e) => {
            tracing::warn!(error = %e, "failed to encode tags, storing none");
            String::new()
        }
    }
}

/// Decodes a stored tag list. Blank input is an empty list.
pub fn try_decode_tags(encoded: &str) -> Result<Vec<Tag>, NoteError> {
    if encoded.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(encoded)?)
}

/// Decodes a stored tag list, treating a corrupt one as empty.
pub fn decode_tags(encoded: &str) -> Vec<Tag> {
    try_decode_tags(encoded).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "discarding unreadable tags");
        Vec::new()
    })
}

/// A journal entry for one calendar date.
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    /// Row id, `None` until the note has been stored.
    pub id: Option<i64>,
    pub date: NaiveDate,
    pub content: String,
    pub styles: SpanSet,
    pub tags: Vec<Tag>,
    pub mood: Option<Mood>,
    pub priority: Priority,
    pub weather: Option<Weather>,
    pub location: String,
    /// Milliseconds since the Unix epoch.
    pub created_at: i64,
    /// Milliseconds since the Unix epoch.
    pub updated_at: i64,
}

impl Note {
    /// Returns a copy of this note with new content and styling.
    ///
    /// Does not touch storage; hand the result to the store to persist it.
    pub fn with_content(&self, content: impl Into<String>, styles: SpanSet) -> Note {
        Note {
            content: content.into(),
            styles,
            ..self.clone()
        }
    }

    /// Returns `true` if any tag on this note has exactly `name`.
    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|tag| tag.name == name)
    }
}

/// A note that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewNote {
    pub date: NaiveDate,
    pub content: String,
    pub styles: SpanSet,
    pub tags: Vec<Tag>,
    pub mood: Option<Mood>,
    pub priority: Priority,
    pub weather: Option<Weather>,
    pub location: String,
}

impl NewNote {
    pub fn new(date: NaiveDate, content: impl Into<String>) -> Self {
        NewNote {
            date,
            content: content.into(),
            styles: SpanSet::new(),
            tags: Vec::new(),
            mood: None,
            priority: Priority::Normal,
            weather: None,
            location: String::new(),
        }
    }

    pub fn styles(mut self, styles: SpanSet) -> Self {
        self.styles = styles;
        self
    }

    pub fn tag(mut self, tag: Tag) -> Self {
        self.tags.push(tag);
        self
    }

    pub fn mood(mut self, mood: Mood) -> Self {
        self.mood = Some(mood);
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn weather(mut self, weather: Weather) -> Self {
        self.weather = Some(weather);
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Validates the draft and stamps both timestamps with the current time.
    ///
    /// Returns [`NoteError::EmptyContent`] if the content is blank.
    pub fn into_note(self) -> Result<Note, NoteError> {
        if self.content.trim().is_empty() {
            return Err(NoteError::EmptyContent);
        }

        let now = Utc::now().timestamp_millis();
        Ok(Note {
            id: None,
            date: self.date,
            content: self.content,
            styles: self.styles,
            tags: self.tags,
            mood: self.mood,
            priority: self.priority,
            weather: self.weather,
            location: self.location,
            created_at: now,
            updated_at: now,
        })
    }
}
