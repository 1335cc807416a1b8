//! Resolving a [`SpanSet`] into paintable runs of text.

use super::{SpanSet, TextSpan};
use std::fmt;
use std::ops::Range;

/// An RGB color with alpha, parsed from a span's color token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 0xFF }
    }

    /// Parses `RRGGBB` or `AARRGGBB`, with or without a leading `#`.
    ///
    /// Returns `None` for anything else.
    pub fn parse(token: &str) -> Option<Color> {
        let hex = token.trim().strip_prefix('#').unwrap_or(token.trim());
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }

        let value = u32::from_str_radix(hex, 16).ok()?;
        let [a, r, g, b] = value.to_be_bytes();
        match hex.len() {
            6 => Some(Color::rgb(r, g, b)),
            8 => Some(Color { r, g, b, a }),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 0xFF {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.a, self.r, self.g, self.b)
        }
    }
}

/// The combined effect of every span over one character.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolvedStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub color: Option<Color>,
}

impl ResolvedStyle {
    /// Returns `true` if nothing is applied.
    pub fn is_plain(&self) -> bool {
        *self == ResolvedStyle::default()
    }
}

/// A maximal stretch of characters sharing one [`ResolvedStyle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledRun {
    /// Character offsets of the run.
    pub range: Range<usize>,
    pub style: ResolvedStyle,
}

impl StyledRun {
    /// The run's text within the buffer it was resolved against.
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        let start = byte_offset(text, self.range.start);
        let end = byte_offset(text, self.range.end);
        &text[start..end]
    }
}

/// A span clamped to the buffer, with its color already parsed.
#[derive(Debug, Clone)]
struct Placed {
    range: Range<usize>,
    bold: bool,
    italic: bool,
    underline: bool,
    color: Option<Color>,
}

impl Placed {
    fn new(span: &TextSpan, len: usize) -> Option<Placed> {
        let range = span.clamped(len);
        if range.is_empty() {
            return None;
        }

        let color = span.color.as_deref().and_then(|token| {
            let parsed = Color::parse(token);
            if parsed.is_none() {
                tracing::debug!(token, "ignoring unparseable span color");
            }
            parsed
        });

        Some(Placed {
            range,
            bold: span.bold,
            italic: span.italic,
            underline: span.underline,
            color,
        })
    }
}

/// Lazily yields the [`StyledRun`]s of a text, in order, covering all of it.
///
/// Cloning restarts from the current position; call [`resolve`] again after
/// the spans or the text change.
#[derive(Debug, Clone)]
pub struct StyleRuns {
    placed: Vec<Placed>,
    cuts: Vec<usize>,
    pos: usize,
}

impl StyleRuns {
    fn style_at(&self, offset: usize) -> ResolvedStyle {
        self.placed
            .iter()
            .filter(|p| p.range.contains(&offset))
            .fold(ResolvedStyle::default(), |mut acc, p| {
                acc.bold |= p.bold;
                acc.italic |= p.italic;
                acc.underline |= p.underline;
                if p.color.is_some() {
                    acc.color = p.color;
                }
                acc
            })
    }
}

impl Iterator for StyleRuns {
    type Item = StyledRun;

    fn next(&mut self) -> Option<StyledRun> {
        if self.pos + 1 >= self.cuts.len() {
            return None;
        }

        let start = self.cuts[self.pos];
        let style = self.style_at(start);
        self.pos += 1;

        // Style is constant between cuts, so checking each cut is enough.
        while self.pos + 1 < self.cuts.len() && self.style_at(self.cuts[self.pos]) == style {
            self.pos += 1;
        }

        Some(StyledRun {
            range: start..self.cuts[self.pos],
            style,
        })
    }
}

/// Resolves `spans` over `text` into runs of identical style.
///
/// Booleans combine with OR; the last span (in set order) with a readable
/// color decides the color. Offsets outside the text are clamped.
pub fn resolve(spans: &SpanSet, text: &str) -> StyleRuns {
    let len = text.chars().count();
    let placed: Vec<Placed> = spans.iter().filter_map(|s| Placed::new(s, len)).collect();

    let mut cuts = vec![0, len];
    for p in &placed {
        cuts.push(p.range.start);
        cuts.push(p.range.end);
    }
    cuts.sort_unstable();
    cuts.dedup();

    StyleRuns {
        placed,
        cuts,
        pos: 0,
    }
}

/// Resolves the style of the single character at `offset`.
pub fn style_at(spans: &SpanSet, text: &str, offset: usize) -> ResolvedStyle {
    let len = text.chars().count();
    if offset >= len {
        return ResolvedStyle::default();
    }

    let runs = StyleRuns {
        placed: spans.iter().filter_map(|s| Placed::new(s, len)).collect(),
        cuts: Vec::new(),
        pos: 0,
    };
    runs.style_at(offset)
}

fn byte_offset(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map(|(at, _)| at)
        .unwrap_or(text.len())
}
