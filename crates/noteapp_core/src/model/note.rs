//! Note domain model and ordering selectors.
//!
//! # Responsibility
//! - Define the note record rendered by list and add/edit screens.
//! - Define sort selectors (`SortKey`, `SortMode`) and their comparators.
//!
//! # Invariants
//! - `id == 0` marks a note that has never been persisted.
//! - `NoteColor` declaration order is its ordinal; color sorting relies on it.
//! - `SortMode::Descending` is the exact inversion of the ascending comparator.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Note identifier. `0` is reserved for "new, unsaved".
pub type NoteId = i64;

/// Sentinel id for notes that were not persisted yet.
pub const NEW_NOTE_ID: NoteId = 0;

/// Fixed note color palette.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum NoteColor {
    #[default]
    #[serde(rename = "color_1")]
    Color1,
    #[serde(rename = "color_2")]
    Color2,
    #[serde(rename = "color_3")]
    Color3,
    #[serde(rename = "color_4")]
    Color4,
    #[serde(rename = "color_5")]
    Color5,
}

impl NoteColor {
    /// Palette in ordinal order.
    pub const ALL: [NoteColor; 5] = [
        NoteColor::Color1,
        NoteColor::Color2,
        NoteColor::Color3,
        NoteColor::Color4,
        NoteColor::Color5,
    ];

    /// Zero-based position in the palette.
    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// Stable storage/wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Color1 => "color_1",
            Self::Color2 => "color_2",
            Self::Color3 => "color_3",
            Self::Color4 => "color_4",
            Self::Color5 => "color_5",
        }
    }
}

impl Display for NoteColor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown color text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNoteColorError(pub String);

impl Display for ParseNoteColorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unsupported note color `{}`; expected color_1..color_5 or 1..5",
            self.0
        )
    }
}

impl Error for ParseNoteColorError {}

impl FromStr for NoteColor {
    type Err = ParseNoteColorError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        let digit = normalized
            .strip_prefix("color_")
            .unwrap_or(normalized.as_str());
        match digit {
            "1" => Ok(Self::Color1),
            "2" => Ok(Self::Color2),
            "3" => Ok(Self::Color3),
            "4" => Ok(Self::Color4),
            "5" => Ok(Self::Color5),
            _ => Err(ParseNoteColorError(value.trim().to_string())),
        }
    }
}

/// User-authored note record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Repository-assigned id, `0` until first save.
    pub id: NoteId,
    pub title: String,
    pub content: String,
    /// Unix epoch milliseconds of the last save.
    pub timestamp: i64,
    pub color: NoteColor,
}

impl Note {
    /// Creates an unsaved note.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        timestamp: i64,
        color: NoteColor,
    ) -> Self {
        Self::with_id(NEW_NOTE_ID, title, content, timestamp, color)
    }

    /// Creates a note with a caller-provided id.
    ///
    /// Used by undo/import paths where identity already exists.
    pub fn with_id(
        id: NoteId,
        title: impl Into<String>,
        content: impl Into<String>,
        timestamp: i64,
        color: NoteColor,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
            timestamp,
            color,
        }
    }

    /// Returns whether this note has never been persisted.
    pub fn is_new(&self) -> bool {
        self.id == NEW_NOTE_ID
    }
}

/// Attribute used to order the note list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Title,
    Timestamp,
    Color,
}

impl SortKey {
    /// Ascending comparator for this key.
    pub fn comparator(self) -> fn(&Note, &Note) -> Ordering {
        match self {
            Self::Title => |a: &Note, b: &Note| a.title.cmp(&b.title),
            Self::Timestamp => |a: &Note, b: &Note| a.timestamp.cmp(&b.timestamp),
            Self::Color => |a: &Note, b: &Note| a.color.ordinal().cmp(&b.color.ordinal()),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Timestamp => "timestamp",
            Self::Color => "color",
        }
    }
}

impl Display for SortKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown sort key text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSortKeyError(pub String);

impl Display for ParseSortKeyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unsupported sort key `{}`; expected title|timestamp|color",
            self.0
        )
    }
}

impl Error for ParseSortKeyError {}

impl FromStr for SortKey {
    type Err = ParseSortKeyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "title" => Ok(Self::Title),
            "timestamp" => Ok(Self::Timestamp),
            "color" => Ok(Self::Color),
            _ => Err(ParseSortKeyError(value.trim().to_string())),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    #[default]
    Ascending,
    Descending,
}

impl SortMode {
    /// Applies this direction to an ascending comparison result.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

impl Display for SortMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown sort mode text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSortModeError(pub String);

impl Display for ParseSortModeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unsupported sort mode `{}`; expected asc|desc", self.0)
    }
}

impl Error for ParseSortModeError {}

impl FromStr for SortMode {
    type Err = ParseSortModeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            _ => Err(ParseSortModeError(value.trim().to_string())),
        }
    }
}

/// Effective list ordering: key plus direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NoteOrder {
    pub key: SortKey,
    pub mode: SortMode,
}

impl NoteOrder {
    pub fn new(key: SortKey, mode: SortMode) -> Self {
        Self { key, mode }
    }

    /// Compares two notes under this ordering.
    pub fn compare(&self, a: &Note, b: &Note) -> Ordering {
        self.mode.apply((self.key.comparator())(a, b))
    }

    /// Sorts notes in place. Equal keys keep their relative order.
    pub fn sort(&self, notes: &mut [Note]) {
        let comparator = self.key.comparator();
        notes.sort_by(|a, b| self.mode.apply(comparator(a, b)));
    }
}
