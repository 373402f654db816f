//! Media item model
//!
//! `MediaItem` is the only persisted entity. `NewMedia` and `MediaPatch` are the
//! create and partial-update payloads; both are validated and normalised here
//! before any store touches its state.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result, ValidationErrors};
use crate::tags;

/// Opaque identifier of the user owning a collection
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Fallback owner for requests that carry no session
    pub const ANONYMOUS: &'static str = "00000000-0000-0000-0000-000000000001";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn anonymous() -> Self {
        Self(Self::ANONYMOUS.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    Movie,
    Show,
    Book,
}

impl MediaType {
    pub const ALL: [MediaType; 3] = [MediaType::Movie, MediaType::Show, MediaType::Book];

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Show => "show",
            MediaType::Book => "book",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "movie" => Ok(MediaType::Movie),
            "show" => Ok(MediaType::Show),
            "book" => Ok(MediaType::Book),
            other => Err(Error::invalid("type", format!("unknown media type '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

impl MediaStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaStatus::NotStarted => "not_started",
            MediaStatus::InProgress => "in_progress",
            MediaStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for MediaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "not_started" => Ok(MediaStatus::NotStarted),
            "in_progress" => Ok(MediaStatus::InProgress),
            "completed" => Ok(MediaStatus::Completed),
            other => Err(Error::invalid("status", format!("unknown status '{}'", other))),
        }
    }
}

/// One tracked show, movie or book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: MediaType,
    #[serde(default)]
    pub status: MediaStatus,
    pub year: Option<i32>,
    pub cover_url: Option<String>,
    #[serde(default)]
    pub vibes: Vec<String>,
}

impl MediaItem {
    /// Build a stored item from a validated draft
    pub fn from_draft(id: String, draft: NewMedia) -> Self {
        Self {
            id,
            title: draft.title,
            kind: draft.kind,
            status: draft.status,
            year: draft.year,
            cover_url: draft.cover_url,
            vibes: draft.vibes,
        }
    }

    /// Apply the fields present in `patch`, leaving the rest untouched
    pub fn apply(&mut self, patch: MediaPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(year) = patch.year {
            self.year = year;
        }
        if let Some(cover_url) = patch.cover_url {
            self.cover_url = cover_url;
        }
        if let Some(vibes) = patch.vibes {
            self.vibes = vibes;
        }
    }
}

/// Create payload: `{title, type, status?, year?, coverUrl?, vibes?}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMedia {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: MediaType,
    #[serde(default)]
    pub status: MediaStatus,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub cover_url: Option<String>,
    #[serde(default)]
    pub vibes: Vec<String>,
}

impl NewMedia {
    pub fn new(title: impl Into<String>, kind: MediaType) -> Self {
        Self {
            title: title.into(),
            kind,
            status: MediaStatus::default(),
            year: None,
            cover_url: None,
            vibes: Vec::new(),
        }
    }

    pub fn with_status(mut self, status: MediaStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_vibes<I, S>(mut self, vibes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.vibes = vibes.into_iter().map(Into::into).collect();
        self
    }

    /// Validate and normalise: trimmed non-empty title, duplicate-free vibes
    pub fn validated(mut self) -> Result<Self> {
        let mut errors = ValidationErrors::new();
        self.title = self.title.trim().to_string();
        if self.title.is_empty() {
            errors.push("title", "must not be empty");
        }
        errors.into_result()?;

        self.vibes = tags::normalize(&self.vibes);
        Ok(self)
    }
}

/// Partial update payload; absent fields are left untouched
///
/// `year` and `coverUrl` distinguish an absent key (`None`) from an explicit
/// `null` (`Some(None)`), which clears the stored value. The other fields are
/// required on the item, so `null` for them fails deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaPatch {
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<String>,
    #[serde(
        default,
        rename = "type",
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<MediaType>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<MediaStatus>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub year: Option<Option<i32>>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub cover_url: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub vibes: Option<Vec<String>>,
}

impl MediaPatch {
    /// Patch touching only the tag list
    pub fn vibes(vibes: Vec<String>) -> Self {
        Self {
            vibes: Some(vibes),
            ..Self::default()
        }
    }

    /// Patch touching only the status
    pub fn status(status: MediaStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Validate and normalise the fields that are present
    pub fn validated(mut self) -> Result<Self> {
        let mut errors = ValidationErrors::new();
        if let Some(title) = self.title.as_mut() {
            *title = title.trim().to_string();
            if title.is_empty() {
                errors.push("title", "must not be empty");
            }
        }
        errors.into_result()?;

        if let Some(vibes) = self.vibes.as_mut() {
            *vibes = tags::normalize(vibes);
        }
        Ok(self)
    }
}

/// Maps a present key to `Some`, so an absent key stays `None`
///
/// `null` is only accepted when `T` itself is an `Option`.
fn present<'de, T, D>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}
