//! The media record, its enums, and input validation.
//!
//! `MediaType` and `Language` each have exactly one case-insensitive parse
//! (`FromStr`), shared by the input validator and the filter engine, so the
//! accepted vocabulary cannot drift between layers.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// Kind of tracked media.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Serie,
    Anime,
    Videogame,
    Book,
}

impl FromStr for MediaType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "movie" => Ok(Self::Movie),
            "serie" => Ok(Self::Serie),
            "anime" => Ok(Self::Anime),
            "videogame" => Ok(Self::Videogame),
            "book" => Ok(Self::Book),
            _ => Err(CoreError::Validation(format!("Invalid media type '{s}'."))),
        }
    }
}

/// Language the item was consumed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "spanish")]
    Spanish,
    #[serde(rename = "english")]
    English,
    #[serde(rename = "sub-spanish")]
    SubSpanish,
}

impl FromStr for Language {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "spanish" => Ok(Self::Spanish),
            "english" => Ok(Self::English),
            "sub-spanish" => Ok(Self::SubSpanish),
            _ => Err(CoreError::Validation(format!("Invalid language '{s}'."))),
        }
    }
}

/// A watched/read media item, owned exclusively by its creator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    pub id: DbId,
    pub owner: DbId,
    pub name: String,
    pub completed_date: NaiveDate,
    /// Rating in `[0, 10]`, inclusive at both ends.
    pub score: f64,
    pub poster: String,
    pub media_type: MediaType,
    pub language: Language,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Incoming media payload before validation.
///
/// Every field is optional at the wire level so a missing one can be
/// reported by name rather than as an opaque deserialization failure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaDraft {
    pub name: Option<String>,
    pub completed_date: Option<String>,
    pub score: Option<f64>,
    pub poster: Option<String>,
    pub media_type: Option<String>,
    pub language: Option<String>,
    pub comment: Option<String>,
}

impl MediaDraft {
    /// Validate the draft and attach it to its owner, producing a storable
    /// item with a fresh id. Fails on the first invalid or missing field,
    /// naming it.
    pub fn into_item(self, owner: DbId) -> Result<MediaItem, CoreError> {
        let name = require(self.name, "name")?;
        let completed_raw = require(self.completed_date, "completedDate")?;
        let completed_date = parse_date(&completed_raw).ok_or_else(|| {
            CoreError::Validation(
                "Property 'completedDate' must be a date in YYYY-MM-DD format.".into(),
            )
        })?;

        let score = self
            .score
            .ok_or_else(|| CoreError::Validation("Property 'score' missing.".into()))?;
        if !score_in_range(score) {
            return Err(CoreError::Validation(
                "Property 'score' must be a number between 0 and 10.".into(),
            ));
        }

        let poster = require(self.poster, "poster")?;
        let media_type: MediaType = require(self.media_type, "mediaType")?.parse()?;
        let language: Language = require(self.language, "language")?.parse()?;

        Ok(MediaItem {
            id: DbId::new_v4(),
            owner,
            name,
            completed_date,
            score,
            poster,
            media_type,
            language,
            comment: self.comment,
        })
    }
}

fn require(value: Option<String>, name: &str) -> Result<String, CoreError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(CoreError::Validation(format!("Property '{name}' missing."))),
    }
}

/// Parse a `YYYY-MM-DD` date. Shared by input validation and the filter
/// engine's range bounds.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Inclusive score bounds.
pub fn score_in_range(score: f64) -> bool {
    (0.0..=10.0).contains(&score)
}
