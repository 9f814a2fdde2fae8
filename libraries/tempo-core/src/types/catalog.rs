//! Catalog types
//!
//! The catalog owns track and artist metadata. Collections only ever hold a
//! `TrackId`; these records are what ordered reads join against.

use super::ids::{ArtistId, TrackId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub id: ArtistId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateArtist {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: TrackId,
    pub title: String,
    pub artist_id: Option<ArtistId>,
    pub duration_seconds: Option<f64>,

    /// Location of the audio object in object storage
    pub audio_url: Option<String>,

    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTrack {
    pub title: String,
    pub artist_id: Option<ArtistId>,
    pub duration_seconds: Option<f64>,
    pub audio_url: Option<String>,
}

impl CreateTrack {
    pub fn new(title: impl Into<String>, artist_id: Option<ArtistId>) -> Self {
        Self {
            title: title.into(),
            artist_id,
            duration_seconds: None,
            audio_url: None,
        }
    }
}

/// Track metadata as shown next to a collection entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackSummary {
    pub id: TrackId,
    pub title: String,
    pub artist_id: Option<ArtistId>,
    pub artist_name: Option<String>,
    pub duration_seconds: Option<f64>,
    pub audio_url: Option<String>,
}
