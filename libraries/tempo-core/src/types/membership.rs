//! Membership types: which track sits where in which collection

use super::catalog::TrackSummary;
use super::ids::{CollectionId, TrackId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The record linking one track to one collection at one position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    pub collection_id: CollectionId,
    pub track_id: TrackId,

    /// 1-based, unique within the collection, gaps allowed
    pub position: i64,

    pub added_by: UserId,
    pub added_at: DateTime<Utc>,
}

/// Target position for one track in a reorder batch
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PositionAssignment {
    pub track_id: TrackId,
    pub position: i64,
}

impl PositionAssignment {
    pub fn new(track_id: TrackId, position: i64) -> Self {
        Self { track_id, position }
    }
}

impl From<(TrackId, i64)> for PositionAssignment {
    fn from((track_id, position): (TrackId, i64)) -> Self {
        Self::new(track_id, position)
    }
}

/// One row of an ordered collection read, with denormalized track data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderedEntry {
    pub track: TrackSummary,
    pub position: i64,
    pub added_by: UserId,
    pub added_at: DateTime<Utc>,
}

impl OrderedEntry {
    pub fn track_id(&self) -> &TrackId {
        &self.track.id
    }

    /// The `(track, position)` pair this entry currently occupies
    pub fn assignment(&self) -> PositionAssignment {
        PositionAssignment::new(self.track.id.clone(), self.position)
    }
}
