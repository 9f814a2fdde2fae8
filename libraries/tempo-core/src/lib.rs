//! Tempo Core
//!
//! Platform-agnostic types, the storage trait, and error handling for the
//! Tempo ordered-collection model (playlists and play-queues).
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Collection`, `Membership`, `OrderedEntry`, catalog records
//! - **Core Traits**: `CollectionStore`
//! - **Ordering**: pure helpers that build reorder batches
//! - **Error Handling**: Unified `TempoError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use tempo_core::ordering::{assign_sequential, move_entry};
//! use tempo_core::types::TrackId;
//!
//! let order = assign_sequential(&[TrackId::new("a"), TrackId::new("b")]);
//! let moved = move_entry(&order, 1, 0).unwrap();
//! assert_eq!(moved[0].track_id.as_str(), "b");
//! assert_eq!(moved[0].position, 1);
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod ordering;
pub mod storage;
pub mod types;

pub use error::{Result, TempoError};
pub use storage::CollectionStore;

pub use types::{
    Artist, ArtistId, Collection, CollectionId, CollectionKind, CreateArtist, CreateCollection,
    CreateTrack, Membership, OrderedEntry, PositionAssignment, Track, TrackId, TrackSummary,
    UserId,
};
