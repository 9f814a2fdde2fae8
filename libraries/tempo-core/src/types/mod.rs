mod catalog;
mod collection;
mod ids;
mod membership;

pub use catalog::{Artist, CreateArtist, CreateTrack, Track, TrackSummary};
pub use collection::{Collection, CollectionKind, CreateCollection};
pub use ids::{ArtistId, CollectionId, TrackId, UserId};
pub use membership::{Membership, OrderedEntry, PositionAssignment};
