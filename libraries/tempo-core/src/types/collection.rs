/// Collection domain types (playlists and play-queues)
use super::ids::{CollectionId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a collection is used for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionKind {
    /// User-curated playlist
    Playlist,
    /// Play-queue backing the player
    Queue,
}

impl CollectionKind {
    /// Convert kind to string for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionKind::Playlist => "playlist",
            CollectionKind::Queue => "queue",
        }
    }

    /// Parse kind from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "playlist" => Some(CollectionKind::Playlist),
            "queue" => Some(CollectionKind::Queue),
            _ => None,
        }
    }
}

/// An ordered collection of track references owned by one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub id: CollectionId,
    pub owner_id: UserId,
    pub kind: CollectionKind,
    pub name: String,
    pub description: Option<String>,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,

    /// Bumped by every membership mutation
    pub updated_at: DateTime<Utc>,
}

/// Data for creating a new collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCollection {
    pub owner_id: UserId,
    pub kind: CollectionKind,
    pub name: String,
    pub description: Option<String>,
    pub is_public: bool,
}

impl CreateCollection {
    /// Private playlist with no description
    pub fn playlist(owner_id: UserId, name: impl Into<String>) -> Self {
        Self {
            owner_id,
            kind: CollectionKind::Playlist,
            name: name.into(),
            description: None,
            is_public: false,
        }
    }

    /// Play-queue for the given user
    pub fn queue(owner_id: UserId) -> Self {
        Self {
            owner_id,
            kind: CollectionKind::Queue,
            name: "Queue".to_string(),
            description: None,
            is_public: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_string_conversion() {
        assert_eq!(CollectionKind::Playlist.as_str(), "playlist");
        assert_eq!(CollectionKind::Queue.as_str(), "queue");

        assert_eq!(CollectionKind::from_str("playlist"), Some(CollectionKind::Playlist));
        assert_eq!(CollectionKind::from_str("queue"), Some(CollectionKind::Queue));
        assert_eq!(CollectionKind::from_str("album"), None);
    }

    #[test]
    fn playlist_builder_defaults_to_private() {
        let create = CreateCollection::playlist(UserId::new("user-1"), "Road Trip");
        assert_eq!(create.kind, CollectionKind::Playlist);
        assert_eq!(create.name, "Road Trip");
        assert!(!create.is_public);
        assert!(create.description.is_none());
    }
}
