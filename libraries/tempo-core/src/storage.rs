//! Storage trait for ordered collections

use crate::error::{Result, TempoError};
use crate::ordering;
use crate::types::{
    Collection, CollectionId, CreateCollection, Membership, OrderedEntry, PositionAssignment,
    TrackId, UserId,
};
use async_trait::async_trait;

/// Store for playlists, play-queues and their ordered memberships
///
/// The store holds no ambient identity: the acting user is passed into every
/// call that records one.
#[async_trait]
pub trait CollectionStore: Send + Sync {
    // ========================================================================
    // Collections
    // ========================================================================

    /// Create a new collection
    async fn create_collection(&self, collection: CreateCollection) -> Result<Collection>;

    /// Get collection by ID
    async fn get_collection(&self, id: &CollectionId) -> Result<Option<Collection>>;

    /// Collections owned by a user, most recently updated first
    async fn list_owned_collections(&self, owner_id: &UserId) -> Result<Vec<Collection>>;

    /// Delete a collection and all of its memberships.
    /// Returns whether a collection was deleted.
    async fn delete_collection(&self, id: &CollectionId) -> Result<bool>;

    // ========================================================================
    // Memberships
    // ========================================================================

    /// Position the next appended track would receive (1 when empty)
    async fn next_position(&self, collection_id: &CollectionId) -> Result<i64>;

    /// Append a track to the end of a collection
    ///
    /// Fails with [`TempoError::DuplicateMembership`] if the track is already
    /// present.
    async fn add_item(
        &self,
        collection_id: &CollectionId,
        track_id: &TrackId,
        added_by: &UserId,
    ) -> Result<Membership>;

    /// Remove a track. Returns `false` if it was not a member.
    async fn remove_item(&self, collection_id: &CollectionId, track_id: &TrackId) -> Result<bool>;

    /// Whether the track is in the collection
    async fn is_member(&self, collection_id: &CollectionId, track_id: &TrackId) -> Result<bool>;

    /// Number of tracks in the collection
    async fn item_count(&self, collection_id: &CollectionId) -> Result<i64>;

    /// Apply a batch of position assignments as one all-or-nothing unit
    ///
    /// Fails with [`TempoError::ReorderFailed`] and leaves the collection
    /// untouched if any assignment cannot be applied.
    async fn reorder(
        &self,
        collection_id: &CollectionId,
        assignments: &[PositionAssignment],
    ) -> Result<()>;

    /// Tracks of a collection in ascending position order
    async fn list_ordered(&self, collection_id: &CollectionId) -> Result<Vec<OrderedEntry>>;

    /// Move a track to `to_index` in read order with a single reorder
    async fn move_item(
        &self,
        collection_id: &CollectionId,
        track_id: &TrackId,
        to_index: usize,
    ) -> Result<()> {
        let current: Vec<PositionAssignment> = self
            .list_ordered(collection_id)
            .await?
            .iter()
            .map(OrderedEntry::assignment)
            .collect();

        let from_index = current
            .iter()
            .position(|a| &a.track_id == track_id)
            .ok_or_else(|| {
                TempoError::reorder_failed(format!(
                    "track {} is not in collection {}",
                    track_id, collection_id
                ))
            })?;

        if from_index == to_index {
            return Ok(());
        }

        let assignments = ordering::move_entry(&current, from_index, to_index)?;
        self.reorder(collection_id, &assignments).await
    }
}
