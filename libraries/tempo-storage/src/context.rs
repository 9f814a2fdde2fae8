use crate::{collections, listing, memberships, positions, reorder};
use async_trait::async_trait;
use sqlx::SqlitePool;
use tempo_core::{error::Result, storage::CollectionStore, types::*};

/// Collection store backed by a local `SQLite` pool
#[derive(Clone)]
pub struct LocalCollectionStore {
    pool: SqlitePool,
}

impl LocalCollectionStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl CollectionStore for LocalCollectionStore {
    // Collections
    async fn create_collection(&self, collection: CreateCollection) -> Result<Collection> {
        collections::create(&self.pool, collection).await
    }

    async fn get_collection(&self, id: &CollectionId) -> Result<Option<Collection>> {
        collections::get_by_id(&self.pool, id).await
    }

    async fn list_owned_collections(&self, owner_id: &UserId) -> Result<Vec<Collection>> {
        collections::get_by_owner(&self.pool, owner_id).await
    }

    async fn delete_collection(&self, id: &CollectionId) -> Result<bool> {
        collections::delete(&self.pool, id).await
    }

    // Memberships
    async fn next_position(&self, collection_id: &CollectionId) -> Result<i64> {
        positions::next_position(&self.pool, collection_id).await
    }

    async fn add_item(
        &self,
        collection_id: &CollectionId,
        track_id: &TrackId,
        added_by: &UserId,
    ) -> Result<Membership> {
        memberships::add_item(&self.pool, collection_id, track_id, added_by).await
    }

    async fn remove_item(&self, collection_id: &CollectionId, track_id: &TrackId) -> Result<bool> {
        memberships::remove_item(&self.pool, collection_id, track_id).await
    }

    async fn is_member(&self, collection_id: &CollectionId, track_id: &TrackId) -> Result<bool> {
        memberships::is_member(&self.pool, collection_id, track_id).await
    }

    async fn item_count(&self, collection_id: &CollectionId) -> Result<i64> {
        memberships::item_count(&self.pool, collection_id).await
    }

    async fn reorder(
        &self,
        collection_id: &CollectionId,
        assignments: &[PositionAssignment],
    ) -> Result<()> {
        reorder::reorder(&self.pool, collection_id, assignments).await
    }

    async fn list_ordered(&self, collection_id: &CollectionId) -> Result<Vec<OrderedEntry>> {
        listing::list_ordered(&self.pool, collection_id).await
    }
}
