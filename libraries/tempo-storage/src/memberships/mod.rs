//! Membership store: which tracks are in which collection, and where

use crate::positions::NEXT_POSITION_SUBQUERY;
use crate::{catalog, collections, time};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tempo_core::{error::Result, types::*, TempoError};

/// Append a track to the end of a collection
///
/// The next position is computed inside the INSERT itself, so the read of
/// the current maximum and the write of the new row are one statement.
/// `SQLite` runs one writer at a time, and the `(collection_id, position)`
/// unique index rejects any slot that is already taken.
pub async fn add_item(
    pool: &SqlitePool,
    collection_id: &CollectionId,
    track_id: &TrackId,
    added_by: &UserId,
) -> Result<Membership> {
    match append(pool, collection_id, track_id, added_by).await {
        Ok(Some(membership)) => {
            tracing::debug!(
                collection = %collection_id,
                track = %track_id,
                position = membership.position,
                "track added to collection"
            );
            Ok(membership)
        }
        Ok(None) => Err(TempoError::DuplicateMembership {
            collection_id: collection_id.clone(),
            track_id: track_id.clone(),
        }),
        Err(sqlx::Error::Database(db_err)) if db_err.is_foreign_key_violation() => {
            Err(missing_reference(pool, collection_id, track_id).await)
        }
        // MAX(position) + 1 overflowed to REAL and failed the integer check
        Err(sqlx::Error::Database(db_err)) if db_err.is_check_violation() => {
            tracing::warn!(collection = %collection_id, "no position left to append at");
            Err(TempoError::invalid_input(format!(
                "collection {} has no position left after its last track",
                collection_id
            )))
        }
        Err(e) => Err(e.into()),
    }
}

/// `Ok(None)` means the track was already a member.
async fn append(
    pool: &SqlitePool,
    collection_id: &CollectionId,
    track_id: &TrackId,
    added_by: &UserId,
) -> std::result::Result<Option<Membership>, sqlx::Error> {
    let added_at = time::now();
    let mut tx = pool.begin().await?;

    let inserted = sqlx::query(&format!(
        r#"
        INSERT INTO collection_items (collection_id, track_id, position, added_by, added_at)
        VALUES (?1, ?2, {}, ?3, ?4)
        ON CONFLICT(collection_id, track_id) DO NOTHING
        RETURNING position
        "#,
        NEXT_POSITION_SUBQUERY
    ))
    .bind(collection_id)
    .bind(track_id)
    .bind(added_by)
    .bind(added_at.timestamp_millis())
    .fetch_optional(&mut *tx)
    .await?;

    let Some(row) = inserted else {
        return Ok(None);
    };
    let position: i64 = row.try_get("position")?;

    collections::touch(&mut *tx, collection_id, added_at.timestamp_millis()).await?;
    tx.commit().await?;

    Ok(Some(Membership {
        collection_id: collection_id.clone(),
        track_id: track_id.clone(),
        position,
        added_by: added_by.clone(),
        added_at,
    }))
}

/// Work out which side of a failed foreign key is missing
async fn missing_reference(
    pool: &SqlitePool,
    collection_id: &CollectionId,
    track_id: &TrackId,
) -> TempoError {
    match collections::exists(pool, collection_id).await {
        Ok(false) => return TempoError::CollectionNotFound(collection_id.clone()),
        Err(e) => return e,
        Ok(true) => {}
    }

    match catalog::track_exists(pool, track_id).await {
        Ok(false) => TempoError::TrackNotFound(track_id.clone()),
        Err(e) => e,
        Ok(true) => TempoError::storage(format!(
            "foreign key violation adding {} to {}",
            track_id, collection_id
        )),
    }
}

/// Remove a track from a collection
///
/// Returns `false` when the track was not a member. Positions of the
/// remaining tracks are left as they are; gaps are expected.
pub async fn remove_item(
    pool: &SqlitePool,
    collection_id: &CollectionId,
    track_id: &TrackId,
) -> Result<bool> {
    let mut tx = pool.begin().await?;

    let result =
        sqlx::query("DELETE FROM collection_items WHERE collection_id = ? AND track_id = ?")
            .bind(collection_id)
            .bind(track_id)
            .execute(&mut *tx)
            .await?;

    let removed = result.rows_affected() > 0;
    if removed {
        collections::touch(&mut *tx, collection_id, time::now_millis()).await?;
    }

    tx.commit().await?;

    tracing::debug!(
        collection = %collection_id,
        track = %track_id,
        removed,
        "remove track from collection"
    );

    Ok(removed)
}

/// Whether the track is in the collection
pub async fn is_member(
    pool: &SqlitePool,
    collection_id: &CollectionId,
    track_id: &TrackId,
) -> Result<bool> {
    let found: i64 = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM collection_items WHERE collection_id = ? AND track_id = ?)",
    )
    .bind(collection_id)
    .bind(track_id)
    .fetch_one(pool)
    .await?;

    Ok(found != 0)
}

pub async fn item_count(pool: &SqlitePool, collection_id: &CollectionId) -> Result<i64> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM collection_items WHERE collection_id = ?")
            .bind(collection_id)
            .fetch_one(pool)
            .await?;

    Ok(count)
}

/// Get a single membership row
pub async fn get(
    pool: &SqlitePool,
    collection_id: &CollectionId,
    track_id: &TrackId,
) -> Result<Option<Membership>> {
    let row = sqlx::query(
        r#"
        SELECT collection_id, track_id, position, added_by, added_at
        FROM collection_items
        WHERE collection_id = ? AND track_id = ?
        "#,
    )
    .bind(collection_id)
    .bind(track_id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(membership_from_row).transpose()
}

/// Raw membership rows of a collection in position order, without catalog data
pub async fn list(pool: &SqlitePool, collection_id: &CollectionId) -> Result<Vec<Membership>> {
    let rows = sqlx::query(
        r#"
        SELECT collection_id, track_id, position, added_by, added_at
        FROM collection_items
        WHERE collection_id = ?
        ORDER BY position
        "#,
    )
    .bind(collection_id)
    .fetch_all(pool)
    .await?;

    rows.iter().map(membership_from_row).collect()
}

fn membership_from_row(row: &SqliteRow) -> Result<Membership> {
    Ok(Membership {
        collection_id: row.try_get("collection_id")?,
        track_id: row.try_get("track_id")?,
        position: row.try_get("position")?,
        added_by: row.try_get("added_by")?,
        added_at: time::from_millis(row.try_get("added_at")?)?,
    })
}
