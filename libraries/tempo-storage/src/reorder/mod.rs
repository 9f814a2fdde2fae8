//! Reorder transaction
//!
//! Applies a caller-computed batch of `(track, position)` assignments to one
//! collection. Either every assignment lands or none does.

use crate::{collections, time};
use sqlx::{Sqlite, SqlitePool, Transaction};
use tempo_core::{error::Result, ordering, types::*, TempoError};

/// Apply a batch of position assignments atomically
///
/// Tracks not named in the batch keep their positions. The batch fails with
/// [`TempoError::ReorderFailed`] and changes nothing if it names a track that
/// is not in the collection, repeats a track or a position, uses a position
/// outside `1..=MAX_POSITION`, or targets a position held by a track outside
/// the batch.
pub async fn reorder(
    pool: &SqlitePool,
    collection_id: &CollectionId,
    assignments: &[PositionAssignment],
) -> Result<()> {
    if let Err(e) = ordering::validate_assignments(assignments) {
        tracing::warn!(collection = %collection_id, error = %e, "reorder batch rejected");
        return Err(e);
    }

    if assignments.is_empty() {
        return Ok(());
    }

    let mut tx = pool.begin().await?;

    // Any early return drops `tx`, which rolls the batch back.
    if let Err(e) = apply(&mut tx, collection_id, assignments).await {
        if matches!(e, TempoError::ReorderFailed(_)) {
            tracing::warn!(collection = %collection_id, error = %e, "reorder rolled back");
        }
        return Err(e);
    }

    collections::touch(&mut *tx, collection_id, time::now_millis()).await?;
    tx.commit().await?;

    tracing::debug!(
        collection = %collection_id,
        moved = assignments.len(),
        "collection reordered"
    );

    Ok(())
}

async fn apply(
    tx: &mut Transaction<'_, Sqlite>,
    collection_id: &CollectionId,
    assignments: &[PositionAssignment],
) -> Result<()> {
    // Park every moving row on the negation of its current position. Stored
    // positions are positive and unique, so parked slots never collide with
    // each other or with rows that stay put, and swaps inside the batch work.
    for assignment in assignments {
        let result = sqlx::query(
            "UPDATE collection_items SET position = -position WHERE collection_id = ? AND track_id = ?",
        )
        .bind(collection_id)
        .bind(&assignment.track_id)
        .execute(&mut **tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(TempoError::reorder_failed(format!(
                "track {} is not in collection {}",
                assignment.track_id, collection_id
            )));
        }
    }

    for assignment in assignments {
        let result = sqlx::query(
            "UPDATE collection_items SET position = ? WHERE collection_id = ? AND track_id = ?",
        )
        .bind(assignment.position)
        .bind(collection_id)
        .bind(&assignment.track_id)
        .execute(&mut **tx)
        .await;

        match result {
            Ok(_) => {}
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                return Err(TempoError::reorder_failed(format!(
                    "position {} is held by a track outside the batch",
                    assignment.position
                )));
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}
