//! Position allocator
//!
//! Appends go to `MAX(position) + 1`, and an empty collection starts at 1.
//! The expression is shared with the membership insert so the read of the
//! current maximum and the write of the new row happen in one statement.

use sqlx::SqliteExecutor;
use tempo_core::{error::Result, types::CollectionId};

/// Scalar subquery yielding the next free position for collection `?1`
pub(crate) const NEXT_POSITION_SUBQUERY: &str =
    "(SELECT COALESCE(MAX(position), 0) + 1 FROM collection_items WHERE collection_id = ?1)";

/// Position the next appended track would receive
///
/// Works against a pool or inside an open transaction.
pub async fn next_position<'e, E>(executor: E, collection_id: &CollectionId) -> Result<i64>
where
    E: SqliteExecutor<'e>,
{
    let next: i64 = sqlx::query_scalar(&format!("SELECT {}", NEXT_POSITION_SUBQUERY))
        .bind(collection_id)
        .fetch_one(executor)
        .await?;

    Ok(next)
}
