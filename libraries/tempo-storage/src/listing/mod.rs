//! Ordered read of a collection, joined with catalog metadata

use crate::time;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tempo_core::{error::Result, types::*};

/// Get the tracks of a collection in ascending position order
///
/// A collection that is empty or does not exist yields an empty list.
pub async fn list_ordered(
    pool: &SqlitePool,
    collection_id: &CollectionId,
) -> Result<Vec<OrderedEntry>> {
    let rows = sqlx::query(
        r#"
        SELECT
            ci.track_id, ci.position, ci.added_by, ci.added_at,
            t.title, t.artist_id, t.duration_seconds, t.audio_url,
            ar.name as artist_name
        FROM collection_items ci
        INNER JOIN tracks t ON ci.track_id = t.id
        LEFT JOIN artists ar ON t.artist_id = ar.id
        WHERE ci.collection_id = ?
        ORDER BY ci.position
        "#,
    )
    .bind(collection_id)
    .fetch_all(pool)
    .await?;

    rows.iter().map(entry_from_row).collect()
}

fn entry_from_row(row: &SqliteRow) -> Result<OrderedEntry> {
    Ok(OrderedEntry {
        track: TrackSummary {
            id: row.try_get("track_id")?,
            title: row.try_get("title")?,
            artist_id: row.try_get("artist_id")?,
            artist_name: row.try_get("artist_name")?,
            duration_seconds: row.try_get("duration_seconds")?,
            audio_url: row.try_get("audio_url")?,
        },
        position: row.try_get("position")?,
        added_by: row.try_get("added_by")?,
        added_at: time::from_millis(row.try_get("added_at")?)?,
    })
}
