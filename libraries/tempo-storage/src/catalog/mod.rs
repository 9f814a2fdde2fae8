//! Catalog slice
//!
//! Just enough of the track catalog for collections to reference and join
//! against. Deleting a track removes it from every collection; deleting an
//! artist leaves its tracks in place without an artist.

use crate::time;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tempo_core::{error::Result, types::*, TempoError};

pub async fn get_artist(pool: &SqlitePool, id: &ArtistId) -> Result<Option<Artist>> {
    let row = sqlx::query("SELECT id, name, created_at FROM artists WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(artist_from_row).transpose()
}

pub async fn create_artist(pool: &SqlitePool, artist: CreateArtist) -> Result<Artist> {
    let id = ArtistId::generate();

    sqlx::query("INSERT INTO artists (id, name, created_at) VALUES (?, ?, ?)")
        .bind(&id)
        .bind(&artist.name)
        .bind(time::now_millis())
        .execute(pool)
        .await?;

    get_artist(pool, &id)
        .await?
        .ok_or_else(|| TempoError::storage("Failed to retrieve created artist"))
}

pub async fn delete_artist(pool: &SqlitePool, id: &ArtistId) -> Result<bool> {
    let result = sqlx::query("DELETE FROM artists WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn get_track(pool: &SqlitePool, id: &TrackId) -> Result<Option<Track>> {
    let row = sqlx::query(
        r#"
        SELECT id, title, artist_id, duration_seconds, audio_url, created_at
        FROM tracks
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(track_from_row).transpose()
}

pub async fn create_track(pool: &SqlitePool, track: CreateTrack) -> Result<Track> {
    let id = TrackId::generate();

    let result = sqlx::query(
        r#"
        INSERT INTO tracks (id, title, artist_id, duration_seconds, audio_url, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&track.title)
    .bind(&track.artist_id)
    .bind(track.duration_seconds)
    .bind(&track.audio_url)
    .bind(time::now_millis())
    .execute(pool)
    .await;

    match result {
        Ok(_) => {}
        Err(sqlx::Error::Database(db_err)) if db_err.is_foreign_key_violation() => {
            let artist = track
                .artist_id
                .map(|a| a.to_string())
                .unwrap_or_default();
            return Err(TempoError::not_found("Artist", artist));
        }
        Err(e) => return Err(e.into()),
    }

    get_track(pool, &id)
        .await?
        .ok_or_else(|| TempoError::storage("Failed to retrieve created track"))
}

/// Delete a track; memberships referencing it are removed by cascade
pub async fn delete_track(pool: &SqlitePool, id: &TrackId) -> Result<bool> {
    let result = sqlx::query("DELETE FROM tracks WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    let deleted = result.rows_affected() > 0;
    tracing::debug!(track = %id, deleted, "delete track");

    Ok(deleted)
}

pub async fn track_exists(pool: &SqlitePool, id: &TrackId) -> Result<bool> {
    let found: i64 = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM tracks WHERE id = ?)")
        .bind(id)
        .fetch_one(pool)
        .await?;

    Ok(found != 0)
}

fn artist_from_row(row: &SqliteRow) -> Result<Artist> {
    Ok(Artist {
        id: row.get("id"),
        name: row.get("name"),
        created_at: time::from_millis(row.get("created_at"))?,
    })
}

fn track_from_row(row: &SqliteRow) -> Result<Track> {
    Ok(Track {
        id: row.get("id"),
        title: row.get("title"),
        artist_id: row.get("artist_id"),
        duration_seconds: row.get("duration_seconds"),
        audio_url: row.get("audio_url"),
        created_at: time::from_millis(row.get("created_at"))?,
    })
}
