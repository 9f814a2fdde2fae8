use crate::time;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteExecutor, SqlitePool};
use tempo_core::{error::Result, types::*, TempoError};

/// Get collections owned by a user, most recently updated first
pub async fn get_by_owner(pool: &SqlitePool, owner_id: &UserId) -> Result<Vec<Collection>> {
    let rows = sqlx::query(
        r#"
        SELECT id, owner_id, kind, name, description, is_public, created_at, updated_at
        FROM collections
        WHERE owner_id = ?
        ORDER BY updated_at DESC, name
        "#,
    )
    .bind(owner_id)
    .fetch_all(pool)
    .await?;

    rows.iter().map(collection_from_row).collect()
}

/// Get collection by ID
pub async fn get_by_id(pool: &SqlitePool, id: &CollectionId) -> Result<Option<Collection>> {
    let row = sqlx::query(
        r#"
        SELECT id, owner_id, kind, name, description, is_public, created_at, updated_at
        FROM collections
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(collection_from_row).transpose()
}

/// Create new collection
pub async fn create(pool: &SqlitePool, collection: CreateCollection) -> Result<Collection> {
    let id = CollectionId::generate();
    let now = time::now_millis();

    sqlx::query(
        r#"
        INSERT INTO collections (id, owner_id, kind, name, description, is_public, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&collection.owner_id)
    .bind(collection.kind.as_str())
    .bind(&collection.name)
    .bind(&collection.description)
    .bind(collection.is_public)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    tracing::debug!(
        collection = %id,
        owner = %collection.owner_id,
        kind = collection.kind.as_str(),
        "collection created"
    );

    get_by_id(pool, &id)
        .await?
        .ok_or_else(|| TempoError::storage("Failed to retrieve created collection"))
}

/// Delete collection; its memberships go with it
pub async fn delete(pool: &SqlitePool, id: &CollectionId) -> Result<bool> {
    let result = sqlx::query("DELETE FROM collections WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    let deleted = result.rows_affected() > 0;
    tracing::debug!(collection = %id, deleted, "delete collection");

    Ok(deleted)
}

pub async fn exists(pool: &SqlitePool, id: &CollectionId) -> Result<bool> {
    let found: i64 = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM collections WHERE id = ?)")
        .bind(id)
        .fetch_one(pool)
        .await?;

    Ok(found != 0)
}

/// Bump `updated_at` after a membership change
pub(crate) async fn touch<'e, E>(
    executor: E,
    id: &CollectionId,
    now_millis: i64,
) -> std::result::Result<(), sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query("UPDATE collections SET updated_at = ? WHERE id = ?")
        .bind(now_millis)
        .bind(id)
        .execute(executor)
        .await?;

    Ok(())
}

fn collection_from_row(row: &SqliteRow) -> Result<Collection> {
    let kind: String = row.get("kind");
    let kind = CollectionKind::from_str(&kind)
        .ok_or_else(|| TempoError::storage(format!("Invalid collection kind: {}", kind)))?;

    Ok(Collection {
        id: row.get("id"),
        owner_id: row.get("owner_id"),
        kind,
        name: row.get("name"),
        description: row.get("description"),
        is_public: row.get::<i64, _>("is_public") != 0,
        created_at: time::from_millis(row.get("created_at"))?,
        updated_at: time::from_millis(row.get("updated_at"))?,
    })
}
