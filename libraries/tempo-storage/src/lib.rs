//! Tempo Storage
//!
//! `SQLite` database layer for Tempo playlists and play-queues.
//!
//! # Architecture
//!
//! - **Vertical Slicing**: each component owns its own queries and logic
//!   (`positions`, `memberships`, `reorder`, `listing`, `collections`, `catalog`)
//! - **Constraint-backed ordering**: uniqueness of members and of positions
//!   is enforced by the schema, not by callers
//! - **Explicit identity**: the acting user is an argument, never ambient state
//!
//! # Example
//!
//! ```rust,no_run
//! use tempo_core::{CollectionStore, CreateCollection, TrackId, UserId};
//! use tempo_storage::{open, LocalCollectionStore, StorageConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = open(&StorageConfig::new("sqlite://tempo.db")).await?;
//! let store = LocalCollectionStore::new(pool);
//!
//! let alice = UserId::new("alice");
//! let playlist = store
//!     .create_collection(CreateCollection::playlist(alice.clone(), "Mornings"))
//!     .await?;
//! store
//!     .add_item(&playlist.id, &TrackId::new("track-1"), &alice)
//!     .await?;
//!
//! for entry in store.list_ordered(&playlist.id).await? {
//!     println!("{} {}", entry.position, entry.track.title);
//! }
//! # Ok(())
//! # }
//! ```

mod context;
mod error;
mod settings;
mod time;

// Vertical slices
pub mod catalog;
pub mod collections;
pub mod listing;
pub mod memberships;
pub mod positions;
pub mod reorder;

pub use context::LocalCollectionStore;
pub use error::StorageError;
pub use settings::StorageConfig;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), StorageError> {
    MIGRATOR.run(pool).await?;
    tracing::info!("database migrations applied");
    Ok(())
}

/// Create a new `SQLite` pool
///
/// The directory holding the database file is created when missing.
/// Foreign keys are enforced (memberships cascade with their collection and
/// track), the journal runs in WAL mode, and writers wait up to the configured
/// busy timeout for the write lock.
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(config: &StorageConfig) -> Result<SqlitePool, StorageError> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!(url = %config.database_url, "creating sqlite pool");

    let options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(config.busy_timeout());

    // `create_if_missing` makes the file, not the directory holding it
    if let Some(parent) = options.get_filename().parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|source| StorageError::Directory {
                path: parent.display().to_string(),
                source,
            })?;
        }
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await?;

    tracing::info!(
        url = %config.database_url,
        max_connections = config.max_connections,
        "sqlite pool created"
    );

    Ok(pool)
}

/// Validate the config, create the pool and bring the schema up to date
///
/// # Errors
///
/// Returns an error if the config is invalid, the connection fails, or
/// migrations fail
pub async fn open(config: &StorageConfig) -> Result<SqlitePool, StorageError> {
    config.validate()?;
    let pool = create_pool(config).await?;
    run_migrations(&pool).await?;
    Ok(pool)
}
