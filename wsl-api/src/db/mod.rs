//! Song storage for wsl-api
//!
//! Each worship leader has a separate SQLite database. Both are accessed
//! through the same [`SongStore`] type; only the pool differs.

use anyhow::{Context, Result};
use sqlx::sqlite::SqlitePoolOptions;
use tracing::{error, info, warn};
use wsl_common::config::{sqlite_directory, ServiceConfig};
use wsl_common::Leader;

mod songs;
pub use songs::SongStore;

/// The two leader stores
#[derive(Clone)]
pub struct SongStores {
    nikita: SongStore,
    grace: SongStore,
}

impl SongStores {
    /// Open both stores from the configured connection string
    ///
    /// Pools connect lazily: an unreachable backend does not fail here, only
    /// the operations that later need a connection. A connection string that
    /// cannot be parsed is a configuration error.
    pub fn open(config: &ServiceConfig) -> Result<Self> {
        if let Some(dir) = sqlite_directory(&config.database_url) {
            if let Err(e) = std::fs::create_dir_all(&dir) {
                warn!("Could not create database directory {}: {}", dir.display(), e);
            }
        }

        Ok(Self {
            nikita: open_store(config, Leader::Nikita)?,
            grace: open_store(config, Leader::Grace)?,
        })
    }

    /// Store holding the songs of `leader`
    pub fn for_leader(&self, leader: Leader) -> &SongStore {
        match leader {
            Leader::Nikita => &self.nikita,
            Leader::Grace => &self.grace,
        }
    }

    /// Create the schema in both stores
    ///
    /// Failures are logged and not returned; the service keeps serving and
    /// each store retries schema creation on its next operation.
    pub async fn initialize(&self) {
        for leader in Leader::ALL {
            let store = self.for_leader(leader);
            match store.ensure_schema().await {
                Ok(()) => info!("✓ Connected to {} ({})", store.database_name(), leader),
                Err(e) => error!(
                    "Database connection error for {} ({}): {}",
                    store.database_name(),
                    leader,
                    e
                ),
            }
        }
    }
}

fn open_store(config: &ServiceConfig, leader: Leader) -> Result<SongStore> {
    let url = config.store_url(leader.database_name());
    tracing::debug!("Store URL for {}: {}", leader, url);

    let pool = SqlitePoolOptions::new()
        .connect_lazy(&url)
        .with_context(|| format!("Invalid database URL for {}: {}", leader, url))?;

    Ok(SongStore::new(pool, leader.database_name()))
}

/// Open an in-memory store (single connection, so all queries share one database)
#[cfg(test)]
pub(crate) async fn connect_in_memory(database_name: &'static str) -> Result<SongStore> {
    let pool: sqlx::SqlitePool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .context("Failed to open in-memory database")?;

    Ok(SongStore::new(pool, database_name))
}
