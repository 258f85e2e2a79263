//! # Backend Selection
//!
//! Builds the configured [`MarketRepository`] once at startup.

use crate::infrastructure::persistence::postgres::PostgresMarketRepository;
use crate::infrastructure::persistence::sql::map_sqlx_error;
use crate::infrastructure::persistence::sqlite::SqliteMarketRepository;
use crate::infrastructure::persistence::traits::{
    MarketRepository, RepositoryError, RepositoryResult,
};
use crate::settings::{BackendKind, StorageSettings};
use sqlx::postgres::PgPoolOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use std::sync::Arc;

/// Connects the backend selected by `settings`.
///
/// The embedded backend creates its database file and table when missing.
/// The networked backend expects the table to exist.
///
/// # Errors
///
/// Returns `RepositoryError::StorageUnavailable` if the selected backend has
/// no URL, cannot be reached, or its database cannot be opened or written.
pub async fn connect_repository(
    settings: &StorageSettings,
) -> RepositoryResult<Arc<dyn MarketRepository>> {
    match settings.backend() {
        BackendKind::Embedded => {
            let repo = connect_sqlite(settings).await?;
            tracing::info!(url = settings.sqlite_url(), "using embedded market store");
            Ok(Arc::new(repo))
        }
        BackendKind::Networked => {
            let repo = connect_postgres(settings).await?;
            tracing::info!("using networked market store");
            Ok(Arc::new(repo))
        }
    }
}

async fn connect_sqlite(settings: &StorageSettings) -> RepositoryResult<SqliteMarketRepository> {
    let url = settings.sqlite_url();
    let options = SqliteConnectOptions::from_str(url)
        .map_err(|e| map_sqlx_error(e, None))?
        .create_if_missing(true);

    // Every connection to an in-memory database opens a separate database,
    // so the pool is pinned to one connection that is never recycled.
    let pool_options = if is_in_memory(url) {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(settings.max_connections())
    };

    let pool = pool_options
        .acquire_timeout(settings.connect_timeout())
        .connect_with(options)
        .await
        .map_err(|e| map_sqlx_error(e, None))?;

    let repo = SqliteMarketRepository::new(pool);
    repo.create_schema().await?;
    Ok(repo)
}

async fn connect_postgres(
    settings: &StorageSettings,
) -> RepositoryResult<PostgresMarketRepository> {
    let url = settings.postgres_url().ok_or_else(|| {
        RepositoryError::storage_unavailable("networked backend selected without postgres_url")
    })?;

    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections())
        .acquire_timeout(settings.connect_timeout())
        .connect(url)
        .await
        .map_err(|e| map_sqlx_error(e, None))?;

    Ok(PostgresMarketRepository::new(pool))
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}
