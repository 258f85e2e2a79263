//! # SQL Helpers
//!
//! Pieces shared by the sqlx-backed repositories: translation of
//! `sqlx::Error` into [`RepositoryError`] and checked conversion between
//! column values and domain integers/decimals.

use crate::domain::entities::TokenDescriptor;
use crate::domain::value_objects::MarketId;
use crate::infrastructure::persistence::traits::{
    MARKET_ENTITY, RepositoryError, RepositoryResult,
};
use rust_decimal::Decimal;
use sqlx::error::DatabaseError;
use sqlx::postgres::PgDatabaseError;
use sqlx::sqlite::SqliteError;
use std::str::FromStr;

/// SQLite primary result codes meaning the database file cannot be used:
/// BUSY, READONLY, IOERR, FULL, CANTOPEN.
const SQLITE_UNAVAILABLE_CODES: [i32; 5] = [5, 8, 10, 13, 14];

/// PostgreSQL SQLSTATE prefixes for connection failures, insufficient
/// resources and operator intervention (shutdown, crash recovery).
const POSTGRES_UNAVAILABLE_STATES: [&str; 3] = ["08", "53", "57P"];

/// Translates a sqlx error into the repository vocabulary.
///
/// `id` names the market the statement was about, if any.
pub(crate) fn map_sqlx_error(err: sqlx::Error, id: Option<&MarketId>) -> RepositoryError {
    match err {
        sqlx::Error::Database(db) if db.is_unique_violation() => RepositoryError::duplicate_key(
            MARKET_ENTITY,
            id.map(MarketId::to_string).unwrap_or_default(),
        ),
        sqlx::Error::Database(db) if is_unavailable(&*db) => {
            RepositoryError::storage_unavailable(db.to_string())
        }
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::Protocol(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Configuration(_) => RepositoryError::storage_unavailable(err.to_string()),
        sqlx::Error::Decode(_) | sqlx::Error::ColumnDecode { .. } => {
            RepositoryError::serialization(err.to_string())
        }
        other => RepositoryError::query(other.to_string()),
    }
}

/// Whether the engine reported an I/O or availability failure rather than a
/// problem with the statement.
fn is_unavailable(db: &(dyn DatabaseError + 'static)) -> bool {
    if let Some(sqlite) = db.try_downcast_ref::<SqliteError>() {
        // Extended codes carry the primary code in their low byte.
        return sqlite
            .code()
            .and_then(|code| code.parse::<i32>().ok())
            .is_some_and(|code| SQLITE_UNAVAILABLE_CODES.contains(&(code & 0xff)));
    }
    if let Some(pg) = db.try_downcast_ref::<PgDatabaseError>() {
        let state = pg.code();
        return POSTGRES_UNAVAILABLE_STATES
            .iter()
            .any(|prefix| state.starts_with(prefix));
    }
    false
}

/// Reads a non-negative column into a `u32`.
pub(crate) fn to_u32(column: &str, value: i64) -> RepositoryResult<u32> {
    u32::try_from(value)
        .map_err(|_| RepositoryError::serialization(format!("{column} out of range: {value}")))
}

/// Parses an exact decimal stored as text.
pub(crate) fn parse_decimal(column: &str, text: &str) -> RepositoryResult<Decimal> {
    Decimal::from_str(text)
        .map_err(|e| RepositoryError::serialization(format!("{column} is not a decimal: {e}")))
}

/// Builds a token descriptor from its four columns.
pub(crate) fn token(
    prefix: &str,
    symbol: String,
    name: String,
    address: String,
    decimals: i64,
) -> RepositoryResult<TokenDescriptor> {
    let decimals = to_u32(&format!("{prefix}_decimals"), decimals)?;
    Ok(TokenDescriptor::new(symbol, name, address, decimals))
}
