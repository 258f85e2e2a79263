//! # Repository Traits
//!
//! Port definition for market persistence.
//!
//! This module defines the [`MarketRepository`] trait and the error
//! vocabulary every backend translates its engine-specific failures into.
//! Implementations exist for SQLite (embedded), PostgreSQL (networked) and
//! in-memory storage.
//!
//! # Examples
//!
//! ```ignore
//! use market_registry::infrastructure::persistence::MarketRepository;
//!
//! async fn published_markets(repo: &dyn MarketRepository) -> usize {
//!     let all = repo.find_all_markets().await.unwrap_or_default();
//!     all.iter().filter(|m| m.is_published()).count()
//! }
//! ```

use crate::domain::entities::Market;
use crate::domain::value_objects::MarketId;
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Error type for repository operations.
///
/// A missing market on lookup is not an error: `find_market_by_id` returns
/// `Ok(None)`.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Update target does not exist.
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound {
        /// Type of entity.
        entity_type: &'static str,
        /// Entity identifier.
        id: String,
    },

    /// Insert collided with an existing id.
    #[error("Duplicate key: {entity_type} with id {id} already exists")]
    DuplicateKey {
        /// Type of entity.
        entity_type: &'static str,
        /// Entity identifier.
        id: String,
    },

    /// The storage engine could not be reached.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// The identity field is empty.
    #[error("Invalid id: {0}")]
    InvalidId(String),

    /// Query error.
    #[error("Query error: {0}")]
    Query(String),

    /// A stored value cannot be represented in the domain.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl RepositoryError {
    /// Creates a not found error.
    #[must_use]
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a duplicate key error.
    #[must_use]
    pub fn duplicate_key(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::DuplicateKey {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a storage unavailable error.
    #[must_use]
    pub fn storage_unavailable(msg: impl Into<String>) -> Self {
        Self::StorageUnavailable(msg.into())
    }

    /// Creates an invalid id error.
    #[must_use]
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    /// Creates a query error.
    #[must_use]
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    /// Creates a serialization error.
    #[must_use]
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Returns true if this is a not found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns true if this is a duplicate key error.
    #[must_use]
    pub fn is_duplicate_key(&self) -> bool {
        matches!(self, Self::DuplicateKey { .. })
    }

    /// Returns true if the storage engine was unavailable.
    #[must_use]
    pub fn is_storage_unavailable(&self) -> bool {
        matches!(self, Self::StorageUnavailable(_))
    }
}

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Entity name used in repository errors.
pub(crate) const MARKET_ENTITY: &str = "Market";

/// Repository for market configurations.
///
/// Every backend honours the same contract:
///
/// - listing never fails on an empty store and promises no order
/// - lookup distinguishes "absent" (`Ok(None)`) from failure
/// - insert never overwrites
/// - update writes only [`TradingParameters::FIELDS`] and fails on a
///   missing id
///
/// There is no delete operation. Repositories hold no cached state and add
/// no locking of their own.
///
/// [`TradingParameters::FIELDS`]: crate::domain::entities::TradingParameters::FIELDS
#[async_trait]
pub trait MarketRepository: Send + Sync + fmt::Debug {
    /// Returns every stored market.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::StorageUnavailable` if the store cannot be
    /// reached.
    async fn find_all_markets(&self) -> RepositoryResult<Vec<Market>>;

    /// Gets a market by exact id.
    ///
    /// Returns `None` if no market has that id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::StorageUnavailable` if the store cannot be
    /// reached.
    async fn find_market_by_id(&self, id: &MarketId) -> RepositoryResult<Option<Market>>;

    /// Persists a new market.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DuplicateKey` if the id already exists,
    /// `RepositoryError::InvalidId` if the id is empty, and
    /// `RepositoryError::StorageUnavailable` on I/O failure.
    async fn insert_market(&self, market: &Market) -> RepositoryResult<()>;

    /// Writes the trading parameters of an existing market.
    ///
    /// Identity and token fields of `market` are ignored.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no market has that id and
    /// `RepositoryError::StorageUnavailable` on I/O failure.
    async fn update_market(&self, market: &Market) -> RepositoryResult<()>;
}

/// Rejects markets that cannot be stored under their id.
pub(crate) fn ensure_insertable(market: &Market) -> RepositoryResult<()> {
    if market.id().is_empty() {
        return Err(RepositoryError::invalid_id("market id must not be empty"));
    }
    Ok(())
}

/// Treats a record with an empty identity as absent.
pub(crate) fn present(market: Option<Market>) -> Option<Market> {
    market.filter(|m| !m.id().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::TokenDescriptor;

    mod repository_error {
        use super::*;

        #[test]
        fn not_found_error() {
            let err = RepositoryError::not_found("Market", "ZRX-WETH");
            assert!(err.is_not_found());
            assert!(!err.is_duplicate_key());
            assert!(!err.is_storage_unavailable());
            assert!(err.to_string().contains("not found"));
            assert!(err.to_string().contains("Market"));
            assert!(err.to_string().contains("ZRX-WETH"));
        }

        #[test]
        fn duplicate_key_error() {
            let err = RepositoryError::duplicate_key("Market", "HOT-DAI");
            assert!(!err.is_not_found());
            assert!(err.is_duplicate_key());
            assert!(err.to_string().contains("Duplicate"));
            assert!(err.to_string().contains("HOT-DAI"));
        }

        #[test]
        fn storage_unavailable_error() {
            let err = RepositoryError::storage_unavailable("Connection refused");
            assert!(err.is_storage_unavailable());
            assert!(err.to_string().contains("unavailable"));
            assert!(err.to_string().contains("refused"));
        }

        #[test]
        fn query_error() {
            let err = RepositoryError::query("no such table: markets");
            assert!(err.to_string().contains("Query"));
            assert!(err.to_string().contains("markets"));
        }

        #[test]
        fn serialization_error() {
            let err = RepositoryError::serialization("negative decimals");
            assert!(err.to_string().contains("Serialization"));
        }
    }

    mod helpers {
        use super::*;

        fn market(id: &str) -> Market {
            Market::builder(id, TokenDescriptor::default(), TokenDescriptor::default()).build()
        }

        #[test]
        fn empty_identity_is_absent() {
            assert!(present(Some(market(""))).is_none());
            assert!(present(Some(market("A-B"))).is_some());
            assert!(present(None).is_none());
        }

        #[test]
        fn empty_identity_is_not_insertable() {
            assert!(matches!(
                ensure_insertable(&market("")),
                Err(RepositoryError::InvalidId(_))
            ));
            assert!(ensure_insertable(&market("A-B")).is_ok());
        }
    }
}
