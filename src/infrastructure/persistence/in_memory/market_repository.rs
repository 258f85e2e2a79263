//! # In-Memory Market Repository
//!
//! In-memory implementation of [`MarketRepository`] for testing.
//!
//! This implementation uses a thread-safe `HashMap` for storage,
//! making it suitable for unit tests of consumers without database
//! dependencies. It is a standalone store, never a cache in front of
//! another backend.

use crate::domain::entities::Market;
use crate::domain::value_objects::MarketId;
use crate::infrastructure::persistence::traits::{
    MARKET_ENTITY, MarketRepository, RepositoryError, RepositoryResult, ensure_insertable, present,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory implementation of [`MarketRepository`].
///
/// Uses a thread-safe `HashMap` for storage. Suitable for unit tests
/// without database dependencies.
#[derive(Debug, Clone)]
pub struct InMemoryMarketRepository {
    storage: Arc<RwLock<HashMap<MarketId, Market>>>,
}

impl InMemoryMarketRepository {
    /// Creates a new empty in-memory market repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Returns the number of markets in the repository.
    ///
    /// Waits for any in-flight write to finish.
    pub async fn len(&self) -> usize {
        self.storage.read().await.len()
    }

    /// Returns true if the repository is empty.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for InMemoryMarketRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MarketRepository for InMemoryMarketRepository {
    async fn find_all_markets(&self) -> RepositoryResult<Vec<Market>> {
        let storage = self.storage.read().await;
        Ok(storage.values().cloned().collect())
    }

    async fn find_market_by_id(&self, id: &MarketId) -> RepositoryResult<Option<Market>> {
        let storage = self.storage.read().await;
        Ok(present(storage.get(id).cloned()))
    }

    async fn insert_market(&self, market: &Market) -> RepositoryResult<()> {
        ensure_insertable(market)?;
        let mut storage = self.storage.write().await;
        match storage.entry(market.id().clone()) {
            Entry::Occupied(_) => Err(RepositoryError::duplicate_key(
                MARKET_ENTITY,
                market.id().to_string(),
            )),
            Entry::Vacant(slot) => {
                slot.insert(market.clone());
                Ok(())
            }
        }
    }

    async fn update_market(&self, market: &Market) -> RepositoryResult<()> {
        let mut storage = self.storage.write().await;
        let stored = storage
            .get_mut(market.id())
            .ok_or_else(|| RepositoryError::not_found(MARKET_ENTITY, market.id().to_string()))?;
        stored.set_trading_parameters(market.trading_parameters().clone());
        Ok(())
    }
}
