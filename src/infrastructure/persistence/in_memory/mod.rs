//! # In-Memory Repositories
//!
//! In-memory implementations for testing without database dependencies.
//!
//! - [`InMemoryMarketRepository`]: market persistence
//!
//! ## Thread Safety
//!
//! Implementations use `Arc<RwLock<HashMap>>` for thread-safe access.

pub mod market_repository;

pub use market_repository::InMemoryMarketRepository;
