//! # SQLite Persistence
//!
//! Embedded backend: the store lives in a local file (or in memory) owned
//! by the process.

pub mod market_repository;

pub use market_repository::SqliteMarketRepository;
