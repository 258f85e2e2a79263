//! # PostgreSQL Persistence
//!
//! Networked backend over a shared relational database.

pub mod market_repository;

pub use market_repository::PostgresMarketRepository;
