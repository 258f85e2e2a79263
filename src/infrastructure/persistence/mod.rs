//! # Persistence Layer
//!
//! Market repository port and its implementations.
//!
//! ## Repository Traits (Ports)
//!
//! - [`MarketRepository`]: Persistence for market configurations
//!
//! ## Implementations
//!
//! - `sqlite`: embedded backend
//! - `postgres`: networked backend
//! - `in_memory`: in-memory implementation for testing
//!
//! Both SQL backends share the table layout in [`schema`].
//! [`connect_repository`] builds the backend chosen in
//! [`StorageSettings`](crate::settings::StorageSettings).

pub mod connect;
pub mod in_memory;
pub mod postgres;
pub mod schema;
pub mod sqlite;
pub mod traits;

mod sql;

#[cfg(test)]
mod contract;

pub use connect::connect_repository;
pub use in_memory::InMemoryMarketRepository;
pub use postgres::PostgresMarketRepository;
pub use sqlite::SqliteMarketRepository;
pub use traits::{MarketRepository, RepositoryError, RepositoryResult};
