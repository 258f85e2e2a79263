//! # Market Registry
//!
//! Authoritative storage of trading-pair configuration for an exchange
//! backend: token identity, price and amount precision, fee rates, minimum
//! order size, gas estimate and the publication flag.
//!
//! Callers depend on the [`MarketRepository`] trait. Two interchangeable
//! backends implement it with identical observable behaviour:
//!
//! - [`SqliteMarketRepository`]: embedded store in a local SQLite database
//! - [`PostgresMarketRepository`]: networked store in PostgreSQL
//!
//! Updates write only the fields in [`TradingParameters::FIELDS`]; the id
//! and token descriptors are fixed once a market is inserted.
//!
//! # Examples
//!
//! ```no_run
//! use market_registry::domain::entities::{Market, TokenDescriptor};
//! use market_registry::infrastructure::persistence::{MarketRepository, connect_repository};
//! use market_registry::settings::StorageSettings;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = StorageSettings::load(None)?;
//! let repo = connect_repository(&settings).await?;
//!
//! let market = Market::builder(
//!     "ZRX-WETH",
//!     TokenDescriptor::new("ZRX", "0x Protocol Token", "0xe41d", 18),
//!     TokenDescriptor::new("WETH", "Wrapped Ether", "0xc02a", 18),
//! )
//! .build();
//! repo.insert_market(&market).await?;
//! # Ok(())
//! # }
//! ```
//!
//! [`MarketRepository`]: infrastructure::persistence::MarketRepository
//! [`SqliteMarketRepository`]: infrastructure::persistence::SqliteMarketRepository
//! [`PostgresMarketRepository`]: infrastructure::persistence::PostgresMarketRepository
//! [`TradingParameters::FIELDS`]: domain::entities::TradingParameters::FIELDS

pub mod domain;
pub mod infrastructure;
pub mod settings;
