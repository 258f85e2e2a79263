//! # Value Objects
//!
//! Immutable types with domain semantics.
//!
//! - [`MarketId`]: string identity of a trading pair

pub mod ids;

pub use ids::MarketId;
