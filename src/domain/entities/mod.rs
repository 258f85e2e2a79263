//! # Domain Entities
//!
//! - [`Market`]: configuration of one tradable base/quote pair
//! - [`TokenDescriptor`]: identity of one side of a pair
//! - [`TradingParameters`]: the mutable projection of a market

pub mod market;

pub use market::{
    FieldValue, Market, MarketBuilder, MarketField, TokenDescriptor, TradingParameters,
};
