//! # Market Entity
//!
//! Configuration of one tradable base/quote token pair.
//!
//! A [`Market`] is made of three parts with different lifetimes:
//!
//! - the identity ([`MarketId`]), fixed before insertion
//! - the base and quote [`TokenDescriptor`]s, fixed at creation
//! - the [`TradingParameters`], the only part a repository update may write
//!
//! # Examples
//!
//! ```
//! use market_registry::domain::entities::{Market, TokenDescriptor};
//! use rust_decimal::Decimal;
//!
//! let market = Market::builder(
//!     "ZRX-WETH",
//!     TokenDescriptor::new("ZRX", "0x Protocol Token", "0xe41d2489571d322189246dafa5ebde1f4699f498", 18),
//!     TokenDescriptor::new("WETH", "Wrapped Ether", "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2", 18),
//! )
//! .maker_fee_rate(Decimal::new(1, 3))
//! .build();
//!
//! assert_eq!(market.id().as_str(), "ZRX-WETH");
//! assert!(!market.is_published());
//! ```

use crate::domain::value_objects::MarketId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of one side of a trading pair.
///
/// Set when the market is created and never written by an update.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct TokenDescriptor {
    symbol: String,
    name: String,
    address: String,
    decimals: u32,
}

impl TokenDescriptor {
    /// Creates a token descriptor.
    #[must_use]
    pub fn new(
        symbol: impl Into<String>,
        name: impl Into<String>,
        address: impl Into<String>,
        decimals: u32,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            address: address.into(),
            decimals,
        }
    }

    /// Ticker symbol, e.g. `"WETH"`.
    #[inline]
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Display name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// On-chain contract address.
    #[inline]
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Number of on-chain decimals.
    #[inline]
    #[must_use]
    pub fn decimals(&self) -> u32 {
        self.decimals
    }
}

/// A mutable trading-parameter field of a [`Market`].
///
/// This is the allowlist of what a repository update may write. Adding a
/// field to [`Market`] does not make it updatable until it is listed in
/// [`TradingParameters::FIELDS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarketField {
    /// Minimum order size.
    MinOrderSize,
    /// Price precision (significant digits).
    PricePrecision,
    /// Decimal places of prices.
    PriceDecimals,
    /// Decimal places of amounts.
    AmountDecimals,
    /// Maker fee rate.
    MakerFeeRate,
    /// Taker fee rate.
    TakerFeeRate,
    /// Estimated gas used to settle a match.
    GasUsedEstimation,
    /// Publication flag.
    IsPublished,
}

impl MarketField {
    /// Returns the persisted column name.
    #[must_use]
    pub const fn column(&self) -> &'static str {
        match self {
            Self::MinOrderSize => "min_order_size",
            Self::PricePrecision => "price_precision",
            Self::PriceDecimals => "price_decimals",
            Self::AmountDecimals => "amount_decimals",
            Self::MakerFeeRate => "maker_fee_rate",
            Self::TakerFeeRate => "taker_fee_rate",
            Self::GasUsedEstimation => "gas_used_estimation",
            Self::IsPublished => "is_published",
        }
    }

    /// Returns the camelCase name used in JSON.
    #[must_use]
    pub const fn json_name(&self) -> &'static str {
        match self {
            Self::MinOrderSize => "minOrderSize",
            Self::PricePrecision => "pricePrecision",
            Self::PriceDecimals => "priceDecimals",
            Self::AmountDecimals => "amountDecimals",
            Self::MakerFeeRate => "makerFeeRate",
            Self::TakerFeeRate => "takerFeeRate",
            Self::GasUsedEstimation => "gasUsedEstimation",
            Self::IsPublished => "isPublished",
        }
    }
}

impl fmt::Display for MarketField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// Value of one [`MarketField`], as handed to a storage backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue {
    /// Arbitrary-precision decimal.
    Decimal(Decimal),
    /// Unsigned integer.
    Unsigned(u32),
    /// Boolean flag.
    Bool(bool),
}

/// The mutable projection of a [`Market`].
///
/// Holds exactly the fields listed in [`TradingParameters::FIELDS`].
/// Fee rates are dimensionless fractions (`0.001` is 0.1%); no bounds are
/// enforced here.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TradingParameters {
    min_order_size: Decimal,
    price_precision: u32,
    price_decimals: u32,
    amount_decimals: u32,
    maker_fee_rate: Decimal,
    taker_fee_rate: Decimal,
    gas_used_estimation: u32,
    is_published: bool,
}

impl TradingParameters {
    /// Every field an update writes, in column order.
    pub const FIELDS: [MarketField; 8] = [
        MarketField::MinOrderSize,
        MarketField::PricePrecision,
        MarketField::PriceDecimals,
        MarketField::AmountDecimals,
        MarketField::MakerFeeRate,
        MarketField::TakerFeeRate,
        MarketField::GasUsedEstimation,
        MarketField::IsPublished,
    ];

    /// Creates zeroed, unpublished parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value of a single field.
    #[must_use]
    pub fn value(&self, field: MarketField) -> FieldValue {
        match field {
            MarketField::MinOrderSize => FieldValue::Decimal(self.min_order_size),
            MarketField::PricePrecision => FieldValue::Unsigned(self.price_precision),
            MarketField::PriceDecimals => FieldValue::Unsigned(self.price_decimals),
            MarketField::AmountDecimals => FieldValue::Unsigned(self.amount_decimals),
            MarketField::MakerFeeRate => FieldValue::Decimal(self.maker_fee_rate),
            MarketField::TakerFeeRate => FieldValue::Decimal(self.taker_fee_rate),
            MarketField::GasUsedEstimation => FieldValue::Unsigned(self.gas_used_estimation),
            MarketField::IsPublished => FieldValue::Bool(self.is_published),
        }
    }

    /// Sets the minimum order size.
    #[must_use]
    pub fn with_min_order_size(mut self, value: Decimal) -> Self {
        self.min_order_size = value;
        self
    }

    /// Sets the price precision.
    #[must_use]
    pub fn with_price_precision(mut self, value: u32) -> Self {
        self.price_precision = value;
        self
    }

    /// Sets the price decimals.
    #[must_use]
    pub fn with_price_decimals(mut self, value: u32) -> Self {
        self.price_decimals = value;
        self
    }

    /// Sets the amount decimals.
    #[must_use]
    pub fn with_amount_decimals(mut self, value: u32) -> Self {
        self.amount_decimals = value;
        self
    }

    /// Sets the maker fee rate.
    #[must_use]
    pub fn with_maker_fee_rate(mut self, value: Decimal) -> Self {
        self.maker_fee_rate = value;
        self
    }

    /// Sets the taker fee rate.
    #[must_use]
    pub fn with_taker_fee_rate(mut self, value: Decimal) -> Self {
        self.taker_fee_rate = value;
        self
    }

    /// Sets the gas estimate.
    #[must_use]
    pub fn with_gas_used_estimation(mut self, value: u32) -> Self {
        self.gas_used_estimation = value;
        self
    }

    /// Sets the publication flag.
    #[must_use]
    pub fn with_published(mut self, value: bool) -> Self {
        self.is_published = value;
        self
    }

    /// Minimum order size.
    #[inline]
    #[must_use]
    pub fn min_order_size(&self) -> Decimal {
        self.min_order_size
    }

    /// Price precision.
    #[inline]
    #[must_use]
    pub fn price_precision(&self) -> u32 {
        self.price_precision
    }

    /// Price decimals.
    #[inline]
    #[must_use]
    pub fn price_decimals(&self) -> u32 {
        self.price_decimals
    }

    /// Amount decimals.
    #[inline]
    #[must_use]
    pub fn amount_decimals(&self) -> u32 {
        self.amount_decimals
    }

    /// Maker fee rate.
    #[inline]
    #[must_use]
    pub fn maker_fee_rate(&self) -> Decimal {
        self.maker_fee_rate
    }

    /// Taker fee rate.
    #[inline]
    #[must_use]
    pub fn taker_fee_rate(&self) -> Decimal {
        self.taker_fee_rate
    }

    /// Estimated gas used.
    #[inline]
    #[must_use]
    pub fn gas_used_estimation(&self) -> u32 {
        self.gas_used_estimation
    }

    /// Publication flag.
    #[inline]
    #[must_use]
    pub fn is_published(&self) -> bool {
        self.is_published
    }
}

/// Configuration record for one tradable base/quote pair.
///
/// Serializes as a flat camelCase object with decimals as strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "MarketJson", into = "MarketJson")]
pub struct Market {
    id: MarketId,
    base_token: TokenDescriptor,
    quote_token: TokenDescriptor,
    trading: TradingParameters,
}

impl Market {
    /// Starts building a market with its immutable parts.
    #[must_use]
    pub fn builder(
        id: impl Into<MarketId>,
        base_token: TokenDescriptor,
        quote_token: TokenDescriptor,
    ) -> MarketBuilder {
        MarketBuilder::new(id, base_token, quote_token)
    }

    /// Assembles a market from already-validated parts.
    #[must_use]
    pub fn from_parts(
        id: MarketId,
        base_token: TokenDescriptor,
        quote_token: TokenDescriptor,
        trading: TradingParameters,
    ) -> Self {
        Self {
            id,
            base_token,
            quote_token,
            trading,
        }
    }

    /// Market identifier.
    #[inline]
    #[must_use]
    pub fn id(&self) -> &MarketId {
        &self.id
    }

    /// Base token.
    #[inline]
    #[must_use]
    pub fn base_token(&self) -> &TokenDescriptor {
        &self.base_token
    }

    /// Quote token.
    #[inline]
    #[must_use]
    pub fn quote_token(&self) -> &TokenDescriptor {
        &self.quote_token
    }

    /// The mutable projection written by updates.
    #[inline]
    #[must_use]
    pub fn trading_parameters(&self) -> &TradingParameters {
        &self.trading
    }

    /// Returns true if the market is published.
    #[inline]
    #[must_use]
    pub fn is_published(&self) -> bool {
        self.trading.is_published
    }

    /// Replaces the trading parameters.
    pub fn set_trading_parameters(&mut self, trading: TradingParameters) {
        self.trading = trading;
    }

    /// Returns a copy with the given trading parameters.
    #[must_use]
    pub fn with_trading_parameters(mut self, trading: TradingParameters) -> Self {
        self.trading = trading;
        self
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Market({} {}/{})",
            self.id, self.base_token.symbol, self.quote_token.symbol
        )
    }
}

/// Builder for [`Market`].
///
/// Trading parameters default to zero and unpublished.
#[derive(Debug, Clone)]
pub struct MarketBuilder {
    id: MarketId,
    base_token: TokenDescriptor,
    quote_token: TokenDescriptor,
    trading: TradingParameters,
}

impl MarketBuilder {
    /// Creates a new builder with required fields.
    #[must_use]
    pub fn new(
        id: impl Into<MarketId>,
        base_token: TokenDescriptor,
        quote_token: TokenDescriptor,
    ) -> Self {
        Self {
            id: id.into(),
            base_token,
            quote_token,
            trading: TradingParameters::default(),
        }
    }

    /// Sets all trading parameters at once.
    #[must_use]
    pub fn trading_parameters(mut self, trading: TradingParameters) -> Self {
        self.trading = trading;
        self
    }

    /// Sets the minimum order size.
    #[must_use]
    pub fn min_order_size(mut self, value: Decimal) -> Self {
        self.trading.min_order_size = value;
        self
    }

    /// Sets the price precision.
    #[must_use]
    pub fn price_precision(mut self, value: u32) -> Self {
        self.trading.price_precision = value;
        self
    }

    /// Sets the price decimals.
    #[must_use]
    pub fn price_decimals(mut self, value: u32) -> Self {
        self.trading.price_decimals = value;
        self
    }

    /// Sets the amount decimals.
    #[must_use]
    pub fn amount_decimals(mut self, value: u32) -> Self {
        self.trading.amount_decimals = value;
        self
    }

    /// Sets the maker fee rate.
    #[must_use]
    pub fn maker_fee_rate(mut self, value: Decimal) -> Self {
        self.trading.maker_fee_rate = value;
        self
    }

    /// Sets the taker fee rate.
    #[must_use]
    pub fn taker_fee_rate(mut self, value: Decimal) -> Self {
        self.trading.taker_fee_rate = value;
        self
    }

    /// Sets the gas estimate.
    #[must_use]
    pub fn gas_used_estimation(mut self, value: u32) -> Self {
        self.trading.gas_used_estimation = value;
        self
    }

    /// Sets the publication flag.
    #[must_use]
    pub fn published(mut self, value: bool) -> Self {
        self.trading.is_published = value;
        self
    }

    /// Builds the market.
    #[must_use]
    pub fn build(self) -> Market {
        Market {
            id: self.id,
            base_token: self.base_token,
            quote_token: self.quote_token,
            trading: self.trading,
        }
    }
}

/// Flat wire shape of a [`Market`].
///
/// Decimals travel as strings both ways; a JSON number would be read
/// through `f64` and is rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MarketJson {
    id: MarketId,
    base_token_symbol: String,
    base_token_name: String,
    base_token_address: String,
    base_token_decimals: u32,
    quote_token_symbol: String,
    quote_token_name: String,
    quote_token_address: String,
    quote_token_decimals: u32,
    #[serde(with = "rust_decimal::serde::str")]
    min_order_size: Decimal,
    price_precision: u32,
    price_decimals: u32,
    amount_decimals: u32,
    #[serde(with = "rust_decimal::serde::str")]
    maker_fee_rate: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    taker_fee_rate: Decimal,
    gas_used_estimation: u32,
    is_published: bool,
}

impl From<Market> for MarketJson {
    fn from(market: Market) -> Self {
        let Market {
            id,
            base_token,
            quote_token,
            trading,
        } = market;
        Self {
            id,
            base_token_symbol: base_token.symbol,
            base_token_name: base_token.name,
            base_token_address: base_token.address,
            base_token_decimals: base_token.decimals,
            quote_token_symbol: quote_token.symbol,
            quote_token_name: quote_token.name,
            quote_token_address: quote_token.address,
            quote_token_decimals: quote_token.decimals,
            min_order_size: trading.min_order_size,
            price_precision: trading.price_precision,
            price_decimals: trading.price_decimals,
            amount_decimals: trading.amount_decimals,
            maker_fee_rate: trading.maker_fee_rate,
            taker_fee_rate: trading.taker_fee_rate,
            gas_used_estimation: trading.gas_used_estimation,
            is_published: trading.is_published,
        }
    }
}

impl From<MarketJson> for Market {
    fn from(json: MarketJson) -> Self {
        Self {
            id: json.id,
            base_token: TokenDescriptor {
                symbol: json.base_token_symbol,
                name: json.base_token_name,
                address: json.base_token_address,
                decimals: json.base_token_decimals,
            },
            quote_token: TokenDescriptor {
                symbol: json.quote_token_symbol,
                name: json.quote_token_name,
                address: json.quote_token_address,
                decimals: json.quote_token_decimals,
            },
            trading: TradingParameters {
                min_order_size: json.min_order_size,
                price_precision: json.price_precision,
                price_decimals: json.price_decimals,
                amount_decimals: json.amount_decimals,
                maker_fee_rate: json.maker_fee_rate,
                taker_fee_rate: json.taker_fee_rate,
                gas_used_estimation: json.gas_used_estimation,
                is_published: json.is_published,
            },
        }
    }
}
