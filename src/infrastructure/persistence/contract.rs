//! Behaviour every [`MarketRepository`] must share.
//!
//! Backends invoke [`market_repository_contract!`] with an async factory
//! returning a fresh, empty repository, optionally followed by attributes
//! applied to every generated test.

#![allow(clippy::panic)]

use crate::domain::entities::{Market, TokenDescriptor, TradingParameters};
use crate::domain::value_objects::MarketId;
use crate::infrastructure::persistence::traits::{MarketRepository, RepositoryError};
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::HashSet;

/// Generated markets per property run.
pub(crate) const PROPERTY_CASES: u32 = 24;

/// A fully populated market with the given id.
pub(crate) fn sample_market(id: &str) -> Market {
    let (base, quote) = id.split_once('-').unwrap_or((id, "WETH"));
    Market::builder(
        id,
        TokenDescriptor::new(base, format!("{base} Token"), format!("0x{base}"), 18),
        TokenDescriptor::new(quote, format!("{quote} Token"), format!("0x{quote}"), 18),
    )
    .min_order_size(Decimal::new(1, 2))
    .price_precision(5)
    .price_decimals(8)
    .amount_decimals(4)
    .maker_fee_rate(Decimal::new(1, 3))
    .taker_fee_rate(Decimal::new(3, 3))
    .gas_used_estimation(190_000)
    .build()
}

fn any_decimal() -> impl Strategy<Value = Decimal> {
    (-1_000_000_000_000_000i64..1_000_000_000_000_000, 0u32..=18)
        .prop_map(|(mantissa, scale)| Decimal::new(mantissa, scale))
}

fn any_token() -> impl Strategy<Value = TokenDescriptor> {
    ("[A-Z]{1,6}", "[A-Za-z0-9 ]{0,24}", "0x[0-9a-f]{40}", any::<u32>()).prop_map(
        |(symbol, name, address, decimals)| TokenDescriptor::new(symbol, name, address, decimals),
    )
}

fn any_trading_parameters() -> impl Strategy<Value = TradingParameters> {
    (
        any_decimal(),
        any::<u32>(),
        any::<u32>(),
        any::<u32>(),
        any_decimal(),
        any_decimal(),
        any::<u32>(),
        any::<bool>(),
    )
        .prop_map(
            |(min_order, precision, price_decimals, amount_decimals, maker, taker, gas, published)| {
                TradingParameters::new()
                    .with_min_order_size(min_order)
                    .with_price_precision(precision)
                    .with_price_decimals(price_decimals)
                    .with_amount_decimals(amount_decimals)
                    .with_maker_fee_rate(maker)
                    .with_taker_fee_rate(taker)
                    .with_gas_used_estimation(gas)
                    .with_published(published)
            },
        )
}

/// Any storable market.
pub(crate) fn any_market() -> impl Strategy<Value = Market> {
    (
        "[A-Z]{1,6}-[A-Z]{1,6}",
        any_token(),
        any_token(),
        any_trading_parameters(),
    )
        .prop_map(|(id, base, quote, trading)| {
            Market::from_parts(MarketId::new(id), base, quote, trading)
        })
}

fn ids(markets: &[Market]) -> HashSet<String> {
    markets.iter().map(|m| m.id().to_string()).collect()
}

pub(crate) async fn empty_store_lists_nothing(repo: &dyn MarketRepository) {
    let all = repo.find_all_markets().await;
    assert!(matches!(all, Ok(ref v) if v.is_empty()), "got {all:?}");
}

pub(crate) async fn inserted_market_round_trips(repo: &dyn MarketRepository) {
    let market = sample_market("ZRX-WETH");
    assert!(repo.insert_market(&market).await.is_ok());

    let found = repo.find_market_by_id(market.id()).await;
    assert!(matches!(found, Ok(Some(ref m)) if *m == market), "got {found:?}");
}

pub(crate) async fn unknown_id_is_absent(repo: &dyn MarketRepository) {
    assert!(repo.insert_market(&sample_market("ZRX-WETH")).await.is_ok());

    for id in ["HOT-WETH", "zrx-weth", "ZRX", ""] {
        let found = repo.find_market_by_id(&MarketId::new(id)).await;
        assert!(matches!(found, Ok(None)), "{id:?} gave {found:?}");
    }
}

pub(crate) async fn duplicate_insert_is_rejected(repo: &dyn MarketRepository) {
    let original = sample_market("ZRX-WETH");
    assert!(repo.insert_market(&original).await.is_ok());

    let clash = Market::builder(
        "ZRX-WETH",
        TokenDescriptor::new("XXX", "Other", "0xother", 6),
        TokenDescriptor::new("YYY", "Other", "0xother", 6),
    )
    .published(true)
    .build();
    let err = repo.insert_market(&clash).await;
    assert!(
        matches!(err, Err(RepositoryError::DuplicateKey { ref id, .. }) if id == "ZRX-WETH"),
        "got {err:?}"
    );

    let found = repo.find_market_by_id(original.id()).await;
    assert!(matches!(found, Ok(Some(ref m)) if *m == original), "got {found:?}");
}

pub(crate) async fn empty_id_insert_is_rejected(repo: &dyn MarketRepository) {
    let err = repo.insert_market(&sample_market("")).await;
    assert!(matches!(err, Err(RepositoryError::InvalidId(_))), "got {err:?}");

    let all = repo.find_all_markets().await;
    assert!(matches!(all, Ok(ref v) if v.is_empty()), "got {all:?}");
}

pub(crate) async fn update_writes_only_trading_parameters(repo: &dyn MarketRepository) {
    let original = sample_market("ZRX-WETH");
    assert!(repo.insert_market(&original).await.is_ok());

    let trading = TradingParameters::new()
        .with_min_order_size(Decimal::new(5, 1))
        .with_price_precision(6)
        .with_price_decimals(9)
        .with_amount_decimals(2)
        .with_maker_fee_rate(Decimal::new(2, 3))
        .with_taker_fee_rate(Decimal::new(25, 4))
        .with_gas_used_estimation(250_000)
        .with_published(true);
    // Same id, different tokens: the tokens must not be written.
    let stale = Market::builder(
        "ZRX-WETH",
        TokenDescriptor::new("BAD", "Bad Token", "0xbad", 0),
        TokenDescriptor::new("DAI", "Dai", "0xdai", 2),
    )
    .trading_parameters(trading.clone())
    .build();
    assert!(repo.update_market(&stale).await.is_ok());

    let expected = original.clone().with_trading_parameters(trading);
    let found = repo.find_market_by_id(original.id()).await;
    assert!(matches!(found, Ok(Some(ref m)) if *m == expected), "got {found:?}");
}

pub(crate) async fn update_of_unknown_id_is_not_found(repo: &dyn MarketRepository) {
    assert!(repo.insert_market(&sample_market("ZRX-WETH")).await.is_ok());

    let err = repo.update_market(&sample_market("HOT-WETH")).await;
    assert!(
        matches!(err, Err(RepositoryError::NotFound { ref id, .. }) if id == "HOT-WETH"),
        "got {err:?}"
    );

    let found = repo.find_market_by_id(&MarketId::new("HOT-WETH")).await;
    assert!(matches!(found, Ok(None)), "got {found:?}");
    let all = repo.find_all_markets().await;
    assert!(matches!(all, Ok(ref v) if v.len() == 1), "got {all:?}");
}

pub(crate) async fn update_with_unchanged_values_succeeds(repo: &dyn MarketRepository) {
    let market = sample_market("ZRX-WETH");
    assert!(repo.insert_market(&market).await.is_ok());

    assert!(repo.update_market(&market).await.is_ok());
    assert!(repo.update_market(&market).await.is_ok());
}

pub(crate) async fn listing_returns_exactly_inserted(repo: &dyn MarketRepository) {
    let inserted = [
        sample_market("ZRX-WETH"),
        sample_market("HOT-WETH"),
        sample_market("WETH-DAI"),
    ];
    for market in &inserted {
        assert!(repo.insert_market(market).await.is_ok());
    }

    let all = match repo.find_all_markets().await {
        Ok(all) => all,
        Err(e) => panic!("listing failed: {e}"),
    };
    assert_eq!(all.len(), 3);
    assert_eq!(ids(&all), ids(&inserted));
    for market in &inserted {
        assert!(all.contains(market));
    }
}

pub(crate) async fn publishing_scenario(repo: &dyn MarketRepository) {
    let market = Market::builder(
        "ZRX-WETH",
        TokenDescriptor::new("ZRX", "0x Protocol Token", "0xe41d", 18),
        TokenDescriptor::new("WETH", "Wrapped Ether", "0xc02a", 18),
    )
    .maker_fee_rate(Decimal::new(1, 3))
    .published(false)
    .build();
    assert!(repo.insert_market(&market).await.is_ok());

    let trading = market
        .trading_parameters()
        .clone()
        .with_published(true)
        .with_maker_fee_rate(Decimal::new(2, 3));
    let update = market.clone().with_trading_parameters(trading);
    assert!(repo.update_market(&update).await.is_ok());

    let found = match repo.find_market_by_id(&MarketId::new("ZRX-WETH")).await {
        Ok(Some(found)) => found,
        other => panic!("expected market, got {other:?}"),
    };
    assert!(found.is_published());
    assert_eq!(found.trading_parameters().maker_fee_rate(), Decimal::new(2, 3));
    assert_eq!(found.base_token().symbol(), "ZRX");
}

pub(crate) async fn extreme_values_round_trip(repo: &dyn MarketRepository) {
    let base = TokenDescriptor::new("ZRX", "0x Protocol Token", "0xe41d", u32::MAX);
    let quote = TokenDescriptor::new("WETH", "Wrapped Ether", "0xc02a", 0);
    let trading = TradingParameters::new()
        .with_min_order_size(Decimal::MAX)
        .with_price_precision(u32::MAX)
        .with_price_decimals(u32::MAX)
        .with_amount_decimals(u32::MAX)
        .with_maker_fee_rate(Decimal::new(1, 28))
        .with_taker_fee_rate(Decimal::new(-3, 3))
        .with_gas_used_estimation(u32::MAX)
        .with_published(true);
    let market = Market::from_parts(MarketId::new("ZRX-WETH"), base, quote, trading.clone());
    let inserted = repo.insert_market(&market).await;
    assert!(inserted.is_ok(), "got {inserted:?}");

    let found = repo.find_market_by_id(market.id()).await;
    assert!(matches!(found, Ok(Some(ref m)) if *m == market), "got {found:?}");

    let lowered = market
        .clone()
        .with_trading_parameters(trading.with_gas_used_estimation(0));
    let updated = repo.update_market(&lowered).await;
    assert!(updated.is_ok(), "got {updated:?}");
    let found = repo.find_market_by_id(market.id()).await;
    assert!(matches!(found, Ok(Some(ref m)) if *m == lowered), "got {found:?}");
}

/// Insert, lookup, listing and update agree for one generated market.
pub(crate) async fn any_market_round_trips(repo: &dyn MarketRepository, market: Market) {
    let inserted = repo.insert_market(&market).await;
    assert!(inserted.is_ok(), "got {inserted:?}");

    let found = repo.find_market_by_id(market.id()).await;
    assert!(matches!(found, Ok(Some(ref m)) if *m == market), "got {found:?}");

    let all = repo.find_all_markets().await;
    assert!(matches!(all, Ok(ref v) if v.as_slice() == [market.clone()]), "got {all:?}");

    let updated = repo.update_market(&market).await;
    assert!(updated.is_ok(), "got {updated:?}");
}

/// Generates one `#[tokio::test]` per contract case.
macro_rules! market_repository_contract {
    ($factory:path $(, $attr:meta)*) => {
        mod contract_cases {
            use super::*;
            use crate::infrastructure::persistence::contract as cases;

            #[tokio::test]
            $(#[$attr])*
            async fn empty_store_lists_nothing() {
                cases::empty_store_lists_nothing(&$factory().await).await;
            }

            #[tokio::test]
            $(#[$attr])*
            async fn inserted_market_round_trips() {
                cases::inserted_market_round_trips(&$factory().await).await;
            }

            #[tokio::test]
            $(#[$attr])*
            async fn unknown_id_is_absent() {
                cases::unknown_id_is_absent(&$factory().await).await;
            }

            #[tokio::test]
            $(#[$attr])*
            async fn duplicate_insert_is_rejected() {
                cases::duplicate_insert_is_rejected(&$factory().await).await;
            }

            #[tokio::test]
            $(#[$attr])*
            async fn empty_id_insert_is_rejected() {
                cases::empty_id_insert_is_rejected(&$factory().await).await;
            }

            #[tokio::test]
            $(#[$attr])*
            async fn update_writes_only_trading_parameters() {
                cases::update_writes_only_trading_parameters(&$factory().await).await;
            }

            #[tokio::test]
            $(#[$attr])*
            async fn update_of_unknown_id_is_not_found() {
                cases::update_of_unknown_id_is_not_found(&$factory().await).await;
            }

            #[tokio::test]
            $(#[$attr])*
            async fn update_with_unchanged_values_succeeds() {
                cases::update_with_unchanged_values_succeeds(&$factory().await).await;
            }

            #[tokio::test]
            $(#[$attr])*
            async fn listing_returns_exactly_inserted() {
                cases::listing_returns_exactly_inserted(&$factory().await).await;
            }

            #[tokio::test]
            $(#[$attr])*
            async fn publishing_scenario() {
                cases::publishing_scenario(&$factory().await).await;
            }

            #[tokio::test]
            $(#[$attr])*
            async fn extreme_values_round_trip() {
                cases::extreme_values_round_trip(&$factory().await).await;
            }

            #[test]
            $(#[$attr])*
            fn any_market_round_trips() {
                let runtime = tokio::runtime::Runtime::new().unwrap();
                proptest::proptest!(
                    proptest::prelude::ProptestConfig::with_cases(cases::PROPERTY_CASES),
                    |(market in cases::any_market())| {
                        runtime.block_on(async {
                            cases::any_market_round_trips(&$factory().await, market).await;
                        });
                    }
                );
            }
        }
    };
}

pub(crate) use market_repository_contract;
