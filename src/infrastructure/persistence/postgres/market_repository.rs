//! # PostgreSQL Market Repository
//!
//! Networked implementation of [`MarketRepository`] using sqlx.
//!
//! Decimal columns are `NUMERIC` and bound as `rust_decimal::Decimal`.
//! Insert and update are separate statements: there is no upsert path.

use crate::domain::entities::{FieldValue, Market, TradingParameters};
use crate::domain::value_objects::MarketId;
use crate::infrastructure::persistence::schema::{MARKETS_TABLE, insert_markets, select_markets};
use crate::infrastructure::persistence::sql::{map_sqlx_error, to_u32, token};
use crate::infrastructure::persistence::traits::{
    MARKET_ENTITY, MarketRepository, RepositoryError, RepositoryResult, ensure_insertable, present,
};
use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};

/// PostgreSQL implementation of [`MarketRepository`].
///
/// Uses connection pooling via `sqlx::PgPool`. The `markets` table is
/// expected to exist; see [`POSTGRES_MARKETS_DDL`].
///
/// # Examples
///
/// ```ignore
/// use sqlx::PgPool;
/// use market_registry::infrastructure::persistence::postgres::PostgresMarketRepository;
///
/// let pool = PgPool::connect("postgres://...").await?;
/// let repo = PostgresMarketRepository::new(pool);
/// ```
///
/// [`POSTGRES_MARKETS_DDL`]: crate::infrastructure::persistence::schema::POSTGRES_MARKETS_DDL
#[derive(Debug, Clone)]
pub struct PostgresMarketRepository {
    pool: PgPool,
}

impl PostgresMarketRepository {
    /// Creates a new PostgreSQL market repository.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl MarketRepository for PostgresMarketRepository {
    #[tracing::instrument(skip(self))]
    async fn find_all_markets(&self) -> RepositoryResult<Vec<Market>> {
        let sql = select_markets();
        let rows: Vec<MarketRow> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                let err = map_sqlx_error(e, None);
                tracing::warn!(error = %err, "listing markets failed");
                err
            })?;

        let markets = rows
            .into_iter()
            .map(MarketRow::try_into_market)
            .collect::<RepositoryResult<Vec<_>>>()?;
        tracing::debug!(count = markets.len(), "listed markets");
        Ok(markets)
    }

    #[tracing::instrument(skip(self), fields(market_id = %id))]
    async fn find_market_by_id(&self, id: &MarketId) -> RepositoryResult<Option<Market>> {
        if id.is_empty() {
            return Ok(None);
        }

        let mut query = QueryBuilder::<Postgres>::new(select_markets());
        query.push(" WHERE id = ");
        query.push_bind(id.to_string());

        let row = query
            .build_query_as::<MarketRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                let err = map_sqlx_error(e, Some(id));
                tracing::warn!(error = %err, "market lookup failed");
                err
            })?;

        let market = row.map(MarketRow::try_into_market).transpose()?;
        Ok(present(market))
    }

    #[tracing::instrument(skip(self, market), fields(market_id = %market.id()))]
    async fn insert_market(&self, market: &Market) -> RepositoryResult<()> {
        ensure_insertable(market)?;

        let mut query = insert_statement(market);
        query.build().execute(&self.pool).await.map_err(|e| {
            let err = map_sqlx_error(e, Some(market.id()));
            tracing::warn!(error = %err, "market insert failed");
            err
        })?;

        tracing::debug!("inserted market");
        Ok(())
    }

    #[tracing::instrument(skip(self, market), fields(market_id = %market.id()))]
    async fn update_market(&self, market: &Market) -> RepositoryResult<()> {
        let mut query = update_statement(market);
        let result = query.build().execute(&self.pool).await.map_err(|e| {
            let err = map_sqlx_error(e, Some(market.id()));
            tracing::warn!(error = %err, "market update failed");
            err
        })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found(
                MARKET_ENTITY,
                market.id().to_string(),
            ));
        }
        tracing::debug!("updated market");
        Ok(())
    }
}

/// Builds a plain `INSERT` binding every column in `MARKET_COLUMNS` order.
///
/// No `ON CONFLICT` clause: an existing id must fail on the primary key.
fn insert_statement(market: &Market) -> QueryBuilder<'static, Postgres> {
    let base = market.base_token();
    let quote = market.quote_token();
    let trading = market.trading_parameters();

    let mut query = QueryBuilder::new(insert_markets());
    query.push("VALUES (");
    let mut values = query.separated(", ");
    values
        .push_bind(market.id().to_string())
        .push_bind(base.symbol().to_owned())
        .push_bind(base.name().to_owned())
        .push_bind(base.address().to_owned())
        .push_bind(i64::from(base.decimals()))
        .push_bind(quote.symbol().to_owned())
        .push_bind(quote.name().to_owned())
        .push_bind(quote.address().to_owned())
        .push_bind(i64::from(quote.decimals()))
        .push_bind(trading.min_order_size())
        .push_bind(i64::from(trading.price_precision()))
        .push_bind(i64::from(trading.price_decimals()))
        .push_bind(i64::from(trading.amount_decimals()))
        .push_bind(trading.maker_fee_rate())
        .push_bind(trading.taker_fee_rate())
        .push_bind(i64::from(trading.gas_used_estimation()))
        .push_bind(trading.is_published());
    query.push(")");
    query
}

/// Builds `UPDATE markets SET <mutable columns> WHERE id = $n`.
fn update_statement(market: &Market) -> QueryBuilder<'static, Postgres> {
    let trading = market.trading_parameters();
    let mut query = QueryBuilder::new(format!("UPDATE {MARKETS_TABLE} SET "));
    let mut assignments = query.separated(", ");

    for field in TradingParameters::FIELDS {
        assignments.push(field.column());
        assignments.push_unseparated(" = ");
        match trading.value(field) {
            FieldValue::Decimal(value) => assignments.push_bind_unseparated(value),
            FieldValue::Unsigned(value) => assignments.push_bind_unseparated(i64::from(value)),
            FieldValue::Bool(value) => assignments.push_bind_unseparated(value),
        };
    }

    query.push(" WHERE id = ");
    query.push_bind(market.id().to_string());
    query
}

/// Row type for market queries.
#[derive(Debug, sqlx::FromRow)]
struct MarketRow {
    id: String,
    base_token_symbol: String,
    base_token_name: String,
    base_token_address: String,
    base_token_decimals: i64,
    quote_token_symbol: String,
    quote_token_name: String,
    quote_token_address: String,
    quote_token_decimals: i64,
    min_order_size: Decimal,
    price_precision: i64,
    price_decimals: i64,
    amount_decimals: i64,
    maker_fee_rate: Decimal,
    taker_fee_rate: Decimal,
    gas_used_estimation: i64,
    is_published: bool,
}

impl MarketRow {
    /// Converts the row into a Market.
    fn try_into_market(self) -> RepositoryResult<Market> {
        let trading = TradingParameters::new()
            .with_min_order_size(self.min_order_size)
            .with_price_precision(to_u32("price_precision", self.price_precision)?)
            .with_price_decimals(to_u32("price_decimals", self.price_decimals)?)
            .with_amount_decimals(to_u32("amount_decimals", self.amount_decimals)?)
            .with_maker_fee_rate(self.maker_fee_rate)
            .with_taker_fee_rate(self.taker_fee_rate)
            .with_gas_used_estimation(to_u32("gas_used_estimation", self.gas_used_estimation)?)
            .with_published(self.is_published);

        Ok(Market::from_parts(
            MarketId::new(self.id),
            token(
                "base_token",
                self.base_token_symbol,
                self.base_token_name,
                self.base_token_address,
                self.base_token_decimals,
            )?,
            token(
                "quote_token",
                self.quote_token_symbol,
                self.quote_token_name,
                self.quote_token_address,
                self.quote_token_decimals,
            )?,
            trading,
        ))
    }
}
