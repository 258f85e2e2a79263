//! # Markets Table Layout
//!
//! Persisted layout shared by the SQL backends: one row per market in the
//! [`MARKETS_TABLE`] table, keyed by `id`, one snake_case column per field.
//! Both dialects use the same logical column set so rows are portable
//! between them.
//!
//! Applying [`POSTGRES_MARKETS_DDL`] to a networked database is left to the
//! deployment's migration tooling. The embedded backend applies
//! [`SQLITE_MARKETS_DDL`] itself through
//! [`SqliteMarketRepository::create_schema`](super::sqlite::SqliteMarketRepository::create_schema).

/// Name of the markets table.
pub const MARKETS_TABLE: &str = "markets";

/// Every column of the markets table, in select order.
pub const MARKET_COLUMNS: [&str; 17] = [
    "id",
    "base_token_symbol",
    "base_token_name",
    "base_token_address",
    "base_token_decimals",
    "quote_token_symbol",
    "quote_token_name",
    "quote_token_address",
    "quote_token_decimals",
    "min_order_size",
    "price_precision",
    "price_decimals",
    "amount_decimals",
    "maker_fee_rate",
    "taker_fee_rate",
    "gas_used_estimation",
    "is_published",
];

/// Comma-separated [`MARKET_COLUMNS`].
pub(crate) fn column_list() -> String {
    MARKET_COLUMNS.join(", ")
}

/// `SELECT <every column> FROM markets`.
pub(crate) fn select_markets() -> String {
    format!("SELECT {} FROM {MARKETS_TABLE}", column_list())
}

/// `INSERT INTO markets (<every column>) `, awaiting its `VALUES` clause.
pub(crate) fn insert_markets() -> String {
    format!("INSERT INTO {MARKETS_TABLE} ({}) ", column_list())
}

/// SQLite table definition. Decimals are stored as exact text.
pub const SQLITE_MARKETS_DDL: &str = r#"
CREATE TABLE IF NOT EXISTS markets (
    id                   TEXT    NOT NULL PRIMARY KEY,
    base_token_symbol    TEXT    NOT NULL,
    base_token_name      TEXT    NOT NULL,
    base_token_address   TEXT    NOT NULL,
    base_token_decimals  INTEGER NOT NULL,
    quote_token_symbol   TEXT    NOT NULL,
    quote_token_name     TEXT    NOT NULL,
    quote_token_address  TEXT    NOT NULL,
    quote_token_decimals INTEGER NOT NULL,
    min_order_size       TEXT    NOT NULL,
    price_precision      INTEGER NOT NULL,
    price_decimals       INTEGER NOT NULL,
    amount_decimals      INTEGER NOT NULL,
    maker_fee_rate       TEXT    NOT NULL,
    taker_fee_rate       TEXT    NOT NULL,
    gas_used_estimation  INTEGER NOT NULL,
    is_published         BOOLEAN NOT NULL DEFAULT 0
)
"#;

/// PostgreSQL table definition.
pub const POSTGRES_MARKETS_DDL: &str = r#"
CREATE TABLE IF NOT EXISTS markets (
    id                   TEXT    NOT NULL PRIMARY KEY,
    base_token_symbol    TEXT    NOT NULL,
    base_token_name      TEXT    NOT NULL,
    base_token_address   TEXT    NOT NULL,
    base_token_decimals  BIGINT  NOT NULL,
    quote_token_symbol   TEXT    NOT NULL,
    quote_token_name     TEXT    NOT NULL,
    quote_token_address  TEXT    NOT NULL,
    quote_token_decimals BIGINT  NOT NULL,
    min_order_size       NUMERIC NOT NULL,
    price_precision      BIGINT  NOT NULL,
    price_decimals       BIGINT  NOT NULL,
    amount_decimals      BIGINT  NOT NULL,
    maker_fee_rate       NUMERIC NOT NULL,
    taker_fee_rate       NUMERIC NOT NULL,
    gas_used_estimation  BIGINT  NOT NULL,
    is_published         BOOLEAN NOT NULL DEFAULT FALSE
)
"#;
