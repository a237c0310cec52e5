//! Types for Independent Reserve REST API requests and responses

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use crate::error::RestError;

// ============================================================================
// Order Types
// ============================================================================

/// Order type tag accepted by the order placement endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderType {
    /// Market sell
    MarketOffer,
    /// Market buy
    MarketBid,
    /// Limit sell
    LimitOffer,
    /// Limit buy
    LimitBid,
}

impl OrderType {
    /// Wire name of this order type
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MarketOffer => "MarketOffer",
            Self::MarketBid => "MarketBid",
            Self::LimitOffer => "LimitOffer",
            Self::LimitBid => "LimitBid",
        }
    }

    pub fn is_limit(&self) -> bool {
        matches!(self, Self::LimitOffer | Self::LimitBid)
    }

    pub fn is_market(&self) -> bool {
        !self.is_limit()
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderType {
    type Err = RestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MarketOffer" => Ok(Self::MarketOffer),
            "MarketBid" => Ok(Self::MarketBid),
            "LimitOffer" => Ok(Self::LimitOffer),
            "LimitBid" => Ok(Self::LimitBid),
            other => Err(RestError::Validation(format!(
                "orderType '{}' must be one of MarketOffer, MarketBid, LimitOffer or LimitBid",
                other
            ))),
        }
    }
}

// ============================================================================
// Pagination
// ============================================================================

/// One page of a paginated private endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Page<T> {
    #[serde(default)]
    pub page_size: u32,
    #[serde(default)]
    pub total_items: u64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

// ============================================================================
// Market Data Types
// ============================================================================

/// Market summary for a currency pair
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MarketSummary {
    pub created_timestamp_utc: Option<DateTime<Utc>>,
    pub current_highest_bid_price: Option<Decimal>,
    pub current_lowest_offer_price: Option<Decimal>,
    pub day_avg_price: Option<Decimal>,
    pub day_highest_price: Option<Decimal>,
    pub day_lowest_price: Option<Decimal>,
    pub day_volume_xbt: Option<Decimal>,
    pub last_price: Option<Decimal>,
    pub primary_currency_code: Option<String>,
    pub secondary_currency_code: Option<String>,
}

impl MarketSummary {
    /// Mid price between best bid and best offer
    pub fn mid_price(&self) -> Option<Decimal> {
        let bid = self.current_highest_bid_price?;
        let ask = self.current_lowest_offer_price?;
        Some((bid + ask) / Decimal::TWO)
    }

    /// Spread between best offer and best bid
    pub fn spread(&self) -> Option<Decimal> {
        Some(self.current_lowest_offer_price? - self.current_highest_bid_price?)
    }
}

/// Single price level of the order book
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OrderBookEntry {
    pub order_type: Option<String>,
    pub price: Decimal,
    pub volume: Decimal,
}

/// Order book for a currency pair
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OrderBook {
    #[serde(default)]
    pub buy_orders: Vec<OrderBookEntry>,
    #[serde(default)]
    pub sell_orders: Vec<OrderBookEntry>,
    pub created_timestamp_utc: Option<DateTime<Utc>>,
    pub primary_currency_code: Option<String>,
    pub secondary_currency_code: Option<String>,
}

impl OrderBook {
    pub fn best_bid(&self) -> Option<&OrderBookEntry> {
        self.buy_orders.first()
    }

    pub fn best_offer(&self) -> Option<&OrderBookEntry> {
        self.sell_orders.first()
    }
}

/// A trade in the public trade feed
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RecentTrade {
    pub primary_currency_amount: Decimal,
    pub secondary_currency_trade_price: Decimal,
    pub trade_timestamp_utc: Option<DateTime<Utc>>,
}

/// Recent trades for a currency pair
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RecentTrades {
    pub created_timestamp_utc: Option<DateTime<Utc>>,
    pub primary_currency_code: Option<String>,
    pub secondary_currency_code: Option<String>,
    #[serde(default)]
    pub trades: Vec<RecentTrade>,
}

// ============================================================================
// Order Types (responses)
// ============================================================================

/// Order as returned by place, cancel and details endpoints
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OrderDetails {
    pub order_guid: String,
    pub created_timestamp_utc: Option<DateTime<Utc>>,
    #[serde(rename = "Type")]
    pub order_type: Option<String>,
    pub volume_ordered: Option<Decimal>,
    pub volume_filled: Option<Decimal>,
    pub price: Option<Decimal>,
    pub avg_price: Option<Decimal>,
    pub reserved_amount: Option<Decimal>,
    pub status: Option<String>,
    pub primary_currency_code: Option<String>,
    pub secondary_currency_code: Option<String>,
}

/// Order as listed by the open/closed order endpoints
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OrderSummary {
    pub order_guid: String,
    pub created_timestamp_utc: Option<DateTime<Utc>>,
    pub order_type: Option<String>,
    pub volume: Option<Decimal>,
    pub outstanding: Option<Decimal>,
    pub price: Option<Decimal>,
    pub avg_price: Option<Decimal>,
    pub value: Option<Decimal>,
    pub status: Option<String>,
    pub fee_percent: Option<Decimal>,
    pub primary_currency_code: Option<String>,
    pub secondary_currency_code: Option<String>,
}

// ============================================================================
// Account Types
// ============================================================================

/// Balance of one currency account
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Account {
    pub account_guid: String,
    pub account_status: Option<String>,
    pub available_balance: Decimal,
    pub currency_code: String,
    pub total_balance: Decimal,
}

/// Brokerage fee for one currency
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BrokerageFee {
    pub currency_code: String,
    pub fee: Decimal,
}

// ============================================================================
// Funding Types
// ============================================================================

/// Digital currency deposit address
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DepositAddress {
    pub deposit_address: String,
    pub last_checked_timestamp_utc: Option<DateTime<Utc>>,
    pub next_update_timestamp_utc: Option<DateTime<Utc>>,
    pub tag: Option<String>,
}
