//! REST API client for the Independent Reserve cryptocurrency exchange
//!
//! This crate provides a complete REST API client for Independent Reserve,
//! including market data, order placement, account queries and withdrawals.
//!
//! # Features
//!
//! - **Market Data**: Market summary, order book, recent trades, FX rates
//! - **Trading**: Place limit and market orders, cancel, list open/closed orders
//! - **Account**: Balances, transactions, brokerage fees
//! - **Funding**: Deposit addresses, digital currency and fiat withdrawals
//!
//! # Authentication
//!
//! Private endpoints require an API key and secret. Every private request
//! carries a nonce and an HMAC-SHA256 signature over a canonical message; see
//! [`request`] for the exact format.
//!
//! # Errors
//!
//! Every call returns [`RestResult`]. Failures are normalized into
//! [`RestError`], whether they come from argument validation, the transport,
//! an HTTP status, an error message from the exchange, or an unreadable
//! response such as an HTML error page.
//!
//! # Example
//!
//! ```no_run
//! use ir_rest::{Credentials, IndependentReserveClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Public endpoints (no auth required)
//!     let client = IndependentReserveClient::new()?;
//!     let summary = client.get_market_summary("Xbt", "Aud").await?;
//!     println!("XBT/AUD: {:?}", summary.last_price);
//!
//!     // Private endpoints (auth required)
//!     let creds = Credentials::from_env()?;
//!     let auth_client = IndependentReserveClient::with_credentials(creds)?;
//!     let accounts = auth_client.get_accounts().await?;
//!     println!("Accounts: {:?}", accounts);
//!
//!     Ok(())
//! }
//! ```

pub mod classify;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod request;
pub mod transport;
pub mod types;

// Re-export main types
pub use client::{ClientConfig, IndependentReserveClient};
pub use error::{ErrorKind, RestError, RestResult};
pub use ir_auth::Credentials;
pub use request::{ParamValue, Params, SignedRequest};
pub use transport::{Exchange, ResponseBody};

// Re-export endpoint-specific types
pub use types::{
    // Market data
    MarketSummary, OrderBook, OrderBookEntry, RecentTrade, RecentTrades,
    // Trading
    OrderDetails, OrderSummary, OrderType,
    // Account
    Account, BrokerageFee,
    // Funding
    DepositAddress,
    // Responses
    Page,
};
