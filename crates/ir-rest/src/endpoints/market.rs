//! Public market data endpoints
//!
//! These endpoints don't require authentication.

use crate::client::IndependentReserveClient;
use crate::error::{RestError, RestResult};
use crate::request::Params;
use crate::types::{MarketSummary, OrderBook, RecentTrades};
use serde_json::Value;
use tracing::{debug, instrument};

use super::require_non_empty;

/// Most trades or hours the history endpoints return
const MAX_HISTORY: u32 = 50;

/// Public market data endpoints
pub struct MarketEndpoints<'a> {
    client: &'a IndependentReserveClient,
}

impl<'a> MarketEndpoints<'a> {
    pub fn new(client: &'a IndependentReserveClient) -> Self {
        Self { client }
    }

    /// Get the digital currency codes the exchange trades
    #[instrument(skip(self))]
    pub async fn get_valid_primary_currency_codes(&self) -> RestResult<Vec<String>> {
        self.client
            .get("GetValidPrimaryCurrencyCodes", Params::new())
            .await
    }

    /// Get the fiat currency codes the exchange trades against
    #[instrument(skip(self))]
    pub async fn get_valid_secondary_currency_codes(&self) -> RestResult<Vec<String>> {
        self.client
            .get("GetValidSecondaryCurrencyCodes", Params::new())
            .await
    }

    /// Get the valid limit order types
    #[instrument(skip(self))]
    pub async fn get_valid_limit_order_types(&self) -> RestResult<Vec<String>> {
        self.client.get("GetValidLimitOrderTypes", Params::new()).await
    }

    /// Get the valid market order types
    #[instrument(skip(self))]
    pub async fn get_valid_market_order_types(&self) -> RestResult<Vec<String>> {
        self.client.get("GetValidMarketOrderTypes", Params::new()).await
    }

    /// Get every valid order type
    #[instrument(skip(self))]
    pub async fn get_valid_order_types(&self) -> RestResult<Vec<String>> {
        self.client.get("GetValidOrderTypes", Params::new()).await
    }

    /// Get the transaction types accepted by `get_transactions`
    #[instrument(skip(self))]
    pub async fn get_valid_transaction_types(&self) -> RestResult<Vec<String>> {
        self.client.get("GetValidTransactionTypes", Params::new()).await
    }

    /// Get the market summary for a currency pair
    ///
    /// # Arguments
    /// * `primary` - Primary currency code (e.g., "Xbt")
    /// * `secondary` - Secondary currency code (e.g., "Aud")
    #[instrument(skip(self))]
    pub async fn get_market_summary(&self, primary: &str, secondary: &str) -> RestResult<MarketSummary> {
        require_non_empty("primaryCurrencyCode", primary)?;
        require_non_empty("secondaryCurrencyCode", secondary)?;
        debug!("Fetching market summary for {}/{}", primary, secondary);

        self.client
            .get("GetMarketSummary", pair_params(primary, secondary))
            .await
    }

    /// Get the order book for a currency pair
    #[instrument(skip(self))]
    pub async fn get_order_book(&self, primary: &str, secondary: &str) -> RestResult<OrderBook> {
        require_non_empty("primaryCurrencyCode", primary)?;
        require_non_empty("secondaryCurrencyCode", secondary)?;
        debug!("Fetching order book for {}/{}", primary, secondary);

        self.client
            .get("GetOrderBook", pair_params(primary, secondary))
            .await
    }

    /// Get recent trades
    ///
    /// # Arguments
    /// * `primary` - Primary currency code
    /// * `secondary` - Secondary currency code
    /// * `count` - Number of trades to return (1-50)
    #[instrument(skip(self))]
    pub async fn get_recent_trades(
        &self,
        primary: &str,
        secondary: &str,
        count: u32,
    ) -> RestResult<RecentTrades> {
        require_non_empty("primaryCurrencyCode", primary)?;
        require_non_empty("secondaryCurrencyCode", secondary)?;
        validate_history("numberOfRecentTradesToRetrieve", count)?;
        debug!("Fetching {} recent trades for {}/{}", count, primary, secondary);

        let params = pair_params(primary, secondary).with("numberOfRecentTradesToRetrieve", count);
        self.client.get("GetRecentTrades", params).await
    }

    /// Get hourly trade history summaries
    ///
    /// # Arguments
    /// * `hours` - Number of past hours to summarize (1-50)
    #[instrument(skip(self))]
    pub async fn get_trade_history_summary(
        &self,
        primary: &str,
        secondary: &str,
        hours: u32,
    ) -> RestResult<Value> {
        require_non_empty("primaryCurrencyCode", primary)?;
        require_non_empty("secondaryCurrencyCode", secondary)?;
        validate_history("numberOfHoursInThePastToRetrieve", hours)?;

        let params = pair_params(primary, secondary).with("numberOfHoursInThePastToRetrieve", hours);
        self.client.get("GetTradeHistorySummary", params).await
    }

    /// Get current fiat exchange rates
    #[instrument(skip(self))]
    pub async fn get_fx_rates(&self) -> RestResult<Value> {
        self.client.get("GetFxRates", Params::new()).await
    }
}

fn pair_params(primary: &str, secondary: &str) -> Params {
    Params::new()
        .with("primaryCurrencyCode", primary)
        .with("secondaryCurrencyCode", secondary)
}

fn validate_history(name: &str, count: u32) -> RestResult<()> {
    if !(1..=MAX_HISTORY).contains(&count) {
        return Err(RestError::Validation(format!(
            "{} {} must be between 1 and {}",
            name, count, MAX_HISTORY
        )));
    }
    Ok(())
}
