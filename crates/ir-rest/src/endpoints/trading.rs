//! Trading endpoints for order management
//!
//! These endpoints require authentication.

use crate::client::IndependentReserveClient;
use crate::error::{RestError, RestResult};
use crate::request::Params;
use crate::types::{OrderDetails, OrderSummary, OrderType, Page};
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::{debug, instrument};

use super::{require_non_empty, require_positive, validate_page};

/// Trading endpoints for order management
pub struct TradingEndpoints<'a> {
    client: &'a IndependentReserveClient,
}

impl<'a> TradingEndpoints<'a> {
    pub fn new(client: &'a IndependentReserveClient) -> Self {
        Self { client }
    }

    /// Place a limit order
    ///
    /// # Arguments
    /// * `primary` - Primary currency code (e.g., "Xbt")
    /// * `secondary` - Secondary currency code (e.g., "Aud")
    /// * `order_type` - `LimitBid` or `LimitOffer`
    /// * `price` - Limit price in the secondary currency
    /// * `volume` - Order volume in the primary currency
    #[instrument(skip(self), fields(order_type = %order_type))]
    pub async fn place_limit_order(
        &self,
        primary: &str,
        secondary: &str,
        order_type: OrderType,
        price: Decimal,
        volume: Decimal,
    ) -> RestResult<OrderDetails> {
        if !order_type.is_limit() {
            return Err(RestError::Validation(format!(
                "orderType {} is not a limit order type",
                order_type
            )));
        }
        require_non_empty("primaryCurrencyCode", primary)?;
        require_non_empty("secondaryCurrencyCode", secondary)?;
        require_positive("price", price)?;
        require_positive("volume", volume)?;

        let params = Params::new()
            .with("primaryCurrencyCode", primary)
            .with("secondaryCurrencyCode", secondary)
            .with("orderType", order_type.as_str())
            .with("price", price)
            .with("volume", volume);

        debug!("Placing {} order for {} {}/{} at {}", order_type, volume, primary, secondary, price);

        self.client.post("PlaceLimitOrder", params).await
    }

    /// Place a market order
    ///
    /// # Arguments
    /// * `order_type` - `MarketBid` or `MarketOffer`
    /// * `volume` - Order volume in the primary currency
    #[instrument(skip(self), fields(order_type = %order_type))]
    pub async fn place_market_order(
        &self,
        primary: &str,
        secondary: &str,
        order_type: OrderType,
        volume: Decimal,
    ) -> RestResult<OrderDetails> {
        if !order_type.is_market() {
            return Err(RestError::Validation(format!(
                "orderType {} is not a market order type",
                order_type
            )));
        }
        require_non_empty("primaryCurrencyCode", primary)?;
        require_non_empty("secondaryCurrencyCode", secondary)?;
        require_positive("volume", volume)?;

        let params = Params::new()
            .with("primaryCurrencyCode", primary)
            .with("secondaryCurrencyCode", secondary)
            .with("orderType", order_type.as_str())
            .with("volume", volume);

        debug!("Placing {} order for {} {}/{}", order_type, volume, primary, secondary);

        self.client.post("PlaceMarketOrder", params).await
    }

    /// Place an order, routing on its type tag
    ///
    /// `MarketBid`/`MarketOffer` go to the market order endpoint and ignore
    /// `price`. `LimitBid`/`LimitOffer` go to the limit order endpoint and
    /// require it. Any other tag is rejected.
    #[instrument(skip(self))]
    pub async fn place_order(
        &self,
        primary: &str,
        secondary: &str,
        order_type: &str,
        price: Option<Decimal>,
        volume: Decimal,
    ) -> RestResult<OrderDetails> {
        let order_type: OrderType = order_type.parse()?;

        if order_type.is_market() {
            return self
                .place_market_order(primary, secondary, order_type, volume)
                .await;
        }

        let price = price.ok_or_else(|| {
            RestError::Validation(format!("price is required for {} orders", order_type))
        })?;
        self.place_limit_order(primary, secondary, order_type, price, volume)
            .await
    }

    /// Cancel an order
    ///
    /// # Arguments
    /// * `order_guid` - GUID of the order to cancel
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, order_guid: &str) -> RestResult<OrderDetails> {
        require_non_empty("orderGuid", order_guid)?;
        debug!("Cancelling order {}", order_guid);
        self.client
            .post("CancelOrder", Params::new().with("orderGuid", order_guid))
            .await
    }

    /// Get open orders for a currency pair
    ///
    /// # Arguments
    /// * `page_index` - 1-based page number
    /// * `page_size` - Orders per page (1-50)
    #[instrument(skip(self))]
    pub async fn get_open_orders(
        &self,
        primary: &str,
        secondary: &str,
        page_index: u32,
        page_size: u32,
    ) -> RestResult<Page<OrderSummary>> {
        self.order_page("GetOpenOrders", primary, secondary, page_index, page_size)
            .await
    }

    /// Get closed orders (filled, cancelled or expired) for a currency pair
    #[instrument(skip(self))]
    pub async fn get_closed_orders(
        &self,
        primary: &str,
        secondary: &str,
        page_index: u32,
        page_size: u32,
    ) -> RestResult<Page<OrderSummary>> {
        self.order_page("GetClosedOrders", primary, secondary, page_index, page_size)
            .await
    }

    /// Get closed orders that were at least partly filled
    #[instrument(skip(self))]
    pub async fn get_closed_filled_orders(
        &self,
        primary: &str,
        secondary: &str,
        page_index: u32,
        page_size: u32,
    ) -> RestResult<Page<OrderSummary>> {
        self.order_page(
            "GetClosedFilledOrders",
            primary,
            secondary,
            page_index,
            page_size,
        )
        .await
    }

    /// Get a single order
    #[instrument(skip(self))]
    pub async fn get_order_details(&self, order_guid: &str) -> RestResult<OrderDetails> {
        require_non_empty("orderGuid", order_guid)?;
        self.client
            .post("GetOrderDetails", Params::new().with("orderGuid", order_guid))
            .await
    }

    /// Get the account's executed trades
    #[instrument(skip(self))]
    pub async fn get_trades(&self, page_index: u32, page_size: u32) -> RestResult<Page<Value>> {
        validate_page(page_index, page_size)?;
        let params = Params::new()
            .with("pageIndex", page_index)
            .with("pageSize", page_size);
        self.client.post("GetTrades", params).await
    }

    async fn order_page(
        &self,
        action: &str,
        primary: &str,
        secondary: &str,
        page_index: u32,
        page_size: u32,
    ) -> RestResult<Page<OrderSummary>> {
        require_non_empty("primaryCurrencyCode", primary)?;
        require_non_empty("secondaryCurrencyCode", secondary)?;
        validate_page(page_index, page_size)?;

        let params = Params::new()
            .with("primaryCurrencyCode", primary)
            .with("secondaryCurrencyCode", secondary)
            .with("pageIndex", page_index)
            .with("pageSize", page_size);

        self.client.post(action, params).await
    }
}
