//! Main REST client implementation

use crate::classify::classify;
use crate::endpoints::{AccountEndpoints, FundingEndpoints, MarketEndpoints, TradingEndpoints};
use crate::error::{RestError, RestResult};
use crate::request::{Params, RequestBuilder, SignedRequest, DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
use crate::transport::execute;
use crate::types::{Account, MarketSummary, OrderBook, OrderDetails};
use ir_auth::{Credentials, NonceSource, API_KEY_ENV, API_SECRET_ENV};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::info;

/// Default request timeout
const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Environment variable overriding the server base URL
pub const BASE_URL_ENV: &str = "IR_BASE_URL";
/// Environment variable overriding the request timeout in milliseconds
pub const TIMEOUT_MS_ENV: &str = "IR_TIMEOUT_MS";

/// Independent Reserve REST API client
///
/// Provides access to both public and private endpoints. The client owns its
/// nonce counter and is deliberately not `Clone`: two copies signing with the
/// same API key would hand out duplicate nonces. Share it behind an `Arc`
/// instead.
///
/// # Example
///
/// ```no_run
/// use ir_rest::{Credentials, IndependentReserveClient};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // Public endpoints only
///     let client = IndependentReserveClient::new()?;
///     let summary = client.get_market_summary("Xbt", "Aud").await?;
///
///     // With authentication for private endpoints
///     let creds = Credentials::from_env()?;
///     let auth_client = IndependentReserveClient::with_credentials(creds)?;
///     let accounts = auth_client.get_accounts().await?;
///
///     Ok(())
/// }
/// ```
pub struct IndependentReserveClient {
    http_client: Client,
    requests: RequestBuilder,
}

impl IndependentReserveClient {
    /// Create a new client without authentication
    ///
    /// Only public endpoints will be available.
    pub fn new() -> RestResult<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with credentials
    ///
    /// All endpoints (public and private) will be available.
    pub fn with_credentials(credentials: Credentials) -> RestResult<Self> {
        Self::with_config(ClientConfig::default().with_credentials(credentials))
    }

    /// Create a client configured from the environment
    ///
    /// See [`ClientConfig::from_env`].
    pub fn from_env() -> RestResult<Self> {
        Self::with_config(ClientConfig::from_env()?)
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> RestResult<Self> {
        let timeout = Duration::from_millis(config.timeout_ms);
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RestError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        let nonces = match config.initial_nonce {
            Some(initial) => NonceSource::starting_at(initial),
            None => NonceSource::new(),
        };

        let requests = RequestBuilder::new(
            config.base_url,
            config.credentials,
            nonces,
            config.user_agent,
            timeout,
        );

        info!(
            base_url = requests.base_url(),
            authenticated = requests.has_credentials(),
            "Created Independent Reserve REST client"
        );

        Ok(Self {
            http_client,
            requests,
        })
    }

    /// Check if the client has credentials for private endpoints
    pub fn has_credentials(&self) -> bool {
        self.requests.has_credentials()
    }

    /// Server base URL requests are sent to
    pub fn base_url(&self) -> &str {
        self.requests.base_url()
    }

    /// Request builder holding this client's credentials and nonce counter
    pub fn requests(&self) -> &RequestBuilder {
        &self.requests
    }

    // ========================================================================
    // Pipeline
    // ========================================================================

    /// Dispatch a built request and classify the outcome
    ///
    /// `Ok(None)` is only returned for a successful withdrawal, which has no
    /// response body.
    pub async fn send(&self, request: SignedRequest) -> RestResult<Option<Value>> {
        let exchange = execute(&self.http_client, &request).await;
        classify(&request.action, &request.description(), exchange)
    }

    /// Call a public endpoint and decode its response
    pub(crate) async fn get<T: DeserializeOwned>(&self, action: &str, params: Params) -> RestResult<T> {
        let request = self.requests.build_public(action, params);
        let description = request.description();
        let value = self.send(request).await?;
        decode(action, &description, value)
    }

    /// Call a private endpoint and decode its response
    pub(crate) async fn post<T: DeserializeOwned>(&self, action: &str, params: Params) -> RestResult<T> {
        let request = self.requests.build_private(action, params)?;
        let description = request.description();
        let value = self.send(request).await?;
        decode(action, &description, value)
    }

    /// Call a private endpoint whose success carries no data
    pub(crate) async fn post_no_content(&self, action: &str, params: Params) -> RestResult<()> {
        let request = self.requests.build_private(action, params)?;
        self.send(request).await?;
        Ok(())
    }

    // ========================================================================
    // Public Market Endpoints
    // ========================================================================

    /// Get market endpoints
    pub fn market(&self) -> MarketEndpoints<'_> {
        MarketEndpoints::new(self)
    }

    /// Get the market summary for a currency pair
    ///
    /// # Arguments
    /// * `primary` - Primary (digital) currency code, e.g. "Xbt"
    /// * `secondary` - Secondary (fiat) currency code, e.g. "Aud"
    pub async fn get_market_summary(&self, primary: &str, secondary: &str) -> RestResult<MarketSummary> {
        self.market().get_market_summary(primary, secondary).await
    }

    /// Get the order book for a currency pair
    pub async fn get_order_book(&self, primary: &str, secondary: &str) -> RestResult<OrderBook> {
        self.market().get_order_book(primary, secondary).await
    }

    // ========================================================================
    // Private Trading Endpoints
    // ========================================================================

    /// Get trading endpoints
    pub fn trading(&self) -> TradingEndpoints<'_> {
        TradingEndpoints::new(self)
    }

    /// Place an order, dispatching on the order type tag
    pub async fn place_order(
        &self,
        primary: &str,
        secondary: &str,
        order_type: &str,
        price: Option<Decimal>,
        volume: Decimal,
    ) -> RestResult<OrderDetails> {
        self.trading()
            .place_order(primary, secondary, order_type, price, volume)
            .await
    }

    /// Cancel an order by GUID
    pub async fn cancel_order(&self, order_guid: &str) -> RestResult<OrderDetails> {
        self.trading().cancel_order(order_guid).await
    }

    // ========================================================================
    // Private Account Endpoints
    // ========================================================================

    /// Get account endpoints
    pub fn account(&self) -> AccountEndpoints<'_> {
        AccountEndpoints::new(self)
    }

    /// Get all currency accounts and their balances
    pub async fn get_accounts(&self) -> RestResult<Vec<Account>> {
        self.account().get_accounts().await
    }

    // ========================================================================
    // Private Funding Endpoints
    // ========================================================================

    /// Get funding endpoints
    pub fn funding(&self) -> FundingEndpoints<'_> {
        FundingEndpoints::new(self)
    }
}

impl std::fmt::Debug for IndependentReserveClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndependentReserveClient")
            .field("base_url", &self.base_url())
            .field("has_credentials", &self.has_credentials())
            .finish()
    }
}

fn decode<T: DeserializeOwned>(action: &str, description: &str, value: Option<Value>) -> RestResult<T> {
    serde_json::from_value(value.unwrap_or(Value::Null)).map_err(|e| RestError::UnparsableResponse {
        action: action.to_string(),
        description: description.to_string(),
        detail: format!("Unexpected response shape: {}", e),
    })
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API credentials (optional)
    pub credentials: Option<Credentials>,
    /// Server base URL
    pub base_url: String,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
    /// User agent sent with every request
    pub user_agent: String,
    /// First nonce to use; seeded from the clock when unset
    pub initial_nonce: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            credentials: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            initial_nonce: None,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from the environment
    ///
    /// Credentials come from `IR_API_KEY` / `IR_API_SECRET` and are optional:
    /// when neither is set the client is public-only. Setting only one of the
    /// two is a configuration error. `IR_BASE_URL` and
    /// `IR_TIMEOUT_MS` override the defaults.
    pub fn from_env() -> RestResult<Self> {
        let mut config = Self::default();

        config.credentials = credentials_from_parts(
            std::env::var(API_KEY_ENV).ok(),
            std::env::var(API_SECRET_ENV).ok(),
        )?;

        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            config.base_url = base_url;
        }

        if let Ok(timeout) = std::env::var(TIMEOUT_MS_ENV) {
            config.timeout_ms = timeout.parse().map_err(|_| {
                RestError::Configuration(format!("{} is not a number: {}", TIMEOUT_MS_ENV, timeout))
            })?;
        }

        Ok(config)
    }

    /// Set credentials
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set server base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set timeout
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Start the nonce sequence at a fixed value
    pub fn with_initial_nonce(mut self, nonce: u64) -> Self {
        self.initial_nonce = Some(nonce);
        self
    }
}

/// Credentials from an optional key/secret pair; both or neither must be present
fn credentials_from_parts(
    api_key: Option<String>,
    api_secret: Option<String>,
) -> RestResult<Option<Credentials>> {
    match (api_key, api_secret) {
        (Some(api_key), Some(api_secret)) => Ok(Some(Credentials::new(api_key, api_secret)?)),
        (None, None) => Ok(None),
        (Some(_), None) => Err(RestError::Configuration(format!(
            "{} is set but {} is not",
            API_KEY_ENV, API_SECRET_ENV
        ))),
        (None, Some(_)) => Err(RestError::Configuration(format!(
            "{} is set but {} is not",
            API_SECRET_ENV, API_KEY_ENV
        ))),
    }
}
