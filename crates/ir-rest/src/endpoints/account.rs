//! Private account endpoints
//!
//! These endpoints require authentication.

use crate::client::IndependentReserveClient;
use crate::error::RestResult;
use crate::request::Params;
use crate::types::{Account, BrokerageFee, Page};
use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, instrument};

use super::{require_non_empty, validate_page};

/// Private account endpoints
pub struct AccountEndpoints<'a> {
    client: &'a IndependentReserveClient,
}

impl<'a> AccountEndpoints<'a> {
    pub fn new(client: &'a IndependentReserveClient) -> Self {
        Self { client }
    }

    /// Get all currency accounts and their balances
    #[instrument(skip(self))]
    pub async fn get_accounts(&self) -> RestResult<Vec<Account>> {
        self.client.post("GetAccounts", Params::new()).await
    }

    /// Get transactions for an account
    ///
    /// # Arguments
    /// * `account_guid` - Account to query
    /// * `from` - Earliest transaction time
    /// * `to` - Latest transaction time (optional)
    /// * `tx_types` - Only return these transaction types (optional)
    /// * `page_index` - 1-based page number
    /// * `page_size` - Transactions per page (1-50)
    #[instrument(skip(self))]
    pub async fn get_transactions(
        &self,
        account_guid: &str,
        from: DateTime<Utc>,
        to: Option<DateTime<Utc>>,
        tx_types: Option<&[&str]>,
        page_index: u32,
        page_size: u32,
    ) -> RestResult<Page<Value>> {
        require_non_empty("accountGuid", account_guid)?;
        validate_page(page_index, page_size)?;

        let tx_types: Option<Vec<String>> =
            tx_types.map(|types| types.iter().map(|t| t.to_string()).collect());

        let params = Params::new()
            .with("accountGuid", account_guid)
            .with("fromTimestampUtc", from)
            .with_opt("toTimestampUtc", to)
            .with_opt("txTypes", tx_types)
            .with("pageIndex", page_index)
            .with("pageSize", page_size);

        debug!("Fetching transactions for account {}", account_guid);
        self.client.post("GetTransactions", params).await
    }

    /// Get the brokerage fee charged per currency
    #[instrument(skip(self))]
    pub async fn get_brokerage_fees(&self) -> RestResult<Vec<BrokerageFee>> {
        self.client.post("GetBrokerageFees", Params::new()).await
    }
}
