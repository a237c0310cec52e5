//! Funding endpoints for deposits and withdrawals
//!
//! These endpoints require authentication.

use crate::classify::WITHDRAW_DIGITAL_CURRENCY;
use crate::client::IndependentReserveClient;
use crate::error::RestResult;
use crate::request::Params;
use crate::types::{DepositAddress, Page};
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::{debug, info, instrument};

use super::{require_non_empty, require_positive, validate_page};

/// Funding endpoints for deposits and withdrawals
pub struct FundingEndpoints<'a> {
    client: &'a IndependentReserveClient,
}

impl<'a> FundingEndpoints<'a> {
    pub fn new(client: &'a IndependentReserveClient) -> Self {
        Self { client }
    }

    /// Get the deposit address for a digital currency
    ///
    /// # Arguments
    /// * `primary` - Digital currency code (e.g., "Xbt")
    #[instrument(skip(self))]
    pub async fn get_digital_currency_deposit_address(&self, primary: &str) -> RestResult<DepositAddress> {
        require_non_empty("primaryCurrencyCode", primary)?;
        self.client
            .post(
                "GetDigitalCurrencyDepositAddress",
                Params::new().with("primaryCurrencyCode", primary),
            )
            .await
    }

    /// Get all deposit addresses for a digital currency
    #[instrument(skip(self))]
    pub async fn get_digital_currency_deposit_addresses(
        &self,
        primary: &str,
        page_index: u32,
        page_size: u32,
    ) -> RestResult<Page<DepositAddress>> {
        require_non_empty("primaryCurrencyCode", primary)?;
        validate_page(page_index, page_size)?;

        let params = Params::new()
            .with("primaryCurrencyCode", primary)
            .with("pageIndex", page_index)
            .with("pageSize", page_size);

        self.client
            .post("GetDigitalCurrencyDepositAddresses", params)
            .await
    }

    /// Ask the exchange to check a deposit address for new transactions
    #[instrument(skip(self))]
    pub async fn synch_digital_currency_deposit_address_with_blockchain(
        &self,
        deposit_address: &str,
        primary: &str,
    ) -> RestResult<DepositAddress> {
        require_non_empty("depositAddress", deposit_address)?;
        require_non_empty("primaryCurrencyCode", primary)?;

        let params = Params::new()
            .with("depositAddress", deposit_address)
            .with("primaryCurrencyCode", primary);

        debug!("Synchronising deposit address {}", deposit_address);
        self.client
            .post("SynchDigitalCurrencyDepositAddressWithBlockchain", params)
            .await
    }

    /// Withdraw digital currency to an external address
    ///
    /// The exchange answers a successful withdrawal with an empty body, so
    /// this returns `()`.
    ///
    /// # Arguments
    /// * `amount` - Amount to withdraw
    /// * `withdrawal_address` - Destination address
    /// * `comment` - Free-form comment stored with the withdrawal
    /// * `primary` - Digital currency code
    /// * `destination_tag` - Destination tag or memo, for currencies that use one
    #[instrument(skip(self))]
    pub async fn withdraw_digital_currency(
        &self,
        amount: Decimal,
        withdrawal_address: &str,
        comment: &str,
        primary: &str,
        destination_tag: Option<&str>,
    ) -> RestResult<()> {
        require_positive("amount", amount)?;
        require_non_empty("withdrawalAddress", withdrawal_address)?;
        require_non_empty("primaryCurrencyCode", primary)?;

        let params = Params::new()
            .with("amount", amount)
            .with("withdrawalAddress", withdrawal_address)
            .with("comment", comment)
            .with("primaryCurrencyCode", primary)
            .with_opt("destinationTag", destination_tag);

        info!("Withdrawing {} {} to {}", amount, primary, withdrawal_address);
        self.client
            .post_no_content(WITHDRAW_DIGITAL_CURRENCY, params)
            .await
    }

    /// Request a fiat withdrawal to a registered bank account
    ///
    /// # Arguments
    /// * `secondary` - Fiat currency code (e.g., "Aud")
    /// * `amount` - Amount to withdraw
    /// * `bank_account_name` - Name of the registered bank account
    /// * `comment` - Free-form comment
    #[instrument(skip(self))]
    pub async fn request_fiat_withdrawal(
        &self,
        secondary: &str,
        amount: Decimal,
        bank_account_name: &str,
        comment: &str,
    ) -> RestResult<Value> {
        require_non_empty("secondaryCurrencyCode", secondary)?;
        require_positive("withdrawalAmount", amount)?;
        require_non_empty("withdrawalBankAccountName", bank_account_name)?;

        let params = Params::new()
            .with("secondaryCurrencyCode", secondary)
            .with("withdrawalAmount", amount)
            .with("withdrawalBankAccountName", bank_account_name)
            .with("comment", comment);

        info!("Requesting fiat withdrawal of {} {}", amount, secondary);
        self.client.post("RequestFiatWithdrawal", params).await
    }
}
