//! API endpoint implementations
//!
//! Each group borrows the client and forwards validated parameters to the
//! signing and classification pipeline. Validation runs before a request is
//! built, so a rejected call never consumes a nonce.

pub mod market;
pub mod account;
pub mod trading;
pub mod funding;

pub use market::MarketEndpoints;
pub use account::AccountEndpoints;
pub use trading::TradingEndpoints;
pub use funding::FundingEndpoints;

use rust_decimal::Decimal;

use crate::error::{RestError, RestResult};

/// Largest page size the exchange accepts
pub const MAX_PAGE_SIZE: u32 = 50;

/// Check pagination arguments: `page_index >= 1`, `page_size` in `1..=50`
pub(crate) fn validate_page(page_index: u32, page_size: u32) -> RestResult<()> {
    if page_index < 1 {
        return Err(RestError::Validation(format!(
            "pageIndex {} must be 1 or greater",
            page_index
        )));
    }
    if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
        return Err(RestError::Validation(format!(
            "pageSize {} must be between 1 and {}",
            page_size, MAX_PAGE_SIZE
        )));
    }
    Ok(())
}

pub(crate) fn require_non_empty(name: &str, value: &str) -> RestResult<()> {
    if value.trim().is_empty() {
        return Err(RestError::Validation(format!("{} must not be empty", name)));
    }
    Ok(())
}

pub(crate) fn require_positive(name: &str, value: Decimal) -> RestResult<()> {
    if value <= Decimal::ZERO {
        return Err(RestError::Validation(format!(
            "{} {} must be greater than zero",
            name, value
        )));
    }
    Ok(())
}
