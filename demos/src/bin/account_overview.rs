//! Demo 2: Account Overview
//!
//! Showcases: signed private endpoints, pagination, transactions
//!
//! Run: IR_API_KEY=... IR_API_SECRET=... cargo run --bin account_overview

use chrono::{Duration, Utc};
use colored::*;
use ir_rest::IndependentReserveClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("{}", "═".repeat(60).cyan());
    println!("{}", "  ACCOUNT OVERVIEW".cyan().bold());
    println!("{}", "═".repeat(60).cyan());
    println!();

    let client = IndependentReserveClient::from_env()?;
    if !client.has_credentials() {
        println!("{} Set IR_API_KEY and IR_API_SECRET to run this demo", "✗".red());
        return Ok(());
    }

    let accounts = client.get_accounts().await?;
    println!("{}", "Balances".bold());
    for account in &accounts {
        if account.total_balance.is_zero() {
            continue;
        }
        println!(
            "  {:<6} total {:>18}  available {:>18}",
            account.currency_code.yellow(),
            account.total_balance,
            account.available_balance
        );
    }
    println!();

    let fees = client.account().get_brokerage_fees().await?;
    println!("{}", "Brokerage fees".bold());
    for fee in &fees {
        println!("  {:<6} {}", fee.currency_code.yellow(), fee.fee);
    }
    println!();

    let open = client.trading().get_open_orders("Xbt", "Aud", 1, 25).await?;
    println!("{} ({} total)", "Open XBT/AUD orders".bold(), open.total_items);
    for order in &open.data {
        println!(
            "  {} {:<10} {:?} @ {:?}",
            order.order_guid,
            order.order_type.as_deref().unwrap_or("-"),
            order.outstanding,
            order.price
        );
    }
    println!();

    if let Some(account) = accounts.first() {
        let since = Utc::now() - Duration::days(30);
        let page = client
            .account()
            .get_transactions(&account.account_guid, since, None, None, 1, 10)
            .await?;
        println!(
            "{} {} transactions in the last 30 days",
            account.currency_code.yellow(),
            page.total_items
        );
    }

    Ok(())
}
