//! Demo 1: Market Monitor
//!
//! Showcases: public endpoints, typed market data, error classification
//!
//! Run: cargo run --bin market_monitor -- Xbt Aud

use colored::*;
use ir_rest::IndependentReserveClient;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let primary = args.next().unwrap_or_else(|| "Xbt".to_string());
    let secondary = args.next().unwrap_or_else(|| "Aud".to_string());

    println!("{}", "═".repeat(60).cyan());
    println!("{}", "  MARKET MONITOR".cyan().bold());
    println!("{}", format!("  {}/{} on Independent Reserve", primary, secondary).cyan());
    println!("{}", "═".repeat(60).cyan());
    println!();

    let client = IndependentReserveClient::new()?;

    let primaries = client.market().get_valid_primary_currency_codes().await?;
    println!("{} Tradable currencies: {}\n", "✓".green(), primaries.join(", "));

    loop {
        match client.get_market_summary(&primary, &secondary).await {
            Ok(summary) => {
                print!("\r\x1B[K");
                print!(
                    "  {} {}  {} {}  {} {}  {} {}",
                    "LAST:".yellow(),
                    fmt_price(summary.last_price),
                    "BID:".yellow(),
                    fmt_price(summary.current_highest_bid_price),
                    "ASK:".yellow(),
                    fmt_price(summary.current_lowest_offer_price),
                    "SPREAD:".green(),
                    fmt_price(summary.spread()),
                );
                use std::io::Write;
                std::io::stdout().flush()?;
            }
            Err(e) if e.is_retryable() => {
                println!("\n{} {} (retrying)", "!".yellow(), e);
            }
            Err(e) => {
                println!("\n{} {}", "✗".red(), e);
                return Err(e.into());
            }
        }

        tokio::time::sleep(Duration::from_secs(5)).await;
    }
}

fn fmt_price(price: Option<rust_decimal::Decimal>) -> String {
    price.map_or_else(|| "-".to_string(), |p| format!("{:.2}", p))
}
