//! Common test utilities and fixtures for integration tests
//!
//! Response bodies follow the shapes returned by the live Independent
//! Reserve API.

#![allow(dead_code)]

use ir_rest::{ClientConfig, Credentials, IndependentReserveClient};
use serde_json::Value;
use wiremock::MockServer;

pub const API_KEY: &str = "test-api-key";
pub const API_SECRET: &str = "test-api-secret";
pub const INITIAL_NONCE: u64 = 1_700_000_000_000;

/// Sample market summary response
pub const MARKET_SUMMARY: &str = r#"{
    "CreatedTimestampUtc": "2024-03-01T04:23:26.6314658Z",
    "CurrentHighestBidPrice": 95000.12,
    "CurrentLowestOfferPrice": 95010.50,
    "DayAvgPrice": 94500.00,
    "DayHighestPrice": 96000.00,
    "DayLowestPrice": 93000.00,
    "DayVolumeXbt": 120.5,
    "DayVolumeXbtInSecondaryCurrrency": 11387250.0,
    "LastPrice": 95005.00,
    "PrimaryCurrencyCode": "Xbt",
    "SecondaryCurrencyCode": "Aud"
}"#;

/// Sample accounts response
pub const ACCOUNTS: &str = r#"[
    {
        "AccountGuid": "66dcac65-bf07-4e68-ad46-838f51100424",
        "AccountStatus": "Active",
        "AvailableBalance": 45.334,
        "CurrencyCode": "Xbt",
        "TotalBalance": 46.81
    },
    {
        "AccountGuid": "49994921-60ec-411e-8a78-d0eba078d5e9",
        "AccountStatus": "Active",
        "AvailableBalance": 12045.0,
        "CurrencyCode": "Aud",
        "TotalBalance": 12045.0
    }
]"#;

/// Sample order response from the placement endpoints
pub const PLACED_ORDER: &str = r#"{
    "AvgPrice": 0.0,
    "CreatedTimestampUtc": "2024-03-01T04:25:43.3305564Z",
    "OrderGuid": "719c495c-a39e-4884-93ac-280b37245037",
    "Price": 95000.0,
    "PrimaryCurrencyCode": "Xbt",
    "ReservedAmount": 9500.0,
    "SecondaryCurrencyCode": "Aud",
    "Status": "Open",
    "Type": "LimitOffer",
    "VolumeFilled": 0.0,
    "VolumeOrdered": 0.1
}"#;

/// HTML page the exchange serves for some malformed requests
pub const HTML_ERROR_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Runtime Error</title><style>body { font-family: Verdana; }</style></head>
<body>
    <h1>Server Error in '/' Application.</h1>
    <p>Runtime Error</p>
</body>
</html>"#;

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Client without credentials pointed at the mock server
pub fn public_client(server: &MockServer) -> IndependentReserveClient {
    let config = ClientConfig::new()
        .with_base_url(server.uri())
        .with_timeout_ms(2_000);
    IndependentReserveClient::with_config(config).expect("client should build")
}

/// Authenticated client pointed at the mock server with a fixed nonce seed
pub fn private_client(server: &MockServer) -> IndependentReserveClient {
    let config = ClientConfig::new()
        .with_credentials(Credentials::new(API_KEY, API_SECRET).expect("valid credentials"))
        .with_base_url(server.uri())
        .with_timeout_ms(2_000)
        .with_initial_nonce(INITIAL_NONCE);
    IndependentReserveClient::with_config(config).expect("client should build")
}

/// JSON bodies of every request the server received
pub async fn received_bodies(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|request| serde_json::from_slice(&request.body).unwrap_or(Value::Null))
        .collect()
}

/// Parse a fixture into JSON
pub fn json(fixture: &str) -> Value {
    serde_json::from_str(fixture).expect("fixture is valid JSON")
}
