//! Integration tests for the Independent Reserve REST client
//!
//! Runs the full request pipeline (build, sign, send, classify, decode)
//! against a local mock server.

mod common;

use chrono::{TimeZone, Utc};
use common::*;
use ir_rest::{ErrorKind, IndependentReserveClient, OrderType};
use rust_decimal_macros::dec;
use serde_json::json;
use tokio_test::assert_ok;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

// =============================================================================
// Public Endpoints
// =============================================================================

#[tokio::test]
async fn test_public_market_summary() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/Public/GetMarketSummary"))
        .and(query_param("primaryCurrencyCode", "Xbt"))
        .and(query_param("secondaryCurrencyCode", "Aud"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json(MARKET_SUMMARY)))
        .expect(1)
        .mount(&server)
        .await;

    let client = public_client(&server);
    let summary = assert_ok!(client.get_market_summary("Xbt", "Aud").await);

    assert_eq!(summary.last_price, Some(dec!(95005)));
    assert_eq!(summary.current_highest_bid_price, Some(dec!(95000.12)));
    assert_eq!(summary.spread(), Some(dec!(10.38)));
}

#[tokio::test]
async fn test_public_currency_codes() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/Public/GetValidPrimaryCurrencyCodes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["Xbt", "Eth", "Bch"])))
        .mount(&server)
        .await;

    let client = public_client(&server);
    let codes = assert_ok!(client.market().get_valid_primary_currency_codes().await);
    assert_eq!(codes, vec!["Xbt", "Eth", "Bch"]);
}

#[tokio::test]
async fn test_public_recent_trades_count() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/Public/GetRecentTrades"))
        .and(query_param("numberOfRecentTradesToRetrieve", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "CreatedTimestampUtc": "2024-03-01T04:23:26Z",
            "PrimaryCurrencyCode": "Xbt",
            "SecondaryCurrencyCode": "Aud",
            "Trades": [{
                "PrimaryCurrencyAmount": 0.25,
                "SecondaryCurrencyTradePrice": 95000.5,
                "TradeTimestampUtc": "2024-03-01T04:20:00Z"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = public_client(&server);
    let trades = assert_ok!(client.market().get_recent_trades("Xbt", "Aud", 10).await);
    assert_eq!(trades.trades.len(), 1);
    assert_eq!(trades.trades[0].primary_currency_amount, dec!(0.25));
    assert_eq!(
        trades.trades[0].trade_timestamp_utc,
        Utc.with_ymd_and_hms(2024, 3, 1, 4, 20, 0).single()
    );
}

#[tokio::test]
async fn test_user_agent_sent() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/Public/GetValidLimitOrderTypes"))
        .and(header("User-Agent", "Independent Reserve Javascript API Client"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["LimitBid", "LimitOffer"])))
        .expect(1)
        .mount(&server)
        .await;

    let client = public_client(&server);
    assert_ok!(client.market().get_valid_limit_order_types().await);
}

// =============================================================================
// Signing
// =============================================================================

#[tokio::test]
async fn test_private_request_is_signed() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/Private/GetAccounts"))
        .and(body_partial_json(json!({ "apiKey": API_KEY, "nonce": INITIAL_NONCE })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json(ACCOUNTS)))
        .expect(1)
        .mount(&server)
        .await;

    let client = private_client(&server);
    let accounts = assert_ok!(client.get_accounts().await);
    assert_eq!(accounts.len(), 2);
    assert_eq!(accounts[1].currency_code, "Aud");

    let bodies = received_bodies(&server).await;
    let message = format!(
        "{}/Private/GetAccounts,apiKey={},nonce={}",
        server.uri(),
        API_KEY,
        INITIAL_NONCE
    );
    let expected = ir_auth::sign(API_SECRET.as_bytes(), &message);
    assert_eq!(bodies[0]["signature"], expected);
}

#[tokio::test]
async fn test_signature_covers_params_in_order() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/Private/GetOpenOrders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Data": [],
            "PageSize": 25,
            "TotalItems": 0,
            "TotalPages": 0
        })))
        .mount(&server)
        .await;

    let client = private_client(&server);
    let page = assert_ok!(client.trading().get_open_orders("Xbt", "Aud", 1, 25).await);
    assert!(page.data.is_empty());

    let bodies = received_bodies(&server).await;
    let message = format!(
        "{}/Private/GetOpenOrders,apiKey={},nonce={},primaryCurrencyCode=Xbt,secondaryCurrencyCode=Aud,pageIndex=1,pageSize=25",
        server.uri(),
        API_KEY,
        INITIAL_NONCE
    );
    assert_eq!(bodies[0]["signature"], ir_auth::sign(API_SECRET.as_bytes(), &message));
    assert_eq!(bodies[0]["pageIndex"], 1);
    assert_eq!(bodies[0]["pageSize"], 25);
}

#[tokio::test]
async fn test_nonces_increase_by_one() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/Private/GetBrokerageFees"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "CurrencyCode": "Xbt", "Fee": 0.005 }
        ])))
        .expect(3)
        .mount(&server)
        .await;

    let client = private_client(&server);
    for _ in 0..3 {
        assert_ok!(client.account().get_brokerage_fees().await);
    }

    let nonces: Vec<u64> = received_bodies(&server)
        .await
        .iter()
        .map(|body| body["nonce"].as_u64().unwrap())
        .collect();
    assert_eq!(
        nonces,
        vec![INITIAL_NONCE, INITIAL_NONCE + 1, INITIAL_NONCE + 2]
    );
}

#[tokio::test]
async fn test_transactions_serialize_dates_and_types() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/Private/GetTransactions"))
        .and(body_partial_json(json!({
            "accountGuid": "acc-1",
            "fromTimestampUtc": "2024-01-01T00:00:00.000Z",
            "toTimestampUtc": "2024-02-01T12:30:00.000Z",
            "txTypes": ["Deposit", "Withdrawal"],
            "pageIndex": 1,
            "pageSize": 10
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Data": [{ "Balance": 1.5, "Type": "Deposit" }],
            "PageSize": 10,
            "TotalItems": 1,
            "TotalPages": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = private_client(&server);
    let from = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let to = Utc.with_ymd_and_hms(2024, 2, 1, 12, 30, 0).unwrap();
    let page = assert_ok!(
        client
            .account()
            .get_transactions("acc-1", from, Some(to), Some(&["Deposit", "Withdrawal"][..]), 1, 10)
            .await
    );
    assert_eq!(page.total_items, 1);

    let bodies = received_bodies(&server).await;
    let message = format!(
        "{}/Private/GetTransactions,apiKey={},nonce={},accountGuid=acc-1,fromTimestampUtc=2024-01-01T00:00:00.000Z,toTimestampUtc=2024-02-01T12:30:00.000Z,txTypes=Deposit,Withdrawal,pageIndex=1,pageSize=10",
        server.uri(),
        API_KEY,
        INITIAL_NONCE
    );
    assert_eq!(bodies[0]["signature"], ir_auth::sign(API_SECRET.as_bytes(), &message));
}

// =============================================================================
// Order Dispatch
// =============================================================================

#[tokio::test]
async fn test_market_bid_routes_to_market_order() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/Private/PlaceMarketOrder"))
        .and(body_partial_json(json!({ "orderType": "MarketBid", "volume": 0.1 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json(PLACED_ORDER)))
        .expect(1)
        .mount(&server)
        .await;

    let client = private_client(&server);
    assert_ok!(
        client
            .place_order("Xbt", "Aud", "MarketBid", Some(dec!(95000)), dec!(0.1))
            .await
    );

    let bodies = received_bodies(&server).await;
    assert!(bodies[0].get("price").is_none());
}

#[tokio::test]
async fn test_limit_offer_routes_to_limit_order() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/Private/PlaceLimitOrder"))
        .and(body_partial_json(json!({
            "primaryCurrencyCode": "Xbt",
            "secondaryCurrencyCode": "Aud",
            "orderType": "LimitOffer",
            "price": 95000,
            "volume": 0.1
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json(PLACED_ORDER)))
        .expect(1)
        .mount(&server)
        .await;

    let client = private_client(&server);
    let order = assert_ok!(
        client
            .place_order("Xbt", "Aud", "LimitOffer", Some(dec!(95000)), dec!(0.1))
            .await
    );
    assert_eq!(order.order_guid, "719c495c-a39e-4884-93ac-280b37245037");
    assert_eq!(order.order_type.as_deref(), Some(OrderType::LimitOffer.as_str()));
}

#[tokio::test]
async fn test_bogus_order_type_sends_nothing() {
    let server = setup_mock_server().await;
    let client = private_client(&server);

    let err = client
        .place_order("Xbt", "Aud", "Bogus", Some(dec!(1)), dec!(1))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(err.to_string().contains("Bogus"));
    assert!(received_bodies(&server).await.is_empty());
}

// =============================================================================
// Response Classification
// =============================================================================

#[tokio::test]
async fn test_message_in_success_response() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/Private/GetAccounts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Message": "bad nonce" })))
        .mount(&server)
        .await;

    let client = private_client(&server);
    let err = client.get_accounts().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Application);
    assert_eq!(err.tag().as_deref(), Some("bad nonce"));
    assert_eq!(err.to_string(), "bad nonce");
}

#[tokio::test]
async fn test_service_unavailable() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/Public/GetOrderBook"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = public_client(&server);
    let err = client.get_order_book("Xbt", "Aud").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Http);
    assert_eq!(err.tag().as_deref(), Some("503"));
    assert!(err.to_string().contains("Service Unavailable"));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_withdrawal_with_empty_body_succeeds() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/Private/WithdrawDigitalCurrency"))
        .and(body_partial_json(json!({
            "amount": 0.5,
            "withdrawalAddress": "bc1qexampleaddress",
            "comment": "cold storage",
            "primaryCurrencyCode": "Xbt"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = private_client(&server);
    assert_ok!(
        client
            .funding()
            .withdraw_digital_currency(dec!(0.5), "bc1qexampleaddress", "cold storage", "Xbt", None)
            .await
    );
}

#[tokio::test]
async fn test_empty_body_is_an_error_elsewhere() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/Private/GetAccounts"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = private_client(&server);
    let err = client.get_accounts().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EmptyResponse);
}

#[tokio::test]
async fn test_html_error_page() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/Public/GetMarketSummary"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(HTML_ERROR_PAGE, "text/html"))
        .mount(&server)
        .await;

    let client = public_client(&server);
    let err = client.get_market_summary("Xbt", "Aud").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnparsableResponse);
    let message = err.to_string();
    assert!(message.contains("Server Error in '/' Application. Runtime Error"));
    assert!(!message.contains("font-family"));
}

#[tokio::test]
async fn test_unexpected_shape_is_unparsable() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/Private/GetAccounts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Unexpected": true })))
        .mount(&server)
        .await;

    let client = private_client(&server);
    let err = client.get_accounts().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnparsableResponse);
}

#[tokio::test]
async fn test_connection_failure_is_transport_error() {
    let server = setup_mock_server().await;
    let uri = server.uri();
    drop(server);

    let config = ir_rest::ClientConfig::new()
        .with_base_url(uri)
        .with_timeout_ms(2_000);
    let client = IndependentReserveClient::with_config(config).unwrap();
    let err = client.market().get_fx_rates().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(err.tag().is_some());
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/Public/GetFxRates"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(std::time::Duration::from_millis(1_000)),
        )
        .mount(&server)
        .await;

    let config = ir_rest::ClientConfig::new()
        .with_base_url(server.uri())
        .with_timeout_ms(100);
    let client = IndependentReserveClient::with_config(config).unwrap();
    let err = client.market().get_fx_rates().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(err.tag().as_deref(), Some("timeout"));
    assert!(err.is_retryable());
}

// =============================================================================
// Configuration
// =============================================================================

#[tokio::test]
async fn test_private_call_without_credentials_sends_nothing() {
    let server = setup_mock_server().await;
    let client = public_client(&server);

    let err = client.get_accounts().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);

    let err = client
        .funding()
        .withdraw_digital_currency(dec!(1), "addr", "", "Xbt", None)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);

    assert!(received_bodies(&server).await.is_empty());
}
