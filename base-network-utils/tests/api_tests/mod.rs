//! Integration tests for the API endpoints, backed by a stub node

use actix_web::{http::StatusCode, test, web, App};
use alloy::primitives::U256;
use serde_json::json;
use std::sync::{atomic::Ordering, Once};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

use base_network_utils::api;

mod helpers;
use helpers::{read_only, with_wallet, StubClient, STUB_TX_HASH};

static INIT: Once = Once::new();

fn init_logger() {
    INIT.call_once(|| {
        let filter = EnvFilter::from_default_env()
            .add_directive("base_network_utils=debug".parse().unwrap())
            .add_directive("actix_web=error".parse().unwrap());
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

macro_rules! app {
    ($utils:expr) => {
        test::init_service(
            App::new()
                .wrap(TracingLogger::default())
                .app_data(web::Data::new($utils))
                .configure(api::configure),
        )
        .await
    };
}

fn transfer_request(method: &str, id: u64) -> serde_json::Value {
    json!({
        "jsonrpc": "2.0",
        "method": method,
        "params": [{
            "from": "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266",
            "to": "0x70997970C51812dc3A010C7d01b50e0d17dc79C8",
            "value": "0xde0b6b3a7640000" // 1 ETH
        }],
        "id": id
    })
}

#[actix_web::test]
async fn test_gas_prices_endpoint() {
    init_logger();
    let (utils, _) = read_only(StubClient {
        gas_price: Some(U256::from(1000)),
        ..Default::default()
    });
    let app = app!(utils);

    let req = test::TestRequest::get().uri("/api/v1/gasPrices").to_request();
    let response: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(response["slow"], "0x3e8");
    assert_eq!(response["standard"], "0x44c");
    assert_eq!(response["fast"], "0x4b0");
}

#[actix_web::test]
async fn test_gas_prices_upstream_failure() {
    init_logger();
    let (utils, _) = read_only(StubClient::default());
    let app = app!(utils);

    let req = test::TestRequest::get().uri("/api/v1/gasPrices").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error_code"], "RPC_ERROR");
    assert!(body["error"].as_str().unwrap().contains("connection refused"));
}

#[actix_web::test]
async fn test_estimate_gas_endpoint_applies_buffer() {
    init_logger();
    let (utils, _) = read_only(StubClient {
        estimate: Some(U256::from(21_000)),
        ..Default::default()
    });
    let app = app!(utils);

    let req = test::TestRequest::post()
        .uri("/api/v1/eth/estimateGas")
        .set_json(transfer_request("eth_estimateGas", 1))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let response: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(response["jsonrpc"], "2.0");
    assert_eq!(response["id"], 1);
    // 21000 * 1.2
    assert_eq!(response["result"], "0x6270");
}

#[actix_web::test]
async fn test_invalid_request_handling() {
    init_logger();
    let (utils, client) = read_only(StubClient::default());
    let app = app!(utils);

    let request = json!({
        "jsonrpc": "2.0",
        "method": "eth_estimateGas",
        "params": [{}],
        "id": 2
    });
    let req = test::TestRequest::post()
        .uri("/api/v1/eth/estimateGas")
        .set_json(&request)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let response: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(response["id"], 2);
    assert_eq!(response["error"]["code"], -32602);
    assert!(response["error"]["message"]
        .as_str()
        .unwrap()
        .contains("Either 'to' or 'input' must be provided"));

    let req = test::TestRequest::post()
        .uri("/api/v1/eth/estimateGas")
        .set_json(transfer_request("eth_call", 3))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    assert_eq!(client.calls.load(Ordering::SeqCst), 0);
}

#[actix_web::test]
async fn test_send_transaction_requires_wallet() {
    init_logger();
    let (utils, client) = read_only(StubClient::default());
    let app = app!(utils);

    let req = test::TestRequest::post()
        .uri("/api/v1/eth/sendTransaction")
        .set_json(transfer_request("eth_sendTransaction", 4))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let response: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(response["error"]["code"], -32000);
    assert_eq!(response["error"]["message"], "Wallet not initialized");
    assert_eq!(response["error"]["data"], "WALLET_NOT_INITIALIZED");
    assert_eq!(client.calls.load(Ordering::SeqCst), 0);
}

#[actix_web::test]
async fn test_send_transaction_with_wallet() {
    init_logger();
    let app = app!(with_wallet(StubClient::default()));

    let req = test::TestRequest::post()
        .uri("/api/v1/eth/sendTransaction")
        .set_json(transfer_request("eth_sendTransaction", 5))
        .to_request();
    let response: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(response["result"]["txHash"], STUB_TX_HASH.to_string());
    assert_eq!(
        response["result"]["explorerUrl"],
        format!("https://basescan.org/tx/{STUB_TX_HASH}")
    );
}

#[actix_web::test]
async fn test_balance_endpoint() {
    init_logger();
    let (utils, _) = read_only(StubClient {
        balance: Some(U256::from(1_000_000_000_000_000_000u128)),
        ..Default::default()
    });
    let app = app!(utils);

    let req = test::TestRequest::get()
        .uri("/api/v1/balance/0x70997970C51812dc3A010C7d01b50e0d17dc79C8")
        .to_request();
    let response: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(response["balance"], "1.000000000000000000");
    assert_eq!(response["unit"], "ETH");
    assert_eq!(
        response["explorer_url"],
        "https://basescan.org/address/0x70997970C51812dc3A010C7d01b50e0d17dc79C8"
    );

    let req = test::TestRequest::get()
        .uri("/api/v1/balance/not-an-address")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error_code"], "INVALID_ADDRESS");
    assert!(body["error"].as_str().unwrap().contains("must start with 0x"));
}

#[actix_web::test]
async fn test_network_and_health() {
    init_logger();
    let app = app!(with_wallet(StubClient::default()));

    let req = test::TestRequest::get().uri("/api/v1/network").to_request();
    let response: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(response["chain_id"], 8453);
    assert_eq!(response["name"], "Base");
    assert_eq!(response["read_only"], false);
    assert!(response["signer"].is_string());

    let req = test::TestRequest::post().uri("/api/v1/health").to_request();
    let response: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(response["status"], "ok");
    assert_eq!(response["latest_block"], 1234);
    assert_eq!(response["chain_matches"], true);
}
