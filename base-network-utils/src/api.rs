use crate::{
    error::ServiceError,
    models::{
        jsonrpc::{
            format_hex_u256, parse_hex_address, parse_hex_bytes, parse_hex_u128, parse_hex_u256,
            parse_hex_u64, JsonRpcError, JsonRpcRequest, JsonRpcSuccess, TransactionParams,
        },
        responses::{BalanceResponse, HealthResponse, NetworkResponse},
    },
    utils::BaseNetworkUtils,
};
use actix_web::{get, post, web, HttpResponse};
use alloy::rpc::types::{TransactionInput, TransactionRequest};
use std::sync::Arc;
use tracing::{debug, error, info};

type Utils = web::Data<Arc<BaseNetworkUtils>>;
type TransactionRpcRequest = web::Json<JsonRpcRequest<Vec<TransactionParams>>>;

/// Gas limit estimate, buffered by 20%, following the `eth_estimateGas` JSON-RPC shape
#[post("/api/v1/eth/estimateGas")]
async fn estimate_gas_jsonrpc(utils: Utils, request: TransactionRpcRequest) -> HttpResponse {
    let tx_params = match request.first_param("eth_estimateGas") {
        Ok(params) => params,
        Err(e) => return HttpResponse::BadRequest().json(e),
    };

    if tx_params.to.is_none() && tx_params.input.is_none() {
        return HttpResponse::BadRequest().json(JsonRpcError::invalid_params(
            request.id.clone(),
            "Either 'to' or 'input' must be provided".to_string(),
        ));
    }

    let tx_request = match build_transaction_request(tx_params) {
        Ok(req) => req,
        Err(err_msg) => {
            return HttpResponse::BadRequest()
                .json(JsonRpcError::invalid_params(request.id.clone(), err_msg));
        }
    };

    match utils.estimate_gas(tx_request).await {
        Ok(gas_limit) => {
            info!("Gas estimation successful: {}", gas_limit);
            HttpResponse::Ok().json(JsonRpcSuccess::new(
                request.id.clone(),
                format_hex_u256(gas_limit),
            ))
        }
        Err(e) => {
            error!("Gas estimation failed: {:?}", e);
            HttpResponse::InternalServerError().json(JsonRpcError::internal_error(
                request.id.clone(),
                format!("Gas estimation failed: {}", e),
            ))
        }
    }
}

/// Sign and broadcast with the service's key, `eth_sendTransaction` shape
#[post("/api/v1/eth/sendTransaction")]
async fn send_transaction_jsonrpc(utils: Utils, request: TransactionRpcRequest) -> HttpResponse {
    let tx_params = match request.first_param("eth_sendTransaction") {
        Ok(params) => params,
        Err(e) => return HttpResponse::BadRequest().json(e),
    };

    let tx_request = match build_transaction_request(tx_params) {
        Ok(req) => req,
        Err(err_msg) => {
            return HttpResponse::BadRequest()
                .json(JsonRpcError::invalid_params(request.id.clone(), err_msg));
        }
    };

    match utils.send_transaction(tx_request).await {
        Ok(receipt) => HttpResponse::Ok().json(JsonRpcSuccess::new(request.id.clone(), receipt)),
        Err(e @ ServiceError::WalletNotInitialized) => HttpResponse::Forbidden().json(
            JsonRpcError::server_error(request.id.clone(), e.to_string(), e.error_code()),
        ),
        Err(e) => {
            error!("Transaction submission failed: {:?}", e);
            HttpResponse::InternalServerError().json(JsonRpcError::internal_error(
                request.id.clone(),
                format!("Transaction submission failed: {}", e),
            ))
        }
    }
}

/// Slow/standard/fast gas prices in wei, as hex quantities
#[get("/api/v1/gasPrices")]
async fn gas_prices(utils: Utils) -> Result<HttpResponse, ServiceError> {
    let tiers = utils.gas_prices().await?;
    Ok(HttpResponse::Ok().json(tiers))
}

/// Native balance of an address, formatted in ether
#[get("/api/v1/balance/{address}")]
async fn balance(utils: Utils, path: web::Path<String>) -> Result<HttpResponse, ServiceError> {
    let address = parse_hex_address(&path).map_err(ServiceError::InvalidAddress)?;

    let ether = utils.get_balance(address).await?;
    Ok(HttpResponse::Ok().json(BalanceResponse {
        address,
        balance: ether,
        unit: "ETH",
        explorer_url: utils.network().address_url(address),
    }))
}

/// Selected network profile and signing mode
#[get("/api/v1/network")]
async fn network(utils: Utils) -> HttpResponse {
    HttpResponse::Ok().json(NetworkResponse {
        profile: utils.network().clone(),
        read_only: utils.is_read_only(),
        signer: utils.signer_address(),
    })
}

/// Service health check that verifies the RPC connection is working
#[post("/api/v1/health")]
async fn health_check(utils: Utils) -> Result<HttpResponse, ServiceError> {
    info!("Health check requested");

    let health = utils.health().await?;
    Ok(HttpResponse::Ok().json(HealthResponse {
        status: if health.chain_matches { "ok" } else { "chain_mismatch" },
        network: utils.network().name,
        health,
    }))
}

/// Configure the API routes for the service
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(estimate_gas_jsonrpc)
        .service(send_transaction_jsonrpc)
        .service(gas_prices)
        .service(balance)
        .service(network)
        .service(health_check);
}

/// Build an alloy `TransactionRequest` from the JSON-RPC call object
///
/// Only fields present in the request are set; the node or the wallet
/// provider fills the rest.
pub fn build_transaction_request(params: &TransactionParams) -> Result<TransactionRequest, String> {
    let mut tx_request = TransactionRequest::default();
    debug!("Building transaction request with params: {:?}", params);

    if let Some(from) = &params.from {
        tx_request.from = Some(parse_hex_address(from)?);
    }
    if let Some(to) = &params.to {
        tx_request.to = Some(parse_hex_address(to)?.into());
    }
    if let Some(gas) = &params.gas {
        tx_request.gas = Some(parse_hex_u64(gas)?);
    }
    if let Some(value) = &params.value {
        tx_request.value = Some(parse_hex_u256(value)?);
    }
    if let Some(input) = &params.input {
        tx_request.input = TransactionInput::new(parse_hex_bytes(input)?);
    }

    // Legacy pricing wins when both styles are present
    if let Some(gas_price) = &params.gas_price {
        tx_request.gas_price = Some(parse_hex_u128(gas_price)?);
    } else {
        if let Some(max_fee) = &params.max_fee_per_gas {
            tx_request.max_fee_per_gas = Some(parse_hex_u128(max_fee)?);
        }
        if let Some(priority_fee) = &params.max_priority_fee_per_gas {
            tx_request.max_priority_fee_per_gas = Some(parse_hex_u128(priority_fee)?);
        }
    }

    if let Some(nonce) = &params.nonce {
        tx_request.nonce = Some(parse_hex_u64(nonce)?);
    }
    if let Some(chain_id) = &params.chain_id {
        tx_request.chain_id = Some(parse_hex_u64(chain_id)?);
    }

    debug!("Transaction request built: {:?}", tx_request);
    Ok(tx_request)
}
