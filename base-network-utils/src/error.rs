use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use alloy::transports::TransportError;
use serde::Serialize;
use thiserror::Error;

/// Service-specific error types
///
/// Configuration problems are reported when a `BaseNetworkUtils` is built,
/// the unauthorized case before any request leaves the process, and upstream
/// failures are carried through untouched from the RPC provider.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Network name is not one of the known Base profiles
    #[error("Unknown network: {0} (expected \"mainnet\" or \"testnet\")")]
    UnknownNetwork(String),

    /// RPC endpoint URL could not be parsed
    #[error("Invalid RPC URL: {0}")]
    InvalidRpcUrl(String),

    /// Private key could not be turned into a signer
    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    /// Malformed account address in a request
    #[error("Bad address in request: {0}")]
    InvalidAddress(String),

    /// Submission attempted on a read-only instance
    #[error("Wallet not initialized")]
    WalletNotInitialized,

    /// Failure reported by the RPC transport or node
    #[error("RPC error: {0}")]
    Rpc(#[from] TransportError),
}

impl ServiceError {
    /// Machine-readable error code used in API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            ServiceError::UnknownNetwork(_) => "UNKNOWN_NETWORK",
            ServiceError::InvalidRpcUrl(_) => "INVALID_RPC_URL",
            ServiceError::InvalidPrivateKey(_) => "INVALID_PRIVATE_KEY",
            ServiceError::InvalidAddress(_) => "INVALID_ADDRESS",
            ServiceError::WalletNotInitialized => "WALLET_NOT_INITIALIZED",
            ServiceError::Rpc(_) => "RPC_ERROR",
        }
    }
}

/// Structured error response for the API
#[derive(Serialize)]
struct ErrorResponse {
    /// Human-readable error message
    error: String,

    /// Machine-readable error code
    error_code: String,

    /// Optional detailed error information
    details: Option<String>,
}

impl ResponseError for ServiceError {
    fn error_response(&self) -> HttpResponse {
        let details = match self {
            ServiceError::Rpc(e) => Some(format!("{e:?}")),
            _ => None,
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
            error_code: self.error_code().to_string(),
            details,
        })
    }

    fn status_code(&self) -> StatusCode {
        match *self {
            ServiceError::UnknownNetwork(_)
            | ServiceError::InvalidRpcUrl(_)
            | ServiceError::InvalidPrivateKey(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::InvalidAddress(_) => StatusCode::BAD_REQUEST,
            ServiceError::WalletNotInitialized => StatusCode::FORBIDDEN,
            ServiceError::Rpc(_) => StatusCode::BAD_GATEWAY,
        }
    }
}
