use alloy::primitives::Address;
use serde::Serialize;

use crate::{network::NetworkProfile, utils::HealthStatus};

/// Body of `GET /api/v1/balance/{address}`
#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    pub address: Address,
    /// Decimal ether amount with 18 fractional digits
    pub balance: String,
    pub unit: &'static str,
    /// Block explorer page for the address
    pub explorer_url: String,
}

/// Body of `GET /api/v1/network`
#[derive(Debug, Serialize)]
pub struct NetworkResponse {
    #[serde(flatten)]
    pub profile: NetworkProfile,
    pub read_only: bool,
    pub signer: Option<Address>,
}

/// Body of `POST /api/v1/health`
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub network: &'static str,
    #[serde(flatten)]
    pub health: HealthStatus,
}
