//! Static Base network profiles

use crate::error::ServiceError;
use serde::Serialize;
use std::{fmt, str::FromStr};

/// Immutable description of a Base network
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkProfile {
    /// EIP-155 chain id
    pub chain_id: u64,
    /// Human-readable network name
    pub name: &'static str,
    /// Public JSON-RPC endpoint
    pub rpc_url: &'static str,
    /// Block explorer base URL, without trailing slash
    pub block_explorer: &'static str,
}

/// Base mainnet
pub const BASE_MAINNET: NetworkProfile = NetworkProfile {
    chain_id: 8453,
    name: "Base",
    rpc_url: "https://mainnet.base.org",
    block_explorer: "https://basescan.org",
};

/// Base Sepolia testnet
pub const BASE_SEPOLIA: NetworkProfile = NetworkProfile {
    chain_id: 84532,
    name: "Base Sepolia",
    rpc_url: "https://sepolia.base.org",
    block_explorer: "https://sepolia.basescan.org",
};

impl NetworkProfile {
    /// Look up a profile by its key (`mainnet` or `testnet`)
    pub fn by_name(name: &str) -> Result<&'static NetworkProfile, ServiceError> {
        name.parse::<Network>().map(Network::profile)
    }

    /// Explorer link for a transaction hash
    pub fn tx_url(&self, tx_hash: impl fmt::Display) -> String {
        format!("{}/tx/{}", self.block_explorer, tx_hash)
    }

    /// Explorer link for an account or contract
    pub fn address_url(&self, address: impl fmt::Display) -> String {
        format!("{}/address/{}", self.block_explorer, address)
    }
}

/// Selectable network key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Network {
    #[default]
    Mainnet,
    Testnet,
}

impl Network {
    pub const ALL: [Network; 2] = [Network::Mainnet, Network::Testnet];

    pub fn profile(self) -> &'static NetworkProfile {
        match self {
            Network::Mainnet => &BASE_MAINNET,
            Network::Testnet => &BASE_SEPOLIA,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
        }
    }
}

impl FromStr for Network {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mainnet" => Ok(Network::Mainnet),
            "testnet" => Ok(Network::Testnet),
            other => Err(ServiceError::UnknownNetwork(other.to_string())),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
