use eyre::Result;
use std::{env, fmt};

use crate::network::Network;

/// Service configuration structure
///
/// This structure contains all the configuration parameters for the service.
/// It handles loading values from environment variables with appropriate defaults.
#[derive(Clone)]
pub struct Config {
    /// Host address to bind the server to (default: 127.0.0.1)
    pub host: String,

    /// Port to listen on (default: 8080)
    pub port: u16,

    /// Base network to target (default: mainnet)
    pub network: Network,

    /// Overrides the profile's public RPC endpoint, e.g. for a local node
    pub rpc_url: Option<String>,

    /// Hex private key enabling transaction submission
    pub private_key: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// # Environment Variables
    ///
    /// * `HOST` - Server host address (default: "127.0.0.1")
    /// * `PORT` - Server port (default: 8080)
    /// * `BASE_NETWORK` - `mainnet` or `testnet` (default: "mainnet")
    /// * `BASE_RPC_URL` - Optional RPC endpoint override
    /// * `BASE_PRIVATE_KEY` - Optional signing key; read-only without it
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists (useful for development)
        let _ = dotenv::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        // Empty values count as unset so `.env` templates can leave them blank
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let network = match var("BASE_NETWORK") {
            Some(name) => name.parse::<Network>()?,
            None => Network::default(),
        };

        Ok(Config {
            host: var("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: var("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()?,
            network,
            rpc_url: var("BASE_RPC_URL"),
            private_key: var("BASE_PRIVATE_KEY"),
        })
    }

    /// Endpoint the service talks to: the override or the profile's public URL
    pub fn rpc_url(&self) -> &str {
        self.rpc_url
            .as_deref()
            .unwrap_or(self.network.profile().rpc_url)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("network", &self.network)
            .field("rpc_url", &self.rpc_url)
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
