use crate::{
    error::ServiceError,
    gas::{buffered_estimate, compute_tiers, GasPriceTiers},
    network::NetworkProfile,
    rpc::{ChainClient, EthereumClient, TransactionSubmitter, WalletClient},
};
use alloy::{
    primitives::{utils::format_ether, Address, TxHash, U256},
    rpc::types::TransactionRequest,
};
use serde::Serialize;
use std::{fmt, sync::Arc};
use tracing::{debug, info, instrument};

/// Result of a successful submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    /// Hash of the broadcast transaction
    pub tx_hash: TxHash,
    /// Block explorer link for the transaction
    pub explorer_url: String,
}

/// Node liveness as seen through the configured endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthStatus {
    pub latest_block: u64,
    pub chain_id: u64,
    /// False when the endpoint serves a different chain than the profile
    pub chain_matches: bool,
}

/// Convenience layer over a Base RPC endpoint
///
/// Holds the selected [`NetworkProfile`], a read client and, when a private
/// key was supplied, a signing identity. Without a key the instance is
/// read-only and [`BaseNetworkUtils::send_transaction`] always fails.
#[derive(Clone)]
pub struct BaseNetworkUtils {
    profile: &'static NetworkProfile,
    client: Arc<dyn ChainClient>,
    wallet: Option<Arc<dyn TransactionSubmitter>>,
}

impl BaseNetworkUtils {
    /// Connect to the public RPC endpoint of `network` (`mainnet` or `testnet`)
    ///
    /// # Errors
    ///
    /// * `UnknownNetwork` if `network` names no known profile
    /// * `InvalidPrivateKey` if a key is given but cannot be parsed
    pub fn new(network: &str, private_key: Option<&str>) -> Result<Self, ServiceError> {
        let profile = NetworkProfile::by_name(network)?;
        Self::connect(profile, profile.rpc_url, private_key)
    }

    /// Same as [`BaseNetworkUtils::new`] but talking to `rpc_url` instead of
    /// the profile's public endpoint
    pub fn with_rpc_url(
        network: &str,
        rpc_url: &str,
        private_key: Option<&str>,
    ) -> Result<Self, ServiceError> {
        let profile = NetworkProfile::by_name(network)?;
        Self::connect(profile, rpc_url, private_key)
    }

    fn connect(
        profile: &'static NetworkProfile,
        rpc_url: &str,
        private_key: Option<&str>,
    ) -> Result<Self, ServiceError> {
        let client = Arc::new(EthereumClient::new(rpc_url)?);
        let wallet = private_key
            .map(|key| WalletClient::new(rpc_url, key))
            .transpose()?
            .map(|wallet| Arc::new(wallet) as Arc<dyn TransactionSubmitter>);

        info!(
            network = profile.name,
            chain_id = profile.chain_id,
            rpc_url,
            read_only = wallet.is_none(),
            "Base network utils initialised"
        );
        Ok(Self::from_parts(profile, client, wallet))
    }

    /// Assemble from already constructed collaborators
    pub fn from_parts(
        profile: &'static NetworkProfile,
        client: Arc<dyn ChainClient>,
        wallet: Option<Arc<dyn TransactionSubmitter>>,
    ) -> Self {
        Self {
            profile,
            client,
            wallet,
        }
    }

    pub fn network(&self) -> &'static NetworkProfile {
        self.profile
    }

    pub fn is_read_only(&self) -> bool {
        self.wallet.is_none()
    }

    pub fn signer_address(&self) -> Option<Address> {
        self.wallet.as_ref().map(|w| w.address())
    }

    /// Fetch the current gas price and derive slow/standard/fast tiers
    #[instrument(skip(self), err)]
    pub async fn gas_prices(&self) -> Result<GasPriceTiers, ServiceError> {
        let quote = self.client.gas_price().await?;
        let tiers = compute_tiers(quote);
        debug!(?tiers, "computed gas price tiers");
        Ok(tiers)
    }

    /// Estimate the gas limit for `tx` with a 20% safety buffer
    #[instrument(skip(self, tx), err)]
    pub async fn estimate_gas(&self, tx: TransactionRequest) -> Result<U256, ServiceError> {
        let raw = self.client.estimate_gas(tx).await?;
        let buffered = buffered_estimate(raw);
        debug!(%raw, %buffered, "buffered gas estimate");
        Ok(buffered)
    }

    /// Sign and broadcast `tx` with the configured key
    ///
    /// Fails with [`ServiceError::WalletNotInitialized`] before any request is
    /// made when the instance is read-only. A missing chain id is set to the
    /// profile's.
    #[instrument(skip(self, tx), err)]
    pub async fn send_transaction(
        &self,
        mut tx: TransactionRequest,
    ) -> Result<SubmissionReceipt, ServiceError> {
        let wallet = self.wallet.as_ref().ok_or(ServiceError::WalletNotInitialized)?;

        if tx.chain_id.is_none() {
            tx.chain_id = Some(self.profile.chain_id);
        }

        let tx_hash = wallet.send_transaction(tx).await?;
        info!(%tx_hash, "transaction submitted");
        Ok(SubmissionReceipt {
            tx_hash,
            explorer_url: self.profile.tx_url(tx_hash),
        })
    }

    /// Native balance of `address`, formatted in ether with 18 decimals
    #[instrument(skip(self), err)]
    pub async fn get_balance(&self, address: Address) -> Result<String, ServiceError> {
        let wei = self.client.get_balance(address).await?;
        Ok(format_ether(wei))
    }

    /// Query the endpoint for its latest block and chain id
    #[instrument(skip(self), err)]
    pub async fn health(&self) -> Result<HealthStatus, ServiceError> {
        let latest_block = self.client.block_number().await?;
        let chain_id = self.client.chain_id().await?;
        Ok(HealthStatus {
            latest_block,
            chain_id,
            chain_matches: chain_id == self.profile.chain_id,
        })
    }
}

impl fmt::Debug for BaseNetworkUtils {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BaseNetworkUtils")
            .field("network", &self.profile.name)
            .field("signer", &self.signer_address())
            .finish_non_exhaustive()
    }
}
